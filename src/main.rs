mod classifier;
mod cleaner;
mod config;
mod error;
mod extensions;
mod patterns;
mod report;
mod scanner;
mod sniffer;
mod tools;

use clap::Parser;
use console::style;
use std::path::PathBuf;
use std::process;

use cleaner::{CleanMode, Cleaner};
use config::{Config, Mode};
use error::ConfigError;
use patterns::PatternCatalog;
use tools::{ExifTool, Mat2, Qpdf, RepairTool, ScrubTool};

/// Analiza y limpia metadata sensible de archivos en un directorio.
#[derive(Parser)]
#[command(name = "metainfo", version, about)]
struct Cli {
    /// Carpeta a inspeccionar
    #[arg(short = 'i', long = "input", value_name = "RUTA")]
    input: Option<PathBuf>,

    /// Carpeta de salida para los informes
    #[arg(short = 'o', long = "output", value_name = "RUTA", default_value = "./")]
    output: PathBuf,

    /// Eliminar toda la metadata de los archivos soportados
    #[arg(long, conflicts_with_all = ["wipe_sensitive", "report_sensitive"])]
    wipe_all: bool,

    /// Eliminar solo la metadata clasificada como sensible
    #[arg(long, conflicts_with = "report_sensitive")]
    wipe_sensitive: bool,

    /// Informar únicamente los campos sensibles
    #[arg(long)]
    report_sensitive: bool,

    /// Convertir el informe a HTML (requiere pandoc)
    #[arg(long)]
    html: bool,

    /// Convertir el informe a PDF (requiere pandoc, implica --html)
    #[arg(long)]
    pdf: bool,

    /// Mostrar información detallada
    #[arg(long)]
    verbose: bool,

    /// Mostrar las extensiones soportadas y salir
    #[arg(long)]
    show_extensions: bool,

    /// Mostrar los patrones sensibles por idioma y salir
    #[arg(long)]
    show_patterns: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.show_extensions {
        println!("{}", extensions::describe());
        return;
    }
    if cli.show_patterns {
        println!("{}", patterns::describe_by_language());
        return;
    }

    let Some(input) = cli.input else {
        eprintln!(
            "{}",
            style("Falta la carpeta de entrada: use --input <RUTA>").red()
        );
        process::exit(1);
    };

    let mode = if cli.wipe_all {
        Mode::WipeAll
    } else if cli.wipe_sensitive {
        Mode::WipeSensitive
    } else if cli.report_sensitive {
        Mode::ReportSensitive
    } else {
        Mode::Report
    };

    let config = match Config::new(input, cli.output, mode, cli.html, cli.pdf, cli.verbose) {
        Ok(config) => config,
        Err(error) => abort_with(error),
    };

    let exiftool = match tools::require_binary("exiftool") {
        Ok(binary) => ExifTool::new(binary),
        Err(error) => abort_with(error),
    };

    let catalog = PatternCatalog::load();
    let extensions = extensions::all_extensions();

    match config.mode {
        Mode::Report | Mode::ReportSensitive => {
            run_report(&config, &exiftool, &catalog, &extensions)
        }
        Mode::WipeAll | Mode::WipeSensitive => run_wipe(&config, &exiftool, &catalog, &extensions),
    }
}

fn abort_with(error: ConfigError) -> ! {
    eprintln!("{}", style(format!("Error: {}", error)).red().bold());
    process::exit(1);
}

fn run_report(config: &Config, exiftool: &ExifTool, catalog: &PatternCatalog, extensions: &[&str]) {
    if config.mode.only_sensitive() {
        println!(
            "{}",
            style("Generando informe solo con datos sensibles").cyan()
        );
    } else {
        println!("{}", style("Generando informe de metadatos").cyan());
    }

    let results =
        scanner::scan_with_metadata(&config.input_path, extensions, exiftool, config.verbose);
    let aggregate = report::aggregate(results, config.mode.only_sensitive(), catalog);

    println!(
        "{}",
        style(format!(
            "│ Archivos analizados: {} | con metadatos: {} | con datos sensibles: {}",
            aggregate.total_files, aggregate.files_with_metadata, aggregate.files_with_sensitive
        ))
        .dim()
    );

    match report::markdown::write_report(&aggregate, config) {
        Ok(generated) => {
            if config.verbose {
                println!(
                    "{}",
                    style(format!("│ Informe base: {}", generated.markdown.display())).dim()
                );
                if let Some(html) = &generated.html {
                    println!("{}", style(format!("│ Informe HTML: {}", html.display())).dim());
                }
                if let Some(pdf) = &generated.pdf {
                    println!("{}", style(format!("│ Informe PDF: {}", pdf.display())).dim());
                }
            }
        }
        Err(error) => {
            eprintln!(
                "{}",
                style(format!("No se pudo escribir el informe: {}", error)).red()
            );
            process::exit(1);
        }
    }
}

fn run_wipe(config: &Config, exiftool: &ExifTool, catalog: &PatternCatalog, extensions: &[&str]) {
    let clean_mode = match config.mode {
        Mode::WipeSensitive => CleanMode::SensitiveOnly,
        _ => CleanMode::Full,
    };

    // mat2 y qpdf solo participan en la limpieza completa, y son opcionales:
    // su ausencia solo desactiva etapas.
    let (scrub, repair) = if clean_mode.uses_content_tools() {
        let scrub = tools::find_binary("mat2").map(Mat2::new);
        if scrub.is_none() {
            eprintln!(
                "{}",
                style("│ mat2 no está disponible; se omite la depuración de contenido").yellow()
            );
        }
        let repair = tools::find_binary("qpdf").map(Qpdf::new);
        if repair.is_none() {
            eprintln!(
                "{}",
                style("│ qpdf no está disponible; se omite la reparación de PDFs").yellow()
            );
        }
        (scrub, repair)
    } else {
        (None, None)
    };

    let cleaner = Cleaner {
        metadata: exiftool,
        scrub: scrub.as_ref().map(|s| s as &dyn ScrubTool),
        repair: repair.as_ref().map(|r| r as &dyn RepairTool),
        catalog,
        verbose: config.verbose,
    };

    // El recorrido siempre completa; los fallos por archivo quedan resumidos
    // y no cambian el estado de salida del proceso.
    cleaner.clean_tree(&config.input_path, extensions, clean_mode);
}
