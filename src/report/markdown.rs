//! Generación del informe Markdown y conversión opcional a HTML/PDF.

use chrono::Local;
use console::style;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::Config;
use crate::tools::find_binary;

use super::AggregateReport;

const MAX_VALUE_LENGTH: usize = 100;

/// Rutas de los documentos producidos por una generación de informe.
pub struct GeneratedReport {
    pub markdown: PathBuf,
    pub html: Option<PathBuf>,
    pub pdf: Option<PathBuf>,
}

/// Escribe el informe Markdown en el directorio de salida y, si se pidió,
/// lo convierte con pandoc. Un fallo de conversión es una advertencia: el
/// informe base sigue siendo válido y se entrega igualmente.
pub fn write_report(report: &AggregateReport, config: &Config) -> std::io::Result<GeneratedReport> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let base_name = format!("informe_metadata_{}", timestamp);
    let markdown_path = config.output_dir.join(format!("{}.md", base_name));

    let content = render_markdown(report, &config.input_path, config.mode.only_sensitive());
    std::fs::write(&markdown_path, content)?;

    println!(
        "{}",
        style(format!("│ Informe Markdown generado: {}", markdown_path.display())).green()
    );

    let html = if config.html {
        convert_with_pandoc(&markdown_path, &config.output_dir.join(format!("{}.html", base_name)))
    } else {
        None
    };

    let pdf = if config.pdf {
        convert_with_pandoc(&markdown_path, &config.output_dir.join(format!("{}.pdf", base_name)))
    } else {
        None
    };

    Ok(GeneratedReport {
        markdown: markdown_path,
        html,
        pdf,
    })
}

fn convert_with_pandoc(markdown: &Path, target: &Path) -> Option<PathBuf> {
    let Some(pandoc) = find_binary("pandoc") else {
        eprintln!(
            "{}",
            style("│ pandoc no está disponible; se omite la conversión del informe").yellow()
        );
        return None;
    };

    let result = Command::new(pandoc)
        .arg("--standalone")
        .arg(markdown)
        .arg("-o")
        .arg(target)
        .output();

    match result {
        Ok(output) if output.status.success() => {
            println!(
                "{}",
                style(format!("│ Informe convertido: {}", target.display())).green()
            );
            Some(target.to_path_buf())
        }
        Ok(output) => {
            eprintln!(
                "{}",
                style(format!(
                    "│ No se pudo convertir el informe a {}: {}",
                    target.display(),
                    String::from_utf8_lossy(&output.stderr).trim()
                ))
                .yellow()
            );
            None
        }
        Err(error) => {
            eprintln!(
                "{}",
                style(format!("│ No se pudo invocar pandoc: {}", error)).yellow()
            );
            None
        }
    }
}

/// Produce el documento Markdown completo del informe.
pub fn render_markdown(report: &AggregateReport, src_path: &Path, only_sensitive: bool) -> String {
    let now = Local::now().format("%Y-%m-%d %H:%M:%S");

    let mut content = format!(
        "# Informe de Análisis de Metadatos\n\n\
         ## Información General\n\
         - **Directorio analizado**: `{}`\n\
         - **Fecha del análisis**: {}\n\
         - **Total de archivos analizados**: {}\n\
         - **Archivos con metadatos**: {}\n\
         - **Archivos con información sensible**: {}\n",
        src_path.display(),
        now,
        report.total_files,
        report.files_with_metadata,
        report.files_with_sensitive,
    );

    if only_sensitive {
        content.push_str("- **Filtro**: solo campos sensibles\n");
    }

    content.push_str(
        "\n## Resumen por Tipo de Archivo\n\
         | Extensión | Cantidad | Con Metadatos | Con Datos Sensibles |\n\
         |-----------|----------|---------------|---------------------|\n",
    );

    for stats in report.extension_stats.values() {
        content.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            stats.extension, stats.file_count, stats.files_with_metadata, stats.files_with_sensitive
        ));
    }

    content.push_str("\n## Detalles por Archivo\n\n");

    for record in &report.files {
        let sensitive_mark = if record.has_sensitive {
            " ⚠️ **CONTIENE DATOS SENSIBLES**"
        } else {
            ""
        };
        let file_name = Path::new(&record.path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| record.path.clone());

        content.push_str(&format!("### {}{}\n\n", file_name, sensitive_mark));
        content.push_str(&format!("**Ruta**: `{}`\n\n", record.path));
        content.push_str(&format!(
            "**Total de campos de metadatos**: {}\n\n",
            record.total_field_count
        ));

        content.push_str(
            "| Campo | Valor | Sensible | Patrón Coincidente |\n\
             |-------|-------|----------|--------------------|\n",
        );

        for field in &record.fields {
            let sensitive_status = if field.is_sensitive { "Sí" } else { "No" };
            let patterns = if field.matched_patterns.is_empty() {
                "-".to_string()
            } else {
                field.matched_patterns.join(", ")
            };
            content.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                field.key,
                escape_cell(&field.value),
                sensitive_status,
                patterns
            ));
        }

        content.push_str("\n---\n\n");
    }

    content.push_str(
        "## Recomendaciones de Seguridad\n\n\
         1. **Limpieza de Metadatos**: Considere limpiar los metadatos de archivos antes de compartirlos, especialmente aquellos marcados como sensibles.\n\
         2. **Revisión Manual**: Verifique manualmente los archivos con datos sensibles para confirmar que la información identificada es realmente sensible.\n\
         3. **Políticas de Seguridad**: Implemente políticas para la verificación rutinaria de metadatos antes de publicar o compartir archivos.\n\
         4. **Herramientas de Limpieza**: Utilice la funcionalidad de limpieza de esta herramienta con `--wipe-all` o `--wipe-sensitive`.\n\n\
         ---\n\n\
         *Informe generado por MetaInfo*\n",
    );

    content
}

/// Escapa una celda de tabla Markdown y acorta los valores demasiado largos.
fn escape_cell(value: &str) -> String {
    let flat = value.replace('|', "\\|").replace('\n', " ");
    if flat.chars().count() > MAX_VALUE_LENGTH {
        let truncated: String = flat.chars().take(MAX_VALUE_LENGTH - 3).collect();
        format!("{}...", truncated)
    } else {
        flat
    }
}
