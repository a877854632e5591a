//! Eliminación destructiva de metadata, archivo por archivo.
//!
//! Dos pipelines independientes: limpieza completa (todas las etiquetas más
//! una pasada específica) y limpieza selectiva (solo los campos que el
//! clasificador marcó como sensibles). El fallo de un archivo nunca detiene
//! el recorrido del resto del árbol.

mod full;
mod sensitive;


use console::style;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::patterns::PatternCatalog;
use crate::scanner::collect_supported_files;
use crate::tools::{MetadataTool, RepairTool, ScrubTool};

/// Modo de limpieza seleccionado por la CLI.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum CleanMode {
    Full,
    SensitiveOnly,
}

impl CleanMode {
    /// Solo la limpieza completa invoca las herramientas de contenido
    /// externas (mat2 y qpdf); la selectiva trabaja únicamente con exiftool.
    pub fn uses_content_tools(self) -> bool {
        matches!(self, CleanMode::Full)
    }
}

/// Etapas completadas por los pipelines, en orden de ejecución.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum CleanStage {
    TypeSniffed,
    IntegrityCheck,
    IntegrityRepaired,
    ContentScrub,
    PostScrubIntegrityCheck,
    GeneralStrip,
    TargetedStrip,
    MetadataRead,
    Classified,
    TargetedRemoveAttempt,
    FallbackPerTagRemove,
    Verify,
}

/// Estado terminal de un archivo tras su pipeline.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum CleanStatus {
    Cleaned,
    CleanedWithResidual,
    Failed,
}

/// Resultado de limpiar un archivo. Solo alimenta el resumen en consola.
#[derive(Clone, Debug, Serialize)]
pub struct CleanOutcome {
    pub path: PathBuf,
    pub mode: CleanMode,
    pub stages_completed: Vec<CleanStage>,
    pub residual_field_count: usize,
    pub status: CleanStatus,
}

impl CleanOutcome {
    fn failed(path: &Path, mode: CleanMode, stages: Vec<CleanStage>) -> Self {
        Self {
            path: path.to_path_buf(),
            mode,
            stages_completed: stages,
            residual_field_count: 0,
            status: CleanStatus::Failed,
        }
    }
}

/// Campos intrínsecos del sistema de archivos o de la propia herramienta que
/// la verificación no cuenta como residuales.
const SYSTEM_FIELDS: &[&str] = &[
    "SourceFile",
    "ExifToolVersion",
    "FileName",
    "Directory",
    "FileSize",
    "FileModifyDate",
    "FileAccessDate",
    "FileInodeChangeDate",
    "FilePermissions",
    "FileType",
    "FileTypeExtension",
    "MIMEType",
];

/// Decide si una clave pertenece a la contabilidad intrínseca, con o sin
/// prefijo de grupo. Solo la lista fija cuenta: otros campos del grupo
/// `File:`, como `File:Comment` (el segmento COM de un JPEG), son metadata
/// real y sí se contabilizan como residuales.
pub fn is_system_field(key: &str) -> bool {
    let bare = key.rsplit(':').next().unwrap_or(key);
    SYSTEM_FIELDS.iter().any(|f| f.eq_ignore_ascii_case(bare))
}

/// Cuenta los campos que siguen presentes tras una limpieza, ignorando los
/// intrínsecos.
pub(crate) fn count_residual_fields(fields: &[(String, String)]) -> usize {
    fields.iter().filter(|(key, _)| !is_system_field(key)).count()
}

/// Orquestador de limpieza: recibe los colaboradores externos una sola vez y
/// los aplica archivo por archivo.
pub struct Cleaner<'a> {
    pub metadata: &'a dyn MetadataTool,
    pub scrub: Option<&'a dyn ScrubTool>,
    pub repair: Option<&'a dyn RepairTool>,
    pub catalog: &'a PatternCatalog,
    pub verbose: bool,
}

impl Cleaner<'_> {
    /// Ejecuta el pipeline correspondiente sobre un archivo.
    pub fn clean_file(&self, path: &Path, mode: CleanMode) -> CleanOutcome {
        match mode {
            CleanMode::Full => full::full_wipe(self, path),
            CleanMode::SensitiveOnly => sensitive::sensitive_wipe(self, path),
        }
    }

    /// Recorre el árbol y limpia cada archivo soportado. El recorrido siempre
    /// completa: los fallos quedan registrados en los resultados.
    pub fn clean_tree(&self, root: &Path, extensions: &[&str], mode: CleanMode) -> Vec<CleanOutcome> {
        let header = match mode {
            CleanMode::Full => "Modo de limpieza: TODOS LOS METADATOS",
            CleanMode::SensitiveOnly => "Modo de limpieza: SOLO DATOS SENSIBLES",
        };
        println!("{}", style(header).cyan().bold());

        let files = collect_supported_files(root, extensions, self.verbose);
        if files.is_empty() {
            println!(
                "{}",
                style("No se encontraron archivos con las extensiones soportadas.").yellow()
            );
            return Vec::new();
        }

        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            println!(
                "{}",
                style(format!("Limpiando metadatos de {} ...", file.path.display())).dim()
            );
            outcomes.push(self.clean_file(&file.path, mode));
        }

        print_summary(&outcomes);
        outcomes
    }
}

fn print_summary(outcomes: &[CleanOutcome]) {
    let cleaned = outcomes
        .iter()
        .filter(|o| o.status == CleanStatus::Cleaned)
        .count();
    let with_residual = outcomes
        .iter()
        .filter(|o| o.status == CleanStatus::CleanedWithResidual)
        .count();
    let failed = outcomes
        .iter()
        .filter(|o| o.status == CleanStatus::Failed)
        .count();

    println!("\n{}", style("┌─ Resumen de limpieza ─").cyan());
    println!("{}", style(format!("│ Limpios: {}", cleaned)).green());
    if with_residual > 0 {
        println!(
            "{}",
            style(format!("│ Limpios con campos residuales: {}", with_residual)).yellow()
        );
    }
    if failed > 0 {
        println!("{}", style(format!("│ Fallidos: {}", failed)).red());
    }
    println!("{}", style("└─").cyan());
    println!(
        "{}",
        style("Proceso de limpieza de metadatos completado.").green()
    );
}
