//! Taxonomía de errores del pipeline de análisis y limpieza.

use std::path::PathBuf;
use thiserror::Error;

/// Errores estructurales que abortan la ejecución antes de tocar archivos.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("La ruta de entrada `{0}` no existe")]
    MissingInputPath(PathBuf),

    #[error("La ruta de entrada `{0}` no es un directorio")]
    InputNotDirectory(PathBuf),

    #[error("No se pudo crear el directorio de salida `{path}`: {source}")]
    OutputDirUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Herramienta externa requerida no encontrada: {0}")]
    MissingTool(&'static str),
}

/// Errores por archivo: se registran y la ejecución continúa con el siguiente.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("No se pudo extraer metadata de `{path}`: {reason}")]
    Extraction { path: PathBuf, reason: String },

    #[error("Integridad irrecuperable en `{path}`: {reason}")]
    Integrity { path: PathBuf, reason: String },

    #[error("Fallo al eliminar metadata de `{path}`: {reason}")]
    Removal { path: PathBuf, reason: String },
}

/// Fallos de una herramienta externa, tal como los reporta el subproceso.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("No se pudo ejecutar `{tool}`: {source}")]
    Spawn {
        tool: &'static str,
        source: std::io::Error,
    },

    #[error("`{tool}` terminó con error: {stderr}")]
    Failed { tool: &'static str, stderr: String },

    #[error("`{tool}` excedió el tiempo límite de {seconds} segundos")]
    Timeout { tool: &'static str, seconds: u64 },

    #[error("Salida de `{tool}` no interpretable: {reason}")]
    BadOutput { tool: &'static str, reason: String },
}
