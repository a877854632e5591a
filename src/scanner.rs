//! Recorrido recursivo del árbol de directorios con filtro por extensión.

use console::style;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::FileError;
use crate::tools::MetadataTool;

/// Archivo aceptado por el filtro de extensiones durante el recorrido.
#[derive(Clone, Debug)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// Ruta relativa a la raíz analizada, para el informe.
    pub relative_path: PathBuf,
    /// Extensión normalizada en minúsculas, sin punto.
    pub extension: String,
}

/// Archivo escaneado junto con el resultado de extraer su metadata.
pub struct ScanResult {
    pub file: ScannedFile,
    pub metadata: Result<Vec<(String, String)>, FileError>,
}

/// Comprueba el filtro de extensiones tal como lo hacía el recorrido original:
/// se aceptan la variante literal, toda en minúsculas y toda en mayúsculas.
/// Una extensión de caja mixta como `.Jpg` no coincide (limitación documentada).
pub fn matches_extension(file_name: &str, extensions: &[&str]) -> bool {
    extensions.iter().any(|ext| {
        file_name.ends_with(&format!(".{}", ext.to_lowercase()))
            || file_name.ends_with(&format!(".{}", ext.to_uppercase()))
    })
}

/// Recorre `root` en profundidad y devuelve los archivos que pasan el filtro.
///
/// Los enlaces simbólicos a directorios no se siguen. Una entrada ilegible se
/// reporta y se omite; el recorrido siempre completa el resto del árbol.
pub fn collect_supported_files(root: &Path, extensions: &[&str], verbose: bool) -> Vec<ScannedFile> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                eprintln!(
                    "{}",
                    style(format!("│ Entrada omitida durante el recorrido: {}", error)).yellow()
                );
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !matches_extension(&file_name, extensions) {
            continue;
        }

        let path = entry.path().to_path_buf();
        let relative_path = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        if verbose {
            println!("{}", style(format!("│ Encontrado: {}", path.display())).dim());
        }

        files.push(ScannedFile {
            path,
            relative_path,
            extension,
        });
    }

    files
}

/// Recorre el árbol y empareja cada archivo con su metadata extraída.
///
/// Un fallo de extracción no aborta el recorrido: el archivo se entrega con
/// el error para que el agregador lo registre como registro vacío.
pub fn scan_with_metadata(
    root: &Path,
    extensions: &[&str],
    tool: &dyn MetadataTool,
    verbose: bool,
) -> Vec<ScanResult> {
    collect_supported_files(root, extensions, verbose)
        .into_iter()
        .map(|file| {
            let metadata = tool.read(&file.path).map_err(|error| FileError::Extraction {
                path: file.path.clone(),
                reason: error.to_string(),
            });
            if let Err(error) = &metadata {
                eprintln!("{}", style(error.to_string()).yellow());
            }
            ScanResult { file, metadata }
        })
        .collect()
}
