//! Colaboradores externos del pipeline, detrás de interfaces intercambiables.
//!
//! La decodificación de metadata es autoridad exclusiva de exiftool; qpdf
//! repara documentos PDF dañados y mat2 depura contenido de documentos.

mod exiftool;
mod mat2;
mod qpdf;

#[cfg(test)]
pub mod testing;

pub use exiftool::ExifTool;
pub use mat2::Mat2;
pub use qpdf::Qpdf;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ToolError};

/// Herramienta de metadata: lectura y eliminación de etiquetas opacas.
pub trait MetadataTool {
    /// Lee la metadata como lista ordenada de pares clave/valor.
    fn read(&self, path: &Path) -> Result<Vec<(String, String)>, ToolError>;

    /// Elimina toda la metadata escribiendo a un destino fresco que luego
    /// reemplaza atómicamente al original.
    fn remove_all(&self, path: &Path) -> Result<(), ToolError>;

    /// Elimina un conjunto de etiquetas en un único comando combinado.
    /// Eliminar una etiqueta ausente no es un error.
    fn remove_tags(&self, path: &Path, tags: &[String]) -> Result<(), ToolError>;

    /// Mecanismo alternativo: elimina una sola etiqueta sobrescribiendo el
    /// archivo en el lugar. Se usa como respaldo etiqueta por etiqueta.
    fn remove_tag_in_place(&self, path: &Path, tag: &str) -> Result<(), ToolError>;
}

/// Depurador de contenido para un conjunto reducido de formatos de documento.
pub trait ScrubTool {
    fn scrub_in_place(&self, path: &Path) -> Result<(), ToolError>;
}

/// Reparador estructural de documentos, acotado por un tiempo límite.
pub trait RepairTool {
    /// Intenta reparar el documento y devuelve la ruta del archivo reparado.
    fn repair(&self, path: &Path) -> Result<PathBuf, ToolError>;
}

/// Localiza un binario requerido; su ausencia es un error de configuración.
pub fn require_binary(name: &'static str) -> Result<PathBuf, ConfigError> {
    which::which(name).map_err(|_| ConfigError::MissingTool(name))
}

/// Localiza un binario opcional; su ausencia solo desactiva etapas.
pub fn find_binary(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Crea un nombre de archivo temporal único en el mismo directorio que `path`,
/// de modo que el reemplazo final sea un rename dentro del mismo sistema de
/// archivos.
pub fn generate_temp_filename(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let extension = path.extension().unwrap_or_default().to_string_lossy();

    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    parent.join(format!(".{}_temp_{}.{}", stem, timestamp, extension))
}

/// Reemplaza atómicamente `original` con `replacement`, conservando los bits
/// de permisos del archivo original.
pub fn replace_preserving_permissions(original: &Path, replacement: &Path) -> std::io::Result<()> {
    let permissions = fs::metadata(original)?.permissions();
    fs::set_permissions(replacement, permissions)?;
    fs::rename(replacement, original).inspect_err(|_| {
        let _ = fs::remove_file(replacement);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn el_nombre_temporal_queda_en_el_mismo_directorio() {
        let temp = generate_temp_filename(Path::new("/datos/foto.jpg"));
        assert_eq!(temp.parent(), Some(Path::new("/datos")));
        let name = temp.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".foto_temp_"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn dos_nombres_temporales_consecutivos_no_colisionan() {
        let a = generate_temp_filename(Path::new("x.pdf"));
        let b = generate_temp_filename(Path::new("x.pdf"));
        assert_ne!(a, b);
    }

    #[test]
    fn el_reemplazo_conserva_los_permisos_del_original() {
        let dir = tempdir().expect("no se pudo crear el directorio temporal");
        let original = dir.path().join("doc.pdf");
        let replacement = dir.path().join("doc_nuevo.pdf");
        fs::write(&original, b"viejo").expect("no se pudo escribir el original");
        fs::write(&replacement, b"nuevo").expect("no se pudo escribir el reemplazo");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&original, fs::Permissions::from_mode(0o640))
                .expect("no se pudieron fijar permisos");
        }

        replace_preserving_permissions(&original, &replacement)
            .expect("el reemplazo debería funcionar");

        assert_eq!(fs::read(&original).expect("no se pudo leer"), b"nuevo");
        assert!(!replacement.exists());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&original)
                .expect("no se pudo leer metadata")
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o640);
        }
    }
}
