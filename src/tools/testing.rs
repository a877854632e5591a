//! Dobles de prueba para los colaboradores externos del pipeline.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::ToolError;

use super::{MetadataTool, RepairTool, ScrubTool};

/// Herramienta de metadata en memoria: cada archivo tiene una lista ordenada
/// de pares clave/valor y las operaciones de eliminación la mutan igual que
/// lo haría exiftool sobre el disco.
#[derive(Default)]
pub struct FakeMetadataTool {
    pub store: RefCell<HashMap<PathBuf, Vec<(String, String)>>>,
    pub fail_reads: RefCell<HashSet<PathBuf>>,
    /// Falla el intento combinado de eliminación de etiquetas.
    pub fail_combined_removal: Cell<bool>,
    /// Cantidad de fallos pendientes para `remove_all` (simula errores
    /// estructurales que se recuperan tras una reparación).
    pub remove_all_failures: Cell<u32>,
    pub fail_tags_in_place: RefCell<HashSet<String>>,
    /// Claves que las eliminaciones dejan intactas sin reportar error, como
    /// hace exiftool con segmentos que no sabe reescribir.
    pub stubborn_tags: RefCell<HashSet<String>>,
}

impl FakeMetadataTool {
    pub fn with_file(self, path: impl Into<PathBuf>, fields: &[(&str, &str)]) -> Self {
        self.store.borrow_mut().insert(
            path.into(),
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self
    }

    pub fn fields_of(&self, path: &Path) -> Vec<(String, String)> {
        self.store.borrow().get(path).cloned().unwrap_or_default()
    }

    fn remove_matching(&self, path: &Path, tags: &[String]) {
        let stubborn = self.stubborn_tags.borrow();
        let mut store = self.store.borrow_mut();
        if let Some(fields) = store.get_mut(path) {
            fields.retain(|(key, _)| {
                stubborn.contains(key) || !tags.iter().any(|tag| tag_matches(key, tag))
            });
        }
    }
}

/// Una etiqueta coincide con la clave completa o con la clave sin su grupo,
/// igual que la sintaxis `-GRUPO:ETIQUETA=` de exiftool.
fn tag_matches(key: &str, tag: &str) -> bool {
    let bare = key.rsplit(':').next().unwrap_or(key);
    key.eq_ignore_ascii_case(tag) || bare.eq_ignore_ascii_case(tag)
}

impl MetadataTool for FakeMetadataTool {
    fn read(&self, path: &Path) -> Result<Vec<(String, String)>, ToolError> {
        if self.fail_reads.borrow().contains(path) {
            return Err(ToolError::Failed {
                tool: "fake",
                stderr: "lectura forzada a fallar".to_string(),
            });
        }
        Ok(self.fields_of(path))
    }

    fn remove_all(&self, path: &Path) -> Result<(), ToolError> {
        let pending = self.remove_all_failures.get();
        if pending > 0 {
            self.remove_all_failures.set(pending - 1);
            return Err(ToolError::Failed {
                tool: "fake",
                stderr: "Format error in file".to_string(),
            });
        }

        let stubborn = self.stubborn_tags.borrow();
        let mut store = self.store.borrow_mut();
        if let Some(fields) = store.get_mut(path) {
            // exiftool conserva los campos intrínsecos del sistema de archivos.
            fields.retain(|(key, _)| {
                crate::cleaner::is_system_field(key) || stubborn.contains(key)
            });
        }
        Ok(())
    }

    fn remove_tags(&self, path: &Path, tags: &[String]) -> Result<(), ToolError> {
        if self.fail_combined_removal.get() {
            return Err(ToolError::Failed {
                tool: "fake",
                stderr: "eliminación combinada forzada a fallar".to_string(),
            });
        }
        self.remove_matching(path, tags);
        Ok(())
    }

    fn remove_tag_in_place(&self, path: &Path, tag: &str) -> Result<(), ToolError> {
        if self.fail_tags_in_place.borrow().contains(tag) {
            return Err(ToolError::Failed {
                tool: "fake",
                stderr: format!("eliminación de `{}` forzada a fallar", tag),
            });
        }
        self.remove_matching(path, std::slice::from_ref(&tag.to_string()));
        Ok(())
    }
}

/// Depurador de contenido que registra sus invocaciones.
#[derive(Default)]
pub struct FakeScrubTool {
    pub fail: Cell<bool>,
    pub calls: RefCell<Vec<PathBuf>>,
}

impl ScrubTool for FakeScrubTool {
    fn scrub_in_place(&self, path: &Path) -> Result<(), ToolError> {
        self.calls.borrow_mut().push(path.to_path_buf());
        if self.fail.get() {
            return Err(ToolError::Failed {
                tool: "fake-scrub",
                stderr: "depuración forzada a fallar".to_string(),
            });
        }
        Ok(())
    }
}

/// Reparador que produce un PDF mínimo válido junto al original.
#[derive(Default)]
pub struct FakeRepairTool {
    pub fail: Cell<bool>,
    pub calls: Cell<u32>,
}

impl RepairTool for FakeRepairTool {
    fn repair(&self, path: &Path) -> Result<PathBuf, ToolError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail.get() {
            return Err(ToolError::Failed {
                tool: "fake-repair",
                stderr: "reparación forzada a fallar".to_string(),
            });
        }

        let repaired = super::generate_temp_filename(path);
        std::fs::write(&repaired, b"%PDF-1.4\n% reparado\n").map_err(|source| {
            ToolError::Spawn {
                tool: "fake-repair",
                source,
            }
        })?;
        Ok(repaired)
    }
}
