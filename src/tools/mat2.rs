//! Depuración de contenido de documentos mediante mat2.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ToolError;

use super::ScrubTool;

const TOOL: &str = "mat2";

pub struct Mat2 {
    binary: PathBuf,
}

impl Mat2 {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }
}

impl ScrubTool for Mat2 {
    /// Depura el documento en el lugar. Solo aplica a pdf/xlsx/docx; un fallo
    /// aquí es una advertencia para el pipeline, no un aborto.
    fn scrub_in_place(&self, path: &Path) -> Result<(), ToolError> {
        let output = Command::new(&self.binary)
            .arg("--inplace")
            .arg(path)
            .output()
            .map_err(|source| ToolError::Spawn { tool: TOOL, source })?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                tool: TOOL,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
