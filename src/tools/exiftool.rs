//! Invocación de exiftool, la autoridad para decodificar y escribir metadata.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::ToolError;

use super::{generate_temp_filename, replace_preserving_permissions, MetadataTool};

const TOOL: &str = "exiftool";

/// Envoltorio del binario `exiftool` resuelto en el arranque.
pub struct ExifTool {
    binary: PathBuf,
}

impl ExifTool {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    fn run(&self, args: &[&str]) -> Result<Output, ToolError> {
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|source| ToolError::Spawn { tool: TOOL, source })?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                tool: TOOL,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output)
    }

    /// Escribe la salida de exiftool en un destino temporal y reemplaza el
    /// original conservando sus permisos.
    fn run_to_temp(&self, path: &Path, removal_args: &[String]) -> Result<(), ToolError> {
        let temp = generate_temp_filename(path);
        let temp_str = temp.to_string_lossy().into_owned();
        let path_str = path.to_string_lossy().into_owned();

        let mut args: Vec<&str> = removal_args.iter().map(String::as_str).collect();
        args.push("-o");
        args.push(temp_str.as_str());
        args.push(path_str.as_str());

        self.run(&args).inspect_err(|_| {
            let _ = std::fs::remove_file(&temp);
        })?;

        replace_preserving_permissions(path, &temp).map_err(|error| ToolError::Failed {
            tool: TOOL,
            stderr: format!("no se pudo reemplazar el original: {}", error),
        })
    }
}

impl MetadataTool for ExifTool {
    fn read(&self, path: &Path) -> Result<Vec<(String, String)>, ToolError> {
        let path_str = path.to_string_lossy().into_owned();
        let output = self.run(&["-j", "-G", &path_str])?;

        let parsed: Vec<Value> =
            serde_json::from_slice(&output.stdout).map_err(|error| ToolError::BadOutput {
                tool: TOOL,
                reason: error.to_string(),
            })?;

        let Some(Value::Object(fields)) = parsed.into_iter().next() else {
            return Err(ToolError::BadOutput {
                tool: TOOL,
                reason: "se esperaba un objeto JSON por archivo".to_string(),
            });
        };

        Ok(fields
            .into_iter()
            .map(|(key, value)| (key, stringify(value)))
            .collect())
    }

    fn remove_all(&self, path: &Path) -> Result<(), ToolError> {
        self.run_to_temp(path, &["-all=".to_string()])
    }

    fn remove_tags(&self, path: &Path, tags: &[String]) -> Result<(), ToolError> {
        if tags.is_empty() {
            return Ok(());
        }
        let removal_args: Vec<String> = tags.iter().map(|tag| format!("-{}=", tag)).collect();
        self.run_to_temp(path, &removal_args)
    }

    fn remove_tag_in_place(&self, path: &Path, tag: &str) -> Result<(), ToolError> {
        let path_str = path.to_string_lossy().into_owned();
        let removal = format!("-{}=", tag);
        self.run(&[&removal, "-overwrite_original", &path_str])?;
        Ok(())
    }
}

/// Exiftool devuelve valores heterogéneos; el clasificador trabaja sobre
/// cadenas, así que todo se aplana a texto.
fn stringify(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}
