//! Reparación estructural de documentos PDF mediante qpdf.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::ToolError;

use super::{generate_temp_filename, RepairTool};

const TOOL: &str = "qpdf";

/// Única invocación externa acotada por un tiempo límite: un qpdf colgado
/// sobre un PDF malformado no debe colgar toda la ejecución.
const REPAIR_TIMEOUT_SECS: u64 = 30;

/// qpdf usa el código de salida 3 para "éxito con advertencias".
const EXIT_WARNINGS: i32 = 3;

pub struct Qpdf {
    binary: PathBuf,
}

impl Qpdf {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }
}

impl RepairTool for Qpdf {
    /// Intenta linearizar, descifrar y reconstruir los flujos de objetos del
    /// documento. Devuelve la ruta del archivo reparado; el llamador decide
    /// cuándo reemplazar el original.
    fn repair(&self, path: &Path) -> Result<PathBuf, ToolError> {
        let repaired = generate_temp_filename(path);

        let mut child = Command::new(&self.binary)
            .arg("--decrypt")
            .arg("--linearize")
            .arg("--object-streams=generate")
            .arg(path)
            .arg(&repaired)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ToolError::Spawn { tool: TOOL, source })?;

        let deadline = Instant::now() + Duration::from_secs(REPAIR_TIMEOUT_SECS);
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        let _ = std::fs::remove_file(&repaired);
                        return Err(ToolError::Timeout {
                            tool: TOOL,
                            seconds: REPAIR_TIMEOUT_SECS,
                        });
                    }
                    std::thread::sleep(Duration::from_millis(100));
                }
                Err(source) => {
                    let _ = std::fs::remove_file(&repaired);
                    return Err(ToolError::Spawn { tool: TOOL, source });
                }
            }
        };

        let ok = status.success() || status.code() == Some(EXIT_WARNINGS);
        if !ok {
            let _ = std::fs::remove_file(&repaired);
            return Err(ToolError::Failed {
                tool: TOOL,
                stderr: format!("código de salida {:?}", status.code()),
            });
        }

        Ok(repaired)
    }
}
