//! Configuración tipada construida una sola vez en la frontera de la CLI.

use std::fs;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Acción principal seleccionada por las banderas de la CLI.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Informe de toda la metadata encontrada.
    Report,
    /// Informe restringido a campos sensibles.
    ReportSensitive,
    /// Eliminación de toda la metadata.
    WipeAll,
    /// Eliminación limitada a los campos sensibles.
    WipeSensitive,
}

impl Mode {
    pub fn only_sensitive(self) -> bool {
        matches!(self, Mode::ReportSensitive | Mode::WipeSensitive)
    }
}

/// Configuración completa de una ejecución. Se valida al construirse y luego
/// se pasa por referencia a cada componente.
#[derive(Debug)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub mode: Mode,
    pub html: bool,
    pub pdf: bool,
    pub verbose: bool,
}

impl Config {
    /// Valida las rutas y crea el directorio de salida si no existe.
    pub fn new(
        input_path: PathBuf,
        output_dir: PathBuf,
        mode: Mode,
        html: bool,
        pdf: bool,
        verbose: bool,
    ) -> Result<Self, ConfigError> {
        if !input_path.exists() {
            return Err(ConfigError::MissingInputPath(input_path));
        }
        if !input_path.is_dir() {
            return Err(ConfigError::InputNotDirectory(input_path));
        }

        if !output_dir.exists() {
            fs::create_dir_all(&output_dir).map_err(|source| ConfigError::OutputDirUnavailable {
                path: output_dir.clone(),
                source,
            })?;
        }

        // Un PDF se genera a partir del HTML intermedio.
        let html = html || pdf;

        Ok(Self {
            input_path,
            output_dir,
            mode,
            html,
            pdf,
            verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn rechaza_una_ruta_de_entrada_inexistente() {
        let dir = tempdir().expect("no se pudo crear el directorio temporal");
        let missing = dir.path().join("no_existe");
        let result = Config::new(
            missing.clone(),
            dir.path().to_path_buf(),
            Mode::Report,
            false,
            false,
            false,
        );
        assert!(matches!(result, Err(ConfigError::MissingInputPath(p)) if p == missing));
    }

    #[test]
    fn crea_el_directorio_de_salida_si_falta() {
        let dir = tempdir().expect("no se pudo crear el directorio temporal");
        let out = dir.path().join("reportes");
        let config = Config::new(
            dir.path().to_path_buf(),
            out.clone(),
            Mode::Report,
            false,
            false,
            false,
        )
        .expect("la configuración debería ser válida");
        assert!(out.is_dir());
        assert_eq!(config.output_dir, out);
    }

    #[test]
    fn pdf_activa_tambien_html() {
        let dir = tempdir().expect("no se pudo crear el directorio temporal");
        let config = Config::new(
            dir.path().to_path_buf(),
            dir.path().to_path_buf(),
            Mode::Report,
            false,
            true,
            false,
        )
        .expect("la configuración debería ser válida");
        assert!(config.html && config.pdf);
    }
}
