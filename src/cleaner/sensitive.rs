//! Pipeline de limpieza selectiva: elimina únicamente los campos que el
//! clasificador marcó como sensibles, preservando el resto intacto.

use console::style;
use std::path::Path;

use crate::classifier::classify;
use crate::error::FileError;

use super::{CleanMode, CleanOutcome, CleanStage, CleanStatus, Cleaner};

pub(super) fn sensitive_wipe(cleaner: &Cleaner, path: &Path) -> CleanOutcome {
    let mut stages = Vec::new();

    let fields = match cleaner.metadata.read(path) {
        Ok(fields) => fields,
        Err(error) => {
            let error = FileError::Extraction {
                path: path.to_path_buf(),
                reason: error.to_string(),
            };
            eprintln!("{}", style(format!("│ {}", error)).red());
            return CleanOutcome::failed(path, CleanMode::SensitiveOnly, stages);
        }
    };
    stages.push(CleanStage::MetadataRead);

    // Se recogen los nombres de etiqueta sensibles (no los valores),
    // deduplicados y en orden de aparición.
    let mut sensitive_tags: Vec<String> = Vec::new();
    for (key, value) in &fields {
        let classification = classify(key, value, cleaner.catalog);
        if classification.is_sensitive && !sensitive_tags.contains(key) {
            if cleaner.verbose {
                println!(
                    "{}",
                    style(format!(
                        "│ Campo sensible: {} ({})",
                        key,
                        classification.matched_patterns.join(", ")
                    ))
                    .dim()
                );
            }
            sensitive_tags.push(key.clone());
        }
    }
    stages.push(CleanStage::Classified);

    if sensitive_tags.is_empty() {
        // Sin campos sensibles no hay nada que tocar.
        return CleanOutcome {
            path: path.to_path_buf(),
            mode: CleanMode::SensitiveOnly,
            stages_completed: stages,
            residual_field_count: 0,
            status: CleanStatus::Cleaned,
        };
    }

    match cleaner.metadata.remove_tags(path, &sensitive_tags) {
        Ok(()) => stages.push(CleanStage::TargetedRemoveAttempt),
        Err(error) => {
            eprintln!(
                "{}",
                style(format!(
                    "│ Eliminación combinada fallida en `{}`: {}",
                    path.display(),
                    error
                ))
                .yellow()
            );
            // Respaldo etiqueta por etiqueta: un fallo puntual no bloquea el
            // resto de las eliminaciones.
            stages.push(CleanStage::FallbackPerTagRemove);
            for tag in &sensitive_tags {
                if let Err(error) = cleaner.metadata.remove_tag_in_place(path, tag) {
                    eprintln!(
                        "{}",
                        style(format!("│ No se pudo eliminar `{}`: {}", tag, error)).yellow()
                    );
                }
            }
        }
    }

    stages.push(CleanStage::Verify);
    let (residual, status) = match cleaner.metadata.read(path) {
        Ok(after) => {
            let residual = sensitive_tags
                .iter()
                .filter(|tag| after.iter().any(|(key, _)| key == *tag))
                .count();
            let status = if residual == 0 {
                CleanStatus::Cleaned
            } else {
                CleanStatus::CleanedWithResidual
            };
            (residual, status)
        }
        Err(error) => {
            eprintln!(
                "{}",
                style(format!(
                    "│ No se pudo verificar `{}`: {}",
                    path.display(),
                    error
                ))
                .yellow()
            );
            (0, CleanStatus::CleanedWithResidual)
        }
    };

    if residual > 0 {
        eprintln!(
            "{}",
            style(format!(
                "│ Siguen presentes {} etiquetas sensibles en `{}`",
                residual,
                path.display()
            ))
            .yellow()
        );
    }

    CleanOutcome {
        path: path.to_path_buf(),
        mode: CleanMode::SensitiveOnly,
        stages_completed: stages,
        residual_field_count: residual,
        status,
    }
}
