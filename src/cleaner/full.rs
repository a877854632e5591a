//! Pipeline de limpieza completa: depuración de contenido, eliminación
//! general y pasada específica, con reparación de PDFs como respaldo.

use console::style;
use std::path::Path;

use crate::error::FileError;
use crate::sniffer::{has_pdf_magic, sniff, FileKind};
use crate::tools::replace_preserving_permissions;

use super::{count_residual_fields, CleanMode, CleanOutcome, CleanStage, CleanStatus, Cleaner};

pub(super) fn full_wipe(cleaner: &Cleaner, path: &Path) -> CleanOutcome {
    let mut stages = Vec::new();

    let kind = sniff(path);
    stages.push(CleanStage::TypeSniffed);
    if cleaner.verbose {
        println!(
            "{}",
            style(format!("│ Tipo real detectado: {}", kind.label())).dim()
        );
    }

    if kind == FileKind::Pdf {
        match ensure_pdf_integrity(cleaner, path) {
            Ok(repaired) => {
                stages.push(CleanStage::IntegrityCheck);
                if repaired {
                    stages.push(CleanStage::IntegrityRepaired);
                }
            }
            Err(reason) => {
                // Irrecuperable: el archivo no pasa a etapas posteriores.
                let error = FileError::Integrity {
                    path: path.to_path_buf(),
                    reason,
                };
                eprintln!("{}", style(format!("│ {}", error)).red());
                return CleanOutcome::failed(path, CleanMode::Full, stages);
            }
        }
    }

    if matches!(kind, FileKind::Pdf | FileKind::Docx | FileKind::Xlsx) {
        if let Some(scrub) = cleaner.scrub {
            match scrub.scrub_in_place(path) {
                Ok(()) => stages.push(CleanStage::ContentScrub),
                // La depuración de contenido es mejor esfuerzo: el archivo
                // todavía se beneficia de las etapas de eliminación.
                Err(error) => eprintln!(
                    "{}",
                    style(format!(
                        "│ Depuración de contenido fallida en `{}`: {}",
                        path.display(),
                        error
                    ))
                    .yellow()
                ),
            }
        }
    }

    if kind == FileKind::Pdf {
        match ensure_pdf_integrity(cleaner, path) {
            Ok(repaired) => {
                stages.push(CleanStage::PostScrubIntegrityCheck);
                if repaired {
                    stages.push(CleanStage::IntegrityRepaired);
                }
            }
            Err(reason) => {
                let error = FileError::Integrity {
                    path: path.to_path_buf(),
                    reason: format!("tras la depuración: {}", reason),
                };
                eprintln!("{}", style(format!("│ {}", error)).red());
                return CleanOutcome::failed(path, CleanMode::Full, stages);
            }
        }
    }

    match cleaner.metadata.remove_all(path) {
        Ok(()) => stages.push(CleanStage::GeneralStrip),
        Err(first_error) => {
            // Para un PDF con error estructural: una reparación y un único
            // reintento de la eliminación general.
            let recovered = kind == FileKind::Pdf
                && repair_in_place(cleaner, path).is_ok()
                && cleaner.metadata.remove_all(path).is_ok();

            if recovered {
                stages.push(CleanStage::IntegrityRepaired);
                stages.push(CleanStage::GeneralStrip);
            } else {
                let error = FileError::Removal {
                    path: path.to_path_buf(),
                    reason: first_error.to_string(),
                };
                eprintln!("{}", style(format!("│ {}", error)).red());
                return CleanOutcome::failed(path, CleanMode::Full, stages);
            }
        }
    }

    // Pasada específica: la lista fija se elimina aunque la eliminación
    // general ya haya corrido. Quitar una etiqueta ausente no es un error.
    let always_strip: Vec<String> = cleaner
        .catalog
        .always_strip_tags()
        .iter()
        .map(|tag| tag.to_string())
        .collect();
    match cleaner.metadata.remove_tags(path, &always_strip) {
        Ok(()) => stages.push(CleanStage::TargetedStrip),
        Err(error) => eprintln!(
            "{}",
            style(format!(
                "│ Pasada específica fallida en `{}`: {}",
                path.display(),
                error
            ))
            .yellow()
        ),
    }

    stages.push(CleanStage::Verify);
    let (residual, status) = match cleaner.metadata.read(path) {
        Ok(fields) => {
            let residual = count_residual_fields(&fields);
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

    if status == CleanStatus::CleanedWithResidual && residual > 0 {
        eprintln!(
            "{}",
            style(format!(
                "│ Quedan {} campos residuales en `{}`",
                residual,
                path.display()
            ))
            .yellow()
        );
    }

    CleanOutcome {
        path: path.to_path_buf(),
        mode: CleanMode::Full,
        stages_completed: stages,
        residual_field_count: residual,
        status,
    }
}

/// Verifica la firma `%PDF-` y, si el archivo está dañado, intenta una
/// reparación cuyo resultado reemplaza atómicamente al original. Devuelve si
/// hubo reparación.
fn ensure_pdf_integrity(cleaner: &Cleaner, path: &Path) -> Result<bool, String> {
    match has_pdf_magic(path) {
        Ok(true) => Ok(false),
        Ok(false) => repair_in_place(cleaner, path).map(|()| true),
        Err(error) => Err(format!("no se pudo leer la cabecera: {}", error)),
    }
}

fn repair_in_place(cleaner: &Cleaner, path: &Path) -> Result<(), String> {
    let Some(repair) = cleaner.repair else {
        return Err("no hay herramienta de reparación disponible".to_string());
    };

    let repaired = repair.repair(path).map_err(|e| e.to_string())?;
    replace_preserving_permissions(path, &repaired)
        .map_err(|e| format!("no se pudo reemplazar el original reparado: {}", e))
}
