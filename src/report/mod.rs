//! Agregación de resultados de escaneo en el informe estructurado.

pub mod markdown;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classifier::classify;
use crate::patterns::PatternCatalog;
use crate::scanner::ScanResult;

/// Un campo de metadata ya clasificado. Inmutable una vez construido.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetadataField {
    pub key: String,
    pub value: String,
    pub is_sensitive: bool,
    pub matched_patterns: Vec<String>,
}

/// Registro por archivo con al menos un campo retenido tras el filtrado.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileRecord {
    /// Ruta relativa a la raíz analizada.
    pub path: String,
    pub extension: String,
    /// Cantidad de campos antes de cualquier filtrado.
    pub total_field_count: usize,
    pub has_sensitive: bool,
    pub fields: Vec<MetadataField>,
}

/// Estadísticas acumuladas por extensión (normalizada, con punto).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExtensionStats {
    pub extension: String,
    pub file_count: usize,
    pub files_with_metadata: usize,
    pub files_with_sensitive: usize,
}

/// Agregado raíz de una invocación de escaneo.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AggregateReport {
    pub total_files: usize,
    pub files_with_metadata: usize,
    pub files_with_sensitive: usize,
    pub extension_stats: BTreeMap<String, ExtensionStats>,
    pub files: Vec<FileRecord>,
}

/// Consume los resultados del escaneo y acumula estadísticas y registros.
///
/// Con `only_sensitive`, los campos no sensibles se descartan del registro y
/// un archivo sin campos sensibles se omite por completo de la sección
/// detallada; los contadores globales no cambian. Un fallo de extracción
/// contribuye como registro de cero campos sin abortar la agregación.
pub fn aggregate(
    results: Vec<ScanResult>,
    only_sensitive: bool,
    catalog: &PatternCatalog,
) -> AggregateReport {
    let mut report = AggregateReport::default();

    for result in results {
        let file = result.file;
        report.total_files += 1;

        let ext_key = format!(".{}", file.extension);
        let stats = report
            .extension_stats
            .entry(ext_key.clone())
            .or_insert_with(|| ExtensionStats {
                extension: ext_key,
                ..ExtensionStats::default()
            });
        stats.file_count += 1;

        // Un error de extracción equivale a un archivo sin campos.
        let raw_fields = result.metadata.unwrap_or_default();
        let total_field_count = raw_fields.len();

        let fields: Vec<MetadataField> = raw_fields
            .into_iter()
            .map(|(key, value)| {
                let classification = classify(&key, &value, catalog);
                MetadataField {
                    key,
                    value,
                    is_sensitive: classification.is_sensitive,
                    matched_patterns: classification.matched_patterns,
                }
            })
            .collect();

        let has_sensitive = fields.iter().any(|field| field.is_sensitive);

        if total_field_count > 0 {
            report.files_with_metadata += 1;
            stats.files_with_metadata += 1;
        }
        if has_sensitive {
            report.files_with_sensitive += 1;
            stats.files_with_sensitive += 1;
        }

        let retained: Vec<MetadataField> = if only_sensitive {
            fields.into_iter().filter(|f| f.is_sensitive).collect()
        } else {
            fields
        };

        if !retained.is_empty() {
            report.files.push(FileRecord {
                path: file.relative_path.to_string_lossy().into_owned(),
                extension: file.extension,
                total_field_count,
                has_sensitive,
                fields: retained,
            });
        }
    }

    report
}
