//! Clasificación de campos de metadata como sensibles o no sensibles.

use crate::patterns::PatternCatalog;

/// Resultado de clasificar un par clave/valor.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Classification {
    pub is_sensitive: bool,
    pub matched_patterns: Vec<String>,
}

impl Classification {
    fn benign() -> Self {
        Self::default()
    }
}

/// Decide si un par clave/valor contiene información sensible.
///
/// El orden de las reglas importa:
/// 1. Ambas cadenas se comparan en minúsculas.
/// 2. Si la clave contiene un patrón negativo, el campo nunca es sensible.
/// 3. La clave exacta `author` solo es sensible si su valor coincide con
///    algún patrón del catálogo.
/// 4. Los patrones de hasta 3 caracteres exigen igualdad exacta con la clave
///    o el valor completos; los más largos se buscan como subcadena. Se
///    recogen todas las coincidencias, no solo la primera.
pub fn classify(key: &str, value: &str, catalog: &PatternCatalog) -> Classification {
    let key_lower = key.to_lowercase();
    let value_lower = value.to_lowercase();

    for negative in catalog.negative_patterns() {
        if key_lower.contains(negative) {
            return Classification::benign();
        }
    }

    if key_lower == "author" && !value_matches_any(&value_lower, catalog) {
        return Classification::benign();
    }

    let mut matched = Vec::new();
    for pattern in catalog.all_patterns() {
        let hit = if pattern.chars().count() <= 3 {
            key_lower == *pattern || value_lower == *pattern
        } else {
            key_lower.contains(pattern) || value_lower.contains(pattern)
        };
        if hit {
            matched.push(pattern.to_string());
        }
    }

    Classification {
        is_sensitive: !matched.is_empty(),
        matched_patterns: matched,
    }
}

fn value_matches_any(value_lower: &str, catalog: &PatternCatalog) -> bool {
    catalog.all_patterns().iter().any(|pattern| {
        if pattern.chars().count() <= 3 {
            value_lower == *pattern
        } else {
            value_lower.contains(pattern)
        }
    })
}
