//! Catálogo estático de extensiones de archivo soportadas, agrupadas por tipo.

/// Extensiones de imagen soportadas.
pub const IMAGES: &[&str] = &[
    "jpg", "jpeg", "png", "webp", "gif", "bmp", "tiff", "tif", "raw",
];

/// Extensiones de documento soportadas.
pub const DOCUMENTS: &[&str] = &[
    "pdf", "docx", "doc", "odt", "rtf", "txt", "md", "ppt", "pptx", "odp", "xls", "xlsx", "ods",
    "csv",
];

/// Extensiones multimedia soportadas.
pub const MEDIA: &[&str] = &[
    "mp3", "mp4", "avi", "mov", "wmv", "flv", "mkv", "wav", "ogg", "m4a", "aac",
];

/// Grupos de extensiones reconocidos por el catálogo.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExtensionGroup {
    Images,
    Documents,
    Media,
}

/// Devuelve todas las extensiones soportadas en una única lista.
pub fn all_extensions() -> Vec<&'static str> {
    let mut all = Vec::with_capacity(IMAGES.len() + DOCUMENTS.len() + MEDIA.len());
    all.extend_from_slice(IMAGES);
    all.extend_from_slice(DOCUMENTS);
    all.extend_from_slice(MEDIA);
    all
}

/// Devuelve las extensiones de un grupo concreto.
pub fn extensions_for(group: ExtensionGroup) -> &'static [&'static str] {
    match group {
        ExtensionGroup::Images => IMAGES,
        ExtensionGroup::Documents => DOCUMENTS,
        ExtensionGroup::Media => MEDIA,
    }
}

/// Texto agrupado para el comando informativo `--show-extensions`.
pub fn describe() -> String {
    format!(
        "EXTENSIONES SOPORTADAS:\n\nIMÁGENES:\n{}\n\nDOCUMENTOS:\n{}\n\nMULTIMEDIA:\n{}\n",
        extensions_for(ExtensionGroup::Images).join(", "),
        extensions_for(ExtensionGroup::Documents).join(", "),
        extensions_for(ExtensionGroup::Media).join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_extensions_concatena_los_tres_grupos() {
        let all = all_extensions();
        assert_eq!(all.len(), IMAGES.len() + DOCUMENTS.len() + MEDIA.len());
        assert!(all.contains(&"jpg"));
        assert!(all.contains(&"pdf"));
        assert!(all.contains(&"mp3"));
    }

    #[test]
    fn las_extensiones_estan_en_minusculas_y_sin_punto() {
        for ext in all_extensions() {
            assert_eq!(ext, ext.to_lowercase());
            assert!(!ext.starts_with('.'));
        }
    }

    #[test]
    fn describe_incluye_cada_grupo() {
        let text = describe();
        assert!(text.contains("IMÁGENES"));
        assert!(text.contains("DOCUMENTOS"));
        assert!(text.contains("MULTIMEDIA"));
    }
}
