//! Detección del tipo real de un archivo a partir de su contenido.
//!
//! Los archivos renombrados a `.txt` para disimular su formato se identifican
//! por sus bytes mágicos, no por la extensión.

use infer::Infer;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Formatos que reciben etapas específicas durante la limpieza.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileKind {
    Pdf,
    Docx,
    Xlsx,
    Unknown,
}

impl FileKind {
    pub fn label(self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Docx => "docx",
            FileKind::Xlsx => "xlsx",
            FileKind::Unknown => "desconocido",
        }
    }
}

/// Determina el formato real subyacente de un archivo.
///
/// Las extensiones `pdf`, `xlsx` y `docx` se aceptan directamente. Un `.txt`
/// se inspecciona por contenido para recuperar el tipo verdadero. Cualquier
/// otro caso es `Unknown` y la limpieza omite las etapas de formato.
pub fn sniff(path: &Path) -> FileKind {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => FileKind::Pdf,
        "docx" => FileKind::Docx,
        "xlsx" => FileKind::Xlsx,
        "txt" => sniff_content(path),
        _ => FileKind::Unknown,
    }
}

/// Comprueba que el archivo no está vacío y comienza con la firma `%PDF-`.
pub fn has_pdf_magic(path: &Path) -> std::io::Result<bool> {
    let mut file = File::open(path)?;
    let mut header = [0u8; 5];
    let read = file.read(&mut header)?;
    Ok(read == header.len() && &header == b"%PDF-")
}

fn sniff_content(path: &Path) -> FileKind {
    let infer = Infer::new();
    let Some(kind) = infer.get_from_path(path).ok().flatten() else {
        return FileKind::Unknown;
    };

    match kind.mime_type() {
        "application/pdf" => FileKind::Pdf,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => FileKind::Docx,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => FileKind::Xlsx,
        // Contenedor zip genérico: desambiguar mirando el manifiesto interno.
        "application/zip" => classify_zip(path),
        _ => FileKind::Unknown,
    }
}

/// Distingue docx de xlsx inspeccionando los nombres de entrada del zip:
/// `word/` identifica un documento, `xl/` una hoja de cálculo.
fn classify_zip(path: &Path) -> FileKind {
    let Ok(file) = File::open(path) else {
        return FileKind::Unknown;
    };
    let Ok(archive) = ZipArchive::new(file) else {
        return FileKind::Unknown;
    };

    for name in archive.file_names() {
        if name.starts_with("word/") {
            return FileKind::Docx;
        }
        if name.starts_with("xl/") {
            return FileKind::Xlsx;
        }
    }

    FileKind::Unknown
}
