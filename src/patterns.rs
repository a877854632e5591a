//! Catálogo estático de patrones considerados sensibles, particionado por idioma.

/// Patrones que, presentes en la clave, suprimen la clasificación sensible.
/// Protegen los campos de contabilidad que inyecta la propia herramienta.
pub const NEGATIVE_PATTERNS: &[&str] = &[
    "sourcefile",
    "filename",
    "exiftoolversion",
    "exiftool:exiftoolversion",
    "file:filename",
];

pub const SPANISH: &[&str] = &[
    "nombre",
    "apellido",
    "nombre_completo",
    "nombre_del_equipo",
    "nombre_del_dispositivo",
    "email",
    "correo",
    "correo_electronico",
    "telefono",
    "celular",
    "movil",
    "direccion",
    "domicilio",
    "ubicacion",
    "gps",
    "coordenadas",
    "latitud",
    "longitud",
    "dni",
    "rut",
    "pasaporte",
    "identificacion",
    "usuario",
    "password",
    "contraseña",
    "clave",
    "cuenta",
    "tarjeta",
    "credito",
    "debito",
    "banco",
    "empresa",
    "organizacion",
    "institucion",
    "departamento",
    "area",
    "cargo",
    "puesto",
    "rol",
    "ip",
    "mac",
    "serial",
    "licencia",
    "version",
    "sistema",
    "software",
];

pub const ENGLISH: &[&str] = &[
    "name",
    "first_name",
    "last_name",
    "full_name",
    "device_name",
    "computer_name",
    "hostname",
    "email_address",
    "phone",
    "phone_number",
    "cell",
    "mobile",
    "address",
    "location",
    "coordinates",
    "latitude",
    "longitude",
    "passport",
    "id",
    "ssn",
    "social_security",
    "username",
    "user",
    "pass",
    "password",
    "key",
    "account",
    "card",
    "credit_card",
    "debit_card",
    "bank",
    "company",
    "organization",
    "institution",
    "department",
    "position",
    "title",
    "role",
    "license",
    "version",
    "system",
    "os",
    "operating_system",
];

pub const FRENCH: &[&str] = &[
    "nom",
    "prénom",
    "nom_complet",
    "adresse",
    "téléphone",
    "mot_de_passe",
];

pub const GERMAN: &[&str] = &[
    "name",
    "vorname",
    "nachname",
    "vollständiger_name",
    "adresse",
    "telefon",
    "passwort",
];

pub const ITALIAN: &[&str] = &[
    "nome",
    "cognome",
    "nome_completo",
    "indirizzo",
    "telefono",
    "password",
];

pub const PORTUGUESE: &[&str] = &[
    "nome",
    "sobrenome",
    "nome_completo",
    "endereço",
    "telefone",
    "senha",
];

/// Metadata específica de cámaras y dispositivos.
pub const DEVICE_METADATA: &[&str] = &[
    "make",
    "model",
    "creator",
    "author",
    "artist",
    "owner",
    "copyright",
    "camera_serial_number",
    "serial_number",
    "device_id",
    "unique_id",
    "original_filename",
    "creator_tool",
    "software_agent",
    "created_by",
    "modified_by",
    "owner_name",
    "by_line",
    "camera_owner",
    "camera_serial",
    "body_serial_number",
    "lens_serial_number",
    "device_serial_number",
    "exif_version",
];

/// Etiquetas eliminadas incondicionalmente durante la pasada específica de la
/// limpieza completa, independientemente del clasificador.
pub const ALWAYS_STRIP_TAGS: &[&str] = &[
    "Author",
    "Creator",
    "Producer",
    "Artist",
    "Copyright",
    "OwnerName",
    "LastModifiedBy",
    "Company",
    "CreatorTool",
    "Software",
    "Make",
    "Model",
    "SerialNumber",
    "GPSLatitude",
    "GPSLongitude",
    "GPSPosition",
    "GPSAltitude",
    "XPAuthor",
    "By-line",
];

/// Catálogo de patrones cargado una sola vez al inicio y pasado por referencia.
#[derive(Debug)]
pub struct PatternCatalog {
    all: Vec<&'static str>,
}

impl PatternCatalog {
    /// Construye el catálogo concatenando las listas de idiomas en orden fijo
    /// más la metadata de dispositivos. Los duplicados entre idiomas se
    /// conservan.
    pub fn load() -> Self {
        let mut all = Vec::new();
        for list in [
            SPANISH,
            ENGLISH,
            FRENCH,
            GERMAN,
            ITALIAN,
            PORTUGUESE,
            DEVICE_METADATA,
        ] {
            all.extend_from_slice(list);
        }
        Self { all }
    }

    /// Todos los patrones sensibles, en orden de catálogo.
    pub fn all_patterns(&self) -> &[&'static str] {
        &self.all
    }

    pub fn negative_patterns(&self) -> &'static [&'static str] {
        NEGATIVE_PATTERNS
    }

    pub fn always_strip_tags(&self) -> &'static [&'static str] {
        ALWAYS_STRIP_TAGS
    }
}

/// Texto agrupado para el comando informativo `--show-patterns`.
pub fn describe_by_language() -> String {
    let sections: [(&str, &[&str]); 7] = [
        ("ESPAÑOL", SPANISH),
        ("INGLÉS", ENGLISH),
        ("FRANCÉS", FRENCH),
        ("ALEMÁN", GERMAN),
        ("ITALIANO", ITALIAN),
        ("PORTUGUÉS", PORTUGUESE),
        ("METADATOS DE DISPOSITIVOS", DEVICE_METADATA),
    ];

    let mut result = String::from("PATRONES SENSIBLES POR IDIOMA:\n");
    for (label, list) in sections {
        result.push_str(&format!("\n{}:\n{}\n", label, list.join(", ")));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn el_catalogo_conserva_duplicados_entre_idiomas() {
        let catalog = PatternCatalog::load();
        // "password" aparece en inglés y en italiano.
        let count = catalog
            .all_patterns()
            .iter()
            .filter(|p| **p == "password")
            .count();
        assert!(count >= 2);
    }

    #[test]
    fn el_orden_empieza_por_la_lista_en_espanol() {
        let catalog = PatternCatalog::load();
        assert_eq!(catalog.all_patterns()[0], "nombre");
    }

    #[test]
    fn describe_incluye_cada_idioma() {
        let text = describe_by_language();
        for label in ["ESPAÑOL", "INGLÉS", "FRANCÉS", "ALEMÁN", "ITALIANO", "PORTUGUÉS"] {
            assert!(text.contains(label), "falta la sección {}", label);
        }
    }
}
