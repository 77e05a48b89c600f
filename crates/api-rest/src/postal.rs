//! Embedded postal-code directory.
//!
//! Stands in for the external Mexican postal-code service behind the same
//! endpoint shape. Codes not in the table answer "not found", which is also
//! how callers exercise their failure path.

use clinilab_core::PostalCodeInfo;

/// `(code, municipality, state, colonies)`
const ENTRIES: &[(&str, &str, &str, &[&str])] = &[
    (
        "22000",
        "Tijuana",
        "Baja California",
        &["Centro", "Zona Norte", "Federal"],
    ),
    (
        "64000",
        "Monterrey",
        "Nuevo León",
        &["Monterrey Centro", "Barrio Antiguo"],
    ),
    (
        "06000",
        "Cuauhtémoc",
        "Ciudad de México",
        &["Centro Histórico"],
    ),
    (
        "44100",
        "Guadalajara",
        "Jalisco",
        &["Centro", "Americana", "El Santuario"],
    ),
    (
        "83000",
        "Hermosillo",
        "Sonora",
        &["Centro", "Centenario"],
    ),
    (
        "97000",
        "Mérida",
        "Yucatán",
        &["Centro", "Santa Lucía"],
    ),
];

/// Look up one postal code. Returns `None` when the directory has no entry.
pub fn lookup(code: &str) -> Option<PostalCodeInfo> {
    ENTRIES
        .iter()
        .find(|(entry_code, ..)| *entry_code == code)
        .map(|(_, municipality, state, colonies)| PostalCodeInfo {
            colonies: colonies.iter().map(|c| (*c).to_owned()).collect(),
            municipality: (*municipality).to_owned(),
            state: (*state).to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_code_resolves_with_ordered_colonies() {
        let info = lookup("22000").expect("directory entry");
        assert_eq!(info.municipality, "Tijuana");
        assert_eq!(info.state, "Baja California");
        assert_eq!(info.colonies, ["Centro", "Zona Norte", "Federal"]);
    }

    #[test]
    fn leading_zero_code_resolves() {
        let info = lookup("06000").expect("directory entry");
        assert_eq!(info.state, "Ciudad de México");
    }

    #[test]
    fn unknown_code_is_none() {
        assert!(lookup("99999").is_none());
    }
}
