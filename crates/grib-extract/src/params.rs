//! GRIB2 parameter code lookup.
//!
//! Maps short variable names, as they appear in run configuration, to WMO
//! (discipline, category, number) triples used to match submessages.

/// Lookup key for a parameter: (discipline, category, number)
pub type ParamKey = (u8, u8, u8);

/// Resolve a short variable name to its parameter code.
///
/// Accepts both the NCEP-style mnemonics ("TMP", "UGRD") and the short names
/// common in GRIB tooling ("t", "u10").
pub fn parameter_code(name: &str) -> Option<ParamKey> {
    let key = match name.to_ascii_lowercase().as_str() {
        "t" | "2t" | "tmp" => (0, 0, 0),
        "u" | "u10" | "ugrd" => (0, 2, 2),
        "v" | "v10" | "vgrd" => (0, 2, 3),
        "gh" | "hgt" => (0, 3, 5),
        "prmsl" => (0, 3, 1),
        "r" | "rh" => (0, 1, 1),
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_code_known_names() {
        assert_eq!(parameter_code("t"), Some((0, 0, 0)));
        assert_eq!(parameter_code("TMP"), Some((0, 0, 0)));
        assert_eq!(parameter_code("u10"), Some((0, 2, 2)));
        assert_eq!(parameter_code("UGRD"), Some((0, 2, 2)));
        assert_eq!(parameter_code("v10"), Some((0, 2, 3)));
    }

    #[test]
    fn test_parameter_code_unknown_name() {
        assert_eq!(parameter_code("bogus"), None);
    }
}
