//! Display labels for the short codes the WMATA feeds use.

/// A fixed code to label table. Lookups are linear; every table here is tiny.
pub type CodeDictionary = &'static [(&'static str, &'static str)];

pub const LINE_NAMES: CodeDictionary = &[
    ("RD", "Red"),
    ("BL", "Blue"),
    ("YL", "Yellow"),
    ("OR", "Orange"),
    ("SV", "Silver"),
    ("GR", "Green"),
];

pub const SERVICE_CODES: CodeDictionary = &[
    ("ARR", "Arriving"),
    ("BRD", "Boarding"),
    ("DLY", "Delayed"),
];

/// Station name abbreviations and their spoken form.
///
/// No expansion (or any word inside one) may itself be a key here,
/// otherwise normalizing an already normalized name would expand twice.
pub const STATION_ACRONYMS: CodeDictionary = &[
    ("MT", "Mount"),
    ("AMER", "American"),
    ("PL", "Place"),
    ("UDC", "University of the District of Columbia"),
    ("AU", "American University"),
    ("AVE", "Avenue"),
    ("CUA", "Catholic University of America"),
    ("NOMA", "North of Massachusetts Avenue"),
    ("GMU", "George Mason University"),
    ("VT", "Virginia Tech"),
    ("UVA", "University of Virginia"),
    ("DCA", "Ronald Reagan"),
    ("ST", "Street"),
    ("SW", "South West"),
    ("SQ", "Square"),
    ("PENN", "Pennsylvania"),
];

/// Looks a code up in a dictionary without falling back.
pub fn lookup(code: &str, dictionary: CodeDictionary) -> Option<&'static str> {
    dictionary
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, label)| *label)
}

/// Returns the label for `code`, or `code` itself when the dictionary has no entry.
pub fn translate<'a>(code: &'a str, dictionary: CodeDictionary) -> &'a str {
    lookup(code, dictionary).unwrap_or(code)
}

pub fn line_name(line_code: &str) -> &str {
    translate(line_code, LINE_NAMES)
}

pub fn service_status(minutes_or_status: &str) -> &str {
    translate(minutes_or_status, SERVICE_CODES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_codes() {
        assert_eq!(translate("ARR", SERVICE_CODES), "Arriving");
        assert_eq!(translate("BRD", SERVICE_CODES), "Boarding");
        assert_eq!(translate("DLY", SERVICE_CODES), "Delayed");
    }

    #[test]
    fn test_line_names() {
        assert_eq!(translate("RD", LINE_NAMES), "Red");
        assert_eq!(translate("BL", LINE_NAMES), "Blue");
        assert_eq!(translate("YL", LINE_NAMES), "Yellow");
        assert_eq!(translate("OR", LINE_NAMES), "Orange");
        assert_eq!(translate("SV", LINE_NAMES), "Silver");
        assert_eq!(translate("GR", LINE_NAMES), "Green");
    }

    #[test]
    fn test_unknown_code_passes_through() {
        assert_eq!(translate("ZZ", LINE_NAMES), "ZZ");
        assert_eq!(translate("5", SERVICE_CODES), "5");
        assert_eq!(translate("", SERVICE_CODES), "");
        assert_eq!(line_name("rd"), "rd");
        assert_eq!(service_status("BRD"), "Boarding");
    }

    #[test]
    fn test_acronym_expansions_are_not_keys() {
        for (_, expansion) in STATION_ACRONYMS {
            for word in expansion.split_whitespace() {
                assert!(
                    lookup(&word.to_uppercase(), STATION_ACRONYMS).is_none(),
                    "{} expands to a word that is itself an abbreviation",
                    expansion
                );
            }
        }
    }
}
