use crate::codes::{STATION_ACRONYMS, lookup};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_NAME_CHARACTERS: Regex = Regex::new(r"[^a-zA-Z ]").unwrap();
}

/// Expands abbreviations in a station name so "VT" and "Virginia Tech" compare equal.
///
/// Punctuation and digits become word breaks, each remaining word is looked up
/// upper-cased in the acronym table, and the result is lower-cased with single spaces.
/// "Mt Vernon Sq 7th St-Convention" becomes "mount vernon square th street convention".
pub fn normalize_station_name(raw_name: &str) -> String {
    let letters_only = NON_NAME_CHARACTERS.replace_all(raw_name, " ");

    letters_only
        .split_whitespace()
        .map(|word| lookup(&word.to_uppercase(), STATION_ACRONYMS).unwrap_or(word))
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase()
}
