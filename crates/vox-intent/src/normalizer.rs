//! Input normalization for trigger matching.
//!
//! Matching must be tolerant of missing Polish diacritics: "pokaz faktury"
//! and "Pokaż faktury" resolve identically. Both the trigger table and the
//! incoming utterance are folded through the same mapping.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MULTI_SPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Lowercase, trim, collapse whitespace and strip trailing punctuation.
pub fn normalize(text: &str) -> String {
    let mut result = text.to_lowercase();
    result = result.trim().to_string();
    result = MULTI_SPACE.replace_all(&result, " ").to_string();

    while result.ends_with('.') || result.ends_with('?') || result.ends_with('!') {
        result.pop();
    }

    result
}

/// Map Polish diacritics onto their ASCII bases. Applied after lowercasing.
pub fn fold_diacritics(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'ą' => 'a',
            'ć' => 'c',
            'ę' => 'e',
            'ł' => 'l',
            'ń' => 'n',
            'ó' => 'o',
            'ś' => 's',
            'ź' => 'z',
            'ż' => 'z',
            other => other,
        })
        .collect()
}

/// Normalization and folding in one step; the canonical matching form.
pub fn fold(text: &str) -> String {
    fold_diacritics(&normalize(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_normalization() {
        assert_eq!(normalize("  Pokaż   FAKTURY  "), "pokaż faktury");
        assert_eq!(normalize("pomoc?"), "pomoc");
    }

    #[test]
    fn folds_polish_diacritics() {
        assert_eq!(fold("Pokaż faktury"), "pokaz faktury");
        assert_eq!(fold("ZUŻYCIE PRĄDU"), "zuzycie pradu");
        assert_eq!(fold("Łódź"), "lodz");
    }

    #[test]
    fn folding_is_idempotent() {
        let once = fold("sprzedaż");
        assert_eq!(fold(&once), once);
    }

    #[test]
    fn ascii_input_passes_through() {
        assert_eq!(fold("status"), "status");
    }
}
