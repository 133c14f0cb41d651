//! Entity extraction: a secondary pass over the utterance after a trigger
//! matched. Extracts city names (diacritic-tolerant, inflection-tolerant
//! via stems) and integer parameters.

use crate::normalizer::fold;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NUMBER: Regex = Regex::new(r"\b(\d{1,9})\b").unwrap();
}

/// Known cities: folded stem paired with the canonical name. Stems match
/// Polish inflected forms ("w Gdańsku", "dla Łodzi").
const CITY_STEMS: &[(&str, &str)] = &[
    ("warszaw", "Warszawa"),
    ("krakow", "Kraków"),
    ("wroclaw", "Wrocław"),
    ("poznan", "Poznań"),
    ("gdansk", "Gdańsk"),
    ("lodz", "Łódź"),
];

/// Canonical city name, if any known city occurs in the text.
pub fn extract_city(text: &str) -> Option<&'static str> {
    let folded = fold(text);
    CITY_STEMS
        .iter()
        .find(|(stem, _)| folded.contains(stem))
        .map(|(_, canonical)| *canonical)
}

/// First integer in the text.
pub fn extract_number(text: &str) -> Option<String> {
    NUMBER
        .captures(text)
        .map(|c| c.get(1).unwrap().as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_city_from_inflected_form() {
        assert_eq!(extract_city("pogoda w Gdańsku"), Some("Gdańsk"));
        assert_eq!(extract_city("pogoda dla Łodzi"), Some("Łódź"));
    }

    #[test]
    fn extracts_city_without_diacritics() {
        assert_eq!(extract_city("pogoda w krakowie"), Some("Kraków"));
        assert_eq!(extract_city("sprzedaz wroclaw"), Some("Wrocław"));
    }

    #[test]
    fn no_city_yields_none() {
        assert_eq!(extract_city("pokaż faktury"), None);
    }

    #[test]
    fn extracts_first_number() {
        assert_eq!(extract_number("prognoza na 5 dni"), Some("5".to_string()));
        assert_eq!(extract_number("bez liczb"), None);
    }
}
