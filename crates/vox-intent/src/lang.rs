//! Command-language detection from keyword tables.
//!
//! Only the response locale depends on this; matching itself is language
//! independent because triggers carry their own phrases.

use crate::normalizer::fold;
use vox_core::Locale;

const PL_KEYWORDS: &[&str] = &[
    "pogoda", "temperatura", "prognoza", "faktury", "dokumenty", "skanuj", "kamery", "monitoring",
    "ruch", "pomoc", "status", "sprzedaz", "pokaz",
];

const EN_KEYWORDS: &[&str] = &[
    "weather", "forecast", "invoices", "documents", "scan", "cameras", "motion", "help", "show",
    "sales",
];

const DE_KEYWORDS: &[&str] = &[
    "wetter", "vorhersage", "rechnungen", "dokumente", "scannen", "kameras", "uberwachung",
    "bewegung", "hilfe", "befehle",
];

const UK_KEYWORDS: &[&str] = &[
    "погода", "температура", "прогноз", "рахунки", "документи", "сканувати", "камери",
    "моніторинг", "рух", "допомога",
];

/// Detect the utterance language, or `None` when no keyword hits.
pub fn detect(text: &str) -> Option<Locale> {
    let folded = fold(text);

    let tables: [(Locale, &[&str]); 4] = [
        (Locale::Pl, PL_KEYWORDS),
        (Locale::En, EN_KEYWORDS),
        (Locale::De, DE_KEYWORDS),
        (Locale::Uk, UK_KEYWORDS),
    ];

    tables
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| folded.contains(k)))
        .map(|(locale, _)| *locale)
}
