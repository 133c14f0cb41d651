//! The ordered text-to-target pattern table.
//!
//! Patterns run case-insensitively against the raw utterance so captured
//! parameters keep their original casing ("Gdańsk" stays "Gdańsk"). Table
//! order is the ambiguity policy: user patterns come first, then admin,
//! then system, so a text matching several tiers resolves to the least
//! privileged one.

use lazy_static::lazy_static;
use regex::Regex;
use vox_core::Namespace;

pub struct CommandPattern {
    pub regex: Regex,
    pub namespace: Namespace,
    pub target: &'static str,
    /// `(param name, capture group index)` pairs.
    pub params: &'static [(&'static str, usize)],
}

/// Parameters validated as integers after capture.
pub const NUMERIC_PARAMS: &[&str] = &["SEC", "DAYS"];

fn pattern(
    regex: &str,
    namespace: Namespace,
    target: &'static str,
    params: &'static [(&'static str, usize)],
) -> CommandPattern {
    CommandPattern {
        regex: Regex::new(&format!("(?i){}", regex)).expect("command pattern must compile"),
        namespace,
        target,
        params,
    }
}

lazy_static! {
    pub static ref PATTERNS: Vec<CommandPattern> = vec![
        // user tier: weather queries, city-qualified first (more specific)
        pattern(r"pogoda.*\b(w|dla)\s+(\p{L}+)", Namespace::User, "city", &[("CITY", 2)]),
        pattern(r"weather.*\b(in|for)\s+(\p{L}+)", Namespace::User, "city", &[("CITY", 2)]),
        pattern(
            r"(pokaż|pokaz|sprawdź|sprawdz|jaka).*(pogod|weather)",
            Namespace::User,
            "pogoda",
            &[],
        ),
        pattern(r"(prognoz|forecast).*?(\d+)", Namespace::User, "forecast", &[("DAYS", 2)]),
        pattern(r"\b(temperatura|temp)\b", Namespace::User, "temp", &[]),

        // admin tier: configuration
        pattern(
            r"(ustaw|set).*(timeout|czas).*?(\d+)",
            Namespace::Admin,
            "set-timeout",
            &[("SEC", 3)],
        ),
        pattern(
            r"(ustaw|set).*(miasto|city)\s+(\p{L}+)",
            Namespace::Admin,
            "set-default-city",
            &[("CITY", 3)],
        ),
        pattern(r"\b(włącz|wlacz|enable)\b", Namespace::Admin, "enable", &[]),
        pattern(r"\b(wyłącz|wylacz|disable)\b", Namespace::Admin, "disable", &[]),
        pattern(r"\b(konfiguracja|config)\b", Namespace::Admin, "config", &[]),
        pattern(r"\b(backup|kopia)\b", Namespace::Admin, "backup", &[]),
        pattern(
            r"(test|sprawdź|sprawdz).*(api|połączenie|polaczenie)",
            Namespace::Admin,
            "test",
            &[],
        ),

        // system tier: lifecycle. Word boundaries keep "restart" from
        // matching the "start" pattern.
        pattern(r"\b(start|uruchom)\b", Namespace::System, "start", &[]),
        pattern(r"\b(stop|zatrzymaj)\b", Namespace::System, "stop", &[]),
        pattern(r"\b(restart|restartuj)\b", Namespace::System, "restart", &[]),
        pattern(r"\b(status|stan)\b", Namespace::System, "status", &[]),
        pattern(r"\b(health|zdrowie)\b", Namespace::System, "health", &[]),
        pattern(r"\b(logi|logs|log)\b", Namespace::System, "logs", &[]),
        pattern(r"\b(install|instaluj)\b", Namespace::System, "install", &[]),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_match(text: &str) -> Option<&'static CommandPattern> {
        PATTERNS.iter().find(|p| p.regex.is_match(text))
    }

    #[test]
    fn city_pattern_captures_original_casing() {
        let p = first_match("pogoda w Krakowie").unwrap();
        assert_eq!(p.target, "city");
        let caps = p.regex.captures("pogoda w Krakowie").unwrap();
        assert_eq!(caps.get(2).unwrap().as_str(), "Krakowie");
    }

    #[test]
    fn restart_does_not_hit_start() {
        let p = first_match("restart aplikacji").unwrap();
        assert_eq!(p.target, "restart");
    }

    #[test]
    fn user_tier_wins_over_system_on_overlap() {
        // "sprawdź pogodę" also contains nothing system-tier; but a text
        // matching both "temp" and "status" resolves to the user pattern
        // because of table order.
        let p = first_match("temperatura i status").unwrap();
        assert_eq!(p.namespace, Namespace::User);
        assert_eq!(p.target, "temp");
    }

    #[test]
    fn set_default_city_matches_diacritic_free_text() {
        let p = first_match("ustaw domyslne miasto Gdansk").unwrap();
        assert_eq!(p.target, "set-default-city");
    }
}
