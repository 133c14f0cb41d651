//! Response locales. The locale selects the template pool only; data and
//! view structure are locale-independent.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Pl,
    En,
    De,
    Uk,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Pl => "pl",
            Locale::En => "en",
            Locale::De => "de",
            Locale::Uk => "uk",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pl" => Some(Locale::Pl),
            "en" => Some(Locale::En),
            "de" => Some(Locale::De),
            "uk" => Some(Locale::Uk),
            _ => None,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Pl
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}
