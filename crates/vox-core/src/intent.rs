//! Resolved intents and the closed set of application types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The applications the dispatcher can route to.
///
/// A closed enum rather than free-form strings: trigger tables and role
/// tables are validated against it at load time, and view dispatch is
/// exhaustive at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppType {
    Documents,
    Cameras,
    Sales,
    Home,
    Analytics,
    Weather,
    System,
}

impl AppType {
    /// All known app types, in display order.
    pub const ALL: [AppType; 7] = [
        AppType::Documents,
        AppType::Cameras,
        AppType::Sales,
        AppType::Home,
        AppType::Analytics,
        AppType::Weather,
        AppType::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppType::Documents => "documents",
            AppType::Cameras => "cameras",
            AppType::Sales => "sales",
            AppType::Home => "home",
            AppType::Analytics => "analytics",
            AppType::Weather => "weather",
            AppType::System => "system",
        }
    }
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "documents" => Ok(AppType::Documents),
            "cameras" => Ok(AppType::Cameras),
            "sales" => Ok(AppType::Sales),
            "home" => Ok(AppType::Home),
            "analytics" => Ok(AppType::Analytics),
            "weather" => Ok(AppType::Weather),
            "system" => Ok(AppType::System),
            other => Err(format!("unknown app type: {}", other)),
        }
    }
}

/// How the resolver arrived at an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// A trigger phrase matched the utterance.
    Exact,
    /// Only a keyword stem matched.
    Fuzzy,
    /// Nothing matched; the intent is the system fallback.
    Fallback,
}

/// The resolved meaning of one utterance.
///
/// Immutable once built; lives only for the request/response cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub app: AppType,
    pub action: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,
    pub confidence: Confidence,
}

impl Intent {
    pub fn new(app: AppType, action: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            app,
            action: action.into(),
            parameters: BTreeMap::new(),
            confidence,
        }
    }

    /// The fallback intent returned for unmatched input.
    pub fn fallback() -> Self {
        Self::new(AppType::System, "unknown", Confidence::Fallback)
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn is_fallback(&self) -> bool {
        self.confidence == Confidence::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_type_round_trips_through_str() {
        for app in AppType::ALL {
            assert_eq!(app.as_str().parse::<AppType>().unwrap(), app);
        }
    }

    #[test]
    fn unknown_app_type_is_an_error() {
        assert!("weather2".parse::<AppType>().is_err());
    }

    #[test]
    fn fallback_intent_shape() {
        let intent = Intent::fallback();
        assert_eq!(intent.app, AppType::System);
        assert_eq!(intent.action, "unknown");
        assert!(intent.is_fallback());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&AppType::Documents).unwrap();
        assert_eq!(json, "\"documents\"");
    }
}
