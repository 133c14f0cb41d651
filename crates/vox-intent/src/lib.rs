//! Vox Intent: natural-language utterance to structured intent.
//!
//! Resolution is total: every non-empty utterance yields an [`Intent`],
//! falling back to `(system, unknown)` when nothing matches. The resolver
//! is a pure function of the input and an immutable trigger table injected
//! at construction.
//!
//! # Example
//!
//! ```
//! use vox_intent::Resolver;
//! use vox_core::{AppType, Confidence};
//!
//! let resolver = Resolver::with_defaults();
//! let intent = resolver.resolve("Pokaż faktury dostawcy ABC", None);
//! assert_eq!(intent.app, AppType::Documents);
//! assert_eq!(intent.action, "show_all");
//! assert_eq!(intent.confidence, Confidence::Exact);
//! ```

pub mod entities;
pub mod lang;
pub mod normalizer;
pub mod triggers;

use triggers::TriggerTable;
use vox_core::{AppType, Confidence, HelpCategory, Intent, Locale};

pub use triggers::{TriggerError, TriggerFile};

/// Resolver configuration. Defaults: city "Warszawa", locale Polish.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub default_city: String,
    pub default_locale: Locale,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_city: "Warszawa".to_string(),
            default_locale: Locale::Pl,
        }
    }
}

/// Maps raw text to intents over an immutable trigger table.
pub struct Resolver {
    table: TriggerTable,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(table: TriggerTable, config: ResolverConfig) -> Self {
        Self { table, config }
    }

    /// Resolver over the built-in command set.
    pub fn with_defaults() -> Self {
        Self::new(TriggerTable::default_table(), ResolverConfig::default())
    }

    /// Resolve an utterance into an intent. Never fails: unmatched input
    /// produces the fallback intent.
    pub fn resolve(&self, text: &str, _language_hint: Option<Locale>) -> Intent {
        let folded = normalizer::fold(text);
        if folded.is_empty() {
            return Intent::fallback();
        }

        if let Some(trigger) = self.table.find(&folded) {
            let mut intent = Intent::new(trigger.app, trigger.action.clone(), Confidence::Exact);
            self.extract_parameters(text, &mut intent);
            return intent;
        }

        if let Some(app) = self.table.find_keyword(&folded) {
            let mut intent = Intent::new(app, "show_all", Confidence::Fuzzy);
            self.extract_parameters(text, &mut intent);
            return intent;
        }

        Intent::fallback()
    }

    /// Detect the utterance locale; the hint, when present, wins.
    pub fn locale_of(&self, text: &str, hint: Option<Locale>) -> Locale {
        hint.or_else(|| lang::detect(text))
            .unwrap_or(self.config.default_locale)
    }

    /// Trigger phrases grouped by app, for help views and listings.
    pub fn catalog(&self) -> Vec<HelpCategory> {
        self.table.catalog()
    }

    pub fn default_city(&self) -> &str {
        &self.config.default_city
    }

    fn extract_parameters(&self, text: &str, intent: &mut Intent) {
        if let Some(city) = entities::extract_city(text) {
            intent.parameters.insert("city".to_string(), city.to_string());
        } else if intent.app == AppType::Weather {
            intent
                .parameters
                .insert("city".to_string(), self.config.default_city.clone());
        }

        if let Some(number) = entities::extract_number(text) {
            intent.parameters.insert("number".to_string(), number);
        }
    }
}
