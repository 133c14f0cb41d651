//! Vox Command: free text to structured command descriptors and back.
//!
//! `text_to_command` walks an ordered pattern table (user tier first, so
//! multi-tier matches resolve to the least privileged namespace), then the
//! per-app target catalogs. `command_to_text` renders a confirmation
//! sentence from templates keyed by target. The wire format between the
//! two is the `make -f <file> <target> [K=V ...]` string.
//!
//! # Example
//!
//! ```
//! use vox_command::Translator;
//! use vox_core::{AppType, Namespace};
//!
//! let translator = Translator::with_defaults();
//! let cmd = translator
//!     .text_to_command("ustaw domyślne miasto Gdańsk", AppType::Weather)
//!     .unwrap();
//! assert_eq!(cmd.namespace, Namespace::Admin);
//! assert_eq!(cmd.target, "set-default-city");
//! assert!(translator.command_to_text(&cmd).contains("Gdańsk"));
//! ```

pub mod catalog;
pub mod confirm;
pub mod patterns;
pub mod wire;

use catalog::MakeTarget;
use confirm::Confirmations;
use patterns::{CommandPattern, NUMERIC_PARAMS, PATTERNS};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use vox_core::{AppType, CommandDescriptor, Namespace};

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("no command catalog for app '{0}'")]
    NoMatchingApp(AppType),
    #[error("text matches multiple targets: {0:?}")]
    AmbiguousTarget(Vec<String>),
    #[error("parameter {name} is not a valid number: '{value}'")]
    InvalidParameter { name: String, value: String },
    #[error("could not translate: '{0}'")]
    UnrecognizedText(String),
    #[error("malformed command string: {0}")]
    MalformedCommand(String),
}

/// A catalog-derived suggestion shown when translation fails.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub command: String,
    pub text: String,
    pub target: String,
}

/// Bidirectional translator.
pub struct Translator {
    confirmations: Confirmations,
    catalogs: HashMap<AppType, Vec<MakeTarget>>,
}

impl Translator {
    pub fn new(confirmations: Confirmations) -> Self {
        Self {
            confirmations,
            catalogs: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(Confirmations::defaults())
    }

    /// Register an app's makefile targets for catalog-based translation.
    pub fn register_catalog(&mut self, app: AppType, targets: Vec<MakeTarget>) {
        self.catalogs.entry(app).or_default().extend(targets);
    }

    /// Translate free text into a command descriptor.
    pub fn text_to_command(
        &self,
        text: &str,
        app: AppType,
    ) -> Result<CommandDescriptor, TranslationError> {
        if let Some(result) = self.match_patterns(text) {
            return result;
        }
        self.match_catalog(text, app)
    }

    /// Render the confirmation sentence for a descriptor.
    pub fn command_to_text(&self, descriptor: &CommandDescriptor) -> String {
        self.confirmations.render(descriptor)
    }

    /// Catalog suggestions for an app, filtered to one namespace.
    pub fn suggestions(&self, app: AppType, namespace: Namespace) -> Vec<Suggestion> {
        self.catalogs
            .get(&app)
            .map(|targets| {
                targets
                    .iter()
                    .filter(|t| t.namespace == namespace)
                    .map(|t| Suggestion {
                        command: t.example.clone(),
                        text: if t.description.is_empty() {
                            t.name.clone()
                        } else {
                            t.description.clone()
                        },
                        target: t.name.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn match_patterns(&self, text: &str) -> Option<Result<CommandDescriptor, TranslationError>> {
        for pattern in PATTERNS.iter() {
            if let Some(captures) = pattern.regex.captures(text) {
                return Some(build_descriptor(pattern, &captures));
            }
        }
        None
    }

    fn match_catalog(
        &self,
        text: &str,
        app: AppType,
    ) -> Result<CommandDescriptor, TranslationError> {
        let targets = self
            .catalogs
            .get(&app)
            .ok_or(TranslationError::NoMatchingApp(app))?;

        let lowered = text.to_lowercase();
        let mut hits: Vec<&MakeTarget> = targets
            .iter()
            .filter(|t| lowered.contains(&t.name) || t.name.contains(lowered.trim()))
            .collect();

        match hits.len() {
            0 => Err(TranslationError::UnrecognizedText(text.to_string())),
            1 => Ok(CommandDescriptor::new(hits[0].namespace, hits[0].name.clone())),
            _ => {
                // Deterministic resolution: least privileged namespace wins,
                // then target name. Never surfaced to the caller.
                hits.sort_by(|a, b| a.namespace.cmp(&b.namespace).then(a.name.cmp(&b.name)));
                Ok(CommandDescriptor::new(hits[0].namespace, hits[0].name.clone()))
            }
        }
    }
}

fn build_descriptor(
    pattern: &CommandPattern,
    captures: &regex::Captures,
) -> Result<CommandDescriptor, TranslationError> {
    let mut descriptor = CommandDescriptor::new(pattern.namespace, pattern.target);

    for (name, group) in pattern.params {
        let value = captures
            .get(*group)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        if NUMERIC_PARAMS.contains(name) && value.parse::<u32>().is_err() {
            return Err(TranslationError::InvalidParameter {
                name: name.to_string(),
                value,
            });
        }

        descriptor = descriptor.with_param(*name, value);
    }

    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> Translator {
        Translator::with_defaults()
    }

    #[test]
    fn translates_admin_timeout_command() {
        let cmd = translator()
            .text_to_command("ustaw timeout 30", AppType::Weather)
            .unwrap();
        assert_eq!(cmd.namespace, Namespace::Admin);
        assert_eq!(cmd.target, "set-timeout");
        assert_eq!(cmd.params.get("SEC").map(String::as_str), Some("30"));
        assert_eq!(cmd.raw, "make -f Makefile.admin set-timeout SEC=30");
    }

    #[test]
    fn timeout_round_trip_keeps_semantics() {
        let t = translator();
        let cmd = t.text_to_command("ustaw timeout 30", AppType::Weather).unwrap();
        let confirmation = t.command_to_text(&cmd);
        assert!(confirmation.contains("30"));
        assert!(confirmation.contains("timeout"));
    }

    #[test]
    fn default_city_command_preserves_casing() {
        let t = translator();
        let cmd = t
            .text_to_command("ustaw domyślne miasto Gdańsk", AppType::Weather)
            .unwrap();
        assert_eq!(cmd.target, "set-default-city");
        assert_eq!(cmd.namespace, Namespace::Admin);
        assert_eq!(cmd.params.get("CITY").map(String::as_str), Some("Gdańsk"));
        assert!(t.command_to_text(&cmd).contains("Gdańsk"));
    }

    #[test]
    fn oversized_number_is_invalid_parameter() {
        let err = translator()
            .text_to_command("ustaw timeout 99999999999999", AppType::Weather)
            .unwrap_err();
        assert!(matches!(err, TranslationError::InvalidParameter { .. }));
    }

    #[test]
    fn unmatched_text_without_catalog_is_no_matching_app() {
        let err = translator()
            .text_to_command("zupełnie nieznane polecenie", AppType::Documents)
            .unwrap_err();
        assert!(matches!(err, TranslationError::NoMatchingApp(AppType::Documents)));
    }

    #[test]
    fn catalog_lookup_translates_by_target_name() {
        let mut t = translator();
        t.register_catalog(
            AppType::Documents,
            vec![MakeTarget {
                name: "archiwum".to_string(),
                description: "Pokaż archiwum".to_string(),
                params: vec![],
                namespace: Namespace::User,
                example: "make -f Makefile.user archiwum".to_string(),
            }],
        );
        let cmd = t
            .text_to_command("otwórz archiwum dokumentów", AppType::Documents)
            .unwrap();
        assert_eq!(cmd.target, "archiwum");
        assert_eq!(cmd.namespace, Namespace::User);
    }

    #[test]
    fn catalog_ambiguity_prefers_user_namespace() {
        let mut t = translator();
        t.register_catalog(
            AppType::Documents,
            vec![
                MakeTarget {
                    name: "eksport".to_string(),
                    description: String::new(),
                    params: vec![],
                    namespace: Namespace::Admin,
                    example: String::new(),
                },
                MakeTarget {
                    name: "eksport".to_string(),
                    description: String::new(),
                    params: vec![],
                    namespace: Namespace::User,
                    example: String::new(),
                },
            ],
        );
        let cmd = t.text_to_command("zrób eksport", AppType::Documents).unwrap();
        assert_eq!(cmd.namespace, Namespace::User);
    }

    #[test]
    fn suggestions_filter_by_namespace() {
        let mut t = translator();
        t.register_catalog(
            AppType::Weather,
            vec![
                MakeTarget {
                    name: "pogoda".to_string(),
                    description: "Pokaż pogodę".to_string(),
                    params: vec![],
                    namespace: Namespace::User,
                    example: "make -f Makefile.user pogoda".to_string(),
                },
                MakeTarget {
                    name: "set-timeout".to_string(),
                    description: String::new(),
                    params: vec!["SEC".to_string()],
                    namespace: Namespace::Admin,
                    example: "make -f Makefile.admin set-timeout SEC=...".to_string(),
                },
            ],
        );
        let user = t.suggestions(AppType::Weather, Namespace::User);
        assert_eq!(user.len(), 1);
        assert_eq!(user[0].target, "pogoda");
    }
}
