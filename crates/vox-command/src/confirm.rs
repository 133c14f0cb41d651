//! Natural-language confirmations for command targets.
//!
//! Handlebars templates keyed by target; params substitute directly. An
//! unknown target falls back to the generic "Wykonano: <target>" form.

use handlebars::Handlebars;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use vox_core::CommandDescriptor;

#[derive(Debug, Clone, Deserialize)]
struct ConfirmationFile {
    version: String,
    templates: HashMap<String, String>,
}

const DEFAULT_CONFIRMATIONS: &str = r#"
version: "1.0"
templates:
  pogoda: "Pokaż aktualną pogodę"
  weather: "Show current weather"
  city: "Sprawdź pogodę dla {{CITY}}"
  temp: "Pokaż temperaturę"
  forecast: "Pokaż prognozę na {{DAYS}} dni"
  start: "Uruchom aplikację"
  stop: "Zatrzymaj aplikację"
  restart: "Restartuj aplikację"
  status: "Sprawdź status"
  health: "Sprawdź zdrowie serwisu"
  logs: "Pokaż logi"
  install: "Zainstaluj zależności"
  config: "Pokaż konfigurację"
  enable: "Włącz aplikację"
  disable: "Wyłącz aplikację"
  set-timeout: "Ustaw timeout na {{SEC}} sekund"
  set-default-city: "Ustaw domyślne miasto: {{CITY}}"
  backup: "Zrób kopię zapasową konfiguracji"
  test: "Przetestuj połączenie z API"
"#;

/// Compiled confirmation templates.
pub struct Confirmations {
    handlebars: Handlebars<'static>,
    known: Vec<String>,
}

impl Confirmations {
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let file: ConfirmationFile =
            serde_yaml::from_str(yaml).map_err(|e| format!("confirmation YAML: {}", e))?;
        let _ = file.version;

        let mut handlebars = Handlebars::new();
        let mut known = Vec::with_capacity(file.templates.len());
        for (target, template) in &file.templates {
            handlebars
                .register_template_string(target, template)
                .map_err(|e| format!("template '{}': {}", target, e))?;
            known.push(target.clone());
        }

        Ok(Self { handlebars, known })
    }

    pub fn defaults() -> Self {
        Self::from_yaml(DEFAULT_CONFIRMATIONS).expect("built-in confirmations must compile")
    }

    /// Render the confirmation sentence for a descriptor.
    pub fn render(&self, descriptor: &CommandDescriptor) -> String {
        if self.known.iter().any(|t| t == &descriptor.target) {
            let data = json!(descriptor.params);
            if let Ok(text) = self.handlebars.render(&descriptor.target, &data) {
                return text;
            }
        }
        format!("Wykonano: {}", descriptor.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vox_core::Namespace;

    #[test]
    fn renders_parameterized_confirmation() {
        let confirmations = Confirmations::defaults();
        let cmd = CommandDescriptor::new(Namespace::Admin, "set-timeout").with_param("SEC", "30");
        assert_eq!(confirmations.render(&cmd), "Ustaw timeout na 30 sekund");
    }

    #[test]
    fn renders_city_confirmation() {
        let confirmations = Confirmations::defaults();
        let cmd = CommandDescriptor::new(Namespace::Admin, "set-default-city")
            .with_param("CITY", "Gdańsk");
        assert_eq!(confirmations.render(&cmd), "Ustaw domyślne miasto: Gdańsk");
    }

    #[test]
    fn unknown_target_gets_generic_confirmation() {
        let confirmations = Confirmations::defaults();
        let cmd = CommandDescriptor::new(Namespace::User, "mystery-task");
        assert_eq!(confirmations.render(&cmd), "Wykonano: mystery-task");
    }
}
