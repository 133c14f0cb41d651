//! Spoken-style response generation.
//!
//! Handlebars templates keyed `"{app}.{action}"`, grouped into locale
//! pools. The locale selects the pool only; the stats context carries the
//! numbers, pre-formatted so the sentence matches the view's stats block
//! character for character.

use handlebars::Handlebars;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use vox_core::{AppType, Intent, Locale};

#[derive(Debug, Clone, Deserialize)]
struct ResponseFile {
    version: String,
    locales: HashMap<String, HashMap<String, String>>,
}

pub struct ResponseRenderer {
    handlebars: Handlebars<'static>,
    registered: HashSet<String>,
}

impl ResponseRenderer {
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let file: ResponseFile =
            serde_yaml::from_str(yaml).map_err(|e| format!("response YAML: {}", e))?;
        let _ = file.version;

        let mut handlebars = Handlebars::new();
        let mut registered = HashSet::new();
        for (locale, templates) in &file.locales {
            for (key, template) in templates {
                let id = format!("{}:{}", locale, key);
                handlebars
                    .register_template_string(&id, template)
                    .map_err(|e| format!("template '{}': {}", id, e))?;
                registered.insert(id);
            }
        }

        Ok(Self {
            handlebars,
            registered,
        })
    }

    pub fn defaults() -> Self {
        Self::from_yaml(DEFAULT_RESPONSES).expect("built-in response templates must compile")
    }

    /// Render the response for an intent. The context is the stats value
    /// produced by the matching view builder; intent parameters are merged
    /// in under their own names.
    pub fn render(&self, intent: &Intent, context: &Value, locale: Locale) -> String {
        let mut data = match context {
            Value::Object(map) => map.clone(),
            _ => serde_json::Map::new(),
        };
        for (key, value) in &intent.parameters {
            data.entry(key.clone())
                .or_insert_with(|| Value::String(value.clone()));
        }
        data.insert("app".to_string(), json!(intent.app.to_string()));
        data.insert("action".to_string(), json!(intent.action));
        let data = Value::Object(data);

        let keys = [
            format!("{}.{}", intent.app, intent.action),
            format!("{}.default", intent.app),
            "generic".to_string(),
        ];

        for locale_code in [locale.code(), Locale::Pl.code()] {
            for key in &keys {
                let id = format!("{}:{}", locale_code, key);
                if self.registered.contains(&id) {
                    if let Ok(text) = self.handlebars.render(&id, &data) {
                        return text;
                    }
                }
            }
        }

        "OK.".to_string()
    }

    pub fn not_understood(&self, locale: Locale) -> String {
        self.fixed("system.unknown", locale)
    }

    pub fn denied(&self, app: AppType, locale: Locale) -> String {
        let data = json!({ "app": app.to_string() });
        for locale_code in [locale.code(), Locale::Pl.code()] {
            let id = format!("{}:denied", locale_code);
            if self.registered.contains(&id) {
                if let Ok(text) = self.handlebars.render(&id, &data) {
                    return text;
                }
            }
        }
        format!("Brak dostępu do aplikacji {}.", app)
    }

    pub fn degraded(&self, locale: Locale) -> String {
        self.fixed("degraded", locale)
    }

    /// Clarifying question for a parameter that failed validation.
    pub fn invalid_parameter(&self, name: &str, locale: Locale) -> String {
        let data = json!({ "name": name });
        for locale_code in [locale.code(), Locale::Pl.code()] {
            let id = format!("{}:invalid_parameter", locale_code);
            if self.registered.contains(&id) {
                if let Ok(text) = self.handlebars.render(&id, &data) {
                    return text;
                }
            }
        }
        format!("Nieprawidłowa wartość parametru {}.", name)
    }

    pub fn welcome(&self, locale: Locale) -> String {
        self.fixed("welcome", locale)
    }

    fn fixed(&self, key: &str, locale: Locale) -> String {
        for locale_code in [locale.code(), Locale::Pl.code()] {
            let id = format!("{}:{}", locale_code, key);
            if self.registered.contains(&id) {
                if let Ok(text) = self.handlebars.render(&id, &json!({})) {
                    return text;
                }
            }
        }
        "OK.".to_string()
    }
}

const DEFAULT_RESPONSES: &str = r#"
version: "1.0"
locales:
  pl:
    documents.show_all: "Wyświetlam {{count}} dokumentów. Suma brutto wynosi {{total_gross}}. {{unpaid}} faktur oczekuje na płatność."
    documents.scan_new: "Aktywuję skanowanie. Połóż dokument i powiedz 'zeskanuj' gdy będziesz gotowy."
    documents.count: "Masz {{count}} zeskanowanych dokumentów od {{vendors}} dostawców."
    documents.sum_total: "Łączna suma dokumentów to {{total_gross}}."
    documents.contracts: "Wyświetlam umowy i kontrakty."
    documents.overdue: "Wyświetlam przeterminowane dokumenty."
    documents.export_excel: "Eksportuję dokumenty do Excel."
    documents.default: "Wyświetlam dokumenty. Znaleziono {{count}} pozycji."
    cameras.show_grid: "Wyświetlam podgląd kamer. {{online}} online. Wykryto {{objects}} obiektów. {{alerts}} aktywnych alertów."
    cameras.show_motion: "Ostatni ruch wykryty o {{last_motion}}. Aktualnie wykrytych obiektów: {{objects}}."
    cameras.show_alerts: "Masz {{alerts}} aktywnych alertów."
    cameras.parking: "Wyświetlam kamery parkingu."
    cameras.entrance: "Wyświetlam kamerę wejścia głównego."
    cameras.warehouse: "Wyświetlam kamery magazynu."
    cameras.heatmap: "Generuję mapę ciepła ruchu."
    cameras.recordings: "Wyświetlam historię nagrań."
    cameras.default: "Wyświetlam monitoring kamer."
    sales.show_dashboard: "Wyświetlam dashboard sprzedaży. Suma sprzedaży wynosi {{total}}. Zrealizowano {{transactions}} transakcji. Średni wzrost: {{avg_growth}}."
    sales.compare_regions: "Porównuję {{regions}} regionów. Najlepszy wynik ma {{top_region}}."
    sales.kpi_dashboard: "Wyświetlam dashboard KPI."
    sales.forecast: "Generuję prognozę sprzedaży."
    sales.funnel: "Wyświetlam lejek sprzedażowy."
    sales.default: "Wyświetlam dane sprzedażowe."
    home.temperature: "Temperatura w domu: {{avg_temp}}."
    home.lighting: "Włączonych świateł: {{lights_on}}."
    home.energy: "Aktualne zużycie energii: {{power}}."
    home.power_usage: "Zużycie prądu: {{power}}."
    home.default: "Wyświetlam dashboard Smart Home. Temperatura: {{avg_temp}}."
    analytics.overview: "Wyświetlam analitykę. Suma zdarzeń: {{total}}, średnia dzienna: {{daily_avg}}."
    analytics.daily_report: "Generuję raport dzienny."
    analytics.weekly_report: "Generuję raport tygodniowy."
    analytics.monthly_report: "Generuję raport miesięczny."
    analytics.anomalies: "Analizuję anomalie w danych."
    analytics.prediction: "Generuję predykcję na podstawie danych historycznych."
    analytics.default: "Wyświetlam dashboard analityczny. Suma zdarzeń: {{total}}."
    weather.current: "Pogoda w {{city}}: {{conditions}}, {{temperature}}."
    weather.forecast: "Prognoza dla {{city}} na najbliższe dni."
    weather.default: "Wyświetlam pogodę dla {{city}}."
    system.help: "Wyświetlam dostępne komendy. Obsługuję dokumenty, kamery, sprzedaż, smart home, analitykę i pogodę."
    system.clear: "Czyszczę widok."
    system.status: "System działa prawidłowo. Wszystkie komponenty aktywne."
    system.history: "Wyświetlam historię konwersacji."
    system.settings: "Otwieram ustawienia systemu."
    system.unknown: "Nie rozumiem polecenia. Powiedz 'pomoc' aby zobaczyć dostępne komendy."
    system.default: "OK."
    denied: "Brak dostępu do aplikacji {{app}}. Zaloguj się na konto z odpowiednimi uprawnieniami."
    degraded: "Brak danych, spróbuj później."
    invalid_parameter: "Nieprawidłowa wartość parametru {{name}}. Podaj liczbę."
    welcome: "Cześć! Jestem Twoim asystentem. Powiedz co chcesz zrobić."
    generic: "OK, wyświetlam."
  en:
    documents.show_all: "Showing {{count}} documents. Gross total is {{total_gross}}. {{unpaid}} invoices await payment."
    documents.count: "You have {{count}} scanned documents from {{vendors}} vendors."
    documents.default: "Showing documents. Found {{count}} items."
    cameras.show_grid: "Showing camera feeds. {{online}} online. {{objects}} objects detected. {{alerts}} active alerts."
    cameras.default: "Showing camera monitoring."
    sales.show_dashboard: "Showing the sales dashboard. Total sales are {{total}}. {{transactions}} transactions completed. Average growth: {{avg_growth}}."
    sales.default: "Showing sales data."
    home.default: "Showing the smart home dashboard. Temperature: {{avg_temp}}."
    analytics.default: "Showing the analytics dashboard. Total events: {{total}}."
    weather.current: "Weather in {{city}}: {{conditions}}, {{temperature}}."
    weather.default: "Showing weather for {{city}}."
    system.help: "Showing available commands."
    system.unknown: "I don't understand. Say 'help' to see commands."
    system.default: "OK."
    denied: "No access to the {{app}} app. Sign in with an account that has permission."
    degraded: "No data available, try again later."
    invalid_parameter: "Invalid value for parameter {{name}}. Provide a number."
    welcome: "Hi! I'm your assistant. Tell me what you want to do."
    generic: "OK, showing it."
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use vox_core::Confidence;

    fn renderer() -> ResponseRenderer {
        ResponseRenderer::defaults()
    }

    #[test]
    fn renders_documents_summary() {
        let intent = Intent::new(AppType::Documents, "show_all", Confidence::Exact);
        let context = json!({ "count": 8, "total_gross": "12 345,67 PLN", "unpaid": 3, "vendors": 4 });
        let text = renderer().render(&intent, &context, Locale::Pl);
        assert!(text.contains("8 dokumentów"));
        assert!(text.contains("12 345,67 PLN"));
        assert!(text.contains("3 faktur"));
    }

    #[test]
    fn unknown_action_falls_back_to_app_default() {
        let intent = Intent::new(AppType::Documents, "recent_scans", Confidence::Exact);
        let context = json!({ "count": 5 });
        let text = renderer().render(&intent, &context, Locale::Pl);
        assert_eq!(text, "Wyświetlam dokumenty. Znaleziono 5 pozycji.");
    }

    #[test]
    fn english_pool_is_selected_by_locale() {
        let intent = Intent::new(AppType::Documents, "show_all", Confidence::Exact);
        let context = json!({ "count": 2, "total_gross": "100,00 PLN", "unpaid": 1, "vendors": 1 });
        let text = renderer().render(&intent, &context, Locale::En);
        assert!(text.starts_with("Showing 2 documents"));
    }

    #[test]
    fn missing_english_key_falls_back_within_pool() {
        let intent = Intent::new(AppType::Cameras, "heatmap", Confidence::Exact);
        // en pool has no cameras.heatmap; en cameras.default wins first
        let text = renderer().render(&intent, &json!({}), Locale::En);
        assert_eq!(text, "Showing camera monitoring.");
    }

    #[test]
    fn denial_names_the_app() {
        let text = renderer().denied(AppType::Documents, Locale::Pl);
        assert!(text.contains("Brak dostępu"));
        assert!(text.contains("documents"));
    }

    #[test]
    fn degraded_and_welcome_messages() {
        assert_eq!(renderer().degraded(Locale::Pl), "Brak danych, spróbuj później.");
        assert!(renderer().welcome(Locale::En).starts_with("Hi!"));
    }

    #[test]
    fn intent_parameters_reach_the_template() {
        let intent = Intent::new(AppType::Weather, "current", Confidence::Exact)
            .with_param("city", "Gdańsk");
        let context = json!({ "conditions": "Słonecznie", "temperature": "21.0°C", "city": "Gdańsk" });
        let text = renderer().render(&intent, &context, Locale::Pl);
        assert!(text.contains("Gdańsk"));
        assert!(text.contains("Słonecznie"));
    }
}
