//! Per-app view builders.
//!
//! Each builder is a pure mapping from `(intent, data)` to a view
//! descriptor plus the stats context shared with the response renderer.
//! Data is injected verbatim; builders never fetch anything.

use crate::registry::ViewBuilder;
use crate::stats::{
    weather_context, AnalyticsStats, CameraStats, DocumentStats, HomeStats, SalesStats,
};
use serde_json::{json, Value};
use vox_core::{
    ActionButton, AppType, ChartSeries, ChartSpec, Column, DomainData, GridSpec, HelpCategory,
    Intent, Stat, ViewDescriptor, ViewKind,
};

pub struct DocumentsView;

impl ViewBuilder for DocumentsView {
    fn app(&self) -> AppType {
        AppType::Documents
    }

    fn build(&self, intent: &Intent, data: &DomainData) -> (ViewDescriptor, Value) {
        let DomainData::Documents { items } = data else {
            return (generic_view(intent.app), Value::Null);
        };
        let stats = DocumentStats::compute(items);

        let view = ViewDescriptor::new(AppType::Documents, ViewKind::Table, "Zeskanowane dokumenty")
            .with_subtitle(format!(
                "{} dokumentów | Suma: {} | Do zapłaty: {}",
                stats.count,
                stats.total_display(),
                stats.unpaid
            ))
            .with_columns(vec![
                Column::new("filename", "Plik"),
                Column::new("vendor", "Dostawca"),
                Column::new("nip", "NIP"),
                Column::formatted("amount_gross", "Kwota brutto", "currency"),
                Column::new("date", "Data"),
                Column::new("due_date", "Termin"),
                Column::formatted("status", "Status", "badge"),
            ])
            .with_data(json!(items))
            .with_stats(vec![
                Stat::new("Dokumentów", stats.count),
                Stat::new("Suma brutto", stats.total_display()),
                Stat::new("Do zapłaty", stats.unpaid),
                Stat::new("Dostawców", stats.vendors),
            ])
            .with_actions(vec![
                ActionButton::new("scan", "Skanuj nową"),
                ActionButton::new("export", "Eksportuj"),
                ActionButton::new("filter", "Filtruj"),
            ]);

        (view, stats.context())
    }
}

pub struct CamerasView;

impl ViewBuilder for CamerasView {
    fn app(&self) -> AppType {
        AppType::Cameras
    }

    fn build(&self, intent: &Intent, data: &DomainData) -> (ViewDescriptor, Value) {
        let DomainData::Cameras { items } = data else {
            return (generic_view(intent.app), Value::Null);
        };
        let stats = CameraStats::compute(items);

        let view = ViewDescriptor::new(AppType::Cameras, ViewKind::Matrix, "Monitoring - Podgląd kamer")
            .with_subtitle(format!(
                "{} online | Wykryto obiektów: {} | Alerty: {}",
                stats.online_display(),
                stats.objects,
                stats.alerts
            ))
            .with_grid(GridSpec { columns: 2, rows: 2 })
            .with_data(json!(items))
            .with_stats(vec![
                Stat::new("Kamery online", stats.online_display()),
                Stat::new("Wykryte obiekty", stats.objects),
                Stat::new("Aktywne alerty", stats.alerts),
                Stat::new("Ostatni ruch", stats.last_motion.clone()),
            ])
            .with_actions(vec![
                ActionButton::new("fullscreen", "Pełny ekran"),
                ActionButton::new("record", "Nagrywaj"),
                ActionButton::new("alerts", "Alerty"),
            ]);

        (view, stats.context())
    }
}

pub struct SalesView;

impl ViewBuilder for SalesView {
    fn app(&self) -> AppType {
        AppType::Sales
    }

    fn build(&self, intent: &Intent, data: &DomainData) -> (ViewDescriptor, Value) {
        let DomainData::Sales { snapshot } = data else {
            return (generic_view(intent.app), Value::Null);
        };
        let stats = SalesStats::compute(snapshot);

        let mut sorted = snapshot.regions.clone();
        sorted.sort_by(|a, b| b.amount.total_cmp(&a.amount));

        let chart = ChartSpec {
            kind: "bar".to_string(),
            labels: sorted.iter().map(|r| r.region.clone()).collect(),
            series: vec![ChartSeries {
                label: "Sprzedaż (PLN)".to_string(),
                values: sorted.iter().map(|r| r.amount).collect(),
            }],
        };

        let view = ViewDescriptor::new(AppType::Sales, ViewKind::Dashboard, "Dashboard sprzedaży")
            .with_subtitle(format!(
                "Suma: {} | Transakcji: {} | Wzrost: {}",
                stats.total_display(),
                stats.transactions,
                stats.growth_display()
            ))
            .with_chart(chart)
            .with_columns(vec![
                Column::new("region", "Region"),
                Column::formatted("amount", "Sprzedaż", "currency"),
                Column::new("transactions", "Transakcje"),
                Column::formatted("growth", "Wzrost", "percent"),
                Column::new("top_product", "Top produkt"),
            ])
            .with_data(json!(snapshot.regions))
            .with_stats(vec![
                Stat::new("Suma sprzedaży", stats.total_display()),
                Stat::new("Transakcji", stats.transactions),
                Stat::new("Śr. wzrost", stats.growth_display()),
                Stat::new("Regionów", stats.regions),
            ])
            .with_actions(vec![
                ActionButton::new("export", "Eksportuj PDF"),
                ActionButton::new("compare", "Porównaj"),
                ActionButton::new("details", "Szczegóły"),
            ]);

        (view, stats.context())
    }
}

pub struct HomeView;

impl ViewBuilder for HomeView {
    fn app(&self) -> AppType {
        AppType::Home
    }

    fn build(&self, intent: &Intent, data: &DomainData) -> (ViewDescriptor, Value) {
        let DomainData::Home { rooms } = data else {
            return (generic_view(intent.app), Value::Null);
        };
        let stats = HomeStats::compute(rooms);

        let view = ViewDescriptor::new(AppType::Home, ViewKind::SmartHome, "Smart Home")
            .with_subtitle(format!(
                "Temperatura średnia: {} | Zużycie: {}",
                stats.temp_display(),
                stats.power_display()
            ))
            .with_data(json!(rooms))
            .with_stats(vec![
                Stat::new("Śr. temperatura", stats.temp_display()),
                Stat::new("Zużycie energii", stats.power_display()),
                Stat::new("Światła włączone", stats.lights_on),
                Stat::new("Wykryty ruch", stats.motion),
            ])
            .with_actions(vec![
                ActionButton::new("all_lights_off", "Wyłącz światła"),
                ActionButton::new("eco_mode", "Tryb eco"),
                ActionButton::new("schedule", "Harmonogram"),
            ]);

        (view, stats.context())
    }
}

pub struct AnalyticsView;

impl ViewBuilder for AnalyticsView {
    fn app(&self) -> AppType {
        AppType::Analytics
    }

    fn build(&self, intent: &Intent, data: &DomainData) -> (ViewDescriptor, Value) {
        let DomainData::Analytics { series } = data else {
            return (generic_view(intent.app), Value::Null);
        };
        let stats = AnalyticsStats::compute(series);

        let chart = ChartSpec {
            kind: "line".to_string(),
            labels: series.labels.clone(),
            series: vec![ChartSeries {
                label: "Aktywność".to_string(),
                values: series.values.iter().map(|v| *v as f64).collect(),
            }],
        };

        let view = ViewDescriptor::new(
            AppType::Analytics,
            ViewKind::AnalyticsDashboard,
            "Analityka i Raporty",
        )
        .with_subtitle(format!("Ostatnie 7 dni | Suma: {} zdarzeń", stats.total))
        .with_chart(chart)
        .with_data(json!(series))
        .with_stats(vec![
            Stat::new("Suma zdarzeń", stats.total),
            Stat::new("Średnia dzienna", stats.daily_avg),
            Stat::new("Max", stats.max),
            Stat::new("Min", stats.min),
        ])
        .with_actions(vec![
            ActionButton::new("export_report", "Eksportuj raport"),
            ActionButton::new("set_alerts", "Ustaw alerty"),
            ActionButton::new("compare", "Porównaj okresy"),
        ]);

        (view, stats.context())
    }
}

pub struct WeatherView;

impl ViewBuilder for WeatherView {
    fn app(&self) -> AppType {
        AppType::Weather
    }

    fn build(&self, intent: &Intent, data: &DomainData) -> (ViewDescriptor, Value) {
        let DomainData::Weather { report } = data else {
            return (generic_view(intent.app), Value::Null);
        };
        let context = weather_context(report);

        let view = ViewDescriptor::new(
            AppType::Weather,
            ViewKind::Cards,
            format!("Pogoda: {}", report.city),
        )
        .with_subtitle(format!("{}, {:.1}°C", report.conditions, report.temperature))
        .with_data(json!(report))
        .with_stats(vec![
            Stat::new("Temperatura", format!("{:.1}°C", report.temperature)),
            Stat::new("Warunki", report.conditions.clone()),
            Stat::new("Wilgotność", format!("{}%", report.humidity)),
            Stat::new("Wiatr", format!("{:.1} km/h", report.wind_kph)),
        ])
        .with_actions(vec![
            ActionButton::new("forecast", "Prognoza"),
            ActionButton::new("change_city", "Zmień miasto"),
        ]);

        (view, context)
    }
}

/// System views: help, history, status and the welcome screen.
pub struct SystemView {
    help: Vec<HelpCategory>,
}

impl SystemView {
    pub fn new(help: Vec<HelpCategory>) -> Self {
        Self { help }
    }
}

impl ViewBuilder for SystemView {
    fn app(&self) -> AppType {
        AppType::System
    }

    fn build(&self, intent: &Intent, _data: &DomainData) -> (ViewDescriptor, Value) {
        let view = match intent.action.as_str() {
            "help" => ViewDescriptor::new(AppType::System, ViewKind::Help, "Dostępne komendy")
                .with_help(self.help.clone()),
            "history" => {
                ViewDescriptor::new(AppType::System, ViewKind::History, "Historia konwersacji")
                    .with_message("Historia jest dostępna przez /api/conversation.")
            }
            "status" => ViewDescriptor::new(AppType::System, ViewKind::Generic, "Status systemu")
                .with_message("System działa prawidłowo. Wszystkie komponenty aktywne."),
            "clear" => ViewDescriptor::new(AppType::System, ViewKind::Welcome, "Witaj")
                .with_message(WELCOME_MESSAGE),
            _ => generic_view(AppType::System),
        };

        (view, Value::Null)
    }
}

const WELCOME_MESSAGE: &str = "Powiedz komendę głosową lub wpisz w chat. Przykłady: 'Pokaż faktury', 'Monitoring', 'Sprzedaż', 'Temperatura', 'Pogoda', 'Pomoc'.";

pub fn generic_view(app: AppType) -> ViewDescriptor {
    ViewDescriptor::new(app, ViewKind::Generic, "OK").with_message("OK, wyświetlam.")
}

pub fn welcome_view() -> ViewDescriptor {
    ViewDescriptor::new(AppType::System, ViewKind::Welcome, "Witaj").with_message(WELCOME_MESSAGE)
}

/// Denial view: carries no app data at all.
pub fn access_denied_view(app: AppType) -> ViewDescriptor {
    ViewDescriptor::new(app, ViewKind::AccessDenied, "Brak dostępu")
        .with_message(format!("Brak dostępu do aplikacji {}.", app))
}

/// Degraded view when a data collaborator does not answer.
pub fn degraded_view(app: AppType) -> ViewDescriptor {
    ViewDescriptor::new(app, ViewKind::Generic, "Brak danych")
        .with_message("Brak danych, spróbuj później.")
}

/// Fallback view for unrecognized input: help-oriented.
pub fn unknown_view(help: &[HelpCategory]) -> ViewDescriptor {
    ViewDescriptor::new(AppType::System, ViewKind::Help, "Nie rozumiem")
        .with_message("Nie rozumiem polecenia. Oto dostępne komendy:")
        .with_help(help.to_vec())
}
