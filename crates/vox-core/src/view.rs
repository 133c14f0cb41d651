//! The view descriptor contract.
//!
//! A serialization-only value object: the core builds it once per reply
//! and never mutates it afterwards. Rendering happens in the frontend.

use crate::intent::AppType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Table,
    Matrix,
    Dashboard,
    SmartHome,
    AnalyticsDashboard,
    Cards,
    Help,
    History,
    Welcome,
    AccessDenied,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub key: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            format: None,
        }
    }

    pub fn formatted(key: impl Into<String>, label: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            format: Some(format.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: Value,
}

impl Stat {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionButton {
    pub id: String,
    pub label: String,
}

impl ActionButton {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// "bar" or "line".
    pub kind: String,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
}

/// One category block in the help view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelpCategory {
    pub category: String,
    pub commands: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewDescriptor {
    pub app: AppType,
    pub kind: ViewKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Column>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<Stat>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionButton>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub help: Vec<HelpCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ViewDescriptor {
    pub fn new(app: AppType, kind: ViewKind, title: impl Into<String>) -> Self {
        Self {
            app,
            kind,
            title: title.into(),
            subtitle: None,
            columns: Vec::new(),
            data: Value::Null,
            stats: Vec::new(),
            actions: Vec::new(),
            chart: None,
            grid: None,
            help: Vec::new(),
            message: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn with_stats(mut self, stats: Vec<Stat>) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_actions(mut self, actions: Vec<ActionButton>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_chart(mut self, chart: ChartSpec) -> Self {
        self.chart = Some(chart);
        self
    }

    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn with_help(mut self, help: Vec<HelpCategory>) -> Self {
        self.help = help;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Look up a stat by label, as rendered in the stats block.
    pub fn stat(&self, label: &str) -> Option<&Value> {
        self.stats.iter().find(|s| s.label == label).map(|s| &s.value)
    }
}
