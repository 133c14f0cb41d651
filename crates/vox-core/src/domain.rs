//! Domain records produced by the data collaborators and rendered by the
//! view layer. The core never generates these itself.

use serde::{Deserialize, Serialize};

/// A scanned invoice or contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub vendor: String,
    pub nip: String,
    pub amount_net: f64,
    pub amount_vat: f64,
    pub amount_gross: f64,
    pub date: String,
    pub due_date: String,
    pub status: String,
    pub scanned_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraStatus {
    pub id: String,
    pub name: String,
    pub location: String,
    pub status: String,
    pub objects_detected: u32,
    pub last_motion: String,
    pub stream_url: String,
    pub alerts: Vec<String>,
}

impl CameraStatus {
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRegion {
    pub region: String,
    pub amount: f64,
    pub transactions: u32,
    pub growth: f64,
    pub top_product: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSnapshot {
    pub regions: Vec<SalesRegion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomReading {
    pub room: String,
    pub temperature: f64,
    pub humidity: u32,
    pub light_on: bool,
    pub motion: bool,
}

/// One value per label; for the weekly dashboard labels are weekday names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySeries {
    pub labels: Vec<String>,
    pub values: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub day: String,
    pub high: f64,
    pub low: f64,
    pub conditions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: f64,
    pub conditions: String,
    pub humidity: u32,
    pub wind_kph: f64,
    pub forecast: Vec<DayForecast>,
}

/// Payload handed from a data collaborator to the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DomainData {
    Documents { items: Vec<Document> },
    Cameras { items: Vec<CameraStatus> },
    Sales { snapshot: SalesSnapshot },
    Home { rooms: Vec<RoomReading> },
    Analytics { series: ActivitySeries },
    Weather { report: WeatherReport },
    None,
}
