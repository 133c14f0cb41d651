//! Deterministic aggregates over domain data.
//!
//! The same aggregate feeds both the view's stats block and the spoken
//! response, computed once per reply. That is what keeps the numbers a
//! user hears consistent with the numbers on screen.

use serde_json::{json, Value};
use vox_core::{ActivitySeries, CameraStatus, Document, RoomReading, SalesSnapshot, WeatherReport};

/// "12 345,67 PLN" — space-grouped thousands, comma decimals.
pub fn format_pln(amount: f64) -> String {
    format!("{} PLN", format_amount(amount))
}

pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    format!("{}{},{:02}", if negative { "-" } else { "" }, grouped, frac)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStats {
    pub count: usize,
    pub total_gross: f64,
    pub unpaid: usize,
    pub vendors: usize,
}

impl DocumentStats {
    pub fn compute(docs: &[Document]) -> Self {
        let vendors: std::collections::BTreeSet<&str> =
            docs.iter().map(|d| d.vendor.as_str()).collect();
        Self {
            count: docs.len(),
            total_gross: docs.iter().map(|d| d.amount_gross).sum(),
            unpaid: docs.iter().filter(|d| d.status != "Zapłacona").count(),
            vendors: vendors.len(),
        }
    }

    pub fn total_display(&self) -> String {
        format_pln(self.total_gross)
    }

    pub fn context(&self) -> Value {
        json!({
            "count": self.count,
            "total_gross": self.total_display(),
            "unpaid": self.unpaid,
            "vendors": self.vendors,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraStats {
    pub online: usize,
    pub total: usize,
    pub objects: u32,
    pub alerts: usize,
    pub last_motion: String,
}

impl CameraStats {
    pub fn compute(cameras: &[CameraStatus]) -> Self {
        Self {
            online: cameras.iter().filter(|c| c.is_online()).count(),
            total: cameras.len(),
            objects: cameras.iter().map(|c| c.objects_detected).sum(),
            alerts: cameras.iter().map(|c| c.alerts.len()).sum(),
            last_motion: cameras
                .first()
                .map(|c| c.last_motion.clone())
                .unwrap_or_else(|| "-".to_string()),
        }
    }

    pub fn online_display(&self) -> String {
        format!("{}/{}", self.online, self.total)
    }

    pub fn context(&self) -> Value {
        json!({
            "online": self.online_display(),
            "objects": self.objects,
            "alerts": self.alerts,
            "last_motion": self.last_motion,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesStats {
    pub total: f64,
    pub transactions: u32,
    pub avg_growth: f64,
    pub regions: usize,
    pub top_region: String,
}

impl SalesStats {
    pub fn compute(snapshot: &SalesSnapshot) -> Self {
        let regions = &snapshot.regions;
        let total: f64 = regions.iter().map(|r| r.amount).sum();
        let avg_growth = if regions.is_empty() {
            0.0
        } else {
            regions.iter().map(|r| r.growth).sum::<f64>() / regions.len() as f64
        };
        let top_region = regions
            .iter()
            .max_by(|a, b| a.amount.total_cmp(&b.amount))
            .map(|r| r.region.clone())
            .unwrap_or_else(|| "-".to_string());

        Self {
            total,
            transactions: regions.iter().map(|r| r.transactions).sum(),
            avg_growth,
            regions: regions.len(),
            top_region,
        }
    }

    pub fn total_display(&self) -> String {
        format_pln(self.total)
    }

    pub fn growth_display(&self) -> String {
        format!("{:+.1}%", self.avg_growth)
    }

    pub fn context(&self) -> Value {
        json!({
            "total": self.total_display(),
            "transactions": self.transactions,
            "avg_growth": self.growth_display(),
            "regions": self.regions,
            "top_region": self.top_region,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeStats {
    pub avg_temp: f64,
    pub power_kw: f64,
    pub lights_on: usize,
    pub motion: usize,
}

impl HomeStats {
    pub fn compute(rooms: &[RoomReading]) -> Self {
        let avg_temp = if rooms.is_empty() {
            0.0
        } else {
            rooms.iter().map(|r| r.temperature).sum::<f64>() / rooms.len() as f64
        };
        // demo heuristic: each lit room draws roughly a kilowatt and change
        let power_kw = 1.2 + rooms.iter().filter(|r| r.light_on).count() as f64 * 1.1;

        Self {
            avg_temp,
            power_kw,
            lights_on: rooms.iter().filter(|r| r.light_on).count(),
            motion: rooms.iter().filter(|r| r.motion).count(),
        }
    }

    pub fn temp_display(&self) -> String {
        format!("{:.1}°C", self.avg_temp)
    }

    pub fn power_display(&self) -> String {
        format!("{:.1} kW", self.power_kw)
    }

    pub fn context(&self) -> Value {
        json!({
            "avg_temp": self.temp_display(),
            "power": self.power_display(),
            "lights_on": self.lights_on,
            "motion": self.motion,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsStats {
    pub total: u32,
    pub daily_avg: u32,
    pub max: u32,
    pub min: u32,
}

impl AnalyticsStats {
    pub fn compute(series: &ActivitySeries) -> Self {
        let total: u32 = series.values.iter().sum();
        let len = series.values.len().max(1) as u32;
        Self {
            total,
            daily_avg: total / len,
            max: series.values.iter().copied().max().unwrap_or(0),
            min: series.values.iter().copied().min().unwrap_or(0),
        }
    }

    pub fn context(&self) -> Value {
        json!({
            "total": self.total,
            "daily_avg": self.daily_avg,
            "max": self.max,
            "min": self.min,
        })
    }
}

pub fn weather_context(report: &WeatherReport) -> Value {
    json!({
        "city": report.city,
        "temperature": format!("{:.1}°C", report.temperature),
        "conditions": report.conditions,
        "humidity": format!("{}%", report.humidity),
        "wind": format!("{:.1} km/h", report.wind_kph),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(vendor: &str, gross: f64, status: &str) -> Document {
        Document {
            id: "d1".to_string(),
            filename: "FV_1.pdf".to_string(),
            vendor: vendor.to_string(),
            nip: "123".to_string(),
            amount_net: gross / 1.23,
            amount_vat: gross - gross / 1.23,
            amount_gross: gross,
            date: "2026-08-01".to_string(),
            due_date: "2026-08-15".to_string(),
            status: status.to_string(),
            scanned_at: "2026-08-06 10:00:00".to_string(),
        }
    }

    #[test]
    fn pln_formatting() {
        assert_eq!(format_pln(0.0), "0,00 PLN");
        assert_eq!(format_pln(1234.5), "1 234,50 PLN");
        assert_eq!(format_pln(12345678.91), "12 345 678,91 PLN");
        assert_eq!(format_pln(-42.0), "-42,00 PLN");
    }

    #[test]
    fn document_stats_aggregate() {
        let docs = vec![
            doc("ABC", 100.0, "Nowa"),
            doc("ABC", 200.0, "Zapłacona"),
            doc("XYZ", 50.0, "Do zapłaty"),
        ];
        let stats = DocumentStats::compute(&docs);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.unpaid, 2);
        assert_eq!(stats.vendors, 2);
        assert!((stats.total_gross - 350.0).abs() < f64::EPSILON);
        assert_eq!(stats.total_display(), "350,00 PLN");
    }

    #[test]
    fn empty_documents_yield_zero_stats() {
        let stats = DocumentStats::compute(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.total_display(), "0,00 PLN");
        assert_eq!(stats.unpaid, 0);
    }

    #[test]
    fn sales_growth_display_is_signed() {
        let snapshot = SalesSnapshot {
            regions: vec![
                vox_core::SalesRegion {
                    region: "Warszawa".to_string(),
                    amount: 100.0,
                    transactions: 10,
                    growth: 10.0,
                    top_product: "A".to_string(),
                },
                vox_core::SalesRegion {
                    region: "Kraków".to_string(),
                    amount: 300.0,
                    transactions: 20,
                    growth: -4.0,
                    top_product: "B".to_string(),
                },
            ],
        };
        let stats = SalesStats::compute(&snapshot);
        assert_eq!(stats.growth_display(), "+3.0%");
        assert_eq!(stats.top_region, "Kraków");
        assert_eq!(stats.transactions, 30);
    }

    #[test]
    fn analytics_stats_handle_empty_series() {
        let stats = AnalyticsStats::compute(&ActivitySeries {
            labels: vec![],
            values: vec![],
        });
        assert_eq!(stats.total, 0);
        assert_eq!(stats.daily_avg, 0);
    }
}
