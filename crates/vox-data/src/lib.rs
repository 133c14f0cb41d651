//! Vox Data: simulated business data.
//!
//! The dispatcher treats data sources as external collaborators; this
//! crate ships the demo simulator plus a failing double for exercising
//! the degraded path. Generation is `rand`-driven; tests seed the RNG
//! for reproducibility.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use thiserror::Error;
use vox_core::{
    ActivitySeries, CameraStatus, DayForecast, Document, RoomReading, SalesRegion, SalesSnapshot,
    WeatherReport,
};

#[derive(Debug, Error)]
pub enum DataError {
    /// The collaborator did not answer; the dispatcher degrades the reply.
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}

pub trait DataSource: Send + Sync {
    fn documents(&self) -> Result<Vec<Document>, DataError>;
    fn cameras(&self) -> Result<Vec<CameraStatus>, DataError>;
    fn sales(&self) -> Result<SalesSnapshot, DataError>;
    fn home(&self) -> Result<Vec<RoomReading>, DataError>;
    fn analytics(&self) -> Result<ActivitySeries, DataError>;
    fn weather(&self, city: &str) -> Result<WeatherReport, DataError>;
}

const VENDORS: &[(&str, &str)] = &[
    ("ABC Sp. z o.o.", "1234567890"),
    ("XYZ S.A.", "9876543210"),
    ("Tech Solutions", "5551234567"),
    ("Office Plus", "1112223334"),
    ("Digital Services", "9998887776"),
];

const DOCUMENT_STATUSES: &[&str] = &["Nowa", "Zweryfikowana", "Do zapłaty", "Zapłacona"];

const CAMERA_LOCATIONS: &[(&str, &str)] = &[
    ("Wejście główne", "entrance"),
    ("Parking A", "parking_a"),
    ("Magazyn", "warehouse"),
    ("Korytarz 1", "corridor_1"),
    ("Recepcja", "reception"),
    ("Wyjście awaryjne", "emergency_exit"),
];

const REGIONS: &[&str] = &["Warszawa", "Kraków", "Wrocław", "Poznań", "Gdańsk", "Łódź"];

const PRODUCTS: &[&str] = &[
    "Produkt A",
    "Produkt B",
    "Usługa Premium",
    "Pakiet Standard",
    "Licencja Pro",
];

const ROOMS: &[&str] = &["Salon", "Sypialnia", "Kuchnia", "Łazienka", "Biuro"];

const WEEKDAYS: &[&str] = &["Pon", "Wt", "Śr", "Czw", "Pt", "Sob", "Ndz"];

const CONDITIONS: &[&str] = &["Słonecznie", "Pochmurno", "Deszcz", "Mgła", "Zachmurzenie częściowe"];

/// Demo simulator. Interior mutability keeps the `DataSource` methods on
/// `&self`, matching how the dispatcher holds the collaborator.
pub struct SimulatedSource {
    rng: Mutex<StdRng>,
    document_count: usize,
    camera_count: usize,
}

impl SimulatedSource {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic simulator for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            document_count: 8,
            camera_count: 4,
        }
    }

    fn pick<'a, T: Copy>(rng: &mut StdRng, items: &'a [T]) -> T {
        items[rng.gen_range(0..items.len())]
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSource for SimulatedSource {
    fn documents(&self) -> Result<Vec<Document>, DataError> {
        let mut rng = self.rng.lock().unwrap();
        let now = Utc::now();

        let docs = (0..self.document_count)
            .map(|i| {
                let (vendor, nip) = Self::pick(&mut rng, VENDORS);
                let amount_net = (rng.gen_range(500.0..15000.0) * 100.0_f64).round() / 100.0;
                let vat_rate = Self::pick(&mut rng, &[0.23, 0.08, 0.05]);
                let amount_vat = (amount_net * vat_rate * 100.0).round() / 100.0;

                let date = now - Duration::days(rng.gen_range(1..30));
                let due = date + Duration::days(Self::pick(&mut rng, &[14, 21, 30, 60]));

                Document {
                    id: format!("doc_{:04}", i + 1),
                    filename: format!("FV_{}_{:03}.pdf", date.format("%Y%m%d"), i + 1),
                    vendor: vendor.to_string(),
                    nip: nip.to_string(),
                    amount_net,
                    amount_vat,
                    amount_gross: ((amount_net + amount_vat) * 100.0).round() / 100.0,
                    date: date.format("%Y-%m-%d").to_string(),
                    due_date: due.format("%Y-%m-%d").to_string(),
                    status: Self::pick(&mut rng, DOCUMENT_STATUSES).to_string(),
                    scanned_at: now.format("%Y-%m-%d %H:%M:%S").to_string(),
                }
            })
            .collect();

        Ok(docs)
    }

    fn cameras(&self) -> Result<Vec<CameraStatus>, DataError> {
        let mut rng = self.rng.lock().unwrap();
        let now = Utc::now();

        let cameras = CAMERA_LOCATIONS
            .iter()
            .take(self.camera_count)
            .enumerate()
            .map(|(i, (name, location))| {
                let mut alerts = Vec::new();
                if rng.gen_bool(0.3) {
                    alerts.push(format!("Ruch wykryty {} min temu", rng.gen_range(1..10)));
                }
                if rng.gen_bool(0.1) {
                    alerts.push("Osoba w strefie zastrzeżonej".to_string());
                }

                let last_motion = now - Duration::minutes(rng.gen_range(0..60));

                CameraStatus {
                    id: format!("cam_{}", i + 1),
                    name: name.to_string(),
                    location: location.to_string(),
                    // offline roughly one in four
                    status: if rng.gen_bool(0.75) { "online" } else { "offline" }.to_string(),
                    objects_detected: rng.gen_range(0..=5),
                    last_motion: last_motion.format("%H:%M:%S").to_string(),
                    stream_url: format!("/api/stream/{}", location),
                    alerts,
                }
            })
            .collect();

        Ok(cameras)
    }

    fn sales(&self) -> Result<SalesSnapshot, DataError> {
        let mut rng = self.rng.lock().unwrap();

        let regions = REGIONS
            .iter()
            .map(|region| SalesRegion {
                region: region.to_string(),
                amount: (rng.gen_range(50_000.0..200_000.0) * 100.0_f64).round() / 100.0,
                transactions: rng.gen_range(50..300),
                growth: (rng.gen_range(-15.0..35.0) * 10.0_f64).round() / 10.0,
                top_product: Self::pick(&mut rng, PRODUCTS).to_string(),
            })
            .collect();

        Ok(SalesSnapshot { regions })
    }

    fn home(&self) -> Result<Vec<RoomReading>, DataError> {
        let mut rng = self.rng.lock().unwrap();

        let rooms = ROOMS
            .iter()
            .map(|room| RoomReading {
                room: room.to_string(),
                temperature: (rng.gen_range(18.0..26.0) * 10.0_f64).round() / 10.0,
                humidity: rng.gen_range(30..70),
                light_on: rng.gen_bool(0.5),
                motion: rng.gen_bool(0.25),
            })
            .collect();

        Ok(rooms)
    }

    fn analytics(&self) -> Result<ActivitySeries, DataError> {
        let mut rng = self.rng.lock().unwrap();

        Ok(ActivitySeries {
            labels: WEEKDAYS.iter().map(|d| d.to_string()).collect(),
            values: WEEKDAYS.iter().map(|_| rng.gen_range(50..200)).collect(),
        })
    }

    fn weather(&self, city: &str) -> Result<WeatherReport, DataError> {
        let mut rng = self.rng.lock().unwrap();

        let forecast = WEEKDAYS
            .iter()
            .take(3)
            .map(|day| {
                let high = (rng.gen_range(10.0..28.0) * 10.0_f64).round() / 10.0;
                DayForecast {
                    day: day.to_string(),
                    high,
                    low: ((high - rng.gen_range(3.0..9.0)) * 10.0_f64).round() / 10.0,
                    conditions: Self::pick(&mut rng, CONDITIONS).to_string(),
                }
            })
            .collect();

        Ok(WeatherReport {
            city: city.to_string(),
            temperature: (rng.gen_range(-5.0..30.0) * 10.0_f64).round() / 10.0,
            conditions: Self::pick(&mut rng, CONDITIONS).to_string(),
            humidity: rng.gen_range(30..95),
            wind_kph: (rng.gen_range(0.0..40.0) * 10.0_f64).round() / 10.0,
            forecast,
        })
    }
}

/// Collaborator double that always fails; exercises the degraded path.
pub struct UnavailableSource;

impl DataSource for UnavailableSource {
    fn documents(&self) -> Result<Vec<Document>, DataError> {
        Err(DataError::Unavailable("documents".to_string()))
    }

    fn cameras(&self) -> Result<Vec<CameraStatus>, DataError> {
        Err(DataError::Unavailable("cameras".to_string()))
    }

    fn sales(&self) -> Result<SalesSnapshot, DataError> {
        Err(DataError::Unavailable("sales".to_string()))
    }

    fn home(&self) -> Result<Vec<RoomReading>, DataError> {
        Err(DataError::Unavailable("home".to_string()))
    }

    fn analytics(&self) -> Result<ActivitySeries, DataError> {
        Err(DataError::Unavailable("analytics".to_string()))
    }

    fn weather(&self, _city: &str) -> Result<WeatherReport, DataError> {
        Err(DataError::Unavailable("weather".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_have_consistent_amounts() {
        let source = SimulatedSource::with_seed(7);
        let docs = source.documents().unwrap();
        assert_eq!(docs.len(), 8);
        for doc in &docs {
            let expected = ((doc.amount_net + doc.amount_vat) * 100.0).round() / 100.0;
            assert!((doc.amount_gross - expected).abs() < 0.005);
            assert!(DOCUMENT_STATUSES.contains(&doc.status.as_str()));
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = SimulatedSource::with_seed(42).documents().unwrap();
        let b = SimulatedSource::with_seed(42).documents().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cameras_cover_distinct_locations() {
        let source = SimulatedSource::with_seed(1);
        let cameras = source.cameras().unwrap();
        assert_eq!(cameras.len(), 4);
        let names: std::collections::HashSet<_> = cameras.iter().map(|c| &c.name).collect();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn sales_snapshot_covers_all_regions() {
        let snapshot = SimulatedSource::with_seed(1).sales().unwrap();
        assert_eq!(snapshot.regions.len(), REGIONS.len());
    }

    #[test]
    fn weather_reports_requested_city() {
        let report = SimulatedSource::with_seed(1).weather("Gdańsk").unwrap();
        assert_eq!(report.city, "Gdańsk");
        assert_eq!(report.forecast.len(), 3);
    }

    #[test]
    fn unavailable_source_always_fails() {
        assert!(UnavailableSource.documents().is_err());
        assert!(UnavailableSource.weather("Warszawa").is_err());
    }
}
