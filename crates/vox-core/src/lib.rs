//! Vox Core: shared data model and unified error taxonomy.
//!
//! Every other crate in the workspace speaks in these types: resolved
//! intents, command descriptors, sessions and users, simulated domain
//! records, and the view descriptor contract consumed by the frontend.

pub mod auth;
pub mod command;
pub mod domain;
pub mod error;
pub mod intent;
pub mod locale;
pub mod view;

pub use auth::{PermissionSet, Role, Session, User};
pub use command::{CommandDescriptor, Namespace};
pub use domain::{
    ActivitySeries, CameraStatus, DayForecast, Document, DomainData, RoomReading, SalesRegion,
    SalesSnapshot, WeatherReport,
};
pub use error::VoxError;
pub use intent::{AppType, Confidence, Intent};
pub use locale::Locale;
pub use view::{
    ActionButton, ChartSeries, ChartSpec, Column, GridSpec, HelpCategory, Stat, ViewDescriptor,
    ViewKind,
};

/// Engine version reported by the health endpoint.
pub const VOX_VERSION: &str = "0.2.0";
