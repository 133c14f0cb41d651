//! Environment-driven configuration.

use chrono::Duration;
use vox_access::{AccessGate, SessionConfig, UserRegistry};
use vox_core::Locale;
use vox_dispatch::Dispatcher;
use vox_intent::{Resolver, ResolverConfig};
use vox_intent::triggers::TriggerTable;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub addr: String,
    /// Session idle timeout in seconds; 0 disables expiry.
    pub session_ttl_secs: i64,
    pub default_city: String,
    pub locale: Locale,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            addr: std::env::var("VOX_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            session_ttl_secs: std::env::var("VOX_SESSION_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1800),
            default_city: std::env::var("VOX_DEFAULT_CITY")
                .unwrap_or_else(|_| "Warszawa".to_string()),
            locale: std::env::var("VOX_LOCALE")
                .ok()
                .and_then(|v| Locale::from_code(&v))
                .unwrap_or_default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8000".to_string(),
            session_ttl_secs: 1800,
            default_city: "Warszawa".to_string(),
            locale: Locale::Pl,
        }
    }
}

/// Wire a dispatcher from configuration: built-in accounts and trigger
/// table, simulated data, in-memory conversation log.
pub fn build_dispatcher(config: &ApiConfig) -> Dispatcher {
    let session_config = SessionConfig {
        ttl: (config.session_ttl_secs > 0).then(|| Duration::seconds(config.session_ttl_secs)),
        default_locale: config.locale,
    };
    let gate = AccessGate::new(UserRegistry::defaults(), session_config);

    let resolver = Resolver::new(
        TriggerTable::default_table(),
        ResolverConfig {
            default_city: config.default_city.clone(),
            default_locale: config.locale,
        },
    );

    Dispatcher::new(
        gate,
        std::sync::Arc::new(vox_data::SimulatedSource::new()),
        std::sync::Arc::new(vox_access::InMemoryConversations::new()),
    )
    .with_resolver(resolver)
}
