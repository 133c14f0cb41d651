//! In-memory session store.
//!
//! The one shared mutable resource in the system: all mutation happens
//! under the store's lock, per-session and whole-map alike. Expiry is
//! lazy: a sweep runs on every acquisition, so an expired session is
//! replaced by a fresh unauthenticated one on next contact.

use chrono::{Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;
use vox_core::{Locale, Session};

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Idle timeout. `None` disables expiry.
    pub ttl: Option<Duration>,
    pub default_locale: Locale,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Some(Duration::minutes(30)),
            default_locale: Locale::Pl,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStat {
    pub id: String,
    pub messages: usize,
    pub authenticated: bool,
    pub current_app: Option<String>,
    pub created_at: String,
}

pub struct SessionStore {
    inner: Mutex<HashMap<String, Session>>,
    config: SessionConfig,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Snapshot of a session, creating it if absent.
    pub fn get_or_create(&self, session_id: &str) -> Session {
        let mut sessions = self.inner.lock().unwrap();
        self.sweep(&mut sessions);
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id, self.config.default_locale))
            .clone()
    }

    /// Run `f` with exclusive access to one session, creating it if absent.
    pub fn with_session<R>(&self, session_id: &str, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut sessions = self.inner.lock().unwrap();
        self.sweep(&mut sessions);
        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id, self.config.default_locale));
        session.touch();
        f(session)
    }

    pub fn remove(&self, session_id: &str) {
        self.inner.lock().unwrap().remove(session_id);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }

    pub fn stats(&self) -> Vec<SessionStat> {
        let sessions = self.inner.lock().unwrap();
        sessions
            .values()
            .map(|s| SessionStat {
                id: s.id.chars().take(8).collect(),
                messages: s.history.len(),
                authenticated: s.is_authenticated(),
                current_app: s.current_app.map(|a| a.to_string()),
                created_at: s.created_at.to_rfc3339(),
            })
            .collect()
    }

    fn sweep(&self, sessions: &mut HashMap<String, Session>) {
        if let Some(ttl) = self.config.ttl {
            let cutoff = Utc::now() - ttl;
            sessions.retain(|_, s| s.last_seen >= cutoff);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_session_on_first_contact() {
        let store = SessionStore::new(SessionConfig::default());
        let session = store.get_or_create("s1");
        assert_eq!(session.id, "s1");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn mutation_is_visible_across_calls() {
        let store = SessionStore::new(SessionConfig::default());
        store.with_session("s1", |s| s.current_app = Some(vox_core::AppType::Sales));
        let session = store.get_or_create("s1");
        assert_eq!(session.current_app, Some(vox_core::AppType::Sales));
    }

    #[test]
    fn expired_sessions_are_swept() {
        let store = SessionStore::new(SessionConfig {
            ttl: Some(Duration::seconds(0)),
            default_locale: Locale::Pl,
        });
        store.with_session("old", |s| {
            s.last_seen = Utc::now() - Duration::minutes(5);
        });
        // next acquisition sweeps, then recreates fresh
        let session = store.get_or_create("old");
        assert!(!session.is_authenticated());
        assert!(session.history.is_empty());
    }

    #[test]
    fn no_ttl_means_no_expiry() {
        let store = SessionStore::new(SessionConfig {
            ttl: None,
            default_locale: Locale::Pl,
        });
        store.with_session("s1", |s| {
            s.last_seen = Utc::now() - Duration::days(365);
        });
        store.get_or_create("other");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_drops_session() {
        let store = SessionStore::new(SessionConfig::default());
        store.get_or_create("s1");
        store.remove("s1");
        assert!(store.is_empty());
    }
}
