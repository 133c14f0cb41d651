//! The authorization gate.
//!
//! `authorize` never fails and never panics: it returns a structured
//! decision the dispatcher turns into a conversational denial. Login and
//! logout mutate the session under the store's lock.

use crate::registry::UserRegistry;
use crate::store::{SessionConfig, SessionStore};
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;
use vox_core::{AppType, Session};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Deliberately does not say whether the username existed.
    #[error("invalid credentials")]
    InvalidCredentials,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginOk {
    pub display_name: String,
    pub role: String,
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Granted,
    Denied { app: AppType, reason: DeniedReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeniedReason {
    NotAuthenticated,
    InsufficientPermission,
}

impl Decision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted)
    }
}

pub struct AccessGate {
    registry: UserRegistry,
    sessions: SessionStore,
    /// App types usable without authentication.
    public_apps: BTreeSet<AppType>,
}

impl AccessGate {
    pub fn new(registry: UserRegistry, session_config: SessionConfig) -> Self {
        Self {
            registry,
            sessions: SessionStore::new(session_config),
            public_apps: BTreeSet::from([AppType::System]),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(UserRegistry::defaults(), SessionConfig::default())
    }

    pub fn with_public_apps(mut self, apps: impl IntoIterator<Item = AppType>) -> Self {
        self.public_apps = apps.into_iter().collect();
        self
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// May this session touch the given app?
    pub fn authorize(&self, session: &Session, app: AppType) -> Decision {
        if self.public_apps.contains(&app) {
            return Decision::Granted;
        }

        match &session.user {
            None => Decision::Denied {
                app,
                reason: DeniedReason::NotAuthenticated,
            },
            Some(user) if user.role.permissions.allows(app) => Decision::Granted,
            Some(_) => Decision::Denied {
                app,
                reason: DeniedReason::InsufficientPermission,
            },
        }
    }

    /// Authenticate and bind the user to the session.
    pub fn login(
        &self,
        session_id: &str,
        username: &str,
        password: &str,
    ) -> Result<LoginOk, AuthError> {
        let user = self
            .registry
            .authenticate(username, password)
            .ok_or(AuthError::InvalidCredentials)?;

        let ok = LoginOk {
            display_name: user.display_name.clone(),
            role: user.role.label.clone(),
        };
        self.sessions
            .with_session(session_id, |session| session.user = Some(user));
        Ok(ok)
    }

    /// Drop the session's user; the session itself survives.
    pub fn logout(&self, session_id: &str) {
        self.sessions
            .with_session(session_id, |session| session.user = None);
    }

    /// Apps the session may use, for the frontend's app switcher.
    pub fn allowed_apps(&self, session: &Session) -> Vec<AppType> {
        AppType::ALL
            .iter()
            .copied()
            .filter(|app| self.authorize(session, *app).is_granted())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vox_core::Locale;

    fn gate() -> AccessGate {
        AccessGate::with_defaults()
    }

    fn session_for(gate: &AccessGate, id: &str, username: &str, password: &str) -> Session {
        gate.login(id, username, password).unwrap();
        gate.sessions().get_or_create(id)
    }

    #[test]
    fn wildcard_role_reaches_every_app() {
        let gate = gate();
        let session = session_for(&gate, "s_admin", "admin", "admin123");
        for app in AppType::ALL {
            assert!(gate.authorize(&session, app).is_granted());
        }
    }

    #[test]
    fn office_role_is_fenced() {
        let gate = gate();
        let session = session_for(&gate, "s_office", "kowalski", "biuro123");
        assert!(gate.authorize(&session, AppType::Documents).is_granted());
        assert!(gate.authorize(&session, AppType::Sales).is_granted());
        assert!(!gate.authorize(&session, AppType::Cameras).is_granted());
        assert!(!gate.authorize(&session, AppType::Home).is_granted());
    }

    #[test]
    fn security_role_is_fenced() {
        let gate = gate();
        let session = session_for(&gate, "s_sec", "dozorca", "ochrona123");
        assert!(gate.authorize(&session, AppType::Cameras).is_granted());
        assert!(gate.authorize(&session, AppType::Home).is_granted());
        assert!(!gate.authorize(&session, AppType::Documents).is_granted());
        assert!(!gate.authorize(&session, AppType::Sales).is_granted());
    }

    #[test]
    fn denial_is_structured_not_thrown() {
        let gate = gate();
        let session = session_for(&gate, "s_sec", "dozorca", "ochrona123");
        let decision = gate.authorize(&session, AppType::Documents);
        assert_eq!(
            decision,
            Decision::Denied {
                app: AppType::Documents,
                reason: DeniedReason::InsufficientPermission,
            }
        );
    }

    #[test]
    fn unauthenticated_session_only_reaches_public_apps() {
        let gate = gate();
        let session = Session::new("anon", Locale::Pl);
        assert!(gate.authorize(&session, AppType::System).is_granted());
        let decision = gate.authorize(&session, AppType::Documents);
        assert_eq!(
            decision,
            Decision::Denied {
                app: AppType::Documents,
                reason: DeniedReason::NotAuthenticated,
            }
        );
    }

    #[test]
    fn login_failure_is_uniform() {
        let gate = gate();
        assert_eq!(
            gate.login("s1", "admin", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            gate.login("s1", "ghost", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
        assert!(!gate.sessions().get_or_create("s1").is_authenticated());
    }

    #[test]
    fn login_reports_display_name_and_role_label() {
        let gate = gate();
        let ok = gate.login("s1", "kowalski", "biuro123").unwrap();
        assert_eq!(ok.display_name, "Jan Kowalski");
        assert_eq!(ok.role, "Pracownik biurowy");
    }

    #[test]
    fn logout_keeps_session_but_drops_user() {
        let gate = gate();
        session_for(&gate, "s1", "admin", "admin123");
        gate.logout("s1");
        let session = gate.sessions().get_or_create("s1");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn allowed_apps_for_guest() {
        let gate = gate();
        let session = session_for(&gate, "s_guest", "gosc", "gosc123");
        let apps = gate.allowed_apps(&session);
        assert!(apps.contains(&AppType::Weather));
        assert!(apps.contains(&AppType::System));
        assert!(!apps.contains(&AppType::Documents));
    }
}
