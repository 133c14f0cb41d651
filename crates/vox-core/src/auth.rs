//! Users, roles, permission sets and sessions.

use crate::command::CommandDescriptor;
use crate::intent::AppType;
use crate::locale::Locale;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a role is allowed to touch. `Wildcard` satisfies every check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionSet {
    Wildcard,
    Apps(BTreeSet<AppType>),
}

impl PermissionSet {
    pub fn apps(apps: impl IntoIterator<Item = AppType>) -> Self {
        PermissionSet::Apps(apps.into_iter().collect())
    }

    pub fn allows(&self, app: AppType) -> bool {
        match self {
            PermissionSet::Wildcard => true,
            PermissionSet::Apps(set) => set.contains(&app),
        }
    }

    /// App types this set grants, restricted to the known universe.
    pub fn granted_apps(&self) -> Vec<AppType> {
        match self {
            PermissionSet::Wildcard => AppType::ALL.to_vec(),
            PermissionSet::Apps(set) => set.iter().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    /// Human-facing role title, e.g. "Pracownik biurowy".
    pub label: String,
    pub permissions: PermissionSet,
}

impl Role {
    pub fn new(name: impl Into<String>, label: impl Into<String>, permissions: PermissionSet) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            permissions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub display_name: String,
    pub role: Role,
}

/// Per-client conversational state.
///
/// Created on first contact, mutated only under the session store's lock,
/// dropped on logout-less disconnect or TTL expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user: Option<User>,
    pub language: Locale,
    pub current_app: Option<AppType>,
    pub history: Vec<CommandDescriptor>,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>, language: Locale) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            user: None,
            language,
            current_app: None,
            history: Vec::new(),
            created_at: now,
            last_seen: now,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_allows_everything() {
        let set = PermissionSet::Wildcard;
        for app in AppType::ALL {
            assert!(set.allows(app));
        }
    }

    #[test]
    fn explicit_set_is_closed() {
        let set = PermissionSet::apps([AppType::Documents, AppType::Sales]);
        assert!(set.allows(AppType::Documents));
        assert!(!set.allows(AppType::Cameras));
    }

    #[test]
    fn fresh_session_is_unauthenticated() {
        let session = Session::new("s1", Locale::Pl);
        assert!(!session.is_authenticated());
        assert!(session.history.is_empty());
    }
}
