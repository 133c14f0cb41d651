//! Static user registry with salted password digests.
//!
//! The authentication contract is username+password → role. Credentials
//! are stored as salted blake3 digests and compared digest-to-digest
//! (`blake3::Hash` equality is constant-time). A lookup miss still pays
//! for a digest so failures are uniform regardless of whether the
//! username exists.

use std::collections::HashMap;
use vox_core::{AppType, PermissionSet, Role, User};

#[derive(Debug, Clone)]
pub struct PasswordDigest {
    salt: String,
    hash: blake3::Hash,
}

impl PasswordDigest {
    pub fn new(salt: impl Into<String>, password: &str) -> Self {
        let salt = salt.into();
        let hash = digest(&salt, password);
        Self { salt, hash }
    }

    pub fn verify(&self, password: &str) -> bool {
        digest(&self.salt, password) == self.hash
    }
}

fn digest(salt: &str, password: &str) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hasher.finalize()
}

struct Account {
    user: User,
    password: PasswordDigest,
}

/// Immutable account registry, injected into the gate at construction.
pub struct UserRegistry {
    accounts: HashMap<String, Account>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    pub fn with_user(mut self, user: User, password: &str) -> Self {
        let salt = user.username.clone();
        self.accounts.insert(
            user.username.clone(),
            Account {
                password: PasswordDigest::new(salt, password),
                user,
            },
        );
        self
    }

    /// The built-in account set.
    pub fn defaults() -> Self {
        let admin = Role::new("admin", "Administrator", PermissionSet::Wildcard);
        let office = Role::new(
            "biuro",
            "Pracownik biurowy",
            PermissionSet::apps([AppType::Documents, AppType::Sales, AppType::Analytics]),
        );
        let security = Role::new(
            "ochrona",
            "Ochrona",
            PermissionSet::apps([AppType::Cameras, AppType::Home, AppType::System]),
        );
        let manager = Role::new(
            "manager",
            "Manager",
            PermissionSet::apps([
                AppType::Documents,
                AppType::Sales,
                AppType::Analytics,
                AppType::Weather,
            ]),
        );
        let guest = Role::new("gosc", "Gość", PermissionSet::apps([AppType::Weather]));

        Self::new()
            .with_user(
                User {
                    username: "admin".to_string(),
                    display_name: "Administrator".to_string(),
                    role: admin,
                },
                "admin123",
            )
            .with_user(
                User {
                    username: "kowalski".to_string(),
                    display_name: "Jan Kowalski".to_string(),
                    role: office,
                },
                "biuro123",
            )
            .with_user(
                User {
                    username: "dozorca".to_string(),
                    display_name: "Adam Nowak".to_string(),
                    role: security,
                },
                "ochrona123",
            )
            .with_user(
                User {
                    username: "manager".to_string(),
                    display_name: "Maria Wiśniewska".to_string(),
                    role: manager,
                },
                "manager123",
            )
            .with_user(
                User {
                    username: "gosc".to_string(),
                    display_name: "Gość".to_string(),
                    role: guest,
                },
                "gosc123",
            )
    }

    /// Verify credentials. Uniform cost and uniform result on failure.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        match self.accounts.get(username) {
            Some(account) if account.password.verify(password) => Some(account.user.clone()),
            Some(_) => None,
            None => {
                // burn a digest so unknown usernames cost the same
                let _ = PasswordDigest::new("missing", password);
                None
            }
        }
    }

    pub fn users(&self) -> Vec<&User> {
        self.accounts.values().map(|a| &a.user).collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::defaults()
    }
}
