//! Structured command descriptors, convertible to and from the textual
//! `make -f <file> <target> [KEY=VALUE ...]` wire format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Authorization/purpose tier of a command target.
///
/// The wire file names are part of the protocol: external tooling keys on
/// `Makefile.user`, `Makefile.admin` and `Makefile.run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    User,
    Admin,
    System,
}

impl Namespace {
    pub fn wire_file(&self) -> &'static str {
        match self {
            Namespace::User => "Makefile.user",
            Namespace::Admin => "Makefile.admin",
            Namespace::System => "Makefile.run",
        }
    }

    pub fn from_wire_file(file: &str) -> Option<Self> {
        match file {
            "Makefile.user" => Some(Namespace::User),
            "Makefile.admin" => Some(Namespace::Admin),
            "Makefile.run" => Some(Namespace::System),
            _ => None,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Namespace::User => f.write_str("user"),
            Namespace::Admin => f.write_str("admin"),
            Namespace::System => f.write_str("system"),
        }
    }
}

/// Structured representation of one command invocation.
///
/// Params use a `BTreeMap` so the rendered wire string is stable for a
/// given descriptor, which is what makes the weak round-trip testable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    pub target: String,
    pub namespace: Namespace,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
    /// The rendered wire string, e.g. `make -f Makefile.admin set-timeout SEC=30`.
    pub raw: String,
}

impl CommandDescriptor {
    pub fn new(namespace: Namespace, target: impl Into<String>) -> Self {
        let mut descriptor = Self {
            target: target.into(),
            namespace,
            params: BTreeMap::new(),
            raw: String::new(),
        };
        descriptor.raw = descriptor.render();
        descriptor
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self.raw = self.render();
        self
    }

    /// Render the wire string for this descriptor.
    pub fn render(&self) -> String {
        let mut parts = vec![
            "make".to_string(),
            "-f".to_string(),
            self.namespace.wire_file().to_string(),
            self.target.clone(),
        ];
        for (key, value) in &self.params {
            parts.push(format!("{}={}", key, value));
        }
        parts.join(" ")
    }

    /// Equivalence ignoring the cached raw string.
    pub fn same_invocation(&self, other: &CommandDescriptor) -> bool {
        self.target == other.target
            && self.namespace == other.namespace
            && self.params == other.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_wire_format() {
        let cmd = CommandDescriptor::new(Namespace::Admin, "set-timeout").with_param("SEC", "30");
        assert_eq!(cmd.raw, "make -f Makefile.admin set-timeout SEC=30");
    }

    #[test]
    fn params_render_in_stable_order() {
        let cmd = CommandDescriptor::new(Namespace::User, "forecast")
            .with_param("DAYS", "3")
            .with_param("CITY", "Gdańsk");
        assert_eq!(cmd.raw, "make -f Makefile.user forecast CITY=Gdańsk DAYS=3");
    }

    #[test]
    fn wire_file_round_trips() {
        for ns in [Namespace::User, Namespace::Admin, Namespace::System] {
            assert_eq!(Namespace::from_wire_file(ns.wire_file()), Some(ns));
        }
        assert_eq!(Namespace::from_wire_file("Makefile.other"), None);
    }
}
