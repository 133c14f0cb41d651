//! Makefile target catalogs.
//!
//! An app ships per-namespace makefiles; parsing their text yields the
//! target list used for catalog-based translation and for suggestions.
//! Descriptions come from `# @text target: "..."` annotations, falling
//! back to the first `echo "..."` in the recipe body.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use vox_core::Namespace;

lazy_static! {
    static ref ANNOTATION: Regex = Regex::new(r#"(?m)#\s*@text\s+([\w-]+):\s*"([^"]+)""#).unwrap();
    static ref TARGET: Regex =
        Regex::new(r"(?m)^([A-Za-z][A-Za-z0-9_-]*):[^\n]*\n((?:\t[^\n]*\n?)*)").unwrap();
    static ref ECHO: Regex = Regex::new(r#"echo\s+"([^"]+)""#).unwrap();
    static ref VARIABLE: Regex = Regex::new(r"\$\((\w+)\)").unwrap();
}

/// Make variables that are build plumbing, not user parameters.
const BUILTIN_VARS: &[&str] = &["APP_DIR", "APP_NAME", "SCRIPTS"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MakeTarget {
    pub name: String,
    pub description: String,
    pub params: Vec<String>,
    pub namespace: Namespace,
    pub example: String,
}

/// Parse makefile content into its user-visible targets.
pub fn parse_targets(content: &str, namespace: Namespace) -> Vec<MakeTarget> {
    let annotations: HashMap<String, String> = ANNOTATION
        .captures_iter(content)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect();

    let mut targets = Vec::new();
    for captures in TARGET.captures_iter(content) {
        let name = captures[1].to_string();
        let body = captures.get(2).map(|m| m.as_str()).unwrap_or("");

        if name.starts_with('_') || name == "help" {
            continue;
        }

        let description = annotations.get(&name).cloned().unwrap_or_else(|| {
            ECHO.captures(body)
                .map(|c| c[1].to_string())
                .unwrap_or_default()
        });

        let mut params: Vec<String> = VARIABLE
            .captures_iter(body)
            .map(|c| c[1].to_string())
            .filter(|p| !BUILTIN_VARS.contains(&p.as_str()))
            .collect();
        params.dedup();

        let mut example = format!("make -f {} {}", namespace.wire_file(), name);
        for param in &params {
            example.push_str(&format!(" {}=...", param));
        }

        targets.push(MakeTarget {
            name,
            description,
            params,
            namespace,
            example,
        });
    }

    targets
}
