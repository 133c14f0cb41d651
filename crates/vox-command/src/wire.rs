//! The textual wire format: `make -f <namespace-file> <target> [KEY=VALUE ...]`.
//!
//! Rendering lives on [`CommandDescriptor`] itself; this module is the
//! parser back from the wire string. External tooling depends on the exact
//! format, so the codec is round-trip tested.

use crate::TranslationError;
use vox_core::{CommandDescriptor, Namespace};

/// Parse a wire string into a descriptor.
pub fn parse(command: &str) -> Result<CommandDescriptor, TranslationError> {
    let mut namespace = Namespace::User;
    let mut target: Option<String> = None;
    let mut params = Vec::new();

    let parts: Vec<&str> = command.split_whitespace().collect();
    let mut i = 0;
    while i < parts.len() {
        match parts[i] {
            "make" => i += 1,
            "-f" => {
                let file = parts.get(i + 1).ok_or_else(|| {
                    TranslationError::MalformedCommand("-f without a makefile".to_string())
                })?;
                namespace = Namespace::from_wire_file(file).ok_or_else(|| {
                    TranslationError::MalformedCommand(format!("unknown makefile: {}", file))
                })?;
                i += 2;
            }
            // directory switches carry no meaning for the descriptor
            "-C" => i += 2,
            part if part.contains('=') => {
                let (key, value) = part.split_once('=').unwrap();
                params.push((key.to_string(), value.to_string()));
                i += 1;
            }
            part => {
                if target.is_some() {
                    return Err(TranslationError::MalformedCommand(format!(
                        "unexpected token: {}",
                        part
                    )));
                }
                target = Some(part.to_string());
                i += 1;
            }
        }
    }

    let target = target
        .ok_or_else(|| TranslationError::MalformedCommand("no target in command".to_string()))?;

    let mut descriptor = CommandDescriptor::new(namespace, target);
    for (key, value) in params {
        descriptor = descriptor.with_param(key, value);
    }
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_command() {
        let cmd = parse("make -f Makefile.admin set-timeout SEC=30").unwrap();
        assert_eq!(cmd.namespace, Namespace::Admin);
        assert_eq!(cmd.target, "set-timeout");
        assert_eq!(cmd.params.get("SEC").map(String::as_str), Some("30"));
    }

    #[test]
    fn render_then_parse_is_equivalent() {
        let original = CommandDescriptor::new(Namespace::User, "forecast")
            .with_param("DAYS", "3")
            .with_param("CITY", "Gdańsk");
        let parsed = parse(&original.render()).unwrap();
        assert!(parsed.same_invocation(&original));
    }

    #[test]
    fn skips_directory_switch() {
        let cmd = parse("make -C apps/weather -f Makefile.run status").unwrap();
        assert_eq!(cmd.namespace, Namespace::System);
        assert_eq!(cmd.target, "status");
    }

    #[test]
    fn missing_target_is_malformed() {
        assert!(matches!(
            parse("make -f Makefile.user"),
            Err(TranslationError::MalformedCommand(_))
        ));
    }

    #[test]
    fn unknown_makefile_is_malformed() {
        assert!(matches!(
            parse("make -f Makefile.other status"),
            Err(TranslationError::MalformedCommand(_))
        ));
    }

    #[test]
    fn bare_target_defaults_to_user_namespace() {
        let cmd = parse("make pogoda").unwrap();
        assert_eq!(cmd.namespace, Namespace::User);
    }
}
