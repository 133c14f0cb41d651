//! Conversation history collaborator.
//!
//! The core's contract with persistence is append/load; the in-memory
//! implementation backs tests and the reference deployment. A database
//! adapter would implement the same trait.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use vox_core::AppType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub command: String,
    pub response: String,
    pub app: AppType,
    pub timestamp: DateTime<Utc>,
}

pub trait ConversationStore: Send + Sync {
    fn append(&self, session_id: &str, entry: HistoryEntry);
    fn load(&self, session_id: &str) -> Vec<HistoryEntry>;
}

#[derive(Default)]
pub struct InMemoryConversations {
    inner: Mutex<HashMap<String, Vec<HistoryEntry>>>,
}

impl InMemoryConversations {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationStore for InMemoryConversations {
    fn append(&self, session_id: &str, entry: HistoryEntry) {
        self.inner
            .lock()
            .unwrap()
            .entry(session_id.to_string())
            .or_default()
            .push(entry);
    }

    fn load(&self, session_id: &str) -> Vec<HistoryEntry> {
        self.inner
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }
}

/// Render a conversation as plain text, for the export endpoint.
pub fn export_text(session_id: &str, entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "Brak historii konwersacji.".to_string();
    }

    let short_id: String = session_id.chars().take(8).collect();
    let mut lines = vec![format!("=== Konwersacja {} ===", short_id)];
    for entry in entries {
        lines.push(format!("[{}]", entry.timestamp.to_rfc3339()));
        lines.push(format!("User: {}", entry.command));
        lines.push(format!("Bot: {}", entry.response));
        lines.push(String::new());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(command: &str, response: &str) -> HistoryEntry {
        HistoryEntry {
            command: command.to_string(),
            response: response.to_string(),
            app: AppType::Documents,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn appends_and_loads_in_order() {
        let store = InMemoryConversations::new();
        store.append("s1", entry("pokaż faktury", "Wyświetlam 8 dokumentów."));
        store.append("s1", entry("ile faktur", "Masz 8 dokumentów."));

        let loaded = store.load("s1");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].command, "pokaż faktury");
    }

    #[test]
    fn unknown_session_loads_empty() {
        let store = InMemoryConversations::new();
        assert!(store.load("nope").is_empty());
    }

    #[test]
    fn export_formats_turns() {
        let text = export_text("session-abcdef", &[entry("pomoc", "Wyświetlam komendy.")]);
        assert!(text.contains("session-"));
        assert!(text.contains("User: pomoc"));
        assert!(text.contains("Bot: Wyświetlam komendy."));
    }

    #[test]
    fn export_of_empty_history() {
        assert_eq!(export_text("s1", &[]), "Brak historii konwersacji.");
    }
}
