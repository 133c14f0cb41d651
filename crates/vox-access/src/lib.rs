//! Vox Access: who may do what.
//!
//! A session gains a user through `login`; `authorize` checks the user's
//! role permissions (wildcard or explicit app set) against the requested
//! app type, with a small always-public set for unauthenticated use of
//! basic commands. Denials are values, not errors: conversational flow
//! must survive them.

pub mod gate;
pub mod history;
pub mod registry;
pub mod store;

pub use gate::{AccessGate, AuthError, Decision, DeniedReason, LoginOk};
pub use history::{export_text, ConversationStore, HistoryEntry, InMemoryConversations};
pub use registry::{PasswordDigest, UserRegistry};
pub use store::{SessionConfig, SessionStat, SessionStore};
