//! Conversation memory.
//!
//! Sessions are an append-only log persisted as one JSON object keyed by
//! session id. The file is read fully at startup and rewritten fully on
//! every append (write-through) — a crash loses at most the turn being
//! written. Persistence is best-effort: a failed write is logged and the
//! in-memory log still serves the current process.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Trailing turns rendered into the prompt by default.
pub const DEFAULT_CONTEXT_TURNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    pub timestamp: String,
}

pub struct HistoryStore {
    path: PathBuf,
    sessions: Mutex<HashMap<String, Vec<ConversationTurn>>>,
}

impl HistoryStore {
    /// Open the store, loading any existing history file.
    ///
    /// A missing file is an empty history; an unreadable one is logged and
    /// treated as empty rather than blocking startup.
    pub fn open(path: PathBuf) -> Self {
        let sessions = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(parsed) => parsed,
                Err(err) => {
                    tracing::error!("failed to parse history file {}: {}", path.display(), err);
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                tracing::error!("failed to read history file {}: {}", path.display(), err);
                HashMap::new()
            }
        };

        Self {
            path,
            sessions: Mutex::new(sessions),
        }
    }

    /// Append one turn and persist immediately.
    ///
    /// A persistence failure never blocks the caller: the turn stays in
    /// memory and the error is logged.
    pub async fn append(&self, session_id: &str, role: Role, content: &str) {
        let mut sessions = self.sessions.lock().await;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .push(ConversationTurn {
                role,
                content: content.to_string(),
                timestamp: chrono::Utc::now().to_rfc3339(),
            });

        if let Err(err) = self.persist(&sessions) {
            tracing::error!("failed to save conversation history: {}", err);
        }
    }

    fn persist(&self, sessions: &HashMap<String, Vec<ConversationTurn>>) -> std::io::Result<()> {
        let serialized = serde_json::to_string_pretty(sessions)?;
        std::fs::write(&self.path, serialized)
    }

    /// Render the last `n` turns as alternating `User:`/`Assistant:` lines,
    /// or the empty string when the session has no history.
    pub async fn recent_context(&self, session_id: &str, n: usize) -> String {
        let sessions = self.sessions.lock().await;
        let Some(turns) = sessions.get(session_id).filter(|t| !t.is_empty()) else {
            return String::new();
        };

        let start = turns.len().saturating_sub(n);
        let mut context = String::from("Previous conversation:\n");
        for turn in &turns[start..] {
            context.push_str(&format!("{}: {}\n", turn.role.label(), turn.content));
        }
        context
    }

    pub async fn session_ids(&self) -> Vec<String> {
        let sessions = self.sessions.lock().await;
        let mut ids: Vec<String> = sessions.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn session_turns(&self, session_id: &str) -> Vec<ConversationTurn> {
        let sessions = self.sessions.lock().await;
        sessions.get(session_id).cloned().unwrap_or_default()
    }

    pub async fn total_turns(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.values().map(|turns| turns.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, HistoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::open(dir.path().join("history.json"));
        (dir, store)
    }

    #[tokio::test]
    async fn recent_context_renders_short_history_in_full() {
        let (_dir, store) = store();
        store.append("s1", Role::User, "hello").await;
        store.append("s1", Role::Assistant, "hi there").await;

        let context = store.recent_context("s1", DEFAULT_CONTEXT_TURNS).await;
        assert_eq!(
            context,
            "Previous conversation:\nUser: hello\nAssistant: hi there\n"
        );
    }

    #[tokio::test]
    async fn recent_context_keeps_only_trailing_window() {
        let (_dir, store) = store();
        for i in 0..6 {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            store.append("s1", role, &format!("turn {}", i)).await;
        }

        let context = store.recent_context("s1", 4).await;
        assert!(!context.contains("turn 0"));
        assert!(!context.contains("turn 1"));
        assert!(context.contains("turn 2"));
        assert!(context.contains("turn 5"));
        // Original order preserved.
        assert!(context.find("turn 2").unwrap() < context.find("turn 5").unwrap());
    }

    #[tokio::test]
    async fn empty_session_renders_empty_context() {
        let (_dir, store) = store();
        assert_eq!(store.recent_context("nope", 4).await, "");
    }

    #[tokio::test]
    async fn appends_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        {
            let store = HistoryStore::open(path.clone());
            store.append("s1", Role::User, "persisted?").await;
        }

        let reopened = HistoryStore::open(path);
        let turns = reopened.session_turns("s1").await;
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].content, "persisted?");
        assert_eq!(turns[0].role, Role::User);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let (_dir, store) = store();
        store.append("a", Role::User, "for a").await;
        store.append("b", Role::User, "for b").await;

        assert!(!store.recent_context("a", 4).await.contains("for b"));
        assert_eq!(store.session_ids().await, vec!["a", "b"]);
        assert_eq!(store.total_turns().await, 2);
    }
}
