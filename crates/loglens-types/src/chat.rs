//! Chat transcript types for LogLens.
//!
//! A transcript is a flat, append-only list of [`ChatTurn`]s. There is no
//! session grouping: every user message and every completed assistant reply
//! becomes one row, in conversation order.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Author of a persisted chat turn.
///
/// Stored as lowercase text in the `role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// One persisted message of the conversation transcript.
///
/// Immutable once written. `id` is the surrogate key assigned by the store
/// and doubles as the ordering key (insertion order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: i64,
    pub role: TurnRole,
    pub content: String,
}

/// Public projection of a [`ChatTurn`] returned by `GET /history`.
///
/// The surrogate key is not part of the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnView {
    pub role: TurnRole,
    pub content: String,
}

impl From<ChatTurn> for TurnView {
    fn from(turn: ChatTurn) -> Self {
        Self {
            role: turn.role,
            content: turn.content,
        }
    }
}

/// Result of replacing the log context with an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    /// Number of lines in the decoded upload.
    pub lines: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_role_roundtrip() {
        for role in [TurnRole::User, TurnRole::Assistant] {
            let parsed: TurnRole = role.to_string().parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_turn_role_rejects_system() {
        let result = "system".parse::<TurnRole>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("system"));
    }

    #[test]
    fn test_turn_view_drops_id() {
        let turn = ChatTurn {
            id: 7,
            role: TurnRole::Assistant,
            content: "It looks like an error.".to_string(),
        };
        let json = serde_json::to_value(TurnView::from(turn)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"role": "assistant", "content": "It looks like an error."})
        );
    }
}
