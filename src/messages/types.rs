use crate::api::HistoryEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a conversation turn. The server is free to return roles we
/// don't know about; those are carried through as-is rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Assistant,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Other(role) => role,
        }
    }

    /// Display label for the message list.
    pub fn label(&self) -> &str {
        match self {
            Role::User => "You",
            Role::Assistant => "Companion",
            Role::Other(role) => role,
        }
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::Other(role),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Build a message from a server history entry. The server does not
    /// return timestamps, so entries are stamped at fetch time.
    pub fn from_history_entry(entry: &HistoryEntry) -> Self {
        Self::new(Role::from(entry.role.clone()), entry.content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_known_values() {
        assert_eq!(Role::from("user".to_string()), Role::User);
        assert_eq!(Role::from("assistant".to_string()), Role::Assistant);
        assert_eq!(Role::User.as_str(), "user");
    }

    #[test]
    fn unknown_roles_are_preserved() {
        let role = Role::from("system".to_string());
        assert_eq!(role, Role::Other("system".to_string()));
        assert_eq!(role.as_str(), "system");
    }

    #[test]
    fn message_from_history_entry_keeps_content() {
        let entry = HistoryEntry {
            role: "assistant".to_string(),
            content: "hello there".to_string(),
        };
        let message = Message::from_history_entry(&entry);
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.content, "hello there");
    }
}
