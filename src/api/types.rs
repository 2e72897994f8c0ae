use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub model: String,
}

/// Response of `POST /api/chat`. A missing field deserializes as empty,
/// matching how the browser client treated absent payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: String,
}

/// One conversation turn as returned by `GET /api/history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

/// Response of `GET /api/history`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// Response of `POST /api/transcribe` and `POST /api/transcribe-stream`.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscribeResponse {
    #[serde(default)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_serializes_expected_fields() {
        let req = ChatRequest {
            message: "hello".to_string(),
            model: "llama2:13b".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["message"], "hello");
        assert_eq!(json["model"], "llama2:13b");
    }

    #[test]
    fn chat_response_defaults_missing_field_to_empty() {
        let resp: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.response.is_empty());

        let resp: ChatResponse = serde_json::from_str(r#"{"response":"hi"}"#).unwrap();
        assert_eq!(resp.response, "hi");
    }

    #[test]
    fn history_response_parses_entries() {
        let json = r#"{"history":[{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}]}"#;
        let resp: HistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.history.len(), 2);
        assert_eq!(resp.history[0].role, "user");
        assert_eq!(resp.history[1].content, "hello");
    }

    #[test]
    fn history_response_defaults_to_empty_list() {
        let resp: HistoryResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.history.is_empty());
    }

    #[test]
    fn transcribe_response_defaults_missing_text() {
        let resp: TranscribeResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.text.is_empty());
    }
}
