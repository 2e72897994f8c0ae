//! HTTP client for the companion backend
//!
//! The backend exposes four JSON-over-HTTP endpoints; their authoritative
//! contract lives server-side, these are the shapes the client relies on.

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{ChatRequest, ChatResponse, HistoryEntry, HistoryResponse, TranscribeResponse};
