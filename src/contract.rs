//! # contract: seams between pipeline steps and the outside world
//!
//! This module defines the traits the pipeline uses to talk to external
//! HTTP APIs (the funding platform and the chat-completion endpoint),
//! plus the shared data types flowing through those seams.
//!
//! ## Interface & Extensibility
//! - Implement [`CampaignApi`] for a new funding platform client.
//! - Implement [`ChatApi`] for a new language-model backend.
//! - All methods are async, returning results with boxed error types.
//!
//! ## Mocking & Testing
//! - Both traits are annotated for `mockall` so tests can stub the network
//!   without touching any real endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Uniform boxed error for API seams (simple boxed error for now).
pub type ApiError = Box<dyn std::error::Error + Send + Sync>;

/// A single snapshot of the fundraising campaign, persisted verbatim as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRecord {
    pub campaign_title: String,
    pub goal_amount: f64,
    pub current_amount: f64,
    pub donor_count: u64,
    /// ISO-8601 timestamp of the last update.
    pub last_updated: String,
    pub status: String,
}

/// One social-media content suggestion. Order within a batch is the
/// presentation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentIdea {
    pub title: String,
    pub description: String,
    pub hashtags: Vec<String>,
    pub music_suggestion: String,
    pub duration: String,
}

/// Where a value came from: live API data or one of the fallback paths.
///
/// Callers and tests can tell "defaulted because unconfigured" apart from
/// "defaulted because the call failed"; the old behaviour collapsed both
/// into the same silent path.
#[derive(Debug, Clone, PartialEq)]
pub enum DataOrigin {
    /// Returned by the external API.
    Live,
    /// No credential configured; the expected early-phase state.
    Unconfigured,
    /// A credential was present but the call or parse failed.
    CallFailed(String),
}

/// Trait for reading campaign data from the funding platform.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait CampaignApi: Send + Sync {
    /// Fetch the current state of a campaign by its platform identifier.
    async fn fetch_campaign(&self, campaign_id: &str) -> Result<FundingRecord, ApiError>;
}

/// One message in a chat-completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for the chat-completion endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// Trait for requesting a completion from a language-model API.
///
/// Returns the raw assistant message content; callers are responsible for
/// stripping code fences and parsing.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<String, ApiError>;
}
