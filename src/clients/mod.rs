//! Clients for the external services the workflow depends on.
//!
//! Each client wraps one third-party surface (metadata API, caption
//! extraction, generative text) behind a trait so the processor can be
//! exercised with test doubles instead of live services.

pub mod gemini;
pub mod transcript;
pub mod youtube;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Video;

pub use gemini::GeminiClient;
pub use transcript::YtDlpTranscriptClient;
pub use youtube::YouTubeClient;

/// Errors surfaced by the external-service clients.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid video URL: {0}")]
    InvalidUrl(String),

    #[error("no video found for ID: {0}")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("transcript not available: {0}")]
    TranscriptUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of video metadata.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch the metadata record for the video at `url`.
    async fn video_metadata(&self, url: &str) -> Result<Video, ClientError>;
}

/// Source of video transcripts.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript for the video at `url` as newline-joined
    /// caption text in original caption order.
    async fn transcript(&self, url: &str) -> Result<String, ClientError>;
}

/// Generative-text backend for classification and summarization.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Classify a video into one of `categories` from its title and
    /// description, returning the bare category label.
    async fn classify(
        &self,
        title: &str,
        description: &str,
        categories: &[String],
    ) -> Result<String, ClientError>;

    /// Produce a summary of `text` steered by `prompt`.
    async fn summarize(&self, text: &str, prompt: &str) -> Result<String, ClientError>;
}
