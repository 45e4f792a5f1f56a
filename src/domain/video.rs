//! Video metadata record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for a single video, immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub title: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
}

impl Video {
    /// Publish date formatted as the vault date-folder name (YYYY-MM-DD).
    pub fn date(&self) -> String {
        self.published_at.format("%Y-%m-%d").to_string()
    }
}
