//! Classification outcome for a video.

use std::fmt;

/// Outcome of the topic classification step.
///
/// A failed classification is its own variant rather than a sentinel label,
/// so a legitimate category can never be mistaken for a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The model returned a category label.
    Known(String),
    /// The classification call failed; the video is treated as out of scope.
    Failed,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Known(label) => f.write_str(label),
            Classification::Failed => f.write_str("unclassified"),
        }
    }
}
