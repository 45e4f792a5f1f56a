//! Deterministic output locations for processed videos.

use std::path::{Path, PathBuf};

/// The on-disk locations for one video's artifacts, derived purely from the
/// video identifier. Callable before any network call so idempotence checks
/// and later writes agree on location.
#[derive(Debug, Clone)]
pub struct OutputLocation {
    /// Per-video output directory (`<outputs_root>/<video_id>`)
    pub dir: PathBuf,
    pub transcript_path: PathBuf,
    pub expert_summary_path: PathBuf,
    pub market_summary_path: PathBuf,
}

impl OutputLocation {
    /// Derive the four output paths for `video_id` under `outputs_root`.
    pub fn new(outputs_root: &Path, video_id: &str) -> Self {
        let dir = outputs_root.join(video_id);
        Self {
            transcript_path: dir.join("transcript.txt"),
            expert_summary_path: dir.join("expert_summary.md"),
            market_summary_path: dir.join("market_summary.md"),
            dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_derived_from_id() {
        let location = OutputLocation::new(Path::new("outputs"), "dQw4w9WgXcQ");

        assert_eq!(location.dir, PathBuf::from("outputs/dQw4w9WgXcQ"));
        assert_eq!(
            location.transcript_path,
            PathBuf::from("outputs/dQw4w9WgXcQ/transcript.txt")
        );
        assert_eq!(
            location.expert_summary_path,
            PathBuf::from("outputs/dQw4w9WgXcQ/expert_summary.md")
        );
        assert_eq!(
            location.market_summary_path,
            PathBuf::from("outputs/dQw4w9WgXcQ/market_summary.md")
        );
    }

    #[test]
    fn test_same_id_same_paths() {
        let a = OutputLocation::new(Path::new("outputs"), "abc");
        let b = OutputLocation::new(Path::new("outputs"), "abc");
        assert_eq!(a.dir, b.dir);
        assert_eq!(a.transcript_path, b.transcript_path);
    }
}
