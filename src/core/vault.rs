//! Archival of finished summaries into a notes vault.
//!
//! The vault destination for a video is `<vault_root>/<YYYY-MM-DD>/<title>`
//! with the title sanitized to alphanumerics, spaces, hyphens, and
//! underscores. Two videos whose titles sanitize identically and share a
//! publish date collide in the vault; this is an accepted limitation of the
//! (date, title) key.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::domain::Video;

/// Strip every character that is not alphanumeric, space, hyphen, or
/// underscore, then trim trailing whitespace.
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-' || *c == '_')
        .collect();
    kept.trim_end().to_string()
}

/// The vault folder a video's summaries are archived into.
pub fn destination_folder(vault_root: &Path, video: &Video) -> PathBuf {
    expand_home(vault_root)
        .join(video.date())
        .join(sanitize_title(&video.title))
}

/// Expand a leading `~` or `~/` to the home directory. `~user` forms are
/// passed through untouched.
fn expand_home(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

/// Move the two summary files into the vault.
///
/// Best-effort: with no vault root this logs and no-ops, and any failure is
/// logged without propagating — the primary artifacts already exist under
/// the local output directory. Returns the destination folder on success.
pub async fn archive_summaries(
    vault_root: Option<&Path>,
    video: &Video,
    expert_summary: &Path,
    market_summary: &Path,
) -> Option<PathBuf> {
    let Some(root) = vault_root else {
        warn!("vault root not configured, leaving summaries in place");
        return None;
    };

    let dest = destination_folder(root, video);
    match move_into(&dest, expert_summary, market_summary).await {
        Ok(()) => {
            info!(dest = %dest.display(), "archived summaries to vault");
            Some(dest)
        }
        Err(e) => {
            error!(dest = %dest.display(), error = %e, "failed to archive summaries");
            None
        }
    }
}

async fn move_into(dest: &Path, expert: &Path, market: &Path) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dest).await?;
    move_file(expert, &dest.join("expert_summary.md")).await?;
    move_file(market, &dest.join("market_summary.md")).await?;
    Ok(())
}

/// Move a file; rename does not cross filesystems, so fall back to
/// copy + remove when the vault lives on another mount.
async fn move_file(src: &Path, dest: &Path) -> std::io::Result<()> {
    match tokio::fs::rename(src, dest).await {
        Ok(()) => Ok(()),
        Err(_) => {
            tokio::fs::copy(src, dest).await?;
            tokio::fs::remove_file(src).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn video(title: &str) -> Video {
        Video {
            title: title.to_string(),
            description: String::new(),
            published_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_sanitize_strips_punctuation() {
        assert_eq!(sanitize_title("Fed Hikes Rates: 2024!"), "Fed Hikes Rates 2024");
    }

    #[test]
    fn test_sanitize_keeps_hyphen_and_underscore() {
        assert_eq!(sanitize_title("Q1_review - part 2"), "Q1_review - part 2");
    }

    #[test]
    fn test_sanitize_trims_trailing_whitespace() {
        assert_eq!(sanitize_title("Title !!!"), "Title");
        assert_eq!(sanitize_title("Title   "), "Title");
    }

    #[test]
    fn test_sanitize_keeps_unicode_alphanumerics() {
        assert_eq!(sanitize_title("Café ☕ Market"), "Café  Market");
    }

    #[test]
    fn test_destination_folder_layout() {
        let dest = destination_folder(Path::new("/vault"), &video("Market Update"));
        assert_eq!(dest, PathBuf::from("/vault/2024-03-01/Market Update"));
    }

    #[test]
    fn test_identical_sanitized_titles_collide() {
        let a = destination_folder(Path::new("/vault"), &video("Market Update!"));
        let b = destination_folder(Path::new("/vault"), &video("Market Update?"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/vault")), home.join("vault"));
        }
        assert_eq!(expand_home(Path::new("/abs/vault")), PathBuf::from("/abs/vault"));
        assert_eq!(expand_home(Path::new("~user/vault")), PathBuf::from("~user/vault"));
    }

    #[tokio::test]
    async fn test_archive_moves_both_summaries() {
        let outputs = TempDir::new().unwrap();
        let vault = TempDir::new().unwrap();

        let expert = outputs.path().join("expert_summary.md");
        let market = outputs.path().join("market_summary.md");
        tokio::fs::write(&expert, "expert").await.unwrap();
        tokio::fs::write(&market, "market").await.unwrap();

        let dest = archive_summaries(Some(vault.path()), &video("Market Update"), &expert, &market)
            .await
            .expect("archival should succeed");

        assert_eq!(dest, vault.path().join("2024-03-01").join("Market Update"));
        assert!(dest.join("expert_summary.md").exists());
        assert!(dest.join("market_summary.md").exists());
        // Move semantics: sources are gone
        assert!(!expert.exists());
        assert!(!market.exists());
    }

    #[tokio::test]
    async fn test_archive_without_root_is_noop() {
        let outputs = TempDir::new().unwrap();
        let expert = outputs.path().join("expert_summary.md");
        let market = outputs.path().join("market_summary.md");
        tokio::fs::write(&expert, "expert").await.unwrap();
        tokio::fs::write(&market, "market").await.unwrap();

        let dest = archive_summaries(None, &video("Market Update"), &expert, &market).await;

        assert!(dest.is_none());
        assert!(expert.exists());
        assert!(market.exists());
    }

    #[tokio::test]
    async fn test_archive_failure_is_swallowed() {
        let outputs = TempDir::new().unwrap();
        let expert = outputs.path().join("expert_summary.md");
        let market = outputs.path().join("market_summary.md");
        tokio::fs::write(&expert, "expert").await.unwrap();
        tokio::fs::write(&market, "market").await.unwrap();

        // A plain file as vault root makes directory creation fail
        let blocker = outputs.path().join("vault");
        tokio::fs::write(&blocker, "").await.unwrap();

        let dest =
            archive_summaries(Some(blocker.as_path()), &video("Market Update"), &expert, &market)
                .await;

        assert!(dest.is_none());
        assert!(expert.exists());
        assert!(market.exists());
    }
}
