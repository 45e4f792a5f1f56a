//! Caption extraction via the yt-dlp command-line tool.
//!
//! Runs `yt-dlp` in subtitle-only mode against a temporary directory and
//! parses the json3 caption track it writes. Caption fragments are joined
//! into newline-separated plain text, one line per caption event, in the
//! original caption order.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use super::{ClientError, TranscriptSource};

/// Transcript client backed by the `yt-dlp` binary.
pub struct YtDlpTranscriptClient {
    binary_path: String,
    language: String,
    fetch_timeout: Duration,
}

impl YtDlpTranscriptClient {
    /// Create a client for the given caption language (no fallback chain).
    pub fn new(language: impl Into<String>, fetch_timeout: Duration) -> Self {
        Self {
            binary_path: "yt-dlp".to_string(),
            language: language.into(),
            fetch_timeout,
        }
    }

    /// Use a custom yt-dlp binary path.
    pub fn with_binary_path(mut self, binary_path: impl Into<String>) -> Self {
        self.binary_path = binary_path.into();
        self
    }

    /// Run yt-dlp and return the raw json3 caption track.
    async fn fetch_track(&self, url: &str, dir: &Path) -> Result<String, ClientError> {
        let mut command = Command::new(&self.binary_path);
        command
            .args([
                "--skip-download",
                "--write-subs",
                "--write-auto-subs",
                "--sub-langs",
                &self.language,
                "--sub-format",
                "json3",
                "--output",
                "captions",
            ])
            .arg("--paths")
            .arg(dir)
            .arg(url)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let result = timeout(self.fetch_timeout, command.output())
            .await
            .map_err(|_| {
                ClientError::TranscriptUnavailable(format!(
                    "yt-dlp timed out after {:?}",
                    self.fetch_timeout
                ))
            })?;
        let output = result?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClientError::TranscriptUnavailable(
                stderr.trim().to_string(),
            ));
        }

        let track_path = dir.join(format!("captions.{}.json3", self.language));
        if !track_path.exists() {
            return Err(ClientError::TranscriptUnavailable(format!(
                "no {} captions for {}",
                self.language, url
            )));
        }

        Ok(tokio::fs::read_to_string(&track_path).await?)
    }
}

#[async_trait]
impl TranscriptSource for YtDlpTranscriptClient {
    async fn transcript(&self, url: &str) -> Result<String, ClientError> {
        debug!(%url, language = %self.language, "fetching caption track");

        let dir = tempfile::tempdir()?;
        let track = self.fetch_track(url, dir.path()).await?;
        let text = caption_text(&track)?;

        if text.is_empty() {
            return Err(ClientError::TranscriptUnavailable(format!(
                "empty caption track for {url}"
            )));
        }

        Ok(text)
    }
}

#[derive(Deserialize)]
struct CaptionTrack {
    #[serde(default)]
    events: Vec<CaptionEvent>,
}

#[derive(Deserialize)]
struct CaptionEvent {
    #[serde(default)]
    segs: Vec<CaptionSeg>,
}

#[derive(Deserialize)]
struct CaptionSeg {
    #[serde(default)]
    utf8: String,
}

/// Join the fragments of a json3 caption track into newline-separated text.
/// Events carrying only whitespace are dropped.
fn caption_text(raw: &str) -> Result<String, ClientError> {
    let track: CaptionTrack = serde_json::from_str(raw).map_err(|e| {
        ClientError::TranscriptUnavailable(format!("malformed caption track: {e}"))
    })?;

    let lines: Vec<String> = track
        .events
        .iter()
        .map(|event| {
            event
                .segs
                .iter()
                .map(|seg| seg.utf8.as_str())
                .collect::<String>()
                .replace('\n', " ")
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect();

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_binary_path() {
        let client = YtDlpTranscriptClient::new("en", Duration::from_secs(60))
            .with_binary_path("/custom/path/yt-dlp");
        assert_eq!(client.binary_path, "/custom/path/yt-dlp");
    }

    #[test]
    fn test_caption_text_joins_events() {
        let raw = r#"{"events":[
            {"tStartMs":0,"dDurationMs":2000,"segs":[{"utf8":"Welcome "},{"utf8":"back"}]},
            {"tStartMs":2100,"segs":[{"utf8":"\n"}]},
            {"tStartMs":2500,"segs":[{"utf8":"to the show"}]}
        ]}"#;

        assert_eq!(caption_text(raw).unwrap(), "Welcome back\nto the show");
    }

    #[test]
    fn test_caption_text_empty_track() {
        assert_eq!(caption_text(r#"{"events":[]}"#).unwrap(), "");
        assert_eq!(caption_text("{}").unwrap(), "");
    }

    #[test]
    fn test_caption_text_rejects_malformed_json() {
        let err = caption_text("not json").unwrap_err();
        assert!(matches!(err, ClientError::TranscriptUnavailable(_)));
    }
}
