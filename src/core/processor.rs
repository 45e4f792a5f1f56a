//! Sequential workflow for turning a video URL into archived summaries.
//!
//! The run walks a fixed sequence: fetch metadata, check the vault for
//! prior output, classify, and — for finance-like categories — fetch the
//! transcript, generate both summaries, and archive. Metadata and
//! transcript failures abort the run; classification and archival failures
//! degrade gracefully.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, instrument};

use crate::clients::{youtube, ClientError, MetadataSource, Summarizer, TranscriptSource};
use crate::domain::{Classification, Video};

use super::output::OutputLocation;
use super::vault;

/// Categories that proceed to transcript fetch and summarization.
const SUMMARY_CATEGORIES: [&str; 2] = ["Finance", "News"];

/// Fatal workflow failures. Everything else degrades in place.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("failed to fetch video metadata: {0}")]
    MetadataUnavailable(#[source] ClientError),

    #[error("failed to fetch transcript: {0}")]
    TranscriptUnavailable(#[source] ClientError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Terminal status of a processing run.
#[derive(Debug)]
pub enum Outcome {
    /// Summaries were produced, and archived when a vault is configured.
    Summarized {
        location: OutputLocation,
        category: String,
        archived_to: Option<PathBuf>,
    },
    /// The vault already holds output for this title and publish date.
    AlreadyArchived { folder: PathBuf },
    /// The video's category is outside the summarized set.
    NotRelevant { classification: Classification },
}

/// Settings for a [`Processor`].
pub struct ProcessorSettings {
    pub outputs_root: PathBuf,
    pub vault_root: Option<PathBuf>,
    pub categories: Vec<String>,
    pub expert_prompt: String,
    pub market_prompt: String,
}

/// Orchestrates one video through the workflow.
pub struct Processor {
    metadata: Box<dyn MetadataSource>,
    transcripts: Box<dyn TranscriptSource>,
    summarizer: Box<dyn Summarizer>,
    settings: ProcessorSettings,
}

impl Processor {
    pub fn new(
        metadata: Box<dyn MetadataSource>,
        transcripts: Box<dyn TranscriptSource>,
        summarizer: Box<dyn Summarizer>,
        settings: ProcessorSettings,
    ) -> Self {
        Self {
            metadata,
            transcripts,
            summarizer,
            settings,
        }
    }

    /// Process a single video URL.
    ///
    /// With `force` set, the vault presence check is skipped outright and
    /// the video is reprocessed even if already archived.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn process(&self, url: &str, force: bool) -> Result<Outcome, WorkflowError> {
        let video_id =
            youtube::extract_video_id(url).map_err(WorkflowError::MetadataUnavailable)?;
        let location = OutputLocation::new(&self.settings.outputs_root, &video_id);

        let video = self
            .metadata
            .video_metadata(url)
            .await
            .map_err(WorkflowError::MetadataUnavailable)?;
        info!(title = %video.title, published = %video.date(), "fetched video metadata");

        if !force {
            if let Some(folder) = self.existing_vault_folder(&video) {
                info!(folder = %folder.display(), "vault folder already exists, skipping");
                return Ok(Outcome::AlreadyArchived { folder });
            }
        }

        let classification = self.classify(&video).await;
        info!(category = %classification, "classified video");

        let category = match classification {
            Classification::Known(label)
                if SUMMARY_CATEGORIES.contains(&label.as_str()) =>
            {
                label
            }
            other => {
                info!(category = %other, "category is out of scope, skipping");
                return Ok(Outcome::NotRelevant {
                    classification: other,
                });
            }
        };

        let transcript = self
            .transcripts
            .transcript(url)
            .await
            .map_err(WorkflowError::TranscriptUnavailable)?;
        if transcript.trim().is_empty() {
            return Err(WorkflowError::TranscriptUnavailable(
                ClientError::TranscriptUnavailable("caption track was empty".to_string()),
            ));
        }

        tokio::fs::create_dir_all(&location.dir).await?;
        tokio::fs::write(&location.transcript_path, &transcript).await?;
        info!(path = %location.transcript_path.display(), "saved transcript");

        self.write_summary(
            &transcript,
            &self.settings.expert_prompt,
            &location.expert_summary_path,
            "expert opinions",
        )
        .await?;
        self.write_summary(
            &transcript,
            &self.settings.market_prompt,
            &location.market_summary_path,
            "market direction",
        )
        .await?;

        let archived_to = vault::archive_summaries(
            self.settings.vault_root.as_deref(),
            &video,
            &location.expert_summary_path,
            &location.market_summary_path,
        )
        .await;

        Ok(Outcome::Summarized {
            location,
            category,
            archived_to,
        })
    }

    /// The vault folder this video would archive into, if it already exists.
    /// The check keys on (publish date, sanitized title) — a presence test,
    /// not a content-verified cache.
    fn existing_vault_folder(&self, video: &Video) -> Option<PathBuf> {
        let root = self.settings.vault_root.as_deref()?;
        let folder = vault::destination_folder(root, video);
        folder.exists().then_some(folder)
    }

    async fn classify(&self, video: &Video) -> Classification {
        match self
            .summarizer
            .classify(&video.title, &video.description, &self.settings.categories)
            .await
        {
            Ok(label) => Classification::Known(label.trim().to_string()),
            Err(e) => {
                error!(error = %e, "classification failed, treating video as out of scope");
                Classification::Failed
            }
        }
    }

    /// Generate one summary and write it to `path`.
    ///
    /// A failed generation is recorded in the file as an error marker
    /// instead of aborting the run, so the other summary is still attempted.
    async fn write_summary(
        &self,
        transcript: &str,
        prompt: &str,
        path: &Path,
        kind: &str,
    ) -> Result<(), WorkflowError> {
        info!(kind, "generating summary");
        let content = match self.summarizer.summarize(transcript, prompt).await {
            Ok(summary) => summary,
            Err(e) => {
                error!(kind, error = %e, "summary generation failed");
                format!("Error: could not generate {kind} summary: {e}\n")
            }
        };

        tokio::fs::write(path, content).await?;
        info!(kind, path = %path.display(), "saved summary");
        Ok(())
    }
}
