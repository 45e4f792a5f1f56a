//! Command-line interface for finbrief.
//!
//! Provides commands for processing a video end to end, fetching a bare
//! transcript, and inspecting the resolved configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::clients::{
    youtube, GeminiClient, TranscriptSource, YouTubeClient, YtDlpTranscriptClient,
};
use crate::config::Config;
use crate::core::{Outcome, Processor, ProcessorSettings};

/// finbrief - summarize finance videos into a notes vault
#[derive(Parser, Debug)]
#[command(name = "finbrief")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Minimum log verbosity (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, classify, and summarize a video
    Process {
        /// Video URL
        url: String,

        /// Reprocess even if the vault already holds output for this video
        #[arg(short, long)]
        force: bool,

        /// Prompt for the expert-opinion summary
        #[arg(long)]
        expert_prompt: Option<String>,

        /// Prompt for the market-direction summary
        #[arg(long)]
        market_prompt: Option<String>,

        /// Comma-separated classification categories
        #[arg(long)]
        categories: Option<String>,
    },

    /// Fetch a video transcript without classifying or summarizing
    Transcript {
        /// Video URL
        url: String,

        /// Output file (defaults to <video-id>.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Log filter from --log-level, RUST_LOG, or the "info" default.
    pub fn env_filter(&self) -> EnvFilter {
        match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        }
    }

    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Process {
                url,
                force,
                expert_prompt,
                market_prompt,
                categories,
            } => process_video(&url, force, expert_prompt, market_prompt, categories).await,
            Commands::Transcript { url, output } => fetch_transcript(&url, output).await,
            Commands::Config => show_config(),
        }
    }
}

/// Run the full workflow for one video
async fn process_video(
    url: &str,
    force: bool,
    expert_prompt: Option<String>,
    market_prompt: Option<String>,
    categories: Option<String>,
) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(prompt) = expert_prompt {
        config.expert_prompt = prompt;
    }
    if let Some(prompt) = market_prompt {
        config.market_prompt = prompt;
    }
    if let Some(list) = categories {
        config.categories = list
            .split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
    }

    let metadata = YouTubeClient::new(config.require_youtube_api_key()?, config.request_timeout)?;
    let transcripts =
        YtDlpTranscriptClient::new(&config.transcript_language, config.transcript_timeout);
    let summarizer = GeminiClient::new(
        config.require_gemini_api_key()?,
        &config.model,
        config.request_timeout,
    )?;

    let processor = Processor::new(
        Box::new(metadata),
        Box::new(transcripts),
        Box::new(summarizer),
        ProcessorSettings {
            outputs_root: config.outputs_root,
            vault_root: config.vault_root,
            categories: config.categories,
            expert_prompt: config.expert_prompt,
            market_prompt: config.market_prompt,
        },
    );

    match processor.process(url, force).await? {
        Outcome::Summarized {
            location,
            category,
            archived_to,
        } => {
            println!("Video classified as {category}.");
            match archived_to {
                Some(folder) => println!("Summaries archived to {}", folder.display()),
                None => {
                    println!("Summaries written:");
                    println!("  {}", location.expert_summary_path.display());
                    println!("  {}", location.market_summary_path.display());
                }
            }
            println!("Transcript: {}", location.transcript_path.display());
        }
        Outcome::AlreadyArchived { folder } => {
            println!("Already archived at {}", folder.display());
        }
        Outcome::NotRelevant { classification } => {
            println!("Skipped: video classified as {classification}");
        }
    }

    Ok(())
}

/// Fetch a transcript and save it to disk
async fn fetch_transcript(url: &str, output: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let video_id = youtube::extract_video_id(url)?;

    let client = YtDlpTranscriptClient::new(&config.transcript_language, config.transcript_timeout);
    let transcript = client.transcript(url).await?;

    let path = output.unwrap_or_else(|| PathBuf::from(format!("{video_id}.txt")));
    tokio::fs::write(&path, &transcript)
        .await
        .with_context(|| format!("Failed to write transcript to {}", path.display()))?;

    println!("Transcript saved to {}", path.display());
    Ok(())
}

/// Print the resolved configuration
fn show_config() -> Result<()> {
    let config = Config::load()?;

    let config_file = config
        .config_file
        .as_deref()
        .map_or("(none)".to_string(), |p| p.display().to_string());
    let vault = config
        .vault_root
        .as_deref()
        .map_or("(not set)".to_string(), |p| p.display().to_string());

    println!("Config file:     {config_file}");
    println!("Outputs root:    {}", config.outputs_root.display());
    println!("Vault root:      {vault}");
    println!("Language:        {}", config.transcript_language);
    println!("Model:           {}", config.model);
    println!("Categories:      {}", config.categories.join(", "));
    println!(
        "YouTube API key: {}",
        if config.youtube_api_key.is_some() { "set" } else { "not set" }
    );
    println!(
        "Gemini API key:  {}",
        if config.gemini_api_key.is_some() { "set" } else { "not set" }
    );

    Ok(())
}
