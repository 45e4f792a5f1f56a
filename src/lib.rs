//! finbrief - finance-video summarization pipeline
//!
//! Given a YouTube video URL, finbrief fetches the video's metadata,
//! classifies its topic with Gemini, and — for finance-related videos —
//! fetches the caption track and produces two summaries (expert opinions
//! and market direction), optionally archiving them into a notes vault.
//!
//! # Architecture
//!
//! The workflow is a single sequential pass; every non-trivial step is
//! delegated to an external service behind a client trait:
//! - metadata comes from the YouTube Data API
//! - captions come from `yt-dlp`
//! - classification and summarization come from Gemini
//!
//! # Modules
//!
//! - `clients`: external service integrations (YouTube, yt-dlp, Gemini)
//! - `core`: workflow orchestration, output locations, vault archival
//! - `domain`: data structures (Video, Classification)
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Process a video end to end
//! finbrief process https://www.youtube.com/watch?v=...
//!
//! # Fetch just the transcript
//! finbrief transcript https://www.youtube.com/watch?v=...
//! ```

pub mod cli;
pub mod clients;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use crate::core::{Outcome, Processor, ProcessorSettings, WorkflowError};
pub use domain::{Classification, Video};
