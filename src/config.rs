//! Configuration for finbrief.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (YOUTUBE_API_KEY, GEMINI_API_KEY,
//!    FINBRIEF_OUTPUTS, FINBRIEF_VAULT, FINBRIEF_LANGUAGE)
//! 2. Config file (.finbrief/config.yaml)
//! 3. Defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .finbrief/config.yaml
//! - Paths in the config file are relative to the config file's project root
//!
//! API keys are environment-only and never read from the config file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default classification category set.
const DEFAULT_CATEGORIES: [&str; 7] = [
    "Finance",
    "Technology",
    "Education",
    "Entertainment",
    "News",
    "Sports",
    "Other",
];

/// Built-in prompt for the expert-opinion summary.
pub const DEFAULT_EXPERT_PROMPT: &str = "Based on the provided transcript, make a detailed \
     breakdown of the experts' opinions with their name and position.";

/// Built-in prompt for the market-direction summary.
pub const DEFAULT_MARKET_PROMPT: &str = "Based on the provided transcript and the experts' \
     opinions, summarize the direction of the market and suggestions on operation.";

const DEFAULT_TRANSCRIPT_LANGUAGE: &str = "en";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_TRANSCRIPT_TIMEOUT_SECS: u64 = 600;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub prompts: PromptsConfig,
    pub categories: Option<Vec<String>>,
    pub transcript_language: Option<String>,
    pub model: Option<String>,
    pub request_timeout_seconds: Option<u64>,
    pub transcript_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Local output directory (relative to the project root)
    pub outputs: Option<String>,
    /// Notes vault root
    pub vault: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptsConfig {
    pub expert: Option<String>,
    pub market: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub youtube_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    /// Root of the local per-video output tree
    pub outputs_root: PathBuf,
    /// Notes vault root; None disables the idempotence check and archival
    pub vault_root: Option<PathBuf>,
    /// Caption language code, no fallback chain
    pub transcript_language: String,
    pub model: String,
    pub request_timeout: Duration,
    pub transcript_timeout: Duration,
    pub expert_prompt: String,
    pub market_prompt: String,
    pub categories: Vec<String>,
    /// Path to the config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources.
    pub fn load() -> Result<Self> {
        let config_file = find_config_file();

        let (file, base_dir) = match &config_file {
            Some(path) => {
                let parsed = load_config_file(path)?;
                // Base directory is the parent of .finbrief/ (the project root)
                let base = path
                    .parent()
                    .and_then(|p| p.parent())
                    .unwrap_or(Path::new("."))
                    .to_path_buf();
                (parsed, base)
            }
            None => (ConfigFile::default(), PathBuf::from(".")),
        };

        let outputs_root = if let Ok(env_outputs) = std::env::var("FINBRIEF_OUTPUTS") {
            PathBuf::from(env_outputs)
        } else if let Some(raw) = file.paths.outputs.as_deref() {
            resolve_path(&base_dir, raw)
        } else {
            PathBuf::from("outputs")
        };

        let vault_root = std::env::var("FINBRIEF_VAULT")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                file.paths
                    .vault
                    .as_deref()
                    .map(|raw| resolve_path(&base_dir, raw))
            })
            .filter(|p| !p.as_os_str().is_empty());

        let transcript_language = std::env::var("FINBRIEF_LANGUAGE")
            .ok()
            .or(file.transcript_language)
            .unwrap_or_else(|| DEFAULT_TRANSCRIPT_LANGUAGE.to_string());

        Ok(Self {
            youtube_api_key: non_empty_env("YOUTUBE_API_KEY"),
            gemini_api_key: non_empty_env("GEMINI_API_KEY"),
            outputs_root,
            vault_root,
            transcript_language,
            model: file.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            request_timeout: Duration::from_secs(
                file.request_timeout_seconds
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            transcript_timeout: Duration::from_secs(
                file.transcript_timeout_seconds
                    .unwrap_or(DEFAULT_TRANSCRIPT_TIMEOUT_SECS),
            ),
            expert_prompt: file
                .prompts
                .expert
                .unwrap_or_else(|| DEFAULT_EXPERT_PROMPT.to_string()),
            market_prompt: file
                .prompts
                .market
                .unwrap_or_else(|| DEFAULT_MARKET_PROMPT.to_string()),
            categories: file.categories.unwrap_or_else(default_categories),
            config_file,
        })
    }

    /// YouTube API key, or an error naming the missing variable.
    pub fn require_youtube_api_key(&self) -> Result<&str> {
        self.youtube_api_key
            .as_deref()
            .context("YOUTUBE_API_KEY environment variable not set")
    }

    /// Gemini API key, or an error naming the missing variable.
    pub fn require_gemini_api_key(&self) -> Result<&str> {
        self.gemini_api_key
            .as_deref()
            .context("GEMINI_API_KEY environment variable not set")
    }
}

/// The default seven-label category set as owned strings.
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| (*c).to_string()).collect()
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".finbrief").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's project root.
/// Paths starting with `~` are left alone; the vault layer expands them.
fn resolve_path(base: &Path, raw: &str) -> PathBuf {
    let path = PathBuf::from(raw);
    if path.is_absolute() || raw.starts_with('~') {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let finbrief_dir = temp.path().join(".finbrief");
        std::fs::create_dir_all(&finbrief_dir).unwrap();

        let config_path = finbrief_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
paths:
  outputs: ./outputs
  vault: ~/notes/inbox
prompts:
  expert: Summarize what each expert said.
categories:
  - Finance
  - News
transcript_language: de
request_timeout_seconds: 30
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.paths.outputs, Some("./outputs".to_string()));
        assert_eq!(config.paths.vault, Some("~/notes/inbox".to_string()));
        assert_eq!(
            config.prompts.expert,
            Some("Summarize what each expert said.".to_string())
        );
        assert_eq!(
            config.categories,
            Some(vec!["Finance".to_string(), "News".to_string()])
        );
        assert_eq!(config.transcript_language, Some("de".to_string()));
        assert_eq!(config.request_timeout_seconds, Some(30));
        assert_eq!(config.transcript_timeout_seconds, None);
        assert!(config.prompts.market.is_none());
        assert!(config.model.is_none());
    }

    #[test]
    fn test_empty_config_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.yaml");
        std::fs::write(&config_path, "paths: {}\n").unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert!(config.paths.outputs.is_none());
        assert!(config.categories.is_none());
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./outputs"),
            PathBuf::from("/home/user/project/./outputs")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/vault"),
            PathBuf::from("/absolute/vault")
        );
        // Tilde paths are expanded later, at the vault layer
        assert_eq!(
            resolve_path(&base, "~/notes"),
            PathBuf::from("~/notes")
        );
    }

    #[test]
    fn test_default_categories() {
        let categories = default_categories();
        assert_eq!(categories.len(), 7);
        assert_eq!(categories[0], "Finance");
        assert_eq!(categories[6], "Other");
    }
}
