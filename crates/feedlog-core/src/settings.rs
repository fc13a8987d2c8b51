use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::calculations::DEFAULT_BABY_WEIGHT_KG;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Feeding-log analysis and bottle-feed statistics
#[derive(Parser, Debug, Clone)]
#[command(
    name = "feedlog",
    about = "Feeding-log analysis and bottle-feed statistics",
    version
)]
pub struct Settings {
    /// Path to a feeding-log CSV file to analyze directly
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Name of a stored log blob to analyze
    #[arg(long)]
    pub blob: Option<String>,

    /// Directory holding stored log blobs
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Body weight in kilograms for the recommended-intake figure
    #[arg(long)]
    pub weight: Option<f64>,

    /// Validate and store a log file into the data directory, then exit
    #[arg(long)]
    pub upload: Option<PathBuf>,

    /// List stored log blobs, then exit
    #[arg(long)]
    pub list: bool,

    /// Generate prose insights alongside the summary
    #[arg(long)]
    pub insights: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

impl Settings {
    /// Default blob name when neither CLI nor saved params provide one.
    pub const DEFAULT_BLOB: &'static str = "feeding_log.csv";

    /// Fill unset options from previously persisted params.
    pub fn apply_last_used(&mut self, last: &LastUsedParams) {
        if self.weight.is_none() {
            self.weight = last.weight;
        }
        if self.blob.is_none() {
            self.blob = last.blob.clone();
        }
        if self.data_dir.is_none() {
            self.data_dir = last.data_dir.clone().map(PathBuf::from);
        }
    }

    /// The body weight to analyze with, falling back to the default.
    pub fn effective_weight(&self) -> f64 {
        self.weight.unwrap_or(DEFAULT_BABY_WEIGHT_KG)
    }

    /// The blob name to analyze, falling back to [`Settings::DEFAULT_BLOB`].
    pub fn effective_blob(&self) -> String {
        self.blob
            .clone()
            .unwrap_or_else(|| Self::DEFAULT_BLOB.to_string())
    }

    /// Snapshot the parameters worth persisting for the next run.
    pub fn remember(&self) -> LastUsedParams {
        LastUsedParams {
            weight: self.weight,
            blob: self.blob.clone(),
            data_dir: self
                .data_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.feedlog/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    /// Uses `~/.feedlog/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".feedlog").join("last_used.json")
    }

    /// Load persisted params from the default path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load persisted params from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to the default path, creating parent
    /// directories if needed.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&Self::config_path())
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the default config file if it exists.
    pub fn clear() -> Result<(), std::io::Error> {
        Self::clear_at(&Self::config_path())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
