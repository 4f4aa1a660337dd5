use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::planner::SchedulePolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClockFormat {
    #[default]
    Hour12,      // "1:00 PM"
    Hour24,      // "13:00"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ViewMode {
    #[default]
    Simple,      // Preset picks per day
    Detailed,    // Hour-precision timeline blocks
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_worker_id")]
    pub worker_id: String,
    #[serde(default)]
    pub clock_format: ClockFormat,
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,
    #[serde(default = "default_store_latency_ms")]
    pub store_latency_ms: u64,
    #[serde(default)]
    pub policy: SchedulePolicy,
}

fn default_worker_id() -> String {
    "worker-jordan".to_string()
}

fn default_font_scale() -> f32 {
    1.0
}

fn default_store_latency_ms() -> u64 {
    250
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worker_id: default_worker_id(),
            clock_format: ClockFormat::Hour12,
            view_mode: ViewMode::Simple,
            font_scale: 1.0,
            store_latency_ms: default_store_latency_ms(),
            policy: SchedulePolicy::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            Self::from_json(&contents)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Parse a config file. A policy the planner cannot honour is replaced by the default one.
    pub fn from_json(contents: &str) -> Result<Self> {
        let mut config: Config = serde_json::from_str(contents).context("Failed to parse config file")?;
        if let Err(e) = config.policy.validate_bounds() {
            warn!(error = %e, "ignoring invalid schedule policy, using defaults");
            config.policy = SchedulePolicy::default();
        }
        Ok(config)
    }

    pub fn store_latency(&self) -> Duration {
        Duration::from_millis(self.store_latency_ms)
    }

    fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "shiftboard", "shiftboard")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }
}
