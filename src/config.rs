// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Application configuration, read from `~/.loadapp/config.json`.
//!
//! Every field has a default, so a missing file or a partial one both load.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::button::{AnimationTiming, ButtonLabels};
use crate::error::ConfigError;
use crate::notify::NotificationChannel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where downloads are written (default: ~/Downloads/loadapp)
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Animation tick period in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Time for one full progress sweep in milliseconds
    #[serde(default = "default_animation_cycle_ms")]
    pub animation_cycle_ms: u64,
    #[serde(default = "default_channel_id")]
    pub channel_id: String,
    #[serde(default = "default_channel_name")]
    pub channel_name: String,
    /// Reuse one notification id so each result replaces the previous one
    #[serde(default = "default_replace_notifications")]
    pub replace_notifications: bool,
    #[serde(default)]
    pub labels: ButtonLabels,
}

fn default_tick_interval_ms() -> u64 {
    16
}

fn default_animation_cycle_ms() -> u64 {
    2000
}

fn default_channel_id() -> String {
    "download_channel".to_string()
}

fn default_channel_name() -> String {
    "Downloads".to_string()
}

fn default_replace_notifications() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            download_dir: None,
            tick_interval_ms: default_tick_interval_ms(),
            animation_cycle_ms: default_animation_cycle_ms(),
            channel_id: default_channel_id(),
            channel_name: default_channel_name(),
            replace_notifications: default_replace_notifications(),
            labels: ButtonLabels::default(),
        }
    }
}

/// `~/.loadapp`
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
    Ok(home.join(".loadapp"))
}

impl AppConfig {
    /// Load from the default location, falling back to defaults when absent.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_dir()?.join("config.json");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, content).map_err(io_err)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.animation_cycle_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "animation_cycle_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.channel_id.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "channel_id",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn resolved_download_dir(&self) -> PathBuf {
        if let Some(dir) = &self.download_dir {
            return dir.clone();
        }
        dirs::download_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join("Downloads")))
            .map(|d| d.join("loadapp"))
            .unwrap_or_else(|| PathBuf::from("downloads"))
    }

    pub fn animation_timing(&self) -> AnimationTiming {
        AnimationTiming {
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            cycle: Duration::from_millis(self.animation_cycle_ms),
        }
    }

    pub fn notification_channel(&self) -> NotificationChannel {
        NotificationChannel::new(&self.channel_id, &self.channel_name)
    }
}
