// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! This module manages the application configuration file, stored by `confy`
//! in the platform configuration directory under the name `dzikir`. A
//! missing file is created with the defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "dzikir";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    /// SQLite file holding the `dzikir`, `playlists` and `playlist_items`
    /// tables.
    pub database_file: String,
    pub log_dir: String,
    /// Volume applied at start-up, `0.0..=1.0`.
    pub default_volume: f64,
    /// Seconds moved by the fine seek keys.
    pub seek_step: u32,
    /// Percentage points moved by the volume keys.
    pub volume_step: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            database_file: "dzikir.db".to_string(),
            log_dir: ".logs".to_string(),
            default_volume: 0.8,
            seek_step: 5,
            volume_step: 5,
        }
    }
}

impl AppConfig {
    /// Replaces out-of-range values with usable ones.
    pub fn sanitised(mut self) -> Self {
        self.default_volume = if self.default_volume.is_finite() {
            self.default_volume.clamp(0.0, 1.0)
        } else {
            Self::default().default_volume
        };
        self.seek_step = self.seek_step.max(1);
        self.volume_step = self.volume_step.clamp(1, 100);
        self
    }

    pub fn volume_step_ratio(&self) -> f64 {
        f64::from(self.volume_step) / 100.0
    }
}

/// Loads the configuration file, creating it with defaults when missing.
///
/// # Errors
///
/// Returns an error if an existing file cannot be read or parsed; callers
/// fall back to [`AppConfig::default`].
pub fn load_config() -> Result<AppConfig> {
    let config = confy::load::<AppConfig>(CONFIG_NAME, None)
        .with_context(|| format!("Failed to load {} configuration", CONFIG_NAME))?;

    Ok(config.sanitised())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_already_sane() {
        assert_eq!(AppConfig::default().sanitised(), AppConfig::default());
    }

    #[test]
    fn sanitising_clamps_values() {
        let config = AppConfig {
            default_volume: 3.0,
            seek_step: 0,
            volume_step: 400,
            ..AppConfig::default()
        }
        .sanitised();

        assert_eq!(config.default_volume, 1.0);
        assert_eq!(config.seek_step, 1);
        assert_eq!(config.volume_step, 100);
        assert_eq!(config.volume_step_ratio(), 1.0);

        let config = AppConfig {
            default_volume: f64::NAN,
            ..AppConfig::default()
        }
        .sanitised();
        assert_eq!(config.default_volume, 0.8);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let config: AppConfig = toml_like_partial();
        assert_eq!(config.database_file, "dzikir.db");
        assert_eq!(config.seek_step, 5);
    }

    // serde(default) lets an older config file with fewer keys still load.
    fn toml_like_partial() -> AppConfig {
        let value = serde::de::value::MapDeserializer::<_, serde::de::value::Error>::new(
            [("version", 1u32)].into_iter(),
        );
        AppConfig::deserialize(value).expect("partial config")
    }
}
