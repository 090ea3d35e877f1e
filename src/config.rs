// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Configuration utils.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Encountered when the configuration cannot be loaded.
#[derive(Error, Debug)]
#[error("Configuration Error: {0}")]
pub struct ConfigError(#[from] toml::de::Error);

/// Default configuration TOML string.
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Name of the configuration file inside the XDG config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Fallback web service root, used if the configuration does not specify one.
pub const DEFAULT_BASE_URL: &str = "https://musicbrainz.org/ws/2";

/// Fallback file name template, used if the configuration does not specify one.
const DEFAULT_TRACK_FORMAT: &str =
    "{{#if multi_disc}}{{disc_number}}-{{/if}}{{track_number_padded}} - {{track_title}}";

/// Represents a piece of configuration that can be merged with another one.
trait MergeableConfig {
    /// Merge this configuration object with another one, taking values not set in this object from
    /// the other one (if present).
    fn merge(&self, other: &Self) -> Self;
}

/// Configuration for MusicBrainz lookups.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct LookupConfig {
    /// Root URL of the web service.
    pub base_url: Option<String>,
    /// User agent sent with every request.
    pub user_agent: Option<String>,
    /// Maximum number of search results to request.
    pub search_limit: Option<u8>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Only search for releases on media with this format (e.g., `CD`).
    pub format: Option<String>,
    /// Only search for releases issued in this country (e.g., `US`).
    pub country: Option<String>,
}

impl MergeableConfig for LookupConfig {
    fn merge(&self, other: &Self) -> Self {
        LookupConfig {
            base_url: self.base_url.clone().or_else(|| other.base_url.clone()),
            user_agent: self.user_agent.clone().or_else(|| other.user_agent.clone()),
            search_limit: self.search_limit.or(other.search_limit),
            timeout_secs: self.timeout_secs.or(other.timeout_secs),
            format: self.format.clone().or_else(|| other.format.clone()),
            country: self.country.clone().or_else(|| other.country.clone()),
        }
    }
}

impl LookupConfig {
    /// The web service root without trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    /// The user agent.
    pub fn user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(|| {
            format!(
                "{name}/{version}",
                name = env!("CARGO_PKG_NAME"),
                version = env!("CARGO_PKG_VERSION")
            )
        })
    }

    /// Number of search results to request.
    pub fn search_limit(&self) -> u8 {
        self.search_limit.filter(|&limit| limit != 0).unwrap_or(100)
    }

    /// Request timeout.
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs.unwrap_or(30))
    }
}

/// Configuration for naming files.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct NamingConfig {
    /// Handlebars template for the file name (without extension).
    pub track_format: Option<String>,
    /// Minimum width of the zero-padded track number.
    pub track_number_width: Option<usize>,
    /// Maximum distance between a file name and a track title to still be considered a match.
    pub title_match_threshold: Option<f64>,
}

impl MergeableConfig for NamingConfig {
    fn merge(&self, other: &Self) -> Self {
        NamingConfig {
            track_format: self
                .track_format
                .clone()
                .or_else(|| other.track_format.clone()),
            track_number_width: self.track_number_width.or(other.track_number_width),
            title_match_threshold: self.title_match_threshold.or(other.title_match_threshold),
        }
    }
}

impl NamingConfig {
    /// The file name template.
    pub fn track_format(&self) -> &str {
        self.track_format
            .as_deref()
            .unwrap_or(DEFAULT_TRACK_FORMAT)
    }

    /// The track number width.
    pub fn track_number_width(&self) -> usize {
        self.track_number_width.unwrap_or(2)
    }

    /// The title match threshold.
    pub fn title_match_threshold(&self) -> f64 {
        self.title_match_threshold.unwrap_or(0.25)
    }
}

/// Configuration for writing tags.
#[expect(missing_copy_implementations)]
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct TaggingConfig {
    /// Also write MusicBrainz identifiers.
    pub write_musicbrainz_ids: Option<bool>,
}

impl TaggingConfig {
    /// Whether MusicBrainz identifiers are written.
    pub fn write_musicbrainz_ids(&self) -> bool {
        self.write_musicbrainz_ids.unwrap_or(true)
    }
}

impl MergeableConfig for TaggingConfig {
    fn merge(&self, other: &Self) -> Self {
        TaggingConfig {
            write_musicbrainz_ids: self.write_musicbrainz_ids.or(other.write_musicbrainz_ids),
        }
    }
}

/// The main configuration struct.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Configuration for release lookup.
    #[serde(default)]
    pub lookup: LookupConfig,
    /// Configuration for file naming.
    #[serde(default)]
    pub naming: NamingConfig,
    /// Configuration for tagging.
    #[serde(default)]
    pub tagging: TaggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::load_default().expect("Failed to load default config")
    }
}

impl MergeableConfig for Config {
    /// Merge this configuration object with another one, taking values not set in this object from
    /// the other one (if present).
    fn merge(&self, other: &Self) -> Self {
        Config {
            lookup: self.lookup.merge(&other.lookup),
            naming: self.naming.merge(&other.naming),
            tagging: self.tagging.merge(&other.tagging),
        }
    }
}

impl Config {
    /// Load the configuration from a string slice.
    fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(text)?;
        Ok(config)
    }

    /// Load the default configuration.
    fn load_default() -> Result<Self, ConfigError> {
        Self::load_from_str(DEFAULT_CONFIG)
    }

    /// Load the configuration from a file located at the given path.
    ///
    /// # Errors
    ///
    /// This method can fail if the file cannot be accessed or if it contains malformed
    /// configuration markup.
    pub fn load_from_path<T: AsRef<Path>>(path: T) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::load_from_str(&text)?;
        Ok(config)
    }

    /// Find the user configuration file in the XDG config directories.
    pub fn find_user_config_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix(env!("CARGO_PKG_NAME")).find_config_file(CONFIG_FILE_NAME)
    }

    /// Load the configuration from the given path, or from the user configuration file if no path
    /// is given, and merge it with the default values.
    ///
    /// # Errors
    ///
    /// This method can fail if the file cannot be accessed or if it contains malformed
    /// configuration markup.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(Self::find_user_config_path);
        match path {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                Self::load_from_path(path).map(|config| config.with_defaults())
            }
            None => Ok(Self::default()),
        }
    }

    /// Merge this configuration struct with the default values.
    #[must_use]
    pub fn with_defaults(&self) -> Self {
        let default = Self::default();
        self.merge(&default)
    }
}
