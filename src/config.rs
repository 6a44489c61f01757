//! Codec configuration.
//!
//! ```toml
//! max_frame_size = 32768
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::frame::{DEFAULT_MAX_FRAME_SIZE, MAX_FRAME_SIZE, MIN_MAX_FRAME_SIZE};

/// Errors from loading a [`CodecConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("max_frame_size ({0}) must be between 16384 and 16777215")]
    InvalidMaxFrameSize(u32),
}

/// Frame codec configuration.
///
/// Only constructed through validating paths, so a codec built from it always
/// has a legal frame size limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    max_frame_size: u32,
}

/// On-disk layout of [`CodecConfig`], checked before conversion.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    /// Largest frame body the codec accepts or produces.
    #[serde(default = "default_max_frame_size")]
    max_frame_size: u32,
}

fn default_max_frame_size() -> u32 {
    DEFAULT_MAX_FRAME_SIZE
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_frame_size: default_max_frame_size(),
        }
    }
}

impl CodecConfig {
    /// Build a configuration, rejecting sizes outside [16384, 16777215].
    pub fn new(max_frame_size: u32) -> Result<Self, ConfigError> {
        let config = Self { max_frame_size };
        config.validate()?;
        Ok(config)
    }

    /// Largest frame body the codec accepts or produces.
    pub fn max_frame_size(&self) -> u32 {
        self.max_frame_size
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(contents)?;
        Self::new(file.max_frame_size)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_MAX_FRAME_SIZE..=MAX_FRAME_SIZE).contains(&self.max_frame_size) {
            return Err(ConfigError::InvalidMaxFrameSize(self.max_frame_size));
        }

        Ok(())
    }
}
