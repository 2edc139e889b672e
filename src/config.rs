// SPDX-License-Identifier: GPL-3.0-only

//! User configuration
//!
//! Stored as JSON in `$XDG_CONFIG_HOME/capture-flow/config.json`. A missing
//! file yields the defaults; unknown fields are ignored and missing fields
//! fall back to their defaults.

use crate::errors::{AppError, AppResult};
use crate::pipelines::photo::EncodingFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where the flow goes once an upload has been accepted
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AfterUpload {
    /// Reopen the device and show the live feed for the next shot
    #[default]
    LiveFeed,
    /// Return to the idle view
    Idle,
}

/// Which camera to prefer when the platform can tell them apart
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    /// Rear camera
    #[default]
    Environment,
    /// Front (selfie) camera
    User,
}

/// Photo output format
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoOutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl From<PhotoOutputFormat> for EncodingFormat {
    fn from(format: PhotoOutputFormat) -> Self {
        match format {
            PhotoOutputFormat::Png => EncodingFormat::Png,
            PhotoOutputFormat::Jpeg => EncodingFormat::Jpeg,
        }
    }
}

/// Destination of submitted photos
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UploadTarget {
    /// Drop the file into a local directory
    Directory { path: PathBuf },
    /// Post a multipart form to the capture endpoint
    Http { url: String },
}

impl Default for UploadTarget {
    fn default() -> Self {
        UploadTarget::Directory {
            path: default_photo_dir(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    /// Flow after a successful upload
    pub after_upload: AfterUpload,
    /// Preferred camera orientation
    pub facing: Facing,
    /// Explicit V4L2 device node, first capture device when unset
    pub device_path: Option<PathBuf>,
    /// Encoding of captured frames
    pub photo_format: PhotoOutputFormat,
    /// JPEG quality (1-100), ignored for PNG
    pub jpeg_quality: u8,
    /// Frames dropped after opening the device before it counts as live
    pub warmup_frames: u32,
    /// Where submitted photos go
    pub upload: UploadTarget,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            after_upload: AfterUpload::default(),
            facing: Facing::default(),
            device_path: None,
            photo_format: PhotoOutputFormat::default(),
            jpeg_quality: 92,
            warmup_frames: crate::constants::v4l2::DEFAULT_WARMUP_FRAMES,
            upload: UploadTarget::default(),
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("capture-flow").join("config.json"))
    }

    /// Load from the default location, defaults when there is none
    pub fn load() -> AppResult<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No config directory on this system, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`, defaults when the file does not exist
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: Config = serde_json::from_str(&text)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Write to `path` through a temporary file so a crash never leaves
    /// a truncated config behind
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, path)?;
        info!(path = %path.display(), "Config saved");
        Ok(())
    }

    fn validate(&self) -> AppResult<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(AppError::Config(format!(
                "jpeg_quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

/// `~/Pictures/capture-flow`, or the working directory when there is no
/// picture directory
pub fn default_photo_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join("capture-flow"))
        .unwrap_or_else(|| PathBuf::from("capture-flow"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"after_upload":"idle"}"#).unwrap();
        assert_eq!(config.after_upload, AfterUpload::Idle);
        assert_eq!(config.photo_format, PhotoOutputFormat::Png);
        assert_eq!(config.jpeg_quality, 92);
    }

    #[test]
    fn test_upload_target_tagging() {
        let config: Config = serde_json::from_str(
            r#"{"upload":{"kind":"http","url":"http://localhost:8000/camera"}}"#,
        )
        .unwrap();
        assert_eq!(
            config.upload,
            UploadTarget::Http {
                url: "http://localhost:8000/camera".to_string()
            }
        );
    }
}
