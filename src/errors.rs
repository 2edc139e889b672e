// SPDX-License-Identifier: MPL-2.0

//! Error types for the capture flow
//!
//! Every failure of a capture attempt is one of the three [`CaptureError`]
//! kinds. None of them is fatal for the session: the sequencer turns them
//! into a user-visible notice and stays at its last stable state.

use crate::backends::camera::DeviceError;
use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Top-level error type for the library and the command-line front end
#[derive(Debug, Clone)]
pub enum AppError {
    /// A capture attempt failed
    Capture(CaptureError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Failure of a single capture attempt
#[derive(Debug, Clone)]
pub enum CaptureError {
    /// Opening the video device failed (permission, missing or busy hardware)
    DeviceUnavailable(DeviceError),
    /// Turning the current frame into an encoded still failed
    EncodingFailed(PhotoError),
    /// The upload mechanism signalled failure
    UploadFailed,
}

/// Still-image production errors
#[derive(Debug, Clone)]
pub enum PhotoError {
    /// The stream has not delivered a frame yet
    NoFrameAvailable,
    /// The frame uses a pixel layout the encoder cannot read
    UnsupportedFormat(String),
    /// Encoding failed
    EncodingFailed(String),
    /// An imported image file could not be read or decoded
    ImportFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Capture(e) => write!(f, "Capture error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::DeviceUnavailable(e) => write!(f, "Camera unavailable: {}", e),
            CaptureError::EncodingFailed(e) => write!(f, "Still image failed: {}", e),
            CaptureError::UploadFailed => write!(f, "Image upload failed"),
        }
    }
}

impl fmt::Display for PhotoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoError::NoFrameAvailable => write!(f, "No frame available for capture"),
            PhotoError::UnsupportedFormat(msg) => write!(f, "Unsupported frame format: {}", msg),
            PhotoError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            PhotoError::ImportFailed(msg) => write!(f, "Import failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for PhotoError {}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        AppError::Capture(err)
    }
}

impl From<DeviceError> for CaptureError {
    fn from(err: DeviceError) -> Self {
        CaptureError::DeviceUnavailable(err)
    }
}

impl From<PhotoError> for CaptureError {
    fn from(err: PhotoError) -> Self {
        CaptureError::EncodingFailed(err)
    }
}

impl From<DeviceError> for AppError {
    fn from(err: DeviceError) -> Self {
        AppError::Capture(err.into())
    }
}

impl From<PhotoError> for AppError {
    fn from(err: PhotoError) -> Self {
        AppError::Capture(err.into())
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
