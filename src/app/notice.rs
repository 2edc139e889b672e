// SPDX-License-Identifier: GPL-3.0-only

//! User-visible notices

use crate::errors::{CaptureError, PhotoError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    DeviceUnavailable,
    EncodingFailed,
    UploadFailed,
}

/// A failure report queued for the front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl From<&CaptureError> for Notice {
    fn from(err: &CaptureError) -> Self {
        match err {
            CaptureError::DeviceUnavailable(e) => Notice {
                kind: NoticeKind::DeviceUnavailable,
                message: format!("Unable to access the camera: {}", e),
            },
            CaptureError::EncodingFailed(e @ PhotoError::ImportFailed(_)) => Notice {
                kind: NoticeKind::EncodingFailed,
                message: format!("Unable to use the selected image: {}", e),
            },
            CaptureError::EncodingFailed(e) => Notice {
                kind: NoticeKind::EncodingFailed,
                message: format!("Unable to capture still image: {}", e),
            },
            CaptureError::UploadFailed => Notice {
                kind: NoticeKind::UploadFailed,
                message: "Image upload failed. Please try again.".to_string(),
            },
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
