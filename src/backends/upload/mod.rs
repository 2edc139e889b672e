// SPDX-License-Identifier: GPL-3.0-only

//! Upload mechanisms
//!
//! The sequencer hands a still image off and does not wait for it; the
//! mechanism later raises exactly one outcome signal, which the runtime
//! feeds back as a message.

pub mod directory;
pub mod http;

pub use directory::DirectoryUpload;
pub use http::HttpUpload;

use crate::config::UploadTarget;
use crate::constants::{SIGNAL_UPLOAD_FAILED, SIGNAL_UPLOAD_SUCCESS};
use futures::future::BoxFuture;
use std::sync::Arc;

/// Outcome signal of a handed-off upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Success,
    Failure,
}

impl UploadOutcome {
    /// Event name used on the notification channel
    pub fn signal_name(&self) -> &'static str {
        match self {
            UploadOutcome::Success => SIGNAL_UPLOAD_SUCCESS,
            UploadOutcome::Failure => SIGNAL_UPLOAD_FAILED,
        }
    }

    /// Parse an event name from the notification channel
    pub fn from_signal(name: &str) -> Option<Self> {
        match name.trim() {
            SIGNAL_UPLOAD_SUCCESS => Some(UploadOutcome::Success),
            SIGNAL_UPLOAD_FAILED => Some(UploadOutcome::Failure),
            _ => None,
        }
    }
}

/// The payload handed to an upload mechanism
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

/// Consumes still images and reports one outcome per upload
pub trait UploadMechanism: Send + Sync {
    fn submit(&self, upload: Upload) -> BoxFuture<'static, UploadOutcome>;
}

/// Build the mechanism selected in the configuration
pub fn from_target(target: &UploadTarget) -> Arc<dyn UploadMechanism> {
    match target {
        UploadTarget::Directory { path } => Arc::new(DirectoryUpload::new(path.clone())),
        UploadTarget::Http { url } => Arc::new(HttpUpload::new(url.clone())),
    }
}
