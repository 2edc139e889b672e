// SPDX-License-Identifier: MPL-2.0

//! External collaborators of the capture flow
//!
//! - [`camera`]: video device providers and live streams
//! - [`display`]: display handles for captured stills
//! - [`upload`]: hand-off of stills to an upload mechanism
//!
//! The frame encoder lives with the photo pipeline in
//! [`crate::pipelines::photo`].

pub mod camera;
pub mod display;
pub mod upload;

use crate::config::Config;
use crate::pipelines::photo::{FrameEncoder, PhotoEncoder};
use camera::VideoDeviceProvider;
use display::{DisplayHandleAllocator, ObjectUrlRegistry};
use std::sync::Arc;
use upload::UploadMechanism;

/// The set of collaborators one sequencer talks to
#[derive(Clone)]
pub struct Backends {
    pub devices: Arc<dyn VideoDeviceProvider>,
    pub encoder: Arc<dyn FrameEncoder>,
    pub display: Arc<dyn DisplayHandleAllocator>,
    pub upload: Arc<dyn UploadMechanism>,
}

impl Backends {
    /// Encoder, object URL registry and upload target from `config`, with
    /// frames from `devices`
    pub fn from_config(config: &Config, devices: Arc<dyn VideoDeviceProvider>) -> Self {
        let encoder = PhotoEncoder::new(config.photo_format.into())
            .with_jpeg_quality(config.jpeg_quality);
        Self {
            devices,
            encoder: Arc::new(encoder),
            display: Arc::new(ObjectUrlRegistry::new()),
            upload: upload::from_target(&config.upload),
        }
    }
}

impl std::fmt::Debug for Backends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends").finish_non_exhaustive()
    }
}
