// SPDX-License-Identifier: MPL-2.0

//! Frame grab from a live stream
//!
//! Takes a copy of the most recent frame without interrupting the stream.

use crate::backends::camera::{CameraFrame, VideoStream};
use crate::errors::PhotoError;
use std::sync::Arc;
use tracing::{debug, info};

/// Photo capture handler
pub struct PhotoCapture;

impl PhotoCapture {
    /// Grab the current frame of `stream`
    ///
    /// # Returns
    /// * `Ok(Arc<CameraFrame>)` - Captured frame
    /// * `Err(PhotoError::NoFrameAvailable)` - Stream stopped or has not
    ///   delivered a frame yet
    pub fn grab(stream: &dyn VideoStream) -> Result<Arc<CameraFrame>, PhotoError> {
        info!(device = %stream.label(), "Grabbing frame from stream");

        if !stream.is_live() {
            return Err(PhotoError::NoFrameAvailable);
        }

        let frame = stream.latest_frame().ok_or(PhotoError::NoFrameAvailable)?;

        if frame.width == 0 || frame.height == 0 || frame.data.is_empty() {
            return Err(PhotoError::NoFrameAvailable);
        }

        debug!(
            width = frame.width,
            height = frame.height,
            format = ?frame.format,
            "Frame grabbed"
        );

        Ok(Arc::new(frame))
    }
}
