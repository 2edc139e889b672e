// SPDX-License-Identifier: GPL-3.0-only

//! Capture session resources
//!
//! A session owns the open video stream and the captured still. Both are
//! released explicitly by the sequencer; dropping a session releases
//! whatever is left as a fallback.

use super::state::Ticket;
use crate::backends::camera::VideoStream;
use crate::backends::display::{self, DisplayHandle, DisplayHandleAllocator};
use crate::backends::upload::Upload;
use crate::pipelines::photo::EncodedImage;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// An encoded still and, once shown, its display handle
pub struct StillImage {
    image: EncodedImage,
    display: Option<DisplayHandle>,
}

impl StillImage {
    pub fn new(image: EncodedImage) -> Self {
        Self {
            image,
            display: None,
        }
    }

    pub fn image(&self) -> &EncodedImage {
        &self.image
    }

    /// Display reference, allocated on first use
    pub fn display_url(&mut self, allocator: &Arc<dyn DisplayHandleAllocator>) -> &str {
        let image = &self.image;
        self.display
            .get_or_insert_with(|| {
                display::allocate(allocator, Arc::clone(&image.data), image.mime_type())
            })
            .url()
    }

    pub fn has_display_handle(&self) -> bool {
        self.display.is_some()
    }

    /// Payload for the upload mechanism; shares the encoded bytes
    pub fn upload(&self) -> Upload {
        Upload {
            file_name: self.image.file_name.clone(),
            mime: self.image.mime_type().to_string(),
            bytes: Arc::clone(&self.image.data),
        }
    }

    /// Drop the still and release its display handle
    pub fn discard(mut self) {
        if let Some(handle) = self.display.take() {
            handle.release();
        }
        debug!(file = %self.image.file_name, "Still image discarded");
    }
}

impl std::fmt::Debug for StillImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StillImage")
            .field("file_name", &self.image.file_name)
            .field("display", &self.display)
            .finish()
    }
}

#[derive(Debug)]
pub(crate) struct CaptureSession {
    pub id: Uuid,
    pub stream: Option<Box<dyn VideoStream>>,
    pub still: Option<StillImage>,
    /// Ticket of the upload handed off from this session
    pub pending_upload: Option<Ticket>,
}

impl CaptureSession {
    pub fn with_stream(stream: Box<dyn VideoStream>) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            stream: Some(stream),
            still: None,
            pending_upload: None,
        };
        debug!(session = %session.id, "Capture session started");
        session
    }

    pub fn with_still(still: StillImage) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            stream: None,
            still: Some(still),
            pending_upload: None,
        };
        debug!(session = %session.id, "Capture session started from a still");
        session
    }

    /// Stop the video stream if one is held
    pub fn release_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            debug!(session = %self.id, device = stream.label(), "Video stream released");
        }
    }

    pub fn discard_still(&mut self) {
        if let Some(still) = self.still.take() {
            still.discard();
        }
    }

    /// Release everything the session holds
    pub fn end(mut self) {
        self.release_stream();
        self.discard_still();
        if let Some(ticket) = self.pending_upload.take() {
            debug!(session = %self.id, %ticket, "Abandoning outcome of handed-off upload");
        }
        debug!(session = %self.id, "Capture session ended");
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.release_stream();
        self.discard_still();
    }
}
