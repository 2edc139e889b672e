// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Status line while the live feed is up
pub const STATUS_CAMERA_ACTIVE: &str = "Camera active";

/// Status line whenever no live feed is shown
pub const STATUS_CAMERA_INACTIVE: &str = "Camera inactive";

/// Event name the capture endpoint raises after storing an upload
pub const SIGNAL_UPLOAD_SUCCESS: &str = "cameraUploadSuccess";

/// Event name the capture endpoint raises when storing an upload failed
pub const SIGNAL_UPLOAD_FAILED: &str = "cameraUploadFailed";

/// Response header carrying the outcome signal
pub const HX_TRIGGER_HEADER: &str = "hx-trigger";

/// Request header marking a fragment-swap request
pub const HX_REQUEST_HEADER: &str = "HX-Request";

/// Multipart field name the capture endpoint reads the image from
pub const UPLOAD_FIELD_NAME: &str = "photo";

/// Prefix of object URLs handed out by the display-handle registry
pub const OBJECT_URL_SCHEME: &str = "blob:capture-flow/";

/// V4L2 capture parameters
pub mod v4l2 {
    /// Number of memory-mapped buffers in the capture stream
    pub const BUFFER_COUNT: u32 = 4;

    /// Frames discarded while auto-exposure settles before the stream
    /// is reported as open
    pub const DEFAULT_WARMUP_FRAMES: u32 = 5;

    /// Pause after a failed dequeue before the capture thread retries
    pub const RETRY_DELAY_MS: u64 = 10;

    /// Longest wait for one buffer, so the capture thread notices a stop
    /// even when the device has stalled
    pub const DEQUEUE_TIMEOUT_MS: u64 = 250;

    /// An open fails when the device delivers no frame for this long
    pub const WARMUP_TIMEOUT_MS: u64 = 5_000;
}

/// Timings of the fragment-swap decorations
pub mod swap {
    use super::Duration;

    /// Siblings sliding into the space of a deleted item
    pub const DELETE_SLIDE: Duration = Duration::from_millis(500);

    /// List container height change and item reflow after a refresh
    pub const LIST_REFLOW: Duration = Duration::from_millis(250);

    /// Fade-in of a freshly inserted list entry
    pub const NEW_ENTRY_FADE: Duration = Duration::from_millis(500);

    /// Vertical offset a new entry fades in from
    pub const NEW_ENTRY_OFFSET_Y: f32 = -100.0;

    /// Edit panel height change after its content was replaced
    pub const PANEL_RESIZE: Duration = Duration::from_millis(400);
}
