// SPDX-License-Identifier: MPL-2.0

//! Video capture device abstraction
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │     Sequencer       │
//! └──────────┬──────────┘
//!            │ open(StreamRequest)
//!            ▼
//! ┌─────────────────────┐
//! │ VideoDeviceProvider │  ← acquires a device, resolves to a live stream
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  VideoStream trait  │  ← owned by the capture session, stopped on release
//! └──────────┬──────────┘
//!            │
//!      ┌─────┴──────┐
//!      ▼            ▼
//!  ┌──────┐   ┌────────────┐
//!  │ V4L2 │   │Test pattern│
//!  └──────┘   └────────────┘
//! ```

pub mod format_converters;
pub mod test_pattern;
pub mod types;
pub mod v4l2;

pub use test_pattern::TestPatternProvider;
pub use types::*;
pub use v4l2::V4l2Provider;

use futures::future::BoxFuture;

/// Result of an open request
pub type OpenResult = Result<Box<dyn VideoStream>, DeviceError>;

/// Acquires video capture devices
///
/// Opening is asynchronous and may fail with a [`DeviceError`]. The
/// returned future must not borrow the provider so the runtime can drive
/// it independently of the sequencer.
pub trait VideoDeviceProvider: Send + Sync {
    /// Open a stream matching `request`
    fn open(&self, request: StreamRequest) -> BoxFuture<'static, OpenResult>;
}

/// A live stream on an open device
///
/// The stream is exclusively owned by the capture session holding it.
/// `stop` releases every underlying track and must be safe to call more
/// than once; implementations also stop on drop.
pub trait VideoStream: Send {
    /// Human readable device name for logs
    fn label(&self) -> &str;

    /// Copy of the most recent frame
    fn latest_frame(&self) -> Option<CameraFrame>;

    /// Whether the device is still streaming
    fn is_live(&self) -> bool;

    /// Stop streaming and release the device
    fn stop(&mut self);
}

impl std::fmt::Debug for dyn VideoStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoStream")
            .field("label", &self.label())
            .field("live", &self.is_live())
            .finish()
    }
}
