// SPDX-License-Identifier: MPL-2.0

//! Async still-image pipeline
//!
//! ```text
//! Live stream → Grab → RGB conversion → Encoding → EncodedImage
//!      ↓
//! Stream keeps running until the sequencer releases it
//! ```
//!
//! # Pipeline Stages
//!
//! 1. **Grab**: copy the latest frame out of the stream
//! 2. **Conversion**: YUYV / MJPEG / packed RGB to RGB (blocking pool)
//! 3. **Encoding**: PNG or JPEG (blocking pool)
//!
//! Imported files skip the first two stages and are only validated.

pub mod capture;
pub mod encoding;
pub mod import;

pub use capture::PhotoCapture;
pub use encoding::{EncodedImage, EncodingFormat, FrameEncoder, PhotoEncoder};
pub use import::{import_bytes, import_file};
