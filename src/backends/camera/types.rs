// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for camera backends

use crate::config::Facing;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Pixel layouts a stream can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Packed 8-bit RGB
    Rgb24,
    /// Packed 8-bit RGBA
    Rgba,
    /// Packed YUV 4:2:2 (Y0 U Y1 V)
    Yuyv,
    /// Motion JPEG, each buffer is a complete JPEG image
    Mjpeg,
}

impl PixelFormat {
    /// Map a V4L2 FourCC to a supported layout
    pub fn from_fourcc(fourcc: &[u8; 4]) -> Option<Self> {
        match fourcc {
            b"YUYV" => Some(PixelFormat::Yuyv),
            b"MJPG" => Some(PixelFormat::Mjpeg),
            b"RGB3" => Some(PixelFormat::Rgb24),
            b"AB24" => Some(PixelFormat::Rgba),
            _ => None,
        }
    }

    /// Bytes per pixel for packed layouts, `None` for compressed ones
    pub fn bytes_per_pixel(&self) -> Option<u32> {
        match self {
            PixelFormat::Rgb24 => Some(3),
            PixelFormat::Rgba => Some(4),
            PixelFormat::Yuyv => Some(2),
            PixelFormat::Mjpeg => None,
        }
    }
}

/// A single frame from a live stream
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Raw buffer contents, copied out of the driver's buffer
    pub data: Arc<[u8]>,
    pub format: PixelFormat,
    /// Bytes per row for packed layouts (may include padding)
    pub stride: u32,
    pub captured_at: Instant,
}

/// What the sequencer asks of the device provider
#[derive(Debug, Clone, Default)]
pub struct StreamRequest {
    pub facing: Facing,
    /// Explicit device node, provider's choice when unset
    pub device_path: Option<PathBuf>,
}

/// Why a device could not be opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceErrorKind {
    /// The user or the system refused access
    PermissionDenied,
    /// No matching capture device exists
    NotFound,
    /// The device is in use by another process
    Busy,
    /// Anything else the platform reported
    Other,
}

/// Platform error from opening or running a video device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceError {
    pub kind: DeviceErrorKind,
    pub message: String,
}

impl DeviceError {
    pub fn new(kind: DeviceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(DeviceErrorKind::NotFound, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(DeviceErrorKind::Other, message)
    }

    /// Classify an I/O error from a device node
    pub fn from_io(err: &std::io::Error, context: &str) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::PermissionDenied => DeviceErrorKind::PermissionDenied,
            std::io::ErrorKind::NotFound => DeviceErrorKind::NotFound,
            _ if err.raw_os_error() == Some(libc::EBUSY) => DeviceErrorKind::Busy,
            _ if err.raw_os_error() == Some(libc::ENODEV) => DeviceErrorKind::NotFound,
            _ => DeviceErrorKind::Other,
        };
        Self::new(kind, format!("{}: {}", context, err))
    }
}

impl std::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            DeviceErrorKind::PermissionDenied => write!(f, "Permission denied: {}", self.message),
            DeviceErrorKind::NotFound => write!(f, "Device not found: {}", self.message),
            DeviceErrorKind::Busy => write!(f, "Device busy: {}", self.message),
            DeviceErrorKind::Other => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for DeviceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_classification() {
        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        assert_eq!(
            DeviceError::from_io(&denied, "/dev/video0").kind,
            DeviceErrorKind::PermissionDenied
        );

        let busy = std::io::Error::from_raw_os_error(libc::EBUSY);
        assert_eq!(
            DeviceError::from_io(&busy, "/dev/video0").kind,
            DeviceErrorKind::Busy
        );

        let missing = std::io::Error::from_raw_os_error(libc::ENOENT);
        assert_eq!(
            DeviceError::from_io(&missing, "/dev/video9").kind,
            DeviceErrorKind::NotFound
        );
    }

    #[test]
    fn test_fourcc_mapping() {
        assert_eq!(PixelFormat::from_fourcc(b"YUYV"), Some(PixelFormat::Yuyv));
        assert_eq!(PixelFormat::from_fourcc(b"MJPG"), Some(PixelFormat::Mjpeg));
        assert_eq!(PixelFormat::from_fourcc(b"GRBG"), None);
    }
}
