// SPDX-License-Identifier: GPL-3.0-only

//! Async photo encoding
//!
//! Converts a grabbed frame to RGB and encodes it as PNG (lossless, the
//! default) or JPEG. The CPU-bound work runs on the blocking pool.

use crate::backends::camera::CameraFrame;
use crate::backends::camera::format_converters::frame_to_rgb_image;
use crate::errors::PhotoError;
use futures::future::BoxFuture;
use image::RgbImage;
use std::sync::Arc;
use tracing::{debug, info};

/// Supported encoding formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingFormat {
    /// PNG format (lossless compression)
    Png,
    /// JPEG format (lossy compression)
    Jpeg,
}

impl EncodingFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            EncodingFormat::Png => "png",
            EncodingFormat::Jpeg => "jpg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            EncodingFormat::Png => "image/png",
            EncodingFormat::Jpeg => "image/jpeg",
        }
    }

    /// Map a detected image format, `None` for anything else
    pub fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Png => Some(EncodingFormat::Png),
            image::ImageFormat::Jpeg => Some(EncodingFormat::Jpeg),
            _ => None,
        }
    }
}

/// Encoded image data ready for preview and upload
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data: Arc<[u8]>,
    pub format: EncodingFormat,
    pub width: u32,
    pub height: u32,
    /// `img-<unix millis>.<ext>`
    pub file_name: String,
}

impl EncodedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Timestamped file name for a capture
pub fn capture_file_name(format: EncodingFormat) -> String {
    format!(
        "img-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        format.extension()
    )
}

/// Produces an encoded still from a grabbed frame
pub trait FrameEncoder: Send + Sync {
    fn encode(
        &self,
        frame: Arc<CameraFrame>,
    ) -> BoxFuture<'static, Result<EncodedImage, PhotoError>>;
}

/// Photo encoder
#[derive(Debug, Clone)]
pub struct PhotoEncoder {
    format: EncodingFormat,
    jpeg_quality: u8,
}

impl Default for PhotoEncoder {
    fn default() -> Self {
        Self::new(EncodingFormat::Png)
    }
}

impl PhotoEncoder {
    pub fn new(format: EncodingFormat) -> Self {
        Self {
            format,
            jpeg_quality: 92,
        }
    }

    /// Set JPEG quality (1-100, ignored for PNG)
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn format(&self) -> EncodingFormat {
        self.format
    }

    /// Encode on the calling thread
    pub fn encode_blocking(&self, frame: &CameraFrame) -> Result<EncodedImage, PhotoError> {
        let image = frame_to_rgb_image(frame)?;
        let (width, height) = image.dimensions();

        let data = match self.format {
            EncodingFormat::Png => Self::encode_png(&image)?,
            EncodingFormat::Jpeg => Self::encode_jpeg(&image, self.jpeg_quality)?,
        };

        debug!(size = data.len(), format = ?self.format, "Encoding complete");

        Ok(EncodedImage {
            data: Arc::from(data),
            format: self.format,
            width,
            height,
            file_name: capture_file_name(self.format),
        })
    }

    /// Encode image as JPEG
    fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, PhotoError> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);

        let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality);

        encoder
            .encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| PhotoError::EncodingFailed(format!("JPEG encoding failed: {}", e)))?;

        Ok(buffer)
    }

    /// Encode image as PNG
    fn encode_png(image: &RgbImage) -> Result<Vec<u8>, PhotoError> {
        let mut buffer = Vec::new();

        image
            .write_to(
                &mut std::io::Cursor::new(&mut buffer),
                image::ImageFormat::Png,
            )
            .map_err(|e| PhotoError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

        Ok(buffer)
    }
}

impl FrameEncoder for PhotoEncoder {
    fn encode(
        &self,
        frame: Arc<CameraFrame>,
    ) -> BoxFuture<'static, Result<EncodedImage, PhotoError>> {
        let encoder = self.clone();

        Box::pin(async move {
            info!(
                width = frame.width,
                height = frame.height,
                format = ?encoder.format,
                "Starting encoding"
            );

            tokio::task::spawn_blocking(move || encoder.encode_blocking(&frame))
                .await
                .map_err(|e| PhotoError::EncodingFailed(format!("Encoding task error: {}", e)))?
        })
    }
}
