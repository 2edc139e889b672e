// SPDX-License-Identifier: GPL-3.0-only
//! Pixel format conversion to packed RGB
//!
//! Every stream layout is brought to 8-bit RGB before encoding. Row
//! padding (stride larger than the visible width) is dropped.

use super::types::{CameraFrame, PixelFormat};
use crate::errors::PhotoError;
use image::RgbImage;

/// Convert a frame to an RGB image
///
/// Compressed frames take their dimensions from the JPEG header.
pub fn frame_to_rgb_image(frame: &CameraFrame) -> Result<RgbImage, PhotoError> {
    let rgb = match frame.format {
        PixelFormat::Rgb24 => packed_to_rgb(frame, 3)?,
        PixelFormat::Rgba => packed_to_rgb(frame, 4)?,
        PixelFormat::Yuyv => {
            check_length(frame, 2)?;
            yuyv_to_rgb(&frame.data, frame.width, frame.height, frame.stride)
        }
        PixelFormat::Mjpeg => {
            let decoded =
                image::load_from_memory_with_format(&frame.data, image::ImageFormat::Jpeg)
                    .map_err(|e| {
                        PhotoError::EncodingFailed(format!("MJPEG decode failed: {}", e))
                    })?;
            return Ok(decoded.to_rgb8());
        }
    };

    RgbImage::from_raw(frame.width, frame.height, rgb).ok_or_else(|| {
        PhotoError::EncodingFailed(format!(
            "buffer does not match {}x{}",
            frame.width, frame.height
        ))
    })
}

fn check_length(frame: &CameraFrame, bytes_per_pixel: u32) -> Result<(), PhotoError> {
    let stride = effective_stride(frame, bytes_per_pixel) as usize;
    let last_row = stride * (frame.height as usize).saturating_sub(1);
    let needed = last_row + (frame.width * bytes_per_pixel) as usize;
    if frame.data.len() < needed {
        return Err(PhotoError::UnsupportedFormat(format!(
            "{:?} frame of {}x{} needs {} bytes, got {}",
            frame.format,
            frame.width,
            frame.height,
            needed,
            frame.data.len()
        )));
    }
    Ok(())
}

fn effective_stride(frame: &CameraFrame, bytes_per_pixel: u32) -> u32 {
    frame.stride.max(frame.width * bytes_per_pixel)
}

fn packed_to_rgb(frame: &CameraFrame, bytes_per_pixel: u32) -> Result<Vec<u8>, PhotoError> {
    check_length(frame, bytes_per_pixel)?;
    let stride = effective_stride(frame, bytes_per_pixel) as usize;
    let bpp = bytes_per_pixel as usize;
    let width = frame.width as usize;

    let mut rgb = Vec::with_capacity(width * frame.height as usize * 3);
    for row in frame.data.chunks(stride).take(frame.height as usize) {
        for pixel in row[..width * bpp].chunks_exact(bpp) {
            rgb.extend_from_slice(&pixel[..3]);
        }
    }
    Ok(rgb)
}

/// Convert YUYV (YUV 4:2:2) to RGB
///
/// YUYV format: Y0 U0 Y1 V0 - each 4-byte group encodes 2 pixels.
/// Uses BT.601 coefficients for YUV to RGB conversion.
pub fn yuyv_to_rgb(data: &[u8], width: u32, height: u32, stride: u32) -> Vec<u8> {
    let w = width as usize;
    let stride = (stride as usize).max(w * 2);
    let mut rgb = Vec::with_capacity(w * height as usize * 3);

    for row in data.chunks(stride).take(height as usize) {
        let mut written = 0;
        for chunk in row[..(w * 2).min(row.len())].chunks_exact(4) {
            let y0 = chunk[0] as f32;
            let u = chunk[1] as f32 - 128.0;
            let y1 = chunk[2] as f32;
            let v = chunk[3] as f32 - 128.0;

            for y in [y0, y1] {
                if written == w {
                    break;
                }
                rgb.push((y + 1.402 * v).clamp(0.0, 255.0) as u8);
                rgb.push((y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0) as u8);
                rgb.push((y + 1.772 * u).clamp(0.0, 255.0) as u8);
                written += 1;
            }
        }
    }

    rgb
}
