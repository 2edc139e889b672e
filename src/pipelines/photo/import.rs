// SPDX-License-Identifier: GPL-3.0-only

//! Import of an existing image file
//!
//! The direct file-picker path: the user chooses a PNG or JPEG instead of
//! taking a photo. The bytes are passed through unchanged; decoding only
//! validates the file and reads its dimensions.

use super::encoding::{EncodedImage, EncodingFormat, capture_file_name};
use crate::errors::PhotoError;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Validate `bytes` as a PNG or JPEG image
pub fn import_bytes(bytes: Vec<u8>) -> Result<EncodedImage, PhotoError> {
    let detected = image::guess_format(&bytes)
        .map_err(|e| PhotoError::ImportFailed(format!("unrecognised image: {}", e)))?;
    let format = EncodingFormat::from_image_format(detected).ok_or_else(|| {
        PhotoError::ImportFailed(format!("{:?} images are not accepted", detected))
    })?;

    let decoded = image::load_from_memory_with_format(&bytes, detected)
        .map_err(|e| PhotoError::ImportFailed(format!("corrupt image: {}", e)))?;

    Ok(EncodedImage {
        data: Arc::from(bytes),
        format,
        width: decoded.width(),
        height: decoded.height(),
        file_name: capture_file_name(format),
    })
}

/// Read and validate an image file
pub async fn import_file(path: &Path) -> Result<EncodedImage, PhotoError> {
    info!(path = %path.display(), "Importing image file");

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| PhotoError::ImportFailed(format!("{}: {}", path.display(), e)))?;

    tokio::task::spawn_blocking(move || import_bytes(bytes))
        .await
        .map_err(|e| PhotoError::ImportFailed(format!("Import task error: {}", e)))?
}
