// SPDX-License-Identifier: GPL-3.0-only

//! Display handles for still images
//!
//! A display handle is a reference a front end can render an encoded
//! buffer from. Handles are owned values: releasing consumes the handle,
//! and a handle dropped without an explicit release is released then.

use crate::constants::OBJECT_URL_SCHEME;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Turns byte buffers into displayable references
pub trait DisplayHandleAllocator: Send + Sync {
    /// Register `bytes` and return the reference to display them by
    fn create(&self, bytes: Arc<[u8]>, mime: &str) -> String;

    /// Forget a reference returned by `create`
    fn revoke(&self, url: &str);
}

/// Allocate a handle that releases itself through `allocator`
pub fn allocate(
    allocator: &Arc<dyn DisplayHandleAllocator>,
    bytes: Arc<[u8]>,
    mime: &str,
) -> DisplayHandle {
    let url = allocator.create(bytes, mime);
    debug!(url = %url, "Display handle allocated");
    DisplayHandle {
        url,
        allocator: Some(Arc::clone(allocator)),
    }
}

/// An allocated display reference
pub struct DisplayHandle {
    url: String,
    allocator: Option<Arc<dyn DisplayHandleAllocator>>,
}

impl DisplayHandle {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Release the reference
    pub fn release(mut self) {
        self.revoke();
    }

    fn revoke(&mut self) {
        if let Some(allocator) = self.allocator.take() {
            allocator.revoke(&self.url);
            debug!(url = %self.url, "Display handle released");
        }
    }
}

impl Drop for DisplayHandle {
    fn drop(&mut self) {
        if self.allocator.is_some() {
            warn!(url = %self.url, "Display handle dropped without release");
            self.revoke();
        }
    }
}

impl std::fmt::Debug for DisplayHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayHandle").field("url", &self.url).finish()
    }
}

struct ObjectEntry {
    bytes: Arc<[u8]>,
    mime: String,
}

/// In-memory object URL table
///
/// Hands out `blob:capture-flow/<uuid>` URLs and keeps the bytes
/// reachable until the URL is revoked.
#[derive(Default)]
pub struct ObjectUrlRegistry {
    entries: Mutex<HashMap<String, ObjectEntry>>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes and MIME type behind a live URL
    pub fn resolve(&self, url: &str) -> Option<(Arc<[u8]>, String)> {
        let entries = self.entries.lock().ok()?;
        entries
            .get(url)
            .map(|entry| (Arc::clone(&entry.bytes), entry.mime.clone()))
    }

    /// Number of URLs not yet revoked
    pub fn live_count(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }
}

impl DisplayHandleAllocator for ObjectUrlRegistry {
    fn create(&self, bytes: Arc<[u8]>, mime: &str) -> String {
        let url = format!("{}{}", OBJECT_URL_SCHEME, uuid::Uuid::new_v4());
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                url.clone(),
                ObjectEntry {
                    bytes,
                    mime: mime.to_string(),
                },
            );
        }
        url
    }

    fn revoke(&self, url: &str) {
        if let Ok(mut entries) = self.entries.lock()
            && entries.remove(url).is_none()
        {
            debug!(url, "Revoking unknown object URL");
        }
    }
}
