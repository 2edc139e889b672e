// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic video source
//!
//! Produces a colour-bar frame without touching any hardware. Used by the
//! `--test-pattern` command-line switch and by tests, which rely on the
//! open/live counters to check that every stream is released.

use super::types::{CameraFrame, DeviceError, PixelFormat, StreamRequest};
use super::{OpenResult, VideoDeviceProvider, VideoStream};
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::debug;

/// Standard SMPTE-ish colour bars (RGB)
const BARS: [[u8; 3]; 7] = [
    [192, 192, 192],
    [192, 192, 0],
    [0, 192, 192],
    [0, 192, 0],
    [192, 0, 192],
    [192, 0, 0],
    [0, 0, 192],
];

#[derive(Default)]
struct Counters {
    opened: AtomicUsize,
    live: AtomicUsize,
}

/// Provider of synthetic streams
#[derive(Clone)]
pub struct TestPatternProvider {
    width: u32,
    height: u32,
    counters: Arc<Counters>,
    /// Error returned by the next open requests instead of a stream
    failure: Arc<Mutex<Option<DeviceError>>>,
    /// Streams open without ever delivering a frame
    blank: bool,
}

impl TestPatternProvider {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            counters: Arc::new(Counters::default()),
            failure: Arc::new(Mutex::new(None)),
            blank: false,
        }
    }

    /// Streams from this provider never produce a frame
    pub fn blank(mut self) -> Self {
        self.blank = true;
        self
    }

    /// Make every following open fail with `error` (or succeed again with `None`)
    pub fn set_failure(&self, error: Option<DeviceError>) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = error;
        }
    }

    /// Number of successful opens so far
    pub fn opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    /// Number of streams opened and not yet stopped
    pub fn live(&self) -> usize {
        self.counters.live.load(Ordering::SeqCst)
    }

    fn render_bars(width: u32, height: u32) -> Arc<[u8]> {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..height {
            for x in 0..width {
                let bar = (x as usize * BARS.len()) / width.max(1) as usize;
                data.extend_from_slice(&BARS[bar.min(BARS.len() - 1)]);
            }
        }
        Arc::from(data)
    }
}

impl VideoDeviceProvider for TestPatternProvider {
    fn open(&self, request: StreamRequest) -> BoxFuture<'static, OpenResult> {
        let failure = self.failure.lock().ok().and_then(|f| f.clone());
        let provider = self.clone();

        Box::pin(async move {
            if let Some(error) = failure {
                debug!(error = %error, "Test pattern open refused");
                return Err(error);
            }

            provider.counters.opened.fetch_add(1, Ordering::SeqCst);
            provider.counters.live.fetch_add(1, Ordering::SeqCst);
            debug!(facing = ?request.facing, "Test pattern stream opened");

            let frame = (!provider.blank).then(|| CameraFrame {
                width: provider.width,
                height: provider.height,
                data: Self::render_bars(provider.width, provider.height),
                format: PixelFormat::Rgb24,
                stride: provider.width * 3,
                captured_at: Instant::now(),
            });

            Ok(Box::new(TestPatternStream {
                frame,
                counters: Arc::clone(&provider.counters),
                live: true,
            }) as Box<dyn VideoStream>)
        })
    }
}

struct TestPatternStream {
    frame: Option<CameraFrame>,
    counters: Arc<Counters>,
    live: bool,
}

impl VideoStream for TestPatternStream {
    fn label(&self) -> &str {
        "test pattern"
    }

    fn latest_frame(&self) -> Option<CameraFrame> {
        if !self.live {
            return None;
        }
        self.frame.clone().map(|mut frame| {
            frame.captured_at = Instant::now();
            frame
        })
    }

    fn is_live(&self) -> bool {
        self.live
    }

    fn stop(&mut self) {
        if self.live {
            self.live = false;
            self.counters.live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl Drop for TestPatternStream {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let provider = TestPatternProvider::new(16, 8);
        let mut stream = provider.open(StreamRequest::default()).await.unwrap();
        assert_eq!(provider.live(), 1);

        stream.stop();
        stream.stop();
        drop(stream);
        assert_eq!(provider.live(), 0);
        assert_eq!(provider.opened(), 1);
    }

    #[tokio::test]
    async fn test_frame_has_packed_rgb_layout() {
        let provider = TestPatternProvider::new(14, 2);
        let stream = provider.open(StreamRequest::default()).await.unwrap();
        let frame = stream.latest_frame().unwrap();
        assert_eq!(frame.data.len(), 14 * 2 * 3);
        assert_eq!(&frame.data[0..3], &BARS[0]);
        assert_eq!(&frame.data[13 * 3..14 * 3], &BARS[6]);
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let provider = TestPatternProvider::new(4, 4);
        provider.set_failure(Some(DeviceError::not_found("no camera")));
        assert!(provider.open(StreamRequest::default()).await.is_err());
        assert_eq!(provider.live(), 0);
    }
}
