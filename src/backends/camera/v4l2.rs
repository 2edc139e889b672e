// SPDX-License-Identifier: GPL-3.0-only

//! V4L2 video device provider
//!
//! Each open spawns a capture thread that owns the device and its
//! memory-mapped stream. The thread copies every dequeued buffer into a
//! shared slot; the stream handle reads the latest frame from there. The
//! open future resolves once the warm-up frames have arrived, or with the
//! classified error if the device could not be configured or stays silent.
//! Dequeues time out so a stalled device never keeps the thread from
//! seeing a stop request.

use super::types::{CameraFrame, DeviceError, PixelFormat, StreamRequest};
use super::{OpenResult, VideoDeviceProvider, VideoStream};
use crate::constants::v4l2::{BUFFER_COUNT, DEQUEUE_TIMEOUT_MS, RETRY_DELAY_MS, WARMUP_TIMEOUT_MS};
use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use v4l::buffer::Type;
use v4l::io::traits::CaptureStream;
use v4l::prelude::*;
use v4l::video::Capture;
use v4l::FourCC;

/// Formats tried in order when configuring the device
const PREFERRED_FOURCCS: [&[u8; 4]; 2] = [b"YUYV", b"MJPG"];

/// A V4L2 capture node found on the system
#[derive(Debug, Clone)]
pub struct V4l2DeviceInfo {
    pub index: usize,
    pub path: PathBuf,
    pub name: String,
}

/// List capture nodes under `/dev`
pub fn enumerate_devices() -> Vec<V4l2DeviceInfo> {
    let mut devices: Vec<V4l2DeviceInfo> = v4l::context::enum_devices()
        .into_iter()
        .filter(|node| is_capture_node(node.path()))
        .map(|node| V4l2DeviceInfo {
            index: node.index(),
            path: node.path().to_path_buf(),
            name: node.name().unwrap_or_else(|| "Unknown camera".to_string()),
        })
        .collect();
    devices.sort_by_key(|d| d.index);
    devices
}

fn is_capture_node(path: &Path) -> bool {
    Device::with_path(path)
        .and_then(|dev| dev.query_caps())
        .map(|caps| {
            caps.capabilities
                .contains(v4l::capability::Flags::VIDEO_CAPTURE)
        })
        .unwrap_or(false)
}

/// Provider backed by Linux V4L2 device nodes
#[derive(Debug, Clone)]
pub struct V4l2Provider {
    warmup_frames: u32,
}

impl V4l2Provider {
    pub fn new(warmup_frames: u32) -> Self {
        Self { warmup_frames }
    }
}

impl VideoDeviceProvider for V4l2Provider {
    fn open(&self, request: StreamRequest) -> BoxFuture<'static, OpenResult> {
        let warmup_frames = self.warmup_frames;

        Box::pin(async move {
            let shared = Arc::new(SharedFrame::default());
            let running = Arc::new(AtomicBool::new(true));
            let (ready_tx, ready_rx) = oneshot::channel();

            // Device lookup and configuration are blocking ioctls, so they
            // run on the capture thread along with the stream
            let thread_shared = Arc::clone(&shared);
            let thread_running = Arc::clone(&running);
            let handle = std::thread::Builder::new()
                .name("v4l2-capture".to_string())
                .spawn(move || {
                    let path = match resolve_device(request) {
                        Ok(path) => path,
                        Err(error) => {
                            let _ = ready_tx.send(Err(error));
                            return;
                        }
                    };
                    capture_loop(
                        &path,
                        warmup_frames,
                        thread_shared,
                        thread_running,
                        ready_tx,
                    )
                })
                .map_err(|e| DeviceError::other(format!("failed to spawn capture thread: {}", e)))?;

            match ready_rx.await {
                Ok(Ok(label)) => Ok(Box::new(V4l2Stream {
                    label,
                    shared,
                    running,
                    handle: Some(handle),
                }) as Box<dyn VideoStream>),
                Ok(Err(error)) => {
                    reap(handle);
                    Err(error)
                }
                Err(_) => {
                    reap(handle);
                    Err(DeviceError::other(
                        "capture thread exited before streaming".to_string(),
                    ))
                }
            }
        })
    }
}

/// Configured node, or the first capture node found
fn resolve_device(request: StreamRequest) -> Result<PathBuf, DeviceError> {
    if let Some(path) = request.device_path {
        return Ok(path);
    }
    // V4L2 does not report which way a camera faces
    debug!(facing = ?request.facing, "No device configured, using first capture node");
    enumerate_devices()
        .into_iter()
        .next()
        .map(|d| d.path)
        .ok_or_else(|| DeviceError::not_found("no V4L2 capture device"))
}

/// Join a finished or stopping capture thread off the async workers
fn reap(handle: JoinHandle<()>) {
    let join = move || {
        if handle.join().is_err() {
            warn!("Capture thread panicked");
        }
    };
    match tokio::runtime::Handle::try_current() {
        Ok(runtime) => {
            runtime.spawn_blocking(join);
        }
        Err(_) => join(),
    }
}

#[derive(Default)]
struct SharedFrame {
    latest: Mutex<Option<CameraFrame>>,
}

struct V4l2Stream {
    label: String,
    shared: Arc<SharedFrame>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl VideoStream for V4l2Stream {
    fn label(&self) -> &str {
        &self.label
    }

    fn latest_frame(&self) -> Option<CameraFrame> {
        self.shared.latest.lock().ok().and_then(|f| f.clone())
    }

    fn is_live(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            info!(device = %self.label, "Stopping V4L2 stream");
            // The thread sees the flag within one dequeue timeout and
            // closes the device when it returns
            reap(handle);
        }
        if let Ok(mut latest) = self.shared.latest.lock() {
            latest.take();
        }
    }
}

impl Drop for V4l2Stream {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Configure the device and stream until `running` is cleared
///
/// Dropping the stream and device at the end of this function releases
/// the driver buffers and closes the node.
fn capture_loop(
    path: &Path,
    warmup_frames: u32,
    shared: Arc<SharedFrame>,
    running: Arc<AtomicBool>,
    ready: oneshot::Sender<Result<String, DeviceError>>,
) {
    let display = path.display().to_string();

    let dev = match Device::with_path(path) {
        Ok(dev) => dev,
        Err(e) => {
            let _ = ready.send(Err(DeviceError::from_io(&e, &display)));
            return;
        }
    };

    let label = dev
        .query_caps()
        .map(|caps| caps.card)
        .unwrap_or_else(|_| display.clone());

    let (format, pixel_format) = match negotiate_format(&dev, &display) {
        Ok(negotiated) => negotiated,
        Err(error) => {
            let _ = ready.send(Err(error));
            return;
        }
    };

    info!(
        device = %label,
        width = format.width,
        height = format.height,
        fourcc = ?format.fourcc,
        "Opening V4L2 stream"
    );

    let mut stream = match MmapStream::with_buffers(&dev, Type::VideoCapture, BUFFER_COUNT) {
        Ok(stream) => stream,
        Err(e) => {
            let _ = ready.send(Err(DeviceError::from_io(&e, &display)));
            return;
        }
    };

    stream.set_timeout(Duration::from_millis(DEQUEUE_TIMEOUT_MS));

    let mut ready = Some(ready);
    let mut delivered = 0u32;
    let mut last_frame = Instant::now();

    while running.load(Ordering::SeqCst) {
        match stream.next() {
            Ok((buf, meta)) => {
                // Some drivers leave bytesused at zero for packed formats
                let used = match meta.bytesused as usize {
                    0 => buf.len(),
                    n => n.min(buf.len()),
                };
                let frame = CameraFrame {
                    width: format.width,
                    height: format.height,
                    data: Arc::from(&buf[..used]),
                    format: pixel_format,
                    stride: format.stride,
                    captured_at: Instant::now(),
                };
                if let Ok(mut latest) = shared.latest.lock() {
                    *latest = Some(frame);
                }
                last_frame = Instant::now();

                delivered = delivered.saturating_add(1);
                if delivered > warmup_frames {
                    if let Some(ready) = ready.take() {
                        // Receiver gone means the open was abandoned
                        if ready.send(Ok(label.clone())).is_err() {
                            debug!(device = %label, "Open abandoned, closing device");
                            break;
                        }
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
                let Some(pending) = ready.take() else {
                    continue;
                };
                if pending.is_closed() {
                    debug!(device = %label, "Open abandoned while waiting for frames");
                    break;
                }
                if last_frame.elapsed() >= Duration::from_millis(WARMUP_TIMEOUT_MS) {
                    let _ = pending.send(Err(DeviceError::other(format!(
                        "{} delivered no frames",
                        label
                    ))));
                    return;
                }
                ready = Some(pending);
            }
            Err(e) => {
                if let Some(ready) = ready.take() {
                    let _ = ready.send(Err(DeviceError::from_io(&e, &display)));
                    return;
                }
                warn!(device = %label, error = %e, "Failed to dequeue frame");
                std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS));
            }
        }
    }

    debug!(device = %label, frames = delivered, "V4L2 capture loop ended");
}

/// Pick the first preferred pixel format the driver accepts
fn negotiate_format(dev: &Device, display: &str) -> Result<(v4l::Format, PixelFormat), DeviceError> {
    let current = dev
        .format()
        .map_err(|e| DeviceError::from_io(&e, display))?;

    for fourcc in PREFERRED_FOURCCS {
        let mut wanted = current.clone();
        wanted.fourcc = FourCC::new(fourcc);

        match dev.set_format(&wanted) {
            Ok(actual) => {
                if let Some(pixel_format) = PixelFormat::from_fourcc(&actual.fourcc.repr) {
                    return Ok((actual, pixel_format));
                }
                debug!(fourcc = ?actual.fourcc, "Driver substituted an unsupported format");
            }
            Err(e) => {
                debug!(fourcc = ?FourCC::new(fourcc), error = %e, "Format rejected");
            }
        }
    }

    Err(DeviceError::other(format!(
        "{} offers neither YUYV nor MJPG",
        display
    )))
}
