// SPDX-License-Identifier: MPL-2.0

//! Capture Flow - camera capture view sequencer
//!
//! Drives a capture widget through idle, live feed and still preview,
//! owns the video stream and the captured still while they are in use,
//! and hands the still to an upload mechanism whose outcome it waits for.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: the sequencer, its transition table and view model
//! - [`backends`]: video devices, display handles and upload mechanisms
//! - [`pipelines`]: frame grabbing, encoding and image import
//! - [`runtime`]: tokio event loop feeding completions back in
//! - [`swap_hooks`]: decorations for fragment-swap notifications
//! - [`config`]: user configuration handling
//!
//! # Example
//!
//! ```no_run
//! use capture_flow::app::{Message, Sequencer, ViewModel};
//! use capture_flow::backends::Backends;
//! use capture_flow::runtime::EventLoop;
//!
//! # async fn demo(backends: Backends) {
//! let mut view = ViewModel::new();
//! let mut sequencer = Sequencer::new(&mut view, backends, Default::default());
//! let mut events = EventLoop::new();
//!
//! events.dispatch(&mut sequencer, Message::StartCapture);
//! events.settle(&mut sequencer).await;
//! events.dispatch(&mut sequencer, Message::TakePhoto);
//! events.settle(&mut sequencer).await;
//! # }
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod pipelines;
pub mod runtime;
pub mod swap_hooks;

// Re-export commonly used types
pub use app::{Message, Notice, NoticeKind, Sequencer, SequencerSettings, ViewModel, ViewState};
pub use backends::Backends;
pub use config::Config;
pub use errors::{AppError, AppResult, CaptureError};
