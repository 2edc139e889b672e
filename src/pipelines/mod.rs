// SPDX-License-Identifier: MPL-2.0

//! Processing pipelines for captured media
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌───────────────┐
//! │ Live stream  │ ──▶ │  Photo Pipeline   │ ──▶ │ Encoded still │
//! │ (YUYV/MJPG)  │     │  - grab frame     │     │ (PNG / JPEG)  │
//! │              │     │  - to RGB         │     │               │
//! │              │     │  - encode         │     │               │
//! └──────────────┘     └───────────────────┘     └───────────────┘
//! ```
//!
//! Grabbing is a copy of the latest frame and never blocks the stream;
//! conversion and encoding run on the blocking pool.

pub mod photo;
