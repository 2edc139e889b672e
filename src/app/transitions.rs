// SPDX-License-Identifier: GPL-3.0-only

//! Transition table of the capture flow
//!
//! Each row reads: in `from`, on `trigger`, if `guard` holds, run `action`
//! and end up in `to`. Anything without a row is ignored. The table does
//! not know how triggers are delivered; [`super::update`] looks rows up and
//! runs their actions.
//!
//! Opening the device is the one action whose result decides the next
//! stage, so it leaves the stage unchanged and the completion moves on:
//!
//! ```text
//! Idle ──StartCapture──▶ Idle (opening) ──DeviceReady──▶ Capturing
//!                                      └─DeviceFailed─▶ Idle + notice
//! ```

/// Stage as seen by the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Capturing,
    Previewing,
    PreviewingPending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    StartCapture,
    CancelCapture,
    TakePhoto,
    Retry,
    FinalCancel,
    Submit,
    ImportFile,
    DeviceReady,
    DeviceFailed,
    ImageReady,
    ImageFailed,
    UploadSucceeded,
    UploadFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Always,
    /// No device open or still encoding is in flight
    NotBusy,
    /// A device open or still load is in flight
    Busy,
}

impl Guard {
    fn holds(self, busy: bool) -> bool {
        match self {
            Guard::Always => true,
            Guard::NotBusy => !busy,
            Guard::Busy => busy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Request a stream from the device provider
    OpenDevice,
    /// Take over an opened stream and show the live feed
    AdoptStream,
    /// Turn a failed completion into a notice
    ReportFailure,
    /// Read an image file in the background
    LoadImport,
    /// Take over a still, releasing the stream, and show the preview
    AdoptStill,
    /// Release the session and show the idle view
    ReleaseToIdle,
    /// Grab the current frame and encode it in the background
    Snapshot,
    /// Hand the still to the upload mechanism
    HandOffUpload,
    /// Drop the uploaded still and continue per configuration
    CompleteUpload,
    /// Notice the failure and allow another submit
    ReportUploadFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    pub from: Phase,
    pub trigger: Trigger,
    pub guard: Guard,
    pub action: Action,
    pub to: Phase,
}

const fn row(from: Phase, trigger: Trigger, guard: Guard, action: Action, to: Phase) -> Row {
    Row {
        from,
        trigger,
        guard,
        action,
        to,
    }
}

use Action::*;
use Guard::*;
use Phase::*;

pub const TABLE: &[Row] = &[
    // ===== Idle =====
    row(Idle, Trigger::StartCapture, NotBusy, OpenDevice, Idle),
    row(Idle, Trigger::ImportFile, NotBusy, LoadImport, Idle),
    row(Idle, Trigger::CancelCapture, Busy, ReleaseToIdle, Idle),
    row(Idle, Trigger::DeviceReady, Always, AdoptStream, Capturing),
    row(Idle, Trigger::DeviceFailed, Always, ReportFailure, Idle),
    row(Idle, Trigger::ImageReady, Always, AdoptStill, Previewing),
    row(Idle, Trigger::ImageFailed, Always, ReportFailure, Idle),
    // ===== Capturing =====
    row(Capturing, Trigger::CancelCapture, Always, ReleaseToIdle, Idle),
    row(Capturing, Trigger::TakePhoto, NotBusy, Snapshot, Capturing),
    row(Capturing, Trigger::ImageReady, Always, AdoptStill, Previewing),
    row(Capturing, Trigger::ImageFailed, Always, ReportFailure, Capturing),
    // ===== Previewing =====
    row(Previewing, Trigger::Retry, NotBusy, OpenDevice, Previewing),
    row(Previewing, Trigger::FinalCancel, Always, ReleaseToIdle, Idle),
    row(Previewing, Trigger::Submit, NotBusy, HandOffUpload, PreviewingPending),
    row(Previewing, Trigger::DeviceReady, Always, AdoptStream, Capturing),
    row(Previewing, Trigger::DeviceFailed, Always, ReportFailure, Previewing),
    // ===== Previewing, upload pending =====
    row(PreviewingPending, Trigger::Retry, NotBusy, OpenDevice, PreviewingPending),
    row(PreviewingPending, Trigger::FinalCancel, Always, ReleaseToIdle, Idle),
    row(PreviewingPending, Trigger::DeviceReady, Always, AdoptStream, Capturing),
    row(PreviewingPending, Trigger::DeviceFailed, Always, ReportFailure, PreviewingPending),
    row(PreviewingPending, Trigger::UploadSucceeded, Always, CompleteUpload, Idle),
    row(PreviewingPending, Trigger::UploadFailed, Always, ReportUploadFailure, Previewing),
];

/// Row for `trigger` in `from`, if there is one and its guard holds
pub fn lookup(from: Phase, trigger: Trigger, busy: bool) -> Option<&'static Row> {
    TABLE
        .iter()
        .find(|r| r.from == from && r.trigger == trigger)
        .filter(|r| r.guard.holds(busy))
}
