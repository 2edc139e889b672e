// SPDX-License-Identifier: GPL-3.0-only

//! Sequencer state and messages

use super::session::CaptureSession;
use super::transitions::{Phase, Trigger};
use crate::backends::camera::OpenResult;
use crate::backends::upload::UploadOutcome;
use crate::errors::PhotoError;
use crate::pipelines::photo::EncodedImage;
use std::fmt;
use std::path::PathBuf;

/// The visible stage of the capture flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Capturing,
    /// A still is on screen; `pending_upload` while it is being uploaded
    Previewing { pending_upload: bool },
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Idle => write!(f, "idle"),
            ViewState::Capturing => write!(f, "capturing"),
            ViewState::Previewing {
                pending_upload: false,
            } => write!(f, "previewing"),
            ViewState::Previewing {
                pending_upload: true,
            } => write!(f, "previewing (upload pending)"),
        }
    }
}

/// Stage together with the resources it owns
///
/// The session only exists outside `Idle`, so a stream or still can never
/// outlive the flow that acquired it.
#[derive(Debug, Default)]
pub(crate) enum Stage {
    #[default]
    Idle,
    Capturing(CaptureSession),
    Previewing(CaptureSession),
}

impl Stage {
    pub(crate) fn phase(&self) -> Phase {
        match self {
            Stage::Idle => Phase::Idle,
            Stage::Capturing(_) => Phase::Capturing,
            Stage::Previewing(session) if session.pending_upload.is_some() => {
                Phase::PreviewingPending
            }
            Stage::Previewing(_) => Phase::Previewing,
        }
    }

    pub(crate) fn session(&self) -> Option<&CaptureSession> {
        match self {
            Stage::Idle => None,
            Stage::Capturing(session) | Stage::Previewing(session) => Some(session),
        }
    }

    pub(crate) fn session_mut(&mut self) -> Option<&mut CaptureSession> {
        match self {
            Stage::Idle => None,
            Stage::Capturing(session) | Stage::Previewing(session) => Some(session),
        }
    }

    /// Leave the stage, handing out the session it owned
    pub(crate) fn take(&mut self) -> Option<CaptureSession> {
        match std::mem::take(self) {
            Stage::Idle => None,
            Stage::Capturing(session) | Stage::Previewing(session) => Some(session),
        }
    }
}

/// Identifies one asynchronous request
///
/// Completions carry the ticket of the request that produced them. Only
/// the completion whose ticket matches the outstanding request is acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(pub(crate) u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of work the sequencer is waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InFlightKind {
    OpenDevice,
    LoadStill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InFlight {
    pub ticket: Ticket,
    pub kind: InFlightKind,
}

/// Input of the sequencer: user triggers and completions of its own tasks
pub enum Message {
    // ===== User triggers =====
    StartCapture,
    CancelCapture,
    TakePhoto,
    Retry,
    FinalCancel,
    Submit,
    /// Use an existing image file instead of the camera
    ImportFile(PathBuf),

    // ===== Completions =====
    DeviceOpened {
        ticket: Ticket,
        result: OpenResult,
    },
    StillReady {
        ticket: Ticket,
        result: Result<EncodedImage, PhotoError>,
    },
    UploadFinished {
        ticket: Ticket,
        outcome: UploadOutcome,
    },
}

impl Message {
    /// Row key in the transition table
    pub(crate) fn trigger(&self) -> Trigger {
        match self {
            Message::StartCapture => Trigger::StartCapture,
            Message::CancelCapture => Trigger::CancelCapture,
            Message::TakePhoto => Trigger::TakePhoto,
            Message::Retry => Trigger::Retry,
            Message::FinalCancel => Trigger::FinalCancel,
            Message::Submit => Trigger::Submit,
            Message::ImportFile(_) => Trigger::ImportFile,
            Message::DeviceOpened { result: Ok(_), .. } => Trigger::DeviceReady,
            Message::DeviceOpened { result: Err(_), .. } => Trigger::DeviceFailed,
            Message::StillReady { result: Ok(_), .. } => Trigger::ImageReady,
            Message::StillReady { result: Err(_), .. } => Trigger::ImageFailed,
            Message::UploadFinished {
                outcome: UploadOutcome::Success,
                ..
            } => Trigger::UploadSucceeded,
            Message::UploadFinished {
                outcome: UploadOutcome::Failure,
                ..
            } => Trigger::UploadFailed,
        }
    }

    /// Ticket of a completion, `None` for user triggers
    pub fn ticket(&self) -> Option<Ticket> {
        match self {
            Message::DeviceOpened { ticket, .. }
            | Message::StillReady { ticket, .. }
            | Message::UploadFinished { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::ImportFile(path) => f.debug_tuple("ImportFile").field(path).finish(),
            Message::DeviceOpened { ticket, result } => f
                .debug_struct("DeviceOpened")
                .field("ticket", ticket)
                .field(
                    "result",
                    &result.as_ref().map(|stream| stream.label().to_string()),
                )
                .finish(),
            Message::StillReady { ticket, result } => f
                .debug_struct("StillReady")
                .field("ticket", ticket)
                .field(
                    "result",
                    &result.as_ref().map(|image| image.file_name.as_str()),
                )
                .finish(),
            Message::UploadFinished { ticket, outcome } => f
                .debug_struct("UploadFinished")
                .field("ticket", ticket)
                .field("outcome", outcome)
                .finish(),
            other => write!(f, "{:?}", other.trigger()),
        }
    }
}
