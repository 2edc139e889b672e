// SPDX-License-Identifier: GPL-3.0-only

//! Capture view sequencer
//!
//! Owns the linear capture flow (idle → capturing → previewing → idle).
//! The sequencer is synchronous: [`Sequencer::update`] applies one message
//! and returns a [`Task`] with the asynchronous work it started. Whoever
//! drives it runs the task and feeds the resulting messages back in.
//!
//! # Modules
//!
//! - `state`: stages, tickets and messages
//! - `transitions`: the transition table
//! - `update`: table lookup and stale completion handling
//! - `handlers`: the actions named in the table
//! - `session`: resources owned by a capture session
//! - `view`: the view model the sequencer writes to

mod handlers;
mod notice;
mod session;
mod state;
mod task;
pub mod transitions;
mod update;
mod view;

pub use notice::{Notice, NoticeKind};
pub use session::StillImage;
pub use state::{Message, Ticket, ViewState};
pub use task::Task;
pub use view::{Affordance, CameraStatus, ViewModel};

use crate::backends::Backends;
use crate::backends::camera::StreamRequest;
use crate::config::{AfterUpload, Config};
use state::{InFlight, Stage};
use std::collections::VecDeque;

/// The parts of the configuration the sequencer acts on
#[derive(Debug, Clone, Default)]
pub struct SequencerSettings {
    pub after_upload: AfterUpload,
    pub request: StreamRequest,
}

impl From<&Config> for SequencerSettings {
    fn from(config: &Config) -> Self {
        Self {
            after_upload: config.after_upload,
            request: StreamRequest {
                facing: config.facing,
                device_path: config.device_path.clone(),
            },
        }
    }
}

/// The capture flow state machine
///
/// The view model is lent for the sequencer's lifetime; the sequencer is
/// the only writer while it exists.
pub struct Sequencer<'v> {
    view: &'v mut ViewModel,
    backends: Backends,
    settings: SequencerSettings,
    stage: Stage,
    /// The one device open or still load being waited on
    in_flight: Option<InFlight>,
    notices: VecDeque<Notice>,
    next_ticket: u64,
}

impl<'v> Sequencer<'v> {
    pub fn new(view: &'v mut ViewModel, backends: Backends, settings: SequencerSettings) -> Self {
        view.enter_idle();
        Self {
            view,
            backends,
            settings,
            stage: Stage::Idle,
            in_flight: None,
            notices: VecDeque::new(),
            next_ticket: 1,
        }
    }

    pub fn state(&self) -> ViewState {
        match &self.stage {
            Stage::Idle => ViewState::Idle,
            Stage::Capturing(_) => ViewState::Capturing,
            Stage::Previewing(session) => ViewState::Previewing {
                pending_upload: session.pending_upload.is_some(),
            },
        }
    }

    pub fn view(&self) -> &ViewModel {
        &*self.view
    }

    pub fn settings(&self) -> &SequencerSettings {
        &self.settings
    }

    /// Whether a device open or still encoding is outstanding
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether an upload has been handed off and not yet answered
    pub fn is_upload_pending(&self) -> bool {
        self.stage
            .session()
            .is_some_and(|session| session.pending_upload.is_some())
    }

    /// Notices raised since the last call, oldest first
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub fn has_stream(&self) -> bool {
        self.stage
            .session()
            .is_some_and(|session| session.stream.is_some())
    }

    pub fn has_still(&self) -> bool {
        self.stage
            .session()
            .is_some_and(|session| session.still.is_some())
    }

    /// The still currently held, captured or imported
    pub fn still(&self) -> Option<&StillImage> {
        self.stage.session().and_then(|session| session.still.as_ref())
    }

    fn issue_ticket(&mut self) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }
}

impl Drop for Sequencer<'_> {
    fn drop(&mut self) {
        if let Some(session) = self.stage.take() {
            session.end();
        }
    }
}

impl std::fmt::Debug for Sequencer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequencer")
            .field("state", &self.state())
            .field("in_flight", &self.in_flight)
            .field("notices", &self.notices.len())
            .finish()
    }
}
