// SPDX-License-Identifier: GPL-3.0-only

//! Action handlers
//!
//! One method per action of the transition table, grouped by the stage
//! they serve:
//!
//! - `capture`: device open, live feed, snapshot and import
//! - `preview`: upload hand-off and its outcome

mod capture;
mod preview;

use super::Sequencer;
use super::notice::Notice;
use crate::errors::CaptureError;
use tracing::{error, warn};

impl Sequencer<'_> {
    /// End the session, if any, and show the idle view
    pub(crate) fn enter_idle(&mut self) {
        if let Some(session) = self.stage.take() {
            session.end();
        }
        self.view.enter_idle();
    }

    /// Queue a notice for a failed attempt; the stage stays as it is
    pub(crate) fn report(&mut self, err: CaptureError) {
        match &err {
            CaptureError::UploadFailed => warn!(state = %self.state(), "{}", err),
            _ => error!(state = %self.state(), "{}", err),
        }
        self.notices.push_back(Notice::from(&err));
    }
}
