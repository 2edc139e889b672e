// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! `update()` checks completions against the outstanding request, looks
//! the message up in the transition table and dispatches to the action
//! handlers in `handlers`. Messages without a row are ignored.

use super::Sequencer;
use super::state::{InFlightKind, Message, Ticket};
use super::task::Task;
use super::transitions::{self, Action};
use tracing::{debug, error, warn};

impl Sequencer<'_> {
    /// Apply one message to the flow
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let Some(message) = self.accept(message) else {
            return Task::none();
        };

        let from = self.stage.phase();
        let trigger = message.trigger();
        let Some(row) = transitions::lookup(from, trigger, self.is_busy()) else {
            debug!(?from, ?trigger, busy = self.is_busy(), "Ignoring trigger");
            release_payload(message);
            return Task::none();
        };

        debug!(?from, ?trigger, action = ?row.action, "Transition");
        let task = self.run_action(row.action, message);

        debug_assert_eq!(
            self.stage.phase(),
            row.to,
            "{:?} on {:?} ended in the wrong stage",
            row.action,
            trigger
        );
        task
    }

    /// Sort out stale completions
    ///
    /// A device open or still load is current only while its ticket is the
    /// in-flight one; an upload outcome only while its ticket is the pending
    /// upload of the current session. Stale payloads are released here.
    fn accept(&mut self, message: Message) -> Option<Message> {
        let current = match &message {
            Message::DeviceOpened { ticket, .. } => {
                self.take_in_flight(*ticket, InFlightKind::OpenDevice)
            }
            Message::StillReady { ticket, .. } => {
                self.take_in_flight(*ticket, InFlightKind::LoadStill)
            }
            Message::UploadFinished { ticket, .. } => self
                .stage
                .session()
                .is_some_and(|session| session.pending_upload == Some(*ticket)),
            _ => true,
        };

        if current {
            Some(message)
        } else {
            debug!(?message, "Dropping stale completion");
            release_payload(message);
            None
        }
    }

    fn take_in_flight(&mut self, ticket: Ticket, kind: InFlightKind) -> bool {
        match self.in_flight {
            Some(in_flight) if in_flight.ticket == ticket && in_flight.kind == kind => {
                self.in_flight = None;
                true
            }
            _ => false,
        }
    }

    fn run_action(&mut self, action: Action, message: Message) -> Task<Message> {
        match (action, message) {
            (Action::OpenDevice, _) => self.open_device(),
            (Action::AdoptStream, Message::DeviceOpened { result: Ok(stream), .. }) => {
                self.adopt_stream(stream);
                Task::none()
            }
            (Action::ReportFailure, Message::DeviceOpened { result: Err(e), .. }) => {
                self.report_open_failure(e);
                Task::none()
            }
            (Action::ReportFailure, Message::StillReady { result: Err(e), .. }) => {
                self.report(e.into());
                Task::none()
            }
            (Action::LoadImport, Message::ImportFile(path)) => self.load_import(path),
            (Action::AdoptStill, Message::StillReady { result: Ok(image), .. }) => {
                self.adopt_still(image);
                Task::none()
            }
            (Action::ReleaseToIdle, _) => {
                self.release_to_idle();
                Task::none()
            }
            (Action::Snapshot, _) => self.snapshot(),
            (Action::HandOffUpload, _) => self.hand_off_upload(),
            (Action::CompleteUpload, _) => self.complete_upload(),
            (Action::ReportUploadFailure, _) => {
                self.report_upload_failure();
                Task::none()
            }
            (action, message) => {
                error!(?action, ?message, "Table row does not fit its message");
                release_payload(message);
                Task::none()
            }
        }
    }
}

/// Free whatever a dropped message was carrying
fn release_payload(message: Message) {
    match message {
        Message::DeviceOpened {
            ticket,
            result: Ok(mut stream),
        } => {
            warn!(%ticket, device = stream.label(), "Stopping stream nobody waits for");
            stream.stop();
        }
        Message::StillReady {
            ticket,
            result: Ok(image),
        } => {
            debug!(%ticket, file = %image.file_name, "Discarding still nobody waits for");
        }
        _ => {}
    }
}
