// SPDX-License-Identifier: GPL-3.0-only

//! Preview handlers: upload hand-off and outcome

use crate::app::Sequencer;
use crate::app::state::{Message, Stage};
use crate::app::task::Task;
use crate::config::AfterUpload;
use crate::errors::CaptureError;
use tracing::{debug, info};

impl Sequencer<'_> {
    /// Give the still to the upload mechanism without waiting for it
    pub(crate) fn hand_off_upload(&mut self) -> Task<Message> {
        let ticket = self.issue_ticket();
        let Stage::Previewing(session) = &mut self.stage else {
            return Task::none();
        };
        let Some(still) = session.still.as_ref() else {
            return Task::none();
        };

        let upload = still.upload();
        session.pending_upload = Some(ticket);
        self.view.set_upload_pending(true);
        info!(%ticket, file = %upload.file_name, size = upload.bytes.len(), "Upload handed off");

        Task::perform(self.backends.upload.submit(upload), move |outcome| {
            Message::UploadFinished { ticket, outcome }
        })
    }

    /// The upload was accepted: drop the still and carry on per configuration
    pub(crate) fn complete_upload(&mut self) -> Task<Message> {
        if let Some(session) = self.stage.session_mut() {
            session.pending_upload = None;
        }
        info!("Upload succeeded");
        self.enter_idle();

        match self.settings.after_upload {
            AfterUpload::LiveFeed if !self.is_busy() => self.open_device(),
            AfterUpload::LiveFeed => {
                debug!("Device already opening, not reopening after upload");
                Task::none()
            }
            AfterUpload::Idle => Task::none(),
        }
    }

    /// The upload was refused: keep the still so it can be submitted again
    pub(crate) fn report_upload_failure(&mut self) {
        if let Some(session) = self.stage.session_mut() {
            session.pending_upload = None;
        }
        self.view.set_upload_pending(false);
        self.report(CaptureError::UploadFailed);
    }
}
