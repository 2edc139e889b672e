// SPDX-License-Identifier: GPL-3.0-only

//! Capture handlers
//!
//! Device open, live feed, snapshot and the file import path.

use crate::app::Sequencer;
use crate::app::session::{CaptureSession, StillImage};
use crate::app::state::{InFlight, InFlightKind, Message, Stage};
use crate::app::task::Task;
use crate::backends::camera::{DeviceError, VideoStream};
use crate::pipelines::photo::{EncodedImage, PhotoCapture, import_file};
use std::path::PathBuf;
use tracing::{debug, info, warn};

impl Sequencer<'_> {
    /// Ask the provider for a stream; the stage moves on when it answers
    pub(crate) fn open_device(&mut self) -> Task<Message> {
        let ticket = self.issue_ticket();
        self.in_flight = Some(InFlight {
            ticket,
            kind: InFlightKind::OpenDevice,
        });

        // From a preview the still stays on screen until the stream is ready
        if matches!(self.stage, Stage::Idle) {
            self.view.enter_opening();
        }

        let request = self.settings.request.clone();
        info!(
            %ticket,
            facing = ?request.facing,
            device = ?request.device_path,
            "Opening video device"
        );

        Task::perform(self.backends.devices.open(request), move |result| {
            Message::DeviceOpened { ticket, result }
        })
    }

    /// The device could not be opened; the stage is left as it was
    pub(crate) fn report_open_failure(&mut self, err: DeviceError) {
        self.report(err.into());
        if matches!(self.stage, Stage::Idle) {
            self.view.enter_idle();
        }
    }

    /// Start a fresh session around `stream` and show the live feed
    ///
    /// A still held by the previous session is discarded along with it.
    pub(crate) fn adopt_stream(&mut self, stream: Box<dyn VideoStream>) {
        if let Some(previous) = self.stage.take() {
            if previous.pending_upload.is_some() {
                warn!(session = %previous.id, "Leaving preview with an upload still pending");
            }
            previous.end();
        }

        info!(device = stream.label(), "Live feed started");
        self.stage = Stage::Capturing(CaptureSession::with_stream(stream));
        self.view.enter_capturing();
    }

    /// Grab the current frame and encode it in the background
    ///
    /// The stream keeps running until the still is ready so a failed
    /// encoding leaves the live feed usable.
    pub(crate) fn snapshot(&mut self) -> Task<Message> {
        let grabbed = match &self.stage {
            Stage::Capturing(session) => match session.stream.as_deref() {
                Some(stream) => PhotoCapture::grab(stream),
                None => Err(crate::errors::PhotoError::NoFrameAvailable),
            },
            _ => return Task::none(),
        };

        let frame = match grabbed {
            Ok(frame) => frame,
            Err(e) => {
                self.report(e.into());
                return Task::none();
            }
        };

        let ticket = self.issue_ticket();
        self.in_flight = Some(InFlight {
            ticket,
            kind: InFlightKind::LoadStill,
        });
        debug!(
            %ticket,
            width = frame.width,
            height = frame.height,
            format = ?frame.format,
            "Encoding still"
        );

        Task::perform(self.backends.encoder.encode(frame), move |result| {
            Message::StillReady { ticket, result }
        })
    }

    /// Read an image file the user picked instead of taking a photo
    pub(crate) fn load_import(&mut self, path: PathBuf) -> Task<Message> {
        let ticket = self.issue_ticket();
        self.in_flight = Some(InFlight {
            ticket,
            kind: InFlightKind::LoadStill,
        });
        info!(%ticket, path = %path.display(), "Importing still");

        Task::perform(async move { import_file(&path).await }, move |result| {
            Message::StillReady { ticket, result }
        })
    }

    /// Keep `image` as the session's still, release the stream and preview it
    pub(crate) fn adopt_still(&mut self, image: EncodedImage) {
        let mut still = StillImage::new(image);
        let source = still.display_url(&self.backends.display).to_string();
        info!(
            file = %still.image().file_name,
            size = still.image().data.len(),
            "Still ready"
        );

        let session = match self.stage.take() {
            Some(mut session) => {
                session.release_stream();
                session.discard_still();
                session.still = Some(still);
                session
            }
            None => CaptureSession::with_still(still),
        };

        self.stage = Stage::Previewing(session);
        self.view.enter_previewing(&source);
    }

    /// Drop everything and go back to idle
    ///
    /// An outstanding open or encoding is abandoned, including an open
    /// started from idle; its completion will be stale and released on
    /// arrival. A handed-off upload cannot be
    /// cancelled and its outcome is ignored.
    pub(crate) fn release_to_idle(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            debug!(ticket = %in_flight.ticket, kind = ?in_flight.kind, "Abandoning request");
        }
        self.enter_idle();
        info!("Capture cancelled");
    }
}
