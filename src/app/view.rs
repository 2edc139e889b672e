// SPDX-License-Identifier: GPL-3.0-only

//! View model of the capture flow
//!
//! One struct holds the visibility of every affordance, the status line
//! and the preview source. It is built once by the front end and lent to
//! the sequencer. Changes only go through `ensure_shown` / `ensure_hidden`
//! and the `enter_*` functions, which apply a state's complete affordance
//! set at once; entering the same state twice changes nothing.

use crate::constants::{STATUS_CAMERA_ACTIVE, STATUS_CAMERA_INACTIVE};

const AFFORDANCE_COUNT: usize = 8;

/// Every element the flow shows or hides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affordance {
    /// Placeholder shown while there is no photo
    IdleDisplay,
    /// The "open camera" button
    IdleControls,
    /// Container stacking the live feed / preview and the guide
    CaptureContainer,
    /// Framing guide over the live feed and preview
    GuidingRect,
    /// Live video element
    LiveFeed,
    /// Take photo / cancel
    LiveFeedControls,
    /// Still image preview
    PreviewImage,
    /// Submit / retry / cancel
    PreviewControls,
}

impl Affordance {
    pub const ALL: [Affordance; AFFORDANCE_COUNT] = [
        Affordance::IdleDisplay,
        Affordance::IdleControls,
        Affordance::CaptureContainer,
        Affordance::GuidingRect,
        Affordance::LiveFeed,
        Affordance::LiveFeedControls,
        Affordance::PreviewImage,
        Affordance::PreviewControls,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

const IDLE_LAYOUT: &[Affordance] = &[Affordance::IdleDisplay, Affordance::IdleControls];

/// Waiting for the device: the live feed area with its cancel control
const OPENING_LAYOUT: &[Affordance] = &[Affordance::CaptureContainer, Affordance::LiveFeedControls];

const CAPTURING_LAYOUT: &[Affordance] = &[
    Affordance::CaptureContainer,
    Affordance::GuidingRect,
    Affordance::LiveFeed,
    Affordance::LiveFeedControls,
];

const PREVIEWING_LAYOUT: &[Affordance] = &[
    Affordance::CaptureContainer,
    Affordance::GuidingRect,
    Affordance::PreviewImage,
    Affordance::PreviewControls,
];

/// Status line contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraStatus {
    Active,
    Inactive,
}

impl CameraStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CameraStatus::Active => STATUS_CAMERA_ACTIVE,
            CameraStatus::Inactive => STATUS_CAMERA_INACTIVE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    shown: [bool; AFFORDANCE_COUNT],
    status: CameraStatus,
    preview_source: Option<String>,
    upload_pending: bool,
    /// Bumped on every effective change, so renderers can skip redraws
    revision: u64,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewModel {
    /// A view in the idle layout
    pub fn new() -> Self {
        let mut shown = [false; AFFORDANCE_COUNT];
        for affordance in IDLE_LAYOUT {
            shown[affordance.index()] = true;
        }
        Self {
            shown,
            status: CameraStatus::Inactive,
            preview_source: None,
            upload_pending: false,
            revision: 0,
        }
    }

    pub fn is_shown(&self, affordance: Affordance) -> bool {
        self.shown[affordance.index()]
    }

    /// Visible affordances in declaration order
    pub fn shown(&self) -> impl Iterator<Item = Affordance> + '_ {
        Affordance::ALL
            .into_iter()
            .filter(|a| self.is_shown(*a))
    }

    pub fn status(&self) -> CameraStatus {
        self.status
    }

    /// Display reference of the still being previewed
    pub fn preview_source(&self) -> Option<&str> {
        self.preview_source.as_deref()
    }

    pub fn upload_pending(&self) -> bool {
        self.upload_pending
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Show `affordance`; returns whether anything changed
    pub fn ensure_shown(&mut self, affordance: Affordance) -> bool {
        self.set_shown(affordance, true)
    }

    /// Hide `affordance`; returns whether anything changed
    pub fn ensure_hidden(&mut self, affordance: Affordance) -> bool {
        self.set_shown(affordance, false)
    }

    fn set_shown(&mut self, affordance: Affordance, shown: bool) -> bool {
        let slot = &mut self.shown[affordance.index()];
        if *slot == shown {
            return false;
        }
        *slot = shown;
        self.revision += 1;
        true
    }

    fn set_status(&mut self, status: CameraStatus) {
        if self.status != status {
            self.status = status;
            self.revision += 1;
        }
    }

    fn set_preview_source(&mut self, source: Option<&str>) {
        if self.preview_source.as_deref() != source {
            self.preview_source = source.map(str::to_string);
            self.revision += 1;
        }
    }

    pub(crate) fn set_upload_pending(&mut self, pending: bool) {
        if self.upload_pending != pending {
            self.upload_pending = pending;
            self.revision += 1;
        }
    }

    fn apply_layout(&mut self, layout: &[Affordance]) {
        for affordance in Affordance::ALL {
            if layout.contains(&affordance) {
                self.ensure_shown(affordance);
            } else {
                self.ensure_hidden(affordance);
            }
        }
    }

    /// Idle: placeholder and open button only
    pub fn enter_idle(&mut self) {
        self.apply_layout(IDLE_LAYOUT);
        self.set_preview_source(None);
        self.set_upload_pending(false);
        self.set_status(CameraStatus::Inactive);
    }

    /// Device requested but not streaming yet: cancel is offered
    pub fn enter_opening(&mut self) {
        self.apply_layout(OPENING_LAYOUT);
        self.set_preview_source(None);
        self.set_upload_pending(false);
        self.set_status(CameraStatus::Inactive);
    }

    /// Capturing: live feed with its controls
    pub fn enter_capturing(&mut self) {
        self.apply_layout(CAPTURING_LAYOUT);
        self.set_preview_source(None);
        self.set_upload_pending(false);
        self.set_status(CameraStatus::Active);
    }

    /// Previewing: the still at `source` with submit / retry / cancel
    pub fn enter_previewing(&mut self, source: &str) {
        self.apply_layout(PREVIEWING_LAYOUT);
        self.set_preview_source(Some(source));
        self.set_status(CameraStatus::Inactive);
    }
}
