// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the capture flow sequencer
//!
//! The device side is the synthetic test pattern, whose open/live counters
//! show whether streams are released. Display handles come from the object
//! URL registry, whose live count shows whether stills are released.

use capture_flow::app::{Affordance, CameraStatus, Message, NoticeKind, Sequencer, ViewModel};
use capture_flow::backends::Backends;
use capture_flow::backends::camera::{
    CameraFrame, DeviceError, DeviceErrorKind, OpenResult, StreamRequest, TestPatternProvider,
    VideoDeviceProvider,
};
use capture_flow::backends::display::ObjectUrlRegistry;
use capture_flow::backends::upload::{Upload, UploadMechanism, UploadOutcome};
use capture_flow::config::AfterUpload;
use capture_flow::errors::PhotoError;
use capture_flow::pipelines::photo::{EncodedImage, EncodingFormat, FrameEncoder, PhotoEncoder};
use capture_flow::runtime::EventLoop;
use capture_flow::{SequencerSettings, ViewState};
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

const PREVIEWING: ViewState = ViewState::Previewing {
    pending_upload: false,
};
const PENDING: ViewState = ViewState::Previewing {
    pending_upload: true,
};

/// Encoder counting how often it was asked to encode
struct CountingEncoder {
    inner: PhotoEncoder,
    calls: AtomicUsize,
}

impl FrameEncoder for CountingEncoder {
    fn encode(&self, frame: Arc<CameraFrame>) -> BoxFuture<'static, Result<EncodedImage, PhotoError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.encode(frame)
    }
}

/// Upload mechanism answering with a preset outcome
struct FakeUpload {
    outcome: Mutex<UploadOutcome>,
    received: Mutex<Vec<Upload>>,
}

impl FakeUpload {
    fn set_outcome(&self, outcome: UploadOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    fn count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

impl UploadMechanism for FakeUpload {
    fn submit(&self, upload: Upload) -> BoxFuture<'static, UploadOutcome> {
        self.received.lock().unwrap().push(upload);
        let outcome = *self.outcome.lock().unwrap();
        Box::pin(async move { outcome })
    }
}

/// Device provider whose opens hang until the gate gets a permit
struct GatedProvider {
    inner: TestPatternProvider,
    gate: Arc<Semaphore>,
    requests: Arc<AtomicUsize>,
}

impl VideoDeviceProvider for GatedProvider {
    fn open(&self, request: StreamRequest) -> BoxFuture<'static, OpenResult> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let open = self.inner.open(request);
        let gate = Arc::clone(&self.gate);
        Box::pin(async move {
            let _permit = gate.acquire_owned().await;
            open.await
        })
    }
}

struct Fixture {
    devices: TestPatternProvider,
    registry: Arc<ObjectUrlRegistry>,
    encoder: Arc<CountingEncoder>,
    upload: Arc<FakeUpload>,
}

impl Fixture {
    fn new() -> Self {
        Self::with_devices(TestPatternProvider::new(32, 16))
    }

    fn with_devices(devices: TestPatternProvider) -> Self {
        Self {
            devices,
            registry: Arc::new(ObjectUrlRegistry::new()),
            encoder: Arc::new(CountingEncoder {
                inner: PhotoEncoder::new(EncodingFormat::Png),
                calls: AtomicUsize::new(0),
            }),
            upload: Arc::new(FakeUpload {
                outcome: Mutex::new(UploadOutcome::Success),
                received: Mutex::new(Vec::new()),
            }),
        }
    }

    fn backends(&self) -> Backends {
        Backends {
            devices: Arc::new(self.devices.clone()),
            encoder: self.encoder.clone(),
            display: self.registry.clone(),
            upload: self.upload.clone(),
        }
    }

    fn settings(after_upload: AfterUpload) -> SequencerSettings {
        SequencerSettings {
            after_upload,
            ..Default::default()
        }
    }

    fn encodes(&self) -> usize {
        self.encoder.calls.load(Ordering::SeqCst)
    }
}

/// Dispatch `message` and run everything it started
async fn step(events: &mut EventLoop, sequencer: &mut Sequencer<'_>, message: Message) {
    events.dispatch(sequencer, message);
    events.settle(sequencer).await;
}

/// Resources held must match the state
fn assert_consistent(fixture: &Fixture, sequencer: &Sequencer<'_>) {
    let view = sequencer.view();
    assert!(
        !(view.is_shown(Affordance::LiveFeed) && view.is_shown(Affordance::PreviewImage)),
        "live feed and preview shown together"
    );

    match sequencer.state() {
        ViewState::Idle => {
            assert!(!sequencer.has_stream());
            assert!(!sequencer.has_still());
            assert_eq!(fixture.registry.live_count(), 0);
            assert!(view.is_shown(Affordance::IdleControls));
        }
        ViewState::Capturing => {
            assert!(sequencer.has_stream());
            assert!(!sequencer.has_still());
            assert_eq!(fixture.registry.live_count(), 0);
            assert!(view.is_shown(Affordance::LiveFeed));
            assert_eq!(view.status(), CameraStatus::Active);
        }
        ViewState::Previewing { pending_upload } => {
            assert!(!sequencer.has_stream());
            assert!(sequencer.has_still());
            assert_eq!(fixture.registry.live_count(), 1);
            assert!(view.is_shown(Affordance::PreviewImage));
            assert_eq!(view.upload_pending(), pending_upload);
        }
    }

    // Every stream the provider handed out is either held or stopped
    let held = usize::from(sequencer.has_stream());
    assert!(fixture.devices.live() <= held + usize::from(sequencer.is_busy()));
}

#[tokio::test]
async fn test_start_then_cancel_leaves_nothing_open() {
    let fixture = Fixture::new();
    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(&mut view, fixture.backends(), Default::default());
    let mut events = EventLoop::new();

    step(&mut events, &mut sequencer, Message::StartCapture).await;
    assert_eq!(sequencer.state(), ViewState::Capturing);
    assert_eq!(fixture.devices.live(), 1);
    assert!(!sequencer.view().is_shown(Affordance::IdleDisplay));

    step(&mut events, &mut sequencer, Message::CancelCapture).await;
    assert_eq!(sequencer.state(), ViewState::Idle);
    assert_eq!(fixture.devices.live(), 0);
    assert_eq!(fixture.registry.live_count(), 0);
    assert_eq!(sequencer.view().status(), CameraStatus::Inactive);
    assert_consistent(&fixture, &sequencer);
}

#[tokio::test]
async fn test_capture_releases_device_and_allocates_one_still() {
    let fixture = Fixture::new();
    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(&mut view, fixture.backends(), Default::default());
    let mut events = EventLoop::new();

    step(&mut events, &mut sequencer, Message::StartCapture).await;
    step(&mut events, &mut sequencer, Message::TakePhoto).await;

    assert_eq!(sequencer.state(), PREVIEWING);
    assert_eq!(fixture.devices.live(), 0);
    assert_eq!(fixture.registry.live_count(), 1);

    let source = sequencer.view().preview_source().unwrap().to_string();
    let (bytes, mime) = fixture.registry.resolve(&source).unwrap();
    assert_eq!(mime, "image/png");
    assert_eq!(&bytes[..], &sequencer.still().unwrap().image().data[..]);
    assert_consistent(&fixture, &sequencer);
}

#[tokio::test]
async fn test_retry_releases_still_and_opens_one_device() {
    let fixture = Fixture::new();
    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(&mut view, fixture.backends(), Default::default());
    let mut events = EventLoop::new();

    step(&mut events, &mut sequencer, Message::StartCapture).await;
    step(&mut events, &mut sequencer, Message::TakePhoto).await;
    assert_eq!(fixture.devices.opened(), 1);

    step(&mut events, &mut sequencer, Message::Retry).await;
    assert_eq!(sequencer.state(), ViewState::Capturing);
    assert_eq!(fixture.registry.live_count(), 0);
    assert_eq!(fixture.devices.opened(), 2);
    assert_eq!(fixture.devices.live(), 1);
    assert_eq!(sequencer.view().preview_source(), None);
    assert_consistent(&fixture, &sequencer);
}

#[tokio::test]
async fn test_final_cancel_discards_still() {
    let fixture = Fixture::new();
    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(&mut view, fixture.backends(), Default::default());
    let mut events = EventLoop::new();

    step(&mut events, &mut sequencer, Message::StartCapture).await;
    step(&mut events, &mut sequencer, Message::TakePhoto).await;
    step(&mut events, &mut sequencer, Message::FinalCancel).await;

    assert_eq!(sequencer.state(), ViewState::Idle);
    assert_eq!(fixture.registry.live_count(), 0);
    assert_eq!(fixture.upload.count(), 0);
    assert_consistent(&fixture, &sequencer);
}

#[tokio::test]
async fn test_upload_success_returns_to_idle() {
    let fixture = Fixture::new();
    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(
        &mut view,
        fixture.backends(),
        Fixture::settings(AfterUpload::Idle),
    );
    let mut events = EventLoop::new();

    step(&mut events, &mut sequencer, Message::StartCapture).await;
    step(&mut events, &mut sequencer, Message::TakePhoto).await;

    events.dispatch(&mut sequencer, Message::Submit);
    assert_eq!(sequencer.state(), PENDING);
    assert!(sequencer.view().upload_pending());
    events.settle(&mut sequencer).await;

    assert_eq!(sequencer.state(), ViewState::Idle);
    assert_eq!(fixture.registry.live_count(), 0);
    assert_eq!(fixture.devices.live(), 0);
    assert_eq!(fixture.upload.count(), 1);
    assert!(sequencer.take_notices().is_empty());
    assert_consistent(&fixture, &sequencer);

    let uploaded = &fixture.upload.received.lock().unwrap()[0];
    assert!(uploaded.file_name.starts_with("img-"));
    assert!(uploaded.file_name.ends_with(".png"));
}

#[tokio::test]
async fn test_upload_success_reopens_live_feed() {
    let fixture = Fixture::new();
    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(
        &mut view,
        fixture.backends(),
        Fixture::settings(AfterUpload::LiveFeed),
    );
    let mut events = EventLoop::new();

    step(&mut events, &mut sequencer, Message::StartCapture).await;
    step(&mut events, &mut sequencer, Message::TakePhoto).await;
    step(&mut events, &mut sequencer, Message::Submit).await;

    assert_eq!(sequencer.state(), ViewState::Capturing);
    assert_eq!(fixture.registry.live_count(), 0);
    assert_eq!(fixture.devices.opened(), 2);
    assert_eq!(fixture.devices.live(), 1);
    assert_consistent(&fixture, &sequencer);
}

#[tokio::test]
async fn test_upload_failure_keeps_still_for_resubmit() {
    let fixture = Fixture::new();
    fixture.upload.set_outcome(UploadOutcome::Failure);
    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(
        &mut view,
        fixture.backends(),
        Fixture::settings(AfterUpload::Idle),
    );
    let mut events = EventLoop::new();

    step(&mut events, &mut sequencer, Message::StartCapture).await;
    step(&mut events, &mut sequencer, Message::TakePhoto).await;
    step(&mut events, &mut sequencer, Message::Submit).await;

    assert_eq!(sequencer.state(), PREVIEWING);
    assert_eq!(fixture.registry.live_count(), 1);
    let notices = sequencer.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::UploadFailed);
    assert_consistent(&fixture, &sequencer);

    fixture.upload.set_outcome(UploadOutcome::Success);
    step(&mut events, &mut sequencer, Message::Submit).await;
    assert_eq!(sequencer.state(), ViewState::Idle);
    assert_eq!(fixture.upload.count(), 2);
    assert_eq!(fixture.registry.live_count(), 0);
}

#[tokio::test]
async fn test_late_upload_outcome_after_cancel_is_ignored() {
    let fixture = Fixture::new();
    fixture.upload.set_outcome(UploadOutcome::Failure);
    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(&mut view, fixture.backends(), Default::default());
    let mut events = EventLoop::new();

    step(&mut events, &mut sequencer, Message::StartCapture).await;
    step(&mut events, &mut sequencer, Message::TakePhoto).await;

    events.dispatch(&mut sequencer, Message::Submit);
    events.dispatch(&mut sequencer, Message::FinalCancel);
    events.settle(&mut sequencer).await;

    assert_eq!(sequencer.state(), ViewState::Idle);
    assert!(sequencer.take_notices().is_empty());
    assert_eq!(fixture.devices.opened(), 1);
    assert_consistent(&fixture, &sequencer);
}

#[tokio::test]
async fn test_duplicate_triggers_while_pending_have_no_effect() {
    let fixture = Fixture::new();
    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(
        &mut view,
        fixture.backends(),
        Fixture::settings(AfterUpload::Idle),
    );
    let mut events = EventLoop::new();

    events.dispatch(&mut sequencer, Message::StartCapture);
    let revision = sequencer.view().revision();
    events.dispatch(&mut sequencer, Message::StartCapture);
    assert_eq!(sequencer.view().revision(), revision);
    events.settle(&mut sequencer).await;
    assert_eq!(fixture.devices.opened(), 1);

    events.dispatch(&mut sequencer, Message::TakePhoto);
    events.dispatch(&mut sequencer, Message::TakePhoto);
    events.settle(&mut sequencer).await;
    assert_eq!(fixture.encodes(), 1);
    assert_eq!(fixture.registry.live_count(), 1);

    events.dispatch(&mut sequencer, Message::Submit);
    events.dispatch(&mut sequencer, Message::Submit);
    events.settle(&mut sequencer).await;
    assert_eq!(fixture.upload.count(), 1);
    assert_consistent(&fixture, &sequencer);
}

#[tokio::test]
async fn test_device_failure_in_idle_gives_one_notice() {
    let fixture = Fixture::new();
    fixture.devices.set_failure(Some(DeviceError::new(
        DeviceErrorKind::PermissionDenied,
        "access refused",
    )));
    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(&mut view, fixture.backends(), Default::default());
    let mut events = EventLoop::new();

    step(&mut events, &mut sequencer, Message::StartCapture).await;

    assert_eq!(sequencer.state(), ViewState::Idle);
    assert!(!sequencer.is_busy());
    let notices = sequencer.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::DeviceUnavailable);
    assert_consistent(&fixture, &sequencer);

    // The user may try again once the device is available
    fixture.devices.set_failure(None);
    step(&mut events, &mut sequencer, Message::StartCapture).await;
    assert_eq!(sequencer.state(), ViewState::Capturing);
}

#[tokio::test]
async fn test_retry_failure_keeps_preview() {
    let fixture = Fixture::new();
    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(&mut view, fixture.backends(), Default::default());
    let mut events = EventLoop::new();

    step(&mut events, &mut sequencer, Message::StartCapture).await;
    step(&mut events, &mut sequencer, Message::TakePhoto).await;

    fixture
        .devices
        .set_failure(Some(DeviceError::new(DeviceErrorKind::Busy, "in use")));
    step(&mut events, &mut sequencer, Message::Retry).await;

    assert_eq!(sequencer.state(), PREVIEWING);
    assert_eq!(sequencer.take_notices().len(), 1);
    assert_consistent(&fixture, &sequencer);
}

#[tokio::test]
async fn test_snapshot_without_frame_stays_capturing() {
    let fixture = Fixture::with_devices(TestPatternProvider::new(32, 16).blank());
    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(&mut view, fixture.backends(), Default::default());
    let mut events = EventLoop::new();

    step(&mut events, &mut sequencer, Message::StartCapture).await;
    step(&mut events, &mut sequencer, Message::TakePhoto).await;

    assert_eq!(sequencer.state(), ViewState::Capturing);
    assert_eq!(fixture.devices.live(), 1);
    assert_eq!(fixture.encodes(), 0);
    let notices = sequencer.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::EncodingFailed);
    assert_consistent(&fixture, &sequencer);
}

#[tokio::test]
async fn test_cancel_while_encoding_drops_late_still() {
    let fixture = Fixture::new();
    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(&mut view, fixture.backends(), Default::default());
    let mut events = EventLoop::new();

    step(&mut events, &mut sequencer, Message::StartCapture).await;
    events.dispatch(&mut sequencer, Message::TakePhoto);
    events.dispatch(&mut sequencer, Message::CancelCapture);
    events.settle(&mut sequencer).await;

    assert_eq!(sequencer.state(), ViewState::Idle);
    assert_eq!(fixture.encodes(), 1);
    assert_eq!(fixture.registry.live_count(), 0);
    assert_eq!(fixture.devices.live(), 0);
    assert_consistent(&fixture, &sequencer);
}

#[tokio::test]
async fn test_cancel_while_reopening_stops_late_stream() {
    let fixture = Fixture::new();
    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(&mut view, fixture.backends(), Default::default());
    let mut events = EventLoop::new();

    step(&mut events, &mut sequencer, Message::StartCapture).await;
    step(&mut events, &mut sequencer, Message::TakePhoto).await;
    events.dispatch(&mut sequencer, Message::Retry);
    events.dispatch(&mut sequencer, Message::FinalCancel);
    events.settle(&mut sequencer).await;

    assert_eq!(sequencer.state(), ViewState::Idle);
    assert_eq!(fixture.devices.opened(), 2);
    assert_eq!(fixture.devices.live(), 0);
    assert_consistent(&fixture, &sequencer);
}

#[tokio::test]
async fn test_cancel_while_device_opens_unblocks_flow() {
    let fixture = Fixture::new();
    let gate = Arc::new(Semaphore::new(0));
    let requests = Arc::new(AtomicUsize::new(0));
    let mut backends = fixture.backends();
    backends.devices = Arc::new(GatedProvider {
        inner: fixture.devices.clone(),
        gate: Arc::clone(&gate),
        requests: Arc::clone(&requests),
    });

    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(&mut view, backends, Default::default());
    let mut events = EventLoop::new();

    events.dispatch(&mut sequencer, Message::StartCapture);
    assert_eq!(sequencer.state(), ViewState::Idle);
    assert!(sequencer.is_busy());
    assert!(sequencer.view().is_shown(Affordance::LiveFeedControls));
    assert!(!sequencer.view().is_shown(Affordance::IdleControls));
    assert!(!sequencer.view().is_shown(Affordance::LiveFeed));

    // Nothing to photograph yet
    events.dispatch(&mut sequencer, Message::TakePhoto);
    assert_eq!(fixture.encodes(), 0);

    events.dispatch(&mut sequencer, Message::CancelCapture);
    assert_eq!(sequencer.state(), ViewState::Idle);
    assert!(!sequencer.is_busy());
    assert!(sequencer.view().is_shown(Affordance::IdleControls));
    assert!(!sequencer.view().is_shown(Affordance::LiveFeedControls));

    // The flow takes new requests while the abandoned open still hangs
    events.dispatch(&mut sequencer, Message::StartCapture);
    assert_eq!(requests.load(Ordering::SeqCst), 2);
    events.dispatch(&mut sequencer, Message::CancelCapture);
    assert!(!sequencer.is_busy());

    // Streams that show up late are stopped on arrival
    gate.add_permits(1);
    events.settle(&mut sequencer).await;
    assert_eq!(sequencer.state(), ViewState::Idle);
    assert_eq!(fixture.devices.opened(), 2);
    assert_eq!(fixture.devices.live(), 0);
    assert!(sequencer.take_notices().is_empty());
    assert_consistent(&fixture, &sequencer);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("receipt.png");
    image::RgbImage::new(4, 3).save(&path).unwrap();
    step(&mut events, &mut sequencer, Message::ImportFile(path)).await;
    assert_eq!(sequencer.state(), PREVIEWING);
    assert_consistent(&fixture, &sequencer);
}

#[tokio::test]
async fn test_imported_file_is_previewed() {
    let fixture = Fixture::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("receipt.png");
    image::RgbImage::new(4, 3).save(&path).unwrap();

    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(&mut view, fixture.backends(), Default::default());
    let mut events = EventLoop::new();

    step(&mut events, &mut sequencer, Message::ImportFile(path)).await;
    assert_eq!(sequencer.state(), PREVIEWING);
    assert_eq!(fixture.devices.opened(), 0);
    let image = sequencer.still().unwrap().image();
    assert_eq!((image.width, image.height), (4, 3));
    assert_consistent(&fixture, &sequencer);

    // Retry from an imported still goes to the live feed
    step(&mut events, &mut sequencer, Message::Retry).await;
    assert_eq!(sequencer.state(), ViewState::Capturing);
    assert_consistent(&fixture, &sequencer);
}

#[tokio::test]
async fn test_import_of_non_image_reports() {
    let fixture = Fixture::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "not a picture").unwrap();

    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(&mut view, fixture.backends(), Default::default());
    let mut events = EventLoop::new();

    step(&mut events, &mut sequencer, Message::ImportFile(path)).await;
    assert_eq!(sequencer.state(), ViewState::Idle);
    let notices = sequencer.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::EncodingFailed);
}

#[tokio::test]
async fn test_triggers_out_of_place_are_ignored() {
    let fixture = Fixture::new();
    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(&mut view, fixture.backends(), Default::default());
    let mut events = EventLoop::new();

    for message in [
        Message::CancelCapture,
        Message::TakePhoto,
        Message::Retry,
        Message::FinalCancel,
        Message::Submit,
    ] {
        step(&mut events, &mut sequencer, message).await;
        assert_eq!(sequencer.state(), ViewState::Idle);
    }
    assert_eq!(sequencer.view().revision(), 0);
    assert_eq!(fixture.devices.opened(), 0);
    assert!(sequencer.take_notices().is_empty());
}

#[tokio::test]
async fn test_any_trigger_sequence_stays_consistent() {
    let fixture = Fixture::new();
    let mut view = ViewModel::new();
    let mut sequencer = Sequencer::new(
        &mut view,
        fixture.backends(),
        Fixture::settings(AfterUpload::LiveFeed),
    );
    let mut events = EventLoop::new();

    // Deterministic pseudo-random walk over the user triggers
    let mut seed: u32 = 0x2545_f491;
    for round in 0..200 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let message = match (seed >> 16) % 6 {
            0 => Message::StartCapture,
            1 => Message::CancelCapture,
            2 => Message::TakePhoto,
            3 => Message::Retry,
            4 => Message::FinalCancel,
            _ => Message::Submit,
        };
        if round % 7 == 3 {
            fixture.upload.set_outcome(UploadOutcome::Failure);
        } else {
            fixture.upload.set_outcome(UploadOutcome::Success);
        }

        step(&mut events, &mut sequencer, message).await;
        assert!(!sequencer.is_busy());
        assert_consistent(&fixture, &sequencer);
        assert_eq!(
            fixture.devices.live(),
            usize::from(sequencer.state() == ViewState::Capturing)
        );
    }
}
