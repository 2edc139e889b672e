// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for the capture flow
//!
//! This module provides command-line functionality for:
//! - Listing capture devices
//! - Taking and submitting one photo
//! - Driving a session interactively from stdin

use crate::{FormatArg, SourceArgs};
use capture_flow::app::{Message, Sequencer, SequencerSettings, ViewModel, ViewState};
use capture_flow::backends::Backends;
use capture_flow::backends::camera::{TestPatternProvider, V4l2Provider, VideoDeviceProvider, v4l2};
use capture_flow::config::{AfterUpload, Config, PhotoOutputFormat, UploadTarget};
use capture_flow::runtime::EventLoop;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// Size of the synthetic test pattern
const TEST_PATTERN_SIZE: (u32, u32) = (640, 480);

/// List all V4L2 capture devices
pub fn list_devices() -> Result<(), Box<dyn std::error::Error>> {
    let devices = v4l2::enumerate_devices();

    if devices.is_empty() {
        println!("No capture devices found.");
        return Ok(());
    }

    println!("Available capture devices:");
    println!();
    for device in &devices {
        println!("  [{}] {}", device.index, device.name);
        println!("      {}", device.path.display());
    }

    Ok(())
}

/// Open the camera, capture one still and submit it
pub fn take_photo(
    config_path: Option<PathBuf>,
    source: SourceArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path, &source)?;
    let backends = build_backends(&config, &source);
    let mut settings = SequencerSettings::from(&config);
    // One shot only, do not reopen the camera after the upload
    settings.after_upload = AfterUpload::Idle;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let mut view = ViewModel::new();
        let mut sequencer = Sequencer::new(&mut view, backends, settings);
        let mut events = EventLoop::new();

        events.dispatch(&mut sequencer, Message::StartCapture);
        events.settle(&mut sequencer).await;
        expect_state(&mut sequencer, ViewState::Capturing)?;
        println!("{}", sequencer.view().status().label());

        events.dispatch(&mut sequencer, Message::TakePhoto);
        events.settle(&mut sequencer).await;
        expect_state(
            &mut sequencer,
            ViewState::Previewing {
                pending_upload: false,
            },
        )?;
        if let Some(still) = sequencer.still() {
            let image = still.image();
            println!(
                "Captured {} ({}x{}, {} bytes)",
                image.file_name,
                image.width,
                image.height,
                image.data.len()
            );
        }

        events.dispatch(&mut sequencer, Message::Submit);
        events.settle(&mut sequencer).await;
        expect_state(&mut sequencer, ViewState::Idle)?;
        println!("Upload succeeded");

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

/// Run an interactive session reading one command per line from stdin
pub fn run_session(
    config_path: Option<PathBuf>,
    source: SourceArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path, &source)?;
    let backends = build_backends(&config, &source);
    let settings = SequencerSettings::from(&config);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let mut view = ViewModel::new();
        let mut sequencer = Sequencer::new(&mut view, backends, settings);
        let mut events = EventLoop::new();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        print_help();
        let mut last_revision = sequencer.view().revision();
        print_state(&sequencer);

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match parse_command(line.trim()) {
                        Ok(Command::Quit) => break,
                        Ok(Command::State) => print_state(&sequencer),
                        Ok(Command::Help) => print_help(),
                        Ok(Command::Send(message)) => events.dispatch(&mut sequencer, message),
                        Err(e) => println!("{}", e),
                    }
                }
                Some(message) = events.next(), if events.outstanding() > 0 => {
                    events.dispatch(&mut sequencer, message);
                }
            }

            for notice in sequencer.take_notices() {
                println!("! {}", notice);
            }
            if sequencer.view().revision() != last_revision {
                last_revision = sequencer.view().revision();
                print_state(&sequencer);
            }
        }

        info!("Session finished");
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

enum Command {
    Send(Message),
    State,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(word, rest)| (word, rest.trim()))
        .unwrap_or((line, ""));

    let command = match word {
        "start" => Command::Send(Message::StartCapture),
        "cancel" => Command::Send(Message::CancelCapture),
        "snap" => Command::Send(Message::TakePhoto),
        "retry" => Command::Send(Message::Retry),
        "discard" => Command::Send(Message::FinalCancel),
        "submit" => Command::Send(Message::Submit),
        "import" if rest.is_empty() => return Err("usage: import <path>".to_string()),
        "import" => Command::Send(Message::ImportFile(PathBuf::from(rest))),
        "state" => Command::State,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "" => Command::State,
        other => return Err(format!("Unknown command '{}', try 'help'", other)),
    };
    Ok(command)
}

fn print_help() {
    println!("Commands:");
    println!("  start          open the camera");
    println!("  cancel         close the camera");
    println!("  snap           take a photo");
    println!("  retry          discard the photo and reopen the camera");
    println!("  discard        discard the photo and go back to idle");
    println!("  submit         upload the photo");
    println!("  import <path>  use an existing PNG or JPEG instead");
    println!("  state          show the current state");
    println!("  quit");
}

fn print_state(sequencer: &Sequencer<'_>) {
    let view = sequencer.view();
    let shown: Vec<String> = view.shown().map(|a| format!("{:?}", a)).collect();
    println!(
        "[{}] {} | {}",
        sequencer.state(),
        view.status().label(),
        shown.join(", ")
    );
    if let Some(source) = view.preview_source() {
        println!("    preview: {}", source);
    }
}

/// Fail with the queued notices unless the flow reached `expected`
fn expect_state(
    sequencer: &mut Sequencer<'_>,
    expected: ViewState,
) -> Result<(), Box<dyn std::error::Error>> {
    let notices = sequencer.take_notices();
    if sequencer.state() == expected && notices.is_empty() {
        return Ok(());
    }
    let reason = notices
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    if reason.is_empty() {
        Err(format!("Expected {}, flow is {}", expected, sequencer.state()).into())
    } else {
        Err(reason.into())
    }
}

fn load_config(
    path: Option<PathBuf>,
    source: &SourceArgs,
) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };

    if let Some(device) = &source.device {
        config.device_path = Some(device.clone());
    }
    if let Some(dir) = &source.output {
        config.upload = UploadTarget::Directory { path: dir.clone() };
    }
    if let Some(url) = &source.url {
        config.upload = UploadTarget::Http { url: url.clone() };
    }
    if let Some(format) = source.format {
        config.photo_format = match format {
            FormatArg::Png => PhotoOutputFormat::Png,
            FormatArg::Jpeg => PhotoOutputFormat::Jpeg,
        };
    }

    debug!(?config, "Effective configuration");
    Ok(config)
}

fn build_backends(config: &Config, source: &SourceArgs) -> Backends {
    let devices: Arc<dyn VideoDeviceProvider> = if source.test_pattern {
        let (width, height) = TEST_PATTERN_SIZE;
        Arc::new(TestPatternProvider::new(width, height))
    } else {
        Arc::new(V4l2Provider::new(config.warmup_frames))
    };
    Backends::from_config(config, devices)
}
