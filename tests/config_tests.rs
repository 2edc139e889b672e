// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration module

use capture_flow::Config;
use capture_flow::config::{AfterUpload, Facing, PhotoOutputFormat, UploadTarget};

#[test]
fn test_config_default() {
    let config = Config::default();

    // The live feed comes back after an upload unless configured otherwise
    assert_eq!(config.after_upload, AfterUpload::LiveFeed);
    assert_eq!(config.facing, Facing::Environment);
    assert_eq!(config.photo_format, PhotoOutputFormat::Png);
    assert!(config.device_path.is_none());
    assert!(matches!(config.upload, UploadTarget::Directory { .. }));
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = Config {
        after_upload: AfterUpload::Idle,
        photo_format: PhotoOutputFormat::Jpeg,
        jpeg_quality: 80,
        upload: UploadTarget::Http {
            url: "http://localhost:8000/camera/upload".to_string(),
        },
        ..Config::default()
    };
    config.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), config);
    // No temporary file left behind
    assert_eq!(std::fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
}

#[test]
fn test_invalid_jpeg_quality_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"jpeg_quality": 0}"#).unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("jpeg_quality"));
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load_from(&path).is_err());
}
