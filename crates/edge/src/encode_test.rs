//! Tests for the adaptive encode loop

use bytes::Bytes;

use pictor_config::EncodeConfig;
use pictor_directive::parse_token;
use pictor_imaging::test_utils::RecordingEngine;
use pictor_imaging::{ImageFormat, ImageMetadata};
use pictor_pipeline::TransformChain;

use crate::{adaptive_encode, passthrough_heuristic, EdgeError, EncodeOutcome};

fn chain_of(tokens: &[&str], format: ImageFormat) -> TransformChain {
    TransformChain {
        directives: tokens
            .iter()
            .map(|t| parse_token(t, format).unwrap())
            .collect(),
        storage_key: "/media/original/photo.jpg".to_string(),
        namespace: "media".to_string(),
    }
}

fn meta(size: Option<u64>) -> ImageMetadata {
    ImageMetadata {
        width: 800,
        height: 600,
        size,
    }
}

// =============================================================================
// Heuristic
// =============================================================================

#[test]
fn test_passthrough_heuristic_requires_reported_size() {
    assert!(passthrough_heuristic(1024, Some(1024)));
    assert!(!passthrough_heuristic(1024, Some(1023)));
    assert!(!passthrough_heuristic(1024, None));
}

// =============================================================================
// Loop behaviour
// =============================================================================

#[tokio::test]
async fn test_fitting_encode_succeeds_first_attempt() {
    let engine = RecordingEngine::new();
    engine.push_script("small-output", meta(None));

    let outcome = adaptive_encode(
        &engine,
        &Bytes::from_static(b"source"),
        &chain_of(&["grey"], ImageFormat::Png),
        ImageFormat::Png,
        &EncodeConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(outcome, EncodeOutcome::Encoded("small-output".into()));
    assert_eq!(engine.applied_names(), ["greyscale"]);
}

#[tokio::test]
async fn test_source_sized_encode_passes_through() {
    let engine = RecordingEngine::new();
    engine.push_script("original", meta(Some("original".len() as u64)));

    let outcome = adaptive_encode(
        &engine,
        &Bytes::from_static(b"original"),
        &chain_of(&[], ImageFormat::Jpg),
        ImageFormat::Jpg,
        &EncodeConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(outcome, EncodeOutcome::Passthrough);
}

#[tokio::test]
async fn test_oversized_webp_retries_at_lower_quality() {
    let engine = RecordingEngine::new();
    engine.push_script("way-too-big-output", meta(None));
    engine.push_script("ok", meta(None));

    let limits = EncodeConfig {
        max_payload_bytes: 10,
        ..EncodeConfig::default()
    };
    let outcome = adaptive_encode(
        &engine,
        &Bytes::from_static(b"source"),
        &chain_of(&[], ImageFormat::Webp),
        ImageFormat::Webp,
        &limits,
    )
    .await
    .unwrap();

    assert_eq!(outcome, EncodeOutcome::Encoded("ok".into()));
    let qualities: Vec<_> = engine
        .open_options()
        .iter()
        .map(|o| o.webp_quality)
        .collect();
    assert_eq!(qualities, [Some(80), Some(70)]);
}

#[tokio::test]
async fn test_non_webp_target_opens_autorotated() {
    let engine = RecordingEngine::new();
    engine.push_script("ok", meta(None));

    adaptive_encode(
        &engine,
        &Bytes::from_static(b"source"),
        &chain_of(&[], ImageFormat::Jpg),
        ImageFormat::Jpg,
        &EncodeConfig::default(),
    )
    .await
    .unwrap();

    let opens = engine.open_options();
    assert_eq!(opens.len(), 1);
    assert_eq!(opens[0].webp_quality, None);
    assert!(opens[0].autorotate);
}

#[tokio::test]
async fn test_attempt_ceiling_exhausts() {
    let engine = RecordingEngine::new();
    engine.push_script("way-too-big-output", meta(None));
    engine.push_script("way-too-big-output", meta(None));

    let limits = EncodeConfig {
        max_payload_bytes: 10,
        max_attempts: 2,
        ..EncodeConfig::default()
    };
    let err = adaptive_encode(
        &engine,
        &Bytes::from_static(b"source"),
        &chain_of(&[], ImageFormat::Webp),
        ImageFormat::Webp,
        &limits,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, EdgeError::RetriesExhausted { attempts: 2 }));
    assert_eq!(engine.open_options().len(), 2);
}

#[tokio::test]
async fn test_quality_never_underflows() {
    let engine = RecordingEngine::new();
    for _ in 0..10 {
        engine.push_script("way-too-big-output", meta(None));
    }

    let limits = EncodeConfig {
        max_payload_bytes: 10,
        max_attempts: 10,
        ..EncodeConfig::default()
    };
    adaptive_encode(
        &engine,
        &Bytes::from_static(b"source"),
        &chain_of(&[], ImageFormat::Webp),
        ImageFormat::Webp,
        &limits,
    )
    .await
    .unwrap_err();

    let last = engine.open_options().last().unwrap().webp_quality;
    assert_eq!(last, Some(0));
}
