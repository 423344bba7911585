//! Tests for concurrent origin fetch

use std::sync::Arc;

use pictor_storage::{MemoryStore, StoredObject};

use crate::{fetch_first, probe_keys, EdgeError};

const BUCKET: &str = "assets-prod";

// =============================================================================
// Probe keys
// =============================================================================

#[test]
fn test_probe_keys_cover_both_cases() {
    let keys = probe_keys("/media/original/photo.webp");
    assert_eq!(
        keys,
        [
            "/media/original/photo.jpg",
            "/media/original/photo.jpeg",
            "/media/original/photo.png",
            "/media/original/photo.gif",
            "/media/original/photo.tiff",
            "/media/original/photo.JPG",
            "/media/original/photo.JPEG",
            "/media/original/photo.PNG",
            "/media/original/photo.GIF",
            "/media/original/photo.TIFF",
        ]
    );
}

#[test]
fn test_probe_keys_rewrite_first_webp_occurrence_only() {
    let keys = probe_keys("/media/original/clip.webp/poster.webp");
    assert_eq!(keys[0], "/media/original/clip.jpg/poster.webp");
}

// =============================================================================
// Winner selection
// =============================================================================

#[tokio::test]
async fn test_first_key_in_order_wins() {
    let store = Arc::new(MemoryStore::new());
    store.put(BUCKET, "/a.jpg", "jpg-bytes");
    store.put(BUCKET, "/a.png", "png-bytes");

    let object = fetch_first(
        store,
        BUCKET,
        vec!["/a.jpg".to_string(), "/a.png".to_string()],
    )
    .await
    .unwrap();
    assert_eq!(object.body, "jpg-bytes");
}

#[tokio::test]
async fn test_missing_early_keys_are_skipped() {
    let store = Arc::new(MemoryStore::new());
    store.put(BUCKET, "/a.png", "png-bytes");

    let object = fetch_first(
        store,
        BUCKET,
        vec![
            "/a.jpg".to_string(),
            "/a.jpeg".to_string(),
            "/a.png".to_string(),
        ],
    )
    .await
    .unwrap();
    assert_eq!(object.body, "png-bytes");
}

#[tokio::test]
async fn test_zero_length_object_loses_to_later_hit() {
    let store = Arc::new(MemoryStore::new());
    store.put_object(
        BUCKET,
        "/a.jpg",
        StoredObject {
            body: "placeholder".into(),
            content_length: 0,
        },
    );
    store.put(BUCKET, "/a.png", "png-bytes");

    let object = fetch_first(
        store,
        BUCKET,
        vec!["/a.jpg".to_string(), "/a.png".to_string()],
    )
    .await
    .unwrap();
    assert_eq!(object.body, "png-bytes");
}

#[tokio::test]
async fn test_all_zero_length_falls_back_to_first_hit() {
    let store = Arc::new(MemoryStore::new());
    store.put_object(
        BUCKET,
        "/a.png",
        StoredObject {
            body: "placeholder".into(),
            content_length: 0,
        },
    );

    let object = fetch_first(
        store,
        BUCKET,
        vec!["/a.jpg".to_string(), "/a.png".to_string()],
    )
    .await
    .unwrap();
    assert_eq!(object.content_length, 0);
}

#[tokio::test]
async fn test_all_missing_reports_first_candidate_key() {
    let store = Arc::new(MemoryStore::new());

    let err = fetch_first(
        store,
        BUCKET,
        vec!["/a.jpg".to_string(), "/a.png".to_string()],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, EdgeError::SourceNotFound { key } if key == "/a.jpg"));
}
