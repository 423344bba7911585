//! Concurrent origin fetch
//!
//! Derived formats (webp) have no stored original of their own; the source
//! may exist under any of the probe extensions, in either case. All
//! candidate keys are fetched concurrently and the winner is picked by key
//! order, so the outcome is deterministic regardless of which fetch lands
//! first.

use std::sync::Arc;

use tracing::debug;

use pictor_imaging::ImageFormat;
use pictor_storage::{ObjectStore, StoredObject};

use crate::{EdgeError, Result};

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;

/// Source formats probed when the requested format is derived
pub const PROBE_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpg,
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::Tiff,
];

/// Candidate storage keys for a derived asset's source
///
/// The `.webp` suffix of the storage key is rewritten to each probe
/// extension, lowercase first, then the uppercase variants.
pub fn probe_keys(storage_key: &str) -> Vec<String> {
    let mut keys = Vec::with_capacity(PROBE_FORMATS.len() * 2);
    for format in PROBE_FORMATS {
        keys.push(storage_key.replacen(".webp", &format!(".{}", format.extension()), 1));
    }
    for format in PROBE_FORMATS {
        keys.push(storage_key.replacen(
            ".webp",
            &format!(".{}", format.extension().to_uppercase()),
            1,
        ));
    }
    keys
}

/// Fetch every candidate key concurrently and pick the winner
///
/// The winner is the first key, in `keys` order, whose object has a
/// non-zero reported length; if every hit is zero-length the first hit
/// wins anyway and the caller decides what an empty object means. Losing
/// fetches are never cancelled, they run to completion in the background.
///
/// # Errors
/// `EdgeError::SourceNotFound` when no key resolves to an object, carrying
/// the first candidate key. Backend faults on individual probes are treated
/// as misses so one flaky probe cannot sink the whole fan-out.
pub async fn fetch_first(
    store: Arc<dyn ObjectStore>,
    bucket: &str,
    keys: Vec<String>,
) -> Result<StoredObject> {
    let handles: Vec<_> = keys
        .iter()
        .map(|key| {
            let store = Arc::clone(&store);
            let bucket = bucket.to_string();
            let key = key.clone();
            tokio::spawn(async move { store.get(&bucket, &key).await })
        })
        .collect();

    let mut first_hit: Option<StoredObject> = None;
    let mut winner: Option<(usize, StoredObject)> = None;
    for (i, handle) in handles.into_iter().enumerate() {
        let Ok(Ok(object)) = handle.await else {
            continue;
        };
        if winner.is_none() && object.content_length > 0 {
            winner = Some((i, object));
        } else if first_hit.is_none() {
            first_hit = Some(object);
        }
    }

    match winner {
        Some((i, object)) => {
            debug!(bucket = bucket, key = keys[i].as_str(), "fan-out winner");
            Ok(object)
        }
        None => first_hit.ok_or_else(|| EdgeError::SourceNotFound {
            key: keys.first().cloned().unwrap_or_default(),
        }),
    }
}
