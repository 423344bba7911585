//! Test doubles for the imaging seam
//!
//! `RecordingEngine` stands in for a real codec in orchestration tests. It
//! records every open and every applied operation, and can be scripted with
//! per-open outputs so retry loops observe shrinking (or stubborn) encodes.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use crate::{ImageEngine, ImageMetadata, ImagePipeline, OpArgs, OpenOptions, Result};

/// One recorded `apply` call
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedOp {
    /// Operation name
    pub op: String,
    /// Arguments it was called with
    pub args: OpArgs,
}

/// Scripted result for one open/serialize cycle
#[derive(Debug, Clone)]
struct Script {
    output: Bytes,
    metadata: ImageMetadata,
}

/// Engine double that records calls and replays scripted outputs
///
/// Unscripted opens echo the source bytes back with empty metadata, which is
/// enough for pass-through style tests. Scripts are consumed in push order,
/// one per open.
#[derive(Default)]
pub struct RecordingEngine {
    scripts: Mutex<VecDeque<Script>>,
    applied: Arc<Mutex<Vec<AppliedOp>>>,
    opens: Arc<Mutex<Vec<OpenOptions>>>,
}

impl RecordingEngine {
    /// Create an engine with no scripts (echo mode)
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a scripted open: the next open/serialize cycle reports
    /// `metadata` and serializes to `output`
    pub fn push_script(&self, output: impl Into<Bytes>, metadata: ImageMetadata) {
        self.scripts.lock().unwrap().push_back(Script {
            output: output.into(),
            metadata,
        });
    }

    /// All operations applied across every handle, in call order
    pub fn applied(&self) -> Vec<AppliedOp> {
        self.applied.lock().unwrap().clone()
    }

    /// Names of all applied operations, in call order
    pub fn applied_names(&self) -> Vec<String> {
        self.applied().into_iter().map(|a| a.op).collect()
    }

    /// Options from every open, in call order
    pub fn open_options(&self) -> Vec<OpenOptions> {
        self.opens.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageEngine for RecordingEngine {
    async fn open(&self, source: &Bytes, opts: OpenOptions) -> Result<Box<dyn ImagePipeline>> {
        self.opens.lock().unwrap().push(opts);

        let script = self.scripts.lock().unwrap().pop_front().unwrap_or(Script {
            output: source.clone(),
            metadata: ImageMetadata::default(),
        });

        Ok(Box::new(RecordingPipeline {
            script,
            applied: Arc::clone(&self.applied),
        }))
    }
}

struct RecordingPipeline {
    script: Script,
    applied: Arc<Mutex<Vec<AppliedOp>>>,
}

#[async_trait]
impl ImagePipeline for RecordingPipeline {
    fn apply(&mut self, op: &str, args: &OpArgs) -> Result<()> {
        self.applied.lock().unwrap().push(AppliedOp {
            op: op.to_string(),
            args: args.clone(),
        });
        Ok(())
    }

    async fn metadata(&mut self) -> Result<ImageMetadata> {
        Ok(self.script.metadata)
    }

    async fn into_bytes(self: Box<Self>) -> Result<Bytes> {
        Ok(self.script.output)
    }
}
