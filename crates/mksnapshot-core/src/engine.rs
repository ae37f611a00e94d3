//! The engine seam: whatever actually serializes a heap.

use crate::blob::StartupBlob;
use crate::error::{Error, Result};
use crate::loader::ScriptSource;

/// Produces startup blobs.
///
/// Implementations own whatever engine state they need (platform, isolate
/// factory). The pipeline calls [`create_base_snapshot`] once, optionally
/// [`warm_up`] once, and finally [`dispose`] after a successful run.
///
/// [`create_base_snapshot`]: SnapshotEngine::create_base_snapshot
/// [`warm_up`]: SnapshotEngine::warm_up
/// [`dispose`]: SnapshotEngine::dispose
pub trait SnapshotEngine {
    /// Serialize a fresh heap, after running `embed` against it if given.
    fn create_base_snapshot(&mut self, embed: Option<&ScriptSource>) -> Result<StartupBlob>;

    /// Produce a warmed blob from `cold` by running `warmup` once.
    ///
    /// `cold` is consumed; it must not outlive this call.
    fn warm_up(&mut self, cold: StartupBlob, warmup: &ScriptSource) -> Result<StartupBlob>;

    /// Tear down engine resources after a successful run.
    fn dispose(self)
    where
        Self: Sized,
    {
    }
}

/// Stand-in used when no engine was compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableEngine;

impl SnapshotEngine for UnavailableEngine {
    fn create_base_snapshot(&mut self, _embed: Option<&ScriptSource>) -> Result<StartupBlob> {
        Err(Error::EngineUnavailable)
    }

    fn warm_up(&mut self, _cold: StartupBlob, _warmup: &ScriptSource) -> Result<StartupBlob> {
        Err(Error::EngineUnavailable)
    }
}
