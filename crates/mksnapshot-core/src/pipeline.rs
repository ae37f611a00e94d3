//! The end-to-end run: scripts in, snapshot files out.

use crate::config::SnapshotConfig;
use crate::engine::SnapshotEngine;
use crate::error::{Error, Result};
use crate::loader::{load_script, ScriptRole};
use crate::writer::{OutputFs, SnapshotWriter, StdFs, WrittenOutput};
use mksnapshot_util::hash::blake3_bytes;
use serde::Serialize;

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotReport {
    /// Length of the final blob.
    pub bytes: usize,
    /// Whether an embedding script ran before serialization.
    pub embedded: bool,
    /// Whether the blob went through the warm-up pass.
    pub warmed: bool,
    /// Files written, in write order.
    pub outputs: Vec<WrittenOutput>,
    /// BLAKE3 digest of the final blob, hex encoded.
    pub blake3: String,
}

/// Run the whole pipeline against the real file system.
pub fn run<E: SnapshotEngine>(config: &SnapshotConfig, engine: E) -> Result<SnapshotReport> {
    run_with_fs(config, engine, StdFs)
}

/// Run the whole pipeline, writing outputs through `fs`.
///
/// Scripts are dropped as soon as the engine call using them returns, and the
/// cold blob is handed to the engine when a warm-up script is present. The
/// engine is disposed only when every requested output was written.
pub fn run_with_fs<E, F>(config: &SnapshotConfig, mut engine: E, fs: F) -> Result<SnapshotReport>
where
    E: SnapshotEngine,
    F: OutputFs,
{
    let writer = writer_for(config, fs);

    let embed = load_script(config.embed_script_path(), ScriptRole::Embedding)?;
    let embedded = embed.is_some();
    let mut blob = engine.create_base_snapshot(embed.as_ref())?;
    drop(embed);
    tracing::debug!(bytes = blob.len(), embedded, "created base snapshot");

    let warmup = load_script(config.warmup_script_path(), ScriptRole::WarmUp)?;
    let warmed = warmup.is_some();
    if let Some(script) = warmup {
        blob = engine.warm_up(blob, &script)?;
        tracing::debug!(bytes = blob.len(), "warmed snapshot");
    }

    if blob.is_empty() {
        return Err(Error::EmptySnapshot);
    }

    let outputs = writer.write(&blob)?;
    let report = SnapshotReport {
        bytes: blob.len(),
        embedded,
        warmed,
        outputs,
        blake3: blake3_bytes(blob.as_bytes()),
    };
    drop(blob);

    engine.dispose();

    tracing::info!(
        bytes = report.bytes,
        outputs = report.outputs.len(),
        "snapshot complete"
    );
    Ok(report)
}

fn writer_for<F: OutputFs>(config: &SnapshotConfig, fs: F) -> SnapshotWriter<F> {
    let mut writer = SnapshotWriter::new().with_fs(fs);
    if let Some(path) = &config.startup_src {
        writer = writer.with_source_file(path);
    }
    if let Some(path) = &config.startup_blob {
        writer = writer.with_blob_file(path);
    }
    writer
}
