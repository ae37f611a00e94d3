#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::return_self_not_must_use)]

//! Snapshot acquisition-and-emission pipeline.
//!
//! Loads optional embedding and warm-up scripts, asks a [`SnapshotEngine`]
//! for a startup blob, and writes that blob out as a raw binary file and/or a
//! generated C++ source file.

pub mod blob;
pub mod codes;
pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod source;
pub mod writer;

pub use blob::StartupBlob;
pub use config::SnapshotConfig;
pub use engine::{SnapshotEngine, UnavailableEngine};
pub use error::{Error, Result};
pub use loader::{load_script, ScriptRole, ScriptSource};
pub use pipeline::{run, SnapshotReport};
pub use writer::{OutputFs, OutputKind, SnapshotWriter, StdFs, WrittenOutput};
