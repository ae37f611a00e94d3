use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for one snapshot run.
///
/// Threaded explicitly through [`run`](crate::run); nothing in the pipeline
/// reads process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Where to write the generated C++ source, if anywhere.
    pub startup_src: Option<PathBuf>,

    /// Where to write the raw binary blob, if anywhere.
    pub startup_blob: Option<PathBuf>,

    /// Script run against the heap before it is serialized.
    pub embed_script: Option<PathBuf>,

    /// Script run once against the serialized heap to warm it up.
    pub warmup_script: Option<PathBuf>,

    /// Ask the engine for reproducible output.
    pub predictable: bool,

    /// Extra engine flags, passed through verbatim.
    pub engine_flags: Vec<String>,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            startup_src: None,
            startup_blob: None,
            embed_script: None,
            warmup_script: None,
            predictable: true,
            engine_flags: Vec::new(),
        }
    }
}

impl SnapshotConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generated source output path.
    #[must_use]
    pub fn with_startup_src(mut self, path: impl Into<PathBuf>) -> Self {
        self.startup_src = Some(path.into());
        self
    }

    /// Set the raw binary output path.
    #[must_use]
    pub fn with_startup_blob(mut self, path: impl Into<PathBuf>) -> Self {
        self.startup_blob = Some(path.into());
        self
    }

    /// Set the embedding script.
    #[must_use]
    pub fn with_embed_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.embed_script = Some(path.into());
        self
    }

    /// Set the warm-up script.
    #[must_use]
    pub fn with_warmup_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.warmup_script = Some(path.into());
        self
    }

    /// Toggle predictable engine mode.
    #[must_use]
    pub fn with_predictable(mut self, predictable: bool) -> Self {
        self.predictable = predictable;
        self
    }

    /// Append extra engine flags.
    #[must_use]
    pub fn with_engine_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.engine_flags.extend(flags.into_iter().map(Into::into));
        self
    }

    /// All flags the engine should see, `--predictable` first when enabled.
    #[must_use]
    pub fn effective_engine_flags(&self) -> Vec<String> {
        let mut flags = Vec::with_capacity(self.engine_flags.len() + 1);
        if self.predictable {
            flags.push("--predictable".to_string());
        }
        flags.extend(self.engine_flags.iter().cloned());
        flags
    }

    /// True if at least one output file will be written.
    #[must_use]
    pub fn has_outputs(&self) -> bool {
        self.startup_src.is_some() || self.startup_blob.is_some()
    }

    pub(crate) fn embed_script_path(&self) -> Option<&Path> {
        self.embed_script.as_deref()
    }

    pub(crate) fn warmup_script_path(&self) -> Option<&Path> {
        self.warmup_script.as_deref()
    }
}
