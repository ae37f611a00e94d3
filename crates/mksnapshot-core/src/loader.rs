//! Loading the optional embedding and warm-up scripts.

use crate::error::{Error, Result};
use mksnapshot_util::fs::read_fully;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// What a loaded script is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptRole {
    /// Run against the heap before the base snapshot is taken.
    Embedding,
    /// Run against the base snapshot to produce a warmed one.
    WarmUp,
}

impl ScriptRole {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Embedding => "embedding",
            Self::WarmUp => "warm up",
        }
    }
}

impl fmt::Display for ScriptRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Script text read from disk, owned for the duration of one engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSource {
    path: PathBuf,
    role: ScriptRole,
    text: String,
}

impl ScriptSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, role: ScriptRole, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            role,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn role(&self) -> ScriptRole {
        self.role
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Name to report to the engine as the script origin.
    #[must_use]
    pub fn resource_name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Load a script for `role`.
///
/// An absent or empty path means "no script" and yields `Ok(None)`. Anything
/// else must be readable in full; invalid UTF-8 is replaced rather than
/// rejected.
pub fn load_script(path: Option<&Path>, role: ScriptRole) -> Result<Option<ScriptSource>> {
    let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(None);
    };

    tracing::info!("Loading script for {}: {}", role, path.display());

    let mut file = File::open(path).map_err(|source| Error::ScriptOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let size_hint = file
        .metadata()
        .map(|m| usize::try_from(m.len()).unwrap_or(0))
        .unwrap_or(0);

    let bytes = read_fully(&mut file, size_hint).map_err(|source| Error::ScriptRead {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(bytes = bytes.len(), role = role.as_str(), "script loaded");

    let text = String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());

    Ok(Some(ScriptSource::new(path, role, text)))
}
