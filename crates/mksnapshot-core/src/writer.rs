//! Emitting a blob as a raw binary file and as generated C++ source.

use crate::blob::StartupBlob;
use crate::error::{Error, Result};
use crate::source::write_source;
use mksnapshot_util::fs::{remove_if_exists, CountingWriter, PartialWrite};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// File-system operations the writer needs.
///
/// [`StdFs`] is the real thing; tests substitute writers that fail part way.
pub trait OutputFs {
    /// Create or truncate `path` for writing.
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>>;

    /// Remove `path`. Missing files are not an error.
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// [`OutputFs`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFs;

impl OutputFs for StdFs {
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        Ok(Box::new(File::create(path)?))
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        remove_if_exists(path)
    }
}

/// Which encoding an output file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// Generated C++ source.
    Source,
    /// Raw binary blob.
    Blob,
}

/// One file the writer produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenOutput {
    pub kind: OutputKind,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Writes a blob to up to two destinations.
///
/// Each destination is optional and set independently; an unset destination
/// is skipped without touching the file system. A failed write never leaves
/// a partial file behind.
#[derive(Debug, Clone, Default)]
pub struct SnapshotWriter<F = StdFs> {
    source_path: Option<PathBuf>,
    blob_path: Option<PathBuf>,
    fs: F,
}

impl SnapshotWriter<StdFs> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: OutputFs> SnapshotWriter<F> {
    /// Swap the file-system backend.
    pub fn with_fs<G: OutputFs>(self, fs: G) -> SnapshotWriter<G> {
        SnapshotWriter {
            source_path: self.source_path,
            blob_path: self.blob_path,
            fs,
        }
    }

    /// Emit generated source to `path`.
    pub fn with_source_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// Emit the raw blob to `path`.
    pub fn with_blob_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.blob_path = Some(path.into());
        self
    }

    /// Write `blob` to every configured destination, source first.
    ///
    /// Stops at the first failure.
    pub fn write(&self, blob: &StartupBlob) -> Result<Vec<WrittenOutput>> {
        let mut written = Vec::with_capacity(2);

        if let Some(path) = &self.source_path {
            written.push(self.write_source_file(path, blob)?);
        }
        if let Some(path) = &self.blob_path {
            written.push(self.write_blob_file(path, blob)?);
        }

        Ok(written)
    }

    fn write_source_file(&self, path: &Path, blob: &StartupBlob) -> Result<WrittenOutput> {
        let bytes = self.write_file(
            path,
            |out| {
                let mut out = BufWriter::new(out);
                write_source(&mut out, blob.as_bytes())?;
                out.flush()
            },
            |partial| Error::OutputWrite {
                path: path.to_path_buf(),
                source: partial.source,
            },
        )?;

        tracing::debug!(path = %path.display(), bytes, "wrote snapshot source");
        Ok(WrittenOutput {
            kind: OutputKind::Source,
            path: path.to_path_buf(),
            bytes,
        })
    }

    fn write_blob_file(&self, path: &Path, blob: &StartupBlob) -> Result<WrittenOutput> {
        let expected = blob.len();
        let truncated = |written: usize| Error::Truncated {
            path: path.to_path_buf(),
            written,
            expected,
        };

        let bytes = self.write_file(
            path,
            |out| out.write_all(blob.as_bytes()),
            |partial| {
                tracing::debug!(error = %partial.source, "blob write stopped early");
                truncated(partial.written)
            },
        )?;

        if bytes != expected {
            self.discard(path);
            return Err(truncated(bytes));
        }

        tracing::debug!(path = %path.display(), bytes, "wrote snapshot blob");
        Ok(WrittenOutput {
            kind: OutputKind::Blob,
            path: path.to_path_buf(),
            bytes,
        })
    }

    /// Create `path` and let `emit` write into it, returning the number of
    /// bytes that reached the file. If `emit` or the final flush fails the
    /// file is removed and `on_partial` builds the error.
    fn write_file(
        &self,
        path: &Path,
        emit: impl FnOnce(&mut dyn Write) -> io::Result<()>,
        on_partial: impl FnOnce(PartialWrite) -> Error,
    ) -> Result<usize> {
        let out = self.fs.create(path).map_err(|source| Error::OutputOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let mut counted = CountingWriter::new(out);
        let result = emit(&mut counted).and_then(|()| counted.flush());
        let written = counted.written();
        // Close before any removal.
        drop(counted);

        match result {
            Ok(()) => Ok(written),
            Err(source) => {
                self.discard(path);
                Err(on_partial(PartialWrite { written, source }))
            }
        }
    }

    fn discard(&self, path: &Path) {
        tracing::error!("Writing snapshot file failed.. Aborting.");
        if let Err(e) = self.fs.remove(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove partial output");
        }
    }
}
