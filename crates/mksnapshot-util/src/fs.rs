use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Read everything from `reader` until EOF.
///
/// `size_hint` is only used to size the buffer up front. Short reads and
/// `Interrupted` errors are retried; any other error aborts the read.
///
/// # Errors
/// Returns the first non-interrupted read error.
pub fn read_fully<R: Read>(reader: &mut R, size_hint: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(size_hint);
    let mut chunk = [0u8; 8192];

    loop {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }

    Ok(buf)
}

/// A write that stopped before every byte was accepted.
#[derive(Debug)]
pub struct PartialWrite {
    /// Bytes accepted by the writer before it failed.
    pub written: usize,
    /// Why the write stopped.
    pub source: io::Error,
}

/// Wraps a writer and counts the bytes it accepted.
///
/// Put it underneath any buffering so the count reflects what actually
/// reached the destination.
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    written: usize,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Bytes accepted by the inner writer so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Remove a file, treating "already gone" as success.
///
/// # Errors
/// Returns any error other than `NotFound`.
pub fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
