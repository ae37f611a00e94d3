//! The generated C++ rendering of a startup blob.
//!
//! The layout and symbol names are consumed by downstream build steps and by
//! the engine's own loader, so the output must stay byte-for-byte stable.

use std::io::{self, Write};

/// Name of the static byte array.
pub const DATA_SYMBOL: &str = "blob_data";
/// Name of the length constant.
pub const SIZE_SYMBOL: &str = "blob_size";
/// Name of the `StartupData` literal.
pub const BLOB_SYMBOL: &str = "blob";
/// Accessor returning the address of [`BLOB_SYMBOL`].
pub const ACCESSOR: &str = "Snapshot::DefaultSnapshotBlob";
/// Values per row in the data block.
pub const VALUES_PER_ROW: usize = 32;

const PREFIX: &str = "\
// Autogenerated snapshot file. Do not edit.

#include \"src/v8.h\"
#include \"src/base/platform/platform.h\"

#include \"src/snapshot/snapshot.h\"

namespace v8 {
namespace internal {

";

/// Stream the full source document for `bytes` into `out`.
pub fn write_source<W: Write>(out: &mut W, bytes: &[u8]) -> io::Result<()> {
    out.write_all(PREFIX.as_bytes())?;
    write_data(out, bytes)?;
    write_suffix(out)
}

/// Render the full source document for `bytes` as a string.
///
/// Holds the whole document in memory; [`SnapshotWriter`](crate::SnapshotWriter)
/// streams through [`write_source`] instead.
pub fn render_source(bytes: &[u8]) -> io::Result<String> {
    let mut out = Vec::with_capacity(PREFIX.len() + bytes.len() * 4 + 512);
    write_source(&mut out, bytes)?;
    String::from_utf8(out).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn write_data<W: Write>(out: &mut W, bytes: &[u8]) -> io::Result<()> {
    writeln!(out, "static const byte {DATA_SYMBOL}[] = {{")?;
    write_rows(out, bytes)?;
    writeln!(out, "}};")?;
    writeln!(out, "static const int {SIZE_SYMBOL} = {};", bytes.len())?;
    writeln!(out, "static const v8::StartupData {BLOB_SYMBOL} =")?;
    writeln!(out, "{{ (const char*) {DATA_SYMBOL}, {SIZE_SYMBOL} }};")
}

fn write_suffix<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "const v8::StartupData* {ACCESSOR}() {{")?;
    writeln!(out, "  return &{BLOB_SYMBOL};")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "}}  // namespace internal")?;
    writeln!(out, "}}  // namespace v8")
}

/// Comma separated decimal values, breaking the line after every
/// [`VALUES_PER_ROW`]th value that has a successor. Always ends with `\n`.
fn write_rows<W: Write>(out: &mut W, bytes: &[u8]) -> io::Result<()> {
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.write_all(b",")?;
            if i % VALUES_PER_ROW == 0 {
                out.write_all(b"\n")?;
            }
        }
        write!(out, "{byte}")?;
    }
    out.write_all(b"\n")
}
