//! Stable error codes for `--json` output.
//!
//! All codes are SCREAMING_SNAKE_CASE and stable across versions.

/// A script named on the command line could not be opened.
pub const SCRIPT_OPEN_FAILED: &str = "SCRIPT_OPEN_FAILED";

/// A script was opened but reading it failed part way.
pub const SCRIPT_READ_FAILED: &str = "SCRIPT_READ_FAILED";

/// An output file could not be created.
pub const OUTPUT_OPEN_FAILED: &str = "OUTPUT_OPEN_FAILED";

/// Writing the generated source file failed.
pub const OUTPUT_WRITE_FAILED: &str = "OUTPUT_WRITE_FAILED";

/// The binary snapshot file was only partially written.
pub const OUTPUT_TRUNCATED: &str = "OUTPUT_TRUNCATED";

/// The engine produced a zero-length blob.
pub const SNAPSHOT_EMPTY: &str = "SNAPSHOT_EMPTY";

/// The engine reported an error while creating or warming the blob.
pub const ENGINE_FAILED: &str = "ENGINE_FAILED";

/// The binary was built without a snapshot engine.
pub const ENGINE_UNAVAILABLE: &str = "ENGINE_UNAVAILABLE";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_codes_are_screaming_snake_case() {
        let codes = [
            SCRIPT_OPEN_FAILED,
            SCRIPT_READ_FAILED,
            OUTPUT_OPEN_FAILED,
            OUTPUT_WRITE_FAILED,
            OUTPUT_TRUNCATED,
            SNAPSHOT_EMPTY,
            ENGINE_FAILED,
            ENGINE_UNAVAILABLE,
        ];

        for code in codes {
            assert!(
                code.chars().all(|c| c.is_uppercase() || c == '_'),
                "Code '{code}' should be SCREAMING_SNAKE_CASE"
            );
        }
    }
}
