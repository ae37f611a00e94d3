//! Integration tests for the `mksnapshot` binary.
//!
//! These tests verify:
//! - help exits 0 and lists every option
//! - usage errors print the usage line and the option listing, exit non-zero
//! - a missing script is fatal and named in the diagnostic
//! - `--json` output is valid JSON with a stable error code

use std::process::Command;
use tempfile::tempdir;

fn mksnapshot() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mksnapshot"))
}

#[test]
fn test_help_exits_zero_with_option_listing() {
    let output = mksnapshot()
        .arg("--help")
        .output()
        .expect("Failed to run mksnapshot");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--startup-src"));
    assert!(stdout.contains("--startup-blob"));
}

#[test]
fn test_too_many_positionals_is_usage_error() {
    let output = mksnapshot()
        .args(["a.js", "b.js", "c.js"])
        .output()
        .expect("Failed to run mksnapshot");

    assert!(!output.status.success());
    assert_ne!(output.status.code(), Some(0));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage: mksnapshot --startup-src=... --startup-blob=... [extras]"));
    assert!(stderr.contains("--v8-flags"), "full option listing expected:\n{stderr}");
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let output = mksnapshot()
        .arg("--startup-blobb=out.bin")
        .output()
        .expect("Failed to run mksnapshot");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_embed_script_is_fatal() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing-embed.js");
    let out = dir.path().join("out.bin");

    let output = mksnapshot()
        .arg(&missing)
        .arg(format!("--startup-blob={}", out.display()))
        .output()
        .expect("Failed to run mksnapshot");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing-embed.js"), "stderr: {stderr}");
    assert!(!out.exists());
}

#[test]
fn test_missing_script_json_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing-embed.js");

    let output = mksnapshot()
        .arg("--json")
        .arg(&missing)
        .output()
        .expect("Failed to run mksnapshot");

    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");

    assert_eq!(json["ok"], false);
    assert_eq!(json["error"]["code"], "SCRIPT_OPEN_FAILED");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("missing-embed.js"));
}

#[cfg(not(feature = "v8"))]
#[test]
fn test_without_engine_nothing_is_written() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.bin");
    let src = dir.path().join("out.cc");

    let output = mksnapshot()
        .arg("--json")
        .arg(format!("--startup-blob={}", out.display()))
        .arg(format!("--startup-src={}", src.display()))
        .output()
        .expect("Failed to run mksnapshot");

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");
    assert_eq!(json["error"]["code"], "ENGINE_UNAVAILABLE");
    assert_eq!(json["engine"], "none");
    assert!(!out.exists());
    assert!(!src.exists());
}

#[cfg(feature = "v8")]
#[test]
fn test_v8_snapshot_outputs_agree() {
    let dir = tempdir().unwrap();
    let embed = dir.path().join("embed.js");
    let out = dir.path().join("snapshot_blob.bin");
    let src = dir.path().join("snapshot.cc");
    std::fs::write(&embed, "globalThis.answer = 42;").unwrap();

    let output = mksnapshot()
        .arg("--json")
        .arg(format!("--startup-blob={}", out.display()))
        .arg(format!("--startup-src={}", src.display()))
        .arg(&embed)
        .output()
        .expect("Failed to run mksnapshot");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let blob = std::fs::read(&out).unwrap();
    assert_eq!(json["bytes"], blob.len());
    assert!(std::fs::read_to_string(&src)
        .unwrap()
        .contains(&format!("static const int blob_size = {};", blob.len())));
}

#[test]
fn test_no_outputs_warns_up_front() {
    let output = mksnapshot()
        .output()
        .expect("Failed to run mksnapshot");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("nothing will be written"),
        "stderr: {stderr}"
    );
}

#[test]
fn test_configured_outputs_do_not_warn() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.bin");

    let output = mksnapshot()
        .arg(format!("--startup-blob={}", out.display()))
        .output()
        .expect("Failed to run mksnapshot");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("nothing will be written"), "stderr: {stderr}");
}
