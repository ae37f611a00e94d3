//! The snapshot command: run the pipeline and report the outcome.

use mksnapshot_core::{Error, SnapshotConfig, SnapshotReport};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

/// JSON output for a snapshot run.
#[derive(Serialize)]
struct SnapshotResultJson {
    ok: bool,
    engine: &'static str,
    #[serde(flatten)]
    report: Option<SnapshotReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<SnapshotErrorJson>,
}

#[derive(Serialize)]
struct SnapshotErrorJson {
    code: &'static str,
    message: String,
}

/// Run the snapshot pipeline with the compiled-in engine.
pub fn run(config: &SnapshotConfig, json: bool) -> Result<()> {
    if !config.has_outputs() {
        tracing::warn!("no --startup-src or --startup-blob given; nothing will be written");
    }

    let result = mksnapshot_runtime::initialize(&config.effective_engine_flags())
        .and_then(|engine| mksnapshot_core::run(config, engine));

    match result {
        Ok(report) => {
            if json {
                let json_result = SnapshotResultJson {
                    ok: true,
                    engine: mksnapshot_runtime::engine_name(),
                    report: Some(report),
                    error: None,
                };
                println!("{}", serde_json::to_string(&json_result).into_diagnostic()?);
            } else {
                for output in &report.outputs {
                    println!("  {} ({} bytes)", output.path.display(), output.bytes);
                }
            }
            Ok(())
        }
        Err(e) => fail(e, json),
    }
}

fn fail(e: Error, json: bool) -> Result<()> {
    if json {
        let json_result = SnapshotResultJson {
            ok: false,
            engine: mksnapshot_runtime::engine_name(),
            report: None,
            error: Some(SnapshotErrorJson {
                code: e.code(),
                message: e.to_string(),
            }),
        };
        println!("{}", serde_json::to_string(&json_result).into_diagnostic()?);
        std::process::exit(1);
    }

    Err::<(), _>(e).into_diagnostic()
}
