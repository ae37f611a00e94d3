//! V8 snapshot creation through deno_core's re-exported bindings.

use deno_core::v8;
use mksnapshot_core::{Error, Result, ScriptSource, SnapshotEngine, StartupBlob};
use std::sync::atomic::{AtomicBool, Ordering};

/// V8 may be initialized once per process.
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Serializes V8 heaps.
///
/// Owns the process-wide V8 platform from [`initialize`](Self::initialize)
/// until [`dispose`](SnapshotEngine::dispose).
#[derive(Debug)]
pub struct V8Engine {
    _private: (),
}

impl V8Engine {
    /// Apply `flags`, create the default platform and initialize V8.
    pub fn initialize(flags: &[String]) -> Result<Self> {
        if INITIALIZED.swap(true, Ordering::SeqCst) {
            return Err(Error::engine("initialize", "V8 is already initialized"));
        }

        if !flags.is_empty() {
            let joined = flags.join(" ");
            tracing::debug!(flags = %joined, "setting V8 flags");
            v8::V8::set_flags_from_string(&joined);
        }

        let platform = v8::new_default_platform(0, false).make_shared();
        v8::V8::initialize_platform(platform);
        v8::V8::initialize();
        tracing::debug!(version = v8::V8::get_version(), "V8 initialized");

        Ok(Self { _private: () })
    }
}

impl SnapshotEngine for V8Engine {
    fn create_base_snapshot(&mut self, embed: Option<&ScriptSource>) -> Result<StartupBlob> {
        const STAGE: &str = "base snapshot";

        let mut isolate = v8::Isolate::snapshot_creator(None, None);
        let script_result = {
            let scope = &mut v8::HandleScope::new(&mut isolate);
            let context = v8::Context::new(scope);
            let result = match embed {
                Some(script) => {
                    let scope = &mut v8::ContextScope::new(scope, context);
                    run_script(scope, script, STAGE)
                }
                None => Ok(()),
            };
            scope.set_default_context(context);
            result
        };
        finish(isolate, script_result, STAGE)
    }

    fn warm_up(&mut self, cold: StartupBlob, warmup: &ScriptSource) -> Result<StartupBlob> {
        const STAGE: &str = "warm up";

        // The isolate takes ownership of the cold bytes and frees them when
        // it is consumed by `create_blob`.
        let mut isolate =
            v8::Isolate::snapshot_creator_from_existing_snapshot(cold.into_bytes(), None, None);
        let script_result = {
            let scope = &mut v8::HandleScope::new(&mut isolate);
            let result = {
                // Throw-away context: only the compiled code survives.
                let context = v8::Context::new(scope);
                let scope = &mut v8::ContextScope::new(scope, context);
                run_script(scope, warmup, STAGE)
            };
            let context = v8::Context::new(scope);
            scope.set_default_context(context);
            result
        };
        finish(isolate, script_result, STAGE)
    }

    fn dispose(self) {
        // SAFETY: every isolate created by this engine was consumed by
        // `create_blob` or dropped before its method returned.
        unsafe {
            v8::V8::dispose();
        }
        v8::V8::dispose_platform();
        tracing::debug!("V8 disposed");
    }
}

fn run_script(scope: &mut v8::HandleScope, script: &ScriptSource, stage: &'static str) -> Result<()> {
    let tc = &mut v8::TryCatch::new(scope);

    let Some(code) = v8::String::new(tc, script.text()) else {
        return Err(Error::engine(stage, format!("{}: script too large", script.resource_name())));
    };

    let Some(compiled) = v8::Script::compile(tc, code, None) else {
        return Err(caught(tc, script, stage));
    };

    if compiled.run(tc).is_none() {
        return Err(caught(tc, script, stage));
    }

    Ok(())
}

fn caught(tc: &mut v8::TryCatch<v8::HandleScope>, script: &ScriptSource, stage: &'static str) -> Error {
    let message = match tc.exception() {
        Some(exception) => exception.to_rust_string_lossy(tc),
        None => "execution terminated".to_string(),
    };
    Error::engine(stage, format!("{}: {}", script.resource_name(), message))
}

/// Consume a snapshot-creator isolate.
///
/// A snapshot creator must go through `create_blob` before it is dropped,
/// even when the script run failed; in that case the blob is discarded and
/// the script error returned.
fn finish(isolate: v8::OwnedIsolate, script_result: Result<()>, stage: &'static str) -> Result<StartupBlob> {
    let data = isolate.create_blob(v8::FunctionCodeHandling::Keep);
    script_result?;

    let data = data.ok_or_else(|| Error::engine(stage, "V8 could not serialize the heap"))?;
    Ok(StartupBlob::from(data.to_vec()))
}
