//! Snapshot engines for mksnapshot.
//!
//! With the `v8` feature this crate serializes real V8 heaps through the
//! bindings re-exported by deno_core. Without it, [`Engine`] is
//! [`UnavailableEngine`] and every acquisition fails with a clear error.
//!
//! ## Usage
//!
//! ```ignore
//! let engine = mksnapshot_runtime::initialize(&config.effective_engine_flags())?;
//! let report = mksnapshot_core::run(&config, engine)?;
//! ```

#[cfg(feature = "v8")]
mod v8_engine;

#[cfg(feature = "v8")]
pub use v8_engine::V8Engine;

pub use mksnapshot_core::UnavailableEngine;

/// The engine this build was compiled with.
#[cfg(feature = "v8")]
pub type Engine = V8Engine;

/// The engine this build was compiled with.
#[cfg(not(feature = "v8"))]
pub type Engine = UnavailableEngine;

/// Name of the compiled-in engine, for diagnostics.
#[must_use]
pub fn engine_name() -> &'static str {
    if cfg!(feature = "v8") {
        "v8"
    } else {
        "none"
    }
}

/// Bring up the compiled-in engine with the given engine flags.
#[cfg(feature = "v8")]
pub fn initialize(flags: &[String]) -> mksnapshot_core::Result<Engine> {
    V8Engine::initialize(flags)
}

/// Bring up the compiled-in engine with the given engine flags.
#[cfg(not(feature = "v8"))]
pub fn initialize(flags: &[String]) -> mksnapshot_core::Result<Engine> {
    tracing::debug!(?flags, "no snapshot engine compiled in");
    Ok(UnavailableEngine)
}
