#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]

mod logging;
mod snapshot;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use mksnapshot_core::SnapshotConfig;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mksnapshot")]
#[command(author, version, about = "Build a startup snapshot blob and its generated C++ source", long_about = None)]
#[command(override_usage = "mksnapshot --startup-src=... --startup-blob=... [extras]")]
struct Cli {
    /// Script to run before the heap is serialized
    #[arg(value_name = "EMBED_SCRIPT")]
    embed_script: Option<PathBuf>,

    /// Script to run once against the snapshot to warm it up
    #[arg(value_name = "WARMUP_SCRIPT")]
    warmup_script: Option<PathBuf>,

    /// Write the snapshot as generated C++ source
    #[arg(long, alias = "startup_src", value_name = "PATH")]
    startup_src: Option<PathBuf>,

    /// Write the raw snapshot blob
    #[arg(long, alias = "startup_blob", value_name = "PATH")]
    startup_blob: Option<PathBuf>,

    /// Allow non-reproducible engine behaviour
    #[arg(long)]
    no_predictable: bool,

    /// Extra engine flags, space separated (e.g. "--no-lazy --stack-size=2000")
    #[arg(long, value_name = "FLAGS", allow_hyphen_values = true)]
    v8_flags: Option<String>,

    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn config(&self) -> SnapshotConfig {
        let mut config = SnapshotConfig::new().with_predictable(!self.no_predictable);

        if let Some(path) = &self.startup_src {
            config = config.with_startup_src(path);
        }
        if let Some(path) = &self.startup_blob {
            config = config.with_startup_blob(path);
        }
        if let Some(path) = &self.embed_script {
            config = config.with_embed_script(path);
        }
        if let Some(path) = &self.warmup_script {
            config = config.with_warmup_script(path);
        }
        if let Some(flags) = &self.v8_flags {
            config = config.with_engine_flags(flags.split_whitespace());
        }

        config
    }
}

/// Parse the command line, printing usage plus the full option listing on
/// any usage error.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let _ = err.print();
            eprintln!();
            let _ = Cli::command().write_long_help(&mut std::io::stderr());
            std::process::exit(err.exit_code());
        }
    }
}

fn main() -> Result<()> {
    let cli = parse_cli();

    logging::init(cli.verbose, cli.json);

    let config = cli.config();
    snapshot::run(&config, cli.json)
}
