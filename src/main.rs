//! geostl: mesh an elevation raster into printable STL tiles.
//!
//! # Logging
//!
//! Progress is logged to stderr at `info` level. `-v` raises it to `debug`, `-vv` to `trace`,
//! and `-q` lowers it to errors only. `RUST_LOG` takes precedence over the flags.
//!
//! # Example
//!
//! ```bash
//! geostl tasmania.json --out-dir tiles -v
//! ```
use clap::Parser;
use geostl::{config::Config, io::GeoTiff, pipeline};
use std::{path::PathBuf, process::ExitCode};

/// Turn the area of an elevation raster described by CONFIG into watertight STL solids.
#[derive(Parser)]
#[command(name = "geostl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file
    config: PathBuf,

    /// Directory the STL files are written to
    #[arg(long, short, default_value = ".")]
    out_dir: PathBuf,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(long, short)]
    quiet: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

fn run(cli: &Cli) -> geostl::Result<usize> {
    let cfg = Config::load(&cli.config)?;
    let raster = GeoTiff::open(&cfg.filename)?;
    let written = pipeline::run(raster, &cfg, &cli.out_dir)?;
    Ok(written.len())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(n) => {
            log::info!("wrote {} STL files to '{}'", n, cli.out_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            // the message already carries its sources
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
