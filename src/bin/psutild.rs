//! psutild - command line front end for the psutil metric collector.
//!
//! Prints the namespace catalog or a batch of collected metric records as
//! JSON on stdout. Logs go to stderr.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(not(target_os = "linux"))]
use psutil_collector::collector::MockFs;
#[cfg(target_os = "linux")]
use psutil_collector::collector::RealFs;
use psutil_collector::collector::{Collector, FileSystem, ProcfsSource};
use psutil_collector::{CollectError, Namespace};

/// Metric collector for load, CPU, memory and network stats.
#[derive(Parser)]
#[command(name = "psutild", about = "psutil metric collector", version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc", global = true)]
    proc_path: String,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print every namespace the host can currently report.
    Catalog,
    /// Collect the given namespaces, or the whole catalog if none are given.
    Collect {
        /// Namespaces in canonical form, e.g. /intel/psutil/load/load1.
        namespaces: Vec<Namespace>,
    },
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Default level is INFO. Use -q for quiet mode (errors only).
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("psutild={}", level).parse().unwrap())
        .add_directive(format!("psutil_collector={}", level).parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), serde_json::Error> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

fn run<F: FileSystem>(
    collector: &Collector<ProcfsSource<F>>,
    command: Command,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Catalog => {
            let catalog = collector.get_catalog()?;
            info!("Catalog: {} namespaces", catalog.len());
            print_json(&catalog, pretty)?;
        }
        Command::Collect { namespaces } => {
            let requested = if namespaces.is_empty() {
                debug!("no namespaces given, collecting full catalog");
                collector.get_catalog()?
            } else {
                namespaces
            };
            let records = collector.collect(&requested)?;
            info!("Collected {} records", records.len());
            print_json(&records, pretty)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    #[cfg(target_os = "linux")]
    let fs = RealFs::new();
    #[cfg(not(target_os = "linux"))]
    let fs = {
        warn!("Not running on Linux, using mock /proc data");
        MockFs::typical_system()
    };

    let source = ProcfsSource::new(fs, args.proc_path.as_str());
    if !source.is_available() {
        warn!("{}/stat not found, is procfs mounted?", source.proc_path());
    }
    let collector = Collector::new(source);

    match run(&collector, args.command, args.pretty) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<CollectError>() {
                Some(CollectError::Lookup { .. }) => {
                    error!("{} (is the namespace from a stale catalog?)", e)
                }
                _ => error!("{}", e),
            }
            ExitCode::FAILURE
        }
    }
}
