//! Pandaset: lazy, frame-aligned access to PandaSet recordings.
//!
//! A dataset is a folder of sequences. Each sequence holds LiDAR sweeps,
//! several cameras, GPS and timestamps, 3D cuboids and per-point semantic
//! labels, all indexed by the same frame number. Opening a dataset only
//! resolves which files exist; payloads are decoded per stream on
//! [`Stream::load`](stream::Stream::load) and dropped again on `unload`.
//!
//! # Modules
//!
//! - [`data`]: typed records (poses, points, cuboids, intrinsics) and their readers
//! - [`stream`]: the lazily loaded streams and their shared lifecycle
//! - [`sequence`] and [`dataset`]: discovery and cascading load/unload
//! - [`geometry`]: rigid transforms, LiDAR to camera projection, cuboid corners
//! - [`validation`]: cross-stream consistency checks
//! - [`error`]: error types for pandaset operations
//!
//! # Example
//!
//! ```no_run
//! use pandaset::geometry::project_frame;
//! use pandaset::Dataset;
//!
//! let mut dataset = Dataset::open("/data/pandaset")?;
//! let sequence = dataset.get_mut("002")?;
//! sequence.load()?;
//!
//! if let (Some(lidar), Some(camera)) = (sequence.lidar(), sequence.camera("front_camera")) {
//!     let projection = project_frame(lidar, camera, 0, true)?;
//!     println!("{} points land in the image", projection.len());
//! }
//!
//! dataset.unload("002")?;
//! # Ok::<(), pandaset::PandasetError>(())
//! ```

pub mod data;
pub mod dataset;
pub mod directory;
pub mod error;
pub mod geometry;
pub mod sequence;
pub mod stream;
pub mod validation;

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub use dataset::Dataset;
pub use error::PandasetError;
pub use sequence::Sequence;

/// The pandaset CLI application.
#[derive(Parser)]
#[command(name = "pandaset")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sequences of a dataset and the streams each one has.
    List(ListArgs),
    /// Load sequences and check that their streams are consistent.
    Validate(ValidateArgs),
}

#[derive(clap::Args)]
struct ListArgs {
    /// Dataset root folder.
    #[arg(env = "PANDASET_ROOT")]
    root: PathBuf,
}

#[derive(clap::Args)]
struct ValidateArgs {
    /// Dataset root folder.
    #[arg(env = "PANDASET_ROOT")]
    root: PathBuf,

    /// Validate only this sequence (repeatable). Defaults to all.
    #[arg(long = "sequence", short = 's')]
    sequences: Vec<String>,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Run the pandaset CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), PandasetError> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List(args)) => run_list(args),
        Some(Commands::Validate(args)) => run_validate(args),
        None => {
            println!("pandaset {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Lazy, frame-aligned access to PandaSet recordings.");
            println!();
            println!("Run 'pandaset --help' for usage information.");
            Ok(())
        }
    }
}

/// Logs to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    // A subscriber may already be installed when `run` is called twice in
    // one process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run_list(args: ListArgs) -> Result<(), PandasetError> {
    use stream::Stream;

    let dataset = Dataset::open(&args.root)?;

    for (id, sequence) in dataset.iter() {
        let mut streams = Vec::new();
        if let Some(lidar) = sequence.lidar() {
            streams.push(format!("lidar({})", lidar.frame_count()));
        }
        if !sequence.cameras().is_empty() {
            streams.push(format!("cameras({})", sequence.cameras().len()));
        }
        if sequence.gps().is_some() {
            streams.push("gps".to_string());
        }
        if sequence.timestamps().is_some() {
            streams.push("timestamps".to_string());
        }
        if let Some(cuboids) = sequence.cuboids() {
            streams.push(format!("cuboids({})", cuboids.frame_count()));
        }
        if let Some(semseg) = sequence.semseg() {
            streams.push(format!("semseg({})", semseg.frame_count()));
        }
        println!("{id}: {}", streams.join(", "));
    }

    Ok(())
}

/// Execute the validate subcommand.
///
/// Sequences are processed one at a time and dropped after validation, so
/// only one is resident at once.
fn run_validate(args: ValidateArgs) -> Result<(), PandasetError> {
    let mut dataset = Dataset::open(&args.root)?;
    // Each id is unloaded once validated, so repeats are dropped up front.
    let ids: BTreeSet<String> = if args.sequences.is_empty() {
        dataset.sequence_ids().into_iter().map(str::to_string).collect()
    } else {
        args.sequences.iter().cloned().collect()
    };

    let opts = validation::ValidateOptions {
        strict: args.strict,
    };

    let mut reports = Vec::with_capacity(ids.len());
    for id in &ids {
        let sequence = dataset.get_mut(id)?;
        match sequence.load() {
            // Alignment is checked after every stream is loaded, and the
            // report describes it in more detail.
            Ok(_) | Err(PandasetError::MisalignedFrameCount { .. }) => {}
            Err(err) => return Err(err),
        }
        reports.push(validation::validate_sequence(sequence, &opts));
        dataset.unload(id)?;
    }

    match args.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reports)
                .map_err(|source| PandasetError::ReportWrite { source })?;
            println!("{json}");
        }
        OutputFormat::Text => {
            for report in &reports {
                print!("{report}");
            }
        }
    }

    let error_count: usize = reports.iter().map(|r| r.error_count()).sum();
    let warning_count: usize = reports.iter().map(|r| r.warning_count()).sum();

    if reports.iter().all(|report| opts.accepts(report)) {
        Ok(())
    } else {
        Err(PandasetError::ValidationFailed {
            error_count,
            warning_count,
        })
    }
}
