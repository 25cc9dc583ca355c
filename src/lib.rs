//! Boxer: an annotation stage engine for labeled bounding boxes.
//!
//! Boxer keeps a set of axis-aligned boxes valid while they are drawn,
//! dragged, resized and nudged over a background image, and encodes them as
//! Pascal VOC XML or YOLO label lines.
//!
//! # Modules
//!
//! - [`geometry`]: typed coordinates, rectangles and the box normalizer
//! - [`stage`]: the stage that owns boxes, highlight, pan/zoom and the background
//! - [`change`]: debounced change notifications
//! - [`export`]: VOC XML and YOLO TXT encoders
//! - [`validation`]: pre-export checks
//! - [`vocabulary`]: label vocabulary loading
//! - [`error`]: error types
//!
//! # Example
//!
//! ```
//! use boxer::export::ExportFormat;
//! use boxer::geometry::Coord;
//! use boxer::stage::{ImageSize, Stage, StageOptions};
//!
//! let mut stage = Stage::new(StageOptions::default().with_default_label("dog"));
//! let ticket = stage.request_background("dog.jpg");
//! stage.apply_background(ticket, Ok(ImageSize::new(100, 50))).unwrap();
//!
//! stage.pointer_down(Coord::new(10.0, 10.0));
//! stage.pointer_up(Coord::new(30.0, 20.0));
//!
//! let vocabulary = vec!["cat".to_string(), "dog".to_string()];
//! let txt = stage.export(ExportFormat::YoloTxt, &vocabulary, Some("dog.jpg"));
//! assert_eq!(txt, "1 0.2 0.3 0.2 0.2");
//! ```

pub mod change;
pub mod error;
pub mod export;
pub mod geometry;
pub mod stage;
pub mod validation;
pub mod vocabulary;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

pub use error::BoxerError;

use export::ExportFormat;
use stage::{FileImageLoader, Stage, StageOptions};
use validation::CheckReport;

/// The boxer CLI application.
#[derive(Parser)]
#[command(name = "boxer")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Seed boxes over an image and export them.
    Export(ExportArgs),
    /// Check seeded boxes for export problems.
    Check(CheckArgs),
}

/// Inputs shared by every subcommand.
#[derive(clap::Args)]
struct StageInputArgs {
    /// Background image; only its header is read.
    #[arg(long)]
    image: PathBuf,

    /// JSON array of boxes: [{"label", "x", "y", "width", "height"}].
    #[arg(long)]
    boxes: Option<PathBuf>,

    /// Label vocabulary: classes.txt or a YOLO data.yaml.
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Minimum box width and height in image pixels.
    #[arg(long, env = "BOXER_MINIMUM_SIZE")]
    minimum_size: Option<f64>,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,
}

/// Arguments for the export subcommand.
#[derive(clap::Args)]
struct ExportArgs {
    #[command(flatten)]
    input: StageInputArgs,

    /// Export format ('voc' or 'yolo').
    #[arg(long, default_value = "yolo")]
    format: String,

    /// Output file, or a directory to write '<image stem><ext>' into.
    /// Prints to stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Arguments for the check subcommand.
#[derive(clap::Args)]
struct CheckArgs {
    #[command(flatten)]
    input: StageInputArgs,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the boxer CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), BoxerError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Export(args)) => run_export(args),
        Some(Commands::Check(args)) => run_check(args),
        None => {
            println!("boxer {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Draw, check and export labeled bounding boxes.");
            println!();
            println!("Run 'boxer --help' for usage information.");
            Ok(())
        }
    }
}

/// A stage with the background loaded and every seed drawn.
struct LoadedStage {
    stage: Stage,
    vocabulary: Vec<String>,
    image_name: Option<String>,
}

fn load_stage(input: &StageInputArgs) -> Result<LoadedStage, BoxerError> {
    let mut options = StageOptions::default();
    if let Some(minimum_size) = input.minimum_size {
        options = options.with_minimum_size(minimum_size);
    }
    let mut stage = Stage::new(options);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let url = input.image.to_string_lossy().into_owned();
    runtime.block_on(stage.set_background_image(&FileImageLoader, url))?;

    let vocabulary = match &input.labels {
        Some(path) => vocabulary::read_vocabulary(path)?,
        None => Vec::new(),
    };

    if let Some(path) = &input.boxes {
        for seed in stage::read_box_seeds(path)? {
            stage.draw_box(&seed);
        }
    }
    log::info!("seeded {} boxes", stage.len());

    let image_name = input
        .image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    Ok(LoadedStage {
        stage,
        vocabulary,
        image_name,
    })
}

/// Fails on errors, and on warnings in strict mode.
fn enforce(report: CheckReport, strict: bool) -> Result<(), BoxerError> {
    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (strict && has_warnings) {
        Err(BoxerError::CheckFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}

/// Execute the export subcommand.
fn run_export(args: ExportArgs) -> Result<(), BoxerError> {
    let format: ExportFormat = args.format.parse()?;
    let loaded = load_stage(&args.input)?;

    let report = loaded.stage.check(&loaded.vocabulary);
    if !report.is_clean() {
        eprint!("{}", report);
    }
    enforce(report, args.input.strict)?;

    let encoded = loaded
        .stage
        .export(format, &loaded.vocabulary, loaded.image_name.as_deref());

    match &args.output {
        Some(output) => {
            let path = output_path(output, loaded.image_name.as_deref(), format);
            fs::write(&path, encoded)?;
            println!(
                "Wrote {} boxes as {} to {}",
                loaded.stage.len(),
                format.label(),
                path.display()
            );
        }
        None => println!("{}", encoded),
    }

    Ok(())
}

fn output_path(output: &Path, image_name: Option<&str>, format: ExportFormat) -> PathBuf {
    if output.is_dir() {
        output.join(export::export_file_name(image_name, format))
    } else {
        output.to_path_buf()
    }
}

/// Execute the check subcommand.
fn run_check(args: CheckArgs) -> Result<(), BoxerError> {
    let loaded = load_stage(&args.input)?;
    let report = loaded.stage.check(&loaded.vocabulary);

    match args.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report).map_err(BoxerError::JsonWrite)?;
            println!("{}", json);
        }
        _ => print!("{}", report),
    }

    enforce(report, args.input.strict)
}
