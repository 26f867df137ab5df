use clap::{Args, Parser, Subcommand};
use imgbatch::{Options, Outcome, batch, config, manifest, output, process};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Per-image options. In batch mode these are defaults that each manifest
/// item's own options override.
#[derive(Args, Clone, Default)]
struct OptionArgs {
    /// Target width in pixels
    #[arg(short, long, allow_negative_numbers = true)]
    width: Option<f64>,

    /// Target height in pixels
    #[arg(short = 'H', long, allow_negative_numbers = true)]
    height: Option<f64>,

    /// Convert to grayscale
    #[arg(long)]
    grayscale: bool,

    /// Mirror top-to-bottom
    #[arg(long)]
    flip: bool,

    /// Mirror left-to-right
    #[arg(long)]
    flop: bool,

    /// Gaussian blur sigma
    #[arg(long, value_name = "SIGMA")]
    blur: Option<f64>,

    /// Output format: jpeg, jpg, png, webp
    #[arg(long, value_name = "FMT")]
    format: Option<String>,

    /// Encoder quality 1-100 (only with --format)
    #[arg(long, value_name = "Q", allow_negative_numbers = true)]
    quality: Option<f64>,
}

impl From<OptionArgs> for Options {
    fn from(args: OptionArgs) -> Self {
        Options {
            width: args.width,
            height: args.height,
            grayscale: args.grayscale,
            flip: args.flip,
            flop: args.flop,
            blur: args.blur,
            format: args.format,
            quality: args.quality,
        }
    }
}

#[derive(Parser)]
#[command(name = "imgbatch")]
#[command(about = "Batch image transformation")]
#[command(long_about = "\
Batch image transformation

Resize, recolor, mirror, blur and re-encode images, one at a time or as a
batch described by a JSON manifest:

  [
    {\"inputPath\": \"in/a.jpg\", \"outputPath\": \"out/a.webp\", \"options\": {\"width\": 800, \"format\": \"webp\"}},
    {\"inputPath\": \"in/b.png\", \"outputPath\": \"out/b.png\", \"options\": {\"grayscale\": true}}
  ]

Steps always run in the same order: resize, grayscale, flip, flop, blur,
encode. One failing image never stops the rest of a batch.

Run 'imgbatch gen-config' to generate a documented imgbatch.toml.")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Source image
    #[arg(short, long, requires = "output", conflicts_with = "batch")]
    input: Option<PathBuf>,

    /// Destination file (parent directory must exist)
    #[arg(short, long, requires = "input")]
    output: Option<PathBuf>,

    /// JSON manifest of images to process
    #[arg(long, value_name = "MANIFEST")]
    batch: Option<PathBuf>,

    #[command(flatten)]
    options: OptionArgs,

    /// Worker threads (default: processing.max_processes, else all cores)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Config file (default: ./imgbatch.toml if present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write outcomes as a JSON report
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a stock imgbatch.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(Command::GenConfig) = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(ExitCode::SUCCESS);
    }

    let cwd = std::env::current_dir()?;
    let config = config::load_config(cli.config.as_deref(), &cwd)?;
    init_logging(&config.logging);

    let options = Options::from(cli.options);
    let (outcomes, is_batch) = match (cli.input, cli.output, cli.batch) {
        (Some(input), Some(output), None) => {
            (vec![process::process_image(&input, &output, &options)], false)
        }
        (None, None, Some(manifest_path)) => {
            let items: Vec<_> = manifest::load_manifest(&manifest_path)?
                .into_iter()
                .map(|mut item| {
                    item.options = item.options.with_defaults(&options);
                    item
                })
                .collect();
            let jobs = cli
                .jobs
                .unwrap_or_else(|| config::effective_threads(&config.processing));
            debug!(jobs, manifest = %manifest_path.display(), "starting batch");
            (batch::process_batch(&items, jobs), true)
        }
        _ => return Err("either -i <IN> -o <OUT> or --batch <MANIFEST> is required".into()),
    };

    output::print_outcomes(&outcomes);
    if is_batch {
        output::print_summary(&outcomes);
    }
    finish(&outcomes, cli.report.as_deref())
}

fn finish(
    outcomes: &[Outcome],
    report: Option<&Path>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if let Some(path) = report {
        output::write_report(path, outcomes)?;
    }
    if outcomes.iter().all(|o| o.is_success()) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Diagnostics go to stderr. `RUST_LOG` wins over the configured level.
fn init_logging(logging: &config::LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
