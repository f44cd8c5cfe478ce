//! `logo-color` command-line interface.

use clap::{Parser, Subcommand, ValueEnum};
use logo_color::{
    teams::{self, LogoRoots, RecalcOptions},
    ExtractionConfig, ScoringMode,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "logo-color")]
#[command(about = "Derive a team's primary color from its logo")]
#[command(version)]
struct Cli {
    /// JSON file with extraction options. Missing fields take their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Channel quantization step.
    #[arg(long, global = true)]
    quant_step: Option<u8>,

    /// Side of the square sampling grid.
    #[arg(long, global = true)]
    grid_size: Option<u32>,

    /// Fraction of the content box trimmed from every edge.
    #[arg(long, global = true)]
    margin: Option<f32>,

    /// Bucket scoring strategy.
    #[arg(long, global = true, value_enum)]
    scoring: Option<Scoring>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Scoring {
    Frequency,
    Saturation,
}

impl From<Scoring> for ScoringMode {
    fn from(scoring: Scoring) -> Self {
        match scoring {
            Scoring::Frequency => ScoringMode::Frequency,
            Scoring::Saturation => ScoringMode::SaturationWeighted,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the primary color of one or more logo files.
    Extract {
        /// Logo images.
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },
    /// Recompute `primary_color` for every record in a teams file.
    Recalc {
        /// Team records (JSON array).
        #[arg(long, default_value = "teams.json")]
        teams: PathBuf,

        /// First root `logo_url` is resolved against.
        #[arg(long, default_value = "public")]
        logo_root: PathBuf,

        /// Second root `logo_url` is resolved against.
        #[arg(long, default_value = ".")]
        repo_root: PathBuf,

        /// Only fill records without a valid color.
        #[arg(long)]
        only_missing: bool,

        /// Report changes without writing the teams file.
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Extract { images } => run_extract(&images, &config),
        Commands::Recalc {
            teams,
            logo_root,
            repo_root,
            only_missing,
            dry_run,
        } => run_recalc(
            &teams,
            LogoRoots::new(logo_root, repo_root),
            &config,
            RecalcOptions { only_missing },
            dry_run,
        ),
    }
}

fn load_config(cli: &Cli) -> CliResult<ExtractionConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| -> CliError { format!("Failed to read config {}: {}", path.display(), e).into() })?;
            serde_json::from_str(&text)
                .map_err(|e| -> CliError { format!("Failed to parse config {}: {}", path.display(), e).into() })?
        }
        None => ExtractionConfig::default(),
    };

    if let Some(quant_step) = cli.quant_step {
        config = config.quant_step(quant_step);
    }
    if let Some(grid_size) = cli.grid_size {
        config = config.grid_size(grid_size);
    }
    if let Some(margin) = cli.margin {
        config = config.margin_fraction(margin);
    }
    if let Some(scoring) = cli.scoring {
        config = config.scoring_mode(scoring.into());
    }

    config.validate()?;
    Ok(config)
}

fn run_extract(images: &[PathBuf], config: &ExtractionConfig) -> CliResult<()> {
    let results: Vec<_> = images
        .par_iter()
        .map(|path| logo_color::open(path).and_then(|image| logo_color::extract(&image, config)))
        .collect();

    let mut failed = 0;
    for (path, result) in images.iter().zip(results) {
        match result {
            Ok(result) if result.fallback_used() => println!("{}: {} (fallback)", path.display(), result.hex()),
            Ok(result) => println!("{}: {}", path.display(), result.hex()),
            Err(e) => {
                tracing::warn!("{}: {}", path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} logos failed", failed, images.len()).into());
    }

    Ok(())
}

fn run_recalc(
    teams_path: &Path,
    roots: LogoRoots,
    config: &ExtractionConfig,
    options: RecalcOptions,
    dry_run: bool,
) -> CliResult<()> {
    tracing::info!("Loading teams from {}", teams_path.display());
    let mut records = teams::load(teams_path)?;

    let summary = teams::recalculate(&mut records, &roots, config, options);

    if dry_run {
        tracing::info!("Dry run, {} left untouched", teams_path.display());
    } else {
        teams::save(teams_path, &records)?;
    }

    tracing::info!(
        "Updated colors for {} teams. Unchanged: {}, already valid: {}, skipped (no logo): {}, skipped (errors): {}",
        summary.updated,
        summary.unchanged,
        summary.already_valid,
        summary.skipped_no_logo,
        summary.skipped_error
    );

    Ok(())
}
