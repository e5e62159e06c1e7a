//! Hytale Verifier command-line host
//!
//! Loads a model, then either verifies its texel density against one of
//! the art-style presets or converts its box-shaped meshes into cubes.

#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use hv_core::{Model, SceneSource, VerifyConfig, convert_all_meshes, import_model, verify_density};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log debug details of every decision
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that every textured face matches the required pixel density
    Verify {
        /// Model file (.bbmodel, .json or .ron)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Art-style preset to verify against
        #[arg(short, long, value_enum, default_value_t = Preset::Entity)]
        preset: Preset,

        /// Override the preset density (pixels per 16 units)
        #[arg(short, long)]
        density: Option<u32>,

        /// Override the model label shown in the report
        #[arg(short, long)]
        label: Option<String>,

        /// Load verification settings from a RON file
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,
    },
    /// Replace box-shaped meshes with equivalent cubes
    Convert {
        /// Model file (.bbmodel, .json or .ron)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Where to write the converted model (RON)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Preset {
    /// Entities and items, 64px density
    Entity,
    /// Blocks, 32px density
    Block,
}

impl Preset {
    fn config(self) -> VerifyConfig {
        match self {
            Preset::Entity => VerifyConfig::entity_item(),
            Preset::Block => VerifyConfig::block(),
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let default_filter = if verbose {
        "hv_cli=debug,hv_core=debug"
    } else {
        "hv_cli=info,hv_core=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Verify {
            file,
            preset,
            density,
            label,
            config,
        } => {
            let mut settings = match config {
                Some(path) => VerifyConfig::load(path)?,
                None => preset.config(),
            };
            if let Some(density) = density {
                settings.density = density;
            }
            if let Some(label) = label {
                settings.label = label;
            }
            verify(&file, &settings)
        }
        Command::Convert { file, output } => {
            let output = output.unwrap_or_else(|| file.with_extension("converted.ron"));
            convert(&file, &output)
        }
    }
}

fn verify(file: &Path, settings: &VerifyConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing::info!("Verifying {} as {}", file.display(), settings.label);
    let model = import_model(file)?;
    let report = verify_density(&model, settings);

    println!("{}", report.title());
    println!();
    println!("{report}");

    Ok(if report.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn convert(file: &Path, output: &Path) -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing::info!("Converting meshes in {}", file.display());
    let mut model: Model = import_model(file)?;
    let summary = convert_all_meshes(&mut model);

    println!(
        "Converted {} mesh(es) to cubes ({} skipped)",
        summary.created_count(),
        summary.skipped
    );
    if summary.created.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }

    model.save(output)?;
    println!(
        "Saved {} element(s) to {}",
        model.elements().len(),
        output.display()
    );
    Ok(ExitCode::SUCCESS)
}
