use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::info;
use vizhash::{rolling_input, VizHashConfig, VizHashProvider};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Server secret for the rolling input, overrides the configuration file
    #[arg(long, env = "VIZHASH_SECRET", global = true, hide_env_values = true)]
    secret: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a visual hash around a photo (JPEG or PNG)
    Photo {
        photo: PathBuf,
        out_file: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Render a visual hash around the missing photo placeholder
    Missing {
        out_file: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Render a watermarked reference image
    Reference {
        out_file: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Print the current rolling input and when it changes
    CurrentInput,
}

#[derive(Debug, clap::Args)]
struct RenderArgs {
    /// if omitted, the current rolling input is used
    #[clap(short, long)]
    input: Option<String>,
    #[clap(short, long, default_value = "400")]
    size: u32,
}

fn load_config(cli: &Cli) -> Result<VizHashConfig> {
    let mut config = match &cli.config {
        Some(path) => VizHashConfig::from_file(path)?,
        None => VizHashConfig::default(),
    };

    if let Some(secret) = &cli.secret {
        config = config.with_secret(secret.clone());
    }

    Ok(config)
}

fn resolve_input(provider: &VizHashProvider, input: Option<String>) -> Result<String> {
    match input {
        Some(input) => Ok(input),
        None => provider
            .current_input(Utc::now())
            .context("no --input given and no secret to derive the rolling input from"),
    }
}

fn write_image(out_file: &Path, jpeg: &[u8]) -> Result<()> {
    fs::write(out_file, jpeg).with_context(|| format!("could not write {}", out_file.display()))?;
    info!("wrote {} bytes to {}", jpeg.len(), out_file.display());

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let provider = VizHashProvider::new(config).context("could not set up vizhash")?;

    match cli.command {
        Commands::Photo {
            photo,
            out_file,
            render,
        } => {
            let photo_data =
                fs::read(&photo).with_context(|| format!("could not read {}", photo.display()))?;
            let input = resolve_input(&provider, render.input)?;
            let jpeg = provider.create_image_with_photo(&input, &photo_data, render.size)?;

            write_image(&out_file, &jpeg)?;
        }
        Commands::Missing { out_file, render } => {
            let input = resolve_input(&provider, render.input)?;
            let jpeg = provider.create_image_missing_photo(&input, render.size)?;

            write_image(&out_file, &jpeg)?;
        }
        Commands::Reference { out_file, render } => {
            let input = resolve_input(&provider, render.input)?;
            let jpeg = provider.create_reference_image(&input, render.size)?;

            write_image(&out_file, &jpeg)?;
        }
        Commands::CurrentInput => {
            let now = Utc::now();

            println!("{}", provider.current_input(now)?);
            println!(
                "valid until {}",
                rolling_input::next_window_boundary(&now).to_rfc3339()
            );
        }
    }

    Ok(())
}
