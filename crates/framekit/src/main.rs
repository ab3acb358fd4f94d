mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use framekit_core::extract::{self, ExtractConfig};
use framekit_core::montage::{self, MontageConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Extract {
            input,
            base,
            output_dir,
        } => {
            let mut config = ExtractConfig::for_input(&input);
            if let Some(base) = base {
                config.base_name = base;
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            info!(?input, base_name = %config.base_name, "extracting frames");

            let count = extract::extract_frames(&input, &config)
                .with_context(|| format!("failed to extract frames from {}", input.display()))?;

            if count == 0 {
                warn!(?input, "animated image has no frames");
            }
            info!(frames = count, output_dir = ?config.output_dir, "extraction complete");
            Ok(())
        }
        cli::Command::Montage {
            name,
            input_dir,
            output_dir,
            font,
        } => {
            let config = MontageConfig {
                output_dir: output_dir.unwrap_or_else(|| input_dir.clone()),
                image_name: name,
                input_dir,
                font_path: font,
            };
            info!(image_name = %config.image_name, "assembling montage");

            let output = montage::assemble_montage(&config).context("failed to assemble montage")?;

            info!(?output, "montage complete");
            Ok(())
        }
    }
}
