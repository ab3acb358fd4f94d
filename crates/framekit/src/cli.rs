use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "framekit", about = "GIF frame extraction and montage assembly")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Split an animated GIF into one PNG per frame.
    Extract {
        /// Path to the input GIF.
        #[arg(short, long, default_value = "driveby.gif")]
        input: PathBuf,

        /// Prefix of the written files (default: the input's file stem).
        #[arg(short, long)]
        base: Option<String>,

        /// Directory to write `{base}_{index}.png` into (default: next to the input).
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Compose kalman_{name}_1.png .. kalman_{name}_15.png into a titled 3x5 grid.
    Montage {
        /// Identifier used to build the input and output file names.
        #[arg(short, long, default_value = "shuffleboard")]
        name: String,

        /// Directory holding the 15 input images.
        #[arg(short, long, default_value = ".")]
        input_dir: PathBuf,

        /// Directory to write kalman_{name}_subplots.png into (default: the input directory).
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// TrueType font for the cell titles.
        #[arg(long)]
        font: Option<PathBuf>,
    },
}
