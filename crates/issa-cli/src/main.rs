//! issa - integer sequence spiral art from the command line
//!
//! Usage:
//!   issa spiral [options]                 Spiral coordinates (JSON/CSV/SVG/PNG)
//!   issa sequence <id> --dir <bfiles>     Summarize a downloaded b-file
//!   issa render <id> --dir <bfiles>       Plot a sequence along a spiral
//!   issa recipe <recipe.yaml>             Render a YAML recipe
//!   issa modes                            List spacing and scaling modes

mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use issa::{EquiType, SpiralType};

use cli::{OutputFormat, SpiralOpts, StyleOpts, cmd_recipe, cmd_render, cmd_sequence, cmd_spiral};

#[derive(Parser)]
#[command(name = "issa")]
#[command(about = "Integer sequence spiral art", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate spiral coordinates
    Spiral {
        #[command(flatten)]
        spiral: SpiralOpts,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output file (- for stdout, default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        style: StyleOpts,
    },

    /// Summarize a downloaded b-file
    Sequence {
        /// OEIS id, e.g. A000045
        id: String,

        /// Directory holding bNNNNNN.txt files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// OEIS search JSON to validate against; prints the combined record
        #[arg(long, value_hint = clap::ValueHint::FilePath)]
        meta: Option<PathBuf>,

        /// Number of leading terms to show
        #[arg(long, default_value_t = 10)]
        head: usize,
    },

    /// Plot a sequence along a spiral
    Render {
        /// OEIS id, e.g. A000045
        id: String,

        /// Directory holding bNNNNNN.txt files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        #[command(flatten)]
        spiral: SpiralOpts,

        /// Output format (default: from the output extension, else svg)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (- for stdout, default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        style: StyleOpts,
    },

    /// Render a spiral described by a YAML recipe
    Recipe {
        /// Recipe file
        #[arg(value_hint = clap::ValueHint::FilePath)]
        path: Option<PathBuf>,

        /// Output file; .png, .json and .csv pick the format (default: output.svg)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print an example recipe
        #[arg(long)]
        example: bool,
    },

    /// List spacing and scaling modes
    Modes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger with default level (overridden by RUST_LOG)
    let env = Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Spiral {
            spiral,
            format,
            output,
            style,
        } => cmd_spiral(&spiral, format, output.as_ref(), &style),
        Commands::Sequence {
            id,
            dir,
            meta,
            head,
        } => cmd_sequence(&id, &dir, meta.as_deref(), head),
        Commands::Render {
            id,
            dir,
            spiral,
            format,
            output,
            style,
        } => cmd_render(&id, &dir, &spiral, format, output.as_ref(), &style),
        Commands::Recipe {
            path,
            output,
            example,
        } => cmd_recipe(path.as_deref(), output.as_ref(), example),
        Commands::Modes => {
            cmd_modes();
            Ok(())
        }
    }
}

fn cmd_modes() {
    println!("Spacing modes (--equi):");
    for mode in EquiType::all() {
        println!("  {:<16}{}", mode.name(), mode.description());
    }
    println!("Scaling modes (--scaling):");
    for mode in SpiralType::all() {
        println!("  {:<16}{}", mode.name(), mode.description());
    }
}
