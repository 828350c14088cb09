//! Spiral command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use issa::generate_spiral;

use super::common::{OutputFormat, SpiralOpts, StyleOpts, encode, write_output};

/// Points generated when `-n` is not given.
pub const DEFAULT_POINTS: usize = 100;

/// Execute the spiral command: coordinates only, no sequence.
pub fn cmd_spiral(
    opts: &SpiralOpts,
    format: OutputFormat,
    output: Option<&PathBuf>,
    style: &StyleOpts,
) -> Result<()> {
    let params = opts.params(opts.points.unwrap_or(DEFAULT_POINTS));
    let path = generate_spiral(&params).context("Failed to generate spiral")?;
    info!("generated {} points, spacing {:.4}", path.len(), path.spacing());

    let bytes = encode(&path, None, format, &style.style())?;
    write_output(output, &bytes)
}
