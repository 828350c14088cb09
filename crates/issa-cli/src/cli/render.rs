//! Render command implementation: a sequence plotted along a spiral.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use issa::generate_spiral;

use super::common::{
    OutputFormat, SpiralOpts, StyleOpts, encode, load_sequence, take_terms, write_output,
};

/// Execute the render command.
///
/// The spiral gets one point per sequence term unless `-n` asks for fewer.
pub fn cmd_render(
    id: &str,
    dir: &Path,
    opts: &SpiralOpts,
    format: Option<OutputFormat>,
    output: Option<&PathBuf>,
    style: &StyleOpts,
) -> Result<()> {
    let seq = load_sequence(dir, id)?;
    let values = take_terms(&seq, opts.points)?;

    let path = generate_spiral(&opts.params(values.len()))
        .with_context(|| format!("Failed to generate spiral for {}", id))?;
    info!("plotting {} terms of {}", values.len(), id);

    let format = format
        .or_else(|| output.map(|p| OutputFormat::from_path(p)))
        .unwrap_or(OutputFormat::Svg);
    let bytes = encode(&path, Some(&values), format, &style.style())?;
    write_output(output, &bytes)
}
