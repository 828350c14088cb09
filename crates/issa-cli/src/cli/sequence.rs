//! Sequence command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use issa::SequenceRecord;

use super::common::load_sequence;

/// Execute the sequence command.
///
/// Prints a summary of a downloaded b-file. With `meta`, the OEIS search
/// JSON at that path is checked against the b-file and the combined record
/// is printed as JSON instead.
pub fn cmd_sequence(id: &str, dir: &Path, meta: Option<&Path>, head: usize) -> Result<()> {
    let seq = load_sequence(dir, id)?;

    if let Some(meta) = meta {
        let json = fs::read_to_string(meta)
            .with_context(|| format!("Failed to read {}", meta.display()))?;
        let seq_id = seq.id.context("sequence loaded without an id")?;
        let record = SequenceRecord::from_search_json(&json, seq_id, &seq)?;
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let (lo, hi) = seq.magnitude_range().unwrap_or((0, 0));
    let shown: Vec<String> = seq
        .terms
        .iter()
        .take(head)
        .map(|(i, v)| format!("{}:{}", i, v))
        .collect();

    println!("Sequence: {}", seq.id.map(|id| id.to_string()).unwrap_or_default());
    println!("  Terms: {}", seq.len());
    println!("  First index: {}", seq.first_index().unwrap_or_default());
    println!("  Non-negative: {}", seq.is_positive());
    println!("  |term| range: {} .. {}", lo, hi);
    println!("  Head: {{{}}}", shown.join(", "));
    Ok(())
}
