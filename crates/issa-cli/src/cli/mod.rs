//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `spiral` - Generate spiral coordinates
//! - `sequence` - Inspect a downloaded b-file (and check it against OEIS metadata)
//! - `render` - Plot a sequence along a spiral
//! - `recipe` - Render a spiral described by a YAML recipe
//! - `modes` - List spacing and scaling modes

pub mod common;
pub mod recipe;
pub mod render;
pub mod sequence;
pub mod spiral;

pub use common::{OutputFormat, SpiralOpts, StyleOpts};
pub use recipe::cmd_recipe;
pub use render::cmd_render;
pub use sequence::cmd_sequence;
pub use spiral::cmd_spiral;
