//! # issa
//!
//! Integer Sequence Spiral Art: turns integer sequences into square-spiral
//! coordinate paths for plotting.
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Every module is declared explicitly, nothing is picked up by file name alone.

pub mod geometry;
pub mod metadata;
pub mod sequence;
pub mod spiral;

// Re-export common types at crate root for convenience.
pub use geometry::{Point, Rect};
pub use metadata::{SequenceEntry, SequenceRecord};
pub use sequence::{
    BFileDirectory, MemorySource, Sequence, SequenceError, SequenceId, SequenceSource, parse_bfile,
};
pub use spiral::{
    Direction, EquiType, SpiralError, SpiralParams, SpiralPath, SpiralType, generate_spiral,
    spiral_coordinates,
};
