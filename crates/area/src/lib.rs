//! Area resolution: turns flag command arguments into the set of chunks they
//! name.
//!
//! # Invariants
//! - Chunks from positions and selections are derived through block-to-cell
//!   conversion; explicit coordinates are already chunk coordinates.
//! - Selections enumerate their full inclusive rectangle, X then Z ascending.
//! - Every failure is explained to the caller before it is returned.

mod grid;
mod resolver;
mod selection;

pub use grid::CellRect;
pub use resolver::{AreaResolver, SELECTION_KEYWORD};
pub use selection::{
    Cuboid, SelectionError, SelectionSession, SelectionTool, WandSelections, WandSession,
};
