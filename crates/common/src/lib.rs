//! Shared types for chunk flagging.
//!
//! # Invariants
//! - Cell coordinates are only ever derived from block coordinates through
//!   [`block_to_cell`].
//! - Every cell in a [`ResolvedArea`] belongs to the area's world.

mod error;
mod sender;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::FlagCommandError;
pub use sender::CommandSender;
pub use types::{
    BlockPos, CELL_SHIFT, CELL_SIZE, CallerId, CellPosition, FlagIntent, FlagKind, Location,
    ResolvedArea, block_to_cell, eq_ignore_case,
};
