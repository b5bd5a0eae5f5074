//! Flag dispatch: checks that a resolved area lies in a governed world and
//! applies the flag change to every chunk in it.
//!
//! # Invariants
//! - Nothing reaches the flag store unless the world is governed.
//! - Flags placed by commands are eternal and cover exactly one chunk each.
//! - Store calls use the configured casing of the world name.

mod command;
mod dispatcher;
mod flagger;

pub use command::FlagCommand;
pub use dispatcher::{Dispatcher, FlagReport};
pub use flagger::{FlagEntry, Flagger, MemoryFlagger};
