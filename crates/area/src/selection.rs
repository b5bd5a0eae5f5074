//! Selection tool integration.
//!
//! A selection tool lets a player mark an axis-aligned cuboid in one world.
//! The resolver only reads selections; [`WandSelections`] is an in-memory tool
//! where each caller sets two corners, one at a time.

use std::collections::HashMap;

use regenflag_common::{BlockPos, CallerId};

use crate::grid::CellRect;

/// Errors a selection tool may raise while producing a selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("selection is incomplete: both corners must be set")]
    Incomplete,
    #[error("selection tool failure: {0}")]
    Tool(String),
}

/// An axis-aligned cuboid with normalized corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cuboid {
    min: BlockPos,
    max: BlockPos,
}

impl Cuboid {
    /// Cuboid spanning two opposite corners, in any order.
    pub fn new(a: BlockPos, b: BlockPos) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn minimum_point(&self) -> BlockPos {
        self.min
    }

    pub fn maximum_point(&self) -> BlockPos {
        self.max
    }

    /// Cells touched by this cuboid.
    pub fn cell_rect(&self) -> CellRect {
        CellRect::from_blocks(self.min, self.max)
    }
}

/// A caller's state within a selection tool.
pub trait SelectionSession {
    /// World the current selection was made in, if any.
    fn selection_world(&self) -> Option<String>;

    /// The selection in `world`, `Ok(None)` when nothing is selected there.
    fn selection(&self, world: &str) -> Result<Option<Cuboid>, SelectionError>;
}

/// A selection tool that may or may not be running.
pub trait SelectionTool {
    fn is_active(&self) -> bool;

    fn session(&self, caller: CallerId) -> Option<Box<dyn SelectionSession + '_>>;
}

/// One caller's wand corners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WandSession {
    world: String,
    first: Option<BlockPos>,
    second: Option<BlockPos>,
}

impl SelectionSession for WandSession {
    fn selection_world(&self) -> Option<String> {
        Some(self.world.clone())
    }

    fn selection(&self, world: &str) -> Result<Option<Cuboid>, SelectionError> {
        if self.world != world {
            return Ok(None);
        }
        match (self.first, self.second) {
            (Some(a), Some(b)) => Ok(Some(Cuboid::new(a, b))),
            _ => Err(SelectionError::Incomplete),
        }
    }
}

/// In-memory wand selections, one session per caller.
#[derive(Debug, Clone)]
pub struct WandSelections {
    active: bool,
    sessions: HashMap<CallerId, WandSession>,
}

impl Default for WandSelections {
    fn default() -> Self {
        Self {
            active: true,
            sessions: HashMap::new(),
        }
    }
}

impl WandSelections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Record a corner for `caller`. Moving to another world starts over.
    pub fn set_pos(&mut self, caller: CallerId, world: &str, pos: BlockPos, first: bool) {
        let session = self.sessions.entry(caller).or_insert_with(|| WandSession {
            world: world.to_owned(),
            first: None,
            second: None,
        });
        if session.world != world {
            *session = WandSession {
                world: world.to_owned(),
                first: None,
                second: None,
            };
        }
        if first {
            session.first = Some(pos);
        } else {
            session.second = Some(pos);
        }
    }

    /// Drop the caller's session entirely.
    pub fn clear(&mut self, caller: CallerId) {
        self.sessions.remove(&caller);
    }
}

impl SelectionTool for WandSelections {
    fn is_active(&self) -> bool {
        self.active
    }

    fn session(&self, caller: CallerId) -> Option<Box<dyn SelectionSession + '_>> {
        let session = self.sessions.get(&caller)?;
        Some(Box::new(session.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_normalizes_corners() {
        let c = Cuboid::new(BlockPos::new(10, 80, -4), BlockPos::new(-2, 60, 12));
        assert_eq!(c.minimum_point(), BlockPos::new(-2, 60, -4));
        assert_eq!(c.maximum_point(), BlockPos::new(10, 80, 12));
        assert_eq!(c.cell_rect(), CellRect::new(-1, -1, 0, 0));
    }

    #[test]
    fn complete_wand_selection() {
        let caller = CallerId::new();
        let mut wand = WandSelections::new();
        wand.set_pos(caller, "world", BlockPos::new(0, 64, 0), true);
        wand.set_pos(caller, "world", BlockPos::new(40, 64, 20), false);

        let session = wand.session(caller).unwrap();
        assert_eq!(session.selection_world().as_deref(), Some("world"));
        let cuboid = session.selection("world").unwrap().unwrap();
        assert_eq!(cuboid.maximum_point(), BlockPos::new(40, 64, 20));
    }

    #[test]
    fn incomplete_wand_selection_errors() {
        let caller = CallerId::new();
        let mut wand = WandSelections::new();
        wand.set_pos(caller, "world", BlockPos::new(0, 64, 0), true);

        let session = wand.session(caller).unwrap();
        assert_eq!(session.selection("world"), Err(SelectionError::Incomplete));
    }

    #[test]
    fn switching_worlds_resets_corners() {
        let caller = CallerId::new();
        let mut wand = WandSelections::new();
        wand.set_pos(caller, "world", BlockPos::new(0, 64, 0), true);
        wand.set_pos(caller, "world_nether", BlockPos::new(5, 64, 5), false);

        let session = wand.session(caller).unwrap();
        assert_eq!(session.selection_world().as_deref(), Some("world_nether"));
        assert_eq!(session.selection("world_nether"), Err(SelectionError::Incomplete));
        assert_eq!(session.selection("world"), Ok(None));
    }

    #[test]
    fn unknown_caller_has_no_session() {
        let wand = WandSelections::new();
        assert!(wand.session(CallerId::new()).is_none());
    }

    #[test]
    fn clear_removes_session() {
        let caller = CallerId::new();
        let mut wand = WandSelections::new();
        wand.set_pos(caller, "world", BlockPos::new(0, 0, 0), true);
        wand.clear(caller);
        assert!(wand.session(caller).is_none());
    }

    #[test]
    fn tool_can_be_deactivated() {
        let mut wand = WandSelections::new();
        assert!(wand.is_active());
        wand.set_active(false);
        assert!(!wand.is_active());
    }
}
