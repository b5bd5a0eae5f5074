use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

use regenflag_area::CellRect;
use regenflag_common::{CellPosition, FlagKind};
use serde::Serialize;

/// The flag-state store. Calls are fire-and-forget.
#[cfg_attr(test, mockall::automock)]
pub trait Flagger {
    /// Flag every chunk within `radius` chunks of `(x, z)`.
    fn flag_cells_in_radius(&self, world: &str, x: i32, z: i32, radius: i32, kind: FlagKind);

    /// Clear any flag on exactly one chunk.
    fn unflag_cell(&self, world: &str, x: i32, z: i32);
}

/// A flag as stored by [`MemoryFlagger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlagEntry {
    pub kind: FlagKind,
    /// `None` for flags that never expire.
    pub expires_at: Option<SystemTime>,
}

impl FlagEntry {
    pub fn is_live(&self, now: SystemTime) -> bool {
        self.expires_at.is_none_or(|expiry| expiry > now)
    }
}

/// In-memory flag store keyed by chunk.
///
/// Uses BTreeMap so listings come out in `(world, x, z)` order.
pub struct MemoryFlagger {
    flag_duration: Duration,
    clock: Box<dyn Fn() -> SystemTime>,
    flags: RefCell<BTreeMap<CellPosition, FlagEntry>>,
}

impl MemoryFlagger {
    /// Store whose temporary flags last `flag_duration` of wall-clock time.
    pub fn new(flag_duration: Duration) -> Self {
        Self::with_clock(flag_duration, SystemTime::now)
    }

    /// Store reading the current time from `clock`.
    pub fn with_clock(
        flag_duration: Duration,
        clock: impl Fn() -> SystemTime + 'static,
    ) -> Self {
        Self {
            flag_duration,
            clock: Box::new(clock),
            flags: RefCell::new(BTreeMap::new()),
        }
    }

    /// Whether the chunk carries a flag that has not expired.
    pub fn is_flagged(&self, world: &str, x: i32, z: i32) -> bool {
        let now = (self.clock)();
        self.flags
            .borrow()
            .get(&CellPosition::new(world, x, z))
            .is_some_and(|entry| entry.is_live(now))
    }

    /// The stored entry for a chunk, expired or not.
    pub fn entry(&self, world: &str, x: i32, z: i32) -> Option<FlagEntry> {
        self.flags
            .borrow()
            .get(&CellPosition::new(world, x, z))
            .copied()
    }

    /// All stored flags in `(world, x, z)` order.
    pub fn flags(&self) -> Vec<(CellPosition, FlagEntry)> {
        self.flags
            .borrow()
            .iter()
            .map(|(cell, entry)| (cell.clone(), *entry))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.flags.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.borrow().is_empty()
    }

    fn entry_for(&self, kind: FlagKind) -> FlagEntry {
        let expires_at = match kind {
            FlagKind::Eternal => None,
            // Past the end of representable time the flag never expires.
            FlagKind::Temporary => (self.clock)().checked_add(self.flag_duration),
        };
        FlagEntry { kind, expires_at }
    }
}

impl Flagger for MemoryFlagger {
    fn flag_cells_in_radius(&self, world: &str, x: i32, z: i32, radius: i32, kind: FlagKind) {
        let entry = self.entry_for(kind);
        let mut flags = self.flags.borrow_mut();
        for (cx, cz) in CellRect::around(x, z, radius).cells() {
            let cell = CellPosition::new(world, cx, cz);
            // Temporary flags never downgrade an eternal one.
            if kind == FlagKind::Temporary
                && flags.get(&cell).is_some_and(|e| e.kind == FlagKind::Eternal)
            {
                continue;
            }
            tracing::trace!(world, x = cx, z = cz, ?kind, "flagging chunk");
            flags.insert(cell, entry);
        }
    }

    fn unflag_cell(&self, world: &str, x: i32, z: i32) {
        if self
            .flags
            .borrow_mut()
            .remove(&CellPosition::new(world, x, z))
            .is_some()
        {
            tracing::trace!(world, x, z, "unflagged chunk");
        }
    }
}
