use glam::{DVec3, IVec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shift converting block coordinates to cell coordinates.
pub const CELL_SHIFT: u32 = 4;

/// Side length of a cell in blocks.
pub const CELL_SIZE: i32 = 1 << CELL_SHIFT;

/// Convert a block coordinate to the coordinate of the cell containing it.
///
/// Floors toward negative infinity, so block `-1` lies in cell `-1`.
pub fn block_to_cell(block: i32) -> i32 {
    block >> CELL_SHIFT
}

/// Case-insensitive comparison folding every character, not just ASCII.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Unique identifier for a command caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CallerId(pub Uuid);

impl CallerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CallerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Integer block position in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos(pub IVec3);

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self(IVec3::new(x, y, z))
    }

    pub fn x(&self) -> i32 {
        self.0.x
    }

    pub fn y(&self) -> i32 {
        self.0.y
    }

    pub fn z(&self) -> i32 {
        self.0.z
    }

    /// Cell X coordinate containing this block.
    pub fn cell_x(&self) -> i32 {
        block_to_cell(self.0.x)
    }

    /// Cell Z coordinate containing this block.
    pub fn cell_z(&self) -> i32 {
        block_to_cell(self.0.z)
    }

    /// Component-wise minimum of two positions.
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    /// Component-wise maximum of two positions.
    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }
}

/// Where an interactive caller currently stands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub world: String,
    pub position: DVec3,
}

impl Location {
    pub fn new(world: impl Into<String>, position: DVec3) -> Self {
        Self {
            world: world.into(),
            position,
        }
    }

    /// The block containing the precise position.
    ///
    /// Coordinates beyond the `i32` range clamp to its nearest bound. The
    /// position must be finite.
    pub fn block_pos(&self) -> BlockPos {
        debug_assert!(
            self.position.is_finite(),
            "non-finite position {}",
            self.position
        );
        let floored = self.position.floor().clamp(
            DVec3::splat(f64::from(i32::MIN)),
            DVec3::splat(f64::from(i32::MAX)),
        );
        BlockPos::new(floored.x as i32, floored.y as i32, floored.z as i32)
    }
}

/// One grid cell within one world.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPosition {
    world: String,
    x: i32,
    z: i32,
}

impl CellPosition {
    pub fn new(world: impl Into<String>, x: i32, z: i32) -> Self {
        Self {
            world: world.into(),
            x,
            z,
        }
    }

    /// The cell containing a block.
    pub fn containing(world: impl Into<String>, block: BlockPos) -> Self {
        Self::new(world, block.cell_x(), block.cell_z())
    }

    pub fn world(&self) -> &str {
        &self.world
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn z(&self) -> i32 {
        self.z
    }
}

/// Whether a command marks cells or clears their marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagIntent {
    Flag,
    Unflag,
}

impl FlagIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Unflag => "unflag",
        }
    }
}

impl std::fmt::Display for FlagIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifetime of a flag placed on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    /// Expires after the configured flag duration.
    Temporary,
    /// Never expires.
    Eternal,
}

/// Ordered cells in a single world, in the order they were generated.
///
/// Cells can only be added through [`ResolvedArea::push`], which stamps them
/// with the area's world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedArea {
    world: String,
    cells: Vec<CellPosition>,
}

impl ResolvedArea {
    /// Create an empty area in the given world.
    pub fn new(world: impl Into<String>) -> Self {
        Self {
            world: world.into(),
            cells: Vec::new(),
        }
    }

    /// Area holding exactly one cell.
    pub fn single(world: impl Into<String>, x: i32, z: i32) -> Self {
        let mut area = Self::new(world);
        area.push(x, z);
        area
    }

    pub fn push(&mut self, x: i32, z: i32) {
        self.cells.push(CellPosition::new(self.world.clone(), x, z));
    }

    pub fn world(&self) -> &str {
        &self.world
    }

    pub fn cells(&self) -> &[CellPosition] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CellPosition> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a ResolvedArea {
    type Item = &'a CellPosition;
    type IntoIter = std::slice::Iter<'a, CellPosition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
