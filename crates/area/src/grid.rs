use regenflag_common::BlockPos;

/// An inclusive rectangle of cells on the XZ plane.
///
/// Iteration visits every cell exactly once, X ascending in the outer loop
/// and Z ascending in the inner loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub min_x: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_z: i32,
}

impl CellRect {
    pub fn new(min_x: i32, min_z: i32, max_x: i32, max_z: i32) -> Self {
        Self {
            min_x,
            min_z,
            max_x,
            max_z,
        }
    }

    /// Cells covering the blocks between two corners (inclusive).
    ///
    /// The corners are expected as minimum and maximum points; each is
    /// converted to the cell that contains it.
    pub fn from_blocks(min: BlockPos, max: BlockPos) -> Self {
        Self::new(min.cell_x(), min.cell_z(), max.cell_x(), max.cell_z())
    }

    /// Square of cells within `radius` (in cells) of a center cell.
    ///
    /// A negative radius is treated as zero.
    pub fn around(x: i32, z: i32, radius: i32) -> Self {
        let r = radius.max(0);
        Self::new(
            x.saturating_sub(r),
            z.saturating_sub(r),
            x.saturating_add(r),
            z.saturating_add(r),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_z > self.max_z
    }

    /// Number of cells in the rectangle.
    pub fn cell_count(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let width = (i64::from(self.max_x) - i64::from(self.min_x) + 1) as u64;
        let depth = (i64::from(self.max_z) - i64::from(self.min_z) + 1) as u64;
        width * depth
    }

    pub fn contains(&self, x: i32, z: i32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_z..=self.max_z).contains(&z)
    }

    /// Every `(x, z)` in the rectangle, X outer and Z inner, ascending.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let (min_z, max_z) = (self.min_z, self.max_z);
        (self.min_x..=self.max_x).flat_map(move |x| (min_z..=max_z).map(move |z| (x, z)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_blocks_converts_each_corner() {
        let rect = CellRect::from_blocks(BlockPos::new(-1, 0, 15), BlockPos::new(33, 255, 16));
        assert_eq!(rect, CellRect::new(-1, 0, 2, 1));
    }

    #[test]
    fn cells_are_row_major_x_then_z() {
        let rect = CellRect::new(0, 5, 1, 6);
        let cells: Vec<_> = rect.cells().collect();
        assert_eq!(cells, vec![(0, 5), (0, 6), (1, 5), (1, 6)]);
    }

    #[test]
    fn cell_count_matches_iteration() {
        let rect = CellRect::new(-3, -2, 4, 7);
        assert_eq!(rect.cell_count(), 8 * 10);
        assert_eq!(rect.cells().count() as u64, rect.cell_count());
    }

    #[test]
    fn single_cell_rect() {
        let rect = CellRect::new(4, 4, 4, 4);
        assert_eq!(rect.cell_count(), 1);
        assert_eq!(rect.cells().collect::<Vec<_>>(), vec![(4, 4)]);
    }

    #[test]
    fn inverted_rect_is_empty() {
        let rect = CellRect::new(2, 0, 1, 0);
        assert!(rect.is_empty());
        assert_eq!(rect.cell_count(), 0);
        assert_eq!(rect.cells().count(), 0);
    }

    #[test]
    fn around_builds_square() {
        let rect = CellRect::around(10, -10, 2);
        assert_eq!(rect, CellRect::new(8, -12, 12, -8));
        assert_eq!(rect.cell_count(), 25);
        assert!(rect.contains(12, -8));
        assert!(!rect.contains(13, -8));
    }

    #[test]
    fn around_with_negative_radius_is_single_cell() {
        assert_eq!(CellRect::around(3, 3, -4), CellRect::new(3, 3, 3, 3));
    }
}
