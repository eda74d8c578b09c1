//! Bit-packed occupancy grid backing the world's O(1) collision checks.

use path_defence_core::CellCoord;

const SEGMENT_BIT: u8 = 0b0000_0001;
const TOWER_SHIFT: u32 = 1;
const TOWER_MASK: u8 = 0b0001_1110;

/// Dense per-cell record of path and tower occupancy.
///
/// Each cell packs a segment-presence flag into bit 0 and a four-bit tower
/// count into bits 1 through 4. The count saturates at the bit width; the
/// per-cell tower cap is enforced by the placement rule, not here.
#[derive(Clone, Debug)]
pub(crate) struct OccupancyGrid {
    columns: u32,
    rows: u32,
    cells: Vec<u8>,
}

impl OccupancyGrid {
    pub(crate) fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![0; capacity],
        }
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    pub(crate) fn in_bounds(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.in_bounds(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    pub(crate) fn segment_present(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .map_or(false, |index| self.cells[index] & SEGMENT_BIT != 0)
    }

    pub(crate) fn set_segment(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            self.cells[index] |= SEGMENT_BIT;
        }
    }

    pub(crate) fn clear_segment(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            self.cells[index] &= !SEGMENT_BIT;
        }
    }

    pub(crate) fn tower_count(&self, cell: CellCoord) -> u8 {
        self.index(cell)
            .map_or(0, |index| (self.cells[index] & TOWER_MASK) >> TOWER_SHIFT)
    }

    pub(crate) fn add_tower(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            let count = ((self.cells[index] & TOWER_MASK) >> TOWER_SHIFT).saturating_add(1);
            let capped = count.min(TOWER_MASK >> TOWER_SHIFT);
            self.cells[index] =
                (self.cells[index] & !TOWER_MASK) | ((capped << TOWER_SHIFT) & TOWER_MASK);
        }
    }

    /// Combined fast predicate: a segment or at least one tower is here.
    ///
    /// Out-of-bounds cells report as colliding so growth and placement can
    /// never escape the configured extent.
    pub(crate) fn collides(&self, cell: CellCoord) -> bool {
        match self.index(cell) {
            Some(index) => self.cells[index] != 0,
            None => true,
        }
    }
}
