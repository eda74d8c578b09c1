//! Uniform bucket grid shared by tower ranges, projectiles and enemies.
//!
//! The index is rebuilt every tick from reusable buckets. Shapes are bucketed
//! into every cell their bounding box overlaps; pairwise resolution treats
//! bucket co-residency as a hit without re-checking true overlap.

use glam::Vec2;
use path_defence_core::CellCoord;

/// Per-cell membership lists, addressed by dense entity indices.
#[derive(Clone, Debug, Default)]
pub(crate) struct Bucket {
    pub(crate) ranges: Vec<usize>,
    pub(crate) projectiles: Vec<usize>,
    pub(crate) enemies: Vec<usize>,
}

#[derive(Clone, Debug)]
pub(crate) struct SpatialIndex {
    columns: u32,
    rows: u32,
    cell_length: f32,
    buckets: Vec<Bucket>,
}

impl SpatialIndex {
    pub(crate) fn new(columns: u32, rows: u32, cell_length: f32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cell_length,
            buckets: vec![Bucket::default(); capacity],
        }
    }

    /// Empties every bucket while keeping allocations for the next tick.
    pub(crate) fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.ranges.clear();
            bucket.projectiles.clear();
            bucket.enemies.clear();
        }
    }

    /// Inclusive cell span covered by a box, clamped to the grid. `None` when
    /// the box lies entirely outside.
    fn span(&self, min: Vec2, size: Vec2) -> Option<(u32, u32, u32, u32)> {
        if self.columns == 0 || self.rows == 0 || self.cell_length <= 0.0 {
            return None;
        }
        let max = min + size;
        if max.x < 0.0 || max.y < 0.0 {
            return None;
        }

        let last_column = self.columns - 1;
        let last_row = self.rows - 1;
        let first_column = ((min.x / self.cell_length).floor().max(0.0)) as u32;
        let first_row = ((min.y / self.cell_length).floor().max(0.0)) as u32;
        if first_column > last_column || first_row > last_row {
            return None;
        }
        let end_column = (((max.x / self.cell_length).floor()).max(0.0) as u32).min(last_column);
        let end_row = (((max.y / self.cell_length).floor()).max(0.0) as u32).min(last_row);
        Some((first_column, end_column, first_row, end_row))
    }

    fn index(&self, column: u32, row: u32) -> usize {
        (row * self.columns + column) as usize
    }

    fn insert(&mut self, min: Vec2, size: Vec2, push: impl Fn(&mut Bucket)) {
        if let Some((first_column, end_column, first_row, end_row)) = self.span(min, size) {
            for row in first_row..=end_row {
                for column in first_column..=end_column {
                    let index = self.index(column, row);
                    push(&mut self.buckets[index]);
                }
            }
        }
    }

    pub(crate) fn insert_enemy(&mut self, entity: usize, center: Vec2, size: f32) {
        let half = Vec2::splat(size / 2.0);
        self.insert(center - half, Vec2::splat(size), |bucket| {
            bucket.enemies.push(entity)
        });
    }

    pub(crate) fn insert_projectile(&mut self, entity: usize, center: Vec2, size: f32) {
        let half = Vec2::splat(size / 2.0);
        self.insert(center - half, Vec2::splat(size), |bucket| {
            bucket.projectiles.push(entity)
        });
    }

    /// Buckets a tower's range circle through its bounding box.
    pub(crate) fn insert_range(&mut self, entity: usize, center: Vec2, radius: f32) {
        let half = Vec2::splat(radius);
        self.insert(center - half, Vec2::splat(radius * 2.0), |bucket| {
            bucket.ranges.push(entity)
        });
    }

    pub(crate) fn bucket(&self, cell: CellCoord) -> Option<&Bucket> {
        if cell.column() < self.columns && cell.row() < self.rows {
            Some(&self.buckets[self.index(cell.column(), cell.row())])
        } else {
            None
        }
    }

    /// Iterator over every bucket, used for pairwise collision resolution.
    pub(crate) fn buckets(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }
}
