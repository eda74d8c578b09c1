//! Directional path segment tree supporting growth, undo and leaf queries.
//!
//! Segments live in a per-path arena and are addressed by [`SegmentId`].
//! Undo detaches a segment back into a garbage state instead of deallocating
//! it; the parent back-reference survives detachment so enemies already
//! walking toward the segment keep following the chain toward the root.

use glam::Vec2;
use path_defence_core::{
    Aabb, CellCoord, GrowthError, PathId, SegmentId, SegmentVariant, Side,
};

use crate::grid::OccupancyGrid;

/// One placed unit of the growable maze.
#[derive(Clone, Debug)]
pub(crate) struct Segment {
    cell: CellCoord,
    variant: SegmentVariant,
    children: [Option<SegmentId>; 4],
    parent: Option<(SegmentId, Side)>,
    attached: bool,
}

impl Segment {
    fn new(cell: CellCoord, variant: SegmentVariant, parent: Option<(SegmentId, Side)>) -> Self {
        Self {
            cell,
            variant,
            children: [None; 4],
            parent,
            attached: true,
        }
    }

    pub(crate) fn cell(&self) -> CellCoord {
        self.cell
    }

    pub(crate) fn variant(&self) -> SegmentVariant {
        self.variant
    }

    pub(crate) fn parent(&self) -> Option<SegmentId> {
        self.parent.map(|(id, _)| id)
    }

    pub(crate) fn child(&self, side: Side) -> Option<SegmentId> {
        self.children[side.index()]
    }

    fn set_child(&mut self, side: Side, child: Option<SegmentId>) {
        self.children[side.index()] = child;
    }
}

/// A single growable path tree owned by the world.
#[derive(Clone, Debug)]
pub(crate) struct Path {
    id: PathId,
    segments: Vec<Segment>,
    root: SegmentId,
    leaves: Vec<SegmentId>,
    undo_stack: Vec<SegmentId>,
}

impl Path {
    /// Creates a path with its two-segment starting spine.
    ///
    /// The root sits on `origin` and an all-open child hangs off its right
    /// side; both cells are marked in the occupancy grid immediately.
    pub(crate) fn new(id: PathId, origin: CellCoord, grid: &mut OccupancyGrid) -> Self {
        let mut path = Self {
            id,
            segments: Vec::new(),
            root: SegmentId::new(0),
            leaves: Vec::new(),
            undo_stack: Vec::new(),
        };
        let root = path.alloc(Segment::new(origin, SegmentVariant::Open, None));
        path.root = root;

        let spine_cell = CellCoord::new(origin.column().saturating_add(1), origin.row());
        let spine = path.alloc(Segment::new(
            spine_cell,
            SegmentVariant::Open,
            Some((root, Side::Right)),
        ));
        if let Some(segment) = path.segments.get_mut(root.get() as usize) {
            segment.set_child(Side::Right, Some(spine));
        }
        path.leaves.push(spine);

        grid.set_segment(origin);
        grid.set_segment(spine_cell);
        path
    }

    fn alloc(&mut self, segment: Segment) -> SegmentId {
        let id = SegmentId::new(self.segments.len() as u32);
        self.segments.push(segment);
        id
    }

    pub(crate) fn id(&self) -> PathId {
        self.id
    }

    pub(crate) fn root(&self) -> SegmentId {
        self.root
    }

    fn slot(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id.get() as usize)
    }

    pub(crate) fn is_attached(&self, id: SegmentId) -> bool {
        self.slot(id).map_or(false, |segment| segment.attached)
    }

    pub(crate) fn segment_cell(&self, id: SegmentId) -> Option<CellCoord> {
        self.slot(id).map(|segment| segment.cell())
    }

    pub(crate) fn parent_of(&self, id: SegmentId) -> Option<SegmentId> {
        self.slot(id).and_then(|segment| segment.parent())
    }

    pub(crate) fn child_of(&self, id: SegmentId, side: Side) -> Option<SegmentId> {
        self.slot(id).and_then(|segment| segment.child(side))
    }

    /// Cached leaves in insertion order. Entries may be conservatively stale;
    /// [`Path::is_leaf`] is the authoritative predicate.
    pub(crate) fn leaves(&self) -> &[SegmentId] {
        &self.leaves
    }

    pub(crate) fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    fn bounds(&self, segment: &Segment, cell_length: f32) -> Aabb {
        let min = Vec2::new(
            segment.cell().column() as f32 * cell_length,
            segment.cell().row() as f32 * cell_length,
        );
        Aabb::new(min, Vec2::splat(cell_length))
    }

    /// Determines which side of `receiver` the point `at` touches.
    ///
    /// Horizontal sides win over vertical ones, and ties on a midpoint
    /// resolve toward right/bottom. Returns `None` when the point sits
    /// diagonally outside both spans.
    pub(crate) fn side_toward(
        &self,
        receiver: SegmentId,
        at: Vec2,
        cell_length: f32,
    ) -> Option<Side> {
        let segment = self.slot(receiver)?;
        let bounds = self.bounds(segment, cell_length);
        let min = bounds.min();
        let mid = bounds.center();
        let max = min + bounds.size();

        if at.y >= min.y && at.y <= max.y {
            if at.x < mid.x {
                return Some(Side::Left);
            }
            return Some(Side::Right);
        }
        if at.x >= min.x && at.x <= max.x {
            if at.y < mid.y {
                return Some(Side::Top);
            }
            return Some(Side::Bottom);
        }
        None
    }

    /// A segment is a leaf iff some structurally open side is unoccupied and
    /// its adjacent cell is free of any other segment or tower.
    ///
    /// The adjacency check goes through the occupancy grid, so leaf status
    /// couples to global map state, not just local child slots.
    pub(crate) fn is_leaf(&self, id: SegmentId, grid: &OccupancyGrid) -> bool {
        let Some(segment) = self.slot(id) else {
            return false;
        };
        if !segment.attached {
            return false;
        }
        Side::ALL.into_iter().any(|side| {
            segment.variant().permits(side)
                && segment.child(side).is_none()
                && side
                    .neighbor(segment.cell())
                    .map_or(false, |neighbor| !grid.collides(neighbor))
        })
    }

    /// Attempts to attach a `variant` child where `at` touches `receiver`.
    ///
    /// On success the child is arena-allocated at the side-adjacent cell,
    /// back-references are wired, the occupancy bit is set, the leaf cache
    /// and undo stack are updated, and the side and cell used are reported.
    pub(crate) fn try_insert_child(
        &mut self,
        receiver: SegmentId,
        at: Vec2,
        variant: SegmentVariant,
        grid: &mut OccupancyGrid,
        cell_length: f32,
    ) -> Result<(SegmentId, Side, CellCoord), GrowthError> {
        let side = self
            .side_toward(receiver, at, cell_length)
            .ok_or(GrowthError::SideBlocked)?;

        let receiver_segment = self.slot(receiver).ok_or(GrowthError::NoSegmentNearby)?;
        debug_assert!(receiver_segment.attached, "receiver must be attached");
        if !receiver_segment.variant().permits(side) || receiver_segment.child(side).is_some() {
            return Err(GrowthError::SideBlocked);
        }
        if !variant.permits(side.opposite()) {
            return Err(GrowthError::IncompatibleVariant);
        }

        let cell = side
            .neighbor(receiver_segment.cell())
            .ok_or(GrowthError::OutOfBounds)?;
        if !grid.in_bounds(cell) {
            return Err(GrowthError::OutOfBounds);
        }
        if grid.collides(cell) {
            return Err(GrowthError::Occupied);
        }

        let child = self.alloc(Segment::new(cell, variant, Some((receiver, side))));
        if let Some(segment) = self.segments.get_mut(receiver.get() as usize) {
            segment.set_child(side, Some(child));
        }
        grid.set_segment(cell);
        self.leaves.push(child);
        if !self.is_leaf(receiver, grid) {
            if let Some(position) = self.leaves.iter().position(|leaf| *leaf == receiver) {
                let _ = self.leaves.remove(position);
            }
        }
        self.undo_stack.push(child);
        Ok((child, side, cell))
    }

    /// Reverts the most recent insertion, last inserted first.
    ///
    /// Clears exactly the popped segment's occupancy bit, detaches it from
    /// its parent and re-admits the parent to the leaf cache. A no-op on an
    /// empty stack.
    pub(crate) fn undo(&mut self, grid: &mut OccupancyGrid) -> Option<(SegmentId, CellCoord)> {
        let id = self.undo_stack.pop()?;
        let (cell, parent_link) = {
            let segment = self.slot(id)?;
            (segment.cell(), segment.parent)
        };

        if let Some((parent, side)) = parent_link {
            if let Some(segment) = self.segments.get_mut(parent.get() as usize) {
                segment.set_child(side, None);
            }
        }
        if let Some(segment) = self.segments.get_mut(id.get() as usize) {
            segment.attached = false;
        }
        grid.clear_segment(cell);

        if let Some(position) = self.leaves.iter().position(|leaf| *leaf == id) {
            let _ = self.leaves.remove(position);
        }
        if let Some((parent, _)) = parent_link {
            if !self.leaves.contains(&parent) {
                self.leaves.push(parent);
            }
        }
        Some((id, cell))
    }

    /// Depth-first visit of every attached segment, side order left, right,
    /// top, bottom.
    pub(crate) fn for_each_attached<F>(&self, mut visit: F)
    where
        F: FnMut(SegmentId, &Segment),
    {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(segment) = self.slot(id) else {
                continue;
            };
            visit(id, segment);
            for side in Side::ALL {
                if let Some(child) = segment.child(side) {
                    stack.push(child);
                }
            }
        }
    }

    /// Full-tree collision scan: first attached segment overlapping `probe`.
    pub(crate) fn find_overlapping(&self, probe: &Aabb, cell_length: f32) -> Option<SegmentId> {
        let mut found = None;
        self.for_each_attached(|id, segment| {
            if found.is_none() && self.bounds(segment, cell_length).overlaps(probe) {
                found = Some(id);
            }
        });
        found
    }

    /// Linear scan for the attached segment nearest to `at`.
    pub(crate) fn nearest_segment(&self, at: Vec2, cell_length: f32) -> Option<SegmentId> {
        let mut nearest = self.root;
        let mut nearest_distance = self
            .slot(self.root)
            .map(|segment| self.bounds(segment, cell_length).center().distance(at))?;
        self.for_each_attached(|id, segment| {
            let distance = self.bounds(segment, cell_length).center().distance(at);
            if distance < nearest_distance {
                nearest = id;
                nearest_distance = distance;
            }
        });
        Some(nearest)
    }

    /// Nearest segment that still qualifies as a leaf.
    ///
    /// `probe_collides` is the occupancy verdict for the *search point*; when
    /// it reports a collision no candidate beats the root. The check
    /// deliberately does not consider the candidate's eventual placement box.
    pub(crate) fn nearest_open_leaf(
        &self,
        at: Vec2,
        grid: &OccupancyGrid,
        cell_length: f32,
        probe_collides: bool,
    ) -> Option<SegmentId> {
        let mut nearest = self.root;
        let mut nearest_distance = self
            .slot(self.root)
            .map(|segment| self.bounds(segment, cell_length).center().distance(at))?;
        self.for_each_attached(|id, segment| {
            let distance = self.bounds(segment, cell_length).center().distance(at);
            if distance < nearest_distance && !probe_collides {
                nearest = id;
                nearest_distance = distance;
            }
        });
        if self.is_leaf(nearest, grid) {
            Some(nearest)
        } else {
            None
        }
    }

    /// Rebuilds the set of open leaves by full traversal.
    pub(crate) fn open_leaves_scan(&self, grid: &OccupancyGrid) -> Vec<SegmentId> {
        let mut leaves = Vec::new();
        self.for_each_attached(|id, _| {
            if self.is_leaf(id, grid) {
                leaves.push(id);
            }
        });
        leaves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Path, OccupancyGrid, f32) {
        let mut grid = OccupancyGrid::new(8, 8);
        let path = Path::new(PathId::new(0), CellCoord::new(3, 3), &mut grid);
        (path, grid, 10.0)
    }

    fn center_of(cell: CellCoord, cell_length: f32) -> Vec2 {
        Vec2::new(
            cell.column() as f32 * cell_length + cell_length / 2.0,
            cell.row() as f32 * cell_length + cell_length / 2.0,
        )
    }

    #[test]
    fn starting_spine_occupies_two_cells() {
        let (path, grid, _) = fixture();
        assert!(grid.segment_present(CellCoord::new(3, 3)));
        assert!(grid.segment_present(CellCoord::new(4, 3)));
        assert_eq!(path.leaves().len(), 1);
        assert_eq!(path.undo_depth(), 0);
    }

    #[test]
    fn side_ties_resolve_toward_right_and_bottom() {
        let (path, _, cell_length) = fixture();
        let root = path.root();
        let mid = center_of(CellCoord::new(3, 3), cell_length);

        assert_eq!(
            path.side_toward(root, mid, cell_length),
            Some(Side::Right),
            "a point on both midlines lands inside the vertical span first",
        );
        let below = Vec2::new(mid.x, 3.0 * cell_length + cell_length + 1.0);
        assert_eq!(path.side_toward(root, below, cell_length), Some(Side::Bottom));
        let above = Vec2::new(mid.x, 3.0 * cell_length - 1.0);
        assert_eq!(path.side_toward(root, above, cell_length), Some(Side::Top));
    }

    #[test]
    fn diagonal_points_touch_no_side() {
        let (path, _, cell_length) = fixture();
        let root = path.root();
        let diagonal = Vec2::new(2.0 * cell_length, 2.0 * cell_length);
        assert_eq!(path.side_toward(root, diagonal, cell_length), None);
    }

    #[test]
    fn insert_rejects_structurally_blocked_sides() {
        let (mut path, mut grid, cell_length) = fixture();
        let spine = path.leaves()[0];
        let spine_cell = path.segment_cell(spine).expect("spine cell");

        // A vertical child on the spine's right side, then try to grow left
        // out of it: the variant forbids horizontal connections.
        let right_of_spine = Vec2::new(
            (spine_cell.column() + 1) as f32 * cell_length + 1.0,
            spine_cell.row() as f32 * cell_length + 1.0,
        );
        let (child, side, _) = path
            .try_insert_child(
                spine,
                right_of_spine,
                SegmentVariant::TeeLeft,
                &mut grid,
                cell_length,
            )
            .expect("insert vertical child");
        assert_eq!(side, Side::Right);

        let child_cell = path.segment_cell(child).expect("child cell");
        let right_of_child = Vec2::new(
            (child_cell.column() + 1) as f32 * cell_length + 1.0,
            child_cell.row() as f32 * cell_length + 1.0,
        );
        assert_eq!(
            path.try_insert_child(
                child,
                right_of_child,
                SegmentVariant::Open,
                &mut grid,
                cell_length,
            ),
            Err(GrowthError::SideBlocked),
        );
    }

    #[test]
    fn insert_rejects_candidates_closed_toward_parent() {
        let (mut path, mut grid, cell_length) = fixture();
        let spine = path.leaves()[0];
        let spine_cell = path.segment_cell(spine).expect("spine cell");
        let right = Vec2::new(
            (spine_cell.column() + 1) as f32 * cell_length + 1.0,
            spine_cell.row() as f32 * cell_length + 1.0,
        );

        assert_eq!(
            path.try_insert_child(
                spine,
                right,
                SegmentVariant::RightBottom,
                &mut grid,
                cell_length,
            ),
            Err(GrowthError::IncompatibleVariant),
            "a right/bottom elbow exposes no left side to hang from",
        );
    }

    #[test]
    fn insert_rejects_occupied_cells() {
        let (mut path, mut grid, cell_length) = fixture();
        let root = path.root();
        let root_cell = path.segment_cell(root).expect("root cell");
        let left_cell = CellCoord::new(root_cell.column() - 1, root_cell.row());
        grid.add_tower(left_cell);

        let left = Vec2::new(
            root_cell.column() as f32 * cell_length - 1.0,
            root_cell.row() as f32 * cell_length + 1.0,
        );
        assert_eq!(
            path.try_insert_child(root, left, SegmentVariant::Open, &mut grid, cell_length),
            Err(GrowthError::Occupied),
        );
    }

    #[test]
    fn undo_restores_leaves_and_occupancy_exactly() {
        let (mut path, mut grid, cell_length) = fixture();
        let spine = path.leaves()[0];
        let spine_cell = path.segment_cell(spine).expect("spine cell");
        let leaves_before = path.leaves().to_vec();

        let right = Vec2::new(
            (spine_cell.column() + 1) as f32 * cell_length + 1.0,
            spine_cell.row() as f32 * cell_length + 1.0,
        );
        let (child, _, child_cell) = path
            .try_insert_child(spine, right, SegmentVariant::Open, &mut grid, cell_length)
            .expect("insert");
        assert!(grid.segment_present(child_cell));
        assert_eq!(path.undo_depth(), 1);

        let undone = path.undo(&mut grid);
        assert_eq!(undone, Some((child, child_cell)));
        assert!(!grid.segment_present(child_cell));
        assert_eq!(path.leaves(), leaves_before.as_slice());
        assert_eq!(path.undo_depth(), 0);
        assert!(!path.is_attached(child));
    }

    #[test]
    fn undo_on_empty_stack_is_a_no_op() {
        let (mut path, mut grid, _) = fixture();
        assert_eq!(path.undo(&mut grid), None);
    }

    #[test]
    fn detached_segments_keep_their_parent_link() {
        let (mut path, mut grid, cell_length) = fixture();
        let spine = path.leaves()[0];
        let spine_cell = path.segment_cell(spine).expect("spine cell");
        let right = Vec2::new(
            (spine_cell.column() + 1) as f32 * cell_length + 1.0,
            spine_cell.row() as f32 * cell_length + 1.0,
        );
        let (child, _, _) = path
            .try_insert_child(spine, right, SegmentVariant::Open, &mut grid, cell_length)
            .expect("insert");

        let _ = path.undo(&mut grid).expect("undo");
        assert_eq!(path.parent_of(child), Some(spine));
    }

    #[test]
    fn leaf_status_couples_to_foreign_occupancy() {
        let (path, mut grid, _) = fixture();
        let spine = path.leaves()[0];
        let spine_cell = path.segment_cell(spine).expect("spine cell");
        assert!(path.is_leaf(spine, &grid));

        // Wall the spine in with towers on every open neighbor.
        for side in Side::ALL {
            if let Some(neighbor) = side.neighbor(spine_cell) {
                if !grid.segment_present(neighbor) {
                    grid.add_tower(neighbor);
                }
            }
        }
        assert!(!path.is_leaf(spine, &grid));
    }

    #[test]
    fn nearest_open_leaf_checks_probe_point_not_placement() {
        let (path, mut grid, cell_length) = fixture();
        let spine = path.leaves()[0];
        let spine_cell = path.segment_cell(spine).expect("spine cell");
        let near_spine = center_of(spine_cell, cell_length) + Vec2::new(cell_length, 0.0);

        // With a clear probe point the spine wins over the root.
        assert_eq!(
            path.nearest_open_leaf(near_spine, &grid, cell_length, false),
            Some(spine),
        );

        // A colliding probe point pins the scan to the root even though the
        // spine sits nearer and would be a perfectly valid open leaf; the
        // quirk is that the candidate's placement box is never consulted.
        grid.add_tower(CellCoord::new(5, 3));
        assert_eq!(
            path.nearest_open_leaf(near_spine, &grid, cell_length, true),
            Some(path.root()),
            "the scan never leaves the root when the probe point collides",
        );
    }

    #[test]
    fn open_leaves_scan_matches_is_leaf() {
        let (path, grid, _) = fixture();
        let scanned = path.open_leaves_scan(&grid);
        assert!(scanned.contains(&path.root()), "root keeps three open sides");
        assert!(scanned.contains(&path.leaves()[0]));
        for leaf in scanned {
            assert!(path.is_leaf(leaf, &grid));
        }
    }
}
