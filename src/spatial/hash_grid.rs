use std::collections::HashMap;

use crate::math::Vec2;

/// Integer cell coordinate `(floor(x / cell), floor(y / cell))`
pub type CellKey = (i32, i32);

/// Frame-local bucketing of entity indices by cell.
///
/// Rebuilt from scratch every frame. Cell buffers are kept between frames so
/// a steady population stops allocating.
pub struct SpatialHash {
    cell_size: f32,
    inv_cell_size: f32,
    cells: HashMap<CellKey, Vec<usize>>,
    /// Occupied cells in first-insertion order (stable traversal)
    occupied: Vec<CellKey>,
    /// Cell buffers from previous frames, ready for reuse
    spare: Vec<Vec<usize>>,
}

impl SpatialHash {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
            occupied: Vec::new(),
            spare: Vec::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Change the cell edge. Takes effect at the next `rebuild`.
    pub fn set_cell_size(&mut self, cell_size: f32) {
        self.cell_size = cell_size;
        self.inv_cell_size = 1.0 / cell_size;
    }

    #[inline]
    pub fn key(&self, pos: Vec2) -> CellKey {
        (
            (pos.x * self.inv_cell_size).floor() as i32,
            (pos.y * self.inv_cell_size).floor() as i32,
        )
    }

    pub fn clear(&mut self) {
        for (_, mut bucket) in self.cells.drain() {
            bucket.clear();
            self.spare.push(bucket);
        }
        self.occupied.clear();
    }

    pub fn insert(&mut self, index: usize, pos: Vec2) {
        let key = self.key(pos);
        let occupied = &mut self.occupied;
        let spare = &mut self.spare;
        self.cells
            .entry(key)
            .or_insert_with(|| {
                occupied.push(key);
                spare.pop().unwrap_or_default()
            })
            .push(index);
    }

    /// Clear and bucket every position by its index.
    pub fn rebuild<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = Vec2>,
    {
        self.clear();
        for (index, pos) in positions.into_iter().enumerate() {
            self.insert(index, pos);
        }
    }

    /// Occupied cells in traversal order.
    pub fn occupied(&self) -> &[CellKey] {
        &self.occupied
    }

    pub fn cell(&self, key: CellKey) -> &[usize] {
        self.cells.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Gather the 3x3 block around `key` into `out` (cleared first).
    pub fn neighborhood(&self, key: CellKey, out: &mut Vec<usize>) {
        out.clear();
        for dx in -1..=1 {
            for dy in -1..=1 {
                out.extend_from_slice(self.cell((key.0 + dx, key.1 + dy)));
            }
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_coordinates_floor_instead_of_truncating() {
        let grid = SpatialHash::new(50.0);
        assert_eq!(grid.key(Vec2::new(-1.0, 49.9)), (-1, 0));
        assert_eq!(grid.key(Vec2::new(-100.0, -50.0)), (-2, -1));
    }

    #[test]
    fn neighborhood_covers_adjacent_cells_only() {
        let mut grid = SpatialHash::new(10.0);
        grid.rebuild([
            Vec2::new(5.0, 5.0),
            Vec2::new(15.0, 15.0),
            Vec2::new(35.0, 5.0),
        ]);

        let mut out = Vec::new();
        grid.neighborhood((0, 0), &mut out);
        out.sort_unstable();
        assert_eq!(out, vec![0, 1]);
        assert_eq!(grid.occupied(), &[(0, 0), (1, 1), (3, 0)]);
    }

    #[test]
    fn rebuild_forgets_previous_frame() {
        let mut grid = SpatialHash::new(10.0);
        grid.rebuild([Vec2::new(5.0, 5.0)]);
        grid.rebuild([Vec2::new(55.0, 55.0)]);
        assert!(grid.cell((0, 0)).is_empty());
        assert_eq!(grid.cell((5, 5)), &[0]);
        assert_eq!(grid.occupied_count(), 1);
    }
}
