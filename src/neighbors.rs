//! Precomputed toroidal adjacency.

/// For every cell of an `height x width` toroidal grid, the indices of its 8 neighbors.
///
/// Built once per grid shape and never mutated afterwards. The order inside each
/// group is fixed: row offsets `-1, 0, 1` outer, column offsets `-1, 0, 1` inner,
/// skipping the cell itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborIndex {
    height: usize,
    width: usize,
    groups: Vec<[usize; 8]>,
}

impl NeighborIndex {
    /// Builds the index for a grid of the given shape.
    ///
    /// Row wraparound comes from wrapping the flattened offset by the full grid
    /// size; column wraparound from wrapping within the row. For `height == 1`
    /// or `width == 1` some entries repeat or point back at the cell itself.
    pub fn build(height: usize, width: usize) -> Self {
        assert!(height > 0 && width > 0, "grid dimensions must be positive");

        let size = (height * width) as i64;
        let w = width as i64;
        let groups = (0..size)
            .map(|index| {
                let mut group = [0usize; 8];
                let mut slot = 0;
                for dx in -1..=1i64 {
                    for dy in -1..=1i64 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let row = (index + w * dx).rem_euclid(size) / w;
                        let neighbor = (index + dy).rem_euclid(w) + row * w;
                        group[slot] = neighbor as usize;
                        slot += 1;
                    }
                }
                group
            })
            .collect();

        NeighborIndex {
            height,
            width,
            groups,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The 8 neighbors of `index`. Panics if `index` is outside the grid.
    pub fn neighbors(&self, index: usize) -> &[usize; 8] {
        &self.groups[index]
    }

    /// Total neighbor entries, always `8 * height * width`.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|group| group.len()).sum()
    }
}
