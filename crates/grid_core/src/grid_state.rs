use shared::{
    domain::{CellCoord, MAX_TIER, MIN_TIER},
    error::{GridError, GridResult},
    protocol::GridSnapshot,
};

/// Authoritative store of per-cell tiers for a square grid.
///
/// The store is a plain container: it validates coordinates and values but
/// never decides whether a write should happen. The increase-only rule lives
/// in [`crate::controller::apply_if_greater`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    size: usize,
    tiers: Vec<u8>,
}

impl GridState {
    pub fn new(size: usize) -> Self {
        let mut state = Self {
            size: 0,
            tiers: Vec::new(),
        };
        state.initialize(size);
        state
    }

    /// Allocates a `size`×`size` grid of zeroes, discarding any previous cells.
    pub fn initialize(&mut self, size: usize) {
        self.size = size;
        self.tiers = vec![MIN_TIER; size * size];
    }

    pub fn reset(&mut self, size: usize) {
        self.initialize(size);
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn intensity(&self, row: i64, col: i64) -> GridResult<u8> {
        let index = self.index_of(row, col)?;
        Ok(self.tiers[index])
    }

    pub fn set_intensity(&mut self, row: i64, col: i64, value: i64) -> GridResult<()> {
        let tier = u8::try_from(value)
            .ok()
            .filter(|tier| (MIN_TIER..=MAX_TIER).contains(tier))
            .ok_or(GridError::InvalidValue { value })?;
        let index = self.index_of(row, col)?;
        self.tiers[index] = tier;
        Ok(())
    }

    pub fn cell_intensity(&self, cell: CellCoord) -> GridResult<u8> {
        self.intensity(signed(cell.row), signed(cell.col))
    }

    /// Row-major copy of every tier; always `size²` entries long.
    pub fn serialize(&self) -> GridSnapshot {
        GridSnapshot(self.tiers.clone())
    }

    fn index_of(&self, row: i64, col: i64) -> GridResult<usize> {
        let out_of_range = GridError::OutOfRange {
            row,
            col,
            size: self.size,
        };
        let row = usize::try_from(row).map_err(|_| out_of_range.clone())?;
        let col = usize::try_from(col).map_err(|_| out_of_range.clone())?;
        if row >= self.size || col >= self.size {
            return Err(out_of_range);
        }
        Ok(CellCoord::new(row, col).flat_index(self.size))
    }
}

pub(crate) fn signed(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

#[cfg(test)]
#[path = "tests/grid_state_tests.rs"]
mod tests;
