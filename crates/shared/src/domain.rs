use serde::{Deserialize, Serialize};

/// Lowest tier a cell can hold; an untouched cell.
pub const MIN_TIER: u8 = 0;
/// Highest tier a cell can hold; fully dark.
pub const MAX_TIER: u8 = 16;
/// Side length of the grid when none is configured.
pub const DEFAULT_GRID_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position of this cell in a row-major snapshot of a `size`×`size` grid.
    pub fn flat_index(self, size: usize) -> usize {
        self.row * size + self.col
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    Idle,
    Painting,
}

/// Visual opacity for a stored tier, in `[0.0, 1.0]`.
pub fn tier_opacity(tier: u8) -> f32 {
    f32::from(tier.min(MAX_TIER)) / f32::from(MAX_TIER)
}
