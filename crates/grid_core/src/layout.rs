use shared::domain::CellCoord;

use crate::controller::PointerEvent;

/// Pixel geometry of the rendered grid, used to turn canvas-space pointer
/// positions into cell-relative [`PointerEvent`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    grid_size: usize,
    cell_width: f64,
    cell_height: f64,
}

impl CanvasLayout {
    pub fn new(grid_size: usize, cell_width: f64, cell_height: f64) -> Self {
        Self {
            grid_size,
            cell_width,
            cell_height,
        }
    }

    pub fn square(grid_size: usize, cell_px: f64) -> Self {
        Self::new(grid_size, cell_px, cell_px)
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn width(&self) -> f64 {
        self.cell_width * self.grid_size as f64
    }

    pub fn height(&self) -> f64 {
        self.cell_height * self.grid_size as f64
    }

    pub fn cell_origin(&self, cell: CellCoord) -> (f64, f64) {
        (
            cell.col as f64 * self.cell_width,
            cell.row as f64 * self.cell_height,
        )
    }

    /// Finds the cell under `(x, y)`. Points on the right or bottom outer edge,
    /// and anything beyond, have no target.
    pub fn hit_test(&self, x: f64, y: f64) -> PointerEvent {
        let inside = (0.0..self.width()).contains(&x) && (0.0..self.height()).contains(&y);
        if !inside {
            return PointerEvent::outside();
        }

        let last = self.grid_size.saturating_sub(1);
        let col = ((x / self.cell_width).floor() as usize).min(last);
        let row = ((y / self.cell_height).floor() as usize).min(last);
        let cell = CellCoord::new(row, col);
        let (origin_x, origin_y) = self.cell_origin(cell);

        PointerEvent::over(
            cell,
            x - origin_x,
            y - origin_y,
            self.cell_width,
            self.cell_height,
        )
    }
}
