//! Paint gesture state machine and prediction round trip.

use std::sync::Arc;

use futures::{future::BoxFuture, FutureExt};
use shared::{
    domain::{CellCoord, GesturePhase},
    error::GridResult,
    protocol::PredictionLabel,
};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    grid_state::{signed, GridState},
    intensity::compute_tier,
    prediction::{PredictionClient, PredictionError},
};

/// Rendering surface driven by the controller. Implementations own their
/// own interior mutability; the controller only ever holds a shared handle.
pub trait GridDisplay: Send + Sync {
    /// `tier` is the stored (biased) tier; opacity is `tier / 16`.
    fn activate_cell(&self, cell: CellCoord, tier: u8);
    fn deactivate_all(&self);
    fn show_prediction(&self, label: &PredictionLabel);
    fn show_placeholder(&self);
    fn show_unresolved(&self, error: &PredictionError);
}

/// A pointer sample already resolved against the rendered grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub target: Option<CellCoord>,
    pub local_x: f64,
    pub local_y: f64,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl PointerEvent {
    pub fn over(
        cell: CellCoord,
        local_x: f64,
        local_y: f64,
        cell_width: f64,
        cell_height: f64,
    ) -> Self {
        Self {
            target: Some(cell),
            local_x,
            local_y,
            cell_width,
            cell_height,
        }
    }

    pub fn outside() -> Self {
        Self {
            target: None,
            local_x: 0.0,
            local_y: 0.0,
            cell_width: 0.0,
            cell_height: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    /// No cell was painted: idle pointer or no target under it.
    Ignored,
    Unchanged { current: u8 },
    Raised { tier: u8 },
}

/// Writes `candidate` only when it is strictly greater than the stored tier.
/// Returns whether the cell changed.
pub fn apply_if_greater(
    state: &mut GridState,
    row: i64,
    col: i64,
    candidate: u8,
) -> GridResult<bool> {
    let current = state.intensity(row, col)?;
    if candidate <= current {
        return Ok(false);
    }
    state.set_intensity(row, col, i64::from(candidate))?;
    Ok(true)
}

pub struct GridInteractionController {
    state: GridState,
    phase: GesturePhase,
    display: Arc<dyn GridDisplay>,
    client: Arc<dyn PredictionClient>,
}

impl GridInteractionController {
    pub fn new(
        size: usize,
        display: Arc<dyn GridDisplay>,
        client: Arc<dyn PredictionClient>,
    ) -> Self {
        Self {
            state: GridState::new(size),
            phase: GesturePhase::Idle,
            display,
            client,
        }
    }

    pub fn size(&self) -> usize {
        self.state.size()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn pointer_pressed(&mut self, event: &PointerEvent) -> GridResult<PaintOutcome> {
        let Some(cell) = event.target else {
            debug!("press outside grid ignored");
            return Ok(PaintOutcome::Ignored);
        };

        let outcome = self.paint(cell, event)?;
        if self.phase == GesturePhase::Idle {
            debug!(row = cell.row, col = cell.col, "paint gesture started");
        }
        self.phase = GesturePhase::Painting;
        Ok(outcome)
    }

    pub fn pointer_moved(&mut self, event: &PointerEvent) -> GridResult<PaintOutcome> {
        if self.phase == GesturePhase::Idle {
            return Ok(PaintOutcome::Ignored);
        }
        match event.target {
            Some(cell) => self.paint(cell, event),
            None => Ok(PaintOutcome::Ignored),
        }
    }

    /// Ends the gesture; the release may land anywhere, including off the grid.
    pub fn pointer_released(&mut self) {
        if self.phase == GesturePhase::Painting {
            debug!("paint gesture ended");
        }
        self.phase = GesturePhase::Idle;
    }

    /// Captures the current snapshot and returns a future that resolves the
    /// prediction. The future does not borrow the controller, so painting can
    /// continue while it is in flight.
    pub fn predict(&self) -> BoxFuture<'static, Result<PredictionLabel, PredictionError>> {
        let snapshot = self.state.serialize();
        let client = Arc::clone(&self.client);
        let display = Arc::clone(&self.display);
        info!(cells = snapshot.len(), "requesting prediction");

        async move {
            match client.predict(&snapshot).await {
                Ok(label) => {
                    info!(%label, "prediction received");
                    display.show_prediction(&label);
                    Ok(label)
                }
                Err(err) => {
                    warn!(error = %err, "prediction failed");
                    display.show_unresolved(&err);
                    Err(err)
                }
            }
        }
        .boxed()
    }

    /// Runs [`Self::predict`] on the current tokio runtime.
    pub fn spawn_predict(&self) -> JoinHandle<Result<PredictionLabel, PredictionError>> {
        tokio::spawn(self.predict())
    }

    pub fn reset(&mut self) {
        self.display.deactivate_all();
        let size = self.state.size();
        self.state.reset(size);
        self.display.show_placeholder();
        debug!(size, "grid reset");
    }

    fn paint(&mut self, cell: CellCoord, event: &PointerEvent) -> GridResult<PaintOutcome> {
        let candidate = compute_tier(
            event.local_x,
            event.local_y,
            event.cell_width,
            event.cell_height,
        );
        let (row, col) = (signed(cell.row), signed(cell.col));

        if apply_if_greater(&mut self.state, row, col, candidate)? {
            debug!(row, col, tier = candidate, "cell raised");
            self.display.activate_cell(cell, candidate);
            Ok(PaintOutcome::Raised { tier: candidate })
        } else {
            let current = self.state.intensity(row, col)?;
            Ok(PaintOutcome::Unchanged { current })
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
