//! Grid interaction model for the pixel-intensity pad: cell store, pointer
//! to tier mapping, paint gesture handling and the prediction round trip.

pub mod controller;
pub mod grid_state;
pub mod intensity;
pub mod layout;
pub mod prediction;

pub use controller::{
    apply_if_greater, GridDisplay, GridInteractionController, PaintOutcome, PointerEvent,
};
pub use grid_state::GridState;
pub use intensity::compute_tier;
pub use layout::CanvasLayout;
pub use prediction::{HttpPredictionClient, PredictionClient, PredictionError};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
