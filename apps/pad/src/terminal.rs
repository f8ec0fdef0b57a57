use std::sync::{Mutex, MutexGuard, PoisonError};

use grid_core::{GridDisplay, PredictionError};
use shared::{
    domain::{tier_opacity, CellCoord},
    protocol::PredictionLabel,
};

pub const PLACEHOLDER_LABEL: &str = "__";
pub const UNRESOLVED_LABEL: &str = "??";

const SHADES: [char; 5] = ['.', '░', '▒', '▓', '█'];

struct TerminalView {
    size: usize,
    opacity: Vec<Option<f32>>,
    label: String,
}

/// Renders the grid as shade glyphs and prints prediction labels to stdout.
pub struct TerminalDisplay {
    view: Mutex<TerminalView>,
}

impl TerminalDisplay {
    pub fn new(size: usize) -> Self {
        Self {
            view: Mutex::new(TerminalView {
                size,
                opacity: vec![None; size * size],
                label: PLACEHOLDER_LABEL.to_string(),
            }),
        }
    }

    pub fn label(&self) -> String {
        self.view().label.clone()
    }

    pub fn render(&self) -> String {
        let view = self.view();
        let mut out = String::with_capacity(view.size * (view.size + 1) + 32);
        for row in view.opacity.chunks(view.size.max(1)) {
            out.extend(row.iter().map(|cell| shade(*cell)));
            out.push('\n');
        }
        out.push_str("prediction: ");
        out.push_str(&view.label);
        out
    }

    fn view(&self) -> MutexGuard<'_, TerminalView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn shade(opacity: Option<f32>) -> char {
    match opacity {
        None => SHADES[0],
        Some(opacity) => {
            let steps = (SHADES.len() - 1) as f32;
            let index = (opacity * steps).ceil().clamp(1.0, steps) as usize;
            SHADES[index]
        }
    }
}

impl GridDisplay for TerminalDisplay {
    fn activate_cell(&self, cell: CellCoord, tier: u8) {
        let mut view = self.view();
        let index = cell.flat_index(view.size);
        if let Some(slot) = view.opacity.get_mut(index) {
            *slot = Some(tier_opacity(tier));
        }
    }

    fn deactivate_all(&self) {
        self.view().opacity.fill(None);
    }

    fn show_prediction(&self, label: &PredictionLabel) {
        self.view().label = label.to_string();
        println!("prediction: {label}");
    }

    fn show_placeholder(&self) {
        self.view().label = PLACEHOLDER_LABEL.to_string();
    }

    fn show_unresolved(&self, error: &PredictionError) {
        self.view().label = UNRESOLVED_LABEL.to_string();
        println!("prediction: {UNRESOLVED_LABEL} ({error})");
    }
}
