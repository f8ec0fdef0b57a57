use shared::domain::{MAX_TIER, MIN_TIER};

/// Constant lift so that even an edge touch leaves a visible mark.
pub const EDGE_BIAS: i64 = 4;

/// Maps a pointer position inside a cell to a tier: the closer to the cell
/// center, the darker.
///
/// `local_x`/`local_y` are measured from the cell's top-left corner.
/// `cell_width` and `cell_height` must be positive; a zero-size cell has no
/// center distance to scale against.
pub fn compute_tier(local_x: f64, local_y: f64, cell_width: f64, cell_height: f64) -> u8 {
    debug_assert!(
        cell_width > 0.0 && cell_height > 0.0,
        "cell dimensions must be positive"
    );

    let center_x = cell_width / 2.0;
    let center_y = cell_height / 2.0;
    let distance = distance(local_x, local_y, center_x, center_y);
    let max_distance = distance_to_corner(center_x, center_y);

    let scale = f64::from(MAX_TIER);
    let raw_tier = i64::from(MAX_TIER) - (distance / max_distance * scale).floor() as i64;
    let tier = (raw_tier + EDGE_BIAS).clamp(i64::from(MIN_TIER), i64::from(MAX_TIER));
    tier as u8
}

fn distance_to_corner(center_x: f64, center_y: f64) -> f64 {
    distance(0.0, 0.0, center_x, center_y)
}

fn distance(x: f64, y: f64, center_x: f64, center_y: f64) -> f64 {
    ((center_x - x).powi(2) + (center_y - y).powi(2)).sqrt()
}

#[cfg(test)]
#[path = "tests/intensity_tests.rs"]
mod tests;
