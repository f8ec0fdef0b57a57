use super::*;

const SIZES: [(f64, f64); 6] = [
    (1.0, 1.0),
    (40.0, 40.0),
    (37.5, 37.5),
    (0.25, 0.25),
    (60.0, 20.0),
    (3.0, 101.0),
];

#[test]
fn center_press_yields_max_tier() {
    for (w, h) in SIZES {
        assert_eq!(compute_tier(w / 2.0, h / 2.0, w, h), MAX_TIER, "{w}x{h}");
    }
}

#[test]
fn every_corner_yields_bias_floor() {
    for (w, h) in SIZES {
        for (x, y) in [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)] {
            assert_eq!(compute_tier(x, y, w, h), 4, "({x}, {y}) in {w}x{h}");
        }
    }
}

#[test]
fn tiers_inside_cell_stay_within_bounds() {
    for (w, h) in SIZES {
        for i in 0..=20 {
            for j in 0..=20 {
                let x = w * f64::from(i) / 20.0;
                let y = h * f64::from(j) / 20.0;
                let tier = compute_tier(x, y, w, h);
                assert!((4..=MAX_TIER).contains(&tier), "({x}, {y}) -> {tier}");
            }
        }
    }
}

#[test]
fn known_positions_in_square_cell() {
    assert_eq!(compute_tier(20.0, 0.0, 40.0, 40.0), 9);
    assert_eq!(compute_tier(20.0, 10.0, 40.0, 40.0), 15);
}

#[test]
fn positions_far_outside_cell_clamp_to_zero() {
    assert_eq!(compute_tier(-100.0, -100.0, 40.0, 40.0), MIN_TIER);
}

#[test]
fn tier_is_deterministic() {
    let first = compute_tier(13.7, 29.1, 40.0, 40.0);
    for _ in 0..100 {
        assert_eq!(compute_tier(13.7, 29.1, 40.0, 40.0), first);
    }
}
