#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;
use crate::openings::{OpeningKind, OpeningRegistry};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn params(length_cm: f64, width_cm: f64, waste: Option<f64>) -> TileParams {
    TileParams { length_cm, width_cm, grout_mm: 2.0, waste_percent: waste, box_area_m2: 0.0 }
}

// =============================================================
// axis_count
// =============================================================

#[test]
fn axis_exact_division_is_unrounded() {
    assert_eq!(axis_count(3.0, 0.6), 5.0);
    assert_eq!(axis_count(2.4, 0.3), 8.0);
}

#[test]
fn axis_small_remainder_adds_half() {
    // 8.33 -> 8.5
    assert_eq!(axis_count(2.5, 0.3), 8.5);
}

#[test]
fn axis_exact_half_adds_half() {
    // 2.5 -> 2.5
    assert_eq!(axis_count(1.5, 0.6), 2.5);
}

#[test]
fn axis_large_remainder_rounds_up() {
    // 4.0 / 0.53 = 7.547 -> 8
    assert_eq!(axis_count(4.0, 0.53), 8.0);
}

#[test]
fn axis_float_noise_counts_as_whole() {
    // 0.9 / 0.3 is 3.0000000000000004 in floating point.
    assert_eq!(axis_count(0.9, 0.3), 3.0);
    // 0.6 / 0.2 is 2.9999999999999996.
    assert_eq!(axis_count(0.6, 0.2), 3.0);
}

#[test]
fn axis_non_positive_is_zero() {
    assert_eq!(axis_count(0.0, 0.3), 0.0);
    assert_eq!(axis_count(2.0, 0.0), 0.0);
    assert_eq!(axis_count(2.0, -0.3), 0.0);
    assert_eq!(axis_count(f64::NAN, 0.3), 0.0);
}

// =============================================================
// wall_count
// =============================================================

#[test]
fn wall_count_reference_wall() {
    let p = params(60.0, 30.0, None);
    assert_eq!(wall_count(&Wall::new(3.0, 2.5), &p), 42.5);
}

#[test]
fn axis_count_stays_within_one_tile_of_exact() {
    let cases = [(3.0, 0.6), (2.5, 0.3), (4.1, 0.33), (1.3, 0.2), (5.55, 0.45), (0.25, 0.6), (2.05, 0.45)];
    for (axis, tile) in cases {
        let exact = axis / tile;
        let count = axis_count(axis, tile);
        assert!(count >= exact - EPSILON && count < exact + 1.0, "{axis}/{tile}: {count} vs {exact}");
    }
}

#[test]
fn wall_count_near_exact_ratio_for_small_remainders() {
    // Exact on one axis, remainder on the other: within one tile of the ratio.
    let cases = [(3.0, 2.5, 60.0, 30.0), (1.3, 0.9, 20.0, 10.0), (1.2, 2.5, 60.0, 30.0)];
    for (w, h, l, t) in cases {
        let p = params(l, t, None);
        let exact = (w / p.length_m()) * (h / p.width_m());
        let count = wall_count(&Wall::new(w, h), &p);
        assert!(count >= exact - 1.0 && count <= exact + 1.0, "{w}x{h} tile {l}x{t}: {count} vs {exact}");
    }
}

#[test]
fn wall_count_bounded_by_rounded_axes() {
    let cases = [(4.1, 2.7, 33.0, 33.0), (5.55, 2.05, 45.0, 45.0), (0.25, 0.25, 30.0, 60.0)];
    for (w, h, l, t) in cases {
        let p = params(l, t, None);
        let x = w / p.length_m();
        let y = h / p.width_m();
        let count = wall_count(&Wall::new(w, h), &p);
        assert!(count >= x * y - EPSILON && count <= (x + 1.0) * (y + 1.0), "{w}x{h} tile {l}x{t}");
    }
}

#[test]
fn wall_count_invalid_tile_is_zero() {
    assert_eq!(wall_count(&Wall::new(3.0, 2.5), &params(0.0, 30.0, None)), 0.0);
    assert_eq!(wall_count(&Wall::new(3.0, 2.5), &params(60.0, -1.0, None)), 0.0);
}

#[test]
fn wall_count_empty_wall_is_zero() {
    assert_eq!(wall_count(&Wall::new(0.0, 2.5), &params(60.0, 30.0, None)), 0.0);
}

// =============================================================
// estimate
// =============================================================

#[test]
fn estimate_reference_scenario() {
    let walls = [Wall::new(3.0, 2.5), Wall::new(3.0, 2.5)];
    let est = estimate(&walls, &[], &params(60.0, 30.0, Some(10.0)));
    assert_eq!(est.base_count, 85.0);
    assert_eq!(est.final_count, 94);
    assert_eq!(est.waste_tiles, 9);
    assert!(approx_eq(est.gross_area_m2, 15.0));
    assert!(approx_eq(est.purchase_area_m2, 94.0 * 0.18));
}

#[test]
fn estimate_explicit_zero_waste() {
    let walls = [Wall::new(3.0, 2.5)];
    let est = estimate(&walls, &[], &params(60.0, 30.0, Some(0.0)));
    assert_eq!(est.final_count, 43);
    assert_eq!(est.waste_tiles, 0);
}

#[test]
fn estimate_unset_waste() {
    let walls = [Wall::new(3.0, 2.5)];
    let est = estimate(&walls, &[], &params(60.0, 30.0, None));
    assert_eq!(est.final_count, 43);
    assert_eq!(est.waste_tiles, 0);
}

#[test]
fn explicit_zero_waste_survives_field_parsing() {
    let v = json!({ "length_cm": 60, "width_cm": 30, "waste_percent": 0 });
    let p = TileParams::from_fields(&Fields::new(&v));
    assert_eq!(p.waste_percent, Some(0.0));
    let v = json!({ "length_cm": 60, "width_cm": 30 });
    let p = TileParams::from_fields(&Fields::new(&v));
    assert_eq!(p.waste_percent, None);
}

#[test]
fn final_count_at_least_ceil_base() {
    let walls = [Wall::new(4.1, 2.7), Wall::new(2.2, 2.7)];
    for waste in [0.0, 1.0, 7.5, 10.0, 15.0, 50.0, 100.0] {
        let est = estimate(&walls, &[], &params(33.0, 33.0, Some(waste)));
        assert!(est.final_count >= to_count(est.base_count.ceil()), "waste {waste}");
    }
}

#[test]
fn waste_factor_without_float_overshoot() {
    // 100 * 1.1 is 110.00000000000001; still 110 tiles.
    let walls = [Wall::new(1.0, 1.0)];
    let est = estimate(&walls, &[], &params(10.0, 10.0, Some(10.0)));
    assert_eq!(est.base_count, 100.0);
    assert_eq!(est.final_count, 110);
}

#[test]
fn waste_is_clamped_to_range() {
    assert_eq!(params(60.0, 30.0, Some(-5.0)).waste(), 0.0);
    assert_eq!(params(60.0, 30.0, Some(250.0)).waste(), 100.0);
}

#[test]
fn estimate_with_waste_above_range_uses_full_hundred() {
    let walls = [Wall::new(3.0, 2.5)];
    let over = estimate(&walls, &[], &params(60.0, 30.0, Some(250.0)));
    let full = estimate(&walls, &[], &params(60.0, 30.0, Some(100.0)));
    assert_eq!(over.final_count, 85);
    assert_eq!(over, full);
}

#[test]
fn estimate_deducts_openings_by_area() {
    let walls = [Wall::new(3.0, 2.5), Wall::new(3.0, 2.5)];
    let mut reg = OpeningRegistry::new();
    reg.add_sized(OpeningKind::Door, 0, 0.9, 2.0, &walls);
    let est = estimate(&walls, reg.all(), &params(60.0, 30.0, Some(0.0)));
    // 1.8 m2 / 0.18 m2 = 10 equivalent tiles.
    assert!(approx_eq(est.deducted_area_m2, 1.8));
    assert!(approx_eq(est.base_count, 75.0));
    assert_eq!(est.final_count, 75);
    assert!(approx_eq(est.net_area_m2, 13.2));
}

#[test]
fn estimate_ignores_opening_position() {
    let walls = [Wall::new(3.0, 2.5)];
    let mut reg = OpeningRegistry::new();
    let id = reg.add(OpeningKind::Window, 0, &walls);
    let before = estimate(&walls, reg.all(), &params(60.0, 30.0, None));
    reg.update_position(id, 0.0, 0.0, &walls);
    let after = estimate(&walls, reg.all(), &params(60.0, 30.0, None));
    assert_eq!(before, after);
}

#[test]
fn estimate_skips_orphaned_openings() {
    let walls = [Wall::new(3.0, 2.5)];
    let mut reg = OpeningRegistry::new();
    reg.add(OpeningKind::Door, 3, &walls);
    let est = estimate(&walls, reg.all(), &params(60.0, 30.0, None));
    assert_eq!(est.deducted_area_m2, 0.0);
    assert_eq!(est.base_count, 42.5);
}

#[test]
fn estimate_base_floors_at_zero() {
    let walls = [Wall::new(1.0, 1.0)];
    let mut reg = OpeningRegistry::new();
    reg.add_sized(OpeningKind::Window, 0, 3.0, 3.0, &walls);
    let est = estimate(&walls, reg.all(), &params(50.0, 50.0, Some(10.0)));
    assert_eq!(est.base_count, 0.0);
    assert_eq!(est.final_count, 0);
    assert_eq!(est.net_area_m2, 0.0);
}

#[test]
fn estimate_zero_walls_is_all_zero() {
    let est = estimate(&[], &[], &params(60.0, 30.0, Some(10.0)));
    assert_eq!(est, TileEstimate::default());
}

#[test]
fn estimate_invalid_tile_is_zero_count() {
    let walls = [Wall::new(3.0, 2.5)];
    let est = estimate(&walls, &[], &params(0.0, 0.0, Some(10.0)));
    assert_eq!(est.final_count, 0);
    assert_eq!(est.purchase_area_m2, 0.0);
    assert!(approx_eq(est.gross_area_m2, 7.5));
}

#[test]
fn estimate_skips_empty_walls() {
    let walls = [Wall::new(3.0, 2.5), Wall::new(0.0, 2.5), Wall::new(-1.0, 1.0)];
    let est = estimate(&walls, &[], &params(60.0, 30.0, None));
    assert_eq!(est.base_count, 42.5);
    assert!(approx_eq(est.gross_area_m2, 7.5));
}

#[test]
fn estimate_box_count() {
    let walls = [Wall::new(3.0, 2.5), Wall::new(3.0, 2.5)];
    let mut p = params(60.0, 30.0, Some(10.0));
    p.box_area_m2 = 1.44;
    let est = estimate(&walls, &[], &p);
    // 94 * 0.18 = 16.92 m2 -> 11.75 boxes -> 12.
    assert_eq!(est.box_count, 12);
}

#[test]
fn estimate_no_box_area_means_no_boxes() {
    let walls = [Wall::new(3.0, 2.5)];
    let est = estimate(&walls, &[], &params(60.0, 30.0, Some(10.0)));
    assert_eq!(est.box_count, 0);
}

#[test]
fn tile_params_unit_conversions() {
    let p = TileParams { length_cm: 60.0, width_cm: 30.0, grout_mm: 3.0, waste_percent: None, box_area_m2: 0.0 };
    assert!(approx_eq(p.length_m(), 0.6));
    assert!(approx_eq(p.width_m(), 0.3));
    assert!(approx_eq(p.grout_m(), 0.003));
    assert!(approx_eq(p.tile_area_m2(), 0.18));
}

#[test]
fn ceil_whole_and_to_count() {
    assert_eq!(ceil_whole(93.50000000000001), 94.0);
    assert_eq!(ceil_whole(110.00000000000001), 110.0);
    assert_eq!(ceil_whole(0.2), 1.0);
    assert_eq!(to_count(12.0), 12);
    assert_eq!(to_count(-1.0), 0);
    assert_eq!(to_count(f64::NAN), 0);
}
