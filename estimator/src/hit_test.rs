#![allow(clippy::float_cmp)]

use super::*;
use crate::openings::OpeningKind;

// =============================================================
// Helpers
// =============================================================

fn mapping() -> Mapping {
    Mapping { scale: 100.0, origin_x: 10.0, origin_y: 20.0 }
}

fn opening(id: OpeningId, x_m: f64, y_m: f64, width_m: f64, height_m: f64) -> Opening {
    Opening { id, kind: OpeningKind::Window, width_m, height_m, wall_index: 0, x_m, y_m }
}

/// Panel pixel for a wall-space point under [`mapping`].
fn px(x_m: f64, y_m: f64) -> Point {
    mapping().to_panel(Point::new(x_m, y_m))
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn empty_list_misses() {
    let none: Vec<Opening> = Vec::new();
    assert!(hit_test(px(1.0, 1.0), &mapping(), &none).is_none());
}

#[test]
fn point_outside_every_opening_misses() {
    let list = vec![opening(1, 1.0, 1.0, 0.5, 0.5)];
    assert!(hit_test(px(0.5, 0.5), &mapping(), &list).is_none());
    assert!(hit_test(px(2.0, 1.2), &mapping(), &list).is_none());
}

#[test]
fn point_inside_hits() {
    let list = vec![opening(7, 1.0, 1.0, 0.5, 0.5)];
    let hit = hit_test(px(1.25, 1.25), &mapping(), &list).expect("hit");
    assert_eq!(hit.opening_id, 7);
    assert!((hit.wall_pt.x - 1.25).abs() < 1e-9);
    assert!((hit.wall_pt.y - 1.25).abs() < 1e-9);
}

#[test]
fn edges_are_inclusive() {
    let list = vec![opening(1, 1.0, 1.0, 0.5, 0.5)];
    assert!(hit_test(px(1.0, 1.0), &mapping(), &list).is_some());
    assert!(hit_test(px(1.5, 1.5), &mapping(), &list).is_some());
}

#[test]
fn topmost_opening_wins_on_overlap() {
    let list = vec![opening(1, 0.0, 0.0, 2.0, 2.0), opening(2, 0.5, 0.5, 1.0, 1.0)];
    let hit = hit_test(px(1.0, 1.0), &mapping(), &list).expect("hit");
    assert_eq!(hit.opening_id, 2);
}

#[test]
fn lower_opening_hit_outside_upper() {
    let list = vec![opening(1, 0.0, 0.0, 2.0, 2.0), opening(2, 0.5, 0.5, 1.0, 1.0)];
    let hit = hit_test(px(1.8, 1.8), &mapping(), &list).expect("hit");
    assert_eq!(hit.opening_id, 1);
}

#[test]
fn grab_is_offset_from_top_left() {
    let list = vec![opening(3, 1.0, 0.5, 1.0, 1.0)];
    let hit = hit_test(px(1.3, 0.9), &mapping(), &list).expect("hit");
    assert!((hit.grab.x - 0.3).abs() < 1e-9);
    assert!((hit.grab.y - 0.4).abs() < 1e-9);
}

#[test]
fn accepts_filtered_registry_iterator() {
    use crate::openings::OpeningRegistry;
    use crate::wall::Wall;

    let walls = [Wall::new(4.0, 2.5), Wall::new(3.0, 2.5)];
    let mut reg = OpeningRegistry::new();
    let on_first = reg.add(OpeningKind::Window, 0, &walls);
    reg.add(OpeningKind::Window, 1, &walls);

    // Window on a 4 x 2.5 wall is centered: x = 1.4, y = 0.65.
    let hit = hit_test(px(2.0, 1.2), &mapping(), reg.on_wall(0)).expect("hit");
    assert_eq!(hit.opening_id, on_first);
}
