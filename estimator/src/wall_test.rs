#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

#[test]
fn from_fields_reads_dimensions() {
    let v = json!({ "width": "3.2", "height": 2.5 });
    assert_eq!(Wall::from_fields(&Fields::new(&v)), Wall::new(3.2, 2.5));
}

#[test]
fn from_fields_defaults_to_zero_wall() {
    let v = json!({ "width": "n/a" });
    let wall = Wall::from_fields(&Fields::new(&v));
    assert_eq!(wall, Wall::default());
    assert!(!wall.is_drawable());
}

#[test]
fn drawable_requires_both_dimensions() {
    assert!(Wall::new(1.0, 1.0).is_drawable());
    assert!(!Wall::new(0.0, 1.0).is_drawable());
    assert!(!Wall::new(1.0, -2.0).is_drawable());
}

#[test]
fn area_is_width_times_height() {
    assert_eq!(Wall::new(3.0, 2.5).area(), 7.5);
}

#[test]
fn span_single_is_its_width() {
    assert_eq!(WallSpan::Single { width_m: 4.0 }.width_m(), 4.0);
}

#[test]
fn span_perimeter_is_twice_length_plus_width() {
    assert_eq!(WallSpan::Perimeter { length_m: 5.0, width_m: 3.5 }.width_m(), 17.0);
}
