//! Tile quantity estimation.
//!
//! Counts tiles per wall with the half-tile rounding rule, sums across walls,
//! subtracts openings as equivalent tiles, then applies the waste factor and
//! rounds up to whole tiles and boxes.

#[cfg(test)]
#[path = "tile_test.rs"]
mod tile_test;

use serde::Serialize;

use crate::consts::{CM_PER_M, HALF_TILE_THRESHOLD, MAX_WASTE_PERCENT, MM_PER_M, WHOLE_EPSILON};
use crate::fields::Fields;
use crate::openings::Opening;
use crate::wall::Wall;

/// Tile material parameters as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TileParams {
    /// Tile length in centimeters, laid along the wall width.
    pub length_cm: f64,
    /// Tile width in centimeters, laid along the wall height.
    pub width_cm: f64,
    /// Grout joint width in millimeters. Only affects the preview.
    pub grout_mm: f64,
    /// Overage percentage. `None` means not entered and counts as 0.
    pub waste_percent: Option<f64>,
    /// Area covered by one box in square meters; 0 disables box counting.
    pub box_area_m2: f64,
}

impl TileParams {
    /// Read tile parameters from a field bag.
    ///
    /// Keys: `length_cm`, `width_cm`, `grout_mm`, `waste_percent`, `box_area_m2`.
    #[must_use]
    pub fn from_fields(fields: &Fields<'_>) -> Self {
        Self {
            length_cm: fields.number("length_cm"),
            width_cm: fields.number("width_cm"),
            grout_mm: fields.number("grout_mm"),
            waste_percent: fields.opt_number("waste_percent"),
            box_area_m2: fields.number("box_area_m2"),
        }
    }

    #[must_use]
    pub fn length_m(&self) -> f64 {
        self.length_cm / CM_PER_M
    }

    #[must_use]
    pub fn width_m(&self) -> f64 {
        self.width_cm / CM_PER_M
    }

    #[must_use]
    pub fn grout_m(&self) -> f64 {
        self.grout_mm.max(0.0) / MM_PER_M
    }

    /// Face area of one tile, or 0 when either dimension is not positive.
    #[must_use]
    pub fn tile_area_m2(&self) -> f64 {
        if self.has_valid_size() { self.length_m() * self.width_m() } else { 0.0 }
    }

    /// Effective waste percentage, clamped to `0..=100`.
    #[must_use]
    pub fn waste(&self) -> f64 {
        let raw = self.waste_percent.unwrap_or(0.0);
        let waste = raw.clamp(0.0, MAX_WASTE_PERCENT);
        if !(0.0..=MAX_WASTE_PERCENT).contains(&raw) {
            tracing::debug!(raw, waste, "waste percent out of range; clamped");
        }
        waste
    }

    fn has_valid_size(&self) -> bool {
        self.length_cm > 0.0 && self.width_cm > 0.0
    }
}

/// Result of a tile estimation pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TileEstimate {
    pub gross_area_m2: f64,
    pub deducted_area_m2: f64,
    pub net_area_m2: f64,
    /// Tile count before waste, after opening deduction. May be fractional.
    pub base_count: f64,
    pub final_count: u64,
    pub purchase_area_m2: f64,
    pub box_count: u64,
    pub waste_tiles: u64,
}

/// Tiles needed along one axis, using the half-tile rule.
///
/// A whole quotient is used as is. A remainder above one half costs a full
/// extra tile; a remainder of one half or less costs half a tile. Returns 0
/// for non-positive inputs.
#[must_use]
pub fn axis_count(axis_m: f64, tile_m: f64) -> f64 {
    if !(axis_m > 0.0 && tile_m > 0.0) {
        return 0.0;
    }
    let count = axis_m / tile_m;
    if !count.is_finite() {
        return 0.0;
    }
    let nearest = count.round();
    if (count - nearest).abs() < WHOLE_EPSILON {
        return nearest;
    }
    if count.fract() > HALF_TILE_THRESHOLD {
        count.ceil()
    } else {
        count.floor() + 0.5
    }
}

/// Tiles needed for one wall: the product of both axis counts.
#[must_use]
pub fn wall_count(wall: &Wall, params: &TileParams) -> f64 {
    if !wall.is_drawable() || !params.has_valid_size() {
        return 0.0;
    }
    axis_count(wall.width_m, params.length_m()) * axis_count(wall.height_m, params.width_m())
}

/// Estimate tiles for `walls`, deducting `openings` by area.
///
/// Openings whose wall index does not resolve to a wall are ignored. Openings
/// are deducted as `area / tile area` equivalent tiles regardless of where
/// they sit on the wall.
#[must_use]
pub fn estimate(walls: &[Wall], openings: &[Opening], params: &TileParams) -> TileEstimate {
    let drawable = || walls.iter().filter(|w| w.is_drawable());

    let gross_area_m2: f64 = drawable().map(Wall::area).sum();
    let total_base: f64 = drawable().map(|w| wall_count(w, params)).sum();

    let deducted_area_m2: f64 = openings
        .iter()
        .filter(|o| o.wall_index < walls.len())
        .map(Opening::area)
        .sum();
    let tile_area = params.tile_area_m2();
    let deducted_tiles = if tile_area > 0.0 { deducted_area_m2 / tile_area } else { 0.0 };
    let base_count = (total_base - deducted_tiles).max(0.0);

    let final_count = ceil_whole(base_count * (1.0 + params.waste() / 100.0));
    let purchase_area_m2 = final_count * tile_area;
    let box_count = if params.box_area_m2 > 0.0 { ceil_whole(purchase_area_m2 / params.box_area_m2) } else { 0.0 };
    let final_count = to_count(final_count);

    let estimate = TileEstimate {
        gross_area_m2,
        deducted_area_m2,
        net_area_m2: (gross_area_m2 - deducted_area_m2).max(0.0),
        base_count,
        final_count,
        purchase_area_m2,
        box_count: to_count(box_count),
        waste_tiles: final_count.saturating_sub(to_count(ceil_whole(base_count))),
    };
    tracing::debug!(
        walls = walls.len(),
        base = estimate.base_count,
        final_count = estimate.final_count,
        "tile estimate"
    );
    estimate
}

/// Ceiling that ignores floating-point noise just above a whole number.
pub(crate) fn ceil_whole(v: f64) -> f64 {
    let nearest = v.round();
    if (v - nearest).abs() < WHOLE_EPSILON { nearest } else { v.ceil() }
}

/// Convert a non-negative whole `f64` to a count; anything else is 0.
pub(crate) fn to_count(v: f64) -> u64 {
    if v.is_finite() && v > 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = v as u64;
        n
    } else {
        0
    }
}
