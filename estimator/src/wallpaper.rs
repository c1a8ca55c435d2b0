//! Wallpaper roll estimation.
//!
//! The covered width is cut into vertical strips one roll-width wide. Each
//! strip is as tall as the wall, plus a fixed reserve when the paper has a
//! pattern repeat to match. Only whole strips come out of a roll.

#[cfg(test)]
#[path = "wallpaper_test.rs"]
mod wallpaper_test;

use serde::Serialize;

use crate::consts::PATTERN_RESERVE_M;
use crate::fields::Fields;
use crate::tile::{ceil_whole, to_count};
use crate::wall::Wall;

/// Wallpaper material parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WallpaperParams {
    pub roll_width_m: f64,
    pub roll_length_m: f64,
    /// Pattern repeat in centimeters; 0 means a free-match paper.
    pub pattern_repeat_cm: f64,
    pub price_per_roll: f64,
}

impl WallpaperParams {
    /// Read wallpaper parameters from a field bag.
    ///
    /// Keys: `roll_width_m`, `roll_length_m`, `pattern_repeat_cm`, `price_per_roll`.
    #[must_use]
    pub fn from_fields(fields: &Fields<'_>) -> Self {
        Self {
            roll_width_m: fields.number("roll_width_m"),
            roll_length_m: fields.number("roll_length_m"),
            pattern_repeat_cm: fields.number("pattern_repeat_cm"),
            price_per_roll: fields.number("price_per_roll"),
        }
    }
}

/// Result of a wallpaper estimation pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WallpaperEstimate {
    pub wall_area_m2: f64,
    pub total_strips: u64,
    pub strips_per_roll: u64,
    pub total_rolls: u64,
    pub strip_height_m: f64,
    pub purchased_area_m2: f64,
    pub waste_percent: f64,
    pub total_price: f64,
}

/// Strip height including the pattern reserve.
#[must_use]
pub fn effective_strip_height(wall_height_m: f64, params: &WallpaperParams) -> f64 {
    let reserve = if params.pattern_repeat_cm > 0.0 { PATTERN_RESERVE_M } else { 0.0 };
    wall_height_m + reserve
}

/// Estimate rolls for a surface `width_m` wide and `height_m` tall.
///
/// `width_m` is the already-resolved run; see [`crate::wall::WallSpan`].
#[must_use]
pub fn estimate(width_m: f64, height_m: f64, params: &WallpaperParams) -> WallpaperEstimate {
    let wall_area_m2 = width_m * height_m;

    let total_strips = if params.roll_width_m > 0.0 && width_m > 0.0 {
        to_count(ceil_whole(width_m / params.roll_width_m))
    } else {
        0
    };

    let strip_height_m = effective_strip_height(height_m, params);
    let strips_per_roll = if strip_height_m > 0.0 && params.roll_length_m > 0.0 {
        to_count(floor_whole(params.roll_length_m / strip_height_m))
    } else {
        0
    };

    let total_rolls = if strips_per_roll > 0 { total_strips.div_ceil(strips_per_roll) } else { 0 };

    #[allow(clippy::cast_precision_loss)]
    let rolls = total_rolls as f64;
    let purchased_area_m2 = rolls * params.roll_width_m * params.roll_length_m;
    let waste_percent = if purchased_area_m2 > 0.0 {
        (purchased_area_m2 - wall_area_m2) / purchased_area_m2 * 100.0
    } else {
        0.0
    };

    let estimate = WallpaperEstimate {
        wall_area_m2,
        total_strips,
        strips_per_roll,
        total_rolls,
        strip_height_m,
        purchased_area_m2,
        waste_percent,
        total_price: rolls * params.price_per_roll,
    };
    tracing::debug!(
        strips = estimate.total_strips,
        per_roll = estimate.strips_per_roll,
        rolls = estimate.total_rolls,
        "wallpaper estimate"
    );
    estimate
}

/// Estimate rolls for several walls papered as one run.
///
/// The run is the sum of the drawable walls' widths and the strips are cut to
/// the tallest of them. With four walls of a room this is perimeter mode.
#[must_use]
pub fn estimate_walls(walls: &[Wall], params: &WallpaperParams) -> WallpaperEstimate {
    let drawable = || walls.iter().filter(|w| w.is_drawable());
    let width: f64 = drawable().map(|w| w.width_m).sum();
    let height = drawable().map(|w| w.height_m).fold(0.0, f64::max);
    let mut est = estimate(width, height, params);
    // Area of the actual walls, not of the bounding run.
    est.wall_area_m2 = drawable().map(Wall::area).sum();
    est.waste_percent = if est.purchased_area_m2 > 0.0 {
        (est.purchased_area_m2 - est.wall_area_m2) / est.purchased_area_m2 * 100.0
    } else {
        0.0
    };
    est
}

/// Floor that ignores floating-point noise just below a whole number.
fn floor_whole(v: f64) -> f64 {
    let nearest = v.round();
    if (v - nearest).abs() < crate::consts::WHOLE_EPSILON { nearest } else { v.floor() }
}
