//! Shared numeric constants for the estimator crate.

// ── Arithmetic ──────────────────────────────────────────────────

/// Tolerance for treating a floating-point quotient as a whole number.
///
/// `0.9 / 0.3` is `3.0000000000000004` in IEEE-754; without snapping it would
/// be read as "3 and a sliver" and earn an extra half tile.
pub const WHOLE_EPSILON: f64 = 1e-9;

/// Remainder above which an axis rounds up to a whole extra tile.
pub const HALF_TILE_THRESHOLD: f64 = 0.5;

/// Extra strip height in meters added per strip when a pattern repeat is set.
pub const PATTERN_RESERVE_M: f64 = 0.80;

/// Upper bound for the waste percentage.
pub const MAX_WASTE_PERCENT: f64 = 100.0;

// ── Units ───────────────────────────────────────────────────────

pub const CM_PER_M: f64 = 100.0;
pub const MM_PER_M: f64 = 1000.0;

// ── Preview layout ──────────────────────────────────────────────

/// Panel padding around the drawn wall, in CSS pixels.
pub const PANEL_PADDING_PX: f64 = 20.0;

/// Band reserved above the wall for its caption, in CSS pixels.
pub const PANEL_LABEL_PX: f64 = 24.0;

/// Panel width assumed when the surface has not been laid out yet.
pub const FALLBACK_PANEL_WIDTH_PX: f64 = 300.0;

/// Panel height assumed when the surface has not been laid out yet.
pub const FALLBACK_PANEL_HEIGHT_PX: f64 = 250.0;

/// Grout lines are never drawn thinner than this, in CSS pixels.
pub const MIN_GROUT_PX: f64 = 0.5;
