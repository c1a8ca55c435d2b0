//! Mapping between wall space (meters) and panel space (CSS pixels).
//!
//! A wall is drawn as a uniformly scaled rectangle inside a fixed-size panel.
//! [`forward`] computes the scale and origin for one wall; [`Mapping`] then
//! converts points and rectangles in both directions. Hit-testing and drag
//! must use the same [`Mapping`] the panel was last drawn with.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::Serialize;

/// A point in either wall space (meters) or panel space (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Whether `pt` lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Why a wall cannot be placed on a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NotDrawable {
    /// Wall width or height is zero, negative or not finite.
    #[error("wall has no positive area")]
    EmptyWall,
    /// Panel width or height is zero, negative or not finite.
    #[error("panel has no positive area")]
    EmptyPanel,
    /// Padding and label reservation leave no room to draw in.
    #[error("padding leaves no drawable area")]
    NoRoom,
}

/// Scale and origin placing one wall inside one panel.
///
/// `scale` is pixels per meter. `origin_x` / `origin_y` are the panel-space
/// pixel position of the wall's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mapping {
    pub scale: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

/// Fit a `wall_w` × `wall_h` meter wall into a `canvas_w` × `canvas_h` pixel panel.
///
/// The scale is the tighter of the two axis constraints so the wall never
/// overflows either dimension. The wall is centered horizontally; vertically
/// `label_px` is reserved at the top and the wall is centered in what remains.
///
/// # Errors
///
/// Returns [`NotDrawable`] instead of dividing by a non-positive length.
pub fn forward(
    wall_w: f64,
    wall_h: f64,
    canvas_w: f64,
    canvas_h: f64,
    padding_px: f64,
    label_px: f64,
) -> Result<Mapping, NotDrawable> {
    if !is_positive(wall_w) || !is_positive(wall_h) {
        return Err(NotDrawable::EmptyWall);
    }
    if !is_positive(canvas_w) || !is_positive(canvas_h) {
        return Err(NotDrawable::EmptyPanel);
    }

    let avail_w = canvas_w - 2.0 * padding_px;
    let avail_h = canvas_h - 2.0 * padding_px - label_px;
    if !is_positive(avail_w) || !is_positive(avail_h) {
        return Err(NotDrawable::NoRoom);
    }

    let scale = (avail_w / wall_w).min(avail_h / wall_h);
    let origin_x = (canvas_w - wall_w * scale) / 2.0;
    let origin_y = label_px + (canvas_h - label_px - wall_h * scale) / 2.0;

    Ok(Mapping { scale, origin_x, origin_y })
}

/// Convert a panel-space pixel position back to wall meters under `mapping`.
#[must_use]
pub fn inverse(px: f64, py: f64, mapping: &Mapping) -> Point {
    mapping.to_wall(Point::new(px, py))
}

impl Mapping {
    /// Convert a wall-space point (meters) to panel pixels.
    #[must_use]
    pub fn to_panel(&self, wall: Point) -> Point {
        Point {
            x: self.origin_x + wall.x * self.scale,
            y: self.origin_y + wall.y * self.scale,
        }
    }

    /// Convert a panel pixel position to wall-space meters.
    #[must_use]
    pub fn to_wall(&self, panel: Point) -> Point {
        Point {
            x: (panel.x - self.origin_x) / self.scale,
            y: (panel.y - self.origin_y) / self.scale,
        }
    }

    /// Convert a wall-space rectangle to panel pixels.
    #[must_use]
    pub fn rect_to_panel(&self, wall: Rect) -> Rect {
        let top_left = self.to_panel(Point::new(wall.x, wall.y));
        Rect {
            x: top_left.x,
            y: top_left.y,
            width: wall.width * self.scale,
            height: wall.height * self.scale,
        }
    }

    /// Convert a length in meters to pixels.
    #[must_use]
    pub fn len_to_panel(&self, meters: f64) -> f64 {
        meters * self.scale
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
