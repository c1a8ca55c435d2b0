//! Openings: doors, windows and mirrors cut out of walls, and their registry.
//!
//! An [`Opening`] is tied to a wall by index and positioned in that wall's
//! local space (meters from the wall's top-left corner). The
//! [`OpeningRegistry`] owns all openings, hands out ids and keeps positions
//! inside the owning wall whenever it places or moves an opening.
//!
//! Opening kinds differ only in their defaults, which live in a small table
//! ([`KindSpec`]) rather than in per-kind types.

#[cfg(test)]
#[path = "openings_test.rs"]
mod openings_test;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::wall::Wall;

/// Unique identifier for an opening. Assigned in ascending order.
pub type OpeningId = u64;

/// The kind of an opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
    Mirror,
}

/// Where a freshly added opening is placed on its wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Horizontally centered, resting on the floor.
    BottomCenter,
    /// Centered on both axes.
    Center,
}

/// Per-kind defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindSpec {
    pub width_m: f64,
    pub height_m: f64,
    pub placement: Placement,
    /// Preview fill colour.
    pub fill: &'static str,
    pub label: &'static str,
}

const DOOR: KindSpec = KindSpec {
    width_m: 0.90,
    height_m: 2.00,
    placement: Placement::BottomCenter,
    fill: "#8B5E3C",
    label: "Door",
};

const WINDOW: KindSpec = KindSpec {
    width_m: 1.20,
    height_m: 1.20,
    placement: Placement::Center,
    fill: "#A7D3F2",
    label: "Window",
};

const MIRROR: KindSpec = KindSpec {
    width_m: 0.60,
    height_m: 0.80,
    placement: Placement::Center,
    fill: "#D9E4E8",
    label: "Mirror",
};

impl OpeningKind {
    /// Default size, placement and styling for this kind.
    #[must_use]
    pub fn spec(self) -> &'static KindSpec {
        match self {
            Self::Door => &DOOR,
            Self::Window => &WINDOW,
            Self::Mirror => &MIRROR,
        }
    }

    /// Parse a kind name, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "door" => Some(Self::Door),
            "window" => Some(Self::Window),
            "mirror" => Some(Self::Mirror),
            _ => None,
        }
    }
}

/// A rectangular cut-out in a wall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opening {
    pub id: OpeningId,
    pub kind: OpeningKind,
    pub width_m: f64,
    pub height_m: f64,
    /// Index of the owning wall in the current wall list.
    pub wall_index: usize,
    /// Left edge, in meters from the wall's left edge.
    pub x_m: f64,
    /// Top edge, in meters from the wall's top edge.
    pub y_m: f64,
}

impl Opening {
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width_m.max(0.0) * self.height_m.max(0.0)
    }

    /// The opening's rectangle in wall space.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x_m, self.y_m, self.width_m, self.height_m)
    }
}

/// A numeric field of an opening that can be edited directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningField {
    Width,
    Height,
    X,
    Y,
}

/// Clamp a top-left position so an opening of `width` × `height` stays inside `wall`.
///
/// When the opening is larger than the wall on an axis, that axis pins to 0.
#[must_use]
pub fn clamp_to_wall(x: f64, y: f64, width: f64, height: f64, wall: &Wall) -> Point {
    Point {
        x: clamp_axis(x, wall.width_m - width),
        y: clamp_axis(y, wall.height_m - height),
    }
}

fn clamp_axis(v: f64, max: f64) -> f64 {
    let max = if max.is_finite() { max.max(0.0) } else { 0.0 };
    if v.is_finite() { v.clamp(0.0, max) } else { 0.0 }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Owns every opening, in creation order.
#[derive(Debug, Clone)]
pub struct OpeningRegistry {
    openings: Vec<Opening>,
    next_id: OpeningId,
}

impl OpeningRegistry {
    /// Create an empty registry. The first id handed out is 1.
    #[must_use]
    pub fn new() -> Self {
        Self { openings: Vec::new(), next_id: 1 }
    }

    /// Add an opening of `kind` with its default size on wall `wall_index`.
    pub fn add(&mut self, kind: OpeningKind, wall_index: usize, walls: &[Wall]) -> OpeningId {
        let spec = kind.spec();
        self.add_sized(kind, wall_index, spec.width_m, spec.height_m, walls)
    }

    /// Add an opening with an explicit size, placed by its kind's rule.
    ///
    /// If `wall_index` does not resolve, the opening is stored at the origin.
    pub fn add_sized(
        &mut self,
        kind: OpeningKind,
        wall_index: usize,
        width_m: f64,
        height_m: f64,
        walls: &[Wall],
    ) -> OpeningId {
        let id = self.next_id;
        self.next_id += 1;

        let width_m = non_negative(width_m);
        let height_m = non_negative(height_m);
        let pos = match walls.get(wall_index) {
            Some(wall) => {
                let x = (wall.width_m - width_m) / 2.0;
                let y = match kind.spec().placement {
                    Placement::BottomCenter => wall.height_m - height_m,
                    Placement::Center => (wall.height_m - height_m) / 2.0,
                };
                clamp_to_wall(x, y, width_m, height_m, wall)
            }
            None => Point::new(0.0, 0.0),
        };

        self.openings.push(Opening {
            id,
            kind,
            width_m,
            height_m,
            wall_index,
            x_m: pos.x,
            y_m: pos.y,
        });
        tracing::debug!(id, ?kind, wall_index, "opening added");
        id
    }

    /// Remove an opening by id, returning it if it was present.
    pub fn remove(&mut self, id: OpeningId) -> Option<Opening> {
        let idx = self.openings.iter().position(|o| o.id == id)?;
        Some(self.openings.remove(idx))
    }

    /// Set one numeric field. Values are clamped to `>= 0`; there is no upper bound.
    ///
    /// Returns false if the opening doesn't exist.
    pub fn update_field(&mut self, id: OpeningId, field: OpeningField, value: f64) -> bool {
        let Some(o) = self.get_mut(id) else {
            return false;
        };
        let value = non_negative(value);
        match field {
            OpeningField::Width => o.width_m = value,
            OpeningField::Height => o.height_m = value,
            OpeningField::X => o.x_m = value,
            OpeningField::Y => o.y_m = value,
        }
        true
    }

    /// Move an opening, clamping into its owning wall.
    ///
    /// Returns the stored position, or `None` if the opening doesn't exist. An
    /// orphaned opening is only clamped to `>= 0`.
    pub fn update_position(&mut self, id: OpeningId, x_m: f64, y_m: f64, walls: &[Wall]) -> Option<Point> {
        let o = self.get_mut(id)?;
        let pos = match walls.get(o.wall_index) {
            Some(wall) => clamp_to_wall(x_m, y_m, o.width_m, o.height_m, wall),
            None => Point::new(non_negative(x_m), non_negative(y_m)),
        };
        o.x_m = pos.x;
        o.y_m = pos.y;
        Some(pos)
    }

    /// Reassign an opening to another wall. The position is left untouched.
    ///
    /// Returns false if the opening doesn't exist.
    pub fn update_wall(&mut self, id: OpeningId, wall_index: usize) -> bool {
        let Some(o) = self.get_mut(id) else {
            return false;
        };
        o.wall_index = wall_index;
        true
    }

    /// Re-clamp every opening on a resolvable wall into that wall.
    pub fn clamp_all(&mut self, walls: &[Wall]) {
        for o in &mut self.openings {
            if let Some(wall) = walls.get(o.wall_index) {
                let pos = clamp_to_wall(o.x_m, o.y_m, o.width_m, o.height_m, wall);
                o.x_m = pos.x;
                o.y_m = pos.y;
            }
        }
    }

    #[must_use]
    pub fn get(&self, id: OpeningId) -> Option<&Opening> {
        self.openings.iter().find(|o| o.id == id)
    }

    fn get_mut(&mut self, id: OpeningId) -> Option<&mut Opening> {
        self.openings.iter_mut().find(|o| o.id == id)
    }

    /// All openings in creation order.
    #[must_use]
    pub fn all(&self) -> &[Opening] {
        &self.openings
    }

    /// Openings on wall `wall_index`, in creation order.
    pub fn on_wall(&self, wall_index: usize) -> impl DoubleEndedIterator<Item = &Opening> {
        self.openings.iter().filter(move |o| o.wall_index == wall_index)
    }

    /// Openings whose wall index is `>= wall_count`.
    pub fn orphans(&self, wall_count: usize) -> impl Iterator<Item = &Opening> {
        self.openings.iter().filter(move |o| o.wall_index >= wall_count)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.openings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.openings.is_empty()
    }
}

impl Default for OpeningRegistry {
    fn default() -> Self {
        Self::new()
    }
}
