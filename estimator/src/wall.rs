//! Walls: the rectangular surfaces being covered.

#[cfg(test)]
#[path = "wall_test.rs"]
mod wall_test;

use serde::Serialize;

use crate::fields::Fields;

/// A rectangular surface to cover, in meters.
///
/// A wall's position in the wall list is its index; openings refer to walls
/// by that index.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Wall {
    pub width_m: f64,
    pub height_m: f64,
}

impl Wall {
    #[must_use]
    pub fn new(width_m: f64, height_m: f64) -> Self {
        Self { width_m, height_m }
    }

    /// Read a wall from a `{ "width": .., "height": .. }` record.
    #[must_use]
    pub fn from_fields(fields: &Fields<'_>) -> Self {
        Self::new(fields.number("width"), fields.number("height"))
    }

    /// Whether both dimensions are positive. Other walls are skipped.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.width_m > 0.0 && self.height_m > 0.0
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width_m * self.height_m
    }
}

/// How the horizontal run of a wallpapered surface is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WallSpan {
    /// A single wall of this width.
    Single { width_m: f64 },
    /// All four walls of a rectangular room.
    Perimeter { length_m: f64, width_m: f64 },
}

impl WallSpan {
    /// The total width in meters to cover with strips.
    #[must_use]
    pub fn width_m(self) -> f64 {
        match self {
            Self::Single { width_m } => width_m,
            Self::Perimeter { length_m, width_m } => 2.0 * (length_m + width_m),
        }
    }
}
