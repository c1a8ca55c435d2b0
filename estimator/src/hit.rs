//! Hit-testing pointer positions against the openings drawn on a panel.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geometry::{Mapping, Point};
use crate::openings::{Opening, OpeningId};

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub opening_id: OpeningId,
    /// The pointer position in wall meters.
    pub wall_pt: Point,
    /// Pointer offset from the opening's top-left corner, in meters.
    pub grab: Point,
}

/// Find the opening under `panel_pt`, topmost first.
///
/// `openings` is in draw order, so later openings win. `mapping` must be the
/// mapping the panel was last drawn with.
#[must_use]
pub fn hit_test<'a, I>(panel_pt: Point, mapping: &Mapping, openings: I) -> Option<Hit>
where
    I: IntoIterator<Item = &'a Opening>,
    I::IntoIter: DoubleEndedIterator,
{
    let wall_pt = mapping.to_wall(panel_pt);
    openings
        .into_iter()
        .rev()
        .find(|o| o.rect().contains(wall_pt))
        .map(|o| Hit {
            opening_id: o.id,
            wall_pt,
            grab: Point::new(wall_pt.x - o.x_m, wall_pt.y - o.y_m),
        })
}
