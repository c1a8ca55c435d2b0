//! Input model: mouse buttons and the drag state machine.
//!
//! `DragState` is the gesture tracked between pointer-down and pointer-up. A
//! drag captures the panel it started on together with the grab offset, so
//! every later pointer move is converted with that panel's mapping even if the
//! pointer leaves it.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::Point;
use crate::openings::OpeningId;

/// Pointer button reported with a press or release.
///
/// Only [`Button::Primary`] grabs an opening; the host maps any other button
/// to [`Button::Other`] and the engine ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Other,
}

/// Cursor shown over a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    /// Pointer is over an opening that can be dragged.
    Grab,
    /// A drag is in progress.
    Grabbing,
}

impl Cursor {
    /// CSS cursor keyword.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Internal state for the drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an opening inside its wall.
    DraggingOpening {
        /// Id of the opening being dragged.
        id: OpeningId,
        /// Panel (wall index) the drag started on.
        panel: usize,
        /// Pointer offset from the opening's top-left corner, in meters.
        grab: Point,
    },
}

impl DragState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::DraggingOpening { .. })
    }

    /// The opening being dragged, if any.
    #[must_use]
    pub fn opening(&self) -> Option<OpeningId> {
        match self {
            Self::DraggingOpening { id, .. } => Some(*id),
            Self::Idle => None,
        }
    }
}
