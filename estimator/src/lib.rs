//! Surface coverage estimation for wall finishes.
//!
//! Given a list of walls, a material (tiles or wallpaper) and the openings cut
//! into the walls (doors, windows, mirrors), this crate computes how much
//! material to buy and renders a to-scale preview of each wall. Openings can be
//! dragged around in the preview; the engine keeps them inside their wall.
//!
//! The estimators are pure functions. [`engine::EngineCore`] holds the
//! mutable state and turns pointer events into [`engine::Action`]s for the
//! host.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Engine state, drag handling and frame driving |
//! | [`tile`] | Tile counts with the half-tile rule and waste |
//! | [`wallpaper`] | Strip and roll counts with pattern repeat |
//! | [`openings`] | Opening kinds and the opening registry |
//! | [`wall`] | Wall dimensions and wallpaper spans |
//! | [`fields`] | Lenient numeric field parsing for user input |
//! | [`geometry`] | Wall-to-panel mapping and its inverse |
//! | [`hit`] | Hit-testing openings on a panel |
//! | [`input`] | Pointer buttons, cursors and the drag state machine |
//! | [`render`] | Two-phase preview layout and drawing |
//! | [`surface`] | Drawing surface trait plus recording, SVG and canvas backends |
//! | [`schedule`] | Coalescing next-frame render requests |
//! | [`consts`] | Shared numeric constants |

pub mod consts;
pub mod engine;
pub mod fields;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod openings;
pub mod render;
pub mod schedule;
pub mod surface;
pub mod tile;
pub mod wall;
pub mod wallpaper;
