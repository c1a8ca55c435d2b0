//! Preview rendering: one panel per wall, drawn through a [`Surface`].
//!
//! Rendering is split in two phases. [`PreviewRenderer::layout`] reads the
//! surfaces' resolved pixel sizes and computes one [`Mapping`] per wall;
//! [`PreviewRenderer::draw`] paints using exactly those mappings. The host
//! calls `layout` only once its surfaces have been laid out (typically on the
//! next animation frame); a test harness can call both back to back.
//!
//! Hit-testing reads the mapping stored by the last `layout`, so a drag always
//! inverts the transform the user is looking at.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::consts::{
    FALLBACK_PANEL_HEIGHT_PX, FALLBACK_PANEL_WIDTH_PX, MIN_GROUT_PX, PANEL_LABEL_PX, PANEL_PADDING_PX,
};
use crate::geometry::{self, Mapping, NotDrawable, Point, Rect};
use crate::openings::{Opening, OpeningRegistry};
use crate::surface::{Size, Surface};
use crate::tile::{TileParams, ceil_whole, to_count};
use crate::wall::Wall;
use crate::wallpaper::WallpaperParams;

/// Wall background.
const WALL_FILL: &str = "#F4EFE6";
/// Wall outline.
const WALL_STROKE: &str = "#1F1A17";
/// Grout / seam lines.
const JOINT_STROKE: &str = "#B8AFA3";
/// Shading on every other wallpaper strip.
const STRIP_ALT_FILL: &str = "#EAE3D6";
const OPENING_STROKE: &str = "#4A4037";
const CAPTION_COLOR: &str = "#1F1A17";

/// Gap between the caption baseline and the top of the wall, in pixels.
const CAPTION_GAP_PX: f64 = 6.0;
/// Openings shorter than this on screen get no label.
const OPENING_LABEL_MIN_PX: f64 = 16.0;
/// Pattern lines per axis above which the pattern is skipped.
const MAX_PATTERN_LINES: u64 = 2000;

/// Panel geometry constants shared by layout and hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewSettings {
    pub padding_px: f64,
    pub label_px: f64,
    /// Size assumed for a surface whose size has not resolved yet.
    pub fallback: Size,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            padding_px: PANEL_PADDING_PX,
            label_px: PANEL_LABEL_PX,
            fallback: Size::new(FALLBACK_PANEL_WIDTH_PX, FALLBACK_PANEL_HEIGHT_PX),
        }
    }
}

/// Where a panel's size came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeSource {
    /// The surface reported a laid-out size.
    Resolved,
    /// The surface had no usable size; [`PreviewSettings::fallback`] was used.
    Fallback,
}

/// Result of laying out one wall panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    pub wall_index: usize,
    /// The wall as it was at layout time.
    pub wall: Wall,
    pub size: Size,
    pub source: SizeSource,
    pub mapping: Result<Mapping, NotDrawable>,
}

impl PanelLayout {
    /// The panel's mapping, or `None` if the wall is not drawable.
    #[must_use]
    pub fn mapping(&self) -> Option<&Mapping> {
        match &self.mapping {
            Ok(m) => Some(m),
            Err(_) => None,
        }
    }

    /// The wall's rectangle in panel pixels.
    #[must_use]
    pub fn wall_rect(&self) -> Option<Rect> {
        self.mapping()
            .map(|m| m.rect_to_panel(Rect::new(0.0, 0.0, self.wall.width_m, self.wall.height_m)))
    }
}

/// Repeating fill drawn inside each wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pattern {
    /// A tile grid. Sizes in meters; tiles run along the width by `length_m`.
    Tiles { length_m: f64, width_m: f64, grout_m: f64 },
    /// Vertical wallpaper strips `width_m` wide.
    Strips { width_m: f64 },
    /// No pattern.
    Plain,
}

impl Pattern {
    #[must_use]
    pub fn for_tiles(params: &TileParams) -> Self {
        if params.tile_area_m2() > 0.0 {
            Self::Tiles { length_m: params.length_m(), width_m: params.width_m(), grout_m: params.grout_m() }
        } else {
            Self::Plain
        }
    }

    #[must_use]
    pub fn for_wallpaper(params: &WallpaperParams) -> Self {
        if params.roll_width_m > 0.0 { Self::Strips { width_m: params.roll_width_m } } else { Self::Plain }
    }
}

/// Lays out and draws one panel per wall.
#[derive(Debug, Clone, Default)]
pub struct PreviewRenderer {
    settings: PreviewSettings,
    panels: Vec<PanelLayout>,
}

impl PreviewRenderer {
    #[must_use]
    pub fn new(settings: PreviewSettings) -> Self {
        Self { settings, panels: Vec::new() }
    }

    #[must_use]
    pub fn settings(&self) -> &PreviewSettings {
        &self.settings
    }

    /// Layout phase: compute one panel per wall from the surfaces' sizes.
    ///
    /// `sizes[i]` is the size of wall `i`'s surface, `None` when not yet laid
    /// out. Missing or unresolved sizes use the fallback size and are marked
    /// [`SizeSource::Fallback`].
    pub fn layout(&mut self, walls: &[Wall], sizes: &[Option<Size>]) {
        let s = self.settings;
        self.panels = walls
            .iter()
            .enumerate()
            .map(|(i, wall)| {
                let (size, source) = match sizes.get(i).copied().flatten() {
                    Some(size) if size.is_resolved() => (size, SizeSource::Resolved),
                    _ => {
                        tracing::warn!(wall = i, "panel size unresolved; using fallback size");
                        (s.fallback, SizeSource::Fallback)
                    }
                };
                let mapping =
                    geometry::forward(wall.width_m, wall.height_m, size.width, size.height, s.padding_px, s.label_px);
                if let Err(e) = &mapping {
                    tracing::debug!(wall = i, error = %e, "wall not drawable");
                }
                PanelLayout { wall_index: i, wall: *wall, size, source, mapping }
            })
            .collect();
    }

    /// Panels from the most recent layout.
    #[must_use]
    pub fn panels(&self) -> &[PanelLayout] {
        &self.panels
    }

    #[must_use]
    pub fn panel(&self, index: usize) -> Option<&PanelLayout> {
        self.panels.get(index)
    }

    /// Draw phase: paint every laid-out panel onto its surface.
    ///
    /// Surfaces pair with panels by index; extra surfaces are left untouched.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by a surface.
    pub fn draw<S: Surface>(
        &self,
        surfaces: &mut [S],
        openings: &OpeningRegistry,
        pattern: &Pattern,
    ) -> Result<(), S::Error> {
        for (panel, surface) in self.panels.iter().zip(surfaces.iter_mut()) {
            draw_panel(surface, panel, openings.on_wall(panel.wall_index), pattern)?;
        }
        Ok(())
    }
}

/// Draw a single panel: wall, clipped pattern, openings, outline and caption.
///
/// # Errors
///
/// Returns the first error reported by `surface`.
pub fn draw_panel<'a, S: Surface>(
    surface: &mut S,
    panel: &PanelLayout,
    openings: impl Iterator<Item = &'a Opening>,
    pattern: &Pattern,
) -> Result<(), S::Error> {
    surface.clear(panel.size)?;
    let (Some(m), Some(wall_px)) = (panel.mapping(), panel.wall_rect()) else {
        return Ok(());
    };

    surface.fill_rect(wall_px, WALL_FILL)?;

    surface.push_clip(wall_px)?;
    draw_pattern(surface, m, &panel.wall, wall_px, pattern)?;
    for opening in openings {
        draw_opening(surface, m, opening)?;
    }
    surface.pop_clip()?;

    surface.stroke_rect(wall_px, WALL_STROKE, 1.5)?;

    let caption = format!(
        "Wall {}: {:.2} x {:.2} m",
        panel.wall_index + 1,
        panel.wall.width_m,
        panel.wall.height_m
    );
    surface.text(Point::new(wall_px.x, wall_px.y - CAPTION_GAP_PX), &caption, CAPTION_COLOR)?;
    Ok(())
}

// =============================================================
// Patterns
// =============================================================

fn draw_pattern<S: Surface>(
    surface: &mut S,
    m: &Mapping,
    wall: &Wall,
    wall_px: Rect,
    pattern: &Pattern,
) -> Result<(), S::Error> {
    match *pattern {
        Pattern::Tiles { length_m, width_m, grout_m } => {
            let joint_px = m.len_to_panel(grout_m).max(MIN_GROUT_PX);
            let Some(cols) = line_count(wall.width_m, length_m) else {
                return Ok(());
            };
            let Some(rows) = line_count(wall.height_m, width_m) else {
                return Ok(());
            };
            for i in 1..cols {
                let x = wall_px.x + m.len_to_panel(step(i, length_m));
                surface.line(Point::new(x, wall_px.y), Point::new(x, wall_px.bottom()), JOINT_STROKE, joint_px)?;
            }
            for j in 1..rows {
                let y = wall_px.y + m.len_to_panel(step(j, width_m));
                surface.line(Point::new(wall_px.x, y), Point::new(wall_px.right(), y), JOINT_STROKE, joint_px)?;
            }
        }
        Pattern::Strips { width_m } => {
            let Some(strips) = line_count(wall.width_m, width_m) else {
                return Ok(());
            };
            let strip_px = m.len_to_panel(width_m);
            for i in 0..strips {
                let x = wall_px.x + m.len_to_panel(step(i, width_m));
                if i % 2 == 1 {
                    surface.fill_rect(Rect::new(x, wall_px.y, strip_px, wall_px.height), STRIP_ALT_FILL)?;
                }
                if i > 0 {
                    surface.line(Point::new(x, wall_px.y), Point::new(x, wall_px.bottom()), JOINT_STROKE, 1.0)?;
                }
            }
        }
        Pattern::Plain => {}
    }
    Ok(())
}

/// Number of pattern cells needed to span `extent_m`, or `None` when the
/// pattern is degenerate or too dense to draw.
fn line_count(extent_m: f64, cell_m: f64) -> Option<u64> {
    if cell_m <= 0.0 {
        return None;
    }
    let count = to_count(ceil_whole(extent_m / cell_m));
    if count > MAX_PATTERN_LINES {
        tracing::trace!(count, "pattern too dense; skipped");
        return None;
    }
    Some(count)
}

#[allow(clippy::cast_precision_loss)]
fn step(i: u64, cell_m: f64) -> f64 {
    i as f64 * cell_m
}

// =============================================================
// Openings
// =============================================================

fn draw_opening<S: Surface>(surface: &mut S, m: &Mapping, opening: &Opening) -> Result<(), S::Error> {
    let spec = opening.kind.spec();
    let r = m.rect_to_panel(opening.rect());
    surface.fill_rect(r, spec.fill)?;
    surface.stroke_rect(r, OPENING_STROKE, 1.0)?;
    if r.height >= OPENING_LABEL_MIN_PX {
        surface.text(Point::new(r.x + 3.0, r.y + 12.0), spec.label, OPENING_STROKE)?;
    }
    Ok(())
}
