#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;

use crate::geometry::Point;
use crate::hit::{Hit, hit_test};
use crate::input::{Button, Cursor, DragState};
use crate::openings::{Opening, OpeningField, OpeningId, OpeningKind, OpeningRegistry};
use crate::render::{Pattern, PreviewRenderer, PreviewSettings};
use crate::schedule::{FrameScheduler, FrameTicket};
use crate::surface::{Size, Surface};
use crate::tile::{self, TileEstimate, TileParams};
use crate::wall::Wall;
use crate::wallpaper::{self, WallpaperEstimate, WallpaperParams};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// An opening's stored position changed during a drag.
    OpeningMoved { id: OpeningId, x_m: f64, y_m: f64 },
    SetCursor(String),
    /// A render has been scheduled for the next frame.
    RenderNeeded,
}

/// The material being estimated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Tile(TileParams),
    Wallpaper(WallpaperParams),
}

impl Default for Material {
    fn default() -> Self {
        Self::Tile(TileParams::default())
    }
}

impl Material {
    /// The preview pattern for this material.
    #[must_use]
    pub fn pattern(&self) -> Pattern {
        match self {
            Self::Tile(p) => Pattern::for_tiles(p),
            Self::Wallpaper(p) => Pattern::for_wallpaper(p),
        }
    }
}

/// Result record handed to the results consumer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "material", rename_all = "lowercase")]
pub enum Estimate {
    Tile(TileEstimate),
    Wallpaper(WallpaperEstimate),
}

/// Core engine state: walls, openings, material, preview layout and the
/// drag gesture, all mutated through `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub walls: Vec<Wall>,
    pub openings: OpeningRegistry,
    pub material: Material,
    pub renderer: PreviewRenderer,
    pub drag: DragState,
    pub frames: FrameScheduler,
    cursor: Option<Cursor>,
}

impl EngineCore {
    #[must_use]
    pub fn new(settings: PreviewSettings) -> Self {
        Self { renderer: PreviewRenderer::new(settings), ..Self::default() }
    }

    // --- Data inputs ---

    /// Replace all walls. Openings keep their wall index and are re-clamped
    /// into whichever wall now sits at that index.
    pub fn set_walls(&mut self, walls: Vec<Wall>) {
        self.walls = walls;
        self.openings.clamp_all(&self.walls);
        self.request_render();
    }

    /// Append a wall and return its index.
    pub fn add_wall(&mut self, wall: Wall) -> usize {
        self.walls.push(wall);
        self.openings.clamp_all(&self.walls);
        self.request_render();
        self.walls.len() - 1
    }

    /// Remove the last wall. Openings on it are kept as orphans.
    pub fn pop_wall(&mut self) -> Option<Wall> {
        let wall = self.walls.pop()?;
        let removed = self.walls.len();
        if let DragState::DraggingOpening { panel, .. } = self.drag {
            if panel == removed {
                tracing::debug!(panel, "drag cancelled: wall removed");
                self.drag = DragState::Idle;
            }
        }
        let orphans = self.openings.orphans(self.walls.len()).count();
        if orphans > 0 {
            tracing::debug!(orphans, "openings left without a wall");
        }
        self.request_render();
        Some(wall)
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
        self.request_render();
    }

    /// Add an opening with its kind's default size.
    pub fn add_opening(&mut self, kind: OpeningKind, wall_index: usize) -> OpeningId {
        let id = self.openings.add(kind, wall_index, &self.walls);
        self.request_render();
        id
    }

    /// Add an opening with an explicit size.
    pub fn add_opening_sized(&mut self, kind: OpeningKind, wall_index: usize, width_m: f64, height_m: f64) -> OpeningId {
        let id = self.openings.add_sized(kind, wall_index, width_m, height_m, &self.walls);
        self.request_render();
        id
    }

    pub fn remove_opening(&mut self, id: OpeningId) -> Option<Opening> {
        let removed = self.openings.remove(id)?;
        if self.drag.opening() == Some(id) {
            self.drag = DragState::Idle;
        }
        self.request_render();
        Some(removed)
    }

    pub fn update_opening_field(&mut self, id: OpeningId, field: OpeningField, value: f64) -> bool {
        let changed = self.openings.update_field(id, field, value);
        if changed {
            self.request_render();
        }
        changed
    }

    /// Move an opening, clamped into its wall. Returns the stored position.
    pub fn move_opening(&mut self, id: OpeningId, x_m: f64, y_m: f64) -> Option<Point> {
        let pos = self.openings.update_position(id, x_m, y_m, &self.walls)?;
        self.request_render();
        Some(pos)
    }

    pub fn update_opening_wall(&mut self, id: OpeningId, wall_index: usize) -> bool {
        let changed = self.openings.update_wall(id, wall_index);
        if changed {
            self.request_render();
        }
        changed
    }

    // --- Queries ---

    /// Run the estimator for the current material.
    #[must_use]
    pub fn estimate(&self) -> Estimate {
        match &self.material {
            Material::Tile(params) => Estimate::Tile(tile::estimate(&self.walls, self.openings.all(), params)),
            Material::Wallpaper(params) => Estimate::Wallpaper(wallpaper::estimate_walls(&self.walls, params)),
        }
    }

    /// Look up an opening by id.
    #[must_use]
    pub fn opening(&self, id: OpeningId) -> Option<&Opening> {
        self.openings.get(id)
    }

    // --- Render ---

    /// Schedule a render for the next frame, replacing any pending one.
    pub fn request_render(&mut self) -> FrameTicket {
        self.frames.request()
    }

    /// Layout phase: compute every panel's mapping from the surface sizes.
    ///
    /// Openings left outside their wall by a field edit or a wall change are
    /// clamped back in first, so every drawn opening can be grabbed.
    pub fn layout(&mut self, sizes: &[Option<Size>]) {
        self.openings.clamp_all(&self.walls);
        self.renderer.layout(&self.walls, sizes);
    }

    /// Draw phase: paint the most recent layout.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by a surface.
    pub fn draw<S: Surface>(&self, surfaces: &mut [S]) -> Result<(), S::Error> {
        self.renderer.draw(surfaces, &self.openings, &self.material.pattern())
    }

    /// Frame callback: if a render is pending, lay out against the surfaces'
    /// current sizes and draw. Returns whether anything was drawn.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by a surface. The pending render is
    /// consumed either way.
    pub fn run_frame<S: Surface>(&mut self, surfaces: &mut [S]) -> Result<bool, S::Error> {
        let Some(ticket) = self.frames.take() else {
            return Ok(false);
        };
        let sizes: Vec<Option<Size>> = surfaces.iter().map(S::size).collect();
        self.layout(&sizes);
        self.draw(surfaces)?;
        tracing::trace!(ticket = ticket.0, panels = self.renderer.panels().len(), "frame drawn");
        Ok(true)
    }

    // --- Input events ---

    /// Pointer pressed on panel `panel` at panel-pixel `pt`.
    ///
    /// A primary press over an opening starts a drag, remembering where
    /// inside the opening it was grabbed.
    pub fn on_pointer_down(&mut self, panel: usize, pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let Some(hit) = self.hit(panel, pt) else {
            return Vec::new();
        };
        self.drag = DragState::DraggingOpening { id: hit.opening_id, panel, grab: hit.grab };
        self.set_cursor(Cursor::Grabbing).into_iter().collect()
    }

    /// Pointer moved over panel `panel` at panel-pixel `pt`.
    ///
    /// During a drag `panel` is ignored: the point is converted with the
    /// mapping of the panel the drag started on.
    pub fn on_pointer_move(&mut self, panel: usize, pt: Point) -> Vec<Action> {
        match self.drag {
            DragState::DraggingOpening { id, panel: captured, grab } => self.drag_to(id, captured, grab, pt),
            DragState::Idle => {
                let cursor = if self.hit(panel, pt).is_some() { Cursor::Grab } else { Cursor::Default };
                self.set_cursor(cursor).into_iter().collect()
            }
        }
    }

    /// Pointer released. Ends any drag.
    pub fn on_pointer_up(&mut self, panel: usize, pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || !self.drag.is_dragging() {
            return Vec::new();
        }
        self.drag = DragState::Idle;
        let cursor = if self.hit(panel, pt).is_some() { Cursor::Grab } else { Cursor::Default };
        self.set_cursor(cursor).into_iter().collect()
    }

    fn drag_to(&mut self, id: OpeningId, panel: usize, grab: Point, pt: Point) -> Vec<Action> {
        let on_panel = panel < self.walls.len() && self.openings.get(id).is_some_and(|o| o.wall_index == panel);
        let mapping = self.renderer.panel(panel).and_then(|p| p.mapping()).copied();
        let (true, Some(mapping)) = (on_panel, mapping) else {
            tracing::debug!(id, panel, "drag cancelled: opening or panel gone");
            self.drag = DragState::Idle;
            return self.set_cursor(Cursor::Default).into_iter().collect();
        };

        let wall_pt = mapping.to_wall(pt);
        let Some(pos) = self.openings.update_position(id, wall_pt.x - grab.x, wall_pt.y - grab.y, &self.walls)
        else {
            self.drag = DragState::Idle;
            return Vec::new();
        };
        self.request_render();
        vec![Action::OpeningMoved { id, x_m: pos.x, y_m: pos.y }, Action::RenderNeeded]
    }

    fn hit(&self, panel: usize, pt: Point) -> Option<Hit> {
        // The last layout may still hold panels for walls popped since.
        if panel >= self.walls.len() {
            return None;
        }
        let mapping = self.renderer.panel(panel)?.mapping()?;
        hit_test(pt, mapping, self.openings.on_wall(panel))
    }

    /// Record the cursor, returning an action only when it changes.
    fn set_cursor(&mut self, cursor: Cursor) -> Option<Action> {
        if self.cursor == Some(cursor) {
            return None;
        }
        self.cursor = Some(cursor);
        Some(Action::SetCursor(cursor.css().to_owned()))
    }
}

/// The browser engine. Wraps `EngineCore` and owns one canvas per wall.
#[cfg(feature = "web")]
pub struct Engine {
    surfaces: Vec<crate::surface::CanvasSurface>,
    pub core: EngineCore,
}

#[cfg(feature = "web")]
impl Engine {
    #[must_use]
    pub fn new(settings: PreviewSettings) -> Self {
        Self { surfaces: Vec::new(), core: EngineCore::new(settings) }
    }

    /// Replace the panel canvases, one per wall in wall order.
    pub fn set_surfaces(&mut self, surfaces: Vec<crate::surface::CanvasSurface>) {
        self.surfaces = surfaces;
        self.core.request_render();
    }

    /// Animation-frame callback.
    ///
    /// # Errors
    ///
    /// Returns the first canvas error.
    pub fn render(&mut self) -> Result<bool, wasm_bindgen::JsValue> {
        self.core.run_frame(&mut self.surfaces)
    }
}
