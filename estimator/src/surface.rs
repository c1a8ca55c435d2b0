//! Drawing surfaces: the minimal 2D API the preview renderer draws through.
//!
//! The renderer never talks to a concrete backend. A host supplies one
//! [`Surface`] per wall panel; this module ships a recording surface for
//! tests, an SVG surface for file output and, behind the `web` feature, an
//! HTML canvas adapter.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::convert::Infallible;
use std::fmt::Write as _;

use serde::Serialize;

use crate::geometry::{Point, Rect};

/// Pixel size of a laid-out surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both sides are positive and finite.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A rectangular drawable region with a queryable size.
///
/// Coordinates are CSS pixels with the origin at the top-left corner.
pub trait Surface {
    type Error;

    /// The laid-out pixel size, or `None` before layout has resolved it.
    fn size(&self) -> Option<Size>;

    /// Reset the surface to blank.
    fn clear(&mut self, size: Size) -> Result<(), Self::Error>;

    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<(), Self::Error>;

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) -> Result<(), Self::Error>;

    fn line(&mut self, from: Point, to: Point, color: &str, line_width: f64) -> Result<(), Self::Error>;

    /// Draw `text` with its baseline starting at `at`.
    fn text(&mut self, at: Point, text: &str, color: &str) -> Result<(), Self::Error>;

    /// Restrict subsequent drawing to `rect` until the matching [`Surface::pop_clip`].
    fn push_clip(&mut self, rect: Rect) -> Result<(), Self::Error>;

    fn pop_clip(&mut self) -> Result<(), Self::Error>;
}

// =============================================================
// Recording surface
// =============================================================

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Size),
    FillRect { rect: Rect, color: String },
    StrokeRect { rect: Rect, color: String, line_width: f64 },
    Line { from: Point, to: Point, color: String, line_width: f64 },
    Text { at: Point, text: String, color: String },
    PushClip(Rect),
    PopClip,
}

/// A surface that records draw calls instead of producing pixels.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Option<Size>,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// A surface that has already been laid out at `width` × `height`.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { size: Some(Size::new(width, height)), ops: Vec::new() }
    }

    /// A surface that has not been laid out yet.
    #[must_use]
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// Simulate a layout pass resizing the surface.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = Some(Size::new(width, height));
    }

    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of [`DrawOp::Clear`] calls, i.e. how many times the panel was drawn.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Clear(_))).count()
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn size(&self) -> Option<Size> {
        self.size
    }

    fn clear(&mut self, size: Size) -> Result<(), Infallible> {
        self.ops.push(DrawOp::Clear(size));
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<(), Infallible> {
        self.ops.push(DrawOp::FillRect { rect, color: color.to_string() });
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) -> Result<(), Infallible> {
        self.ops.push(DrawOp::StrokeRect { rect, color: color.to_string(), line_width });
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, color: &str, line_width: f64) -> Result<(), Infallible> {
        self.ops.push(DrawOp::Line { from, to, color: color.to_string(), line_width });
        Ok(())
    }

    fn text(&mut self, at: Point, text: &str, color: &str) -> Result<(), Infallible> {
        self.ops.push(DrawOp::Text { at, text: text.to_string(), color: color.to_string() });
        Ok(())
    }

    fn push_clip(&mut self, rect: Rect) -> Result<(), Infallible> {
        self.ops.push(DrawOp::PushClip(rect));
        Ok(())
    }

    fn pop_clip(&mut self) -> Result<(), Infallible> {
        self.ops.push(DrawOp::PopClip);
        Ok(())
    }
}

// =============================================================
// SVG surface
// =============================================================

/// A surface that renders to an SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    size: Size,
    body: String,
    next_clip: usize,
}

impl SvgSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { size: Size::new(width, height), body: String::new(), next_clip: 0 }
    }

    /// Close the document and return it.
    #[must_use]
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.0}\" height=\"{h:.0}\" viewBox=\"0 0 {w:.2} {h:.2}\">\n{body}</svg>\n",
            w = self.size.width,
            h = self.size.height,
            body = self.body,
        )
    }
}

impl Surface for SvgSurface {
    type Error = std::fmt::Error;

    fn size(&self) -> Option<Size> {
        Some(self.size)
    }

    fn clear(&mut self, size: Size) -> Result<(), Self::Error> {
        self.body.clear();
        self.size = size;
        writeln!(
            self.body,
            "<rect x=\"0\" y=\"0\" width=\"{:.2}\" height=\"{:.2}\" fill=\"#FFFFFF\"/>",
            size.width, size.height
        )
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<(), Self::Error> {
        writeln!(
            self.body,
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            escape(color)
        )
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) -> Result<(), Self::Error> {
        writeln!(
            self.body,
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            escape(color),
            line_width
        )
    }

    fn line(&mut self, from: Point, to: Point, color: &str, line_width: f64) -> Result<(), Self::Error> {
        writeln!(
            self.body,
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
            from.x,
            from.y,
            to.x,
            to.y,
            escape(color),
            line_width
        )
    }

    fn text(&mut self, at: Point, text: &str, color: &str) -> Result<(), Self::Error> {
        writeln!(
            self.body,
            "<text x=\"{:.2}\" y=\"{:.2}\" fill=\"{}\" font-family=\"sans-serif\" font-size=\"12\">{}</text>",
            at.x,
            at.y,
            escape(color),
            escape(text)
        )
    }

    fn push_clip(&mut self, rect: Rect) -> Result<(), Self::Error> {
        let id = self.next_clip;
        self.next_clip += 1;
        writeln!(
            self.body,
            "<clipPath id=\"clip{id}\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/></clipPath>",
            rect.x, rect.y, rect.width, rect.height
        )?;
        writeln!(self.body, "<g clip-path=\"url(#clip{id})\">")
    }

    fn pop_clip(&mut self) -> Result<(), Self::Error> {
        writeln!(self.body, "</g>")
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// =============================================================
// HTML canvas surface
// =============================================================

#[cfg(feature = "web")]
pub use web::CanvasSurface;

#[cfg(feature = "web")]
mod web {
    use wasm_bindgen::JsValue;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use super::{Size, Surface};
    use crate::geometry::{Point, Rect};

    /// A [`Surface`] over a browser `<canvas>` element.
    ///
    /// The size is read from the element's CSS box, so it is `None` until the
    /// browser has laid the element out.
    pub struct CanvasSurface {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        dpr: f64,
    }

    impl CanvasSurface {
        #[must_use]
        pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, dpr: f64) -> Self {
            Self { canvas, ctx, dpr: dpr.max(1.0) }
        }
    }

    impl Surface for CanvasSurface {
        type Error = JsValue;

        fn size(&self) -> Option<Size> {
            let size = Size::new(f64::from(self.canvas.client_width()), f64::from(self.canvas.client_height()));
            size.is_resolved().then_some(size)
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        fn clear(&mut self, size: Size) -> Result<(), JsValue> {
            self.canvas.set_width((size.width * self.dpr).round() as u32);
            self.canvas.set_height((size.height * self.dpr).round() as u32);
            self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)?;
            self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
            Ok(())
        }

        fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<(), JsValue> {
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
            Ok(())
        }

        fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) -> Result<(), JsValue> {
            self.ctx.set_stroke_style_str(color);
            self.ctx.set_line_width(line_width);
            self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
            Ok(())
        }

        fn line(&mut self, from: Point, to: Point, color: &str, line_width: f64) -> Result<(), JsValue> {
            self.ctx.set_stroke_style_str(color);
            self.ctx.set_line_width(line_width);
            self.ctx.begin_path();
            self.ctx.move_to(from.x, from.y);
            self.ctx.line_to(to.x, to.y);
            self.ctx.stroke();
            Ok(())
        }

        fn text(&mut self, at: Point, text: &str, color: &str) -> Result<(), JsValue> {
            self.ctx.set_fill_style_str(color);
            self.ctx.set_font("12px sans-serif");
            self.ctx.set_text_baseline("alphabetic");
            self.ctx.fill_text(text, at.x, at.y)
        }

        fn push_clip(&mut self, rect: Rect) -> Result<(), JsValue> {
            self.ctx.save();
            self.ctx.begin_path();
            self.ctx.rect(rect.x, rect.y, rect.width, rect.height);
            self.ctx.clip();
            Ok(())
        }

        fn pop_clip(&mut self) -> Result<(), JsValue> {
            self.ctx.restore();
            Ok(())
        }
    }
}
