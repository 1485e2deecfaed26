//! Minimal 2D drawing surface the games render through.
//!
//! Engines only need a handful of primitives, so rendering stays testable off the
//! browser: `CanvasRenderingContext2d` implements the trait for real frames and
//! `RecordingSurface` captures draw calls for tests.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// Styling for an emoji / text glyph centered on its anchor point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphStyle {
    pub size_px: f64,
    pub mirrored: bool, // flip horizontally around the anchor
    pub glow: bool,     // white halo (boost highlight)
}

impl GlyphStyle {
    pub const fn sized(size_px: f64) -> Self {
        Self { size_px, mirrored: false, glow: false }
    }
}

pub trait Surface {
    /// Reset the whole surface to transparent.
    fn clear(&mut self, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);
    fn fill_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: &str);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str);
    fn glyph(&mut self, text: &str, x: f64, y: f64, style: GlyphStyle);
    /// Plain centered text (overlays).
    fn text(&mut self, text: &str, x: f64, y: f64, font_px: f64, color: &str);
}

// --- Canvas backend ----------------------------------------------------------

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.set_fill_style_str(color);
        CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
    }

    fn fill_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: &str) {
        let r = radius.min(w / 2.0).min(h / 2.0);
        self.set_fill_style_str(color);
        self.begin_path();
        self.move_to(x + r, y);
        self.arc_to(x + w, y, x + w, y + h, r).ok();
        self.arc_to(x + w, y + h, x, y + h, r).ok();
        self.arc_to(x, y + h, x, y, r).ok();
        self.arc_to(x, y, x + w, y, r).ok();
        self.close_path();
        self.fill();
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
        self.set_fill_style_str(color);
        self.begin_path();
        self.arc(x, y, radius, 0.0, TAU).ok();
        self.fill();
    }

    fn glyph(&mut self, text: &str, x: f64, y: f64, style: GlyphStyle) {
        self.save();
        self.translate(x, y).ok();
        if style.mirrored {
            self.scale(-1.0, 1.0).ok();
        }
        if style.glow {
            self.set_shadow_blur(15.0);
            self.set_shadow_color("white");
        }
        self.set_font(&format!("{}px serif", style.size_px));
        self.set_text_align("center");
        self.set_text_baseline("middle");
        self.fill_text(text, 0.0, 0.0).ok();
        self.restore();
    }

    fn text(&mut self, text: &str, x: f64, y: f64, font_px: f64, color: &str) {
        self.set_font(&format!("{font_px}px 'Fira Code', monospace"));
        self.set_text_align("center");
        self.set_text_baseline("middle");
        self.set_fill_style_str(color);
        self.fill_text(text, x, y).ok();
    }
}

/// Reuse the page's canvas, or append one sized to the playfield.
pub(crate) fn canvas_by_id(
    doc: &Document,
    canvas_id: &str,
    size: u32,
) -> Result<HtmlCanvasElement, JsValue> {
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(canvas_id) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(canvas_id);
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    canvas.set_width(size);
    canvas.set_height(size);
    Ok(canvas)
}

// --- Recording backend -------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear,
    Rect { x: f64, y: f64, w: f64, h: f64, color: String },
    RoundRect { x: f64, y: f64, radius: f64, color: String },
    Circle { x: f64, y: f64, radius: f64, color: String },
    Glyph { text: String, x: f64, y: f64, style: GlyphStyle },
    Text { text: String, x: f64, y: f64 },
}

/// Surface that only remembers what was drawn.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All glyph draws of one symbol, in draw order.
    pub fn glyphs(&self, text: &str) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Glyph { text: t, .. } if t == text))
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, _width: f64, _height: f64) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.calls.push(DrawCall::Rect { x, y, w, h, color: color.to_owned() });
    }

    fn fill_round_rect(&mut self, x: f64, y: f64, _w: f64, _h: f64, radius: f64, color: &str) {
        self.calls.push(DrawCall::RoundRect { x, y, radius, color: color.to_owned() });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
        self.calls.push(DrawCall::Circle { x, y, radius, color: color.to_owned() });
    }

    fn glyph(&mut self, text: &str, x: f64, y: f64, style: GlyphStyle) {
        self.calls.push(DrawCall::Glyph { text: text.to_owned(), x, y, style });
    }

    fn text(&mut self, text: &str, x: f64, y: f64, _font_px: f64, _color: &str) {
        self.calls.push(DrawCall::Text { text: text.to_owned(), x, y });
    }
}
