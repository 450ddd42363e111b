//! Raster surface backed by a tiny-skia pixmap.

use std::fmt;
use std::path::Path as FsPath;

use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform,
};

use rinkboard_core::geometry::all_finite;
use rinkboard_core::{Color, Point, StrokeStyle};

use crate::error::{RenderError, Result};
use crate::glyphs;
use crate::surface::{PathSeg, Surface};

/// A raster drawing surface with PNG export.
///
/// Clears to its background color (default white, for print-friendly
/// diagrams). Arcs are flattened to cubic Beziers; dashes come from the
/// per-call stroke record, so no dash state can persist between calls.
pub struct PixmapSurface {
    pixmap: Pixmap,
    background: Color,
}

impl PixmapSurface {
    /// Creates a white-background surface with the given pixel dimensions
    /// (clamped to at least 1x1). Returns `None` if the pixel buffer
    /// cannot be allocated.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        let mut surface = Self {
            pixmap: Pixmap::new(width.max(1), height.max(1))?,
            background: Color::WHITE,
        };
        surface.clear();
        Some(surface)
    }

    /// Sets the background color and clears to it.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self.clear();
        self
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Encodes the current contents as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::PngEncode(e.to_string()))
    }

    /// Writes the current contents to `path` as a PNG file.
    pub fn save_png<P: AsRef<FsPath>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.pixmap
            .save_png(path)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        log::info!(
            "saved {}x{} PNG to {}",
            self.pixmap.width(),
            self.pixmap.height(),
            path.display()
        );
        Ok(())
    }

    fn stroke_built(&mut self, path: Option<tiny_skia::Path>, stroke: &StrokeStyle) {
        if let Some(path) = path {
            let paint = paint(stroke.color);
            let stroke = skia_stroke(stroke);
            self.pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    fn fill_built(&mut self, path: Option<tiny_skia::Path>, color: Color) {
        if let Some(path) = path {
            self.pixmap.fill_path(
                &path,
                &paint(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }
}

impl fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("background", &self.background)
            .finish()
    }
}

impl Surface for PixmapSurface {
    fn resize(&mut self, width: u32, height: u32) {
        match Pixmap::new(width.max(1), height.max(1)) {
            Some(pixmap) => {
                self.pixmap = pixmap;
                self.clear();
            }
            None => log::warn!(
                "pixmap resize to {}x{} failed, keeping {}x{}",
                width,
                height,
                self.pixmap.width(),
                self.pixmap.height()
            ),
        }
    }

    fn clear(&mut self) {
        let bg = self.background;
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, 255));
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, stroke: &StrokeStyle) {
        let Some(rect) = Rect::from_xywh(x as f32, y as f32, width as f32, height as f32) else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.push_rect(rect);
        self.stroke_built(pb.finish(), stroke);
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &StrokeStyle) {
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(x1 as f32, y1 as f32);
        pb.line_to(x2 as f32, y2 as f32);
        self.stroke_built(pb.finish(), stroke);
    }

    fn stroke_polyline(&mut self, points: &[Point], stroke: &StrokeStyle) {
        if points.len() < 2 || !all_finite(points) {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(points[0].x as f32, points[0].y as f32);
        for p in &points[1..] {
            pb.line_to(p.x as f32, p.y as f32);
        }
        self.stroke_built(pb.finish(), stroke);
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, stroke: &StrokeStyle) {
        if !(cx.is_finite() && cy.is_finite()) || !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.push_circle(cx as f32, cy as f32, radius as f32);
        self.stroke_built(pb.finish(), stroke);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        if !(cx.is_finite() && cy.is_finite()) || !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.push_circle(cx as f32, cy as f32, radius as f32);
        self.fill_built(pb.finish(), color);
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.fill_built(build_polygon(points), color);
    }

    fn stroke_polygon(&mut self, points: &[Point], stroke: &StrokeStyle) {
        self.stroke_built(build_polygon(points), stroke);
    }

    fn stroke_outline(&mut self, segments: &[PathSeg], stroke: &StrokeStyle) {
        self.stroke_built(build_outline(segments), stroke);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, size: f64, color: Color) {
        if !(x.is_finite() && y.is_finite()) || !size.is_finite() || size <= 0.0 {
            return;
        }
        let cell = size / glyphs::GLYPH_ROWS as f64;
        let width = glyphs::text_width_cells(text) as f64 * cell;
        let top = y - size;
        let paint = paint(color);

        let mut pen_x = x - width / 2.0;
        for ch in text.chars() {
            if let Some(rows) = glyphs::glyph_rows(ch) {
                for (row, &bits) in rows.iter().enumerate() {
                    for col in 0..glyphs::GLYPH_COLS {
                        if (bits >> (glyphs::GLYPH_COLS - 1 - col)) & 1 == 0 {
                            continue;
                        }
                        if let Some(rect) = Rect::from_xywh(
                            (pen_x + col as f64 * cell) as f32,
                            (top + row as f64 * cell) as f32,
                            cell as f32,
                            cell as f32,
                        ) {
                            self.pixmap
                                .fill_rect(rect, &paint, Transform::identity(), None);
                        }
                    }
                }
            }
            pen_x += glyphs::CHAR_ADVANCE as f64 * cell;
        }
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = true;
    paint
}

fn skia_stroke(stroke: &StrokeStyle) -> Stroke {
    Stroke {
        width: stroke.width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        dash: stroke
            .line_style
            .dash_pattern()
            .and_then(|[on, off]| StrokeDash::new(vec![on as f32, off as f32], 0.0)),
        ..Default::default()
    }
}

fn build_polygon(points: &[Point]) -> Option<tiny_skia::Path> {
    if points.len() < 3 || !all_finite(points) {
        return None;
    }
    let mut pb = PathBuilder::new();
    pb.move_to(points[0].x as f32, points[0].y as f32);
    for p in &points[1..] {
        pb.line_to(p.x as f32, p.y as f32);
    }
    pb.close();
    pb.finish()
}

fn build_outline(segments: &[PathSeg]) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    let mut started = false;
    for seg in segments {
        match *seg {
            PathSeg::LineTo(p) => {
                if !p.is_finite() {
                    return None;
                }
                if started {
                    pb.line_to(p.x as f32, p.y as f32);
                } else {
                    pb.move_to(p.x as f32, p.y as f32);
                    started = true;
                }
            }
            PathSeg::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                if !center.is_finite()
                    || !radius.is_finite()
                    || radius <= 0.0
                    || !start_angle.is_finite()
                    || !end_angle.is_finite()
                {
                    return None;
                }
                append_arc(&mut pb, &mut started, center, radius, start_angle, end_angle);
            }
        }
    }
    if !started {
        return None;
    }
    pb.close();
    pb.finish()
}

/// Appends a circular arc as cubic Bezier quadrants.
///
/// The control distance for a sweep of `step` radians is
/// `4/3 * tan(step / 4) * radius` (0.5522847 * radius for a quarter
/// turn); its sign follows the sweep direction.
fn append_arc(
    pb: &mut PathBuilder,
    started: &mut bool,
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
) {
    let span = end_angle - start_angle;
    let segments = (span.abs() / std::f64::consts::FRAC_PI_2).ceil().max(1.0) as usize;
    let step = span / segments as f64;

    let point_at = |angle: f64| {
        Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    };

    let start = point_at(start_angle);
    if *started {
        pb.line_to(start.x as f32, start.y as f32);
    } else {
        pb.move_to(start.x as f32, start.y as f32);
        *started = true;
    }

    let k = 4.0 / 3.0 * (step / 4.0).tan() * radius;
    let mut a0 = start_angle;
    for _ in 0..segments {
        let a1 = a0 + step;
        let p0 = point_at(a0);
        let p3 = point_at(a1);
        let c1 = Point::new(p0.x - k * a0.sin(), p0.y + k * a0.cos());
        let c2 = Point::new(p3.x + k * a1.sin(), p3.y - k * a1.cos());
        pb.cubic_to(
            c1.x as f32,
            c1.y as f32,
            c2.x as f32,
            c2.y as f32,
            p3.x as f32,
            p3.y as f32,
        );
        a0 = a1;
    }
}
