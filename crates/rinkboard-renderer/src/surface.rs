//! Drawing surface abstraction.
//!
//! A surface is the drawable target a renderer exclusively owns. The
//! pixmap backend rasterizes; the recording backend logs every call so
//! tests can compare drawings as data. Each stroked call receives the
//! complete stroke description, so no dash or color state survives from
//! one call to the next.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use rinkboard_core::{Color, Point, StrokeStyle};

use crate::error::RenderError;

/// One segment of a closed outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSeg {
    /// Straight segment to the given point.
    LineTo(Point),
    /// Circular arc swept monotonically from `start_angle` to `end_angle`
    /// (radians, 0 along +x, pi/2 along +y with y pointing down). The
    /// sweep direction is the sign of `end_angle - start_angle`.
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
}

/// A drawing surface.
///
/// Methods are infallible; implementations turn degenerate input into
/// no-ops. Coordinates are in the renderer's rink space (origin top-left,
/// y down).
pub trait Surface {
    /// Sets the pixel dimensions. Existing content is discarded.
    fn resize(&mut self, width: u32, height: u32);
    /// Wipes the surface back to its background.
    fn clear(&mut self);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, stroke: &StrokeStyle);
    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &StrokeStyle);
    fn stroke_polyline(&mut self, points: &[Point], stroke: &StrokeStyle);
    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, stroke: &StrokeStyle);
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color);
    fn fill_polygon(&mut self, points: &[Point], color: Color);
    fn stroke_polygon(&mut self, points: &[Point], stroke: &StrokeStyle);
    /// Strokes a closed outline of line and arc segments. The outline is
    /// closed back to its starting point.
    fn stroke_outline(&mut self, segments: &[PathSeg], stroke: &StrokeStyle);
    /// Draws text horizontally centered at `x` with its baseline at `y`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, size: f64, color: Color);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceOp {
    Resize {
        width: u32,
        height: u32,
    },
    Clear,
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        stroke: StrokeStyle,
    },
    StrokeLine {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: StrokeStyle,
    },
    StrokePolyline {
        points: Vec<Point>,
        stroke: StrokeStyle,
    },
    StrokeCircle {
        cx: f64,
        cy: f64,
        radius: f64,
        stroke: StrokeStyle,
    },
    FillCircle {
        cx: f64,
        cy: f64,
        radius: f64,
        color: Color,
    },
    FillPolygon {
        points: Vec<Point>,
        color: Color,
    },
    StrokePolygon {
        points: Vec<Point>,
        stroke: StrokeStyle,
    },
    StrokeOutline {
        segments: Vec<PathSeg>,
        stroke: StrokeStyle,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        size: f64,
        color: Color,
    },
}

/// Records every drawing call without rasterizing anything.
///
/// The mock surface for fixture tests: run a drill against it, then
/// compare `ops()` with the expected operation list.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn op_count(&self) -> usize {
        self.ops.len()
    }

    /// Ops recorded from `index` on, e.g. everything since a clear.
    pub fn ops_since(&self, index: usize) -> &[SurfaceOp] {
        &self.ops[index..]
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.ops.push(SurfaceOp::Resize { width, height });
    }

    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, stroke: &StrokeStyle) {
        self.ops.push(SurfaceOp::StrokeRect {
            x,
            y,
            width,
            height,
            stroke: *stroke,
        });
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &StrokeStyle) {
        self.ops.push(SurfaceOp::StrokeLine {
            x1,
            y1,
            x2,
            y2,
            stroke: *stroke,
        });
    }

    fn stroke_polyline(&mut self, points: &[Point], stroke: &StrokeStyle) {
        self.ops.push(SurfaceOp::StrokePolyline {
            points: points.to_vec(),
            stroke: *stroke,
        });
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, stroke: &StrokeStyle) {
        self.ops.push(SurfaceOp::StrokeCircle {
            cx,
            cy,
            radius,
            stroke: *stroke,
        });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        self.ops.push(SurfaceOp::FillCircle {
            cx,
            cy,
            radius,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.ops.push(SurfaceOp::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_polygon(&mut self, points: &[Point], stroke: &StrokeStyle) {
        self.ops.push(SurfaceOp::StrokePolygon {
            points: points.to_vec(),
            stroke: *stroke,
        });
    }

    fn stroke_outline(&mut self, segments: &[PathSeg], stroke: &StrokeStyle) {
        self.ops.push(SurfaceOp::StrokeOutline {
            segments: segments.to_vec(),
            stroke: *stroke,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, size: f64, color: Color) {
        self.ops.push(SurfaceOp::FillText {
            text: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }
}

/// Host-managed named surfaces.
///
/// A renderer acquires its surface by id at construction and owns it
/// exclusively from then on; the registry hands surfaces out by move.
#[derive(Debug)]
pub struct SurfaceRegistry<S: Surface> {
    surfaces: HashMap<String, S>,
}

impl<S: Surface> SurfaceRegistry<S> {
    pub fn new() -> Self {
        Self {
            surfaces: HashMap::new(),
        }
    }

    pub fn register(&mut self, id: &str, surface: S) {
        self.surfaces.insert(id.to_string(), surface);
    }

    /// Removes and returns the surface under `id`.
    pub fn acquire(&mut self, id: &str) -> Result<S, RenderError> {
        self.surfaces
            .remove(id)
            .ok_or_else(|| RenderError::SurfaceNotFound { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.surfaces.contains_key(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.surfaces.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }
}

impl<S: Surface> Default for SurfaceRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rinkboard_core::LineStyle;

    #[test]
    fn test_recording_surface_logs_in_order() {
        let mut surface = RecordingSurface::new();
        surface.resize(400, 200);
        surface.fill_circle(10.0, 20.0, 4.0, Color::INK);
        surface.stroke_line(0.0, 0.0, 5.0, 5.0, &StrokeStyle::default());

        assert_eq!(surface.op_count(), 3);
        assert_eq!(
            surface.ops()[0],
            SurfaceOp::Resize {
                width: 400,
                height: 200
            }
        );
        match &surface.ops()[2] {
            SurfaceOp::StrokeLine { stroke, .. } => {
                assert_eq!(stroke.line_style, LineStyle::Solid);
            }
            other => panic!("unexpected op: {:?}", other),
        }
        assert_eq!(surface.ops_since(1).len(), 2);
    }

    #[test]
    fn test_registry_acquire_moves_surface() {
        let mut registry = SurfaceRegistry::new();
        registry.register("main", RecordingSurface::new());
        assert!(registry.contains("main"));

        assert!(registry.acquire("main").is_ok());
        assert!(!registry.contains("main"));
        match registry.acquire("main") {
            Err(RenderError::SurfaceNotFound { id }) => assert_eq!(id, "main"),
            other => panic!("expected SurfaceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_registry_ids_sorted() {
        let mut registry = SurfaceRegistry::new();
        registry.register("sidebar", RecordingSurface::new());
        registry.register("main", RecordingSurface::new());
        assert_eq!(registry.ids(), vec!["main", "sidebar"]);
        assert_eq!(registry.surface_count(), 2);
    }
}
