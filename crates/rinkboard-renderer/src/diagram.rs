//! The diagram renderer: static rink base layer plus overlay markers.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use rinkboard_core::geometry::{all_finite, arrow_head_points};
use rinkboard_core::{
    ArrowStyle, Color, Drill, DrillStep, PathStyle, PlayerStyle, Point, StrokeStyle,
    REFERENCE_HEIGHT, REFERENCE_WIDTH,
};

use crate::error::{RenderError, Result};
use crate::surface::{PathSeg, Surface, SurfaceRegistry};

/// Radius of the center-ice faceoff circle.
pub const FACEOFF_CIRCLE_RADIUS: f64 = 15.0;

/// Radius of the four neutral-zone faceoff dots.
pub const FACEOFF_DOT_RADIUS: f64 = 3.0;

/// Radius of the goal-crease arc.
pub const CREASE_RADIUS: f64 = 15.0;

/// Length of the straight crease posts beyond the arc.
pub const CREASE_EXTENT: f64 = 20.0;

/// Radius of a puck marker.
pub const PUCK_RADIUS: f64 = 4.0;

const CONE_HEIGHT: f64 = 16.0;
const CONE_BASE: f64 = 12.0;
const LABEL_SIZE: f64 = 10.0;
const LABEL_OFFSET: f64 = 3.0;
const NUMBER_SIZE: f64 = 8.0;
const NUMBER_OFFSET: f64 = 15.0;

// ── Rink configuration ─────────────────────────────────────────────────────

/// Logical rink dimensions in abstract units.
///
/// All coordinates passed to drawing calls are interpreted in this space,
/// origin top-left, x right, y down. Dimensions are fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RinkConfig {
    pub width: f64,
    pub height: f64,
}

impl RinkConfig {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Checks that both dimensions are finite and positive.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(RenderError::InvalidConfig {
                message: format!(
                    "dimensions must be finite and positive, got {}x{}",
                    self.width, self.height
                ),
            });
        }
        Ok(())
    }

    /// Scale factors from the drill reference space to this rink.
    pub fn reference_scale(&self) -> (f64, f64) {
        (self.width / REFERENCE_WIDTH, self.height / REFERENCE_HEIGHT)
    }
}

impl Default for RinkConfig {
    fn default() -> Self {
        Self {
            width: REFERENCE_WIDTH,
            height: REFERENCE_HEIGHT,
        }
    }
}

// ── Renderer ───────────────────────────────────────────────────────────────

/// Draws the rink base layer and overlay markers onto an owned surface.
///
/// Each renderer owns its surface exclusively for its whole lifetime, so
/// independent renderers never share drawing state. Construction sizes the
/// surface and draws the base layer immediately; a freshly built renderer
/// already shows a complete empty rink.
#[derive(Debug)]
pub struct DiagramRenderer<S: Surface> {
    surface: S,
    config: RinkConfig,
}

impl<S: Surface> DiagramRenderer<S> {
    /// Builds a renderer over `surface`, sizes it to `config`, and draws
    /// the base layer.
    pub fn new(surface: S, config: RinkConfig) -> Result<Self> {
        config.validate()?;
        let mut renderer = Self { surface, config };
        renderer
            .surface
            .resize(config.width.round() as u32, config.height.round() as u32);
        renderer.draw_base_layer();
        Ok(renderer)
    }

    /// Acquires the surface registered under `id` and builds a renderer
    /// over it.
    ///
    /// The config is validated before the surface is taken, so a rejected
    /// config leaves the registry untouched.
    pub fn bind(registry: &mut SurfaceRegistry<S>, id: &str, config: RinkConfig) -> Result<Self> {
        config.validate()?;
        let surface = registry.acquire(id)?;
        log::debug!(
            "bound surface '{}' to a {}x{} rink",
            id,
            config.width,
            config.height
        );
        Self::new(surface, config)
    }

    pub fn config(&self) -> RinkConfig {
        self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Consumes the renderer, returning the surface and whatever has been
    /// drawn on it.
    pub fn into_surface(self) -> S {
        self.surface
    }

    // ── Base layer ─────────────────────────────────────────────────────────

    /// Wipes the surface and redraws the base layer only.
    ///
    /// Overlays are not retained state; callers redraw any they still want.
    pub fn clear(&mut self) {
        self.surface.clear();
        self.draw_base_layer();
    }

    fn draw_base_layer(&mut self) {
        let ink = StrokeStyle::default();
        let (w, h) = (self.config.width, self.config.height);

        self.surface.stroke_rect(0.0, 0.0, w, h, &ink);
        self.surface.stroke_line(w / 2.0, 0.0, w / 2.0, h, &ink);
        self.surface.stroke_line(w / 3.0, 0.0, w / 3.0, h, &ink);
        self.surface
            .stroke_line(2.0 * w / 3.0, 0.0, 2.0 * w / 3.0, h, &ink);
        self.surface
            .stroke_circle(w / 2.0, h / 2.0, FACEOFF_CIRCLE_RADIUS, &ink);
        for (dot_x, dot_y) in [
            (w / 6.0, h / 4.0),
            (w / 6.0, 3.0 * h / 4.0),
            (5.0 * w / 6.0, h / 4.0),
            (5.0 * w / 6.0, 3.0 * h / 4.0),
        ] {
            self.surface
                .fill_circle(dot_x, dot_y, FACEOFF_DOT_RADIUS, Color::INK);
        }
        self.goal_crease(0.0, h / 2.0);
        self.goal_crease(w, h / 2.0);
    }

    // ── Overlay primitives ─────────────────────────────────────────────────

    /// Draws a player marker, with optional centered label and jersey
    /// number in white.
    pub fn player(&mut self, x: f64, y: f64, style: &PlayerStyle) {
        if !(x.is_finite() && y.is_finite()) {
            log::warn!("skipping player marker at non-finite ({}, {})", x, y);
            return;
        }
        self.surface.fill_circle(x, y, style.size, style.color);
        if let Some(label) = &style.label {
            self.surface
                .fill_text(label, x, y + LABEL_OFFSET, LABEL_SIZE, Color::WHITE);
        }
        if let Some(number) = style.number {
            self.surface.fill_text(
                &number.to_string(),
                x,
                y + NUMBER_OFFSET,
                NUMBER_SIZE,
                Color::WHITE,
            );
        }
    }

    /// Draws a puck marker, a small filled ink circle.
    pub fn puck(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            log::warn!("skipping puck marker at non-finite ({}, {})", x, y);
            return;
        }
        self.surface.fill_circle(x, y, PUCK_RADIUS, Color::INK);
    }

    /// Draws a cone marker, an amber apex-up triangle with an ink outline.
    pub fn cone(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            log::warn!("skipping cone marker at non-finite ({}, {})", x, y);
            return;
        }
        let triangle = [
            Point::new(x, y - CONE_HEIGHT / 2.0),
            Point::new(x - CONE_BASE / 2.0, y + CONE_HEIGHT / 2.0),
            Point::new(x + CONE_BASE / 2.0, y + CONE_HEIGHT / 2.0),
        ];
        self.surface.fill_polygon(&triangle, Color::AMBER);
        self.surface.stroke_polygon(&triangle, &StrokeStyle::default());
    }

    /// Draws a straight arrow with a two-stroke head at the endpoint.
    ///
    /// A zero-length or non-finite arrow has no direction and draws
    /// nothing.
    pub fn arrow(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &ArrowStyle) {
        let start = Point::new(x1, y1);
        let end = Point::new(x2, y2);
        let Some((left, right)) = arrow_head_points(start, end, style.head_size) else {
            log::warn!(
                "skipping degenerate arrow ({}, {}) -> ({}, {})",
                x1,
                y1,
                x2,
                y2
            );
            return;
        };
        let stroke = StrokeStyle::solid(style.color, style.width);
        self.surface.stroke_line(x1, y1, x2, y2, &stroke);
        self.surface.stroke_line(x2, y2, left.x, left.y, &stroke);
        self.surface.stroke_line(x2, y2, right.x, right.y, &stroke);
    }

    /// Draws a movement path through the given points.
    ///
    /// Needs at least two finite points; anything less draws nothing. The
    /// dash pattern travels with the style, so it cannot leak into later
    /// calls.
    pub fn path(&mut self, points: &[Point], style: &PathStyle) {
        if points.len() < 2 || !all_finite(points) {
            log::warn!("skipping movement path: needs at least two finite points");
            return;
        }
        self.surface.stroke_polyline(points, &style.stroke());
    }

    /// Draws a goal crease anchored at `(x, y)` on a rink edge.
    ///
    /// An anchor at x == 0 opens rightward into the rink; any other anchor
    /// opens leftward. The two sides are exact mirrors.
    pub fn goal_crease(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            log::warn!("skipping goal crease at non-finite ({}, {})", x, y);
            return;
        }
        let toward_rink = if x == 0.0 { 1.0 } else { -1.0 };
        // Left sweeps through pi, right through 0; both start at the
        // bottom of the arc.
        let end_angle = if x == 0.0 { 3.0 * FRAC_PI_2 } else { -FRAC_PI_2 };
        let post_x = x + toward_rink * (CREASE_RADIUS + CREASE_EXTENT);
        let segments = [
            PathSeg::Arc {
                center: Point::new(x + toward_rink * CREASE_RADIUS, y),
                radius: CREASE_RADIUS,
                start_angle: FRAC_PI_2,
                end_angle,
            },
            PathSeg::LineTo(Point::new(post_x, y - CREASE_RADIUS)),
            PathSeg::LineTo(Point::new(post_x, y + CREASE_RADIUS)),
        ];
        self.surface
            .stroke_outline(&segments, &StrokeStyle::default());
    }

    // ── Drill execution ────────────────────────────────────────────────────

    /// Applies a single drill step.
    pub fn apply(&mut self, step: &DrillStep) {
        match step {
            DrillStep::Player { x, y, style } => self.player(*x, *y, style),
            DrillStep::Puck { x, y } => self.puck(*x, *y),
            DrillStep::Cone { x, y } => self.cone(*x, *y),
            DrillStep::Arrow {
                x1,
                y1,
                x2,
                y2,
                style,
            } => self.arrow(*x1, *y1, *x2, *y2, style),
            DrillStep::Path { points, style } => self.path(points, style),
            DrillStep::Crease { x, y } => self.goal_crease(*x, *y),
        }
    }

    /// Overlays a drill onto the current board.
    ///
    /// Step positions are authored in the 400x200 reference space and are
    /// scaled to this rink, so a drill keeps its layout at any board size.
    /// Marker sizes and stroke widths stay absolute. The base layer is not
    /// redrawn; call `clear` first to run on a fresh rink.
    pub fn run_drill(&mut self, drill: &Drill) {
        let (sx, sy) = self.config.reference_scale();
        log::debug!(
            "running drill '{}' ({} steps, scale {:.2}x{:.2})",
            drill.name,
            drill.step_count(),
            sx,
            sy
        );
        for step in &drill.steps {
            self.apply(&step.scaled(sx, sy));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, SurfaceOp};
    use rinkboard_core::{DrillLibrary, LineStyle};
    use std::f64::consts::PI;

    fn rink(config: RinkConfig) -> DiagramRenderer<RecordingSurface> {
        DiagramRenderer::new(RecordingSurface::new(), config).unwrap()
    }

    #[test]
    fn test_construction_draws_base_layer() {
        let renderer = rink(RinkConfig::default());
        let ops = renderer.surface().ops();

        // Resize, rect, three lines, circle, four dots, two creases.
        assert_eq!(ops.len(), 12);
        assert_eq!(
            ops[0],
            SurfaceOp::Resize {
                width: 400,
                height: 200
            }
        );
        assert_eq!(
            ops[1],
            SurfaceOp::StrokeRect {
                x: 0.0,
                y: 0.0,
                width: 400.0,
                height: 200.0,
                stroke: StrokeStyle::default(),
            }
        );
        assert!(matches!(ops[10], SurfaceOp::StrokeOutline { .. }));
        assert!(matches!(ops[11], SurfaceOp::StrokeOutline { .. }));
    }

    #[test]
    fn test_base_layer_fractional_positions() {
        for (w, h) in [
            (400.0, 200.0),
            (300.0, 150.0),
            (640.0, 360.0),
            (123.0, 77.0),
        ] {
            let renderer = rink(RinkConfig::new(w, h));
            let ops = renderer.surface().ops();
            let ink = StrokeStyle::default();

            for (index, x) in [(2, w / 2.0), (3, w / 3.0), (4, 2.0 * w / 3.0)] {
                assert_eq!(
                    ops[index],
                    SurfaceOp::StrokeLine {
                        x1: x,
                        y1: 0.0,
                        x2: x,
                        y2: h,
                        stroke: ink,
                    },
                    "vertical line {} of {}x{} rink",
                    index,
                    w,
                    h
                );
            }
            assert_eq!(
                ops[5],
                SurfaceOp::StrokeCircle {
                    cx: w / 2.0,
                    cy: h / 2.0,
                    radius: FACEOFF_CIRCLE_RADIUS,
                    stroke: ink,
                }
            );
            for (index, (dx, dy)) in [
                (6, (w / 6.0, h / 4.0)),
                (7, (w / 6.0, 3.0 * h / 4.0)),
                (8, (5.0 * w / 6.0, h / 4.0)),
                (9, (5.0 * w / 6.0, 3.0 * h / 4.0)),
            ] {
                assert_eq!(
                    ops[index],
                    SurfaceOp::FillCircle {
                        cx: dx,
                        cy: dy,
                        radius: FACEOFF_DOT_RADIUS,
                        color: Color::INK,
                    },
                    "faceoff dot {} of {}x{} rink",
                    index,
                    w,
                    h
                );
            }
        }
    }

    #[test]
    fn test_clear_restores_base_only() {
        let mut renderer = rink(RinkConfig::default());
        let base = renderer.surface().ops()[1..].to_vec();

        renderer.puck(100.0, 100.0);
        renderer.path(
            &[Point::new(0.0, 0.0), Point::new(50.0, 50.0)],
            &PathStyle::default(),
        );
        renderer.clear();

        let ops = renderer.surface().ops();
        let clear_at = ops.iter().rposition(|op| *op == SurfaceOp::Clear).unwrap();
        assert_eq!(&ops[clear_at + 1..], base.as_slice());
    }

    #[test]
    fn test_dash_does_not_leak() {
        let mut renderer = rink(RinkConfig::default());
        let start = renderer.surface().op_count();

        renderer.path(
            &[Point::new(0.0, 0.0), Point::new(80.0, 40.0)],
            &PathStyle::dashed(),
        );
        renderer.arrow(10.0, 10.0, 60.0, 10.0, &ArrowStyle::default());

        let ops = &renderer.surface().ops()[start..];
        assert_eq!(ops.len(), 4);
        assert!(matches!(
            &ops[0],
            SurfaceOp::StrokePolyline { stroke, .. } if stroke.line_style == LineStyle::Dashed
        ));
        for op in &ops[1..] {
            match op {
                SurfaceOp::StrokeLine { stroke, .. } => {
                    assert_eq!(stroke.line_style, LineStyle::Solid)
                }
                other => panic!("expected arrow stroke, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_arrow_head_fixture() {
        let mut renderer = rink(RinkConfig::default());
        let start = renderer.surface().op_count();
        renderer.arrow(0.0, 0.0, 10.0, 0.0, &ArrowStyle::default());

        let ops = &renderer.surface().ops()[start..];
        assert_eq!(ops.len(), 3);
        assert!(matches!(
            ops[0],
            SurfaceOp::StrokeLine {
                x1: 0.0,
                y1: 0.0,
                x2: 10.0,
                y2: 0.0,
                ..
            }
        ));

        let head = |op: &SurfaceOp| match *op {
            SurfaceOp::StrokeLine { x1, y1, x2, y2, .. } => {
                assert_eq!((x1, y1), (10.0, 0.0));
                (x2, y2)
            }
            ref other => panic!("expected arrowhead stroke, got {:?}", other),
        };
        let (lx, ly) = head(&ops[1]);
        let (rx, ry) = head(&ops[2]);

        // Symmetric about the shaft, each stroke 8 units long.
        assert!((lx - rx).abs() < 1e-10);
        assert!((ly + ry).abs() < 1e-10);
        assert!((((lx - 10.0).powi(2) + ly.powi(2)).sqrt() - 8.0).abs() < 1e-10);
        assert!(lx < 10.0);
    }

    #[test]
    fn test_crease_mirror() {
        let renderer = rink(RinkConfig::default());
        let ops = renderer.surface().ops();

        let (left, right) = match (&ops[10], &ops[11]) {
            (
                SurfaceOp::StrokeOutline { segments: l, .. },
                SurfaceOp::StrokeOutline { segments: r, .. },
            ) => (l, r),
            other => panic!("expected two crease outlines, got {:?}", other),
        };
        assert_eq!(left.len(), 3);
        assert_eq!(right.len(), 3);

        match (&left[0], &right[0]) {
            (
                PathSeg::Arc {
                    center: lc,
                    start_angle: ls,
                    end_angle: le,
                    ..
                },
                PathSeg::Arc {
                    center: rc,
                    start_angle: rs,
                    end_angle: re,
                    ..
                },
            ) => {
                assert!((lc.x - (400.0 - rc.x)).abs() < 1e-10);
                assert!((lc.y - rc.y).abs() < 1e-10);
                assert!(((le - ls) - PI).abs() < 1e-10);
                assert!(
                    ((le - ls) + (re - rs)).abs() < 1e-10,
                    "arc sweeps must run in opposite directions"
                );
            }
            other => panic!("expected crease arcs, got {:?}", other),
        }
        for seg in 1..3 {
            match (&left[seg], &right[seg]) {
                (PathSeg::LineTo(lp), PathSeg::LineTo(rp)) => {
                    assert!((lp.x - (400.0 - rp.x)).abs() < 1e-10);
                    assert!((lp.y - rp.y).abs() < 1e-10);
                }
                other => panic!("expected crease posts, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_zero_length_arrow_draws_nothing() {
        let mut renderer = rink(RinkConfig::default());
        let before = renderer.surface().op_count();
        renderer.arrow(5.0, 5.0, 5.0, 5.0, &ArrowStyle::default());
        assert_eq!(renderer.surface().op_count(), before);
    }

    #[test]
    fn test_short_path_draws_nothing() {
        let mut renderer = rink(RinkConfig::default());
        let before = renderer.surface().op_count();
        renderer.path(&[Point::new(10.0, 10.0)], &PathStyle::default());
        renderer.path(
            &[Point::new(10.0, 10.0), Point::new(f64::NAN, 20.0)],
            &PathStyle::default(),
        );
        assert_eq!(renderer.surface().op_count(), before);
    }

    #[test]
    fn test_player_label_and_number() {
        let mut renderer = rink(RinkConfig::default());
        let start = renderer.surface().op_count();
        renderer.player(50.0, 50.0, &PlayerStyle::labeled("P1").with_number(9));

        let ops = &renderer.surface().ops()[start..];
        assert_eq!(
            ops[0],
            SurfaceOp::FillCircle {
                cx: 50.0,
                cy: 50.0,
                radius: 12.0,
                color: Color::BLUE,
            }
        );
        assert_eq!(
            ops[1],
            SurfaceOp::FillText {
                text: "P1".to_string(),
                x: 50.0,
                y: 53.0,
                size: 10.0,
                color: Color::WHITE,
            }
        );
        assert_eq!(
            ops[2],
            SurfaceOp::FillText {
                text: "9".to_string(),
                x: 50.0,
                y: 65.0,
                size: 8.0,
                color: Color::WHITE,
            }
        );
    }

    #[test]
    fn test_bind_unknown_surface() {
        let mut registry: SurfaceRegistry<RecordingSurface> = SurfaceRegistry::new();
        let err = DiagramRenderer::bind(&mut registry, "board", RinkConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, RenderError::SurfaceNotFound { .. }));
    }

    #[test]
    fn test_invalid_config_leaves_surface_registered() {
        let mut registry = SurfaceRegistry::new();
        registry.register("board", RecordingSurface::new());

        let err = DiagramRenderer::bind(&mut registry, "board", RinkConfig::new(0.0, 200.0))
            .err()
            .unwrap();
        assert!(matches!(err, RenderError::InvalidConfig { .. }));
        assert!(registry.contains("board"));
    }

    #[test]
    fn test_run_drill_default_config_verbatim() {
        let library = DrillLibrary::builtin();
        let drill = library.resolve("warm_up").unwrap();

        let mut renderer = rink(RinkConfig::default());
        renderer.run_drill(drill);

        // 12 base ops, then 4 labeled players (2 ops each), 4 arrows
        // (3 ops each), 3 pucks.
        let ops = renderer.surface().ops();
        assert_eq!(ops.len(), 12 + 8 + 12 + 3);
        assert_eq!(
            ops[12],
            SurfaceOp::FillCircle {
                cx: 50.0,
                cy: 50.0,
                radius: 12.0,
                color: Color::BLUE,
            }
        );
        assert_eq!(
            ops[13],
            SurfaceOp::FillText {
                text: "P1".to_string(),
                x: 50.0,
                y: 53.0,
                size: 10.0,
                color: Color::WHITE,
            }
        );
        for (op, (x, y)) in ops[32..].iter().zip([
            (200.0, 100.0),
            (210.0, 95.0),
            (190.0, 105.0),
        ]) {
            assert_eq!(
                *op,
                SurfaceOp::FillCircle {
                    cx: x,
                    cy: y,
                    radius: PUCK_RADIUS,
                    color: Color::INK,
                }
            );
        }
    }

    #[test]
    fn test_run_drill_scales_positions_not_sizes() {
        let library = DrillLibrary::builtin();
        let drill = library.resolve("warm_up").unwrap();

        let mut renderer = rink(RinkConfig::new(800.0, 400.0));
        renderer.run_drill(drill);

        let ops = renderer.surface().ops();
        assert_eq!(
            ops[12],
            SurfaceOp::FillCircle {
                cx: 100.0,
                cy: 100.0,
                radius: 12.0,
                color: Color::BLUE,
            }
        );
    }
}
