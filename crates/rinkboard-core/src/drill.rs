use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::style::{ArrowStyle, PathStyle, PlayerStyle};

/// Width of the reference space drills are authored in.
pub const REFERENCE_WIDTH: f64 = 400.0;
/// Height of the reference space drills are authored in.
pub const REFERENCE_HEIGHT: f64 = 200.0;

/// One overlay operation in a drill, with its coordinates and style.
///
/// Steps are plain data. A renderer interprets them; tests compare them
/// directly against fixture lists instead of mocking behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrillStep {
    Player {
        x: f64,
        y: f64,
        #[serde(default)]
        style: PlayerStyle,
    },
    Puck {
        x: f64,
        y: f64,
    },
    Cone {
        x: f64,
        y: f64,
    },
    Arrow {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        #[serde(default)]
        style: ArrowStyle,
    },
    Path {
        points: Vec<Point>,
        #[serde(default)]
        style: PathStyle,
    },
    Crease {
        x: f64,
        y: f64,
    },
}

impl DrillStep {
    /// Maps step positions from the reference space onto a rink scaled by
    /// `(sx, sy)`. Marker sizes and stroke widths stay absolute so markers
    /// remain legible at any rink size.
    pub fn scaled(&self, sx: f64, sy: f64) -> DrillStep {
        match self {
            DrillStep::Player { x, y, style } => DrillStep::Player {
                x: x * sx,
                y: y * sy,
                style: style.clone(),
            },
            DrillStep::Puck { x, y } => DrillStep::Puck {
                x: x * sx,
                y: y * sy,
            },
            DrillStep::Cone { x, y } => DrillStep::Cone {
                x: x * sx,
                y: y * sy,
            },
            DrillStep::Arrow {
                x1,
                y1,
                x2,
                y2,
                style,
            } => DrillStep::Arrow {
                x1: x1 * sx,
                y1: y1 * sy,
                x2: x2 * sx,
                y2: y2 * sy,
                style: *style,
            },
            DrillStep::Path { points, style } => DrillStep::Path {
                points: points.iter().map(|p| p.scale(sx, sy)).collect(),
                style: *style,
            },
            DrillStep::Crease { x, y } => DrillStep::Crease {
                x: x * sx,
                y: y * sy,
            },
        }
    }
}

/// A named coaching pattern: a fixed, ordered sequence of overlay steps.
///
/// Drills are stateless and idempotent; running one issues the same draw
/// calls every time. Coordinates are authored in the 400x200 reference space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drill {
    /// Symbolic key callers select the drill by, e.g. `warm_up`.
    pub name: String,
    /// Display title, e.g. `Warm Up`.
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub steps: Vec<DrillStep>,
}

impl Drill {
    pub fn new(name: &str, title: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            description: String::new(),
            steps: Vec::new(),
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    pub fn with_steps(mut self, steps: Vec<DrillStep>) -> Self {
        self.steps = steps;
        self
    }

    pub fn push_step(&mut self, step: DrillStep) {
        self.steps.push(step);
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_scaled_positions() {
        let step = DrillStep::Player {
            x: 200.0,
            y: 100.0,
            style: PlayerStyle::default(),
        };
        match step.scaled(2.0, 0.5) {
            DrillStep::Player { x, y, style } => {
                assert!((x - 400.0).abs() < 1e-10);
                assert!((y - 50.0).abs() < 1e-10);
                assert!((style.size - 12.0).abs() < 1e-10);
            }
            other => panic!("unexpected step: {:?}", other),
        }
    }

    #[test]
    fn test_step_scaled_identity() {
        let step = DrillStep::Path {
            points: vec![Point::new(100.0, 100.0), Point::new(150.0, 80.0)],
            style: PathStyle::dashed(),
        };
        assert_eq!(step.scaled(1.0, 1.0), step);
    }

    #[test]
    fn test_step_json_omitted_style() {
        let step: DrillStep = serde_json::from_str(r#"{"Player": {"x": 50.0, "y": 50.0}}"#)
            .unwrap();
        match step {
            DrillStep::Player { style, .. } => assert!(style.label.is_none()),
            other => panic!("unexpected step: {:?}", other),
        }
    }

    #[test]
    fn test_drill_builders() {
        let mut drill = Drill::new("warm_up", "Warm Up").with_description("Corner skate");
        drill.push_step(DrillStep::Puck { x: 200.0, y: 100.0 });
        assert_eq!(drill.step_count(), 1);
        assert_eq!(drill.name, "warm_up");
        assert_eq!(drill.description, "Corner skate");
    }
}
