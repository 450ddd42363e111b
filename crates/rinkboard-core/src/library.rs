use std::collections::HashMap;

use thiserror::Error;

use crate::drill::{Drill, DrillStep};
use crate::geometry::Point;
use crate::style::{ArrowStyle, Color, PathStyle, PlayerStyle};

/// Errors from drill lookups and drill-file handling.
#[derive(Error, Debug)]
pub enum DrillError {
    #[error("unknown drill '{name}'")]
    UnknownDrill { name: String },

    #[error("drill serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The drill pattern registry, mapping symbolic names to drill data.
#[derive(Debug, Clone)]
pub struct DrillLibrary {
    drills: HashMap<String, Drill>,
}

impl DrillLibrary {
    /// An empty library.
    pub fn new() -> Self {
        Self {
            drills: HashMap::new(),
        }
    }

    /// A library preloaded with the four built-in patterns.
    pub fn builtin() -> Self {
        let mut library = Self::new();
        library.insert(warm_up());
        library.insert(skill_stations());
        library.insert(shootout());
        library.insert(scrimmage());
        library
    }

    // ── Registry ─────────────────────────────────────────────────────

    /// Inserts a drill, replacing and returning any same-named entry.
    pub fn insert(&mut self, drill: Drill) -> Option<Drill> {
        self.drills.insert(drill.name.clone(), drill)
    }

    pub fn get(&self, name: &str) -> Option<&Drill> {
        self.drills.get(name)
    }

    /// Like `get`, but an unknown name becomes a reportable error.
    pub fn resolve(&self, name: &str) -> Result<&Drill, DrillError> {
        self.drills
            .get(name)
            .ok_or_else(|| DrillError::UnknownDrill {
                name: name.to_string(),
            })
    }

    pub fn remove(&mut self, name: &str) -> Option<Drill> {
        self.drills.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.drills.contains_key(name)
    }

    /// Drill names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.drills.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn drill_count(&self) -> usize {
        self.drills.len()
    }

    pub fn all_drills(&self) -> impl Iterator<Item = &Drill> {
        self.drills.values()
    }

    // ── Serialization ────────────────────────────────────────────────

    /// Serializes the library as a JSON list of drills, sorted by name.
    pub fn to_json(&self) -> Result<String, DrillError> {
        let mut drills: Vec<&Drill> = self.drills.values().collect();
        drills.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(serde_json::to_string_pretty(&drills)?)
    }

    /// Parses a JSON list of drills into a new library.
    pub fn from_json(json: &str) -> Result<Self, DrillError> {
        let mut library = Self::new();
        library.merge_json(json)?;
        Ok(library)
    }

    /// Merges a JSON list of drills into this library, replacing same-named
    /// entries. Returns the number of drills read.
    pub fn merge_json(&mut self, json: &str) -> Result<usize, DrillError> {
        let drills: Vec<Drill> = serde_json::from_str(json)?;
        let count = drills.len();
        for drill in drills {
            log::debug!(
                "registering drill '{}' ({} steps)",
                drill.name,
                drill.step_count()
            );
            self.insert(drill);
        }
        Ok(count)
    }
}

impl Default for DrillLibrary {
    fn default() -> Self {
        Self::new()
    }
}

// ── Built-in drills ──────────────────────────────────────────────────

fn player(x: f64, y: f64, style: PlayerStyle) -> DrillStep {
    DrillStep::Player { x, y, style }
}

fn puck(x: f64, y: f64) -> DrillStep {
    DrillStep::Puck { x, y }
}

fn cone(x: f64, y: f64) -> DrillStep {
    DrillStep::Cone { x, y }
}

fn crease(x: f64, y: f64) -> DrillStep {
    DrillStep::Crease { x, y }
}

fn arrow(x1: f64, y1: f64, x2: f64, y2: f64, style: ArrowStyle) -> DrillStep {
    DrillStep::Arrow {
        x1,
        y1,
        x2,
        y2,
        style,
    }
}

/// Corner players converge on a pile of pucks at center ice.
fn warm_up() -> Drill {
    let skate = ArrowStyle::default().with_color(Color::GREEN);
    Drill::new("warm_up", "Warm Up")
        .with_description("Players in the corners skate to the gathering area at center")
        .with_steps(vec![
            player(50.0, 50.0, PlayerStyle::labeled("P1")),
            player(350.0, 50.0, PlayerStyle::labeled("P2")),
            player(50.0, 150.0, PlayerStyle::labeled("P3")),
            player(350.0, 150.0, PlayerStyle::labeled("P4")),
            arrow(50.0, 50.0, 200.0, 100.0, skate),
            arrow(350.0, 50.0, 200.0, 100.0, skate),
            arrow(50.0, 150.0, 200.0, 100.0, skate),
            arrow(350.0, 150.0, 200.0, 100.0, skate),
            puck(200.0, 100.0),
            puck(210.0, 95.0),
            puck(190.0, 105.0),
        ])
}

/// Two stations tracing dashed figure-eight lobes through center ice.
fn skill_stations() -> Drill {
    let station = PlayerStyle::default().with_color(Color::GREEN);
    Drill::new("skill_stations", "Skill Stations")
        .with_description("Figure-eight stickhandling around the station pucks")
        .with_steps(vec![
            player(100.0, 100.0, station.clone().with_label("P1")),
            player(300.0, 100.0, station.with_label("P2")),
            DrillStep::Path {
                points: vec![
                    Point::new(100.0, 100.0),
                    Point::new(150.0, 80.0),
                    Point::new(200.0, 100.0),
                    Point::new(150.0, 120.0),
                    Point::new(100.0, 100.0),
                ],
                style: PathStyle::dashed(),
            },
            DrillStep::Path {
                points: vec![
                    Point::new(300.0, 100.0),
                    Point::new(250.0, 80.0),
                    Point::new(200.0, 100.0),
                    Point::new(250.0, 120.0),
                    Point::new(300.0, 100.0),
                ],
                style: PathStyle::dashed(),
            },
            puck(150.0, 80.0),
            puck(150.0, 120.0),
            puck(250.0, 80.0),
            puck(250.0, 120.0),
        ])
}

/// Two shooting lanes attacking each goal from the blue lines.
fn shootout() -> Drill {
    let shooter = PlayerStyle::default().with_color(Color::RED);
    let rush = ArrowStyle::default();
    Drill::new("shootout", "Shootout")
        .with_description("Lanes at each blue line drive in on the goal mouths")
        .with_steps(vec![
            player(133.0, 80.0, shooter.clone().with_label("P1")),
            player(133.0, 120.0, shooter.clone().with_label("P2")),
            player(267.0, 80.0, shooter.clone().with_label("P3")),
            player(267.0, 120.0, shooter.with_label("P4")),
            crease(0.0, 100.0),
            crease(400.0, 100.0),
            arrow(133.0, 80.0, 50.0, 100.0, rush),
            arrow(133.0, 120.0, 50.0, 100.0, rush),
            arrow(267.0, 80.0, 350.0, 100.0, rush),
            arrow(267.0, 120.0, 350.0, 100.0, rush),
            puck(133.0, 80.0),
        ])
}

/// Six-a-side positional play in each half, cones marking the boundaries.
fn scrimmage() -> Drill {
    let blue = PlayerStyle::default();
    let red = PlayerStyle::default().with_color(Color::RED);
    Drill::new("scrimmage", "Scrimmage")
        .with_description("Three-on-three in each end between the cone boundaries")
        .with_steps(vec![
            player(100.0, 60.0, blue.clone().with_label("B1")),
            player(150.0, 60.0, blue.clone().with_label("B2")),
            player(200.0, 60.0, blue.clone().with_label("B3")),
            player(100.0, 40.0, red.clone().with_label("R1")),
            player(150.0, 40.0, red.clone().with_label("R2")),
            player(200.0, 40.0, red.clone().with_label("R3")),
            player(100.0, 140.0, blue.clone().with_label("B4")),
            player(150.0, 140.0, blue.clone().with_label("B5")),
            player(200.0, 140.0, blue.with_label("B6")),
            player(100.0, 160.0, red.clone().with_label("R4")),
            player(150.0, 160.0, red.clone().with_label("R5")),
            player(200.0, 160.0, red.with_label("R6")),
            crease(0.0, 100.0),
            crease(400.0, 100.0),
            cone(80.0, 50.0),
            cone(320.0, 50.0),
            cone(80.0, 150.0),
            cone(320.0, 150.0),
            puck(150.0, 50.0),
            puck(150.0, 150.0),
        ])
}
