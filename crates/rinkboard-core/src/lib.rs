//! # Rinkboard Core
//!
//! Rink-diagram data model: 2D points, drawing styles with documented
//! defaults, drill step descriptors, and the drill pattern library.
//! Drills are plain data (ordered lists of overlay steps), authored in a
//! 400x200 reference space and interpreted by a renderer.

pub mod drill;
pub mod geometry;
pub mod library;
pub mod style;

pub use drill::{Drill, DrillStep, REFERENCE_HEIGHT, REFERENCE_WIDTH};
pub use geometry::Point;
pub use library::{DrillError, DrillLibrary};
pub use style::{ArrowStyle, Color, LineStyle, PathStyle, PlayerStyle, StrokeStyle};
