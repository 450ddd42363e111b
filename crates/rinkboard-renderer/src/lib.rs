//! # Rinkboard Renderer
//!
//! Draws hockey-rink diagrams onto pluggable surfaces. [`DiagramRenderer`]
//! owns a [`Surface`] exclusively, draws the static rink base layer at
//! construction, and exposes overlay primitives for players, pucks, cones,
//! arrows, and movement paths. [`RecordingSurface`] captures draw calls for
//! inspection; [`PixmapSurface`] rasterizes them and exports PNG.

pub mod diagram;
pub mod error;
pub mod glyphs;
pub mod pixmap;
pub mod surface;

pub use diagram::{DiagramRenderer, RinkConfig};
pub use error::RenderError;
pub use pixmap::PixmapSurface;
pub use surface::{PathSeg, RecordingSurface, Surface, SurfaceOp, SurfaceRegistry};
