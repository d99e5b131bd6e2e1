//! Pure domain types with minimal dependencies
//!
//! Geometry, layers, and the scene live here with no raster or font
//! dependencies, so the renderers and hit-tester can share them freely.

pub mod geometry;
pub mod layer;
pub mod scene;

pub use geometry::*;
pub use layer::*;
pub use scene::*;
