//! Pure domain types with minimal dependencies
//!
//! Geometry, the viewport transform and the ROI model. Nothing here knows
//! about input events, rendering or files.

pub mod geometry;
pub mod roi;
pub mod selection;
pub mod transform;

pub use geometry::*;
pub use roi::*;
pub use selection::*;
pub use transform::*;
