//! Procedural geometry for the desk scene.
//!
//! Everything here is CPU-only and deterministic:
//! - [`Vertex`]: the 9-float interleaved layout shared with the shaders
//! - [`Shape`]: parametric builders (disc, cone, cylinder, hollow cylinder)
//!   and the fixed cube / plane tables
//! - [`ShapeParams`] + [`model_matrix`]: per-instance placement

mod params;
mod shapes;
mod transform;
mod vertex;

pub use params::{AxisAngle, ShapeParams, PARAM_BLOCK_LEN};
pub use shapes::{marker_cube, Shape, SECTOR_PI, SIDE_TEXTURE_WRAPS};
pub use transform::{model_matrix, rotation, TransformParts};
pub use vertex::Vertex;
