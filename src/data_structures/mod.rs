//! Engine data structures: vertex formats, GPU meshes and textures.
//!
//! - `vertex` contains the vertex layouts the demo pipelines read
//! - `mesh` holds vertex/index buffers together with their element counts
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod mesh;
pub mod texture;
pub mod vertex;
