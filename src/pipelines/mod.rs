//! Render pipeline construction.
//!
//! - `shader` compiles and validates the WGSL programs from the data directory
//! - `basic` builds the opaque triangle-list pipeline every demo uses
//! - `texture` holds the bind group layout for sampled colour textures

pub mod basic;
pub mod shader;
pub mod texture;
