//! render-steps
//!
//! A sequence of small rendering programs, each one step further than the
//! last: an empty window, a coloured triangle, a transformed and keyboard
//! driven triangle, a textured quad and an OBJ mesh. The binaries under
//! `src/bin` are thin; everything they share lives in this crate.
//!
//! High-level modules
//! - `config`: window, projection and motion settings from an optional TOML file
//! - `context`: window, surface, device and queue owned for the program lifetime
//! - `flow`: the `Demo` trait and the winit event loop driving it
//! - `math` / `camera` / `motion`: model, view and projection matrices
//! - `data_structures`: vertex layouts, GPU meshes and textures
//! - `resources`: loading shaders, OBJ meshes and images from the data directory
//! - `pipelines`: shader validation and render pipeline construction
//! - `demos`: the tutorial steps themselves
//!

pub mod camera;
#[cfg(feature = "integration-tests")]
pub mod capture;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod demos;
pub mod error;
pub mod flow;
pub mod input;
pub mod math;
pub mod motion;
pub mod pipelines;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::{Deg, Rad, Vector3};
pub use winit::event::WindowEvent;
pub use wgpu::Color;
