//! The tutorial steps, from an empty window to a flat-shaded OBJ mesh.
//!
//! Each demo loads its resources in an async `new(InitContext)` and then only
//! records draw calls. The later demos share the [`Spinner`], which turns the
//! held movement keys and the frame time into the camera uniform.

use instant::Duration;

use crate::{
    camera::CameraUniform,
    context::{Context, InitContext},
    motion::Motion,
};

pub mod clear;
pub mod mesh;
pub mod textured;
pub mod transform;
pub mod triangle;

pub use clear::ClearDemo;
pub use mesh::MeshDemo;
pub use textured::TexturedDemo;
pub use transform::TransformDemo;
pub use triangle::TriangleDemo;

/// Model motion plus the uniform it is written into every frame.
#[derive(Debug)]
pub struct Spinner {
    pub motion: Motion,
    uniform: CameraUniform,
}

impl Spinner {
    pub fn new(ctx: &InitContext) -> Self {
        Self {
            motion: Motion::new(&ctx.settings.motion),
            uniform: CameraUniform::new(),
        }
    }

    /// Advance the motion by `dt` and upload the new MVP matrix.
    pub fn update(&mut self, ctx: &Context, dt: Duration) {
        self.motion.update(ctx.actions, dt);
        self.uniform
            .update(self.motion.model(), &ctx.camera.view, &ctx.projection);
        ctx.camera.upload(&ctx.queue, &self.uniform);
    }
}
