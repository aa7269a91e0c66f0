use instant::Duration;

use crate::{
    context::{Context, InitContext},
    data_structures::{
        mesh::GpuMesh,
        vertex::{ColorVertex, Vertex},
    },
    flow::Demo,
    pipelines::{
        basic::{mk_pipeline_layout, mk_render_pipeline},
        shader::ShaderProgram,
    },
};

/// Red, green and blue corners in clip space.
pub const TRIANGLE: [ColorVertex; 3] = [
    ColorVertex {
        position: [-0.3, -0.3, 0.0],
        color: [1.0, 0.0, 0.0],
    },
    ColorVertex {
        position: [0.3, -0.3, 0.0],
        color: [0.0, 1.0, 0.0],
    },
    ColorVertex {
        position: [0.0, 0.3, 0.0],
        color: [0.0, 0.0, 1.0],
    },
];

#[derive(Debug)]
pub struct TriangleDemo {
    pipeline: wgpu::RenderPipeline,
    mesh: GpuMesh,
}

impl TriangleDemo {
    pub async fn new(ctx: InitContext) -> anyhow::Result<Self> {
        let program = ShaderProgram::load(&ctx.device, &ctx.data_dir(), "triangle").await?;
        let layout = mk_pipeline_layout(&ctx.device, "Triangle", &[]);
        let pipeline = mk_render_pipeline(
            &ctx.device,
            &layout,
            ctx.format,
            &program,
            &[ColorVertex::desc()],
        )
        .await?;
        let mesh = GpuMesh::new(&ctx.device, "triangle", &TRIANGLE);

        Ok(Self { pipeline, mesh })
    }
}

impl Demo for TriangleDemo {
    fn on_update(&mut self, _ctx: &Context, _dt: Duration) {}

    fn on_render(&self, _ctx: &Context, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        self.mesh.draw(render_pass);
    }
}
