use instant::Duration;

use crate::{
    context::{Context, InitContext},
    data_structures::{
        mesh::GpuMesh,
        vertex::{ColorVertex, Vertex},
    },
    demos::{Spinner, triangle::TRIANGLE},
    flow::Demo,
    pipelines::{
        basic::{mk_pipeline_layout, mk_render_pipeline},
        shader::ShaderProgram,
    },
};

/// The coloured triangle in world space, spinning and moved by the keyboard.
#[derive(Debug)]
pub struct TransformDemo {
    pipeline: wgpu::RenderPipeline,
    mesh: GpuMesh,
    spinner: Spinner,
}

impl TransformDemo {
    pub async fn new(ctx: InitContext) -> anyhow::Result<Self> {
        let program = ShaderProgram::load(&ctx.device, &ctx.data_dir(), "default").await?;
        let layout = mk_pipeline_layout(&ctx.device, "Transform", &[&ctx.camera_layout]);
        let pipeline = mk_render_pipeline(
            &ctx.device,
            &layout,
            ctx.format,
            &program,
            &[ColorVertex::desc()],
        )
        .await?;
        let mesh = GpuMesh::new(&ctx.device, "triangle", &TRIANGLE);

        Ok(Self {
            pipeline,
            mesh,
            spinner: Spinner::new(&ctx),
        })
    }
}

impl Demo for TransformDemo {
    fn on_update(&mut self, ctx: &Context, dt: Duration) {
        self.spinner.update(ctx, dt);
    }

    fn on_render(&self, ctx: &Context, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &ctx.camera.bind_group, &[]);
        self.mesh.draw(render_pass);
    }
}
