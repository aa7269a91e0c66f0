use instant::Duration;

use crate::{
    context::{Context, InitContext},
    data_structures::{
        mesh::GpuMesh,
        vertex::{MeshVertex, Vertex},
    },
    demos::Spinner,
    flow::Demo,
    pipelines::{
        basic::{mk_pipeline_layout, mk_render_pipeline},
        shader::ShaderProgram,
    },
    resources::load_obj,
};

pub const MESH_FILE: &str = "cube.obj";

/// A flat-shaded OBJ model, spinning and moved by the keyboard.
#[derive(Debug)]
pub struct MeshDemo {
    pipeline: wgpu::RenderPipeline,
    mesh: GpuMesh,
    spinner: Spinner,
}

impl MeshDemo {
    pub async fn new(ctx: InitContext) -> anyhow::Result<Self> {
        let data_dir = ctx.data_dir();
        let program = ShaderProgram::load(&ctx.device, &data_dir, "mesh").await?;
        let data = load_obj(&data_dir, MESH_FILE).await?;
        log::info!("{MESH_FILE}: {} triangles", data.num_triangles);

        let layout = mk_pipeline_layout(&ctx.device, "Mesh", &[&ctx.camera_layout]);
        let pipeline = mk_render_pipeline(
            &ctx.device,
            &layout,
            ctx.format,
            &program,
            &[MeshVertex::desc()],
        )
        .await?;

        Ok(Self {
            pipeline,
            mesh: data.upload(&ctx.device, MESH_FILE),
            spinner: Spinner::new(&ctx),
        })
    }
}

impl Demo for MeshDemo {
    fn on_update(&mut self, ctx: &Context, dt: Duration) {
        self.spinner.update(ctx, dt);
    }

    fn on_render(&self, ctx: &Context, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &ctx.camera.bind_group, &[]);
        self.mesh.draw(render_pass);
    }
}
