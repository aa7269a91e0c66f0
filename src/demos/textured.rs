use instant::Duration;

use crate::{
    context::{Context, InitContext},
    data_structures::{
        mesh::GpuMesh,
        vertex::{TexturedVertex, Vertex},
    },
    demos::Spinner,
    flow::Demo,
    pipelines::{
        basic::{mk_pipeline_layout, mk_render_pipeline},
        shader::ShaderProgram,
        texture::{texture_bind_group, texture_bind_group_layout},
    },
    resources::load_texture,
};

pub const TEXTURE_FILE: &str = "checker.png";

// image rows start at the top, so v runs downwards
pub const QUAD: [TexturedVertex; 4] = [
    TexturedVertex {
        position: [-0.5, -0.5, 0.0],
        tex_coords: [0.0, 1.0],
    },
    TexturedVertex {
        position: [0.5, -0.5, 0.0],
        tex_coords: [1.0, 1.0],
    },
    TexturedVertex {
        position: [0.5, 0.5, 0.0],
        tex_coords: [1.0, 0.0],
    },
    TexturedVertex {
        position: [-0.5, 0.5, 0.0],
        tex_coords: [0.0, 0.0],
    },
];

pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

#[derive(Debug)]
pub struct TexturedDemo {
    pipeline: wgpu::RenderPipeline,
    mesh: GpuMesh,
    texture_group: wgpu::BindGroup,
    spinner: Spinner,
}

impl TexturedDemo {
    pub async fn new(ctx: InitContext) -> anyhow::Result<Self> {
        let data_dir = ctx.data_dir();
        let program = ShaderProgram::load(&ctx.device, &data_dir, "textured").await?;
        let texture = load_texture(&ctx.device, &ctx.queue, &data_dir, TEXTURE_FILE).await?;

        let texture_layout = texture_bind_group_layout(&ctx.device);
        let texture_group = texture_bind_group(&ctx.device, &texture_layout, &texture);

        let layout = mk_pipeline_layout(
            &ctx.device,
            "Textured",
            &[&ctx.camera_layout, &texture_layout],
        );
        let pipeline = mk_render_pipeline(
            &ctx.device,
            &layout,
            ctx.format,
            &program,
            &[TexturedVertex::desc()],
        )
        .await?;
        let mesh = GpuMesh::new(&ctx.device, "quad", &QUAD).with_indices(&ctx.device, &QUAD_INDICES);

        Ok(Self {
            pipeline,
            mesh,
            texture_group,
            spinner: Spinner::new(&ctx),
        })
    }
}

impl Demo for TexturedDemo {
    fn on_update(&mut self, ctx: &Context, dt: Duration) {
        self.spinner.update(ctx, dt);
    }

    fn on_render(&self, ctx: &Context, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &ctx.camera.bind_group, &[]);
        render_pass.set_bind_group(1, &self.texture_group, &[]);
        self.mesh.draw(render_pass);
    }
}
