use instant::Duration;

use crate::{
    context::{Context, InitContext},
    flow::Demo,
};

/// Opens the window and clears it every frame. Nothing is drawn.
#[derive(Debug, Default)]
pub struct ClearDemo;

impl ClearDemo {
    pub async fn new(_ctx: InitContext) -> anyhow::Result<Self> {
        Ok(Self)
    }
}

impl Demo for ClearDemo {
    fn on_init(&mut self, ctx: &mut Context) {
        log::info!("Clearing to {:?}", ctx.clear_colour);
    }

    fn on_update(&mut self, _ctx: &Context, _dt: Duration) {}

    fn on_render(&self, _ctx: &Context, _render_pass: &mut wgpu::RenderPass<'_>) {}
}
