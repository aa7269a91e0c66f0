use render_steps::{demos::MeshDemo, flow};

fn main() -> anyhow::Result<()> {
    flow::run(flow::constructor(|ctx| async move { MeshDemo::new(ctx).await }))
}
