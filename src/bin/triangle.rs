use render_steps::{demos::TriangleDemo, flow};

fn main() -> anyhow::Result<()> {
    flow::run(flow::constructor(|ctx| async move { TriangleDemo::new(ctx).await }))
}
