use render_steps::{demos::TransformDemo, flow};

fn main() -> anyhow::Result<()> {
    flow::run(flow::constructor(|ctx| async move { TransformDemo::new(ctx).await }))
}
