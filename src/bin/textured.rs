use render_steps::{demos::TexturedDemo, flow};

fn main() -> anyhow::Result<()> {
    flow::run(flow::constructor(|ctx| async move { TexturedDemo::new(ctx).await }))
}
