use render_steps::{demos::ClearDemo, flow};

fn main() -> anyhow::Result<()> {
    flow::run(flow::constructor(|ctx| async move { ClearDemo::new(ctx).await }))
}
