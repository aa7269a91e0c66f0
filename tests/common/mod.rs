use std::path::PathBuf;

use render_steps::config::DemoConfig;

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[allow(dead_code)]
pub fn test_settings() -> DemoConfig {
    DemoConfig {
        data_dir: data_dir(),
        ..Default::default()
    }
}
