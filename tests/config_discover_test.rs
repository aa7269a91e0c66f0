use std::{
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use render_steps::{
    config::{CONFIG_ENV, DemoConfig},
    error::DemoError,
};

// tests in this binary run on parallel threads but share one environment
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Points [`CONFIG_ENV`] at `path` until dropped.
struct ConfigEnv {
    _lock: MutexGuard<'static, ()>,
}

impl ConfigEnv {
    fn set(path: &Path) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        unsafe { std::env::set_var(CONFIG_ENV, path) };
        Self { _lock: lock }
    }
}

impl Drop for ConfigEnv {
    fn drop(&mut self) {
        unsafe { std::env::remove_var(CONFIG_ENV) };
    }
}

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("render-steps-{}-{name}.toml", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn env_var_selects_the_config_file() {
    let path = temp_config(
        "valid",
        r#"
            [window]
            title = "from env"
            width = 320

            [motion]
            model_scale = 2.5
        "#,
    );
    let config = {
        let _env = ConfigEnv::set(&path);
        DemoConfig::discover().unwrap()
    };
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.window.title, "from env");
    assert_eq!(config.window.width, 320);
    // unset keys keep their defaults
    assert_eq!(config.window.height, 600);
    assert_eq!(config.motion.model_scale, 2.5);
    assert_eq!(config.render, DemoConfig::default().render);
}

#[test]
fn missing_file_yields_the_defaults() {
    let path = std::env::temp_dir().join(format!(
        "render-steps-{}-does-not-exist.toml",
        std::process::id()
    ));
    assert!(!path.exists());

    let _env = ConfigEnv::set(&path);
    assert_eq!(DemoConfig::discover().unwrap(), DemoConfig::default());
}

#[test]
fn broken_file_is_an_error() {
    let path = temp_config("broken", "[window\ntitle = ");
    let result = {
        let _env = ConfigEnv::set(&path);
        DemoConfig::discover()
    };
    std::fs::remove_file(&path).unwrap();

    match result {
        Err(DemoError::Config { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected a config error, got {other:?}"),
    }
}

#[test]
fn wrongly_typed_value_is_an_error() {
    let path = temp_config("typed", "[window]\nwidth = \"wide\"\n");
    let result = {
        let _env = ConfigEnv::set(&path);
        DemoConfig::discover()
    };
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(result, Err(DemoError::Config { .. })));
}
