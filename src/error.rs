//! Startup errors.
//!
//! Every failure a demo can hit happens while it is being set up: a file in the
//! data directory is missing, a shader does not compile, a mesh or image does not
//! decode. None of them are recoverable, so [`DemoError`] only has to say what went
//! wrong and where. Orchestration code wraps it into `anyhow` with extra context.

use std::{fmt, path::PathBuf};

/// Pipeline stage a shader source belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("unable to open file '{}'", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} shader '{label}' failed to compile:\n{log}")]
    Shader {
        stage: ShaderStage,
        label: String,
        log: String,
    },

    #[error("shader program '{label}' does not link:\n{log}")]
    ShaderLink { label: String, log: String },

    #[error("render pipeline '{label}' was rejected by the device:\n{log}")]
    Pipeline { label: String, log: String },

    #[error("failed to import mesh '{file}'")]
    MeshImport {
        file: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("'{file}' contains no meshes")]
    EmptyMesh { file: String },

    #[error("'{file}' references vertex {index} which does not exist")]
    MalformedMesh { file: String, index: u32 },

    #[error("failed to load image '{file}'")]
    Image {
        file: String,
        #[source]
        source: image::ImageError,
    },

    #[error("texture '{file}' is {width}x{height}, the device supports 1 to {max} texels per side")]
    TextureSize {
        file: String,
        width: u32,
        height: u32,
        max: u32,
    },

    #[error("invalid configuration in '{}'", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T, E = DemoError> = std::result::Result<T, E>;
