use std::path::Path;

use crate::error::{DemoError, Result};

/**
 * This module contains all logic for loading meshes, textures and shader sources
 * from the data directory.
 */
pub mod mesh;
pub mod texture;

pub use mesh::{MeshData, load_obj};
pub use texture::load_texture;

pub async fn load_string(data_dir: &Path, file_name: &str) -> Result<String> {
    let path = data_dir.join(file_name);
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| DemoError::FileRead { path, source })
}

pub async fn load_binary(data_dir: &Path, file_name: &str) -> Result<Vec<u8>> {
    let path = data_dir.join(file_name);
    tokio::fs::read(&path)
        .await
        .map_err(|source| DemoError::FileRead { path, source })
}
