use std::path::Path;

use image::GenericImageView;

use crate::{
    data_structures::texture::Texture,
    error::{DemoError, Result},
    resources::load_binary,
};

/// Decode raw image file contents (PNG, JPEG, ...). The format is guessed from the bytes.
pub fn decode_image(file_name: &str, bytes: &[u8]) -> Result<image::DynamicImage> {
    image::load_from_memory(bytes).map_err(|source| DemoError::Image {
        file: file_name.to_string(),
        source,
    })
}

/// Both sides have to be non-zero and within the device's 2D texture limit.
pub fn check_texture_size(file_name: &str, width: u32, height: u32, max: u32) -> Result<()> {
    if (1..=max).contains(&width) && (1..=max).contains(&height) {
        return Ok(());
    }
    Err(DemoError::TextureSize {
        file: file_name.to_string(),
        width,
        height,
        max,
    })
}

/// Load an image from the data directory into a nearest-filtered, edge-clamped texture.
pub async fn load_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    data_dir: &Path,
    file_name: &str,
) -> Result<Texture> {
    let data = load_binary(data_dir, file_name).await?;
    let img = decode_image(file_name, &data)?;
    let (width, height) = img.dimensions();
    check_texture_size(
        file_name,
        width,
        height,
        device.limits().max_texture_dimension_2d,
    )?;

    let texture = Texture::from_image(
        device,
        queue,
        &img,
        Some(file_name),
        wgpu::FilterMode::Nearest,
    );
    log::info!(
        "Loaded texture {file_name} ({}x{})",
        texture.width,
        texture.height
    );
    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_within_the_limit_pass() {
        assert!(check_texture_size("a.png", 1, 1, 8192).is_ok());
        assert!(check_texture_size("a.png", 8192, 8192, 8192).is_ok());
    }

    #[test]
    fn oversized_image_is_rejected() {
        let err = check_texture_size("wide.png", 16384, 1, 8192).unwrap_err();
        match &err {
            DemoError::TextureSize {
                file,
                width,
                height,
                max,
            } => {
                assert_eq!(file, "wide.png");
                assert_eq!((*width, *height, *max), (16384, 1, 8192));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.to_string().contains("16384x1"));
        assert!(check_texture_size("tall.png", 1, 8193, 8192).is_err());
    }

    #[test]
    fn empty_image_is_rejected() {
        assert!(check_texture_size("empty.png", 0, 4, 8192).is_err());
    }

    #[test]
    fn decoded_oversized_png_fails_the_check() {
        let img = image::RgbaImage::new(16384, 1);
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();

        let decoded = decode_image("wide.png", bytes.get_ref()).unwrap();
        let (w, h) = decoded.dimensions();
        assert!(check_texture_size("wide.png", w, h, 8192).is_err());
    }
}
