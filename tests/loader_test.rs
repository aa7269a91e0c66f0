use render_steps::{
    error::{DemoError, ShaderStage},
    pipelines::shader::validate_wgsl,
    resources::{load_obj, load_string, texture::decode_image},
};

mod common;

const PROGRAMS: [&str; 4] = ["triangle", "default", "textured", "mesh"];

#[tokio::test]
async fn missing_shader_file_is_reported() {
    let err = load_string(&common::data_dir(), "missing.vert.wgsl")
        .await
        .unwrap_err();
    assert!(matches!(err, DemoError::FileRead { .. }));
    assert!(err.to_string().starts_with("unable to open file"));
    assert!(err.to_string().contains("missing.vert.wgsl"));
}

#[tokio::test]
async fn shipped_shaders_validate() {
    for name in PROGRAMS {
        let vert = load_string(&common::data_dir(), &format!("{name}.vert.wgsl"))
            .await
            .unwrap();
        let frag = load_string(&common::data_dir(), &format!("{name}.frag.wgsl"))
            .await
            .unwrap();
        if let Err(e) = validate_wgsl(ShaderStage::Vertex, name, &vert) {
            panic!("{e}");
        }
        if let Err(e) = validate_wgsl(ShaderStage::Fragment, name, &frag) {
            panic!("{e}");
        }
    }
}

#[tokio::test]
async fn vertex_shader_in_fragment_slot_is_rejected() {
    let vert = load_string(&common::data_dir(), "triangle.vert.wgsl")
        .await
        .unwrap();
    let err = validate_wgsl(ShaderStage::Fragment, "triangle", &vert).unwrap_err();
    assert!(err.to_string().starts_with("fragment shader 'triangle' failed to compile"));
}

#[tokio::test]
async fn cube_is_flattened_into_twelve_triangles() {
    let cube = load_obj(&common::data_dir(), "cube.obj").await.unwrap();

    assert_eq!(cube.num_triangles, 12);
    assert_eq!(cube.vertices.len(), 36);
    assert_eq!(cube.positions().len(), 9 * 12);
    assert_eq!(cube.byte_len(), 36 * 24);

    for vertex in &cube.vertices {
        assert!(vertex.position.iter().all(|c| c.abs() == 1.0));
        // faces are axis aligned, so normals are unit axes pointing outwards
        let n = vertex.normal;
        assert_eq!(n.iter().map(|c| c.abs()).sum::<f32>(), 1.0);
        let axis = n.iter().position(|c| *c != 0.0).unwrap();
        assert_eq!(n[axis], vertex.position[axis]);
    }
}

#[tokio::test]
async fn missing_mesh_file_is_reported() {
    let err = load_obj(&common::data_dir(), "missing.obj").await.unwrap_err();
    assert!(matches!(err, DemoError::FileRead { .. }));
}

#[tokio::test]
async fn checker_texture_decodes() {
    let bytes = tokio::fs::read(common::data_dir().join("checker.png"))
        .await
        .unwrap();
    let img = decode_image("checker.png", &bytes).unwrap().to_rgba8();

    assert_eq!(img.dimensions(), (8, 8));
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_ne!(img.get_pixel(2, 0), img.get_pixel(0, 0));
}

#[test]
fn garbage_image_is_rejected() {
    let err = decode_image("noise.png", b"not an image").unwrap_err();
    assert!(matches!(err, DemoError::Image { .. }));
}
