//! Shader compilation.
//!
//! Every program is a pair of WGSL sources read from the data directory, one per
//! stage. Both stages are parsed and validated with naga before any GPU module
//! is created, so a broken shader surfaces as a [`DemoError::Shader`] carrying the
//! compiler log instead of a device error. The two stages are then linked: every
//! `@location` the fragment stage reads has to be written by the vertex stage with
//! the same type, otherwise the program fails with [`DemoError::ShaderLink`].

use std::{collections::BTreeMap, path::Path};

use crate::{
    error::{DemoError, Result, ShaderStage},
    resources::load_string,
};

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

#[derive(Debug)]
pub struct ShaderProgram {
    pub label: String,
    pub vertex: wgpu::ShaderModule,
    pub fragment: wgpu::ShaderModule,
}

impl ShaderProgram {
    /// Compile `<name>.vert.wgsl` and `<name>.frag.wgsl` from `data_dir`.
    pub async fn load(device: &wgpu::Device, data_dir: &Path, name: &str) -> Result<Self> {
        let vert_src = load_string(data_dir, &format!("{name}.vert.wgsl")).await?;
        let frag_src = load_string(data_dir, &format!("{name}.frag.wgsl")).await?;
        compile_shaders(device, name, &vert_src, &frag_src).await
    }
}

pub async fn compile_shaders(
    device: &wgpu::Device,
    label: &str,
    vert_src: &str,
    frag_src: &str,
) -> Result<ShaderProgram> {
    let vert_module = validate_wgsl(ShaderStage::Vertex, label, vert_src)?;
    let frag_module = validate_wgsl(ShaderStage::Fragment, label, frag_src)?;
    link_stages(label, &vert_module, &frag_module)?;

    let vertex = create_module(device, ShaderStage::Vertex, label, vert_src).await?;
    let fragment = create_module(device, ShaderStage::Fragment, label, frag_src).await?;
    log::debug!("Compiled shader program {label}");

    Ok(ShaderProgram {
        label: label.to_string(),
        vertex,
        fragment,
    })
}

// the device can still refuse a module naga accepts, e.g. for a missing feature
async fn create_module(
    device: &wgpu::Device,
    stage: ShaderStage,
    label: &str,
    source: &str,
) -> Result<wgpu::ShaderModule> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{label} {stage} shader")),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    match scope.pop().await {
        Some(error) => Err(DemoError::Shader {
            stage,
            label: label.to_string(),
            log: error.to_string(),
        }),
        None => Ok(module),
    }
}

/// Parse and validate one stage and make sure it exports the entry point of that stage.
pub fn validate_wgsl(stage: ShaderStage, label: &str, source: &str) -> Result<naga::Module> {
    let fail = |log: String| DemoError::Shader {
        stage,
        label: label.to_string(),
        log,
    };

    let module = naga::front::wgsl::parse_str(source).map_err(|e| fail(e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| fail(e.to_string()))?;

    let (entry, naga_stage) = match stage {
        ShaderStage::Vertex => (VERTEX_ENTRY, naga::ShaderStage::Vertex),
        ShaderStage::Fragment => (FRAGMENT_ENTRY, naga::ShaderStage::Fragment),
    };
    let has_entry = module
        .entry_points
        .iter()
        .any(|ep| ep.name == entry && ep.stage == naga_stage);
    if !has_entry {
        return Err(fail(format!("missing {stage} entry point `{entry}`")));
    }

    Ok(module)
}

/// Check that the vertex outputs cover the fragment inputs, location by location.
pub fn link_stages(label: &str, vertex: &naga::Module, fragment: &naga::Module) -> Result<()> {
    let fail = |log: String| DemoError::ShaderLink {
        label: label.to_string(),
        log,
    };
    fn entry<'a>(module: &'a naga::Module, name: &str) -> Option<&'a naga::Function> {
        module
            .entry_points
            .iter()
            .find(|ep| ep.name == name)
            .map(|ep| &ep.function)
    }
    let (Some(vs), Some(fs)) = (entry(vertex, VERTEX_ENTRY), entry(fragment, FRAGMENT_ENTRY)) else {
        return Err(fail("missing entry point".to_string()));
    };

    let mut outputs = BTreeMap::new();
    if let Some(result) = &vs.result {
        collect_locations(vertex, result.binding.as_ref(), result.ty, &mut outputs);
    }
    let mut inputs = BTreeMap::new();
    for arg in &fs.arguments {
        collect_locations(fragment, arg.binding.as_ref(), arg.ty, &mut inputs);
    }

    for (location, input) in &inputs {
        match outputs.get(location) {
            None => {
                return Err(fail(format!(
                    "fragment input @location({location}) is not written by `{VERTEX_ENTRY}`"
                )));
            }
            Some(output) if output != input => {
                return Err(fail(format!(
                    "@location({location}) is written as {output:?} but read as {input:?}"
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

// struct members carry the bindings when the argument or result itself has none
fn collect_locations(
    module: &naga::Module,
    binding: Option<&naga::Binding>,
    ty: naga::Handle<naga::Type>,
    out: &mut BTreeMap<u32, naga::TypeInner>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => {
            out.insert(*location, module.types[ty].inner.clone());
        }
        Some(_) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_locations(module, member.binding.as_ref(), member.ty, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERT: &str = r#"
        @vertex
        fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
            return vec4<f32>(position, 1.0);
        }
    "#;

    const FRAG: &str = r#"
        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(1.0, 0.0, 0.0, 1.0);
        }
    "#;

    #[test]
    fn accepts_matching_stages() {
        assert!(validate_wgsl(ShaderStage::Vertex, "ok", VERT).is_ok());
        assert!(validate_wgsl(ShaderStage::Fragment, "ok", FRAG).is_ok());
    }

    #[test]
    fn syntax_errors_carry_the_compiler_log() {
        let err = validate_wgsl(ShaderStage::Vertex, "broken", "@vertex fn vs_main( {").unwrap_err();
        match err {
            DemoError::Shader { stage, label, log } => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert_eq!(label, "broken");
                assert!(!log.is_empty());
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn type_errors_are_rejected() {
        let src = r#"
            @fragment
            fn fs_main() -> @location(0) vec4<f32> {
                let x: f32 = vec2<f32>(1.0, 2.0);
                return vec4<f32>(x);
            }
        "#;
        assert!(validate_wgsl(ShaderStage::Fragment, "typed", src).is_err());
    }

    fn link(vert: &str, frag: &str) -> Result<()> {
        let vert = validate_wgsl(ShaderStage::Vertex, "pair", vert).unwrap();
        let frag = validate_wgsl(ShaderStage::Fragment, "pair", frag).unwrap();
        link_stages("pair", &vert, &frag)
    }

    const VERT_WITH_COLOR: &str = r#"
        struct VertexOutput {
            @builtin(position) clip_position: vec4<f32>,
            @location(0) color: vec3<f32>,
        };

        @vertex
        fn vs_main(@location(0) position: vec3<f32>) -> VertexOutput {
            var out: VertexOutput;
            out.clip_position = vec4<f32>(position, 1.0);
            out.color = position;
            return out;
        }
    "#;

    #[test]
    fn matching_locations_link() {
        let frag = r#"
            @fragment
            fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
                return vec4<f32>(color, 1.0);
            }
        "#;
        assert!(link(VERT_WITH_COLOR, frag).is_ok());
        // reading nothing is fine too
        assert!(link(VERT_WITH_COLOR, FRAG).is_ok());
    }

    #[test]
    fn unwritten_fragment_input_does_not_link() {
        let frag = r#"
            @group(3) @binding(7)
            var<uniform> tint: vec4<f32>;

            @fragment
            fn fs_main(@location(5) uv: vec2<f32>) -> @location(0) vec4<f32> {
                return tint * uv.x;
            }
        "#;
        let err = link(VERT_WITH_COLOR, frag).unwrap_err();
        assert!(matches!(err, DemoError::ShaderLink { .. }));
        assert!(err.to_string().contains("@location(5)"));
    }

    #[test]
    fn mismatched_location_types_do_not_link() {
        let frag = r#"
            @fragment
            fn fs_main(@location(0) color: vec2<f32>) -> @location(0) vec4<f32> {
                return vec4<f32>(color, 0.0, 1.0);
            }
        "#;
        let err = link(VERT_WITH_COLOR, frag).unwrap_err();
        assert!(err.to_string().contains("@location(0)"));
    }

    #[test]
    fn struct_inputs_are_matched_per_member() {
        let frag = r#"
            struct FragmentInput {
                @location(0) color: vec3<f32>,
                @location(1) uv: vec2<f32>,
            };

            @fragment
            fn fs_main(in: FragmentInput) -> @location(0) vec4<f32> {
                return vec4<f32>(in.color, in.uv.x);
            }
        "#;
        let err = link(VERT_WITH_COLOR, frag).unwrap_err();
        assert!(err.to_string().contains("@location(1)"));
    }

    #[test]
    fn stage_without_its_entry_point_fails() {
        let err = validate_wgsl(ShaderStage::Fragment, "swapped", VERT).unwrap_err();
        assert!(err.to_string().contains("fs_main"));
    }
}
