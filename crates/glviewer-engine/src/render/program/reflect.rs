use glviewer_bindings::{UniformKind, UniformSet};
use naga::{AddressSpace, Module, Scalar, ShaderStage, TypeInner, VectorSize};

use super::error::ProgramError;
use super::source::{FRAGMENT_ENTRY, ProgramSource, VERTEX_ENTRY};

/// A uniform found in a compiled module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformDecl {
    pub name: String,
    pub binding: u32,
    pub kind: UniformKind,
    /// Byte size of the WGSL type.
    pub size: u64,
}

/// A validated WGSL module with its uniform interface.
#[derive(Debug, Clone)]
pub struct CompiledModule {
    source: String,
    uniforms: Vec<UniformDecl>,
    declared: UniformSet,
}

impl CompiledModule {
    /// Parses, validates and reflects `source`.
    ///
    /// Compilation runs on the CPU, so this needs no device and can reject a
    /// bad shader before any window is opened.
    pub fn compile(source: &ProgramSource) -> Result<Self, ProgramError> {
        let wgsl = source.compose();

        let module = naga::front::wgsl::parse_str(&wgsl).map_err(|e| ProgramError::Compile {
            message: e.emit_to_string(&wgsl),
        })?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        );
        validator
            .validate(&module)
            .map_err(|e| ProgramError::Compile {
                message: e.emit_to_string(&wgsl),
            })?;

        require_entry_point(&module, ShaderStage::Vertex, VERTEX_ENTRY)?;
        require_entry_point(&module, ShaderStage::Fragment, FRAGMENT_ENTRY)?;

        let uniforms = reflect_uniforms(&module)?;
        let declared = uniforms.iter().map(|u| (u.name.clone(), u.kind)).collect();

        log::debug!(
            "compiled program: {} uniform(s) [{}]",
            uniforms.len(),
            uniforms
                .iter()
                .map(|u| format!("{}: {}", u.name, u.kind))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self {
            source: wgsl,
            uniforms,
            declared,
        })
    }

    /// The composed WGSL handed to the device.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Uniforms ordered by binding.
    pub fn uniforms(&self) -> &[UniformDecl] {
        &self.uniforms
    }

    pub fn declared_uniforms(&self) -> &UniformSet {
        &self.declared
    }
}

fn require_entry_point(
    module: &Module,
    stage: ShaderStage,
    name: &str,
) -> Result<(), ProgramError> {
    if module
        .entry_points
        .iter()
        .any(|ep| ep.stage == stage && ep.name == name)
    {
        Ok(())
    } else {
        Err(ProgramError::link(format!(
            "missing {stage:?} entry point `{name}`"
        )))
    }
}

fn reflect_uniforms(module: &Module) -> Result<Vec<UniformDecl>, ProgramError> {
    let mut out: Vec<UniformDecl> = Vec::new();

    for (_, var) in module.global_variables.iter() {
        let name = var.name.clone().unwrap_or_else(|| "<unnamed>".to_string());

        match var.space {
            AddressSpace::Uniform => {}
            AddressSpace::Private | AddressSpace::WorkGroup | AddressSpace::Function => continue,
            _ => {
                return Err(ProgramError::link(format!(
                    "`{name}` uses an unsupported resource type; only `var<uniform>` is bound"
                )));
            }
        }

        let Some(binding) = &var.binding else {
            return Err(ProgramError::link(format!("uniform `{name}` has no binding")));
        };
        if binding.group != 0 {
            return Err(ProgramError::link(format!(
                "uniform `{name}` is in @group({}); only @group(0) is bound",
                binding.group
            )));
        }
        if let Some(other) = out.iter().find(|u| u.binding == binding.binding) {
            return Err(ProgramError::link(format!(
                "uniforms `{}` and `{name}` share @binding({})",
                other.name, binding.binding
            )));
        }

        let ty = &module.types[var.ty];
        out.push(UniformDecl {
            name,
            binding: binding.binding,
            kind: classify(&ty.inner),
            size: u64::from(ty.inner.size(module.to_ctx())),
        });
    }

    out.sort_by_key(|u| u.binding);
    Ok(out)
}

fn classify(inner: &TypeInner) -> UniformKind {
    match *inner {
        TypeInner::Scalar(scalar) if scalar == Scalar::F32 => UniformKind::Float,
        TypeInner::Vector { size, scalar } if scalar == Scalar::F32 => match size {
            VectorSize::Bi => UniformKind::Vec2,
            VectorSize::Tri => UniformKind::Vec3,
            VectorSize::Quad => UniformKind::Vec4,
        },
        _ => UniformKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTEX: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) surface_position: vec2<f32>,
};

@vertex
fn vs_main(@location(0) position: vec2<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = vec4<f32>(position, 0.0, 1.0);
    out.surface_position = position;
    return out;
}
"#;

    fn compile(fragment: &str) -> Result<CompiledModule, ProgramError> {
        CompiledModule::compile(&ProgramSource::new(VERTEX, fragment))
    }

    #[test]
    fn reflects_live_uniforms() {
        let m = compile(
            r#"
@group(0) @binding(0) var<uniform> time: f32;
@group(0) @binding(1) var<uniform> resolution: vec2<f32>;
@group(0) @binding(2) var<uniform> mouse: vec2<f32>;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let uv = in.clip_position.xy / resolution + mouse;
    return vec4<f32>(uv, sin(time), 1.0);
}
"#,
        )
        .unwrap();

        let names: Vec<_> = m.uniforms().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["time", "resolution", "mouse"]);
        assert_eq!(m.declared_uniforms().kind("time"), Some(UniformKind::Float));
        assert_eq!(m.declared_uniforms().kind("mouse"), Some(UniformKind::Vec2));
        assert_eq!(m.uniforms()[0].size, 4);
        assert_eq!(m.uniforms()[1].size, 8);
    }

    #[test]
    fn non_float_uniforms_are_opaque() {
        let m = compile(
            r#"
@group(0) @binding(0) var<uniform> frame: u32;
@group(0) @binding(1) var<uniform> tint: vec4<f32>;
@group(0) @binding(2) var<uniform> xform: mat4x4<f32>;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return xform * tint * f32(frame);
}
"#,
        )
        .unwrap();

        let set = m.declared_uniforms();
        assert_eq!(set.kind("frame"), Some(UniformKind::Other));
        assert_eq!(set.kind("tint"), Some(UniformKind::Vec4));
        assert_eq!(set.kind("xform"), Some(UniformKind::Other));
        assert_eq!(m.uniforms()[2].size, 64);
    }

    #[test]
    fn no_uniforms_is_fine() {
        let m = compile(
            r#"
@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.surface_position, 0.0, 1.0);
}
"#,
        )
        .unwrap();
        assert!(m.uniforms().is_empty());
        assert!(m.source().contains("fn vs_main"));
    }

    #[test]
    fn syntax_errors_are_compile_errors() {
        let err = compile("@fragment fn fs_main( -> {").unwrap_err();
        assert!(matches!(err, ProgramError::Compile { .. }), "{err}");
    }

    #[test]
    fn type_errors_are_compile_errors() {
        let err = compile(
            r#"
@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.surface_position;
}
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ProgramError::Compile { .. }), "{err}");
    }

    #[test]
    fn missing_fragment_entry_is_a_link_error() {
        let err = compile(
            r#"
@fragment
fn main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(1.0);
}
"#,
        )
        .unwrap_err();
        match err {
            ProgramError::Link { message } => assert!(message.contains("fs_main"), "{message}"),
            other => panic!("expected link error, got {other}"),
        }
    }

    #[test]
    fn other_bind_groups_are_rejected() {
        let err = compile(
            r#"
@group(1) @binding(0) var<uniform> time: f32;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(time);
}
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ProgramError::Link { .. }), "{err}");
    }

    #[test]
    fn textures_are_rejected() {
        let err = compile(
            r#"
@group(0) @binding(0) var tex: texture_2d<f32>;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureLoad(tex, vec2<i32>(0, 0), 0);
}
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ProgramError::Link { .. }), "{err}");
    }
}
