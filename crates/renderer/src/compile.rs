use std::borrow::Cow;
use std::fmt;

use tracing::debug;
use wgpu::naga;

use crate::RendererError;

/// Pipeline stage a shader source feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Entry point name the stage must export.
    fn entry_point(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs_main",
            ShaderStage::Fragment => "fs_main",
        }
    }

    fn naga_stage(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "wave vertex stage",
            ShaderStage::Fragment => "wave fragment stage",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A parsed shader stage that has not been linked into a program yet.
#[derive(Debug)]
pub struct CompiledShader {
    stage: ShaderStage,
    module: naga::Module,
    source: String,
}

impl CompiledShader {
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

/// Parses WGSL for one stage.
///
/// Failures surface as [`RendererError::Compile`] carrying the annotated
/// parser diagnostic; callers log them and keep running without a pipeline.
pub fn compile(source: &str, stage: ShaderStage) -> Result<CompiledShader, RendererError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|err| RendererError::Compile {
        stage,
        message: err.emit_to_string(source),
    })?;
    debug!(%stage, "parsed shader source");
    Ok(CompiledShader {
        stage,
        module,
        source: source.to_owned(),
    })
}

/// Two validated shader modules ready for pipeline creation.
pub struct LinkedProgram {
    pub(crate) vertex: wgpu::ShaderModule,
    pub(crate) fragment: wgpu::ShaderModule,
}

/// Validates both stages and uploads them to the device.
///
/// Slot mixups, validation problems, and missing entry points surface as
/// [`RendererError::Link`]. Once both stages validate, module creation itself
/// cannot fail, so this is the last gate before the pipeline is built.
pub fn link(
    device: &wgpu::Device,
    vertex: CompiledShader,
    fragment: CompiledShader,
) -> Result<LinkedProgram, RendererError> {
    require_stage(&vertex, ShaderStage::Vertex)?;
    require_stage(&fragment, ShaderStage::Fragment)?;
    let vertex = upload_stage(device, vertex)?;
    let fragment = upload_stage(device, fragment)?;
    debug!("linked wave shader program");
    Ok(LinkedProgram { vertex, fragment })
}

/// A shader in the wrong slot still passes its own validation; the mismatch
/// would otherwise surface only at pipeline creation.
fn require_stage(shader: &CompiledShader, slot: ShaderStage) -> Result<(), RendererError> {
    if shader.stage() != slot {
        return Err(RendererError::Link {
            message: format!("{slot} slot holds a {} shader", shader.stage()),
        });
    }
    Ok(())
}

fn upload_stage(
    device: &wgpu::Device,
    shader: CompiledShader,
) -> Result<wgpu::ShaderModule, RendererError> {
    validate_stage(&shader)?;
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(shader.stage.label()),
        source: wgpu::ShaderSource::Naga(Cow::Owned(shader.module)),
    }))
}

/// Host-side half of linking, shared with the tests so the generated sources
/// can be verified without a GPU device.
fn validate_stage(shader: &CompiledShader) -> Result<(), RendererError> {
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&shader.module)
        .map_err(|err| RendererError::Link {
            message: format!("{} stage: {}", shader.stage, err.emit_to_string(&shader.source)),
        })?;

    let entry = shader.stage.entry_point();
    let found = shader
        .module
        .entry_points
        .iter()
        .any(|point| point.name == entry && point.stage == shader.stage.naga_stage());
    if !found {
        return Err(RendererError::Link {
            message: format!("{} stage is missing entry point `{entry}`", shader.stage),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_sources_parse_cleanly() {
        compile(waves::VERTEX_SOURCE, ShaderStage::Vertex).unwrap();
        compile(&waves::fragment_source(), ShaderStage::Fragment).unwrap();
    }

    #[test]
    fn generated_sources_validate_for_their_entry_points() {
        let vertex = compile(waves::VERTEX_SOURCE, ShaderStage::Vertex).unwrap();
        let fragment = compile(&waves::fragment_source(), ShaderStage::Fragment).unwrap();
        validate_stage(&vertex).unwrap();
        validate_stage(&fragment).unwrap();
    }

    #[test]
    fn parse_failure_reports_the_stage() {
        let err = compile("fn {", ShaderStage::Fragment).unwrap_err();
        match err {
            RendererError::Compile { stage, message } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(!message.is_empty());
            }
            other => panic!("expected a compile error, got {other}"),
        }
    }

    #[test]
    fn missing_entry_point_fails_to_link() {
        let source = "@fragment\nfn not_the_entry() -> @location(0) vec4<f32> {\n    return vec4<f32>(0.0, 0.0, 0.0, 1.0);\n}\n";
        let shader = compile(source, ShaderStage::Fragment).unwrap();
        let err = validate_stage(&shader).unwrap_err();
        match err {
            RendererError::Link { message } => assert!(message.contains("fs_main")),
            other => panic!("expected a link error, got {other}"),
        }
    }

    #[test]
    fn stage_mismatch_fails_to_link() {
        let shader = compile(waves::VERTEX_SOURCE, ShaderStage::Fragment).unwrap();
        assert!(validate_stage(&shader).is_err());
    }

    #[test]
    fn swapped_stage_arguments_fail_to_link() {
        let vertex = compile(waves::VERTEX_SOURCE, ShaderStage::Vertex).unwrap();
        assert!(require_stage(&vertex, ShaderStage::Vertex).is_ok());

        let err = require_stage(&vertex, ShaderStage::Fragment).unwrap_err();
        match err {
            RendererError::Link { message } => {
                assert!(message.contains("fragment slot holds a vertex shader"));
            }
            other => panic!("expected a link error, got {other}"),
        }
    }
}
