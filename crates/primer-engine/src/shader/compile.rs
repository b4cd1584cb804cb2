use crate::gl::{GlApi, ShaderId, ShaderStage};

use super::error::{BuildError, GlObject, read_log};

/// A compiled shader stage.
///
/// Not released on drop: call [`Shader::release`] once it is no longer needed
/// (the program linker does this after linking).
#[derive(Debug, PartialEq, Eq)]
pub struct Shader {
    id: ShaderId,
    stage: ShaderStage,
}

impl Shader {
    #[inline]
    pub fn id(&self) -> ShaderId {
        self.id
    }

    #[inline]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn release(self, gl: &dyn GlApi) {
        gl.delete_shader(self.id);
    }
}

/// Creates a shader object for `stage`, uploads `source` and compiles it.
///
/// On compile failure the shader object is deleted before returning.
pub fn compile(gl: &dyn GlApi, stage: ShaderStage, source: &str) -> Result<Shader, BuildError> {
    if source.trim().is_empty() {
        return Err(BuildError::EmptySource(stage));
    }

    let id = gl.create_shader(stage).ok_or(BuildError::ResourceExhausted {
        object: GlObject::Shader(stage),
    })?;

    gl.shader_source(id, source);
    gl.compile_shader(id);

    if !gl.shader_compile_status(id) {
        let log = read_log(gl.shader_info_log_length(id), |len| gl.shader_info_log(id, len));
        match &log {
            Some(text) => log::error!("error compiling {stage} shader:\n{text}"),
            None => log::error!("error compiling {stage} shader (empty info log)"),
        }
        gl.delete_shader(id);
        return Err(BuildError::Compile { stage, log });
    }

    log::debug!("compiled {stage} shader {}", id.raw());
    Ok(Shader { id, stage })
}
