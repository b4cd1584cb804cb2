use crate::gl::{GlApi, ProgramId, ShaderStage};

use super::compile::compile;
use super::error::{BuildError, GlObject, read_log};

/// A linked program object owned by one sample.
///
/// Released explicitly with [`Program::release`].
#[derive(Debug, PartialEq, Eq)]
pub struct Program {
    id: ProgramId,
}

impl Program {
    #[inline]
    pub fn id(&self) -> ProgramId {
        self.id
    }

    /// Makes this the current program (`glUseProgram`).
    pub fn activate(&self, gl: &dyn GlApi) {
        gl.use_program(Some(self.id));
    }

    pub fn release(self, gl: &dyn GlApi) {
        gl.delete_program(self.id);
    }
}

/// Compiles both stages and links them into a program.
///
/// Nothing stays allocated on any error path. On success the stage objects
/// are detached and deleted; the program keeps the linked binary.
pub fn build_program(
    gl: &dyn GlApi,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<Program, BuildError> {
    let vertex = compile(gl, ShaderStage::Vertex, vertex_source)?;
    let fragment = match compile(gl, ShaderStage::Fragment, fragment_source) {
        Ok(shader) => shader,
        Err(err) => {
            vertex.release(gl);
            return Err(err);
        }
    };

    let Some(id) = gl.create_program() else {
        vertex.release(gl);
        fragment.release(gl);
        return Err(BuildError::ResourceExhausted {
            object: GlObject::Program,
        });
    };

    gl.attach_shader(id, vertex.id());
    gl.attach_shader(id, fragment.id());
    gl.link_program(id);

    if !gl.program_link_status(id) {
        let log = read_log(gl.program_info_log_length(id), |len| gl.program_info_log(id, len));
        match &log {
            Some(text) => log::error!("error linking program:\n{text}"),
            None => log::error!("error linking program (empty info log)"),
        }
        // Deleting the program detaches its shaders.
        gl.delete_program(id);
        vertex.release(gl);
        fragment.release(gl);
        return Err(BuildError::Link { log });
    }

    for shader in [vertex, fragment] {
        gl.detach_shader(id, shader.id());
        shader.release(gl);
    }

    log::debug!("linked program {}", id.raw());
    Ok(Program { id })
}
