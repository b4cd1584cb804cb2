use std::ffi::{CStr, CString, c_void};
use std::ptr;

use gl::types::{GLboolean, GLchar, GLint, GLsizei, GLsizeiptr, GLuint};

use crate::color::Color;
use crate::geometry::{DrawCall, Primitive, VertexLayout};

use super::types::{
    AttribSource, BufferId, BufferTarget, BufferUsage, IndexSource, ProgramId, ShaderId,
    ShaderStage,
};
use super::GlApi;

/// [`GlApi`] over the `gl` crate's global function pointers.
///
/// The pointers are process-wide, so only one `NativeGl` should exist, and it
/// must only be used while the context it was loaded from is current.
pub struct NativeGl {
    _loaded: (),
}

impl NativeGl {
    /// Loads GL entry points through `loader` (usually the display's
    /// `get_proc_address`).
    ///
    /// # Safety
    /// The context whose functions `loader` resolves must be current on this
    /// thread for as long as the returned value is used.
    pub unsafe fn load<F>(mut loader: F) -> Self
    where
        F: FnMut(&CStr) -> *const c_void,
    {
        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(name) => loader(&name),
            Err(_) => ptr::null(),
        });

        let gl = Self { _loaded: () };
        log::debug!(
            "GL context: vendor={:?} renderer={:?} version={:?}",
            gl.string(gl::VENDOR),
            gl.string(gl::RENDERER),
            gl.string(gl::VERSION),
        );
        gl
    }

    fn string(&self, name: u32) -> Option<String> {
        let raw = unsafe { gl::GetString(name) };
        if raw.is_null() {
            return None;
        }
        // GetString returns a static NUL-terminated string owned by the driver.
        let text = unsafe { CStr::from_ptr(raw.cast()) };
        Some(text.to_string_lossy().into_owned())
    }
}

fn gl_bool(value: bool) -> GLboolean {
    if value { gl::TRUE } else { gl::FALSE }
}

/// Converts a GL-written log buffer into text, dropping the NUL padding.
fn log_text(mut buf: Vec<u8>, written: GLsizei) -> String {
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}

impl GlApi for NativeGl {
    fn create_shader(&self, stage: ShaderStage) -> Option<ShaderId> {
        ShaderId::from_raw(unsafe { gl::CreateShader(stage.to_gl()) })
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        let text = source.as_ptr() as *const GLchar;
        let len = source.len() as GLint;
        unsafe { gl::ShaderSource(shader.raw(), 1, &text, &len) };
    }

    fn compile_shader(&self, shader: ShaderId) {
        unsafe { gl::CompileShader(shader.raw()) };
    }

    fn shader_compile_status(&self, shader: ShaderId) -> bool {
        let mut status: GLint = 0;
        unsafe { gl::GetShaderiv(shader.raw(), gl::COMPILE_STATUS, &mut status) };
        status == GLint::from(gl::TRUE)
    }

    fn shader_info_log_length(&self, shader: ShaderId) -> i32 {
        let mut length: GLint = 0;
        unsafe { gl::GetShaderiv(shader.raw(), gl::INFO_LOG_LENGTH, &mut length) };
        length
    }

    fn shader_info_log(&self, shader: ShaderId, length: i32) -> String {
        let mut buf = vec![0u8; length.max(0) as usize];
        let mut written: GLsizei = 0;
        unsafe {
            gl::GetShaderInfoLog(
                shader.raw(),
                length,
                &mut written,
                buf.as_mut_ptr() as *mut GLchar,
            )
        };
        log_text(buf, written)
    }

    fn delete_shader(&self, shader: ShaderId) {
        unsafe { gl::DeleteShader(shader.raw()) };
    }

    fn create_program(&self) -> Option<ProgramId> {
        ProgramId::from_raw(unsafe { gl::CreateProgram() })
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        unsafe { gl::AttachShader(program.raw(), shader.raw()) };
    }

    fn detach_shader(&self, program: ProgramId, shader: ShaderId) {
        unsafe { gl::DetachShader(program.raw(), shader.raw()) };
    }

    fn link_program(&self, program: ProgramId) {
        unsafe { gl::LinkProgram(program.raw()) };
    }

    fn program_link_status(&self, program: ProgramId) -> bool {
        let mut status: GLint = 0;
        unsafe { gl::GetProgramiv(program.raw(), gl::LINK_STATUS, &mut status) };
        status == GLint::from(gl::TRUE)
    }

    fn program_info_log_length(&self, program: ProgramId) -> i32 {
        let mut length: GLint = 0;
        unsafe { gl::GetProgramiv(program.raw(), gl::INFO_LOG_LENGTH, &mut length) };
        length
    }

    fn program_info_log(&self, program: ProgramId, length: i32) -> String {
        let mut buf = vec![0u8; length.max(0) as usize];
        let mut written: GLsizei = 0;
        unsafe {
            gl::GetProgramInfoLog(
                program.raw(),
                length,
                &mut written,
                buf.as_mut_ptr() as *mut GLchar,
            )
        };
        log_text(buf, written)
    }

    fn delete_program(&self, program: ProgramId) {
        unsafe { gl::DeleteProgram(program.raw()) };
    }

    fn use_program(&self, program: Option<ProgramId>) {
        unsafe { gl::UseProgram(program.map_or(0, ProgramId::raw)) };
    }

    fn create_buffer(&self) -> Option<BufferId> {
        let mut name: GLuint = 0;
        unsafe { gl::GenBuffers(1, &mut name) };
        BufferId::from_raw(name)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>) {
        unsafe { gl::BindBuffer(target.to_gl(), buffer.map_or(0, BufferId::raw)) };
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        unsafe {
            gl::BufferData(
                target.to_gl(),
                data.len() as GLsizeiptr,
                data.as_ptr().cast(),
                usage.to_gl(),
            )
        };
    }

    fn delete_buffers(&self, buffers: &[BufferId]) {
        let names: Vec<GLuint> = buffers.iter().map(|b| b.raw()).collect();
        unsafe { gl::DeleteBuffers(names.len() as GLsizei, names.as_ptr()) };
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { gl::EnableVertexAttribArray(index) };
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        unsafe { gl::DisableVertexAttribArray(index) };
    }

    unsafe fn vertex_attrib_pointer(&self, layout: &VertexLayout, source: AttribSource<'_>) {
        let pointer: *const c_void = match source {
            AttribSource::Host(bytes) => {
                debug_assert!(layout.offset <= bytes.len());
                // In bounds: checked above, and the caller keeps `bytes` alive.
                unsafe { bytes.as_ptr().add(layout.offset).cast() }
            }
            AttribSource::Bound => layout.offset as *const c_void,
        };
        unsafe {
            gl::VertexAttribPointer(
                layout.index,
                layout.components as GLint,
                gl::FLOAT,
                gl_bool(false),
                layout.stride as GLsizei,
                pointer,
            )
        };
    }

    fn vertex_attrib_4f(&self, index: u32, value: [f32; 4]) {
        let [x, y, z, w] = value;
        unsafe { gl::VertexAttrib4f(index, x, y, z, w) };
    }

    fn draw_elements(&self, call: &DrawCall, indices: IndexSource<'_>) {
        let pointer: *const c_void = match indices {
            IndexSource::Host(data) => data.as_ptr().cast(),
            IndexSource::Bound => ptr::null(),
        };
        unsafe {
            gl::DrawElements(
                call.primitive.to_gl(),
                call.index_count,
                call.index_type.to_gl(),
                pointer,
            )
        };
    }

    fn draw_arrays(&self, primitive: Primitive, first: i32, count: i32) {
        unsafe { gl::DrawArrays(primitive.to_gl(), first, count) };
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { gl::Viewport(x, y, width, height) };
    }

    fn clear_color(&self, color: Color) {
        unsafe { gl::ClearColor(color.r, color.g, color.b, color.a) };
    }

    fn clear_color_buffer(&self) {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) };
    }
}
