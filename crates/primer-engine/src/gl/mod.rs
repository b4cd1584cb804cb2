//! GPU backend seam.
//!
//! Everything above this module talks to OpenGL ES through [`GlApi`]. The
//! trait mirrors the handful of ES 3.0 entry points the samples need, with
//! typed handles in place of raw `GLuint`s:
//! - handles are `NonZeroU32` newtypes, so the reserved name `0` can never be
//!   mistaken for a live object
//! - enumerants are small Rust enums converted at the FFI boundary
//!
//! [`NativeGl`] forwards to the `gl` crate. Tests drive the same code through
//! a recording backend instead of a real context.

mod native;
mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use native::NativeGl;
pub use types::{
    AttribSource, BufferId, BufferTarget, BufferUsage, IndexSource, ProgramId, ShaderId,
    ShaderStage,
};

use crate::color::Color;
use crate::geometry::{DrawCall, Primitive, VertexLayout};

/// The OpenGL ES 3.0 subset used by the samples.
///
/// All methods assume the implementation's context is current on the calling
/// thread. Allocation entry points return `None` where GL would hand back `0`.
pub trait GlApi {
    // ── shaders ───────────────────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Option<ShaderId>;
    fn shader_source(&self, shader: ShaderId, source: &str);
    fn compile_shader(&self, shader: ShaderId);
    fn shader_compile_status(&self, shader: ShaderId) -> bool;

    /// `GL_INFO_LOG_LENGTH` for a shader, including the trailing NUL.
    fn shader_info_log_length(&self, shader: ShaderId) -> i32;

    /// Reads up to `length` bytes of the shader info log.
    fn shader_info_log(&self, shader: ShaderId, length: i32) -> String;
    fn delete_shader(&self, shader: ShaderId);

    // ── programs ──────────────────────────────────────────────────────────

    fn create_program(&self) -> Option<ProgramId>;
    fn attach_shader(&self, program: ProgramId, shader: ShaderId);
    fn detach_shader(&self, program: ProgramId, shader: ShaderId);
    fn link_program(&self, program: ProgramId);
    fn program_link_status(&self, program: ProgramId) -> bool;

    /// `GL_INFO_LOG_LENGTH` for a program, including the trailing NUL.
    fn program_info_log_length(&self, program: ProgramId) -> i32;
    fn program_info_log(&self, program: ProgramId, length: i32) -> String;
    fn delete_program(&self, program: ProgramId);
    fn use_program(&self, program: Option<ProgramId>);

    // ── buffers ───────────────────────────────────────────────────────────

    fn create_buffer(&self) -> Option<BufferId>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>);

    /// Uploads `data` into the buffer bound to `target`.
    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage);
    fn delete_buffers(&self, buffers: &[BufferId]);

    // ── vertex attributes ─────────────────────────────────────────────────

    fn enable_vertex_attrib_array(&self, index: u32);
    fn disable_vertex_attrib_array(&self, index: u32);

    /// Points attribute `layout.index` at float data.
    ///
    /// `layout.offset` is applied to the host slice for
    /// [`AttribSource::Host`] and used as the byte offset into the bound
    /// `ARRAY_BUFFER` for [`AttribSource::Bound`].
    ///
    /// # Safety
    /// For `AttribSource::Host` the slice must stay alive and unmoved until
    /// the attribute is disabled or re-pointed; GL keeps the raw pointer.
    unsafe fn vertex_attrib_pointer(&self, layout: &VertexLayout, source: AttribSource<'_>);

    /// Sets the constant value used while attribute `index` is disabled.
    fn vertex_attrib_4f(&self, index: u32, value: [f32; 4]);

    // ── drawing ───────────────────────────────────────────────────────────

    fn draw_elements(&self, call: &DrawCall, indices: IndexSource<'_>);
    fn draw_arrays(&self, primitive: Primitive, first: i32, count: i32);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, color: Color);

    /// Clears the color buffer only; the samples never request depth tests.
    fn clear_color_buffer(&self);
}
