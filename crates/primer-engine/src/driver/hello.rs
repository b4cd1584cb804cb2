use crate::color::Color;
use crate::core::{App, AppControl, FrameCtx};
use crate::geometry::{
    COLOR_INDEX, POSITION_BYTES, POSITION_COMPONENTS, POSITION_INDEX, Primitive, VertexLayout,
};
use crate::gl::{AttribSource, BufferTarget, GlApi};
use crate::shader::{Program, build_program};

use super::config::ShaderPair;

static TRIANGLE: [[f32; POSITION_COMPONENTS]; 3] = [
    [0.0, 0.5, 0.0],
    [-0.5, -0.5, 0.0],
    [0.5, -0.5, 0.0],
];

const POSITIONS: VertexLayout = VertexLayout {
    index: POSITION_INDEX,
    components: POSITION_COMPONENTS,
    stride: POSITION_BYTES,
    offset: 0,
};

/// Non-indexed triangle from a host position array, colored through the
/// constant value of the disabled color attribute.
#[derive(Debug)]
pub struct HelloTriangle {
    shaders: ShaderPair,
    color: Color,
    program: Option<Program>,
}

impl HelloTriangle {
    pub fn new(shaders: ShaderPair) -> Self {
        Self {
            shaders,
            color: Color::GREEN,
            program: None,
        }
    }
}

impl App for HelloTriangle {
    fn init(&mut self, gl: &dyn GlApi) -> anyhow::Result<()> {
        let program = build_program(gl, &self.shaders.vertex, &self.shaders.fragment)?;
        self.program = Some(program);
        gl.clear_color(Color::TRANSPARENT);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let Some(program) = self.program.as_ref() else {
            log::error!("frame {}: hello triangle is not initialized", ctx.frame_index);
            return AppControl::Exit;
        };
        let gl = ctx.gl;

        let (width, height) = ctx.surface.to_gl();
        gl.viewport(0, 0, width, height);
        gl.clear_color_buffer();
        program.activate(gl);

        gl.bind_buffer(BufferTarget::Array, None);
        let positions = AttribSource::Host(bytemuck::cast_slice(&TRIANGLE));
        // SAFETY: `TRIANGLE` is static, so the pointer outlives every draw.
        unsafe { gl.vertex_attrib_pointer(&POSITIONS, positions) };
        gl.enable_vertex_attrib_array(POSITION_INDEX);
        gl.vertex_attrib_4f(COLOR_INDEX, self.color.to_array());

        gl.draw_arrays(Primitive::Triangles, 0, TRIANGLE.len() as i32);
        AppControl::Continue
    }

    fn shutdown(&mut self, gl: &dyn GlApi) {
        if let Some(program) = self.program.take() {
            gl.use_program(None);
            program.release(gl);
        }
    }
}
