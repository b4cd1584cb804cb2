use std::fmt;
use std::str::FromStr;

use crate::gl::{AttribSource, BufferId, BufferTarget, BufferUsage, GlApi, IndexSource};

use super::layout::{COLOR_INDEX, POSITION_INDEX, VertexLayout};
use super::mesh::{DrawCall, Mesh};

/// How vertex data reaches the GPU.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Client-side arrays: host memory is re-specified on every draw.
    Direct,
    /// One interleaved vertex buffer plus an index buffer, uploaded once.
    ArrayOfStructures,
    /// One buffer per attribute plus an index buffer, uploaded once.
    StructureOfArrays,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::Direct,
        Strategy::ArrayOfStructures,
        Strategy::StructureOfArrays,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::ArrayOfStructures => "aos",
            Self::StructureOfArrays => "soa",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategyError(pub String);

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown geometry strategy {:?} (expected direct, aos or soa)",
            self.0
        )
    }
}

impl std::error::Error for ParseStrategyError {}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "client" => Ok(Self::Direct),
            "aos" | "interleaved" => Ok(Self::ArrayOfStructures),
            "soa" | "separate" => Ok(Self::StructureOfArrays),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// `glGenBuffers` produced no name.
    ResourceExhausted,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceExhausted => f.write_str("failed to allocate a GPU buffer"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// GPU residency of a mesh.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Residency {
    Unpopulated,
    Interleaved {
        vertices: BufferId,
        indices: BufferId,
    },
    Separate {
        positions: BufferId,
        colors: BufferId,
        indices: BufferId,
    },
}

/// Buffers backing one mesh for one [`Strategy`].
///
/// Buffer strategies upload on the first draw and reuse the buffers forever
/// after; once populated the state never goes back.
#[derive(Debug)]
pub struct GeometryBuffer {
    strategy: Strategy,
    residency: Residency,
}

impl GeometryBuffer {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            residency: Residency::Unpopulated,
        }
    }

    #[inline]
    pub fn is_populated(&self) -> bool {
        self.residency != Residency::Unpopulated
    }

    /// Draws `mesh`, uploading it first if this buffer set is still empty.
    ///
    /// Callers must pass the same mesh on every draw.
    pub fn draw(&mut self, gl: &dyn GlApi, mesh: &Mesh) -> Result<DrawCall, GeometryError> {
        let call = mesh.draw_call();
        match self.strategy {
            Strategy::Direct => draw_direct(gl, mesh, &call),
            Strategy::ArrayOfStructures => {
                let (vertices, indices) = self.interleaved(gl, mesh)?;
                draw_interleaved(gl, vertices, indices, &call);
            }
            Strategy::StructureOfArrays => {
                let (positions, colors, indices) = self.separate(gl, mesh)?;
                draw_separate(gl, positions, colors, indices, &call);
            }
        }
        Ok(call)
    }

    /// Deletes every buffer this set allocated.
    pub fn release(self, gl: &dyn GlApi) {
        match self.residency {
            Residency::Unpopulated => {}
            Residency::Interleaved { vertices, indices } => gl.delete_buffers(&[vertices, indices]),
            Residency::Separate {
                positions,
                colors,
                indices,
            } => gl.delete_buffers(&[positions, colors, indices]),
        }
    }

    fn interleaved(
        &mut self,
        gl: &dyn GlApi,
        mesh: &Mesh,
    ) -> Result<(BufferId, BufferId), GeometryError> {
        if let Residency::Interleaved { vertices, indices } = self.residency {
            return Ok((vertices, indices));
        }

        let [vertices, indices] = create_buffers::<2>(gl)?;
        upload(gl, BufferTarget::Array, vertices, mesh.vertex_bytes());
        upload(gl, BufferTarget::ElementArray, indices, mesh.index_bytes());
        log::debug!(
            "uploaded interleaved geometry: {} vertex bytes, {} index bytes",
            mesh.vertex_bytes().len(),
            mesh.index_bytes().len()
        );

        self.residency = Residency::Interleaved { vertices, indices };
        Ok((vertices, indices))
    }

    fn separate(
        &mut self,
        gl: &dyn GlApi,
        mesh: &Mesh,
    ) -> Result<(BufferId, BufferId, BufferId), GeometryError> {
        if let Residency::Separate {
            positions,
            colors,
            indices,
        } = self.residency
        {
            return Ok((positions, colors, indices));
        }

        let [positions, colors, indices] = create_buffers::<3>(gl)?;
        let position_data = mesh.positions();
        let color_data = mesh.colors();
        upload(gl, BufferTarget::Array, positions, bytemuck::cast_slice(&position_data));
        upload(gl, BufferTarget::Array, colors, bytemuck::cast_slice(&color_data));
        upload(gl, BufferTarget::ElementArray, indices, mesh.index_bytes());
        log::debug!(
            "uploaded separate geometry: {} position bytes, {} color bytes, {} index bytes",
            position_data.len() * size_of::<[f32; 3]>(),
            color_data.len() * size_of::<[f32; 4]>(),
            mesh.index_bytes().len()
        );

        self.residency = Residency::Separate {
            positions,
            colors,
            indices,
        };
        Ok((positions, colors, indices))
    }
}

/// Allocates `N` buffers, or none at all.
fn create_buffers<const N: usize>(gl: &dyn GlApi) -> Result<[BufferId; N], GeometryError> {
    let mut created = Vec::with_capacity(N);
    for _ in 0..N {
        match gl.create_buffer() {
            Some(id) => created.push(id),
            None => {
                if !created.is_empty() {
                    gl.delete_buffers(&created);
                }
                log::error!("buffer allocation failed after {} of {N}", created.len());
                return Err(GeometryError::ResourceExhausted);
            }
        }
    }
    created
        .try_into()
        .map_err(|_| GeometryError::ResourceExhausted)
}

fn upload(gl: &dyn GlApi, target: BufferTarget, buffer: BufferId, data: &[u8]) {
    gl.bind_buffer(target, Some(buffer));
    gl.buffer_data(target, data, BufferUsage::StaticDraw);
}

fn enable_attributes(gl: &dyn GlApi) {
    gl.enable_vertex_attrib_array(POSITION_INDEX);
    gl.enable_vertex_attrib_array(COLOR_INDEX);
}

fn disable_attributes(gl: &dyn GlApi) {
    gl.disable_vertex_attrib_array(POSITION_INDEX);
    gl.disable_vertex_attrib_array(COLOR_INDEX);
}

fn unbind_buffers(gl: &dyn GlApi) {
    gl.bind_buffer(BufferTarget::Array, None);
    gl.bind_buffer(BufferTarget::ElementArray, None);
}

fn draw_direct(gl: &dyn GlApi, mesh: &Mesh, call: &DrawCall) {
    unbind_buffers(gl);
    enable_attributes(gl);

    let bytes = mesh.vertex_bytes();
    for layout in VertexLayout::interleaved() {
        // SAFETY: `bytes` borrows `mesh` for this whole function, and the
        // attributes are disabled below before it returns.
        unsafe { gl.vertex_attrib_pointer(&layout, AttribSource::Host(bytes)) };
    }
    gl.draw_elements(call, IndexSource::Host(mesh.indices()));

    disable_attributes(gl);
}

fn draw_interleaved(gl: &dyn GlApi, vertices: BufferId, indices: BufferId, call: &DrawCall) {
    gl.bind_buffer(BufferTarget::Array, Some(vertices));
    gl.bind_buffer(BufferTarget::ElementArray, Some(indices));
    enable_attributes(gl);

    for layout in VertexLayout::interleaved() {
        // SAFETY: offsets into the bound buffer; no host memory involved.
        unsafe { gl.vertex_attrib_pointer(&layout, AttribSource::Bound) };
    }
    gl.draw_elements(call, IndexSource::Bound);

    disable_attributes(gl);
    unbind_buffers(gl);
}

fn draw_separate(
    gl: &dyn GlApi,
    positions: BufferId,
    colors: BufferId,
    indices: BufferId,
    call: &DrawCall,
) {
    let [position_layout, color_layout] = VertexLayout::separate();

    gl.bind_buffer(BufferTarget::Array, Some(positions));
    gl.enable_vertex_attrib_array(position_layout.index);
    // SAFETY: offsets into the bound buffer; no host memory involved.
    unsafe { gl.vertex_attrib_pointer(&position_layout, AttribSource::Bound) };

    gl.bind_buffer(BufferTarget::Array, Some(colors));
    gl.enable_vertex_attrib_array(color_layout.index);
    // SAFETY: as above.
    unsafe { gl.vertex_attrib_pointer(&color_layout, AttribSource::Bound) };

    gl.bind_buffer(BufferTarget::ElementArray, Some(indices));
    gl.draw_elements(call, IndexSource::Bound);

    disable_attributes(gl);
    unbind_buffers(gl);
}
