use std::fmt;

use crate::color::Color;

use super::layout::{COLOR_COMPONENTS, ColoredVertex, POSITION_COMPONENTS};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Primitive {
    Triangles,
}

impl Primitive {
    #[inline]
    pub(crate) const fn to_gl(self) -> u32 {
        match self {
            Self::Triangles => gl::TRIANGLES,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum IndexType {
    U16,
}

impl IndexType {
    #[inline]
    pub(crate) const fn to_gl(self) -> u32 {
        match self {
            Self::U16 => gl::UNSIGNED_SHORT,
        }
    }
}

/// Arguments of one `glDrawElements` call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawCall {
    pub primitive: Primitive,
    pub index_count: i32,
    pub index_type: IndexType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    Empty,
    IndexOutOfRange { index: u16, vertex_count: usize },
    /// Index count exceeds what a `GLsizei` can express.
    TooManyIndices(usize),
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("mesh has no vertices or no indices"),
            Self::IndexOutOfRange { index, vertex_count } => write!(
                f,
                "index {index} is out of range for {vertex_count} vertices"
            ),
            Self::TooManyIndices(n) => write!(f, "{n} indices exceed the GLsizei range"),
        }
    }
}

impl std::error::Error for MeshError {}

/// Host-side indexed triangle geometry.
///
/// Geometry is immutable once built; the uploader relies on that to cache
/// buffers after the first draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<ColoredVertex>,
    indices: Vec<u16>,
}

impl Mesh {
    pub fn new(vertices: Vec<ColoredVertex>, indices: Vec<u16>) -> Result<Self, MeshError> {
        if vertices.is_empty() || indices.is_empty() {
            return Err(MeshError::Empty);
        }
        if i32::try_from(indices.len()).is_err() {
            return Err(MeshError::TooManyIndices(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| usize::from(i) >= vertices.len()) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }
        Ok(Self { vertices, indices })
    }

    /// The book's triangle: red top, green bottom-left, blue bottom-right.
    pub fn rgb_triangle() -> Self {
        Self {
            vertices: vec![
                ColoredVertex::new([0.0, 0.5, 0.0], Color::RED.to_array()),
                ColoredVertex::new([-0.5, -0.5, 0.0], Color::GREEN.to_array()),
                ColoredVertex::new([0.5, -0.5, 0.0], Color::BLUE.to_array()),
            ],
            indices: vec![0, 1, 2],
        }
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Interleaved `[position, color]` byte stream.
    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    #[inline]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Position stream alone, as packed `f32` triples.
    pub fn positions(&self) -> Vec<[f32; POSITION_COMPONENTS]> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Color stream alone, as packed `f32` quadruples.
    pub fn colors(&self) -> Vec<[f32; COLOR_COMPONENTS]> {
        self.vertices.iter().map(|v| v.color).collect()
    }

    pub fn draw_call(&self) -> DrawCall {
        DrawCall {
            primitive: Primitive::Triangles,
            // Bounded by `new`.
            index_count: self.indices.len() as i32,
            index_type: IndexType::U16,
        }
    }
}
