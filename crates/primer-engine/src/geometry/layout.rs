use std::mem::size_of;

use bytemuck::{Pod, Zeroable};

/// Attribute location of the vertex position in every sample shader.
pub const POSITION_INDEX: u32 = 0;
/// Attribute location of the vertex color in every sample shader.
pub const COLOR_INDEX: u32 = 1;

/// x, y, z
pub const POSITION_COMPONENTS: usize = 3;
/// r, g, b, a
pub const COLOR_COMPONENTS: usize = 4;

pub const POSITION_BYTES: usize = POSITION_COMPONENTS * size_of::<f32>();
pub const COLOR_BYTES: usize = COLOR_COMPONENTS * size_of::<f32>();

/// One float attribute stream as seen by `glVertexAttribPointer`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexLayout {
    pub index: u32,
    pub components: usize,
    /// Bytes between consecutive vertices.
    pub stride: usize,
    /// Byte offset of the first component.
    pub offset: usize,
}

impl VertexLayout {
    /// Position and color interleaved in one stream (`ColoredVertex` order).
    pub const fn interleaved() -> [Self; 2] {
        [
            Self {
                index: POSITION_INDEX,
                components: POSITION_COMPONENTS,
                stride: ColoredVertex::STRIDE,
                offset: 0,
            },
            Self {
                index: COLOR_INDEX,
                components: COLOR_COMPONENTS,
                stride: ColoredVertex::STRIDE,
                offset: POSITION_BYTES,
            },
        ]
    }

    /// Position and color in separate, tightly packed streams.
    pub const fn separate() -> [Self; 2] {
        [
            Self {
                index: POSITION_INDEX,
                components: POSITION_COMPONENTS,
                stride: POSITION_BYTES,
                offset: 0,
            },
            Self {
                index: COLOR_INDEX,
                components: COLOR_COMPONENTS,
                stride: COLOR_BYTES,
                offset: 0,
            },
        ]
    }
}

/// Interleaved vertex: position followed by color.
///
/// `Pod` rules out padding, and the assertion below pins the size, so the
/// byte stream handed to GL is exactly `[x y z r g b a]` per vertex.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct ColoredVertex {
    pub position: [f32; POSITION_COMPONENTS],
    pub color: [f32; COLOR_COMPONENTS],
}

const _: () = assert!(size_of::<ColoredVertex>() == POSITION_BYTES + COLOR_BYTES);

impl ColoredVertex {
    pub const STRIDE: usize = size_of::<Self>();

    #[inline]
    pub const fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}
