//! Host geometry and its upload to the GPU.
//!
//! Convention shared by every sample:
//! - attribute 0 is a 3-component position, attribute 1 a 4-component color
//! - indices are 16-bit, primitives are triangles
//!
//! [`GeometryBuffer`] implements the three upload strategies; the choice is
//! fixed when the buffer is created.

mod layout;
mod mesh;
mod uploader;

pub use layout::{
    COLOR_BYTES, COLOR_COMPONENTS, COLOR_INDEX, ColoredVertex, POSITION_BYTES,
    POSITION_COMPONENTS, POSITION_INDEX, VertexLayout,
};
pub use mesh::{DrawCall, IndexType, Mesh, MeshError, Primitive};
pub use uploader::{GeometryBuffer, GeometryError, ParseStrategyError, Strategy};
