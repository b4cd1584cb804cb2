use std::borrow::Cow;

use crate::color::Color;
use crate::geometry::{Mesh, Strategy};

/// GLSL ES source for one vertex/fragment pair.
#[derive(Debug, Clone)]
pub struct ShaderPair {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ShaderPair {
    pub fn new(vertex: impl Into<Cow<'static, str>>, fragment: impl Into<Cow<'static, str>>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

/// Everything a [`FrameDriver`](super::FrameDriver) needs, fixed before `init`.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub shaders: ShaderPair,
    pub mesh: Mesh,
    pub strategy: Strategy,
    pub clear_color: Color,
}

impl SampleConfig {
    /// The colored-triangle setup of the vertex buffer sample.
    pub fn colored_triangle(shaders: ShaderPair, strategy: Strategy) -> Self {
        Self {
            shaders,
            mesh: Mesh::rgb_triangle(),
            strategy,
            clear_color: Color::WHITE.with_alpha(0.0),
        }
    }
}
