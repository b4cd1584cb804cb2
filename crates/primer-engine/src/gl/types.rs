use std::fmt;
use std::num::NonZeroU32;

macro_rules! gl_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Wraps a raw GL name. Returns `None` for the reserved name `0`.
            #[inline]
            pub const fn from_raw(raw: u32) -> Option<Self> {
                match NonZeroU32::new(raw) {
                    Some(id) => Some(Self(id)),
                    None => None,
                }
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0.get()
            }
        }
    };
}

gl_handle!(
    /// Name of a shader object.
    ShaderId
);
gl_handle!(
    /// Name of a program object.
    ProgramId
);
gl_handle!(
    /// Name of a buffer object.
    BufferId
);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    #[inline]
    pub(crate) const fn to_gl(self) -> u32 {
        match self {
            Self::Vertex => gl::VERTEX_SHADER,
            Self::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferTarget {
    /// `GL_ARRAY_BUFFER`: vertex attribute data.
    Array,
    /// `GL_ELEMENT_ARRAY_BUFFER`: index data.
    ElementArray,
}

impl BufferTarget {
    #[inline]
    pub(crate) const fn to_gl(self) -> u32 {
        match self {
            Self::Array => gl::ARRAY_BUFFER,
            Self::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferUsage {
    /// Written once, drawn many times.
    StaticDraw,
}

impl BufferUsage {
    #[inline]
    pub(crate) const fn to_gl(self) -> u32 {
        match self {
            Self::StaticDraw => gl::STATIC_DRAW,
        }
    }
}

/// Where an attribute pointer reads from.
#[derive(Debug, Copy, Clone)]
pub enum AttribSource<'a> {
    /// Client-side array in host memory (no `ARRAY_BUFFER` bound).
    Host(&'a [u8]),
    /// The buffer currently bound to `ARRAY_BUFFER`.
    Bound,
}

/// Where `draw_elements` reads indices from.
#[derive(Debug, Copy, Clone)]
pub enum IndexSource<'a> {
    /// Client-side indices (no `ELEMENT_ARRAY_BUFFER` bound).
    Host(&'a [u16]),
    /// The buffer currently bound to `ELEMENT_ARRAY_BUFFER`, from offset 0.
    Bound,
}
