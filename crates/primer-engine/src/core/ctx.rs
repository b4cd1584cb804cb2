use crate::gl::GlApi;

/// Drawable size in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `(width, height)` clamped into the `GLsizei` range.
    #[inline]
    pub fn to_gl(self) -> (i32, i32) {
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        (clamp(self.width), clamp(self.height))
    }
}

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    pub gl: &'a dyn GlApi,
    pub surface: SurfaceSize,
    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}
