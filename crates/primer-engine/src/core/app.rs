use crate::gl::GlApi;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Sample contract driven by the runtime.
///
/// Callback order: `init` once after the GL context is current, `on_frame`
/// once per redraw, `shutdown` once before the context goes away. `shutdown`
/// is not called when `init` failed.
pub trait App {
    /// Builds GPU state. An error aborts startup and is returned from
    /// `Runtime::run`.
    fn init(&mut self, gl: &dyn GlApi) -> anyhow::Result<()>;

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;

    /// Releases GPU state.
    fn shutdown(&mut self, gl: &dyn GlApi) {
        let _ = gl;
    }
}
