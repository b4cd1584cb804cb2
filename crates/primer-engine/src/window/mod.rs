//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, creates an OpenGL ES context for the
//! window through `glutin`, and drives a [`crate::core::App`] against it.

mod config;
mod runtime;

pub use config::{PixelFormat, RuntimeConfig, SurfaceInit};
pub use runtime::Runtime;
