//! Core sample-facing contracts.
//!
//! This module defines the interface between the runtime (window + GL
//! context + event loop) and the samples. Samples see only a [`GlApi`]
//! handle and the surface size; nothing from winit or glutin leaks through.
//!
//! [`GlApi`]: crate::gl::GlApi

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, SurfaceSize};
