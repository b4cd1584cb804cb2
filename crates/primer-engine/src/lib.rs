//! Primer engine crate.
//!
//! Shader compile and link, geometry upload, and the per-sample frame driver
//! for the OpenGL ES 3.0 samples, plus the window runtime that hosts them.

pub mod color;
pub mod core;
pub mod driver;
pub mod geometry;
pub mod gl;
pub mod logging;
pub mod shader;
pub mod window;
