//! Shader compilation and program linking.
//!
//! Both steps follow the same discipline: every object created on the way is
//! released again on every error path, and driver diagnostics are logged and
//! carried in the returned [`BuildError`].

mod compile;
mod error;
mod program;

pub use compile::{Shader, compile};
pub use error::{BuildError, GlObject};
pub use program::{Program, build_program};
