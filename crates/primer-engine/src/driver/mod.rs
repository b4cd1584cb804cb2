//! Sample drivers: one sample's lifecycle from `init` to `shutdown`.
//!
//! Each driver owns its program and buffers explicitly; there is no
//! process-wide sample state. Both implement [`App`](crate::core::App), so a
//! configured driver can be handed straight to the runtime.
//!
//! - [`FrameDriver`]: indexed colored mesh through a chosen upload strategy
//! - [`HelloTriangle`]: the minimal non-indexed pipeline

mod config;
mod frame;
mod hello;

pub use config::{SampleConfig, ShaderPair};
pub use frame::{FrameDriver, FrameError, InitError, Lifecycle};
pub use hello::HelloTriangle;
