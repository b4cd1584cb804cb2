//! Example 6-6: a per-vertex colored triangle through client-side arrays or
//! vertex buffer objects.
//!
//! Usage: `vertex_buffers [direct|aos|soa]` (default `aos`).

use anyhow::{Context, Result};
use primer_engine::driver::{FrameDriver, SampleConfig, ShaderPair};
use primer_engine::geometry::Strategy;
use primer_engine::logging::{LoggingConfig, init_logging};
use primer_engine::window::{PixelFormat, Runtime, RuntimeConfig, SurfaceInit};

const VERTEX_SHADER: &str = include_str!("../shaders/vertex_buffers.vert");
const FRAGMENT_SHADER: &str = include_str!("../shaders/colored.frag");

fn strategy_from_args() -> Result<Strategy> {
    match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<Strategy>()
            .context("usage: vertex_buffers [direct|aos|soa]"),
        None => Ok(Strategy::ArrayOfStructures),
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let strategy = strategy_from_args()?;
    log::info!("geometry upload strategy: {strategy}");

    let sample = FrameDriver::new(SampleConfig::colored_triangle(
        ShaderPair::new(VERTEX_SHADER, FRAGMENT_SHADER),
        strategy,
    ));

    let config = RuntimeConfig {
        title: "Example 6-6".to_string(),
        width: 320,
        height: 240,
        pixel_format: PixelFormat::RGB,
    };

    Runtime::run(config, SurfaceInit::default(), sample)
}
