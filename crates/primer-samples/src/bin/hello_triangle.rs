//! Chapter 2: one triangle from a host-memory position array.

use anyhow::Result;
use primer_engine::driver::{HelloTriangle, ShaderPair};
use primer_engine::logging::{LoggingConfig, init_logging};
use primer_engine::window::{PixelFormat, Runtime, RuntimeConfig, SurfaceInit};

const VERTEX_SHADER: &str = include_str!("../shaders/hello_triangle.vert");
const FRAGMENT_SHADER: &str = include_str!("../shaders/colored.frag");

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Hello Triangle".to_string(),
        width: 320,
        height: 240,
        pixel_format: PixelFormat::RGB,
    };
    let sample = HelloTriangle::new(ShaderPair::new(VERTEX_SHADER, FRAGMENT_SHADER));

    Runtime::run(config, SurfaceInit::default(), sample)
}
