use std::fmt;

use crate::core::{App, AppControl, FrameCtx, SurfaceSize};
use crate::geometry::{DrawCall, GeometryBuffer, GeometryError};
use crate::gl::GlApi;
use crate::shader::{BuildError, Program, build_program};

use super::config::SampleConfig;

/// Lifecycle of one sample instance.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
    Running,
    ShutDown,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::Running => "running",
            Self::ShutDown => "shut down",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    Build(BuildError),
    /// `init` was called outside `Uninitialized`.
    InvalidState(Lifecycle),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Build(err) => write!(f, "sample failed to start: {err}"),
            Self::InvalidState(state) => write!(f, "cannot initialize a sample that is {state}"),
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Build(err) => Some(err),
            Self::InvalidState(_) => None,
        }
    }
}

impl From<BuildError> for InitError {
    fn from(err: BuildError) -> Self {
        Self::Build(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// `draw` was called before `init` succeeded or after `shutdown`.
    NotRunning(Lifecycle),
    Geometry(GeometryError),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRunning(state) => write!(f, "cannot draw a sample that is {state}"),
            Self::Geometry(err) => write!(f, "draw failed: {err}"),
        }
    }
}

impl std::error::Error for FrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Geometry(err) => Some(err),
            Self::NotRunning(_) => None,
        }
    }
}

impl From<GeometryError> for FrameError {
    fn from(err: GeometryError) -> Self {
        Self::Geometry(err)
    }
}

/// Per-sample state: program, geometry buffers and lifecycle.
///
/// Drives `Uninitialized -> Initialized -> Running -> ShutDown`. GPU objects
/// are only ever held between a successful `init` and `shutdown`.
#[derive(Debug)]
pub struct FrameDriver {
    config: SampleConfig,
    lifecycle: Lifecycle,
    program: Option<Program>,
    geometry: Option<GeometryBuffer>,
}

impl FrameDriver {
    pub fn new(config: SampleConfig) -> Self {
        Self {
            config,
            lifecycle: Lifecycle::Uninitialized,
            program: None,
            geometry: None,
        }
    }

    #[inline]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Whether the geometry has been uploaded to GPU buffers.
    pub fn is_populated(&self) -> bool {
        self.geometry.as_ref().is_some_and(GeometryBuffer::is_populated)
    }

    /// Builds the program and sets the clear color.
    ///
    /// On failure the driver stays `Uninitialized` and holds no GPU objects.
    pub fn init(&mut self, gl: &dyn GlApi) -> Result<(), InitError> {
        if self.lifecycle != Lifecycle::Uninitialized {
            return Err(InitError::InvalidState(self.lifecycle));
        }

        let shaders = &self.config.shaders;
        let program = build_program(gl, &shaders.vertex, &shaders.fragment)?;

        gl.clear_color(self.config.clear_color);

        self.program = Some(program);
        self.geometry = Some(GeometryBuffer::new(self.config.strategy));
        self.lifecycle = Lifecycle::Initialized;
        log::info!("sample initialized (strategy: {})", self.config.strategy);
        Ok(())
    }

    /// Renders one frame into a surface of `surface` size.
    pub fn draw(&mut self, gl: &dyn GlApi, surface: SurfaceSize) -> Result<DrawCall, FrameError> {
        if !matches!(self.lifecycle, Lifecycle::Initialized | Lifecycle::Running) {
            return Err(FrameError::NotRunning(self.lifecycle));
        }
        let (Some(program), Some(geometry)) = (self.program.as_ref(), self.geometry.as_mut())
        else {
            return Err(FrameError::NotRunning(self.lifecycle));
        };

        let (width, height) = surface.to_gl();
        gl.viewport(0, 0, width, height);
        gl.clear_color_buffer();
        program.activate(gl);

        let call = geometry.draw(gl, &self.config.mesh)?;
        self.lifecycle = Lifecycle::Running;
        Ok(call)
    }

    /// Releases the program and buffers. Safe to call more than once.
    pub fn shutdown(&mut self, gl: &dyn GlApi) {
        if self.lifecycle == Lifecycle::ShutDown {
            return;
        }
        if let Some(geometry) = self.geometry.take() {
            geometry.release(gl);
        }
        if let Some(program) = self.program.take() {
            gl.use_program(None);
            program.release(gl);
        }
        self.lifecycle = Lifecycle::ShutDown;
        log::info!("sample shut down");
    }
}

impl App for FrameDriver {
    fn init(&mut self, gl: &dyn GlApi) -> anyhow::Result<()> {
        FrameDriver::init(self, gl)?;
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        match self.draw(ctx.gl, ctx.surface) {
            Ok(_) => AppControl::Continue,
            Err(err) => {
                log::error!("frame {}: {err}", ctx.frame_index);
                AppControl::Exit
            }
        }
    }

    fn shutdown(&mut self, gl: &dyn GlApi) {
        FrameDriver::shutdown(self, gl);
    }
}
