use std::num::NonZeroU32;

use anyhow::{Context, Result, anyhow};
use glutin::config::Config;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use raw_window_handle::HasWindowHandle;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, SurfaceSize};
use crate::gl::NativeGl;

use super::config::{PixelFormat, RuntimeConfig, SurfaceInit};

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, drives `app` until the window closes or the app asks
    /// to exit, and returns the first fatal error (including a failed
    /// `App::init`).
    pub fn run<A>(config: RuntimeConfig, surface_init: SurfaceInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, surface_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Window plus its current GL context. Fields drop top to bottom, so the
/// surface and context go before the window they render into.
struct GlWindow {
    gl: NativeGl,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl GlWindow {
    fn create(
        event_loop: &ActiveEventLoop,
        config: &RuntimeConfig,
        surface_init: SurfaceInit,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(true);

        let (major, minor) = surface_init.gles_version;
        let template = config.pixel_format.config_template(major);
        let multisample = config.pixel_format.contains(PixelFormat::MULTISAMPLE);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, template, |configs| pick_config(configs, multisample))
            .map_err(|err| anyhow!("failed to find a matching GL config: {err}"))?;
        let window = window.context("display builder did not create a window")?;

        let raw_handle = window.window_handle().ok().map(|handle| handle.as_raw());
        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(major, minor))))
            .build(raw_handle);

        let display = gl_config.display();
        let context = unsafe { display.create_context(&gl_config, &context_attrs) }
            .with_context(|| format!("failed to create an OpenGL ES {major}.{minor} context"))?;

        let surface_attrs = window
            .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
            .context("failed to get window handle for GL surface")?;
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attrs) }
            .context("failed to create GL window surface")?;

        let context = context
            .make_current(&surface)
            .context("failed to make GL context current")?;

        if let Err(err) = surface.set_swap_interval(&context, surface_init.swap_interval()) {
            log::warn!("failed to set swap interval (vsync: {}): {err}", surface_init.vsync);
        }

        // The context stays current on this thread for the lifetime of `GlWindow`.
        let gl = unsafe { NativeGl::load(|symbol| display.get_proc_address(symbol)) };

        log::info!(
            "window created: {:?} {}x{} ({:?}, {} samples)",
            config.title,
            config.width,
            config.height,
            config.pixel_format,
            gl_config.num_samples(),
        );

        Ok(Self {
            gl,
            surface,
            context,
            window,
        })
    }

    fn surface_size(&self) -> SurfaceSize {
        let size = self.window.inner_size();
        SurfaceSize::new(size.width, size.height)
    }

    fn resize(&self, size: PhysicalSize<u32>) {
        // Minimized windows report 0x0; keep the old surface until restored.
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };
        self.surface.resize(&self.context, width, height);
    }
}

fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>, multisample: bool) -> Config {
    let picked = if multisample {
        configs.max_by_key(|config| config.num_samples())
    } else {
        configs.min_by_key(|config| config.num_samples())
    };
    picked.expect("display offered no GL configs for the requested template")
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    surface_init: SurfaceInit,
    app: A,

    window: Option<GlWindow>,
    initialized: bool,
    shut_down: bool,
    frame_index: u64,
    error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, surface_init: SurfaceInit, app: A) -> Self {
        Self {
            config,
            surface_init,
            app,
            window: None,
            initialized: false,
            shut_down: false,
            frame_index: 0,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.finish();
        event_loop.exit();
    }

    /// Runs `App::shutdown` at most once, and only after a successful `init`.
    fn finish(&mut self) {
        if !self.initialized || self.shut_down {
            return;
        }
        self.shut_down = true;
        if let Some(window) = self.window.as_ref() {
            self.app.shutdown(&window.gl);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.initialized || self.shut_down {
            return;
        }
        let Some(window) = self.window.as_ref() else {
            return;
        };

        let mut ctx = FrameCtx {
            gl: &window.gl,
            surface: window.surface_size(),
            frame_index: self.frame_index,
        };
        let control = self.app.on_frame(&mut ctx);
        self.frame_index += 1;

        if let Err(err) = window.surface.swap_buffers(&window.context) {
            self.fail(event_loop, anyhow!(err).context("failed to swap buffers"));
            return;
        }

        if control == AppControl::Exit {
            self.finish();
            event_loop.exit();
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.shut_down {
            return;
        }

        let window = match GlWindow::create(event_loop, &self.config, self.surface_init) {
            Ok(window) => window,
            Err(err) => {
                self.fail(event_loop, err);
                return;
            }
        };

        if let Err(err) = self.app.init(&window.gl) {
            self.window = Some(window);
            self.fail(event_loop, err.context("sample initialization failed"));
            return;
        }
        self.initialized = true;
        log::info!("sample running");

        window.window.request_redraw();
        self.window = Some(window);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; vsync paces the loop.
        if let Some(window) = self.window.as_ref() {
            if self.initialized && !self.shut_down {
                window.window.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.finish();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(window) = self.window.as_ref() {
                    window.resize(size);
                    window.window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.finish();
        self.window = None;
    }
}
