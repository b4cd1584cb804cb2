use std::fmt;
use std::num::NonZeroU32;
use std::ops::BitOr;

use glutin::config::{Api, ConfigTemplateBuilder};
use glutin::surface::SwapInterval;

/// Framebuffer capabilities requested for the window.
///
/// Flags combine with `|`, e.g. `PixelFormat::RGB | PixelFormat::DEPTH`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct PixelFormat(u8);

impl PixelFormat {
    pub const RGB: Self = Self(0);
    pub const ALPHA: Self = Self(1 << 0);
    pub const DEPTH: Self = Self(1 << 1);
    pub const STENCIL: Self = Self(1 << 2);
    pub const MULTISAMPLE: Self = Self(1 << 3);

    const NAMED: [(Self, &'static str); 4] = [
        (Self::ALPHA, "ALPHA"),
        (Self::DEPTH, "DEPTH"),
        (Self::STENCIL, "STENCIL"),
        (Self::MULTISAMPLE, "MULTISAMPLE"),
    ];

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Config template for these flags: alpha 8, depth 24, stencil 8, 4x MSAA.
    pub(crate) fn config_template(self, gles_major: u8) -> ConfigTemplateBuilder {
        let api = if gles_major >= 3 { Api::GLES3 } else { Api::GLES2 };
        let mut template = ConfigTemplateBuilder::new().with_api(api);
        if self.contains(Self::ALPHA) {
            template = template.with_alpha_size(8);
        }
        if self.contains(Self::DEPTH) {
            template = template.with_depth_size(24);
        }
        if self.contains(Self::STENCIL) {
            template = template.with_stencil_size(8);
        }
        if self.contains(Self::MULTISAMPLE) {
            template = template.with_multisampling(4);
        }
        template
    }
}

impl Default for PixelFormat {
    fn default() -> Self {
        Self::RGB
    }
}

impl BitOr for PixelFormat {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RGB")?;
        for (flag, name) in Self::NAMED {
            if self.contains(flag) {
                write!(f, " | {name}")?;
            }
        }
        Ok(())
    }
}

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Initial inner width in physical pixels.
    pub width: u32,
    pub height: u32,
    pub pixel_format: PixelFormat,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "primer".to_string(),
            width: 320,
            height: 240,
            pixel_format: PixelFormat::RGB,
        }
    }
}

/// GL context initialization options.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SurfaceInit {
    /// Requested OpenGL ES `(major, minor)` version.
    pub gles_version: (u8, u8),
    /// Wait for vblank on swap.
    pub vsync: bool,
}

impl SurfaceInit {
    /// One vblank per swap with vsync, otherwise swap immediately.
    pub(crate) fn swap_interval(self) -> SwapInterval {
        if self.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        }
    }
}

impl Default for SurfaceInit {
    fn default() -> Self {
        Self {
            gles_version: (3, 0),
            vsync: true,
        }
    }
}
