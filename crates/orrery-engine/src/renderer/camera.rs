use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::error::{EngineError, EngineResult};

/// Default cap on the device pixel ratio. Higher densities cost fill rate
/// without a visible gain on a full-screen decorative canvas.
pub const DEFAULT_MAX_PIXEL_RATIO: f32 = 2.0;

/// Drawable surface size as reported by the host window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f32,
    /// Height in CSS pixels.
    pub height: f32,
    /// Device pixel ratio actually used for the backing store.
    pub pixel_ratio: f32,
    max_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, max_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
            max_pixel_ratio,
        }
    }

    /// Apply a window resize. The pixel ratio is capped at the configured max.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> EngineResult<()> {
        if !(width > 0.0 && height > 0.0) {
            return Err(EngineError::InvalidViewport { width, height });
        }
        self.width = width;
        self.height = height;
        self.pixel_ratio = if device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(self.max_pixel_ratio)
        } else {
            1.0
        };
        Ok(())
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Perspective camera settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 25.0,
            near: 0.1,
            far: 100.0,
            position: Vec3::new(0.0, 0.0, 9.0),
            target: Vec3::ZERO,
        }
    }
}

/// Perspective camera for 3D rendering. Right-handed, Y-up.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub config: CameraConfig,
    /// Width / height of the viewport; updated on resize.
    pub aspect: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 32;
}

impl PerspectiveCamera {
    pub fn new(config: CameraConfig, aspect: f32) -> Self {
        Self { config, aspect }
    }

    /// Track the viewport's aspect ratio (call after every resize).
    pub fn update_aspect(&mut self, viewport: &Viewport) {
        self.aspect = viewport.aspect();
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fov_y_degrees.to_radians(),
            self.aspect,
            self.config.near,
            self.config.far,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.config.position, self.config.target, Vec3::Y)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix().to_cols_array_2d(),
        }
    }
}
