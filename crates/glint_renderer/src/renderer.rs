//! Frame driver.
//!
//! Walks every pixel, asks the camera for one ray (or a 3x3 grid of rays
//! when supersampling), traces it and writes the clamped color into a
//! frame buffer.

use std::path::Path;
use std::time::Instant;

use glint_math::{clamp_color, Color};

use crate::bucket::{render_parallel, DEFAULT_BUCKET_SIZE};
use crate::{RayTracer, Scene, TransparencyOrder};

/// Distance, in pixels, of the outer supersampling rays from the pixel center.
pub const SUPERSAMPLE_OFFSET: f32 = 1.0 / 3.0;

/// Rays traced per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Antialiasing {
    /// One ray through the pixel center.
    #[default]
    Single,
    /// Nine rays on a 3x3 grid around the center, averaged.
    Supersample3x3,
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Reflection recursion budget
    pub max_depth: u32,
    pub antialiasing: Antialiasing,
    pub transparency: TransparencyOrder,
    /// Render buckets on the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            antialiasing: Antialiasing::Single,
            transparency: TransparencyOrder::DistanceToLight,
            parallel: true,
        }
    }
}

/// Final image in linear RGB.
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    /// Create a new frame buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y), clamping each channel to [0, 1].
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = clamp_color(color);
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Write the image as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.to_rgba8(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )
    }
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let c = clamp_color(color) * 255.0;
    [c.x as u8, c.y as u8, c.z as u8, 255]
}

/// Color of pixel (x, y), before clamping.
pub fn render_pixel(scene: &Scene, tracer: &RayTracer, x: u32, y: u32, config: &RenderConfig) -> Color {
    let camera = &scene.camera;
    let (x, y) = (x as f32, y as f32);

    match config.antialiasing {
        Antialiasing::Single => tracer.trace(&camera.get_ray(x, y), scene, config.max_depth),
        Antialiasing::Supersample3x3 => {
            let mut sum = Color::ZERO;
            for dy in [-SUPERSAMPLE_OFFSET, 0.0, SUPERSAMPLE_OFFSET] {
                for dx in [-SUPERSAMPLE_OFFSET, 0.0, SUPERSAMPLE_OFFSET] {
                    let ray = camera.get_ray(x + dx, y + dy);
                    sum += tracer.trace(&ray, scene, config.max_depth);
                }
            }
            sum / 9.0
        }
    }
}

/// Render the scene single-threaded, one row after another.
pub fn render_serial(scene: &Scene, config: &RenderConfig) -> FrameBuffer {
    let tracer = RayTracer::new(config.transparency);
    let mut frame = FrameBuffer::new(scene.camera.image_width, scene.camera.image_height);

    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let color = render_pixel(scene, &tracer, x, y, config);
            frame.set_pixel_color(x, y, color);
        }
    }

    frame
}

/// Render the entire scene, in parallel buckets if `config.parallel` is set.
pub fn render(scene: &Scene, config: &RenderConfig) -> FrameBuffer {
    log::info!(
        "Rendering {}x{}, depth {}, {:?}{}",
        scene.camera.image_width,
        scene.camera.image_height,
        config.max_depth,
        config.antialiasing,
        if config.parallel { ", parallel" } else { "" }
    );

    let start = Instant::now();
    let frame = if config.parallel {
        render_parallel(scene, config, DEFAULT_BUCKET_SIZE)
    } else {
        render_serial(scene, config)
    };
    log::info!("Rendered in {:?}", start.elapsed());

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, Sphere};
    use glint_core::{material::SILVER, LightColor, PositionalLight};
    use glint_math::Vec3;

    fn small_scene() -> Scene {
        let mut camera = Camera::new()
            .with_resolution(10, 10)
            .with_position(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y);
        camera.initialize();

        let mut scene = Scene::new(camera, Color::new(0.5, 0.7, 1.0));
        scene.add_opaque(Box::new(Sphere::new(Vec3::ZERO, 0.5, SILVER)));
        scene.add_light(PositionalLight::new(Vec3::new(2.0, 1.0, 3.0), LightColor::WHITE));
        scene
    }

    #[test]
    fn test_set_pixel_color_clamps() {
        let mut frame = FrameBuffer::new(2, 1);
        frame.set_pixel_color(1, 0, Color::new(2.0, -1.0, 0.5));
        assert_eq!(frame.get(1, 0), Color::new(1.0, 0.0, 0.5));
        assert_eq!(frame.get(0, 0), Color::ZERO);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_index_does_not_wrap_for_large_frames() {
        let frame = FrameBuffer {
            width: 100_000,
            height: 100_000,
            pixels: Vec::new(),
        };
        assert_eq!(frame.index(99_999, 99_999), 9_999_999_999);
    }

    #[test]
    fn test_color_to_rgba() {
        assert_eq!(color_to_rgba(Color::ONE), [255, 255, 255, 255]);
        assert_eq!(color_to_rgba(Color::new(3.0, -2.0, 0.0)), [255, 0, 0, 255]);
        assert_eq!(FrameBuffer::new(3, 2).to_rgba8().len(), 24);
    }

    #[test]
    fn test_render_pixel() {
        let scene = small_scene();
        let tracer = RayTracer::default();
        let config = RenderConfig::default();

        // Center pixel hits the sphere, the corner sees the background
        let center = render_pixel(&scene, &tracer, 5, 5, &config);
        let corner = render_pixel(&scene, &tracer, 0, 0, &config);
        assert_ne!(center, scene.background);
        assert_eq!(corner, scene.background);
    }

    #[test]
    fn test_supersampling_background_is_unchanged() {
        let scene = small_scene();
        let config = RenderConfig {
            antialiasing: Antialiasing::Supersample3x3,
            ..RenderConfig::default()
        };

        let corner = render_pixel(&scene, &RayTracer::default(), 0, 0, &config);
        assert!((corner - scene.background).length() < 1e-6);
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let scene = small_scene();
        let serial = render(&scene, &RenderConfig { parallel: false, ..RenderConfig::default() });
        let parallel = render(&scene, &RenderConfig::default());

        assert_eq!(serial.to_rgba8(), parallel.to_rgba8());
    }
}
