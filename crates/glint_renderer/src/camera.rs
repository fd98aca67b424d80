//! Camera for ray generation.

use glint_core::{CameraDescription, Projection};
use glint_math::{Ray, Vec3};

/// Camera for generating rays into the scene.
///
/// Pixel (0, 0) is the top-left corner of the image. Integer pixel
/// coordinates address pixel centers; fractional coordinates address
/// points in between, which is how supersampling offsets its rays.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    projection: Projection,

    // Cached computed values (set by initialize())
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 640,
            image_height: 480,
            look_from: Vec3::new(0.0, 0.0, 0.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            projection: Projection::default(),
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            w: Vec3::Z,
        }
    }

    /// Build and initialize a camera from a scene file entry.
    pub fn from_description(desc: &CameraDescription) -> Self {
        let mut camera = Self::new()
            .with_resolution(desc.width, desc.height)
            .with_position(desc.position, desc.look_at, desc.up)
            .with_projection(desc.projection);
        camera.initialize();
        camera
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set the projection.
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        let width = self.image_width as f32;
        let height = self.image_height as f32;

        // Camera basis vectors
        self.w = (self.look_from - self.look_at).normalize();
        let u = self.vup.cross(self.w).normalize();
        let v = self.w.cross(u);

        // The image plane sits one unit in front of the eye for perspective
        // rays, and passes through the eye for parallel ones.
        let (viewport_width, viewport_height, plane_distance) = match self.projection {
            Projection::Perspective { vfov_degrees } => {
                let h = (vfov_degrees.to_radians() / 2.0).tan();
                let viewport_height = 2.0 * h;
                (viewport_height * width / height, viewport_height, 1.0)
            }
            Projection::Orthographic { pixels_per_unit } => {
                (width / pixels_per_unit, height / pixels_per_unit, 0.0)
            }
        };

        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        self.pixel_delta_u = viewport_u / width;
        self.pixel_delta_v = viewport_v / height;

        let viewport_upper_left =
            self.look_from - plane_distance * self.w - viewport_u / 2.0 - viewport_v / 2.0;

        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);
    }

    /// Generate the ray through image position (x, y).
    pub fn get_ray(&self, x: f32, y: f32) -> Ray {
        let pixel_sample = self.pixel00_loc + x * self.pixel_delta_u + y * self.pixel_delta_v;

        match self.projection {
            Projection::Perspective { .. } => Ray::new(self.look_from, pixel_sample - self.look_from),
            Projection::Orthographic { .. } => Ray::new(pixel_sample, -self.w),
        }
    }

    /// Eye position, used for view vectors in shading.
    pub fn eye(&self) -> Vec3 {
        self.look_from
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
