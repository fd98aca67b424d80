//! Glint Renderer - recursive Whitted-style ray tracing.
//!
//! Every pixel is one (or nine, when supersampling) call into
//! [`RayTracer::trace`], which combines nearest-hit search, Phong shading
//! with shadow feelers for each light, texture blending, transparency
//! compositing and recursive mirror reflection.

mod bucket;
mod camera;
mod cone;
mod cylinder;
mod hittable;
mod plane;
mod renderer;
mod scene;
mod shadow;
mod sphere;
mod tracer;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use cone::Cone;
pub use cylinder::Cylinder;
pub use hittable::{HitRecord, Hittable, HittableList, NO_HIT};
pub use plane::Plane;
pub use renderer::{
    color_to_rgba, render, render_pixel, render_serial, Antialiasing, FrameBuffer, RenderConfig,
    SUPERSAMPLE_OFFSET,
};
pub use scene::Scene;
pub use shadow::in_shadow;
pub use sphere::Sphere;
pub use tracer::{RayTracer, TransparencyOrder, REFLECTION_WEIGHT, TEXTURE_WEIGHT};
pub use triangle::Triangle;

/// Re-export math and scene data types
pub use glint_core::{Light, LightColor, Material, PositionalLight, SpotLight, Texture};
pub use glint_math::{Color, Interval, Ray, Vec3};
