//! Cone primitive, standing upright on a capped base.

use std::sync::Arc;

use crate::cylinder::{cap_hit, revolution_uv};
use crate::hittable::{HitRecord, Hittable};
use glint_core::{Material, Texture};
use glint_math::{Interval, Ray, Vec3};

/// A cone whose base disk of `radius` is centered on `base` and whose apex
/// lies `height` above it.
pub struct Cone {
    base: Vec3,
    radius: f32,
    height: f32,
    material: Material,
    texture: Option<Arc<Texture>>,
}

impl Cone {
    pub fn new(base: Vec3, radius: f32, height: f32, material: Material) -> Self {
        Self {
            base,
            radius: radius.max(0.0),
            height: height.max(f32::MIN_POSITIVE),
            material,
            texture: None,
        }
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Outward side normal at a point relative to the base.
    fn side_normal(&self, local: Vec3) -> Vec3 {
        let k = self.radius / self.height;
        Vec3::new(local.x, k * k * (self.height - local.y), local.z)
            .try_normalize()
            .unwrap_or(Vec3::Y)
    }
}

impl Hittable for Cone {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let o = ray.origin() - self.base;
        let d = ray.direction();
        let k2 = (self.radius / self.height).powi(2);
        let above = self.height - o.y;

        // x^2 + z^2 = k^2 (height - y)^2 along the ray
        let a = d.x * d.x + d.z * d.z - k2 * d.y * d.y;
        let h = o.x * d.x + o.z * d.z + k2 * above * d.y;
        let c = o.x * o.x + o.z * o.z - k2 * above * above;

        let roots = if a.abs() < 1e-12 {
            // Ray parallel to the slant: one crossing at most
            if h.abs() < 1e-12 {
                [None, None]
            } else {
                [Some(-c / (2.0 * h)), None]
            }
        } else {
            let discriminant = h * h - a * c;
            if discriminant < 0.0 {
                [None, None]
            } else {
                let sqrtd = discriminant.sqrt();
                let (t0, t1) = ((-h - sqrtd) / a, (-h + sqrtd) / a);
                [Some(t0.min(t1)), Some(t0.max(t1))]
            }
        };

        let mut closest = ray_t.max;
        let mut normal = None;

        for t in roots.into_iter().flatten() {
            let y = o.y + t * d.y;
            if Interval::new(ray_t.min, closest).surrounds(t) && (0.0..=self.height).contains(&y) {
                closest = t;
                normal = Some(self.side_normal(o + t * d));
                break;
            }
        }

        if let Some(t) = cap_hit(o, d, 0.0, self.radius, Interval::new(ray_t.min, closest)) {
            closest = t;
            normal = Some(Vec3::NEG_Y);
        }

        let Some(normal) = normal else {
            return false;
        };

        rec.t = closest;
        rec.p = ray.at(closest);
        rec.normal = normal;
        (rec.u, rec.v) = revolution_uv(rec.p - self.base, normal, self.radius, self.height);
        rec.material = &self.material;
        rec.texture = self.texture.as_deref();

        true
    }
}
