//! Capped cylinder primitive, standing upright on its base.

use std::f32::consts::PI;
use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use glint_core::{Material, Texture};
use glint_math::{Interval, Ray, Vec3};

/// Ray parameter where `origin + t * direction` crosses the disk of
/// `radius` around the Y axis at height `y`. Coordinates are relative to
/// the shape's base.
pub(crate) fn cap_hit(origin: Vec3, direction: Vec3, y: f32, radius: f32, ray_t: Interval) -> Option<f32> {
    if direction.y.abs() < 1e-8 {
        return None;
    }

    let t = (y - origin.y) / direction.y;
    if !ray_t.surrounds(t) {
        return None;
    }

    let p = origin + t * direction;
    (p.x * p.x + p.z * p.z <= radius * radius).then_some(t)
}

/// UV of a point on a Y-axis surface of revolution, relative to its base.
///
/// Sides map (angle, height fraction); caps map the disk onto the unit square.
pub(crate) fn revolution_uv(local: Vec3, normal: Vec3, radius: f32, height: f32) -> (f32, f32) {
    if normal.x == 0.0 && normal.z == 0.0 {
        ((local.x / radius + 1.0) * 0.5, (local.z / radius + 1.0) * 0.5)
    } else {
        let u = ((-local.z).atan2(local.x) + PI) / (2.0 * PI);
        (u, (local.y / height).clamp(0.0, 1.0))
    }
}

/// A cylinder of `radius` around the vertical axis through `base`,
/// `height` tall, closed by disks at both ends.
pub struct Cylinder {
    base: Vec3,
    radius: f32,
    height: f32,
    material: Material,
    texture: Option<Arc<Texture>>,
}

impl Cylinder {
    pub fn new(base: Vec3, radius: f32, height: f32, material: Material) -> Self {
        Self {
            base,
            radius: radius.max(0.0),
            height: height.max(0.0),
            material,
            texture: None,
        }
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }
}

impl Hittable for Cylinder {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let o = ray.origin() - self.base;
        let d = ray.direction();
        let r = self.radius;

        let mut closest = ray_t.max;
        let mut normal = None;

        // Side wall
        let a = d.x * d.x + d.z * d.z;
        if a > 1e-12 {
            let h = o.x * d.x + o.z * d.z;
            let c = o.x * o.x + o.z * o.z - r * r;
            let discriminant = h * h - a * c;

            if discriminant >= 0.0 {
                let sqrtd = discriminant.sqrt();
                for t in [(-h - sqrtd) / a, (-h + sqrtd) / a] {
                    let y = o.y + t * d.y;
                    if Interval::new(ray_t.min, closest).surrounds(t) && (0.0..=self.height).contains(&y) {
                        closest = t;
                        normal = Some(Vec3::new(o.x + t * d.x, 0.0, o.z + t * d.z) / r);
                        break;
                    }
                }
            }
        }

        for (y, cap_normal) in [(0.0, Vec3::NEG_Y), (self.height, Vec3::Y)] {
            if let Some(t) = cap_hit(o, d, y, r, Interval::new(ray_t.min, closest)) {
                closest = t;
                normal = Some(cap_normal);
            }
        }

        let Some(normal) = normal else {
            return false;
        };

        rec.t = closest;
        rec.p = ray.at(closest);
        rec.normal = normal;
        (rec.u, rec.v) = revolution_uv(rec.p - self.base, normal, r, self.height);
        rec.material = &self.material;
        rec.texture = self.texture.as_deref();

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::material::SILVER;

    fn unit_cylinder() -> Cylinder {
        Cylinder::new(Vec3::ZERO, 1.0, 2.0, SILVER)
    }

    #[test]
    fn test_side_hit() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 5.0), Vec3::NEG_Z);
        let cylinder = unit_cylinder();
        let mut rec = HitRecord::default();

        assert!(cylinder.hit(&ray, Interval::FORWARD, &mut rec));
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
        assert!((rec.v - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_top_cap_hit() {
        let ray = Ray::new(Vec3::new(0.2, 5.0, 0.0), Vec3::NEG_Y);
        let cylinder = unit_cylinder();
        let mut rec = HitRecord::default();

        assert!(cylinder.hit(&ray, Interval::FORWARD, &mut rec));
        assert!((rec.t - 3.0).abs() < 1e-5);
        assert_eq!(rec.normal, Vec3::Y);
        assert!((rec.u - 0.6).abs() < 1e-5);
        assert!((rec.v - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_bottom_cap_hit() {
        let ray = Ray::new(Vec3::new(0.0, -3.0, 0.0), Vec3::Y);
        let cylinder = unit_cylinder();
        let mut rec = HitRecord::default();

        assert!(cylinder.hit(&ray, Interval::FORWARD, &mut rec));
        assert!((rec.t - 3.0).abs() < 1e-5);
        assert_eq!(rec.normal, Vec3::NEG_Y);
    }

    #[test]
    fn test_ray_above_the_top_misses() {
        let ray = Ray::new(Vec3::new(0.0, 3.0, 5.0), Vec3::NEG_Z);
        let cylinder = unit_cylinder();
        let mut rec = HitRecord::default();

        assert!(!cylinder.hit(&ray, Interval::FORWARD, &mut rec));
        assert!(!rec.is_hit());
    }

    #[test]
    fn test_inside_hit_keeps_outward_normal() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        let cylinder = unit_cylinder();
        let mut rec = HitRecord::default();

        assert!(cylinder.hit(&ray, Interval::FORWARD, &mut rec));
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!((rec.normal - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_uv_range() {
        let cylinder = unit_cylinder();
        for direction in [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z] {
            let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0) - 4.0 * direction, direction);
            let mut rec = HitRecord::default();
            assert!(cylinder.hit(&ray, Interval::FORWARD, &mut rec));
            assert!((0.0..=1.0).contains(&rec.u), "u={} for {:?}", rec.u, direction);
            assert!((rec.v - 0.25).abs() < 1e-5);
        }
    }
}
