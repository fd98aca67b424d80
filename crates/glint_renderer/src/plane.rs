//! Infinite plane primitive.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use glint_core::{Material, Texture};
use glint_math::{Interval, Ray, Vec3};

/// An infinite plane through `point` with unit `normal`.
///
/// Texture coordinates repeat every `tile_size` world units along two
/// tangent axes, so a texture tiles across the whole plane.
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    u_axis: Vec3,
    v_axis: Vec3,
    tile_size: f32,
    material: Material,
    texture: Option<Arc<Texture>>,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3, material: Material) -> Self {
        let normal = normal.normalize();
        let helper = if normal.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
        let v_axis = normal.cross(helper).normalize();
        let u_axis = v_axis.cross(normal);

        Self {
            point,
            normal,
            u_axis,
            v_axis,
            tile_size: 1.0,
            material,
            texture: None,
        }
    }

    pub fn with_tile_size(mut self, tile_size: f32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }
}

impl Hittable for Plane {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let denom = self.normal.dot(ray.direction());

        // Ray is parallel to the plane
        if denom.abs() < 1e-8 {
            return false;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        if !ray_t.surrounds(t) {
            return false;
        }

        let p = ray.at(t);
        let local = (p - self.point) / self.tile_size;

        rec.t = t;
        rec.p = p;
        rec.normal = self.normal;
        rec.u = local.dot(self.u_axis).rem_euclid(1.0);
        rec.v = local.dot(self.v_axis).rem_euclid(1.0);
        rec.material = &self.material;
        rec.texture = self.texture.as_deref();

        true
    }
}
