//! Hittable trait and HitRecord for ray-object intersection.
//!
//! This is the intersection provider the tracer is written against: a
//! linear scan over a list of objects that returns the nearest hit, or a
//! record whose `t` is the [`NO_HIT`] sentinel.

use glint_core::{material::GRAY_MATTE, Material, Texture};
use glint_math::{Interval, Ray, Vec3};

/// `t` value of a record that did not hit anything.
pub const NO_HIT: f32 = f32::MAX;

/// Material referenced by records that have not hit anything.
static DEFAULT_MATERIAL: Material = GRAY_MATTE;

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs, [`NO_HIT`] if none
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal. Shapes store the outward normal, which may
    /// face away from the ray; see [`HitRecord::orient_against`].
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Texture of the surface, if it has one
    pub texture: Option<&'a Texture>,
    /// UV texture coordinates
    pub u: f32,
    pub v: f32,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            t: NO_HIT,
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: &DEFAULT_MATERIAL,
            texture: None,
            u: 0.0,
            v: 0.0,
        }
    }
}

impl<'a> HitRecord<'a> {
    /// True if this record describes an actual intersection.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.t < NO_HIT
    }

    /// Flip the normal so it faces against the incoming ray.
    pub fn orient_against(&mut self, ray: &Ray) {
        if ray.direction().dot(self.normal) > 0.0 {
            self.normal = -self.normal;
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object strictly within the given interval.
    ///
    /// Returns true if hit, and fills in the hit record. On a miss the
    /// record is left untouched.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;
}

/// A list of hittable objects.
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Nearest intersection in front of the ray origin.
    ///
    /// Returns a record with `t == NO_HIT` when nothing is hit.
    pub fn find_intersection(&self, ray: &Ray) -> HitRecord<'_> {
        let mut rec = HitRecord::default();
        self.hit(ray, Interval::FORWARD, &mut rec);
        rec
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            let interval = Interval::new(ray_t.min, closest_so_far);
            if object.hit(ray, interval, rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sphere;
    use glint_core::material::{COPPER, SILVER};

    #[test]
    fn test_default_record_is_no_hit() {
        let rec = HitRecord::default();
        assert!(!rec.is_hit());
        assert_eq!(rec.t, f32::MAX);
    }

    #[test]
    fn test_orient_against_flips_normal() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rec = HitRecord {
            normal: Vec3::NEG_Z,
            ..HitRecord::default()
        };
        rec.orient_against(&ray);
        assert_eq!(rec.normal, Vec3::Z);

        // Already facing the ray: unchanged
        rec.orient_against(&ray);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_empty_list_misses() {
        let list = HittableList::new();
        let rec = list.find_intersection(&Ray::new(Vec3::ZERO, Vec3::NEG_Z));
        assert!(!rec.is_hit());
    }

    #[test]
    fn test_nearest_hit_wins() {
        let mut list = HittableList::new();
        list.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, COPPER)));
        list.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0, SILVER)));
        assert_eq!(list.len(), 2);

        let rec = list.find_intersection(&Ray::new(Vec3::ZERO, Vec3::NEG_Z));
        assert!(rec.is_hit());
        assert!((rec.t - 3.0).abs() < 1e-4);
        assert_eq!(*rec.material, SILVER);
    }

    #[test]
    fn test_objects_behind_origin_are_ignored() {
        let mut list = HittableList::new();
        list.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, SILVER)));

        let rec = list.find_intersection(&Ray::new(Vec3::ZERO, Vec3::NEG_Z));
        assert!(!rec.is_hit());
    }
}
