//! Shadow feelers.

use glint_math::{Ray, Vec3, EPSILON};

use crate::HittableList;

/// True if an opaque object blocks the path from `point` to `light_position`.
///
/// The feeler starts `EPSILON` along `normal` so it does not hit the
/// surface it leaves. `normal` must face the side the point is seen from.
/// Only fully opaque occluders (alpha == 1.0) nearer than the light count.
pub fn in_shadow(point: Vec3, normal: Vec3, light_position: Vec3, opaque: &HittableList) -> bool {
    let origin = point + EPSILON * normal;
    let feeler = Ray::towards(origin, light_position);

    let hit = opaque.find_intersection(&feeler);
    if !hit.is_hit() || !hit.material.is_opaque() {
        return false;
    }

    origin.distance(hit.p) < origin.distance(light_position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Plane, Sphere};
    use glint_core::material::{SILVER, TIN};

    fn floor_with_blocker(blocker_alpha: f32) -> HittableList {
        let mut objects = HittableList::new();
        objects.add(Box::new(Plane::new(Vec3::ZERO, Vec3::Y, TIN)));
        objects.add(Box::new(Sphere::new(
            Vec3::new(0.0, 2.0, 0.0),
            0.5,
            SILVER.with_alpha(blocker_alpha),
        )));
        objects
    }

    #[test]
    fn test_opaque_blocker_casts_shadow() {
        let objects = floor_with_blocker(1.0);
        assert!(in_shadow(Vec3::ZERO, Vec3::Y, Vec3::new(0.0, 5.0, 0.0), &objects));
    }

    #[test]
    fn test_transparent_blocker_casts_no_shadow() {
        let objects = floor_with_blocker(0.5);
        assert!(!in_shadow(Vec3::ZERO, Vec3::Y, Vec3::new(0.0, 5.0, 0.0), &objects));
    }

    #[test]
    fn test_blocker_beyond_light_casts_no_shadow() {
        let objects = floor_with_blocker(1.0);
        assert!(!in_shadow(Vec3::ZERO, Vec3::Y, Vec3::new(0.0, 1.0, 0.0), &objects));
    }

    #[test]
    fn test_surface_does_not_shadow_itself() {
        let mut objects = HittableList::new();
        objects.add(Box::new(Plane::new(Vec3::ZERO, Vec3::Y, TIN)));

        let point = Vec3::new(0.37, 0.0, -1.2);
        assert!(!in_shadow(point, Vec3::Y, Vec3::new(2.0, 1.0, 3.0), &objects));
    }

    #[test]
    fn test_result_does_not_depend_on_previous_calls() {
        let objects = floor_with_blocker(1.0);
        let light = Vec3::new(0.0, 5.0, 0.0);

        assert!(in_shadow(Vec3::ZERO, Vec3::Y, light, &objects));
        assert!(!in_shadow(Vec3::new(4.0, 0.0, 0.0), Vec3::Y, light, &objects));
        assert!(in_shadow(Vec3::ZERO, Vec3::Y, light, &objects));
    }
}
