//! Recursive ray evaluation.
//!
//! For one ray the tracer finds the nearest opaque and the nearest
//! transparent hit, shades the opaque hit with every light (each light's
//! shadow feeler decides whether it contributes more than ambient), blends
//! in a texture, composites a transparent surface in front of it, and
//! mixes in a mirror reflection while the depth budget lasts.
//!
//! Lights are summed, not averaged. Results are left unclamped.

use glint_math::{reflect, Color, Ray, EPSILON};

use crate::{shadow::in_shadow, HitRecord, Scene};

/// Share of a textured pixel taken from the texture; the rest is lighting,
/// split evenly across the scene's lights.
pub const TEXTURE_WEIGHT: f32 = 0.5;

/// Share of a reflective pixel taken from the reflected ray.
pub const REFLECTION_WEIGHT: f32 = 0.2;

/// Decides when a transparent hit is composited over an opaque one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransparencyOrder {
    /// The transparent hit is nearer to the primary light than the opaque
    /// hit. This reproduces the reference renders; scenes without lights
    /// fall back to [`TransparencyOrder::DistanceToEye`].
    #[default]
    DistanceToLight,
    /// The transparent hit is nearer along the ray.
    DistanceToEye,
}

/// Evaluates the color seen along a ray.
///
/// Holds only policy, never per-ray state, so one tracer can be shared by
/// any number of rendering threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RayTracer {
    pub transparency: TransparencyOrder,
}

impl RayTracer {
    pub fn new(transparency: TransparencyOrder) -> Self {
        Self { transparency }
    }

    /// Color seen along `ray`, reflecting up to `depth` more times.
    pub fn trace(&self, ray: &Ray, scene: &Scene, depth: u32) -> Color {
        let mut hit = scene.opaque.find_intersection(ray);
        let mut trans_hit = scene.transparent.find_intersection(ray);

        if hit.is_hit() {
            hit.orient_against(ray);
            let mut result = self.shade(&hit, scene);

            if trans_hit.is_hit() && self.transparent_in_front(&hit, &trans_hit, scene) {
                trans_hit.orient_against(ray);
                let alpha = trans_hit.material.alpha;
                result = (1.0 - alpha) * result + alpha * self.unshadowed(&trans_hit, scene);
            }

            if depth > 0 {
                result = if scene.any_light_on() {
                    let origin = hit.p + EPSILON * hit.normal;
                    let reflected = Ray::new(origin, reflect(ray.direction(), hit.normal));
                    (1.0 - REFLECTION_WEIGHT) * result
                        + REFLECTION_WEIGHT * self.trace(&reflected, scene, depth - 1)
                } else {
                    Color::ZERO
                };
            }

            result
        } else if trans_hit.is_hit() {
            trans_hit.orient_against(ray);
            let alpha = trans_hit.material.alpha;
            (1.0 - alpha) * scene.background + alpha * self.unshadowed(&trans_hit, scene)
        } else {
            scene.background
        }
    }

    /// Local color of an opaque hit: lights plus texture, no reflection.
    fn shade(&self, hit: &HitRecord, scene: &Scene) -> Color {
        let eye = scene.eye();
        let mut lighting = Color::ZERO;

        for light in &scene.lights {
            let shadowed = light.is_on() && in_shadow(hit.p, hit.normal, light.position(), &scene.opaque);
            lighting += light.illuminate(hit.p, hit.normal, hit.material, eye, shadowed);
        }

        match hit.texture {
            Some(texture) => {
                let light_weight = (1.0 - TEXTURE_WEIGHT) / scene.lights.len().max(1) as f32;
                TEXTURE_WEIGHT * texture.sample(hit.u, hit.v) + light_weight * lighting
            }
            None => lighting,
        }
    }

    /// Own color of a transparent surface. Shadows are not tested.
    fn unshadowed(&self, hit: &HitRecord, scene: &Scene) -> Color {
        let eye = scene.eye();
        scene.lights.iter().fold(Color::ZERO, |acc, light| {
            acc + light.illuminate(hit.p, hit.normal, hit.material, eye, false)
        })
    }

    fn transparent_in_front(&self, hit: &HitRecord, trans_hit: &HitRecord, scene: &Scene) -> bool {
        match (self.transparency, scene.primary_light()) {
            (TransparencyOrder::DistanceToLight, Some(light)) => {
                let light_position = light.position();
                hit.p.distance(light_position) > trans_hit.p.distance(light_position)
            }
            _ => trans_hit.t < hit.t,
        }
    }
}
