//! Renderable scene: camera, geometry, lights and background.
//!
//! A scene is read-only while a frame renders. Callers that want to move or
//! switch lights between frames do so through `lights` before the next render.

use std::sync::Arc;

use glint_core::{
    Light, ObjectDescription, SceneDescription, SceneResult, ShapeDescription, Texture,
    TextureCache, TextureDescription,
};
use glint_math::{Color, Vec3};

use crate::{Camera, Cone, Cylinder, Hittable, HittableList, Plane, Sphere, Triangle};

pub struct Scene {
    pub camera: Camera,
    /// Objects that are shaded, cast shadows and reflect
    pub opaque: HittableList,
    /// Objects blended over the opaque result by their alpha
    pub transparent: HittableList,
    /// Lights in evaluation order; index 0 is the primary light
    pub lights: Vec<Light>,
    /// Color of rays that hit nothing
    pub background: Color,
}

impl Scene {
    /// An empty scene seen through `camera`.
    pub fn new(camera: Camera, background: Color) -> Self {
        Self {
            camera,
            opaque: HittableList::new(),
            transparent: HittableList::new(),
            lights: Vec::new(),
            background,
        }
    }

    /// Build a scene from a validated description.
    ///
    /// Image textures are loaded through `textures`.
    pub fn from_description(desc: &SceneDescription, textures: &mut TextureCache) -> SceneResult<Self> {
        let mut scene = Scene::new(Camera::from_description(&desc.camera), desc.background);
        scene.lights = desc.lights.clone();

        for object in &desc.objects {
            scene.opaque.add(build_object(object, textures)?);
        }
        for object in &desc.transparent_objects {
            scene.transparent.add(build_object(object, textures)?);
        }

        log::info!(
            "Built scene: {} lights, {} opaque, {} transparent objects",
            scene.lights.len(),
            scene.opaque.len(),
            scene.transparent.len()
        );

        Ok(scene)
    }

    pub fn add_light(&mut self, light: impl Into<Light>) {
        self.lights.push(light.into());
    }

    pub fn add_opaque(&mut self, object: Box<dyn Hittable>) {
        self.opaque.add(object);
    }

    pub fn add_transparent(&mut self, object: Box<dyn Hittable>) {
        self.transparent.add(object);
    }

    /// The light that decides transparency ordering.
    pub fn primary_light(&self) -> Option<&Light> {
        self.lights.first()
    }

    pub fn any_light_on(&self) -> bool {
        self.lights.iter().any(Light::is_on)
    }

    pub fn eye(&self) -> Vec3 {
        self.camera.eye()
    }
}

fn build_object(object: &ObjectDescription, textures: &mut TextureCache) -> SceneResult<Box<dyn Hittable>> {
    let material = object.material()?;
    let texture = match &object.texture {
        Some(TextureDescription::Checkerboard { a, b, squares }) => {
            Some(Arc::new(Texture::checkerboard(*a, *b, *squares)))
        }
        Some(TextureDescription::Image { path }) => Some(textures.load(path)?),
        None => None,
    };

    let shape: Box<dyn Hittable> = match object.shape {
        ShapeDescription::Sphere { center, radius } => {
            let sphere = Sphere::new(center, radius, material);
            Box::new(match texture {
                Some(texture) => sphere.with_texture(texture),
                None => sphere,
            })
        }
        ShapeDescription::Plane {
            point,
            normal,
            tile_size,
        } => {
            let plane = Plane::new(point, normal, material).with_tile_size(tile_size);
            Box::new(match texture {
                Some(texture) => plane.with_texture(texture),
                None => plane,
            })
        }
        ShapeDescription::Triangle { v0, v1, v2 } => {
            let triangle = Triangle::new(v0, v1, v2, material);
            Box::new(match texture {
                Some(texture) => triangle.with_texture(texture),
                None => triangle,
            })
        }
        ShapeDescription::Cylinder { base, radius, height } => {
            let cylinder = Cylinder::new(base, radius, height, material);
            Box::new(match texture {
                Some(texture) => cylinder.with_texture(texture),
                None => cylinder,
            })
        }
        ShapeDescription::Cone { base, radius, height } => {
            let cone = Cone::new(base, radius, height, material);
            Box::new(match texture {
                Some(texture) => cone.with_texture(texture),
                None => cone,
            })
        }
    };

    Ok(shape)
}
