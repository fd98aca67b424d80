//! Scene description files.
//!
//! A scene is described in JSON: camera, background color, an ordered list
//! of lights, opaque objects and transparent objects. The description is
//! validated here, at load time, so the tracer never has to reject input.
//!
//! ```json
//! {
//!   "camera": { "position": [0, 1, 4], "look_at": [0, 0, 0] },
//!   "background": [0.8, 0.8, 0.8],
//!   "lights": [{ "type": "positional", "position": [2, 1, 3] }],
//!   "objects": [
//!     { "shape": { "type": "sphere", "center": [0, 0, 0], "radius": 1 },
//!       "material": "silver" }
//!   ]
//! }
//! ```

use std::path::Path;

use glint_math::{Color, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Light, Material, TextureError};

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown material preset: {0}")]
    UnknownMaterial(String),

    #[error("Invalid {what}: {reason}")]
    Invalid { what: String, reason: String },

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

fn invalid(what: impl Into<String>, reason: impl Into<String>) -> SceneError {
    SceneError::Invalid {
        what: what.into(),
        reason: reason.into(),
    }
}

/// How the camera maps pixels to rays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Projection {
    /// Rays fan out from the eye through the image plane.
    Perspective { vfov_degrees: f32 },
    /// Parallel rays; `pixels_per_unit` pixels span one world unit.
    Orthographic { pixels_per_unit: f32 },
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Perspective { vfov_degrees: 60.0 }
    }
}

fn default_up() -> Vec3 {
    Vec3::Y
}

fn default_width() -> u32 {
    640
}

fn default_height() -> u32 {
    480
}

/// Camera placement and image resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    pub position: Vec3,
    pub look_at: Vec3,
    #[serde(default = "default_up")]
    pub up: Vec3,
    #[serde(default)]
    pub projection: Projection,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

/// Geometry of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDescription {
    Sphere {
        center: Vec3,
        radius: f32,
    },
    /// Infinite plane; textures repeat every `tile_size` world units.
    Plane {
        point: Vec3,
        normal: Vec3,
        #[serde(default = "default_tile_size")]
        tile_size: f32,
    },
    Triangle {
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
    },
    /// Upright cylinder standing on `base`, capped at both ends.
    Cylinder {
        base: Vec3,
        radius: f32,
        height: f32,
    },
    /// Upright cone standing on `base` with its apex `height` above it.
    Cone {
        base: Vec3,
        radius: f32,
        height: f32,
    },
}

fn default_tile_size() -> f32 {
    1.0
}

/// A material given by preset name or by explicit coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaterialDescription {
    Preset(String),
    Custom(Material),
}

impl Default for MaterialDescription {
    fn default() -> Self {
        MaterialDescription::Custom(Material::default())
    }
}

impl MaterialDescription {
    /// Resolve to concrete coefficients.
    pub fn resolve(&self) -> SceneResult<Material> {
        match self {
            MaterialDescription::Preset(name) => {
                Material::preset(name).ok_or_else(|| SceneError::UnknownMaterial(name.clone()))
            }
            MaterialDescription::Custom(material) => Ok(*material),
        }
    }
}

/// Texture attached to an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextureDescription {
    Checkerboard { a: Color, b: Color, squares: u32 },
    /// Image file, relative paths resolve against the scene file's directory.
    Image { path: String },
}

/// One visible object: a shape, its material and an optional texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescription {
    pub shape: ShapeDescription,
    #[serde(default)]
    pub material: MaterialDescription,
    /// Overrides the material's opacity
    #[serde(default)]
    pub alpha: Option<f32>,
    #[serde(default)]
    pub texture: Option<TextureDescription>,
}

impl ObjectDescription {
    pub fn new(shape: ShapeDescription, material: Material) -> Self {
        Self {
            shape,
            material: MaterialDescription::Custom(material),
            alpha: None,
            texture: None,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn with_texture(mut self, texture: TextureDescription) -> Self {
        self.texture = Some(texture);
        self
    }

    /// The object's material with the alpha override applied.
    pub fn material(&self) -> SceneResult<Material> {
        let material = self.material.resolve()?;
        Ok(match self.alpha {
            Some(alpha) => material.with_alpha(alpha),
            None => material,
        })
    }
}

fn default_background() -> Color {
    Color::splat(0.8)
}

/// Everything needed to build a renderable scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub camera: CameraDescription,
    /// Color returned for rays that hit nothing
    #[serde(default = "default_background")]
    pub background: Color,
    /// Lights in evaluation order; the first one is the primary light
    #[serde(default)]
    pub lights: Vec<Light>,
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
    #[serde(default)]
    pub transparent_objects: Vec<ObjectDescription>,
}

impl SceneDescription {
    /// Parse a scene from JSON text. The result is validated.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let description: SceneDescription = serde_json::from_str(json)?;
        description.validate()?;
        Ok(description)
    }

    /// Load and validate a scene file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let description = Self::from_json_str(&json)?;

        log::info!(
            "Loaded scene {}: {} lights, {} opaque, {} transparent objects",
            path.display(),
            description.lights.len(),
            description.objects.len(),
            description.transparent_objects.len()
        );

        Ok(description)
    }

    /// Check the scene for input the tracer cannot handle.
    ///
    /// Suspicious but renderable setups are logged as warnings.
    pub fn validate(&self) -> SceneResult<()> {
        self.validate_camera()?;

        for (i, light) in self.lights.iter().enumerate() {
            validate_light(i, light)?;
        }

        for (i, object) in self.objects.iter().enumerate() {
            validate_object(&format!("object {}", i), object)?;
        }

        for (i, object) in self.transparent_objects.iter().enumerate() {
            let what = format!("transparent object {}", i);
            validate_object(&what, object)?;
            if object.material()?.is_opaque() {
                log::warn!("{} has alpha 1.0 and will hide everything behind it", what);
            }
        }

        if self.lights.is_empty() {
            log::warn!("Scene has no lights; lit surfaces will render black");
        }

        Ok(())
    }

    fn validate_camera(&self) -> SceneResult<()> {
        let camera = &self.camera;
        if camera.width == 0 || camera.height == 0 {
            return Err(invalid(
                "camera",
                format!("resolution {}x{} is empty", camera.width, camera.height),
            ));
        }

        let view = camera.look_at - camera.position;
        if view.length_squared() == 0.0 {
            return Err(invalid("camera", "position and look_at coincide"));
        }
        if view.cross(camera.up).length_squared() == 0.0 {
            return Err(invalid("camera", "up vector is parallel to the view direction"));
        }

        match camera.projection {
            Projection::Perspective { vfov_degrees } if !(vfov_degrees > 0.0 && vfov_degrees < 180.0) => {
                Err(invalid("camera", format!("vertical fov {} out of (0, 180)", vfov_degrees)))
            }
            Projection::Orthographic { pixels_per_unit } if pixels_per_unit <= 0.0 => Err(invalid(
                "camera",
                format!("pixels_per_unit {} must be positive", pixels_per_unit),
            )),
            _ => Ok(()),
        }
    }
}

fn validate_light(index: usize, light: &Light) -> SceneResult<()> {
    let what = format!("light {}", index);
    let base = light.base();

    if base.attenuation_on {
        let a = base.attenuation;
        if a.constant < 0.0 || a.linear < 0.0 || a.quadratic < 0.0 {
            return Err(invalid(what, "attenuation coefficients must be non-negative"));
        }
        if a.constant == 0.0 && a.linear == 0.0 && a.quadratic == 0.0 {
            return Err(invalid(what, "attenuation coefficients are all zero"));
        }
    }

    if let Light::Spot(spot) = light {
        if spot.direction.length_squared() == 0.0 {
            return Err(invalid(what, "spot direction is zero"));
        }
        if !(spot.fov > 0.0 && spot.fov < std::f32::consts::TAU) {
            return Err(invalid(what, format!("spot fov {} out of (0, 2π)", spot.fov)));
        }
    }

    Ok(())
}

fn validate_object(what: &str, object: &ObjectDescription) -> SceneResult<()> {
    let material = object.material()?;
    if !(0.0..=1.0).contains(&material.alpha) {
        return Err(invalid(what, format!("alpha {} out of [0, 1]", material.alpha)));
    }
    if material.shininess < 0.0 {
        return Err(invalid(what, "shininess must be non-negative"));
    }

    match object.shape {
        ShapeDescription::Sphere { radius, .. } if radius <= 0.0 => {
            Err(invalid(what, format!("sphere radius {} must be positive", radius)))
        }
        ShapeDescription::Plane { normal, tile_size, .. } => {
            if normal.length_squared() == 0.0 {
                Err(invalid(what, "plane normal is zero"))
            } else if tile_size <= 0.0 {
                Err(invalid(what, "plane tile_size must be positive"))
            } else {
                Ok(())
            }
        }
        ShapeDescription::Triangle { v0, v1, v2 } if (v1 - v0).cross(v2 - v0).length_squared() == 0.0 => {
            Err(invalid(what, "triangle is degenerate"))
        }
        ShapeDescription::Cylinder { radius, height, .. } | ShapeDescription::Cone { radius, height, .. }
            if radius <= 0.0 || height <= 0.0 =>
        {
            Err(invalid(
                what,
                format!("radius {} and height {} must be positive", radius, height),
            ))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "camera": { "position": [0, 1, 4], "look_at": [0, 0, 0] },
        "lights": [{ "type": "positional", "position": [2, 1, 3] }],
        "objects": [
            { "shape": { "type": "sphere", "center": [0, 0, 0], "radius": 1 },
              "material": "silver" },
            { "shape": { "type": "plane", "point": [0, -1, 0], "normal": [0, 1, 0] },
              "texture": { "type": "checkerboard", "a": [1, 1, 1], "b": [0, 0, 0], "squares": 8 } }
        ],
        "transparent_objects": [
            { "shape": { "type": "sphere", "center": [1, 0, 1], "radius": 0.5 },
              "material": "ruby", "alpha": 0.3 }
        ]
    }"#;

    #[test]
    fn test_parse_minimal_scene() {
        let scene = SceneDescription::from_json_str(MINIMAL).unwrap();

        assert_eq!(scene.camera.width, 640);
        assert_eq!(scene.camera.up, Vec3::Y);
        assert_eq!(scene.background, Color::splat(0.8));
        assert_eq!(scene.lights.len(), 1);
        assert_eq!(scene.objects.len(), 2);
        assert_eq!(scene.objects[0].material().unwrap(), crate::material::SILVER);
        assert_eq!(scene.transparent_objects[0].material().unwrap().alpha, 0.3);
        assert!(matches!(
            scene.objects[1].texture,
            Some(TextureDescription::Checkerboard { squares: 8, .. })
        ));
    }

    #[test]
    fn test_cylinder_and_cone_shapes() {
        let json = MINIMAL.replace(
            r#"{ "type": "sphere", "center": [0, 0, 0], "radius": 1 }"#,
            r#"{ "type": "cylinder", "base": [0, -1, 0], "radius": 0.5, "height": 2 }"#,
        );
        let scene = SceneDescription::from_json_str(&json).unwrap();
        assert_eq!(
            scene.objects[0].shape,
            ShapeDescription::Cylinder {
                base: Vec3::new(0.0, -1.0, 0.0),
                radius: 0.5,
                height: 2.0
            }
        );

        let flat_cone = MINIMAL.replace(
            r#"{ "type": "sphere", "center": [0, 0, 0], "radius": 1 }"#,
            r#"{ "type": "cone", "base": [0, -1, 0], "radius": 1, "height": 0 }"#,
        );
        let err = SceneDescription::from_json_str(&flat_cone).unwrap_err();
        assert!(matches!(err, SceneError::Invalid { .. }));
    }

    #[test]
    fn test_unknown_material_is_rejected() {
        let json = MINIMAL.replace("\"silver\"", "\"unobtainium\"");
        let err = SceneDescription::from_json_str(&json).unwrap_err();
        assert!(matches!(err, SceneError::UnknownMaterial(name) if name == "unobtainium"));
    }

    #[test]
    fn test_alpha_out_of_range_is_rejected() {
        let json = MINIMAL.replace("\"alpha\": 0.3", "\"alpha\": 1.5");
        let err = SceneDescription::from_json_str(&json).unwrap_err();
        assert!(matches!(err, SceneError::Invalid { .. }));
    }

    #[test]
    fn test_degenerate_camera_is_rejected() {
        let json = MINIMAL.replace("\"look_at\": [0, 0, 0]", "\"look_at\": [0, 1, 4]");
        assert!(SceneDescription::from_json_str(&json).is_err());
    }

    #[test]
    fn test_zero_attenuation_is_rejected() {
        let json = MINIMAL.replace(
            "\"position\": [2, 1, 3] }",
            "\"position\": [2, 1, 3], \"attenuation_on\": true, \
             \"attenuation\": { \"constant\": 0, \"linear\": 0, \"quadratic\": 0 } }",
        );
        let err = SceneDescription::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("all zero"));
    }

    #[test]
    fn test_negative_radius_is_rejected() {
        let json = MINIMAL.replace("\"radius\": 1 }", "\"radius\": -1 }");
        assert!(SceneDescription::from_json_str(&json).is_err());
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = SceneDescription::from_json_str("{ \"camera\": ").unwrap_err();
        assert!(matches!(err, SceneError::Json(_)));
    }

    #[test]
    fn test_scene_without_lights_is_valid() {
        let _ = env_logger::builder().is_test(true).try_init();
        let json = r#"{ "camera": { "position": [0, 0, 5], "look_at": [0, 0, 0] } }"#;
        let scene = SceneDescription::from_json_str(json).unwrap();
        assert!(scene.lights.is_empty());
        assert!(scene.objects.is_empty());
    }
}
