//! Light sources and the Phong light model.
//!
//! A light computes the color it contributes at one surface point. The
//! model is the classic ambient + diffuse + specular sum, with optional
//! distance attenuation on the diffuse and specular terms. Results are not
//! clamped; summing several lights may exceed 1.0 and the frame buffer
//! clamps on write.

use glint_math::{pointing_vector, Color, Vec3};
use serde::{Deserialize, Serialize};

use crate::Material;

/// Ambient, diffuse and specular intensities of a light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightColor {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
}

impl LightColor {
    pub const fn new(ambient: Color, diffuse: Color, specular: Color) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
        }
    }

    /// White in all three components.
    pub const WHITE: LightColor = LightColor::new(Vec3::ONE, Vec3::ONE, Vec3::ONE);
}

impl Default for LightColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Coefficients of `1 / (constant + linear * d + quadratic * d^2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    pub const fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self {
            constant,
            linear,
            quadratic,
        }
    }

    /// Scale factor for a point `distance` away from the light.
    pub fn factor(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

impl Default for Attenuation {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

/// Component-wise product of a material coefficient and a light intensity.
#[inline]
pub fn ambient_color(material: Color, light: Color) -> Color {
    material * light
}

/// Lambert term. Back-facing light contributes nothing.
#[inline]
pub fn diffuse_color(material: Color, light: Color, l: Vec3, n: Vec3) -> Color {
    ambient_color(material, light) * l.dot(n).max(0.0)
}

/// Phong specular term with `R·V` clamped to [0, 1].
#[inline]
pub fn specular_color(material: Color, light: Color, shininess: f32, r: Vec3, v: Vec3) -> Color {
    let rv = r.dot(v).clamp(0.0, 1.0);
    ambient_color(material, light) * rv.powf(shininess)
}

/// Unshadowed color produced by one light at one point.
///
/// `v` is the unit vector from the point towards the eye. When
/// `attenuation` is given, only the diffuse and specular terms are scaled.
pub fn total_color(
    material: &Material,
    light: &LightColor,
    v: Vec3,
    n: Vec3,
    light_position: Vec3,
    point: Vec3,
    attenuation: Option<&Attenuation>,
) -> Color {
    let l = pointing_vector(point, light_position);
    let r = 2.0 * l.dot(n) * n - l;
    let ambient = ambient_color(material.ambient, light.ambient);
    let diffuse = diffuse_color(material.diffuse, light.diffuse, l, n);
    let specular = specular_color(material.specular, light.specular, material.shininess, r, v);

    match attenuation {
        Some(params) => {
            let factor = params.factor(point.distance(light_position));
            ambient + factor * (diffuse + specular)
        }
        None => ambient + diffuse + specular,
    }
}

fn default_on() -> bool {
    true
}

/// A point light radiating equally in every direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionalLight {
    #[serde(default = "default_on")]
    pub is_on: bool,
    pub position: Vec3,
    #[serde(default)]
    pub color: LightColor,
    #[serde(default)]
    pub attenuation_on: bool,
    #[serde(default)]
    pub attenuation: Attenuation,
}

impl PositionalLight {
    /// A switched-on light without attenuation.
    pub fn new(position: Vec3, color: LightColor) -> Self {
        Self {
            is_on: true,
            position,
            color,
            attenuation_on: false,
            attenuation: Attenuation::default(),
        }
    }

    /// Enable distance attenuation with the given coefficients.
    pub fn with_attenuation(mut self, attenuation: Attenuation) -> Self {
        self.attenuation_on = true;
        self.attenuation = attenuation;
        self
    }

    /// Color this light produces at `point`.
    ///
    /// Off lights return black. Shadowed points receive only the ambient
    /// term, which stands in for indirect light the shadow feeler cannot see.
    pub fn illuminate(
        &self,
        point: Vec3,
        normal: Vec3,
        material: &Material,
        eye: Vec3,
        in_shadow: bool,
    ) -> Color {
        if !self.is_on {
            return Color::ZERO;
        }
        if in_shadow {
            return ambient_color(material.ambient, self.color.ambient);
        }

        let attenuation = self.attenuation_on.then_some(&self.attenuation);
        total_color(
            material,
            &self.color,
            pointing_vector(point, eye),
            normal,
            self.position,
            point,
            attenuation,
        )
    }
}

/// A positional light restricted to a cone around `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotLight {
    #[serde(flatten)]
    pub light: PositionalLight,
    /// Direction the cone opens towards
    pub direction: Vec3,
    /// Full opening angle of the cone in radians
    pub fov: f32,
}

impl SpotLight {
    pub fn new(position: Vec3, color: LightColor, direction: Vec3, fov: f32) -> Self {
        Self {
            light: PositionalLight::new(position, color),
            direction,
            fov,
        }
    }

    /// Cosine of the cone's half-angle. Points whose direction from the
    /// light has a larger cosine with `direction` are lit.
    pub fn cutoff(&self) -> f32 {
        (self.fov * 0.5).cos()
    }

    /// True if `point` lies strictly inside the cone.
    pub fn in_cone(&self, point: Vec3) -> bool {
        let to_point = pointing_vector(self.light.position, point);
        to_point.dot(self.direction.normalize()) > self.cutoff()
    }

    /// Same as [`PositionalLight::illuminate`], but black outside the cone.
    pub fn illuminate(
        &self,
        point: Vec3,
        normal: Vec3,
        material: &Material,
        eye: Vec3,
        in_shadow: bool,
    ) -> Color {
        if !self.light.is_on || !self.in_cone(point) {
            return Color::ZERO;
        }
        self.light.illuminate(point, normal, material, eye, in_shadow)
    }
}

/// Any light the tracer can shade with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Light {
    Positional(PositionalLight),
    Spot(SpotLight),
}

impl Light {
    /// The positional part shared by every variant.
    pub fn base(&self) -> &PositionalLight {
        match self {
            Light::Positional(light) => light,
            Light::Spot(spot) => &spot.light,
        }
    }

    pub fn base_mut(&mut self) -> &mut PositionalLight {
        match self {
            Light::Positional(light) => light,
            Light::Spot(spot) => &mut spot.light,
        }
    }

    pub fn is_on(&self) -> bool {
        self.base().is_on
    }

    pub fn position(&self) -> Vec3 {
        self.base().position
    }

    pub fn set_on(&mut self, on: bool) {
        self.base_mut().is_on = on;
    }

    pub fn toggle(&mut self) {
        let light = self.base_mut();
        light.is_on = !light.is_on;
    }

    /// Move the light by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.base_mut().position += offset;
    }

    pub fn illuminate(
        &self,
        point: Vec3,
        normal: Vec3,
        material: &Material,
        eye: Vec3,
        in_shadow: bool,
    ) -> Color {
        match self {
            Light::Positional(light) => light.illuminate(point, normal, material, eye, in_shadow),
            Light::Spot(spot) => spot.illuminate(point, normal, material, eye, in_shadow),
        }
    }
}

impl From<PositionalLight> for Light {
    fn from(light: PositionalLight) -> Self {
        Light::Positional(light)
    }
}

impl From<SpotLight> for Light {
    fn from(spot: SpotLight) -> Self {
        Light::Spot(spot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{GRAY_MATTE, SILVER};

    fn assert_color_eq(a: Color, b: Color) {
        assert!((a - b).length() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_off_light_is_black() {
        let mut light = PositionalLight::new(Vec3::new(2.0, 1.0, 3.0), LightColor::WHITE);
        light.is_on = false;

        for in_shadow in [false, true] {
            let c = light.illuminate(Vec3::ZERO, Vec3::Y, &SILVER, Vec3::new(0.0, 1.0, 4.0), in_shadow);
            assert_eq!(c, Color::ZERO);
        }
    }

    #[test]
    fn test_shadowed_point_gets_only_ambient() {
        let light = PositionalLight::new(Vec3::new(2.0, 1.0, 3.0), LightColor::WHITE);
        let mut shiny = SILVER;
        shiny.diffuse = Vec3::ONE;
        shiny.specular = Vec3::ONE;

        let a = light.illuminate(Vec3::ZERO, Vec3::Y, &SILVER, Vec3::Z, true);
        let b = light.illuminate(Vec3::ZERO, Vec3::Y, &shiny, Vec3::Z, true);
        assert_color_eq(a, SILVER.ambient);
        assert_color_eq(a, b);
    }

    #[test]
    fn test_unattenuated_sum() {
        let light_pos = Vec3::new(2.0, 1.0, 3.0);
        let eye = Vec3::new(0.0, 1.0, 4.0);
        let light = PositionalLight::new(light_pos, LightColor::WHITE);

        let l = light_pos.normalize();
        let n = Vec3::Y;
        let r = 2.0 * l.dot(n) * n - l;
        let v = eye.normalize();
        let expected = GRAY_MATTE.ambient
            + GRAY_MATTE.diffuse * l.dot(n)
            + GRAY_MATTE.specular * r.dot(v).clamp(0.0, 1.0).powf(GRAY_MATTE.shininess);

        let c = light.illuminate(Vec3::ZERO, n, &GRAY_MATTE, eye, false);
        assert_color_eq(c, expected);
    }

    #[test]
    fn test_distance_ignored_without_attenuation() {
        let near = PositionalLight::new(Vec3::new(0.0, 1.0, 0.0), LightColor::WHITE);
        let far = PositionalLight::new(Vec3::new(0.0, 100.0, 0.0), LightColor::WHITE);
        let eye = Vec3::new(0.0, 5.0, 0.0);

        let a = near.illuminate(Vec3::ZERO, Vec3::Y, &SILVER, eye, false);
        let b = far.illuminate(Vec3::ZERO, Vec3::Y, &SILVER, eye, false);
        assert_color_eq(a, b);
    }

    #[test]
    fn test_attenuation_scales_diffuse_and_specular_only() {
        let position = Vec3::new(0.0, 2.0, 0.0);
        let plain = PositionalLight::new(position, LightColor::WHITE);
        let attenuated = plain.with_attenuation(Attenuation::new(1.0, 0.0, 1.0));
        let eye = Vec3::new(0.0, 5.0, 0.0);

        let full = plain.illuminate(Vec3::ZERO, Vec3::Y, &SILVER, eye, false);
        let dimmed = attenuated.illuminate(Vec3::ZERO, Vec3::Y, &SILVER, eye, false);

        // d = 2, factor = 1 / (1 + 4)
        let expected = SILVER.ambient + (full - SILVER.ambient) / 5.0;
        assert_color_eq(dimmed, expected);
    }

    #[test]
    fn test_back_facing_light_adds_no_diffuse() {
        let light = PositionalLight::new(Vec3::new(0.0, -3.0, 0.0), LightColor::WHITE);
        let c = light.illuminate(Vec3::ZERO, Vec3::Y, &GRAY_MATTE, Vec3::new(0.0, 3.0, 0.0), false);
        assert_color_eq(c, GRAY_MATTE.ambient);
    }

    #[test]
    fn test_spot_outside_cone_is_black() {
        let spot = SpotLight::new(
            Vec3::new(0.0, 5.0, 0.0),
            LightColor::WHITE,
            Vec3::NEG_Y,
            20f32.to_radians(),
        );
        let eye = Vec3::new(0.0, 1.0, 4.0);

        let inside = spot.illuminate(Vec3::ZERO, Vec3::Y, &SILVER, eye, false);
        let outside = spot.illuminate(Vec3::new(10.0, 0.0, 0.0), Vec3::Y, &SILVER, eye, false);
        assert!(inside.length() > 0.0);
        assert_eq!(outside, Color::ZERO);

        // Outside the cone even the ambient term is withheld.
        let shadowed_outside = spot.illuminate(Vec3::new(10.0, 0.0, 0.0), Vec3::Y, &SILVER, eye, true);
        assert_eq!(shadowed_outside, Color::ZERO);
    }

    #[test]
    fn test_spot_fov_is_full_opening_angle() {
        let spot = SpotLight::new(Vec3::ZERO, LightColor::WHITE, Vec3::NEG_Y, 90f32.to_radians());
        assert!((spot.cutoff() - 45f32.to_radians().cos()).abs() < 1e-6);

        let at = |degrees: f32| {
            let a = degrees.to_radians();
            5.0 * Vec3::new(a.sin(), -a.cos(), 0.0)
        };
        assert!(spot.in_cone(at(40.0)));
        assert!(!spot.in_cone(at(50.0)));
    }

    #[test]
    fn test_light_enum_dispatch_and_mutation() {
        let mut light: Light = PositionalLight::new(Vec3::ZERO, LightColor::WHITE).into();
        assert!(light.is_on());

        light.toggle();
        assert!(!light.is_on());
        light.set_on(true);
        assert!(light.is_on());

        light.translate(Vec3::new(0.5, 0.0, -0.5));
        assert_eq!(light.position(), Vec3::new(0.5, 0.0, -0.5));
    }

    #[test]
    fn test_light_deserializes_from_tagged_json() {
        let json = r#"[
            { "type": "positional", "position": [2.0, 1.0, 3.0] },
            { "type": "spot", "position": [0.0, 4.0, 0.0], "direction": [0.0, -1.0, 0.0],
              "fov": 0.7, "is_on": false }
        ]"#;
        let lights: Vec<Light> = serde_json::from_str(json).unwrap();

        assert_eq!(lights.len(), 2);
        assert!(lights[0].is_on());
        assert_eq!(lights[0].base().color, LightColor::WHITE);
        assert!(matches!(lights[1], Light::Spot(s) if !s.light.is_on && s.fov == 0.7));
    }
}
