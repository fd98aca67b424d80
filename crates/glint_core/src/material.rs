//! Phong surface materials and the named material table.

use glint_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

/// Phong reflection coefficients for a surface.
///
/// Each color channel is a coefficient in [0, 1]. `alpha` is opacity:
/// 1.0 means the surface cannot be seen through and fully blocks shadow
/// feelers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    /// Specular falloff exponent
    pub shininess: f32,
    #[serde(default = "opaque_alpha")]
    pub alpha: f32,
}

fn opaque_alpha() -> f32 {
    1.0
}

impl Material {
    /// Create a fully opaque material.
    pub const fn new(ambient: Color, diffuse: Color, specular: Color, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
            alpha: 1.0,
        }
    }

    /// Same material with a different opacity.
    pub const fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// True if nothing can be seen through this surface.
    pub fn is_opaque(&self) -> bool {
        self.alpha == 1.0
    }

    /// Look up a material from the named table (case-insensitive).
    pub fn preset(name: &str) -> Option<Material> {
        let material = match name.to_ascii_lowercase().as_str() {
            "brass" => BRASS,
            "bronze" => BRONZE,
            "polished_bronze" => POLISHED_BRONZE,
            "chrome" => CHROME,
            "copper" => COPPER,
            "polished_copper" => POLISHED_COPPER,
            "gold" => GOLD,
            "polished_gold" => POLISHED_GOLD,
            "pewter" => PEWTER,
            "silver" => SILVER,
            "polished_silver" => POLISHED_SILVER,
            "tin" => TIN,
            "emerald" => EMERALD,
            "jade" => JADE,
            "obsidian" => OBSIDIAN,
            "pearl" => PEARL,
            "ruby" => RUBY,
            "turquoise" => TURQUOISE,
            "black_plastic" => BLACK_PLASTIC,
            "red_plastic" => RED_PLASTIC,
            "green_plastic" => GREEN_PLASTIC,
            "blue_plastic" => BLUE_PLASTIC,
            "white_plastic" => WHITE_PLASTIC,
            "black_rubber" => BLACK_RUBBER,
            "gray_matte" => GRAY_MATTE,
            _ => return None,
        };
        Some(material)
    }
}

impl Default for Material {
    fn default() -> Self {
        GRAY_MATTE
    }
}

/// Names accepted by [`Material::preset`].
pub const PRESET_NAMES: &[&str] = &[
    "brass",
    "bronze",
    "polished_bronze",
    "chrome",
    "copper",
    "polished_copper",
    "gold",
    "polished_gold",
    "pewter",
    "silver",
    "polished_silver",
    "tin",
    "emerald",
    "jade",
    "obsidian",
    "pearl",
    "ruby",
    "turquoise",
    "black_plastic",
    "red_plastic",
    "green_plastic",
    "blue_plastic",
    "white_plastic",
    "black_rubber",
    "gray_matte",
];

const fn rgb(r: f32, g: f32, b: f32) -> Color {
    Vec3::new(r, g, b)
}

const fn gray(v: f32) -> Color {
    Vec3::splat(v)
}

// Classic OpenGL material table.
pub const BRASS: Material = Material::new(
    rgb(0.329412, 0.223529, 0.027451),
    rgb(0.780392, 0.568627, 0.113725),
    rgb(0.992157, 0.941176, 0.807843),
    27.8974,
);
pub const BRONZE: Material = Material::new(
    rgb(0.2125, 0.1275, 0.054),
    rgb(0.714, 0.4284, 0.18144),
    rgb(0.393548, 0.271906, 0.166721),
    25.6,
);
pub const POLISHED_BRONZE: Material = Material::new(
    rgb(0.25, 0.148, 0.06475),
    rgb(0.4, 0.2368, 0.1036),
    rgb(0.774597, 0.458561, 0.200621),
    76.8,
);
pub const CHROME: Material = Material::new(gray(0.25), gray(0.4), gray(0.774597), 76.8);
pub const COPPER: Material = Material::new(
    rgb(0.19125, 0.0735, 0.0225),
    rgb(0.7038, 0.27048, 0.0828),
    rgb(0.256777, 0.137622, 0.086014),
    12.8,
);
pub const POLISHED_COPPER: Material = Material::new(
    rgb(0.2295, 0.08825, 0.0275),
    rgb(0.5508, 0.2118, 0.066),
    rgb(0.580594, 0.223257, 0.0695701),
    51.2,
);
pub const GOLD: Material = Material::new(
    rgb(0.24725, 0.1995, 0.0745),
    rgb(0.75164, 0.60648, 0.22648),
    rgb(0.628281, 0.555802, 0.366065),
    51.2,
);
pub const POLISHED_GOLD: Material = Material::new(
    rgb(0.24725, 0.2245, 0.0645),
    rgb(0.34615, 0.3143, 0.0903),
    rgb(0.797357, 0.723991, 0.208006),
    83.2,
);
pub const PEWTER: Material = Material::new(
    rgb(0.105882, 0.058824, 0.113725),
    rgb(0.427451, 0.470588, 0.541176),
    rgb(0.333333, 0.333333, 0.521569),
    9.84615,
);
pub const SILVER: Material = Material::new(gray(0.19225), gray(0.50754), gray(0.508273), 51.2);
pub const POLISHED_SILVER: Material =
    Material::new(gray(0.23125), gray(0.2775), gray(0.773911), 89.6);
pub const TIN: Material = Material::new(
    rgb(0.105882, 0.058824, 0.113725),
    rgb(0.427451, 0.470588, 0.541176),
    rgb(0.333333, 0.333333, 0.521569),
    9.84615,
);
pub const EMERALD: Material = Material::new(
    rgb(0.0215, 0.1745, 0.0215),
    rgb(0.07568, 0.61424, 0.07568),
    rgb(0.633, 0.727811, 0.633),
    76.8,
);
pub const JADE: Material = Material::new(
    rgb(0.135, 0.2225, 0.1575),
    rgb(0.54, 0.89, 0.63),
    gray(0.316228),
    12.8,
);
pub const OBSIDIAN: Material = Material::new(
    rgb(0.05375, 0.05, 0.06625),
    rgb(0.18275, 0.17, 0.22525),
    rgb(0.332741, 0.328634, 0.346435),
    38.4,
);
pub const PEARL: Material = Material::new(
    rgb(0.25, 0.20725, 0.20725),
    rgb(1.0, 0.829, 0.829),
    gray(0.296648),
    11.264,
);
pub const RUBY: Material = Material::new(
    rgb(0.1745, 0.01175, 0.01175),
    rgb(0.61424, 0.04136, 0.04136),
    rgb(0.727811, 0.626959, 0.626959),
    76.8,
);
pub const TURQUOISE: Material = Material::new(
    rgb(0.1, 0.18725, 0.1745),
    rgb(0.396, 0.74151, 0.69102),
    rgb(0.297254, 0.30829, 0.306678),
    12.8,
);
pub const BLACK_PLASTIC: Material = Material::new(gray(0.0), gray(0.01), gray(0.5), 32.0);
pub const RED_PLASTIC: Material = Material::new(gray(0.0), rgb(0.5, 0.0, 0.0), rgb(0.7, 0.6, 0.6), 32.0);
pub const GREEN_PLASTIC: Material =
    Material::new(gray(0.0), rgb(0.1, 0.35, 0.1), rgb(0.45, 0.55, 0.45), 32.0);
pub const BLUE_PLASTIC: Material = Material::new(gray(0.0), rgb(0.0, 0.0, 0.5), rgb(0.6, 0.6, 0.7), 32.0);
pub const WHITE_PLASTIC: Material = Material::new(gray(0.0), gray(0.55), gray(0.7), 32.0);
pub const BLACK_RUBBER: Material = Material::new(gray(0.02), gray(0.01), gray(0.4), 10.0);
pub const GRAY_MATTE: Material = Material::new(gray(0.1), gray(0.5), gray(0.0), 1.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_name_resolves() {
        for name in PRESET_NAMES {
            assert!(Material::preset(name).is_some(), "missing preset {}", name);
        }
    }

    #[test]
    fn test_preset_lookup_is_case_insensitive() {
        assert_eq!(Material::preset("Silver"), Some(SILVER));
        assert_eq!(Material::preset("unobtainium"), None);
    }

    #[test]
    fn test_presets_are_opaque() {
        assert!(SILVER.is_opaque());
        assert!(!SILVER.with_alpha(0.3).is_opaque());
    }

    #[test]
    fn test_alpha_defaults_to_opaque_when_deserialized() {
        let json = r#"{
            "ambient": [0.1, 0.1, 0.1],
            "diffuse": [0.5, 0.5, 0.5],
            "specular": [0.0, 0.0, 0.0],
            "shininess": 4.0
        }"#;
        let material: Material = serde_json::from_str(json).unwrap();
        assert_eq!(material.alpha, 1.0);
        assert_eq!(material.diffuse, Vec3::splat(0.5));
    }
}
