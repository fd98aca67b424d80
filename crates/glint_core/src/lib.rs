//! Glint Core - scene data for the glint ray tracer.
//!
//! This crate provides:
//!
//! - **Materials**: Phong coefficients plus a table of named presets
//! - **Lights**: positional and spot lights with the Phong light model
//! - **Textures**: procedural and image textures with a load cache
//! - **Scene descriptions**: JSON scene files and their validation
//!
//! # Example
//!
//! ```ignore
//! use glint_core::SceneDescription;
//!
//! let scene = SceneDescription::load("scenes/demo.json")?;
//! println!("{} lights", scene.lights.len());
//! ```

pub mod description;
pub mod light;
pub mod material;
pub mod texture;

// Re-export commonly used types
pub use description::{
    CameraDescription, MaterialDescription, ObjectDescription, Projection, SceneDescription,
    SceneError, SceneResult, ShapeDescription, TextureDescription,
};
pub use light::{Attenuation, Light, LightColor, PositionalLight, SpotLight};
pub use material::Material;
pub use texture::{Filter, Texture, TextureCache, TextureError, TextureResult};
