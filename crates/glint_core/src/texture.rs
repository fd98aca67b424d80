//! Texture loading and caching for materials.
//!
//! Textures are sampled by the tracer at a hit's (u, v) coordinates and
//! blended with the lighting result.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glint_math::{Color, Interval};
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture {0} has no pixels")]
    Empty(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// How samples between texel centers are reconstructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    Bilinear,
}

/// A grid of RGB texels.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Texels in row-major order, top row first, channels in [0, 1]
    pub pixels: Vec<Color>,

    pub filter: Filter,

    /// Where the texture came from (for debugging)
    pub name: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>, name: impl Into<String>) -> Self {
        Self {
            width,
            height,
            pixels,
            filter: Filter::Bilinear,
            name: name.into(),
        }
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Color) -> Self {
        Self::new(1, 1, vec![color], "<solid>")
    }

    /// A `squares` x `squares` checkerboard alternating between `a` and `b`.
    ///
    /// The square at (u, v) = (0, 0) is `a`.
    pub fn checkerboard(a: Color, b: Color, squares: u32) -> Self {
        let squares = squares.max(1);
        let mut pixels = Vec::with_capacity((squares * squares) as usize);
        for row in 0..squares {
            // Row 0 is the top of the image, v = 1
            let from_bottom = squares - 1 - row;
            for col in 0..squares {
                pixels.push(if (col + from_bottom) % 2 == 0 { a } else { b });
            }
        }

        let mut texture = Self::new(squares, squares, pixels, "<checkerboard>");
        texture.filter = Filter::Nearest;
        texture
    }

    /// Sample the texture at UV coordinates.
    ///
    /// UV coordinates are clamped to [0, 1], with (0, 0) at bottom-left.
    /// A texture without texels samples as black.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        if self.width == 0 || self.height == 0 {
            return Color::ZERO;
        }

        let u = Interval::UNIT.clamp(u);
        let v = Interval::UNIT.clamp(v);

        match self.filter {
            Filter::Nearest => {
                let x = ((u * self.width as f32) as u32).min(self.width - 1);
                let y = (((1.0 - v) * self.height as f32) as u32).min(self.height - 1);
                self.get_pixel(x, y)
            }
            Filter::Bilinear => {
                let x = u * (self.width as f32 - 1.0);
                let y = (1.0 - v) * (self.height as f32 - 1.0); // Flip V for image coordinates

                let x0 = x.floor() as u32;
                let y0 = y.floor() as u32;
                let x1 = (x0 + 1).min(self.width - 1);
                let y1 = (y0 + 1).min(self.height - 1);

                let fx = x.fract();
                let fy = y.fract();

                let top = self.get_pixel(x0, y0).lerp(self.get_pixel(x1, y0), fx);
                let bottom = self.get_pixel(x0, y1).lerp(self.get_pixel(x1, y1), fx);
                top.lerp(bottom, fy)
            }
        }
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> Color {
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels.get(idx).copied().unwrap_or(Color::ZERO)
    }
}

/// Cache for loaded textures.
///
/// Textures are loaded on-demand and cached for reuse.
pub struct TextureCache {
    /// Cached textures by file path
    textures: HashMap<String, Arc<Texture>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load a texture from file, using cache if available.
    pub fn load(&mut self, path: &str) -> TextureResult<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let full_path = self.resolve_path(path);
        let texture = Arc::new(load_texture_file(&full_path)?);
        self.textures.insert(path.to_string(), texture.clone());

        log::debug!(
            "Loaded texture: {} ({}x{})",
            path,
            texture.width,
            texture.height
        );

        Ok(texture)
    }

    /// Check if a texture is cached.
    pub fn is_cached(&self, path: &str) -> bool {
        self.textures.contains_key(path)
    }

    /// Get the number of cached textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Resolve a path relative to the base directory.
    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a texture from a file path.
fn load_texture_file(path: &Path) -> TextureResult<Texture> {
    let name = path.to_string_lossy().to_string();
    let img = image::open(path).map_err(|source| TextureError::Load {
        path: name.clone(),
        source,
    })?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::Empty(name));
    }

    let pixels = rgb
        .pixels()
        .map(|p| Color::new(p[0] as f32, p[1] as f32, p[2] as f32) / 255.0)
        .collect();

    Ok(Texture::new(width, height, pixels, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_texture_samples_black() {
        let tex = Texture::new(0, 0, Vec::new(), "empty");
        assert_eq!(tex.sample(0.5, 0.5), Color::ZERO);

        let mut nearest = Texture::new(0, 4, Vec::new(), "empty");
        nearest.filter = Filter::Nearest;
        assert_eq!(nearest.sample(1.0, 0.0), Color::ZERO);
    }

    #[test]
    fn test_solid_color_texture() {
        let tex = Texture::solid_color(Color::new(1.0, 0.5, 0.0));
        assert_eq!(tex.width, 1);
        assert_eq!(tex.height, 1);

        let sample = tex.sample(0.5, 0.5);
        assert!((sample - Color::new(1.0, 0.5, 0.0)).length() < 0.001);
    }

    #[test]
    fn test_checkerboard_corners() {
        let a = Color::ONE;
        let b = Color::ZERO;
        let tex = Texture::checkerboard(a, b, 4);

        assert_eq!(tex.sample(0.01, 0.01), a);
        assert_eq!(tex.sample(0.3, 0.01), b);
        assert_eq!(tex.sample(0.3, 0.3), a);
        // 4 squares: the top-right square has the same parity as the bottom-left one
        assert_eq!(tex.sample(0.99, 0.99), a);
    }

    #[test]
    fn test_sample_clamps_out_of_range_uv() {
        let tex = Texture::checkerboard(Color::ONE, Color::ZERO, 2);
        assert_eq!(tex.sample(-3.0, -3.0), tex.sample(0.0, 0.0));
        assert_eq!(tex.sample(7.0, 0.0), tex.sample(1.0, 0.0));
    }

    #[test]
    fn test_bilinear_midpoint() {
        let tex = Texture::new(2, 1, vec![Color::ZERO, Color::ONE], "ramp");
        let mid = tex.sample(0.5, 0.5);
        assert!((mid - Color::splat(0.5)).length() < 1e-5);
    }

    #[test]
    fn test_texture_cache_missing_file() {
        let mut cache = TextureCache::with_base_dir("/nonexistent");
        assert!(cache.is_empty());
        assert!(cache.load("missing.png").is_err());
        assert!(!cache.is_cached("missing.png"));
        assert_eq!(cache.len(), 0);
    }
}
