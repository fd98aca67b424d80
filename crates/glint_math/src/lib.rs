//! Math types shared by the glint crates.
//!
//! Vectors come from `glam` (single precision); this crate adds the ray,
//! interval and color conventions the tracer is written against.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// Color type alias (linear RGB, nominally 0-1 but allowed to exceed it).
pub type Color = Vec3;

/// Offset applied along a surface normal before casting secondary rays,
/// so a shadow feeler or reflection does not re-hit its own surface.
pub const EPSILON: f32 = 1.0e-4;

/// Reflect `v` about the normal `n`.
///
/// `n` must be unit length; `v` may have any length.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Unit vector pointing from `from` towards `to`.
#[inline]
pub fn pointing_vector(from: Vec3, to: Vec3) -> Vec3 {
    (to - from).normalize()
}

/// Clamp every channel of a color into [0, 1].
#[inline]
pub fn clamp_color(color: Color) -> Color {
    color.clamp(Color::ZERO, Color::ONE)
}
