//! Procedural textures.
//!
//! Textures form a closed enum dispatched with an exhaustive match. They are
//! stored in the scene's texture arena and refer to each other by handle, so
//! composite textures (checker) never carry shared-ownership pointers.

use crate::perlin::Perlin;
use ember_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Stable index of a texture in the scene's texture arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureHandle(u32);

impl TextureHandle {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A procedural texture: a pure function from (u, v, point) to a color.
#[derive(Debug, Clone)]
pub enum Texture {
    /// Fixed color everywhere.
    Solid { color: Color },
    /// 3D checkerboard whose cells follow the zero-crossings of
    /// sin(10x)*sin(10y)*sin(10z); sub-textures live in the same arena.
    Checker {
        even: TextureHandle,
        odd: TextureHandle,
    },
    /// Gray gradient noise, remapped from [-1, 1] to [0, 1].
    Noise { perlin: Perlin, scale: f32 },
}

impl Texture {
    /// Solid color texture.
    pub fn solid(color: Color) -> Self {
        Self::Solid { color }
    }

    /// Checker texture over two sub-textures already in the arena.
    pub fn checker(even: TextureHandle, odd: TextureHandle) -> Self {
        Self::Checker { even, odd }
    }

    /// Noise texture with its own seeded gradient table.
    pub fn noise(seed: u64, scale: f32) -> Self {
        Self::Noise {
            perlin: Perlin::new(seed),
            scale,
        }
    }

    /// Evaluate the texture at surface coordinates (u, v) and point p.
    ///
    /// `arena` is the scene's texture storage, needed to resolve the
    /// sub-textures of composite variants.
    pub fn value(&self, arena: &[Texture], u: f32, v: f32, p: Vec3) -> Color {
        match self {
            Texture::Solid { color } => *color,
            Texture::Checker { even, odd } => {
                let sines = (10.0 * p.x).sin() * (10.0 * p.y).sin() * (10.0 * p.z).sin();
                let handle = if sines < 0.0 { *odd } else { *even };
                arena[handle.index()].value(arena, u, v, p)
            }
            Texture::Noise { perlin, scale } => {
                Color::ONE * 0.5 * (1.0 + perlin.noise(*scale * p))
            }
        }
    }
}
