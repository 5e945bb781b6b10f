//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative ray walking with a configurable bounce budget
//! - Emission folded into the radiance estimate
//! - Anti-aliasing via multi-sampling
//! - Gamma correction helpers for 8-bit output

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::camera::Camera;
use crate::sampling::gen_f32;
use crate::scene::Scene;
use crate::texture::Color;
use ember_math::{Interval, Ray};
use rand::RngCore;
use rayon::prelude::*;

/// Render configuration.
///
/// Width and height must be at least 2 (the pixel-to-viewport mapping
/// divides by `dimension - 1`) and `samples_per_pixel` at least 1; callers
/// are expected to validate before rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Background color when a ray doesn't hit anything
    pub background: Color,
    /// Whether to use the sky gradient instead of the solid background
    pub use_sky_gradient: bool,
    /// Base seed; every pixel derives its own RNG stream from this
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 225,
            samples_per_pixel: 32,
            max_depth: 8,
            background: Color::ZERO,
            use_sky_gradient: true,
            seed: 0,
        }
    }
}

/// Compute the color seen by a ray.
///
/// Walks the path iteratively, carrying the running attenuation product and
/// gathering emission at every bounce. A depth budget of 0 yields black;
/// absorbed rays end the path with whatever emission was gathered.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut radiance = Color::ZERO;
    let mut throughput = Color::ONE;
    let mut current = *ray;

    for _ in 0..depth {
        // The 0.001 lower bound suppresses self-intersection ("shadow acne")
        // from floating-point rounding at the previous hit point.
        let rec = match scene.hit(&current, Interval::new(0.001, f32::INFINITY)) {
            Some(rec) => rec,
            None => {
                let background = if config.use_sky_gradient {
                    sky_gradient(&current)
                } else {
                    config.background
                };
                return radiance + throughput * background;
            }
        };

        let material = scene.material(rec.material);
        radiance += throughput * material.emitted(scene.textures(), rec.u, rec.v, rec.p);

        match material.scatter(scene.textures(), &current, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                current = result.scattered;
            }
            None => return radiance,
        }
    }

    // Bounce budget exhausted; the tail of the path contributes nothing
    radiance
}

/// Background gradient from white at the horizon to sky blue straight up.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let t = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - t) * white + t * blue
}

/// Generate the camera ray for one sample of pixel (x, y).
///
/// Pixel (0, 0) is the top-left corner of the image; the vertical axis is
/// flipped into the camera's bottom-up viewport coordinates.
pub fn pixel_ray(
    camera: &Camera,
    config: &RenderConfig,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Ray {
    let s = (x as f32 + gen_f32(rng)) / (config.width - 1) as f32;
    let t = ((config.height - 1 - y) as f32 + gen_f32(rng)) / (config.height - 1) as f32;
    camera.get_ray(s, t, rng)
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let ray = pixel_ray(camera, config, x, y, rng);
        pixel_color += ray_color(&ray, scene, config.max_depth, config, rng);
    }

    // Average the samples; the result stays linear (no gamma here)
    pixel_color / config.samples_per_pixel as f32
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let r = (256.0 * intensity.clamp(linear_to_gamma(color.x))) as u8;
    let g = (256.0 * intensity.clamp(linear_to_gamma(color.y))) as u8;
    let b = (256.0 * intensity.clamp(linear_to_gamma(color.z))) as u8;
    [r, g, b]
}

/// Simple image buffer of linear colors, row-major, row 0 at the top.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to gamma-corrected RGB bytes (for display or saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 3) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }
}

/// Render the entire scene to an image buffer.
///
/// The image is split into buckets rendered in parallel with rayon. Every
/// pixel seeds its own RNG stream from the config seed, so the output is
/// deterministic regardless of thread scheduling.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let buckets = generate_buckets(config.width, config.height, DEFAULT_BUCKET_SIZE);
    log::info!(
        "rendering {}x{} at {} spp, depth {}, {} buckets",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        buckets.len()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, camera, scene, config))
        .collect();

    let mut image = ImageBuffer::new(config.width, config.height);
    for result in &results {
        let bucket = result.bucket;
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let color = result.pixels[(local_y * bucket.width + local_x) as usize];
                image.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }
    }

    image
}
