//! Ember - CPU path tracing core
//!
//! A Monte Carlo path tracer: spheres (static and moving), procedural
//! textures, a small set of physically-motivated materials, a thin-lens
//! camera with motion blur, and an iterative light-transport integrator.
//! Scenes are tested by linear scan; there is no acceleration structure.

mod bucket;
mod camera;
mod hittable;
mod material;
mod perlin;
mod renderer;
mod sampling;
mod scene;
mod shape;
mod texture;

pub use bucket::{generate_buckets, pixel_rng, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use hittable::HitRecord;
pub use material::{Material, MaterialHandle, ScatterResult};
pub use perlin::Perlin;
pub use renderer::{
    color_to_rgb8, linear_to_gamma, pixel_ray, ray_color, render, render_pixel, sky_gradient,
    ImageBuffer, RenderConfig,
};
pub use sampling::{
    gen_f32, gen_range_f32, random_color, random_color_range, random_in_unit_disk,
    random_in_unit_sphere, random_unit_vector,
};
pub use scene::Scene;
pub use shape::Shape;
pub use texture::{Color, Texture, TextureHandle};

/// Re-export common math types from ember_math
pub use ember_math::{Aabb, Interval, Ray, Vec3};
