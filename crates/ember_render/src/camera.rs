//! Camera for ray generation.

use crate::sampling::{gen_range_f32, random_in_unit_disk};
use ember_math::{Ray, Vec3};
use rand::RngCore;

/// Camera mapping normalized image-plane coordinates to world-space rays.
///
/// Derives an orthonormal basis from look-from/look-at/up and places the
/// viewport on the focus plane. A non-zero aperture jitters ray origins
/// across the lens disk (depth of field); each ray also carries a random
/// time in the shutter interval (motion blur).
#[derive(Debug, Clone)]
pub struct Camera {
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    vfov: f32,         // Vertical field of view in degrees
    aspect_ratio: f32,
    aperture: f32,
    focus_dist: f32,   // Distance from camera to plane of perfect focus

    // Shutter open/close times
    time0: f32,
    time1: f32,

    // Cached computed values (set by initialize())
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_dist: 1.0,
            time0: 0.0,
            time1: 1.0,
            origin: Vec3::ZERO,
            lower_left_corner: Vec3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            lens_radius: 0.0,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Set the viewport aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the shutter open/close times.
    pub fn with_shutter(mut self, time0: f32, time1: f32) -> Self {
        self.time0 = time0;
        self.time1 = time1;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = self.aspect_ratio * viewport_height;

        // Orthonormal basis: w points from the target back to the camera
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        self.origin = self.look_from;
        self.horizontal = self.focus_dist * viewport_width * self.u;
        self.vertical = self.focus_dist * viewport_height * self.v;
        self.lower_left_corner =
            self.origin - self.horizontal / 2.0 - self.vertical / 2.0 - self.focus_dist * self.w;

        self.lens_radius = self.aperture / 2.0;
    }

    /// Generate a ray for normalized image-plane coordinates s, t in [0, 1].
    ///
    /// (0, 0) is the lower-left corner of the viewport.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin - offset,
            gen_range_f32(rng, self.time0, self.time1),
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
