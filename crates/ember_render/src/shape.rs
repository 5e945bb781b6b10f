//! Geometric primitives.

use crate::hittable::HitRecord;
use crate::material::MaterialHandle;
use ember_math::{Aabb, Interval, Ray, Vec3};
use std::f32::consts::PI;

/// Geometric primitives the scene can contain.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Static sphere.
    Sphere {
        center: Vec3,
        radius: f32,
        material: MaterialHandle,
    },
    /// Sphere whose center moves linearly from `center0` (at `time0`) to
    /// `center1` (at `time1`). Times outside the interval extrapolate.
    MovingSphere {
        center0: Vec3,
        center1: Vec3,
        time0: f32,
        time1: f32,
        radius: f32,
        material: MaterialHandle,
    },
}

impl Shape {
    /// Create a static sphere. Negative radius values are clamped to 0.
    pub fn sphere(center: Vec3, radius: f32, material: MaterialHandle) -> Self {
        Self::Sphere {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Create a moving sphere with keyframe centers at `time0` and `time1`.
    pub fn moving_sphere(
        center0: Vec3,
        center1: Vec3,
        time0: f32,
        time1: f32,
        radius: f32,
        material: MaterialHandle,
    ) -> Self {
        Self::MovingSphere {
            center0,
            center1,
            time0,
            time1,
            radius: radius.max(0.0),
            material,
        }
    }

    /// The sphere's center at the given time.
    pub fn center_at(&self, time: f32) -> Vec3 {
        match self {
            Shape::Sphere { center, .. } => *center,
            Shape::MovingSphere {
                center0,
                center1,
                time0,
                time1,
                ..
            } => *center0 + ((time - time0) / (time1 - time0)) * (*center1 - *center0),
        }
    }

    fn radius(&self) -> f32 {
        match self {
            Shape::Sphere { radius, .. } => *radius,
            Shape::MovingSphere { radius, .. } => *radius,
        }
    }

    fn material(&self) -> MaterialHandle {
        match self {
            Shape::Sphere { material, .. } => *material,
            Shape::MovingSphere { material, .. } => *material,
        }
    }

    /// Test if a ray hits this shape within the given interval.
    ///
    /// The ray's direction must be non-degenerate; a zero-length direction
    /// is a caller error.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let center = self.center_at(ray.time());
        let radius = self.radius();

        let oc = ray.origin() - center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - radius * radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        let outward_normal = (p - center) / radius;
        let (u, v) = sphere_uv(outward_normal);

        Some(HitRecord::with_face_normal(
            ray,
            root,
            p,
            outward_normal,
            u,
            v,
            self.material(),
        ))
    }

    /// The axis-aligned box bounding the shape over the given time range.
    pub fn bounding_box(&self, time0: f32, time1: f32) -> Aabb {
        let rvec = Vec3::splat(self.radius());
        match self {
            Shape::Sphere { center, .. } => Aabb::from_points(*center - rvec, *center + rvec),
            Shape::MovingSphere { .. } => {
                let c0 = self.center_at(time0);
                let c1 = self.center_at(time1);
                Aabb::surrounding(
                    &Aabb::from_points(c0 - rvec, c0 + rvec),
                    &Aabb::from_points(c1 - rvec, c1 + rvec),
                )
            }
        }
    }
}

/// UV coordinates for a point on the unit sphere.
///
/// theta is the angle down from +Y, phi the angle around the Y axis from -X.
fn sphere_uv(p: Vec3) -> (f32, f32) {
    let theta = (-p.y).acos();
    let phi = (-p.z).atan2(p.x) + PI;

    (phi / (2.0 * PI), theta / PI)
}
