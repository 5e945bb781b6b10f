//! Hit records for ray-object intersection.

use crate::material::MaterialHandle;
use ember_math::{Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Produced fresh per intersection test; carries the material by handle into
/// the scene's arena rather than by reference.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against the ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// UV texture coordinates
    pub u: f32,
    pub v: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material at the intersection point
    pub material: MaterialHandle,
}

impl HitRecord {
    /// Build a record, orienting the stored normal against the ray.
    ///
    /// `outward_normal` must be unit length and point out of the surface;
    /// `front_face` records which side the ray arrived from.
    pub fn with_face_normal(
        ray: &Ray,
        t: f32,
        p: Vec3,
        outward_normal: Vec3,
        u: f32,
        v: f32,
        material: MaterialHandle,
    ) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p,
            normal,
            t,
            u,
            v,
            front_face,
            material,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_opposes_incoming_ray() {
        let material = MaterialHandle::new(0);
        let outward = Vec3::Y;

        // Ray from above, against the outward normal: front face
        let ray = Ray::new_simple(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let rec = HitRecord::with_face_normal(&ray, 1.0, Vec3::ZERO, outward, 0.0, 0.0, material);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Y);

        // Ray from below, along the outward normal: back face, normal flips
        let ray = Ray::new_simple(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        let rec = HitRecord::with_face_normal(&ray, 1.0, Vec3::ZERO, outward, 0.0, 0.0, material);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3::Y);
    }
}
