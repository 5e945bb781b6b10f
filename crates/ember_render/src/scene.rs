//! Scene: shape list plus texture/material arenas.

use crate::hittable::HitRecord;
use crate::material::{Material, MaterialHandle};
use crate::shape::Shape;
use crate::texture::{Color, Texture, TextureHandle};
use ember_math::{Aabb, Interval, Ray};

/// A renderable scene.
///
/// Owns its shapes and arenas of textures and materials. Shapes refer to
/// materials (and materials to textures) by copyable handle, so one material
/// instance can back any number of shapes. Everything is immutable once
/// construction ends, which makes the scene safe to share across render
/// threads.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    textures: Vec<Texture>,
    materials: Vec<Material>,
    objects: Vec<Shape>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a texture to the arena, returning its handle.
    pub fn add_texture(&mut self, texture: Texture) -> TextureHandle {
        let handle = TextureHandle::new(self.textures.len());
        self.textures.push(texture);
        handle
    }

    /// Shorthand for adding a solid-color texture.
    pub fn add_solid(&mut self, color: Color) -> TextureHandle {
        self.add_texture(Texture::solid(color))
    }

    /// Add a material to the arena, returning its handle.
    pub fn add_material(&mut self, material: Material) -> MaterialHandle {
        let handle = MaterialHandle::new(self.materials.len());
        self.materials.push(material);
        handle
    }

    /// Add a shape to the scene.
    pub fn add(&mut self, shape: Shape) {
        self.objects.push(shape);
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene has no shapes.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Resolve a material handle.
    pub fn material(&self, handle: MaterialHandle) -> &Material {
        &self.materials[handle.index()]
    }

    /// The texture arena, for resolving texture-driven material parameters.
    pub fn textures(&self) -> &[Texture] {
        &self.textures
    }

    /// Find the nearest intersection along a ray within the interval.
    ///
    /// Linear scan over every shape, shrinking the interval to the closest
    /// t found so far. O(n) per ray; there is no spatial partitioning.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }

    /// The box bounding every shape over the given time range.
    pub fn bounding_box(&self, time0: f32, time1: f32) -> Aabb {
        self.objects
            .iter()
            .fold(Aabb::EMPTY, |bbox, object| {
                Aabb::surrounding(&bbox, &object.bounding_box(time0, time1))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_math::Vec3;

    #[test]
    fn test_empty_scene_never_hits() {
        let scene = Scene::new();
        assert!(scene.is_empty());

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.3, -0.2, -1.0));
        assert!(scene.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_nearest_shape_wins() {
        let mut scene = Scene::new();
        let gray = scene.add_solid(Color::splat(0.5));
        let near = scene.add_material(Material::lambertian(gray));
        let far = scene.add_material(Material::metal(Color::ONE, 0.0));

        scene.add(Shape::sphere(Vec3::new(0.0, 0.0, -10.0), 1.0, far));
        scene.add(Shape::sphere(Vec3::new(0.0, 0.0, -3.0), 1.0, near));
        assert_eq!(scene.len(), 2);

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = scene.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 2.0).abs() < 1e-4);
        assert_eq!(rec.material, near);
    }

    #[test]
    fn test_interval_excludes_closer_shape() {
        let mut scene = Scene::new();
        let gray = scene.add_solid(Color::splat(0.5));
        let mat = scene.add_material(Material::lambertian(gray));

        scene.add(Shape::sphere(Vec3::new(0.0, 0.0, -3.0), 1.0, mat));
        scene.add(Shape::sphere(Vec3::new(0.0, 0.0, -10.0), 1.0, mat));

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = scene.hit(&ray, Interval::new(5.0, f32::INFINITY)).unwrap();
        assert!((rec.t - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_scene_bounding_box_covers_all_shapes() {
        let mut scene = Scene::new();
        let gray = scene.add_solid(Color::splat(0.5));
        let mat = scene.add_material(Material::lambertian(gray));

        scene.add(Shape::sphere(Vec3::new(-2.0, 0.0, 0.0), 1.0, mat));
        scene.add(Shape::sphere(Vec3::new(3.0, 0.0, 0.0), 1.0, mat));

        let bbox = scene.bounding_box(0.0, 1.0);
        assert_eq!(bbox.x.min, -3.0);
        assert_eq!(bbox.x.max, 4.0);
    }
}
