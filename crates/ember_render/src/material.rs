//! Material scattering models.
//!
//! Materials are a closed enum dispatched with an exhaustive match, stored
//! in the scene's material arena and shared across shapes by handle. Each
//! variant decides how an incoming ray continues: a scattered ray plus an
//! attenuation color, or absorption. Scattered rays inherit the incoming
//! ray's time so motion blur stays consistent along a path.

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_in_unit_sphere, random_unit_vector};
use crate::texture::{Color, Texture, TextureHandle};
use ember_math::{Ray, Vec3};
use rand::RngCore;

/// Stable index of a material in the scene's material arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialHandle(u32);

impl MaterialHandle {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Result of a successful scatter event.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Multiplicative color factor for light carried along the scattered ray
    pub attenuation: Color,
    /// The continuation ray
    pub scattered: Ray,
}

/// Surface (and volume) scattering models.
#[derive(Debug, Clone)]
pub enum Material {
    /// Diffuse surface; albedo comes from a texture.
    Lambertian { albedo: TextureHandle },
    /// Specular surface with a fixed albedo and roughness.
    Metal { albedo: Color, fuzz: f32 },
    /// Specular surface with texture-driven albedo and roughness; the fuzz
    /// is read from the texture's first channel.
    TexturedMetal {
        albedo: TextureHandle,
        fuzz: TextureHandle,
    },
    /// Transparent refractive material (glass, water).
    Dielectric { ir: f32 },
    /// Emitter; never scatters.
    DiffuseLight { emit: TextureHandle },
    /// Volumetric scatterer; bounces into a uniformly random direction.
    Isotropic { albedo: TextureHandle },
}

impl Material {
    /// Lambertian material over a texture.
    pub fn lambertian(albedo: TextureHandle) -> Self {
        Self::Lambertian { albedo }
    }

    /// Metal with fixed albedo; fuzz is capped at 1.
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Self::Metal {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }

    /// Metal with texture-driven albedo and fuzz.
    pub fn textured_metal(albedo: TextureHandle, fuzz: TextureHandle) -> Self {
        Self::TexturedMetal { albedo, fuzz }
    }

    /// Dielectric with the given index of refraction.
    pub fn dielectric(ir: f32) -> Self {
        Self::Dielectric { ir }
    }

    /// Light source emitting its texture's value.
    pub fn diffuse_light(emit: TextureHandle) -> Self {
        Self::DiffuseLight { emit }
    }

    /// Isotropic volumetric material.
    pub fn isotropic(albedo: TextureHandle) -> Self {
        Self::Isotropic { albedo }
    }

    /// Scatter an incoming ray at a hit point.
    ///
    /// Returns `None` when the ray is absorbed. `textures` is the scene's
    /// texture arena, used to resolve texture-driven parameters.
    pub fn scatter(
        &self,
        textures: &[Texture],
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self {
            Material::Lambertian { albedo } => {
                let mut direction = rec.normal + random_unit_vector(rng);

                // Catch degenerate scatter direction
                if direction.length_squared() < 1e-8 {
                    direction = rec.normal;
                }

                Some(ScatterResult {
                    attenuation: textures[albedo.index()].value(textures, rec.u, rec.v, rec.p),
                    scattered: Ray::new(rec.p, direction, ray_in.time()),
                })
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let direction = reflected + *fuzz * random_in_unit_sphere(rng);
                Self::specular_bounce(*albedo, direction, rec, ray_in)
            }
            Material::TexturedMetal { albedo, fuzz } => {
                let a = textures[albedo.index()].value(textures, rec.u, rec.v, rec.p);
                let f = textures[fuzz.index()].value(textures, rec.u, rec.v, rec.p).x;

                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let direction = reflected + f * random_in_unit_sphere(rng);
                Self::specular_bounce(a, direction, rec, ray_in)
            }
            Material::Dielectric { ir } => {
                let refraction_ratio = if rec.front_face { 1.0 / ir } else { *ir };

                let unit_direction = ray_in.direction().normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let cannot_refract = refraction_ratio * sin_theta > 1.0;
                let direction = if cannot_refract
                    || reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
                {
                    reflect(unit_direction, rec.normal)
                } else {
                    refract(unit_direction, rec.normal, refraction_ratio)
                };

                Some(ScatterResult {
                    // Glass doesn't attenuate light
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, direction, ray_in.time()),
                })
            }
            Material::DiffuseLight { .. } => None,
            Material::Isotropic { albedo } => Some(ScatterResult {
                attenuation: textures[albedo.index()].value(textures, rec.u, rec.v, rec.p),
                scattered: Ray::new(rec.p, random_in_unit_sphere(rng), ray_in.time()),
            }),
        }
    }

    /// Get emitted light from this material at the given point.
    ///
    /// Only `DiffuseLight` emits; everything else returns black.
    pub fn emitted(&self, textures: &[Texture], u: f32, v: f32, p: Vec3) -> Color {
        match self {
            Material::DiffuseLight { emit } => textures[emit.index()].value(textures, u, v, p),
            _ => Color::ZERO,
        }
    }

    /// Shared tail of the metal variants: absorb rays that leave the
    /// normal's hemisphere.
    fn specular_bounce(
        attenuation: Color,
        direction: Vec3,
        rec: &HitRecord,
        ray_in: &Ray,
    ) -> Option<ScatterResult> {
        if direction.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation,
                scattered: Ray::new(rec.p, direction, ray_in.time()),
            })
        } else {
            None
        }
    }
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface using Snell's law.
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation for reflectance.
fn reflectance(cosine: f32, ref_idx: f32) -> f32 {
    let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn flat_hit(material: MaterialHandle) -> HitRecord {
        HitRecord {
            p: Vec3::ZERO,
            normal: Vec3::Y,
            t: 1.0,
            u: 0.0,
            v: 0.0,
            front_face: true,
            material,
        }
    }

    #[test]
    fn test_reflect_across_flat_surface() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let n = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(reflect(v, n), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_mirror_metal_reflects_exactly() {
        let mut rng = StdRng::seed_from_u64(1);
        let textures: Vec<Texture> = Vec::new();
        let metal = Material::metal(Color::new(0.8, 0.8, 0.8), 0.0);

        let ray_in = Ray::new_simple(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = flat_hit(MaterialHandle::new(0));

        let result = metal
            .scatter(&textures, &ray_in, &rec, &mut rng)
            .expect("mirror reflection should scatter");

        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-6);
        assert_eq!(result.attenuation, Color::new(0.8, 0.8, 0.8));
    }

    #[test]
    fn test_metal_fuzz_capped_at_one() {
        match Material::metal(Color::ONE, 7.0) {
            Material::Metal { fuzz, .. } => assert_eq!(fuzz, 1.0),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_metal_scatter_stays_in_hemisphere() {
        let mut rng = StdRng::seed_from_u64(5);
        let textures: Vec<Texture> = Vec::new();
        let metal = Material::metal(Color::ONE, 1.0);
        let rec = flat_hit(MaterialHandle::new(0));

        for _ in 0..100 {
            let ray_in = Ray::new_simple(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -0.2, 0.3));
            if let Some(result) = metal.scatter(&textures, &ray_in, &rec, &mut rng) {
                assert!(result.scattered.direction().dot(rec.normal) > 0.0);
            }
        }
    }

    #[test]
    fn test_textured_metal_reads_fuzz_from_first_channel() {
        let mut rng = StdRng::seed_from_u64(8);
        // Fuzz texture's first channel is zero; the other channels must be
        // ignored, leaving a perfect mirror
        let textures = vec![
            Texture::solid(Color::new(0.6, 0.5, 0.4)),
            Texture::solid(Color::new(0.0, 9.0, 9.0)),
        ];
        let metal = Material::textured_metal(TextureHandle::new(0), TextureHandle::new(1));

        let ray_in = Ray::new_simple(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = flat_hit(MaterialHandle::new(0));

        let result = metal
            .scatter(&textures, &ray_in, &rec, &mut rng)
            .expect("zero fuzz should reflect");

        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-6);
        assert_eq!(result.attenuation, Color::new(0.6, 0.5, 0.4));
    }

    #[test]
    fn test_textured_metal_absorbs_below_hemisphere() {
        let mut rng = StdRng::seed_from_u64(9);
        let textures = vec![
            Texture::solid(Color::ONE),
            Texture::solid(Color::new(1.0, 0.0, 0.0)),
        ];
        let metal = Material::textured_metal(TextureHandle::new(0), TextureHandle::new(1));
        let rec = flat_hit(MaterialHandle::new(0));

        // Grazing incidence: the mirror direction is barely above the
        // surface, so a full-strength fuzz perturbation frequently pushes
        // it below and the ray is absorbed
        let ray_in = Ray::new_simple(Vec3::new(-1.0, 1e-4, 0.0), Vec3::new(1.0, -1e-4, 0.0));

        let mut absorbed = 0;
        let mut scattered = 0;
        for _ in 0..100 {
            match metal.scatter(&textures, &ray_in, &rec, &mut rng) {
                Some(result) => {
                    scattered += 1;
                    assert!(result.scattered.direction().dot(rec.normal) > 0.0);
                }
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
        assert!(scattered > 0);
    }

    #[test]
    fn test_dielectric_matched_media_passes_straight_through() {
        let mut rng = StdRng::seed_from_u64(2);
        let textures: Vec<Texture> = Vec::new();
        let glass = Material::dielectric(1.0);

        // Normal incidence: Schlick reflectance is exactly zero, so the ray
        // refracts, and with a ratio of 1 Snell's law leaves it unchanged.
        let ray_in = Ray::new_simple(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let rec = flat_hit(MaterialHandle::new(0));

        let result = glass
            .scatter(&textures, &ray_in, &rec, &mut rng)
            .expect("dielectric always scatters");

        assert!((result.scattered.direction() - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-6);
        assert_eq!(result.attenuation, Color::ONE);
    }

    #[test]
    fn test_lambertian_always_scatters_with_texture_albedo() {
        let mut rng = StdRng::seed_from_u64(3);
        let textures = vec![Texture::solid(Color::new(0.4, 0.2, 0.1))];
        let mat = Material::lambertian(TextureHandle::new(0));
        let rec = flat_hit(MaterialHandle::new(0));

        for _ in 0..50 {
            let ray_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0), 0.25);
            let result = mat
                .scatter(&textures, &ray_in, &rec, &mut rng)
                .expect("lambertian always scatters");
            assert_eq!(result.attenuation, Color::new(0.4, 0.2, 0.1));
            // Time is inherited for motion blur consistency
            assert_eq!(result.scattered.time(), 0.25);
        }
    }

    #[test]
    fn test_diffuse_light_emits_and_never_scatters() {
        let mut rng = StdRng::seed_from_u64(4);
        let textures = vec![Texture::solid(Color::new(4.0, 4.0, 4.0))];
        let light = Material::diffuse_light(TextureHandle::new(0));
        let rec = flat_hit(MaterialHandle::new(0));

        let ray_in = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));
        assert!(light.scatter(&textures, &ray_in, &rec, &mut rng).is_none());
        assert_eq!(
            light.emitted(&textures, 0.0, 0.0, Vec3::ZERO),
            Color::new(4.0, 4.0, 4.0)
        );
    }

    #[test]
    fn test_non_emissive_materials_emit_black() {
        let textures = vec![Texture::solid(Color::ONE)];
        let mat = Material::lambertian(TextureHandle::new(0));
        assert_eq!(mat.emitted(&textures, 0.5, 0.5, Vec3::ONE), Color::ZERO);
    }

    #[test]
    fn test_isotropic_scatters_inside_unit_sphere() {
        let mut rng = StdRng::seed_from_u64(6);
        let textures = vec![Texture::solid(Color::new(0.7, 0.7, 0.7))];
        let fog = Material::isotropic(TextureHandle::new(0));
        let rec = flat_hit(MaterialHandle::new(0));

        for _ in 0..50 {
            let ray_in = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));
            let result = fog
                .scatter(&textures, &ray_in, &rec, &mut rng)
                .expect("isotropic always scatters");
            assert!(result.scattered.direction().length_squared() < 1.0);
            assert_eq!(result.attenuation, Color::new(0.7, 0.7, 0.7));
        }
    }
}
