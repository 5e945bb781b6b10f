//! Scene presets.

use clap::ValueEnum;
use ember_render::{
    gen_f32, gen_range_f32, random_color, random_color_range, Camera, Color, Material, Scene,
    Shape, Texture, Vec3,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Built-in scenes selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Preset {
    /// Random sphere field with motion blur over a checkered ground
    Cover,
    /// Two giant checkered spheres
    Checkered,
    /// Gradient-noise spheres
    Perlin,
    /// Emissive sphere over a noise ground, with fog and textured metal
    Lit,
}

/// A fully built scene plus the camera and background that frame it.
pub struct SceneDescription {
    pub scene: Scene,
    pub camera: Camera,
    pub use_sky_gradient: bool,
    pub background: Color,
}

/// Build a preset scene. The seed drives all random placement, so the same
/// seed reproduces the same scene.
pub fn build(preset: Preset, aspect_ratio: f32, seed: u64) -> SceneDescription {
    match preset {
        Preset::Cover => cover(aspect_ratio, seed),
        Preset::Checkered => checkered(aspect_ratio),
        Preset::Perlin => perlin(aspect_ratio, seed),
        Preset::Lit => lit(aspect_ratio, seed),
    }
}

fn camera_at(
    look_from: Vec3,
    look_at: Vec3,
    vfov: f32,
    aperture: f32,
    aspect_ratio: f32,
) -> Camera {
    let mut camera = Camera::new()
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(vfov, aperture, 10.0)
        .with_aspect_ratio(aspect_ratio)
        .with_shutter(0.0, 1.0);
    camera.initialize();
    camera
}

/// The book-cover scene: a checkered ground sphere under a grid of small
/// bouncing diffuse, metal, and glass spheres, plus three hero spheres.
fn cover(aspect_ratio: f32, seed: u64) -> SceneDescription {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut scene = Scene::new();

    let even = scene.add_solid(Color::new(0.2, 0.3, 0.1));
    let odd = scene.add_solid(Color::new(0.9, 0.9, 0.9));
    let checker = scene.add_texture(Texture::checker(even, odd));
    let ground = scene.add_material(Material::lambertian(checker));
    scene.add(Shape::sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(&mut rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(&mut rng),
                0.2,
                b as f32 + 0.9 * gen_f32(&mut rng),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                let albedo = random_color(&mut rng) * random_color(&mut rng);
                let tex = scene.add_solid(albedo);
                let mat = scene.add_material(Material::lambertian(tex));
                let center2 = center + Vec3::new(0.0, gen_range_f32(&mut rng, 0.0, 0.5), 0.0);
                scene.add(Shape::moving_sphere(center, center2, 0.0, 1.0, 0.2, mat));
            } else if choose_mat < 0.95 {
                let albedo = random_color_range(&mut rng, 0.5, 1.0);
                let fuzz = gen_range_f32(&mut rng, 0.0, 0.5);
                let mat = scene.add_material(Material::metal(albedo, fuzz));
                scene.add(Shape::sphere(center, 0.2, mat));
            } else {
                let mat = scene.add_material(Material::dielectric(1.5));
                scene.add(Shape::sphere(center, 0.2, mat));
            }
        }
    }

    let glass = scene.add_material(Material::dielectric(1.5));
    scene.add(Shape::sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, glass));

    let brown = scene.add_solid(Color::new(0.4, 0.2, 0.1));
    let matte = scene.add_material(Material::lambertian(brown));
    scene.add(Shape::sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, matte));

    let steel = scene.add_material(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));
    scene.add(Shape::sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, steel));

    SceneDescription {
        scene,
        camera: camera_at(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, 20.0, 0.1, aspect_ratio),
        use_sky_gradient: true,
        background: Color::ZERO,
    }
}

fn checkered(aspect_ratio: f32) -> SceneDescription {
    let mut scene = Scene::new();

    let even = scene.add_solid(Color::new(0.2, 0.3, 0.2));
    let odd = scene.add_solid(Color::new(0.9, 0.9, 0.9));
    let checker = scene.add_texture(Texture::checker(even, odd));
    let mat = scene.add_material(Material::lambertian(checker));

    scene.add(Shape::sphere(Vec3::new(0.0, -10.0, 0.0), 10.0, mat));
    scene.add(Shape::sphere(Vec3::new(0.0, 10.0, 0.0), 10.0, mat));

    SceneDescription {
        scene,
        camera: camera_at(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, 20.0, 0.0, aspect_ratio),
        use_sky_gradient: true,
        background: Color::ZERO,
    }
}

fn perlin(aspect_ratio: f32, seed: u64) -> SceneDescription {
    let mut scene = Scene::new();

    let noise = scene.add_texture(Texture::noise(seed, 4.0));
    let mat = scene.add_material(Material::lambertian(noise));

    scene.add(Shape::sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, mat));
    scene.add(Shape::sphere(Vec3::new(0.0, 2.0, 0.0), 2.0, mat));

    SceneDescription {
        scene,
        camera: camera_at(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, 20.0, 0.0, aspect_ratio),
        use_sky_gradient: true,
        background: Color::ZERO,
    }
}

/// A dark scene lit by an emissive sphere, with an isotropic fog ball and a
/// checker-driven metal sphere.
fn lit(aspect_ratio: f32, seed: u64) -> SceneDescription {
    let mut scene = Scene::new();

    let noise = scene.add_texture(Texture::noise(seed, 4.0));
    let ground = scene.add_material(Material::lambertian(noise));
    scene.add(Shape::sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground));

    let glow = scene.add_solid(Color::new(4.0, 4.0, 4.0));
    let light = scene.add_material(Material::diffuse_light(glow));
    scene.add(Shape::sphere(Vec3::new(0.0, 7.0, 0.0), 2.0, light));

    let haze = scene.add_solid(Color::new(0.8, 0.8, 0.9));
    let fog = scene.add_material(Material::isotropic(haze));
    scene.add(Shape::sphere(Vec3::new(-4.0, 2.0, 0.0), 2.0, fog));

    let even = scene.add_solid(Color::new(0.8, 0.6, 0.2));
    let odd = scene.add_solid(Color::new(0.9, 0.9, 0.9));
    let plating = scene.add_texture(Texture::checker(even, odd));
    let roughness = scene.add_solid(Color::splat(0.2));
    let metal = scene.add_material(Material::textured_metal(plating, roughness));
    scene.add(Shape::sphere(Vec3::new(4.0, 2.0, 0.0), 2.0, metal));

    SceneDescription {
        scene,
        camera: camera_at(
            Vec3::new(26.0, 3.0, 6.0),
            Vec3::new(0.0, 2.0, 0.0),
            20.0,
            0.0,
            aspect_ratio,
        ),
        use_sky_gradient: false,
        background: Color::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_scene_is_reproducible_per_seed() {
        let a = build(Preset::Cover, 16.0 / 9.0, 5);
        let b = build(Preset::Cover, 16.0 / 9.0, 5);
        assert_eq!(a.scene.len(), b.scene.len());

        let c = build(Preset::Cover, 16.0 / 9.0, 6);
        // Different seeds almost surely place a different number of spheres
        assert!(a.scene.len() > 4);
        assert!(c.scene.len() > 4);
    }

    #[test]
    fn test_presets_have_shapes() {
        for preset in [Preset::Cover, Preset::Checkered, Preset::Perlin, Preset::Lit] {
            let built = build(preset, 16.0 / 9.0, 1);
            assert!(!built.scene.is_empty());
        }
    }
}
