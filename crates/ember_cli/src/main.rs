//! Command-line renderer.

use anyhow::Context;
use clap::Parser;
use ember_render::{render, RenderConfig};
use log::{info, LevelFilter};

mod scenes;

use scenes::Preset;

/// A small Monte Carlo path tracer
#[derive(Parser)]
#[command(name = "ember")]
#[command(about = "A small Monte Carlo path tracer")]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value = "400", value_parser = clap::value_parser!(u32).range(2..))]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "225", value_parser = clap::value_parser!(u32).range(2..))]
    height: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "32", value_parser = clap::value_parser!(u32).range(1..))]
    samples_per_pixel: u32,

    /// Maximum ray bounce depth
    #[arg(long, default_value = "8")]
    max_depth: u32,

    /// Scene preset to render
    #[arg(long, value_enum, default_value = "perlin")]
    scene: Preset,

    /// Seed for scene placement and sampling
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Output file path (8-bit PNG with gamma correction)
    #[arg(short, long, default_value = "output.png")]
    output: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let aspect_ratio = args.width as f32 / args.height as f32;
    let built = scenes::build(args.scene, aspect_ratio, args.seed);
    info!(
        "scene {:?}: {} shapes, seed {}",
        args.scene,
        built.scene.len(),
        args.seed
    );

    let config = RenderConfig {
        width: args.width,
        height: args.height,
        samples_per_pixel: args.samples_per_pixel,
        max_depth: args.max_depth,
        background: built.background,
        use_sky_gradient: built.use_sky_gradient,
        seed: args.seed,
    };

    let start = std::time::Instant::now();
    let image = render(&built.camera, &built.scene, &config);
    info!("rendered in {:?}", start.elapsed());

    let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
        .context("render buffer does not match image dimensions")?;
    rgb.save(&args.output)
        .with_context(|| format!("failed to write {}", args.output))?;
    info!("saved {}", args.output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_render_settings_are_rejected() {
        // The pixel-to-viewport mapping needs at least two pixels per axis,
        // and averaging needs at least one sample
        assert!(Args::try_parse_from(["ember", "--width", "1"]).is_err());
        assert!(Args::try_parse_from(["ember", "--height", "1"]).is_err());
        assert!(Args::try_parse_from(["ember", "--samples-per-pixel", "0"]).is_err());
        assert!(Args::try_parse_from(["ember"]).is_ok());
    }
}
