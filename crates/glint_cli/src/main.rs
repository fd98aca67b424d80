use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};

use glint_core::{
    material::{BLACK_PLASTIC, GRAY_MATTE, RUBY, SILVER},
    CameraDescription, LightColor, ObjectDescription, PositionalLight, Projection,
    SceneDescription, ShapeDescription, SpotLight, TextureCache, TextureDescription,
};
use glint_math::{Color, Vec3};
use glint_renderer::{render, Antialiasing, RenderConfig, Scene, TransparencyOrder};

/// Render a scene with the recursive ray tracer and save it as a PNG.
#[derive(Parser, Debug)]
#[command(name = "glint", version, about)]
struct Args {
    /// Scene description (JSON). Renders the built-in demo when omitted.
    scene: Option<PathBuf>,

    /// Output image path
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// Override the scene's image width
    #[arg(long)]
    width: Option<u32>,

    /// Override the scene's image height
    #[arg(long)]
    height: Option<u32>,

    /// Reflection recursion depth
    #[arg(short, long, default_value_t = 3)]
    depth: u32,

    /// Trace a 3x3 grid of rays per pixel
    #[arg(long)]
    supersample: bool,

    /// Render on the calling thread only
    #[arg(long)]
    single_threaded: bool,

    /// Composite transparent surfaces by distance along the ray instead of
    /// distance to the first light
    #[arg(long)]
    eye_order: bool,

    /// Switch off the light with this index (repeatable)
    #[arg(long = "light-off", value_name = "N")]
    lights_off: Vec<usize>,

    /// Move light N by (DX, DY, DZ) (repeatable)
    #[arg(
        long = "move-light",
        num_args = 4,
        value_names = ["N", "DX", "DY", "DZ"],
        allow_negative_numbers = true,
        action = ArgAction::Append
    )]
    move_light: Vec<f32>,
}

impl Args {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            max_depth: self.depth,
            antialiasing: if self.supersample {
                Antialiasing::Supersample3x3
            } else {
                Antialiasing::Single
            },
            transparency: if self.eye_order {
                TransparencyOrder::DistanceToEye
            } else {
                TransparencyOrder::DistanceToLight
            },
            parallel: !self.single_threaded,
        }
    }

    /// Apply resolution and light overrides to a loaded description.
    fn apply_overrides(&self, desc: &mut SceneDescription) -> Result<()> {
        if let Some(width) = self.width {
            desc.camera.width = width;
        }
        if let Some(height) = self.height {
            desc.camera.height = height;
        }

        let light_count = desc.lights.len();
        for &index in &self.lights_off {
            let light = desc
                .lights
                .get_mut(index)
                .with_context(|| format!("--light-off {index}: scene has {light_count} lights"))?;
            light.set_on(false);
            log::info!("Light {} switched off", index);
        }

        for chunk in self.move_light.chunks_exact(4) {
            let index = chunk[0];
            if index < 0.0 || index.fract() != 0.0 {
                bail!("--move-light: light index {index} is not a whole number");
            }
            let index = index as usize;
            let offset = Vec3::new(chunk[1], chunk[2], chunk[3]);
            let light = desc
                .lights
                .get_mut(index)
                .with_context(|| format!("--move-light {index}: scene has {light_count} lights"))?;
            light.translate(offset);
            log::info!("Light {} moved to {}", index, light.position());
        }

        desc.validate().context("invalid scene after applying overrides")?;
        Ok(())
    }
}

/// Checkerboard floor, a silver sphere, a ruby glass sphere, a white light
/// and a spot light looking down on the spheres.
fn demo_scene() -> SceneDescription {
    let checker = TextureDescription::Checkerboard {
        a: SILVER.diffuse,
        b: BLACK_PLASTIC.diffuse,
        squares: 8,
    };

    SceneDescription {
        camera: CameraDescription {
            position: Vec3::new(0.0, 1.0, 4.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            projection: Projection::default(),
            width: 640,
            height: 480,
        },
        background: Color::splat(0.8),
        lights: vec![
            PositionalLight::new(Vec3::new(2.0, 1.0, 3.0), LightColor::WHITE).into(),
            SpotLight::new(
                Vec3::new(0.0, 4.0, 0.0),
                LightColor::WHITE,
                Vec3::NEG_Y,
                40f32.to_radians(),
            )
            .into(),
        ],
        objects: vec![
            ObjectDescription::new(
                ShapeDescription::Plane {
                    point: Vec3::new(0.0, -1.0, 0.0),
                    normal: Vec3::Y,
                    tile_size: 4.0,
                },
                GRAY_MATTE,
            )
            .with_texture(checker),
            ObjectDescription::new(
                ShapeDescription::Sphere {
                    center: Vec3::new(-0.6, -0.3, 0.0),
                    radius: 0.7,
                },
                SILVER,
            ),
        ],
        transparent_objects: vec![ObjectDescription::new(
            ShapeDescription::Sphere {
                center: Vec3::new(0.9, -0.5, 1.0),
                radius: 0.5,
            },
            RUBY,
        )
        .with_alpha(0.3)],
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let (mut desc, mut textures) = match &args.scene {
        Some(path) => {
            let desc = SceneDescription::load(path)
                .with_context(|| format!("failed to load scene {}", path.display()))?;
            let base_dir = path.parent().map(PathBuf::from).unwrap_or_default();
            (desc, TextureCache::with_base_dir(base_dir))
        }
        None => {
            log::info!("No scene given, rendering the demo scene");
            (demo_scene(), TextureCache::new())
        }
    };

    args.apply_overrides(&mut desc)?;
    let scene = Scene::from_description(&desc, &mut textures).context("failed to build scene")?;

    let frame = render(&scene, &args.render_config());
    frame
        .save_png(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    log::info!("Saved {}", args.output.display());
    Ok(())
}
