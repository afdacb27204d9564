mod config;
mod worldgen;

use barrow_geom::Vec3;
use barrow_map::{CubeCoord, Map};
use barrow_materials::MaterialCatalog;
use barrow_render::{
    Camera, GridAtlas, IsoCamera, Orientation, RecordingBackend, RenderPipeline,
};
use clap::Parser;
use config::EngineConfig;
use std::error::Error;
use std::path::PathBuf;

/// Materials shipped with the binary; a catalog file overrides them.
const DEFAULT_MATERIALS: &str = r#"
[materials]
dirt = [0, 1]
grass = [0, 0]
sand = [2, 0]
stone = [1, 0]
water = { tile = [3, 0], translucent = true }
"#;

#[derive(Parser, Debug)]
#[command(name = "barrow", about = "Sliced voxel terrain renderer")]
struct Args {
    /// Engine configuration TOML.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Material catalog TOML; defaults to the built-in set.
    #[arg(long)]
    materials: Option<PathBuf>,
    /// Frames to run before exiting.
    #[arg(long, default_value_t = 16)]
    frames: u32,
    /// Override the terrain seed from the config.
    #[arg(long)]
    seed: Option<i32>,
    /// Disable depth shading.
    #[arg(long, default_value_t = false)]
    unshaded: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let cfg = EngineConfig::load(args.config.as_deref())?;
    let catalog = match &args.materials {
        Some(path) => MaterialCatalog::from_path(path)?,
        None => MaterialCatalog::from_toml_str(DEFAULT_MATERIALS)?,
    };
    log::info!("{} materials loaded", catalog.len());

    let mut map = Map::new(cfg.cells_x, cfg.cells_y, cfg.cells_z, cfg.edge);
    let seed = args.seed.unwrap_or(cfg.seed);
    worldgen::generate(&mut map, &catalog, &cfg.terrain, seed)?;

    let cell_count = (cfg.cells_x * cfg.cells_y * cfg.cells_z) as u32;
    let mut backend = RecordingBackend::new(cell_count * 4);
    let atlas = GridAtlas::new(1, 256, 256, 16);
    let mut pipeline = RenderPipeline::new();
    pipeline.resize(&mut backend, cfg.view.width, cfg.view.height);
    if cfg.view.fullscreen {
        pipeline.toggle_fullscreen(&mut backend);
    }
    if args.unshaded {
        pipeline.set_shaded_draw(&mut map, false);
    }

    let center = Vec3::new(
        map.cubes_x() as f32 * 0.5,
        map.cubes_y() as f32 * 0.5,
        map.cubes_z() as f32 * 0.5,
    );
    let mut camera = IsoCamera::new(
        center,
        Orientation::Northeast,
        cfg.view.distance,
        cfg.view.half_width,
        cfg.view.half_height,
        map.cubes_z() as i32 - 1,
        cfg.view.view_levels,
    );

    for frame in 0..args.frames {
        if frame > 0 && frame % 4 == 0 {
            camera.rotate_cw();
            log::debug!("camera now {:?}", camera.orientation());
        }
        if frame == args.frames / 2 {
            let cx = map.cubes_x() as i32 / 2;
            let cy = map.cubes_y() as i32 / 2;
            if let Some(z) = worldgen::surface_level(&map, cx, cy) {
                let dirtied = barrow_edit::dig(&mut map, CubeCoord::new(cx, cy, z))?;
                log::info!(
                    "dug ({cx}, {cy}, {z}); {} cell(s) invalidated",
                    dirtied.len()
                );
            }
        }
        let drawn = pipeline.render(&mut backend, &mut map, &camera, &atlas, &catalog)?;
        if drawn {
            log::info!("frame {frame}: {} triangles", pipeline.frame_triangles());
        } else {
            log::warn!("frame {frame}: world not ready");
        }
    }

    log::info!(
        "done: {} triangles executed, {} draw lists live",
        backend.executed_triangles(),
        backend.live_handles()
    );
    Ok(())
}
