//! Headless brush session over a procedural heightfield.
//!
//! Usage: cargo run --release -- [--settings grass.json] [--seed 7] [--strokes 40]

use std::path::PathBuf;
use std::time::Instant;

use glam::Vec3;
use noise::{NoiseFn, Perlin};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use grassbrush::brush::{BrushEvent, BrushState, BrushTool, MouseButton, StrokeOutcome, ToolMode};
use grassbrush::core::Result;
use grassbrush::grass::{GrassConfig, GrassSystem};
use grassbrush::math::Ray;
use grassbrush::surface::TriangleMesh;

const TERRAIN_SIZE: f32 = 200.0;
const TERRAIN_RESOLUTION: u32 = 128;
const TERRAIN_HEIGHT: f32 = 12.0;
const NOISE_SCALE: f64 = 0.02;
/// Height the cursor rays start from, well above the terrain.
const CAMERA_HEIGHT: f32 = 100.0;

/// Fold a 64-bit seed into the 32 bits `Perlin` accepts.
fn noise_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

fn main() -> Result<()> {
    grassbrush::core::logging::init();

    let args: Vec<String> = std::env::args().collect();
    let arg = |name: &str| {
        args.iter()
            .position(|a| a == name)
            .and_then(|i| args.get(i + 1))
            .cloned()
    };

    let seed = arg("--seed").and_then(|s| s.parse::<u64>().ok()).unwrap_or(7);
    let strokes = arg("--strokes").and_then(|s| s.parse::<usize>().ok()).unwrap_or(40);
    let config = match arg("--settings") {
        Some(path) => GrassConfig::load(&PathBuf::from(path))?,
        None => GrassConfig::default(),
    };

    let perlin = Perlin::new(noise_seed(seed));
    let terrain = TriangleMesh::grid(TERRAIN_SIZE, TERRAIN_RESOLUTION, |x, z| {
        perlin.get([x as f64 * NOISE_SCALE, z as f64 * NOISE_SCALE]) as f32 * TERRAIN_HEIGHT
    });
    log::info!(
        "Terrain: {} triangles, height range {:.2}..{:.2}",
        terrain.triangle_count(),
        terrain.bounds().min.y,
        terrain.bounds().max.y
    );

    let mut system = GrassSystem::new(config);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut tool = BrushTool::new(ToolMode::Paint, BrushState::new(8.0, 0.6, 0.4));
    let start = Instant::now();

    // One press, then drag outward along a spiral
    for i in 0..strokes {
        let angle = i as f32 * 0.35;
        let reach = 10.0 + i as f32 * 1.5;
        let cursor = Ray::new(
            Vec3::new(angle.cos() * reach, CAMERA_HEIGHT, angle.sin() * reach),
            Vec3::NEG_Y,
        );
        let event = if i == 0 {
            BrushEvent::Press(MouseButton::Primary)
        } else {
            BrushEvent::Drag(MouseButton::Primary)
        };
        tool.handle(event, &cursor, &terrain, system.store_mut(), &mut rng)?;
    }
    let painted = system.store().len();
    log::info!("Painted {} blades in {} strokes", painted, strokes);

    // Soft erase sweep across the middle
    tool.set_mode(ToolMode::Erase);
    tool.set_brush(BrushState::new(20.0, 0.8, 0.5));
    let sweeps = (strokes / 4).max(1);
    let mut erased = 0;
    for i in 0..sweeps {
        let x = -60.0 + 120.0 * i as f32 / sweeps as f32;
        let cursor = Ray::new(Vec3::new(x, CAMERA_HEIGHT, 0.0), Vec3::NEG_Y);
        let response = tool.handle(
            BrushEvent::Drag(MouseButton::Primary),
            &cursor,
            &terrain,
            system.store_mut(),
            &mut rng,
        )?;
        if let Some(StrokeOutcome::Erased { removed }) = response.stroke {
            erased += removed;
        }
    }

    let store = system.store();
    log::info!(
        "Erased {} blades; {} remain ({} bytes of vertex data) after {:.2?}",
        erased,
        store.len(),
        store.as_bytes().len(),
        start.elapsed()
    );

    let params = system.build_params(0.0);
    log::info!(
        "Render params: {} blades, {} segments, LOD {} m, clip {} m",
        params.blade_count,
        params.max_segments,
        params.lod_distance,
        params.clip_distance
    );

    Ok(())
}
