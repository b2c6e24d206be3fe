//! Boxworld headless demo.
//!
//! Runs the collision pipeline on a generated (or loaded) arena without a
//! window: tile blocking, movement, entity collision events and, optionally,
//! impulse response. At the end it logs how many collisions happened per
//! layer pair.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --frames 300 --response
//! ```

use std::path::PathBuf;

use clap::Parser;

use boxworld::components::tags::{Enemy, Player};
use boxworld::engine::Engine;
use boxworld::events::collision::{observe_pickup_collected, observe_projectile_hit};
use boxworld::game::{CollisionStats, build_arena, observe_collision_stats, spawn_demo_entities};
use boxworld::resources::collisionconfig::CollisionConfig;
use boxworld::resources::tilemap::TileMap;

const FIXED_DT: f32 = 1.0 / 60.0;
const ARENA_WIDTH: u32 = 40;
const ARENA_HEIGHT: u32 = 30;
const ARENA_TILE_SIZE: f32 = 16.0;

/// Boxworld 2D collision demo
#[derive(Parser)]
#[command(version, about = "Headless demo of the boxworld collision engine")]
struct Cli {
    /// Number of fixed 1/60 s frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// RNG seed for entity placement. Random if omitted.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 12)]
    enemies: u32,

    #[arg(long, default_value_t = 8)]
    pickups: u32,

    /// INI file with [collision] and [matrix] sections.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Tilesetter JSON map. A walled arena is generated if omitted.
    #[arg(long, value_name = "PATH")]
    tilemap: Option<PathBuf>,

    /// Turn on the built-in impulse response regardless of the config file.
    #[arg(long)]
    response: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = CollisionConfig::new();
    if let Some(path) = &cli.config {
        if let Err(e) = config.load_from_file(path) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
    if cli.response {
        config.enable_collision_response = true;
    }

    let tilemap = match &cli.tilemap {
        Some(path) => TileMap::load_from_file(path),
        None => build_arena(ARENA_WIDTH, ARENA_HEIGHT, ARENA_TILE_SIZE),
    };
    let tilemap = match tilemap {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let seed = cli.seed.unwrap_or_else(|| fastrand::u64(..));
    log::info!(
        "Boxworld demo: seed {}, {} frames, response {}",
        seed,
        cli.frames,
        config.enable_collision_response
    );

    let mut engine = Engine::new(config);
    let mut rng = fastrand::Rng::with_seed(seed);
    if let Err(e) = spawn_demo_entities(&mut engine.world, &mut rng, &tilemap, cli.enemies, cli.pickups) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    engine.insert_tilemap(tilemap);

    engine.world.insert_resource(CollisionStats::default());
    engine.world.add_observer(observe_collision_stats);
    engine.world.add_observer(observe_projectile_hit);
    engine.world.add_observer(observe_pickup_collected);
    engine.world.flush();

    for _ in 0..cli.frames {
        engine.tick(FIXED_DT);
    }

    engine.world.resource::<CollisionStats>().log_summary();
    let players = engine.world.query::<&Player>().iter(&engine.world).count();
    let enemies = engine.world.query::<&Enemy>().iter(&engine.world).count();
    log::info!("Survivors: {} player(s), {} enemies", players, enemies);
}
