//! highway — two-lane highway demo for the tsim traffic simulation core.
//!
//! A broken-down truck blocks the right lane.  One scripted ego vehicle
//! approaches it at speed while background traffic enters every 1.5 s on a
//! random lane with a randomly sampled driver.  Drivers with a long reaction
//! time or weak brakes end up in the truck; the rest stop or pass in the
//! left lane.  Collision events and per-step summaries go to CSV.
//!
//! ```text
//! cargo run -p highway -- [config.json] [output-dir]
//! ```
//!
//! `config.json` holds a `RunConfig`; missing fields take their defaults.
//! Set `RUST_LOG=debug` for per-slot scheduling detail.

mod components;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tsim_core::{RunConfig, SimRng, SimTime, Vector2d};
use tsim_output::{CsvWriter, SimOutputObserver};
use tsim_schedule::{PeriodicSpawnPoint, ScenarioSpawnPoint};
use tsim_sim::SimBuilder;
use tsim_world::{AgentBlueprint, AgentState, TrafficObject};

use components::{DriverProfile, vehicle_components};

// ── Constants ─────────────────────────────────────────────────────────────────

const LANE_WIDTH:       f64 = 3.5;
const ROAD_END:         f64 = 600.0;
const OBSTACLE_X:       f64 = 400.0;
const OBSTACLE_LENGTH:  f64 = 12.0;
const CAR_LENGTH:       f64 = 4.5;
const CAR_WIDTH:        f64 = 1.8;
const TRAFFIC_INTERVAL: i64 = 1_500;
const TRAFFIC_LIMIT:    usize = 24;

// ── Vehicles ──────────────────────────────────────────────────────────────────

fn vehicle(x: f64, lane: u32, speed: f64, profile: DriverProfile) -> AgentBlueprint {
    let state = AgentState::new(
        Vector2d::new(x, lane as f64 * LANE_WIDTH),
        0.0,
        speed,
        CAR_LENGTH,
        CAR_WIDTH,
    );
    let obstacle = Vector2d::new(OBSTACLE_X, 0.0);
    vehicle_components(obstacle, OBSTACLE_LENGTH, ROAD_END, profile)
        .into_iter()
        .fold(AgentBlueprint::new(state), |bp, spec| bp.component(spec))
}

/// Background traffic: random lane, speed and driver.
fn sample_traffic(_time: SimTime, rng: &mut SimRng) -> Option<AgentBlueprint> {
    let lane = rng.gen_range(0..2u32);
    let speed = rng.gen_range(20.0..33.0);
    let profile = DriverProfile {
        comfort_brake: rng.gen_range(2.0..4.0),
        max_brake:     rng.gen_range(4.0..9.0),
        reaction_secs: rng.gen_range(0.5..2.5),
    };
    Some(vehicle(0.0, lane, speed, profile).priority(1))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<RunConfig> {
    let Some(path) = path else {
        return Ok(RunConfig { end_time_ms: 60_000, ..RunConfig::default() });
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("output/highway"));

    let config = load_config(config_path.as_deref())?;
    info!(?config, "configuration loaded");

    let ego = vehicle(
        100.0,
        0,
        30.0,
        DriverProfile { comfort_brake: 3.0, max_brake: 8.0, reaction_secs: 1.0 },
    );
    let truck = TrafficObject::new(Vector2d::new(OBSTACLE_X, 0.0), 0.0, OBSTACLE_LENGTH, 2.5);

    let mut sim = SimBuilder::new(config)
        .spawn_point(ScenarioSpawnPoint::new(ego))
        .spawn_point(PeriodicSpawnPoint::new(TRAFFIC_INTERVAL, sample_traffic).limit(TRAFFIC_LIMIT))
        .traffic_object(truck)
        .build()?;

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let mut obs = SimOutputObserver::new(CsvWriter::new(&out_dir)?);

    let t0 = Instant::now();
    let result = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  end condition       : {:?}", result.end_condition());
    println!("  final time          : {}", sim.time_current());
    println!("  agents still driving: {}", sim.world.agent_count());
    println!("  collision events    : {}", sim.events.len());
    println!();

    if !sim.events.is_empty() {
        println!("{:<10} {:<8} {:<12} {:>10} {:>8}", "Time", "Agent", "Opponent", "x", "y");
        println!("{}", "-".repeat(52));
        for event in sim.events.events() {
            let opponent = if event.collision_with_agent {
                format!("agent {}", event.collision_opponent_id)
            } else {
                format!("object {}", event.collision_opponent_id)
            };
            println!(
                "{:<10} {:<8} {:<12} {:>10.2} {:>8.2}",
                event.time.to_string(),
                event.collision_agent_id,
                opponent,
                event.contact.position.x,
                event.contact.position.y,
            );
        }
    }
    println!();
    println!("Output written to {}", out_dir.display());
    Ok(())
}
