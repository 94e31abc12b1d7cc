// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Small Orbit Example
//!
//! A light moon circling a heavy planet in three dimensions, with a slow
//! comet passing by. The universe is driven by the frame scheduler and the
//! body state is printed every few frames.
//!
//! # Running
//!
//! ```bash
//! # Run with default settings (600 frames, no pause between frames)
//! cargo run --example orbit
//!
//! # Watch the per-frame log at 30 frames per second
//! RUST_LOG=debug cargo run --example orbit -- --frames 120 --fps 30
//! ```

use universe::laws::{Gravitation, Motion};
use universe::scheduler::{Scheduler, SchedulerConfig};
use universe::space::{Space, Time};
use universe::{Member, Result, Universe};

/// Gravitational constant used by this toy system
const G: f64 = 1.0;

/// Planet mass
const PLANET_MASS: f64 = 1.0e6;

/// Moon orbit radius
const ORBIT_RADIUS: f64 = 500.0;

/// Simulation step in seconds
const STEP: f64 = 0.05;

struct Config {
    frames: u64,
    fps: Option<f64>,
    report_every: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            frames: 600,
            fps: None,
            report_every: 100,
        }
    }
}

fn build_universe() -> Result<Universe> {
    let gravitation = Gravitation::new(G);
    let mut universe = Universe::new([
        Member::from(Space::euclidean(&["x", "y", "z"], Time::fixed(STEP))?),
        Member::from(Motion::new()),
        Member::from(gravitation),
    ])?;

    // The law applies its pull once per tick, so the orbital speed is
    // computed per tick and converted to units per second.
    let pull_per_tick = G * PLANET_MASS / (ORBIT_RADIUS * ORBIT_RADIUS);
    let orbital_speed = (pull_per_tick * ORBIT_RADIUS / STEP).sqrt();

    let planet = universe.new_body().name("planet").mass(PLANET_MASS).build()?;
    let moon = universe
        .new_body()
        .name("moon")
        .mass(1.0)
        .position(&[("x", ORBIT_RADIUS)])
        .velocity(&[("y", orbital_speed)])
        .build()?;
    let comet = universe
        .new_body()
        .name("comet")
        .mass(0.1)
        .position(&[("x", -4000.0), ("y", 3000.0), ("z", 200.0)])
        .velocity(&[("x", 5.0), ("y", -3.0)])
        .build()?;

    let planet = universe.add(planet)?;
    universe.add(moon)?;
    universe.add(comet)?;
    universe.set_observer(Some(planet))?;
    Ok(universe)
}

fn print_state(universe: &Universe, frame: u64) {
    println!("\n=== Frame {} (t = {:.2} s) ===", frame, frame as f64 * STEP);
    for body in universe.bodies() {
        println!(
            "{:<8} position {}  velocity {}  speed {:.3}",
            body.name(),
            body.position(),
            body.velocity(),
            body.speed()
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = Config::default();
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--frames" => {
                match args.get(i + 1).and_then(|value| value.parse::<u64>().ok()) {
                    Some(frames) => config.frames = frames,
                    None => eprintln!("Warning: --frames requires a number, using {}", config.frames),
                }
                i += 2;
            }
            "--fps" => {
                match args.get(i + 1).and_then(|value| value.parse::<f64>().ok()) {
                    Some(fps) if fps > 0.0 && fps.is_finite() => config.fps = Some(fps),
                    _ => eprintln!("Warning: --fps requires a positive number, running unpaced"),
                }
                i += 2;
            }
            other => {
                eprintln!("Warning: ignoring unknown argument '{}'", other);
                i += 1;
            }
        }
    }

    let universe = match build_universe() {
        Ok(universe) => universe,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let scheduler_config = match config.fps {
        Some(fps) => SchedulerConfig::from_fps(fps),
        None => SchedulerConfig::default(),
    };
    let mut scheduler = Scheduler::with_config(scheduler_config.with_logging());
    let id = scheduler.add_universe(universe);

    log::info!("running {} frames", config.frames);
    scheduler.start();
    if let Some(universe) = scheduler.universe(id) {
        print_state(universe, 0);
    }

    let mut frame = 0;
    while frame < config.frames {
        let batch = config.report_every.min(config.frames - frame);
        frame += scheduler.run_frames(batch);
        if let Some(universe) = scheduler.universe(id) {
            print_state(universe, frame);
        }
    }
    scheduler.stop();

    log::info!("done after {} frames", scheduler.frame_count());
}
