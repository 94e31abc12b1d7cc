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
//! Frame scheduler driving universes
//!
//! The kernel never advances itself. A [`Scheduler`] owns the universes it
//! drives and calls [`Universe::happen`] on each of them once per frame,
//! in the order they were added, while it is running.
//!
//! # Examples
//!
//! ```
//! use universe::scheduler::{Scheduler, SchedulerConfig};
//! use universe::Universe;
//!
//! let mut scheduler = Scheduler::with_config(SchedulerConfig::default());
//! let id = scheduler.add_universe(Universe::empty());
//!
//! assert_eq!(scheduler.tick(), 0); // not started yet
//! scheduler.start();
//! assert_eq!(scheduler.run_frames(3), 3);
//! assert_eq!(scheduler.universe(id).unwrap().tick_count(), 3);
//! ```

use crate::thing::{IdAllocator, ThingId};
use crate::universe::Universe;
use std::time::Duration;

/// Scheduler settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulerConfig {
    /// Pause between consecutive frames in [`Scheduler::run_frames`]
    pub frame_interval: Duration,
    /// Whether to log every frame at debug level
    pub log_frames: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            frame_interval: Duration::ZERO,
            log_frames: false,
        }
    }
}

impl SchedulerConfig {
    /// Pause for one frame at the given rate
    ///
    /// # Panics
    ///
    /// Panics if `fps` is non-positive, NaN, or infinite.
    pub fn from_fps(fps: f64) -> Self {
        assert!(fps > 0.0 && fps.is_finite(), "Frame rate must be positive and finite");
        SchedulerConfig {
            frame_interval: Duration::from_secs_f64(1.0 / fps),
            ..Self::default()
        }
    }

    /// Set the pause between frames
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Enable per-frame debug logging
    pub fn with_logging(mut self) -> Self {
        self.log_frames = true;
        self
    }
}

/// Owns universes and ticks them frame by frame
///
/// Universes are addressed by the generational [`ThingId`] returned from
/// [`add_universe`](Scheduler::add_universe); removing one never changes
/// which universe another id refers to.
#[derive(Debug, Default)]
pub struct Scheduler {
    ids: IdAllocator,
    universes: Vec<(ThingId, Universe)>,
    config: SchedulerConfig,
    running: bool,
    frames: u64,
}

impl Scheduler {
    /// Create a stopped scheduler with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stopped scheduler with the given settings
    pub fn with_config(config: SchedulerConfig) -> Self {
        Scheduler {
            config,
            ..Self::default()
        }
    }

    /// Current settings
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Take ownership of a universe; returns its id
    pub fn add_universe(&mut self, universe: Universe) -> ThingId {
        let id = self.ids.allocate();
        self.universes.push((id, universe));
        id
    }

    fn position(&self, id: ThingId) -> Option<usize> {
        if !self.ids.is_live(id) {
            return None;
        }
        self.universes.iter().position(|(universe, _)| *universe == id)
    }

    /// Hand a universe back; stale or unknown ids are a no-op
    pub fn remove_universe(&mut self, id: ThingId) -> Option<Universe> {
        let position = self.position(id)?;
        self.ids.release(id);
        Some(self.universes.remove(position).1)
    }

    /// Borrow a universe
    pub fn universe(&self, id: ThingId) -> Option<&Universe> {
        let position = self.position(id)?;
        Some(&self.universes[position].1)
    }

    /// Mutably borrow a universe
    pub fn universe_mut(&mut self, id: ThingId) -> Option<&mut Universe> {
        let position = self.position(id)?;
        Some(&mut self.universes[position].1)
    }

    /// All universes in tick order
    pub fn universes(&self) -> impl Iterator<Item = (ThingId, &Universe)> + '_ {
        self.universes.iter().map(|(id, universe)| (*id, universe))
    }

    /// Number of universes
    pub fn universe_count(&self) -> usize {
        self.universes.len()
    }

    /// Begin ticking
    pub fn start(&mut self) {
        if !self.running {
            log::debug!("scheduler started with {} universe(s)", self.universes.len());
        }
        self.running = true;
    }

    /// Stop ticking; universes keep their state
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("scheduler stopped after {} frame(s)", self.frames);
        }
        self.running = false;
    }

    /// Whether the scheduler is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Tick every universe once
    ///
    /// Returns the number of universes ticked, which is 0 while stopped.
    pub fn tick(&mut self) -> usize {
        if !self.running {
            return 0;
        }

        for (_, universe) in &mut self.universes {
            universe.happen();
        }
        self.frames += 1;

        if self.config.log_frames {
            log::debug!("frame {} ticked {} universe(s)", self.frames, self.universes.len());
        }
        self.universes.len()
    }

    /// Tick `frames` frames, pausing `frame_interval` between them
    ///
    /// Returns the number of frames run, which is 0 while stopped.
    pub fn run_frames(&mut self, frames: u64) -> u64 {
        let mut ran = 0;
        while ran < frames && self.running {
            if ran > 0 && !self.config.frame_interval.is_zero() {
                std::thread::sleep(self.config.frame_interval);
            }
            self.tick();
            ran += 1;
        }
        ran
    }

    /// Drop every universe and reset the frame counter
    pub fn clear(&mut self) {
        self.universes.clear();
        self.ids.clear();
        self.frames = 0;
    }
}
