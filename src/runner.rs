//! Host-side game loop.
//!
//! The engine only knows how to run one frame. [`GameLoop`] repeats that
//! until the engine asks to quit or a frame cap is reached, with one of two
//! pacings:
//!
//! - [`Pacing::Stepped`]: a [`ManualClock`] is advanced by exactly one frame
//!   budget (`1000 / target_fps` ms) before every frame. Deterministic and as
//!   fast as the machine allows; used by headless runs and tests.
//! - [`Pacing::RealTime`]: the wall clock drives the deltas and the loop
//!   sleeps off whatever is left of the frame budget.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::engine::Engine;
use crate::resources::clock::ManualClock;
use crate::resources::engineconfig::EngineConfig;
use crate::resources::surface::RenderSurface;

#[derive(Debug, Clone)]
pub enum Pacing {
    Stepped(ManualClock),
    RealTime,
}

/// Why [`GameLoop::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    QuitRequested,
    FrameLimit,
}

pub struct GameLoop {
    engine: Engine,
    pacing: Pacing,
    frame_budget_ms: f64,
    max_frames: Option<u64>,
    frames_run: u64,
}

impl GameLoop {
    /// Deterministic loop: every frame lasts exactly one frame budget.
    pub fn stepped(config: EngineConfig) -> Self {
        let clock = ManualClock::new();
        let frame_budget_ms = config.frame_budget_ms();
        let engine = Engine::with_clock(config, clock.clone());
        Self {
            engine,
            pacing: Pacing::Stepped(clock),
            frame_budget_ms,
            max_frames: None,
            frames_run: 0,
        }
    }

    /// Wall-clock loop limited to the configured frame rate.
    pub fn realtime(config: EngineConfig) -> Self {
        let frame_budget_ms = config.frame_budget_ms();
        Self {
            engine: Engine::new(config),
            pacing: Pacing::RealTime,
            frame_budget_ms,
            max_frames: None,
            frames_run: 0,
        }
    }

    /// Stop after `frames` frames even if nothing asks to quit.
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn into_engine(self) -> Engine {
        self.engine
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// Run a single frame. Stepped loops advance their clock first; pacing
    /// sleeps are left to the caller.
    pub fn step(&mut self, surface: &mut dyn RenderSurface) {
        if let Pacing::Stepped(clock) = &self.pacing {
            clock.advance(self.frame_budget_ms);
        }
        self.engine.run_frame(surface);
        self.frames_run += 1;
    }

    /// Run frames until the engine requests quit or the frame cap is hit.
    ///
    /// `on_frame` runs after every frame, outside of any hook, and may poke at
    /// the engine (input, scripted events, logging).
    pub fn run(
        &mut self,
        surface: &mut dyn RenderSurface,
        mut on_frame: impl FnMut(&mut Engine),
    ) -> LoopExit {
        info!(
            "Game loop starting: {:?} pacing, budget {:.2}ms, cap {:?}",
            self.pacing, self.frame_budget_ms, self.max_frames
        );
        let exit = loop {
            if self.engine.quit_requested() {
                break LoopExit::QuitRequested;
            }
            if self.max_frames.is_some_and(|max| self.frames_run >= max) {
                break LoopExit::FrameLimit;
            }

            let started = Instant::now();
            self.step(surface);
            on_frame(&mut self.engine);

            if matches!(self.pacing, Pacing::RealTime) {
                let budget = Duration::from_secs_f64(self.frame_budget_ms / 1000.0);
                if let Some(rest) = budget.checked_sub(started.elapsed()) {
                    std::thread::sleep(rest);
                }
            }
        };
        debug!("Game loop finished after {} frame(s): {:?}", self.frames_run, exit);
        exit
    }
}
