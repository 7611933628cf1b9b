//! Playback controller.
//!
//! A [`Visualizer`] wraps one materialized [`StepTrace`], moves a cursor over
//! it and re-renders the current position through the renderer the
//! [`RendererFactory`] picked for the trace's algorithm.
//!
//! ```text
//!  load            play           pause
//! IDLE ──▶ READY ──────▶ PLAYING ──────▶ PAUSED
//!            │  ▲  step     │ tick          │ step / seek
//!            │  └─ reset ───┴───────────────┤
//!            └──────────────── step ───────▶ FINISHED
//! ```
//!
//! # Example
//!
//! ```rust
//! use sortviz::algorithms::{run, AlgorithmKind, RunConfig};
//! use sortviz::collection::Collection;
//! use sortviz::playback::{PlaybackMode, Visualizer};
//!
//! let collection = Collection::from_ranks(&[2, 1]).unwrap();
//! let trace = run(&collection, &RunConfig::new(AlgorithmKind::Bubble)).unwrap();
//!
//! let mut viz = Visualizer::new();
//! viz.load(trace).unwrap();
//! while viz.mode() != PlaybackMode::Finished {
//!     viz.step().unwrap();
//! }
//! assert_eq!(viz.view().unwrap().progress, 100.0);
//! ```

mod timer;

pub use timer::PlaybackTimer;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::config::PlaybackConfig;
use crate::error::{Error, Result};
use crate::render::{CursorContext, RenderOptions, RendererFactory, StepRenderer, StepView};
use crate::step::StepTrace;

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// No trace loaded.
    #[default]
    Idle,
    /// Trace loaded, cursor at the start.
    Ready,
    /// Advancing on timer ticks.
    Playing,
    /// Stopped mid-trace.
    Paused,
    /// Every step shown.
    Finished,
}

impl fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Ready => "ready",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Finished => "finished",
        };
        f.write_str(s)
    }
}

/// A loaded trace and the renderer chosen for it.
struct Loaded {
    trace: StepTrace,
    renderer: Arc<dyn StepRenderer>,
    view: StepView,
}

/// Steppable, seekable presentation of one trace.
pub struct Visualizer {
    factory: RendererFactory,
    config: PlaybackConfig,
    options: RenderOptions,
    timer: PlaybackTimer,
    mode: PlaybackMode,
    cursor: usize,
    loaded: Option<Loaded>,
}

impl fmt::Debug for Visualizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visualizer")
            .field("mode", &self.mode)
            .field("cursor", &self.cursor)
            .field("len", &self.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Visualizer {
    /// Controller with default playback settings and the built-in renderers.
    #[must_use]
    pub fn new() -> Self {
        Self::with_factory(RendererFactory::new(), PlaybackConfig::default())
    }

    /// Controller with custom settings.
    #[must_use]
    pub fn with_config(config: PlaybackConfig) -> Self {
        Self::with_factory(RendererFactory::new(), config)
    }

    /// Controller with custom renderers and settings.
    #[must_use]
    pub fn with_factory(factory: RendererFactory, config: PlaybackConfig) -> Self {
        Self {
            factory,
            options: config.render_options(),
            timer: PlaybackTimer::new(config.interval()),
            config,
            mode: PlaybackMode::Idle,
            cursor: 0,
            loaded: None,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Current state.
    #[must_use]
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Steps shown so far, `0..=len`.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of steps in the loaded trace, 0 when idle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loaded.as_ref().map_or(0, |l| l.trace.len())
    }

    /// Returns true when no trace is loaded or the trace has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Loaded trace.
    #[must_use]
    pub fn trace(&self) -> Option<&StepTrace> {
        self.loaded.as_ref().map(|l| &l.trace)
    }

    /// View of the current position.
    #[must_use]
    pub fn view(&self) -> Option<&StepView> {
        self.loaded.as_ref().map(|l| &l.view)
    }

    /// Playback settings.
    #[must_use]
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Completion, 0–100.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.view().map_or(0.0, |v| v.progress)
    }

    /// Changes the automatic step interval.
    pub fn set_speed(&mut self, speed_ms: u64) {
        self.config.speed_ms = speed_ms;
        self.timer.set_interval(self.config.interval());
    }

    /// Turns looping on or off.
    pub fn set_loop(&mut self, loop_playback: bool) {
        self.config.loop_playback = loop_playback;
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Loads `trace` and selects its renderer. Valid from IDLE and FINISHED.
    ///
    /// # Errors
    ///
    /// [`Error::StateTransition`] from any other state,
    /// [`Error::RendererMissing`] when no renderer handles the trace.
    pub fn load(&mut self, trace: StepTrace) -> Result<&StepView> {
        self.require("load", &[PlaybackMode::Idle, PlaybackMode::Finished])?;
        let renderer = self.factory.renderer_for(trace.kind())?;
        tracing::debug!(
            target: "sortviz::playback",
            algorithm = %trace.name(),
            renderer = renderer.name(),
            steps = trace.len(),
            "trace loaded"
        );
        let view = renderer.render(&CursorContext::new(&trace, 0), &self.options);
        self.loaded = Some(Loaded {
            trace,
            renderer,
            view,
        });
        self.cursor = 0;
        self.timer.reset();
        self.transition(PlaybackMode::Ready);
        if self.config.auto_play {
            self.transition(PlaybackMode::Playing);
        }
        self.current()
    }

    /// Shows the next step. Valid from READY and PAUSED; a no-op when
    /// FINISHED.
    pub fn step(&mut self) -> Result<&StepView> {
        if self.mode == PlaybackMode::Finished {
            return self.current();
        }
        self.require("step", &[PlaybackMode::Ready, PlaybackMode::Paused])?;
        let cursor = (self.cursor + 1).min(self.len());
        self.move_to(cursor);
        let next = if cursor == self.len() {
            PlaybackMode::Finished
        } else {
            PlaybackMode::Paused
        };
        self.transition(next);
        self.current()
    }

    /// Shows the previous step. Valid from PAUSED and FINISHED; a no-op
    /// when READY.
    pub fn step_back(&mut self) -> Result<&StepView> {
        if self.mode == PlaybackMode::Ready {
            return self.current();
        }
        self.require("step_back", &[PlaybackMode::Paused, PlaybackMode::Finished])?;
        let cursor = self.cursor.saturating_sub(1);
        self.move_to(cursor);
        let next = if cursor == 0 {
            PlaybackMode::Ready
        } else {
            PlaybackMode::Paused
        };
        self.transition(next);
        self.current()
    }

    /// Starts automatic playback. Valid from READY and PAUSED.
    pub fn play(&mut self) -> Result<&StepView> {
        self.require("play", &[PlaybackMode::Ready, PlaybackMode::Paused])?;
        self.timer.reset();
        self.transition(PlaybackMode::Playing);
        self.current()
    }

    /// Stops automatic playback. Valid from PLAYING.
    pub fn pause(&mut self) -> Result<&StepView> {
        self.require("pause", &[PlaybackMode::Playing])?;
        self.timer.reset();
        self.transition(PlaybackMode::Paused);
        self.current()
    }

    /// Rewinds to the initial state. Valid from any state but IDLE.
    pub fn reset(&mut self) -> Result<&StepView> {
        self.require_loaded("reset")?;
        self.timer.reset();
        self.move_to(0);
        self.transition(PlaybackMode::Ready);
        self.current()
    }

    /// Jumps to `cursor`, clamped to `0..=len`. Valid from any state but
    /// IDLE. Position 0 is READY, the end is FINISHED, anything between is
    /// PAUSED unless playback is running.
    pub fn seek(&mut self, cursor: usize) -> Result<&StepView> {
        self.require_loaded("seek")?;
        let len = self.len();
        let cursor = cursor.min(len);
        if self.mode == PlaybackMode::Finished && cursor == len {
            return self.current();
        }
        self.move_to(cursor);
        let next = if cursor == 0 {
            PlaybackMode::Ready
        } else if cursor == len {
            PlaybackMode::Finished
        } else if self.mode == PlaybackMode::Playing {
            PlaybackMode::Playing
        } else {
            PlaybackMode::Paused
        };
        if next != PlaybackMode::Playing {
            self.timer.reset();
        }
        self.transition(next);
        self.current()
    }

    /// Feeds elapsed time to the timer while PLAYING and moves one position
    /// per whole interval. Returns the number of steps advanced; a no-op in
    /// any other state.
    ///
    /// Without looping, playback stops at the end and goes FINISHED. With
    /// looping, the final view is held for one interval before wrapping to
    /// the start.
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        if self.mode != PlaybackMode::Playing {
            return 0;
        }
        let len = self.len();
        let due = self.timer.advance(elapsed) as usize;

        if self.config.loop_playback && len > 0 {
            // Positions 0..=len form one cycle.
            let mut advanced = 0;
            for _ in 0..due % (len + 1) {
                if self.cursor < len {
                    self.move_to(self.cursor + 1);
                    advanced += 1;
                } else {
                    tracing::debug!(target: "sortviz::playback", "looping to start");
                    self.move_to(0);
                }
            }
            return advanced;
        }

        let advanced = due.min(len - self.cursor);
        if advanced > 0 {
            self.move_to(self.cursor + advanced);
        }
        if self.cursor == len {
            self.timer.reset();
            self.transition(PlaybackMode::Finished);
        }
        advanced
    }

    /// Drops the trace. Valid from any state.
    pub fn clear(&mut self) {
        self.loaded = None;
        self.cursor = 0;
        self.timer.reset();
        self.transition(PlaybackMode::Idle);
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn require(&self, action: &'static str, allowed: &[PlaybackMode]) -> Result<()> {
        if allowed.contains(&self.mode) {
            Ok(())
        } else {
            Err(Error::StateTransition {
                from: self.mode,
                action,
            })
        }
    }

    fn require_loaded(&self, action: &'static str) -> Result<()> {
        if self.mode == PlaybackMode::Idle {
            return Err(Error::StateTransition {
                from: self.mode,
                action,
            });
        }
        Ok(())
    }

    fn transition(&mut self, to: PlaybackMode) {
        if self.mode != to {
            tracing::debug!(
                target: "sortviz::playback",
                from = %self.mode,
                to = %to,
                cursor = self.cursor,
                "playback transition"
            );
            self.mode = to;
        }
    }

    fn move_to(&mut self, cursor: usize) {
        self.cursor = cursor;
        if let Some(loaded) = self.loaded.as_mut() {
            let ctx = CursorContext::new(&loaded.trace, cursor);
            loaded.view = loaded.renderer.render(&ctx, &self.options);
        }
    }

    fn current(&self) -> Result<&StepView> {
        self.view().ok_or(Error::StateTransition {
            from: self.mode,
            action: "render",
        })
    }
}
