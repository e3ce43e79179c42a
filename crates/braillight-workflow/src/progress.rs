// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Simulated progress for the upload and loading screens.
//
// The bar climbs from 0 to 100 in `total_steps` equal ticks, then waits a
// short settle delay so the user sees the finished bar before the workflow
// moves on. Completion is reported exactly once. A run that is dropped early
// cancels its timer and never completes.

use braillight_core::config::ProgressTiming;
use tracing::{debug, trace};

use crate::timer::{Scheduler, TimerEvent, TimerHandle, TimerKind, TimerToken};

/// Lifecycle of a simulator. Never goes backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    /// Ticks are advancing the value.
    Running,
    /// Value is 100; waiting for the settle delay.
    Settling,
    /// Completion has been reported.
    Complete,
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The displayed value increased to this.
    Advanced(u8),
    /// A step elapsed but the floored value did not change.
    Unchanged,
    /// This tick reached 100; the settle delay starts now.
    Reached100,
    /// The run already reached 100; the tick is ignored.
    Finished,
}

/// Deterministic progress counter.
#[derive(Debug, Clone)]
pub struct ProgressSimulator {
    elapsed_steps: u32,
    total_steps: u32,
    value: u8,
    phase: ProgressPhase,
}

impl ProgressSimulator {
    pub fn new(total_steps: u32) -> Self {
        Self {
            elapsed_steps: 0,
            total_steps: total_steps.max(1),
            value: 0,
            phase: ProgressPhase::Running,
        }
    }

    pub fn from_timing(timing: &ProgressTiming) -> Self {
        Self::new(timing.total_steps())
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn phase(&self) -> ProgressPhase {
        self.phase
    }

    pub fn elapsed_steps(&self) -> u32 {
        self.elapsed_steps
    }

    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    pub fn is_complete(&self) -> bool {
        self.phase == ProgressPhase::Complete
    }

    /// Advance one step.
    pub fn tick(&mut self) -> Tick {
        if self.phase != ProgressPhase::Running {
            return Tick::Finished;
        }

        self.elapsed_steps += 1;
        let raw = u64::from(self.elapsed_steps) * 100 / u64::from(self.total_steps);
        let next = raw.min(100) as u8;
        let previous = self.value;
        self.value = next;

        if self.elapsed_steps >= self.total_steps {
            self.value = 100;
            self.phase = ProgressPhase::Settling;
            Tick::Reached100
        } else if next > previous {
            Tick::Advanced(next)
        } else {
            Tick::Unchanged
        }
    }

    /// End the settle delay. Returns `true` only the first time it is called
    /// after reaching 100.
    pub fn settle(&mut self) -> bool {
        if self.phase == ProgressPhase::Settling {
            self.phase = ProgressPhase::Complete;
            true
        } else {
            false
        }
    }
}

/// What a timer event did to a [`ProgressRun`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStep {
    /// Event belonged to another run or arrived out of phase.
    Ignored,
    /// Displayed value changed.
    Progress(u8),
    /// A step elapsed without a visible change.
    Unchanged,
    /// The run finished; fires once per run.
    Completed,
}

/// A simulator bound to live timers.
///
/// Owns its timer handle, so dropping the run cancels any pending tick or
/// settle delay.
#[derive(Debug)]
pub struct ProgressRun {
    token: TimerToken,
    timing: ProgressTiming,
    simulator: ProgressSimulator,
    timer: Option<TimerHandle>,
}

impl ProgressRun {
    /// Start ticking at `timing.interval`.
    pub fn start(scheduler: &dyn Scheduler, token: TimerToken, timing: ProgressTiming) -> Self {
        debug!(%token, steps = timing.total_steps(), interval_ms = timing.interval_ms, "progress run started");
        let timer = scheduler.every(token, timing.interval());
        Self {
            token,
            timing,
            simulator: ProgressSimulator::from_timing(&timing),
            timer: Some(timer),
        }
    }

    pub fn token(&self) -> TimerToken {
        self.token
    }

    pub fn value(&self) -> u8 {
        self.simulator.value()
    }

    pub fn phase(&self) -> ProgressPhase {
        self.simulator.phase()
    }

    /// Apply a timer event addressed to this run.
    pub fn on_event(&mut self, scheduler: &dyn Scheduler, event: TimerEvent) -> RunStep {
        if event.token != self.token {
            return RunStep::Ignored;
        }
        match event.kind {
            TimerKind::Tick => match self.simulator.tick() {
                Tick::Advanced(value) => {
                    trace!(token = %self.token, value, "progress");
                    RunStep::Progress(value)
                }
                Tick::Unchanged => RunStep::Unchanged,
                Tick::Reached100 => {
                    // Replacing the handle cancels the ticker.
                    self.timer = Some(scheduler.after(self.token, self.timing.settle()));
                    debug!(token = %self.token, settle_ms = self.timing.settle_ms, "progress reached 100");
                    RunStep::Progress(100)
                }
                Tick::Finished => RunStep::Ignored,
            },
            TimerKind::Settled => {
                if self.simulator.settle() {
                    self.timer = None;
                    debug!(token = %self.token, "progress run complete");
                    RunStep::Completed
                } else {
                    RunStep::Ignored
                }
            }
        }
    }
}
