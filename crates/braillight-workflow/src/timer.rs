// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Timer scheduling for progress runs.
//
// The controller never sleeps. It asks a `Scheduler` for repeating ticks or a
// one-shot delay and later receives `TimerEvent`s on its own thread of
// control. Every timer is owned by a `TimerHandle`; dropping the handle
// cancels the timer, so a torn-down run can never be called back.
//
// Events already in flight when a timer is cancelled still arrive. Each run
// uses a fresh `TimerToken` and the controller discards events for any token
// other than the active one.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::trace;

/// Identifies the progress run a timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// What kind of timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Periodic progress step.
    Tick,
    /// One-shot settle delay after reaching 100.
    Settled,
}

/// A timer firing, delivered to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub token: TimerToken,
    pub kind: TimerKind,
}

impl TimerEvent {
    pub fn tick(token: TimerToken) -> Self {
        Self {
            token,
            kind: TimerKind::Tick,
        }
    }

    pub fn settled(token: TimerToken) -> Self {
        Self {
            token,
            kind: TimerKind::Settled,
        }
    }
}

/// Owns one scheduled timer; cancels it on drop.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Handle that aborts a spawned tokio task.
    pub fn from_task(task: JoinHandle<()>) -> Self {
        let abort = task.abort_handle();
        Self::new(move || abort.abort())
    }

    /// Cancel now rather than at drop.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// Source of timer events.
pub trait Scheduler {
    /// Fire `Tick` for `token` every `period`, first after one period.
    fn every(&self, token: TimerToken, period: Duration) -> TimerHandle;

    /// Fire `Settled` for `token` once after `delay`.
    fn after(&self, token: TimerToken, delay: Duration) -> TimerHandle;
}

// ---------------------------------------------------------------------------
// Tokio
// ---------------------------------------------------------------------------

/// Scheduler backed by tokio tasks, delivering events over a channel.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    events: mpsc::UnboundedSender<TimerEvent>,
}

impl TokioScheduler {
    pub fn new(events: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self { events }
    }

    /// Scheduler plus the receiving end the event loop should poll.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl Scheduler for TokioScheduler {
    fn every(&self, token: TimerToken, period: Duration) -> TimerHandle {
        let period = period.max(Duration::from_millis(1));
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if events.send(TimerEvent::tick(token)).is_err() {
                    trace!(%token, "event receiver gone; ticker stopping");
                    break;
                }
            }
        });
        TimerHandle::from_task(task)
    }

    fn after(&self, token: TimerToken, delay: Duration) -> TimerHandle {
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver may be gone during shutdown; nothing to do then.
            let _ = events.send(TimerEvent::settled(token));
        });
        TimerHandle::from_task(task)
    }
}

// ---------------------------------------------------------------------------
// Manual
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Armed {
    id: u64,
    token: TimerToken,
    kind: TimerKind,
    period: Duration,
}

#[derive(Debug, Default)]
struct ManualState {
    next_id: u64,
    armed: Vec<Armed>,
}

/// Scheduler that only records what is armed; the caller fires events.
///
/// Clones share state, so a test can keep one clone while the controller
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn arm(&self, token: TimerToken, kind: TimerKind, period: Duration) -> TimerHandle {
        let id = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.next_id += 1;
            let id = state.next_id;
            state.armed.push(Armed {
                id,
                token,
                kind,
                period,
            });
            id
        };
        let state = Arc::clone(&self.state);
        TimerHandle::new(move || {
            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            state.armed.retain(|a| a.id != id);
        })
    }

    /// Currently armed timers, oldest first.
    pub fn active(&self) -> Vec<(TimerToken, TimerKind)> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.armed.iter().map(|a| (a.token, a.kind)).collect()
    }

    pub fn is_active(&self, token: TimerToken) -> bool {
        self.active().iter().any(|(t, _)| *t == token)
    }

    /// Token of the most recently armed timer of `kind`, if any is armed.
    pub fn latest(&self, kind: TimerKind) -> Option<TimerToken> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state
            .armed
            .iter()
            .rev()
            .find(|a| a.kind == kind)
            .map(|a| a.token)
    }

    /// Period or delay an armed timer was scheduled with.
    pub fn period(&self, token: TimerToken, kind: TimerKind) -> Option<Duration> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state
            .armed
            .iter()
            .find(|a| a.token == token && a.kind == kind)
            .map(|a| a.period)
    }
}

impl Scheduler for ManualScheduler {
    fn every(&self, token: TimerToken, period: Duration) -> TimerHandle {
        self.arm(token, TimerKind::Tick, period)
    }

    fn after(&self, token: TimerToken, delay: Duration) -> TimerHandle {
        self.arm(token, TimerKind::Settled, delay)
    }
}
