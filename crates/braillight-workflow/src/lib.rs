// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// braillight-workflow — The conversion workflow state machine.
//
// Sequences upload, text extraction, text review, braille transcription,
// braille review and completion. Loading screens are driven by a simulated
// progress bar whose ticks come from a pluggable timer scheduler; the tokio
// scheduler is used at runtime and a manual one in tests.

pub mod collaborators;
pub mod controller;
pub mod progress;
pub mod timer;
pub mod upload;

pub use collaborators::{BrailleTranscriber, PrecomputedBaseline, TextExtractor};
pub use controller::{StageChange, TimerOutcome, WorkflowController, WorkflowSnapshot};
pub use progress::{ProgressPhase, ProgressSimulator, Tick};
pub use timer::{ManualScheduler, Scheduler, TimerEvent, TimerHandle, TimerKind, TimerToken, TokioScheduler};
pub use upload::UploadPhase;
