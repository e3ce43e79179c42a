// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Workflow configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BraillightError, Result};

/// Timing for one simulated progress run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressTiming {
    /// Time for the bar to go from 0 to 100.
    pub duration_ms: u64,
    /// Time between ticks.
    pub interval_ms: u64,
    /// Pause after reaching 100 before the run completes.
    pub settle_ms: u64,
}

impl ProgressTiming {
    pub const fn new(duration_ms: u64, interval_ms: u64, settle_ms: u64) -> Self {
        Self {
            duration_ms,
            interval_ms,
            settle_ms,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Number of ticks needed to reach 100 (never zero).
    pub fn total_steps(&self) -> u32 {
        let steps = self.duration_ms.div_ceil(self.interval_ms.max(1)).max(1);
        u32::try_from(steps).unwrap_or(u32::MAX)
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(BraillightError::InvalidConfig(format!(
                "{name}: interval_ms must be greater than zero"
            )));
        }
        if self.duration_ms == 0 {
            return Err(BraillightError::InvalidConfig(format!(
                "{name}: duration_ms must be greater than zero"
            )));
        }
        if self.interval_ms > self.duration_ms {
            return Err(BraillightError::InvalidConfig(format!(
                "{name}: interval_ms ({}) exceeds duration_ms ({})",
                self.interval_ms, self.duration_ms
            )));
        }
        Ok(())
    }
}

/// Persistent workflow settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Simulated transfer after a file is selected.
    pub upload: ProgressTiming,
    /// Loading screen while text is extracted.
    pub ocr_loading: ProgressTiming,
    /// Loading screen while braille is transcribed.
    pub braille_loading: ProgressTiming,
    /// Estimated-time label shown during text extraction.
    pub ocr_eta_label: String,
    /// Estimated-time label shown during transcription.
    pub braille_eta_label: String,
    /// Extensions (lowercase, no dot) the upload stage accepts.
    pub accepted_extensions: Vec<String>,
    /// Extension of the exported artifact.
    pub output_extension: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            upload: ProgressTiming::new(1500, 50, 200),
            ocr_loading: ProgressTiming::new(5000, 50, 500),
            braille_loading: ProgressTiming::new(5000, 50, 500),
            ocr_eta_label: "about 12 minutes".into(),
            braille_eta_label: "about 8 minutes".into(),
            accepted_extensions: vec!["pdf".into()],
            output_extension: "brf".into(),
        }
    }
}

impl WorkflowConfig {
    /// Check timing and naming settings before a controller uses them.
    pub fn validate(&self) -> Result<()> {
        self.upload.validate("upload")?;
        self.ocr_loading.validate("ocr_loading")?;
        self.braille_loading.validate("braille_loading")?;
        let ext = self.output_extension.trim_start_matches('.');
        if ext.is_empty() {
            return Err(BraillightError::InvalidConfig(
                "output_extension must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Whether an upload with this extension is accepted.
    ///
    /// An empty accept list accepts everything.
    pub fn accepts_extension(&self, ext: Option<&str>) -> bool {
        if self.accepted_extensions.is_empty() {
            return true;
        }
        match ext {
            Some(ext) => self
                .accepted_extensions
                .iter()
                .any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}
