// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Config file persistence.

use std::path::Path;

use braillight_core::config::WorkflowConfig;
use braillight_core::error::Result;
use tracing::{info, warn};

const CONFIG_FILE: &str = "config.json";

/// Load `config.json` from `data_dir`, writing defaults on first run.
///
/// A file that fails to parse or validate is left alone and defaults are
/// used for this session.
pub fn load_or_init(data_dir: &Path) -> Result<WorkflowConfig> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        let config = WorkflowConfig::default();
        persist(data_dir, &config)?;
        info!(path = %path.display(), "wrote default config");
        return Ok(config);
    }

    let data = std::fs::read_to_string(&path)?;
    let parsed: Result<WorkflowConfig> = serde_json::from_str::<WorkflowConfig>(&data)
        .map_err(Into::into)
        .and_then(|config| config.validate().map(|()| config));
    match parsed {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unusable config; using defaults");
            Ok(WorkflowConfig::default())
        }
    }
}

/// Write `config` to `data_dir/config.json`.
pub fn persist(data_dir: &Path, config: &WorkflowConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(data_dir.join(CONFIG_FILE), json)?;
    Ok(())
}
