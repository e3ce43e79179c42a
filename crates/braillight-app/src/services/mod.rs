// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — everything the console needs besides the workflow itself:
// where data lives, persisted settings, and the stand-in collaborators.

pub mod config_store;
pub mod data_dir;
pub mod fixtures;
