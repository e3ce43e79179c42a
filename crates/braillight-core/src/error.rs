// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Braillight.

use thiserror::Error;

use crate::types::WorkflowStage;

/// Top-level error type for all Braillight operations.
#[derive(Debug, Error)]
pub enum BraillightError {
    // -- Workflow --
    #[error("`{action}` is not available in the {stage} stage")]
    ActionUnavailable {
        action: &'static str,
        stage: WorkflowStage,
    },

    #[error("no file selected")]
    NoFileSelected,

    // -- Documents --
    #[error("unsupported document type: {0}")]
    UnsupportedDocument(String),

    #[error("protected span {start}..{end} is invalid for text of {len} bytes")]
    InvalidSpan { start: usize, end: usize, len: usize },

    #[error("stage baseline has no pages")]
    EmptyBaseline,

    // -- External collaborators (OCR, transcription) --
    #[error("collaborator failed: {0}")]
    Collaborator(String),

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BraillightError>;
