// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// braillight-document — Review documents for the Braillight workflow.
//
// Provides the editable page model (original baseline plus an optional user
// override), protected-span highlighting rendered as structured marked text,
// per-stage page baselines, paginated review sessions, and export naming.

pub mod baseline;
pub mod document;
pub mod export;
pub mod render;
pub mod session;
pub mod span;

// Re-export the primary types so callers can use `braillight_document::EditableDocument` etc.
pub use baseline::{PageBaseline, StageBaseline};
pub use document::{EditSession, EditableDocument};
pub use export::{ExportRequest, PAGE_SEPARATOR, output_file_name};
pub use render::{MarkedFragment, MarkedText, Marker};
pub use session::{AdvanceOutcome, PaginatedReviewSession, ReviewedPage, ReviewedStage};
pub use span::ProtectedSpan;
