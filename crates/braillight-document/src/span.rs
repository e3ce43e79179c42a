// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Protected spans — fixed ranges of a baseline text that must always be
// flagged for mandatory review.
//
// Spans are byte ranges into the baseline, but every boundary must fall on a
// UTF-8 code point boundary: braille cells (U+2800 block) and Hangul are
// three bytes each, so a raw byte offset could split a character.

use std::ops::Range;

use braillight_core::error::{BraillightError, Result};
use serde::{Deserialize, Serialize};

/// A half-open byte range `start..end` of a baseline text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProtectedSpan {
    pub start: usize,
    pub end: usize,
}

impl ProtectedSpan {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that this span lies inside `text` on code point boundaries.
    pub fn validate(&self, text: &str) -> Result<()> {
        let ok = self.start <= self.end
            && self.end <= text.len()
            && text.is_char_boundary(self.start)
            && text.is_char_boundary(self.end);
        if ok {
            Ok(())
        } else {
            Err(BraillightError::InvalidSpan {
                start: self.start,
                end: self.end,
                len: text.len(),
            })
        }
    }

    /// Spans covering every non-overlapping occurrence of `phrase` in `text`.
    pub fn find_all(text: &str, phrase: &str) -> Vec<ProtectedSpan> {
        if phrase.is_empty() {
            return Vec::new();
        }
        text.match_indices(phrase)
            .map(|(start, m)| ProtectedSpan::new(start, start + m.len()))
            .collect()
    }
}

/// Validate, sort and merge spans for `text`.
///
/// Empty spans are dropped; overlapping or touching spans are merged so the
/// result is strictly increasing and disjoint.
pub fn normalize(text: &str, spans: impl IntoIterator<Item = ProtectedSpan>) -> Result<Vec<ProtectedSpan>> {
    let mut spans: Vec<ProtectedSpan> = spans.into_iter().collect();
    for span in &spans {
        span.validate(text)?;
    }
    spans.retain(|s| !s.is_empty());
    spans.sort_unstable();

    let mut merged: Vec<ProtectedSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    Ok(merged)
}
