// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stage baselines — the per-page output of the text extraction and braille
// transcription collaborators, as received by a review stage.

use braillight_core::error::{BraillightError, Result};
use serde::{Deserialize, Serialize};

use crate::span::{self, ProtectedSpan};

/// Baseline content of a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBaseline {
    pub text: String,
    #[serde(default)]
    pub protected: Vec<ProtectedSpan>,
}

impl PageBaseline {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            protected: Vec::new(),
        }
    }

    /// Add a protected span. Validity is checked when the stage is built.
    pub fn with_protected(mut self, span: ProtectedSpan) -> Self {
        self.protected.push(span);
        self
    }

    /// Protect every occurrence of `phrase` in the page text.
    pub fn with_protected_phrase(mut self, phrase: &str) -> Self {
        let found = ProtectedSpan::find_all(&self.text, phrase);
        self.protected.extend(found);
        self
    }
}

/// Ordered, non-empty list of page baselines for one review stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageBaseline {
    pages: Vec<PageBaseline>,
}

impl StageBaseline {
    /// Build a stage from its pages, validating and normalizing spans.
    pub fn new(pages: Vec<PageBaseline>) -> Result<Self> {
        if pages.is_empty() {
            return Err(BraillightError::EmptyBaseline);
        }
        let pages = pages
            .into_iter()
            .map(|page| -> Result<PageBaseline> {
                let protected = span::normalize(&page.text, page.protected)?;
                Ok(PageBaseline {
                    text: page.text,
                    protected,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { pages })
    }

    /// A stage whose pages all carry the same protected phrase.
    pub fn from_texts<I, S>(texts: I, protected_phrase: Option<&str>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages = texts
            .into_iter()
            .map(|t| {
                let page = PageBaseline::new(t);
                match protected_phrase {
                    Some(phrase) => page.with_protected_phrase(phrase),
                    None => page,
                }
            })
            .collect();
        Self::new(pages)
    }

    pub fn page_count(&self) -> u32 {
        u32::try_from(self.pages.len()).unwrap_or(u32::MAX)
    }

    /// Baseline of 1-based page `page`.
    pub fn page(&self, page: u32) -> Option<&PageBaseline> {
        let index = usize::try_from(page).ok()?.checked_sub(1)?;
        self.pages.get(index)
    }

    pub fn pages(&self) -> &[PageBaseline] {
        &self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stage_rejected() {
        assert!(matches!(
            StageBaseline::new(Vec::new()),
            Err(BraillightError::EmptyBaseline)
        ));
    }

    #[test]
    fn pages_are_one_based() {
        let stage = StageBaseline::from_texts(["one", "two"], None).unwrap();
        assert_eq!(stage.page_count(), 2);
        assert_eq!(stage.page(1).map(|p| p.text.as_str()), Some("one"));
        assert_eq!(stage.page(2).map(|p| p.text.as_str()), Some("two"));
        assert!(stage.page(0).is_none());
        assert!(stage.page(3).is_none());
    }

    #[test]
    fn phrase_protection_applies_per_page() {
        let stage =
            StageBaseline::from_texts(["a key b", "no match", "key key"], Some("key")).unwrap();
        assert_eq!(stage.page(1).unwrap().protected, vec![ProtectedSpan::new(2, 5)]);
        assert!(stage.page(2).unwrap().protected.is_empty());
        assert_eq!(
            stage.page(3).unwrap().protected,
            vec![ProtectedSpan::new(0, 3), ProtectedSpan::new(4, 7)]
        );
    }

    #[test]
    fn invalid_span_fails_stage() {
        let page = PageBaseline::new("⠼⠚").with_protected(ProtectedSpan::new(0, 2));
        assert!(StageBaseline::new(vec![page]).is_err());
    }

    #[test]
    fn page_baseline_deserializes_without_spans() {
        let page: PageBaseline = serde_json::from_str(r#"{ "text": "⠼⠚⠉" }"#).unwrap();
        assert!(page.protected.is_empty());
    }
}
