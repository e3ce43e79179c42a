// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Paginated review session — one review stage (text or braille), paged.
//
// Each page is viewed or edited in turn. Navigating away from a page commits
// any edit in progress. Every page has its own document built from its own
// baseline, so going back shows the user's earlier corrections and a page
// seen for the first time is pristine. On the final page, advancing signals
// that the stage is done rather than moving.

use braillight_core::error::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::baseline::StageBaseline;
use crate::document::EditableDocument;
use crate::export::PAGE_SEPARATOR;
use crate::render::MarkedText;

/// Result of [`PaginatedReviewSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to this 1-based page.
    Moved(u32),
    /// Already on the final page; the stage is complete.
    StageComplete,
}

/// Review state for one stage.
#[derive(Debug)]
pub struct PaginatedReviewSession {
    /// 1-based, always in `1..=pages.len()`.
    current_page: u32,
    /// One document per page, each built from its own baseline.
    pages: Vec<EditableDocument>,
}

impl PaginatedReviewSession {
    /// Start a session on page 1 in viewing mode.
    pub fn new(baseline: StageBaseline) -> Result<Self> {
        let pages = baseline
            .pages()
            .iter()
            .map(EditableDocument::from_baseline)
            .collect::<Result<Vec<_>>>()?;
        info!(total_pages = pages.len(), "review session started");
        Ok(Self {
            current_page: 1,
            pages,
        })
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        u32::try_from(self.pages.len()).unwrap_or(u32::MAX)
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    /// On the last page the next action submits the stage.
    pub fn is_final_page(&self) -> bool {
        self.current_page == self.total_pages()
    }

    pub fn is_editing(&self) -> bool {
        self.document().is_editing()
    }

    /// Document for the current page.
    pub fn document(&self) -> &EditableDocument {
        &self.pages[self.index()]
    }

    pub fn document_mut(&mut self) -> &mut EditableDocument {
        let index = self.index();
        &mut self.pages[index]
    }

    /// Marked view of the current page.
    pub fn render_view(&self) -> MarkedText {
        self.document().render_view()
    }

    /// Switch the current page into editing mode (the user clicked the text).
    ///
    /// Returns the buffer length in characters, where the caret belongs.
    pub fn enter_edit_mode(&mut self) -> usize {
        self.document_mut().begin_edit().content_len()
    }

    /// Character length of the edit buffer, or of the effective text when
    /// not editing.
    pub fn content_len(&self) -> usize {
        let doc = self.document();
        match doc.draft() {
            Some(draft) => draft.content_len(),
            None => doc.effective_text().chars().count(),
        }
    }

    /// Replace the edit buffer (keystroke path).
    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.document_mut().update_draft(text);
    }

    /// Commit the edit buffer (blur path). No-op when not editing.
    pub fn commit(&mut self) -> bool {
        self.document_mut().commit_draft()
    }

    /// Commit `text` directly as the current page's content.
    pub fn commit_text(&mut self, text: impl Into<String>) {
        self.document_mut().commit_edit(text);
    }

    /// Commit any edit, then move to the next page or report completion.
    pub fn advance(&mut self) -> AdvanceOutcome {
        self.commit();
        if self.current_page < self.total_pages() {
            self.go_to(self.current_page + 1);
            AdvanceOutcome::Moved(self.current_page)
        } else {
            info!(page = self.current_page, "final page reviewed");
            AdvanceOutcome::StageComplete
        }
    }

    /// Commit any edit, then move back a page. Returns whether the page
    /// changed; on page 1 nothing moves.
    pub fn retreat(&mut self) -> bool {
        self.commit();
        if self.current_page > 1 {
            self.go_to(self.current_page - 1);
            true
        } else {
            false
        }
    }

    /// Number of pages whose effective text differs from the baseline.
    pub fn modified_pages(&self) -> usize {
        self.pages.iter().filter(|doc| doc.is_modified()).count()
    }

    /// Commit any edit and consume the session into its reviewed pages.
    pub fn finish(mut self) -> ReviewedStage {
        self.commit();
        let pages = self
            .pages
            .iter()
            .map(|doc| ReviewedPage {
                text: doc.effective_text().to_owned(),
                modified: doc.is_modified(),
            })
            .collect();
        ReviewedStage { pages }
    }

    fn index(&self) -> usize {
        (self.current_page - 1) as usize
    }

    fn go_to(&mut self, page: u32) {
        debug!(from = self.current_page, to = page, "page changed");
        self.current_page = page;
    }
}

/// A page after review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewedPage {
    /// Edited text if the user changed the page, else the baseline.
    pub text: String,
    pub modified: bool,
}

/// All pages of a stage after review, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewedStage {
    pub pages: Vec<ReviewedPage>,
}

impl ReviewedStage {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn modified_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.modified).count()
    }

    /// Page texts joined with the page separator.
    pub fn joined(&self) -> String {
        let mut out = String::new();
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                out.push(PAGE_SEPARATOR);
            }
            out.push_str(&page.text);
        }
        out
    }
}
