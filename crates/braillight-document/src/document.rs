// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Editable document — an immutable baseline text plus an optional user
// override, rendered with protected and edited markers.
//
// "Edited" is a whole-page flag, not a character diff: the override stores the
// complete replacement text, and rendering highlights every unprotected part
// of the baseline once the page differs from it. A page edited back to its
// exact baseline is pristine again.

use braillight_core::error::Result;
use tracing::debug;

use crate::baseline::PageBaseline;
use crate::render::{MarkedText, Marker};
use crate::span::{self, ProtectedSpan};

/// The in-progress edit buffer while a page is in editing mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    text: String,
}

impl EditSession {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters; the caret goes here when editing starts.
    pub fn content_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// One reviewable page of text or braille.
#[derive(Debug, Clone)]
pub struct EditableDocument {
    original: String,
    edited: Option<String>,
    protected: Vec<ProtectedSpan>,
    draft: Option<EditSession>,
}

impl EditableDocument {
    /// Create a document over `original` with the given protected spans.
    ///
    /// Fails if any span is out of range or splits a code point.
    pub fn new(
        original: impl Into<String>,
        protected: impl IntoIterator<Item = ProtectedSpan>,
    ) -> Result<Self> {
        let original = original.into();
        let protected = span::normalize(&original, protected)?;
        Ok(Self {
            original,
            edited: None,
            protected,
            draft: None,
        })
    }

    /// A document with no protected spans.
    pub fn plain(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            edited: None,
            protected: Vec::new(),
            draft: None,
        }
    }

    pub fn from_baseline(page: &PageBaseline) -> Result<Self> {
        Self::new(page.text.clone(), page.protected.iter().copied())
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// The user's override, present only while it differs from the original.
    pub fn edited(&self) -> Option<&str> {
        self.edited.as_deref()
    }

    pub fn protected_spans(&self) -> &[ProtectedSpan] {
        &self.protected
    }

    pub fn is_modified(&self) -> bool {
        self.edited.is_some()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// The text currently in effect: the override if any, else the original.
    pub fn effective_text(&self) -> &str {
        self.edited.as_deref().unwrap_or(&self.original)
    }

    pub fn draft(&self) -> Option<&EditSession> {
        self.draft.as_ref()
    }

    /// Enter editing mode, seeding the buffer with the effective text.
    ///
    /// Calling this while already editing keeps the existing buffer.
    pub fn begin_edit(&mut self) -> &EditSession {
        let (original, edited) = (&self.original, &self.edited);
        self.draft.get_or_insert_with(|| {
            let text = edited.as_deref().unwrap_or(original.as_str()).to_owned();
            debug!(chars = text.chars().count(), "edit started");
            EditSession { text }
        })
    }

    /// Replace the in-progress buffer. Starts editing if not already.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        let text = text.into();
        match self.draft.as_mut() {
            Some(draft) => draft.text = text,
            None => self.draft = Some(EditSession { text }),
        }
    }

    /// End editing with `new_text` as the page content.
    ///
    /// Text identical to the original clears the override. Any text,
    /// including empty, is accepted.
    pub fn commit_edit(&mut self, new_text: impl Into<String>) {
        let new_text = new_text.into();
        self.draft = None;
        if new_text == self.original {
            self.edited = None;
        } else {
            self.edited = Some(new_text);
        }
        debug!(modified = self.edited.is_some(), "edit committed");
    }

    /// Commit the in-progress buffer, if editing. Returns whether a commit
    /// happened.
    pub fn commit_draft(&mut self) -> bool {
        match self.draft.take() {
            Some(draft) => {
                self.commit_edit(draft.text);
                true
            }
            None => false,
        }
    }

    /// Render the original text with review markers.
    ///
    /// Protected spans always carry `Protected`. When the page is modified,
    /// everything outside protected spans carries `UserEdited`; otherwise it
    /// is `Plain`.
    pub fn render_view(&self) -> MarkedText {
        let outside = if self.edited.is_some() {
            Marker::UserEdited
        } else {
            Marker::Plain
        };

        let mut view = MarkedText::new();
        let mut cursor = 0;
        for span in &self.protected {
            view.push(&self.original[cursor..span.start], outside);
            view.push(&self.original[span.range()], Marker::Protected);
            cursor = span.end;
        }
        view.push(&self.original[cursor..], outside);
        view
    }
}
