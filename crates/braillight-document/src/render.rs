// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Marked text — the structured rendering handed to the presentation layer.
//
// The view is a sequence of text fragments, each tagged with a marker; the UI
// styles fragments however its toolkit likes. No markup is produced here.

use serde::{Deserialize, Serialize};

/// How a fragment of a page should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Marker {
    /// Unmodified baseline text.
    Plain,
    /// Must-review text; never also shown as edited.
    Protected,
    /// Text on a page the user has changed.
    UserEdited,
}

/// One run of text sharing a marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkedFragment {
    pub text: String,
    pub marker: Marker,
}

/// A rendered page: fragments in reading order.
///
/// Adjacent fragments never share a marker and no fragment is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkedText {
    fragments: Vec<MarkedFragment>,
}

impl MarkedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` with `marker`, merging into the previous fragment when
    /// the markers match.
    pub fn push(&mut self, text: &str, marker: Marker) {
        if text.is_empty() {
            return;
        }
        match self.fragments.last_mut() {
            Some(last) if last.marker == marker => last.text.push_str(text),
            _ => self.fragments.push(MarkedFragment {
                text: text.to_owned(),
                marker,
            }),
        }
    }

    pub fn fragments(&self) -> &[MarkedFragment] {
        &self.fragments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MarkedFragment> {
        self.fragments.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Whether any fragment carries `marker`.
    pub fn contains(&self, marker: Marker) -> bool {
        self.fragments.iter().any(|f| f.marker == marker)
    }

    /// The text with markers stripped.
    pub fn plain_text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    /// Per-character markers, in order. Used for checking span coverage.
    pub fn char_markers(&self) -> Vec<(char, Marker)> {
        self.fragments
            .iter()
            .flat_map(|f| f.text.chars().map(move |c| (c, f.marker)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a MarkedText {
    type Item = &'a MarkedFragment;
    type IntoIter = std::slice::Iter<'a, MarkedFragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_merges_same_marker() {
        let mut text = MarkedText::new();
        text.push("ab", Marker::Plain);
        text.push("cd", Marker::Plain);
        text.push("ef", Marker::Protected);
        text.push("", Marker::UserEdited);
        assert_eq!(text.fragments().len(), 2);
        assert_eq!(text.fragments()[0].text, "abcd");
        assert_eq!(text.plain_text(), "abcdef");
        assert!(!text.contains(Marker::UserEdited));
    }

    #[test]
    fn char_markers_follow_multibyte_text() {
        let mut text = MarkedText::new();
        text.push("⠼⠚", Marker::UserEdited);
        text.push("⠉", Marker::Protected);
        let markers = text.char_markers();
        assert_eq!(markers.len(), 3);
        assert_eq!(markers[2], ('⠉', Marker::Protected));
    }

    #[test]
    fn marker_serializes_kebab_case() {
        let json = serde_json::to_string(&Marker::UserEdited).unwrap();
        assert_eq!(json, "\"user-edited\"");
    }
}
