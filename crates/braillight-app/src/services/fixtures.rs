// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stand-in collaborators for the console.
//
// They produce deterministic pages with a phrase that must be reviewed, so
// the whole workflow can be exercised without the OCR and transcription
// services.

use braillight_core::error::Result;
use braillight_core::types::UploadedArtifact;
use braillight_document::baseline::StageBaseline;
use braillight_document::session::ReviewedStage;
use braillight_workflow::collaborators::{BrailleTranscriber, TextExtractor};
use tracing::debug;

/// Pages produced by the text extraction stand-in.
pub const TEXT_PAGES: usize = 21;

/// Phrase flagged for review in extracted text.
pub const TEXT_PHRASE: &str = "권위와 상식에 의문 부호를 제기";

/// Phrase flagged for review in transcribed braille.
pub const BRAILLE_PHRASE: &str = "⠠⠕⠂⠮⠀⠊⠪⠐⠎⠉";

const PARAGRAPHS: [&str; 4] = [
    "그의 시는 모든 권위와 상식에 의문 부호를 제기하고 있다.",
    "시인은 사회가 감추고 싶어 하는 상처를 드러내는 사람이다.",
    "얼굴과 시는 하나가 되어 서로를 증언한다.",
    "그의 문장은 날카롭게 대상의 본질을 파고든다.",
];

const BRAILLE_LEAD: &str = "⠼⠚⠉⠦⠄⠫⠠⠴⠺⠀⠉⠗⠬⠶⠮⠀";
const BRAILLE_TAIL: &str = "⠀⠔⠔⠘⠥⠈⠕⠢⠢⠧";

/// Text extraction stand-in: titled pages cycling through fixed paragraphs.
#[derive(Debug, Clone)]
pub struct FixtureExtractor {
    pages: usize,
}

impl FixtureExtractor {
    pub fn new(pages: usize) -> Self {
        Self { pages }
    }
}

impl Default for FixtureExtractor {
    fn default() -> Self {
        Self::new(TEXT_PAGES)
    }
}

impl TextExtractor for FixtureExtractor {
    fn extract(&self, artifact: &UploadedArtifact) -> Result<StageBaseline> {
        let title = artifact.display_stem();
        debug!(title, pages = self.pages, "fixture extraction");
        let pages = (0..self.pages).map(|i| {
            let body = PARAGRAPHS[i % PARAGRAPHS.len()];
            format!("{title} ({}쪽)\n{body}", i + 1)
        });
        StageBaseline::from_texts(pages, Some(TEXT_PHRASE))
    }
}

/// Transcription stand-in: one braille page per reviewed text page, each
/// containing the review phrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureTranscriber;

impl BrailleTranscriber for FixtureTranscriber {
    fn transcribe(&self, text: &ReviewedStage) -> Result<StageBaseline> {
        debug!(pages = text.page_count(), "fixture transcription");
        let pages = text.pages.iter().enumerate().map(|(i, page)| {
            let marker = if page.modified { "⠿" } else { "" };
            format!("⠼{}{BRAILLE_LEAD}{BRAILLE_PHRASE}{BRAILLE_TAIL}{marker}", digit_cell(i + 1))
        });
        StageBaseline::from_texts(pages, Some(BRAILLE_PHRASE))
    }
}

/// Braille digit cell for the last digit of `n`.
fn digit_cell(n: usize) -> char {
    const DIGITS: [char; 10] = ['⠚', '⠁', '⠃', '⠉', '⠙', '⠑', '⠋', '⠛', '⠓', '⠊'];
    DIGITS[n % 10]
}

#[cfg(test)]
mod tests {
    use super::*;
    use braillight_document::ReviewedPage;

    #[test]
    fn extracted_pages_flag_the_phrase() {
        let artifact = UploadedArtifact::new("김수영 평론.pdf", b"%PDF".to_vec());
        let stage = FixtureExtractor::default().extract(&artifact).unwrap();
        assert_eq!(stage.page_count(), TEXT_PAGES as u32);

        let first = stage.page(1).unwrap();
        assert!(first.text.starts_with("김수영 평론 (1쪽)"));
        assert_eq!(first.protected.len(), 1);
        let span = first.protected[0];
        assert_eq!(&first.text[span.range()], TEXT_PHRASE);

        assert!(stage.page(2).unwrap().protected.is_empty());
    }

    #[test]
    fn transcription_matches_page_count() {
        let reviewed = ReviewedStage {
            pages: vec![
                ReviewedPage {
                    text: "a".into(),
                    modified: false,
                },
                ReviewedPage {
                    text: "b".into(),
                    modified: true,
                },
            ],
        };
        let stage = FixtureTranscriber.transcribe(&reviewed).unwrap();
        assert_eq!(stage.page_count(), 2);
        for page in stage.pages() {
            assert_eq!(page.protected.len(), 1);
        }
        assert!(stage.page(2).unwrap().text.ends_with('⠿'));
        assert!(stage.page(1).unwrap().text.starts_with("⠼⠁"));
    }
}
