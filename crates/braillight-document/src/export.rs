// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export request — what the artifact export collaborator receives once the
// workflow completes: the reviewed braille text and the output file name.

use std::path::Path;

use braillight_core::types::UploadedArtifact;
use serde::Serialize;

use crate::session::ReviewedStage;

/// Separator between pages in exported text (form feed, as in BRF files).
pub const PAGE_SEPARATOR: char = '\u{0C}';

/// Replace the extension of `source_name` with `extension`.
///
/// A name without an extension gets one appended. Only the last extension
/// is replaced (`notes.tar.gz` becomes `notes.tar.brf`).
pub fn output_file_name(source_name: &str, extension: &str) -> String {
    let extension = extension.trim_start_matches('.');
    Path::new(source_name)
        .with_extension(extension)
        .to_string_lossy()
        .into_owned()
}

/// Everything needed to produce the downloadable artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRequest {
    pub file_name: String,
    /// Reviewed braille pages joined with [`PAGE_SEPARATOR`].
    pub braille_text: String,
    pub page_count: usize,
    pub modified_pages: usize,
}

impl ExportRequest {
    pub fn new(artifact: &UploadedArtifact, braille: &ReviewedStage, extension: &str) -> Self {
        Self {
            file_name: output_file_name(&artifact.name, extension),
            braille_text: braille.joined(),
            page_count: braille.page_count(),
            modified_pages: braille.modified_pages(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ReviewedPage;

    #[test]
    fn replaces_extension() {
        assert_eq!(output_file_name("매3비 기출.pdf", "brf"), "매3비 기출.brf");
        assert_eq!(output_file_name("Report.PDF", ".brf"), "Report.brf");
    }

    #[test]
    fn appends_when_missing() {
        assert_eq!(output_file_name("scan", "brf"), "scan.brf");
    }

    #[test]
    fn replaces_only_last_extension() {
        assert_eq!(output_file_name("notes.tar.gz", "brf"), "notes.tar.brf");
    }

    #[test]
    fn request_joins_reviewed_pages() {
        let artifact = UploadedArtifact::new("book.pdf", b"%PDF".to_vec());
        let braille = ReviewedStage {
            pages: vec![
                ReviewedPage {
                    text: "⠼⠚".into(),
                    modified: true,
                },
                ReviewedPage {
                    text: "⠉⠦".into(),
                    modified: false,
                },
            ],
        };
        let request = ExportRequest::new(&artifact, &braille, "brf");
        assert_eq!(request.file_name, "book.brf");
        assert_eq!(request.braille_text, "⠼⠚\u{0C}⠉⠦");
        assert_eq!(request.page_count, 2);
        assert_eq!(request.modified_pages, 1);
    }
}
