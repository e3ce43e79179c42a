// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// External collaborators that produce stage baselines.
//
// Text extraction and braille transcription run outside the workflow. The
// controller calls them when a loading stage finishes and reviews whatever
// they return.

use braillight_core::error::Result;
use braillight_core::types::UploadedArtifact;
use braillight_document::baseline::StageBaseline;
use braillight_document::session::ReviewedStage;

/// Produces the text baseline for the text review stage.
pub trait TextExtractor {
    fn extract(&self, artifact: &UploadedArtifact) -> Result<StageBaseline>;
}

/// Produces the braille baseline from the reviewed text.
pub trait BrailleTranscriber {
    fn transcribe(&self, text: &ReviewedStage) -> Result<StageBaseline>;
}

impl<F> TextExtractor for F
where
    F: Fn(&UploadedArtifact) -> Result<StageBaseline>,
{
    fn extract(&self, artifact: &UploadedArtifact) -> Result<StageBaseline> {
        self(artifact)
    }
}

impl<F> BrailleTranscriber for F
where
    F: Fn(&ReviewedStage) -> Result<StageBaseline>,
{
    fn transcribe(&self, text: &ReviewedStage) -> Result<StageBaseline> {
        self(text)
    }
}

/// Collaborator that returns a fixed baseline regardless of input.
#[derive(Debug, Clone)]
pub struct PrecomputedBaseline(pub StageBaseline);

impl TextExtractor for PrecomputedBaseline {
    fn extract(&self, _artifact: &UploadedArtifact) -> Result<StageBaseline> {
        Ok(self.0.clone())
    }
}

impl BrailleTranscriber for PrecomputedBaseline {
    fn transcribe(&self, _text: &ReviewedStage) -> Result<StageBaseline> {
        Ok(self.0.clone())
    }
}
