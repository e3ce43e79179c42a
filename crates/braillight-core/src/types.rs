// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Braillight conversion workflow.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::integrity::hash_bytes;

/// The six phases of a conversion, in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowStage {
    /// Waiting for the user to supply a source document.
    Upload,
    /// Text is being extracted from the source document.
    OcrLoading,
    /// User reviews and corrects the extracted text.
    TextEdit,
    /// Corrected text is being transcribed to braille.
    BrailleLoading,
    /// User reviews and corrects the braille output.
    BrailleEdit,
    /// Braille-ready artifact is available for export.
    Completed,
}

impl WorkflowStage {
    /// The stage that follows this one, or `None` for `Completed`.
    ///
    /// Start-over is not a successor; it is the only backward edge and is
    /// handled by the controller directly.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Upload => Some(Self::OcrLoading),
            Self::OcrLoading => Some(Self::TextEdit),
            Self::TextEdit => Some(Self::BrailleLoading),
            Self::BrailleLoading => Some(Self::BrailleEdit),
            Self::BrailleEdit => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Stages that show a progress simulator while a collaborator works.
    pub fn is_loading(self) -> bool {
        matches!(self, Self::OcrLoading | Self::BrailleLoading)
    }

    /// Stages that host a paginated review session.
    pub fn is_review(self) -> bool {
        matches!(self, Self::TextEdit | Self::BrailleEdit)
    }
}

impl std::fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Upload => "upload",
            Self::OcrLoading => "ocr-loading",
            Self::TextEdit => "text-edit",
            Self::BrailleLoading => "braille-loading",
            Self::BrailleEdit => "braille-edit",
            Self::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Unique identifier for an uploaded artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactId(pub Uuid);

impl ArtifactId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ArtifactId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user-supplied source document.
///
/// The payload is opaque to the workflow; it is only handed to the text
/// extraction collaborator. Cloning shares the payload.
#[derive(Debug, Clone)]
pub struct UploadedArtifact {
    pub id: ArtifactId,
    pub name: String,
    bytes: Arc<[u8]>,
    /// SHA-256 of the payload, lowercase hex.
    pub content_hash: String,
    pub uploaded_at: DateTime<Utc>,
}

impl UploadedArtifact {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        Self {
            id: ArtifactId::new(),
            name: name.into(),
            content_hash: hash_bytes(&bytes),
            bytes,
            uploaded_at: Utc::now(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// File extension without the dot, if the name has one.
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.name).extension().and_then(|e| e.to_str())
    }

    /// Name without its extension, used as the document title.
    pub fn display_stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }

    /// Serializable summary for the presentation layer (no payload).
    pub fn summary(&self) -> ArtifactSummary {
        ArtifactSummary {
            id: self.id,
            name: self.name.clone(),
            size_bytes: self.bytes.len(),
            content_hash: self.content_hash.clone(),
            uploaded_at: self.uploaded_at,
        }
    }
}

/// What the UI needs to show about an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSummary {
    pub id: ArtifactId,
    pub name: String,
    pub size_bytes: usize,
    pub content_hash: String,
    pub uploaded_at: DateTime<Utc>,
}
