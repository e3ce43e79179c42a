// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Upload stage sub-state.

use serde::{Deserialize, Serialize};

/// Where the upload stage is.
///
/// `NoFile -> Uploading` on select, `Uploading -> UploadComplete` when the
/// transfer simulation finishes, any state `-> NoFile` on remove. Selecting
/// again from `Uploading` or `UploadComplete` restarts the transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UploadPhase {
    #[default]
    NoFile,
    Uploading,
    UploadComplete,
}

impl UploadPhase {
    /// The start button is enabled only after the transfer finishes.
    pub fn can_confirm(self) -> bool {
        self == Self::UploadComplete
    }
}

impl std::fmt::Display for UploadPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::NoFile => "no file",
            Self::Uploading => "uploading",
            Self::UploadComplete => "upload complete",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_complete_upload_can_confirm() {
        assert!(!UploadPhase::NoFile.can_confirm());
        assert!(!UploadPhase::Uploading.can_confirm());
        assert!(UploadPhase::UploadComplete.can_confirm());
        assert_eq!(UploadPhase::default(), UploadPhase::NoFile);
    }

    #[test]
    fn serializes_kebab_case() {
        let json = serde_json::to_string(&UploadPhase::UploadComplete).unwrap();
        assert_eq!(json, "\"upload-complete\"");
    }
}
