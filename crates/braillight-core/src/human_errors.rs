// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the people using the converter.
//
// Every technical error is mapped to plain language with a clear suggestion.
// Severity drives how the presentation layer shows the message.

use crate::error::BraillightError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A background step hiccupped; trying again may work.
    Transient,
    /// User must do something (choose a file, pick another format).
    ActionRequired,
    /// Cannot be fixed by retrying; the setup or the input is wrong.
    Permanent,
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `BraillightError` into a `HumanError`.
pub fn humanize_error(err: &BraillightError) -> HumanError {
    match err {
        BraillightError::ActionUnavailable { stage, .. } => HumanError {
            message: "That step isn't available right now.".into(),
            suggestion: format!("Finish the current step ({stage}) first, then try again."),
            severity: Severity::ActionRequired,
        },

        BraillightError::NoFileSelected => HumanError {
            message: "No file selected.".into(),
            suggestion: "Drag a PDF onto the upload area or choose one with the upload button."
                .into(),
            severity: Severity::ActionRequired,
        },

        BraillightError::UnsupportedDocument(detail) => HumanError {
            message: "This type of document isn't supported.".into(),
            suggestion: format!("Save the file as a PDF first, then upload the PDF. (File type: {detail})"),
            severity: Severity::ActionRequired,
        },

        BraillightError::InvalidSpan { .. } | BraillightError::EmptyBaseline => HumanError {
            message: "The converted pages couldn't be prepared for review.".into(),
            suggestion: "Start over and upload the document again. If it keeps happening, the document may not contain readable text.".into(),
            severity: Severity::Permanent,
        },

        BraillightError::Collaborator(_) => HumanError {
            message: "Conversion didn't finish.".into(),
            suggestion: "The recognition or braille service had a problem. Start over and try again in a moment.".into(),
            severity: Severity::Transient,
        },

        BraillightError::InvalidConfig(detail) => HumanError {
            message: "The converter's settings are invalid.".into(),
            suggestion: format!("Fix or delete the settings file to restore defaults. ({detail})"),
            severity: Severity::Permanent,
        },

        BraillightError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again."
                        .into(),
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The file couldn't be opened.".into(),
                    suggestion: "Check that you have permission to read it, then try again."
                        .into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "Reading or writing a file failed.".into(),
                    suggestion: "Try again. If it keeps happening, check that the disk isn't full."
                        .into(),
                    severity: Severity::Transient,
                }
            }
        }

        BraillightError::Serialization(_) => HumanError {
            message: "Saved settings couldn't be read.".into(),
            suggestion: "Delete the settings file; defaults will be used next time.".into(),
            severity: Severity::Permanent,
        },
    }
}
