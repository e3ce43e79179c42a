// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Console commands and screen rendering.

use std::fmt::Write as _;
use std::path::PathBuf;

use braillight_core::human_errors::{HumanError, Severity};
use braillight_core::types::WorkflowStage;
use braillight_document::render::{MarkedText, Marker};
use braillight_workflow::UploadPhase;
use braillight_workflow::controller::WorkflowSnapshot;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  open <path>   select a PDF to convert
  remove        remove the selected file
  confirm       start conversion once the upload is complete
  edit [text]   edit the current page (with text: replace it and commit)
  type <text>   replace the edit buffer
  blur          commit the edit buffer
  next          next page / submit on the last page
  prev          previous page
  retry         ask for the text or braille again after a failure
  show          redraw the screen
  restart       start over
  quit          exit";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(PathBuf),
    Remove,
    Confirm,
    Edit(Option<String>),
    Type(String),
    Blur,
    Next,
    Prev,
    Retry,
    Show,
    Restart,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}` (type `help`)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

impl Command {
    /// Parse a line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_owned());

        let command = match word.to_ascii_lowercase().as_str() {
            "open" => Self::Open(PathBuf::from(arg.ok_or(CommandError::MissingArgument("open"))?)),
            "remove" => Self::Remove,
            "confirm" | "start" => Self::Confirm,
            "edit" => Self::Edit(arg),
            "type" => Self::Type(rest.to_owned()),
            "blur" | "save" => Self::Blur,
            "next" | "n" => Self::Next,
            "prev" | "p" => Self::Prev,
            "retry" => Self::Retry,
            "show" | "ls" => Self::Show,
            "restart" => Self::Restart,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_owned())),
        };
        Ok(Some(command))
    }
}

/// Marked text with review markers made visible: `[[protected]]` and
/// `{edited}`.
pub fn render_marked(text: &MarkedText) -> String {
    let mut out = String::new();
    for fragment in text {
        match fragment.marker {
            Marker::Plain => out.push_str(&fragment.text),
            Marker::Protected => {
                let _ = write!(out, "[[{}]]", fragment.text);
            }
            Marker::UserEdited => {
                let _ = write!(out, "{{{}}}", fragment.text);
            }
        }
    }
    out
}

/// Text progress bar, 20 cells wide.
pub fn progress_bar(value: u8) -> String {
    let value = value.min(100);
    let filled = usize::from(value) / 5;
    format!("[{}{}] {value:>3}%", "#".repeat(filled), "-".repeat(20 - filled))
}

/// Whole screen for the current state.
pub fn render_screen(snapshot: &WorkflowSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", stage_title(snapshot.stage));

    match snapshot.stage {
        WorkflowStage::Upload => {
            match (&snapshot.artifact, snapshot.upload_phase) {
                (Some(artifact), phase) => {
                    let _ = writeln!(out, "file: {} ({} bytes), {phase}", artifact.name, artifact.size_bytes);
                }
                (None, _) => {
                    let _ = writeln!(out, "no file selected (open <path>)");
                }
            }
            if snapshot.upload_phase == UploadPhase::Uploading {
                if let Some(value) = snapshot.progress {
                    let _ = writeln!(out, "{}", progress_bar(value));
                }
            }
            let start = if snapshot.can_confirm_upload {
                "available (confirm)"
            } else {
                "unavailable"
            };
            let _ = writeln!(out, "start: {start}");
        }
        WorkflowStage::OcrLoading | WorkflowStage::BrailleLoading => {
            if let Some(value) = snapshot.progress {
                let _ = writeln!(out, "{}", progress_bar(value));
            }
            if snapshot.can_retry_loading {
                let _ = writeln!(out, "failed: retry or restart");
            } else if let Some(eta) = &snapshot.eta_label {
                let _ = writeln!(out, "estimated time remaining: {eta}");
            }
        }
        WorkflowStage::TextEdit | WorkflowStage::BrailleEdit => {
            if let Some(review) = &snapshot.review {
                let _ = writeln!(out, "-{}/{}-", review.current_page, review.total_pages);
                match &review.draft {
                    Some(draft) => {
                        let _ = writeln!(out, "(editing) {draft}");
                    }
                    None => {
                        let _ = writeln!(out, "{}", render_marked(&review.view));
                    }
                }
                let next = if review.is_final_page { "submit" } else { "next" };
                let _ = writeln!(out, "edited pages: {} | {next}", review.modified_pages);
            }
        }
        WorkflowStage::Completed => {
            if let Some(export) = &snapshot.export {
                let _ = writeln!(
                    out,
                    "ready: {} ({} pages, {} corrected)",
                    export.file_name, export.page_count, export.modified_pages
                );
            }
        }
    }
    out
}

/// Error text for the console.
pub fn render_error(err: &HumanError) -> String {
    let tag = match err.severity {
        Severity::Transient => "!",
        Severity::ActionRequired => "?",
        Severity::Permanent => "x",
    };
    format!("[{tag}] {}\n    {}", err.message, err.suggestion)
}

fn stage_title(stage: WorkflowStage) -> &'static str {
    match stage {
        WorkflowStage::Upload => "Upload",
        WorkflowStage::OcrLoading => "Extracting text",
        WorkflowStage::TextEdit => "Review text",
        WorkflowStage::BrailleLoading => "Transcribing braille",
        WorkflowStage::BrailleEdit => "Review braille",
        WorkflowStage::Completed => "Done",
    }
}
