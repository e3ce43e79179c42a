// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Workflow controller — the single owner of all workflow state.
//
// The presentation layer calls actions in response to user input and feeds
// timer events back through `handle_timer`. Stages only move forward:
//
//   Upload -> OcrLoading -> TextEdit -> BrailleLoading -> BrailleEdit -> Completed
//
// `start_over` is the only way back and discards the upload, any review
// session, and any running progress timer.

use braillight_core::config::{ProgressTiming, WorkflowConfig};
use braillight_core::error::{BraillightError, Result};
use braillight_core::integrity::short_hash;
use braillight_core::types::{ArtifactSummary, UploadedArtifact, WorkflowStage};
use braillight_document::export::ExportRequest;
use braillight_document::render::MarkedText;
use braillight_document::session::{AdvanceOutcome, PaginatedReviewSession, ReviewedStage};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::collaborators::{BrailleTranscriber, TextExtractor};
use crate::progress::{ProgressRun, RunStep};
use crate::timer::{Scheduler, TimerEvent, TimerToken};
use crate::upload::UploadPhase;

/// Notice that the stage changed. Entering `Completed` is the terminal
/// "ready" event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageChange {
    pub from: WorkflowStage,
    pub to: WorkflowStage,
}

impl StageChange {
    pub fn is_ready(&self) -> bool {
        self.to == WorkflowStage::Completed
    }
}

/// What a timer event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    /// Stale or out-of-phase event; nothing changed.
    Ignored,
    /// A step elapsed with no visible change.
    Unchanged,
    /// The progress bar moved to this value.
    Progress(u8),
    /// The upload transfer finished; the start button is now available.
    UploadComplete,
    /// A loading stage finished and the workflow moved on.
    StageChanged(StageChange),
}

/// Serializable view of the current review page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSnapshot {
    pub current_page: u32,
    pub total_pages: u32,
    pub is_final_page: bool,
    pub editing: bool,
    /// Edit buffer while editing.
    pub draft: Option<String>,
    pub modified_pages: usize,
    pub view: MarkedText,
}

/// Everything the presentation layer needs to draw the current screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowSnapshot {
    pub stage: WorkflowStage,
    pub upload_phase: UploadPhase,
    pub artifact: Option<ArtifactSummary>,
    pub progress: Option<u8>,
    pub eta_label: Option<String>,
    pub review: Option<ReviewSnapshot>,
    pub export: Option<ExportRequest>,
    pub can_confirm_upload: bool,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub can_edit: bool,
    pub can_retry_loading: bool,
}

/// Drives the conversion workflow.
pub struct WorkflowController {
    config: WorkflowConfig,
    scheduler: Box<dyn Scheduler>,
    extractor: Box<dyn TextExtractor>,
    transcriber: Box<dyn BrailleTranscriber>,

    stage: WorkflowStage,
    upload_phase: UploadPhase,
    artifact: Option<UploadedArtifact>,
    /// Active progress run (upload transfer or loading stage).
    run: Option<ProgressRun>,
    /// Review session of the current edit stage.
    session: Option<PaginatedReviewSession>,
    /// Reviewed text, kept until transcription succeeds.
    reviewed_text: Option<ReviewedStage>,
    export: Option<ExportRequest>,
    next_token: u64,
}

impl std::fmt::Debug for WorkflowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowController")
            .field("stage", &self.stage)
            .field("upload_phase", &self.upload_phase)
            .field("artifact", &self.artifact.as_ref().map(|a| &a.name))
            .field("run", &self.run)
            .field("session", &self.session.is_some())
            .finish_non_exhaustive()
    }
}

impl WorkflowController {
    /// Create a controller in the upload stage with no file.
    pub fn new(
        config: WorkflowConfig,
        scheduler: impl Scheduler + 'static,
        extractor: impl TextExtractor + 'static,
        transcriber: impl BrailleTranscriber + 'static,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scheduler: Box::new(scheduler),
            extractor: Box::new(extractor),
            transcriber: Box::new(transcriber),
            stage: WorkflowStage::Upload,
            upload_phase: UploadPhase::NoFile,
            artifact: None,
            run: None,
            session: None,
            reviewed_text: None,
            export: None,
            next_token: 0,
        })
    }

    // -- Queries ------------------------------------------------------------

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn stage(&self) -> WorkflowStage {
        self.stage
    }

    pub fn upload_phase(&self) -> UploadPhase {
        self.upload_phase
    }

    /// Value of the visible progress bar, if the current screen has one.
    pub fn progress(&self) -> Option<u8> {
        match (self.stage, self.upload_phase) {
            (WorkflowStage::Upload, UploadPhase::UploadComplete) => Some(100),
            (WorkflowStage::Upload, UploadPhase::NoFile) => None,
            // A loading stage whose collaborator failed stays full.
            (stage, _) if stage.is_loading() && self.run.is_none() => Some(100),
            _ => self.run.as_ref().map(ProgressRun::value),
        }
    }

    /// Estimated-time label for the loading screens.
    pub fn eta_label(&self) -> Option<&str> {
        match self.stage {
            WorkflowStage::OcrLoading => Some(&self.config.ocr_eta_label),
            WorkflowStage::BrailleLoading => Some(&self.config.braille_eta_label),
            _ => None,
        }
    }

    pub fn session(&self) -> Option<&PaginatedReviewSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut PaginatedReviewSession> {
        self.session.as_mut()
    }

    pub fn artifact(&self) -> Option<&UploadedArtifact> {
        self.artifact.as_ref()
    }

    /// Available once the workflow is complete.
    pub fn export_request(&self) -> Option<&ExportRequest> {
        self.export.as_ref()
    }

    /// Token of the running progress timer, if any.
    pub fn active_token(&self) -> Option<TimerToken> {
        self.run.as_ref().map(ProgressRun::token)
    }

    // -- Availability -------------------------------------------------------

    pub fn can_confirm_upload(&self) -> bool {
        self.stage == WorkflowStage::Upload && self.upload_phase.can_confirm()
    }

    pub fn can_advance(&self) -> bool {
        self.stage.is_review() && self.session.is_some()
    }

    pub fn can_retreat(&self) -> bool {
        self.stage.is_review() && self.session.as_ref().is_some_and(|s| !s.is_first_page())
    }

    pub fn can_edit(&self) -> bool {
        self.can_advance()
    }

    /// True when a loading stage finished its progress run but its
    /// collaborator failed.
    pub fn can_retry_loading(&self) -> bool {
        self.stage.is_loading() && self.run.is_none()
    }

    // -- Upload stage -------------------------------------------------------

    /// Select (or drop) a file. Replaces any earlier selection and restarts
    /// the transfer simulation.
    pub fn select_file(&mut self, name: impl Into<String>, bytes: impl Into<std::sync::Arc<[u8]>>) -> Result<()> {
        self.require_stage("select_file", WorkflowStage::Upload)?;
        let artifact = UploadedArtifact::new(name, bytes);
        if !self.config.accepts_extension(artifact.extension()) {
            warn!(name = %artifact.name, "rejected upload with unsupported extension");
            return Err(BraillightError::UnsupportedDocument(
                artifact.extension().unwrap_or(&artifact.name).to_owned(),
            ));
        }

        info!(
            name = %artifact.name,
            size = artifact.size_bytes(),
            hash = short_hash(&artifact.content_hash),
            "file selected"
        );
        self.artifact = Some(artifact);
        self.upload_phase = UploadPhase::Uploading;
        self.start_run(self.config.upload);
        Ok(())
    }

    /// Remove the selected file and stop any transfer.
    pub fn remove_file(&mut self) -> Result<()> {
        self.require_stage("remove_file", WorkflowStage::Upload)?;
        if let Some(artifact) = self.artifact.take() {
            info!(name = %artifact.name, "file removed");
        }
        self.run = None;
        self.upload_phase = UploadPhase::NoFile;
        Ok(())
    }

    /// Start conversion. Only available once the upload has completed.
    pub fn confirm_upload(&mut self) -> Result<StageChange> {
        self.require_stage("confirm_upload", WorkflowStage::Upload)?;
        match self.upload_phase {
            UploadPhase::NoFile => Err(BraillightError::NoFileSelected),
            UploadPhase::Uploading => Err(self.unavailable("confirm_upload")),
            UploadPhase::UploadComplete => {
                let change = self.enter_next()?;
                self.start_run(self.config.ocr_loading);
                Ok(change)
            }
        }
    }

    // -- Review stages ------------------------------------------------------

    /// Enter edit mode on the current page. Returns the caret position
    /// (buffer length in characters).
    pub fn begin_edit(&mut self) -> Result<usize> {
        Ok(self.review_session("begin_edit")?.enter_edit_mode())
    }

    /// Replace the edit buffer of the current page.
    pub fn update_draft(&mut self, text: impl Into<String>) -> Result<()> {
        let session = self.review_session("update_draft")?;
        if !session.is_editing() {
            session.enter_edit_mode();
        }
        session.update_draft(text);
        Ok(())
    }

    /// Commit the edit buffer (the text lost focus). Returns whether an edit
    /// was in progress.
    pub fn commit_edit(&mut self) -> Result<bool> {
        Ok(self.review_session("commit_edit")?.commit())
    }

    /// Next page, or finish the stage from the final page.
    ///
    /// Returns the stage change when the stage finished.
    pub fn advance(&mut self) -> Result<Option<StageChange>> {
        let outcome = self.review_session("advance")?.advance();
        match outcome {
            AdvanceOutcome::Moved(page) => {
                debug!(stage = %self.stage, page, "advanced page");
                Ok(None)
            }
            AdvanceOutcome::StageComplete => self.finish_review().map(Some),
        }
    }

    /// Previous page. Returns whether the page changed.
    pub fn retreat(&mut self) -> Result<bool> {
        Ok(self.review_session("retreat")?.retreat())
    }

    // -- Loading stages -----------------------------------------------------

    /// Call the collaborator of the current loading stage again after it
    /// failed. The progress run is not replayed.
    pub fn retry_loading(&mut self) -> Result<StageChange> {
        if !self.can_retry_loading() {
            return Err(self.unavailable("retry_loading"));
        }
        info!(stage = %self.stage, "retrying collaborator");
        self.finish_loading()
    }

    // -- Any stage ----------------------------------------------------------

    /// Discard everything and return to the upload stage.
    pub fn start_over(&mut self) -> StageChange {
        self.run = None;
        self.session = None;
        self.reviewed_text = None;
        self.export = None;
        self.artifact = None;
        self.upload_phase = UploadPhase::NoFile;
        self.enter(WorkflowStage::Upload)
    }

    /// Apply a timer event. Events for a run that no longer exists are
    /// ignored.
    ///
    /// When a loading stage settles, its collaborator runs here and any
    /// error it returns is passed on. The workflow then stays in the loading
    /// stage with the bar full until `retry_loading` or `start_over`.
    pub fn handle_timer(&mut self, event: TimerEvent) -> Result<TimerOutcome> {
        let Some(run) = self.run.as_mut() else {
            debug!(token = %event.token, "timer event with no active run ignored");
            return Ok(TimerOutcome::Ignored);
        };

        match run.on_event(self.scheduler.as_ref(), event) {
            RunStep::Ignored => {
                debug!(token = %event.token, active = %run.token(), "stale timer event ignored");
                Ok(TimerOutcome::Ignored)
            }
            RunStep::Unchanged => Ok(TimerOutcome::Unchanged),
            RunStep::Progress(value) => Ok(TimerOutcome::Progress(value)),
            RunStep::Completed => {
                self.run = None;
                self.complete_run()
            }
        }
    }

    /// Serializable view of the current state.
    pub fn snapshot(&self) -> WorkflowSnapshot {
        let review = self
            .session
            .as_ref()
            .filter(|_| self.stage.is_review())
            .map(|s| ReviewSnapshot {
                current_page: s.current_page(),
                total_pages: s.total_pages(),
                is_final_page: s.is_final_page(),
                editing: s.is_editing(),
                draft: s.document().draft().map(|d| d.text().to_owned()),
                modified_pages: s.modified_pages(),
                view: s.render_view(),
            });
        WorkflowSnapshot {
            stage: self.stage,
            upload_phase: self.upload_phase,
            artifact: self.artifact.as_ref().map(UploadedArtifact::summary),
            progress: self.progress(),
            eta_label: self.eta_label().map(str::to_owned),
            review,
            export: self.export.clone(),
            can_confirm_upload: self.can_confirm_upload(),
            can_advance: self.can_advance(),
            can_retreat: self.can_retreat(),
            can_edit: self.can_edit(),
            can_retry_loading: self.can_retry_loading(),
        }
    }

    // -- Internals ----------------------------------------------------------

    fn unavailable(&self, action: &'static str) -> BraillightError {
        BraillightError::ActionUnavailable {
            action,
            stage: self.stage,
        }
    }

    fn require_stage(&self, action: &'static str, stage: WorkflowStage) -> Result<()> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(self.unavailable(action))
        }
    }

    fn review_session(&mut self, action: &'static str) -> Result<&mut PaginatedReviewSession> {
        let stage = self.stage;
        match self.session.as_mut() {
            Some(session) if stage.is_review() => Ok(session),
            _ => Err(BraillightError::ActionUnavailable { action, stage }),
        }
    }

    fn enter(&mut self, to: WorkflowStage) -> StageChange {
        let change = StageChange {
            from: self.stage,
            to,
        };
        self.stage = to;
        info!(from = %change.from, to = %change.to, "stage changed");
        change
    }

    /// Move to the stage that follows the current one.
    fn enter_next(&mut self) -> Result<StageChange> {
        let to = self.stage.next().ok_or_else(|| self.unavailable("advance"))?;
        Ok(self.enter(to))
    }

    /// Start a progress run with a fresh token. Replacing the old run
    /// cancels its timer.
    fn start_run(&mut self, timing: ProgressTiming) {
        self.next_token += 1;
        let token = TimerToken::new(self.next_token);
        self.run = Some(ProgressRun::start(self.scheduler.as_ref(), token, timing));
    }

    fn complete_run(&mut self) -> Result<TimerOutcome> {
        match self.stage {
            WorkflowStage::Upload => {
                self.upload_phase = UploadPhase::UploadComplete;
                info!("upload complete");
                Ok(TimerOutcome::UploadComplete)
            }
            stage if stage.is_loading() => self.finish_loading().map(TimerOutcome::StageChanged),
            stage => {
                warn!(%stage, "progress run completed outside a loading stage");
                Ok(TimerOutcome::Ignored)
            }
        }
    }

    /// Ask the stage's collaborator for the next baseline and open its
    /// review. Nothing changes if the collaborator fails.
    fn finish_loading(&mut self) -> Result<StageChange> {
        let baseline = match self.stage {
            WorkflowStage::OcrLoading => {
                let artifact = self.artifact.as_ref().ok_or(BraillightError::NoFileSelected)?;
                self.extractor
                    .extract(artifact)
                    .inspect_err(|e| error!(error = %e, "text extraction failed"))?
            }
            WorkflowStage::BrailleLoading => {
                let text = self
                    .reviewed_text
                    .as_ref()
                    .ok_or_else(|| self.unavailable("transcribe"))?;
                self.transcriber
                    .transcribe(text)
                    .inspect_err(|e| error!(error = %e, "braille transcription failed"))?
            }
            _ => return Err(self.unavailable("finish_loading")),
        };
        let session = PaginatedReviewSession::new(baseline)?;
        let change = self.enter_next()?;
        self.session = Some(session);
        self.reviewed_text = None;
        Ok(change)
    }

    /// Close the review session of the current edit stage. Every check that
    /// can fail runs before the session is taken.
    fn finish_review(&mut self) -> Result<StageChange> {
        let to = self.stage.next().ok_or_else(|| self.unavailable("advance"))?;
        let export_from = match self.stage {
            WorkflowStage::BrailleEdit => {
                Some(self.artifact.clone().ok_or(BraillightError::NoFileSelected)?)
            }
            _ => None,
        };
        let Some(session) = self.session.take() else {
            return Err(self.unavailable("advance"));
        };
        let reviewed = session.finish();
        info!(
            stage = %self.stage,
            pages = reviewed.page_count(),
            modified = reviewed.modified_pages(),
            "review finished"
        );

        match export_from {
            None => {
                self.reviewed_text = Some(reviewed);
                let change = self.enter(to);
                self.start_run(self.config.braille_loading);
                Ok(change)
            }
            Some(artifact) => {
                let export = ExportRequest::new(&artifact, &reviewed, &self.config.output_extension);
                info!(file_name = %export.file_name, "artifact ready");
                self.export = Some(export);
                Ok(self.enter(to))
            }
        }
    }
}
