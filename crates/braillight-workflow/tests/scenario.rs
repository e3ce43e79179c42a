// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end walk through every stage with a manual scheduler.

use braillight_core::config::{ProgressTiming, WorkflowConfig};
use braillight_core::error::BraillightError;
use braillight_core::types::WorkflowStage;
use braillight_document::render::Marker;
use braillight_document::{ReviewedStage, StageBaseline};
use braillight_workflow::{
    ManualScheduler, PrecomputedBaseline, TimerEvent, TimerOutcome, UploadPhase, WorkflowController,
};

const TEXT_PAGES: usize = 4;
const PHRASE: &str = "권위와 상식에 의문 부호를 제기";

fn config() -> WorkflowConfig {
    WorkflowConfig {
        upload: ProgressTiming::new(1500, 50, 200),
        ocr_loading: ProgressTiming::new(500, 50, 300),
        braille_loading: ProgressTiming::new(500, 50, 300),
        ..WorkflowConfig::default()
    }
}

fn text_baseline() -> StageBaseline {
    let pages = (1..=TEXT_PAGES).map(|p| format!("{p}쪽: 그의 시는 모든 {PHRASE}하고 있다."));
    StageBaseline::from_texts(pages, Some(PHRASE)).unwrap()
}

/// Transcriber that turns each page into up to eight full braille cells.
fn transcribe(stage: &ReviewedStage) -> braillight_core::Result<StageBaseline> {
    let pages = stage
        .pages
        .iter()
        .map(|p| "⠿".repeat(p.text.chars().count().min(8)));
    StageBaseline::from_texts(pages, None)
}

/// Fire ticks until 100, checking the value only ever rises, then settle.
fn drive(ctl: &mut WorkflowController) -> TimerOutcome {
    let token = ctl.active_token().expect("a progress run is active");
    let mut last = 0;
    loop {
        match ctl.handle_timer(TimerEvent::tick(token)).unwrap() {
            TimerOutcome::Progress(value) => {
                assert!(value > last, "progress went from {last} to {value}");
                last = value;
                if value == 100 {
                    break;
                }
            }
            TimerOutcome::Unchanged => {}
            other => panic!("unexpected outcome while ticking: {other:?}"),
        }
    }
    ctl.handle_timer(TimerEvent::settled(token)).unwrap()
}

#[test]
fn full_workflow_reaches_completed_with_derived_file_name() {
    let scheduler = ManualScheduler::new();
    let mut ctl = WorkflowController::new(
        config(),
        scheduler.clone(),
        PrecomputedBaseline(text_baseline()),
        transcribe,
    )
    .unwrap();

    // Upload with no file: start unavailable.
    assert_eq!(ctl.stage(), WorkflowStage::Upload);
    assert!(!ctl.can_confirm_upload());
    assert!(matches!(ctl.confirm_upload(), Err(BraillightError::NoFileSelected)));

    // Drop a file; the transfer runs 0 -> 100.
    ctl.select_file("매3비 기출.pdf", b"%PDF-1.7".to_vec()).unwrap();
    assert_eq!(ctl.upload_phase(), UploadPhase::Uploading);
    assert_eq!(drive(&mut ctl), TimerOutcome::UploadComplete);
    assert_eq!(ctl.upload_phase(), UploadPhase::UploadComplete);

    let change = ctl.confirm_upload().unwrap();
    assert_eq!(change.to, WorkflowStage::OcrLoading);

    // OCR loading completes into text review on page 1.
    assert!(matches!(drive(&mut ctl), TimerOutcome::StageChanged(c) if c.to == WorkflowStage::TextEdit));
    let session = ctl.session().unwrap();
    assert_eq!(session.current_page(), 1);
    assert_eq!(session.total_pages(), TEXT_PAGES as u32);
    assert!(!session.is_editing());
    assert!(!ctl.snapshot().review.unwrap().view.contains(Marker::UserEdited));

    // Edit page 1 and blur.
    let caret = ctl.begin_edit().unwrap();
    let original = ctl.session().unwrap().document().original().to_owned();
    assert_eq!(caret, original.chars().count());
    ctl.update_draft(format!("{original} 고침")).unwrap();
    ctl.commit_edit().unwrap();
    let doc = ctl.session().unwrap().document();
    assert_eq!(doc.edited(), Some(format!("{original} 고침").as_str()));
    let view = doc.render_view();
    assert!(view.contains(Marker::UserEdited));
    for fragment in view.iter().filter(|f| f.marker == Marker::Protected) {
        assert_eq!(fragment.text, PHRASE);
    }

    // Advance through all pages; the final advance leaves the stage.
    for page in 2..=TEXT_PAGES as u32 {
        assert_eq!(ctl.advance().unwrap(), None);
        assert_eq!(ctl.session().unwrap().current_page(), page);
    }
    assert!(ctl.session().unwrap().is_final_page());
    let change = ctl.advance().unwrap().unwrap();
    assert_eq!(change.to, WorkflowStage::BrailleLoading);

    // Braille loading completes into braille review.
    assert!(matches!(drive(&mut ctl), TimerOutcome::StageChanged(c) if c.to == WorkflowStage::BrailleEdit));
    let session = ctl.session().unwrap();
    assert_eq!(session.current_page(), 1);
    assert_eq!(session.total_pages(), TEXT_PAGES as u32);
    assert!(!session.document().is_modified());

    let mut ready = None;
    for _ in 0..TEXT_PAGES {
        ready = ctl.advance().unwrap();
    }
    let ready = ready.expect("final advance completes the workflow");
    assert!(ready.is_ready());
    assert_eq!(ctl.stage(), WorkflowStage::Completed);

    let export = ctl.export_request().unwrap();
    assert_eq!(export.file_name, "매3비 기출.brf");
    assert_eq!(export.page_count, TEXT_PAGES);
    assert_eq!(export.modified_pages, 0);
    assert!(scheduler.active().is_empty());
}

#[test]
fn text_and_braille_sessions_do_not_share_edits() {
    let mut ctl = WorkflowController::new(
        config(),
        ManualScheduler::new(),
        PrecomputedBaseline(text_baseline()),
        transcribe,
    )
    .unwrap();
    ctl.select_file("a.pdf", b"x".to_vec()).unwrap();
    drive(&mut ctl);
    ctl.confirm_upload().unwrap();
    drive(&mut ctl);

    ctl.update_draft("짧음").unwrap();
    for _ in 0..TEXT_PAGES {
        ctl.advance().unwrap();
    }
    drive(&mut ctl);

    let session = ctl.session().unwrap();
    assert_eq!(session.modified_pages(), 0);
    // The transcriber saw the edited page 1.
    assert_eq!(session.document().original(), "⠿⠿");
}

#[test]
fn start_over_from_review_discards_session_and_artifact() {
    let scheduler = ManualScheduler::new();
    let mut ctl = WorkflowController::new(
        config(),
        scheduler.clone(),
        PrecomputedBaseline(text_baseline()),
        transcribe,
    )
    .unwrap();
    ctl.select_file("a.pdf", b"x".to_vec()).unwrap();
    drive(&mut ctl);
    ctl.confirm_upload().unwrap();
    drive(&mut ctl);
    ctl.update_draft("changed").unwrap();
    ctl.advance().unwrap();

    let change = ctl.start_over();
    assert_eq!(change.from, WorkflowStage::TextEdit);
    assert_eq!(change.to, WorkflowStage::Upload);
    assert!(ctl.session().is_none());
    assert!(ctl.artifact().is_none());
    assert!(ctl.export_request().is_none());
    assert!(!ctl.can_confirm_upload());

    // A second run starts clean.
    ctl.select_file("b.pdf", b"y".to_vec()).unwrap();
    drive(&mut ctl);
    ctl.confirm_upload().unwrap();
    drive(&mut ctl);
    assert_eq!(ctl.session().unwrap().modified_pages(), 0);
    assert_eq!(ctl.artifact().unwrap().name, "b.pdf");
}

#[test]
fn stale_settle_after_start_over_is_ignored() {
    let scheduler = ManualScheduler::new();
    let mut ctl = WorkflowController::new(
        config(),
        scheduler.clone(),
        PrecomputedBaseline(text_baseline()),
        transcribe,
    )
    .unwrap();
    ctl.select_file("a.pdf", b"x".to_vec()).unwrap();
    drive(&mut ctl);
    ctl.confirm_upload().unwrap();

    let token = ctl.active_token().unwrap();
    while ctl.handle_timer(TimerEvent::tick(token)).unwrap() != TimerOutcome::Progress(100) {}
    ctl.start_over();

    assert_eq!(ctl.handle_timer(TimerEvent::settled(token)).unwrap(), TimerOutcome::Ignored);
    assert_eq!(ctl.stage(), WorkflowStage::Upload);
    assert!(ctl.session().is_none());
    assert!(scheduler.active().is_empty());
}
