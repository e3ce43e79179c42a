// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The controller driven by real tokio timers on a paused clock.

use std::time::Duration;

use braillight_core::config::{ProgressTiming, WorkflowConfig};
use braillight_core::types::WorkflowStage;
use braillight_document::StageBaseline;
use braillight_workflow::{
    PrecomputedBaseline, TimerOutcome, TokioScheduler, UploadPhase, WorkflowController,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;

fn controller() -> (WorkflowController, UnboundedReceiver<braillight_workflow::TimerEvent>) {
    let (scheduler, events) = TokioScheduler::channel();
    let config = WorkflowConfig {
        upload: ProgressTiming::new(1500, 50, 200),
        ocr_loading: ProgressTiming::new(5000, 50, 500),
        ..WorkflowConfig::default()
    };
    let ctl = WorkflowController::new(
        config,
        scheduler,
        PrecomputedBaseline(StageBaseline::from_texts(["본문"], None).unwrap()),
        PrecomputedBaseline(StageBaseline::from_texts(["⠃⠕"], None).unwrap()),
    )
    .unwrap();
    (ctl, events)
}

/// Feed events until one produces a non-progress outcome.
async fn pump(
    ctl: &mut WorkflowController,
    events: &mut UnboundedReceiver<braillight_workflow::TimerEvent>,
) -> TimerOutcome {
    while let Some(event) = events.recv().await {
        match ctl.handle_timer(event).unwrap() {
            TimerOutcome::Progress(_) | TimerOutcome::Unchanged | TimerOutcome::Ignored => {}
            other => return other,
        }
    }
    panic!("timer channel closed");
}

#[tokio::test(start_paused = true)]
async fn upload_takes_duration_plus_settle() {
    let (mut ctl, mut events) = controller();
    let started = Instant::now();
    ctl.select_file("scan.pdf", b"%PDF".to_vec()).unwrap();

    assert_eq!(pump(&mut ctl, &mut events).await, TimerOutcome::UploadComplete);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(1500 + 200), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(1500 + 250), "{elapsed:?}");
    assert_eq!(ctl.upload_phase(), UploadPhase::UploadComplete);
}

#[tokio::test(start_paused = true)]
async fn loading_stage_completes_into_review() {
    let (mut ctl, mut events) = controller();
    ctl.select_file("scan.pdf", b"%PDF".to_vec()).unwrap();
    pump(&mut ctl, &mut events).await;
    ctl.confirm_upload().unwrap();

    let started = Instant::now();
    let outcome = pump(&mut ctl, &mut events).await;
    assert!(matches!(outcome, TimerOutcome::StageChanged(c) if c.to == WorkflowStage::TextEdit));
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(5000 + 500), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(5000 + 550), "{elapsed:?}");
    assert_eq!(ctl.session().unwrap().document().original(), "본문");
}

#[tokio::test(start_paused = true)]
async fn start_over_mid_loading_never_completes() {
    let (mut ctl, mut events) = controller();
    ctl.select_file("scan.pdf", b"%PDF".to_vec()).unwrap();
    pump(&mut ctl, &mut events).await;
    ctl.confirm_upload().unwrap();

    tokio::time::sleep(Duration::from_millis(1000)).await;
    ctl.start_over();

    // Drain anything that was queued before the abort, then let time pass.
    tokio::time::sleep(Duration::from_secs(10)).await;
    while let Ok(event) = events.try_recv() {
        assert_eq!(ctl.handle_timer(event).unwrap(), TimerOutcome::Ignored);
    }
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(events.try_recv().is_err());
    assert_eq!(ctl.stage(), WorkflowStage::Upload);
    assert!(ctl.session().is_none());
}
