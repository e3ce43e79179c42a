// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Braillight — guided OCR-to-braille conversion
//
// Entry point. Initialises logging, loads settings from the data directory,
// and runs the console front end: stdin commands and timer events are
// multiplexed into a single loop that owns the workflow controller.

mod console;
mod services;

use std::io::Write as _;
use std::path::Path;

use braillight_core::error::{BraillightError, Result};
use braillight_core::human_errors::humanize_error;
use braillight_workflow::{TimerOutcome, TokioScheduler, WorkflowController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use console::{Command, HELP};
use services::fixtures::{FixtureExtractor, FixtureTranscriber};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Braillight starting");

    let dir = services::data_dir::data_dir()?;
    let config = services::config_store::load_or_init(&dir)?;
    tracing::info!(data_dir = %dir.display(), "settings loaded");

    let (scheduler, mut events) = TokioScheduler::channel();
    let mut ctl = WorkflowController::new(
        config,
        scheduler,
        FixtureExtractor::default(),
        FixtureTranscriber,
    )?;

    println!("{HELP}\n");
    print!("{}", console::render_screen(&ctl.snapshot()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => run_command(&mut ctl, command).await,
                    Ok(None) => {}
                    Err(e) => println!("{e}"),
                }
            }
            Some(event) = events.recv() => match ctl.handle_timer(event) {
                Ok(outcome) => report_timer(&ctl, outcome),
                Err(e) => report_error(&e),
            },
        }
    }

    tracing::info!("Braillight exiting");
    Ok(())
}

async fn run_command(ctl: &mut WorkflowController, command: Command) {
    let result = match command {
        Command::Open(path) => open_file(ctl, &path).await,
        Command::Remove => ctl.remove_file(),
        Command::Confirm => ctl.confirm_upload().map(|_| ()),
        Command::Edit(None) => ctl.begin_edit().map(|_| ()),
        Command::Edit(Some(text)) => ctl
            .begin_edit()
            .and_then(|_| ctl.update_draft(text))
            .and_then(|()| ctl.commit_edit().map(|_| ())),
        Command::Type(text) => ctl.update_draft(text),
        Command::Blur => ctl.commit_edit().map(|_| ()),
        Command::Next => ctl.advance().map(|_| ()),
        Command::Prev => ctl.retreat().map(|_| ()),
        Command::Retry => ctl.retry_loading().map(|_| ()),
        Command::Restart => {
            ctl.start_over();
            Ok(())
        }
        Command::Show => Ok(()),
        Command::Help => {
            println!("{HELP}");
            return;
        }
        Command::Quit => return,
    };

    match result {
        Ok(()) => print!("{}", console::render_screen(&ctl.snapshot())),
        Err(e) => report_error(&e),
    }
}

async fn open_file(ctl: &mut WorkflowController, path: &Path) -> Result<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| BraillightError::UnsupportedDocument(path.display().to_string()))?;
    let bytes = tokio::fs::read(path).await?;
    ctl.select_file(name, bytes)
}

fn report_timer(ctl: &WorkflowController, outcome: TimerOutcome) {
    match outcome {
        TimerOutcome::Progress(value) => {
            print!("\r{}", console::progress_bar(value));
            let _ = std::io::stdout().flush();
        }
        TimerOutcome::UploadComplete | TimerOutcome::StageChanged(_) => {
            println!();
            print!("{}", console::render_screen(&ctl.snapshot()));
        }
        TimerOutcome::Unchanged | TimerOutcome::Ignored => {}
    }
}

fn report_error(err: &BraillightError) {
    tracing::debug!(error = %err, "action failed");
    println!("{}", console::render_error(&humanize_error(err)));
}
