// packdesk: launcher content admin
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `submit`.
//!
//! ```text
//! stage.json --> Ledger --submit_ledger--> residual --> stage.json
//!                              |
//!                        ConsoleProgress (indicatif spinner)
//! ```
//!
//! The ledger is written back whether or not the submission succeeded, so
//! whatever was not applied stays staged for the next attempt.

use std::sync::OnceLock;
use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};

use super::{open_session, resolve_server, secret_store};
use crate::cli::submit::SubmitArgs;
use crate::config::Config;
use crate::config::types::SubmitMode;
use crate::error::{PanelError, Result};
use crate::ledger::store;
use crate::submit::{
    BatchOptions, SubmitProgress, SubmitReport, describe_plan, format_size, submit_ledger,
};

/// Mode and batch options after applying command-line overrides.
pub(crate) fn effective_options(args: &SubmitArgs, config: &Config) -> (SubmitMode, BatchOptions) {
    let mode = args.mode.map_or(config.submit.mode, SubmitMode::from);
    let mut options = BatchOptions::from(&config.submit);
    if let Some(policy) = args.large_items {
        options.large_items = policy.into();
    }
    if let Some(threshold) = args.threshold {
        options.large_item_threshold = threshold;
    }
    (mode, options)
}

/// Write the staged changes of the selected server to the repository.
///
/// # Errors
///
/// Returns an error if no server is selected, the session cannot be opened,
/// local state cannot be written, or a batch submission fails.
pub async fn run_submit_command(
    args: &SubmitArgs,
    server: Option<&str>,
    config: &Config,
) -> Result<()> {
    let secrets = secret_store(config);
    let server = resolve_server(server, &secrets)?;
    let stage_file = config.paths.stage_file();
    let mut ledger = store::load(&stage_file, &server)?;

    if ledger.is_empty() {
        println!("{server}: nothing to submit");
        return Ok(());
    }

    let (mode, options) = effective_options(args, config);

    if config.global.dry {
        println!("Dry run, {mode} mode: {}", ledger.counts());
        for line in describe_plan(
            &config.repo.servers_root,
            &server,
            ledger.changes(),
            mode,
            options,
        ) {
            println!("  {line}");
        }
        return Ok(());
    }

    let session = open_session(config, &secrets).await?;
    let progress = ConsoleProgress::new();
    let result = submit_ledger(&session, &mut ledger, mode, options, &progress).await;
    progress.clear();

    store::save(&stage_file, &ledger)
        .with_context(|| format!("failed to save remaining changes to {}", stage_file.display()))?;

    match result {
        Ok(report) => {
            print_report(&report);
            if !ledger.is_empty() {
                println!("Still staged: {}", ledger.counts());
            }
            Ok(())
        }
        Err(err) => {
            if let Some(body) = err.api_body() {
                eprintln!("GitHub said: {body}");
            }
            if let PanelError::Submit(submit) = &err
                && !submit.applied_commits().is_empty()
            {
                eprintln!(
                    "Already on {}: {}",
                    session.branch(),
                    submit.applied_commits().join(", ")
                );
            }
            println!("Nothing was removed from the stage: {}", ledger.counts());
            Err(err.into())
        }
    }
}

fn print_report(report: &SubmitReport) {
    println!("{}", report.summary());
    match report {
        SubmitReport::Individual(individual) => {
            for failure in &individual.failures {
                println!(
                    "  failed {} {}: {}",
                    failure.kind, failure.file_name, failure.message
                );
                if let Some(body) = &failure.api_body {
                    println!("    {body}");
                }
            }
            if individual.deletes_without_path > 0 {
                println!(
                    "  {} delete(s) dropped: no remote path",
                    individual.deletes_without_path
                );
            }
        }
        SubmitReport::Batch(batch) => {
            for commit in batch.commits() {
                println!("  {commit}");
            }
        }
    }
}

/// Spinner style for submission steps.
fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        })
        .clone()
}

/// Spinner on stderr that prints failed items above itself.
pub(crate) struct ConsoleProgress {
    bar: ProgressBar,
}

impl ConsoleProgress {
    pub(crate) fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl SubmitProgress for ConsoleProgress {
    fn uploading(&self, index: usize, total: usize, file_name: &str, size: u64, percent: u8) {
        self.bar.set_message(format!(
            "[{index}/{total}] uploading {file_name} ({}), {percent}% done",
            format_size(size)
        ));
    }

    fn deleting(&self, index: usize, total: usize, file_name: &str) {
        self.bar
            .set_message(format!("[{index}/{total}] deleting {file_name}"));
    }

    fn step(&self, description: &str) {
        self.bar.set_message(description.to_string());
    }

    fn finished(&self, ok: bool) {
        if !ok {
            self.bar.println(format!("✗ {}", self.bar.message()));
        }
    }
}
