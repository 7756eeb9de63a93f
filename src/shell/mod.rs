//! Command line front end.
//!
//! Owns all presentation state: which run is active, the progress bar and the
//! failure count. The pipeline is only reached through `PipelineWorker::start`
//! and the event stream of the returned handle.

pub mod cli;
pub mod report;

use crate::config::{AppConfig, OutputFormat};
use crate::speller::{PipelineError, PipelineWorker, RunEvent, RunOutcome, RunState};
use indicatif::{ProgressBar, ProgressStyle};
use report::{render_text, ReportLanguage, RunReport};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// The "check a document" control, shared by every front end of one session.
///
/// Disabled while a run is in flight. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct RunTrigger {
    busy: Arc<AtomicBool>,
}

impl RunTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        !self.busy.load(Ordering::Acquire)
    }

    /// Disable the trigger for the lifetime of the returned guard.
    /// `None` if it is already disabled.
    pub fn try_acquire(&self) -> Option<TriggerGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| TriggerGuard {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// Re-enables the trigger when dropped
#[derive(Debug)]
pub struct TriggerGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for TriggerGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Presentation state for a session of consecutive runs
pub struct App {
    worker: PipelineWorker,
    output: OutputFormat,
    language: ReportLanguage,
    quiet: bool,
    trigger: RunTrigger,
    completed_runs: usize,
    failed_runs: usize,
}

impl App {
    pub fn new(config: &AppConfig, worker: PipelineWorker) -> Self {
        Self {
            worker,
            output: config.output,
            language: config.language,
            quiet: config.quiet,
            trigger: RunTrigger::new(),
            completed_runs: 0,
            failed_runs: 0,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, crate::config::ConfigError> {
        let pipeline = config.build_pipeline()?;
        Ok(Self::new(config, PipelineWorker::new(Arc::new(pipeline))))
    }

    pub fn failed_runs(&self) -> usize {
        self.failed_runs
    }

    pub fn completed_runs(&self) -> usize {
        self.completed_runs
    }

    /// Handle on this session's trigger
    pub fn trigger(&self) -> RunTrigger {
        self.trigger.clone()
    }

    /// Check one document and print its result.
    ///
    /// Returns `None` if the trigger is disabled because a run is in flight.
    pub async fn submit(&mut self, path: PathBuf) -> Option<RunOutcome> {
        let Some(_guard) = self.trigger.try_acquire() else {
            tracing::warn!("[Shell] Ignoring {}: a run is in progress", path.display());
            return None;
        };

        let bar = self.progress_bar(&path);
        let mut handle = self.worker.start(path.clone());

        let outcome = loop {
            match handle.next_event().await {
                Some(RunEvent::State(state)) => bar.set_message(state_label(state)),
                Some(RunEvent::Progress(update)) => bar.set_position(update.percent.round() as u64),
                Some(RunEvent::Finished(outcome)) => break outcome,
                None => break Err(PipelineError::Worker("no result received".to_string())),
            }
        };
        bar.finish_and_clear();

        self.present(&path, handle.run_id(), &outcome);
        Some(outcome)
    }

    /// Check every path in order
    pub async fn check_files(&mut self, files: Vec<PathBuf>) {
        for path in files {
            self.submit(path).await;
        }
    }

    /// Treat each line of stdin as a dropped file
    pub async fn check_dropped(&mut self) -> std::io::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if let Some(path) = normalize_dropped_path(&line) {
                self.submit(path).await;
            }
        }
        Ok(())
    }

    fn progress_bar(&self, path: &Path) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::with_template(
            "{prefix:.bold} [{bar:40.cyan/blue}] {pos:>3}% {msg}",
        ) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_prefix(
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
        bar
    }

    fn present(&mut self, path: &Path, run_id: uuid::Uuid, outcome: &RunOutcome) {
        match outcome {
            Ok(records) => {
                self.completed_runs += 1;
                match self.output {
                    OutputFormat::Text => {
                        println!("{}", path.display());
                        println!("{}", render_text(records, self.language.labels()));
                    }
                    OutputFormat::Json => {
                        let report = RunReport::new(run_id, path, records.clone());
                        match report.to_json() {
                            Ok(json) => println!("{}", json),
                            Err(e) => tracing::error!("[Shell] Failed to serialize report: {}", e),
                        }
                    }
                }
            }
            Err(e) => {
                // exactly one message per failed run
                self.failed_runs += 1;
                eprintln!("error: {}: {}", path.display(), e);
            }
        }
    }
}

fn state_label(state: RunState) -> &'static str {
    match state {
        RunState::Idle => "waiting",
        RunState::Extracting => "reading text",
        RunState::Checking => "checking spelling",
        RunState::Done => "done",
        RunState::Failed => "failed",
    }
}

/// Path from a dropped-file line: trimmed, surrounding double quotes removed
pub fn normalize_dropped_path(line: &str) -> Option<PathBuf> {
    let trimmed = line.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);

    if unquoted.is_empty() {
        None
    } else {
        Some(PathBuf::from(unquoted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Engine;
    use crate::speller::{ReplacementTable, SpellCheckPipeline};

    fn test_app() -> App {
        let config = AppConfig {
            engine: Engine::Table,
            dictionary: PathBuf::from("/unused/pl_PL"),
            replacements: None,
            alphabet: "ąćęłńóśźż".to_string(),
            output: OutputFormat::Text,
            language: ReportLanguage::Polish,
            quiet: true,
        };
        let table = ReplacementTable::from_pairs([("wtorke", "Wtorek")]);
        let pipeline = SpellCheckPipeline::new(Arc::new(table));
        App::new(&config, PipelineWorker::new(Arc::new(pipeline)))
    }

    #[test]
    fn test_normalize_dropped_path() {
        assert_eq!(
            normalize_dropped_path("\"C:/Moje dokumenty/raport.docx\"\r"),
            Some(PathBuf::from("C:/Moje dokumenty/raport.docx"))
        );
        assert_eq!(
            normalize_dropped_path("  /tmp/a.pdf "),
            Some(PathBuf::from("/tmp/a.pdf"))
        );
        assert_eq!(normalize_dropped_path("   "), None);
        assert_eq!(normalize_dropped_path("\"\""), None);
    }

    #[tokio::test]
    async fn test_failed_run_counts_and_reenables_trigger() {
        let mut app = test_app();

        let outcome = app.submit(PathBuf::from("notatki.txt")).await;

        assert!(matches!(
            outcome,
            Some(Err(PipelineError::UnsupportedFormat { .. }))
        ));
        assert_eq!(app.failed_runs(), 1);
        assert_eq!(app.completed_runs(), 0);
        assert!(app.trigger().is_enabled());
    }

    #[test]
    fn test_trigger_is_exclusive() {
        let trigger = RunTrigger::new();
        let guard = trigger.try_acquire().unwrap();
        assert!(!trigger.is_enabled());
        assert!(trigger.clone().try_acquire().is_none());

        drop(guard);
        assert!(trigger.is_enabled());
        assert!(trigger.try_acquire().is_some());
    }

    #[tokio::test]
    async fn test_submit_rejected_while_run_in_flight() {
        let mut app = test_app();
        let trigger = app.trigger();

        // another front end holding the trigger
        let busy = trigger.try_acquire().unwrap();
        assert!(app.submit(PathBuf::from("notatki.txt")).await.is_none());
        assert_eq!(app.failed_runs(), 0);
        assert_eq!(app.completed_runs(), 0);

        drop(busy);
        assert!(app.submit(PathBuf::from("notatki.txt")).await.is_some());
        assert_eq!(app.failed_runs(), 1);
    }

    #[tokio::test]
    async fn test_consecutive_runs_each_report() {
        let mut app = test_app();
        app.check_files(vec![PathBuf::from("a.txt"), PathBuf::from("/missing/b.pdf")])
            .await;
        assert_eq!(app.failed_runs(), 2);
    }
}
