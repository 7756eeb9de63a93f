//! Pipeline controller: extraction → filtering → correction for one document.
//!
//! ```text
//! Idle ──▶ Extracting ──▶ Checking ──▶ Done
//!   │           │             │
//!   └───────────┴─────────────┴──▶ Failed
//! ```
//!
//! Progress is split in two bands: 0-50% while pages/paragraphs are read,
//! 50-100% while tokens are checked.

use super::corrector::{suggestion_for, Corrector};
use super::error::PipelineError;
use super::extractor::Extractor;
use super::progress::ProgressTracker;
use super::tokenizer::{context_window, tokenize, WordFilter};
use super::types::{CorrectionRecord, Document, RunEvent, RunState};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Sequences the pipeline stages. Holds no per-run state, so one instance can
/// serve many consecutive runs.
pub struct SpellCheckPipeline {
    extractor: Extractor,
    filter: WordFilter,
    corrector: Arc<dyn Corrector>,
}

impl SpellCheckPipeline {
    pub fn new(corrector: Arc<dyn Corrector>) -> Self {
        Self {
            extractor: Extractor::new(),
            filter: WordFilter::default(),
            corrector,
        }
    }

    pub fn with_filter(mut self, filter: WordFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Run the whole pipeline for the file at `path`.
    ///
    /// State changes and progress are reported through `on_event`; the terminal
    /// result is returned, not sent as an event.
    pub fn run(
        &self,
        path: &Path,
        on_event: &mut dyn FnMut(RunEvent),
    ) -> Result<Vec<CorrectionRecord>, PipelineError> {
        let mut run = PipelineRun::new(on_event);
        let started = Instant::now();

        let result = self.run_stages(path, &mut run);
        match &result {
            Ok(records) => {
                run.transition(RunState::Done);
                tracing::info!(
                    "[Pipeline] Done: {} corrections in {:?} for {}",
                    records.len(),
                    started.elapsed(),
                    path.display()
                );
            }
            Err(e) => {
                run.transition(RunState::Failed);
                tracing::warn!("[Pipeline] Run failed for {}: {}", path.display(), e);
            }
        }
        result
    }

    fn run_stages(
        &self,
        path: &Path,
        run: &mut PipelineRun<'_>,
    ) -> Result<Vec<CorrectionRecord>, PipelineError> {
        // Rejected before any extraction attempt
        let document = Document::from_path(path)?;

        run.transition(RunState::Extracting);
        let text = self.extractor.extract(&document, &mut |done, total| {
            if let Some(update) = run.tracker.extraction(done, total) {
                (run.on_event)(RunEvent::Progress(update));
            }
        })?;

        if text.trim().is_empty() {
            return Err(PipelineError::EmptyContent {
                path: document.path.clone(),
            });
        }

        run.transition(RunState::Checking);
        let mut token_count = 0;
        let records = self.check_text(&text, &mut |done, total| {
            token_count = total;
            if let Some(update) = run.tracker.checking(done, total) {
                (run.on_event)(RunEvent::Progress(update));
            }
        });

        let update = run.tracker.complete(token_count);
        (run.on_event)(RunEvent::Progress(update));
        Ok(records)
    }

    /// Tokenize, filter and correct `text`.
    ///
    /// `on_checked(done, total)` fires after every checkable token, where `done`
    /// counts tokens of the whole sequence up to and including this one.
    pub fn check_text(
        &self,
        text: &str,
        on_checked: &mut dyn FnMut(usize, usize),
    ) -> Vec<CorrectionRecord> {
        let tokens = tokenize(text);
        let total = tokens.len();
        let mut records = Vec::new();
        let mut checked = 0usize;

        for token in &tokens {
            if !self.filter.is_checkable(token.text) {
                continue;
            }

            if let Some(correction) = suggestion_for(self.corrector.as_ref(), token.text) {
                records.push(CorrectionRecord {
                    error: token.text.to_string(),
                    correction,
                    context: context_window(&tokens, token.index),
                });
            }

            checked += 1;
            on_checked(token.index + 1, total);
        }

        tracing::debug!(
            "[Pipeline] Checked {} of {} tokens with {}, {} flagged",
            checked,
            total,
            self.corrector.name(),
            records.len()
        );
        records
    }
}

/// Per-run bookkeeping: current state, progress bands and the event sink
struct PipelineRun<'a> {
    state: RunState,
    tracker: ProgressTracker,
    on_event: &'a mut dyn FnMut(RunEvent),
}

impl<'a> PipelineRun<'a> {
    fn new(on_event: &'a mut dyn FnMut(RunEvent)) -> Self {
        Self {
            state: RunState::Idle,
            tracker: ProgressTracker::new(),
            on_event,
        }
    }

    fn transition(&mut self, next: RunState) {
        if !self.state.can_transition_to(next) {
            tracing::error!(
                "[Pipeline] Rejected state transition {:?} -> {:?}",
                self.state,
                next
            );
            return;
        }

        tracing::debug!("[Pipeline] {:?} -> {:?}", self.state, next);
        self.state = next;
        (self.on_event)(RunEvent::State(next));
    }
}
