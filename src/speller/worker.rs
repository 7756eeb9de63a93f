//! Background execution of pipeline runs.
//!
//! Each run gets its own blocking task. Everything the run reports is sent as a
//! `RunEvent` over an unbounded channel, ending with exactly one
//! `RunEvent::Finished`. The caller is never blocked by the pipeline itself.

use super::controller::SpellCheckPipeline;
use super::error::PipelineError;
use super::types::{RunEvent, RunOutcome};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Starts runs of a shared pipeline off the calling thread
#[derive(Clone)]
pub struct PipelineWorker {
    pipeline: Arc<SpellCheckPipeline>,
}

impl PipelineWorker {
    pub fn new(pipeline: Arc<SpellCheckPipeline>) -> Self {
        Self { pipeline }
    }

    /// Start a run for `path`. Must be called from within a Tokio runtime.
    pub fn start(&self, path: impl Into<PathBuf>) -> RunHandle {
        let path = path.into();
        let run_id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();
        let pipeline = Arc::clone(&self.pipeline);

        tracing::info!("[Worker] Run {} started for {}", run_id, path.display());

        let task = tokio::task::spawn_blocking(move || {
            let progress_tx = tx.clone();
            let outcome = pipeline.run(&path, &mut |event| {
                // Receiver gone means nobody is listening any more; keep going
                let _ = progress_tx.send(event);
            });
            let _ = tx.send(RunEvent::Finished(outcome));
        });

        RunHandle {
            run_id,
            events: rx,
            task: Some(task),
        }
    }
}

/// Receiving end of one run
pub struct RunHandle {
    run_id: Uuid,
    events: mpsc::UnboundedReceiver<RunEvent>,
    task: Option<JoinHandle<()>>,
}

impl RunHandle {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Next event of the run.
    ///
    /// Returns `None` after `Finished` has been delivered. If the task died
    /// without finishing, a synthetic `Finished(Err(Worker))` is produced once.
    pub async fn next_event(&mut self) -> Option<RunEvent> {
        if let Some(event) = self.events.recv().await {
            if matches!(event, RunEvent::Finished(_)) {
                self.task = None;
            }
            return Some(event);
        }

        // Channel closed: the task is over, with or without a Finished event
        let task = self.task.take()?;
        let reason = match task.await {
            Ok(()) => "run ended without a result".to_string(),
            Err(e) if e.is_panic() => "pipeline panicked".to_string(),
            Err(e) => e.to_string(),
        };
        tracing::error!("[Worker] Run {} stopped: {}", self.run_id, reason);
        Some(RunEvent::Finished(Err(PipelineError::Worker(reason))))
    }

    /// Drain all events and return the terminal result
    pub async fn wait(mut self) -> RunOutcome {
        while let Some(event) = self.next_event().await {
            if let RunEvent::Finished(outcome) = event {
                return outcome;
            }
        }
        Err(PipelineError::Worker("run ended without a result".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speller::corrector::{Corrector, ReplacementTable};
    use crate::speller::error::CorrectionError;
    use crate::speller::types::RunState;

    struct Identity;

    impl Corrector for Identity {
        fn correct(&self, word: &str) -> Result<String, CorrectionError> {
            Ok(word.to_string())
        }

        fn name(&self) -> &str {
            "identity"
        }
    }

    fn worker() -> PipelineWorker {
        let table = ReplacementTable::from_pairs([("wtorke", "Wtorek")]);
        PipelineWorker::new(Arc::new(SpellCheckPipeline::new(Arc::new(table))))
    }

    #[tokio::test]
    async fn test_unsupported_format_events() {
        let mut handle = worker().start("notatki.txt");

        let mut states = Vec::new();
        let mut outcome = None;
        while let Some(event) = handle.next_event().await {
            match event {
                RunEvent::State(state) => states.push(state),
                RunEvent::Progress(_) => panic!("no progress expected before extraction"),
                RunEvent::Finished(result) => outcome = Some(result),
            }
        }

        assert_eq!(states, vec![RunState::Failed]);
        assert!(matches!(
            outcome,
            Some(Err(PipelineError::UnsupportedFormat { .. }))
        ));
    }

    #[tokio::test]
    async fn test_wait_returns_outcome() {
        let pipeline = SpellCheckPipeline::new(Arc::new(Identity));
        let handle = PipelineWorker::new(Arc::new(pipeline)).start("/nonexistent/raport.pdf");

        let outcome = handle.wait().await;
        assert!(matches!(outcome, Err(PipelineError::Extraction { .. })));
    }

    #[tokio::test]
    async fn test_each_run_has_its_own_id() {
        let worker = worker();
        let first = worker.start("a.txt");
        let second = worker.start("b.txt");
        assert_ne!(first.run_id(), second.run_id());
        first.wait().await.unwrap_err();
        second.wait().await.unwrap_err();
    }
}
