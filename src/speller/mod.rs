//! Document Spell-Check Pipeline
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  1. EXTRACT: PDF pages (lopdf) / DOCX paragraphs (docx-rs)  0-50% │
//! │  2. TOKENIZE: \w+ words, keep checkable ones                      │
//! │  3. CORRECT: Corrector per word (Hunspell or replacement table)   │
//! │  4. REPORT: error + correction + 7-word context        50-100%    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `SpellCheckPipeline` runs the stages synchronously; `PipelineWorker` runs it
//! on a background task and streams `RunEvent`s to the caller.

pub mod controller;
pub mod corrector;
pub mod error;
pub mod extractor;
pub mod progress;
pub mod tokenizer;
pub mod types;
pub mod worker;


pub use controller::SpellCheckPipeline;
pub use corrector::{Corrector, HunspellCorrector, ReplacementTable};
pub use error::{CorrectionError, DictionaryError, PipelineError};
pub use tokenizer::WordFilter;
pub use types::{
    CorrectionRecord, Document, DocumentFormat, ProgressUpdate, RunEvent, RunOutcome, RunPhase,
    RunState,
};
pub use worker::{PipelineWorker, RunHandle};
