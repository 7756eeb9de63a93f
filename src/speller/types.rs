//! Shared data types for the spell-check pipeline.

use super::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Supported document formats
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolve the format from a file extension (case-insensitive)
    pub fn from_extension(ext: Option<&str>) -> Option<Self> {
        match ext.map(|e| e.to_lowercase()).as_deref() {
            Some("pdf") => Some(Self::Pdf),
            Some("docx") => Some(Self::Docx),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "PDF"),
            Self::Docx => write!(f, "DOCX"),
        }
    }
}

/// A selected document. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub format: DocumentFormat,
}

impl Document {
    /// Select a document by path, rejecting anything that is not `.pdf` or `.docx`
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let path = path.into();
        let ext = path.extension().and_then(|e| e.to_str());

        match DocumentFormat::from_extension(ext) {
            Some(format) => Ok(Self { path, format }),
            None => Err(PipelineError::UnsupportedFormat { path }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for display, falling back to the full path
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// A word-like slice of the extracted text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Position in the token sequence
    pub index: usize,
    pub text: &'a str,
}

/// One flagged word reported to the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorrectionRecord {
    /// The token as it appears in the document
    pub error: String,
    /// Suggested replacement
    pub correction: String,
    /// Up to 3 tokens on each side of the error, space-joined
    pub context: String,
}

/// State of a single run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Extracting,
    Checking,
    Done,
    Failed,
}

impl RunState {
    /// Whether the run has ended
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Whether `self → next` is a legal transition
    pub fn can_transition_to(self, next: RunState) -> bool {
        use RunState::*;
        matches!(
            (self, next),
            (Idle, Extracting)
                | (Extracting, Checking)
                | (Checking, Done)
                | (Idle, Failed)
                | (Extracting, Failed)
                | (Checking, Failed)
        )
    }
}

/// Phase a progress value belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// 0-50%
    Extracting,
    /// 50-100%
    Checking,
}

/// Progress event for UI updates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub phase: RunPhase,
    /// Overall completion in [0, 100]
    pub percent: f64,
    /// Units (pages, paragraphs or tokens) processed so far
    pub current: usize,
    pub total: usize,
}

/// Terminal result of a run
pub type RunOutcome = Result<Vec<CorrectionRecord>, PipelineError>;

/// Everything a run reports while it executes
#[derive(Debug)]
pub enum RunEvent {
    State(RunState),
    Progress(ProgressUpdate),
    Finished(RunOutcome),
}
