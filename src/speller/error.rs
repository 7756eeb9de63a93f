use super::types::DocumentFormat;
use std::path::PathBuf;
use thiserror::Error;

/// Run-level failures. Each one aborts the run and is shown to the user once.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Unsupported file format: {}. Choose a PDF or DOCX file.", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to read {format} file: {cause}")]
    Extraction { format: DocumentFormat, cause: String },

    #[error("No text could be read from {}", path.display())]
    EmptyContent { path: PathBuf },

    #[error("Background run stopped unexpectedly: {0}")]
    Worker(String),
}

/// A single correction lookup failed. Swallowed by the pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("correction failed for '{word}': {reason}")]
pub struct CorrectionError {
    pub word: String,
    pub reason: String,
}

impl CorrectionError {
    pub fn new(word: &str, reason: impl Into<String>) -> Self {
        Self {
            word: word.to_string(),
            reason: reason.into(),
        }
    }
}

/// A correction engine could not be constructed
#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dictionary {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_message_names_format_and_cause() {
        let err = PipelineError::Extraction {
            format: DocumentFormat::Pdf,
            cause: "invalid file header".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to read PDF file: invalid file header");
    }

    #[test]
    fn test_unsupported_format_message() {
        let err = PipelineError::UnsupportedFormat {
            path: PathBuf::from("notes.txt"),
        };
        assert!(err.to_string().contains("notes.txt"));
    }
}
