//! Spelling correction seam.
//!
//! The pipeline only needs `correct(word) -> word`. Engines:
//! - `HunspellCorrector`: Hunspell `.aff`/`.dic` dictionaries via spellbook
//! - `ReplacementTable`: a fixed misspelling → correction list

mod hunspell;
mod replacements;

pub use hunspell::HunspellCorrector;
pub use replacements::ReplacementTable;

use super::error::CorrectionError;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Any single-word spelling correction capability
pub trait Corrector: Send + Sync {
    /// Best replacement for `word`, or `word` itself when it looks right
    fn correct(&self, word: &str) -> Result<String, CorrectionError>;

    /// Engine name for logs
    fn name(&self) -> &str;
}

/// Suggestion for `word` if the engine proposes something different.
///
/// Comparison ignores case. Errors and panics from the engine are swallowed:
/// the word is skipped and the run goes on.
pub fn suggestion_for(corrector: &dyn Corrector, word: &str) -> Option<String> {
    let corrected = match catch_unwind(AssertUnwindSafe(|| corrector.correct(word))) {
        Ok(Ok(corrected)) => corrected,
        Ok(Err(e)) => {
            tracing::debug!("[Corrector] Skipping word ({}): {}", corrector.name(), e);
            return None;
        }
        Err(_panic) => {
            tracing::debug!(
                "[Corrector] Skipping word '{}': {} panicked",
                word,
                corrector.name()
            );
            return None;
        }
    };

    if corrected.to_lowercase() != word.to_lowercase() {
        Some(corrected)
    } else {
        None
    }
}
