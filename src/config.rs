//! Runtime configuration.
//!
//! Resolution order: command line flags, then environment variables (a `.env`
//! file is loaded first), then defaults. Nothing is persisted.

use crate::shell::cli::Cli;
use crate::shell::report::ReportLanguage;
use crate::speller::{
    Corrector, DictionaryError, HunspellCorrector, ReplacementTable, SpellCheckPipeline,
    WordFilter,
};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Default Hunspell dictionary name inside the data directory
pub const DEFAULT_DICTIONARY: &str = "pl_PL";

/// Which correction engine to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Engine {
    /// Hunspell `.aff`/`.dic` dictionary
    Hunspell,
    /// Tab-separated misspelling → correction list
    Table,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error("The table engine needs a replacement list (--replacements or KOREKTOR_REPLACEMENTS)")]
    MissingReplacements,

    #[error("Could not determine the data directory; pass --dictionary explicitly")]
    NoDataDir,

    #[error("The extended alphabet must not be empty")]
    EmptyAlphabet,
}

/// Fully resolved settings for one process
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub engine: Engine,
    /// Dictionary path without the `.aff`/`.dic` extension
    pub dictionary: PathBuf,
    pub replacements: Option<PathBuf>,
    pub alphabet: String,
    pub output: OutputFormat,
    pub language: ReportLanguage,
    pub quiet: bool,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let dictionary = match &cli.dictionary {
            Some(path) => path.clone(),
            // the table engine never opens the dictionary
            None if cli.engine == Engine::Table => default_dictionary().unwrap_or_default(),
            None => default_dictionary().ok_or(ConfigError::NoDataDir)?,
        };

        if cli.engine == Engine::Table && cli.replacements.is_none() {
            return Err(ConfigError::MissingReplacements);
        }

        if cli.alphabet.trim().is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }

        Ok(Self {
            engine: cli.engine,
            dictionary,
            replacements: cli.replacements.clone(),
            alphabet: cli.alphabet.clone(),
            output: cli.format,
            language: cli.lang,
            // a progress bar would corrupt machine-readable output
            quiet: cli.quiet || cli.format == OutputFormat::Json,
        })
    }

    /// Load the configured correction engine
    pub fn build_corrector(&self) -> Result<Arc<dyn Corrector>, ConfigError> {
        let corrector: Arc<dyn Corrector> = match self.engine {
            Engine::Hunspell => Arc::new(HunspellCorrector::load(&self.dictionary)?),
            Engine::Table => {
                let path = self
                    .replacements
                    .as_ref()
                    .ok_or(ConfigError::MissingReplacements)?;
                Arc::new(ReplacementTable::load(path)?)
            }
        };

        tracing::info!("[Config] Using {} corrector", corrector.name());
        Ok(corrector)
    }

    pub fn build_pipeline(&self) -> Result<SpellCheckPipeline, ConfigError> {
        Ok(SpellCheckPipeline::new(self.build_corrector()?)
            .with_filter(WordFilter::new(&self.alphabet)))
    }
}

/// `<data_dir>/korektor/dictionaries/pl_PL`
pub fn default_dictionary() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| {
        dir.join("korektor")
            .join("dictionaries")
            .join(DEFAULT_DICTIONARY)
    })
}
