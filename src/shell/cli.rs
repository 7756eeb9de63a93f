use crate::config::{Engine, OutputFormat};
use crate::shell::report::ReportLanguage;
use crate::speller::tokenizer::DEFAULT_EXTENDED_ALPHABET;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Command line arguments. Flags fall back to `KOREKTOR_*` environment variables.
#[derive(Parser, Debug)]
#[command(
    name = "korektor",
    version,
    about = "Find spelling errors in PDF and DOCX documents.",
    long_about = "Find spelling errors in PDF and DOCX documents.\n\n\
                  Without FILES, paths are read from standard input, one per line \
                  (quoted paths from drag and drop are accepted)."
)]
pub struct Cli {
    /// Documents to check (.pdf or .docx)
    pub files: Vec<PathBuf>,

    /// Correction engine
    #[arg(long, env = "KOREKTOR_ENGINE", value_enum, default_value_t = Engine::Hunspell)]
    pub engine: Engine,

    /// Hunspell dictionary path without extension, e.g. /usr/share/hunspell/pl_PL
    #[arg(long, env = "KOREKTOR_DICTIONARY")]
    pub dictionary: Option<PathBuf>,

    /// Misspelling list for the table engine (misspelling<TAB>correction per line)
    #[arg(long, env = "KOREKTOR_REPLACEMENTS")]
    pub replacements: Option<PathBuf>,

    /// Letters that make a mixed token worth checking
    #[arg(long, env = "KOREKTOR_ALPHABET", default_value = DEFAULT_EXTENDED_ALPHABET)]
    pub alphabet: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Language of the text report
    #[arg(long, env = "KOREKTOR_LANG", value_enum, default_value_t = ReportLanguage::Polish)]
    pub lang: ReportLanguage,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log filter used when RUST_LOG is not set
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "warn,korektor_lib=info",
            _ => "warn,korektor_lib=debug",
        }
    }
}
