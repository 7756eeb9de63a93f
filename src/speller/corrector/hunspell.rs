use super::Corrector;
use crate::speller::error::{CorrectionError, DictionaryError};
use std::path::{Path, PathBuf};

/// Corrector backed by a Hunspell dictionary (`<stem>.aff` + `<stem>.dic`)
pub struct HunspellCorrector {
    dictionary: spellbook::Dictionary,
    source: PathBuf,
}

impl HunspellCorrector {
    /// Load `<stem>.aff` and `<stem>.dic`, e.g. `/usr/share/hunspell/pl_PL`
    pub fn load(stem: &Path) -> Result<Self, DictionaryError> {
        let aff_path = with_suffix(stem, "aff");
        let dic_path = with_suffix(stem, "dic");

        let aff = read(&aff_path)?;
        let dic = read(&dic_path)?;

        let corrector = Self::from_sources(&aff, &dic).map_err(|reason| DictionaryError::Parse {
            path: dic_path.clone(),
            reason,
        })?;

        tracing::info!("[Hunspell] Loaded dictionary {}", stem.display());
        Ok(Self {
            source: stem.to_path_buf(),
            ..corrector
        })
    }

    /// Build from in-memory `.aff` and `.dic` contents
    pub fn from_sources(aff: &str, dic: &str) -> Result<Self, String> {
        let dictionary = spellbook::Dictionary::new(aff, dic).map_err(|e| e.to_string())?;
        Ok(Self {
            dictionary,
            source: PathBuf::new(),
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl Corrector for HunspellCorrector {
    fn correct(&self, word: &str) -> Result<String, CorrectionError> {
        if self.dictionary.check(word) {
            return Ok(word.to_string());
        }

        let mut suggestions = Vec::new();
        self.dictionary.suggest(word, &mut suggestions);

        Ok(suggestions
            .into_iter()
            .next()
            .unwrap_or_else(|| word.to_string()))
    }

    fn name(&self) -> &str {
        "hunspell"
    }
}

/// `pl_PL` → `pl_PL.aff`, keeping any dots already in the stem
fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

fn read(path: &Path) -> Result<String, DictionaryError> {
    std::fs::read_to_string(path).map_err(|source| DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    })
}
