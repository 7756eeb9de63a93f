use super::Corrector;
use crate::speller::error::{CorrectionError, DictionaryError};
use std::collections::HashMap;
use std::path::Path;

/// Fixed list of known misspellings.
///
/// File format: one `misspelling<TAB>correction` pair per line; blank lines and
/// lines starting with `#` are ignored. Lookup is case-insensitive, unknown
/// words come back unchanged.
#[derive(Debug, Clone, Default)]
pub struct ReplacementTable {
    entries: HashMap<String, String>,
}

impl ReplacementTable {
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let content = std::fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::parse(&content).map_err(|reason| DictionaryError::Parse {
            path: path.to_path_buf(),
            reason,
        })?;

        tracing::info!(
            "[ReplacementTable] Loaded {} entries from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        let mut entries = HashMap::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (wrong, right) = line
                .split_once('\t')
                .ok_or_else(|| format!("line {}: expected misspelling<TAB>correction", line_no + 1))?;
            let (wrong, right) = (wrong.trim(), right.trim());
            if wrong.is_empty() || right.is_empty() {
                return Err(format!("line {}: empty entry", line_no + 1));
            }

            entries.insert(wrong.to_lowercase(), right.to_string());
        }

        Ok(Self { entries })
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(wrong, right)| (wrong.to_lowercase(), right.to_string()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Corrector for ReplacementTable {
    fn correct(&self, word: &str) -> Result<String, CorrectionError> {
        Ok(self
            .entries
            .get(&word.to_lowercase())
            .cloned()
            .unwrap_or_else(|| word.to_string()))
    }

    fn name(&self) -> &str {
        "replacement-table"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let table = ReplacementTable::parse("# typos\n\nwtorke\tWtorek\nbylo\tbyło\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.correct("bylo").unwrap(), "było");
    }

    #[test]
    fn test_lookup_ignores_case() {
        let table = ReplacementTable::from_pairs([("wtorke", "Wtorek")]);
        assert_eq!(table.correct("WTORKE").unwrap(), "Wtorek");
    }

    #[test]
    fn test_unknown_word_is_unchanged() {
        let table = ReplacementTable::default();
        assert_eq!(table.correct("słonecznie").unwrap(), "słonecznie");
    }

    #[test]
    fn test_parse_rejects_line_without_tab() {
        let err = ReplacementTable::parse("wtorke Wtorek").unwrap_err();
        assert!(err.contains("line 1"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "slonecznie\tsłonecznie").unwrap();

        let table = ReplacementTable::load(file.path()).unwrap();
        assert_eq!(table.correct("slonecznie").unwrap(), "słonecznie");
    }

    #[test]
    fn test_load_missing_file() {
        let err = ReplacementTable::load(Path::new("/nonexistent/typos.tsv")).unwrap_err();
        assert!(matches!(err, DictionaryError::Io { .. }));
    }
}
