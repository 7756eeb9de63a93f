//! Word segmentation and the "checkable word" filter.
//!
//! The filter is a heuristic: a token is worth looking up if it is not a number
//! and it either contains a letter from the extended alphabet or is made of
//! letters only. It does not detect the language of the word.

use super::types::Token;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Polish letters with diacritics
pub const DEFAULT_EXTENDED_ALPHABET: &str = "ąćęłńóśźżĄĆĘŁŃÓŚŹŻ";

/// Number of tokens kept on each side of an error in its context
pub const CONTEXT_RADIUS: usize = 3;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Split text into word tokens, in order
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    WORD_RE
        .find_iter(text)
        .enumerate()
        .map(|(index, m)| Token {
            index,
            text: m.as_str(),
        })
        .collect()
}

/// Context window around `index`: up to `CONTEXT_RADIUS` tokens on each side
pub fn context_window(tokens: &[Token<'_>], index: usize) -> String {
    let start = index.saturating_sub(CONTEXT_RADIUS);
    let end = (index + CONTEXT_RADIUS + 1).min(tokens.len());

    tokens[start..end]
        .iter()
        .map(|t| t.text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decides which tokens go to the corrector
#[derive(Debug, Clone)]
pub struct WordFilter {
    extended_alphabet: HashSet<char>,
}

impl WordFilter {
    pub fn new(extended_alphabet: &str) -> Self {
        Self {
            extended_alphabet: extended_alphabet.chars().collect(),
        }
    }

    pub fn is_checkable(&self, word: &str) -> bool {
        if word.is_empty() || word.chars().all(char::is_numeric) {
            return false;
        }

        word.chars().any(|c| self.extended_alphabet.contains(&c))
            || word.chars().all(char::is_alphabetic)
    }
}

impl Default for WordFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENDED_ALPHABET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(tokens: &[Token<'a>]) -> Vec<&'a str> {
        tokens.iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_tokenize_keeps_case_and_diacritics() {
        let tokens = tokenize("Zażółć gęślą jaźń, proszę!");
        assert_eq!(texts(&tokens), vec!["Zażółć", "gęślą", "jaźń", "proszę"]);
        assert_eq!(tokens[2].index, 2);
    }

    #[test]
    fn test_tokenize_includes_digits_and_underscores() {
        let tokens = tokenize("rok 2024, plik_v2.docx");
        assert_eq!(texts(&tokens), vec!["rok", "2024", "plik_v2", "docx"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("  \n\t ... ").is_empty());
    }

    #[test]
    fn test_numeric_is_never_checkable() {
        let filter = WordFilter::default();
        assert!(!filter.is_checkable("12345"));
        assert!(!filter.is_checkable("½"));
    }

    #[test]
    fn test_alphabetic_is_checkable() {
        let filter = WordFilter::default();
        assert!(filter.is_checkable("Wtorke"));
        assert!(filter.is_checkable("słonecznie"));
    }

    #[test]
    fn test_mixed_tokens() {
        let filter = WordFilter::default();
        // no extended letter and not fully alphabetic
        assert!(!filter.is_checkable("abc1"));
        assert!(!filter.is_checkable("snake_case"));
        // extended letter wins over the digit
        assert!(filter.is_checkable("żółw2"));
    }

    #[test]
    fn test_custom_alphabet() {
        let filter = WordFilter::new("ß");
        assert!(filter.is_checkable("straße1"));
        assert!(!filter.is_checkable("żółw2"));
    }

    #[test]
    fn test_context_window_edges() {
        let tokens = tokenize("a b c d e f g h");
        assert_eq!(context_window(&tokens, 0), "a b c d");
        assert_eq!(context_window(&tokens, 4), "b c d e f g h");
        assert_eq!(context_window(&tokens, 7), "e f g h");
    }
}
