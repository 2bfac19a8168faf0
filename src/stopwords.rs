//! Stopword Filter: a load-once vocabulary exclusion list.

use crate::error::{ChatError, ChatResult};
use ahash::AHashSet;
use std::fs;
use std::path::Path;

/// Bundled Hinglish + English list used when no other list is supplied.
const BUNDLED: &str = include_str!("../data/stop_hinglish.txt");

/// How tokens are tested against the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StopwordMode {
    /// Token must equal a listed word.
    #[default]
    Exact,
    /// Token is excluded if it occurs anywhere inside the raw list text.
    /// Reproduces historical output: "he" is dropped because the list contains "the".
    Substring,
}

#[derive(Clone, Debug, Default)]
pub struct StopwordSet {
    words: AHashSet<String>,
    blob: String,
    mode: StopwordMode,
}

impl StopwordSet {
    /// Parse a newline-separated list; entries are trimmed and lowercased, blanks dropped.
    pub fn from_list(text: &str) -> Self {
        let mut set = Self::default();
        set.extend(text.lines());
        set
    }

    pub fn bundled() -> Self {
        Self::from_list(BUNDLED)
    }

    pub fn load(path: &Path) -> ChatResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ChatError::Io { path: path.to_path_buf(), source })?;
        Ok(Self::from_list(&text))
    }

    pub fn with_mode(mut self, mode: StopwordMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for raw in words {
            let w = raw.as_ref().trim().to_lowercase();
            if w.is_empty() || !self.words.insert(w.clone()) {
                continue;
            }
            self.blob.push_str(&w);
            self.blob.push('\n');
        }
    }

    /// Merge extra stopwords from the environment.
    /// - CHATSENSE_STOPWORDS: comma/semicolon/space separated words
    /// - CHATSENSE_STOPWORDS_FILE: path to a newline-separated file of words
    pub fn merge_from_env(mut self) -> Self {
        if let Ok(s) = std::env::var("CHATSENSE_STOPWORDS") {
            self.extend(s.split(|c: char| c == ',' || c == ';' || c.is_whitespace()));
        }
        if let Ok(path) = std::env::var("CHATSENSE_STOPWORDS_FILE") {
            if !path.trim().is_empty() {
                match fs::read_to_string(&path) {
                    Ok(text) => self.extend(text.lines()),
                    Err(e) => tracing::warn!("CHATSENSE_STOPWORDS_FILE is set but cannot be read: {}: {}", path, e),
                }
            }
        }
        self
    }

    /// `token` is expected lowercased already.
    pub fn contains(&self, token: &str) -> bool {
        match self.mode {
            StopwordMode::Exact => self.words.contains(token),
            StopwordMode::Substring => self.blob.contains(token),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_mode_only_matches_whole_words() {
        let s = StopwordSet::from_list("the\n  Hai \n\nto\n");
        assert_eq!(s.len(), 3);
        assert!(s.contains("hai"));
        assert!(s.contains("the"));
        assert!(!s.contains("he"));
        assert!(!s.contains("tomorrow"));
    }

    #[test]
    fn substring_mode_matches_inside_the_list() {
        let s = StopwordSet::from_list("the\nto\n").with_mode(StopwordMode::Substring);
        assert!(s.contains("he"));
        assert!(s.contains("t"));
        assert!(!s.contains("tomorrow"));
    }

    #[test]
    fn bundled_list_is_loaded() {
        let s = StopwordSet::bundled();
        assert!(s.contains("hai"));
        assert!(s.contains("the"));
        assert!(!s.contains("morning"));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = StopwordSet::load(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, ChatError::Io { .. }));
    }
}
