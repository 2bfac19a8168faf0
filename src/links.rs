//! URL extraction used by the link count.

use regex::Regex;

pub trait UrlExtractor: Send + Sync {
    fn find_urls<'t>(&self, text: &'t str) -> Vec<&'t str>;
}

/// Matches `http://`, `https://` and bare `www.` URLs up to the next whitespace.
#[derive(Clone, Debug)]
pub struct RegexUrlExtractor {
    re: Regex,
}

impl Default for RegexUrlExtractor {
    fn default() -> Self {
        let re = Regex::new(r"(?i)\b(?:https?://|www\.)[^\s<>]+").expect("valid url pattern");
        Self { re }
    }
}

impl UrlExtractor for RegexUrlExtractor {
    fn find_urls<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.re
            .find_iter(text)
            .map(|m| m.as_str().trim_end_matches(|c: char| matches!(c, '.' | ',' | ')' | '!' | '?' | ';' | ':')))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_scheme_and_www_urls() {
        let ex = RegexUrlExtractor::default();
        let urls = ex.find_urls("see https://rust-lang.org/learn, and www.example.com. also HTTP://A.B/c?d=1\n");
        assert_eq!(urls, ["https://rust-lang.org/learn", "www.example.com", "HTTP://A.B/c?d=1"]);
    }

    #[test]
    fn plain_text_has_no_urls() {
        let ex = RegexUrlExtractor::default();
        assert!(ex.find_urls("<Media omitted>\n").is_empty());
        assert!(ex.find_urls("the website is down").is_empty());
    }
}
