//! Vocabulary and emoji frequency, plus the cleaned text handed to word-cloud renderers.

use crate::counting::StableCounter;
use crate::dataset::Dataset;
use crate::emoji::EmojiTable;
use crate::filters::is_vocabulary_source;
use crate::normalize::Record;
use crate::query::Scope;
use crate::stopwords::StopwordSet;

fn vocabulary_records<'a>(ds: &'a Dataset, scope: &'a Scope) -> impl Iterator<Item = &'a Record> + 'a {
    ds.select(scope).filter(move |r| is_vocabulary_source(r, ds.options()))
}

/// Lowercased whitespace tokens of one message that are not stopwords.
fn content_tokens(message: &str, stopwords: &StopwordSet) -> Vec<String> {
    message
        .to_lowercase()
        .split_whitespace()
        .filter(|w| !stopwords.contains(w))
        .map(str::to_string)
        .collect()
}

/// Top `n` content words; ties keep first-seen order.
/// Notifications and media placeholders never contribute tokens.
pub fn most_common_words(ds: &Dataset, scope: &Scope, stopwords: &StopwordSet, n: usize) -> Vec<(String, u64)> {
    let mut counter = StableCounter::new();
    for r in vocabulary_records(ds, scope) {
        for w in content_tokens(&r.message, stopwords) {
            counter.add(w);
        }
    }
    counter.most_common(Some(n))
}

/// Cleaned, space-joined text for a word cloud. Builds a new string; the dataset is untouched.
pub fn wordcloud_text(ds: &Dataset, scope: &Scope, stopwords: &StopwordSet) -> String {
    let mut out = String::new();
    for r in vocabulary_records(ds, scope) {
        for w in content_tokens(&r.message, stopwords) {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&w);
        }
    }
    out
}

/// Full emoji distribution, most frequent first.
pub fn emoji_frequency(ds: &Dataset, scope: &Scope, table: &dyn EmojiTable) -> Vec<(char, u64)> {
    let counter: StableCounter<char> = ds
        .select(scope)
        .flat_map(|r| r.message.chars())
        .filter(|c| table.is_emoji(*c))
        .collect();
    counter.most_common(None)
}
