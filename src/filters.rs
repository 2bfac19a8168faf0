//! Record-level predicates shared by every aggregate.

use crate::config::ParseOptions;
use crate::normalize::Record;
use crate::query::Scope;
use crate::sentiment::Sentiment;

pub fn matches_user(r: &Record, user: Option<&str>) -> bool {
    match user {
        Some(u) => r.user == u,
        None => true,
    }
}

pub fn matches_sentiment(r: &Record, k: Option<Sentiment>) -> bool {
    match k {
        Some(k) => r.sentiment == k,
        None => true,
    }
}

/// User and sentiment checks are independent, so applying them in either order selects the same records.
pub fn matches_scope(r: &Record, scope: &Scope) -> bool {
    matches_user(r, scope.user.as_deref()) && matches_sentiment(r, scope.sentiment)
}

/// Vocabulary sources: authored messages that are not the media placeholder.
pub fn is_vocabulary_source(r: &Record, opts: &ParseOptions) -> bool {
    !r.is_notification(opts) && r.message != opts.media_placeholder
}

pub fn is_media(r: &Record, opts: &ParseOptions) -> bool {
    r.message == opts.media_placeholder
}
