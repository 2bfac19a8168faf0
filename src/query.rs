//! Aggregation scope: which user, and optionally which sentiment, an aggregate covers.

use crate::sentiment::Sentiment;

/// `user: None` is the overall (all-participants) view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scope {
    pub user: Option<String>,
    pub sentiment: Option<Sentiment>,
}

impl Scope {
    pub fn overall() -> Self {
        Self::default()
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self { user: Some(name.into()), sentiment: None }
    }

    /// From a presentation-layer selection where `"Overall"` means no user filter.
    pub fn from_selection(selection: &str) -> Self {
        if selection == "Overall" { Self::overall() } else { Self::user(selection) }
    }

    pub fn with_sentiment(mut self, k: Sentiment) -> Self {
        self.sentiment = Some(k);
        self
    }

    pub fn is_overall(&self) -> bool {
        self.user.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall_selection_means_no_user() {
        assert!(Scope::from_selection("Overall").is_overall());
        assert_eq!(Scope::from_selection("Alice").user.as_deref(), Some("Alice"));
        let s = Scope::user("Bob").with_sentiment(Sentiment::Negative);
        assert_eq!(s.sentiment, Some(Sentiment::Negative));
    }
}
