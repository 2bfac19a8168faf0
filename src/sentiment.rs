//! Sentiment Classifier: per-message scores from a pluggable scorer, reduced to a ternary label.

use ahash::AHashMap;
use serde::Serialize;
use std::fmt;

/// Ternary sentiment label. `value()` gives the historical 1 / 0 / -1 encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn value(self) -> i8 {
        match self {
            Sentiment::Positive => 1,
            Sentiment::Neutral => 0,
            Sentiment::Negative => -1,
        }
    }

    /// Sign flip: Positive <-> Negative, Neutral unchanged.
    pub fn negated(self) -> Self {
        match self {
            Sentiment::Positive => Sentiment::Negative,
            Sentiment::Neutral => Sentiment::Neutral,
            Sentiment::Negative => Sentiment::Positive,
        }
    }

    /// Priority order: positive, then negative, then neutral.
    /// `pos == neg >= neu` is Positive; this tie-break is fixed for output compatibility.
    pub fn classify(s: &SentimentScores) -> Self {
        if s.pos >= s.neg && s.pos >= s.neu {
            Sentiment::Positive
        } else if s.neg >= s.pos && s.neg >= s.neu {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        };
        f.write_str(s)
    }
}

/// Scores in [0, 1] summing to 1.0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SentimentScores {
    pub pos: f64,
    pub neg: f64,
    pub neu: f64,
}

impl SentimentScores {
    pub fn new(pos: f64, neg: f64, neu: f64) -> Self {
        Self { pos, neg, neu }
    }

    pub fn neutral() -> Self {
        Self { pos: 0.0, neg: 0.0, neu: 1.0 }
    }

    /// Rescale to sum to 1.0; `None` for negative, non-finite or all-zero input.
    fn normalized(self) -> Option<Self> {
        let parts = [self.pos, self.neg, self.neu];
        if parts.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return None;
        }
        let total: f64 = parts.iter().sum();
        if total <= 0.0 {
            return None;
        }
        Some(Self { pos: self.pos / total, neg: self.neg / total, neu: self.neu / total })
    }
}

/// Black-box lexicon scorer. Implementations must be pure: same text, same scores.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> SentimentScores;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> SentimentScores + Send + Sync,
{
    fn score(&self, text: &str) -> SentimentScores {
        self(text)
    }
}

/// Total wrapper around a scorer: blank text and unusable scorer output both become neutral.
pub fn score_message(scorer: &dyn SentimentScorer, text: &str) -> SentimentScores {
    if text.trim().is_empty() {
        return SentimentScores::neutral();
    }
    let raw = scorer.score(text);
    raw.normalized().unwrap_or_else(|| {
        tracing::warn!("scorer returned unusable scores {:?}; treating message as neutral", raw);
        SentimentScores::neutral()
    })
}

// ----------------------------- Lexicon scorer ------------------------------------

const NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "nobody", "none", "neither", "nor", "cannot", "cant", "can't",
    "dont", "don't", "doesn't", "didn't", "isn't", "wasn't", "aren't", "won't", "wouldn't",
    "shouldn't", "couldn't", "nahi", "nahin", "mat",
];

const NEGATION_SCALAR: f64 = -0.74;

const DEFAULT_LEXICON: &[(&str, f64)] = &[
    ("love", 3.2), ("loved", 2.9), ("lovely", 2.8), ("like", 2.0), ("liked", 1.8),
    ("good", 1.9), ("great", 3.1), ("awesome", 3.1), ("amazing", 2.8), ("excellent", 2.7),
    ("nice", 1.8), ("happy", 2.7), ("glad", 2.0), ("fun", 2.3), ("funny", 1.9),
    ("best", 3.2), ("better", 1.9), ("wonderful", 2.7), ("beautiful", 2.9), ("cool", 1.3),
    ("thanks", 1.9), ("thank", 1.5), ("welcome", 2.0), ("congrats", 2.4), ("congratulations", 2.9),
    ("yay", 2.4), ("haha", 1.6), ("hahaha", 1.8), ("lol", 1.8), ("lmao", 2.0),
    ("perfect", 2.7), ("super", 2.9), ("sweet", 2.0), ("enjoy", 2.2), ("enjoyed", 2.3),
    ("win", 2.8), ("won", 2.7), ("yes", 1.7), ("ok", 0.9), ("okay", 0.9),
    ("sure", 1.3), ("hope", 1.9), ("excited", 1.4), ("proud", 2.1), ("wow", 2.8),
    ("badhiya", 2.0), ("accha", 1.5), ("acha", 1.5), ("mast", 2.0), ("shukriya", 2.0),
    (":)", 2.0), (":-)", 2.2), (":d", 2.9), ("<3", 1.9), (";)", 0.9),
    ("bad", -2.5), ("worse", -2.1), ("worst", -3.1), ("hate", -2.7), ("hated", -3.2),
    ("sad", -2.1), ("angry", -2.3), ("awful", -2.0), ("terrible", -2.1), ("horrible", -2.5),
    ("sorry", -0.3), ("sick", -1.7), ("tired", -1.9), ("boring", -1.3), ("annoying", -1.7),
    ("stupid", -2.4), ("idiot", -2.3), ("fail", -2.5), ("failed", -2.3), ("lost", -1.3),
    ("problem", -1.7), ("wrong", -2.1), ("hurt", -2.4), ("cry", -2.1), ("crying", -2.1),
    ("miss", -0.6), ("ugly", -2.3), ("pathetic", -2.6), ("useless", -1.8), ("damn", -1.7),
    ("bekar", -2.0), ("bakwas", -2.2), ("ganda", -1.8),
    (":(", -1.9), (":-(", -1.5), (":'(", -2.2),
];

/// Small valence-lexicon scorer in the VADER style: each matched token adds its
/// valence (+/- 1) to the positive or negative sum, unmatched tokens count as
/// neutral, a negator in the preceding three tokens flips and damps the valence.
#[derive(Clone, Debug)]
pub struct LexiconScorer {
    lexicon: AHashMap<String, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::with_lexicon(DEFAULT_LEXICON.iter().map(|(w, v)| (w.to_string(), *v)))
    }
}

impl LexiconScorer {
    pub fn with_lexicon<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let lexicon = entries.into_iter().map(|(w, v)| (w.as_ref().to_lowercase(), v)).collect();
        Self { lexicon }
    }

    fn valence(&self, token: &str) -> Option<f64> {
        if let Some(v) = self.lexicon.get(token) {
            return Some(*v);
        }
        let bare = token.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');
        self.lexicon.get(bare).copied()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> SentimentScores {
        let tokens: Vec<String> = text.split_whitespace().map(|t| t.to_lowercase()).collect();
        let (mut pos_sum, mut neg_sum, mut neu_count) = (0.0f64, 0.0f64, 0.0f64);
        for (i, tok) in tokens.iter().enumerate() {
            let Some(mut v) = self.valence(tok) else {
                neu_count += 1.0;
                continue;
            };
            let window = &tokens[i.saturating_sub(3)..i];
            if window.iter().any(|w| NEGATORS.contains(&w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))) {
                v *= NEGATION_SCALAR;
            }
            if v > 0.0 {
                pos_sum += v + 1.0;
            } else if v < 0.0 {
                neg_sum += -v + 1.0;
            } else {
                neu_count += 1.0;
            }
        }
        let total = pos_sum + neg_sum + neu_count;
        if total == 0.0 {
            return SentimentScores::neutral();
        }
        SentimentScores::new(pos_sum / total, neg_sum / total, neu_count / total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(pos: f64, neg: f64, neu: f64) -> impl Fn(&str) -> SentimentScores {
        move |_| SentimentScores::new(pos, neg, neu)
    }

    #[test]
    fn classify_follows_priority_order() {
        assert_eq!(Sentiment::classify(&SentimentScores::new(0.6, 0.0, 0.4)), Sentiment::Positive);
        assert_eq!(Sentiment::classify(&SentimentScores::new(0.4, 0.4, 0.2)), Sentiment::Positive);
        assert_eq!(Sentiment::classify(&SentimentScores::new(0.1, 0.5, 0.4)), Sentiment::Negative);
        assert_eq!(Sentiment::classify(&SentimentScores::new(0.0, 0.0, 1.0)), Sentiment::Neutral);
        assert_eq!(Sentiment::classify(&SentimentScores::new(0.2, 0.4, 0.4)), Sentiment::Negative);
        assert_eq!(Sentiment::classify(&SentimentScores::new(0.3, 0.3, 0.4)), Sentiment::Neutral);
    }

    #[test]
    fn blank_text_and_bad_output_are_neutral() {
        let s = score_message(&fixed(0.9, 0.1, 0.0), "   \n");
        assert_eq!(s, SentimentScores::neutral());
        let s = score_message(&fixed(f64::NAN, 0.0, 0.0), "hello");
        assert_eq!(s, SentimentScores::neutral());
        let s = score_message(&fixed(0.0, 0.0, 0.0), "hello");
        assert_eq!(s, SentimentScores::neutral());
    }

    #[test]
    fn scores_are_rescaled_to_one() {
        let s = score_message(&fixed(2.0, 1.0, 1.0), "hello");
        assert!((s.pos + s.neg + s.neu - 1.0).abs() < 1e-9);
        assert!((s.pos - 0.5).abs() < 1e-9);
    }

    #[test]
    fn lexicon_scorer_polarity() {
        let sc = LexiconScorer::default();
        let s = sc.score("I love this!!! :)");
        assert!((s.pos + s.neg + s.neu - 1.0).abs() < 1e-9);
        assert_eq!(Sentiment::classify(&s), Sentiment::Positive);

        let s = sc.score("worst day ever, I hate it");
        assert_eq!(Sentiment::classify(&s), Sentiment::Negative);

        let s = sc.score("meeting moved to the third floor room");
        assert_eq!(Sentiment::classify(&s), Sentiment::Neutral);
    }

    #[test]
    fn negation_flips_valence() {
        let sc = LexiconScorer::default();
        let s = sc.score("not good");
        assert!(s.neg > 0.0);
        assert_eq!(s.pos, 0.0);
    }

    #[test]
    fn negated_sign() {
        assert_eq!(Sentiment::Positive.negated(), Sentiment::Negative);
        assert_eq!(Sentiment::Neutral.negated(), Sentiment::Neutral);
        assert_eq!(Sentiment::Negative.value(), -1);
    }
}
