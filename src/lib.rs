mod config;
mod error;
mod date;

mod parser;
mod normalize;
mod sentiment;
mod dataset;

mod query;
mod filters;
mod counting;
mod stopwords;
mod links;
mod emoji;
mod aggregate;
mod vocab;

mod progress;
mod util;
mod pipeline;
mod report;

pub use crate::config::{AnalyzerOptions, DateOrder, ParseOptions, GROUP_NOTIFICATION, MEDIA_PLACEHOLDER};
pub use crate::error::{ChatError, ChatResult};
pub use crate::date::{HourPeriod, YearMonth};

// Parse layer: raw text -> entries -> records.
pub use crate::parser::{Entries, Entry, LineParser};
pub use crate::normalize::{normalize_entry, Record};
pub use crate::dataset::{Dataset, IngestReport};

pub use crate::sentiment::{score_message, LexiconScorer, Sentiment, SentimentScorer, SentimentScores};
pub use crate::query::Scope;

// Aggregation library, usable directly over a Dataset.
pub use crate::aggregate::{
    activity_heatmap, daily_timeline, fetch_stats, month_activity_map, monthly_timeline,
    monthly_timeline_sentiment, most_active_users, most_sentiment_users, percentage_sentiment,
    week_activity_map, ActiveUsers, BasicStats, DailyPoint, Heatmap, MonthlyPoint, UserShare,
};
pub use crate::vocab::{emoji_frequency, most_common_words, wordcloud_text};
pub use crate::stopwords::{StopwordMode, StopwordSet};

// External collaborators and their default implementations.
pub use crate::links::{RegexUrlExtractor, UrlExtractor};
pub use crate::emoji::{EmojiTable, UnicodeEmojiTable};

pub use crate::pipeline::{ChatAnalyzer, Session};
pub use crate::report::{AnalysisReport, SentimentSection};
pub use crate::util::init_tracing_once;
