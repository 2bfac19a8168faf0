//! One-shot bundle of every aggregate for a scope, serialized for the presentation layer.

use crate::aggregate::{ActiveUsers, BasicStats, DailyPoint, Heatmap, MonthlyPoint, UserShare};
use crate::dataset::IngestReport;
use crate::pipeline::Session;
use crate::query::Scope;
use crate::sentiment::Sentiment;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub user: Option<String>,
    pub ingest: IngestReport,
    pub users: Vec<String>,
    pub stats: BasicStats,
    pub monthly_timeline: Vec<MonthlyPoint>,
    pub daily_timeline: Vec<DailyPoint>,
    pub busy_days: Vec<(String, u64)>,
    pub busy_months: Vec<(String, u64)>,
    pub heatmap: Heatmap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_active_users: Option<ActiveUsers>,
    pub common_words: Vec<(String, u64)>,
    pub emojis: Vec<(char, u64)>,
    pub sentiment: Vec<SentimentSection>,
}

/// The per-sentiment half of the report.
#[derive(Debug, Serialize)]
pub struct SentimentSection {
    pub sentiment: Sentiment,
    pub messages: u64,
    pub busy_months: Vec<(String, u64)>,
    pub busy_days: Vec<(String, u64)>,
    pub heatmap: Heatmap,
    pub daily_timeline: Vec<DailyPoint>,
    pub monthly_timeline: Vec<MonthlyPoint>,
    pub common_words: Vec<(String, u64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contribution: Option<Vec<UserShare>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_users: Option<Vec<(String, u64)>>,
}

impl Session {
    /// Every aggregate for `scope` (its sentiment filter is ignored; each sentiment gets a section).
    /// User rankings and contribution tables are only filled for the overall view.
    pub fn report(&self, scope: &Scope) -> AnalysisReport {
        let base = Scope { user: scope.user.clone(), sentiment: None };
        let overall = base.is_overall();
        let sentiment = Sentiment::ALL
            .iter()
            .map(|&k| {
                let sc = base.clone().with_sentiment(k);
                SentimentSection {
                    sentiment: k,
                    messages: self.dataset().select(&sc).count() as u64,
                    busy_months: self.month_activity_map(&sc),
                    busy_days: self.week_activity_map(&sc),
                    heatmap: self.activity_heatmap(&sc),
                    daily_timeline: self.daily_timeline(&sc),
                    monthly_timeline: self.monthly_timeline_sentiment(base.user.as_deref(), k),
                    common_words: self.most_common_words(&sc),
                    contribution: overall.then(|| self.percentage_sentiment(k)),
                    top_users: overall.then(|| self.most_sentiment_users(k)),
                }
            })
            .collect();

        AnalysisReport {
            user: base.user.clone(),
            ingest: self.ingest_report().clone(),
            users: self.users(),
            stats: self.stats(&base),
            monthly_timeline: self.monthly_timeline(&base),
            daily_timeline: self.daily_timeline(&base),
            busy_days: self.week_activity_map(&base),
            busy_months: self.month_activity_map(&base),
            heatmap: self.activity_heatmap(&base),
            most_active_users: overall.then(|| self.most_active_users()),
            common_words: self.most_common_words(&base),
            emojis: self.emoji_frequency(&base),
            sentiment,
        }
    }
}
