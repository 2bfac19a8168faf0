use crate::aggregate::{self, ActiveUsers, BasicStats, DailyPoint, Heatmap, MonthlyPoint, UserShare};
use crate::config::{AnalyzerOptions, ParseOptions};
use crate::dataset::{Dataset, IngestReport};
use crate::emoji::{EmojiTable, UnicodeEmojiTable};
use crate::links::{RegexUrlExtractor, UrlExtractor};
use crate::progress::make_count_progress;
use crate::query::Scope;
use crate::sentiment::{score_message, LexiconScorer, Sentiment, SentimentScorer, SentimentScores};
use crate::stopwords::{StopwordMode, StopwordSet};
use crate::util::{init_tracing_once, read_export};
use crate::vocab;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;

/// Entry point: configure once, then turn an export into a [`Session`].
#[derive(Clone)]
pub struct ChatAnalyzer {
    opts: AnalyzerOptions,
    stopwords: Option<StopwordSet>,
    scorer: Arc<dyn SentimentScorer>,
    urls: Arc<dyn UrlExtractor>,
    emoji: Arc<dyn EmojiTable>,
}

impl Default for ChatAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatAnalyzer {
    pub fn new() -> Self {
        Self {
            opts: AnalyzerOptions::default(),
            stopwords: None,
            scorer: Arc::new(LexiconScorer::default()),
            urls: Arc::new(RegexUrlExtractor::default()),
            emoji: Arc::new(UnicodeEmojiTable),
        }
    }

    // -------- Builder methods --------
    pub fn options(mut self, opts: AnalyzerOptions) -> Self { self.opts = opts; self }
    pub fn parse_options(mut self, parse: ParseOptions) -> Self { self.opts = self.opts.with_parse_options(parse); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn parallelism(mut self, threads: usize) -> Self { self.opts = self.opts.with_parallelism(threads); self }
    pub fn top_users(mut self, n: usize) -> Self { self.opts = self.opts.with_top_users(n); self }
    pub fn top_words(mut self, n: usize) -> Self { self.opts = self.opts.with_top_words(n); self }
    pub fn top_sentiment_users(mut self, n: usize) -> Self { self.opts = self.opts.with_top_sentiment_users(n); self }
    pub fn stopword_mode(mut self, mode: StopwordMode) -> Self { self.opts = self.opts.with_stopword_mode(mode); self }
    pub fn inverted_monthly_sentiment(mut self, yes: bool) -> Self { self.opts = self.opts.with_inverted_monthly_sentiment(yes); self }
    pub fn stopwords(mut self, set: StopwordSet) -> Self { self.stopwords = Some(set); self }
    pub fn scorer(mut self, scorer: impl SentimentScorer + 'static) -> Self { self.scorer = Arc::new(scorer); self }
    pub fn url_extractor(mut self, ex: impl UrlExtractor + 'static) -> Self { self.urls = Arc::new(ex); self }
    pub fn emoji_table(mut self, table: impl EmojiTable + 'static) -> Self { self.emoji = Arc::new(table); self }

    /// Load the stopword list from a newline-separated file.
    pub fn stopwords_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let set = StopwordSet::load(path.as_ref())?;
        Ok(self.stopwords(set))
    }

    // -------- Operations --------

    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<Session> {
        let path = path.as_ref();
        let bytes = read_export(path)?;
        self.analyze_bytes(&bytes).with_context(|| format!("analyzing {}", path.display()))
    }

    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<Session> {
        let text = std::str::from_utf8(bytes).map_err(crate::error::ChatError::from)?;
        self.analyze_str(text)
    }

    /// Parse, normalize and score `text`.
    pub fn analyze_str(&self, text: &str) -> Result<Session> {
        init_tracing_once();
        let (mut dataset, report) = Dataset::parse(text, &self.opts.parse).context("parsing chat export")?;
        tracing::info!(
            "parsed {} records from {} entries ({} malformed timestamps dropped)",
            report.records, report.entries, report.malformed
        );

        let scores = self.score_all(&dataset);
        dataset.apply_scores(scores);

        if self.opts.invert_monthly_sentiment {
            tracing::warn!("monthly sentiment timelines will filter on the negated sentiment");
        }

        let stopwords = self
            .stopwords
            .clone()
            .unwrap_or_else(|| StopwordSet::bundled().merge_from_env())
            .with_mode(self.opts.stopword_mode);

        Ok(Session {
            dataset,
            report,
            stopwords,
            urls: Arc::clone(&self.urls),
            emoji: Arc::clone(&self.emoji),
            opts: self.opts.clone(),
        })
    }

    /// One score per record, in record order.
    fn score_all(&self, dataset: &Dataset) -> Vec<SentimentScores> {
        let records = dataset.records();
        let pb = if self.opts.progress { Some(make_count_progress(records.len() as u64, "Scoring sentiment")) } else { None };
        let scorer: &dyn SentimentScorer = self.scorer.as_ref();

        let run = || -> Vec<SentimentScores> {
            records
                .par_iter()
                .map(|r| {
                    let s = score_message(scorer, &r.message);
                    if let Some(pb) = &pb { pb.inc(1); }
                    s
                })
                .collect()
        };

        let scores = match self.opts.parallelism {
            Some(n) => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
                Ok(pool) => pool.install(run),
                Err(e) => {
                    tracing::warn!("could not build a {}-thread pool ({}); using the global pool", n, e);
                    run()
                }
            },
            None => run(),
        };

        if let Some(pb) = pb { pb.finish_with_message("Scoring sentiment: done"); }
        scores
    }
}

/// One analysis session: the scored dataset plus the collaborators aggregates need.
pub struct Session {
    dataset: Dataset,
    report: IngestReport,
    stopwords: StopwordSet,
    urls: Arc<dyn UrlExtractor>,
    emoji: Arc<dyn EmojiTable>,
    opts: AnalyzerOptions,
}

impl Session {
    pub fn dataset(&self) -> &Dataset { &self.dataset }
    pub fn ingest_report(&self) -> &IngestReport { &self.report }
    pub fn stopwords(&self) -> &StopwordSet { &self.stopwords }
    pub fn users(&self) -> Vec<String> { self.dataset.users() }

    pub fn stats(&self, scope: &Scope) -> BasicStats {
        aggregate::fetch_stats(&self.dataset, scope, self.urls.as_ref())
    }
    pub fn most_active_users(&self) -> ActiveUsers {
        aggregate::most_active_users(&self.dataset, self.opts.top_users)
    }
    pub fn monthly_timeline(&self, scope: &Scope) -> Vec<MonthlyPoint> {
        aggregate::monthly_timeline(&self.dataset, scope)
    }
    /// Honors the session's monthly-inversion flag.
    pub fn monthly_timeline_sentiment(&self, user: Option<&str>, k: Sentiment) -> Vec<MonthlyPoint> {
        aggregate::monthly_timeline_sentiment(&self.dataset, user, k, self.opts.invert_monthly_sentiment)
    }
    pub fn daily_timeline(&self, scope: &Scope) -> Vec<DailyPoint> {
        aggregate::daily_timeline(&self.dataset, scope)
    }
    pub fn week_activity_map(&self, scope: &Scope) -> Vec<(String, u64)> {
        aggregate::week_activity_map(&self.dataset, scope)
    }
    pub fn month_activity_map(&self, scope: &Scope) -> Vec<(String, u64)> {
        aggregate::month_activity_map(&self.dataset, scope)
    }
    pub fn activity_heatmap(&self, scope: &Scope) -> Heatmap {
        aggregate::activity_heatmap(&self.dataset, scope)
    }
    pub fn percentage_sentiment(&self, k: Sentiment) -> Vec<UserShare> {
        aggregate::percentage_sentiment(&self.dataset, k)
    }
    pub fn most_sentiment_users(&self, k: Sentiment) -> Vec<(String, u64)> {
        aggregate::most_sentiment_users(&self.dataset, k, self.opts.top_sentiment_users)
    }
    pub fn most_common_words(&self, scope: &Scope) -> Vec<(String, u64)> {
        vocab::most_common_words(&self.dataset, scope, &self.stopwords, self.opts.top_words)
    }
    pub fn wordcloud_text(&self, scope: &Scope) -> String {
        vocab::wordcloud_text(&self.dataset, scope, &self.stopwords)
    }
    pub fn emoji_frequency(&self, scope: &Scope) -> Vec<(char, u64)> {
        vocab::emoji_frequency(&self.dataset, scope, self.emoji.as_ref())
    }
}
