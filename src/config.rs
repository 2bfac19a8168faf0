use crate::stopwords::StopwordMode;

/// Sentinel user for system lines (joins, leaves, subject changes).
pub const GROUP_NOTIFICATION: &str = "group_notification";

/// Exact message text the exporter writes in place of attachments.
pub const MEDIA_PLACEHOLDER: &str = "<Media omitted>\n";

/// Field order of the numeric date in a timestamp anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateOrder {
    DayMonthYear,
    MonthDayYear,
}

/// Line Parser and Record Normalizer settings.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    pub date_time_separator: String,  // between date and time, e.g. "01/01/23, 10:00"
    pub body_separators: Vec<String>, // between time and body, e.g. " - "
    pub date_orders: Vec<DateOrder>,  // tried in order; first valid calendar date wins
    pub notification_user: String,
    pub system_phrases: Vec<String>,  // a name prefix containing one of these is a notification
    pub media_placeholder: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        let phrases = [
            "joined using this group's invite link",
            "changed the subject",
            "changed the group name",
            "changed the group settings",
            "changed this group's settings",
            "pinned a message",
            "turned on disappearing messages",
            "turned off disappearing messages",
            "changed this group's icon",
            "changed the group description",
            "deleted this group's icon",
            "changed their phone number",
            "created group",
            " added ",
            " removed ",
            " left",
            "Messages and calls are end-to-end encrypted",
        ];
        Self {
            date_time_separator: ",".to_string(),
            body_separators: vec!["-".to_string(), "\u{2013}".to_string(), "\u{2014}".to_string()],
            date_orders: vec![DateOrder::DayMonthYear],
            notification_user: GROUP_NOTIFICATION.to_string(),
            system_phrases: phrases.iter().map(|s| s.to_string()).collect(),
            media_placeholder: MEDIA_PLACEHOLDER.to_string(),
        }
    }
}

impl ParseOptions {
    pub fn with_date_time_separator(mut self, sep: impl Into<String>) -> Self {
        self.date_time_separator = sep.into();
        self
    }
    pub fn with_body_separators<I, S>(mut self, seps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body_separators = seps.into_iter().map(Into::into).filter(|s: &String| !s.is_empty()).collect();
        self
    }
    pub fn with_date_orders(mut self, orders: impl IntoIterator<Item = DateOrder>) -> Self {
        let mut v: Vec<DateOrder> = Vec::new();
        for o in orders {
            if !v.contains(&o) { v.push(o); }
        }
        if !v.is_empty() { self.date_orders = v; }
        self
    }
    pub fn with_system_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.system_phrases = phrases.into_iter().map(Into::into).collect();
        self
    }
    pub fn with_media_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.media_placeholder = placeholder.into();
        self
    }
}

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct AnalyzerOptions {
    pub parse: ParseOptions,
    pub progress: bool,             // show progress bar over the scoring pass
    pub parallelism: Option<usize>, // Some(N) to score on N rayon threads, None to use default
    pub top_users: usize,
    pub top_words: usize,
    pub top_sentiment_users: usize,
    pub stopword_mode: StopwordMode,

    // Reproduce the historical monthly-by-sentiment output, which filtered on the negated label.
    pub invert_monthly_sentiment: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            progress: true,
            parallelism: None,
            top_users: 5,
            top_words: 20,
            top_sentiment_users: 10,
            stopword_mode: StopwordMode::Exact,
            invert_monthly_sentiment: false,
        }
    }
}

impl AnalyzerOptions {
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads.max(1));
        self
    }
    pub fn with_top_users(mut self, n: usize) -> Self {
        self.top_users = n;
        self
    }
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }
    pub fn with_top_sentiment_users(mut self, n: usize) -> Self {
        self.top_sentiment_users = n;
        self
    }
    pub fn with_stopword_mode(mut self, mode: StopwordMode) -> Self {
        self.stopword_mode = mode;
        self
    }
    pub fn with_inverted_monthly_sentiment(mut self, yes: bool) -> Self {
        self.invert_monthly_sentiment = yes;
        self
    }
}
