//! Aggregation Library: counts, time series, activity maps and rankings.
//!
//! Every function reads the dataset through a [`Scope`]; none of them mutate it.
//! An empty dataset or an unknown user yields zero counts and empty sequences.

use crate::counting::{count_by_key, percent, StableCounter};
use crate::dataset::Dataset;
use crate::date::{HourPeriod, YearMonth};
use crate::filters::is_media;
use crate::links::UrlExtractor;
use crate::query::Scope;
use crate::sentiment::Sentiment;
use serde::Serialize;
use time::macros::format_description;
use time::{Date, Weekday};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BasicStats {
    pub messages: u64,
    pub words: u64,
    pub media: u64,
    pub links: u64,
}

/// Message, word, media and link totals. Media lines still count toward words and messages.
pub fn fetch_stats(ds: &Dataset, scope: &Scope, urls: &dyn UrlExtractor) -> BasicStats {
    let mut s = BasicStats::default();
    for r in ds.select(scope) {
        s.messages += 1;
        s.words += r.message.split_whitespace().count() as u64;
        if is_media(r, ds.options()) {
            s.media += 1;
        }
        s.links += urls.find_urls(&r.message).len() as u64;
    }
    s
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserShare {
    pub name: String,
    pub percent: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ActiveUsers {
    pub top: Vec<(String, u64)>,
    pub shares: Vec<UserShare>,
}

/// Busiest users over the whole dataset: the top `n` by message count, and every
/// user's share of all messages. Only meaningful for the overall view.
pub fn most_active_users(ds: &Dataset, n: usize) -> ActiveUsers {
    let counts: StableCounter<&str> = ds.records().iter().map(|r| r.user.as_str()).collect();
    let total = ds.len() as u64;
    let all = counts.most_common(None);
    let shares = all.iter().map(|(u, c)| UserShare { name: u.to_string(), percent: percent(*c, total) }).collect();
    let top = all.into_iter().take(n).map(|(u, c)| (u.to_string(), c)).collect();
    ActiveUsers { top, shares }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    pub year: i32,
    pub month_num: u8,
    pub month: String,
    pub label: String,
    pub count: u64,
}

/// Messages per calendar month, oldest first; labels look like "January-2023".
pub fn monthly_timeline(ds: &Dataset, scope: &Scope) -> Vec<MonthlyPoint> {
    count_by_key(ds.select(scope), |r| r.year_month())
        .into_iter()
        .map(|(ym, count): (YearMonth, u64)| MonthlyPoint {
            year: ym.year,
            month_num: ym.month,
            month: ym.month_name().to_string(),
            label: ym.label(),
            count,
        })
        .collect()
}

/// Monthly timeline of records with sentiment `k`.
/// `inverted` filters on the negated label instead, matching historical output.
pub fn monthly_timeline_sentiment(ds: &Dataset, user: Option<&str>, k: Sentiment, inverted: bool) -> Vec<MonthlyPoint> {
    let k = if inverted { k.negated() } else { k };
    let scope = Scope { user: user.map(str::to_string), sentiment: Some(k) };
    monthly_timeline(ds, &scope)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    #[serde(serialize_with = "ser_date")]
    pub date: Date,
    pub count: u64,
}

fn ser_date<S: serde::Serializer>(d: &Date, s: S) -> Result<S::Ok, S::Error> {
    let fmt = format_description!("[year]-[month]-[day]");
    match d.format(&fmt) {
        Ok(v) => s.serialize_str(&v),
        Err(e) => Err(serde::ser::Error::custom(e)),
    }
}

/// Messages per calendar day, oldest first.
pub fn daily_timeline(ds: &Dataset, scope: &Scope) -> Vec<DailyPoint> {
    count_by_key(ds.select(scope), |r| r.only_date())
        .into_iter()
        .map(|(date, count)| DailyPoint { date, count })
        .collect()
}

/// Messages per weekday name, busiest first.
pub fn week_activity_map(ds: &Dataset, scope: &Scope) -> Vec<(String, u64)> {
    let c: StableCounter<&str> = ds.select(scope).map(|r| r.day_name()).collect();
    c.most_common(None).into_iter().map(|(d, n)| (d.to_string(), n)).collect()
}

/// Messages per month name (all years pooled), busiest first.
pub fn month_activity_map(ds: &Dataset, scope: &Scope) -> Vec<(String, u64)> {
    let c: StableCounter<&str> = ds.select(scope).map(|r| r.month_name()).collect();
    c.most_common(None).into_iter().map(|(m, n)| (m.to_string(), n)).collect()
}

/// Weekday x hour-period message counts. Rows are the weekdays present (Monday
/// first), columns the periods present (by hour); absent cells hold 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    pub days: Vec<String>,
    pub periods: Vec<HourPeriod>,
    pub counts: Vec<Vec<u64>>,
}

impl Heatmap {
    pub fn get(&self, day: &str, period: &str) -> Option<u64> {
        let row = self.days.iter().position(|d| d == day)?;
        let col = self.periods.iter().position(|p| p.to_string() == period)?;
        Some(self.counts[row][col])
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

pub fn activity_heatmap(ds: &Dataset, scope: &Scope) -> Heatmap {
    let cells = count_by_key(ds.select(scope), |r| {
        (r.datetime.weekday().number_days_from_monday(), r.hour_period())
    });
    let mut day_idx: Vec<u8> = cells.keys().map(|(d, _)| *d).collect();
    day_idx.dedup();
    let mut periods: Vec<HourPeriod> = cells.keys().map(|(_, p)| *p).collect();
    periods.sort();
    periods.dedup();

    let mut counts = vec![vec![0u64; periods.len()]; day_idx.len()];
    for ((d, p), n) in &cells {
        // Both lookups hit: rows and columns were built from these keys.
        if let (Ok(row), Ok(col)) = (day_idx.binary_search(d), periods.binary_search(p)) {
            counts[row][col] = *n;
        }
    }
    let days = day_idx.iter().map(|d| weekday_from_monday(*d).to_string()).collect();
    Heatmap { days, periods, counts }
}

fn weekday_from_monday(n: u8) -> &'static str {
    let mut d = Weekday::Monday;
    for _ in 0..n {
        d = d.next();
    }
    crate::date::weekday_name(d)
}

/// Each user's share of the records labelled `k`, largest first. Overall view only.
pub fn percentage_sentiment(ds: &Dataset, k: Sentiment) -> Vec<UserShare> {
    let counts: StableCounter<&str> = ds.select(&Scope::overall().with_sentiment(k)).map(|r| r.user.as_str()).collect();
    let total = counts.total();
    counts
        .most_common(None)
        .into_iter()
        .map(|(u, c)| UserShare { name: u.to_string(), percent: percent(c, total) })
        .collect()
}

/// Users with the most records labelled `k`, top `n`. Overall view only.
pub fn most_sentiment_users(ds: &Dataset, k: Sentiment, n: usize) -> Vec<(String, u64)> {
    let counts: StableCounter<&str> = ds.select(&Scope::overall().with_sentiment(k)).map(|r| r.user.as_str()).collect();
    counts.most_common(Some(n)).into_iter().map(|(u, c)| (u.to_string(), c)).collect()
}
