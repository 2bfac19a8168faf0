//! Dataset: the ordered, in-memory table of records for one analysis session.

use crate::config::ParseOptions;
use crate::error::{ChatError, ChatResult};
use crate::filters::matches_scope;
use crate::normalize::{normalize_entry, Record};
use crate::parser::LineParser;
use crate::query::Scope;
use crate::sentiment::SentimentScores;
use serde::Serialize;

/// How many malformed timestamps are kept verbatim in the report.
const MALFORMED_SAMPLE_LIMIT: usize = 10;

/// Outcome of turning raw text into records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub entries: usize,
    pub records: usize,
    pub malformed: usize,
    pub malformed_samples: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct Dataset {
    records: Vec<Record>,
    opts: ParseOptions,
}

impl Dataset {
    /// Parse and normalize `text`. Entries whose timestamp matches no configured
    /// date order are dropped and counted; nothing else fails per line.
    pub fn parse(text: &str, opts: &ParseOptions) -> ChatResult<(Self, IngestReport)> {
        let parser = LineParser::new(opts)?;
        let mut report = IngestReport::default();
        let mut records = Vec::new();
        for entry in parser.entries(text) {
            report.entries += 1;
            match normalize_entry(&entry, opts) {
                Ok(r) => records.push(r),
                Err(ChatError::MalformedTimestamp { raw }) => {
                    tracing::warn!("dropping entry with malformed timestamp {:?}", raw);
                    report.malformed += 1;
                    if report.malformed_samples.len() < MALFORMED_SAMPLE_LIMIT {
                        report.malformed_samples.push(raw);
                    }
                }
                Err(e) => return Err(e),
            }
        }
        report.records = records.len();
        Ok((Self { records, opts: opts.clone() }, report))
    }

    pub fn from_records(records: Vec<Record>, opts: ParseOptions) -> Self {
        Self { records, opts }
    }

    /// Single pass that attaches sentiment; `scores` is aligned with `records()`.
    pub(crate) fn apply_scores(&mut self, scores: Vec<SentimentScores>) {
        debug_assert_eq!(scores.len(), self.records.len());
        for (r, s) in self.records.iter_mut().zip(scores) {
            r.set_sentiment(s);
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn options(&self) -> &ParseOptions {
        &self.opts
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records inside `scope`, in original order.
    pub fn select<'a: 's, 's>(&'a self, scope: &'s Scope) -> impl Iterator<Item = &'a Record> + 's {
        self.records.iter().filter(move |r| matches_scope(r, scope))
    }

    /// Distinct users in sorted order, the notification sentinel included.
    pub fn users(&self) -> Vec<String> {
        let mut v: Vec<String> = self.records.iter().map(|r| r.user.clone()).collect();
        v.sort();
        v.dedup();
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_entries_are_counted_not_fatal() {
        let text = "01/01/23, 10:00 - Alice: hi\n31/31/23, 10:00 - Bob: bad date\n02/01/23, 09:00 - Bob: ok\n";
        let (ds, report) = Dataset::parse(text, &ParseOptions::default()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(report.entries, 3);
        assert_eq!(report.records, 2);
        assert_eq!(report.malformed, 1);
        assert_eq!(report.malformed_samples, ["31/31/23 10:00"]);
    }

    #[test]
    fn users_are_sorted_and_distinct() {
        let text = "01/01/23, 10:00 - Zed: a\n01/01/23, 10:01 - Amy: b\n01/01/23, 10:02 - Zed: c\n";
        let (ds, _) = Dataset::parse(text, &ParseOptions::default()).unwrap();
        assert_eq!(ds.users(), ["Amy", "Zed"]);
        assert_eq!(ds.records()[0].user, "Zed");
    }
}
