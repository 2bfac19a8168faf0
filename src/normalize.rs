//! Record Normalizer: turn a parsed [`Entry`] into a structured [`Record`].

use crate::config::{DateOrder, ParseOptions};
use crate::date::{month_name, weekday_name, HourPeriod, YearMonth};
use crate::error::{ChatError, ChatResult};
use crate::parser::Entry;
use crate::sentiment::{Sentiment, SentimentScores};
use serde::Serialize;
use time::macros::format_description;
use time::{Date, Month, PrimitiveDateTime, Time};

/// One normalized chat line. Everything except the sentiment fields is fixed at creation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record {
    #[serde(serialize_with = "ser_datetime")]
    pub datetime: PrimitiveDateTime,
    pub user: String,
    pub message: String,
    pub scores: SentimentScores,
    pub sentiment: Sentiment,
}

impl Record {
    pub fn year(&self) -> i32 { self.datetime.year() }
    pub fn month_num(&self) -> u8 { u8::from(self.datetime.month()) }
    pub fn month_name(&self) -> &'static str { month_name(self.datetime.month()) }
    pub fn day(&self) -> u8 { self.datetime.day() }
    pub fn day_name(&self) -> &'static str { weekday_name(self.datetime.weekday()) }
    pub fn only_date(&self) -> Date { self.datetime.date() }
    pub fn hour_period(&self) -> HourPeriod { HourPeriod::new(self.datetime.hour()) }
    pub fn year_month(&self) -> YearMonth { YearMonth::new(self.year(), self.month_num()) }

    /// True for system lines carrying the notification sentinel.
    pub fn is_notification(&self, opts: &ParseOptions) -> bool {
        self.user == opts.notification_user
    }

    pub(crate) fn set_sentiment(&mut self, scores: SentimentScores) {
        self.sentiment = Sentiment::classify(&scores);
        self.scores = scores;
    }
}

fn ser_datetime<S: serde::Serializer>(dt: &PrimitiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]");
    match dt.format(&fmt) {
        Ok(v) => s.serialize_str(&v),
        Err(e) => Err(serde::ser::Error::custom(e)),
    }
}

/// Normalize one entry. Sentiment starts out neutral until the scoring pass runs.
pub fn normalize_entry(entry: &Entry<'_>, opts: &ParseOptions) -> ChatResult<Record> {
    let datetime = parse_timestamp(entry.date, entry.time, &opts.date_orders)
        .ok_or_else(|| ChatError::MalformedTimestamp { raw: entry.raw_timestamp() })?;
    let (user, message) = split_author(entry.body, opts);
    let scores = SentimentScores::neutral();
    Ok(Record { datetime, user, message, sentiment: Sentiment::classify(&scores), scores })
}

/// Split "Name: text" into (name, text); anything else is a notification with the whole body.
fn split_author(body: &str, opts: &ParseOptions) -> (String, String) {
    if let Some(idx) = body.find(": ") {
        let name = &body[..idx];
        if looks_like_name(name, opts) {
            return (name.trim().to_string(), body[idx + 2..].to_string());
        }
    }
    (opts.notification_user.clone(), body.to_string())
}

fn looks_like_name(name: &str, opts: &ParseOptions) -> bool {
    let trimmed = name.trim();
    // Quoted text before the colon is a group name or subject, never a contact.
    if trimmed.is_empty() || name.contains('\n') || name.contains('"') {
        return false;
    }
    !opts.system_phrases.iter().any(|p| name.contains(p.as_str()))
}

fn parse_timestamp(date: &str, time: &str, orders: &[DateOrder]) -> Option<PrimitiveDateTime> {
    let t = parse_clock(time)?;
    let mut parts = date.split('/').map(|p| p.parse::<u32>().ok());
    let (a, b, y) = (parts.next()??, parts.next()??, parts.next()??);
    if parts.next().is_some() {
        return None;
    }
    let year = if y < 100 { 2000 + y as i32 } else { y as i32 };
    orders.iter().find_map(|order| {
        let (day, month) = match order {
            DateOrder::DayMonthYear => (a, b),
            DateOrder::MonthDayYear => (b, a),
        };
        let month = Month::try_from(u8::try_from(month).ok()?).ok()?;
        let d = Date::from_calendar_date(year, month, u8::try_from(day).ok()?).ok()?;
        Some(PrimitiveDateTime::new(d, t))
    })
}

/// "H:MM" on a 24h clock, or "h:MM am/pm" on a 12h clock.
fn parse_clock(raw: &str) -> Option<Time> {
    let s = raw.trim();
    let lower = s.to_ascii_lowercase();
    let (clock, meridiem) = if let Some(rest) = lower.strip_suffix("am") {
        (rest.trim_end_matches(|c: char| c.is_whitespace()), Some(false))
    } else if let Some(rest) = lower.strip_suffix("pm") {
        (rest.trim_end_matches(|c: char| c.is_whitespace()), Some(true))
    } else {
        (lower.as_str(), None)
    };
    let (h, m) = clock.split_once(':')?;
    let mut hour: u8 = h.parse().ok()?;
    let minute: u8 = m.parse().ok()?;
    if let Some(pm) = meridiem {
        if !(1..=12).contains(&hour) {
            return None;
        }
        hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
    }
    Time::from_hms(hour, minute, 0).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn entry<'a>(date: &'a str, time: &'a str, body: &'a str) -> Entry<'a> {
        Entry { date, time, body }
    }

    #[test]
    fn authored_line_keeps_trailing_newline() {
        let opts = ParseOptions::default();
        let r = normalize_entry(&entry("01/01/23", "10:00", "Alice: Good morning!\n"), &opts).unwrap();
        assert_eq!(r.user, "Alice");
        assert_eq!(r.message, "Good morning!\n");
        assert_eq!(r.datetime, datetime!(2023-01-01 10:00));
        assert_eq!(r.only_date(), date!(2023 - 01 - 01));
        assert_eq!(r.day_name(), "Sunday");
        assert_eq!(r.month_name(), "January");
        assert_eq!(r.hour_period().to_string(), "10-11");
    }

    #[test]
    fn lines_without_separator_are_notifications() {
        let opts = ParseOptions::default();
        let r = normalize_entry(&entry("01/01/23", "10:00", "Alice joined using this group's invite link\n"), &opts).unwrap();
        assert_eq!(r.user, "group_notification");
        assert!(r.is_notification(&opts));
        assert_eq!(r.message, "Alice joined using this group's invite link\n");
    }

    #[test]
    fn system_phrasing_with_colon_is_still_a_notification() {
        let opts = ParseOptions::default();
        let body = "Alice changed the subject from \"a\" to \"Trip: Goa\"\n";
        let r = normalize_entry(&entry("01/01/23", "10:00", body), &opts).unwrap();
        assert_eq!(r.user, "group_notification");
        assert_eq!(r.message, body);
    }

    #[test]
    fn group_rename_with_colon_is_a_notification() {
        let opts = ParseOptions::default();
        let body = "Alice changed the group name from \"Trip\" to \"Goa: 2023\"\n";
        let r = normalize_entry(&entry("01/01/23", "10:00", body), &opts).unwrap();
        assert_eq!(r.user, "group_notification");
        assert!(r.is_notification(&opts));
        assert_eq!(r.message, body);

        // Unlisted phrasing is still caught by the quote in the prefix.
        let body = "Alice renamed the chat to \"Plans: v2\"\n";
        let r = normalize_entry(&entry("01/01/23", "10:00", body), &opts).unwrap();
        assert_eq!(r.user, "group_notification");

        let r = normalize_entry(&entry("01/01/23", "10:00", "Alice pinned a message: see above\n"), &opts).unwrap();
        assert_eq!(r.user, "group_notification");
    }

    #[test]
    fn twelve_hour_clock_and_four_digit_year() {
        let opts = ParseOptions::default();
        let r = normalize_entry(&entry("3/4/2022", "11:30 PM", "Bob: late\n"), &opts).unwrap();
        assert_eq!(r.datetime, datetime!(2022-04-03 23:30));
        assert_eq!(r.hour_period().to_string(), "23-0");
        let r = normalize_entry(&entry("3/4/2022", "12:05\u{202f}am", "Bob: early\n"), &opts).unwrap();
        assert_eq!(r.datetime, datetime!(2022-04-03 00:05));
        assert_eq!(r.hour_period().to_string(), "0-1");
    }

    #[test]
    fn impossible_dates_are_malformed() {
        let opts = ParseOptions::default();
        let err = normalize_entry(&entry("12/31/23", "10:00", "Alice: hi\n"), &opts).unwrap_err();
        assert!(matches!(err, ChatError::MalformedTimestamp { .. }));
        assert!(normalize_entry(&entry("01/01/23", "25:00", "Alice: hi\n"), &opts).is_err());
    }

    #[test]
    fn month_first_fallback_when_configured() {
        let opts = ParseOptions::default().with_date_orders([DateOrder::DayMonthYear, DateOrder::MonthDayYear]);
        let r = normalize_entry(&entry("12/31/23", "10:00", "Alice: hi\n"), &opts).unwrap();
        assert_eq!(r.only_date(), date!(2023 - 12 - 31));
    }
}
