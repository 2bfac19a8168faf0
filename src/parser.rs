//! Line Parser: split a raw export into timestamp-anchored entries.
//!
//! Anchoring rule: a timestamp only starts a new entry when it sits at the very
//! beginning of a physical line and is immediately followed by one of the
//! configured body separators. Timestamp-looking text anywhere else (mid-line,
//! or at a line start without the separator) stays part of the previous body,
//! which is how pasted multi-line messages survive intact.

use crate::config::ParseOptions;
use crate::error::ChatResult;
use regex::{CaptureLocations, Regex};

/// Raw timestamp + body pair. `body` keeps embedded and trailing newlines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub body: &'a str,
}

impl Entry<'_> {
    /// The timestamp as it appeared, for error reporting.
    pub fn raw_timestamp(&self) -> String {
        format!("{} {}", self.date, self.time)
    }
}

/// Compiled anchor pattern for one set of [`ParseOptions`].
#[derive(Clone, Debug)]
pub struct LineParser {
    anchor: Regex,
}

impl LineParser {
    pub fn new(opts: &ParseOptions) -> ChatResult<Self> {
        Ok(Self { anchor: Regex::new(&anchor_pattern(opts))? })
    }

    /// Lazily yields entries in order of appearance. Text before the first anchor is skipped.
    pub fn entries<'p, 't>(&'p self, text: &'t str) -> Entries<'p, 't> {
        Entries { re: &self.anchor, text, pos: 0, started: false, pending: None, locs: self.anchor.capture_locations() }
    }
}

fn anchor_pattern(opts: &ParseOptions) -> String {
    let seps = if opts.body_separators.is_empty() {
        "-".to_string()
    } else {
        opts.body_separators.iter().map(|s| regex::escape(s)).collect::<Vec<_>>().join("|")
    };
    // `h` is horizontal whitespace only, so an anchor never spans two lines.
    format!(
        r"(?m)^(?P<date>\d{{1,2}}/\d{{1,2}}/(?:\d{{4}}|\d{{2}})){dt}{h}*(?P<time>\d{{1,2}}:\d{{2}}(?:{h}?[AaPp][Mm])?){h}+(?:{seps}){h}",
        dt = regex::escape(&opts.date_time_separator),
        h = r"[^\S\r\n]",
        seps = seps,
    )
}

/// Iterator over [`Entry`] values; see [`LineParser::entries`].
pub struct Entries<'p, 't> {
    re: &'p Regex,
    text: &'t str,
    pos: usize,
    started: bool,
    pending: Option<Anchor>,
    locs: CaptureLocations,
}

#[derive(Clone, Copy)]
struct Anchor {
    date: (usize, usize),
    time: (usize, usize),
    end: usize,
}

impl<'p, 't> Entries<'p, 't> {
    fn next_anchor(&mut self) -> Option<(usize, Anchor)> {
        let m = self.re.captures_read_at(&mut self.locs, self.text, self.pos)?;
        let date = self.locs.get(1)?;
        let time = self.locs.get(2)?;
        self.pos = m.end();
        Some((m.start(), Anchor { date, time, end: m.end() }))
    }
}

impl<'p, 't> Iterator for Entries<'p, 't> {
    type Item = Entry<'t>;

    fn next(&mut self) -> Option<Entry<'t>> {
        let current = match self.pending.take() {
            Some(a) => a,
            None => {
                if self.started { return None; }
                self.started = true;
                let (start, a) = self.next_anchor()?;
                if start > 0 {
                    tracing::debug!("skipping {} bytes of text before the first timestamp", start);
                }
                a
            }
        };
        let body_end = match self.next_anchor() {
            Some((start, next)) => {
                self.pending = Some(next);
                start
            }
            None => self.text.len(),
        };
        let t = self.text;
        Some(Entry {
            date: &t[current.date.0..current.date.1],
            time: &t[current.time.0..current.time.1],
            body: &t[current.end..body_end],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<Entry<'_>> {
        let p = LineParser::new(&ParseOptions::default()).unwrap();
        p.entries(text).collect::<Vec<_>>()
    }

    #[test]
    fn splits_on_line_start_anchors() {
        let text = "01/01/23, 10:00 - Alice: Good morning!\n01/01/23, 10:05 - Bob: <Media omitted>\n";
        let v = parse(text);
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].date, "01/01/23");
        assert_eq!(v[0].time, "10:00");
        assert_eq!(v[0].body, "Alice: Good morning!\n");
        assert_eq!(v[1].body, "Bob: <Media omitted>\n");
    }

    #[test]
    fn multi_line_bodies_run_until_next_anchor() {
        let text = "1/2/2023, 9:15 pm - Alice: line one\nline two\n\nline four\n1/2/2023, 9:16 pm - Bob: ok\n";
        let v = parse(text);
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].time, "9:15 pm");
        assert_eq!(v[0].body, "Alice: line one\nline two\n\nline four\n");
    }

    #[test]
    fn embedded_timestamps_are_not_anchors() {
        let text = "01/01/23, 10:00 - Alice: see 02/01/23, 11:00 - the plan\n02/01/23, 11:00 without dash\n";
        let v = parse(text);
        assert_eq!(v.len(), 1);
        assert!(v[0].body.contains("02/01/23, 11:00 without dash"));
    }

    #[test]
    fn preamble_and_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("no timestamps here\n").is_empty());
        let v = parse("header\n01/01/23, 10:00 \u{2013} Alice: hi");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].body, "Alice: hi");
    }

    #[test]
    fn custom_separators_come_from_options() {
        let opts = ParseOptions::default().with_date_time_separator(";").with_body_separators([">>"]);
        let p = LineParser::new(&opts).unwrap();
        let v: Vec<_> = p.entries("01/01/23; 10:00 >> Alice: hi\n01/01/23, 10:00 - Bob: no\n").collect();
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].body, "Alice: hi\n01/01/23, 10:00 - Bob: no\n");
    }
}
