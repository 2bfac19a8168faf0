#![allow(dead_code)]

use chatsense::{ChatAnalyzer, Session, SentimentScores};
use std::fs;
use std::path::{Path, PathBuf};

/// A small group export covering the awkward cases:
/// - three system lines (encryption notice, group creation, invite join)
/// - a media placeholder from Bob and a link from Bob
/// - a three-line message from Carol
/// - a December 2022 line that appears *after* the January 2023 lines,
///   so monthly ordering cannot come from appearance order
///
/// Calendar: 12/11/22 is a Saturday, 13/11/22 a Sunday, 05/12/22 and 02/01/23 Mondays.
pub const SAMPLE: &str = "\
12/11/22, 21:00 - Messages and calls are end-to-end encrypted. No one outside of this chat, not even WhatsApp, can read or listen to them. Tap to learn more.
12/11/22, 21:01 - Alice created group \"Goa trip\"
12/11/22, 21:02 - Alice: I love this plan 😂😂
12/11/22, 23:15 - Bob: great, see https://example.com/itinerary
13/11/22, 08:00 - Bob: <Media omitted>
13/11/22, 08:05 - Carol joined using this group's invite link
13/11/22, 08:06 - Carol: hate waking up this early
it is awful
really
02/01/23, 10:00 - Alice: Happy new year 🎉
02/01/23, 10:30 - Bob: plan plan plan
05/12/22, 12:00 - Carol: trip budget pending
";

/// Deterministic stand-in for the lexicon service:
/// love/great/happy -> (0.6, 0, 0.4), hate/awful -> (0, 0.7, 0.3), anything else neutral.
/// On SAMPLE that gives 3 Positive (Alice x2, Bob), 1 Negative (Carol), 6 Neutral.
pub fn keyword_scorer(text: &str) -> SentimentScores {
    let t = text.to_lowercase();
    if ["love", "great", "happy"].iter().any(|w| t.contains(w)) {
        SentimentScores::new(0.6, 0.0, 0.4)
    } else if ["hate", "awful"].iter().any(|w| t.contains(w)) {
        SentimentScores::new(0.0, 0.7, 0.3)
    } else {
        SentimentScores::neutral()
    }
}

pub fn analyzer() -> ChatAnalyzer {
    ChatAnalyzer::new().progress(false).scorer(keyword_scorer)
}

pub fn sample_session() -> Session {
    analyzer().analyze_str(SAMPLE).unwrap()
}

/// Write `contents` to `name` inside a fresh temp dir and return the path.
pub fn write_temp(name: &str, contents: &[u8]) -> PathBuf {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.into_path();
    let path = base.join(name);
    write_file(&path, contents);
    path
}

fn write_file(path: &Path, contents: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}
