use anyhow::{bail, Result};
use chatsense::{ChatAnalyzer, Scope};
use std::io::Write;

const USAGE: &str = "usage: chatsense <export.txt> [user|Overall]";

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!(USAGE);
    };
    let scope = args.next().map(|s| Scope::from_selection(&s)).unwrap_or_default();

    let session = ChatAnalyzer::new().progress(true).analyze_file(&path)?;

    if let Some(user) = scope.user.as_deref() {
        if !session.users().iter().any(|u| u == user) {
            tracing::warn!("user {:?} does not appear in {}; results will be empty", user, path);
        }
    }

    let report = session.report(&scope);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    Ok(())
}
