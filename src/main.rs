//! Print tab-separated `key<TAB>value` lines grouped into sections.
//!
//! Usage: `sectioned [FILE]` (reads stdin without a file). Lines without a
//! tab land in a section with an empty key. Set `RUST_LOG=trace` to see the
//! sectioning trace.

use std::io::{self, BufRead, BufReader, Write};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use sectioned::{RandomAccess, SectionedQuery, VecSource};

#[derive(Clone, Debug)]
struct Row {
    key: String,
    value: String,
}

fn parse(line: &str) -> Row {
    let (key, value) = line.split_once('\t').unwrap_or(("", line));
    return Row {
        key: key.to_string(),
        value: value.to_string(),
    };
}

fn read_rows(reader: impl BufRead) -> anyhow::Result<Vec<Row>> {
    let mut rows = Vec::new();
    for line in reader.lines() {
        let line = line.context("failed to read input line")?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push(parse(&line));
    }
    return Ok(rows);
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let rows = match std::env::args().nth(1) {
        Some(path) => {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("failed to open {path}"))?;
            read_rows(BufReader::new(file))?
        }
        None => read_rows(io::stdin().lock())?,
    };
    tracing::info!(rows = rows.len(), "read input");

    let source: VecSource<Row> = VecSource::new(rows);
    let query = SectionedQuery::new(source, |row: &Row| row.key.clone());
    let results = query.results();

    let mut out = io::stdout().lock();
    for section in &results {
        writeln!(out, "{} ({})", section.id(), section.len())?;
        for row in section {
            writeln!(out, "  {}", row.value)?;
        }
    }
    return Ok(());
}
