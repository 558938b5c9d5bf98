//! Walk report parsing.
//!
//! Raw text is split line by line at the anchored path ([`LineSplitter`]) and
//! the metadata columns are turned into [`Record`]s ([`RecordParser`]).
//! Parsing may be sharded over threads; records always come back in input
//! order and the first failing line in input order is reported.

mod record;
mod splitter;

pub use record::{FieldLayout, LayoutPreset, Record, RecordParser};
pub use splitter::{LineSplitter, SplitLine, DEFAULT_ROOT_PREFIX};

use crate::error::Result;
use rayon::prelude::*;
use std::path::Path;

/// Below this many lines per thread, sharding costs more than it saves.
const MIN_LINES_PER_SHARD: usize = 4096;

/// Read a whole walk report into memory.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if the file cannot be read.
pub fn read_report(path: impl AsRef<Path>) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// Parse numbered lines in order.
///
/// # Errors
///
/// Returns the first `MalformedLine` or `MalformedRecord` encountered. A blank
/// line has no anchored path and is a `MalformedLine`.
pub fn parse_lines(
    lines: &[(usize, &str)],
    splitter: &LineSplitter,
    parser: &RecordParser,
) -> Result<Vec<Record>> {
    lines
        .iter()
        .map(|&(number, line)| parser.parse(number, splitter.split(number, line)?))
        .collect()
}

/// Parse a complete report, optionally over `threads` worker threads.
///
/// The result is identical to a sequential parse regardless of `threads`.
///
/// # Errors
///
/// Returns the error for the earliest bad line in the input.
pub fn parse_report(
    text: &str,
    splitter: &LineSplitter,
    parser: &RecordParser,
    threads: usize,
) -> Result<Vec<Record>> {
    let lines: Vec<(usize, &str)> = text.lines().enumerate().map(|(i, l)| (i + 1, l)).collect();

    let threads = threads.max(1).min(lines.len() / MIN_LINES_PER_SHARD).max(1);
    if threads == 1 {
        return parse_lines(&lines, splitter, parser);
    }

    let shard_len = lines.len().div_ceil(threads);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|idx| format!("usagebyuser-parse-{idx}"))
        .build()?;
    let shards: Vec<Result<Vec<Record>>> = pool.install(|| {
        lines
            .par_chunks(shard_len)
            .map(|shard| parse_lines(shard, splitter, parser))
            .collect()
    });

    let mut records = Vec::with_capacity(lines.len());
    for shard in shards {
        records.extend(shard?);
    }
    Ok(records)
}
