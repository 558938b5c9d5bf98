//! End-to-end report tests: walk file in, PNG/SVG/HTML out.
//!
//! Run: cargo test --test report_test

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use usage_by_user::config::Config;
use usage_by_user::output::OutputSink;
use usage_by_user::parse::{parse_report, LineSplitter, RecordParser};
use usage_by_user::report;
use usage_by_user::units::{reduce, Unit};
use usage_by_user::Error;

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn write_walk(dir: &TempDir, lines: &[&str]) -> PathBuf {
    let path = dir.path().join("walk.txt");
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

fn config_in(dir: &Path) -> Config {
    let mut config = Config::default();
    config.chart.path = dir.join("usage.png");
    config.table.path = dir.join("table.html");
    config
}

// ============================================================================
// Parsing and units
// ============================================================================

#[test]
fn parses_single_walk_line() {
    let splitter = LineSplitter::new("/nfs/turbo/").unwrap();
    let records = parse_report(
        "alice users rwx 5 MB 2023-01-01 /nfs/turbo/proj/data.bin",
        &splitter,
        &RecordParser::default(),
        1,
    )
    .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user, "alice");
    assert_eq!(records[0].bytes, 5_242_880);
    assert_eq!(records[0].path, "/nfs/turbo/proj/data.bin");
}

#[test]
fn graph_splits_three_to_one() {
    let dir = TempDir::new().unwrap();
    let walk = write_walk(
        &dir,
        &[
            "alice users rwx 2 GB 2023-01-01 /nfs/turbo/proj/a.bin",
            "bob users rwx 1 GB 2023-01-01 /nfs/turbo/proj/b.bin",
            "alice users rwx 1 GB 2023-01-02 /nfs/turbo/proj/c.bin",
        ],
    );
    let config = config_in(dir.path());

    let summary = report::graph(&config, &walk).unwrap();

    assert_eq!(summary.users, 2);
    assert_eq!(summary.total_bytes, 4_294_967_296);
    let percents: Vec<(&str, u32)> = summary
        .charted
        .iter()
        .map(|s| (s.user.as_str(), s.percent))
        .collect();
    assert_eq!(percents, vec![("alice", 75), ("bob", 25)]);
    assert_eq!(summary.charted[0].bytes, 3_221_225_472);

    let png = fs::read(&summary.chart_path).unwrap();
    assert_eq!(png[..8], PNG_MAGIC);
    assert!(summary.svg_path.is_none());
}

#[test]
fn top_rejects_user_without_records() {
    let dir = TempDir::new().unwrap();
    let walk = write_walk(&dir, &["alice users rwx 5 MB 2023-01-01 /nfs/turbo/a"]);
    let config = config_in(dir.path());
    let sink = OutputSink::File(config.table.path.clone());

    let err = report::top(&config, &walk, "carol", &sink).unwrap_err();

    assert!(matches!(err, Error::UnknownUser(ref u) if u == "carol"));
    assert!(!config.table.path.exists(), "no table on failure");
}

#[test]
fn graph_rejects_line_without_anchor() {
    let dir = TempDir::new().unwrap();
    let walk = write_walk(
        &dir,
        &[
            "alice users rwx 5 MB 2023-01-01 /nfs/turbo/a",
            "bob users rwx 1 MB 2023-01-01 /home/bob/b",
        ],
    );
    let config = config_in(dir.path());

    let err = report::graph(&config, &walk).unwrap_err();

    assert!(matches!(err, Error::MalformedLine { line: 2, .. }));
    assert!(!config.chart.path.exists(), "no chart on failure");
}

#[test]
fn reduce_picks_largest_whole_unit() {
    assert_eq!(reduce(500), (500, Unit::B));
    assert_eq!(reduce(2048), (2, Unit::KB));
}

// ============================================================================
// graph
// ============================================================================

#[test]
fn graph_drops_users_under_one_percent() {
    let dir = TempDir::new().unwrap();
    let walk = write_walk(
        &dir,
        &[
            "alice users rwx 500 MB 2023-01-01 /nfs/turbo/a",
            "bob users rwx 1 MB 2023-01-01 /nfs/turbo/b",
        ],
    );
    let config = config_in(dir.path());

    let summary = report::graph(&config, &walk).unwrap();

    assert_eq!(summary.users, 2);
    assert_eq!(summary.charted.len(), 1);
    assert_eq!(summary.charted[0].user, "alice");
    assert_eq!(summary.charted[0].percent, 99);
}

#[test]
fn graph_writes_svg_with_names() {
    let dir = TempDir::new().unwrap();
    let walk = write_walk(
        &dir,
        &[
            "alice users rwx 3 GB 2023-01-01 /nfs/turbo/a",
            "bob users rwx 1 GB 2023-01-01 /nfs/turbo/b",
        ],
    );
    let mut config = config_in(dir.path());
    config.chart.svg = Some(dir.path().join("usage.svg"));

    let summary = report::graph(&config, &walk).unwrap();

    let svg = fs::read_to_string(summary.svg_path.unwrap()).unwrap();
    assert!(svg.starts_with("<svg") || svg.starts_with("<?xml"));
    assert!(svg.contains("alice"));
    assert!(svg.contains("bob"));
    assert!(svg.contains("75.00%"));
}

#[test]
fn graph_empty_input() {
    let dir = TempDir::new().unwrap();
    let walk = write_walk(&dir, &[]);
    let config = config_in(dir.path());

    assert!(matches!(
        report::graph(&config, &walk),
        Err(Error::EmptyDataset)
    ));
}

#[test]
fn graph_all_zero_sizes() {
    let dir = TempDir::new().unwrap();
    let walk = write_walk(
        &dir,
        &[
            "alice users rwx 0 B 2023-01-01 /nfs/turbo/a",
            "bob users rwx 0 KB 2023-01-01 /nfs/turbo/b",
        ],
    );
    let config = config_in(dir.path());

    assert!(matches!(
        report::graph(&config, &walk),
        Err(Error::EmptyDataset)
    ));
}

#[test]
fn graph_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    assert!(matches!(
        report::graph(&config, &dir.path().join("missing.txt")),
        Err(Error::Io(_))
    ));
}

#[test]
fn graph_unknown_unit_is_malformed_record() {
    let dir = TempDir::new().unwrap();
    let walk = write_walk(&dir, &["alice users rwx 5 TB 2023-01-01 /nfs/turbo/a"]);
    let config = config_in(dir.path());

    let err = report::graph(&config, &walk).unwrap_err();
    assert!(matches!(err, Error::MalformedRecord { line: 1, .. }));
    assert!(matches!(err.record_cause(), Some(Error::UnknownUnit(u)) if u == "TB"));
}

#[test]
fn graph_rejects_blank_line() {
    let dir = TempDir::new().unwrap();
    let walk = write_walk(
        &dir,
        &[
            "alice users rwx 1 B 2023-01-01 /nfs/turbo/a",
            "",
            "bob users rwx 1 B 2023-01-01 /nfs/turbo/b",
        ],
    );
    let config = config_in(dir.path());

    let err = report::graph(&config, &walk).unwrap_err();
    assert!(matches!(err, Error::MalformedLine { line: 2, .. }));
}

#[test]
fn top_truncates_fractional_sizes() {
    let dir = TempDir::new().unwrap();
    let walk = write_walk(
        &dir,
        &[
            "alice users rwx 1.5 KB 2023-01-01 /nfs/turbo/a",
            "alice users rwx 0.9 MB 2023-01-01 /nfs/turbo/b",
        ],
    );
    let config = config_in(dir.path());
    let sink = OutputSink::File(config.table.path.clone());

    let summary = report::top(&config, &walk, "alice", &sink).unwrap();
    assert_eq!(summary.total_bytes, 1024);
}

// ============================================================================
// top
// ============================================================================

#[test]
fn top_orders_largest_first() {
    let dir = TempDir::new().unwrap();
    let walk = write_walk(
        &dir,
        &[
            "alice users rwx 1 KB 2023-01-01 /nfs/turbo/small",
            "bob users rwx 9 GB 2023-01-01 /nfs/turbo/bob",
            "alice users rwx 2 MB 2023-01-01 /nfs/turbo/big",
            "alice users rwx 3 KB 2023-01-01 /nfs/turbo/medium",
        ],
    );
    let config = config_in(dir.path());
    let sink = OutputSink::File(config.table.path.clone());

    let summary = report::top(&config, &walk, "alice", &sink).unwrap();

    assert_eq!(summary.rows, 3);
    assert_eq!(summary.total_bytes, 2 * 1024 * 1024 + 4 * 1024);

    let html = fs::read_to_string(&config.table.path).unwrap();
    let big = html.find("/nfs/turbo/big").unwrap();
    let medium = html.find("/nfs/turbo/medium").unwrap();
    let small = html.find("/nfs/turbo/small").unwrap();
    assert!(big < medium && medium < small);
    assert!(html.contains("<td class=\"size\">2MB</td>"));
    assert!(!html.contains("/nfs/turbo/bob"));
}

#[test]
fn top_mode_first_layout() {
    let dir = TempDir::new().unwrap();
    let walk = write_walk(
        &dir,
        &[
            "rwx alice users 4 KB 2023-01-01 /nfs/turbo/a",
            "rwx bob users 8 KB 2023-01-01 /nfs/turbo/b",
        ],
    );
    let mut config = config_in(dir.path());
    config.layout = usage_by_user::parse::LayoutPreset::ModeFirst;
    let sink = OutputSink::File(config.table.path.clone());

    let summary = report::top(&config, &walk, "bob", &sink).unwrap();

    assert_eq!(summary.rows, 1);
    assert_eq!(summary.total_bytes, 8192);
}

#[test]
fn top_custom_root_prefix() {
    let dir = TempDir::new().unwrap();
    let walk = write_walk(
        &dir,
        &["alice users rwx 1 MB 2023-01-01 /scratch/alice/run 1/out.log"],
    );
    let mut config = config_in(dir.path());
    config.root_prefix = "/scratch/".to_string();
    let sink = OutputSink::File(config.table.path.clone());

    report::top(&config, &walk, "alice", &sink).unwrap();

    let html = fs::read_to_string(&config.table.path).unwrap();
    assert!(html.contains("/scratch/alice/run 1/out.log"));
}

#[test]
fn threads_do_not_change_results() {
    let dir = TempDir::new().unwrap();
    let lines: Vec<String> = (0..20_000)
        .map(|i| {
            format!(
                "user{} users rwx {} KB 2023-01-01 /nfs/turbo/f{i}",
                i % 7,
                i % 100
            )
        })
        .collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let walk = write_walk(&dir, &refs);

    let mut sequential = config_in(dir.path());
    sequential.threads = 1;
    let mut sharded = sequential.clone();
    sharded.threads = 4;
    sharded.chart.path = dir.path().join("sharded.png");

    let a = report::graph(&sequential, &walk).unwrap();
    let b = report::graph(&sharded, &walk).unwrap();

    assert_eq!(a.charted, b.charted);
    assert_eq!(a.total_bytes, b.total_bytes);
    assert_eq!(
        fs::read(&a.chart_path).unwrap(),
        fs::read(&b.chart_path).unwrap()
    );
}
