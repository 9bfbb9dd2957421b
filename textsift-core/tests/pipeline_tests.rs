// textsift-core/tests/pipeline_tests.rs
//! End-to-end pipeline runs: unit accounting, partial-failure tolerance,
//! abort semantics, and single-use enforcement.

use std::io;

use anyhow::Result;
use test_log::test;

use textsift_core::aggregate::aggregate;
use textsift_core::errors::SiftError;
use textsift_core::pipeline::{Pipeline, PipelineState};
use textsift_core::record::SNIPPET_MAX_LEN;
use textsift_core::schema::SchemaConfig;

fn default_config() -> SchemaConfig {
    SchemaConfig::load_default_schemas().expect("default schemas must parse")
}

fn ok_lines(lines: &[&str]) -> Vec<io::Result<String>> {
    lines.iter().map(|l| Ok(l.to_string())).collect()
}

const GOOD_LINE_A: &str =
    r#"203.0.113.9 - - [11/Feb/2026:09:00:01 +0000] "GET /index.html HTTP/1.1" 200 1043"#;
const GOOD_LINE_B: &str =
    r#"198.51.100.4 - - [11/Feb/2026:09:00:07 +0000] "GET /robots.txt HTTP/1.1" 200 68"#;

#[test]
fn test_partial_failure_is_tolerated_and_accounted() -> Result<()> {
    let config = default_config();
    let mut pipeline = Pipeline::from_schema(&config, "apache_access")?;

    let units = ok_lines(&[GOOD_LINE_A, "MALFORMED GARBAGE LINE", GOOD_LINE_B]);
    let report = pipeline.run_lines("access.log", units)?;

    assert_eq!(pipeline.state(), PipelineState::Completed);
    assert_eq!(report.units_total, 3);
    assert_eq!(report.units_extracted, 2);
    assert_eq!(report.units_skipped(), 1);
    assert_eq!(report.skipped[0].source_index, 2);
    assert_eq!(report.skipped[0].snippet, "MALFORMED GARBAGE LINE");
    assert!(report.finished_at.is_some());

    let statuses = aggregate(&report.records, "status");
    assert_eq!(statuses.count("200"), 2);
    Ok(())
}

#[test]
fn test_skipped_snippet_is_truncated() -> Result<()> {
    let config = default_config();
    let mut pipeline = Pipeline::from_schema(&config, "apache_access")?;

    let noise = "junk ".repeat(30);
    let report = pipeline.run_lines("access.log", ok_lines(&[&noise]))?;

    assert_eq!(report.units_skipped(), 1);
    let snippet = &report.skipped[0].snippet;
    assert!(snippet.ends_with("..."));
    assert_eq!(snippet.chars().count(), SNIPPET_MAX_LEN + 3);
    Ok(())
}

#[test]
fn test_blank_units_count_but_produce_nothing() -> Result<()> {
    let config = default_config();
    let mut pipeline = Pipeline::from_schema(&config, "apache_access")?;

    let units = ok_lines(&[GOOD_LINE_A, "", "   ", GOOD_LINE_B]);
    let report = pipeline.run_lines("access.log", units)?;

    assert_eq!(report.units_total, 4);
    assert_eq!(report.units_extracted, 2);
    assert_eq!(report.units_skipped(), 0);
    // Positions keep counting through the blanks.
    assert_eq!(report.records[1].source_index, 4);
    Ok(())
}

#[test]
fn test_source_failure_aborts_the_run() -> Result<()> {
    let config = default_config();
    let mut pipeline = Pipeline::from_schema(&config, "apache_access")?;

    let units = vec![
        Ok(GOOD_LINE_A.to_string()),
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream interrupted")),
        Ok(GOOD_LINE_B.to_string()),
    ];
    let err = pipeline.run_lines("access.log", units).unwrap_err();

    assert!(matches!(err, SiftError::SourceFailure(_)));
    assert_eq!(pipeline.state(), PipelineState::Aborted);
    Ok(())
}

#[test]
fn test_pipeline_runs_exactly_once() -> Result<()> {
    let config = default_config();
    let mut pipeline = Pipeline::from_schema(&config, "apache_access")?;

    pipeline.run_lines("first.log", ok_lines(&[GOOD_LINE_A]))?;
    let err = pipeline.run_lines("second.log", ok_lines(&[GOOD_LINE_B])).unwrap_err();

    assert!(matches!(err, SiftError::PipelineFinished(_)));
    assert_eq!(pipeline.state(), PipelineState::Completed);
    Ok(())
}

#[test]
fn test_aborted_pipeline_refuses_reuse() -> Result<()> {
    let config = default_config();
    let mut pipeline = Pipeline::from_schema(&config, "apache_access")?;

    let units = vec![Err(io::Error::new(io::ErrorKind::NotFound, "gone"))];
    let _ = pipeline.run_lines("missing.log", units).unwrap_err();
    assert_eq!(pipeline.state(), PipelineState::Aborted);

    let err = pipeline.run_lines("retry.log", ok_lines(&[GOOD_LINE_A])).unwrap_err();
    assert!(matches!(err, SiftError::PipelineFinished(_)));
    Ok(())
}

#[test]
fn test_line_source_on_scan_schema_is_rejected() -> Result<()> {
    let config = default_config();
    let mut pipeline = Pipeline::from_schema(&config, "html_assets")?;

    let err = pipeline.run_lines("page.html", ok_lines(&[GOOD_LINE_A])).unwrap_err();
    assert!(matches!(err, SiftError::ModeMismatch(_, "line")));
    // Refusing the wrong input shape is not a run; the pipeline stays usable.
    assert_eq!(pipeline.state(), PipelineState::Running);
    Ok(())
}

#[test]
fn test_document_run_collects_and_completes() -> Result<()> {
    let config = default_config();
    let mut pipeline = Pipeline::from_schema(&config, "html_assets")?;

    let html = r#"<a href="a.html"></a><a href="mailto:x"></a> call 555-111-2222"#.to_string();
    let report = pipeline.run_document(
        "page.html",
        move || Ok(html),
        Some("https://example.com/site/"),
    )?;

    assert_eq!(pipeline.state(), PipelineState::Completed);
    assert_eq!(report.units_total, 1);
    assert_eq!(report.units_extracted, 1);
    assert!(report.collections["urls"].contains("https://example.com/site/a.html"));
    assert!(report.collections["phone_numbers"].contains("555-111-2222"));
    Ok(())
}

#[test]
fn test_document_loader_failure_aborts() -> Result<()> {
    let config = default_config();
    let mut pipeline = Pipeline::from_schema(&config, "html_assets")?;

    let err = pipeline
        .run_document(
            "page.html",
            || Err(io::Error::new(io::ErrorKind::NotFound, "no such file")),
            None,
        )
        .unwrap_err();

    assert!(matches!(err, SiftError::SourceFailure(_)));
    assert_eq!(pipeline.state(), PipelineState::Aborted);
    Ok(())
}

#[test]
fn test_invalid_base_url_aborts_document_run() -> Result<()> {
    let config = default_config();
    let mut pipeline = Pipeline::from_schema(&config, "html_assets")?;

    let err = pipeline
        .run_document("page.html", || Ok(String::new()), Some("not a base"))
        .unwrap_err();

    assert!(matches!(err, SiftError::AnyhowWrapper(_)));
    assert_eq!(pipeline.state(), PipelineState::Aborted);
    Ok(())
}

#[test]
fn test_rankings_are_deterministic_across_runs() -> Result<()> {
    let config = default_config();
    let lines = [GOOD_LINE_A, GOOD_LINE_B, GOOD_LINE_A, "garbage"];

    let run = |source: &str| -> Result<Vec<(String, usize)>> {
        let mut pipeline = Pipeline::from_schema(&config, "apache_access")?;
        let report = pipeline.run_lines(source, ok_lines(&lines))?;
        Ok(aggregate(&report.records, "ip")
            .entries()
            .into_iter()
            .map(|e| (e.value, e.count))
            .collect())
    };

    let first = run("a.log")?;
    let second = run("b.log")?;
    assert_eq!(first, second);
    assert_eq!(first[0], ("203.0.113.9".to_string(), 2));
    Ok(())
}
