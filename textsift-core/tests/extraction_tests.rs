// textsift-core/tests/extraction_tests.rs
//! Engine-level tests for line extraction and document scanning against the
//! default schemas.

use anyhow::Result;

use textsift_core::extract::line::RecordExtractor;
use textsift_core::extract::scan::DocumentScanner;
use textsift_core::schema::SchemaConfig;

fn default_config() -> SchemaConfig {
    SchemaConfig::load_default_schemas().expect("default schemas must parse")
}

#[test]
fn test_access_line_yields_all_fields() -> Result<()> {
    let config = default_config();
    let extractor = RecordExtractor::new(&config, "apache_access")?;

    let line = r#"192.168.1.10 - - [10/Oct/2023:13:55:36 -0700] "POST /api/users HTTP/1.1" 201 87"#;
    let record = extractor.extract(line, 1);

    assert!(record.matched);
    assert_eq!(record.field("ip"), Some("192.168.1.10"));
    assert_eq!(record.field("timestamp"), Some("10/Oct/2023:13:55:36 -0700"));
    assert_eq!(record.field("method"), Some("POST"));
    assert_eq!(record.field("path"), Some("/api/users"));
    assert_eq!(record.field("protocol"), Some("HTTP/1.1"));
    assert_eq!(record.field("status"), Some("201"));
    assert_eq!(record.field("size"), Some("87"));
    Ok(())
}

#[test]
fn test_dash_size_becomes_zero() -> Result<()> {
    let config = default_config();
    let extractor = RecordExtractor::new(&config, "apache_access")?;

    let line = r#"10.0.0.1 - - [01/Jan/2026:00:00:00 +0000] "HEAD /health HTTP/1.1" 304 -"#;
    let record = extractor.extract(line, 1);

    assert!(record.matched);
    assert_eq!(record.field("size"), Some("0"));
    Ok(())
}

#[test]
fn test_timestamp_without_zone_still_matches() -> Result<()> {
    let config = default_config();
    let extractor = RecordExtractor::new(&config, "apache_access")?;

    let record = extractor.extract(
        r#"192.168.1.1 - - [25/Dec/2023:10:30:45] "GET /index.html HTTP/1.1" 200 1234"#,
        1,
    );
    assert!(record.matched);
    assert_eq!(record.field("ip"), Some("192.168.1.1"));
    assert_eq!(record.field("timestamp"), Some("25/Dec/2023:10:30:45"));
    assert_eq!(record.field("size"), Some("1234"));

    let record = extractor.extract(
        r#"10.0.0.1 - - [01/Jan/2023:00:00:00] "POST /api HTTP/1.1" 404 -"#,
        2,
    );
    assert!(record.matched);
    assert_eq!(record.field("size"), Some("0"));
    Ok(())
}

#[test]
fn test_match_is_anchored_at_line_start() -> Result<()> {
    let config = default_config();
    let extractor = RecordExtractor::new(&config, "apache_access")?;

    let line = r#"prefix 10.0.0.1 - - [01/Jan/2026:00:00:00 +0000] "GET / HTTP/1.1" 200 5"#;
    let record = extractor.extract(line, 1);

    assert!(!record.matched);
    assert!(record.fields.is_empty());
    Ok(())
}

#[test]
fn test_trailing_garbage_is_tolerated() -> Result<()> {
    let config = default_config();
    let extractor = RecordExtractor::new(&config, "apache_access")?;

    let line = r#"10.0.0.1 - - [01/Jan/2026:00:00:00 +0000] "GET / HTTP/1.1" 200 5 trailing junk"#;
    let record = extractor.extract(line, 1);

    assert!(record.matched);
    assert_eq!(record.field("size"), Some("5"));
    Ok(())
}

#[test]
fn test_ansi_escapes_are_stripped_before_matching() -> Result<()> {
    let config = default_config();
    let extractor = RecordExtractor::new(&config, "apache_access")?;

    let line = "\x1b[31m10.0.0.1\x1b[0m - - [01/Jan/2026:00:00:00 +0000] \"GET / HTTP/1.1\" 200 5";
    let record = extractor.extract(line, 1);

    assert!(record.matched);
    assert_eq!(record.field("ip"), Some("10.0.0.1"));
    Ok(())
}

#[test]
fn test_extractor_rejects_scan_schema() {
    let config = default_config();
    let err = RecordExtractor::new(&config, "html_assets").unwrap_err();
    assert!(err.to_string().contains("does not support line input"));
}

#[test]
fn test_extractor_rejects_unknown_schema() {
    let config = default_config();
    let err = RecordExtractor::new(&config, "no_such_schema").unwrap_err();
    assert!(err.to_string().contains("no_such_schema"));
}

#[test]
fn test_email_schema_splits_address() -> Result<()> {
    let config = default_config();
    let extractor = RecordExtractor::new(&config, "email_address")?;

    let record = extractor.extract("jane.doe@example.co.uk", 1);
    assert!(record.matched);
    assert_eq!(record.field("local_part"), Some("jane.doe"));
    assert_eq!(record.field("domain"), Some("example.co.uk"));

    let record = extractor.extract("jane.doe@example.com extra", 2);
    // The address schema is anchored at both ends; trailing text fails it.
    assert!(!record.matched);
    Ok(())
}

#[test]
fn test_scanner_collects_buckets_from_html() -> Result<()> {
    let config = default_config();
    let scanner = DocumentScanner::new(&config, "html_assets")?;

    let html = r#"
<html>
  <head>
    <style>body { background: url('decoy.png'); }</style>
    <script src="app.js">var email = "ghost@nowhere.test";</script>
  </head>
  <body>
    <a href="/about">About</a>
    <a href="https://example.org/docs">Docs</a>
    <A HREF="contact.html">Contact</A>
    <img src="logo.png">
    <p>Reach us: sales@example.com or support@example.com, phone 555-123-4567.</p>
    <p>Intl: +1-555-867-5309 and plain 5551234567.</p>
  </body>
</html>
"#;

    let buckets = scanner.scan(html, Some("https://example.com/pages/"))?;

    let urls: Vec<&str> = buckets["urls"].iter().collect();
    assert!(urls.contains(&"https://example.com/about"));
    assert!(urls.contains(&"https://example.com/pages/contact.html"));
    assert!(urls.contains(&"https://example.com/pages/logo.png"));
    assert!(urls.contains(&"https://example.org/docs"));
    // Script/style content never reaches the scan rules.
    assert!(!urls.iter().any(|u| u.contains("decoy.png")));
    assert!(!urls.iter().any(|u| u.contains("app.js")));

    let emails: Vec<&str> = buckets["emails"].iter().collect();
    assert_eq!(emails, vec!["sales@example.com", "support@example.com"]);

    let phones = &buckets["phone_numbers"];
    assert!(phones.contains("555-123-4567"));
    assert!(phones.contains("+1-555-867-5309"));
    assert!(phones.contains("5551234567"));
    Ok(())
}

#[test]
fn test_scanner_dedupes_and_sorts() -> Result<()> {
    let config = default_config();
    let scanner = DocumentScanner::new(&config, "html_assets")?;

    let html = r#"<a href="https://z.example/b"></a><a href="https://a.example/a"></a><a href="https://z.example/b"></a>"#;
    let buckets = scanner.scan(html, None)?;

    let urls: Vec<&str> = buckets["urls"].iter().collect();
    assert_eq!(urls, vec!["https://a.example/a", "https://z.example/b"]);
    Ok(())
}

#[test]
fn test_repeated_reference_dedupes_after_resolution() -> Result<()> {
    let config = default_config();
    let scanner = DocumentScanner::new(&config, "html_assets")?;

    let html = r#"<a href="/a">one</a><a href="/a">two</a>"#;
    let buckets = scanner.scan(html, Some("https://x.com/"))?;

    let urls: Vec<&str> = buckets["urls"].iter().collect();
    assert_eq!(urls, vec!["https://x.com/a"]);
    Ok(())
}

#[test]
fn test_scanner_without_base_keeps_relative_references() -> Result<()> {
    let config = default_config();
    let scanner = DocumentScanner::new(&config, "html_assets")?;

    let buckets = scanner.scan(r#"<a href="page.html"></a>"#, None)?;
    let urls: Vec<&str> = buckets["urls"].iter().collect();
    assert_eq!(urls, vec!["page.html"]);
    Ok(())
}

#[test]
fn test_scanner_declares_empty_buckets() -> Result<()> {
    let config = default_config();
    let scanner = DocumentScanner::new(&config, "html_assets")?;

    let buckets = scanner.scan("<p>nothing to find here</p>", None)?;
    assert!(buckets["urls"].is_empty());
    assert!(buckets["emails"].is_empty());
    assert!(buckets["phone_numbers"].is_empty());
    Ok(())
}

#[test]
fn test_scanner_rejects_invalid_base_url() -> Result<()> {
    let config = default_config();
    let scanner = DocumentScanner::new(&config, "html_assets")?;

    let err = scanner.scan("<a href='x'></a>", Some("::not a url::")).unwrap_err();
    assert!(err.to_string().contains("Invalid base URL"));
    Ok(())
}

#[test]
fn test_scanner_rejects_line_schema() {
    let config = default_config();
    let err = DocumentScanner::new(&config, "apache_access").unwrap_err();
    assert!(err.to_string().contains("does not support document input"));
}
