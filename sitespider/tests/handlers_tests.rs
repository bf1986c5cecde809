use sitespider::handlers::*;
use std::io::Write;
use tempfile::NamedTempFile;
use url::Url;

#[test]
fn test_parse_url_line_with_scheme() {
    let result = parse_url_line("https://example.com");
    assert_eq!(result, Some("https://example.com".to_string()));
}

#[test]
fn test_parse_url_line_without_scheme() {
    let result = parse_url_line("example.com");
    assert_eq!(result, Some("http://example.com".to_string()));
}

#[test]
fn test_parse_url_line_host_and_port() {
    let result = parse_url_line("localhost:3000/docs");
    assert_eq!(result, Some("http://localhost:3000/docs".to_string()));
}

#[test]
fn test_parse_url_line_invalid() {
    let result = parse_url_line("not a valid url!!!");
    assert_eq!(result, None);
}

#[test]
fn test_load_urls_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "https://example.com")?;
    writeln!(temp_file, "httpbin.org")?;
    writeln!(temp_file)?; // Empty line
    writeln!(temp_file, "  https://api.example.com/v1  ")?;

    let urls = load_urls_from_file(temp_file.path())?;

    assert_eq!(urls.len(), 3);
    assert_eq!(urls[0], "https://example.com");
    assert_eq!(urls[1], "http://httpbin.org");
    assert_eq!(urls[2], "https://api.example.com/v1");

    Ok(())
}

#[test]
fn test_load_urls_from_file_empty() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file).unwrap();
    writeln!(temp_file, "   ").unwrap();

    let result = load_urls_from_file(temp_file.path());
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("No valid URLs"));
}

#[test]
fn test_load_urls_from_missing_file() {
    let result = load_urls_from_file(std::path::Path::new("/nonexistent/hosts.txt"));
    assert!(result.unwrap_err().to_string().contains("Failed to read hosts file"));
}

#[test]
fn test_load_urls_from_source_prefers_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "https://from-file.example")?;
    let url = Url::parse("https://from-arg.example/")?;

    let urls = load_urls_from_source(Some(&url), Some(temp_file.path()))?;
    assert_eq!(urls, vec!["https://from-file.example".to_string()]);

    let urls = load_urls_from_source(Some(&url), None)?;
    assert_eq!(urls, vec!["https://from-arg.example/".to_string()]);

    Ok(())
}

#[test]
fn test_load_urls_from_source_requires_input() {
    assert!(load_urls_from_source(None, None).is_err());
}

#[test]
fn test_expand_path_without_tilde() {
    assert_eq!(
        expand_path("/tmp/hosts.txt"),
        std::path::PathBuf::from("/tmp/hosts.txt")
    );
}
