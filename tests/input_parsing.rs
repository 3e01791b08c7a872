//! Candidate list parsing behavior.

use std::io::Write;

use tempfile::NamedTempFile;

use subdomain_scan::{load_domains, normalize_candidate};

#[tokio::test]
async fn comments_and_blanks_are_ignored() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "a.example").unwrap();
    writeln!(file, "# comment").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "b.example").unwrap();
    file.flush().unwrap();

    let domains = load_domains(file.path()).await.unwrap();
    assert_eq!(domains, vec!["a.example", "b.example"]);
}

#[tokio::test]
async fn duplicates_collapse_case_insensitively() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Sub.Example.COM").unwrap();
    writeln!(file, "sub.example.com").unwrap();
    writeln!(file, "other.example.com").unwrap();
    file.flush().unwrap();

    let domains = load_domains(file.path()).await.unwrap();
    assert_eq!(domains, vec!["sub.example.com", "other.example.com"]);
}

#[tokio::test]
async fn surrounding_whitespace_is_trimmed() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "   padded.example   ").unwrap();
    file.flush().unwrap();

    let domains = load_domains(file.path()).await.unwrap();
    assert_eq!(domains, vec!["padded.example"]);
}

#[test]
fn invalid_candidates_are_rejected() {
    assert_eq!(normalize_candidate("has space.example"), None);
    assert_eq!(normalize_candidate("example.com/login"), None);
    assert_eq!(normalize_candidate("# a.example"), None);
}

#[tokio::test]
async fn empty_file_yields_empty_list() {
    let file = NamedTempFile::new().unwrap();
    let domains = load_domains(file.path()).await.unwrap();
    assert!(domains.is_empty());
}
