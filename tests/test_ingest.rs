//! Ingestion properties: the row cap is exact and content-preserving, and the
//! byte cap rejects files before they are parsed.

use std::io::Write;

use insightai::ingest::{self, IngestionError, MAX_CSV_SIZE_BYTES, MAX_ROWS_FOR_ANALYSIS};

mod common;
use common::csv_of;

#[test]
fn ingest_is_identity_at_or_under_the_cap() {
    for lines in [1, 10, 2999, MAX_ROWS_FOR_ANALYSIS] {
        let input = csv_of(lines);
        assert_eq!(ingest::ingest(&input), input, "changed at {lines} lines");
    }
}

#[test]
fn ingest_truncates_to_exactly_the_cap() {
    let input = csv_of(5000);
    let output = ingest::ingest(&input);

    // Exactly 3000 lines: 2999 separators.
    assert_eq!(output.matches('\n').count(), MAX_ROWS_FOR_ANALYSIS - 1);
    assert_eq!(output.lines().count(), MAX_ROWS_FOR_ANALYSIS);

    // Prefix-preserving: the output is the input up to the cut.
    assert!(input.starts_with(&output));
    assert!(output.ends_with("row2999,2999"));
}

#[test]
fn ingest_preserves_crlf_content() {
    let input: String = (0..4000)
        .map(|i| format!("row{i}\r\n"))
        .collect::<String>();
    let output = ingest::ingest(&input);

    assert_eq!(output.matches("\r\n").count(), MAX_ROWS_FOR_ANALYSIS - 1);
    assert!(output.starts_with("row0\r\nrow1\r\n"));
}

#[test]
fn load_rejects_oversized_files_before_parsing() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("big.csv");
    let mut file = std::fs::File::create(&path)?;
    // One byte over the cap.
    file.write_all(&vec![b'a'; (MAX_CSV_SIZE_BYTES + 1) as usize])?;
    drop(file);

    let err = ingest::load_csv_file(&path).unwrap_err();
    assert!(matches!(err, IngestionError::Oversized { .. }), "{err}");
    Ok(())
}

#[test]
fn load_rejects_non_text_files() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("binary.csv");
    std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80])?;

    let err = ingest::load_csv_file(&path).unwrap_err();
    assert!(matches!(err, IngestionError::NotText(_)), "{err}");
    Ok(())
}

#[test]
fn load_returns_name_and_content() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "name,value\na,1\n")?;

    let (name, text) = ingest::load_csv_file(&path)?;
    assert_eq!(name, "data.csv");
    assert_eq!(text, "name,value\na,1\n");
    Ok(())
}
