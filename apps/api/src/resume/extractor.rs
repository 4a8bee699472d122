//! Resume text extraction — PDF bytes in, bounded plain text out.
//!
//! The bytes are written to a named temporary file for the duration of the parse.
//! `NamedTempFile` removes it on drop, so every exit path (including a parser panic)
//! leaves nothing behind.

use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

/// Maximum number of characters of resume text handed to any prompt.
pub const MAX_RESUME_CHARS: usize = 6000;

const PAGE_SEPARATOR: &str = "\n\n";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Uploaded file is empty")]
    Empty,

    #[error("Could not stage PDF for parsing: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not read PDF: {0}")]
    Parse(String),

    #[error("PDF parser aborted: {0}")]
    Aborted(String),
}

/// Extracts resume text from uploaded PDF bytes.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor {
    temp_dir: Option<PathBuf>,
}

impl PdfExtractor {
    /// `temp_dir` of `None` stages files in the system temp directory.
    pub fn new(temp_dir: Option<PathBuf>) -> Self {
        Self { temp_dir }
    }

    /// Parses `bytes` page by page and returns at most `MAX_RESUME_CHARS` characters.
    pub async fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::Empty);
        }

        let temp_dir = self.temp_dir.clone();
        let bytes = bytes.to_vec();

        let pages = tokio::task::spawn_blocking(move || extract_pages(temp_dir, &bytes))
            .await
            .map_err(|e| ExtractionError::Aborted(e.to_string()))??;

        debug!("Extracted {} page(s) from resume PDF", pages.len());
        Ok(join_pages(&pages))
    }
}

fn extract_pages(
    temp_dir: Option<PathBuf>,
    bytes: &[u8],
) -> Result<Vec<String>, ExtractionError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("resume-").suffix(".pdf");
    let mut staged = match temp_dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };
    staged.write_all(bytes)?;
    staged.flush()?;

    pdf_extract::extract_text_by_pages(staged.path())
        .map_err(|e| ExtractionError::Parse(e.to_string()))
}

/// Joins page texts in document order with a blank line and truncates the result.
/// The parser pads each page with newlines, so pages are trimmed before joining.
pub fn join_pages(pages: &[String]) -> String {
    let joined = pages
        .iter()
        .map(|page| page.trim())
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR);
    truncate_chars(&joined, MAX_RESUME_CHARS)
}

/// Returns the first `max` characters of `text`, never splitting a character.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::pdf_with_pages;

    fn pages(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_two_pages_joined_by_blank_line() {
        assert_eq!(join_pages(&pages(&["A", "B"])), "A\n\nB");
    }

    #[test]
    fn test_page_padding_is_trimmed_before_joining() {
        let padded = pages(&["\n\nA\n\n", "\n\nB\n\n"]);
        assert_eq!(join_pages(&padded), "A\n\nB");
    }

    #[test]
    fn test_single_page_unchanged() {
        assert_eq!(join_pages(&pages(&["Jane Doe\nEngineer"])), "Jane Doe\nEngineer");
    }

    #[test]
    fn test_long_text_truncated_to_limit() {
        let long = "x".repeat(5000);
        let joined = join_pages(&pages(&[&long, &long]));
        assert_eq!(joined.chars().count(), MAX_RESUME_CHARS);
        assert!(joined.starts_with(&long));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let text = "é".repeat(MAX_RESUME_CHARS + 10);
        let truncated = truncate_chars(&text, MAX_RESUME_CHARS);
        assert_eq!(truncated.chars().count(), MAX_RESUME_CHARS);
        assert_eq!(truncated.len(), MAX_RESUME_CHARS * 2);
    }

    #[test]
    fn test_text_at_limit_untouched() {
        let text = "y".repeat(MAX_RESUME_CHARS);
        assert_eq!(truncate_chars(&text, MAX_RESUME_CHARS), text);
    }

    #[tokio::test]
    async fn test_two_page_pdf_extracts_pages_in_order() {
        let bytes = pdf_with_pages(&["A", "B"]);
        let text = PdfExtractor::default().extract(&bytes).await.unwrap();
        assert_eq!(text, "A\n\nB");
    }

    #[tokio::test]
    async fn test_long_pdf_is_capped_at_limit() {
        let line = "x".repeat(2500);
        let bytes = pdf_with_pages(&[&line, &line, &line]);

        let text = PdfExtractor::default().extract(&bytes).await.unwrap();

        assert_eq!(text.chars().count(), MAX_RESUME_CHARS);
        assert!(text.starts_with(&line));
    }

    #[tokio::test]
    async fn test_malformed_bytes_fail_and_leave_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = PdfExtractor::new(Some(dir.path().to_path_buf()));

        let result = extractor.extract(b"this is not a pdf at all").await;

        assert!(result.is_err(), "expected extraction failure");
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 0, "temporary PDF was not cleaned up");
    }

    #[tokio::test]
    async fn test_truncated_pdf_header_fails() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = PdfExtractor::new(Some(dir.path().to_path_buf()));

        let result = extractor.extract(b"%PDF-1.4\n1 0 obj\n<<").await;

        assert!(result.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_empty_upload_rejected_before_parsing() {
        let extractor = PdfExtractor::default();
        let err = extractor.extract(&[]).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));
    }

    #[tokio::test]
    async fn test_missing_temp_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let extractor = PdfExtractor::new(Some(missing));

        let err = extractor.extract(b"%PDF-1.4").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Io(_)));
    }
}
