//! Per-session memo of the extracted resume text, keyed by a content fingerprint.
//!
//! Holds at most one resume: storing a different upload discards the previous text.

use bytes::Bytes;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::resume::extractor::{ExtractionError, PdfExtractor};

/// Hex-encoded SHA-256 of an uploaded file.
pub fn fingerprint(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// An uploaded resume file and, once parsed, its text.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: Option<String>,
    pub fingerprint: String,
    bytes: Bytes,
    text: Option<String>,
}

#[derive(Debug, Default)]
pub struct ResumeCache {
    current: Option<ResumeUpload>,
    parses: u32,
}

impl ResumeCache {
    /// Stores an upload. Returns `true` if it replaced a different file.
    /// Re-uploading identical bytes keeps the already extracted text.
    pub fn store(&mut self, file_name: Option<String>, bytes: Bytes) -> bool {
        let fingerprint = fingerprint(&bytes);

        if let Some(current) = &mut self.current {
            if current.fingerprint == fingerprint {
                current.file_name = file_name;
                return false;
            }
        }

        let replaced = self.current.is_some();
        self.current = Some(ResumeUpload {
            file_name,
            fingerprint,
            bytes,
            text: None,
        });
        replaced
    }

    pub fn current(&self) -> Option<&ResumeUpload> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Number of times the stored uploads were actually parsed.
    #[cfg(test)]
    pub fn parse_count(&self) -> u32 {
        self.parses
    }

    /// Returns the resume text, parsing the upload only on first use.
    /// A failed parse is not cached; the next call tries again.
    pub async fn text(&mut self, extractor: &PdfExtractor) -> Result<Option<String>, ExtractionError> {
        match &self.current {
            None => return Ok(None),
            Some(upload) if upload.text.is_some() => {
                debug!("Resume cache hit for {}", upload.fingerprint);
                return Ok(upload.text.clone());
            }
            Some(_) => {}
        }

        self.parses += 1;
        debug!("Parsing resume upload (parse #{})", self.parses);
        let Some(upload) = self.current.as_mut() else {
            return Ok(None);
        };
        let text = extractor.extract(&upload.bytes).await?;
        upload.text = Some(text.clone());
        Ok(Some(text))
    }

    #[cfg(test)]
    pub(crate) fn store_text(&mut self, file_name: &str, text: &str) {
        let bytes = Bytes::from(format!("{file_name}:{text}"));
        self.store(Some(file_name.to_string()), bytes);
        if let Some(upload) = self.current.as_mut() {
            upload.text = Some(text.to_string());
        }
    }
}
