//! Document text extraction: turns an uploaded resume PDF into one plain-text string.
//!
//! Pages are extracted in ascending order and concatenated with no separator.
//! A page without extractable text contributes an empty string; only a document
//! that cannot be read at all is an error.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("the uploaded file is empty")]
    Empty,

    #[error("{0}")]
    Unreadable(String),

    #[error("the PDF reader aborted while parsing the document")]
    ReaderAborted,
}

/// Extracts the text of every page of a PDF, in page order.
///
/// Parsing is CPU-bound and the underlying reader may panic on hostile input,
/// so it runs on the blocking pool and a panic is reported as `ReaderAborted`.
pub async fn extract_pdf_text(payload: Bytes) -> Result<String, DocumentError> {
    if payload.is_empty() {
        return Err(DocumentError::Empty);
    }

    tokio::task::spawn_blocking(move || extract_pages(&payload))
        .await
        .map_err(|_| DocumentError::ReaderAborted)?
}

fn extract_pages(payload: &[u8]) -> Result<String, DocumentError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(payload)
        .map_err(|e| DocumentError::Unreadable(e.to_string()))?;

    debug!("Extracted text from {} PDF page(s)", pages.len());

    Ok(pages.concat())
}
