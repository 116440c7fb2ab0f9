//! Document ingestion. Turns uploaded resume files into plain text for the matching engine.
//!
//! Supported: PDF (`pdf-extract`), DOCX (`word/document.xml` inside the zip container),
//! and UTF-8 plain text. Empty output is not an error; the engine scores it as 0.

mod docx;

use serde::Serialize;
use thiserror::Error;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("Document is not valid UTF-8 text: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Detects the kind from the declared content type, falling back to the file extension.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        let from_mime = content_type.and_then(|ct| {
            let mime = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            match mime.as_str() {
                PDF_MIME => Some(DocumentKind::Pdf),
                DOCX_MIME => Some(DocumentKind::Docx),
                "text/plain" => Some(DocumentKind::PlainText),
                _ => None,
            }
        });

        from_mime.or_else(|| {
            let extension = file_name?.rsplit_once('.')?.1.to_ascii_lowercase();
            match extension.as_str() {
                "pdf" => Some(DocumentKind::Pdf),
                "docx" => Some(DocumentKind::Docx),
                "txt" | "text" | "md" => Some(DocumentKind::PlainText),
                _ => None,
            }
        })
    }
}

/// Extracts plain text from raw document bytes.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, IngestError> {
    match kind {
        DocumentKind::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| IngestError::Pdf(e.to_string()))
        }
        DocumentKind::Docx => docx::extract_docx_text(bytes),
        DocumentKind::PlainText => Ok(String::from_utf8(bytes.to_vec())?),
    }
}

/// Detects the kind and extracts in one step.
pub fn extract_document(
    content_type: Option<&str>,
    file_name: Option<&str>,
    bytes: &[u8],
) -> Result<String, IngestError> {
    let kind = DocumentKind::detect(content_type, file_name).ok_or_else(|| {
        IngestError::UnsupportedFormat(
            content_type
                .or(file_name)
                .unwrap_or("unknown")
                .to_string(),
        )
    })?;
    extract_text(kind, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_from_content_type() {
        assert_eq!(
            DocumentKind::detect(Some("application/pdf"), None),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::detect(Some(DOCX_MIME), Some("cv.bin")),
            Some(DocumentKind::Docx)
        );
        assert_eq!(
            DocumentKind::detect(Some("text/plain; charset=utf-8"), None),
            Some(DocumentKind::PlainText)
        );
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        assert_eq!(
            DocumentKind::detect(Some("application/octet-stream"), Some("Jane_Doe.PDF")),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::detect(None, Some("resume.docx")),
            Some(DocumentKind::Docx)
        );
        assert_eq!(DocumentKind::detect(None, Some("resume")), None);
        assert_eq!(DocumentKind::detect(None, Some("photo.png")), None);
        assert_eq!(DocumentKind::detect(None, None), None);
    }

    #[test]
    fn test_plain_text_round_trip() {
        let text = extract_text(DocumentKind::PlainText, "Rust · Kubernetes".as_bytes()).unwrap();
        assert_eq!(text, "Rust · Kubernetes");
    }

    #[test]
    fn test_invalid_utf8_is_encoding_error() {
        let err = extract_text(DocumentKind::PlainText, &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, IngestError::Encoding(_)));
    }

    #[test]
    fn test_garbage_pdf_never_yields_text() {
        let result = std::panic::catch_unwind(|| extract_text(DocumentKind::Pdf, b"not a pdf"));
        // pdf-extract may panic on malformed input; callers isolate it on a blocking task.
        if let Ok(inner) = result {
            assert!(matches!(inner, Err(IngestError::Pdf(_))));
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = extract_document(Some("image/png"), Some("me.png"), b"\x89PNG").unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat(ref f) if f == "image/png"));
    }
}
