//! Source file parsing and text extraction.

use pdfchat_core::{AppError, AppResult};
use std::fs;
use std::path::Path;

/// Content type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Pdf,
    Markdown,
    PlainText,
    Unsupported,
}

impl ContentType {
    /// Detect content type from file extension.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Self::Pdf,
            Some("md") | Some("markdown") => Self::Markdown,
            Some("txt") | Some("text") => Self::PlainText,
            _ => Self::Unsupported,
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Markdown => "markdown",
            Self::PlainText => "text",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Extract the raw text of an uploaded file.
///
/// Every failure, including an unreadable file, an unsupported type and a
/// document with no extractable text, is reported as `ExtractionFailed`.
pub fn parse_file(path: &Path) -> AppResult<String> {
    let content_type = ContentType::from_path(path);
    tracing::debug!("Extracting {:?} as {}", path, content_type.as_str());

    let text = match content_type {
        ContentType::Pdf => {
            let bytes = fs::read(path).map_err(|e| {
                AppError::ExtractionFailed(format!("Failed to read {:?}: {}", path, e))
            })?;
            extract_pdf(&bytes)?
        }
        ContentType::Markdown | ContentType::PlainText => {
            fs::read_to_string(path).map_err(|e| {
                AppError::ExtractionFailed(format!("Failed to read {:?}: {}", path, e))
            })?
        }
        ContentType::Unsupported => {
            return Err(AppError::ExtractionFailed(format!(
                "Unsupported file type: {:?} (expected .pdf, .txt or .md)",
                path
            )));
        }
    };

    if text.trim().is_empty() {
        return Err(AppError::ExtractionFailed(format!(
            "No text could be extracted from {:?} (scanned or image-only document?)",
            path
        )));
    }

    Ok(text)
}

/// Extract text from PDF bytes.
pub fn extract_pdf(bytes: &[u8]) -> AppResult<String> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::ExtractionFailed(format!("PDF extraction failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_content_type_detection() {
        assert_eq!(ContentType::from_path(Path::new("a.pdf")), ContentType::Pdf);
        assert_eq!(ContentType::from_path(Path::new("A.PDF")), ContentType::Pdf);
        assert_eq!(
            ContentType::from_path(Path::new("notes.md")),
            ContentType::Markdown
        );
        assert_eq!(
            ContentType::from_path(Path::new("file.txt")),
            ContentType::PlainText
        );
        assert_eq!(
            ContentType::from_path(Path::new("sheet.xlsx")),
            ContentType::Unsupported
        );
        assert_eq!(
            ContentType::from_path(Path::new("README")),
            ContentType::Unsupported
        );
    }

    #[test]
    fn test_parse_plain_text() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        fs::write(&path, "Some notes.\n\nMore notes.").unwrap();

        assert_eq!(parse_file(&path).unwrap(), "Some notes.\n\nMore notes.");
    }

    #[test]
    fn test_parse_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = parse_file(&temp.path().join("missing.pdf"));
        assert!(matches!(result, Err(AppError::ExtractionFailed(_))));
    }

    #[test]
    fn test_parse_unsupported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("image.png");
        fs::write(&path, [0x89, 0x50, 0x4e, 0x47]).unwrap();

        assert!(matches!(
            parse_file(&path),
            Err(AppError::ExtractionFailed(_))
        ));
    }

    #[test]
    fn test_parse_blank_text() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blank.txt");
        fs::write(&path, "  \n\n ").unwrap();

        assert!(matches!(
            parse_file(&path),
            Err(AppError::ExtractionFailed(_))
        ));
    }

    #[test]
    fn test_garbage_pdf() {
        let result = extract_pdf(b"this is not a pdf");
        assert!(matches!(result, Err(AppError::ExtractionFailed(_))));
    }
}
