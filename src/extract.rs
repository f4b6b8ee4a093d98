//! Document intake: turns a resume file (or stdin) into analyzable text.
//!
//! Only plain-text formats are decoded here. Binary document formats are
//! reported as unsupported instead of being scored as empty text.

use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions read as UTF-8 text (no extension is accepted too)
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md", "rtf", "html", "htm", "csv"];

/// Binary document formats that need an external converter
pub const BINARY_EXTENSIONS: &[&str] = &["pdf", "docx", "doc", "odt", "jpg", "jpeg", "png", "gif"];

/// Name used for documents read from stdin
pub const STDIN_NAME: &str = "<stdin>";

/// Distinct intake failures; none of them is turned into a score
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported format .{extension}: extract the text first and pass the file name with --name")]
    UnsupportedFormat { extension: String },

    #[error("Input is {size} bytes, above the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("Cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Text plus the file name the formatting analyzer looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub text: String,
    /// File name only, never the full path
    pub filename: Option<String>,
}

/// Read a resume from disk
pub fn extract_text(path: &Path, max_bytes: u64) -> Result<ExtractedDocument, ExtractError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if BINARY_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ExtractError::UnsupportedFormat { extension });
    }
    if !extension.is_empty() && !TEXT_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ExtractError::UnsupportedFormat { extension });
    }

    let unreadable = |source| ExtractError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(unreadable)?.len();
    if size > max_bytes {
        return Err(ExtractError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let bytes = std::fs::read(path).map_err(unreadable)?;
    Ok(ExtractedDocument {
        text: decode(&bytes),
        filename: path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string),
    })
}

/// Read a resume from stdin; `filename` supplies the original name, if any
pub fn read_stdin(max_bytes: u64, filename: Option<&str>) -> Result<ExtractedDocument, ExtractError> {
    read_from(std::io::stdin().lock(), max_bytes, filename)
}

fn read_from(
    reader: impl Read,
    max_bytes: u64,
    filename: Option<&str>,
) -> Result<ExtractedDocument, ExtractError> {
    let mut bytes = Vec::new();
    reader
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|source| ExtractError::Unreadable {
            path: PathBuf::from(STDIN_NAME),
            source,
        })?;

    if bytes.len() as u64 > max_bytes {
        return Err(ExtractError::TooLarge {
            size: bytes.len() as u64,
            limit: max_bytes,
        });
    }

    Ok(ExtractedDocument {
        text: decode(&bytes),
        filename: filename.filter(|f| !f.is_empty()).map(str::to_string),
    })
}

/// UTF-8 decode dropping invalid sequences and a leading BOM
fn decode(bytes: &[u8]) -> String {
    let text: String = bytes.utf8_chunks().map(|chunk| chunk.valid()).collect();
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn test_reads_plain_text() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "resume.txt", b"Jane Doe\nEngineer");
        let doc = extract_text(&path, 1024).unwrap();
        assert_eq!(doc.text, "Jane Doe\nEngineer");
        assert_eq!(doc.filename.as_deref(), Some("resume.txt"));
    }

    #[test]
    fn test_no_extension_is_text() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "RESUME", b"hello");
        assert_eq!(extract_text(&path, 1024).unwrap().text, "hello");
    }

    #[test]
    fn test_strips_bom_and_invalid_bytes() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "cv.md", b"\xEF\xBB\xBFab\xFFcd");
        assert_eq!(extract_text(&path, 1024).unwrap().text, "abcd");
    }

    #[test]
    fn test_binary_formats_unsupported() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "resume.PDF", b"%PDF-1.7");
        match extract_text(&path, 1024) {
            Err(ExtractError::UnsupportedFormat { extension }) => assert_eq!(extension, "pdf"),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_extension_unsupported() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "resume.pages", b"x");
        assert!(matches!(
            extract_text(&path, 1024),
            Err(ExtractError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_too_large() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "big.txt", &[b'a'; 64]);
        match extract_text(&path, 10) {
            Err(ExtractError::TooLarge { size, limit }) => {
                assert_eq!(size, 64);
                assert_eq!(limit, 10);
            }
            other => panic!("expected TooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_unreadable() {
        let err = extract_text(Path::new("/definitely/not/here.txt"), 1024).unwrap_err();
        assert!(matches!(err, ExtractError::Unreadable { .. }));
        assert!(err.to_string().contains("here.txt"));
    }

    #[test]
    fn test_reader_intake_and_limit() {
        let doc = read_from(&b"Ada Lovelace"[..], 100, Some("cv.pdf")).unwrap();
        assert_eq!(doc.text, "Ada Lovelace");
        assert_eq!(doc.filename.as_deref(), Some("cv.pdf"));

        let err = read_from(&b"0123456789"[..], 4, None).unwrap_err();
        assert!(matches!(err, ExtractError::TooLarge { size: 5, limit: 4 }));
    }
}
