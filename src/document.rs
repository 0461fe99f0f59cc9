//! Boundary for text that has already been extracted from an upload
//!
//! Binary formats (PDF, DOCX) are handled by the service layer; this crate
//! only accepts plain text, read from any seekable byte stream.

use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::errors::SummarizerError;

/// Something that can yield the text of a document.
pub trait TextSource {
    /// # Errors
    ///
    /// Returns `DocumentError` if the underlying stream cannot be read.
    fn read_text(&mut self) -> Result<String, SummarizerError>;
}

/// Plain UTF-8 text; invalid sequences are replaced rather than rejected.
#[derive(Debug)]
pub struct PlainText<R> {
    reader: R,
}

impl<R: Read + Seek> PlainText<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read + Seek> TextSource for PlainText<R> {
    fn read_text(&mut self) -> Result<String, SummarizerError> {
        self.reader.seek(SeekFrom::Start(0))?;
        let mut bytes = Vec::new();
        self.reader.read_to_end(&mut bytes)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Read the text of an uploaded file, choosing the reader by file name.
///
/// # Errors
///
/// Returns `DocumentError` for formats other than plain text, or if the
/// stream cannot be read.
pub fn extract_text<R: Read + Seek>(file_name: &str, reader: R) -> Result<String, SummarizerError> {
    let mime = mime_guess::from_path(Path::new(&file_name.to_lowercase())).first();
    match mime {
        Some(m) if m.type_() == mime_guess::mime::TEXT && m.subtype() == mime_guess::mime::PLAIN => {
            PlainText::new(reader).read_text()
        }
        _ => Err(SummarizerError::DocumentError(format!(
            "Unsupported file type for {file_name}. Provide extracted plain text"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_plain_text_reads_from_start() {
        let mut cursor = Cursor::new(b"Lease term is five years.".to_vec());
        cursor.seek(SeekFrom::End(0)).unwrap();
        let text = PlainText::new(cursor).read_text().unwrap();
        assert_eq!(text, "Lease term is five years.");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let cursor = Cursor::new(vec![b'o', b'k', 0xff, b'!']);
        let text = PlainText::new(cursor).read_text().unwrap();
        assert_eq!(text, "ok\u{fffd}!");
    }

    #[test]
    fn test_extract_text_accepts_txt() {
        let text = extract_text("NDA.TXT", Cursor::new(b"Confidential.".to_vec())).unwrap();
        assert_eq!(text, "Confidential.");
    }

    #[test]
    fn test_extract_text_rejects_binary_formats() {
        for name in ["contract.pdf", "contract.docx", "contract"] {
            let result = extract_text(name, Cursor::new(Vec::new()));
            assert!(matches!(result, Err(SummarizerError::DocumentError(_))), "{name}");
        }
    }
}
