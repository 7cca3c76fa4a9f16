//! Source format detection.

use crate::error::{Error, Result};
use crate::model::SourceFormat;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// ZIP local file header, the container of every DOCX file.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// OLE compound file header used by legacy binary `.doc` files.
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Determine the source format from a file extension.
///
/// `.doc` maps to DOCX here; the binary legacy format is rejected later by
/// [`detect_format_from_bytes`] once the content is inspected.
///
/// # Example
/// ```
/// use dochtml::detect::format_from_extension;
/// use dochtml::SourceFormat;
///
/// assert_eq!(format_from_extension("TXT"), Some(SourceFormat::Text));
/// assert_eq!(format_from_extension("pdf"), None);
/// ```
pub fn format_from_extension(ext: &str) -> Option<SourceFormat> {
    match ext.to_ascii_lowercase().as_str() {
        "txt" => Some(SourceFormat::Text),
        "docx" | "doc" => Some(SourceFormat::Docx),
        _ => None,
    }
}

/// Determine the source format from a path's extension.
pub fn format_from_path<P: AsRef<Path>>(path: P) -> Option<SourceFormat> {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .and_then(format_from_extension)
}

/// Detect the source format from the leading bytes of a file.
///
/// ZIP containers are DOCX, OLE containers are rejected as unsupported,
/// and anything else is treated as text.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<SourceFormat> {
    if data.starts_with(ZIP_MAGIC) {
        return Ok(SourceFormat::Docx);
    }
    if data.starts_with(OLE_MAGIC) {
        return Err(Error::UnsupportedFormat(
            "legacy binary .doc (OLE compound file)".to_string(),
        ));
    }
    Ok(SourceFormat::Text)
}

/// Detect the source format of a file.
///
/// The extension decides first; the content is then checked so that a
/// `.doc` or `.docx` that is not a ZIP container is reported instead of
/// being misparsed.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<SourceFormat> {
    let path = path.as_ref();
    let by_extension = format_from_path(path).ok_or(Error::UnknownFormat)?;

    let mut header = Vec::with_capacity(OLE_MAGIC.len());
    File::open(path)?
        .take(OLE_MAGIC.len() as u64)
        .read_to_end(&mut header)?;

    match (by_extension, detect_format_from_bytes(&header)?) {
        (SourceFormat::Docx, SourceFormat::Text) => Err(Error::UnsupportedFormat(format!(
            "{} is not a ZIP-based DOCX file",
            path.display()
        ))),
        (SourceFormat::Text, _) => Ok(SourceFormat::Text),
        (SourceFormat::Docx, SourceFormat::Docx) => Ok(SourceFormat::Docx),
    }
}

/// Check whether a path has an extension the converter handles.
pub fn is_supported<P: AsRef<Path>>(path: P) -> bool {
    format_from_path(path).is_some()
}
