//! OPC package assembly and atomic file output.

use std::io::{Cursor, Write};
use std::path::Path;

use log::{debug, info};
use tempfile::{Builder, NamedTempFile};
use zip::write::SimpleFileOptions;
use zip::{DateTime, ZipWriter};

use crate::error::{Error, Result};
use crate::model::Document;

use super::{docx, xml};
use super::{Compression, WriteOptions};

/// Main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Style sheet part.
pub const STYLES_PART: &str = "word/styles.xml";

/// Core properties part.
pub const CORE_PART: &str = "docProps/core.xml";

/// Render every package part, in the order they are stored.
pub fn package_parts(
    doc: &Document,
    options: &WriteOptions,
) -> Result<Vec<(&'static str, String)>> {
    Ok(vec![
        ("[Content_Types].xml", docx::content_types_xml()?),
        ("_rels/.rels", docx::package_rels_xml()?),
        (CORE_PART, docx::core_xml(&doc.metadata)?),
        (DOCUMENT_PART, docx::document_xml(doc, options)?),
        (STYLES_PART, docx::styles_xml(doc, options)?),
        ("word/numbering.xml", docx::numbering_xml()?),
        ("word/_rels/document.xml.rels", docx::document_rels_xml()?),
    ])
}

/// Serialize a document to `.docx` bytes.
///
/// Entries carry a fixed timestamp, so equal documents give equal bytes.
/// Text XML cannot carry fails with `Error::InvalidCharacter` before anything
/// is written.
pub fn to_docx(doc: &Document, options: &WriteOptions) -> Result<Vec<u8>> {
    xml::check_document(doc)?;
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for (name, content) in package_parts(doc, options)? {
        zip.start_file(name, entry_options(options.compression))?;
        zip.write_all(content.as_bytes())?;
        debug!("Wrote part {} ({} bytes)", name, content.len());
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Serialize a document and write it to `path`.
///
/// The package is written to a temporary file next to the target and renamed
/// into place, so the target is either the complete new file or untouched.
pub fn write_file<P: AsRef<Path>>(doc: &Document, options: &WriteOptions, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_docx(doc, options)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = temp_file(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    info!(
        "Saved {} ({} blocks, {} bytes)",
        path.display(),
        doc.blocks.len(),
        bytes.len()
    );
    Ok(())
}

/// Temporary file in `dir` that ends up with the permissions of a plain write.
fn temp_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".docxgen");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // The umask still applies, as it does for File::create
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

fn entry_options(compression: Compression) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(compression.method())
        .last_modified_time(DateTime::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::DocumentAssembler;

    fn sample() -> Document {
        let mut asm = DocumentAssembler::new();
        asm.append_heading(1, "Intro").unwrap();
        asm.append_text("Normal", "Body text.").unwrap();
        asm.into_document()
    }

    #[test]
    fn test_to_docx_is_zip() {
        let bytes = to_docx(&sample(), &WriteOptions::default()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_to_docx_deterministic() {
        let options = WriteOptions::default();
        let first = to_docx(&sample(), &options).unwrap();
        let second = to_docx(&sample(), &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stored_is_larger() {
        let deflated = to_docx(&sample(), &WriteOptions::default()).unwrap();
        let stored = to_docx(&sample(), &WriteOptions::new().stored()).unwrap();
        assert!(stored.len() > deflated.len());
    }

    #[test]
    fn test_part_order() {
        let names: Vec<&str> = package_parts(&sample(), &WriteOptions::default())
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names[0], "[Content_Types].xml");
        assert!(names.contains(&DOCUMENT_PART));
        assert!(names.contains(&STYLES_PART));
    }

    #[test]
    fn test_invalid_text_rejected_before_write() {
        let mut doc = sample();
        doc.metadata.author = Some("A\u{1}".to_string());
        assert!(matches!(
            to_docx(&doc, &WriteOptions::default()),
            Err(Error::InvalidCharacter(1))
        ));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.docx");
        assert!(write_file(&doc, &WriteOptions::default(), &path).is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_mode_matches_plain_write() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let saved = dir.path().join("saved.docx");
        let plain = dir.path().join("plain.bin");
        write_file(&sample(), &WriteOptions::default(), &saved).unwrap();
        std::fs::write(&plain, b"x").unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&saved), mode(&plain));
    }
}
