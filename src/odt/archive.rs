//! In-memory model of an ODT package (ZIP archive).
//!
//! The archive is an ordered list of entries. Entries whose path ends in
//! `.xml` are parsed into mutable [`Element`] trees; everything else,
//! including directory entries, stays an opaque blob whose bytes are copied
//! through verbatim on write. One archive is loaded per merge operation and
//! discarded afterwards.

use crate::common::{Error, Result};
use crate::odt::constants::XML_EXT;
use crate::odt::element::Element;
use std::collections::HashSet;
use std::io::{Cursor, Read};

/// Payload of a single archive entry
#[derive(Debug, Clone)]
pub enum EntryPayload {
    /// A parsed structured document part
    Document(Element),
    /// An opaque binary entry, kept byte-for-byte
    Blob(Vec<u8>),
}

/// A single named entry of the package
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    path: String,
    payload: EntryPayload,
}

impl ArchiveEntry {
    /// Path of the entry within the package
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The entry's payload
    pub fn payload(&self) -> &EntryPayload {
        &self.payload
    }
}

/// A new entry computed during the merge, to be appended on write
#[derive(Debug, Clone)]
pub struct StagedFile {
    /// Path of the new entry within the package
    pub path: String,
    /// Raw payload bytes
    pub bytes: Vec<u8>,
}

/// An ODT package loaded into memory
#[derive(Debug, Clone)]
pub struct Archive {
    entries: Vec<ArchiveEntry>,
}

impl Archive {
    /// Load a package from raw container bytes.
    ///
    /// Entry order is preserved. Fails if the container is not a valid ZIP
    /// archive, if two entries share a path, or if a structured part is not
    /// well-formed XML (naming the offending entry).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut zip = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut entries = Vec::with_capacity(zip.len());
        let mut seen = HashSet::new();

        for index in 0..zip.len() {
            let mut file = zip.by_index(index)?;
            let path = file.name().to_string();
            if !seen.insert(path.clone()) {
                return Err(Error::MalformedTemplate(format!(
                    "duplicate entry {path}"
                )));
            }

            let mut content = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut content)?;

            let payload = if path.ends_with(XML_EXT) {
                let tree = Element::from_bytes(&content)
                    .map_err(|e| Error::MalformedTemplate(format!("{path}: {e}")))?;
                EntryPayload::Document(tree)
            } else {
                EntryPayload::Blob(content)
            };

            entries.push(ArchiveEntry { path, payload });
        }

        Ok(Self { entries })
    }

    /// All entries, in original package order
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Look up a structured document part by path
    pub fn document(&self, path: &str) -> Option<&Element> {
        self.entries.iter().find_map(|entry| match &entry.payload {
            EntryPayload::Document(tree) if entry.path == path => Some(tree),
            _ => None,
        })
    }

    /// Look up a structured document part by path, mutably
    pub fn document_mut(&mut self, path: &str) -> Option<&mut Element> {
        self.entries
            .iter_mut()
            .find_map(|entry| match &mut entry.payload {
                EntryPayload::Document(tree) if entry.path == path => Some(tree),
                _ => None,
            })
    }

    /// Look up two distinct document parts by path, mutably.
    ///
    /// Used by the image binder, which patches the content document and
    /// registers manifest entries in the same pass.
    pub fn documents_pair_mut(
        &mut self,
        first: &str,
        second: &str,
    ) -> (Option<&mut Element>, Option<&mut Element>) {
        let mut first_doc = None;
        let mut second_doc = None;

        for entry in &mut self.entries {
            if let EntryPayload::Document(tree) = &mut entry.payload {
                if entry.path == first {
                    first_doc = Some(tree);
                } else if entry.path == second {
                    second_doc = Some(tree);
                }
            }
        }

        (first_doc, second_doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::write::{SimpleFileOptions, ZipWriter};

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (path, content) in entries {
            if path.ends_with('/') {
                zip.add_directory(path.to_string(), options).unwrap();
            } else {
                zip.start_file(path.to_string(), options).unwrap();
                zip.write_all(content).unwrap();
            }
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_load_parses_xml_and_keeps_blobs() {
        let bytes = build_zip(&[
            ("mimetype", b"application/vnd.oasis.opendocument.text"),
            ("content.xml", b"<office:document-content/>"),
            ("Pictures/", b""),
            ("Pictures/a.png", b"\x89PNG"),
        ]);
        let archive = Archive::from_bytes(&bytes).unwrap();

        let paths: Vec<&str> = archive.entries().iter().map(|e| e.path()).collect();
        assert_eq!(
            paths,
            ["mimetype", "content.xml", "Pictures/", "Pictures/a.png"]
        );
        assert!(archive.document("content.xml").is_some());
        assert!(archive.document("Pictures/a.png").is_none());
        match archive.entries()[3].payload() {
            EntryPayload::Blob(bytes) => assert_eq!(bytes, b"\x89PNG"),
            EntryPayload::Document(_) => panic!("image parsed as document"),
        }
    }

    #[test]
    fn test_load_rejects_malformed_part_naming_it() {
        let bytes = build_zip(&[("content.xml", b"<open><no-close></open>")]);
        let err = Archive::from_bytes(&bytes).unwrap_err();

        match err {
            Error::MalformedTemplate(message) => assert!(message.contains("content.xml")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_rejects_non_zip_bytes() {
        assert!(matches!(
            Archive::from_bytes(b"not a zip"),
            Err(Error::Zip(_))
        ));
    }

    #[test]
    fn test_documents_pair_mut_yields_disjoint_parts() {
        let bytes = build_zip(&[
            ("content.xml", b"<a/>"),
            ("META-INF/manifest.xml", b"<m/>"),
        ]);
        let mut archive = Archive::from_bytes(&bytes).unwrap();

        let (content, manifest) =
            archive.documents_pair_mut("content.xml", "META-INF/manifest.xml");
        assert_eq!(content.unwrap().tag_name(), "a");
        assert_eq!(manifest.unwrap().tag_name(), "m");
    }
}
