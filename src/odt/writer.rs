//! Package re-serialization.
//!
//! The writer flushes a merged archive back to container bytes: original
//! entries in their original order, with mutated document parts serialized
//! from their trees and blobs copied verbatim, followed by every staged
//! file. The `mimetype` entry is stored uncompressed, as the ODF packaging
//! rules require.

use crate::common::Result;
use crate::odt::archive::{Archive, ArchiveEntry, EntryPayload, StagedFile};
use crate::odt::constants::{MIMETYPE, XML_DECLARATION};
use std::io::{Cursor, Write};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Writer for merged ODT packages
pub struct PackageWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl PackageWriter {
    /// Create a new package writer that writes to memory
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    fn options_for(path: &str) -> SimpleFileOptions {
        if path == MIMETYPE {
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
        } else {
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
        }
    }

    /// Write one original entry
    pub fn write_entry(&mut self, entry: &ArchiveEntry) -> Result<()> {
        if entry.path().ends_with('/') {
            self.zip
                .add_directory(entry.path(), SimpleFileOptions::default())?;
            return Ok(());
        }

        self.zip
            .start_file(entry.path(), Self::options_for(entry.path()))?;
        match entry.payload() {
            EntryPayload::Document(tree) => {
                self.zip.write_all(XML_DECLARATION.as_bytes())?;
                self.zip.write_all(tree.to_xml_string().as_bytes())?;
            },
            EntryPayload::Blob(bytes) => {
                self.zip.write_all(bytes)?;
            },
        }
        Ok(())
    }

    /// Append one staged file
    pub fn write_staged(&mut self, staged: &StagedFile) -> Result<()> {
        self.zip.start_file(
            staged.path.as_str(),
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        )?;
        self.zip.write_all(&staged.bytes)?;
        Ok(())
    }

    /// Finish writing and return the container bytes
    pub fn finish_to_bytes(self) -> Result<Vec<u8>> {
        Ok(self.zip.finish()?.into_inner())
    }
}

impl Default for PackageWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a merged archive: original entries in original order, then
/// staged files.
pub fn write_archive(archive: &Archive, staged: &[StagedFile]) -> Result<Vec<u8>> {
    let mut writer = PackageWriter::new();
    for entry in archive.entries() {
        writer.write_entry(entry)?;
    }
    for file in staged {
        writer.write_staged(file)?;
    }
    writer.finish_to_bytes()
}
