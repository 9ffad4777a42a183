//! The merge operation.
//!
//! A [`MailMerge`] is the short-lived context of exactly one merge: the
//! template archive loaded into memory, the normalized binding set, and the
//! files staged along the way. The phases run in a fixed order (scalar
//! fields, tables, images, charts) and the writer flushes the result. A
//! phase whose binding map is empty is skipped without touching the
//! package. On any failure the whole context is dropped, so a caller never
//! observes a partially merged archive.
//!
//! # Examples
//!
//! ```no_run
//! use pomelo::{Bindings, merge};
//!
//! # fn main() -> pomelo::Result<()> {
//! let template = std::fs::read("template.odt")?;
//! let mut bindings = Bindings::new();
//! bindings.texts.insert("name".to_string(), "John".to_string());
//! let merged = merge(&template, bindings)?;
//! std::fs::write("merged.odt", merged)?;
//! # Ok(())
//! # }
//! ```

use crate::common::{Error, Result};
use crate::odt::archive::{Archive, StagedFile};
use crate::odt::bindings::{Bindings, Grid};
use crate::odt::constants::{CONTENT_XML, MANIFEST_XML};
use crate::odt::{charts, fields, images, tables, writer};
use log::debug;
use std::collections::HashMap;

/// Perform one merge operation: load the template, apply the bindings,
/// return the merged package bytes.
pub fn merge(template: &[u8], bindings: Bindings) -> Result<Vec<u8>> {
    MailMerge::builder(template).bindings(bindings).build()?.merge()
}

/// One in-flight merge operation
#[derive(Debug)]
pub struct MailMerge {
    archive: Archive,
    texts: HashMap<String, String>,
    tables: HashMap<String, Grid>,
    images: HashMap<String, Vec<u8>>,
    charts: HashMap<String, Grid>,
    staged: Vec<StagedFile>,
}

impl MailMerge {
    /// Start building a merge operation over the given template bytes
    pub fn builder(template: &[u8]) -> MailMergeBuilder {
        MailMergeBuilder {
            template: template.to_vec(),
            bindings: Bindings::new(),
        }
    }

    /// Run all binder phases and serialize the merged package
    pub fn merge(mut self) -> Result<Vec<u8>> {
        if !self.texts.is_empty() {
            debug!("substituting {} scalar fields", self.texts.len());
            let content = self
                .archive
                .document_mut(CONTENT_XML)
                .ok_or_else(missing_content)?;
            fields::substitute_fields(content, &self.texts)?;
        }

        if !self.tables.is_empty() {
            debug!("filling {} tables", self.tables.len());
            let content = self
                .archive
                .document_mut(CONTENT_XML)
                .ok_or_else(missing_content)?;
            tables::fill_tables(content, &self.tables)?;
        }

        if !self.images.is_empty() {
            debug!("binding {} images", self.images.len());
            let (content, manifest) =
                self.archive.documents_pair_mut(CONTENT_XML, MANIFEST_XML);
            let content = content.ok_or_else(missing_content)?;
            let manifest = manifest.ok_or_else(|| {
                Error::MalformedTemplate(format!("{MANIFEST_XML} is missing"))
            })?;
            images::bind_images(content, manifest, &self.images, &mut self.staged)?;
        }

        if !self.charts.is_empty() {
            debug!("binding {} charts", self.charts.len());
            charts::bind_charts(&mut self.archive, &self.charts)?;
        }

        writer::write_archive(&self.archive, &self.staged)
    }
}

fn missing_content() -> Error {
    Error::MalformedTemplate(format!("{CONTENT_XML} is missing"))
}

/// Builder collecting the binding set for one merge operation
pub struct MailMergeBuilder {
    template: Vec<u8>,
    bindings: Bindings,
}

impl MailMergeBuilder {
    /// Add scalar text bindings
    pub fn texts(mut self, texts: HashMap<String, String>) -> Self {
        self.bindings.texts.extend(texts);
        self
    }

    /// Add table bindings
    pub fn tables(mut self, tables: HashMap<String, Grid>) -> Self {
        self.bindings.tables.extend(tables);
        self
    }

    /// Add image bindings
    pub fn images(mut self, images: HashMap<String, Vec<u8>>) -> Self {
        self.bindings.images.extend(images);
        self
    }

    /// Add chart bindings
    pub fn charts(mut self, charts: HashMap<String, Grid>) -> Self {
        self.bindings.charts.extend(charts);
        self
    }

    /// Replace the whole binding set at once
    pub fn bindings(mut self, bindings: Bindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Load the template archive and normalize the scalar keys.
    ///
    /// Fails if the container or any of its structured parts is malformed.
    pub fn build(self) -> Result<MailMerge> {
        let archive = Archive::from_bytes(&self.template)?;
        let texts = self
            .bindings
            .texts
            .into_iter()
            .map(|(key, value)| (format!("<{key}>"), value))
            .collect();

        Ok(MailMerge {
            archive,
            texts,
            tables: self.bindings.tables,
            images: self.bindings.images,
            charts: self.bindings.charts,
            staged: Vec::new(),
        })
    }
}
