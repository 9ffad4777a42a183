//! Pomelo - a mail merge engine for OpenDocument Text templates
//!
//! This library fills .odt templates with caller-supplied data: scalar text
//! fields, tables, images, and embedded chart tables. It mutates the
//! package's XML parts in memory and re-serializes a structurally valid
//! package, preserving entry order and keeping the manifest in sync with
//! staged image payloads. Failures are precise: a missing field, an
//! unmatched binding key, or a row-shape mismatch is reported by name, not
//! as a silently broken document.
//!
//! # Example - Merging a template
//!
//! ```no_run
//! use pomelo::{Bindings, merge};
//!
//! # fn main() -> pomelo::Result<()> {
//! let template = std::fs::read("invoice.odt")?;
//!
//! let mut bindings = Bindings::new();
//! bindings.texts.insert("name".to_string(), "John".to_string());
//! bindings.tables.insert(
//!     "Items".to_string(),
//!     vec![
//!         vec!["Widget".to_string(), "3.50".to_string()],
//!         vec!["Gadget".to_string(), "12".to_string()],
//!     ],
//! );
//!
//! let merged = merge(&template, bindings)?;
//! std::fs::write("invoice-merged.odt", merged)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Rendering and batching
//!
//! ```no_run
//! use pomelo::{Bindings, SofficeRenderer, bundle_rendered, merge_and_render};
//!
//! # fn main() -> pomelo::Result<()> {
//! let template = std::fs::read("letter.odt")?;
//! let renderer = SofficeRenderer::new();
//!
//! let mut rendered = Vec::new();
//! for name in ["John", "Marry"] {
//!     let mut bindings = Bindings::new();
//!     bindings.texts.insert("name".to_string(), name.to_string());
//!     rendered.push(merge_and_render(&template, bindings, &renderer)?);
//! }
//!
//! std::fs::write("letters.zip", bundle_rendered(&rendered)?)?;
//! # Ok(())
//! # }
//! ```

/// Common types: errors and results
pub mod common;
/// ODT package model, binders, and merge engine
pub mod odt;
/// External rendering and batch packaging
pub mod render;

// Re-exports for convenience
pub use common::{BindingKind, Error, Result};
pub use odt::merge::merge;
pub use odt::{Archive, Bindings, Grid, MailMerge, MailMergeBuilder, StagedFile};
pub use render::{Renderer, SofficeRenderer, bundle_rendered, merge_and_render};
