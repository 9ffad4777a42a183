//! OpenDocument Text (.odt) mail merge.
//!
//! An ODT template is a ZIP package of linked XML parts. The merge loads
//! the package into an ordered in-memory [`Archive`], runs four binder
//! phases against the parsed document trees (scalar field substitution,
//! table filling, image binding, chart binding), and re-serializes a valid
//! package. Each merge operation is self-contained: the archive, the
//! normalized binding set, and the staged files live exactly as long as the
//! operation, and the template bytes are never mutated, so independent
//! operations can safely share them.
//!
//! Binder failures are precise and fail fast: a placeholder without a
//! binding names its literal text, an unconsumed table/image/chart key
//! names the key, and a row whose shape disagrees with the bound grid names
//! the table and both cell counts.

/// Archive model and loader
pub mod archive;
/// Caller-supplied merge data
pub mod bindings;
/// Chart binding
pub(crate) mod charts;
/// Part paths, tags, attributes, and media types
pub(crate) mod constants;
/// Mutable element tree for XML parts
pub mod element;
/// Scalar field substitution
pub(crate) mod fields;
/// Image binding
pub(crate) mod images;
/// The merge operation and its builder
pub mod merge;
/// Table filling
pub(crate) mod tables;
/// Package re-serialization
pub mod writer;

// Re-export the main types for convenience
pub use archive::{Archive, ArchiveEntry, EntryPayload, StagedFile};
pub use bindings::{Bindings, Grid};
pub use element::{Element, Node};
pub use merge::{MailMerge, MailMergeBuilder};
pub use writer::PackageWriter;
