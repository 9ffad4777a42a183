//! Unified error types for merge operations.
//!
//! Every failure a merge can produce is a caller-facing validation or
//! structural error; none of them are retryable. Binders fail fast on the
//! first violation they detect, and the in-memory archive is discarded on
//! failure, so the caller never observes a partially merged package.

use thiserror::Error;

/// Category of a binding key that was never matched against the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// A table binding (`table:table` structure)
    Table,
    /// An image binding (`draw:frame` holding an image)
    Image,
    /// A chart binding (`draw:frame` holding an embedded object)
    Chart,
}

impl std::fmt::Display for BindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingKind::Table => write!(f, "Table"),
            BindingKind::Image => write!(f, "Image"),
            BindingKind::Chart => write!(f, "Chart"),
        }
    }
}

/// Main error type for merge operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML parsing or serialization error
    #[error("XML error: {0}")]
    Xml(String),

    /// A scalar placeholder in the content document has no matching binding
    #[error("Field {0} is missing")]
    MissingField(String),

    /// A supplied binding key was never matched to a structure in the template
    #[error("{kind} {name} not found")]
    UnmatchedBinding {
        /// Which binding mapping the key came from
        kind: BindingKind,
        /// The unmatched key
        name: String,
    },

    /// A bound row's cell count differs from the template row's cell count
    #[error("Expected {expected} columns but got {got} columns in table {table}")]
    ShapeMismatch {
        /// Name of the offending table
        table: String,
        /// Cell slots in the template row
        expected: usize,
        /// Cells in the bound row
        got: usize,
    },

    /// A template part failed to parse, or a part referenced by the template
    /// is missing from the package
    #[error("Malformed template: {0}")]
    MalformedTemplate(String),

    /// The external renderer exited abnormally
    #[error("Renderer failed: {0}")]
    RendererFailure(String),
}

/// Result type for merge operations.
pub type Result<T> = std::result::Result<T, Error>;
