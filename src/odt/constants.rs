//! ODT part paths, XML tag and attribute names, and media types.
//!
//! The merge engine manipulates a small, fixed subset of the OpenDocument
//! vocabulary: scalar field markers, tables, drawing frames, and manifest
//! file entries. Everything it touches by name is collected here.

// ============================================================================
// PACKAGE PART PATHS
// ============================================================================

/// Main content document of the package
pub const CONTENT_XML: &str = "content.xml";

/// Manifest listing every payload entry and its media type
pub const MANIFEST_XML: &str = "META-INF/manifest.xml";

/// MIME type marker entry (must be stored uncompressed, first in the archive)
pub const MIMETYPE: &str = "mimetype";

/// Directory under which staged image payloads are written
pub const PICTURES_DIR: &str = "Pictures";

/// Extension given to staged image payloads
pub const IMAGE_EXT: &str = "png";

/// Manifest media type registered for staged image payloads
pub const IMAGE_MEDIA_TYPE: &str = "image/png";

/// Relative-path marker stripped from embedded object references
pub const RELATIVE_PREFIX: &str = "./";

/// Name of the data table inside a chart's own content document
pub const CHART_LOCAL_TABLE: &str = "local-table";

/// Extension that marks a package entry as a structured document part
pub const XML_EXT: &str = ".xml";

/// Declaration emitted ahead of every re-serialized document part
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

// ============================================================================
// XML TAGS
// ============================================================================

/// Scalar field placeholder marker
pub const TAG_DATABASE_DISPLAY: &str = "text:database-display";

/// Table structure
pub const TAG_TABLE: &str = "table:table";

/// Table row
pub const TAG_TABLE_ROW: &str = "table:table-row";

/// Table cell
pub const TAG_TABLE_CELL: &str = "table:table-cell";

/// Paragraph (carries a cell's rendered text)
pub const TAG_PARAGRAPH: &str = "text:p";

/// Drawing frame holding an image or an embedded chart object
pub const TAG_FRAME: &str = "draw:frame";

/// Manifest root element
pub const TAG_MANIFEST: &str = "manifest:manifest";

/// Manifest payload entry
pub const TAG_FILE_ENTRY: &str = "manifest:file-entry";

// ============================================================================
// XML ATTRIBUTES
// ============================================================================

/// Logical name of a table
pub const ATTR_TABLE_NAME: &str = "table:name";

/// Logical name of a drawing frame
pub const ATTR_DRAW_NAME: &str = "draw:name";

/// Embedded reference of an image or object element
pub const ATTR_XLINK_HREF: &str = "xlink:href";

/// Manifest entry path
pub const ATTR_FULL_PATH: &str = "manifest:full-path";

/// Manifest entry media type
pub const ATTR_MEDIA_TYPE: &str = "manifest:media-type";

/// Typed value of a table cell
pub const ATTR_OFFICE_VALUE: &str = "office:value";

/// Value type of a table cell
pub const ATTR_OFFICE_VALUE_TYPE: &str = "office:value-type";

/// Cell value type for numeric literals
pub const VALUE_TYPE_FLOAT: &str = "float";

/// Cell value type for everything else
pub const VALUE_TYPE_STRING: &str = "string";
