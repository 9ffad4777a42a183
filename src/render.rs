//! External rendering and batch packaging.
//!
//! Rendering a merged package to its final output format is delegated to an
//! external converter process. The core's contract with it is narrow: valid
//! package bytes in, rendered bytes out. [`Renderer`] keeps the engine free
//! of any dependency on how rendering is implemented, so tests can swap in
//! a mock; [`SofficeRenderer`] is the production implementation driving a
//! headless LibreOffice conversion.

use crate::common::{Error, Result};
use crate::odt::bindings::Bindings;
use crate::odt::merge::MailMerge;
use log::warn;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use std::process::Command;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

const RENDER_STEM: &str = "template";
const RENDER_FILTER: &str = "pdf:writer_pdf_Export";
const BUNDLE_EXT: &str = "pdf";

/// A collaborator that renders merged package bytes to an output format
pub trait Renderer {
    /// Render one merged package; any abnormal completion is surfaced as
    /// [`Error::RendererFailure`]
    fn render(&self, archive: &[u8]) -> Result<Vec<u8>>;
}

/// Renders through a headless LibreOffice (`soffice`) process
pub struct SofficeRenderer {
    executable: PathBuf,
}

impl SofficeRenderer {
    /// Use `soffice` from `PATH`
    pub fn new() -> Self {
        Self::with_executable("soffice")
    }

    /// Use a specific converter executable
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

impl Default for SofficeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for SofficeRenderer {
    fn render(&self, archive: &[u8]) -> Result<Vec<u8>> {
        let scratch = tempfile::tempdir()?;
        let input = scratch.path().join(format!("{RENDER_STEM}.odt"));
        std::fs::write(&input, archive)?;

        let output = Command::new(&self.executable)
            .arg("--headless")
            .arg("--convert-to")
            .arg(RENDER_FILTER)
            .arg(&input)
            .arg("--outdir")
            .arg(scratch.path())
            .output()?;

        if !output.status.success() {
            let diagnostic = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("renderer exited with {}: {diagnostic}", output.status);
            return Err(Error::RendererFailure(diagnostic));
        }

        let rendered = scratch.path().join(format!("{RENDER_STEM}.{BUNDLE_EXT}"));
        Ok(std::fs::read(rendered)?)
    }
}

/// Merge one binding set against the template and render the result
pub fn merge_and_render(
    template: &[u8],
    bindings: Bindings,
    renderer: &dyn Renderer,
) -> Result<Vec<u8>> {
    let merged = MailMerge::builder(template).bindings(bindings).build()?.merge()?;
    renderer.render(&merged)
}

/// Combine rendered outputs into one archive, one member per input in input
/// order, with zero-padded member names (`0000.pdf`, `0001.pdf`, …)
pub fn bundle_rendered(outputs: &[Vec<u8>]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (index, rendered) in outputs.iter().enumerate() {
        zip.start_file(format!("{index:04}.{BUNDLE_EXT}"), options)?;
        zip.write_all(rendered)?;
    }
    Ok(zip.finish()?.into_inner())
}
