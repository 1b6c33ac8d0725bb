//! End-to-end conversion run.
//!
//! Both documents are parsed fully, the chapter list is extracted and
//! injected in memory, and the patched text is written in one atomic step.
//! Any failure before the write leaves the destination untouched.

use std::path::PathBuf;

use crate::atomic::atomic_write;
use crate::error::{ConvertError, ConvertResult};
use crate::fcp::{extract_project, FcpProject};
use crate::mydvd::{inject_chapters, InjectedChapter};
use crate::options::ConvertOptions;
use crate::xml::{patch_serialized, Document, RenderOptions};

/// Inputs for one conversion.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    /// Final Cut Pro XML export.
    pub fcp_path: PathBuf,
    /// MyDVD project used as the template.
    pub mydvd_path: PathBuf,
    /// Event name in the Final Cut Pro library.
    pub event: String,
    /// Project name under the event.
    pub project: String,
    /// Where the patched MyDVD project is written.
    pub destination: PathBuf,
}

/// Result of a conversion, written or not.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub project: FcpProject,
    /// Chapters in the order they were written, start of movie first.
    pub chapters: Vec<InjectedChapter>,
    /// Final document text, exactly as written to disk.
    pub output: String,
}

/// Convert already parsed documents. `mydvd` is consumed and rewritten.
pub fn convert_documents(
    fcp: &Document,
    mut mydvd: Document,
    event: &str,
    project: &str,
    options: &ConvertOptions,
) -> ConvertResult<Conversion> {
    let fcp_project = extract_project(&fcp.root, event, project, options)?;
    let chapters = inject_chapters(&mut mydvd.root, &fcp_project, options)?;

    let rendered = mydvd.render(&RenderOptions {
        xml_declaration: options.xml_declaration,
    })?;

    Ok(Conversion {
        project: fcp_project,
        chapters,
        output: patch_serialized(&rendered),
    })
}

/// Read both inputs and run the conversion without writing anything.
pub fn prepare(request: &ConvertRequest, options: &ConvertOptions) -> ConvertResult<Conversion> {
    tracing::debug!("Reading {}", request.fcp_path.display());
    let fcp = Document::open(&request.fcp_path)?;
    tracing::debug!("Reading {}", request.mydvd_path.display());
    let mydvd = Document::open(&request.mydvd_path)?;

    convert_documents(&fcp, mydvd, &request.event, &request.project, options)
}

/// Run the conversion and write the destination file.
pub fn convert(request: &ConvertRequest, options: &ConvertOptions) -> ConvertResult<Conversion> {
    let conversion = prepare(request, options)?;

    atomic_write(&request.destination, &conversion.output)
        .map_err(|e| ConvertError::io(&request.destination, e))?;

    tracing::info!(
        "Wrote {} chapters to {}",
        conversion.chapters.len(),
        request.destination.display()
    );
    Ok(conversion)
}
