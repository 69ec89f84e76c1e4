//! Document Renderer — record → layout → PDF → sink.
//!
//! Rendering never fails on record content. The only failures are PDF encoding
//! (`lopdf`) and a sink that cannot be written; neither is retried here.

pub mod pdf;

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::layout::{layout_resume, PageConfig};
use crate::models::resume::ResumeRecord;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write document: {0}")]
    Io(#[from] io::Error),

    #[error("PDF encoding error: {0}")]
    Pdf(#[from] lopdf::Error),
}

/// Renders `record` as a PDF and writes it to `sink`.
pub fn render_document<W: Write>(
    record: &ResumeRecord,
    config: &PageConfig,
    sink: &mut W,
) -> Result<(), RenderError> {
    let layout = layout_resume(record, config);
    pdf::write_pdf(&layout, sink)?;
    sink.flush()?;
    info!("Rendered resume document: {} page(s)", layout.page_count());
    Ok(())
}

/// Renders `record` into an in-memory PDF.
pub fn render_to_bytes(record: &ResumeRecord, config: &PageConfig) -> Result<Vec<u8>, RenderError> {
    let mut buffer = Vec::new();
    render_document(record, config, &mut buffer)?;
    Ok(buffer)
}

/// Renders `record` to a file at `path`, creating or truncating it.
pub fn write_document_file(
    record: &ResumeRecord,
    config: &PageConfig,
    path: &Path,
) -> Result<(), RenderError> {
    let mut file = File::create(path)?;
    render_document(record, config, &mut file)
}
