// Document layout: page geometry, font metrics, and line placement.
// Pure and synchronous; the PDF writer in `render` consumes its output.

pub mod flow;
pub mod font_metrics;

// Re-export the public API consumed by the renderer and the handlers.
pub use flow::{layout_resume, DocumentLayout, LineKind, PageLayout, PlacedLine};
pub use font_metrics::{default_page_config, FontFace, PageConfig, PaperSize};
