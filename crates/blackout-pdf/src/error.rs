use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("document has no pages")]
    EmptyDocument,

    #[error("document contains no extractable text")]
    NoTextBlocks,

    #[cfg(feature = "pdfium")]
    #[error("pdfium: {0}")]
    Pdfium(#[from] pdfium_render::prelude::PdfiumError),
}
