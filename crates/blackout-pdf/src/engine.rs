//! The pdfium-backed engine: text block extraction and rasterizing
//! redaction.
//!
//! Redaction does not annotate: each page is rendered to a bitmap, the
//! redacted blocks are painted over in black, and a new PDF is assembled
//! from the page images. The covered text does not exist in the output
//! file, so it cannot be recovered by deleting an annotation or copying
//! the text layer.

use std::collections::{BTreeSet, HashMap};

use blackout_core::TextBlock;
use image::DynamicImage;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use pdfium_render::prelude::*;
use tracing::{debug, info};

use crate::error::PdfError;
use crate::layout::{self, Segment};

/// Pixels per point when rasterizing pages for redaction. Two gives
/// 144 dpi, crisp enough for contract text without bloating the output.
const RENDER_SCALE: f32 = 2.0;

fn bind() -> Result<Pdfium, PdfError> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())?;
    Ok(Pdfium::new(bindings))
}

/// Extract text blocks from a PDF, in reading order with sequential IDs.
pub fn extract_blocks(pdf_bytes: &[u8]) -> Result<Vec<TextBlock>, PdfError> {
    let pdfium = bind()?;
    let document = pdfium.load_pdf_from_byte_slice(pdf_bytes, None)?;
    if document.pages().len() == 0 {
        return Err(PdfError::EmptyDocument);
    }

    let mut blocks = Vec::new();
    let mut next_id: u32 = 0;

    for (page_index, page) in document.pages().iter().enumerate() {
        let page_number = page_index as u32 + 1;
        let page_height = page.height().value;

        let text = page.text()?;
        let mut segments: Vec<Segment> = Vec::new();
        for segment in text.segments().iter() {
            let content = segment.text();
            let content = content.trim();
            if content.is_empty() {
                continue;
            }
            let bounds = segment.bounds();
            // pdfium reports bottom-left origin; flip to top-left.
            segments.push(Segment {
                text: content.to_string(),
                bbox: [
                    bounds.left().value,
                    page_height - bounds.top().value,
                    bounds.right().value,
                    page_height - bounds.bottom().value,
                ],
            });
        }

        layout::sort_reading_order(&mut segments);
        let grouped = layout::group_segments(&segments);
        debug!(page = page_number, segments = segments.len(), blocks = grouped.len(), "extracted page");

        for raw in grouped {
            blocks.push(TextBlock {
                block_id: next_id,
                page_number,
                bbox: raw.bbox,
                text: raw.text,
            });
            next_id += 1;
        }
    }

    if blocks.is_empty() {
        return Err(PdfError::NoTextBlocks);
    }
    info!(blocks = blocks.len(), "extracted text blocks");
    Ok(blocks)
}

/// Produce a redacted copy of the PDF with the given blocks blacked out.
///
/// Every page is replaced by its rendered image, including pages with no
/// redactions, so redacted and untouched pages are indistinguishable.
pub fn redact_blocks(
    pdf_bytes: &[u8],
    blocks: &[TextBlock],
    redact: &BTreeSet<u32>,
) -> Result<Vec<u8>, PdfError> {
    let pdfium = bind()?;
    let document = pdfium.load_pdf_from_byte_slice(pdf_bytes, None)?;
    if document.pages().len() == 0 {
        return Err(PdfError::EmptyDocument);
    }

    let mut boxes_by_page: HashMap<u32, Vec<[f32; 4]>> = HashMap::new();
    for block in blocks.iter().filter(|b| redact.contains(&b.block_id)) {
        boxes_by_page
            .entry(block.page_number)
            .or_default()
            .push(block.bbox);
    }

    let mut output = pdfium.create_new_pdf()?;

    for (page_index, page) in document.pages().iter().enumerate() {
        let page_number = page_index as u32 + 1;
        let width_pts = page.width().value;
        let height_pts = page.height().value;
        let pixel_width = (width_pts * RENDER_SCALE) as i32;
        let pixel_height = (height_pts * RENDER_SCALE) as i32;

        let bitmap = page.render_with_config(
            &PdfRenderConfig::new()
                .set_target_width(pixel_width)
                .set_target_height(pixel_height)
                .render_form_data(true)
                .render_annotations(true),
        )?;
        let mut img = bitmap.as_image().to_rgba8();

        let boxes = boxes_by_page.get(&page_number).map_or(&[][..], Vec::as_slice);
        let mut painted = 0usize;
        for bbox in boxes {
            if let Some(rect) =
                layout::pixel_rect(*bbox, RENDER_SCALE, img.width(), img.height())
            {
                draw_filled_rect_mut(
                    &mut img,
                    Rect::at(rect.x, rect.y).of_size(rect.width, rect.height),
                    image::Rgba([0, 0, 0, 255]),
                );
                painted += 1;
            }
        }
        debug!(page = page_number, painted, "rasterized page");

        let image = DynamicImage::ImageRgba8(img);
        let mut new_page = output.pages_mut().create_page_at_end(
            PdfPagePaperSize::Custom(PdfPoints::new(width_pts), PdfPoints::new(height_pts)),
        )?;
        new_page.objects_mut().create_image_object(
            PdfPoints::new(0.0),
            PdfPoints::new(0.0),
            &image,
            Some(PdfPoints::new(width_pts)),
            Some(PdfPoints::new(height_pts)),
        )?;
    }

    let bytes = output.save_to_bytes()?;
    info!(
        pages = document.pages().len(),
        redacted = redact.len(),
        bytes = bytes.len(),
        "built redacted copy"
    );
    Ok(bytes)
}
