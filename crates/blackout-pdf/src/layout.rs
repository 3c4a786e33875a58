//! Page layout math that does not touch pdfium: reading-order sort,
//! grouping of text segments into blocks, and point-to-pixel rectangle
//! conversion for the rasterizing redactor.
//!
//! All coordinates here are top-left origin. The engine converts from
//! PDF's bottom-left origin before calling in.

/// Maximum vertical gap in points between two segments that still belong
/// to the same block. Roughly half a line at common body text sizes.
pub const BLOCK_GAP_PTS: f32 = 6.0;

/// Padding in points added around a redacted block's box so descenders
/// and antialiased edges are covered.
pub const REDACT_PAD_PTS: f32 = 1.0;

/// One text segment on a page, top-left origin points.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    /// `(x0, y0, x1, y1)`.
    pub bbox: [f32; 4],
}

/// A group of vertically adjacent segments, text joined line by line.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBlock {
    pub text: String,
    pub bbox: [f32; 4],
}

/// An integer rectangle in image pixels, clamped to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Sort segments into reading order: top to bottom, then left to right.
pub fn sort_reading_order(segments: &mut [Segment]) {
    segments.sort_by(|a, b| {
        a.bbox[1]
            .partial_cmp(&b.bbox[1])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                a.bbox[0]
                    .partial_cmp(&b.bbox[0])
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });
}

/// Group reading-ordered segments into blocks.
///
/// A segment starts a new block when the vertical gap to the previous
/// block's bottom edge exceeds [`BLOCK_GAP_PTS`]. Within a block the
/// bounding box is the union and the texts are joined with newlines.
/// Segments that are empty after trimming never reach this function.
pub fn group_segments(segments: &[Segment]) -> Vec<RawBlock> {
    let mut blocks: Vec<RawBlock> = Vec::new();

    for segment in segments {
        match blocks.last_mut() {
            Some(block) if segment.bbox[1] - block.bbox[3] <= BLOCK_GAP_PTS => {
                block.text.push('\n');
                block.text.push_str(&segment.text);
                block.bbox[0] = block.bbox[0].min(segment.bbox[0]);
                block.bbox[1] = block.bbox[1].min(segment.bbox[1]);
                block.bbox[2] = block.bbox[2].max(segment.bbox[2]);
                block.bbox[3] = block.bbox[3].max(segment.bbox[3]);
            }
            _ => blocks.push(RawBlock {
                text: segment.text.clone(),
                bbox: segment.bbox,
            }),
        }
    }

    blocks
}

/// Convert a block's box in page points to a padded pixel rectangle on a
/// page image rendered at `scale` pixels per point.
///
/// Returns `None` for boxes that are degenerate or fall entirely outside
/// the image after clamping.
pub fn pixel_rect(bbox: [f32; 4], scale: f32, img_width: u32, img_height: u32) -> Option<PixelRect> {
    let x0 = ((bbox[0] - REDACT_PAD_PTS) * scale).floor().max(0.0) as i32;
    let y0 = ((bbox[1] - REDACT_PAD_PTS) * scale).floor().max(0.0) as i32;
    let x1 = (((bbox[2] + REDACT_PAD_PTS) * scale).ceil() as i64).min(i64::from(img_width)) as i32;
    let y1 = (((bbox[3] + REDACT_PAD_PTS) * scale).ceil() as i64).min(i64::from(img_height)) as i32;

    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    Some(PixelRect {
        x: x0,
        y: y0,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    })
}
