//! Text blocks extracted from a PDF contract.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A single text block extracted from a PDF page.
///
/// Block IDs are assigned sequentially at extraction time in reading order
/// (page order, then block order within a page) and never renumbered, so a
/// document's ID set is exactly `{0..n-1}`. Blocks with no text are never
/// created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub block_id: u32,
    /// 1-indexed page the block was found on.
    pub page_number: u32,
    /// `(x0, y0, x1, y1)` in page points, top-left origin.
    pub bbox: [f32; 4],
    pub text: String,
}

impl TextBlock {
    /// The full set of block IDs for a document's blocks.
    pub fn id_set(blocks: &[TextBlock]) -> BTreeSet<u32> {
        blocks.iter().map(|b| b.block_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: u32) -> TextBlock {
        TextBlock {
            block_id: id,
            page_number: 1,
            bbox: [0.0, 0.0, 100.0, 20.0],
            text: format!("block {id}"),
        }
    }

    #[test]
    fn id_set_collects_all_ids() {
        let blocks = vec![block(0), block(1), block(2)];
        let ids = TextBlock::id_set(&blocks);
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn json_roundtrip() {
        let b = block(7);
        let json = serde_json::to_string(&b).unwrap();
        let parsed: TextBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, b);
    }
}
