use serde::{Deserialize, Serialize};

/// Vertical scroll state of the two-page viewport, as reported by the renderer.
///
/// The grid page sits at offset `0`, the speaker page at `page_height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub offset_y: f64,
    pub page_height: f64,
}

impl ScrollPosition {
    pub fn new(offset_y: f64, page_height: f64) -> Self {
        Self {
            offset_y,
            page_height,
        }
    }

    pub fn top(page_height: f64) -> Self {
        Self::new(0.0, page_height)
    }

    /// An unmeasured viewport (zero height) counts as resting on the grid page.
    pub fn is_on_speaker_page(&self) -> bool {
        self.page_height > 0.0 && self.offset_y >= self.page_height
    }

    /// True once a paging scroll has settled exactly on one of the two pages.
    pub fn is_at_page_boundary(&self) -> bool {
        self.offset_y == 0.0 || self.offset_y == self.page_height
    }
}
