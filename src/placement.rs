use crate::rectangle::{Rectangle, Size};
use serde::{Deserialize, Serialize};

/// Horizontal nudge applied when stamping an appended blank page.
const BLANK_PAGE_X_OFFSET: f64 = 75.0;
/// Vertical gap applied by `StampAllPages` above the stamp's own height.
const ALL_PAGES_Y_OFFSET: f64 = 10.0;

/// Which pages receive the stamp and where on the page it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlacementPolicy {
    /// Leave existing pages alone, append one blank page and stamp only that page.
    AppendBlankPage,
    /// Stamp every existing page at a rectangle derived from the stamp size only.
    /// The page size is read but does not move the stamp.
    StampAllPages,
    /// Stamp every existing page, centered on that page's own media box.
    CenterAllPages,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        PlacementPolicy::AppendBlankPage
    }
}

impl PlacementPolicy {
    /// Whether the policy adds a page instead of reusing the existing ones.
    pub fn appends_page(&self) -> bool {
        matches!(self, PlacementPolicy::AppendBlankPage)
    }

    /// Rectangle for a stamp of size `stamp` on a page whose media box is `page`.
    /// `StampAllPages` is absolute; the other policies are relative to the box origin.
    pub fn rectangle(&self, page: Rectangle, stamp: Size) -> Rectangle {
        let (center_x, center_y) = page.center();
        match self {
            PlacementPolicy::AppendBlankPage => Rectangle::new(
                center_x - stamp.width / 2.0 + BLANK_PAGE_X_OFFSET,
                center_y - stamp.height,
                stamp,
            ),
            PlacementPolicy::StampAllPages => {
                Rectangle::new(stamp.width, stamp.height + ALL_PAGES_Y_OFFSET, stamp)
            }
            PlacementPolicy::CenterAllPages => Rectangle::new(
                center_x - stamp.width / 2.0,
                center_y - stamp.height / 2.0,
                stamp,
            ),
        }
    }
}
