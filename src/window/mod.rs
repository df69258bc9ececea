// ============================================================================
// Windowed Render Provider
// ============================================================================
//
// Turns a full query result into the small slice a view actually draws,
// either as a page or as the rows under a scrolled viewport.
//
// ============================================================================

pub mod pager;
pub mod row;
pub mod viewport;

pub use pager::{PageWindow, Pager, total_pages};
pub use row::{RowView, row_views};
pub use viewport::Viewport;
