// ============================================================================
// Engine facade: the state owner and its async front
// ============================================================================

pub mod dashboard;
pub mod engine;
pub mod notice;

pub use dashboard::{Dashboard, EditHandle};
pub use engine::{TableEngine, ViewSnapshot};
pub use notice::Notice;
