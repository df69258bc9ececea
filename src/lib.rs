// ============================================================================
// memogrid: query and state engine for large record tables
// ============================================================================

pub mod config;
pub mod core;
pub mod facade;
pub mod query;
pub mod selection;
pub mod storage;
pub mod transaction;
pub mod window;

pub use config::EngineConfig;
pub use core::{
    GridError, NewRecord, PermissionKey, Permissions, Record, RecordId, Result, Role, Status,
    ValidationErrors,
};
pub use facade::{Dashboard, EditHandle, Notice, TableEngine, ViewSnapshot};
pub use query::{Filters, Query, SortDirection, SortKey, SortSpec, ValueRange, evaluate};
pub use selection::SelectionTracker;
pub use storage::{Collection, DEPARTMENTS, EntityStore, MockRecordSource, RecordSource};
pub use transaction::{
    AlwaysCommit, AlwaysFail, EditOutcome, EditPhase, EditTicket, FailurePolicy,
    OptimisticCoordinator, RandomFailure,
};
pub use window::{PageWindow, Pager, RowView, Viewport, row_views};
