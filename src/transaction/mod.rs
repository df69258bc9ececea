// ============================================================================
// Optimistic Mutation Module
// ============================================================================
//
// An edit is written into the store before its save completes. When the
// simulated save fails the pre-edit snapshot is put back.
//
// ============================================================================

pub mod coordinator;
pub mod policy;
pub mod state;

pub use coordinator::OptimisticCoordinator;
pub use policy::{AlwaysCommit, AlwaysFail, FailurePolicy, RandomFailure};
pub use state::{EditOutcome, EditPhase, EditTicket, PendingEdit};
