// ============================================================================
// Optimistic Edit State
// ============================================================================
//
// Each submitted edit moves through:
//
//   Idle ──submit──> Pending ──commit────> Committed ──> Idle
//                       │
//                       └────rollback───> RolledBack ──> Idle
//
// At most one edit is Pending at a time.
//
// ============================================================================

use crate::core::{Record, RecordId};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Handle for one submitted edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditTicket(pub u64);

impl EditTicket {
    pub fn new() -> Self {
        EditTicket(NEXT_TICKET.fetch_add(1, Ordering::SeqCst))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for EditTicket {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EditTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edit_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    /// No edit outstanding
    Idle,

    /// Edited value is visible, outcome not yet known
    Pending,

    /// Edited value kept
    Committed,

    /// Pre-edit snapshot restored
    RolledBack,
}

impl EditPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, EditPhase::Committed | EditPhase::RolledBack)
    }
}

/// The single outstanding edit
#[derive(Debug, Clone)]
pub struct PendingEdit {
    pub ticket: EditTicket,
    /// Record as it was before the edit
    pub snapshot: Arc<Record>,
    /// Optimistically applied value
    pub edited: Arc<Record>,
}

impl PendingEdit {
    pub fn record_id(&self) -> &RecordId {
        self.edited.id()
    }
}

/// How a pending edit ended
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Committed { ticket: EditTicket, record: Arc<Record> },
    RolledBack { ticket: EditTicket, restored: Arc<Record> },
}

impl EditOutcome {
    pub fn ticket(&self) -> EditTicket {
        match self {
            EditOutcome::Committed { ticket, .. } | EditOutcome::RolledBack { ticket, .. } => {
                *ticket
            }
        }
    }

    pub fn phase(&self) -> EditPhase {
        match self {
            EditOutcome::Committed { .. } => EditPhase::Committed,
            EditOutcome::RolledBack { .. } => EditPhase::RolledBack,
        }
    }

    /// Record value visible once the edit is resolved
    pub fn record(&self) -> &Arc<Record> {
        match self {
            EditOutcome::Committed { record, .. } => record,
            EditOutcome::RolledBack { restored, .. } => restored,
        }
    }

    pub fn is_rollback(&self) -> bool {
        matches!(self, EditOutcome::RolledBack { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_ids_increase() {
        let first = EditTicket::new();
        let second = EditTicket::new();
        assert!(second > first);
        assert_eq!(format!("{}", first), format!("edit_{}", first.as_u64()));
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!EditPhase::Idle.is_terminal());
        assert!(!EditPhase::Pending.is_terminal());
        assert!(EditPhase::Committed.is_terminal());
        assert!(EditPhase::RolledBack.is_terminal());
    }

    #[test]
    fn test_outcome_accessors() {
        let ticket = EditTicket::new();
        let record = Arc::new(Record::new("user-1", "Ann", "ann@x.com"));
        let outcome = EditOutcome::RolledBack { ticket, restored: Arc::clone(&record) };

        assert!(outcome.is_rollback());
        assert_eq!(outcome.ticket(), ticket);
        assert_eq!(outcome.phase(), EditPhase::RolledBack);
        assert_eq!(outcome.record().id(), record.id());
    }
}
