use super::state::{EditOutcome, EditPhase, EditTicket, PendingEdit};
use crate::core::{GridError, Record, RecordId, Result};
use crate::storage::EntityStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Applies edits optimistically and settles them later
///
/// `begin` writes the edited record into the store right away and remembers
/// the previous value; `resolve` either keeps the edit or puts the snapshot
/// back. Only one edit may be pending, so a second `begin` is refused until
/// the first one resolves.
#[derive(Debug, Default)]
pub struct OptimisticCoordinator {
    pending: Option<PendingEdit>,
}

impl OptimisticCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EditPhase {
        if self.pending.is_some() {
            EditPhase::Pending
        } else {
            EditPhase::Idle
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingEdit> {
        self.pending.as_ref()
    }

    pub fn in_flight_id(&self) -> Option<&RecordId> {
        self.pending.as_ref().map(PendingEdit::record_id)
    }

    /// Idle -> Pending: snapshot the current record and write the edit
    pub fn begin(&mut self, store: &mut EntityStore, edited: Record) -> Result<EditTicket> {
        if let Some(pending) = &self.pending {
            return Err(GridError::EditInFlight(pending.record_id().clone()));
        }

        let edited = Arc::new(edited);
        let snapshot = store.replace((*edited).clone())?;
        let ticket = EditTicket::new();

        debug!("{} applied optimistically to '{}'", ticket, edited.id());
        self.pending = Some(PendingEdit {
            ticket,
            snapshot,
            edited,
        });
        Ok(ticket)
    }

    /// Pending -> Committed | RolledBack
    ///
    /// The marker is cleared whatever happens to the store. A rollback of a
    /// record deleted in the meantime leaves the collection as it is.
    pub fn resolve(
        &mut self,
        store: &mut EntityStore,
        ticket: EditTicket,
        failed: bool,
    ) -> Result<EditOutcome> {
        let pending = match self.pending.take() {
            Some(pending) if pending.ticket == ticket => pending,
            other => {
                self.pending = other;
                return Err(GridError::StaleEdit(ticket.as_u64()));
            }
        };

        if !failed {
            info!("{} committed for '{}'", ticket, pending.record_id());
            return Ok(EditOutcome::Committed {
                ticket,
                record: pending.edited,
            });
        }

        match store.replace((*pending.snapshot).clone()) {
            Ok(_) => warn!("{} failed, '{}' rolled back", ticket, pending.record_id()),
            Err(GridError::RecordNotFound(id)) => {
                warn!("{} failed but '{}' no longer exists, nothing to restore", ticket, id)
            }
            Err(err) => return Err(err),
        }

        Ok(EditOutcome::RolledBack {
            ticket,
            restored: pending.snapshot,
        })
    }
}
