use super::notice::Notice;
use crate::config::EngineConfig;
use crate::core::{GridError, NewRecord, PermissionKey, Record, RecordId, Result, Role};
use crate::query::{Filters, Query, SortKey, SortSpec, evaluate};
use crate::selection::SelectionTracker;
use crate::storage::EntityStore;
use crate::transaction::{EditOutcome, EditTicket, OptimisticCoordinator};
use crate::window::{PageWindow, Pager, RowView, Viewport, row_views};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info};

/// What subscribers learn after every recompute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewSnapshot {
    /// Number of recomputes so far
    pub generation: u64,
    /// Records in the filtered view
    pub result_count: usize,
    /// Records in the whole collection
    pub collection_count: usize,
    pub selected_count: usize,
    pub in_flight: bool,
}

/// Single owner of the table state
///
/// Every mutation goes through a method here and ends with exactly one
/// recompute of the derived view, after which subscribers are notified.
/// Nothing outside holds a mutable reference to the collection.
#[derive(Debug)]
pub struct TableEngine {
    config: EngineConfig,
    store: EntityStore,
    query: Query,
    staged_text: Option<String>,
    view: Vec<Arc<Record>>,
    generation: u64,
    selection: SelectionTracker,
    coordinator: OptimisticCoordinator,
    editing: Option<Arc<Record>>,
    notice: Option<Notice>,
    load_error: Option<String>,
    loading: bool,
    pager: Pager,
    viewport: Viewport,
    view_tx: watch::Sender<ViewSnapshot>,
}

impl TableEngine {
    pub fn new(config: EngineConfig) -> Self {
        let (view_tx, _) = watch::channel(ViewSnapshot::default());
        let pager = Pager::new(config.page_size);
        let viewport =
            Viewport::new(config.row_height, config.viewport_height).overscan(config.overscan);

        Self {
            config,
            store: EntityStore::new(),
            query: Query::default(),
            staged_text: None,
            view: Vec::new(),
            generation: 0,
            selection: SelectionTracker::new(),
            coordinator: OptimisticCoordinator::new(),
            editing: None,
            notice: None,
            load_error: None,
            loading: false,
            pager,
            viewport,
            view_tx,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Mark a load attempt as started and clear the previous load error
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.load_error = None;
    }

    /// Finish a load attempt with whatever the source produced
    ///
    /// On failure the collection keeps its prior contents and a load error is
    /// recorded for the UI. There is no retry here.
    pub fn finish_load(&mut self, fetched: Result<Vec<Record>>) -> Result<usize> {
        self.loading = false;

        match fetched.and_then(|records| self.load(records)) {
            Ok(count) => Ok(count),
            Err(err) => {
                error!("initial load failed: {}", err);
                self.load_error = Some(GridError::LOAD_FAILED_MESSAGE.to_string());
                match err {
                    GridError::LoadFailure(_) | GridError::EditInFlight(_) => Err(err),
                    other => Err(GridError::LoadFailure(other.to_string())),
                }
            }
        }
    }

    /// Replace the collection wholesale
    ///
    /// Refused while an edit is saving, so a rollback can only ever restore
    /// into the collection it was taken from. Selected ids and the open
    /// record are carried over only when the new collection still has them.
    pub fn load(&mut self, records: Vec<Record>) -> Result<usize> {
        if let Some(id) = self.coordinator.in_flight_id() {
            return Err(GridError::EditInFlight(id.clone()));
        }
        self.store.load(records)?;

        let store = &self.store;
        let dropped = self.selection.retain(|id| store.contains(id));
        if dropped > 0 {
            debug!("dropped {} selected ids missing after load", dropped);
        }
        self.editing = self
            .editing
            .as_ref()
            .and_then(|editing| self.store.get(editing.id()));

        info!("loaded {} records", self.store.len());
        self.recompute();
        Ok(self.store.len())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn dismiss_load_error(&mut self) {
        self.load_error = None;
    }

    // ------------------------------------------------------------------
    // Store mutations
    // ------------------------------------------------------------------

    pub fn add(&mut self, record: Record) -> Result<()> {
        let id = record.id().clone();
        self.store.add(record)?;
        debug!("added '{}'", id);
        self.recompute();
        Ok(())
    }

    /// Validate a draft at the boundary and add the resulting record
    pub fn create(&mut self, draft: NewRecord) -> Result<RecordId> {
        let today = chrono::Local::now().date_naive();
        let record = draft.into_record(today)?;
        let id = record.id().clone();
        self.add(record)?;
        Ok(id)
    }

    /// Delete one record; unknown ids change nothing
    pub fn delete(&mut self, id: &RecordId) -> bool {
        if !self.store.delete(id) {
            return false;
        }
        self.selection.prune([id]);
        self.forget_editing(std::slice::from_ref(id));
        debug!("deleted '{}'", id);
        self.recompute();
        true
    }

    /// Delete several records with a single recompute; returns how many went
    pub fn delete_many(&mut self, ids: &[RecordId]) -> usize {
        let removed = self.store.delete_many(ids);
        if removed.is_empty() {
            return 0;
        }
        self.selection.prune(&removed);
        self.forget_editing(&removed);
        info!("deleted {} records", removed.len());
        self.recompute();
        removed.len()
    }

    /// Bulk action: delete everything currently selected
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.ids();
        self.delete_many(&ids)
    }

    pub fn set_role(&mut self, id: &RecordId, role: Role) -> Result<()> {
        self.store.set_role(id, role)?;
        self.refresh_editing(id);
        self.recompute();
        Ok(())
    }

    pub fn set_permission(&mut self, id: &RecordId, key: PermissionKey, value: bool) -> Result<()> {
        self.store.set_permission(id, key, value)?;
        self.refresh_editing(id);
        self.recompute();
        Ok(())
    }

    /// Flip the pin flag; the record moves to the front of its view at once
    pub fn toggle_pin(&mut self, id: &RecordId) -> Result<bool> {
        let pinned = self.store.toggle_pin(id)?;
        self.refresh_editing(id);
        self.recompute();
        Ok(pinned)
    }

    pub fn get(&self, id: &RecordId) -> Option<Arc<Record>> {
        self.store.get(id)
    }

    pub fn collection_len(&self) -> usize {
        self.store.len()
    }

    // ------------------------------------------------------------------
    // Optimistic edits
    // ------------------------------------------------------------------

    /// Open a record for editing (the row click)
    pub fn open(&mut self, id: &RecordId) -> Result<Arc<Record>> {
        let record = self
            .store
            .get(id)
            .ok_or_else(|| GridError::RecordNotFound(id.clone()))?;
        self.editing = Some(Arc::clone(&record));
        Ok(record)
    }

    pub fn close(&mut self) {
        self.editing = None;
    }

    /// Record shown in the editor; while saving this is the optimistic value
    pub fn editing(&self) -> Option<&Arc<Record>> {
        self.editing.as_ref()
    }

    /// Apply an edit immediately and start its save
    pub fn submit_edit(&mut self, edited: Record) -> Result<EditTicket> {
        let ticket = self.coordinator.begin(&mut self.store, edited)?;
        self.editing = self.coordinator.pending().map(|pending| Arc::clone(&pending.edited));
        self.recompute();
        Ok(ticket)
    }

    /// Settle the pending edit; a failure restores the snapshot and raises a notice
    pub fn resolve_edit(&mut self, ticket: EditTicket, failed: bool) -> Result<EditOutcome> {
        let outcome = self.coordinator.resolve(&mut self.store, ticket, failed)?;

        if outcome.is_rollback() {
            self.notice = Some(Notice::new(
                GridError::ROLLBACK_MESSAGE,
                self.config.notice_duration,
            ));
        }
        let settled = outcome.record();
        if self.editing.as_ref().is_some_and(|editing| editing.id() == settled.id()) {
            self.editing = Some(Arc::clone(settled));
        }

        self.recompute();
        Ok(outcome)
    }

    pub fn is_in_flight(&self) -> bool {
        self.coordinator.is_in_flight()
    }

    pub fn in_flight_id(&self) -> Option<&RecordId> {
        self.coordinator.in_flight_id()
    }

    /// Current notice, if it has not outlived its display time
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref().filter(|notice| !notice.is_expired())
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Drop the notice once expired; returns true if one was removed
    pub fn clear_expired_notice(&mut self) -> bool {
        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            self.notice = None;
            true
        } else {
            false
        }
    }

    // ------------------------------------------------------------------
    // Query
    // ------------------------------------------------------------------

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Remember typed search text without recomputing; the latest text wins
    pub fn stage_search(&mut self, text: impl Into<String>) {
        self.staged_text = Some(text.into());
    }

    pub fn staged_search(&self) -> Option<&str> {
        self.staged_text.as_deref()
    }

    /// Apply the latest staged text; returns false if nothing was staged
    pub fn commit_search(&mut self) -> bool {
        let Some(text) = self.staged_text.take() else {
            return false;
        };
        self.query.text = text;
        self.recompute();
        true
    }

    /// Stage and commit in one step (search on enter)
    pub fn search(&mut self, text: impl Into<String>) {
        self.stage_search(text);
        self.commit_search();
    }

    pub fn set_filters(&mut self, filters: Filters) {
        self.query.filters = filters;
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.query.sort = sort;
        self.recompute();
    }

    /// Column header click
    pub fn toggle_sort(&mut self, key: SortKey) -> SortSpec {
        let sort = self.query.sort.toggled(key);
        self.set_sort(sort);
        sort
    }

    /// Clear search text and filters
    pub fn reset_query(&mut self) {
        self.staged_text = None;
        self.query.reset();
        self.recompute();
    }

    /// Current filtered and sorted result
    pub fn view(&self) -> &[Arc<Record>] {
        &self.view
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.view_tx.subscribe()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn toggle_select(&mut self, id: &RecordId) -> bool {
        let selected = self.selection.toggle(id);
        self.publish();
        selected
    }

    /// Select exactly the records in the current filtered view
    pub fn select_all_filtered(&mut self) {
        let ids: Vec<RecordId> = self.view.iter().map(|record| record.id().clone()).collect();
        self.select_all(ids);
    }

    pub fn select_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = RecordId>,
    {
        self.selection.select_all(ids);
        self.publish();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.publish();
    }

    // ------------------------------------------------------------------
    // Windowing
    // ------------------------------------------------------------------

    pub fn page_window(&mut self) -> PageWindow {
        self.pager.window(self.view.len())
    }

    pub fn set_page(&mut self, page: usize) -> PageWindow {
        self.pager.set_page(page);
        self.page_window()
    }

    pub fn next_page(&mut self) -> PageWindow {
        self.pager.next_page(self.view.len());
        self.page_window()
    }

    pub fn prev_page(&mut self) -> PageWindow {
        self.pager.prev_page();
        self.page_window()
    }

    pub fn set_page_size(&mut self, page_size: usize) -> PageWindow {
        self.pager.set_page_size(page_size);
        self.page_window()
    }

    /// Rows of the current page
    pub fn page_rows(&mut self) -> impl Iterator<Item = RowView<'_>> {
        let window = self.page_window();
        row_views(
            &self.view,
            window.range(),
            &self.selection,
            self.coordinator.in_flight_id(),
        )
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scroll_to(&mut self, offset: u64) {
        self.viewport.scroll_to(offset, self.view.len());
    }

    pub fn scroll_by(&mut self, delta: i64) {
        self.viewport.scroll_by(delta, self.view.len());
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport.set_height(height);
        self.viewport.clamp(self.view.len());
    }

    /// Rows under the viewport, overscan included
    pub fn visible_rows(&self) -> impl Iterator<Item = RowView<'_>> {
        row_views(
            &self.view,
            self.viewport.visible_range(self.view.len()),
            &self.selection,
            self.coordinator.in_flight_id(),
        )
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn recompute(&mut self) {
        let started = std::time::Instant::now();
        self.view = evaluate(&self.store.snapshot(), &self.query);
        self.generation += 1;

        let len = self.view.len();
        if self.pager.clamp(len) {
            debug!("page reset to 1 after result shrank to {}", len);
        }
        self.viewport.clamp(len);

        debug!(
            "recompute #{}: {} of {} records in {:?}",
            self.generation,
            len,
            self.store.len(),
            started.elapsed()
        );
        self.publish();
    }

    fn publish(&self) {
        self.view_tx.send_replace(ViewSnapshot {
            generation: self.generation,
            result_count: self.view.len(),
            collection_count: self.store.len(),
            selected_count: self.selection.count(),
            in_flight: self.coordinator.is_in_flight(),
        });
    }

    fn refresh_editing(&mut self, id: &RecordId) {
        if self.editing.as_ref().is_some_and(|editing| editing.id() == id) {
            self.editing = self.store.get(id);
        }
    }

    fn forget_editing(&mut self, removed: &[RecordId]) {
        if self
            .editing
            .as_ref()
            .is_some_and(|editing| removed.contains(editing.id()))
        {
            self.editing = None;
        }
    }
}

impl Default for TableEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Status;

    fn engine_with(records: Vec<Record>) -> TableEngine {
        let mut engine = TableEngine::default();
        engine.load(records).unwrap();
        engine
    }

    fn ids(engine: &TableEngine) -> Vec<&str> {
        engine.view().iter().map(|r| r.id().as_str()).collect()
    }

    fn abc() -> Vec<Record> {
        vec![
            Record::new("A", "Ann", "ann@x.com").salary(50_000).department("Engineering"),
            Record::new("B", "Bob", "bob@x.com").salary(90_000).department("Sales"),
            Record::new("C", "Cid", "cid@x.com").salary(70_000).department("Sales"),
        ]
    }

    #[test]
    fn test_each_mutation_recomputes_once() {
        let mut engine = engine_with(abc());
        let start = engine.generation();

        engine.set_role(&RecordId::new("A"), Role::Admin).unwrap();
        assert_eq!(engine.generation(), start + 1);

        engine.delete_many(&[RecordId::new("A"), RecordId::new("B")]);
        assert_eq!(engine.generation(), start + 2);

        engine.delete_many(&[RecordId::new("nope")]);
        assert!(!engine.delete(&RecordId::new("nope")));
        assert_eq!(engine.generation(), start + 2);
    }

    #[test]
    fn test_failed_mutation_does_not_recompute() {
        let mut engine = engine_with(abc());
        let start = engine.generation();

        assert!(engine.toggle_pin(&RecordId::new("Z")).is_err());
        assert!(engine.add(Record::new("A", "Dup", "dup@x.com")).is_err());
        assert_eq!(engine.generation(), start);
    }

    #[test]
    fn test_toggle_pin_moves_to_front() {
        let mut engine = engine_with(abc());
        engine.set_sort(SortSpec::asc(SortKey::Salary));
        assert_eq!(ids(&engine), vec!["A", "C", "B"]);

        engine.toggle_pin(&RecordId::new("B")).unwrap();
        assert_eq!(ids(&engine), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_delete_prunes_selection() {
        let mut engine = engine_with(abc());
        engine.toggle_select(&RecordId::new("A"));
        engine.toggle_select(&RecordId::new("B"));

        engine.delete(&RecordId::new("A"));
        assert_eq!(engine.selection().count(), 1);
        assert!(!engine.selection().contains(&RecordId::new("A")));
    }

    #[test]
    fn test_selection_survives_filtering() {
        let mut engine = engine_with(abc());
        engine.toggle_select(&RecordId::new("A"));
        engine.set_filters(Filters::default().department("Sales"));

        assert_eq!(ids(&engine).len(), 2);
        assert!(engine.selection().contains(&RecordId::new("A")));

        engine.select_all_filtered();
        assert_eq!(engine.selection().ids(), vec![RecordId::new("B"), RecordId::new("C")]);

        assert_eq!(engine.delete_selected(), 2);
        assert_eq!(engine.collection_len(), 1);
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn test_staged_search_latest_wins() {
        let mut engine = engine_with(abc());
        let start = engine.generation();

        engine.stage_search("a");
        engine.stage_search("an");
        engine.stage_search("bob");
        assert_eq!(engine.generation(), start);
        assert_eq!(engine.staged_search(), Some("bob"));

        assert!(engine.commit_search());
        assert_eq!(ids(&engine), vec!["B"]);
        assert!(!engine.commit_search());

        engine.reset_query();
        assert_eq!(ids(&engine).len(), 3);
    }

    #[test]
    fn test_toggle_sort() {
        let mut engine = engine_with(abc());
        assert_eq!(engine.toggle_sort(SortKey::Name), SortSpec::desc(SortKey::Name));
        assert_eq!(ids(&engine), vec!["C", "B", "A"]);
        assert_eq!(engine.toggle_sort(SortKey::Salary), SortSpec::asc(SortKey::Salary));
    }

    #[test]
    fn test_submit_edit_is_optimistic_then_rolls_back() {
        let mut engine = engine_with(abc());
        let id = RecordId::new("C");
        engine.open(&id).unwrap();

        let edited = (*engine.get(&id).unwrap()).clone().status(Status::Inactive);
        let before = engine.generation();
        let ticket = engine.submit_edit(edited).unwrap();

        assert_eq!(engine.generation(), before + 1);
        assert!(engine.is_in_flight());
        assert_eq!(engine.get(&id).unwrap().status, Status::Inactive);
        assert_eq!(engine.editing().unwrap().status, Status::Inactive);

        let outcome = engine.resolve_edit(ticket, true).unwrap();
        assert!(outcome.is_rollback());
        assert_eq!(engine.generation(), before + 2);
        assert!(!engine.is_in_flight());
        assert_eq!(engine.get(&id).unwrap().status, Status::Active);
        assert_eq!(engine.editing().unwrap().status, Status::Active);
        assert_eq!(engine.notice().unwrap().message(), GridError::ROLLBACK_MESSAGE);
    }

    #[test]
    fn test_in_flight_flag_on_rows() {
        let mut engine = engine_with(abc());
        let edited = (*engine.get(&RecordId::new("B")).unwrap()).clone().salary(1);
        engine.submit_edit(edited).unwrap();

        let flagged: Vec<String> = engine
            .page_rows()
            .filter(|row| row.is_in_flight)
            .map(|row| row.record.id().to_string())
            .collect();
        assert_eq!(flagged, vec!["B"]);
    }

    #[test]
    fn test_page_clamps_when_filter_narrows() {
        let records: Vec<Record> = (1..=30)
            .map(|i| {
                Record::new(RecordId::sequential(i), format!("N{:02}", i), "n@x.com")
                    .department(if i <= 5 { "HR" } else { "Sales" })
            })
            .collect();
        let mut engine = engine_with(records);
        engine.set_page_size(10);
        assert_eq!(engine.set_page(3).range(), 20..30);

        engine.set_filters(Filters::default().department("HR"));
        let window = engine.page_window();
        assert_eq!(window.page, 1);
        assert_eq!(window.range(), 0..5);
        assert_eq!(window.total_pages, 1);
    }

    #[test]
    fn test_finish_load_failure_keeps_collection() {
        let mut engine = engine_with(abc());
        engine.begin_load();
        assert!(engine.is_loading());

        let err = engine
            .finish_load(Err(GridError::LoadFailure("boom".into())))
            .unwrap_err();
        assert!(matches!(err, GridError::LoadFailure(_)));
        assert!(!engine.is_loading());
        assert_eq!(engine.collection_len(), 3);
        assert_eq!(engine.load_error(), Some(GridError::LOAD_FAILED_MESSAGE));

        engine.dismiss_load_error();
        assert_eq!(engine.load_error(), None);
    }

    #[test]
    fn test_reload_refused_while_edit_pending() {
        let id = RecordId::new("user-1");
        let mut engine = engine_with(vec![Record::new("user-1", "Old Name", "o@x.com").salary(1)]);

        let edited = (*engine.get(&id).unwrap()).clone().salary(2);
        let ticket = engine.submit_edit(edited).unwrap();
        let generation = engine.generation();

        let fresh = vec![Record::new("user-1", "Fresh Name", "f@x.com").salary(99)];
        let err = engine.load(fresh.clone()).unwrap_err();
        assert_eq!(err, GridError::EditInFlight(id.clone()));
        assert_eq!(engine.generation(), generation);
        assert_eq!(engine.get(&id).unwrap().salary, 2);

        engine.resolve_edit(ticket, true).unwrap();
        assert_eq!(engine.get(&id).unwrap().name, "Old Name");
        assert_eq!(engine.get(&id).unwrap().salary, 1);

        engine.load(fresh).unwrap();
        let record = engine.get(&id).unwrap();
        assert_eq!(record.name, "Fresh Name");
        assert_eq!(record.salary, 99);
    }

    #[test]
    fn test_finish_load_during_edit_keeps_collection() {
        let mut engine = engine_with(abc());
        let edited = (*engine.get(&RecordId::new("A")).unwrap()).clone().salary(1);
        engine.submit_edit(edited).unwrap();

        engine.begin_load();
        let err = engine
            .finish_load(Ok(vec![Record::new("Z", "Zed", "z@x.com")]))
            .unwrap_err();
        assert!(matches!(err, GridError::EditInFlight(_)));
        assert!(!engine.is_loading());
        assert_eq!(engine.collection_len(), 3);
        assert!(engine.is_in_flight());
    }

    #[test]
    fn test_reload_keeps_only_surviving_selection_and_editor() {
        let mut engine = engine_with(abc());
        engine.toggle_select(&RecordId::new("A"));
        engine.toggle_select(&RecordId::new("B"));
        engine.open(&RecordId::new("A")).unwrap();

        engine
            .load(vec![
                Record::new("B", "Bea", "bea@x.com"),
                Record::new("C", "Cid", "cid@x.com"),
            ])
            .unwrap();

        assert_eq!(engine.selection().ids(), vec![RecordId::new("B")]);
        assert!(!engine.selection().contains(&RecordId::new("A")));
        assert!(engine.editing().is_none());
        assert_eq!(engine.subscribe().borrow().selected_count, 1);

        engine.open(&RecordId::new("B")).unwrap();
        engine
            .load(vec![Record::new("B", "Bea Renamed", "bea@x.com")])
            .unwrap();
        assert_eq!(engine.editing().unwrap().name, "Bea Renamed");
        assert_eq!(engine.selection().count(), 1);
    }

    #[test]
    fn test_create_validates_at_boundary() {
        let mut engine = engine_with(abc());
        let err = engine.create(NewRecord::default()).unwrap_err();
        assert!(matches!(err, GridError::Validation(_)));
        assert_eq!(engine.collection_len(), 3);

        let id = engine
            .create(NewRecord {
                name: "Dee".into(),
                email: "dee@x.com".into(),
                age: Some(40),
                salary: Some(10),
                ..NewRecord::default()
            })
            .unwrap();
        assert_eq!(engine.collection_len(), 4);
        assert!(engine.get(&id).is_some());
    }

    #[test]
    fn test_subscribers_see_latest_view() {
        let mut engine = engine_with(abc());
        let rx = engine.subscribe();

        engine.set_filters(Filters::default().department("Sales"));
        engine.toggle_select(&RecordId::new("A"));

        let snapshot = *rx.borrow();
        assert_eq!(snapshot.generation, engine.generation());
        assert_eq!(snapshot.result_count, 2);
        assert_eq!(snapshot.collection_count, 3);
        assert_eq!(snapshot.selected_count, 1);
        assert!(!snapshot.in_flight);
    }
}
