use super::engine::{TableEngine, ViewSnapshot};
use crate::config::EngineConfig;
use crate::core::{GridError, Record, Result};
use crate::storage::RecordSource;
use crate::transaction::{EditOutcome, EditTicket, FailurePolicy, RandomFailure};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Shared, async front of a [`TableEngine`]
///
/// Cloning is cheap; every clone drives the same engine. Timed behaviour
/// (simulated save latency, search debounce, notice expiry) runs on tokio
/// timers, so tests can drive it with paused time.
///
/// ```
/// use memogrid::{Dashboard, EngineConfig, MockRecordSource};
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// let dashboard = Dashboard::new(EngineConfig::new().initial_count(20)).unwrap();
/// let source = MockRecordSource::new(7).latency(Duration::ZERO);
///
/// dashboard.load_from(&source).await.unwrap();
/// assert_eq!(dashboard.read().await.view().len(), 20);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct Dashboard {
    engine: Arc<RwLock<TableEngine>>,
    policy: Arc<dyn FailurePolicy>,
    search_seq: Arc<AtomicU64>,
    config: EngineConfig,
}

/// Handle to an edit whose save is still running
#[derive(Debug)]
pub struct EditHandle {
    ticket: EditTicket,
    task: JoinHandle<Result<EditOutcome>>,
}

impl EditHandle {
    pub fn ticket(&self) -> EditTicket {
        self.ticket
    }

    /// Wait for the save to settle
    pub async fn outcome(self) -> Result<EditOutcome> {
        self.task
            .await
            .map_err(|e| GridError::Internal(format!("edit task failed: {}", e)))?
    }
}

impl Dashboard {
    /// Dashboard whose saves fail at the configured probability
    pub fn new(config: EngineConfig) -> Result<Self> {
        let policy = RandomFailure::new(config.failure_probability);
        Self::with_policy(config, Arc::new(policy))
    }

    pub fn with_policy(config: EngineConfig, policy: Arc<dyn FailurePolicy>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engine: Arc::new(RwLock::new(TableEngine::new(config.clone()))),
            policy,
            search_seq: Arc::new(AtomicU64::new(0)),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, TableEngine> {
        self.engine.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, TableEngine> {
        self.engine.write().await
    }

    pub async fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.engine.read().await.subscribe()
    }

    /// Fetch the initial collection
    ///
    /// The lock is not held while the source is working, so the table stays
    /// readable during the load.
    pub async fn load_from(&self, source: &dyn RecordSource) -> Result<usize> {
        self.engine.write().await.begin_load();
        info!("loading {} records", self.config.initial_count);

        let fetched = source.fetch_initial(self.config.initial_count).await;
        self.engine.write().await.finish_load(fetched)
    }

    /// Apply an edit now and resolve it after the simulated save latency
    ///
    /// A failed save restores the prior record and raises a notice that
    /// clears itself after the configured duration.
    pub async fn submit_edit(&self, edited: Record) -> Result<EditHandle> {
        let ticket = self.engine.write().await.submit_edit(edited)?;

        let engine = Arc::clone(&self.engine);
        let policy = Arc::clone(&self.policy);
        let latency = self.config.edit_latency;
        let notice_duration = self.config.notice_duration;

        let task = tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            let failed = policy.should_fail();
            let outcome = engine.write().await.resolve_edit(ticket, failed)?;

            if outcome.is_rollback() {
                let engine = Arc::clone(&engine);
                tokio::spawn(async move {
                    tokio::time::sleep(notice_duration).await;
                    if engine.write().await.clear_expired_notice() {
                        debug!("rollback notice expired");
                    }
                });
            }
            Ok(outcome)
        });

        Ok(EditHandle { ticket, task })
    }

    /// Debounced search: only the last text typed within the quiet period is applied
    ///
    /// Returns true if this call's text was the one committed.
    pub async fn search(&self, text: impl Into<String>) -> bool {
        let seq = self.search_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.engine.write().await.stage_search(text);

        tokio::time::sleep(self.config.search_debounce).await;

        if self.search_seq.load(Ordering::SeqCst) != seq {
            debug!("search #{} superseded", seq);
            return false;
        }
        self.engine.write().await.commit_search()
    }

    /// Apply staged search text right away, skipping the quiet period
    pub async fn commit_search(&self) -> bool {
        self.search_seq.fetch_add(1, Ordering::SeqCst);
        let committed = self.engine.write().await.commit_search();
        if !committed {
            warn!("commit_search called with nothing staged");
        }
        committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RecordId;
    use crate::storage::MockRecordSource;
    use crate::transaction::{AlwaysCommit, AlwaysFail};
    use std::time::Duration;

    fn dashboard(policy: Arc<dyn FailurePolicy>) -> Dashboard {
        let config = EngineConfig::new().initial_count(100);
        Dashboard::with_policy(config, policy).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_and_commit() {
        let dashboard = dashboard(Arc::new(AlwaysCommit));
        let source = MockRecordSource::new(1);
        assert_eq!(dashboard.load_from(&source).await.unwrap(), 100);

        let id = RecordId::sequential(1);
        let edited = (*dashboard.read().await.get(&id).unwrap()).clone().salary(1);
        let handle = dashboard.submit_edit(edited).await.unwrap();

        assert!(dashboard.read().await.is_in_flight());
        let outcome = handle.outcome().await.unwrap();
        assert!(!outcome.is_rollback());
        assert!(!dashboard.read().await.is_in_flight());
        assert_eq!(dashboard.read().await.get(&id).unwrap().salary, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_edit_rejected_while_pending() {
        let dashboard = dashboard(Arc::new(AlwaysCommit));
        dashboard.load_from(&MockRecordSource::new(1)).await.unwrap();

        let first = (*dashboard.read().await.get(&RecordId::sequential(1)).unwrap()).clone();
        let second = (*dashboard.read().await.get(&RecordId::sequential(2)).unwrap()).clone();

        let handle = dashboard.submit_edit(first.age(50)).await.unwrap();
        let err = dashboard.submit_edit(second.clone().age(50)).await.unwrap_err();
        assert!(matches!(err, GridError::EditInFlight(_)));

        handle.outcome().await.unwrap();
        assert!(dashboard.submit_edit(second.age(51)).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rollback_notice_expires() {
        let dashboard = dashboard(Arc::new(AlwaysFail));
        dashboard.load_from(&MockRecordSource::new(1)).await.unwrap();

        let id = RecordId::sequential(3);
        let original = dashboard.read().await.get(&id).unwrap();
        let handle = dashboard
            .submit_edit((*original).clone().salary(7))
            .await
            .unwrap();

        assert!(handle.outcome().await.unwrap().is_rollback());
        assert_eq!(dashboard.read().await.get(&id).unwrap(), original);
        assert!(dashboard.read().await.notice().is_some());

        tokio::time::sleep(Duration::from_secs(3) + Duration::from_millis(1)).await;
        assert!(dashboard.read().await.notice().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_debounce_latest_wins() {
        let dashboard = dashboard(Arc::new(AlwaysCommit));
        dashboard
            .write()
            .await
            .load(vec![
                Record::new("a", "Ann", "ann@x.com"),
                Record::new("b", "Bob", "bob@x.com"),
            ])
            .unwrap();

        let first = tokio::spawn({
            let dashboard = dashboard.clone();
            async move { dashboard.search("an").await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = tokio::spawn({
            let dashboard = dashboard.clone();
            async move { dashboard.search("bob").await }
        });

        assert!(!first.await.unwrap());
        assert!(second.await.unwrap());

        let engine = dashboard.read().await;
        assert_eq!(engine.query().text, "bob");
        assert_eq!(engine.view().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_failure_sets_error() {
        let dashboard = dashboard(Arc::new(AlwaysCommit));
        let source = MockRecordSource::new(1).failing();

        let err = dashboard.load_from(&source).await.unwrap_err();
        assert!(matches!(err, GridError::LoadFailure(_)));

        let engine = dashboard.read().await;
        assert_eq!(engine.collection_len(), 0);
        assert!(!engine.is_loading());
        assert_eq!(engine.load_error(), Some(GridError::LOAD_FAILED_MESSAGE));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = EngineConfig::new().failure_probability(2.0);
        assert!(matches!(
            Dashboard::new(config),
            Err(GridError::InvalidConfig(_))
        ));
    }
}
