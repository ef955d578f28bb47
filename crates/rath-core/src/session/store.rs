//! The common session store.
//!
//! `CommonStore` owns every session-scoped UI field and the computation
//! engine worker. Each operation publishes at most one new [`CommonState`]
//! snapshot through a `watch` channel, so a subscriber never sees half of a
//! change group.

use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{RwLock, watch};

use super::model::{CommonState, ExploreMode, NavMode, Notice, PivotKey, Severity, TaskTestMode};
use crate::engine::{ComputationEngine, EngineLifecycle, EngineTask};
use crate::error::{RathError, Result};
use crate::persistence::{DataConfigRepository, KeyValueStorage, TASK_TEST_MODE_KEY};
use crate::pipeline::PipelineStore;
use crate::viz::{VegaSubset, VizTransform};

/// Collaborators a [`CommonStore`] is built from.
pub struct CommonStorePorts {
    /// Owned exclusively by the store; nothing else may drive the worker.
    pub engine: Box<dyn EngineLifecycle>,
    pub local_storage: Arc<dyn KeyValueStorage>,
    pub data_config: Arc<dyn DataConfigRepository>,
    pub pipeline: Arc<dyn PipelineStore>,
    pub viz_transform: Arc<dyn VizTransform>,
}

/// Process-wide session state container.
///
/// Share it behind an `Arc`; every operation takes `&self`.
pub struct CommonStore {
    state: watch::Sender<CommonState>,
    engine: Box<dyn EngineLifecycle>,
    /// Written across a whole engine switch, read while a task is forwarded.
    engine_guard: RwLock<()>,
    /// True once a worker confirmed `init` and until it is torn down.
    engine_live: AtomicBool,
    pub(super) local_storage: Arc<dyn KeyValueStorage>,
    pub(super) data_config: Arc<dyn DataConfigRepository>,
    pub(super) pipeline: Arc<dyn PipelineStore>,
    viz_transform: Arc<dyn VizTransform>,
}

impl CommonStore {
    /// Creates the store, hydrating the task mode from local storage.
    ///
    /// No worker is started here; call [`CommonStore::set_computation_engine`]
    /// (or restore a persisted configuration) to bring one up.
    pub fn new(ports: CommonStorePorts) -> Self {
        let task_mode = hydrate_task_mode(ports.local_storage.as_ref());
        let (state, _) = watch::channel(CommonState::new(task_mode));

        Self {
            state,
            engine: ports.engine,
            engine_guard: RwLock::new(()),
            engine_live: AtomicBool::new(false),
            local_storage: ports.local_storage,
            data_config: ports.data_config,
            pipeline: ports.pipeline,
            viz_transform: ports.viz_transform,
        }
    }

    // ============================================================================
    // Observation
    // ============================================================================

    /// Returns a clone of the current state.
    pub fn snapshot(&self) -> CommonState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<CommonState> {
        self.state.subscribe()
    }

    /// Whether a worker has confirmed initialization and is still running.
    pub fn is_engine_live(&self) -> bool {
        self.engine_live.load(Ordering::Acquire)
    }

    /// Applies one change group and publishes it as a single update.
    pub(super) fn update(&self, change: impl FnOnce(&mut CommonState)) {
        self.state.send_modify(|state| {
            change(state);
            state.revision += 1;
        });
    }

    // ============================================================================
    // Plain mutators
    // ============================================================================

    pub fn set_app_key(&self, key: PivotKey) {
        self.update(|state| state.app_key = key);
    }

    /// Appends a notice to the end of the message log.
    pub fn show_error(&self, severity: Severity, content: impl Into<String>) {
        let notice = Notice::new(severity, content);
        self.update(|state| state.messages.push(notice));
    }

    /// Removes the notice at `index`, shifting later notices down.
    ///
    /// Returns `false` and publishes nothing when `index` is out of range.
    pub fn remove_error(&self, index: usize) -> bool {
        self.state.send_if_modified(|state| {
            if index >= state.messages.len() {
                return false;
            }
            state.messages.remove(index);
            state.revision += 1;
            true
        })
    }

    pub fn set_nav_mode(&self, mode: NavMode) {
        self.update(|state| state.nav_mode = mode);
    }

    /// Replaces the task mode and writes it through to local storage.
    ///
    /// The in-memory mode is updated even when the write fails; the write
    /// error is logged and returned.
    pub fn set_task_test_mode(&self, mode: TaskTestMode) -> Result<()> {
        self.update(|state| state.task_mode = mode);
        self.persist_task_mode(mode)
    }

    pub(super) fn persist_task_mode(&self, mode: TaskTestMode) -> Result<()> {
        self.local_storage
            .set(TASK_TEST_MODE_KEY, mode.as_ref())
            .inspect_err(|e| {
                tracing::warn!("[CommonStore] Failed to persist task mode '{}': {}", mode, e);
            })
    }

    pub fn set_show_storage_modal(&self, show: bool) {
        self.update(|state| state.show_storage_modal = show);
    }

    pub fn set_show_analysis_config(&self, show: bool) {
        self.update(|state| state.show_analysis_config = show);
    }

    pub fn set_config_open(&self, open: bool) {
        self.update(|state| state.config_open = open);
    }

    pub fn set_config_key(&self, key: impl Into<String>) {
        let key = key.into();
        self.update(|state| state.config_key = key);
    }

    /// Opens `spec` in the graphic editor.
    ///
    /// The new editor spec and the switch to the editor view are published
    /// together.
    pub fn visual_analysis_in_graphic_walker(&self, spec: &VegaSubset) {
        let schema = self.viz_transform.transform(spec);
        self.update(|state| {
            state.graphic_walker_spec = schema;
            state.app_key = PivotKey::Editor;
        });
    }

    pub async fn set_explore_mode(&self, mode: ExploreMode) {
        self.update(|state| state.explore_mode = mode);
    }

    // ============================================================================
    // Engine lifecycle
    // ============================================================================

    /// Switches the computation engine.
    ///
    /// Tears down the running worker, starts one for `engine` and waits for
    /// it to confirm `init`. `computation_engine` changes only after all
    /// three steps succeed. On failure the previous value is kept, the error
    /// is logged and pushed as an error notice, and `false` is returned.
    ///
    /// Concurrent switches run one after another in call order, and a switch
    /// waits for tasks already forwarded to the running worker.
    pub async fn set_computation_engine(&self, engine: ComputationEngine) -> bool {
        let _guard = self.engine_guard.write().await;

        match self.restart_engine(engine).await {
            Ok(()) => {
                self.engine_live.store(true, Ordering::Release);
                self.update(|state| state.computation_engine = engine);
                tracing::info!("[CommonStore] Computation engine switched to {}", engine);
                true
            }
            Err(e) => {
                tracing::error!(
                    "[CommonStore] Failed to switch computation engine to {}: {}",
                    engine,
                    e
                );
                self.show_error(
                    Severity::Error,
                    format!("Failed to switch computation engine to {}: {}", engine, e),
                );
                false
            }
        }
    }

    async fn restart_engine(&self, engine: ComputationEngine) -> Result<()> {
        self.engine.destroy().await?;
        self.engine_live.store(false, Ordering::Release);

        self.engine.init(engine).await?;
        let reply = self.engine.send_task(EngineTask::init(engine)).await?;
        tracing::debug!("[CommonStore] Engine {} confirmed init: {}", engine, reply);
        Ok(())
    }

    /// Forwards an analysis task to the running worker.
    ///
    /// Waits for an in-flight engine switch to finish first. Tasks do not
    /// wait for each other.
    pub async fn engine_service(&self, task: EngineTask) -> Result<serde_json::Value> {
        let _guard = self.engine_guard.read().await;

        if !self.is_engine_live() {
            return Err(RathError::EngineUnavailable);
        }
        self.engine.send_task(task).await
    }
}

fn hydrate_task_mode(storage: &dyn KeyValueStorage) -> TaskTestMode {
    match storage.get(TASK_TEST_MODE_KEY) {
        Ok(Some(raw)) => TaskTestMode::from_str(&raw).unwrap_or_else(|_| {
            tracing::warn!(
                "[CommonStore] Ignoring unrecognised task mode '{}' in local storage",
                raw
            );
            TaskTestMode::default()
        }),
        Ok(None) => TaskTestMode::default(),
        Err(e) => {
            tracing::warn!("[CommonStore] Failed to read task mode: {}", e);
            TaskTestMode::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::session::mock::{MemoryStorage, MockEngine, ports_with};
    use crate::viz::EncodingChannel;

    fn store() -> CommonStore {
        CommonStore::new(ports_with(MockEngine::default(), Arc::new(MemoryStorage::default())))
    }

    #[test]
    fn test_task_mode_defaults_to_local() {
        let store = store();
        assert_eq!(store.snapshot().task_mode, TaskTestMode::Local);
    }

    #[test]
    fn test_task_mode_survives_into_new_session() {
        let storage = Arc::new(MemoryStorage::default());
        let first = CommonStore::new(ports_with(MockEngine::default(), storage.clone()));
        first.set_task_test_mode(TaskTestMode::Remote).unwrap();
        assert_eq!(
            storage.get(TASK_TEST_MODE_KEY).unwrap().as_deref(),
            Some("remote")
        );

        let second = CommonStore::new(ports_with(MockEngine::default(), storage));
        assert_eq!(second.snapshot().task_mode, TaskTestMode::Remote);
    }

    #[test]
    fn test_unrecognised_stored_task_mode_falls_back() {
        let storage = Arc::new(MemoryStorage::default());
        storage.set(TASK_TEST_MODE_KEY, "cloud").unwrap();
        let store = CommonStore::new(ports_with(MockEngine::default(), storage));
        assert_eq!(store.snapshot().task_mode, TaskTestMode::Local);
    }

    #[test]
    fn test_task_mode_write_failure_keeps_new_mode() {
        let storage = Arc::new(MemoryStorage::failing_writes());
        let store = CommonStore::new(ports_with(MockEngine::default(), storage));
        let result = store.set_task_test_mode(TaskTestMode::Remote);
        assert!(matches!(result, Err(RathError::Storage(_))));
        assert_eq!(store.snapshot().task_mode, TaskTestMode::Remote);
    }

    #[test]
    fn test_messages_keep_order_and_remove_by_index() {
        let store = store();
        store.show_error(Severity::Error, "boom");
        store.show_error(Severity::Success, "ok");
        assert_eq!(
            store.snapshot().messages,
            vec![
                Notice::new(Severity::Error, "boom"),
                Notice::new(Severity::Success, "ok")
            ]
        );

        assert!(store.remove_error(0));
        assert_eq!(
            store.snapshot().messages,
            vec![Notice::new(Severity::Success, "ok")]
        );
    }

    #[test]
    fn test_remove_middle_message_shifts_tail() {
        let store = store();
        for text in ["a", "b", "c"] {
            store.show_error(Severity::Info, text);
        }
        assert!(store.remove_error(1));
        let contents: Vec<String> = store
            .snapshot()
            .messages
            .into_iter()
            .map(|n| n.content)
            .collect();
        assert_eq!(contents, vec!["a", "c"]);
    }

    #[test]
    fn test_out_of_range_removal_is_a_silent_noop() {
        let store = store();
        store.show_error(Severity::Info, "only");
        let mut rx = store.subscribe();
        let _ = rx.borrow_and_update();
        let before = store.snapshot();

        assert!(!store.remove_error(1));
        assert!(!store.remove_error(usize::MAX));

        assert_eq!(store.snapshot(), before);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_flags_are_independent() {
        let store = store();
        store.set_show_storage_modal(true);
        store.set_show_analysis_config(true);
        store.set_config_open(true);
        store.set_show_storage_modal(false);

        let state = store.snapshot();
        assert!(!state.show_storage_modal);
        assert!(state.show_analysis_config);
        assert!(state.config_open);
    }

    #[test]
    fn test_plain_setters() {
        let store = store();
        store.set_app_key(PivotKey::Painter);
        store.set_nav_mode(NavMode::Icon);
        store.set_config_key("cfg-1");

        let state = store.snapshot();
        assert_eq!(state.app_key, PivotKey::Painter);
        assert_eq!(state.nav_mode, NavMode::Icon);
        assert_eq!(state.config_key, "cfg-1");
        assert_eq!(state.revision, 3);
    }

    #[test]
    fn test_graphic_walker_load_is_one_update() {
        let store = store();
        let mut rx = store.subscribe();
        let _ = rx.borrow_and_update();
        let revision = store.snapshot().revision;

        let mut spec = VegaSubset {
            mark: Some(serde_json::json!("bar")),
            ..VegaSubset::default()
        };
        spec.encoding.insert("x".to_string(), EncodingChannel::field("city"));
        store.visual_analysis_in_graphic_walker(&spec);

        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.revision, revision + 1);
        assert_eq!(seen.app_key, PivotKey::Editor);
        assert_eq!(seen.graphic_walker_spec.position, vec!["city"]);
        assert_eq!(seen.graphic_walker_spec.geom_type, vec!["bar"]);
    }

    #[tokio::test]
    async fn test_explore_mode_setter() {
        let store = store();
        store.set_explore_mode(ExploreMode::Manual).await;
        assert_eq!(store.snapshot().explore_mode, ExploreMode::Manual);
    }

    #[tokio::test]
    async fn test_engine_switch_runs_full_sequence() {
        let engine = MockEngine::default();
        let calls = engine.calls.clone();
        let store = CommonStore::new(ports_with(engine, Arc::new(MemoryStorage::default())));

        assert!(store.set_computation_engine(ComputationEngine::ClickHouse).await);
        assert_eq!(
            store.snapshot().computation_engine,
            ComputationEngine::ClickHouse
        );
        assert!(store.is_engine_live());
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["destroy", "init:clickhouse", "task:init:clickhouse"]
        );
    }

    #[tokio::test]
    async fn test_switch_to_current_engine_still_restarts() {
        let engine = MockEngine::default();
        let calls = engine.calls.clone();
        let store = CommonStore::new(ports_with(engine, Arc::new(MemoryStorage::default())));

        assert!(store.set_computation_engine(ComputationEngine::WebWorker).await);
        assert!(store.set_computation_engine(ComputationEngine::WebWorker).await);
        assert_eq!(
            store.snapshot().computation_engine,
            ComputationEngine::WebWorker
        );
        assert_eq!(calls.lock().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_failed_init_keeps_previous_engine_and_notifies() {
        let engine = MockEngine {
            fail_init: Some(ComputationEngine::WebWorker),
            ..MockEngine::default()
        };
        let store = CommonStore::new(ports_with(engine, Arc::new(MemoryStorage::default())));
        assert!(store.set_computation_engine(ComputationEngine::ClickHouse).await);

        assert!(!store.set_computation_engine(ComputationEngine::WebWorker).await);

        let state = store.snapshot();
        assert_eq!(state.computation_engine, ComputationEngine::ClickHouse);
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].severity, Severity::Error);
        assert!(state.messages[0].content.contains("webworker"));
        assert!(!store.is_engine_live());
    }

    #[tokio::test]
    async fn test_failed_destroy_keeps_engine_and_skips_init() {
        let engine = MockEngine {
            fail_destroy: true,
            ..MockEngine::default()
        };
        let calls = engine.calls.clone();
        let store = CommonStore::new(ports_with(engine, Arc::new(MemoryStorage::default())));

        assert!(!store.set_computation_engine(ComputationEngine::ClickHouse).await);

        let state = store.snapshot();
        assert_eq!(state.computation_engine, ComputationEngine::WebWorker);
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].severity, Severity::Error);
        assert!(state.messages[0].content.contains("clickhouse"));
        assert_eq!(*calls.lock().unwrap(), vec!["destroy"]);
    }

    #[tokio::test]
    async fn test_failed_init_task_keeps_previous_engine() {
        let engine = MockEngine {
            fail_task: true,
            ..MockEngine::default()
        };
        let store = CommonStore::new(ports_with(engine, Arc::new(MemoryStorage::default())));

        assert!(!store.set_computation_engine(ComputationEngine::ClickHouse).await);
        assert_eq!(
            store.snapshot().computation_engine,
            ComputationEngine::WebWorker
        );
    }

    #[tokio::test]
    async fn test_overlapping_switches_are_serialized() {
        let engine = MockEngine::default();
        let calls = engine.calls.clone();
        let store = CommonStore::new(ports_with(engine, Arc::new(MemoryStorage::default())));

        let (first, second) = tokio::join!(
            store.set_computation_engine(ComputationEngine::ClickHouse),
            store.set_computation_engine(ComputationEngine::WebWorker),
        );
        assert!(first && second);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                "destroy",
                "init:clickhouse",
                "task:init:clickhouse",
                "destroy",
                "init:webworker",
                "task:init:webworker",
            ]
        );
        assert_eq!(
            store.snapshot().computation_engine,
            ComputationEngine::WebWorker
        );
    }

    #[tokio::test]
    async fn test_engine_service_requires_live_worker() {
        let store = store();
        let err = store
            .engine_service(EngineTask::new("stat", serde_json::Value::Null))
            .await
            .unwrap_err();
        assert_eq!(err, RathError::EngineUnavailable);

        assert!(store.set_computation_engine(ComputationEngine::WebWorker).await);
        let reply = store
            .engine_service(EngineTask::new("stat", serde_json::json!({"field": "age"})))
            .await
            .unwrap();
        assert_eq!(reply["props"]["field"], "age");
    }

    #[tokio::test]
    async fn test_tasks_run_alongside_each_other_but_block_switches() {
        let store = store();
        assert!(store.set_computation_engine(ComputationEngine::WebWorker).await);

        let in_flight = store.engine_guard.read().await;
        let reply = tokio::time::timeout(
            Duration::from_secs(1),
            store.engine_service(EngineTask::new("stat", serde_json::Value::Null)),
        )
        .await;
        assert!(matches!(reply, Ok(Ok(_))));

        let switch = tokio::time::timeout(
            Duration::from_millis(20),
            store.set_computation_engine(ComputationEngine::ClickHouse),
        )
        .await;
        assert!(switch.is_err());
        drop(in_flight);

        assert_eq!(
            store.snapshot().computation_engine,
            ComputationEngine::WebWorker
        );
        assert!(store.set_computation_engine(ComputationEngine::ClickHouse).await);
    }
}
