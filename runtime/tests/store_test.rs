//! Integration tests for the Store runtime
//!
//! Covers ordering of storage writes, the delayed-action feedback loop,
//! broadcasting and graceful shutdown. Time is paused so timers fire
//! deterministically.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::Arc;
use std::time::Duration;
use todo_board_core::effect::StorageOperation;
use todo_board_core::environment::KeyValueStorage;
use todo_board_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use todo_board_runtime::{Store, StoreError};
use todo_board_testing::{FailingStorage, MemoryStorage};

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum TestAction {
    /// Append a value and persist the whole log
    Record { value: u32 },
    /// Schedule `Fired { tag }` after `ms`
    Schedule { ms: u64, tag: u32 },
    /// Timer fired
    Fired { tag: u32 },
}

#[derive(Debug, Clone, Default)]
struct TestState {
    log: Vec<u32>,
    fired: Vec<u32>,
}

struct TestEnvironment {
    storage: Arc<dyn KeyValueStorage>,
}

#[derive(Clone)]
struct TestReducer;

impl Reducer for TestReducer {
    type State = TestState;
    type Action = TestAction;
    type Environment = TestEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TestAction::Record { value } => {
                state.log.push(value);
                smallvec![Effect::Storage(StorageOperation::Write {
                    storage: Arc::clone(&env.storage),
                    key: "log".to_string(),
                    value: format!("{:?}", state.log),
                })]
            },
            TestAction::Schedule { ms, tag } => {
                smallvec![Effect::delay(
                    Duration::from_millis(ms),
                    TestAction::Fired { tag }
                )]
            },
            TestAction::Fired { tag } => {
                state.fired.push(tag);
                SmallVec::new()
            },
        }
    }
}

type TestStore = Store<TestState, TestAction, TestEnvironment, TestReducer>;

fn store_with(storage: Arc<dyn KeyValueStorage>) -> TestStore {
    Store::new(TestState::default(), TestReducer, TestEnvironment { storage })
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn storage_write_is_done_when_send_returns() {
    let storage = MemoryStorage::new();
    let store = store_with(Arc::new(storage.clone()));

    let handle = tokio_test::assert_ok!(store.send(TestAction::Record { value: 1 }).await);

    assert_eq!(handle.pending(), 0);
    assert_eq!(storage.raw("log").as_deref(), Some("[1]"));
    assert_eq!(storage.write_count(), 1);
}

#[tokio::test]
async fn concurrent_sends_persist_the_final_state() {
    let storage = MemoryStorage::new();
    let store = store_with(Arc::new(storage.clone()));

    let handles: Vec<_> = (0..20)
        .map(|value| {
            let store = store.clone();
            tokio::spawn(async move { store.send(TestAction::Record { value }).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let log = store.state(|s| s.log.clone()).await;
    assert_eq!(log.len(), 20);
    assert_eq!(storage.raw("log"), Some(format!("{log:?}")));
    assert_eq!(storage.write_count(), 20);
}

#[tokio::test]
async fn failed_storage_write_keeps_state() {
    let store = store_with(Arc::new(FailingStorage));

    tokio_test::assert_ok!(store.send(TestAction::Record { value: 7 }).await);

    assert_eq!(store.state(|s| s.log.clone()).await, vec![7]);
}

#[tokio::test(start_paused = true)]
async fn delayed_action_feeds_back_after_duration() {
    let store = store_with(Arc::new(MemoryStorage::new()));

    let mut handle = store
        .send(TestAction::Schedule { ms: 3000, tag: 1 })
        .await
        .unwrap();
    assert_eq!(handle.pending(), 1);
    assert_eq!(store.pending_effects(), 1);

    tokio::time::sleep(Duration::from_millis(2999)).await;
    assert!(store.state(|s| s.fired.is_empty()).await);

    handle.wait().await;
    assert_eq!(store.state(|s| s.fired.clone()).await, vec![1]);
    assert_eq!(store.pending_effects(), 0);
}

#[tokio::test(start_paused = true)]
async fn fed_back_actions_are_broadcast_after_reduction() {
    let store = store_with(Arc::new(MemoryStorage::new()));
    let mut actions = store.subscribe_actions();

    store.send(TestAction::Schedule { ms: 20, tag: 2 }).await.unwrap();
    store.send(TestAction::Schedule { ms: 10, tag: 1 }).await.unwrap();

    assert_eq!(actions.recv().await.unwrap(), TestAction::Fired { tag: 1 });
    assert_eq!(store.state(|s| s.fired.clone()).await, vec![1]);

    assert_eq!(actions.recv().await.unwrap(), TestAction::Fired { tag: 2 });
    assert_eq!(store.state(|s| s.fired.clone()).await, vec![1, 2]);
}

#[tokio::test]
async fn commands_are_not_broadcast() {
    let store = store_with(Arc::new(MemoryStorage::new()));
    let mut actions = store.subscribe_actions();

    store.send(TestAction::Record { value: 1 }).await.unwrap();

    assert!(actions.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn shutdown_rejects_new_actions_but_lands_pending_timers() {
    let store = store_with(Arc::new(MemoryStorage::new()));
    store.send(TestAction::Schedule { ms: 50, tag: 9 }).await.unwrap();

    store.shutdown(Duration::from_secs(1)).await.unwrap();

    assert_eq!(store.state(|s| s.fired.clone()).await, vec![9]);
    assert!(matches!(
        store.send(TestAction::Record { value: 1 }).await,
        Err(StoreError::ShutdownInProgress)
    ));
}

#[tokio::test(start_paused = true)]
async fn shutdown_times_out_on_long_timers() {
    let store = store_with(Arc::new(MemoryStorage::new()));
    store
        .send(TestAction::Schedule { ms: 10_000, tag: 1 })
        .await
        .unwrap();

    let result = store.shutdown(Duration::from_millis(250)).await;

    assert!(matches!(result, Err(StoreError::ShutdownTimeout(1))));
}
