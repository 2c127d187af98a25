use super::support::{seeded_store, ReorderingStore};
use docnav::navigation::{DeleteOutcome, NavigationSession};
use docnav::store::{DocumentStore, StoreRequest};
use docnav::types::{NodeId, NodeKind};
use docnav::{ApiError, StoreError};
use std::sync::Arc;

async fn session_in_docs() -> (Arc<docnav::store::MemoryDocumentStore>, NavigationSession) {
    let store = seeded_store();
    let mut session = NavigationSession::at_root(store.clone()).await.unwrap();
    session.enter_directory("D1", "Docs").await.unwrap();
    (store, session)
}

#[tokio::test]
async fn create_directory_appears_under_current_parent() {
    let (store, mut session) = session_in_docs().await;

    session
        .synchronizer()
        .create(NodeKind::Directory, "Reports")
        .await
        .unwrap();

    let docs = store.list_children(Some(&"D1".into())).await.unwrap();
    let created: Vec<_> = docs
        .directories
        .iter()
        .filter(|node| node.name == "Reports")
        .collect();
    // Duplicate names are accepted: the seeded Reports and the new one.
    assert_eq!(created.len(), 2);
    assert!(created
        .iter()
        .all(|node| node.parent_id == Some(NodeId::new("D1"))));
    assert!(session.listing().same_contents(&docs));
}

#[tokio::test]
async fn rename_payload_carries_current_parent_not_node_id() {
    let (store, mut session) = session_in_docs().await;

    session
        .synchronizer()
        .rename(NodeKind::File, "final.txt", &"F9".into())
        .await
        .unwrap();

    let Some(StoreRequest::Rename { parent_id, .. }) = store.requests().pop() else {
        panic!("expected a rename request");
    };
    assert_eq!(parent_id, Some(NodeId::new("D1")));
    assert_ne!(parent_id, Some(NodeId::new("F9")));

    let docs = store.list_children(Some(&"D1".into())).await.unwrap();
    assert!(session.listing().same_contents(&docs));
    assert_eq!(store.get(&"F9".into()).unwrap().name, "final.txt");
}

#[tokio::test]
async fn delete_refetches_and_is_idempotent() {
    let (store, mut session) = session_in_docs().await;

    let first = session
        .synchronizer()
        .delete(NodeKind::File, &"F9".into())
        .await
        .unwrap();
    assert_eq!(first, DeleteOutcome::Deleted);
    assert!(session.listing().files.is_empty());

    let second = session
        .synchronizer()
        .delete(NodeKind::File, &"F9".into())
        .await
        .unwrap();
    assert_eq!(second, DeleteOutcome::AlreadyAbsent);

    let docs = store.list_children(Some(&"D1".into())).await.unwrap();
    assert!(session.listing().same_contents(&docs));
}

#[tokio::test]
async fn directory_delete_cascades() {
    let (store, mut session) = session_in_docs().await;

    session
        .synchronizer()
        .delete(NodeKind::Directory, &"D2".into())
        .await
        .unwrap();
    assert!(!store.contains(&"D2".into()));
    assert!(!store.contains(&"D3".into()));
    assert!(store.contains(&"F9".into()));
}

#[tokio::test]
async fn failed_mutations_leave_state_untouched() {
    let (store, mut session) = session_in_docs().await;
    let listing = session.listing().clone();
    let frames = session.frames().to_vec();

    store.fail_next(StoreError::Transport("timeout".to_string()));
    let err = session
        .synchronizer()
        .rename(NodeKind::File, "x.txt", &"F9".into())
        .await
        .unwrap_err();
    assert!(err.store_error().unwrap().is_retryable());

    let err = session
        .synchronizer()
        .rename(NodeKind::File, "x.txt", &"gone".into())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Store(StoreError::NotFound(_))));

    store.fail_next(StoreError::Transport("reset".to_string()));
    let err = session
        .synchronizer()
        .delete(NodeKind::File, &"F9".into())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Store(StoreError::Transport(_))));

    assert_eq!(session.listing(), &listing);
    assert_eq!(session.frames(), frames.as_slice());
}

#[tokio::test]
async fn create_in_vanished_directory_is_invalid_parent() {
    let (store, mut session) = session_in_docs().await;
    store
        .delete_node(NodeKind::Directory, &"D1".into(), true)
        .await
        .unwrap();
    let listing = session.listing().clone();

    let err = session
        .synchronizer()
        .create(NodeKind::File, "orphan.txt")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Store(StoreError::InvalidParent(_))));
    assert_eq!(session.listing(), &listing);
}

#[tokio::test]
async fn refetch_consistency_does_not_depend_on_order() {
    let memory = seeded_store();
    let store = Arc::new(ReorderingStore::new(memory.clone()));
    let mut session = NavigationSession::at_root(store.clone()).await.unwrap();
    session.enter_directory("D1", "Docs").await.unwrap();

    let node = session
        .synchronizer()
        .create(NodeKind::File, "b.txt")
        .await
        .unwrap();
    session
        .synchronizer()
        .rename(NodeKind::File, "c.txt", &node.id)
        .await
        .unwrap();

    let independent = memory.list_children(Some(&"D1".into())).await.unwrap();
    assert!(session.listing().same_contents(&independent));
    assert_eq!(
        session.listing().find_by_id(&node.id).unwrap().name,
        "c.txt"
    );
}
