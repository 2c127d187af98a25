use super::support::seeded_store;
use docnav::navigation::{NavigationFrame, NavigationSession};
use docnav::store::{DocumentStore, MemoryDocumentStore};
use docnav::tree::Node;
use docnav::types::{NodeId, NodeKind};
use proptest::prelude::*;
use std::sync::Arc;

#[tokio::test]
async fn enter_then_back_restores_root_breadcrumb() {
    let mut session = NavigationSession::at_root(seeded_store()).await.unwrap();

    session.enter_directory("D1", "Docs").await.unwrap();
    assert_eq!(session.frames(), &[NavigationFrame::new("D1", "Docs")]);
    assert_eq!(session.breadcrumb(), "/ Docs");

    session.go_back().await.unwrap();
    assert!(session.frames().is_empty());
    assert_eq!(session.breadcrumb(), "/ ");
}

#[tokio::test]
async fn nested_breadcrumb_and_parent() {
    let mut session = NavigationSession::at_root(seeded_store()).await.unwrap();
    session.enter_directory("D1", "Docs").await.unwrap();
    session.enter_directory("D2", "Reports").await.unwrap();
    session.enter_directory("D3", "Q1").await.unwrap();

    assert_eq!(session.breadcrumb_path(), vec!["Docs", "Reports", "Q1"]);
    assert_eq!(session.breadcrumb(), "/ Docs / Reports / Q1");
    assert_eq!(session.current_parent_id(), Some(&NodeId::new("D3")));
    assert!(session.listing().is_empty());

    session.enter_root().await.unwrap();
    assert!(session.frames().is_empty());
    assert_eq!(session.listing().len(), 2);
}

#[tokio::test]
async fn back_at_root_matches_root_listing() {
    let store = seeded_store();
    let mut session = NavigationSession::at_root(store.clone()).await.unwrap();

    assert!(!session.go_back().await.unwrap());
    let root = store.list_children(None).await.unwrap();
    assert!(session.listing().same_contents(&root));
}

#[tokio::test]
async fn listing_matches_independent_fetch_after_back() {
    let store = seeded_store();
    let mut session = NavigationSession::at_root(store.clone()).await.unwrap();
    session.enter_directory("D1", "Docs").await.unwrap();
    session.enter_directory("D2", "Reports").await.unwrap();
    session.go_back().await.unwrap();

    let docs = store.list_children(Some(&"D1".into())).await.unwrap();
    assert!(session.listing().same_contents(&docs));
}

#[derive(Debug, Clone)]
enum Step {
    Enter,
    Back,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![Just(Step::Enter), Just(Step::Back)]
}

/// A chain root -> L1 -> L2 -> ... -> L{depth}
fn chain_store(depth: usize) -> Arc<MemoryDocumentStore> {
    let store = MemoryDocumentStore::new();
    let mut parent: Option<NodeId> = None;
    for level in 1..=depth {
        let id = NodeId::new(format!("L{}", level));
        store
            .insert(Node::new(
                id.clone(),
                format!("level-{}", level),
                NodeKind::Directory,
                parent.clone(),
            ))
            .unwrap();
        parent = Some(id);
    }
    Arc::new(store)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn enter_and_back_are_inverse(steps in proptest::collection::vec(step(), 0..40)) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            let depth = 12;
            let mut session = NavigationSession::at_root(chain_store(depth)).await.unwrap();
            let mut history: Vec<Vec<NavigationFrame>> = Vec::new();

            for step in steps {
                match step {
                    Step::Enter => {
                        let Some(next) = session.listing().directories.first().cloned() else {
                            continue;
                        };
                        history.push(session.frames().to_vec());
                        session.enter_directory(next.id, next.name).await.unwrap();
                    }
                    Step::Back => {
                        let moved = session.go_back().await.unwrap();
                        match history.pop() {
                            Some(before) => {
                                assert!(moved);
                                assert_eq!(session.frames(), before.as_slice());
                            }
                            None => {
                                assert!(!moved);
                                assert!(session.frames().is_empty());
                            }
                        }
                    }
                }
                assert!(session.frames().len() <= depth);
            }
        });
    }
}
