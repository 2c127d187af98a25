use super::support::seeded_store;
use docnav::edit::{NodeEditState, RowIntent};
use docnav::navigation::NavigationSession;
use docnav::store::StoreRequest;
use docnav::types::{NodeId, NodeKind};
use docnav::StoreError;

#[tokio::test]
async fn confirm_renames_through_synchronizer() {
    let store = seeded_store();
    let mut session = NavigationSession::at_root(store.clone()).await.unwrap();
    session.enter_directory("D1", "Docs").await.unwrap();
    let f9 = NodeId::new("F9");

    assert!(session.start_edit(&f9).unwrap());
    assert_eq!(
        session.edit_state(&f9).pending_name(),
        Some("draft.txt")
    );

    // Keystrokes touch only the buffer.
    for _ in 0.."txt".len() {
        session.edits_mut().backspace(&f9);
    }
    for c in "md".chars() {
        session.edits_mut().push_char(&f9, c);
    }
    assert!(store.requests().is_empty());

    assert!(session.confirm_edit(&f9).await.unwrap());
    assert_eq!(session.edit_state(&f9), NodeEditState::Viewing);
    assert_eq!(
        store.requests(),
        vec![StoreRequest::Rename {
            kind: NodeKind::File,
            node_id: f9.clone(),
            name: "draft.md".to_string(),
            parent_id: Some(NodeId::new("D1")),
        }]
    );
    assert_eq!(session.listing().find_by_id(&f9).unwrap().name, "draft.md");
}

#[tokio::test]
async fn confirm_returns_to_viewing_even_when_rename_fails() {
    let store = seeded_store();
    let mut session = NavigationSession::at_root(store.clone()).await.unwrap();
    let f1 = NodeId::new("F1");

    session.start_edit(&f1).unwrap();
    session.edits_mut().set_pending(&f1, "README.md");
    store.fail_next(StoreError::NotFound("F1".to_string()));

    assert!(session.confirm_edit(&f1).await.is_err());
    assert_eq!(session.edit_state(&f1), NodeEditState::Viewing);
    assert_eq!(session.listing().find_by_id(&f1).unwrap().name, "readme.md");
}

#[tokio::test]
async fn cancel_discards_without_store_call() {
    let store = seeded_store();
    let mut session = NavigationSession::at_root(store.clone()).await.unwrap();
    let d1 = NodeId::new("D1");

    session.start_edit(&d1).unwrap();
    session.edits_mut().set_pending(&d1, "Documents");
    assert!(session.cancel_edit(&d1));
    assert!(!session.confirm_edit(&d1).await.unwrap());
    assert!(store.requests().is_empty());
    assert_eq!(session.open(&d1).await.unwrap(), RowIntent::Open);
}

#[tokio::test]
async fn editing_unlisted_node_is_rejected() {
    let store = seeded_store();
    let mut session = NavigationSession::at_root(store).await.unwrap();
    assert!(session.start_edit(&NodeId::new("F9")).is_err());
}
