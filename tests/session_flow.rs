use replytree::error::ThreadError;
use replytree::session::{CommentSession, FormVisibility};
use replytree::store::{MemoryThreadStore, ThreadStore};
use replytree::tree::find_by_id;

const SITE_AUTHOR: &str = "Victor";

fn open_session(store: &MemoryThreadStore) -> CommentSession<&MemoryThreadStore> {
    CommentSession::open(store, "index", SITE_AUTHOR).unwrap()
}

/// The full scenario: anonymous top-level post, author reply, persisted and
/// reloaded structurally identical.
#[test]
fn end_to_end_post_reply_persist_reload() {
    let store = MemoryThreadStore::new();

    let mut session = open_session(&store);
    assert!(session.comments().is_empty());

    let form = session.top_form_mut();
    form.name = "".to_string();
    form.content = "Hello".to_string();
    let outcome = session.submit_top_level().unwrap();
    assert!(outcome.persisted);

    assert_eq!(session.comments().len(), 1);
    let top = &session.comments()[0];
    assert_eq!(top.author, "Anonymous");
    assert_eq!(top.content, "Hello");
    let top_id = top.id.clone();

    session.toggle_reply_form(&top_id);
    let draft = session.reply_draft_mut(&top_id).unwrap();
    draft.name = "Victor".to_string();
    draft.content = "Thanks".to_string();
    session.submit_reply(&top_id).unwrap();

    let top = &session.comments()[0];
    assert_eq!(top.children.len(), 1);
    let reply = &top.children[0];
    assert_eq!(reply.author, "Victor");
    assert!(reply.is_author);
    assert_eq!(reply.content, "Thanks");

    let expected = session.comments().clone();
    drop(session);

    let reloaded = open_session(&store);
    assert_eq!(reloaded.comments(), &expected);
}

#[test]
fn corrupt_store_opens_as_empty_thread() {
    let store = MemoryThreadStore::with_payload("!!! not json");
    let session = open_session(&store);
    assert!(session.comments().is_empty());
    assert!(session.render().is_empty());
}

#[test]
fn reply_form_state_machine() {
    let store = MemoryThreadStore::new();
    let mut session = open_session(&store);
    session.top_form_mut().content = "root".to_string();
    let id = session.submit_top_level().unwrap().id;

    // Hidden -> activate -> Shown, with a fresh empty draft.
    assert!(session.reply_form(&id).is_none());
    let form = session.toggle_reply_form(&id);
    assert_eq!(form.visibility, FormVisibility::Shown);
    assert!(form.draft.content.is_empty());

    // Activating again toggles visibility without discarding content.
    session.reply_draft_mut(&id).unwrap().content = "in progress".to_string();
    let form = session.toggle_reply_form(&id);
    assert_eq!(form.visibility, FormVisibility::Hidden);
    assert_eq!(form.draft.content, "in progress");
    let form = session.toggle_reply_form(&id);
    assert_eq!(form.visibility, FormVisibility::Shown);
    assert_eq!(form.draft.content, "in progress");

    // Cancel discards; the next activation starts fresh.
    session.cancel_reply(&id);
    assert!(session.reply_form(&id).is_none());
    let form = session.toggle_reply_form(&id);
    assert_eq!(form.visibility, FormVisibility::Shown);
    assert!(form.draft.content.is_empty());

    // Validation failure keeps the form (and its draft) around.
    let err = session.submit_reply(&id).unwrap_err();
    assert!(matches!(err, ThreadError::EmptyContent));
    assert!(session.reply_form(&id).is_some());
    assert_eq!(session.comments()[0].children.len(), 0);

    // Successful submit discards the form.
    session.reply_draft_mut(&id).unwrap().content = "done".to_string();
    session.submit_reply(&id).unwrap();
    assert!(session.reply_form(&id).is_none());
    assert_eq!(session.comments()[0].children.len(), 1);
}

#[test]
fn anonymous_toggle_clears_and_disables_name() {
    let store = MemoryThreadStore::new();
    let mut session = open_session(&store);

    let form = session.top_form_mut();
    form.name = "Dana".to_string();
    assert!(form.name_enabled());
    form.set_anonymous(true);
    assert!(form.name.is_empty());
    assert!(!form.name_enabled());
    form.set_anonymous(false);
    assert!(form.name_enabled());
}

#[test]
fn top_form_resets_after_successful_submit() {
    let store = MemoryThreadStore::new();
    let mut session = open_session(&store);

    let form = session.top_form_mut();
    form.name = "Dana".to_string();
    form.content = "first".to_string();
    session.submit_top_level().unwrap();

    let form = session.top_form_mut();
    assert!(form.name.is_empty());
    assert!(form.content.is_empty());
    assert!(!form.anonymous);
}

#[test]
fn top_form_is_kept_when_validation_fails() {
    let store = MemoryThreadStore::new();
    let mut session = open_session(&store);

    let form = session.top_form_mut();
    form.name = "Dana".to_string();
    form.content = "   ".to_string();
    let err = session.submit_top_level().unwrap_err();
    assert!(matches!(err, ThreadError::EmptyContent));

    assert!(session.comments().is_empty());
    assert_eq!(session.top_form_mut().name, "Dana");
}

#[test]
fn replies_nest_to_arbitrary_depth() {
    let store = MemoryThreadStore::new();
    let mut session = open_session(&store);
    session.top_form_mut().content = "root".to_string();
    let mut parent = session.submit_top_level().unwrap().id;

    for depth in 1..=4 {
        session.toggle_reply_form(&parent);
        session.reply_draft_mut(&parent).unwrap().content = format!("depth {}", depth);
        parent = session.submit_reply(&parent).unwrap().id;
    }

    let deepest = find_by_id(session.comments(), &parent).unwrap();
    assert_eq!(deepest.content, "depth 4");

    // The whole structure made it to the store, not just the top level.
    drop(session);
    let reloaded = open_session(&store);
    assert!(find_by_id(reloaded.comments(), &parent).is_some());
}

#[test]
fn stale_reply_target_is_rejected_without_mutation() {
    let store = MemoryThreadStore::new();
    let mut session = open_session(&store);
    session.top_form_mut().content = "root".to_string();
    session.submit_top_level().unwrap();

    // A form bound to an id that never existed in the tree.
    session.toggle_reply_form("424242");
    session.reply_draft_mut("424242").unwrap().content = "orphan".to_string();
    let err = session.submit_reply("424242").unwrap_err();
    assert!(matches!(err, ThreadError::ParentNotFound(_)));
    assert!(session.comments()[0].children.is_empty());
}

#[test]
fn failed_store_write_keeps_the_session_usable() {
    let store = MemoryThreadStore::new();
    let mut session = open_session(&store);

    store.set_fail_writes(true);
    session.top_form_mut().content = "unsaved".to_string();
    let outcome = session.submit_top_level().unwrap();
    assert!(!outcome.persisted);

    // The comment is visible for the rest of the session.
    assert_eq!(session.comments().len(), 1);
    assert!(!session.render().is_empty());
    assert!(store.raw().is_none());

    // Once the store recovers, the next mutation persists everything.
    store.set_fail_writes(false);
    session.top_form_mut().content = "saved".to_string();
    let outcome = session.submit_top_level().unwrap();
    assert!(outcome.persisted);

    drop(session);
    let reloaded = open_session(&store);
    assert_eq!(reloaded.comments().len(), 2);
}

#[test]
fn submit_without_a_shown_form_is_rejected() {
    let store = MemoryThreadStore::new();
    let mut session = open_session(&store);
    session.top_form_mut().content = "root".to_string();
    let id = session.submit_top_level().unwrap().id;

    // No form ever activated.
    assert!(session.submit_reply(&id).is_err());

    // Form toggled back to hidden.
    session.toggle_reply_form(&id);
    session.reply_draft_mut(&id).unwrap().content = "hidden".to_string();
    session.toggle_reply_form(&id);
    assert!(session.submit_reply(&id).is_err());
    assert!(session.comments()[0].children.is_empty());
}
