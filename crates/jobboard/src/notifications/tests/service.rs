use super::common::*;
use std::sync::Arc;

use crate::notifications::{NotificationId, NotificationOutbox, NotificationSink, OutboxError};
use crate::store::{InMemoryNotificationRepository, InMemoryUserDirectory};

#[test]
fn deliver_creates_unread_notification() {
    let (outbox, repository) = build_outbox();

    let notification = outbox
        .deliver(&user_id(ALICE), "Welcome aboard")
        .expect("delivery succeeds");

    assert!(!notification.is_read);
    assert_eq!(notification.user_id, user_id(ALICE));
    assert_eq!(repository.all(), vec![notification]);
}

#[test]
fn deliver_rejects_blank_messages_and_unknown_recipients() {
    let (outbox, repository) = build_outbox();

    assert!(matches!(
        outbox.deliver(&user_id(ALICE), "   "),
        Err(OutboxError::Validation(_))
    ));
    assert!(matches!(
        outbox.deliver(&user_id("ghost"), "hello"),
        Err(OutboxError::NotFound("Recipient"))
    ));
    assert!(repository.all().is_empty());
}

#[test]
fn sink_impl_delegates_to_the_outbox() {
    let (outbox, repository) = build_outbox();
    let sink: Arc<dyn NotificationSink> = outbox;

    sink.deliver(&user_id(BOB), "A new candidate applied".to_string())
        .expect("sink delivery");

    assert_eq!(repository.all().len(), 1);
}

#[test]
fn listing_is_newest_first_and_scoped_to_recipient() {
    let (outbox, _) = build_outbox();
    seed(&outbox, ALICE, &["first", "second", "third"]);
    seed(&outbox, BOB, &["for bob"]);

    let messages: Vec<String> = outbox
        .list_for_user(&user_id(ALICE))
        .expect("listing")
        .into_iter()
        .map(|notification| notification.message)
        .collect();

    assert_eq!(messages, vec!["third", "second", "first"]);
}

#[test]
fn mark_read_is_scoped_to_owner() {
    let (outbox, _) = build_outbox();
    let delivered = seed(&outbox, ALICE, &["one", "two"]);

    assert!(matches!(
        outbox.mark_read(&user_id(BOB), &delivered[0].id),
        Err(OutboxError::NotFound("Notification"))
    ));
    assert_eq!(outbox.unread_count(&user_id(ALICE)).expect("count"), 2);

    let read = outbox
        .mark_read(&user_id(ALICE), &delivered[0].id)
        .expect("owner marks read");
    assert!(read.is_read);
    assert_eq!(outbox.unread_count(&user_id(ALICE)).expect("count"), 1);

    outbox
        .mark_read(&user_id(ALICE), &delivered[0].id)
        .expect("marking twice is harmless");
    assert_eq!(outbox.unread_count(&user_id(ALICE)).expect("count"), 1);
}

#[test]
fn mark_all_read_reports_only_flipped_rows() {
    let (outbox, _) = build_outbox();
    let delivered = seed(&outbox, ALICE, &["one", "two", "three"]);
    seed(&outbox, BOB, &["bob"]);
    outbox
        .mark_read(&user_id(ALICE), &delivered[1].id)
        .expect("mark read");

    assert_eq!(outbox.mark_all_read(&user_id(ALICE)).expect("mark all"), 2);
    assert_eq!(outbox.mark_all_read(&user_id(ALICE)).expect("mark all"), 0);
    assert_eq!(outbox.unread_count(&user_id(ALICE)).expect("count"), 0);
    assert_eq!(outbox.unread_count(&user_id(BOB)).expect("count"), 1);
}

#[test]
fn deletes_are_scoped_to_owner() {
    let (outbox, repository) = build_outbox();
    let delivered = seed(&outbox, ALICE, &["one", "two"]);
    seed(&outbox, BOB, &["bob-1", "bob-2"]);

    assert!(matches!(
        outbox.delete_one(&user_id(BOB), &delivered[0].id),
        Err(OutboxError::NotFound("Notification"))
    ));
    outbox
        .delete_one(&user_id(ALICE), &delivered[0].id)
        .expect("owner deletes");
    assert!(matches!(
        outbox.delete_one(&user_id(ALICE), &NotificationId("ntf-missing".to_string())),
        Err(OutboxError::NotFound(_))
    ));

    assert_eq!(outbox.delete_all(&user_id(BOB)).expect("delete all"), 2);
    assert_eq!(outbox.delete_all(&user_id(BOB)).expect("delete all"), 0);
    let remaining = repository.all();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, delivered[1].id);
}

#[test]
fn storage_failures_propagate() {
    let outbox = NotificationOutbox::new(
        Arc::new(UnavailableRepository),
        Arc::new(InMemoryUserDirectory::default()),
    );

    assert!(matches!(
        outbox.unread_count(&user_id(ALICE)),
        Err(OutboxError::Storage(_))
    ));
    assert!(matches!(
        outbox.delete_all(&user_id(ALICE)),
        Err(OutboxError::Storage(_))
    ));
}

#[test]
fn unreadable_directory_is_a_storage_failure_not_a_missing_recipient() {
    let repository = Arc::new(InMemoryNotificationRepository::default());
    let outbox = NotificationOutbox::new(repository.clone(), Arc::new(OfflineDirectory));

    let err = outbox
        .deliver(&user_id(ALICE), "hello")
        .expect_err("directory is offline");

    assert!(matches!(err, OutboxError::Directory(_)));
    assert!(repository.all().is_empty());
}
