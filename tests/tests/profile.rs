use pretty_assertions::assert_eq;
use recipe_share::{driver::Operation, Caller, Error, ProfileInput, UserId};
use recipe_share_driver_memory::Memory;
use tests::{assert_err, assert_ok, profile, DbTest};

#[tokio::test]
async fn first_visit_creates_profile_from_email() {
    let mut test = DbTest::new(Memory::new());
    let caller = Caller::new(UserId::generate()).with_email("minji@example.com");

    let created = assert_ok!(test.db().get_or_create_profile(&caller).await);
    assert_eq!(created.id, caller.id);
    assert_eq!(created.username.as_deref(), Some("minji"));
    assert_eq!(created.full_name, None);
    assert_eq!(created.display_name(), "minji");
    assert_eq!(created.initial(), "M");

    let again = assert_ok!(test.db().get_or_create_profile(&caller).await);
    assert_eq!(again, created);

    // Only the first visit writes
    assert_eq!(test.log().writes(), 1);
}

#[tokio::test]
async fn first_visit_without_email() {
    let test = DbTest::new(Memory::new());
    let caller = Caller::new(UserId::generate());

    let created = assert_ok!(test.db().get_or_create_profile(&caller).await);
    assert_eq!(created.username, None);
    assert_eq!(created.display_name(), "이름 없음");
    assert_eq!(created.initial(), "?");
}

#[tokio::test]
async fn read_failure_does_not_create_profile() {
    let mut test = DbTest::with_fault(
        Memory::new(),
        Operation::is_query_profiles,
        Error::store("08006", "connection failure"),
    );
    let caller = Caller::new(UserId::generate()).with_email("a@example.com");

    let err = assert_err!(test.db().get_or_create_profile(&caller).await);
    assert!(err.is_store());
    assert_eq!(test.log().writes(), 0);
}

#[tokio::test]
async fn update_profile_fields() {
    let test = DbTest::new(Memory::new());
    let id = UserId::generate();
    test.store().seed_profile(profile(id, "alice"));

    let updated = assert_ok!(
        test.db()
            .update_profile(
                &id,
                ProfileInput {
                    username: Some(" alice ".to_string()),
                    full_name: Some("Alice Kim".to_string()),
                }
            )
            .await
    );

    assert_eq!(updated.username.as_deref(), Some("alice"));
    assert_eq!(updated.full_name.as_deref(), Some("Alice Kim"));
    assert_eq!(updated.display_name(), "Alice Kim");
    assert!(updated.updated_at > updated.created_at);

    // Blank clears
    let cleared = assert_ok!(
        test.db()
            .update_profile(
                &id,
                ProfileInput {
                    username: Some("alice".to_string()),
                    full_name: Some("  ".to_string()),
                }
            )
            .await
    );
    assert_eq!(cleared.full_name, None);
}

#[tokio::test]
async fn username_must_be_unique() {
    let mut test = DbTest::new(Memory::new());
    let alice = UserId::generate();
    let bob = UserId::generate();
    test.store().seed_profile(profile(alice, "alice"));
    test.store().seed_profile(profile(bob, "bob"));

    let err = assert_err!(
        test.db()
            .update_profile(
                &bob,
                ProfileInput {
                    username: Some("alice".to_string()),
                    full_name: None,
                }
            )
            .await
    );

    assert!(err.is_validation());
    assert_eq!(err.to_string(), "invalid username: `alice` is already taken");
    assert_eq!(test.log().writes(), 0);

    let unchanged = assert_ok!(test.db().profile(&bob).await);
    assert_eq!(unchanged.username.as_deref(), Some("bob"));
}

#[tokio::test]
async fn update_missing_profile_is_not_found() {
    let test = DbTest::new(Memory::new());

    let err = assert_err!(
        test.db()
            .update_profile(&UserId::generate(), ProfileInput::default())
            .await
    );
    assert!(err.is_record_not_found());
}
