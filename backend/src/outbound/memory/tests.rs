//! Behaviour of the in-memory store against the repository contracts.

use rstest::{fixture, rstest};

use super::*;
use crate::domain::WardColor;
use crate::test_support::{fixture_timestamp, nurse_draft, nurse_id, ward_draft, ward_id};

#[fixture]
fn store() -> InMemoryStaffStore {
    InMemoryStaffStore::new()
}

async fn seed_ward(store: &InMemoryStaffStore, name: &str) -> Ward {
    WardRepository::insert(store, &ward_draft(name, WardColor::Green), fixture_timestamp())
        .await
        .expect("ward insert")
}

async fn seed_nurse(store: &InMemoryStaffStore, email: &str, ward: i32) -> NurseView {
    NurseRepository::insert(
        store,
        &nurse_draft("Ann", "Lee", email, ward),
        &EmployeeId::generate(),
        fixture_timestamp(),
    )
    .await
    .expect("nurse insert")
}

#[rstest]
#[tokio::test]
async fn ward_ids_are_assigned_sequentially(store: InMemoryStaffStore) {
    let first = seed_ward(&store, "Ward 1").await;
    let second = seed_ward(&store, "Ward 2").await;

    assert_eq!(first.id.as_i32(), 1);
    assert_eq!(second.id.as_i32(), 2);
    assert_eq!(first.created_at, first.modified_at);
}

#[rstest]
#[tokio::test]
async fn has_nurses_tracks_references(store: InMemoryStaffStore) {
    seed_ward(&store, "Ward 1").await;
    seed_ward(&store, "Ward 2").await;
    seed_nurse(&store, "ann.lee@x.com", 2).await;

    let flags: Vec<_> = store
        .list_with_nurse_flags()
        .await
        .expect("list")
        .into_iter()
        .map(|summary| (summary.ward.id.as_i32(), summary.has_nurses))
        .collect();

    assert_eq!(flags, vec![(1, false), (2, true)]);
}

#[rstest]
#[tokio::test]
async fn delete_guard_leaves_both_stores_untouched(store: InMemoryStaffStore) {
    let ward = seed_ward(&store, "Ward 6").await;
    let nurse = seed_nurse(&store, "ann.lee@x.com", ward.id.as_i32()).await;

    let error = store
        .delete_unreferenced(ward.id)
        .await
        .expect_err("guarded");

    assert_eq!(
        error,
        WardRepositoryError::Violation {
            violation: ConsistencyViolation::WardHasNurses {
                ward_id: ward.id.as_i32(),
                count: 1,
            }
        }
    );
    assert!(
        WardRepository::find_by_id(&store, ward.id)
            .await
            .expect("find")
            .is_some()
    );
    assert!(
        NurseRepository::find_by_id(&store, nurse.nurse.id)
            .await
            .expect("find")
            .is_some()
    );
}

#[rstest]
#[tokio::test]
async fn ward_delete_succeeds_once_unreferenced(store: InMemoryStaffStore) {
    let ward = seed_ward(&store, "Ward 6").await;
    let nurse = seed_nurse(&store, "ann.lee@x.com", ward.id.as_i32()).await;

    NurseRepository::delete(&store, nurse.nurse.id)
        .await
        .expect("nurse delete");
    let removed = store.delete_unreferenced(ward.id).await.expect("ward delete");

    assert_eq!(removed, ward);
    assert!(store.list_with_nurse_flags().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn nurse_insert_rejects_unknown_ward(store: InMemoryStaffStore) {
    let error = NurseRepository::insert(
        &store,
        &nurse_draft("Ann", "Lee", "ann.lee@x.com", 9999),
        &EmployeeId::generate(),
        fixture_timestamp(),
    )
    .await
    .expect_err("unknown ward");

    assert_eq!(
        error,
        NurseRepositoryError::Violation {
            violation: ConsistencyViolation::UnknownWard { ward_id: 9999 }
        }
    );
    assert!(store.list_with_wards().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn duplicate_email_leaves_count_unchanged(store: InMemoryStaffStore) {
    seed_ward(&store, "Ward 6").await;
    seed_nurse(&store, "ann.lee@x.com", 1).await;

    let error = NurseRepository::insert(
        &store,
        &nurse_draft("Bea", "Ng", "ann.lee@x.com", 1),
        &EmployeeId::generate(),
        fixture_timestamp(),
    )
    .await
    .expect_err("duplicate email");

    assert!(matches!(
        error,
        NurseRepositoryError::Violation {
            violation: ConsistencyViolation::DuplicateEmail { .. }
        }
    ));
    assert_eq!(store.list_with_wards().await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test]
async fn update_keeping_own_email_succeeds(store: InMemoryStaffStore) {
    seed_ward(&store, "Ward 6").await;
    let nurse = seed_nurse(&store, "ann.lee@x.com", 1).await;

    let updated = NurseRepository::update(
        &store,
        nurse.nurse.id,
        &nurse_draft("Annie", "Lee", "ann.lee@x.com", 1),
        fixture_timestamp(),
    )
    .await
    .expect("self email is not a conflict");

    assert_eq!(updated.nurse.full_name(), "Annie Lee");
    assert_eq!(updated.nurse.employee_id, nurse.nurse.employee_id);
}

#[rstest]
#[tokio::test]
async fn update_taking_another_email_conflicts(store: InMemoryStaffStore) {
    seed_ward(&store, "Ward 6").await;
    seed_nurse(&store, "ann.lee@x.com", 1).await;
    let other = seed_nurse(&store, "bea.ng@x.com", 1).await;

    let error = NurseRepository::update(
        &store,
        other.nurse.id,
        &nurse_draft("Bea", "Ng", "ann.lee@x.com", 1),
        fixture_timestamp(),
    )
    .await
    .expect_err("conflict");

    assert!(matches!(
        error,
        NurseRepositoryError::Violation {
            violation: ConsistencyViolation::DuplicateEmail { .. }
        }
    ));
    let unchanged = NurseRepository::find_by_id(&store, other.nurse.id)
        .await
        .expect("find")
        .expect("present");
    assert_eq!(unchanged.nurse.email.as_ref(), "bea.ng@x.com");
}

#[rstest]
#[tokio::test]
async fn update_to_unknown_ward_leaves_record_unchanged(store: InMemoryStaffStore) {
    seed_ward(&store, "Ward 6").await;
    let nurse = seed_nurse(&store, "ann.lee@x.com", 1).await;

    let error = NurseRepository::update(
        &store,
        nurse.nurse.id,
        &nurse_draft("Ann", "Lee", "ann.lee@x.com", 9999),
        fixture_timestamp(),
    )
    .await
    .expect_err("unknown ward");

    assert!(matches!(error, NurseRepositoryError::Violation { .. }));
    let unchanged = NurseRepository::find_by_id(&store, nurse.nurse.id)
        .await
        .expect("find")
        .expect("present");
    assert_eq!(unchanged, nurse);
}

#[rstest]
#[tokio::test]
async fn employee_ids_are_never_reissued(store: InMemoryStaffStore) {
    seed_ward(&store, "Ward 6").await;
    let employee_id = EmployeeId::generate();
    let first = NurseRepository::insert(
        &store,
        &nurse_draft("Ann", "Lee", "ann.lee@x.com", 1),
        &employee_id,
        fixture_timestamp(),
    )
    .await
    .expect("insert");
    NurseRepository::delete(&store, first.nurse.id)
        .await
        .expect("delete");

    let error = NurseRepository::insert(
        &store,
        &nurse_draft("Bea", "Ng", "bea.ng@x.com", 1),
        &employee_id,
        fixture_timestamp(),
    )
    .await
    .expect_err("reused id");

    assert!(matches!(
        error,
        NurseRepositoryError::Violation {
            violation: ConsistencyViolation::DuplicateEmployeeId { .. }
        }
    ));
}

#[rstest]
#[tokio::test]
async fn missing_records_report_not_found(store: InMemoryStaffStore) {
    assert_eq!(
        NurseRepository::delete(&store, nurse_id(3))
            .await
            .expect_err("missing"),
        NurseRepositoryError::NotFound { nurse_id: 3 }
    );
    assert_eq!(
        WardRepository::update(
            &store,
            ward_id(4),
            &ward_draft("Ward 4", WardColor::Blue),
            fixture_timestamp()
        )
        .await
        .expect_err("missing"),
        WardRepositoryError::NotFound { ward_id: 4 }
    );
}
