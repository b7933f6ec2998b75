use std::path::PathBuf;

use talenthub_core::RatingCategory;
use uuid::Uuid;

use super::*;

fn temp_ledger_path() -> PathBuf {
    std::env::temp_dir().join(format!("talenthub-ledger-{}.json", Uuid::new_v4()))
}

#[tokio::test]
async fn missing_file_opens_empty() {
    let ledger = Ledger::open(temp_ledger_path()).await.unwrap();
    assert!(!ledger.is_registered("GABC").await);
    assert_eq!(ledger.raw_score("GABC").await.unwrap(), 0);
    assert!(ledger.badge_records("GABC").await.unwrap().is_empty());
}

#[tokio::test]
async fn register_initializes_score_and_refuses_duplicates() {
    let ledger = Ledger::open(temp_ledger_path()).await.unwrap();
    ledger.register("GABC", "hash-1").await.unwrap();

    assert!(ledger.is_registered("GABC").await);
    assert_eq!(ledger.raw_score("GABC").await.unwrap(), 0);
    assert_eq!(ledger.profile_hash("GABC").await.as_deref(), Some("hash-1"));

    let err = ledger.register("GABC", "hash-2").await.unwrap_err();
    assert!(matches!(err, StoreError::AlreadyRegistered(ref k) if k == "GABC"));
    assert_eq!(ledger.profile_hash("GABC").await.as_deref(), Some("hash-1"));
}

#[tokio::test]
async fn set_profile_hash_requires_registration() {
    let ledger = Ledger::open(temp_ledger_path()).await.unwrap();
    let err = ledger.set_profile_hash("GNEW", "h").await.unwrap_err();
    assert!(matches!(err, StoreError::NotRegistered(_)));

    ledger.register("GNEW", "h1").await.unwrap();
    ledger.set_profile_hash("GNEW", "h2").await.unwrap();
    assert_eq!(ledger.profile_hash("GNEW").await.as_deref(), Some("h2"));
}

#[tokio::test]
async fn state_survives_reopen() {
    let path = temp_ledger_path();
    {
        let ledger = Ledger::open(&path).await.unwrap();
        ledger.register("GABC", "hash").await.unwrap();
        ledger.set_score("GABC", 420).await.unwrap();
    }
    let reopened = Ledger::open(&path).await.unwrap();
    assert!(reopened.is_registered("GABC").await);
    assert_eq!(reopened.raw_score("GABC").await.unwrap(), 420);
}

#[tokio::test]
async fn registered_at_is_recorded_and_survives_reopen() {
    let path = temp_ledger_path();
    let before = Utc::now().timestamp_millis();
    let stamped = {
        let ledger = Ledger::open(&path).await.unwrap();
        assert!(ledger.registered_at("GABC").await.is_none());
        ledger.register("GABC", "hash").await.unwrap();
        ledger.registered_at("GABC").await.unwrap()
    };
    let after = Utc::now().timestamp_millis();
    assert!((before..=after).contains(&stamped.timestamp_millis()));

    let reopened = Ledger::open(&path).await.unwrap();
    assert_eq!(reopened.registered_at("GABC").await, Some(stamped));
    assert!(reopened.registered_at("GOTHER").await.is_none());
}

#[tokio::test]
async fn unreadable_registration_time_is_none() {
    let ledger = Ledger::open(temp_ledger_path()).await.unwrap();
    ledger.put_entry("GABC", "USER_REGISTERED", "yesterday").await.unwrap();
    assert!(ledger.registered_at("GABC").await.is_none());
}

#[tokio::test]
async fn unparsable_score_reads_as_zero() {
    let ledger = Ledger::open(temp_ledger_path()).await.unwrap();
    ledger.put_entry("GABC", "REP_SCORE", "lots").await.unwrap();
    assert_eq!(ledger.raw_score("GABC").await.unwrap(), 0);
}

#[tokio::test]
async fn apply_rating_updates_target_and_files_record_with_rater() {
    let ledger = Ledger::open(temp_ledger_path()).await.unwrap();
    ledger.register("GTARGET", "h").await.unwrap();
    ledger.set_score("GTARGET", 990).await.unwrap();

    let record =
        RatingRecord::new("GRATER", "GTARGET", 5, RatingCategory::Quality, None).unwrap();
    let new_score = ledger.apply_rating(&record).await.unwrap();

    assert_eq!(new_score, 1000);
    assert_eq!(ledger.raw_score("GTARGET").await.unwrap(), 1000);

    let filed = ledger.ratings_by("GRATER").await;
    assert_eq!(filed.len(), 1);
    assert_eq!(filed[0].id, record.id);
    assert!(ledger.ratings_by("GTARGET").await.is_empty());
}

#[tokio::test]
async fn award_badge_is_listed_and_keyed_uppercase() {
    let ledger = Ledger::open(temp_ledger_path()).await.unwrap();
    let badge = ledger
        .award_badge("GADMIN", "GABC", "early_adopter", "Joined in the first week")
        .await
        .unwrap();
    assert_eq!(badge.awarded_to.as_deref(), Some("GABC"));

    // Same name again replaces rather than duplicates.
    ledger
        .award_badge("GADMIN", "GABC", "Early_Adopter", "again")
        .await
        .unwrap();

    let records = ledger.badge_records("GABC").await.unwrap();
    assert_eq!(records.len(), 1);
    let parsed = talenthub_core::parse_badge(&records[0]).unwrap();
    assert_eq!(parsed.name, "Early_Adopter");
}

#[tokio::test]
async fn award_badge_rejects_blank_name() {
    let ledger = Ledger::open(temp_ledger_path()).await.unwrap();
    let err = ledger
        .award_badge("GADMIN", "GABC", "  ", "nothing")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
}

#[tokio::test]
async fn corrupt_file_fails_to_open() {
    let path = temp_ledger_path();
    tokio::fs::write(&path, b"{not json").await.unwrap();
    let err = Ledger::open(&path).await.unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
}
