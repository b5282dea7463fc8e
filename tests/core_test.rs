use chrono::{Duration, TimeZone, Utc};
use unfollowr::management::{MemoryStore, SESSION_KEY, TokenStore, UnfollowStore};
use unfollowr::reconcile::{artists_to_unfollow, score_map, score_of};
use unfollowr::types::{ArtistRef, Credential, ScoreMap, UnfollowRecord, UnfollowTableRow};
use unfollowr::utils::*;

// Helper function to create a test artist
fn artist(id: &str) -> ArtistRef {
    ArtistRef::new(id, format!("Artist {}", id))
}

// Helper function to create a test history record
fn record(id: &str, name: &str, minute: u32) -> UnfollowRecord {
    UnfollowRecord {
        spotify_id: id.to_string(),
        name: name.to_string(),
        unfollowed_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap(),
    }
}

#[test]
fn test_score_merge_prefers_most_recent_window() {
    // "a" is in the long and short windows only
    let scores = score_map(&[artist("a")], &[artist("b")], &[artist("a"), artist("c")]);

    assert_eq!(score_of(&scores, "a"), 3);
    assert_eq!(score_of(&scores, "b"), 2);
    assert_eq!(score_of(&scores, "c"), 1);
    assert_eq!(score_of(&scores, "missing"), 0);
}

#[test]
fn test_threshold_flags_absent_and_long_term_only() {
    let followed = vec![artist("a"), artist("b"), artist("c")];
    let mut scores = ScoreMap::new();
    scores.insert("b".to_string(), 1);
    scores.insert("c".to_string(), 3);

    let result = artists_to_unfollow(&followed, &scores);

    // Order of the followed list is kept, "c" is listened to recently
    assert_eq!(result, vec![artist("a"), artist("b")]);
}

#[test]
fn test_reconcile_with_real_windows() {
    let followed = vec![
        artist("z"),
        artist("long"),
        artist("medium"),
        artist("short"),
        artist("never"),
    ];
    let scores = score_map(
        &[artist("short")],
        &[artist("medium")],
        &[artist("long"), artist("medium"), artist("short")],
    );

    let result = artists_to_unfollow(&followed, &scores);
    let ids: Vec<&str> = result.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["z", "long", "never"]);
}

#[test]
fn test_empty_followed_list_gives_empty_result() {
    let scores = score_map(&[artist("a")], &[artist("b")], &[artist("c")]);
    assert!(artists_to_unfollow(&[], &scores).is_empty());
}

#[tokio::test]
async fn test_token_store_is_overwritten_not_merged() {
    let store = TokenStore::new();
    store
        .store(
            SESSION_KEY,
            Credential {
                access_token: "a1".to_string(),
                refresh_token: "r1".to_string(),
            },
        )
        .await;
    store
        .store(
            SESSION_KEY,
            Credential {
                access_token: "a2".to_string(),
                refresh_token: String::new(),
            },
        )
        .await;

    let credential = store.get(SESSION_KEY).await.unwrap();
    assert_eq!(credential.access_token, "a2");
    assert_eq!(credential.refresh_token, "");
}

#[tokio::test]
async fn test_upsert_twice_keeps_one_record_per_artist() {
    let store = MemoryStore::new();
    let flagged = vec![artist("a"), artist("b")];
    let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let second = first + Duration::days(1);

    store.upsert_many(&flagged, first).await.unwrap();
    store.upsert_many(&flagged, second).await.unwrap();

    let records = store.list().await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.unfollowed_at == second));
    assert_eq!(store.upsert_calls(), 2);
}

#[test]
fn test_sort_records_newest_first() {
    let mut records = vec![
        record("1", "beta", 1),
        record("2", "Alpha", 5),
        record("3", "alpha two", 5),
    ];

    sort_records_newest_first(&mut records);

    let ids: Vec<&str> = records.iter().map(|r| r.spotify_id.as_str()).collect();
    assert_eq!(ids, vec!["2", "3", "1"]);
}

#[test]
fn test_filter_records_by_name_ignores_case() {
    let mut records = vec![
        record("1", "The Band", 1),
        record("2", "Solo Artist", 2),
        record("3", "BANDITS", 3),
    ];

    filter_records_by_name(&mut records, "band");

    let ids: Vec<&str> = records.iter().map(|r| r.spotify_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[test]
fn test_table_row_from_record() {
    let row = UnfollowTableRow::from(record("xyz", "Someone", 42));
    assert_eq!(row.flagged, "2024-05-01 12:42");
    assert_eq!(row.name, "Someone");
    assert_eq!(row.id, "xyz");
}
