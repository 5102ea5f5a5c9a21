use crate::store::{MemoryStore, Store, claim_unseen};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// MemoryStore set semantics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn insert_if_absent_reports_first_insert_only() {
    let store = MemoryStore::new();

    assert!(store.insert_if_absent("na:downloaded", "1.zip").await.unwrap());
    assert!(!store.insert_if_absent("na:downloaded", "1.zip").await.unwrap());
}

#[tokio::test]
async fn insert_if_absent_keeps_sets_independent() {
    let store = MemoryStore::new();

    assert!(store.insert_if_absent("na:downloaded", "1.zip").await.unwrap());
    // Same member in a different set is a fresh insert
    assert!(store.insert_if_absent("na:loaded", "1.zip").await.unwrap());
    assert_eq!(store.set_len("na:downloaded").await, 1);
    assert_eq!(store.set_len("na:loaded").await, 1);
}

#[tokio::test]
async fn contains_reflects_prior_inserts() {
    let store = MemoryStore::new();

    assert!(!store.contains("na:downloaded", "1.zip").await.unwrap());
    store.insert_if_absent("na:downloaded", "1.zip").await.unwrap();
    assert!(store.contains("na:downloaded", "1.zip").await.unwrap());
    assert!(!store.contains("na:downloaded", "2.zip").await.unwrap());
}

// ---------------------------------------------------------------------------
// MemoryStore queue semantics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn queue_push_appends_in_order() {
    let store = MemoryStore::new();

    store.queue_push("NEWS_XML", b"first").await.unwrap();
    store.queue_push("NEWS_XML", b"second").await.unwrap();
    store.queue_push("NEWS_XML", b"third").await.unwrap();

    let contents = store.queue_contents("NEWS_XML").await;
    assert_eq!(contents, vec![b"first".to_vec(), b"second".to_vec(), b"third".to_vec()]);
}

#[tokio::test]
async fn queue_accepts_duplicate_content() {
    let store = MemoryStore::new();

    // The queue is not a set: identical payloads from different documents
    // are both delivered
    store.queue_push("NEWS_XML", b"<doc/>").await.unwrap();
    store.queue_push("NEWS_XML", b"<doc/>").await.unwrap();

    assert_eq!(store.queue_len("NEWS_XML").await, 2);
}

#[tokio::test]
async fn queue_len_of_unknown_queue_is_zero() {
    let store = MemoryStore::new();
    assert_eq!(store.queue_len("missing").await, 0);
    assert!(store.queue_contents("missing").await.is_empty());
}

// ---------------------------------------------------------------------------
// claim_unseen
// ---------------------------------------------------------------------------

#[tokio::test]
async fn claim_unseen_passes_everything_through_an_empty_set() {
    let store = MemoryStore::new();
    let candidates = names(&["a.zip", "b.zip", "c.zip"]);

    let unseen = claim_unseen(&store, "na:downloaded", &candidates).await.unwrap();

    assert_eq!(unseen, candidates);
}

#[tokio::test]
async fn claim_unseen_filters_previously_claimed_names() {
    let store = MemoryStore::new();

    let first = names(&["a.zip", "b.zip", "c.zip"]);
    claim_unseen(&store, "na:downloaded", &first).await.unwrap();

    // Second listing repeats the old names and adds one new one
    let second = names(&["a.zip", "b.zip", "c.zip", "d.zip"]);
    let unseen = claim_unseen(&store, "na:downloaded", &second).await.unwrap();

    assert_eq!(unseen, names(&["d.zip"]));
}

#[tokio::test]
async fn claim_unseen_preserves_candidate_order() {
    let store = MemoryStore::new();
    store.insert_if_absent("na:downloaded", "2.zip").await.unwrap();

    let candidates = names(&["3.zip", "1.zip", "2.zip", "5.zip", "4.zip"]);
    let unseen = claim_unseen(&store, "na:downloaded", &candidates).await.unwrap();

    assert_eq!(unseen, names(&["3.zip", "1.zip", "5.zip", "4.zip"]));
}

#[tokio::test]
async fn claim_unseen_claims_accepted_names_as_a_side_effect() {
    let store = MemoryStore::new();
    let candidates = names(&["a.zip", "b.zip"]);

    claim_unseen(&store, "na:downloaded", &candidates).await.unwrap();

    // The names are now members even though nothing downstream ran yet
    assert!(store.contains("na:downloaded", "a.zip").await.unwrap());
    assert!(store.contains("na:downloaded", "b.zip").await.unwrap());
}

#[tokio::test]
async fn claim_unseen_with_no_candidates_returns_empty() {
    let store = MemoryStore::new();
    let unseen = claim_unseen(&store, "na:downloaded", &[]).await.unwrap();
    assert!(unseen.is_empty());
}

#[tokio::test]
async fn claim_unseen_repeated_candidate_is_claimed_once() {
    let store = MemoryStore::new();

    // A listing that repeats a name yields it once; the first occurrence
    // claims it and the duplicate dedups away
    let candidates = names(&["a.zip", "a.zip"]);
    let unseen = claim_unseen(&store, "na:downloaded", &candidates).await.unwrap();

    assert_eq!(unseen, names(&["a.zip"]));
    assert_eq!(store.set_len("na:downloaded").await, 1);
}
