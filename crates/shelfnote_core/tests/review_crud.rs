use rusqlite::Connection;
use shelfnote_core::db::open_store_in_memory;
use shelfnote_core::repo::record_store::REVIEWS_KEY;
use shelfnote_core::{
    JsonReviewRepository, RepoError, Review, ReviewDraft, ReviewRepository, ShelfService,
    SqliteRecordStore,
};
use std::time::{Duration, Instant};

#[test]
fn list_is_empty_before_any_write() {
    let conn = open_store_in_memory().unwrap();
    let repo = repo(&conn);

    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn create_prepends_newest_first() {
    let conn = open_store_in_memory().unwrap();
    let repo = repo(&conn);

    let older = draft_review("first read", 1_000);
    let newer = draft_review("second read", 2_000);
    repo.create(&older).unwrap();
    repo.create(&newer).unwrap();

    let listed = repo.list().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, newer.id);
    assert_eq!(listed[1].id, older.id);
}

#[test]
fn created_review_round_trips_through_storage() {
    let conn = open_store_in_memory().unwrap();
    let repo = repo(&conn);

    let review = Review::from_draft_at(
        ReviewDraft {
            title: "Grande Sertão: Veredas".to_string(),
            author: "João Guimarães Rosa".to_string(),
            isbn: Some("9788535930970".to_string()),
            rating: 5,
            content: "the devil in the street, in the middle of the whirlwind".to_string(),
            cover_url: None,
        },
        1_715_299_200_000,
    );
    repo.create(&review).unwrap();

    let listed = repo.list().unwrap();
    assert_eq!(listed, vec![review]);
}

#[test]
fn delete_removes_only_the_matching_id() {
    let conn = open_store_in_memory().unwrap();
    let repo = repo(&conn);

    let keep = draft_review("keep", 1_000);
    let remove = draft_review("remove", 2_000);
    repo.create(&keep).unwrap();
    repo.create(&remove).unwrap();

    repo.delete(&remove.id).unwrap();

    let listed = repo.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, keep.id);
}

#[test]
fn delete_of_unknown_id_is_a_silent_no_op() {
    let conn = open_store_in_memory().unwrap();
    let repo = repo(&conn);

    let review = draft_review("stays", 1_000);
    repo.create(&review).unwrap();

    repo.delete("no-such-id").unwrap();
    assert_eq!(repo.list().unwrap().len(), 1);
}

#[test]
fn replace_all_with_empty_slice_clears_the_collection() {
    let conn = open_store_in_memory().unwrap();
    let repo = repo(&conn);

    repo.create(&draft_review("a", 1_000)).unwrap();
    repo.create(&draft_review("b", 2_000)).unwrap();

    repo.replace_all(&[]).unwrap();
    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn validation_failure_blocks_create_and_replace_all() {
    let conn = open_store_in_memory().unwrap();
    let repo = repo(&conn);

    let mut invalid = draft_review("over the scale", 1_000);
    invalid.rating = 9;

    let create_err = repo.create(&invalid).unwrap_err();
    assert!(matches!(create_err, RepoError::Validation(_)));
    assert!(repo.list().unwrap().is_empty());

    let replace_err = repo.replace_all(&[invalid]).unwrap_err();
    assert!(matches!(replace_err, RepoError::Validation(_)));
}

#[test]
fn malformed_stored_blob_recovers_as_empty_collection() {
    let conn = open_store_in_memory().unwrap();
    conn.execute(
        "INSERT INTO records (key, value) VALUES (?1, 'not json at all');",
        [REVIEWS_KEY],
    )
    .unwrap();

    let repo = repo(&conn);
    assert!(repo.list().unwrap().is_empty());

    // The next write replaces the corrupt blob with a valid collection.
    let review = draft_review("fresh start", 1_000);
    repo.create(&review).unwrap();
    assert_eq!(repo.list().unwrap().len(), 1);
}

#[test]
fn simulated_latency_delays_list_only_when_opted_in() {
    let conn = open_store_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    let repo =
        JsonReviewRepository::new(store).with_simulated_latency(Duration::from_millis(50));

    let started_at = Instant::now();
    repo.list().unwrap();
    assert!(started_at.elapsed() >= Duration::from_millis(50));
}

#[test]
fn shelf_service_wraps_repository_calls() {
    let conn = open_store_in_memory().unwrap();
    let service = ShelfService::new(repo(&conn));

    let added = service
        .add_review(ReviewDraft {
            title: "Vidas Secas".to_string(),
            author: "Graciliano Ramos".to_string(),
            rating: 4,
            content: "drought, a dog, a family walking".to_string(),
            ..ReviewDraft::default()
        })
        .unwrap();
    assert_eq!(added.title, "Vidas Secas");

    let shelf = service.shelf().unwrap();
    assert_eq!(shelf.len(), 1);
    assert_eq!(shelf[0].id, added.id);

    service.remove_review(&added.id).unwrap();
    assert!(service.shelf().unwrap().is_empty());
}

#[test]
fn shelf_service_clear_empties_the_shelf() {
    let conn = open_store_in_memory().unwrap();
    let service = ShelfService::new(repo(&conn));

    service.add_review(ReviewDraft::default()).unwrap();
    service.add_review(ReviewDraft::default()).unwrap();

    service.clear_shelf().unwrap();
    assert!(service.shelf().unwrap().is_empty());
}

#[test]
fn recent_titles_returns_newest_first_up_to_limit() {
    let conn = open_store_in_memory().unwrap();
    let service = ShelfService::new(repo(&conn));

    for title in ["one", "two", "three"] {
        service
            .add_review(ReviewDraft {
                title: title.to_string(),
                ..ReviewDraft::default()
            })
            .unwrap();
    }

    let titles = service.recent_titles(2).unwrap();
    assert_eq!(titles, vec!["three".to_string(), "two".to_string()]);
}

fn repo(conn: &Connection) -> JsonReviewRepository<SqliteRecordStore<'_>> {
    let store = SqliteRecordStore::try_new(conn).unwrap();
    JsonReviewRepository::new(store)
}

fn draft_review(content: &str, created_at_ms: i64) -> Review {
    Review::from_draft_at(
        ReviewDraft {
            content: content.to_string(),
            ..ReviewDraft::default()
        },
        created_at_ms,
    )
}
