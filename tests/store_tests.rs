use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use battleships::{GameSession, SaveStore, ScoreStore, ShipType, StoreError};
use rand::{rngs::SmallRng, SeedableRng};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_data_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "battleships-test-{}-{}-{}",
        tag,
        std::process::id(),
        DIR_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn sample_session(seed: u64) -> GameSession {
    let fleet = [ShipType::new("Cruiser", 3), ShipType::new("Destroyer", 2)];
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut session = GameSession::new(6, 6, &fleet, &mut rng).unwrap();
    session.fire_at(0, 0).unwrap();
    session.fire_at(5, 5).unwrap();
    session
}

#[test]
fn test_save_load_roundtrip() {
    let dir = temp_data_dir("roundtrip");
    let store = SaveStore::open(&dir).unwrap();
    let session = sample_session(1);

    store.save_game(&session, "first try").unwrap();
    let loaded = store.load_game("first try").unwrap();
    assert_eq!(loaded, session);
    assert_eq!(loaded.shots(), session.shots());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_name_conflict_rejected() {
    let dir = temp_data_dir("conflict");
    let store = SaveStore::open(&dir).unwrap();
    let session = sample_session(2);

    store.save_game(&session, "alpha").unwrap();
    assert!(matches!(
        store.save_game(&session, "alpha"),
        Err(StoreError::NameConflict(_))
    ));
    // a fresh name still works
    store.save_game(&session, "beta").unwrap();

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_not_found() {
    let dir = temp_data_dir("notfound");
    let store = SaveStore::open(&dir).unwrap();
    assert!(matches!(
        store.load_game("missing"),
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        store.delete_game("missing"),
        Err(StoreError::NotFound(_))
    ));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_list_and_delete() {
    let dir = temp_data_dir("list");
    let store = SaveStore::open(&dir).unwrap();
    let session = sample_session(3);

    store.save_game(&session, "bravo").unwrap();
    store.save_game(&session, "alpha").unwrap();
    assert_eq!(store.list_games().unwrap(), vec!["alpha", "bravo"]);

    store.delete_game("bravo").unwrap();
    assert_eq!(store.list_games().unwrap(), vec!["alpha"]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_name_sanitization() {
    let dir = temp_data_dir("names");
    let store = SaveStore::open(&dir).unwrap();
    let session = sample_session(4);

    store.save_game(&session, "my game").unwrap();
    assert_eq!(store.list_games().unwrap(), vec!["my_game"]);
    // loading by the original spelling sanitizes to the same file
    assert!(store.load_game("my game").is_ok());

    assert!(matches!(
        store.save_game(&session, "!!!"),
        Err(StoreError::InvalidName)
    ));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_any_single_byte_flip_is_detected() {
    let dir = temp_data_dir("tamper");
    let store = SaveStore::open(&dir).unwrap();
    let session = sample_session(5);
    store.save_game(&session, "victim").unwrap();

    let path = dir.join("saved_games").join("victim.sav");
    let original = fs::read(&path).unwrap();

    for i in 0..original.len() {
        let mut tampered = original.clone();
        tampered[i] ^= 0x01;
        fs::write(&path, &tampered).unwrap();
        assert!(
            matches!(store.load_game("victim"), Err(StoreError::IntegrityCheckFailed)),
            "flip at byte {} was not detected",
            i
        );
    }

    // untouched bytes still load
    fs::write(&path, &original).unwrap();
    assert!(store.load_game("victim").is_ok());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_truncated_file_fails_closed() {
    let dir = temp_data_dir("truncated");
    let store = SaveStore::open(&dir).unwrap();
    store.save_game(&sample_session(6), "short").unwrap();

    let path = dir.join("saved_games").join("short.sav");
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..10]).unwrap();
    assert!(matches!(
        store.load_game("short"),
        Err(StoreError::IntegrityCheckFailed)
    ));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_signature_is_keyed_not_a_checksum() {
    // a save carried over to a store with a different key must fail
    // verification even though the payload itself is untouched
    let dir_a = temp_data_dir("key-a");
    let dir_b = temp_data_dir("key-b");
    let store_a = SaveStore::open(&dir_a).unwrap();
    let store_b = SaveStore::open(&dir_b).unwrap();

    store_a.save_game(&sample_session(7), "carried").unwrap();
    fs::copy(
        dir_a.join("saved_games").join("carried.sav"),
        dir_b.join("saved_games").join("carried.sav"),
    )
    .unwrap();

    assert!(matches!(
        store_b.load_game("carried"),
        Err(StoreError::IntegrityCheckFailed)
    ));

    let _ = fs::remove_dir_all(&dir_a);
    let _ = fs::remove_dir_all(&dir_b);
}

#[test]
fn test_scores_append_in_order() {
    let dir = temp_data_dir("scores");
    let scores = ScoreStore::open(&dir).unwrap();

    assert!(scores.list().unwrap().is_empty());
    scores.record(30).unwrap();
    scores.record(17).unwrap();
    scores.record(25).unwrap();

    let shots: Vec<u32> = scores.list().unwrap().iter().map(|r| r.shots).collect();
    assert_eq!(shots, vec![30, 17, 25], "list is oldest first");

    let best: Vec<u32> = scores.best(2).unwrap().iter().map(|r| r.shots).collect();
    assert_eq!(best, vec![17, 25]);

    let _ = fs::remove_dir_all(&dir);
}
