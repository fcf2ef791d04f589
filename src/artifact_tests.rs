use super::*;
use tempfile::tempdir;

#[test]
fn digest_is_128_bit_lowercase_hex() {
    let digest = content_digest("<map/>");
    assert_eq!(digest.len(), 32);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn digest_is_stable_and_content_sensitive() {
    assert_eq!(content_digest("abc"), content_digest("abc"));
    assert_ne!(content_digest("abc"), content_digest("abd"));
    // First half of SHA-256("abc").
    assert_eq!(content_digest("abc"), "ba7816bf8f01cfea414140de5dae2223");
}

#[tokio::test]
async fn store_creates_directory_and_writes_once() {
    let dir = tempdir().expect("temp dir");
    let store = ArtifactStore::new(dir.path().join("gen"));
    let document = "<?xml version='1.0' encoding='utf-8' standalone='yes' ?>\n<map/>";
    let digest = content_digest(document);

    let first = store.store("prefs", &digest, document).await.expect("store");
    assert!(first.is_new());
    assert_eq!(first.path(), store.artifact_path(&digest, "prefs"));
    assert_eq!(
        std::fs::read_to_string(first.path()).expect("read artifact"),
        document
    );
    assert!(
        first
            .path()
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == format!("{digest}-prefs.xml"))
    );

    let second = store.store("prefs", &digest, document).await.expect("store again");
    assert_eq!(second, StoreOutcome::Duplicate(first.path().to_path_buf()));
}

#[tokio::test]
async fn duplicate_never_overwrites_existing_artifact() {
    let dir = tempdir().expect("temp dir");
    let store = ArtifactStore::new(dir.path());
    let path = store.artifact_path("feed", "prefs");
    std::fs::write(&path, "original").expect("seed artifact");

    let outcome = store.store("prefs", "feed", "replacement").await.expect("store");
    assert!(!outcome.is_new());
    assert_eq!(std::fs::read_to_string(&path).expect("read"), "original");
}

#[tokio::test]
async fn no_temporary_files_are_left_behind() {
    let dir = tempdir().expect("temp dir");
    let store = ArtifactStore::new(dir.path());
    store.store("prefs", "aa", "one").await.expect("store");
    store.store("prefs", "bb", "two").await.expect("store");

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .expect("list dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.iter().all(|name| !name.ends_with(".tmp")));
}

#[test]
fn temp_names_differ_per_write() {
    let store = ArtifactStore::new("gen");
    let first = store.temp_path("feed", "prefs");
    let second = store.temp_path("feed", "prefs");
    assert_ne!(first, second);
    assert_eq!(first.parent(), Some(Path::new("gen")));
    let name = first.file_name().and_then(|name| name.to_str()).expect("utf-8 name");
    assert!(name.starts_with(".feed-prefs.") && name.ends_with(".tmp"), "{name}");
}

#[tokio::test]
async fn concurrent_writers_of_one_document_both_succeed() {
    let dir = tempdir().expect("temp dir");
    let first_store = ArtifactStore::new(dir.path());
    let second_store = ArtifactStore::new(dir.path());
    let document = "<map/>";
    let digest = content_digest(document);

    let (first, second) = tokio::join!(
        first_store.store("prefs", &digest, document),
        second_store.store("prefs", &digest, document),
    );
    let first = first.expect("first writer");
    let second = second.expect("second writer");
    assert_eq!(first.path(), second.path());
    assert_eq!(std::fs::read_to_string(first.path()).expect("read"), document);

    let leftovers = std::fs::read_dir(dir.path())
        .expect("list dir")
        .filter(|entry| {
            entry
                .as_ref()
                .is_ok_and(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        })
        .count();
    assert_eq!(leftovers, 0);
}
