use storage::repository::{KeyValueStore, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_roundtrip_set_get_remove() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get("scores").await.unwrap(), None);

    repo.set("scores", r#"[{"initials":"AAA","score":50}]"#)
        .await
        .unwrap();
    assert_eq!(
        repo.get("scores").await.unwrap().as_deref(),
        Some(r#"[{"initials":"AAA","score":50}]"#)
    );

    repo.set("scores", "[]").await.unwrap();
    assert_eq!(repo.get("scores").await.unwrap().as_deref(), Some("[]"));

    repo.remove("scores").await.unwrap();
    assert_eq!(repo.get("scores").await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.set("k", "v").await.unwrap();
    repo.migrate().await.expect("second migrate");
    assert_eq!(repo.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn storage_sqlite_exposes_kv() {
    let storage = Storage::sqlite("sqlite:file:memdb_kv_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.kv.set("scores", "[]").await.unwrap();
    assert_eq!(storage.kv.get("scores").await.unwrap().as_deref(), Some("[]"));
}
