use std::sync::Arc;
use std::time::Duration;

use filedeck_core::config::Locale;
use filedeck_core::error::{ErrorKind, FileDeckError};
use filedeck_core::files::{FileOperation, FileRepository, FileStore, NewFileRecord};
use filedeck_infrastructure::HttpFileRepository;
use filedeck_mock_server::JsonDb;
use tempfile::TempDir;
use tokio::net::TcpListener;

async fn start_mock(dir: &TempDir) -> String {
    let db = JsonDb::open(dir.path().join("db.json")).await.unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(filedeck_mock_server::serve(listener, db));
    base
}

fn repository(base: &str) -> HttpFileRepository {
    HttpFileRepository::new(base, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_list_starts_empty() {
    let dir = TempDir::new().unwrap();
    let repo = repository(&start_mock(&dir).await);

    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_returns_record_with_generated_id() {
    let dir = TempDir::new().unwrap();
    let repo = repository(&start_mock(&dir).await);

    let payload = NewFileRecord::new("a.txt", 3).with_field("type", "text/plain");
    let created = repo.create(&payload).await.unwrap();

    assert!(!created.id.is_empty());
    assert_eq!(created.name, "a.txt");
    assert_eq!(created.size, 3);
    assert_eq!(created.mime_type(), Some("text/plain"));

    let listed = repo.list().await.unwrap();
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn test_delete_unknown_id_is_not_found() {
    let dir = TempDir::new().unwrap();
    let repo = repository(&start_mock(&dir).await);

    let err = repo.delete("missing").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HttpStatus);
    assert_eq!(err.status(), Some(404));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = repository(&base).list().await.unwrap_err();
    assert!(matches!(err, FileDeckError::Network(_)), "{err:?}");
}

#[tokio::test]
async fn test_store_over_http() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(Arc::new(repository(&start_mock(&dir).await)));

    store.upload(NewFileRecord::new("one", 1)).await;
    store.upload(NewFileRecord::new("two", 2)).await;
    assert_eq!(store.len(), 2);
    assert!(store.error().is_none());

    let first = store.files()[0].id.clone();
    store.remove(&first).await;
    assert_eq!(store.len(), 1);

    store.fetch_all().await;
    let names: Vec<_> = store.files().into_iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["two"]);
    assert!(!store.is_loading());

    store.remove(&first).await;
    let error = store.error().unwrap();
    assert_eq!(error.operation, FileOperation::Delete);
    assert_eq!(
        store.error_message(Locale::Fr),
        Some("Erreur lors de la suppression du fichier")
    );
    assert_eq!(store.len(), 1);
}
