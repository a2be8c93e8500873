use super::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_new_creates_database_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("data.db");
    let client = TursoClient::new(path.clone()).await.unwrap();

    client
        .execute("CREATE TABLE t (x INTEGER)", ())
        .await
        .unwrap();
    assert_eq!(client.path(), path.as_path());
    assert!(path.is_file());
}

#[tokio::test]
async fn test_open_read_only_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let result = TursoClient::open_read_only(dir.path().join("missing.db")).await;
    assert!(matches!(result, Err(TursoError::Connection(_))));
}

#[tokio::test]
async fn test_read_only_rejects_writes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.db");
    {
        let client = TursoClient::new(path.clone()).await.unwrap();
        client
            .execute("CREATE TABLE t (x INTEGER)", ())
            .await
            .unwrap();
    }

    let client = TursoClient::open_read_only(path).await.unwrap();
    assert!(client.execute("INSERT INTO t (x) VALUES (1)", ()).await.is_err());
    assert!(client.query("SELECT x FROM t", ()).await.is_ok());
}

#[tokio::test]
async fn test_unique_violation_maps_to_constraint() {
    let dir = TempDir::new().unwrap();
    let client = TursoClient::new(dir.path().join("data.db")).await.unwrap();
    client
        .execute("CREATE TABLE t (x TEXT PRIMARY KEY)", ())
        .await
        .unwrap();
    client
        .execute("INSERT INTO t (x) VALUES ('a')", ())
        .await
        .unwrap();

    let result = client.execute("INSERT INTO t (x) VALUES ('a')", ()).await;
    assert!(matches!(result, Err(TursoError::Constraint(_))));
}
