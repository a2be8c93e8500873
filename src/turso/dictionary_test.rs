use super::*;
use crate::test_support::{entry, write_dataset};
use tempfile::TempDir;

#[test]
fn test_escape_like() {
    assert_eq!(escape_like("ab"), "ab%");
    assert_eq!(escape_like(""), "%");
    assert_eq!(escape_like("a%b_c\\"), "a\\%b\\_c\\\\%");
}

#[tokio::test]
async fn test_fetch_and_count() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        &dir,
        "data.db",
        DatasetVariant::Current,
        &[("chat", Some(entry("ʃa", "Félin"))), ("vide", None)],
    )
    .await;
    let client = TursoClient::open_read_only(path).await.unwrap();

    assert_eq!(client.count_words().await.unwrap(), 2);

    let chat = client
        .fetch_document(DatasetVariant::Current, "chat")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(chat.word, "chat");
    let payload: serde_json::Value = serde_json::from_str(chat.payload.as_deref().unwrap()).unwrap();
    assert_eq!(payload, entry("ʃa", "Félin"));

    assert_eq!(
        client
            .fetch_document(DatasetVariant::Current, "absent")
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_scan_documents_in_word_order() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        &dir,
        "data.db",
        DatasetVariant::Legacy,
        &[("zèbre", None), ("abri", None), ("mot", None)],
    )
    .await;
    let client = TursoClient::open_read_only(path).await.unwrap();

    let mut rows = client.scan_documents(DatasetVariant::Legacy).await.unwrap();
    let mut words = Vec::new();
    while let Some(doc) = rows.next().await.unwrap() {
        words.push(doc.word);
    }
    assert_eq!(words, vec!["abri", "mot", "zèbre"]);
}
