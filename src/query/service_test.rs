// Tests for QueryService
// Test cases:
// - Documents by raw word, stored payload for reserved rows, not-found payload for absent words
// - Autocomplete/search normalize the raw query ("café" -> "cafe")
// - Word of the day is stable within a day and rotates after
// - Dataset selection by slug, unknown slugs and unavailable datasets
// - Info payload and health flag

use super::*;
use crate::test_support::{config_for, entry, sample_entries, write_dataset};
use crate::turso::DatasetVariant;
use crate::word_of_day::ManualClock;
use chrono::NaiveDate;
use std::collections::HashSet;
use tempfile::TempDir;

async fn setup() -> (QueryService, Arc<ManualClock>, TempDir) {
    let dir = TempDir::new().unwrap();
    let mut entries = sample_entries();
    entries.push(("réservé", None));
    entries.push(("vide", Some(json!({}))));
    write_dataset(&dir, "remede.db", DatasetVariant::Current, &entries).await;
    write_dataset(
        &dir,
        "legacy.db",
        DatasetVariant::Legacy,
        &[("chat", Some(entry("ʃa", "Ancienne définition")))],
    )
    .await;
    let config = config_for(
        &dir,
        &[
            ("remede", "remede.db", DatasetVariant::Current),
            ("remede.legacy", "legacy.db", DatasetVariant::Legacy),
            ("remede.en", "absent.db", DatasetVariant::Current),
        ],
    );
    let registry = Arc::new(DatasetRegistry::build(&config).await);
    let clock = Arc::new(ManualClock::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
    let service = QueryService::with_clock(registry, clock.clone());
    (service, clock, dir)
}

#[tokio::test]
async fn test_get_document_returns_payload() {
    let (service, _clock, _dir) = setup().await;

    let doc = service.get_document("chat").await.unwrap();
    assert_eq!(doc, entry("ʃa", "Définition de chat"));
}

#[tokio::test]
async fn test_get_document_not_found_payload() {
    let (service, _clock, _dir) = setup().await;

    let expected = json!({ "message": "Mot non trouvé" });
    assert_eq!(service.get_document("nonexistent-xyz").await.unwrap(), expected);
}

#[tokio::test]
async fn test_get_document_returns_empty_stored_payloads() {
    let (service, _clock, _dir) = setup().await;

    assert_eq!(service.get_document("réservé").await.unwrap(), Value::Null);
    assert_eq!(service.get_document("vide").await.unwrap(), json!({}));
}

#[tokio::test]
async fn test_get_document_in_named_dataset() {
    let (service, _clock, _dir) = setup().await;

    let doc = service.get_document_in("remede.legacy", "chat").await.unwrap();
    assert_eq!(doc["definitions"][0]["definition"], "Ancienne définition");

    assert_eq!(
        service.get_document_in("remede.xx", "chat").await,
        Err(QueryError::UnknownDataset("remede.xx".to_string()))
    );
    assert_eq!(
        service.get_document_in("remede.en", "chat").await,
        Err(QueryError::Unavailable)
    );
}

#[tokio::test]
async fn test_autocomplete_normalizes_query() {
    let (service, _clock, _dir) = setup().await;

    let results = service.autocomplete("Café").await.unwrap();
    assert_eq!(results, vec!["cafetière", "café", "cafétéria"]);

    let results = service.autocomplete("AB").await.unwrap();
    assert_eq!(results.len(), 5);

    let results = service.autocomplete("aujourd’h").await.unwrap();
    assert_eq!(results, vec!["aujourd'hui"]);

    assert!(service.autocomplete("xyz").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_pages() {
    let (service, _clock, _dir) = setup().await;

    let first = service.search("ab", 0).await.unwrap();
    assert_eq!(first.len(), 7);
    assert!(service.search("ab", 1).await.unwrap().is_empty());

    let legacy = service.search_in("remede.legacy", "CH", 0).await.unwrap();
    assert_eq!(legacy, vec!["chat"]);
}

#[tokio::test]
async fn test_random_word_is_a_key() {
    let (service, _clock, _dir) = setup().await;
    let mut keys: HashSet<&str> = sample_entries().iter().map(|(w, _)| *w).collect();
    keys.insert("réservé");
    keys.insert("vide");

    let word = service.get_random().await.unwrap();
    assert!(keys.contains(word.as_str()));
    assert_eq!(service.get_random_in("remede.legacy").await.unwrap(), "chat");
}

#[tokio::test]
async fn test_word_of_day_rotates_daily() {
    let (service, clock, _dir) = setup().await;

    let first = service.get_word_of_day().await.unwrap();
    assert_eq!(service.get_word_of_day().await.unwrap(), first);

    clock.advance_days(1);
    let next = service.get_word_of_day().await.unwrap();
    assert!(service.get_document(&next).await.is_ok());
    assert_eq!(service.get_word_of_day().await.unwrap(), next);
}

#[tokio::test]
async fn test_info_and_health() {
    let (service, _clock, _dir) = setup().await;

    let info = service.info();
    assert_eq!(info.version, VERSION);
    assert_eq!(info.dictionaries.len(), 3);
    assert!(info.dictionaries["remede"].valid);
    assert!(!info.dictionaries["remede.en"].available);
    assert!(service.is_healthy());

    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["dictionaries"]["remede"]["slug"], "remede");
}

#[tokio::test]
async fn test_empty_primary_is_unhealthy() {
    let dir = TempDir::new().unwrap();
    write_dataset(&dir, "empty.db", DatasetVariant::Current, &[]).await;
    let config = config_for(&dir, &[("remede", "empty.db", DatasetVariant::Current)]);
    let service = QueryService::new(Arc::new(DatasetRegistry::build(&config).await));

    assert!(!service.is_healthy());
    assert_eq!(service.get_random().await, Err(QueryError::EmptyDataset));
    assert_eq!(service.get_word_of_day().await, Err(QueryError::EmptyDataset));
    assert!(service.autocomplete("a").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unavailable_primary() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, &[("remede", "absent.db", DatasetVariant::Current)]);
    let service = QueryService::new(Arc::new(DatasetRegistry::build(&config).await));

    assert!(!service.is_healthy());
    assert_eq!(service.get_document("chat").await, Err(QueryError::Unavailable));
    assert_eq!(
        QueryError::Unavailable.to_string(),
        "Le dictionnaire est momentanément indisponible"
    );
}
