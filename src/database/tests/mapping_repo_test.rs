use super::*;
use crate::types::errors::AppError;
use sqlx::SqlitePool;

async fn setup_pool() -> SqlitePool {
    crate::test_utils::init_test_db().await
}

#[tokio::test]
async fn test_upsert_then_remap_keeps_single_row() {
    let pool = setup_pool().await;

    upsert_mapping(
        &pool,
        "parede de tijolo",
        "Alvenaria de Tijolo",
        Some("Alvenaria e Vedações Verticais"),
        None,
    )
    .await
    .unwrap();

    // Remap the same raw description to a different canonical item.
    upsert_mapping(&pool, "parede de tijolo", "Alvenaria de Bloco", None, None)
        .await
        .unwrap();

    let rows: Vec<(String, Option<String>)> =
        sqlx::query_as("SELECT raw_description, canonical_item FROM item_map")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, "parede de tijolo");
    assert_eq!(rows[0].1.as_deref(), Some("Alvenaria de Bloco"));
}

#[tokio::test]
async fn test_upsert_preserves_weight_unless_supplied() {
    let pool = setup_pool().await;

    upsert_mapping(&pool, "pintura latex", "Pintura Látex", None, Some(0.25))
        .await
        .unwrap();
    // Remap without a weight: the recorded weight must survive.
    upsert_mapping(&pool, "pintura latex", "Pintura Látex Interna", None, None)
        .await
        .unwrap();

    let row = get_mapping(&pool, "pintura latex").await.unwrap().unwrap();
    assert_eq!(row.canonical_item.as_deref(), Some("Pintura Látex Interna"));
    assert_eq!(row.weight, Some(0.25));

    // An explicit weight overwrites.
    upsert_mapping(&pool, "pintura latex", "Pintura Látex Interna", None, Some(0.5))
        .await
        .unwrap();
    let row = get_mapping(&pool, "pintura latex").await.unwrap().unwrap();
    assert_eq!(row.weight, Some(0.5));
}

#[tokio::test]
async fn test_upsert_creates_group_once() {
    let pool = setup_pool().await;

    upsert_mapping(&pool, "item a", "Item A", Some("Grupo Novo"), None)
        .await
        .unwrap();
    upsert_mapping(&pool, "item b", "Item B", Some("Grupo Novo"), None)
        .await
        .unwrap();

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM groups WHERE name = 'Grupo Novo'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);

    // Both mappings point at the same group row.
    let ids: Vec<(Option<i64>,)> =
        sqlx::query_as("SELECT group_id FROM item_map ORDER BY raw_description")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(ids.len(), 2);
    assert!(ids[0].0.is_some());
    assert_eq!(ids[0].0, ids[1].0);
}

#[tokio::test]
async fn test_upsert_rejects_empty_fields() {
    let pool = setup_pool().await;

    let err = upsert_mapping(&pool, "  ", "Algo", None, None).await;
    assert!(matches!(err, Err(AppError::Validation(_))));

    let err = upsert_mapping(&pool, "descricao valida", "   ", None, None).await;
    assert!(matches!(err, Err(AppError::Validation(_))));

    // Nothing was written.
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM item_map")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

#[tokio::test]
async fn test_list_canonical_items_distinct_sorted() {
    let pool = setup_pool().await;

    upsert_mapping(&pool, "reboco de parede", "Reboco", None, None)
        .await
        .unwrap();
    upsert_mapping(&pool, "emboço e reboco", "Reboco", None, None)
        .await
        .unwrap();
    upsert_mapping(&pool, "chapisco comum", "Chapisco", None, None)
        .await
        .unwrap();

    let items = list_canonical_items(&pool).await.unwrap();
    assert_eq!(items, vec!["Chapisco".to_string(), "Reboco".to_string()]);

    let mapped = list_mapped_raw_descriptions(&pool).await.unwrap();
    assert_eq!(mapped.len(), 3);
}
