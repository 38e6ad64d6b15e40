use super::*;
use sqlx::SqlitePool;

async fn setup_pool() -> SqlitePool {
    crate::test_utils::init_test_db().await
}

#[tokio::test]
async fn test_add_and_list_notes() {
    let pool = setup_pool().await;

    add_note(&pool, "Obra A", "Preço negociado com desconto de 5%")
        .await
        .unwrap();
    add_note(&pool, "Obra A", "Cliente pediu revisão do item de pintura")
        .await
        .unwrap();
    add_note(&pool, "Obra B", "Outra obra").await.unwrap();

    let notes = list_notes(&pool, "Obra A").await.unwrap();
    assert_eq!(notes.len(), 2);
    assert!(notes.iter().all(|n| n.project_name == "Obra A"));
}

#[tokio::test]
async fn test_empty_note_is_ignored() {
    let pool = setup_pool().await;

    add_note(&pool, "Obra A", "   ").await.unwrap();
    let notes = list_notes(&pool, "Obra A").await.unwrap();
    assert!(notes.is_empty());
}

#[tokio::test]
async fn test_update_note() {
    let pool = setup_pool().await;

    add_note(&pool, "Obra A", "texto original").await.unwrap();
    let notes = list_notes(&pool, "Obra A").await.unwrap();
    let affected = update_note(&pool, notes[0].id, "texto corrigido").await.unwrap();
    assert_eq!(affected, 1);

    let notes = list_notes(&pool, "Obra A").await.unwrap();
    assert_eq!(notes[0].note, "texto corrigido");

    // Updating a nonexistent id touches nothing.
    let affected = update_note(&pool, 9999, "x").await.unwrap();
    assert_eq!(affected, 0);
}
