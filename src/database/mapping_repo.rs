//! Canonical mapping storage: raw description → canonical item (→ group).
//!
//! Every write goes through the upsert path; the schema-level UNIQUE
//! constraint on `raw_description` guarantees at most one row per distinct
//! raw text even under concurrent writers. A plain insert that trips the
//! constraint would be a programming defect, not a runtime condition.

use sqlx::SqlitePool;

use super::group_repo;
use super::models::MappingRow;
use crate::types::errors::{AppError, AppResult};

/// Insert or update the canonical mapping for one raw description.
///
/// Resolves `group_name` to a group id (creating the group if absent), then
/// upserts the row: `canonical_item` and `group_id` are always overwritten,
/// `weight` only when explicitly supplied. One transaction per call; on any
/// failure nothing is written.
pub async fn upsert_mapping(
    pool: &SqlitePool,
    raw_description: &str,
    canonical_item: &str,
    group_name: Option<&str>,
    weight: Option<f64>,
) -> AppResult<()> {
    let raw = raw_description.trim();
    if raw.is_empty() {
        return Err(AppError::Validation(
            "raw description must not be empty".into(),
        ));
    }
    let canonical = canonical_item.trim();
    if canonical.is_empty() {
        return Err(AppError::Validation(format!(
            "no canonical item supplied for '{raw}'"
        )));
    }

    let mut tx = pool.begin().await?;

    let group_id = match group_name.map(str::trim).filter(|g| !g.is_empty()) {
        Some(name) => Some(group_repo::ensure_group(&mut *tx, name).await?),
        None => None,
    };

    sqlx::query(
        "INSERT INTO item_map (raw_description, canonical_item, group_id, weight)
         VALUES (?, ?, ?, ?)
         ON CONFLICT (raw_description) DO UPDATE SET
             canonical_item = excluded.canonical_item,
             group_id = excluded.group_id,
             weight = COALESCE(excluded.weight, item_map.weight)",
    )
    .bind(raw)
    .bind(canonical)
    .bind(group_id)
    .bind(weight)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

/// Distinct non-null canonical items, alphabetical. This is the choice set
/// the scorer matches new descriptions against.
pub async fn list_canonical_items(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT DISTINCT canonical_item FROM item_map
         WHERE canonical_item IS NOT NULL
         ORDER BY canonical_item",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|r| r.0).collect())
}

/// Every raw description already recorded, mapped to a final name or not.
pub async fn list_mapped_raw_descriptions(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT DISTINCT raw_description FROM item_map")
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(|r| r.0).collect())
}

/// Fetch one mapping row by its raw description.
pub async fn get_mapping(
    pool: &SqlitePool,
    raw_description: &str,
) -> Result<Option<MappingRow>, sqlx::Error> {
    sqlx::query_as::<_, MappingRow>(
        "SELECT id, raw_description, canonical_item, group_id, weight
         FROM item_map WHERE raw_description = ?",
    )
    .bind(raw_description)
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
#[path = "tests/mapping_repo_test.rs"]
mod tests;
