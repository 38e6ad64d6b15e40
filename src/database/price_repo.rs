//! Price observation log: every imported budget line item, kept per project
//! so quoted prices can be compared against the internal cost base.

use chrono::Local;
use sqlx::SqlitePool;

use super::models::{PriceObservation, PricedItemRow};
use crate::types::errors::AppResult;

/// Bulk-insert a batch of observations for one imported file.
///
/// Rows already recorded for the same file (same description, unit, quantity
/// and unit price) are skipped, so re-importing a spreadsheet is harmless.
/// The whole batch is one transaction. Returns the number of rows added.
pub async fn insert_observations(
    pool: &SqlitePool,
    project_name: &str,
    client_name: Option<&str>,
    source_file: Option<&str>,
    items: &[PriceObservation],
) -> Result<u64, sqlx::Error> {
    let imported_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let mut tx = pool.begin().await?;
    let mut added = 0_u64;

    for item in items {
        let existing: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM price_history
             WHERE raw_description = ? AND unit IS ? AND quantity IS ?
               AND unit_price IS ? AND source_file IS ?",
        )
        .bind(&item.raw_description)
        .bind(&item.unit)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(source_file)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_some() {
            continue;
        }

        sqlx::query(
            "INSERT INTO price_history
                 (raw_description, unit, quantity, unit_price, total_price,
                  project_name, client_name, source_file, imported_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&item.raw_description)
        .bind(&item.unit)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(item.total_price)
        .bind(project_name)
        .bind(client_name)
        .bind(source_file)
        .bind(&imported_at)
        .execute(&mut *tx)
        .await?;
        added += 1;
    }

    tx.commit().await?;
    Ok(added)
}

/// The full price log joined LEFT with the canonical mapping, so rows whose
/// description was never mapped still appear (with `canonical_item` null).
pub async fn query_with_mapping(pool: &SqlitePool) -> Result<Vec<PricedItemRow>, sqlx::Error> {
    sqlx::query_as::<_, PricedItemRow>(
        "SELECT p.id, p.raw_description, p.unit, p.quantity, p.unit_price,
                p.total_price, p.project_name, p.client_name, p.source_file,
                p.imported_at, m.canonical_item
         FROM price_history p
         LEFT JOIN item_map m ON m.raw_description = p.raw_description
         ORDER BY p.imported_at DESC, p.id",
    )
    .fetch_all(pool)
    .await
}

/// Distinct project names with at least one recorded observation.
pub async fn list_project_names(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT DISTINCT project_name FROM price_history ORDER BY project_name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|r| r.0).collect())
}

/// Delete the entire price log, along with every mapping that exists only to
/// serve it. Mappings whose raw description is itself a cataloged canonical
/// item (the self-mappings created by cost-catalog import) survive.
///
/// Irreversible. One transaction: a failure mid-delete leaves the store
/// unchanged. Returns (price rows deleted, mapping rows deleted).
pub async fn purge_price_history(pool: &SqlitePool) -> AppResult<(u64, u64)> {
    let mut tx = pool.begin().await?;

    let prices = sqlx::query("DELETE FROM price_history")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let mappings = sqlx::query(
        "DELETE FROM item_map
         WHERE raw_description NOT IN (SELECT canonical_item FROM cost_catalog)",
    )
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;
    log::info!("purged price history: {prices} observations, {mappings} mappings removed");
    Ok((prices, mappings))
}

#[cfg(test)]
#[path = "tests/price_repo_test.rs"]
mod tests;
