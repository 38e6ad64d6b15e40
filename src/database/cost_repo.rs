//! Internal cost base: material/labor cost attributes per canonical item.
//! Only the latest reference survives per item; no cost history is kept.

use sqlx::SqlitePool;

use super::models::CostCatalogEntry;

/// Insert or replace the cost attributes for one canonical item.
pub async fn upsert_cost_entry(
    pool: &SqlitePool,
    entry: &CostCatalogEntry,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO cost_catalog
             (canonical_item, unit, material_cost, labor_cost, labor_hours, reference_code)
         VALUES (?, ?, ?, ?, ?, ?)
         ON CONFLICT (canonical_item) DO UPDATE SET
             unit = excluded.unit,
             material_cost = excluded.material_cost,
             labor_cost = excluded.labor_cost,
             labor_hours = excluded.labor_hours,
             reference_code = excluded.reference_code",
    )
    .bind(&entry.canonical_item)
    .bind(&entry.unit)
    .bind(entry.material_cost)
    .bind(entry.labor_cost)
    .bind(entry.labor_hours)
    .bind(&entry.reference_code)
    .execute(pool)
    .await?;
    Ok(())
}

/// Cost attributes for one canonical item, if cataloged.
pub async fn get_cost_entry(
    pool: &SqlitePool,
    canonical_item: &str,
) -> Result<Option<CostCatalogEntry>, sqlx::Error> {
    sqlx::query_as::<_, CostCatalogEntry>(
        "SELECT canonical_item, unit, material_cost, labor_cost, labor_hours, reference_code
         FROM cost_catalog WHERE canonical_item = ?",
    )
    .bind(canonical_item)
    .fetch_optional(pool)
    .await
}

/// All cataloged canonical items, alphabetical.
pub async fn list_catalog_items(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT canonical_item FROM cost_catalog ORDER BY canonical_item")
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(|r| r.0).collect())
}

/// (group name, canonical item) pairs for every cataloged item that carries
/// a group through its self-mapping. Items without a group come back under
/// an empty group name.
pub async fn list_items_with_group(
    pool: &SqlitePool,
) -> Result<Vec<(String, String)>, sqlx::Error> {
    sqlx::query_as(
        "SELECT COALESCE(g.name, ''), c.canonical_item
         FROM cost_catalog c
         LEFT JOIN item_map m ON m.raw_description = c.canonical_item
         LEFT JOIN groups g ON g.id = m.group_id
         ORDER BY g.name, c.canonical_item",
    )
    .fetch_all(pool)
    .await
}

#[cfg(test)]
#[path = "tests/cost_repo_test.rs"]
mod tests;
