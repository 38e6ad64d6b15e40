use serde::{Deserialize, Serialize};

/// One canonical mapping row: raw description → canonical item (→ group).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MappingRow {
    pub id: i64,
    pub raw_description: String,
    pub canonical_item: Option<String>,
    pub group_id: Option<i64>,
    /// Cost-distribution weight, filled in by the budget composer. Never
    /// computed here; preserved across remappings unless explicitly set.
    pub weight: Option<f64>,
}

/// Classification group row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GroupRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Cost attributes of one canonical item. Keyed by `canonical_item`;
/// an upsert replaces the previous reference outright.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CostCatalogEntry {
    pub canonical_item: String,
    pub unit: Option<String>,
    pub material_cost: f64,
    pub labor_cost: f64,
    pub labor_hours: Option<f64>,
    pub reference_code: Option<String>,
}

/// A parsed budget line item, as handed over by the spreadsheet loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceObservation {
    pub raw_description: String,
    pub unit: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub total_price: Option<f64>,
}

/// Price-history row joined with its canonical mapping (if any).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PricedItemRow {
    pub id: i64,
    pub raw_description: String,
    pub unit: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub total_price: Option<f64>,
    pub project_name: String,
    pub client_name: Option<String>,
    pub source_file: Option<String>,
    pub imported_at: Option<String>,
    pub canonical_item: Option<String>,
}

/// Free-text note attached to a project.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProjectNote {
    pub id: i64,
    pub project_name: String,
    pub note: String,
    pub created_at: Option<String>,
}
