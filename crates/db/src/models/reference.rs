//! Reference entity rows: products, lines, stoppage types and cause catalogs.

use prodline_core::error::CoreError;
use prodline_core::production::{NamedEntity, Product, StatusId, StoppageCategory, StoppageType, Subsubsystem};
use prodline_core::types::DbId;
use serde::Deserialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: DbId,
    pub name: String,
    pub flavor: String,
    pub model: String,
    pub size_liters: f64,
    pub units_per_box: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub flavor: String,
    pub model: String,
    pub size_liters: f64,
    pub units_per_box: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            flavor: row.flavor,
            model: row.model,
            size_liters: row.size_liters,
            units_per_box: row.units_per_box,
        }
    }
}

/// Any `(id, name)` lookup row.
#[derive(Debug, Clone, FromRow)]
pub struct NamedRow {
    pub id: DbId,
    pub name: String,
}

impl From<NamedRow> for NamedEntity {
    fn from(row: NamedRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct StoppageTypeRow {
    pub id: DbId,
    pub name: String,
    pub category: StatusId,
}

impl TryFrom<StoppageTypeRow> for StoppageType {
    type Error = CoreError;

    fn try_from(row: StoppageTypeRow) -> Result<Self, Self::Error> {
        let category = StoppageCategory::from_id(row.category).ok_or_else(|| {
            CoreError::Internal(format!(
                "stoppage type {} has unknown category {}",
                row.id, row.category
            ))
        })?;
        Ok(Self {
            id: row.id,
            name: row.name,
            category,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct SubsubsystemRow {
    pub id: DbId,
    pub subsystem_id: DbId,
    pub name: String,
}

impl From<SubsubsystemRow> for Subsubsystem {
    fn from(row: SubsubsystemRow) -> Self {
        Self {
            id: row.id,
            subsystem_id: row.subsystem_id,
            name: row.name,
        }
    }
}
