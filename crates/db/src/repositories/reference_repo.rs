//! Repository for the reference lookup tables.

use prodline_core::production::StoppageCategory;
use prodline_core::types::DbId;
use sqlx::PgPool;

use crate::models::reference::{
    CreateProduct, NamedRow, ProductRow, StoppageTypeRow, SubsubsystemRow,
};

/// Lookup tables that carry only `(id, name)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedTable {
    Lines,
    QualityDeviations,
    RawMaterials,
    Subsystems,
}

impl NamedTable {
    fn table(self) -> &'static str {
        match self {
            Self::Lines => "production_lines",
            Self::QualityDeviations => "quality_deviations",
            Self::RawMaterials => "raw_materials",
            Self::Subsystems => "subsystems",
        }
    }
}

/// Provides query operations for products, lines, stoppage types and
/// cause catalogs.
pub struct ReferenceRepo;

impl ReferenceRepo {
    pub async fn list_products(pool: &PgPool) -> Result<Vec<ProductRow>, sqlx::Error> {
        sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, flavor, model, size_liters, units_per_box \
             FROM products ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn list_named(pool: &PgPool, table: NamedTable) -> Result<Vec<NamedRow>, sqlx::Error> {
        let query = format!("SELECT id, name FROM {} ORDER BY id", table.table());
        sqlx::query_as::<_, NamedRow>(&query).fetch_all(pool).await
    }

    pub async fn list_stoppage_types(pool: &PgPool) -> Result<Vec<StoppageTypeRow>, sqlx::Error> {
        sqlx::query_as::<_, StoppageTypeRow>(
            "SELECT id, name, category FROM stoppage_types ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn list_subsubsystems(pool: &PgPool) -> Result<Vec<SubsubsystemRow>, sqlx::Error> {
        sqlx::query_as::<_, SubsubsystemRow>(
            "SELECT id, subsystem_id, name FROM subsubsystems ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn create_product(pool: &PgPool, input: &CreateProduct) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO products (name, flavor, model, size_liters, units_per_box) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.flavor)
        .bind(&input.model)
        .bind(input.size_liters)
        .bind(input.units_per_box)
        .fetch_one(pool)
        .await
    }

    pub async fn create_named(
        pool: &PgPool,
        table: NamedTable,
        name: &str,
    ) -> Result<DbId, sqlx::Error> {
        let query = format!("INSERT INTO {} (name) VALUES ($1) RETURNING id", table.table());
        sqlx::query_scalar::<_, DbId>(&query).bind(name).fetch_one(pool).await
    }

    pub async fn create_stoppage_type(
        pool: &PgPool,
        name: &str,
        category: StoppageCategory,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO stoppage_types (name, category) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(category.id())
        .fetch_one(pool)
        .await
    }

    pub async fn create_subsubsystem(
        pool: &PgPool,
        subsystem_id: DbId,
        name: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO subsubsystems (subsystem_id, name) VALUES ($1, $2) RETURNING id",
        )
        .bind(subsystem_id)
        .bind(name)
        .fetch_one(pool)
        .await
    }
}
