//! Production and stoppage records plus the reference data they join to.
//!
//! Records are read-only inputs to the analytics engine. Reference data
//! (products, lines, stoppage types, cause catalogs) arrives as plain lists
//! in a [`ReferenceCatalog`] and is indexed once per report run into
//! [`ReferenceData`] lookup tables.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Status ID type matching SMALLINT lookup tables in the database.
pub type StatusId = i16;

// ---------------------------------------------------------------------------
// ProductionStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a production run.
///
/// Discriminants match the seed order of the `production_statuses` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionStatus {
    Pending = 1,
    InProgress = 2,
    Completed = 3,
    Cancelled = 4,
}

impl ProductionStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Map a database status ID back to a variant.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(Self::Pending),
            2 => Some(Self::InProgress),
            3 => Some(Self::Completed),
            4 => Some(Self::Cancelled),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// StoppageCategory
// ---------------------------------------------------------------------------

/// Category of a stoppage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StoppageCategory {
    Maintenance = 1,
    Quality = 2,
    Operational = 3,
}

impl StoppageCategory {
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(Self::Maintenance),
            2 => Some(Self::Quality),
            3 => Some(Self::Operational),
            _ => None,
        }
    }

    /// Human-readable name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Maintenance => "maintenance",
            Self::Quality => "quality",
            Self::Operational => "operational",
        }
    }
}

// ---------------------------------------------------------------------------
// CauseRef
// ---------------------------------------------------------------------------

/// The specific cause attached to a stoppage. At most one kind is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum CauseRef {
    QualityDeviation {
        id: DbId,
    },
    RawMaterial {
        id: DbId,
    },
    Subsystem {
        subsystem_id: DbId,
        subsubsystem_id: Option<DbId>,
    },
}

impl CauseRef {
    /// Build a cause from the nullable cause columns of a stoppage row.
    ///
    /// Returns `Ok(None)` when no cause is set and a validation error when
    /// more than one cause kind is populated, or when a sub-subsystem is set
    /// without its subsystem.
    pub fn from_columns(
        quality_deviation_id: Option<DbId>,
        raw_material_id: Option<DbId>,
        subsystem_id: Option<DbId>,
        subsubsystem_id: Option<DbId>,
    ) -> Result<Option<Self>, CoreError> {
        let populated = [
            quality_deviation_id.is_some(),
            raw_material_id.is_some(),
            subsystem_id.is_some() || subsubsystem_id.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();

        if populated > 1 {
            return Err(CoreError::Validation(
                "a stoppage may reference at most one cause kind".to_string(),
            ));
        }

        match (quality_deviation_id, raw_material_id, subsystem_id, subsubsystem_id) {
            (Some(id), _, _, _) => Ok(Some(Self::QualityDeviation { id })),
            (_, Some(id), _, _) => Ok(Some(Self::RawMaterial { id })),
            (_, _, Some(subsystem_id), subsubsystem_id) => Ok(Some(Self::Subsystem {
                subsystem_id,
                subsubsystem_id,
            })),
            (_, _, None, Some(_)) => Err(CoreError::Validation(
                "a sub-subsystem cause requires its subsystem".to_string(),
            )),
            (None, None, None, None) => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One manufacturing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub id: DbId,
    pub product_id: DbId,
    pub line_id: DbId,
    pub produced_boxes: u32,
    /// May be zero; guard before dividing.
    pub planned_boxes: u32,
    pub status: ProductionStatus,
    pub produced_at: Timestamp,
}

/// One downtime event tied to a production run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoppageRecord {
    pub id: DbId,
    pub production_id: DbId,
    pub line_id: DbId,
    /// Product of the owning production, joined by the record store.
    pub product_id: Option<DbId>,
    pub stoppage_type_id: DbId,
    pub cause: Option<CauseRef>,
    pub minutes: u32,
    pub started_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Reference entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub flavor: String,
    pub model: String,
    pub size_liters: f64,
    pub units_per_box: i32,
}

/// A reference entity that only carries a display name (lines, quality
/// deviations, raw materials, subsystems).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoppageType {
    pub id: DbId,
    pub name: String,
    pub category: StoppageCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsubsystem {
    pub id: DbId,
    pub subsystem_id: DbId,
    pub name: String,
}

/// Reference data as delivered by a record store: plain lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCatalog {
    pub products: Vec<Product>,
    pub lines: Vec<NamedEntity>,
    pub stoppage_types: Vec<StoppageType>,
    pub quality_deviations: Vec<NamedEntity>,
    pub raw_materials: Vec<NamedEntity>,
    pub subsystems: Vec<NamedEntity>,
    pub subsubsystems: Vec<Subsubsystem>,
}

// ---------------------------------------------------------------------------
// ReferenceData
// ---------------------------------------------------------------------------

/// Reference data indexed by id for linear-time joins during aggregation.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    products: HashMap<DbId, Product>,
    lines: HashMap<DbId, String>,
    stoppage_types: HashMap<DbId, StoppageType>,
    quality_deviations: HashMap<DbId, String>,
    raw_materials: HashMap<DbId, String>,
    subsystems: HashMap<DbId, String>,
    subsubsystems: HashMap<DbId, Subsubsystem>,
}

fn index_names(entities: Vec<NamedEntity>) -> HashMap<DbId, String> {
    entities.into_iter().map(|e| (e.id, e.name)).collect()
}

impl From<ReferenceCatalog> for ReferenceData {
    fn from(catalog: ReferenceCatalog) -> Self {
        Self {
            products: catalog.products.into_iter().map(|p| (p.id, p)).collect(),
            lines: index_names(catalog.lines),
            stoppage_types: catalog
                .stoppage_types
                .into_iter()
                .map(|t| (t.id, t))
                .collect(),
            quality_deviations: index_names(catalog.quality_deviations),
            raw_materials: index_names(catalog.raw_materials),
            subsystems: index_names(catalog.subsystems),
            subsubsystems: catalog
                .subsubsystems
                .into_iter()
                .map(|s| (s.id, s))
                .collect(),
        }
    }
}

impl ReferenceData {
    pub fn product(&self, id: DbId) -> Option<&Product> {
        self.products.get(&id)
    }

    pub fn line_name(&self, id: DbId) -> Option<&str> {
        self.lines.get(&id).map(String::as_str)
    }

    pub fn stoppage_type(&self, id: DbId) -> Option<&StoppageType> {
        self.stoppage_types.get(&id)
    }

    pub fn quality_deviation_name(&self, id: DbId) -> Option<&str> {
        self.quality_deviations.get(&id).map(String::as_str)
    }

    pub fn raw_material_name(&self, id: DbId) -> Option<&str> {
        self.raw_materials.get(&id).map(String::as_str)
    }

    pub fn subsystem_name(&self, id: DbId) -> Option<&str> {
        self.subsystems.get(&id).map(String::as_str)
    }

    /// Name of sub-subsystem `id`, only if it hangs off `subsystem_id`.
    pub fn subsubsystem_name(&self, subsystem_id: DbId, id: DbId) -> Option<&str> {
        self.subsubsystems
            .get(&id)
            .filter(|s| s.subsystem_id == subsystem_id)
            .map(|s| s.name.as_str())
    }

    /// IDs of every stoppage type in the given category.
    pub fn stoppage_type_ids(&self, category: StoppageCategory) -> HashSet<DbId> {
        self.stoppage_types
            .values()
            .filter(|t| t.category == category)
            .map(|t| t.id)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
