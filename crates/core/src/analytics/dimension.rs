//! Dimension resolvers: map a record to the bucket it is grouped under.
//!
//! Resolution is total. A record whose join cannot be satisfied (unknown
//! product, line, type or cause id, blank attribute) lands in the
//! [`Bucket::unknown`] sentinel instead of failing the report. Records for
//! which a dimension is meaningless (a stoppage without a raw-material
//! cause in the raw-material dimension) are [`Resolution::Excluded`].

use chrono::{Datelike, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

use crate::analytics::bucket::{Bucket, UNKNOWN_LABEL};
use crate::analytics::record::{FactRecord, RecordSource};
use crate::production::{CauseRef, Product, ReferenceData};
use crate::types::DbId;

/// Business-week order of `num_days_from_sunday` values: Monday first,
/// Sunday last.
pub const BUSINESS_WEEK: [u32; 7] = [1, 2, 3, 4, 5, 6, 0];

const DAY_LABELS: [&str; 7] = [
    "Domingo",
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
];

/// An axis along which records are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    /// Local wall-clock hour, `0..=23`.
    HourOfDay,
    /// Local day of week, keyed `0` (Sunday) to `6` (Saturday).
    DayOfWeek,
    ProductFlavor,
    ProductModel,
    ProductSize,
    BoxType,
    Line,
    StoppageType,
    QualityDeviation,
    RawMaterial,
    Subsystem,
    Subsubsystem,
}

/// Outcome of resolving one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Bucket(Bucket),
    /// The record does not participate in this dimension.
    Excluded,
}

/// Everything a resolver may consult besides the record itself.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub refs: &'a ReferenceData,
    /// Plant wall-clock offset for the hour and day axes.
    pub offset: FixedOffset,
}

impl Dimension {
    /// Whether the dimension has a fixed, fully enumerable domain whose
    /// buckets are pre-seeded before aggregation.
    pub fn is_full_domain(self) -> bool {
        matches!(self, Dimension::HourOfDay | Dimension::DayOfWeek)
    }

    /// Whether records of `source` can ever resolve to a bucket.
    pub fn applies_to(self, source: RecordSource) -> bool {
        match self {
            Dimension::StoppageType
            | Dimension::QualityDeviation
            | Dimension::RawMaterial
            | Dimension::Subsystem
            | Dimension::Subsubsystem => source == RecordSource::Stoppages,
            _ => true,
        }
    }

    /// The full ordered domain for full-domain dimensions, `None` otherwise.
    ///
    /// Hours run `0..23`; days run Monday..Saturday then Sunday.
    pub fn domain(self) -> Option<Vec<Bucket>> {
        match self {
            Dimension::HourOfDay => Some((0..24).map(hour_bucket).collect()),
            Dimension::DayOfWeek => Some(BUSINESS_WEEK.iter().copied().map(day_bucket).collect()),
            _ => None,
        }
    }

    pub fn resolve<R: FactRecord>(self, record: &R, ctx: &ResolveContext<'_>) -> Resolution {
        let refs = ctx.refs;
        let bucket = match self {
            Dimension::HourOfDay => {
                let local = record.occurred_at().with_timezone(&ctx.offset);
                hour_bucket(local.hour())
            }
            Dimension::DayOfWeek => {
                let local = record.occurred_at().with_timezone(&ctx.offset);
                day_bucket(local.weekday().num_days_from_sunday())
            }
            Dimension::ProductFlavor => product_attribute(record, refs, |p| named(&p.flavor)),
            Dimension::ProductModel => product_attribute(record, refs, |p| named(&p.model)),
            Dimension::ProductSize => product_attribute(record, refs, |p| {
                (p.size_liters.is_finite() && p.size_liters > 0.0).then(|| {
                    Bucket::new(p.size_liters.to_string(), format!("{} L", p.size_liters))
                })
            }),
            Dimension::BoxType => product_attribute(record, refs, |p| {
                (p.units_per_box > 0).then(|| {
                    Bucket::new(p.units_per_box.to_string(), format!("Caja x{}", p.units_per_box))
                })
            }),
            Dimension::Line => {
                let id = record.line_id();
                labelled(id, refs.line_name(id))
            }
            Dimension::StoppageType => match record.stoppage_type_id() {
                Some(id) => labelled(id, refs.stoppage_type(id).map(|t| t.name.as_str())),
                None => return Resolution::Excluded,
            },
            Dimension::QualityDeviation => match record.cause() {
                Some(CauseRef::QualityDeviation { id }) => {
                    labelled(*id, refs.quality_deviation_name(*id))
                }
                _ => return Resolution::Excluded,
            },
            Dimension::RawMaterial => match record.cause() {
                Some(CauseRef::RawMaterial { id }) => labelled(*id, refs.raw_material_name(*id)),
                _ => return Resolution::Excluded,
            },
            Dimension::Subsystem => match record.cause() {
                Some(CauseRef::Subsystem { subsystem_id, .. }) => {
                    labelled(*subsystem_id, refs.subsystem_name(*subsystem_id))
                }
                _ => return Resolution::Excluded,
            },
            Dimension::Subsubsystem => match record.cause() {
                Some(CauseRef::Subsystem {
                    subsystem_id,
                    subsubsystem_id: Some(sub_id),
                }) => match (
                    refs.subsystem_name(*subsystem_id),
                    refs.subsubsystem_name(*subsystem_id, *sub_id),
                ) {
                    (Some(parent), Some(child)) => Bucket::new(
                        format!("{subsystem_id}/{sub_id}"),
                        format!("{parent} / {child}"),
                    ),
                    _ => Bucket::unknown(),
                },
                _ => return Resolution::Excluded,
            },
        };
        Resolution::Bucket(bucket)
    }
}

fn hour_bucket(hour: u32) -> Bucket {
    Bucket::new(hour.to_string(), format!("{hour:02}:00"))
}

fn day_bucket(day_from_sunday: u32) -> Bucket {
    let label = DAY_LABELS
        .get(day_from_sunday as usize)
        .copied()
        .unwrap_or(UNKNOWN_LABEL);
    Bucket::new(day_from_sunday.to_string(), label)
}

/// Bucket keyed by id and labelled by the joined name, or the sentinel when
/// the join misses.
fn labelled(id: DbId, name: Option<&str>) -> Bucket {
    match name {
        Some(name) => Bucket::new(id.to_string(), name),
        None => Bucket::unknown(),
    }
}

/// Bucket keyed and labelled by a free-text attribute.
fn named(value: &str) -> Option<Bucket> {
    let value = value.trim();
    (!value.is_empty()).then(|| Bucket::new(value, value))
}

fn product_attribute<R, F>(record: &R, refs: &ReferenceData, attribute: F) -> Bucket
where
    R: FactRecord,
    F: Fn(&Product) -> Option<Bucket>,
{
    record
        .product_id()
        .and_then(|id| refs.product(id))
        .and_then(attribute)
        .unwrap_or_else(Bucket::unknown)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::analytics::bucket::UNKNOWN_KEY;
    use crate::analytics::test_helpers::{at, catalog, production, stoppage};
    use crate::production::NamedEntity;

    fn resolve_with<R: FactRecord>(dimension: Dimension, record: &R, refs: &ReferenceData) -> Resolution {
        let ctx = ResolveContext {
            refs,
            offset: FixedOffset::east_opt(0).unwrap(),
        };
        dimension.resolve(record, &ctx)
    }

    fn bucket(resolution: Resolution) -> Bucket {
        match resolution {
            Resolution::Bucket(b) => b,
            Resolution::Excluded => panic!("expected a bucket"),
        }
    }

    // -- domains --

    #[test]
    fn hour_domain_has_24_ordered_buckets() {
        let domain = Dimension::HourOfDay.domain().unwrap();
        assert_eq!(domain.len(), 24);
        assert_eq!(domain[0], Bucket::new("0", "00:00"));
        assert_eq!(domain[23], Bucket::new("23", "23:00"));
    }

    #[test]
    fn day_domain_puts_sunday_last() {
        let labels: Vec<String> = Dimension::DayOfWeek
            .domain()
            .unwrap()
            .into_iter()
            .map(|b| b.label)
            .collect();
        assert_eq!(
            labels,
            ["Lunes", "Martes", "Miércoles", "Jueves", "Viernes", "Sábado", "Domingo"]
        );
    }

    #[test]
    fn only_time_dimensions_are_full_domain() {
        assert!(Dimension::HourOfDay.is_full_domain());
        assert!(Dimension::DayOfWeek.is_full_domain());
        assert!(!Dimension::Line.is_full_domain());
        assert!(Dimension::Line.domain().is_none());
    }

    // -- time axes --

    #[test]
    fn hour_uses_local_wall_clock() {
        let refs = ReferenceData::default();
        let mut record = production(1, 1, 10, 10);
        record.produced_at = Utc.with_ymd_and_hms(2024, 6, 3, 2, 30, 0).unwrap();
        let ctx = ResolveContext {
            refs: &refs,
            offset: FixedOffset::west_opt(6 * 3600).unwrap(),
        };

        // 02:30 UTC is 20:30 on the previous day at UTC-6.
        assert_eq!(
            Dimension::HourOfDay.resolve(&record, &ctx),
            Resolution::Bucket(Bucket::new("20", "20:00"))
        );
        assert_eq!(
            Dimension::DayOfWeek.resolve(&record, &ctx),
            Resolution::Bucket(Bucket::new("0", "Domingo"))
        );
    }

    #[test]
    fn day_of_week_keys_from_sunday() {
        let refs = ReferenceData::default();
        let mut record = stoppage(1, 5, None);
        record.started_at = at(5, 12); // Wednesday
        assert_eq!(
            bucket(resolve_with(Dimension::DayOfWeek, &record, &refs)),
            Bucket::new("3", "Miércoles")
        );
    }

    // -- product joins --

    #[test]
    fn product_dimensions_join_on_product_id() {
        let refs = ReferenceData::from(catalog());
        let record = production(1, 2, 10, 10);

        assert_eq!(
            bucket(resolve_with(Dimension::ProductFlavor, &record, &refs)),
            Bucket::new("Naranja", "Naranja")
        );
        assert_eq!(
            bucket(resolve_with(Dimension::ProductModel, &record, &refs)),
            Bucket::new("PET", "PET")
        );
        assert_eq!(
            bucket(resolve_with(Dimension::ProductSize, &record, &refs)),
            Bucket::new("2", "2 L")
        );
        assert_eq!(
            bucket(resolve_with(Dimension::BoxType, &record, &refs)),
            Bucket::new("8", "Caja x8")
        );
    }

    #[test]
    fn missing_product_resolves_to_unknown() {
        let refs = ReferenceData::from(catalog());
        let record = production(1, 999, 10, 10);

        for dimension in [
            Dimension::ProductFlavor,
            Dimension::ProductModel,
            Dimension::ProductSize,
            Dimension::BoxType,
        ] {
            let b = bucket(resolve_with(dimension, &record, &refs));
            assert_eq!(b.key, UNKNOWN_KEY);
            assert_eq!(b.label, UNKNOWN_LABEL);
        }
    }

    #[test]
    fn stoppage_without_product_resolves_to_unknown() {
        let refs = ReferenceData::from(catalog());
        let mut record = stoppage(1, 5, None);
        record.product_id = None;
        assert_eq!(
            bucket(resolve_with(Dimension::ProductFlavor, &record, &refs)),
            Bucket::unknown()
        );
    }

    #[test]
    fn blank_attribute_resolves_to_unknown() {
        let mut cat = catalog();
        cat.products[0].flavor = "   ".to_string();
        let refs = ReferenceData::from(cat);
        let record = production(1, 1, 10, 10);
        assert_eq!(
            bucket(resolve_with(Dimension::ProductFlavor, &record, &refs)),
            Bucket::unknown()
        );
    }

    // -- line / type --

    #[test]
    fn line_and_type_join_names() {
        let refs = ReferenceData::from(catalog());
        let mut record = stoppage(1, 5, None);
        record.line_id = 2;
        record.stoppage_type_id = 2;

        assert_eq!(
            bucket(resolve_with(Dimension::Line, &record, &refs)),
            Bucket::new("2", "Línea 2")
        );
        assert_eq!(
            bucket(resolve_with(Dimension::StoppageType, &record, &refs)),
            Bucket::new("2", "Calidad")
        );

        record.line_id = 77;
        assert_eq!(
            bucket(resolve_with(Dimension::Line, &record, &refs)),
            Bucket::unknown()
        );
    }

    #[test]
    fn productions_are_excluded_from_stoppage_type() {
        let refs = ReferenceData::from(catalog());
        let record = production(1, 1, 10, 10);
        assert_eq!(
            resolve_with(Dimension::StoppageType, &record, &refs),
            Resolution::Excluded
        );
    }

    // -- causes --

    #[test]
    fn cause_dimensions_exclude_other_or_missing_causes() {
        let mut cat = catalog();
        cat.raw_materials = vec![NamedEntity {
            id: 5,
            name: "Preforma".to_string(),
        }];
        let refs = ReferenceData::from(cat);

        let raw = stoppage(1, 5, Some(CauseRef::RawMaterial { id: 5 }));
        let none = stoppage(2, 5, None);

        assert_eq!(
            bucket(resolve_with(Dimension::RawMaterial, &raw, &refs)),
            Bucket::new("5", "Preforma")
        );
        assert_eq!(
            resolve_with(Dimension::QualityDeviation, &raw, &refs),
            Resolution::Excluded
        );
        assert_eq!(
            resolve_with(Dimension::RawMaterial, &none, &refs),
            Resolution::Excluded
        );
    }

    #[test]
    fn unknown_cause_id_resolves_to_unknown() {
        let refs = ReferenceData::from(catalog());
        let record = stoppage(1, 5, Some(CauseRef::QualityDeviation { id: 40 }));
        assert_eq!(
            bucket(resolve_with(Dimension::QualityDeviation, &record, &refs)),
            Bucket::unknown()
        );
    }

    #[test]
    fn subsubsystem_keys_on_pair() {
        let mut cat = catalog();
        cat.subsystems = vec![NamedEntity {
            id: 3,
            name: "Llenadora".to_string(),
        }];
        cat.subsubsystems = vec![crate::production::Subsubsystem {
            id: 8,
            subsystem_id: 3,
            name: "Válvula".to_string(),
        }];
        let refs = ReferenceData::from(cat);

        let with_child = stoppage(
            1,
            5,
            Some(CauseRef::Subsystem {
                subsystem_id: 3,
                subsubsystem_id: Some(8),
            }),
        );
        let parent_only = stoppage(
            2,
            5,
            Some(CauseRef::Subsystem {
                subsystem_id: 3,
                subsubsystem_id: None,
            }),
        );

        assert_eq!(
            bucket(resolve_with(Dimension::Subsubsystem, &with_child, &refs)),
            Bucket::new("3/8", "Llenadora / Válvula")
        );
        assert_eq!(
            bucket(resolve_with(Dimension::Subsystem, &parent_only, &refs)),
            Bucket::new("3", "Llenadora")
        );
        assert_eq!(
            resolve_with(Dimension::Subsubsystem, &parent_only, &refs),
            Resolution::Excluded
        );
    }

    #[test]
    fn subsubsystem_under_wrong_parent_is_unknown() {
        let mut cat = catalog();
        cat.subsystems = vec![
            NamedEntity {
                id: 3,
                name: "Llenadora".to_string(),
            },
            NamedEntity {
                id: 4,
                name: "Etiquetadora".to_string(),
            },
        ];
        cat.subsubsystems = vec![crate::production::Subsubsystem {
            id: 8,
            subsystem_id: 3,
            name: "Válvula".to_string(),
        }];
        let refs = ReferenceData::from(cat);

        let mismatched = stoppage(
            1,
            5,
            Some(CauseRef::Subsystem {
                subsystem_id: 4,
                subsubsystem_id: Some(8),
            }),
        );

        assert_eq!(
            bucket(resolve_with(Dimension::Subsubsystem, &mismatched, &refs)),
            Bucket::unknown()
        );
        // The parent alone still resolves.
        assert_eq!(
            bucket(resolve_with(Dimension::Subsystem, &mismatched, &refs)),
            Bucket::new("4", "Etiquetadora")
        );
    }
}
