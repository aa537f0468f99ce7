//! The stock report catalog.
//!
//! Each entry binds a URL slug and a display title to a [`ReportSpec`].

use serde::Serialize;

use crate::analytics::dimension::Dimension;
use crate::analytics::rank::RankKey;
use crate::analytics::record::{Metric, RecordSource};
use crate::analytics::spec::ReportSpec;
use crate::production::StoppageCategory;

/// Top-N used by the cause breakdowns.
pub const CAUSE_REPORT_LIMIT: usize = 10;

/// A named report.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub slug: &'static str,
    pub title: &'static str,
    pub source: RecordSource,
    #[serde(skip)]
    pub spec: ReportSpec,
}

fn entry(slug: &'static str, title: &'static str, spec: ReportSpec) -> CatalogEntry {
    CatalogEntry {
        slug,
        title,
        source: spec.source,
        spec,
    }
}

/// Every stock report, production reports first.
pub fn catalog() -> Vec<CatalogEntry> {
    use Dimension::*;

    let production = ReportSpec::production;
    let time = |d| ReportSpec::stoppages(d, Metric::Time);

    vec![
        entry("production-by-hour", "Producción por hora", production(HourOfDay).in_domain_order()),
        entry("production-by-day", "Producción por día", production(DayOfWeek).in_domain_order()),
        entry("production-by-line", "Producción por línea", production(Line)),
        entry("production-by-product-flavor", "Producción por sabor", production(ProductFlavor)),
        entry("production-by-product-model", "Producción por modelo", production(ProductModel)),
        entry("production-by-product-size", "Producción por tamaño", production(ProductSize)),
        entry("production-by-box-type", "Producción por tipo de caja", production(BoxType)),
        entry(
            "efficiency-ranking-by-line",
            "Ranking de eficiencia por línea",
            production(Line).ranked_by(RankKey::Percentage),
        ),
        entry(
            "efficiency-ranking-by-hour",
            "Ranking de eficiencia por hora",
            production(HourOfDay).ranked_by(RankKey::Percentage),
        ),
        entry("stops-by-hour", "Paros por hora", time(HourOfDay).in_domain_order()),
        entry("stops-by-day", "Paros por día", time(DayOfWeek).in_domain_order()),
        entry("stops-by-type", "Tiempo de paro por tipo", time(StoppageType)),
        entry("stops-by-line", "Tiempo de paro por línea", time(Line)),
        entry("stops-by-product-flavor", "Tiempo de paro por sabor", time(ProductFlavor)),
        entry(
            "stop-count-by-type",
            "Cantidad de paros por tipo",
            ReportSpec::stoppages(StoppageType, Metric::Count),
        ),
        entry(
            "stops-by-quality-deviation",
            "Impacto de desviaciones de calidad",
            time(QualityDeviation)
                .top(CAUSE_REPORT_LIMIT)
                .requiring(StoppageCategory::Quality),
        ),
        entry(
            "stops-by-raw-material",
            "Paros por materia prima",
            time(RawMaterial).top(CAUSE_REPORT_LIMIT),
        ),
        entry(
            "stops-by-subsystem",
            "Paros por subsistema",
            time(Subsystem).top(CAUSE_REPORT_LIMIT),
        ),
        entry(
            "stops-by-subsubsystem",
            "Paros por subsubsistema",
            time(Subsubsystem).top(CAUSE_REPORT_LIMIT),
        ),
    ]
}

/// Look up a stock report by slug.
pub fn find(slug: &str) -> Option<CatalogEntry> {
    catalog().into_iter().find(|e| e.slug == slug)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_entry_validates() {
        for entry in catalog() {
            assert!(entry.spec.validate().is_ok(), "{} is invalid", entry.slug);
        }
    }

    #[test]
    fn slugs_are_unique() {
        let entries = catalog();
        let slugs: HashSet<_> = entries.iter().map(|e| e.slug).collect();
        assert_eq!(slugs.len(), entries.len());
    }

    #[test]
    fn canonical_time_views_keep_domain_order() {
        for slug in ["production-by-hour", "production-by-day", "stops-by-hour", "stops-by-day"] {
            assert!(find(slug).unwrap().spec.preserve_domain_order, "{slug}");
        }
        assert!(!find("efficiency-ranking-by-hour").unwrap().spec.preserve_domain_order);
    }

    #[test]
    fn cause_reports_are_top_ten() {
        for slug in ["stops-by-quality-deviation", "stops-by-raw-material", "stops-by-subsystem"] {
            assert_eq!(find(slug).unwrap().spec.rank_limit, Some(10), "{slug}");
        }
    }

    #[test]
    fn find_unknown_slug_is_none() {
        assert!(find("does-not-exist").is_none());
    }
}
