//! Layout scoring — aggregates, constraint summary, and mission score.
//!
//! Pure functions over a zone slice. Everything is re-derived from the
//! current zones on every call; there is no caching and no state.
//!
//! Two distinct status policies coexist and must not be unified:
//! the per-zone rule in [`Zone::status`] uses an 80% warning band, while
//! the per-type aggregate rule here treats *any* placed zone of a type as
//! a warning until the type's total clears its minimum.

use serde::{Deserialize, Serialize};

use crate::catalog::{required_total_m2, ZoneType, CATALOG_SIZE};
use crate::zone::{Zone, ZoneFit};

/// Per-type allocation rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAggregate {
    pub zone_type: ZoneType,
    /// Summed area over all zones of this type, m².
    pub total_area_m2: f32,
    pub status: ZoneFit,
}

/// Design-wide allocation summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintsSummary {
    /// Sum of catalog minimums, m² (constant for the fixed catalog).
    pub required_total_m2: f32,
    /// Sum of all placed zone areas, m², regardless of type.
    pub allocated_total_m2: f32,
    /// Catalog types with no placed zone.
    pub missing_types: Vec<ZoneType>,
}

/// Mission score and its weighted sub-scores, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub coverage: f32,
    pub efficiency: f32,
    pub compliance: f32,
    pub score: u32,
}

/// Sum of zone areas for one type, with the aggregate status rule:
/// `Ok` when the total clears the minimum, `Warning` when zones of the
/// type exist but fall short, `Error` when the type is absent entirely.
pub fn aggregate_by_type(zones: &[Zone], zone_type: ZoneType) -> TypeAggregate {
    let of_type: Vec<&Zone> = zones.iter().filter(|z| z.zone_type == zone_type).collect();
    let total_area_m2: f32 = of_type.iter().map(|z| z.area_m2()).sum();

    let status = if total_area_m2 >= zone_type.min_area_m2() {
        ZoneFit::Ok
    } else if !of_type.is_empty() {
        ZoneFit::Warning
    } else {
        ZoneFit::Error
    };

    TypeAggregate {
        zone_type,
        total_area_m2,
        status,
    }
}

/// Total allocated area across all zones, m².
pub fn allocated_total_m2(zones: &[Zone]) -> f32 {
    zones.iter().map(|z| z.area_m2()).sum()
}

/// Required vs allocated totals plus the set of untouched catalog types.
pub fn constraints_summary(zones: &[Zone]) -> ConstraintsSummary {
    let missing_types = ZoneType::all()
        .into_iter()
        .filter(|t| !zones.iter().any(|z| z.zone_type == *t))
        .collect();

    ConstraintsSummary {
        required_total_m2: required_total_m2(),
        allocated_total_m2: allocated_total_m2(zones),
        missing_types,
    }
}

/// Weighted mission-success score over the current layout.
///
/// - coverage: zone count over catalog size, capped at 100. Counts zone
///   *instances*, not distinct types: two sleep zones score the same
///   coverage as one sleep plus one hygiene. Kept as-is.
/// - efficiency: allocated area over the habitat's approximate floor
///   area, capped at 100.
/// - compliance: share of zones whose per-zone status is `Ok`; the
///   `max(count, 1)` divisor makes the empty layout score 0 cleanly.
///
/// Weights: 0.4 coverage, 0.3 efficiency, 0.3 compliance, rounded.
pub fn mission_score(zones: &[Zone], total_floor_area_m2: f32) -> ScoreBreakdown {
    let coverage = ((zones.len() as f32 / CATALOG_SIZE as f32) * 100.0).min(100.0);
    let efficiency = ((allocated_total_m2(zones) / total_floor_area_m2) * 100.0).min(100.0);

    let ok_count = zones.iter().filter(|z| z.status() == ZoneFit::Ok).count();
    let compliance = ok_count as f32 / (zones.len().max(1)) as f32 * 100.0;

    let score = (coverage * 0.4 + efficiency * 0.3 + compliance * 0.3).round() as u32;

    ScoreBreakdown {
        coverage,
        efficiency,
        compliance,
        score,
    }
}

/// Allocated area per crew member, m².
pub fn allocated_per_crew_m2(zones: &[Zone], crew_size: u32) -> f32 {
    allocated_total_m2(zones) / crew_size as f32
}

/// Zones currently failing their individual minimum (warning or error).
pub fn unmet_zones(zones: &[Zone]) -> Vec<&Zone> {
    zones.iter().filter(|z| z.status() != ZoneFit::Ok).collect()
}
