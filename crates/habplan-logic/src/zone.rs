//! Placed zones and per-zone constraint checks.
//!
//! A zone is a user-placed rectangle on the layout canvas, measured in
//! canvas pixels. All area math converts through the fixed 15 px/m scale;
//! every downstream metric depends on that constant staying exact.

use serde::{Deserialize, Serialize};

use crate::catalog::ZoneType;

/// Canvas scale: 15 px per meter along each axis.
pub const PX_PER_METER: f32 = 15.0;

/// Canvas scale squared: 225 px² per m².
pub const PX2_PER_M2: f32 = PX_PER_METER * PX_PER_METER;

/// A placed rectangular zone on the layout canvas.
///
/// Positions and sizes are in canvas pixels. The engine does not reject
/// zero or negative dimensions — degenerate rectangles simply produce
/// zero or negative areas downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Unique id, strictly increasing in creation order.
    pub id: u64,
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// How a zone (or a per-type aggregate) measures against its minimum area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneFit {
    /// Meets or exceeds the minimum.
    Ok,
    /// Within 80% of the minimum.
    Warning,
    /// Below 80% of the minimum.
    Error,
}

impl Zone {
    /// Floor area in m²: width × height / 225.
    pub fn area_m2(&self) -> f32 {
        self.width * self.height / PX2_PER_M2
    }

    /// Per-zone fit against this zone type's minimum area.
    ///
    /// Boundary values belong to the stricter tier: area exactly at the
    /// minimum is `Ok`, exactly at 80% of the minimum is `Warning`.
    pub fn status(&self) -> ZoneFit {
        let area = self.area_m2();
        let min = self.zone_type.min_area_m2();
        if area >= min {
            ZoneFit::Ok
        } else if area >= min * 0.8 {
            ZoneFit::Warning
        } else {
            ZoneFit::Error
        }
    }

    /// How many m² short of the minimum this zone is (negative if over).
    pub fn deficit_m2(&self) -> f32 {
        self.zone_type.min_area_m2() - self.area_m2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_zone(zone_type: ZoneType, width: f32, height: f32) -> Zone {
        Zone {
            id: 1,
            zone_type,
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    #[test]
    fn test_area_conversion_exact() {
        let zone = make_zone(ZoneType::Sleep, 300.0, 300.0);
        assert_eq!(zone.area_m2(), 400.0);

        let zone = make_zone(ZoneType::Hygiene, 15.0, 15.0);
        assert_eq!(zone.area_m2(), 1.0);
    }

    #[test]
    fn test_area_nonnegative_for_nonnegative_dims() {
        let zone = make_zone(ZoneType::Food, 0.0, 120.0);
        assert_eq!(zone.area_m2(), 0.0);
    }

    #[test]
    fn test_status_at_minimum_is_ok() {
        // Hygiene minimum is 10 m² = 2250 px²; 150 × 15 = 2250.
        let zone = make_zone(ZoneType::Hygiene, 150.0, 15.0);
        assert_eq!(zone.area_m2(), 10.0);
        assert_eq!(zone.status(), ZoneFit::Ok);
    }

    #[test]
    fn test_status_at_eighty_percent_is_warning() {
        // 8 m² = exactly 0.8 × the 10 m² hygiene minimum.
        let zone = make_zone(ZoneType::Hygiene, 120.0, 15.0);
        assert_eq!(zone.area_m2(), 8.0);
        assert_eq!(zone.status(), ZoneFit::Warning);
    }

    #[test]
    fn test_status_below_eighty_percent_is_error() {
        let zone = make_zone(ZoneType::Hygiene, 119.0, 15.0);
        assert!(zone.area_m2() < 8.0);
        assert_eq!(zone.status(), ZoneFit::Error);
    }

    #[test]
    fn test_deficit() {
        let zone = make_zone(ZoneType::Hygiene, 120.0, 15.0); // 8 of 10 m²
        assert!((zone.deficit_m2() - 2.0).abs() < 1e-6);

        let zone = make_zone(ZoneType::Hygiene, 300.0, 15.0); // 20 of 10 m²
        assert!(zone.deficit_m2() < 0.0);
    }

    #[test]
    fn test_zone_serde_shape() {
        let zone = make_zone(ZoneType::Sleep, 95.0, 95.0);
        let json = serde_json::to_value(&zone).unwrap();
        assert_eq!(json["type"], "sleep");
        assert_eq!(json["width"], 95.0);
        let back: Zone = serde_json::from_value(json).unwrap();
        assert_eq!(back, zone);
    }
}
