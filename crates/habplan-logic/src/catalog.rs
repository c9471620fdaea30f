//! Zone type catalog — the fixed set of functional zone categories.
//!
//! Ten categories with NASA-derived minimum floor areas. The catalog is
//! static data: zones reference a type by id, never the other way around,
//! and nothing at runtime edits it.

use serde::{Deserialize, Serialize};

/// One of the ten functional zone categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ZoneType {
    Sleep = 0,
    Hygiene = 1,
    Food = 2,
    Exercise = 3,
    Medical = 4,
    Maintenance = 5,
    Storage = 6,
    Environmental = 7,
    Recreation = 8,
    Command = 9,
}

/// Number of entries in the catalog.
pub const CATALOG_SIZE: usize = 10;

/// Static metadata for a zone type.
#[derive(Debug, Clone)]
pub struct ZoneTypeInfo {
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    /// Minimum required floor area in m².
    pub min_area_m2: f32,
    pub category: &'static str,
}

impl ZoneType {
    /// The full catalog, in display order.
    pub fn all() -> [ZoneType; CATALOG_SIZE] {
        [
            Self::Sleep,
            Self::Hygiene,
            Self::Food,
            Self::Exercise,
            Self::Medical,
            Self::Maintenance,
            Self::Storage,
            Self::Environmental,
            Self::Recreation,
            Self::Command,
        ]
    }

    pub fn info(&self) -> ZoneTypeInfo {
        match self {
            Self::Sleep => ZoneTypeInfo {
                name: "Sleep Quarters",
                icon: "🛏",
                color: "#3B82F6",
                min_area_m2: 40.0,
                category: "Life Support",
            },
            Self::Hygiene => ZoneTypeInfo {
                name: "Hygiene",
                icon: "🚿",
                color: "#06B6D4",
                min_area_m2: 10.0,
                category: "Life Support",
            },
            Self::Food => ZoneTypeInfo {
                name: "Food Prep",
                icon: "🍽",
                color: "#10B981",
                min_area_m2: 10.0,
                category: "Life Support",
            },
            Self::Exercise => ZoneTypeInfo {
                name: "Exercise",
                icon: "🏃",
                color: "#F59E0B",
                min_area_m2: 8.0,
                category: "Life Support",
            },
            Self::Medical => ZoneTypeInfo {
                name: "Medical",
                icon: "💊",
                color: "#EF4444",
                min_area_m2: 5.0,
                category: "Operations",
            },
            Self::Maintenance => ZoneTypeInfo {
                name: "Maintenance",
                icon: "🔧",
                color: "#8B5CF6",
                min_area_m2: 15.0,
                category: "Operations",
            },
            Self::Storage => ZoneTypeInfo {
                name: "Storage",
                icon: "📦",
                color: "#6366F1",
                min_area_m2: 20.0,
                category: "Operations",
            },
            Self::Environmental => ZoneTypeInfo {
                name: "Environmental Control",
                icon: "🌡",
                color: "#14B8A6",
                min_area_m2: 12.0,
                category: "Systems",
            },
            Self::Recreation => ZoneTypeInfo {
                name: "Recreation",
                icon: "🎮",
                color: "#EC4899",
                min_area_m2: 8.0,
                category: "Life Support",
            },
            Self::Command => ZoneTypeInfo {
                name: "Command Center",
                icon: "🖥",
                color: "#0EA5E9",
                min_area_m2: 10.0,
                category: "Operations",
            },
        }
    }

    /// Minimum required floor area in m² for this type.
    pub fn min_area_m2(&self) -> f32 {
        self.info().min_area_m2
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Sleep),
            1 => Some(Self::Hygiene),
            2 => Some(Self::Food),
            3 => Some(Self::Exercise),
            4 => Some(Self::Medical),
            5 => Some(Self::Maintenance),
            6 => Some(Self::Storage),
            7 => Some(Self::Environmental),
            8 => Some(Self::Recreation),
            9 => Some(Self::Command),
            _ => None,
        }
    }
}

/// Sum of minimum areas over the whole catalog (m²).
pub fn required_total_m2() -> f32 {
    ZoneType::all().iter().map(|t| t.min_area_m2()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size() {
        assert_eq!(ZoneType::all().len(), CATALOG_SIZE);
    }

    #[test]
    fn test_zone_type_roundtrip() {
        for i in 0..10u8 {
            let zt = ZoneType::from_u8(i).unwrap();
            assert_eq!(zt as u8, i);
        }
        assert!(ZoneType::from_u8(10).is_none());
        assert!(ZoneType::from_u8(99).is_none());
    }

    #[test]
    fn test_required_total() {
        // 40 + 10 + 10 + 8 + 5 + 15 + 20 + 12 + 8 + 10
        assert_eq!(required_total_m2(), 138.0);
    }

    #[test]
    fn test_info_populated() {
        for zt in ZoneType::all() {
            let info = zt.info();
            assert!(!info.name.is_empty());
            assert!(info.min_area_m2 > 0.0);
            assert!(info.color.starts_with('#'));
        }
    }

    #[test]
    fn test_serde_lowercase_ids() {
        let json = serde_json::to_string(&ZoneType::Sleep).unwrap();
        assert_eq!(json, "\"sleep\"");
        let back: ZoneType = serde_json::from_str("\"environmental\"").unwrap();
        assert_eq!(back, ZoneType::Environmental);
    }
}
