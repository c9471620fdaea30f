//! Habitat configuration — mission parameters and derived capacity.
//!
//! Defines the high-level mission parameters the designer works against:
//! where the habitat is deployed, who lives in it, and its rough envelope.
//! Derived floor area and volume feed the scoring in [`crate::scoring`].

use serde::{Deserialize, Serialize};

// ============================================================================
// DESTINATIONS
// ============================================================================

/// Mission destination for the habitat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Destination {
    /// Lunar surface — short sorties.
    Moon = 0,
    /// Martian surface — long stays.
    Mars = 1,
    /// In-transit habitat between bodies.
    Transit = 2,
}

/// Destination metadata for display.
#[derive(Debug, Clone)]
pub struct DestinationInfo {
    pub name: &'static str,
    /// Typical mission duration range, as shown to the user.
    pub typical_duration: &'static str,
    pub icon: &'static str,
}

impl Destination {
    pub fn info(&self) -> DestinationInfo {
        match self {
            Self::Moon => DestinationInfo {
                name: "Moon",
                typical_duration: "14-30 days",
                icon: "🌙",
            },
            Self::Mars => DestinationInfo {
                name: "Mars",
                typical_duration: "500-700 days",
                icon: "🔴",
            },
            Self::Transit => DestinationInfo {
                name: "Transit",
                typical_duration: "180-300 days",
                icon: "🚀",
            },
        }
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Moon),
            1 => Some(Self::Mars),
            2 => Some(Self::Transit),
            _ => None,
        }
    }
}

// ============================================================================
// HABITAT TYPES
// ============================================================================

/// Structural class of the habitat shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum HabitatType {
    /// Rigid metallic pressure vessel.
    Metallic = 0,
    /// Inflatable softgoods shell.
    Inflatable = 1,
    /// Surface-built, in-situ construction.
    Surface = 2,
}

/// Habitat type metadata for display.
#[derive(Debug, Clone)]
pub struct HabitatTypeInfo {
    pub name: &'static str,
    pub description: &'static str,
}

impl HabitatType {
    pub fn info(&self) -> HabitatTypeInfo {
        match self {
            Self::Metallic => HabitatTypeInfo {
                name: "Metallic (Rigid)",
                description: "Durable, predictable structure",
            },
            Self::Inflatable => HabitatTypeInfo {
                name: "Inflatable",
                description: "Lightweight, expandable volume",
            },
            Self::Surface => HabitatTypeInfo {
                name: "Surface-Built",
                description: "In-situ construction, radiation shielding",
            },
        }
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Metallic),
            1 => Some(Self::Inflatable),
            2 => Some(Self::Surface),
            _ => None,
        }
    }
}

// ============================================================================
// HABITAT CONFIG
// ============================================================================

/// Approximation factor applied to the cylindrical envelope to estimate
/// usable floor area per floor. Not geometric — tuned display heuristic.
const FLOOR_AREA_FACTOR: f32 = 2.5;

/// User-selected mission and envelope parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitatConfig {
    pub destination: Destination,
    /// Crew size in astronauts (≥ 1).
    pub crew_size: u32,
    /// Mission duration in days (≥ 1).
    pub duration_days: u32,
    pub habitat_type: HabitatType,
    /// Pressurized length in meters.
    pub length_m: f32,
    /// Shell diameter in meters.
    pub diameter_m: f32,
    /// Number of internal floors (≥ 1).
    pub floors: u32,
}

impl Default for HabitatConfig {
    fn default() -> Self {
        Self {
            destination: Destination::Moon,
            crew_size: 4,
            duration_days: 30,
            habitat_type: HabitatType::Inflatable,
            length_m: 15.0,
            diameter_m: 8.0,
            floors: 1,
        }
    }
}

impl HabitatConfig {
    /// Pressurized volume of the cylindrical envelope in m³.
    pub fn total_volume_m3(&self) -> f32 {
        std::f32::consts::PI * (self.diameter_m / 2.0).powi(2) * self.length_m
    }

    /// Approximate usable floor area in m² across all floors.
    pub fn total_floor_area_m2(&self) -> f32 {
        self.length_m * self.diameter_m * self.floors as f32 * FLOOR_AREA_FACTOR
    }

    /// Pressurized volume per crew member in m³.
    pub fn volume_per_crew_m3(&self) -> f32 {
        self.total_volume_m3() / self.crew_size as f32
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Length must be positive.
    NonPositiveLength(f32),
    /// Diameter must be positive.
    NonPositiveDiameter(f32),
    /// At least one floor.
    NoFloors,
    /// Crew size out of the supported 1–12 range.
    InvalidCrewSize(u32),
    /// Duration outside the supported 7–700 day range.
    InvalidDuration(u32),
}

/// Validate a habitat configuration, returning all errors found.
///
/// The scoring engine itself never rejects a config — derived values from a
/// degenerate config are simply undefined. This check is for callers that
/// want to gate user input before scoring.
pub fn validate_config(config: &HabitatConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.length_m <= 0.0 {
        errors.push(ConfigError::NonPositiveLength(config.length_m));
    }
    if config.diameter_m <= 0.0 {
        errors.push(ConfigError::NonPositiveDiameter(config.diameter_m));
    }
    if config.floors == 0 {
        errors.push(ConfigError::NoFloors);
    }
    if config.crew_size == 0 || config.crew_size > 12 {
        errors.push(ConfigError::InvalidCrewSize(config.crew_size));
    }
    if !(7..=700).contains(&config.duration_days) {
        errors.push(ConfigError::InvalidDuration(config.duration_days));
    }

    errors
}
