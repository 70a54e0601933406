//! Building tiers: each tile value from 2 to 2048 stands for a construction stage.
//!
//! The session result feeds the city view through [`BuildingTier::from_value`]
//! applied to the highest tile reached.

use crate::engine::Tile;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuildingTier {
    Material,
    Concrete,
    Frame,
    Wall,
    Room,
    Pavilion,
    House,
    Villa,
    Office,
    Tower,
    Landmark,
}

impl BuildingTier {
    pub const ALL: [BuildingTier; 11] = [
        BuildingTier::Material,
        BuildingTier::Concrete,
        BuildingTier::Frame,
        BuildingTier::Wall,
        BuildingTier::Room,
        BuildingTier::Pavilion,
        BuildingTier::House,
        BuildingTier::Villa,
        BuildingTier::Office,
        BuildingTier::Tower,
        BuildingTier::Landmark,
    ];

    /// Tile value this tier is unlocked by (2 for `Material`, doubling up to 2048).
    #[inline]
    pub fn value(self) -> Tile { 2 << (self as u32) }

    /// Tier for an exact tile value; `None` for 0, non powers of two and anything past 2048.
    pub fn from_value(value: Tile) -> Option<Self> {
        if value < 2 || !value.is_power_of_two() {
            return None;
        }
        Self::ALL.get(value.trailing_zeros() as usize - 1).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            BuildingTier::Material => "Brick",
            BuildingTier::Concrete => "Concrete",
            BuildingTier::Frame => "Steel Frame",
            BuildingTier::Wall => "Wall",
            BuildingTier::Room => "Room",
            BuildingTier::Pavilion => "Pavilion",
            BuildingTier::House => "House",
            BuildingTier::Villa => "Villa",
            BuildingTier::Office => "Office",
            BuildingTier::Tower => "Tower",
            BuildingTier::Landmark => "Landmark",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BuildingTier::Material => "Basic material",
            BuildingTier::Concrete => "Foundation work",
            BuildingTier::Frame => "Structure",
            BuildingTier::Wall => "Finishing work",
            BuildingTier::Room => "Unit space",
            BuildingTier::Pavilion => "Small building",
            BuildingTier::House => "Residence",
            BuildingTier::Villa => "Luxury home",
            BuildingTier::Office => "Business facility",
            BuildingTier::Tower => "Skyscraper",
            BuildingTier::Landmark => "Symbol of the city",
        }
    }
}

impl fmt::Display for BuildingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_double_per_tier() {
        let values: Vec<Tile> = BuildingTier::ALL.iter().map(|t| t.value()).collect();
        assert_eq!(values, vec![2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048]);
    }

    #[test]
    fn from_value_round_trips_every_tier() {
        for tier in BuildingTier::ALL {
            assert_eq!(BuildingTier::from_value(tier.value()), Some(tier));
        }
    }

    #[test]
    fn from_value_rejects_non_tiers() {
        assert_eq!(BuildingTier::from_value(0), None);
        assert_eq!(BuildingTier::from_value(1), None);
        assert_eq!(BuildingTier::from_value(12), None);
        assert_eq!(BuildingTier::from_value(4096), None);
    }

    #[test]
    fn display_includes_label_and_value() {
        assert_eq!(BuildingTier::Tower.to_string(), "Tower (1024)");
    }
}
