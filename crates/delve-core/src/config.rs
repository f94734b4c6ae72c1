//! Generator configuration
//!
//! All tunable constants of the room generator and the component connector.
//! The defaults are the values the algorithm was designed around; changing
//! the retry bounds changes how long a run may take, so `validate` rejects
//! values that would stop it from terminating or placing anything at all.

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};

/// Tunables for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Candidate rectangles drawn before placement gives up
    pub max_placement_attempts: usize,
    /// Maximum one-tile growth steps per direction
    pub max_expansion: i32,
    /// Required gap around every room, in tiles
    pub room_spacing: i32,
    /// Smallest room area
    pub min_room_area: i32,
    /// A room must be at least this wide or this tall
    pub min_room_side: i32,
    /// Largest room area as a fraction of the grid area
    pub max_room_fraction: f32,
    /// How far hallways sit from their room's edge
    pub hallway_offset: i32,
    /// How far hallways overhang each end of their room side
    pub hallway_overhang: i32,
    /// Random component draws before connectivity repair gives up
    pub max_component_picks: usize,
    /// Mark corridors carved by the connector instead of clearing them
    pub tag_connector_corridors: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_placement_attempts: 1_000,
            max_expansion: 15,
            room_spacing: 3,
            min_room_area: 6,
            min_room_side: 3,
            max_room_fraction: 0.125,
            hallway_offset: 2,
            hallway_overhang: 2,
            max_component_picks: 100,
            tag_connector_corridors: true,
        }
    }
}

impl GeneratorConfig {
    /// Check the values a run depends on
    pub fn validate(&self) -> Result<()> {
        if self.max_placement_attempts == 0 {
            return Err(GenerationError::InvalidConfig(
                "max_placement_attempts must be at least 1".to_string(),
            ));
        }
        if self.max_component_picks == 0 {
            return Err(GenerationError::InvalidConfig(
                "max_component_picks must be at least 1".to_string(),
            ));
        }
        if !(self.max_room_fraction > 0.0 && self.max_room_fraction <= 1.0) {
            return Err(GenerationError::InvalidConfig(format!(
                "max_room_fraction must be in (0, 1], got {}",
                self.max_room_fraction
            )));
        }
        if self.max_expansion < 0 || self.room_spacing < 0 || self.hallway_overhang < 0 {
            return Err(GenerationError::InvalidConfig(
                "expansion, spacing and overhang must not be negative".to_string(),
            ));
        }
        if self.hallway_offset < 1 {
            return Err(GenerationError::InvalidConfig(
                "hallway_offset must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
