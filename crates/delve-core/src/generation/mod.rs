//! Level layout generation
//!
//! `RoomLayoutGenerator` places rooms and hallways on a solid grid, then
//! `ComponentConnector` digs corridors until every open cell is reachable.

mod connector;
mod rooms;

use strum::{Display, EnumIter};

use crate::error::Result;
use crate::grid::Grid;

pub use connector::{ComponentConnector, Components, ConnectReport};
pub use rooms::{Layout, RoomLayoutGenerator, is_valid_room};

/// Contents of a generation grid cell
///
/// An empty cell is open floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum RoomTile {
    /// Solid rock
    Wall,
    /// Open cell carved by the connector, tagged for inspection
    DebugMarker,
}

/// Direction a hallway strip runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Anything that can produce a finished level grid
pub trait LevelGenerator {
    fn generate(&mut self) -> Result<Grid<RoomTile>>;
}
