//! delve-core: Dungeon layout generation
//!
//! Rooms and hallways are carved out of solid rock on a `Grid`, then every
//! disconnected region is joined by digging corridors until the whole level
//! is reachable. The result is a `Grid<RoomTile>` that the `world` layer
//! turns into drawable walls.
//!
//! The crate does no I/O. Generation progress is reported through the
//! `Diagnostics` trait, which forwards to the `log` facade by default.

pub mod config;
pub mod diagnostics;
pub mod generation;
pub mod geometry;
pub mod grid;
pub mod world;

mod error;
mod rng;

pub use config::GeneratorConfig;
pub use diagnostics::{Diagnostics, LogDiagnostics, NullDiagnostics};
pub use error::{GenerationError, Result};
pub use generation::{
    ComponentConnector, ConnectReport, Layout, LevelGenerator, Orientation, RoomLayoutGenerator,
    RoomTile,
};
pub use geometry::{Position, Rect, Size};
pub use grid::{Grid, Neighborhood, SearchStatus};
pub use rng::GameRng;
pub use world::{Canvas, Wall, World};
