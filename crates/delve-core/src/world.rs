//! Drawable world
//!
//! Translates a finished generation grid into wall tiles that know their
//! sprite in the tileset and how to show themselves in text mode.

use strum::{Display, EnumIter, IntoEnumIterator};

use crate::error::Result;
use crate::generation::{LevelGenerator, RoomTile};
use crate::geometry::Position;
use crate::grid::Grid;

/// Terminal colors available to text-mode fallbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// How a sprite is drawn when no tileset is available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AsciiFallback {
    pub glyph: char,
    pub foreground: Color,
    pub background: Color,
}

impl AsciiFallback {
    pub const fn new(glyph: char, foreground: Color, background: Color) -> Self {
        Self {
            glyph,
            foreground,
            background,
        }
    }
}

/// Wall tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Wall {
    DungeonRock,
    /// Corridor dug by the connector
    DebugTile,
}

impl Wall {
    /// Index into the tileset
    pub const fn sprite_index(self) -> u32 {
        match self {
            Wall::DungeonRock => 1357,
            Wall::DebugTile => 1049,
        }
    }

    pub const fn ascii_fallback(self) -> AsciiFallback {
        match self {
            Wall::DungeonRock => AsciiFallback::new('#', Color::BrightWhite, Color::Gray),
            Wall::DebugTile => AsciiFallback::new('!', Color::BrightWhite, Color::Green),
        }
    }

    /// Wall drawn with the given sprite, if any
    pub fn from_sprite(sprite_index: u32) -> Option<Self> {
        Wall::iter().find(|wall| wall.sprite_index() == sprite_index)
    }
}

impl From<RoomTile> for Wall {
    fn from(tile: RoomTile) -> Self {
        match tile {
            RoomTile::Wall => Wall::DungeonRock,
            RoomTile::DebugMarker => Wall::DebugTile,
        }
    }
}

/// Drawing surface for sprites
pub trait Canvas {
    fn draw(&mut self, sprite_index: u32, pos: Position);
}

/// Text-mode rendering for a sprite, if it belongs to a known tile
pub fn fallback_for_sprite(sprite_index: u32) -> Option<AsciiFallback> {
    Wall::from_sprite(sprite_index).map(Wall::ascii_fallback)
}

/// The walls of one level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    walls: Grid<Wall>,
}

impl World {
    pub fn from_tiles(tiles: &Grid<RoomTile>) -> Self {
        Self {
            walls: tiles.filter_map(|&tile| Some(Wall::from(tile))),
        }
    }

    /// Run a generator and keep its result
    pub fn generate(generator: &mut impl LevelGenerator) -> Result<Self> {
        let tiles = generator.generate()?;
        Ok(Self::from_tiles(&tiles))
    }

    pub fn walls(&self) -> &Grid<Wall> {
        &self.walls
    }

    /// Draw every wall, row by row; open cells are left alone
    pub fn draw(&self, canvas: &mut impl Canvas) {
        for (pos, wall) in self.walls.iter() {
            if let Some(wall) = wall {
                canvas.draw(wall.sprite_index(), pos);
            }
        }
    }
}
