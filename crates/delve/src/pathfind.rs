//! Pathfinding demo on a fixed map

use anyhow::{Result, bail};
use log::info;

use delve_core::grid::manhattan;
use delve_core::world::{AsciiFallback, Color};
use delve_core::{Canvas, Grid, Neighborhood, Position, Size};

#[rustfmt::skip]
const DEMO_MAP: [&str; 22] = [
    "######################",
    "#                #   #",
    "#         #      #   #",
    "#         #      #   #",
    "#        S#      #   #",
    "#      #####         #",
    "#         #      #   #",
    "#                #   #",
    "#         #      #   #",
    "#         #      #   #",
    "#         #      #   #",
    "#         #      #####",
    "#         #          #",
    "###########          #",
    "#     E#             #",
    "#      #             #",
    "#      #             #",
    "#      ##########    #",
    "#                    #",
    "#                    #",
    "#                    #",
    "######################",
];

/// Stepping into a wall is allowed but priced out of any sensible route
const WALL_COST: u32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoTile {
    Wall,
    Path,
    Start,
    End,
}

impl DemoTile {
    const ALL: [DemoTile; 4] = [DemoTile::Wall, DemoTile::Path, DemoTile::Start, DemoTile::End];

    pub const fn sprite_index(self) -> u32 {
        match self {
            DemoTile::Wall => 1357,
            DemoTile::Path => 1376,
            DemoTile::Start => 1048,
            DemoTile::End => 1052,
        }
    }

    pub const fn ascii_fallback(self) -> AsciiFallback {
        match self {
            DemoTile::Wall => AsciiFallback::new('#', Color::Black, Color::White),
            DemoTile::Path => AsciiFallback::new('*', Color::BrightCyan, Color::Default),
            DemoTile::Start => AsciiFallback::new('S', Color::BrightBlue, Color::Default),
            DemoTile::End => AsciiFallback::new('E', Color::BrightRed, Color::Default),
        }
    }
}

pub fn demo_fallback(sprite_index: u32) -> Option<AsciiFallback> {
    DemoTile::ALL
        .into_iter()
        .find(|tile| tile.sprite_index() == sprite_index)
        .map(DemoTile::ascii_fallback)
}

pub struct Demo {
    pub tiles: Grid<DemoTile>,
    pub start: Position,
    pub end: Position,
}

impl Demo {
    /// Parse a map where `#` is wall, `S` the start and `E` the end
    pub fn parse(rows: &[&str]) -> Result<Self> {
        let height = rows.len() as i32;
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0) as i32;
        let mut tiles = Grid::new(Size::new(width, height));
        let mut start = None;
        let mut end = None;

        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                match ch {
                    '#' => tiles.set(pos, DemoTile::Wall),
                    'S' => start = Some(pos),
                    'E' => end = Some(pos),
                    _ => {}
                }
            }
        }

        let (Some(start), Some(end)) = (start, end) else {
            bail!("demo map needs both a start and an end");
        };
        Ok(Self { tiles, start, end })
    }

    /// Find the route and mark it on the map; returns its length in cells
    pub fn solve(&mut self) -> usize {
        let tiles = &self.tiles;
        let path = tiles.a_star(
            self.start,
            self.end,
            Neighborhood::FourWay,
            |_, to| match tiles.get(to) {
                Some(DemoTile::Wall) => WALL_COST,
                _ => 1,
            },
            manhattan(self.end),
        );

        for &pos in &path {
            self.tiles.set(pos, DemoTile::Path);
        }
        self.tiles.set(self.start, DemoTile::Start);
        self.tiles.set(self.end, DemoTile::End);
        path.len()
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        for (pos, tile) in self.tiles.iter() {
            if let Some(tile) = tile {
                canvas.draw(tile.sprite_index(), pos);
            }
        }
    }
}

/// The built-in demo, solved
pub fn run() -> Result<Demo> {
    let mut demo = Demo::parse(&DEMO_MAP)?;
    let length = demo.solve();
    info!("path from {} to {} is {length} cells", demo.start, demo.end);
    Ok(demo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_demo_map() {
        let demo = Demo::parse(&DEMO_MAP).unwrap();
        assert_eq!(demo.tiles.size(), Size::new(22, 22));
        assert_eq!(demo.start, Position::new(9, 4));
        assert_eq!(demo.end, Position::new(6, 14));
        assert_eq!(demo.tiles.get(Position::new(0, 0)), Some(&DemoTile::Wall));
    }

    #[test]
    fn test_parse_requires_endpoints() {
        assert!(Demo::parse(&["#S #"]).is_err());
    }

    #[test]
    fn test_route_avoids_walls() {
        let demo = run().unwrap();
        let walls_before = Demo::parse(&DEMO_MAP).unwrap().tiles.count(|&t| t == DemoTile::Wall);

        assert_eq!(demo.tiles.count(|&t| t == DemoTile::Wall), walls_before);
        assert_eq!(demo.tiles.get(demo.start), Some(&DemoTile::Start));
        assert_eq!(demo.tiles.get(demo.end), Some(&DemoTile::End));
        assert!(demo.tiles.count(|&t| t == DemoTile::Path) > 0);
    }

    #[test]
    fn test_short_route_is_straight() {
        let mut demo = Demo::parse(&["#####", "#S E#", "#####"]).unwrap();
        assert_eq!(demo.solve(), 3);
        assert_eq!(demo.tiles.get(Position::new(2, 1)), Some(&DemoTile::Path));
    }

    #[test]
    fn test_demo_fallbacks() {
        assert_eq!(demo_fallback(1357).map(|f| f.glyph), Some('#'));
        assert_eq!(demo_fallback(1052).map(|f| f.glyph), Some('E'));
        assert_eq!(demo_fallback(0), None);
    }
}
