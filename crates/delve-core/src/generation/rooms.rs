//! Room and hallway placement
//!
//! Rooms are found by rejection sampling: random rectangles are drawn until
//! one is valid (inside the border, big enough, small enough, and with a
//! clear margin of rock around it). Each accepted room is grown greedily,
//! carved, and gets a hallway strip planned along each side. Hallways are
//! carved once no more rooms fit, and the connector then joins whatever is
//! still disconnected.

use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::error::Result;
use crate::geometry::{Rect, Size};
use crate::grid::Grid;
use crate::rng::GameRng;

use super::connector::{ComponentConnector, ConnectReport};
use super::{LevelGenerator, Orientation, RoomTile};

/// A finished level with the geometry that produced it
#[derive(Debug, Clone)]
pub struct Layout {
    pub tiles: Grid<RoomTile>,
    /// Rooms in placement order, after expansion
    pub rooms: Vec<Rect>,
    pub horizontal_hallways: Vec<Rect>,
    pub vertical_hallways: Vec<Rect>,
    pub connection: ConnectReport,
}

/// Check whether `rect` may be carved as a room on `tiles`
///
/// A room must stay off the one-tile border, have at least
/// `min_room_area` cells, be at least `min_room_side` wide or tall, take no
/// more than `max_room_fraction` of the grid, and have nothing but rock
/// within `room_spacing` tiles of it.
pub fn is_valid_room(tiles: &Grid<RoomTile>, rect: Rect, config: &GeneratorConfig) -> bool {
    if rect.x <= 0
        || rect.y <= 0
        || rect.right() >= tiles.width() - 1
        || rect.bottom() >= tiles.height() - 1
    {
        return false;
    }

    let area = rect.area();
    if area < config.min_room_area {
        return false;
    }

    if rect.w < config.min_room_side && rect.h < config.min_room_side {
        return false;
    }

    let total_area = tiles.size().area();
    if area as f32 / total_area as f32 > config.max_room_fraction {
        return false;
    }

    rect.expand(config.room_spacing)
        .clamp(tiles.bounds())
        .positions()
        .all(|pos| tiles.get(pos) == Some(&RoomTile::Wall))
}

/// One-tile growth steps, applied in this order: right, left, down, up
const GROWTH: [fn(Rect) -> Rect; 4] = [
    |r| Rect::new(r.x, r.y, r.w + 1, r.h),
    |r| Rect::new(r.x - 1, r.y, r.w + 1, r.h),
    |r| Rect::new(r.x, r.y, r.w, r.h + 1),
    |r| Rect::new(r.x, r.y - 1, r.w, r.h + 1),
];

/// Rooms-and-hallways level generator
#[derive(Debug, Clone)]
pub struct RoomLayoutGenerator<D = LogDiagnostics> {
    tiles: Grid<RoomTile>,
    rng: GameRng,
    config: GeneratorConfig,
    diagnostics: D,
    horizontal_hallways: Vec<Rect>,
    vertical_hallways: Vec<Rect>,
}

impl RoomLayoutGenerator<LogDiagnostics> {
    /// Generator seeded from OS entropy
    pub fn new(size: Size) -> Self {
        Self::with_rng(size, GameRng::from_entropy())
    }

    /// Generator with a fixed seed, for reproducible layouts
    pub fn with_seed(size: Size, seed: u64) -> Self {
        Self::with_rng(size, GameRng::new(seed))
    }

    pub fn with_rng(size: Size, rng: GameRng) -> Self {
        Self {
            tiles: Grid::filled(size, RoomTile::Wall),
            rng,
            config: GeneratorConfig::default(),
            diagnostics: LogDiagnostics,
            horizontal_hallways: Vec::new(),
            vertical_hallways: Vec::new(),
        }
    }
}

impl<D: Diagnostics> RoomLayoutGenerator<D> {
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap the diagnostics sink
    pub fn with_diagnostics<E: Diagnostics>(self, diagnostics: E) -> RoomLayoutGenerator<E> {
        RoomLayoutGenerator {
            tiles: self.tiles,
            rng: self.rng,
            config: self.config,
            diagnostics,
            horizontal_hallways: self.horizontal_hallways,
            vertical_hallways: self.vertical_hallways,
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Working grid
    pub fn tiles(&self) -> &Grid<RoomTile> {
        &self.tiles
    }

    pub fn is_valid(&self, rect: Rect) -> bool {
        is_valid_room(&self.tiles, rect, &self.config)
    }

    /// Draw random rectangles until one is a valid room
    pub fn sample_room_bounds(&mut self) -> Option<Rect> {
        let x_upper = self.tiles.width() - 1;
        let y_upper = self.tiles.height() - 1;
        if x_upper < 1 || y_upper < 1 {
            return None;
        }

        for _ in 0..self.config.max_placement_attempts {
            let (x1, x2) = ordered(self.rng.between(1, x_upper), self.rng.between(1, x_upper));
            let (y1, y2) = ordered(self.rng.between(1, y_upper), self.rng.between(1, y_upper));

            let rect = Rect::new(x1, y1, x2 - x1, y2 - y1);
            if self.is_valid(rect) {
                return Some(rect);
            }
        }

        None
    }

    /// Grow a valid room one tile at a time in each direction while it stays
    /// valid
    pub fn expand_room(&self, room: Rect) -> Rect {
        let mut expanded = room;

        for grow in GROWTH {
            for _ in 0..self.config.max_expansion {
                let candidate = grow(expanded);
                if !self.is_valid(candidate) {
                    break;
                }
                expanded = candidate;
            }
        }

        expanded
    }

    /// Queue a hallway strip alongside each side of `room`
    pub fn plan_hallways(&mut self, room: Rect) {
        let offset = self.config.hallway_offset;
        let overhang = self.config.hallway_overhang;
        let interior = self.tiles.bounds().expand(-1);

        let vertical = [
            Rect::new(room.x - offset, room.y - overhang, 1, room.h + 2 * overhang),
            Rect::new(room.right() + offset - 1, room.y - overhang, 1, room.h + 2 * overhang),
        ];
        let horizontal = [
            Rect::new(room.x - overhang, room.y - offset, room.w + 2 * overhang, 1),
            Rect::new(room.x - overhang, room.bottom() + offset - 1, room.w + 2 * overhang, 1),
        ];

        // Strips are one tile thick, so clamping either keeps the cross axis
        // or empties the strip entirely.
        for strip in vertical {
            let clipped = strip.clamp(interior);
            if !clipped.is_empty() {
                self.diagnostics.hallway_planned(clipped, Orientation::Vertical);
                self.vertical_hallways.push(clipped);
            }
        }
        for strip in horizontal {
            let clipped = strip.clamp(interior);
            if !clipped.is_empty() {
                self.diagnostics.hallway_planned(clipped, Orientation::Horizontal);
                self.horizontal_hallways.push(clipped);
            }
        }
    }

    /// Run a full generation pass
    ///
    /// The working grid is reset to solid rock first, so a generator can be
    /// run again; the RNG carries on from where the previous run left it.
    pub fn generate_layout(&mut self) -> Result<Layout> {
        self.config.validate()?;

        self.tiles = Grid::filled(self.tiles.size(), RoomTile::Wall);
        self.horizontal_hallways.clear();
        self.vertical_hallways.clear();

        let mut rooms = Vec::new();
        while let Some(candidate) = self.sample_room_bounds() {
            let room = self.expand_room(candidate);
            self.diagnostics.room_accepted(room, &self.tiles);
            self.plan_hallways(room);
            self.tiles.remove_rect(room);
            rooms.push(room);
        }
        self.diagnostics.placement_exhausted(rooms.len());

        for hallway in self.horizontal_hallways.iter().chain(&self.vertical_hallways) {
            self.tiles.remove_rect(*hallway);
        }

        let corridor_tile = self
            .config
            .tag_connector_corridors
            .then_some(RoomTile::DebugMarker);
        let connection = ComponentConnector::new([RoomTile::Wall])
            .with_corridor_tile(corridor_tile)
            .with_max_picks(self.config.max_component_picks)
            .connect(&mut self.tiles, &mut self.rng, &mut self.diagnostics)?;

        Ok(Layout {
            tiles: self.tiles.clone(),
            rooms,
            horizontal_hallways: self.horizontal_hallways.clone(),
            vertical_hallways: self.vertical_hallways.clone(),
            connection,
        })
    }
}

impl<D: Diagnostics> LevelGenerator for RoomLayoutGenerator<D> {
    fn generate(&mut self) -> Result<Grid<RoomTile>> {
        self.generate_layout().map(|layout| layout.tiles)
    }
}

fn ordered(a: i32, b: i32) -> (i32, i32) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullDiagnostics;
    use crate::geometry::Position;

    fn generator(width: i32, height: i32, seed: u64) -> RoomLayoutGenerator<NullDiagnostics> {
        RoomLayoutGenerator::with_seed(Size::new(width, height), seed).with_diagnostics(NullDiagnostics)
    }

    #[test]
    fn test_border_rule() {
        let tiles = Grid::filled(Size::new(20, 20), RoomTile::Wall);
        let config = GeneratorConfig::default();

        assert!(is_valid_room(&tiles, Rect::new(4, 4, 3, 3), &config));
        assert!(!is_valid_room(&tiles, Rect::new(0, 4, 3, 3), &config));
        assert!(!is_valid_room(&tiles, Rect::new(4, 0, 3, 3), &config));
        // Right and bottom edges must stay clear of the last two columns/rows
        assert!(is_valid_room(&tiles, Rect::new(15, 4, 3, 3), &config));
        assert!(!is_valid_room(&tiles, Rect::new(16, 4, 3, 3), &config));
        assert!(!is_valid_room(&tiles, Rect::new(4, 16, 3, 3), &config));
    }

    #[test]
    fn test_size_rules() {
        let tiles = Grid::filled(Size::new(20, 20), RoomTile::Wall);
        let config = GeneratorConfig::default();

        // area below 6
        assert!(!is_valid_room(&tiles, Rect::new(5, 5, 2, 2), &config));
        // one side of 3 is enough
        assert!(is_valid_room(&tiles, Rect::new(5, 5, 2, 3), &config));
        // 12.5% of 400 is 50
        assert!(is_valid_room(&tiles, Rect::new(3, 3, 10, 5), &config));
        assert!(!is_valid_room(&tiles, Rect::new(2, 2, 13, 4), &config));
        // degenerate
        assert!(!is_valid_room(&tiles, Rect::new(5, 5, 0, 9), &config));
    }

    #[test]
    fn test_spacing_rule() {
        let mut tiles = Grid::filled(Size::new(30, 30), RoomTile::Wall);
        let config = GeneratorConfig::default();
        tiles.remove(Position::new(10, 10));

        // Exclusion zone reaches three tiles out
        assert!(!is_valid_room(&tiles, Rect::new(12, 12, 3, 3), &config));
        assert!(!is_valid_room(&tiles, Rect::new(13, 5, 3, 3), &config));
        assert!(is_valid_room(&tiles, Rect::new(14, 5, 3, 3), &config));

        tiles.set(Position::new(10, 10), RoomTile::DebugMarker);
        assert!(!is_valid_room(&tiles, Rect::new(12, 12, 3, 3), &config));
    }

    #[test]
    fn test_expand_room_stays_valid() {
        let rooms = generator(40, 40, 1);
        let room = Rect::new(10, 10, 3, 3);
        let expanded = rooms.expand_room(room);

        assert!(rooms.is_valid(expanded));
        assert!(expanded.x <= room.x && expanded.y <= room.y);
        assert!(expanded.right() >= room.right() && expanded.bottom() >= room.bottom());
        assert!(expanded.w <= room.w + 2 * 15 && expanded.h <= room.h + 2 * 15);
        assert!(expanded.area() > room.area());
    }

    #[test]
    fn test_expand_room_respects_cap() {
        let config = GeneratorConfig {
            max_expansion: 1,
            ..Default::default()
        };
        let rooms = generator(60, 60, 1).with_config(config);
        let expanded = rooms.expand_room(Rect::new(20, 20, 3, 3));
        assert_eq!(expanded, Rect::new(19, 19, 5, 5));
    }

    #[test]
    fn test_plan_hallways_geometry() {
        let mut rooms = generator(30, 30, 1);
        rooms.plan_hallways(Rect::new(10, 10, 4, 3));

        assert_eq!(
            rooms.vertical_hallways,
            vec![Rect::new(8, 8, 1, 7), Rect::new(15, 8, 1, 7)]
        );
        assert_eq!(
            rooms.horizontal_hallways,
            vec![Rect::new(8, 8, 8, 1), Rect::new(8, 14, 8, 1)]
        );
    }

    #[test]
    fn test_plan_hallways_clips_to_interior() {
        let mut rooms = generator(12, 12, 1);
        rooms.plan_hallways(Rect::new(2, 2, 4, 4));

        // The left strip would sit on column 0 and the top strip on row 0
        assert_eq!(rooms.vertical_hallways, vec![Rect::new(7, 1, 1, 7)]);
        assert_eq!(rooms.horizontal_hallways, vec![Rect::new(1, 7, 7, 1)]);
    }

    #[test]
    fn test_sample_on_tiny_grid_gives_up() {
        let mut tiny = generator(4, 4, 9);
        assert_eq!(tiny.sample_room_bounds(), None);

        let mut degenerate = generator(1, 1, 9);
        assert_eq!(degenerate.sample_room_bounds(), None);
    }

    #[test]
    fn test_generate_tiny_grid_has_no_rooms() {
        let layout = generator(4, 4, 3).generate_layout().unwrap();
        assert!(layout.rooms.is_empty());
        assert_eq!(layout.tiles.count(|&t| t == RoomTile::Wall), 16);
        assert_eq!(layout.connection.components_found, 0);
    }

    #[test]
    fn test_generate_places_rooms() {
        let layout = generator(40, 30, 5).generate_layout().unwrap();
        assert!(!layout.rooms.is_empty());
        for room in &layout.rooms {
            assert!(room.positions().all(|p| layout.tiles.get(p).is_none()));
        }
    }

    #[test]
    fn test_generate_rejects_invalid_config() {
        let config = GeneratorConfig {
            max_component_picks: 0,
            ..Default::default()
        };
        let result = generator(20, 20, 1).with_config(config).generate_layout();
        assert!(result.is_err());
    }

    #[test]
    fn test_untagged_corridors_leave_no_markers() {
        let config = GeneratorConfig {
            tag_connector_corridors: false,
            ..Default::default()
        };
        for seed in 0..10 {
            let layout = generator(30, 30, seed).with_config(config.clone()).generate_layout().unwrap();
            assert_eq!(layout.tiles.count(|&t| t == RoomTile::DebugMarker), 0);
        }
    }
}
