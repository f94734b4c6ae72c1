use delve_core::{ComponentConnector, Grid, Neighborhood, Position, SearchStatus, Size};
use proptest::prelude::*;

fn size_strategy() -> impl Strategy<Value = Size> {
    (1..24i32, 1..24i32).prop_map(|(w, h)| Size::new(w, h))
}

proptest! {
    #[test]
    fn test_out_of_bounds_access_is_inert(size in size_strategy(), x in -40..40i32, y in -40..40i32) {
        let mut grid: Grid<u8> = Grid::filled(size, 1);
        let pos = Position::new(x, y);
        prop_assume!(!grid.in_bounds(pos));

        let before = grid.clone();
        prop_assert_eq!(grid.get(pos), None);
        grid.set(pos, 9);
        prop_assert_eq!(grid.remove(pos), None);
        prop_assert_eq!(grid, before);
    }

    #[test]
    fn test_set_get_remove_round_trip(size in size_strategy(), x in 0..24i32, y in 0..24i32, value in any::<u32>()) {
        let mut grid = Grid::new(size);
        let pos = Position::new(x % size.width, y % size.height);

        grid.set(pos, value);
        prop_assert_eq!(grid.get(pos), Some(&value));
        prop_assert_eq!(grid.remove(pos), Some(value));
        prop_assert_eq!(grid.get(pos), None);
        prop_assert_eq!(grid.count(|_| true), 0);
    }

    #[test]
    fn test_bfs_visits_each_open_cell_once(size in size_strategy(), walls in prop::collection::vec((0..24i32, 0..24i32), 0..60)) {
        let mut grid = Grid::new(size);
        for (x, y) in walls {
            grid.set(Position::new(x % size.width, y % size.height), ());
        }
        let origin = Position::new(0, 0);
        prop_assume!(grid.get(origin).is_none());

        let mut seen: Grid<u32> = Grid::new(size);
        grid.breadth_first_search(
            origin,
            Neighborhood::FourWay,
            |pos| grid.get(pos).is_some(),
            |_, pos| {
                let hits = seen.get(pos).copied().unwrap_or(0);
                seen.set(pos, hits + 1);
                SearchStatus::Continue
            },
        );

        // Flood labeling gives the reachable set independently of the search
        let components = ComponentConnector::new([()]).label(&grid);
        let home = components.label_at(origin);
        prop_assert!(home.is_some());

        for pos in grid.positions() {
            let reachable = components.label_at(pos) == home;
            match seen.get(pos) {
                Some(&hits) => {
                    prop_assert_eq!(hits, 1);
                    prop_assert!(grid.get(pos).is_none());
                    prop_assert!(reachable, "visited {} outside the origin's region", pos);
                }
                None => prop_assert!(!reachable, "missed reachable cell {}", pos),
            }
        }
        prop_assert_eq!(seen.get(origin), Some(&1));
    }

    #[test]
    fn test_open_path_length_is_manhattan(size in size_strategy(), a in (0..24i32, 0..24i32), b in (0..24i32, 0..24i32)) {
        let grid: Grid<()> = Grid::new(size);
        let start = Position::new(a.0 % size.width, a.1 % size.height);
        let end = Position::new(b.0 % size.width, b.1 % size.height);

        let path = grid.shortest_path(start, end, Neighborhood::FourWay, |_, _| 1);
        prop_assert_eq!(path.len() as u32, start.manhattan(end) + 1);
        prop_assert_eq!(path.first(), Some(&start));
        prop_assert_eq!(path.last(), Some(&end));
        for step in path.windows(2) {
            prop_assert_eq!(step[0].manhattan(step[1]), 1);
        }
    }
}
