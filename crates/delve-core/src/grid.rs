//! Fixed-size 2D grid of optional cells
//!
//! A `Grid<T>` stores `Option<T>` per cell in a flat row-major vector. Every
//! accessor is bounds-checked: reads outside the grid return `None` and writes
//! outside the grid are ignored, so geometry code can probe speculative
//! positions without branching.
//!
//! The grid also carries the two searches the generators are built on:
//! breadth-first search and a uniform-cost shortest path (A* with an optional
//! heuristic).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use strum::{Display, EnumIter};

use crate::geometry::{Position, Rect, Size};

const FOUR_WAY: [Position; 4] = [
    Position::new(-1, 0),
    Position::new(1, 0),
    Position::new(0, -1),
    Position::new(0, 1),
];

const EIGHT_WAY: [Position; 8] = [
    Position::new(-1, 0),
    Position::new(1, 0),
    Position::new(0, -1),
    Position::new(0, 1),
    Position::new(-1, -1),
    Position::new(1, -1),
    Position::new(-1, 1),
    Position::new(1, 1),
];

/// Which cells count as neighbors during a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Neighborhood {
    /// West, east, north, south
    FourWay,
    /// The four cardinals followed by the four diagonals
    EightWay,
}

impl Neighborhood {
    /// Neighbor offsets in expansion order
    pub fn offsets(self) -> &'static [Position] {
        match self {
            Neighborhood::FourWay => &FOUR_WAY,
            Neighborhood::EightWay => &EIGHT_WAY,
        }
    }
}

/// Returned by a BFS visitor to keep going or stop the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Continue,
    Cancel,
}

/// Fixed-size 2D container of optional values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    size: Size,
    cells: Vec<Option<T>>,
}

impl<T> Grid<T> {
    /// Create a grid with every cell empty
    pub fn new(size: Size) -> Self {
        let size = Size::new(size.width.max(0), size.height.max(0));
        Self {
            size,
            cells: (0..size.area()).map(|_| None).collect(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    /// Rectangle covering the whole grid
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.size.width && pos.y < self.size.height
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some((pos.y * self.size.width + pos.x) as usize)
        } else {
            None
        }
    }

    /// Value stored at `pos`, or `None` when unset or out of bounds
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.index(pos).and_then(|i| self.cells[i].as_ref())
    }

    /// Store a value; ignored out of bounds
    pub fn set(&mut self, pos: Position, value: T) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = Some(value);
        }
    }

    /// Clear a cell, returning what it held
    pub fn remove(&mut self, pos: Position) -> Option<T> {
        self.index(pos).and_then(|i| self.cells[i].take())
    }

    /// Clear every cell of `rect` that lies on the grid
    pub fn remove_rect(&mut self, rect: Rect) {
        for pos in rect.positions() {
            self.remove(pos);
        }
    }

    /// Every position of the grid in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<T> {
        self.bounds().positions()
    }

    /// Every cell with its position, in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, Option<&T>)> + '_ {
        self.positions().zip(self.cells.iter().map(Option::as_ref))
    }

    /// Number of populated cells matching `pred`
    pub fn count<F>(&self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.cells.iter().flatten().filter(|value| pred(value)).count()
    }

    /// Build a same-sized grid by transforming every populated cell
    ///
    /// Cells for which `f` returns `None` stay empty in the result.
    pub fn filter_map<U, F>(&self, mut f: F) -> Grid<U>
    where
        F: FnMut(&T) -> Option<U>,
    {
        Grid {
            size: self.size,
            cells: self.cells.iter().map(|cell| cell.as_ref().and_then(&mut f)).collect(),
        }
    }

    /// Breadth-first search from `origin`
    ///
    /// Cells are discovered in FIFO order; a cell is only discovered if it is
    /// in bounds, not yet visited and not blocked. `visit` receives the cell
    /// that discovered it (none for the origin) and is called exactly once per
    /// discovered cell. Returning `SearchStatus::Cancel` stops the search
    /// immediately. A blocked or out-of-bounds origin makes this a no-op.
    pub fn breadth_first_search<B, V>(
        &self,
        origin: Position,
        neighborhood: Neighborhood,
        mut is_blocked: B,
        mut visit: V,
    ) where
        B: FnMut(Position) -> bool,
        V: FnMut(Option<Position>, Position) -> SearchStatus,
    {
        if !self.in_bounds(origin) || is_blocked(origin) {
            return;
        }

        let mut visited: Grid<()> = Grid::new(self.size);
        visited.set(origin, ());
        if visit(None, origin) == SearchStatus::Cancel {
            return;
        }

        let mut queue = VecDeque::from([origin]);
        while let Some(pos) = queue.pop_front() {
            for &offset in neighborhood.offsets() {
                let next = pos + offset;
                if !self.in_bounds(next) || visited.get(next).is_some() || is_blocked(next) {
                    continue;
                }

                visited.set(next, ());
                if visit(Some(pos), next) == SearchStatus::Cancel {
                    return;
                }
                queue.push_back(next);
            }
        }
    }

    /// Minimum-cost path from `start` to `end`, both included
    ///
    /// Uniform-cost (Dijkstra) search. `edge_cost` is only ever called with
    /// two cells that are neighbors under `neighborhood`; eight-way callers
    /// must price diagonal steps themselves. Returns an empty vector when
    /// either endpoint is off the grid or `end` cannot be reached.
    pub fn shortest_path<C>(
        &self,
        start: Position,
        end: Position,
        neighborhood: Neighborhood,
        edge_cost: C,
    ) -> Vec<Position>
    where
        C: FnMut(Position, Position) -> u32,
    {
        self.a_star(start, end, neighborhood, edge_cost, |_| 0)
    }

    /// Shortest path with a heuristic added to the frontier score
    ///
    /// The heuristic must never overestimate the remaining cost and must be
    /// consistent (settled cells are not reopened). A zero heuristic makes
    /// this plain Dijkstra.
    pub fn a_star<C, H>(
        &self,
        start: Position,
        end: Position,
        neighborhood: Neighborhood,
        mut edge_cost: C,
        mut heuristic: H,
    ) -> Vec<Position>
    where
        C: FnMut(Position, Position) -> u32,
        H: FnMut(Position) -> u32,
    {
        if !self.in_bounds(start) || !self.in_bounds(end) {
            return Vec::new();
        }

        // Absent distance means "infinitely far" so far.
        let mut distances: Grid<u32> = Grid::new(self.size);
        let mut predecessors: Grid<Position> = Grid::new(self.size);
        let mut settled: Grid<()> = Grid::new(self.size);
        let mut frontier = BinaryHeap::new();

        distances.set(start, 0);
        frontier.push(FrontierNode {
            score: heuristic(start),
            distance: 0,
            pos: start,
        });

        while let Some(FrontierNode { distance, pos, .. }) = frontier.pop() {
            if settled.get(pos).is_some() {
                continue;
            }
            settled.set(pos, ());

            if pos == end {
                return reconstruct_path(&predecessors, start, end);
            }

            for &offset in neighborhood.offsets() {
                let next = pos + offset;
                if !self.in_bounds(next) || settled.get(next).is_some() {
                    continue;
                }

                let candidate = distance.saturating_add(edge_cost(pos, next));
                if distances.get(next).is_none_or(|&best| candidate < best) {
                    distances.set(next, candidate);
                    predecessors.set(next, pos);
                    frontier.push(FrontierNode {
                        score: candidate.saturating_add(heuristic(next)),
                        distance: candidate,
                        pos: next,
                    });
                }
            }
        }

        Vec::new()
    }
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`
    pub fn filled(size: Size, value: T) -> Self {
        let size = Size::new(size.width.max(0), size.height.max(0));
        Self {
            size,
            cells: vec![Some(value); size.area() as usize],
        }
    }

    /// Set every cell of `rect` that lies on the grid
    pub fn set_rect(&mut self, rect: Rect, value: T) {
        for pos in rect.positions() {
            self.set(pos, value.clone());
        }
    }
}

/// Manhattan distance to `target`, an admissible heuristic for unit-cost
/// four-way searches
pub fn manhattan(target: Position) -> impl Fn(Position) -> u32 {
    move |pos| pos.manhattan(target)
}

/// Frontier entry, ordered so `BinaryHeap` pops the lowest score first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierNode {
    score: u32,
    distance: u32,
    pos: Position,
}

impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behavior; row-major position breaks ties so
        // the search order never depends on heap internals.
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.distance.cmp(&self.distance))
            .then_with(|| (other.pos.y, other.pos.x).cmp(&(self.pos.y, self.pos.x)))
    }
}

impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Follow the predecessor chain from `end` back to `start`
fn reconstruct_path(predecessors: &Grid<Position>, start: Position, end: Position) -> Vec<Position> {
    let mut path = vec![end];
    let mut current = end;

    while current != start {
        match predecessors.get(current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }

    path.reverse();
    path
}
