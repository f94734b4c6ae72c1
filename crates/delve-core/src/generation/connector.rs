//! Connectivity repair
//!
//! Labels the open regions of a grid and joins them until one region is
//! left:
//! 1. Flood-fill every open cell into a numbered component
//! 2. Pick a random non-empty component and a random cell in it
//! 3. Walk outward over the label grid to the nearest cell of another component
//! 4. Dig the cheapest path between them, where moving inside one component
//!    is free and everything else costs one
//! 5. Re-flood from the source cell so every component it now touches is
//!    folded into it

use crate::diagnostics::Diagnostics;
use crate::error::{GenerationError, Result};
use crate::geometry::Position;
use crate::grid::{Grid, Neighborhood, SearchStatus};
use crate::rng::GameRng;

/// Result of labeling a grid's open cells
///
/// Ids stay stable for the lifetime of the value: a component that gets
/// merged into another keeps its id with an empty member list.
#[derive(Debug, Clone)]
pub struct Components {
    labels: Grid<usize>,
    members: Vec<Vec<Position>>,
    live: usize,
}

impl Components {
    /// Number of components that still have members
    pub fn count(&self) -> usize {
        self.live
    }

    /// Total ids handed out, including merged components
    pub fn ids(&self) -> usize {
        self.members.len()
    }

    pub fn labels(&self) -> &Grid<usize> {
        &self.labels
    }

    pub fn label_at(&self, pos: Position) -> Option<usize> {
        self.labels.get(pos).copied()
    }

    /// Cells of a component in discovery order; empty once merged away
    pub fn members(&self, id: usize) -> &[Position] {
        self.members.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Summary of one connector run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectReport {
    /// Components found before any repair
    pub components_found: usize,
    /// Corridors dug
    pub joins: usize,
    /// Solid cells opened by those corridors
    pub carved: usize,
}

/// Joins every open region of a grid into one
#[derive(Debug, Clone)]
pub struct ComponentConnector<T> {
    solid: Vec<T>,
    corridor_tile: Option<T>,
    max_picks: usize,
}

impl<T: Clone + PartialEq> ComponentConnector<T> {
    /// Connector treating the given tiles as solid
    ///
    /// Dug cells are cleared; see `with_corridor_tile` to tag them instead.
    pub fn new(solid: impl IntoIterator<Item = T>) -> Self {
        Self {
            solid: solid.into_iter().collect(),
            corridor_tile: None,
            max_picks: 100,
        }
    }

    /// Tile written into dug cells, `None` to clear them
    pub fn with_corridor_tile(mut self, tile: Option<T>) -> Self {
        self.corridor_tile = tile;
        self
    }

    /// Random component draws before giving up
    pub fn with_max_picks(mut self, max_picks: usize) -> Self {
        self.max_picks = max_picks;
        self
    }

    fn is_solid(&self, grid: &Grid<T>, pos: Position) -> bool {
        grid.get(pos).is_some_and(|tile| self.solid.contains(tile))
    }

    /// Label every open cell with its four-way connected component
    pub fn label(&self, grid: &Grid<T>) -> Components {
        let mut components = Components {
            labels: Grid::new(grid.size()),
            members: Vec::new(),
            live: 0,
        };

        for pos in grid.positions() {
            if self.is_solid(grid, pos) || components.labels.get(pos).is_some() {
                continue;
            }

            let id = components.members.len();
            components.members.push(Vec::new());
            components.live += 1;
            self.flood(grid, &mut components, pos, id);
        }

        components
    }

    /// Flood `id` over everything reachable from `origin`
    ///
    /// Returns the ids of other components the flood ran into; they are
    /// emptied and their cells now belong to `id`.
    fn flood(&self, grid: &Grid<T>, components: &mut Components, origin: Position, id: usize) -> Vec<usize> {
        let Components { labels, members, live } = components;
        let mut reached = Vec::new();
        let mut absorbed = Vec::new();

        grid.breadth_first_search(
            origin,
            Neighborhood::FourWay,
            |pos| self.is_solid(grid, pos),
            |_, pos| {
                if let Some(previous) = labels.get(pos).copied() {
                    if previous != id && !absorbed.contains(&previous) {
                        absorbed.push(previous);
                    }
                }
                labels.set(pos, id);
                reached.push(pos);
                SearchStatus::Continue
            },
        );

        for &other in &absorbed {
            members[other].clear();
        }
        members[id] = reached;
        *live -= absorbed.len();
        absorbed
    }

    /// Draw component ids until one with members turns up
    fn pick_component(&self, components: &Components, rng: &mut GameRng) -> Result<usize> {
        for _ in 0..self.max_picks {
            let id = rng.below(components.ids());
            if !components.members(id).is_empty() {
                return Ok(id);
            }
        }

        Err(GenerationError::NoCandidateComponent {
            attempts: self.max_picks,
        })
    }

    /// Nearest cell, by hop count over the whole grid, that belongs to a
    /// different component than `source`
    fn nearest_foreign_cell(components: &Components, from: Position, source: usize) -> Option<(Position, usize)> {
        let labels = &components.labels;
        let mut found = None;

        labels.breadth_first_search(
            from,
            Neighborhood::FourWay,
            |_| false,
            |_, pos| match labels.get(pos) {
                Some(&label) if label != source => {
                    found = Some((pos, label));
                    SearchStatus::Cancel
                }
                _ => SearchStatus::Continue,
            },
        );

        found
    }

    /// Dig corridors until the open cells of `grid` form a single component
    pub fn connect<D: Diagnostics>(
        &self,
        grid: &mut Grid<T>,
        rng: &mut GameRng,
        diagnostics: &mut D,
    ) -> Result<ConnectReport> {
        if let Some(tile) = &self.corridor_tile {
            if self.solid.contains(tile) {
                return Err(GenerationError::InvalidConfig(
                    "corridor tile must not be solid".to_string(),
                ));
            }
        }

        let mut components = self.label(grid);
        let mut report = ConnectReport {
            components_found: components.count(),
            ..Default::default()
        };
        diagnostics.components_labeled(components.count(), components.labels());

        while components.count() > 1 {
            let source = self.pick_component(&components, rng)?;
            let from = rng
                .choose(components.members(source))
                .copied()
                .ok_or(GenerationError::NoCandidateComponent {
                    attempts: self.max_picks,
                })?;

            let Some((to, target)) = Self::nearest_foreign_cell(&components, from, source) else {
                return Err(GenerationError::UnreachableComponent {
                    component: source,
                    from,
                });
            };

            let labels = components.labels();
            let path = grid.shortest_path(from, to, Neighborhood::FourWay, |a, b| {
                match (labels.get(a), labels.get(b)) {
                    (Some(x), Some(y)) if x == y => 0,
                    _ => 1,
                }
            });

            for &pos in &path {
                if !self.is_solid(grid, pos) {
                    continue;
                }
                match &self.corridor_tile {
                    Some(tile) => grid.set(pos, tile.clone()),
                    None => {
                        grid.remove(pos);
                    }
                }
                report.carved += 1;
            }
            diagnostics.components_joined(source, target, &path);

            let absorbed = self.flood(grid, &mut components, from, source);
            if absorbed.is_empty() {
                return Err(GenerationError::UnreachableComponent {
                    component: source,
                    from,
                });
            }
            report.joins += 1;
        }

        Ok(report)
    }
}
