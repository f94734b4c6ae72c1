//! Generation diagnostics
//!
//! The generators never reach for a global logger. They report what they are
//! doing through a `Diagnostics` value handed to them by the caller.
//! `LogDiagnostics` forwards everything to the `log` facade, `NullDiagnostics`
//! drops it, and tests can plug in their own recorder.

use log::{Level, debug, log_enabled, trace};

use crate::generation::{Orientation, RoomTile};
use crate::geometry::{Position, Rect};
use crate::grid::Grid;

/// Observer for a generation run
///
/// Every method has an empty default so implementors only override what
/// they care about.
pub trait Diagnostics {
    /// A room passed validation and expansion and is about to be carved.
    /// `tiles` is the grid as it was when the room was accepted.
    fn room_accepted(&mut self, _room: Rect, _tiles: &Grid<RoomTile>) {}

    /// A hallway strip survived clipping and was queued for carving
    fn hallway_planned(&mut self, _hallway: Rect, _orientation: Orientation) {}

    /// Room sampling ran out of valid candidates
    fn placement_exhausted(&mut self, _rooms_placed: usize) {}

    /// Connected components were labeled
    fn components_labeled(&mut self, _count: usize, _labels: &Grid<usize>) {}

    /// Two components were joined by carving `path`
    fn components_joined(&mut self, _from: usize, _to: usize, _path: &[Position]) {}
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {}

/// Forwards events to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn room_accepted(&mut self, room: Rect, _tiles: &Grid<RoomTile>) {
        debug!("carving room {room}");
    }

    fn hallway_planned(&mut self, hallway: Rect, orientation: Orientation) {
        trace!("planned {orientation} hallway {hallway}");
    }

    fn placement_exhausted(&mut self, rooms_placed: usize) {
        debug!("room placement exhausted after {rooms_placed} rooms");
    }

    fn components_labeled(&mut self, count: usize, labels: &Grid<usize>) {
        debug!("{count} connected components");
        if log_enabled!(Level::Trace) {
            for row in render_labels(labels) {
                trace!("{row}");
            }
        }
    }

    fn components_joined(&mut self, from: usize, to: usize, path: &[Position]) {
        debug!("connecting component {from} to {to} ({} tiles)", path.len());
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn room_accepted(&mut self, room: Rect, tiles: &Grid<RoomTile>) {
        (**self).room_accepted(room, tiles);
    }

    fn hallway_planned(&mut self, hallway: Rect, orientation: Orientation) {
        (**self).hallway_planned(hallway, orientation);
    }

    fn placement_exhausted(&mut self, rooms_placed: usize) {
        (**self).placement_exhausted(rooms_placed);
    }

    fn components_labeled(&mut self, count: usize, labels: &Grid<usize>) {
        (**self).components_labeled(count, labels);
    }

    fn components_joined(&mut self, from: usize, to: usize, path: &[Position]) {
        (**self).components_joined(from, to, path);
    }
}

/// One string per row of a label grid
///
/// Ids are printed as base-36 digits, `+` for ids that do not fit in one
/// digit, `.` for unlabeled cells.
pub fn render_labels(labels: &Grid<usize>) -> Vec<String> {
    (0..labels.height())
        .map(|y| {
            (0..labels.width())
                .map(|x| match labels.get(Position::new(x, y)) {
                    None => '.',
                    Some(&id) => char::from_digit(id as u32, 36).filter(|_| id < 36).unwrap_or('+'),
                })
                .collect()
        })
        .collect()
}
