#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Connectivity resolver that finds groups of same-coloured tiles.

use std::collections::VecDeque;

use tile_blast_core::{BasicColor, GridView, Position, MIN_GROUP_SIZE};

/// Flood-fill resolver with reusable scratch buffers.
#[derive(Debug, Default)]
pub struct Connectivity {
    visited: Vec<bool>,
    frontier: VecDeque<Position>,
}

impl Connectivity {
    /// Creates a resolver with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the maximal 4-connected group of basic tiles sharing the colour at `start`.
    ///
    /// `out` is cleared first. The start cell is listed first; the rest follow
    /// breadth-first. Empty cells, out-of-range cells and super tiles yield an
    /// empty group.
    pub fn group_at(&mut self, grid: GridView<'_>, start: Position, out: &mut Vec<Position>) {
        out.clear();
        self.frontier.clear();

        let Some(color) = grid.kind_at(start).and_then(|kind| kind.basic()) else {
            return;
        };
        let size = grid.size();
        let Some(start_index) = size.index(start) else {
            return;
        };

        self.visited.clear();
        self.visited.resize(size.cell_count(), false);
        self.visited[start_index] = true;
        self.frontier.push_back(start);

        while let Some(cell) = self.frontier.pop_front() {
            out.push(cell);
            for neighbor in neighbors(cell) {
                let Some(index) = size.index(neighbor) else {
                    continue;
                };
                if self.visited[index] || !holds_color(grid, neighbor, color) {
                    continue;
                }
                self.visited[index] = true;
                self.frontier.push_back(neighbor);
            }
        }
    }
}

/// Reports whether a group is large enough to burn.
#[must_use]
pub fn is_eligible(group: &[Position]) -> bool {
    group.len() >= MIN_GROUP_SIZE
}

fn holds_color(grid: GridView<'_>, cell: Position, color: BasicColor) -> bool {
    grid.kind_at(cell).and_then(|kind| kind.basic()) == Some(color)
}

fn neighbors(cell: Position) -> impl Iterator<Item = Position> {
    let up = cell.y().checked_sub(1).map(|y| Position::new(cell.x(), y));
    let down = cell.y().checked_add(1).map(|y| Position::new(cell.x(), y));
    let left = cell.x().checked_sub(1).map(|x| Position::new(x, cell.y()));
    let right = cell.x().checked_add(1).map(|x| Position::new(x, cell.y()));
    [up, down, left, right].into_iter().flatten()
}
