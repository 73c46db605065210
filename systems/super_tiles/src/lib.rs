#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure super tile rules.
//!
//! Two questions are answered here: which super tile a destroyed group leaves
//! behind, and which cells a detonating super tile clears. Both are evaluated
//! against immutable inputs so the world can call them mid-cascade.

use rand::Rng;
use tile_blast_core::{GridView, Position, SpecialKind};

const LINE_CLEAR_THRESHOLD: usize = 4;
const BLAST_THRESHOLD: usize = 6;
const BLAST_MAX_THRESHOLD: usize = 8;
const BLAST_RADIUS: u32 = 1;

/// Chooses the super tile left behind by an ordinary match of `group_size` tiles.
///
/// Groups of four or five pick a row or column clear with equal odds, which is
/// the only draw taken from `rng`.
pub fn spawn_kind<R>(group_size: usize, rng: &mut R) -> Option<SpecialKind>
where
    R: Rng + ?Sized,
{
    if group_size >= BLAST_MAX_THRESHOLD {
        Some(SpecialKind::BlastMax)
    } else if group_size >= BLAST_THRESHOLD {
        Some(SpecialKind::Blast)
    } else if group_size >= LINE_CLEAR_THRESHOLD {
        if rng.gen_bool(0.5) {
            Some(SpecialKind::RowClear)
        } else {
            Some(SpecialKind::ColumnClear)
        }
    } else {
        None
    }
}

/// Cells cleared when the super tile at `position` detonates.
///
/// Only occupied cells count. The trigger cell is always part of the result,
/// exactly once, and no cell is listed twice.
#[must_use]
pub fn detonation_footprint(
    grid: GridView<'_>,
    position: Position,
    kind: SpecialKind,
) -> Vec<Position> {
    let mut cells: Vec<Position> = match kind {
        SpecialKind::RowClear => grid.occupied_in_row(position.y()).collect(),
        SpecialKind::ColumnClear => grid.occupied_in_column(position.x()).collect(),
        SpecialKind::Blast => grid
            .size()
            .square_around(position, BLAST_RADIUS)
            .into_iter()
            .filter(|cell| grid.is_occupied(*cell))
            .collect(),
        SpecialKind::BlastMax => {
            let mut cells: Vec<Position> = grid.occupied_in_row(position.y()).collect();
            for cell in grid.occupied_in_column(position.x()) {
                if !cells.contains(&cell) {
                    cells.push(cell);
                }
            }
            cells
        }
    };

    if !cells.contains(&position) {
        cells.push(position);
    }
    cells
}
