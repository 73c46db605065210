use std::fmt::Write as _;

use tile_blast_core::{BoosterKind, GridView, Position};
use tile_blast_system_boosters::Boosters;
use tile_blast_system_progress::{Outcome, Progress};

const EMPTY_GLYPH: char = '.';

/// Draws the field with column indices above and row indices on the left.
pub(crate) fn grid(view: GridView<'_>) -> String {
    let size = view.size();
    let mut out = String::from("   ");
    for x in 0..size.columns() {
        let _ = write!(out, "{}", x % 10);
    }
    out.push('\n');

    for y in 0..size.rows() {
        let _ = write!(out, "{y:>2} ");
        for x in 0..size.columns() {
            let glyph = view
                .kind_at(Position::new(x, y))
                .map_or(EMPTY_GLYPH, |kind| kind.glyph());
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// Summarises score, moves and booster charges on a single line.
pub(crate) fn status(progress: &Progress, boosters: &Boosters) -> String {
    let mut out = format!(
        "score {}/{}  moves {}  shuffles {}",
        progress.score(),
        progress.target_score(),
        progress.moves(),
        progress.shuffles_left(),
    );
    for kind in BoosterKind::ALL {
        let charge = boosters.inventory().charge(kind);
        let marker = if boosters.armed() == Some(kind) { "*" } else { "" };
        let _ = write!(
            out,
            "  {}{marker} {}",
            booster_label(kind),
            charge.remaining_uses
        );
    }
    match progress.outcome() {
        Outcome::Playing => {}
        Outcome::Won => out.push_str("  [won, type `new` to play again]"),
        Outcome::Lost => out.push_str("  [lost, type `new` to play again]"),
    }
    out
}

fn booster_label(kind: BoosterKind) -> &'static str {
    match kind {
        BoosterKind::Bomb => "bomb",
        BoosterKind::Teleport => "teleport",
    }
}
