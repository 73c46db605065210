#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Gameplay router that turns player requests into world commands.
//!
//! Clicks reach the booster state machine while a booster is armed. Otherwise a
//! super tile detonates and a basic tile starts group matching. Every path ends
//! in the staged cascade commands the world understands.

use tile_blast_core::{
    BoosterKind, Command, DestructionOrigin, Event, GameConfig, GridView, Position,
};
use tile_blast_system_boosters::{ActivationError, Boosters};
use tile_blast_system_connectivity::{is_eligible, Connectivity};

/// Inbound requests issued by adapters on behalf of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    /// The player clicked a cell.
    TileClicked {
        /// Cell that was clicked.
        position: Position,
    },
    /// The player wants to arm a booster.
    ActivateBooster {
        /// Booster to arm.
        kind: BoosterKind,
    },
    /// The player cancelled the armed booster.
    CancelBooster,
    /// The player asked for a fresh playthrough.
    NewGame {
        /// Configuration for the playthrough.
        config: GameConfig,
    },
    /// The player asked to regenerate the field.
    Shuffle,
}

/// Routes requests to the booster system, the connectivity resolver or super tiles.
#[derive(Debug, Default)]
pub struct Gameplay {
    boosters: Boosters,
    connectivity: Connectivity,
    group: Vec<Position>,
}

impl Gameplay {
    /// Creates a router holding default booster charges.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a router around an explicitly configured booster system.
    #[must_use]
    pub fn with_boosters(boosters: Boosters) -> Self {
        Self {
            boosters,
            ..Self::default()
        }
    }

    /// Read-only access to the booster state machine.
    #[must_use]
    pub fn boosters(&self) -> &Boosters {
        &self.boosters
    }

    /// Translates one request into world commands.
    ///
    /// Only booster activation can fail; every other invalid request is ignored.
    pub fn handle_request(
        &mut self,
        request: Request,
        grid: GridView<'_>,
        out_commands: &mut Vec<Command>,
        out_events: &mut Vec<Event>,
    ) -> Result<(), ActivationError> {
        match request {
            Request::TileClicked { position } => {
                self.click(position, grid, out_commands, out_events);
            }
            Request::ActivateBooster { kind } => self.boosters.activate(kind, out_events)?,
            Request::CancelBooster => self.boosters.deactivate(out_events),
            Request::NewGame { config } => out_commands.push(Command::NewGame { config }),
            Request::Shuffle => out_commands.push(Command::Shuffle),
        }
        Ok(())
    }

    /// Consumes world events so owned systems stay in sync.
    pub fn handle_events(&mut self, events: &[Event], out_events: &mut Vec<Event>) {
        self.boosters.handle(events, out_events);
    }

    fn click(
        &mut self,
        position: Position,
        grid: GridView<'_>,
        out_commands: &mut Vec<Command>,
        out_events: &mut Vec<Event>,
    ) {
        let tile = grid.tile(position);
        if tile.is_some_and(|tile| !tile.is_interactive()) {
            return;
        }

        if self.boosters.is_armed() {
            self.boosters
                .select_target(position, grid, out_commands, out_events);
            return;
        }

        let Some(tile) = tile else {
            return;
        };
        if tile.kind().is_special() {
            out_commands.extend(Command::staged_detonation(position));
            return;
        }

        self.connectivity.group_at(grid, position, &mut self.group);
        if is_eligible(&self.group) {
            out_commands.extend(Command::staged_cascade(
                self.group.clone(),
                DestructionOrigin::Match,
            ));
        }
    }
}
