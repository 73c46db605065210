//! Cascade phases: burn, gravity, refill and settle.
//!
//! Each phase observes the grid exactly as the previous phase left it. The
//! orchestrator never re-runs group detection after a refill, so matches that
//! appear by chance wait for the next player action.

use rand::Rng;
use tile_blast_core::{
    BasicColor, DestructionOrigin, Event, Position, SpawnedTile, Tile, TileKind, TileState,
};
use tile_blast_system_super_tiles::{detonation_footprint, spawn_kind};

use crate::World;

impl<R: Rng> World<R> {
    /// Marks the listed tiles burning, removes them and applies the spawn rule.
    ///
    /// Returns the number of tiles that were actually destroyed.
    pub(crate) fn burn(
        &mut self,
        positions: &[Position],
        origin: DestructionOrigin,
        out_events: &mut Vec<Event>,
    ) -> usize {
        for position in positions {
            if let Some(tile) = self.grid.get_mut(*position) {
                tile.set_state(TileState::Burning);
            }
        }

        let mut destroyed = Vec::with_capacity(positions.len());
        for position in positions {
            if self.grid.clear(*position).is_some() {
                destroyed.push(*position);
            }
        }

        let Some(anchor) = destroyed.first().copied() else {
            return 0;
        };
        let count = destroyed.len();
        out_events.push(Event::TilesDestroyed {
            positions: destroyed,
            origin,
        });

        if origin.spawns_super_tiles() {
            if let Some(kind) = spawn_kind(count, &mut self.rng) {
                let tile = Tile::new(self.allocate_tile_id(), TileKind::Special(kind), anchor);
                self.grid.set(anchor, tile);
                out_events.push(Event::SuperTileSpawned {
                    tile: tile.id(),
                    position: anchor,
                    kind,
                });
            }
            out_events.push(Event::MoveConsumed);
        }

        count
    }

    /// Compacts every column toward the last row, keeping relative order.
    pub(crate) fn apply_gravity(&mut self, out_events: &mut Vec<Event>) {
        let size = self.grid.size();
        for x in 0..size.columns() {
            let mut landing_row = size.rows();
            for y in (0..size.rows()).rev() {
                let from = Position::new(x, y);
                let Some(mut tile) = self.grid.clear(from) else {
                    continue;
                };
                landing_row -= 1;
                let to = Position::new(x, landing_row);
                if to != from {
                    tile.set_state(TileState::Falling);
                    out_events.push(Event::TileMoved {
                        tile: tile.id(),
                        from,
                        to,
                    });
                }
                self.grid.set(to, tile);
            }
        }
    }

    /// Deals a random basic tile into every empty cell.
    pub(crate) fn refill(&mut self, out_events: &mut Vec<Event>) {
        let empty = self.grid.empty_positions();
        if empty.is_empty() {
            return;
        }

        let tiles = empty
            .into_iter()
            .map(|position| self.spawn_basic(position, TileState::Spawning))
            .collect();
        out_events.push(Event::TilesCreated { tiles });
    }

    /// Returns every tile to the resting state.
    pub(crate) fn settle(&mut self, out_events: &mut Vec<Event>) {
        for tile in self.grid.tiles_mut() {
            tile.set_state(TileState::Normal);
        }
        out_events.push(Event::CascadeSettled);
    }

    /// Runs every phase back-to-back for one destruction request.
    pub(crate) fn resolve_destruction(
        &mut self,
        positions: &[Position],
        origin: DestructionOrigin,
        out_events: &mut Vec<Event>,
    ) {
        if self.burn(positions, origin, out_events) == 0 {
            return;
        }
        self.apply_gravity(out_events);
        self.refill(out_events);
        self.settle(out_events);
    }

    /// Detonates the super tile at `position` and burns its footprint.
    ///
    /// Gravity and refill are left to the caller so detonations can be paced like
    /// any other cascade.
    pub(crate) fn trigger_super_tile(&mut self, position: Position, out_events: &mut Vec<Event>) {
        let Some(tile) = self.grid.get(position) else {
            return;
        };
        let Some(kind) = tile.kind().special() else {
            return;
        };
        if tile.state() == TileState::Burning {
            return;
        }

        let footprint = detonation_footprint(self.grid.view(), position, kind);
        if let Some(tile) = self.grid.get_mut(position) {
            tile.set_state(TileState::Burning);
        }
        out_events.push(Event::SuperTileTriggered { position, kind });
        let _ = self.burn(&footprint, DestructionOrigin::Detonation, out_events);
    }

    /// Exchanges the kinds of two distinct occupied cells.
    pub(crate) fn swap_kinds(
        &mut self,
        first: Position,
        second: Position,
        out_events: &mut Vec<Event>,
    ) {
        if first == second {
            return;
        }
        let (Some(first_kind), Some(second_kind)) = (
            self.grid.get(first).map(Tile::kind),
            self.grid.get(second).map(Tile::kind),
        ) else {
            return;
        };

        if let Some(tile) = self.grid.get_mut(first) {
            tile.set_kind(second_kind);
        }
        if let Some(tile) = self.grid.get_mut(second) {
            tile.set_kind(first_kind);
        }
        out_events.push(Event::TilesSwapped { first, second });
    }

    /// Clears the grid and deals a resting basic tile into every cell.
    pub(crate) fn deal(&mut self) -> Vec<SpawnedTile> {
        self.grid.clear_all();
        self.grid
            .size()
            .positions()
            .map(|position| self.spawn_basic(position, TileState::Normal))
            .collect()
    }

    fn spawn_basic(&mut self, position: Position, state: TileState) -> SpawnedTile {
        let color = BasicColor::ALL[self.rng.gen_range(0..BasicColor::ALL.len())];
        let kind = TileKind::Basic(color);
        let tile = Tile::new(self.allocate_tile_id(), kind, position).with_state(state);
        self.grid.set(position, tile);
        SpawnedTile {
            tile: tile.id(),
            position,
            kind,
        }
    }
}
