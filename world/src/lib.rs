#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Tile Blast.

mod cascade;
mod grid;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tile_blast_core::{Command, Event, GameConfig, TileId, WELCOME_BANNER};

use crate::grid::TileGrid;

const DEFAULT_SEED: u64 = 0x7ab1_e5b1_a570_0001;

/// Represents the authoritative Tile Blast world state.
///
/// The world is generic over its random source so callers can inject a fixed
/// sequence; the default is a seeded ChaCha generator.
#[derive(Debug)]
pub struct World<R = ChaCha8Rng> {
    banner: &'static str,
    config: GameConfig,
    grid: TileGrid,
    rng: R,
    next_tile_id: u32,
}

impl World<ChaCha8Rng> {
    /// Creates a world with the default configuration and seed, fully dealt.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(GameConfig::default(), DEFAULT_SEED)
    }

    /// Creates a fully dealt world whose randomness derives from `seed`.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for World<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> World<R> {
    /// Creates a fully dealt world that draws every random choice from `rng`.
    #[must_use]
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let mut world = Self {
            banner: WELCOME_BANNER,
            config,
            grid: TileGrid::new(config.field_size()),
            rng,
            next_tile_id: 0,
        };
        let _ = world.deal();
        world
    }

    fn allocate_tile_id(&mut self) -> TileId {
        let id = TileId::new(self.next_tile_id);
        self.next_tile_id = self.next_tile_id.wrapping_add(1);
        id
    }

    fn start(&mut self, config: GameConfig, out_events: &mut Vec<Event>) {
        self.config = config;
        self.grid = TileGrid::new(config.field_size());
        let tiles = self.deal();
        out_events.push(Event::GameStarted { config });
        if !tiles.is_empty() {
            out_events.push(Event::TilesCreated { tiles });
        }
    }

    fn shuffle(&mut self, out_events: &mut Vec<Event>) {
        let tiles = self.deal();
        out_events.push(Event::FieldShuffled);
        if !tiles.is_empty() {
            out_events.push(Event::TilesCreated { tiles });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply<R: Rng>(world: &mut World<R>, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::NewGame { config } => world.start(config, out_events),
        Command::Shuffle => world.shuffle(out_events),
        Command::Burn { positions, origin } => {
            let _ = world.burn(&positions, origin, out_events);
        }
        Command::ApplyGravity => world.apply_gravity(out_events),
        Command::Refill => world.refill(out_events),
        Command::Settle => world.settle(out_events),
        Command::ResolveDestruction { positions, origin } => {
            world.resolve_destruction(&positions, origin, out_events);
        }
        Command::TriggerSuperTile { position } => world.trigger_super_tile(position, out_events),
        Command::SwapKinds { first, second } => world.swap_kinds(first, second, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use tile_blast_core::{FieldSize, GameConfig, GridView, Position, Tile};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner<R>(world: &World<R>) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the active configuration.
    #[must_use]
    pub fn config<R>(world: &World<R>) -> &GameConfig {
        &world.config
    }

    /// Dimensions of the current field.
    #[must_use]
    pub fn field_size<R>(world: &World<R>) -> FieldSize {
        world.grid.size()
    }

    /// Exposes a read-only view of the tile grid.
    #[must_use]
    pub fn grid_view<R>(world: &World<R>) -> GridView<'_> {
        world.grid.view()
    }

    /// Returns a copy of the tile stored at the cell; out-of-range cells read as empty.
    #[must_use]
    pub fn tile_at<R>(world: &World<R>, position: Position) -> Option<Tile> {
        world.grid.get(position).copied()
    }
}

/// Helpers that lay out exact grids for tests and tooling.
#[cfg(any(test, feature = "grid_scaffolding"))]
pub mod scaffolding {
    use super::{grid::TileGrid, World};
    use rand::Rng;
    use tile_blast_core::{FieldSize, Position, Tile, TileKind, TileState};

    /// Replaces the field with the layout described by glyph rows.
    ///
    /// Each row is read left to right using [`TileKind::glyph`] characters; any
    /// other character leaves the cell empty. The field width is the length of
    /// the longest row and every placed tile starts in the resting state.
    pub fn load_layout<R: Rng>(world: &mut World<R>, rows: &[&str]) {
        let columns = rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0);
        let columns = u32::try_from(columns).unwrap_or(u32::MAX);
        let height = u32::try_from(rows.len()).unwrap_or(u32::MAX);

        world.config.field_width = columns;
        world.config.field_height = height;
        world.grid = TileGrid::new(FieldSize::new(columns, height));

        for (y, row) in (0..height).zip(rows) {
            for (x, glyph) in (0..columns).zip(row.chars()) {
                let Some(kind) = TileKind::from_glyph(glyph) else {
                    continue;
                };
                let position = Position::new(x, y);
                let tile = Tile::new(world.allocate_tile_id(), kind, position);
                world.grid.set(position, tile);
            }
        }
    }

    /// Overrides the lifecycle state of the tile at the cell, if any.
    pub fn set_state<R>(world: &mut World<R>, position: Position, state: TileState) {
        if let Some(tile) = world.grid.get_mut(position) {
            tile.set_state(state);
        }
    }

    /// Renders the field as glyph rows, using `.` for empty cells.
    #[must_use]
    pub fn layout<R>(world: &World<R>) -> Vec<String> {
        let size = world.grid.size();
        (0..size.rows())
            .map(|y| {
                (0..size.columns())
                    .map(|x| {
                        world
                            .grid
                            .get(Position::new(x, y))
                            .map_or('.', |tile| tile.kind().glyph())
                    })
                    .collect()
            })
            .collect()
    }
}
