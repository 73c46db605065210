#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tile Blast engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters translate player input into
//! requests for the gameplay system, systems answer with [`Command`] values
//! describing desired grid mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values that presentation
//! and bookkeeping systems react to deterministically.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Tile Blast.";

/// Minimum number of connected tiles a click must reach before the group burns.
pub const MIN_GROUP_SIZE: usize = 2;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Discards the current field and deals a fresh one for the provided configuration.
    NewGame {
        /// Configuration that governs the new playthrough.
        config: GameConfig,
    },
    /// Clears and regenerates every cell without touching scores or charges.
    Shuffle,
    /// Burns the listed tiles and removes them from the grid.
    Burn {
        /// Cells to destroy, in caller order. The first entry anchors super tile spawns.
        positions: Vec<Position>,
        /// Source of the destruction request.
        origin: DestructionOrigin,
    },
    /// Compacts every column toward the bottom row.
    ApplyGravity,
    /// Fills every empty cell with a freshly dealt basic tile.
    Refill,
    /// Returns every tile to the resting state once the cascade is presented.
    Settle,
    /// Runs burn, gravity, refill and settle back-to-back.
    ResolveDestruction {
        /// Cells to destroy, in caller order.
        positions: Vec<Position>,
        /// Source of the destruction request.
        origin: DestructionOrigin,
    },
    /// Detonates the super tile located at the provided cell.
    TriggerSuperTile {
        /// Cell holding the super tile.
        position: Position,
    },
    /// Exchanges the kinds of two tiles while both keep their identity and cell.
    SwapKinds {
        /// First selected cell.
        first: Position,
        /// Second selected cell.
        second: Position,
    },
}

impl Command {
    /// Splits one destruction request into its paced cascade phases.
    #[must_use]
    pub fn staged_cascade(positions: Vec<Position>, origin: DestructionOrigin) -> [Command; 4] {
        [
            Command::Burn { positions, origin },
            Command::ApplyGravity,
            Command::Refill,
            Command::Settle,
        ]
    }

    /// Detonates a super tile and then runs the remaining cascade phases.
    #[must_use]
    pub fn staged_detonation(position: Position) -> [Command; 4] {
        [
            Command::TriggerSuperTile { position },
            Command::ApplyGravity,
            Command::Refill,
            Command::Settle,
        ]
    }
}

/// Events broadcast by the world and systems after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a new playthrough started with a freshly dealt field.
    GameStarted {
        /// Configuration active for the playthrough.
        config: GameConfig,
    },
    /// Announces that the field was cleared and regenerated.
    FieldShuffled,
    /// Confirms that the burn phase removed the listed tiles.
    TilesDestroyed {
        /// Cells that held a tile and were emptied, in request order.
        positions: Vec<Position>,
        /// Source of the destruction request.
        origin: DestructionOrigin,
    },
    /// Confirms that a matched group left a super tile behind.
    SuperTileSpawned {
        /// Identifier assigned to the new tile.
        tile: TileId,
        /// Cell the super tile occupies.
        position: Position,
        /// Detonation behaviour of the new tile.
        kind: SpecialKind,
    },
    /// Confirms that a super tile detonated.
    SuperTileTriggered {
        /// Cell the super tile occupied.
        position: Position,
        /// Detonation behaviour that was applied.
        kind: SpecialKind,
    },
    /// Reports that gravity moved a tile to a lower cell.
    TileMoved {
        /// Identifier of the tile that fell.
        tile: TileId,
        /// Cell the tile occupied before compaction.
        from: Position,
        /// Cell the tile occupies after compaction.
        to: Position,
    },
    /// Reports tiles that entered the field from above.
    TilesCreated {
        /// Tiles dealt during the phase, in row-major order.
        tiles: Vec<SpawnedTile>,
    },
    /// Confirms that two tiles exchanged their kinds.
    TilesSwapped {
        /// First cell of the exchange.
        first: Position,
        /// Second cell of the exchange.
        second: Position,
    },
    /// Reports that every tile returned to the resting state.
    CascadeSettled,
    /// Fired once per resolved ordinary match; booster and detonation cascades do not spend moves.
    MoveConsumed,
    /// Reports the armed state and remaining charges of a booster.
    BoosterStateChanged {
        /// Booster the update refers to.
        kind: BoosterKind,
        /// Charges left after the change.
        remaining_uses: u32,
        /// Whether the booster is currently awaiting targets.
        armed: bool,
    },
    /// Reports the accumulated score.
    ScoreChanged {
        /// Score after the change.
        score: u32,
    },
    /// Reports the remaining move budget.
    MovesChanged {
        /// Moves left after the change.
        remaining: u32,
    },
    /// Reports that an exhausted move budget was refreshed by spending a shuffle.
    ShuffleGranted {
        /// Shuffle attempts left after the grant.
        shuffles_left: u32,
        /// Moves available after the grant.
        moves: u32,
    },
    /// Reports that the target score was reached.
    GameWon,
    /// Reports that moves and shuffle attempts ran out before the target score.
    GameLost,
}

/// Tile dealt into the field during a refill or a fresh deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpawnedTile {
    /// Identifier assigned to the tile.
    pub tile: TileId,
    /// Cell the tile occupies.
    pub position: Position,
    /// Kind assigned to the tile.
    pub kind: TileKind,
}

/// Source of a destruction request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DestructionOrigin {
    /// A connected group selected by the player.
    Match,
    /// The footprint of a detonated super tile.
    Detonation,
    /// The footprint of an area booster.
    Booster,
}

impl DestructionOrigin {
    /// Reports whether the destruction may leave a super tile behind.
    #[must_use]
    pub const fn spawns_super_tiles(self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Location of a single grid cell. `y` grows downward; gravity pulls toward the last row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: u32,
    y: u32,
}

impl Position {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }
}

/// Dimensions of the playing field measured in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSize {
    columns: u32,
    rows: u32,
}

impl FieldSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns in the field.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the field.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the cell lies inside the field.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x() < self.columns && position.y() < self.rows
    }

    /// Total number of cells in the field.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let count = u64::from(self.columns) * u64::from(self.rows);
        usize::try_from(count).unwrap_or(0)
    }

    /// Row-major slot index of the cell, or `None` when it lies outside the field.
    #[must_use]
    pub fn index(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        let row = usize::try_from(position.y()).ok()?;
        let column = usize::try_from(position.x()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }

    /// Every cell of the field in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |y| (0..columns).map(move |x| Position::new(x, y)))
    }

    /// Cells of the square block of the given radius around `center`, clipped to the field.
    ///
    /// Cells are listed row by row. A radius of one yields the 3×3 block used by
    /// both the blast super tile and the bomb booster.
    #[must_use]
    pub fn square_around(&self, center: Position, radius: u32) -> Vec<Position> {
        let first_row = center.y().saturating_sub(radius);
        let last_row = center.y().saturating_add(radius);
        let first_column = center.x().saturating_sub(radius);
        let last_column = center.x().saturating_add(radius);

        let mut cells = Vec::new();
        for y in first_row..=last_row {
            for x in first_column..=last_column {
                let cell = Position::new(x, y);
                if self.contains(cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }
}

/// One of the five ordinary tile colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BasicColor {
    /// Blue tile.
    Blue,
    /// Green tile.
    Green,
    /// Red tile.
    Red,
    /// Yellow tile.
    Yellow,
    /// Purple tile.
    Purple,
}

impl BasicColor {
    /// Every basic colour, in dealing order.
    pub const ALL: [BasicColor; 5] = [
        BasicColor::Blue,
        BasicColor::Green,
        BasicColor::Red,
        BasicColor::Yellow,
        BasicColor::Purple,
    ];
}

/// Detonation behaviour carried by a super tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpecialKind {
    /// Clears the tile's whole row.
    RowClear,
    /// Clears the tile's whole column.
    ColumnClear,
    /// Clears the 3×3 block centred on the tile.
    Blast,
    /// Clears the tile's row and column.
    BlastMax,
}

/// Kind of tile stored in a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileKind {
    /// Ordinary coloured tile that participates in group matching.
    Basic(BasicColor),
    /// Super tile that detonates when clicked.
    Special(SpecialKind),
}

impl TileKind {
    /// Reports whether the kind is a super tile.
    #[must_use]
    pub const fn is_special(self) -> bool {
        matches!(self, Self::Special(_))
    }

    /// Returns the colour of a basic tile.
    #[must_use]
    pub const fn basic(self) -> Option<BasicColor> {
        match self {
            Self::Basic(color) => Some(color),
            Self::Special(_) => None,
        }
    }

    /// Returns the detonation behaviour of a super tile.
    #[must_use]
    pub const fn special(self) -> Option<SpecialKind> {
        match self {
            Self::Basic(_) => None,
            Self::Special(kind) => Some(kind),
        }
    }

    /// Single-character glyph used by text layouts and the terminal adapter.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Basic(BasicColor::Blue) => 'B',
            Self::Basic(BasicColor::Green) => 'G',
            Self::Basic(BasicColor::Red) => 'R',
            Self::Basic(BasicColor::Yellow) => 'Y',
            Self::Basic(BasicColor::Purple) => 'P',
            Self::Special(SpecialKind::RowClear) => '-',
            Self::Special(SpecialKind::ColumnClear) => '|',
            Self::Special(SpecialKind::Blast) => '*',
            Self::Special(SpecialKind::BlastMax) => '+',
        }
    }

    /// Parses a glyph produced by [`TileKind::glyph`].
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        let kind = match glyph {
            'B' => Self::Basic(BasicColor::Blue),
            'G' => Self::Basic(BasicColor::Green),
            'R' => Self::Basic(BasicColor::Red),
            'Y' => Self::Basic(BasicColor::Yellow),
            'P' => Self::Basic(BasicColor::Purple),
            '-' => Self::Special(SpecialKind::RowClear),
            '|' => Self::Special(SpecialKind::ColumnClear),
            '*' => Self::Special(SpecialKind::Blast),
            '+' => Self::Special(SpecialKind::BlastMax),
            _ => return None,
        };
        Some(kind)
    }
}

/// Lifecycle stage of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileState {
    /// Resting tile that accepts interaction.
    Normal,
    /// Tile pending removal; terminal.
    Burning,
    /// Tile that changed row during the last gravity phase.
    Falling,
    /// Tile dealt during the last refill.
    Spawning,
}

/// Unique identifier assigned to a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(u32);

impl TileId {
    /// Creates a new tile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identity-bearing tile value stored in a grid slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    id: TileId,
    kind: TileKind,
    state: TileState,
    position: Position,
}

impl Tile {
    /// Creates a resting tile at the provided cell.
    #[must_use]
    pub const fn new(id: TileId, kind: TileKind, position: Position) -> Self {
        Self {
            id,
            kind,
            state: TileState::Normal,
            position,
        }
    }

    /// Returns the tile with its lifecycle state replaced.
    #[must_use]
    pub const fn with_state(mut self, state: TileState) -> Self {
        self.state = state;
        self
    }

    /// Identifier of the tile.
    #[must_use]
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Kind of the tile.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Lifecycle state of the tile.
    #[must_use]
    pub const fn state(&self) -> TileState {
        self.state
    }

    /// Cell the tile occupies.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Reports whether the tile currently accepts clicks.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        matches!(self.state, TileState::Normal)
    }

    /// Updates the lifecycle state.
    pub fn set_state(&mut self, state: TileState) {
        self.state = state;
    }

    /// Replaces the kind while keeping identity and cell.
    pub fn set_kind(&mut self, kind: TileKind) {
        self.kind = kind;
    }

    /// Records the cell the tile moved to.
    pub fn relocate(&mut self, position: Position) {
        self.position = position;
    }
}

/// Read-only view into the dense tile grid.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [Option<Tile>],
    size: FieldSize,
}

impl<'a> GridView<'a> {
    /// Captures a new grid view backed by the provided row-major slot slice.
    #[must_use]
    pub fn new(cells: &'a [Option<Tile>], size: FieldSize) -> Self {
        Self { cells, size }
    }

    /// Dimensions of the underlying grid.
    #[must_use]
    pub const fn size(&self) -> FieldSize {
        self.size
    }

    /// Returns the tile stored at the cell; out-of-range cells read as empty.
    #[must_use]
    pub fn tile(&self, position: Position) -> Option<&'a Tile> {
        let index = self.size.index(position)?;
        self.cells.get(index).and_then(Option::as_ref)
    }

    /// Returns the kind of the tile stored at the cell, if any.
    #[must_use]
    pub fn kind_at(&self, position: Position) -> Option<TileKind> {
        self.tile(position).map(Tile::kind)
    }

    /// Reports whether the cell holds a tile.
    #[must_use]
    pub fn is_occupied(&self, position: Position) -> bool {
        self.tile(position).is_some()
    }

    /// Iterator over every stored tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &'a Tile> + 'a {
        self.cells.iter().flatten()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|slot| slot.is_some()).count()
    }

    /// Occupied cells of the given row, left to right.
    pub fn occupied_in_row(&self, row: u32) -> impl Iterator<Item = Position> + 'a {
        let view = *self;
        (0..self.size.columns())
            .map(move |x| Position::new(x, row))
            .filter(move |cell| view.is_occupied(*cell))
    }

    /// Occupied cells of the given column, top to bottom.
    pub fn occupied_in_column(&self, column: u32) -> impl Iterator<Item = Position> + 'a {
        let view = *self;
        (0..self.size.rows())
            .map(move |y| Position::new(column, y))
            .filter(move |cell| view.is_occupied(*cell))
    }
}

/// Limited-use player actions that bypass group matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BoosterKind {
    /// Destroys the 3×3 block around one selected cell.
    Bomb,
    /// Exchanges the kinds of two selected tiles.
    Teleport,
}

impl BoosterKind {
    /// Every booster kind.
    pub const ALL: [BoosterKind; 2] = [BoosterKind::Bomb, BoosterKind::Teleport];

    /// Number of cells the player selects before the booster resolves.
    #[must_use]
    pub const fn required_targets(self) -> usize {
        match self {
            Self::Bomb => 1,
            Self::Teleport => 2,
        }
    }
}

/// Parameters that stay fixed for the lifetime of one playthrough.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Number of columns in the field.
    pub field_width: u32,
    /// Number of rows in the field.
    pub field_height: u32,
    /// Score that wins the playthrough.
    pub target_score: u32,
    /// Moves available at the start of the playthrough.
    pub max_moves: u32,
    /// Number of times an exhausted move budget may be refreshed by a shuffle.
    pub shuffle_attempts: u32,
}

impl GameConfig {
    /// Dimensions of the configured field.
    #[must_use]
    pub const fn field_size(&self) -> FieldSize {
        FieldSize::new(self.field_width, self.field_height)
    }

    /// Checks that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_width == 0 || self.field_height == 0 {
            return Err(ConfigError::EmptyField {
                columns: self.field_width,
                rows: self.field_height,
            });
        }
        if self.max_moves == 0 {
            return Err(ConfigError::NoMoves);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 8,
            field_height: 8,
            target_score: 1_500,
            max_moves: 25,
            shuffle_attempts: 2,
        }
    }
}

/// Reasons a configuration is rejected before a playthrough starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// At least one field dimension is zero.
    #[error("field must have at least one cell, got {columns}x{rows}")]
    EmptyField {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// The move budget is zero.
    #[error("move budget must allow at least one move")]
    NoMoves,
}
