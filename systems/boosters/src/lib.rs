#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Booster state machine that arms limited-use actions and resolves their targets.
//!
//! A booster is armed with [`Boosters::activate`], collects target cells through
//! [`Boosters::select_target`] and resolves into world commands. Charge
//! accounting lives here: a charge is spent only when a booster resolves.

mod inventory;

pub use inventory::{BoosterInventory, Charge};

use thiserror::Error;
use tile_blast_core::{BoosterKind, Command, DestructionOrigin, Event, GridView, Position};

/// Radius of the square the bomb clears around its target.
pub const BOMB_RADIUS: u32 = 1;

/// Reasons an activation request is refused. Refusals never change state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ActivationError {
    /// Another booster is awaiting targets.
    #[error("{armed:?} booster is already armed")]
    AlreadyArmed {
        /// Booster currently armed.
        armed: BoosterKind,
    },
    /// The booster has not been unlocked.
    #[error("{kind:?} booster is locked")]
    Locked {
        /// Booster that was requested.
        kind: BoosterKind,
    },
    /// The booster has no charges left.
    #[error("{kind:?} booster has no charges left")]
    Exhausted {
        /// Booster that was requested.
        kind: BoosterKind,
    },
}

/// Observable phase of the booster state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoosterPhase {
    /// No booster is armed; clicks go to ordinary matching.
    Inactive,
    /// A booster is armed and collecting target cells.
    WaitingTarget {
        /// Armed booster.
        kind: BoosterKind,
        /// Number of cells selected so far.
        selected: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Activation {
    kind: BoosterKind,
    selection: Vec<Position>,
}

/// Booster system tracking charges and the transient activation.
#[derive(Clone, Debug)]
pub struct Boosters {
    defaults: BoosterInventory,
    inventory: BoosterInventory,
    activation: Option<Activation>,
}

impl Default for Boosters {
    fn default() -> Self {
        Self::with_inventory(BoosterInventory::default())
    }
}

impl Boosters {
    /// Creates a booster system holding the default charges.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a booster system that restores `inventory` on every new game.
    #[must_use]
    pub fn with_inventory(inventory: BoosterInventory) -> Self {
        Self {
            defaults: inventory,
            inventory,
            activation: None,
        }
    }

    /// Current charges.
    #[must_use]
    pub fn inventory(&self) -> &BoosterInventory {
        &self.inventory
    }

    /// Booster currently awaiting targets, if any.
    #[must_use]
    pub fn armed(&self) -> Option<BoosterKind> {
        self.activation.as_ref().map(|activation| activation.kind)
    }

    /// Reports whether clicks should be routed to the booster handler.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.activation.is_some()
    }

    /// Cells selected for the armed booster, in click order.
    #[must_use]
    pub fn selection(&self) -> &[Position] {
        self.activation
            .as_ref()
            .map(|activation| activation.selection.as_slice())
            .unwrap_or_default()
    }

    /// Current phase of the state machine.
    #[must_use]
    pub fn phase(&self) -> BoosterPhase {
        match &self.activation {
            None => BoosterPhase::Inactive,
            Some(activation) => BoosterPhase::WaitingTarget {
                kind: activation.kind,
                selected: activation.selection.len(),
            },
        }
    }

    /// Consumes world events, restoring the initial charges when a new game starts.
    pub fn handle(&mut self, events: &[Event], out_events: &mut Vec<Event>) {
        for event in events {
            if let Event::GameStarted { .. } = event {
                self.inventory = self.defaults;
                self.activation = None;
                for kind in BoosterKind::ALL {
                    self.announce(kind, out_events);
                }
            }
        }
    }

    /// Arms the booster so subsequent clicks select its targets.
    pub fn activate(
        &mut self,
        kind: BoosterKind,
        out_events: &mut Vec<Event>,
    ) -> Result<(), ActivationError> {
        if let Some(armed) = self.armed() {
            return Err(ActivationError::AlreadyArmed { armed });
        }
        let charge = self.inventory.charge(kind);
        if !charge.unlocked {
            return Err(ActivationError::Locked { kind });
        }
        if charge.remaining_uses == 0 {
            return Err(ActivationError::Exhausted { kind });
        }

        self.activation = Some(Activation {
            kind,
            selection: Vec::with_capacity(kind.required_targets()),
        });
        self.announce(kind, out_events);
        Ok(())
    }

    /// Disarms the active booster without spending a charge.
    pub fn deactivate(&mut self, out_events: &mut Vec<Event>) {
        if let Some(activation) = self.activation.take() {
            self.announce(activation.kind, out_events);
        }
    }

    /// Feeds a clicked cell to the armed booster.
    ///
    /// Cells outside the field are ignored. The teleport also ignores empty
    /// cells. Clicks while no booster is armed do nothing.
    pub fn select_target(
        &mut self,
        position: Position,
        grid: GridView<'_>,
        out_commands: &mut Vec<Command>,
        out_events: &mut Vec<Event>,
    ) {
        let Some(kind) = self.armed() else {
            return;
        };
        if !grid.size().contains(position) {
            return;
        }

        match kind {
            BoosterKind::Bomb => {
                let footprint = grid.size().square_around(position, BOMB_RADIUS);
                out_commands.extend(Command::staged_cascade(
                    footprint,
                    DestructionOrigin::Booster,
                ));
                self.resolve(kind, out_events);
            }
            BoosterKind::Teleport => {
                if !grid.is_occupied(position) {
                    return;
                }
                let Some(first) = self.selection().first().copied() else {
                    if let Some(activation) = self.activation.as_mut() {
                        activation.selection.push(position);
                    }
                    return;
                };
                if first == position {
                    self.deactivate(out_events);
                    return;
                }
                out_commands.push(Command::SwapKinds {
                    first,
                    second: position,
                });
                self.resolve(kind, out_events);
            }
        }
    }

    fn resolve(&mut self, kind: BoosterKind, out_events: &mut Vec<Event>) {
        let _ = self.inventory.consume(kind);
        self.activation = None;
        self.announce(kind, out_events);
    }

    fn announce(&self, kind: BoosterKind, out_events: &mut Vec<Event>) {
        out_events.push(Event::BoosterStateChanged {
            kind,
            remaining_uses: self.inventory.charge(kind).remaining_uses,
            armed: self.armed() == Some(kind),
        });
    }
}
