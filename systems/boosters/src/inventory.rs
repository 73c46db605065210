use tile_blast_core::BoosterKind;

/// Charges left for a single booster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Charge {
    /// Number of activations that may still resolve.
    pub remaining_uses: u32,
    /// Whether the player may arm the booster at all.
    pub unlocked: bool,
}

impl Charge {
    /// Creates an unlocked charge holding `remaining_uses` activations.
    #[must_use]
    pub const fn unlocked(remaining_uses: u32) -> Self {
        Self {
            remaining_uses,
            unlocked: true,
        }
    }
}

/// Per-booster charges owned by the booster state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoosterInventory {
    bomb: Charge,
    teleport: Charge,
}

impl BoosterInventory {
    /// Charges granted to the bomb at the start of a playthrough.
    pub const DEFAULT_BOMB_USES: u32 = 3;
    /// Charges granted to the teleport at the start of a playthrough.
    pub const DEFAULT_TELEPORT_USES: u32 = 5;

    /// Creates an inventory with explicit charges for both boosters.
    #[must_use]
    pub const fn new(bomb: Charge, teleport: Charge) -> Self {
        Self { bomb, teleport }
    }

    /// Charges currently held for the booster.
    #[must_use]
    pub const fn charge(&self, kind: BoosterKind) -> Charge {
        match kind {
            BoosterKind::Bomb => self.bomb,
            BoosterKind::Teleport => self.teleport,
        }
    }

    /// Locks or unlocks the booster without touching its charges.
    pub fn set_unlocked(&mut self, kind: BoosterKind, unlocked: bool) {
        self.charge_mut(kind).unlocked = unlocked;
    }

    /// Spends one charge. Returns `false` and leaves the count untouched when none remain.
    pub fn consume(&mut self, kind: BoosterKind) -> bool {
        let charge = self.charge_mut(kind);
        match charge.remaining_uses.checked_sub(1) {
            Some(left) => {
                charge.remaining_uses = left;
                true
            }
            None => false,
        }
    }

    fn charge_mut(&mut self, kind: BoosterKind) -> &mut Charge {
        match kind {
            BoosterKind::Bomb => &mut self.bomb,
            BoosterKind::Teleport => &mut self.teleport,
        }
    }
}

impl Default for BoosterInventory {
    fn default() -> Self {
        Self::new(
            Charge::unlocked(Self::DEFAULT_BOMB_USES),
            Charge::unlocked(Self::DEFAULT_TELEPORT_USES),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{BoosterInventory, Charge};
    use tile_blast_core::BoosterKind;

    #[test]
    fn consume_never_goes_below_zero() {
        let mut inventory = BoosterInventory::new(Charge::unlocked(1), Charge::unlocked(0));

        assert!(inventory.consume(BoosterKind::Bomb));
        assert!(!inventory.consume(BoosterKind::Bomb));
        assert!(!inventory.consume(BoosterKind::Teleport));
        assert_eq!(inventory.charge(BoosterKind::Bomb).remaining_uses, 0);
        assert_eq!(inventory.charge(BoosterKind::Teleport).remaining_uses, 0);
    }

    #[test]
    fn locking_keeps_charges() {
        let mut inventory = BoosterInventory::default();
        inventory.set_unlocked(BoosterKind::Teleport, false);

        let charge = inventory.charge(BoosterKind::Teleport);
        assert!(!charge.unlocked);
        assert_eq!(charge.remaining_uses, BoosterInventory::DEFAULT_TELEPORT_USES);
    }
}
