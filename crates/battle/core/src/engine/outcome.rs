//! Terminal states and victory rewards.

use crate::env::ItemId;
use crate::state::{CombatantState, Side};

/// XP, currency and drops granted on victory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rewards {
    pub xp: u32,
    pub currency: u32,
    pub drops: Vec<ItemId>,
}

impl Rewards {
    pub fn new(xp: u32, currency: u32) -> Self {
        Self {
            xp,
            currency,
            drops: Vec::new(),
        }
    }

    pub fn with_drop(mut self, item: impl Into<ItemId>) -> Self {
        self.drops.push(item.into());
        self
    }

    pub fn merge(&mut self, other: &Rewards) {
        self.xp = self.xp.saturating_add(other.xp);
        self.currency = self.currency.saturating_add(other.currency);
        self.drops.extend(other.drops.iter().cloned());
    }
}

/// How an encounter ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatOutcome {
    /// Every enemy fell.
    Victory { rewards: Rewards },
    /// Every party member fell.
    Defeat,
    /// `side` escaped.
    Retreat { side: Side },
}

/// Computes victory rewards from the final roster.
pub trait RewardPolicy: Send + Sync {
    fn victory_rewards(&self, combatants: &[CombatantState]) -> Rewards;
}

/// Sums the bounty of every defeated enemy in registration order.
#[derive(Clone, Copy, Debug, Default)]
pub struct RosterBounty;

impl RewardPolicy for RosterBounty {
    fn victory_rewards(&self, combatants: &[CombatantState]) -> Rewards {
        combatants
            .iter()
            .filter(|state| state.side() == Side::Enemy && state.is_defeated())
            .fold(Rewards::default(), |mut total, state| {
                total.merge(&state.combatant().bounty);
                total
            })
    }
}

/// Which faction has been wiped out, if any.
///
/// Party defeat is checked first so a simultaneous wipe is a defeat.
pub(crate) fn fallen_side(combatants: &[CombatantState]) -> Option<Side> {
    let wiped = |party: bool| {
        combatants
            .iter()
            .filter(|state| state.side().is_party() == party)
            .all(CombatantState::is_defeated)
    };

    if wiped(true) {
        Some(Side::Player)
    } else if wiped(false) {
        Some(Side::Enemy)
    } else {
        None
    }
}
