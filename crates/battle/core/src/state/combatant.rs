use std::fmt;

use strum::{AsRefStr, Display, EnumString};

use super::{StatusEffects, StatusInstance};
use crate::config::BattleConfig;
use crate::engine::Rewards;
use crate::env::StatusOracle;
use crate::stats::{BuffSet, DerivedStats, ResistanceProfile, StatBlock};

/// Identifier of a combatant, unique within one encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which faction a combatant fights for.
///
/// Declaration order is also the tie-break priority in the turn order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    Player,
    Ally,
    Enemy,
}

impl Side {
    /// Player and Ally fight together.
    pub fn is_party(self) -> bool {
        matches!(self, Self::Player | Self::Ally)
    }

    pub fn opposes(self, other: Side) -> bool {
        self.is_party() != other.is_party()
    }
}

/// Static roster entry. Immutable once the encounter starts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub stats: StatBlock,
    pub resistances: ResistanceProfile,
    /// Free-form labels ("boss", "undead", ...).
    pub tags: Vec<String>,
    /// Granted to the victors when this combatant is defeated.
    pub bounty: Rewards,
}

impl Combatant {
    pub fn new(id: u32, name: impl Into<String>, side: Side, stats: StatBlock) -> Self {
        Self {
            id: CombatantId(id),
            name: name.into(),
            side,
            stats,
            resistances: ResistanceProfile::default(),
            tags: Vec::new(),
            bounty: Rewards::default(),
        }
    }

    pub fn with_resistances(mut self, resistances: ResistanceProfile) -> Self {
        self.resistances = resistances;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_bounty(mut self, bounty: Rewards) -> Self {
        self.bounty = bounty;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Mutable battle state of one combatant.
///
/// # Invariants
///
/// - `hp` stays within `0..=max_hp`
/// - `max_hp` is fixed at construction
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantState {
    combatant: Combatant,
    hp: u32,
    max_hp: u32,
    statuses: StatusEffects,
    buffs: BuffSet,
    defending: bool,
}

impl CombatantState {
    /// Enters battle at full HP.
    pub fn new(combatant: Combatant, config: &BattleConfig) -> Self {
        let max_hp = DerivedStats::max_hp(&combatant.stats, config);
        Self {
            combatant,
            hp: max_hp,
            max_hp,
            statuses: StatusEffects::new(),
            buffs: BuffSet::new(),
            defending: false,
        }
    }

    pub fn id(&self) -> CombatantId {
        self.combatant.id
    }

    pub fn side(&self) -> Side {
        self.combatant.side
    }

    pub fn name(&self) -> &str {
        &self.combatant.name
    }

    pub fn combatant(&self) -> &Combatant {
        &self.combatant
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    pub fn is_defending(&self) -> bool {
        self.defending
    }

    pub fn set_defending(&mut self, defending: bool) {
        self.defending = defending;
    }

    pub fn statuses(&self) -> &StatusEffects {
        &self.statuses
    }

    pub fn statuses_mut(&mut self) -> &mut StatusEffects {
        &mut self.statuses
    }

    pub fn buffs(&self) -> &BuffSet {
        &self.buffs
    }

    pub fn buffs_mut(&mut self) -> &mut BuffSet {
        &mut self.buffs
    }

    pub fn resistances(&self) -> &ResistanceProfile {
        &self.combatant.resistances
    }

    pub fn derived(&self, config: &BattleConfig) -> DerivedStats {
        DerivedStats::compute(&self.combatant.stats, &self.buffs, config)
    }

    /// Derived speed minus status penalties, floored at zero.
    pub fn effective_speed(&self, statuses: &dyn StatusOracle, config: &BattleConfig) -> u32 {
        self.derived(config)
            .speed
            .saturating_sub(self.statuses.speed_penalty(statuses))
    }

    /// Spends one turn of an active skip-turn status, if any.
    pub fn consume_skip(&mut self, statuses: &dyn StatusOracle) -> Option<StatusInstance> {
        self.statuses.consume_skip(statuses)
    }

    /// Subtracts HP, saturating at zero. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restores HP, capped at max HP. Returns the HP actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_hp - self.hp);
        self.hp += gained;
        gained
    }
}
