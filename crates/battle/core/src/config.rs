//! Battle configuration constants and tunable parameters.

/// Rule tables shared by every formula in the crate.
///
/// All percentages are stored as integers (`95` = 95%).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Accuracy every combatant starts from before focus is added.
    pub base_accuracy: u32,
    /// Floor for the final hit chance, so no attack is ever hopeless.
    pub min_hit_chance: u32,
    /// Critical chance every combatant starts from before focus and luck.
    pub base_crit_chance: u32,
    /// Damage multiplier on a critical hit (150 = ×1.5). Clamped to [150, 200].
    pub crit_multiplier_pct: u32,
    /// Reduction of incoming action damage while defending (50 = halved).
    pub defend_reduction_pct: u32,
    /// Max HP granted per point of vitality.
    pub hp_per_vitality: u32,
    /// Defense granted per point of vitality, in hundredths.
    pub defense_per_vitality_pct: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of distinct statuses a combatant can carry at once.
    pub const MAX_STATUS_EFFECTS: usize = 8;
    /// Maximum number of simultaneously active buffs/debuffs per combatant.
    pub const MAX_BUFFS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASE_ACCURACY: u32 = 95;
    pub const DEFAULT_MIN_HIT_CHANCE: u32 = 5;
    pub const DEFAULT_BASE_CRIT_CHANCE: u32 = 5;
    pub const DEFAULT_CRIT_MULTIPLIER_PCT: u32 = 150;
    pub const DEFAULT_DEFEND_REDUCTION_PCT: u32 = 50;
    pub const DEFAULT_HP_PER_VITALITY: u32 = 5;
    pub const DEFAULT_DEFENSE_PER_VITALITY_PCT: u32 = 25;

    /// Bounds for the critical multiplier.
    pub const MIN_CRIT_MULTIPLIER_PCT: u32 = 150;
    pub const MAX_CRIT_MULTIPLIER_PCT: u32 = 200;

    pub fn new() -> Self {
        Self {
            base_accuracy: Self::DEFAULT_BASE_ACCURACY,
            min_hit_chance: Self::DEFAULT_MIN_HIT_CHANCE,
            base_crit_chance: Self::DEFAULT_BASE_CRIT_CHANCE,
            crit_multiplier_pct: Self::DEFAULT_CRIT_MULTIPLIER_PCT,
            defend_reduction_pct: Self::DEFAULT_DEFEND_REDUCTION_PCT,
            hp_per_vitality: Self::DEFAULT_HP_PER_VITALITY,
            defense_per_vitality_pct: Self::DEFAULT_DEFENSE_PER_VITALITY_PCT,
        }
    }

    pub fn with_base_accuracy(mut self, base_accuracy: u32) -> Self {
        self.base_accuracy = base_accuracy;
        self
    }

    pub fn with_base_crit_chance(mut self, base_crit_chance: u32) -> Self {
        self.base_crit_chance = base_crit_chance;
        self
    }

    pub fn with_crit_multiplier_pct(mut self, crit_multiplier_pct: u32) -> Self {
        self.crit_multiplier_pct = crit_multiplier_pct;
        self
    }

    pub fn with_defend_reduction_pct(mut self, defend_reduction_pct: u32) -> Self {
        self.defend_reduction_pct = defend_reduction_pct;
        self
    }

    pub fn with_hp_per_vitality(mut self, hp_per_vitality: u32) -> Self {
        self.hp_per_vitality = hp_per_vitality;
        self
    }

    pub fn with_defense_per_vitality_pct(mut self, defense_per_vitality_pct: u32) -> Self {
        self.defense_per_vitality_pct = defense_per_vitality_pct;
        self
    }

    /// Critical multiplier clamped into its legal band.
    pub fn crit_multiplier(&self) -> u32 {
        self.crit_multiplier_pct
            .clamp(Self::MIN_CRIT_MULTIPLIER_PCT, Self::MAX_CRIT_MULTIPLIER_PCT)
    }

    /// Defend reduction clamped to at most 100%.
    pub fn defend_reduction(&self) -> u32 {
        self.defend_reduction_pct.min(100)
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a retreat attempt succeeds.
///
/// Evaluated once per attempt for the whole retreating side.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RetreatRule {
    /// Retreat always succeeds (unless blocked by tag).
    Always,
    /// Retreat never succeeds (boss fights, scripted battles).
    Never,
    /// Retreat succeeds when a d100 roll is at or below the given percentage.
    Chance(u32),
}

/// Per-encounter configuration supplied by the encounter coordinator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterConfig {
    /// Seed for every roll made during this encounter.
    pub seed: u64,
    /// How retreat attempts are evaluated.
    pub retreat: RetreatRule,
    /// A retreat fails while any living opponent carries one of these tags.
    pub retreat_blocked_by: Vec<String>,
    /// Rule tables for this encounter.
    pub rules: BattleConfig,
}

impl EncounterConfig {
    pub const DEFAULT_RETREAT_CHANCE: u32 = 50;

    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            retreat: RetreatRule::Chance(Self::DEFAULT_RETREAT_CHANCE),
            retreat_blocked_by: Vec::new(),
            rules: BattleConfig::default(),
        }
    }

    pub fn with_retreat(mut self, retreat: RetreatRule) -> Self {
        self.retreat = retreat;
        self
    }

    pub fn with_retreat_blocked_by(mut self, tag: impl Into<String>) -> Self {
        self.retreat_blocked_by.push(tag.into());
        self
    }

    pub fn with_rules(mut self, rules: BattleConfig) -> Self {
        self.rules = rules;
        self
    }
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self::new(0)
    }
}
