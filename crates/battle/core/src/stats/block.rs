//! Baseline attributes of a combatant.

/// The seven baseline attributes that define a combatant.
///
/// - **max_hp**: Health before vitality is added
/// - **strength**: Physical attack
/// - **vitality**: Extra HP and a fractional defense increment
/// - **agility**: Speed and evasion
/// - **focus**: Accuracy and critical chance
/// - **luck**: Secondary critical modifier
/// - **speed**: Initiative
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBlock {
    pub max_hp: u32,
    pub strength: u32,
    pub vitality: u32,
    pub agility: u32,
    pub focus: u32,
    pub luck: u32,
    pub speed: u32,
}

impl StatBlock {
    pub fn new(max_hp: u32) -> Self {
        Self {
            max_hp,
            ..Self::default()
        }
    }

    pub fn with_strength(mut self, strength: u32) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_vitality(mut self, vitality: u32) -> Self {
        self.vitality = vitality;
        self
    }

    pub fn with_agility(mut self, agility: u32) -> Self {
        self.agility = agility;
        self
    }

    pub fn with_focus(mut self, focus: u32) -> Self {
        self.focus = focus;
        self
    }

    pub fn with_luck(mut self, luck: u32) -> Self {
        self.luck = luck;
        self
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    /// Returns the baseline value of a buffable stat.
    pub fn get(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Strength => self.strength,
            StatKind::Vitality => self.vitality,
            StatKind::Agility => self.agility,
            StatKind::Focus => self.focus,
            StatKind::Luck => self.luck,
            StatKind::Speed => self.speed,
        }
    }
}

/// Stats that buffs and debuffs can target.
///
/// Max HP is deliberately absent: buffs never move the HP cap mid-battle.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    Strength,
    Vitality,
    Agility,
    Focus,
    Luck,
    Speed,
}
