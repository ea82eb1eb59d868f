//! Status effect definitions.
//!
//! Definitions are catalog data: loaded once, looked up by [`StatusId`], and
//! never mutated. Runtime instances (stacks, remaining turns) live in
//! [`crate::state::StatusEffects`].

use bitflags::bitflags;

use super::StatusId;
use crate::stats::Element;

/// Oracle providing status-effect definitions.
pub trait StatusOracle: Send + Sync {
    fn status(&self, id: &StatusId) -> Option<&StatusEffectDefinition>;
}

/// How re-applying an already active status behaves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StackingRule {
    /// Reset the duration; stack count is unchanged.
    #[default]
    Refresh,
    /// Add one stack (up to the maximum) and reset the duration.
    Accumulate,
}

bitflags! {
    /// Behavioural traits of a status beyond its per-tick effect.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StatusBehavior: u8 {
        /// The carrier's turns are resolved as skipped.
        const SKIP_TURN = 1 << 0;
        /// Removed by cleansing effects.
        const DEBUFF    = 1 << 1;
    }
}

/// Amount produced by one tick as a function of stack count.
///
/// Every variant is monotonically non-decreasing in `stacks`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickFormula {
    /// Same amount regardless of stacks.
    Flat(u32),
    /// `per_stack × stacks`
    Linear { per_stack: u32 },
    /// `base × stacks + step × stacks × (stacks - 1) / 2`
    Escalating { base: u32, step: u32 },
}

impl TickFormula {
    pub fn amount(&self, stacks: u32) -> u32 {
        match *self {
            Self::Flat(amount) => amount,
            Self::Linear { per_stack } => per_stack.saturating_mul(stacks),
            Self::Escalating { base, step } => {
                let triangular = stacks.saturating_mul(stacks.saturating_sub(1)) / 2;
                base.saturating_mul(stacks)
                    .saturating_add(step.saturating_mul(triangular))
            }
        }
    }
}

/// What a status does at end-of-round upkeep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickEffect {
    /// Damage over time, reduced by the carrier's resistance to the status element.
    Damage(TickFormula),
    /// Healing over time, capped at max HP.
    Heal(TickFormula),
}

/// Catalog entry for a status effect (burn, poison, paralysis, regen, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffectDefinition {
    pub id: StatusId,
    /// Element used for tick damage resistance and for `resisted_at`.
    /// `None` resolves against the physical entry.
    pub element: Option<Element>,
    pub tick: Option<TickEffect>,
    pub max_stacks: u32,
    pub stacking: StackingRule,
    /// Rounds the status lasts after each (re)application.
    pub duration: u32,
    pub behavior: StatusBehavior,
    /// Flat reduction of effective speed while active.
    pub speed_penalty: u32,
    /// Application is resisted when the target's resistance to `element`
    /// is at or above this value. Elemental resistance alone never grants
    /// immunity.
    pub resisted_at: Option<i32>,
}

impl StatusEffectDefinition {
    pub fn new(id: impl Into<StatusId>, duration: u32) -> Self {
        Self {
            id: id.into(),
            element: None,
            tick: None,
            max_stacks: 1,
            stacking: StackingRule::Refresh,
            duration,
            behavior: StatusBehavior::empty(),
            speed_penalty: 0,
            resisted_at: None,
        }
    }

    pub fn with_element(mut self, element: impl Into<Element>) -> Self {
        self.element = Some(element.into());
        self
    }

    pub fn with_tick(mut self, tick: TickEffect) -> Self {
        self.tick = Some(tick);
        self
    }

    /// Switches to [`StackingRule::Accumulate`] with the given cap.
    pub fn accumulating(mut self, max_stacks: u32) -> Self {
        self.stacking = StackingRule::Accumulate;
        self.max_stacks = max_stacks.max(1);
        self
    }

    pub fn with_behavior(mut self, behavior: StatusBehavior) -> Self {
        self.behavior |= behavior;
        self
    }

    pub fn with_speed_penalty(mut self, speed_penalty: u32) -> Self {
        self.speed_penalty = speed_penalty;
        self
    }

    pub fn resisted_at(mut self, threshold: i32) -> Self {
        self.resisted_at = Some(threshold);
        self
    }

    pub fn skips_turn(&self) -> bool {
        self.behavior.contains(StatusBehavior::SKIP_TURN)
    }

    pub fn is_debuff(&self) -> bool {
        self.behavior.contains(StatusBehavior::DEBUFF)
    }
}
