//! Skill definitions.

use super::{Effect, SkillId};

/// Oracle providing skill definitions.
pub trait SkillOracle: Send + Sync {
    fn skill(&self, id: &SkillId) -> Option<&SkillDefinition>;
}

/// A named effect table. Targets are chosen by the caller; every effect is
/// applied to every target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub effects: Vec<Effect>,
}

impl SkillDefinition {
    pub fn new(id: impl Into<SkillId>) -> Self {
        Self {
            id: id.into(),
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}
