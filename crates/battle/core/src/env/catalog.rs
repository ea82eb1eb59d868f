//! In-memory content catalog.

use std::collections::BTreeMap;

use super::{
    ItemDefinition, ItemId, ItemOracle, SkillDefinition, SkillId, SkillOracle,
    StatusEffectDefinition, StatusId, StatusOracle,
};

/// Map-backed implementation of every content oracle.
///
/// Build it once at startup and share it (`&Catalog` or `Arc<Catalog>`)
/// across encounters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    statuses: BTreeMap<StatusId, StatusEffectDefinition>,
    skills: BTreeMap<SkillId, SkillDefinition>,
    items: BTreeMap<ItemId, ItemDefinition>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a status definition, replacing any with the same id.
    pub fn with_status(mut self, definition: StatusEffectDefinition) -> Self {
        self.statuses.insert(definition.id.clone(), definition);
        self
    }

    pub fn with_skill(mut self, definition: SkillDefinition) -> Self {
        self.skills.insert(definition.id.clone(), definition);
        self
    }

    pub fn with_item(mut self, definition: ItemDefinition) -> Self {
        self.items.insert(definition.id.clone(), definition);
        self
    }

    /// Status ids referenced by skills or items that have no definition.
    pub fn dangling_statuses(&self) -> Vec<&StatusId> {
        let skill_effects = self.skills.values().flat_map(|skill| skill.effects.iter());
        let item_effects = self.items.values().flat_map(|item| item.effects.iter());
        let mut missing: Vec<&StatusId> = skill_effects
            .chain(item_effects)
            .filter_map(|effect| effect.status())
            .filter(|id| !self.statuses.contains_key(*id))
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }
}

impl StatusOracle for Catalog {
    fn status(&self, id: &StatusId) -> Option<&StatusEffectDefinition> {
        self.statuses.get(id)
    }
}

impl SkillOracle for Catalog {
    fn skill(&self, id: &SkillId) -> Option<&SkillDefinition> {
        self.skills.get(id)
    }
}

impl ItemOracle for Catalog {
    fn item(&self, id: &ItemId) -> Option<&ItemDefinition> {
        self.items.get(id)
    }
}
