//! Consumable item definitions.
//!
//! The engine only resolves an item's effect table. Inventory and item counts
//! belong to the host, which should remove the item once
//! [`crate::Submission::Resolved`] is returned.

use super::{Effect, ItemId};

/// Oracle providing item definitions.
pub trait ItemOracle: Send + Sync {
    fn item(&self, id: &ItemId) -> Option<&ItemDefinition>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub effects: Vec<Effect>,
}

impl ItemDefinition {
    pub fn new(id: impl Into<ItemId>) -> Self {
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
