//! Traits describing read-only battle content.
//!
//! Oracles expose status-effect definitions, skill and item effect tables, and
//! deterministic rolls. The [`BattleEnv`] aggregate bundles them so the engine
//! can access everything it needs without hard coupling to concrete
//! implementations. Nothing here is mutated after load, so one catalog can be
//! shared by any number of concurrently running encounters.
mod catalog;
mod effects;
mod items;
mod rng;
mod skills;
mod status;

pub use catalog::Catalog;
pub use effects::Effect;
pub use items::{ItemDefinition, ItemOracle};
pub use rng::{FixedRng, PcgRng, RngOracle, compute_seed};
pub use skills::{SkillDefinition, SkillOracle};
pub use status::{
    StackingRule, StatusBehavior, StatusEffectDefinition, StatusOracle, TickEffect, TickFormula,
};

macro_rules! content_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

content_id! {
    /// Identifier of a [`StatusEffectDefinition`].
    StatusId
}

content_id! {
    /// Identifier of a [`SkillDefinition`].
    SkillId
}

content_id! {
    /// Identifier of an [`ItemDefinition`].
    ItemId
}

/// Aggregates the read-only oracles required by the resolver and the engine.
///
/// `BattleEnv` is `Copy`: it only borrows the catalogs, which the host keeps
/// alive for as long as any encounter uses them.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    statuses: &'a dyn StatusOracle,
    skills: &'a dyn SkillOracle,
    items: &'a dyn ItemOracle,
    rng: &'a dyn RngOracle,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        statuses: &'a dyn StatusOracle,
        skills: &'a dyn SkillOracle,
        items: &'a dyn ItemOracle,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            statuses,
            skills,
            items,
            rng,
        }
    }

    /// Uses one [`Catalog`] for every content lookup.
    pub fn with_catalog(catalog: &'a Catalog, rng: &'a dyn RngOracle) -> Self {
        Self::new(catalog, catalog, catalog, rng)
    }

    pub fn statuses(&self) -> &'a dyn StatusOracle {
        self.statuses
    }

    pub fn skills(&self) -> &'a dyn SkillOracle {
        self.skills
    }

    pub fn items(&self) -> &'a dyn ItemOracle {
        self.items
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv").finish_non_exhaustive()
    }
}
