//! Deterministic combat resolution for party-vs-enemy RPG battles.
//!
//! `battle-core` owns everything that happens once a battle has started: who
//! acts when, what an action does numerically, how resistances and stacked
//! status effects modify outcomes across rounds, and when the encounter ends.
//! All state mutation flows through [`engine::Encounter`]; content (statuses,
//! skills, items) is read through the oracle traits bundled in
//! [`env::BattleEnv`], and every observable effect is appended to the
//! [`log::CombatLog`].
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod log;
pub mod state;
pub mod stats;

pub use action::{CombatAction, ResolutionError};
pub use config::{BattleConfig, EncounterConfig, RetreatRule};
pub use engine::{
    BattlePhase, BattleSnapshot, CombatOutcome, EnemyPolicy, Encounter, EncounterSetup,
    FocusWeakest, RewardPolicy, Rewards, RosterBounty, SetupError, SubmitError, Submission,
    TurnOrder,
};
pub use env::{
    BattleEnv, Catalog, Effect, FixedRng, ItemDefinition, ItemId, ItemOracle, PcgRng, RngOracle,
    SkillDefinition, SkillId, SkillOracle, StackingRule, StatusBehavior, StatusEffectDefinition,
    StatusId, StatusOracle, TickEffect, TickFormula,
};
pub use error::{BattleError, ErrorSeverity};
pub use log::{CombatLog, CombatLogEntry, DamageSource, HealSource};
pub use state::{Combatant, CombatantId, CombatantState, Side, StatusEffects, StatusInstance};
pub use stats::{ActiveBuff, BuffSet, DerivedStats, Element, ResistanceProfile, StatBlock, StatKind};
