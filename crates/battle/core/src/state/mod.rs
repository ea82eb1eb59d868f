//! Per-encounter mutable state.
//!
//! A [`Combatant`] is the static roster entry supplied by the host.
//! A [`CombatantState`] wraps it with everything that changes during the
//! battle: current HP, active statuses, buffs, and the defend shield.
mod combatant;
mod status;

pub use combatant::{Combatant, CombatantId, CombatantState, Side};
pub use status::{StatusEffects, StatusInstance};
