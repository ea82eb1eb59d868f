//! Combat formulas.
//!
//! Pure functions only: no state, no rolls of their own. The action resolver
//! feeds them derived stats and d100 rolls and applies the results.
//!
//! - `resolve_attack`: hit check, crit check, then damage
//! - `hit_chance`: accuracy vs evasion, clamped
//! - `calculate_damage`: resistance, crit and defend applied to a base value

pub mod damage;
pub mod hit;
pub mod result;

pub use damage::{apply_resistance, attack_base, calculate_damage, skill_base};
pub use hit::{check_hit, hit_chance, is_critical};
pub use result::{AttackOutcome, AttackResult, resolve_attack};
