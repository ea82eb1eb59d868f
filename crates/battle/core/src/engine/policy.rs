//! Enemy decision policies.

use crate::action::CombatAction;
use crate::env::BattleEnv;
use crate::state::CombatantState;

/// Chooses an action for an enemy-side combatant whose turn it is.
///
/// Returning `None` makes the combatant defend.
pub trait EnemyPolicy: Send + Sync {
    fn choose(
        &self,
        actor: &CombatantState,
        combatants: &[CombatantState],
        env: BattleEnv<'_>,
    ) -> Option<CombatAction>;
}

/// Basic-attacks the living opponent with the least HP; ties go to the
/// earliest registered.
#[derive(Clone, Copy, Debug, Default)]
pub struct FocusWeakest;

impl EnemyPolicy for FocusWeakest {
    fn choose(
        &self,
        actor: &CombatantState,
        combatants: &[CombatantState],
        _env: BattleEnv<'_>,
    ) -> Option<CombatAction> {
        let target = combatants
            .iter()
            .filter(|other| other.is_alive() && other.side().opposes(actor.side()))
            .min_by_key(|other| other.hp())?;

        Some(CombatAction::BasicAttack {
            source: actor.id(),
            target: target.id(),
        })
    }
}
