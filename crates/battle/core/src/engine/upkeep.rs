//! End-of-round upkeep.
//!
//! Runs once per round after the last slot:
//! 1. status ticks (damage or healing over time), in registration order
//! 2. duration countdown for statuses and buffs, logging expiries; statuses
//!    that skip turns are counted down by the turns they consume instead
//!
//! The termination check and the next round's order are the engine's job.

use crate::action::inflict;
use crate::combat::apply_resistance;
use crate::env::{StatusOracle, TickEffect};
use crate::log::{CombatLog, CombatLogEntry, DamageSource, HealSource};
use crate::state::CombatantState;

pub(crate) fn end_of_round(
    combatants: &mut [CombatantState],
    statuses: &dyn StatusOracle,
    log: &mut CombatLog,
    round: u32,
) {
    for state in combatants.iter_mut() {
        tick_statuses(state, statuses, log);
    }

    for state in combatants.iter_mut().filter(|state| state.is_alive()) {
        let target = state.id();
        for expired in state.statuses_mut().tick(statuses) {
            log.push(CombatLogEntry::StatusExpired {
                target,
                status: expired.id,
            });
        }
        for expired in state.buffs_mut().tick() {
            log.push(CombatLogEntry::BuffExpired {
                target,
                stat: expired.stat,
                value: expired.value,
            });
        }
    }

    tracing::debug!(round, "round ended");
    log.push(CombatLogEntry::RoundEnded { round });
}

fn tick_statuses(state: &mut CombatantState, statuses: &dyn StatusOracle, log: &mut CombatLog) {
    let active: Vec<_> = state.statuses().iter().cloned().collect();

    for instance in active {
        if state.is_defeated() {
            break;
        }
        let Some(definition) = statuses.status(&instance.id) else {
            tracing::warn!(status = %instance.id, "active status missing from catalog");
            continue;
        };
        let Some(tick) = definition.tick else {
            continue;
        };

        match tick {
            TickEffect::Damage(formula) => {
                let raw = formula.amount(instance.stacks);
                if raw == 0 {
                    continue;
                }
                let resistance = state.resistances().against(definition.element.as_ref());
                let amount = apply_resistance(raw, resistance);
                inflict(
                    state,
                    log,
                    instance.source,
                    amount,
                    DamageSource::StatusTick(instance.id),
                    false,
                );
            }
            TickEffect::Heal(formula) => {
                let gained = state.heal(formula.amount(instance.stacks));
                log.push(CombatLogEntry::Heal {
                    healer: instance.source,
                    target: state.id(),
                    amount: gained,
                    source: HealSource::StatusTick(instance.id),
                    hp_left: state.hp(),
                });
            }
        }
    }
}
