//! Validation and application of [`CombatAction`]s.

use super::effect::{self, EffectOrigin};
use super::{CombatAction, ResolutionError};
use crate::combat::{attack_base, resolve_attack};
use crate::config::{EncounterConfig, RetreatRule};
use crate::env::{BattleEnv, Effect, compute_seed};
use crate::log::{CombatLog, CombatLogEntry, DamageSource};
use crate::state::{CombatantId, CombatantState, Side};

/// A validated action with every reference resolved to an index or a
/// catalog definition.
#[derive(Debug)]
pub(crate) enum Plan<'e> {
    Attack {
        source: usize,
        target: usize,
    },
    Effects {
        source: usize,
        origin: EffectOrigin,
        effects: &'e [Effect],
        targets: Vec<usize>,
    },
    Defend {
        source: usize,
    },
    Retreat {
        source: usize,
    },
}

/// What the engine has to do after an action resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Resolved {
    Continue,
    Retreated(Side),
}

/// Mutable view of an encounter handed to the resolver.
pub(crate) struct ResolveContext<'s, 'e> {
    pub combatants: &'s mut [CombatantState],
    pub env: BattleEnv<'e>,
    pub config: &'s EncounterConfig,
    pub log: &'s mut CombatLog,
    nonce: u64,
    rolls: u32,
}

impl<'s, 'e> ResolveContext<'s, 'e> {
    pub fn new(
        combatants: &'s mut [CombatantState],
        env: BattleEnv<'e>,
        config: &'s EncounterConfig,
        log: &'s mut CombatLog,
        nonce: u64,
    ) -> Self {
        Self {
            combatants,
            env,
            config,
            log,
            nonce,
            rolls: 0,
        }
    }

    /// Next d100 for `actor`. Each call within one resolution uses a fresh
    /// seed context.
    pub fn roll(&mut self, actor: CombatantId) -> u32 {
        let seed = compute_seed(self.config.seed, self.nonce, actor.0, self.rolls);
        self.rolls += 1;
        let roll = self.env.rng().roll_d100(seed);
        tracing::trace!(%actor, nonce = self.nonce, context = self.rolls - 1, roll, "d100");
        roll
    }

    /// Percentage check; always consumes a roll.
    pub fn check(&mut self, actor: CombatantId, chance: u32) -> bool {
        let roll = self.roll(actor);
        chance > 0 && roll <= chance
    }

    pub fn id(&self, index: usize) -> CombatantId {
        self.combatants[index].id()
    }
}

fn index_of(combatants: &[CombatantState], id: CombatantId) -> Result<usize, ResolutionError> {
    combatants
        .iter()
        .position(|c| c.id() == id)
        .ok_or(ResolutionError::UnknownCombatant(id))
}

fn living_source(combatants: &[CombatantState], id: CombatantId) -> Result<usize, ResolutionError> {
    let index = index_of(combatants, id)?;
    if combatants[index].is_defeated() {
        return Err(ResolutionError::SourceDefeated(id));
    }
    Ok(index)
}

fn living_target(combatants: &[CombatantState], id: CombatantId) -> Result<usize, ResolutionError> {
    let index = index_of(combatants, id)?;
    if combatants[index].is_defeated() {
        return Err(ResolutionError::TargetDefeated(id));
    }
    Ok(index)
}

fn check_statuses(effects: &[Effect], env: BattleEnv<'_>) -> Result<(), ResolutionError> {
    for status in effects.iter().filter_map(Effect::status) {
        if env.statuses().status(status).is_none() {
            return Err(ResolutionError::UnknownStatus(status.clone()));
        }
    }
    Ok(())
}

/// Checks every reference in `action` against the current state.
///
/// Nothing is mutated; on success the returned plan can be applied without
/// further lookups failing.
pub(crate) fn pre_validate<'e>(
    action: &CombatAction,
    combatants: &[CombatantState],
    env: BattleEnv<'e>,
) -> Result<Plan<'e>, ResolutionError> {
    let source = living_source(combatants, action.source())?;

    match action {
        CombatAction::BasicAttack { target, .. } => Ok(Plan::Attack {
            source,
            target: living_target(combatants, *target)?,
        }),
        CombatAction::SkillUse { skill, targets, .. } => {
            let definition = env
                .skills()
                .skill(skill)
                .ok_or_else(|| ResolutionError::UnknownSkill(skill.clone()))?;
            if targets.is_empty() {
                return Err(ResolutionError::NoTargets(skill.clone()));
            }
            let mut resolved = Vec::with_capacity(targets.len());
            for id in targets {
                let index = living_target(combatants, *id)?;
                if resolved.contains(&index) {
                    return Err(ResolutionError::DuplicateTarget(*id));
                }
                resolved.push(index);
            }
            check_statuses(&definition.effects, env)?;

            Ok(Plan::Effects {
                source,
                origin: EffectOrigin::Skill(skill.clone()),
                effects: &definition.effects,
                targets: resolved,
            })
        }
        CombatAction::ItemUse { item, target, .. } => {
            let definition = env
                .items()
                .item(item)
                .ok_or_else(|| ResolutionError::UnknownItem(item.clone()))?;
            let target = living_target(combatants, *target)?;
            check_statuses(&definition.effects, env)?;

            Ok(Plan::Effects {
                source,
                origin: EffectOrigin::Item(item.clone()),
                effects: &definition.effects,
                targets: vec![target],
            })
        }
        CombatAction::Defend { .. } => Ok(Plan::Defend { source }),
        CombatAction::Retreat { .. } => Ok(Plan::Retreat { source }),
    }
}

/// Executes a validated plan.
pub(crate) fn apply(plan: Plan<'_>, ctx: &mut ResolveContext<'_, '_>) -> Resolved {
    match plan {
        Plan::Attack { source, target } => {
            basic_attack(ctx, source, target);
            Resolved::Continue
        }
        Plan::Effects {
            source,
            origin,
            effects,
            targets,
        } => {
            for target in targets {
                effect::apply_all(ctx, &origin, effects, source, target);
            }
            Resolved::Continue
        }
        Plan::Defend { source } => {
            ctx.combatants[source].set_defending(true);
            let combatant = ctx.id(source);
            tracing::debug!(%combatant, "defending");
            ctx.log.push(CombatLogEntry::Defended { combatant });
            Resolved::Continue
        }
        Plan::Retreat { source } => retreat(ctx, source),
    }
}

fn basic_attack(ctx: &mut ResolveContext<'_, '_>, source: usize, target: usize) {
    let rules = &ctx.config.rules;
    let attacker = ctx.combatants[source].derived(rules);
    let defender = ctx.combatants[target].derived(rules);
    let base = attack_base(attacker.attack, defender.defense);
    let resistance = ctx.combatants[target].resistances().physical();
    let defending = ctx.combatants[target].is_defending();

    let attacker_id = ctx.id(source);
    let hit_roll = ctx.roll(attacker_id);
    let crit_roll = ctx.roll(attacker_id);
    let config = ctx.config;
    let result = resolve_attack(
        &attacker,
        &defender,
        base,
        resistance,
        defending,
        hit_roll,
        crit_roll,
        &config.rules,
    );

    match result.damage {
        Some(amount) => effect::deal_damage(
            ctx,
            Some(source),
            target,
            amount,
            DamageSource::Attack,
            result.is_critical(),
        ),
        None => {
            let target = ctx.id(target);
            tracing::debug!(attacker = %attacker_id, %target, "missed");
            ctx.log.push(CombatLogEntry::Missed {
                attacker: attacker_id,
                target,
            });
        }
    }
}

fn retreat(ctx: &mut ResolveContext<'_, '_>, source: usize) -> Resolved {
    let config = ctx.config;
    let combatant = ctx.id(source);
    let side = ctx.combatants[source].side();

    let blocked = ctx
        .combatants
        .iter()
        .filter(|other| other.is_alive() && other.side().opposes(side))
        .any(|other| {
            config
                .retreat_blocked_by
                .iter()
                .any(|tag| other.combatant().has_tag(tag))
        });

    let escaped = !blocked
        && match config.retreat {
            RetreatRule::Always => true,
            RetreatRule::Never => false,
            RetreatRule::Chance(chance) => ctx.check(combatant, chance),
        };

    tracing::debug!(%combatant, %side, blocked, escaped, "retreat attempt");
    if escaped {
        Resolved::Retreated(side)
    } else {
        ctx.log.push(CombatLogEntry::RetreatFailed { combatant, side });
        Resolved::Continue
    }
}
