//! Effect application for skills and items.

use super::resolve::ResolveContext;
use crate::combat::{calculate_damage, resolve_attack, skill_base};
use crate::env::{Effect, ItemId, SkillId, StatusId};
use crate::log::{CombatLog, CombatLogEntry, DamageSource, HealSource};
use crate::state::{CombatantId, CombatantState};
use crate::stats::{ActiveBuff, Element, StatKind};

/// Where an effect table came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum EffectOrigin {
    Skill(SkillId),
    Item(ItemId),
}

impl EffectOrigin {
    fn damage_source(&self) -> DamageSource {
        match self {
            Self::Skill(id) => DamageSource::Skill(id.clone()),
            Self::Item(id) => DamageSource::Item(id.clone()),
        }
    }

    fn heal_source(&self) -> HealSource {
        match self {
            Self::Skill(id) => HealSource::Skill(id.clone()),
            Self::Item(id) => HealSource::Item(id.clone()),
        }
    }
}

/// Whether the remaining effects still apply to the current target.
enum Flow {
    Continue,
    Stop,
}

/// Applies `effects` in order to one target.
///
/// A missed damage roll cancels the rest of the table for that target, as
/// does the target falling.
pub(crate) fn apply_all(
    ctx: &mut ResolveContext<'_, '_>,
    origin: &EffectOrigin,
    effects: &[Effect],
    source: usize,
    target: usize,
) {
    for effect in effects {
        if ctx.combatants[target].is_defeated() {
            break;
        }
        if let Flow::Stop = apply_one(ctx, origin, effect, source, target) {
            break;
        }
    }
}

fn apply_one(
    ctx: &mut ResolveContext<'_, '_>,
    origin: &EffectOrigin,
    effect: &Effect,
    source: usize,
    target: usize,
) -> Flow {
    match effect {
        Effect::Damage {
            power,
            element,
            scaling,
        } => damage(ctx, origin, *power, element.as_ref(), *scaling, source, target),
        Effect::Heal { amount } => {
            let healer = ctx.id(source);
            let state = &mut ctx.combatants[target];
            let gained = state.heal(*amount);
            let entry = CombatLogEntry::Heal {
                healer: Some(healer),
                target: state.id(),
                amount: gained,
                source: origin.heal_source(),
                hp_left: state.hp(),
            };
            ctx.log.push(entry);
            Flow::Continue
        }
        Effect::ApplyStatus { status, chance } => {
            apply_status(ctx, status, *chance, source, target);
            Flow::Continue
        }
        Effect::Buff { stat, value, turns } => {
            buff(ctx, *stat, *value, *turns, target);
            Flow::Continue
        }
        Effect::Cleanse => {
            cleanse(ctx, target);
            Flow::Continue
        }
    }
}

fn damage(
    ctx: &mut ResolveContext<'_, '_>,
    origin: &EffectOrigin,
    power: u32,
    element: Option<&Element>,
    scaling: Option<StatKind>,
    source: usize,
    target: usize,
) -> Flow {
    let config = ctx.config;
    let resistance = ctx.combatants[target].resistances().against(element);
    let defending = ctx.combatants[target].is_defending();

    match origin {
        EffectOrigin::Skill(_) => {
            let attacker = ctx.combatants[source].derived(&config.rules);
            let defender = ctx.combatants[target].derived(&config.rules);
            let scaled = scaling.map_or(0, |stat| attacker.scaling(stat));
            let base = skill_base(power, scaled, defender.defense);

            let attacker_id = ctx.id(source);
            let hit_roll = ctx.roll(attacker_id);
            let crit_roll = ctx.roll(attacker_id);
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
                Some(amount) => {
                    deal_damage(
                        ctx,
                        Some(source),
                        target,
                        amount,
                        origin.damage_source(),
                        result.is_critical(),
                    );
                    Flow::Continue
                }
                None => {
                    let target = ctx.id(target);
                    tracing::debug!(attacker = %attacker_id, %target, "skill missed");
                    ctx.log.push(CombatLogEntry::Missed {
                        attacker: attacker_id,
                        target,
                    });
                    Flow::Stop
                }
            }
        }
        EffectOrigin::Item(_) => {
            let amount = calculate_damage(power, resistance, false, defending, &config.rules);
            deal_damage(
                ctx,
                Some(source),
                target,
                amount,
                origin.damage_source(),
                false,
            );
            Flow::Continue
        }
    }
}

/// Subtracts damage from `target` and logs it, plus a defeat when HP reaches 0.
pub(crate) fn deal_damage(
    ctx: &mut ResolveContext<'_, '_>,
    attacker: Option<usize>,
    target: usize,
    amount: u32,
    source: DamageSource,
    critical: bool,
) {
    let attacker = attacker.map(|index| ctx.id(index));
    inflict(
        &mut ctx.combatants[target],
        ctx.log,
        attacker,
        amount,
        source,
        critical,
    );
}

/// Damage application shared by actions and status ticks.
pub(crate) fn inflict(
    state: &mut CombatantState,
    log: &mut CombatLog,
    attacker: Option<CombatantId>,
    amount: u32,
    source: DamageSource,
    critical: bool,
) {
    let was_alive = state.is_alive();
    let lost = state.take_damage(amount);
    let target = state.id();

    tracing::debug!(?attacker, %target, amount = lost, critical, hp = state.hp(), "damage");
    log.push(CombatLogEntry::Damage {
        attacker,
        target,
        amount: lost,
        source,
        critical,
        hp_left: state.hp(),
    });

    if was_alive && state.is_defeated() {
        tracing::debug!(%target, "defeated");
        log.push(CombatLogEntry::Defeated { combatant: target });
    }
}

fn apply_status(
    ctx: &mut ResolveContext<'_, '_>,
    status: &StatusId,
    chance: u32,
    source: usize,
    target: usize,
) {
    let Some(definition) = ctx.env.statuses().status(status) else {
        tracing::warn!(%status, "status vanished from catalog after validation");
        return;
    };
    let source_id = ctx.id(source);
    let target_id = ctx.id(target);

    let resisted_by_threshold = definition.resisted_at.is_some_and(|threshold| {
        ctx.combatants[target]
            .resistances()
            .against(definition.element.as_ref())
            >= threshold
    });
    if resisted_by_threshold || !ctx.check(source_id, chance) {
        tracing::debug!(%status, target = %target_id, resisted_by_threshold, "status resisted");
        ctx.log.push(CombatLogEntry::StatusResisted {
            target: target_id,
            status: status.clone(),
        });
        return;
    }

    let entry = ctx.combatants[target]
        .statuses_mut()
        .apply(definition, Some(source_id))
        .map(|instance| CombatLogEntry::StatusApplied {
            target: target_id,
            status: instance.id.clone(),
            stacks: instance.stacks,
            remaining_turns: instance.remaining_turns,
            source: instance.source,
        });

    match entry {
        Some(entry) => ctx.log.push(entry),
        None => tracing::warn!(%status, target = %target_id, "status slots full"),
    }
}

fn buff(ctx: &mut ResolveContext<'_, '_>, stat: StatKind, value: i32, turns: u32, target: usize) {
    let target_id = ctx.id(target);
    if ctx.combatants[target]
        .buffs_mut()
        .add(ActiveBuff::new(stat, value, turns))
    {
        ctx.log.push(CombatLogEntry::BuffApplied {
            target: target_id,
            stat,
            value,
            turns,
        });
    } else {
        tracing::debug!(target = %target_id, %stat, value, turns, "buff not applied");
    }
}

fn cleanse(ctx: &mut ResolveContext<'_, '_>, target: usize) {
    let statuses = ctx.env.statuses();
    let target_id = ctx.id(target);
    let removed = ctx.combatants[target]
        .statuses_mut()
        .remove_where(|instance| statuses.status(&instance.id).is_some_and(|def| def.is_debuff()));

    for instance in removed {
        ctx.log.push(CombatLogEntry::StatusCleansed {
            target: target_id,
            status: instance.id,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BattleConfig, EncounterConfig};
    use crate::env::{BattleEnv, Catalog, FixedRng, StatusBehavior, StatusEffectDefinition};
    use crate::state::{Combatant, Side};
    use crate::stats::{ResistanceProfile, StatBlock};

    fn pair(target_resistances: ResistanceProfile) -> Vec<CombatantState> {
        let rules = BattleConfig::default();
        vec![
            CombatantState::new(
                Combatant::new(1, "Mage", Side::Player, StatBlock::new(40).with_focus(8)),
                &rules,
            ),
            CombatantState::new(
                Combatant::new(2, "Imp", Side::Enemy, StatBlock::new(60))
                    .with_resistances(target_resistances),
                &rules,
            ),
        ]
    }

    fn catalog() -> Catalog {
        Catalog::new()
            .with_status(
                StatusEffectDefinition::new("burn", 3)
                    .with_element("fire")
                    .resisted_at(50)
                    .with_behavior(StatusBehavior::DEBUFF),
            )
            .with_status(StatusEffectDefinition::new("regen", 3))
    }

    #[test]
    fn item_damage_ignores_defense_and_rolls() {
        let catalog = catalog();
        let rng = FixedRng::new(100);
        let env = BattleEnv::with_catalog(&catalog, &rng);
        let config = EncounterConfig::new(1);
        let mut combatants = pair(ResistanceProfile::new().with("fire", 25));
        let mut log = CombatLog::new();
        let mut ctx = ResolveContext::new(&mut combatants, env, &config, &mut log, 1);

        let origin = EffectOrigin::Item(ItemId::from("fire-bomb"));
        apply_all(&mut ctx, &origin, &[Effect::elemental(20, "fire")], 0, 1);

        // a roll of 100 would miss an attack, items always land
        assert_eq!(combatants[1].hp(), 45);
    }

    #[test]
    fn skill_damage_scales_and_rolls() {
        let catalog = catalog();
        let rng = FixedRng::new(50);
        let env = BattleEnv::with_catalog(&catalog, &rng);
        let config = EncounterConfig::new(1);
        let mut combatants = pair(ResistanceProfile::new());
        let mut log = CombatLog::new();
        let mut ctx = ResolveContext::new(&mut combatants, env, &config, &mut log, 1);

        let origin = EffectOrigin::Skill(SkillId::from("bolt"));
        let bolt = Effect::elemental(10, "lightning").scaling_with(StatKind::Focus);
        apply_all(&mut ctx, &origin, &[bolt], 0, 1);

        // 10 + focus 8
        assert_eq!(combatants[1].hp(), 42);
    }

    #[test]
    fn missed_skill_skips_remaining_effects() {
        let catalog = catalog();
        let rng = FixedRng::new(100);
        let env = BattleEnv::with_catalog(&catalog, &rng);
        let config = EncounterConfig::new(1);
        let mut combatants = pair(ResistanceProfile::new());
        let mut log = CombatLog::new();
        let mut ctx = ResolveContext::new(&mut combatants, env, &config, &mut log, 1);

        let origin = EffectOrigin::Skill(SkillId::from("flame-strike"));
        let effects = [Effect::damage(10), Effect::apply_status("burn", 100)];
        apply_all(&mut ctx, &origin, &effects, 0, 1);

        assert!(combatants[1].statuses().is_empty());
        assert!(matches!(log.entries(), [CombatLogEntry::Missed { .. }]));
    }

    #[test]
    fn status_threshold_blocks_application() {
        let catalog = catalog();
        let rng = FixedRng::new(1);
        let env = BattleEnv::with_catalog(&catalog, &rng);
        let config = EncounterConfig::new(1);
        let mut combatants = pair(ResistanceProfile::new().with("fire", 50));
        let mut log = CombatLog::new();
        let mut ctx = ResolveContext::new(&mut combatants, env, &config, &mut log, 1);

        let origin = EffectOrigin::Item(ItemId::from("ember"));
        apply_all(&mut ctx, &origin, &[Effect::apply_status("burn", 100)], 0, 1);

        assert!(combatants[1].statuses().is_empty());
        assert!(matches!(
            log.last(),
            Some(CombatLogEntry::StatusResisted { .. })
        ));
    }

    #[test]
    fn cleanse_removes_only_debuffs() {
        let catalog = catalog();
        let rng = FixedRng::new(1);
        let env = BattleEnv::with_catalog(&catalog, &rng);
        let config = EncounterConfig::new(1);
        let mut combatants = pair(ResistanceProfile::new());
        let mut log = CombatLog::new();
        let mut ctx = ResolveContext::new(&mut combatants, env, &config, &mut log, 1);

        let origin = EffectOrigin::Item(ItemId::from("panacea"));
        let effects = [
            Effect::apply_status("burn", 100),
            Effect::apply_status("regen", 100),
            Effect::Cleanse,
        ];
        apply_all(&mut ctx, &origin, &effects, 0, 1);

        let left: Vec<_> = combatants[1]
            .statuses()
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(left, ["regen"]);
        assert!(matches!(
            log.last(),
            Some(CombatLogEntry::StatusCleansed { .. })
        ));
    }

    #[test]
    fn heal_and_buff_are_logged() {
        let catalog = catalog();
        let rng = FixedRng::new(1);
        let env = BattleEnv::with_catalog(&catalog, &rng);
        let config = EncounterConfig::new(1);
        let mut combatants = pair(ResistanceProfile::new());
        combatants[0].take_damage(15);
        let mut log = CombatLog::new();
        let mut ctx = ResolveContext::new(&mut combatants, env, &config, &mut log, 1);

        let origin = EffectOrigin::Skill(SkillId::from("rally"));
        let effects = [
            Effect::Heal { amount: 40 },
            Effect::Buff {
                stat: StatKind::Strength,
                value: 5,
                turns: 2,
            },
        ];
        apply_all(&mut ctx, &origin, &effects, 0, 0);

        assert_eq!(combatants[0].hp(), 40);
        assert_eq!(combatants[0].buffs().delta(StatKind::Strength), 5);
        assert!(matches!(
            log.entries(),
            [
                CombatLogEntry::Heal { amount: 15, .. },
                CombatLogEntry::BuffApplied { .. }
            ]
        ));
    }
}
