#![allow(dead_code)]

use battle_core::{
    Catalog, Combatant, CombatAction, CombatLogEntry, DamageSource, Effect, Encounter,
    ItemDefinition, Side, SkillDefinition, StatBlock, StatusBehavior, StatusEffectDefinition,
    StatusId, TickEffect, TickFormula,
};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness; `RUST_LOG=battle_core=debug`
/// shows resolution details.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn catalog() -> Catalog {
    Catalog::new()
        .with_status(
            StatusEffectDefinition::new("poison", 3)
                .with_element("poison")
                .accumulating(5)
                .with_tick(TickEffect::Damage(TickFormula::Linear { per_stack: 4 }))
                .with_behavior(StatusBehavior::DEBUFF),
        )
        .with_status(
            StatusEffectDefinition::new("burn", 2)
                .with_element("fire")
                .resisted_at(80)
                .with_tick(TickEffect::Damage(TickFormula::Flat(5)))
                .with_behavior(StatusBehavior::DEBUFF),
        )
        .with_status(
            StatusEffectDefinition::new("paralysis", 1)
                .with_behavior(StatusBehavior::SKIP_TURN | StatusBehavior::DEBUFF),
        )
        .with_skill(
            SkillDefinition::new("triple_venom")
                .with_effect(Effect::apply_status("poison", 100))
                .with_effect(Effect::apply_status("poison", 100))
                .with_effect(Effect::apply_status("poison", 100)),
        )
        .with_skill(SkillDefinition::new("immolate").with_effect(Effect::apply_status("burn", 100)))
        .with_skill(SkillDefinition::new("haste").with_effect(Effect::Buff {
            stat: battle_core::StatKind::Speed,
            value: 10,
            turns: 3,
        }))
        .with_item(ItemDefinition::new("fire_bomb").with_effect(Effect::elemental(20, "fire")))
        .with_item(ItemDefinition::new("potion").with_effect(Effect::Heal { amount: 30 }))
        .with_item(
            ItemDefinition::new("stun_dart").with_effect(Effect::apply_status("paralysis", 100)),
        )
}

pub fn hero(id: u32) -> Combatant {
    Combatant::new(
        id,
        "Hero",
        Side::Player,
        StatBlock::new(120).with_strength(20).with_speed(10),
    )
}

pub fn goblin(id: u32) -> Combatant {
    Combatant::new(
        id,
        "Goblin",
        Side::Enemy,
        StatBlock::new(60).with_strength(6).with_speed(4),
    )
}

/// Party members basic-attack the first living enemy; enemies use the policy.
/// Stops after `max_steps` submissions or when the encounter finishes.
pub fn play_out(encounter: &mut Encounter<'_>, max_steps: usize) {
    for _ in 0..max_steps {
        let Some(actor) = encounter.current_actor() else {
            return;
        };
        let is_party = encounter
            .combatant(actor)
            .is_some_and(|state| state.side().is_party());
        if !is_party {
            encounter.advance().expect("enemy turn resolves");
            continue;
        }

        let target = encounter
            .combatants()
            .iter()
            .find(|state| state.side() == Side::Enemy && state.is_alive())
            .map(|state| state.id())
            .expect("a living enemy while in progress");
        encounter
            .submit(CombatAction::BasicAttack {
                source: actor,
                target,
            })
            .expect("party attack resolves");
    }
}

/// Damage amounts dealt by ticks of `status`.
pub fn tick_damage(entries: &[CombatLogEntry], status: &str) -> Vec<u32> {
    let status = StatusId::from(status);
    entries
        .iter()
        .filter_map(|entry| match entry {
            CombatLogEntry::Damage {
                amount,
                source: DamageSource::StatusTick(id),
                ..
            } if *id == status => Some(*amount),
            _ => None,
        })
        .collect()
}

pub fn count_outcomes(entries: &[CombatLogEntry]) -> usize {
    entries
        .iter()
        .filter(|entry| matches!(entry, CombatLogEntry::Outcome(_)))
        .count()
}
