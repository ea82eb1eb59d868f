mod common;

use battle_core::{
    BattleEnv, BattlePhase, Catalog, CombatAction, CombatLog, CombatLogEntry, CombatOutcome,
    Combatant, CombatantId, CombatantState, DamageSource, Effect, Encounter, EncounterConfig,
    EncounterSetup, FixedRng, ItemId, PcgRng, ResolutionError, RetreatRule, RewardPolicy,
    Rewards, Side, SkillDefinition, SkillId, StatBlock, StatusId, SubmitError, Submission,
};
use common::{catalog, count_outcomes, goblin, hero, init_tracing, play_out, tick_damage};
use proptest::prelude::*;

const HERO: CombatantId = CombatantId(1);
const GOBLIN: CombatantId = CombatantId(2);

fn duel(config: EncounterConfig) -> EncounterSetup {
    EncounterSetup::new(config)
        .with_ally(hero(1))
        .with_enemy(goblin(2).with_bounty(Rewards::new(25, 10).with_drop("fang")))
}

fn attack(source: CombatantId, target: CombatantId) -> CombatAction {
    CombatAction::BasicAttack { source, target }
}

#[test]
fn victory_is_reported_exactly_once() {
    init_tracing();
    let catalog = catalog();
    // hits, never crits
    let rng = FixedRng::new(50);
    let env = BattleEnv::with_catalog(&catalog, &rng);
    let mut encounter = Encounter::new(duel(EncounterConfig::new(7)), env).expect("valid setup");
    encounter.start();

    play_out(&mut encounter, 20);

    let expected = CombatOutcome::Victory {
        rewards: Rewards::new(25, 10).with_drop("fang"),
    };
    assert_eq!(encounter.outcome(), Some(&expected));
    assert_eq!(encounter.round(), 3);
    assert_eq!(count_outcomes(encounter.log().entries()), 1);
    // two goblin hits of 6 before the third hero attack lands
    assert_eq!(encounter.combatant(HERO).map(CombatantState::hp), Some(108));

    let before = encounter.snapshot();
    let late = encounter.submit(attack(HERO, GOBLIN)).expect("ignored, not an error");
    assert_eq!(late, Submission::Ignored);
    assert_eq!(
        encounter.log().last(),
        Some(&CombatLogEntry::ActionIgnored {
            action: attack(HERO, GOBLIN)
        })
    );
    assert_eq!(count_outcomes(encounter.log().entries()), 1);
    assert_eq!(encounter.snapshot(), before);
    assert_eq!(encounter.advance(), Ok(Submission::Ignored));
    assert_eq!(encounter.current_actor(), None);
}

#[test]
fn retreat_always_ends_the_encounter_immediately() {
    let catalog = catalog();
    let rng = FixedRng::new(50);
    let env = BattleEnv::with_catalog(&catalog, &rng);
    let config = EncounterConfig::new(7).with_retreat(RetreatRule::Always);
    let mut encounter = Encounter::new(duel(config), env).expect("valid setup");
    encounter.start();

    let submission = encounter
        .submit(CombatAction::Retreat { source: HERO })
        .expect("retreat resolves");

    let retreat = CombatOutcome::Retreat { side: Side::Player };
    match submission {
        Submission::Resolved(snapshot) => assert_eq!(snapshot.outcome, Some(retreat.clone())),
        Submission::Ignored => panic!("retreat should resolve"),
    }
    assert_eq!(encounter.phase(), &BattlePhase::Finished(retreat.clone()));
    assert_eq!(encounter.log().last(), Some(&CombatLogEntry::Outcome(retreat)));
    // the goblin never acted
    assert_eq!(encounter.combatant(HERO).map(CombatantState::hp), Some(120));
}

#[test]
fn failed_retreat_consumes_the_turn() {
    let catalog = catalog();
    let rng = FixedRng::new(50);
    let env = BattleEnv::with_catalog(&catalog, &rng);
    let config = EncounterConfig::new(7).with_retreat(RetreatRule::Never);
    let mut encounter = Encounter::new(duel(config), env).expect("valid setup");
    encounter.start();

    encounter
        .submit(CombatAction::Retreat { source: HERO })
        .expect("retreat resolves");

    assert!(matches!(
        encounter.log().last(),
        Some(CombatLogEntry::RetreatFailed {
            combatant: HERO,
            side: Side::Player
        })
    ));
    assert_eq!(encounter.current_actor(), Some(GOBLIN));
    assert!(encounter.outcome().is_none());
}

#[test]
fn stacked_dot_ticks_once_at_round_end() {
    let catalog = catalog();
    let rng = FixedRng::new(50);
    let env = BattleEnv::with_catalog(&catalog, &rng);
    let mut encounter = Encounter::new(duel(EncounterConfig::new(7)), env).expect("valid setup");
    encounter.start();

    encounter
        .submit(CombatAction::SkillUse {
            source: HERO,
            skill: SkillId::from("triple_venom"),
            targets: vec![GOBLIN],
        })
        .expect("skill resolves");

    let stacks: Vec<u32> = encounter
        .log()
        .iter()
        .filter_map(|entry| match entry {
            CombatLogEntry::StatusApplied { stacks, .. } => Some(*stacks),
            _ => None,
        })
        .collect();
    assert_eq!(stacks, [1, 2, 3]);
    // nothing ticks mid-round
    assert!(tick_damage(encounter.log().entries(), "poison").is_empty());

    encounter.run_enemy_turns().expect("goblin acts");

    let entries = encounter.log().entries();
    assert_eq!(tick_damage(entries, "poison"), [12]);
    assert_eq!(encounter.combatant(GOBLIN).map(CombatantState::hp), Some(48));

    let goblin_acted = entries
        .iter()
        .position(|e| {
            matches!(e, CombatLogEntry::ActionQueued { action, .. } if action.source() == GOBLIN)
        })
        .expect("goblin action queued");
    let tick = entries
        .iter()
        .position(|e| e.damage_to(GOBLIN).is_some())
        .expect("poison tick");
    let round_end = entries
        .iter()
        .position(|e| matches!(e, CombatLogEntry::RoundEnded { round: 1 }))
        .expect("round 1 ended");
    assert!(goblin_acted < tick && tick < round_end);

    assert_eq!(encounter.round(), 2);
    assert_eq!(encounter.current_actor(), Some(HERO));
}

#[test]
fn out_of_turn_submission_changes_nothing() {
    let catalog = catalog();
    let rng = FixedRng::new(50);
    let env = BattleEnv::with_catalog(&catalog, &rng);
    let mut encounter = Encounter::new(duel(EncounterConfig::new(7)), env).expect("valid setup");
    encounter.start();
    let before = encounter.log().len();

    assert_eq!(
        encounter.submit(attack(GOBLIN, HERO)),
        Err(SubmitError::OutOfTurn {
            expected: HERO,
            got: GOBLIN
        })
    );
    assert_eq!(encounter.log().len(), before);
    assert_eq!(encounter.advance(), Err(SubmitError::AwaitingPlayer(HERO)));
}

#[test]
fn invalid_references_are_discarded_without_consuming_the_turn() {
    let catalog = catalog();
    let rng = FixedRng::new(50);
    let env = BattleEnv::with_catalog(&catalog, &rng);
    let mut encounter = Encounter::new(duel(EncounterConfig::new(7)), env).expect("valid setup");
    encounter.start();

    let meteor = CombatAction::SkillUse {
        source: HERO,
        skill: SkillId::from("meteor"),
        targets: vec![GOBLIN],
    };
    assert_eq!(
        encounter.submit(meteor.clone()),
        Err(SubmitError::Discarded(ResolutionError::UnknownSkill(
            SkillId::from("meteor")
        )))
    );
    assert_eq!(
        encounter.log().last(),
        Some(&CombatLogEntry::ActionDiscarded {
            action: meteor,
            reason: ResolutionError::UnknownSkill(SkillId::from("meteor")),
        })
    );

    assert_eq!(
        encounter.submit(attack(HERO, CombatantId(99))),
        Err(SubmitError::Discarded(ResolutionError::UnknownCombatant(
            CombatantId(99)
        )))
    );
    assert_eq!(
        encounter.submit(CombatAction::ItemUse {
            source: HERO,
            item: ItemId::from("elixir"),
            target: HERO,
        }),
        Err(SubmitError::Discarded(ResolutionError::UnknownItem(
            ItemId::from("elixir")
        )))
    );

    assert_eq!(encounter.current_actor(), Some(HERO));
    assert_eq!(encounter.combatant(GOBLIN).map(CombatantState::hp), Some(60));
    assert!(
        !encounter
            .log()
            .iter()
            .any(|e| matches!(e, CombatLogEntry::ActionQueued { .. }))
    );
}

#[test]
fn skip_turn_status_passes_the_slot() {
    let catalog = catalog();
    let rng = FixedRng::new(50);
    let env = BattleEnv::with_catalog(&catalog, &rng);
    let mut encounter = Encounter::new(duel(EncounterConfig::new(7)), env).expect("valid setup");
    encounter.start();

    encounter
        .submit(CombatAction::ItemUse {
            source: HERO,
            item: ItemId::from("stun_dart"),
            target: GOBLIN,
        })
        .expect("item resolves");

    let entries = encounter.log().entries();
    assert!(entries.contains(&CombatLogEntry::TurnSkipped {
        combatant: GOBLIN,
        reason: StatusId::from("paralysis"),
    }));
    assert!(entries.contains(&CombatLogEntry::StatusExpired {
        target: GOBLIN,
        status: StatusId::from("paralysis"),
    }));
    assert_eq!(encounter.round(), 2);
    assert_eq!(encounter.current_actor(), Some(HERO));
    assert_eq!(encounter.combatant(HERO).map(CombatantState::hp), Some(120));
}

#[test]
fn simultaneous_wipe_is_a_defeat() {
    let catalog = catalog();
    let rng = FixedRng::new(50);
    let env = BattleEnv::with_catalog(&catalog, &rng);
    let setup = EncounterSetup::new(EncounterConfig::new(7))
        .with_ally(Combatant::new(1, "Pyro", Side::Player, StatBlock::new(4).with_speed(10)))
        .with_enemy(Combatant::new(2, "Wisp", Side::Enemy, StatBlock::new(4).with_speed(4)));
    let mut encounter = Encounter::new(setup, env).expect("valid setup");
    encounter.start();

    encounter
        .submit(CombatAction::SkillUse {
            source: HERO,
            skill: SkillId::from("immolate"),
            targets: vec![GOBLIN, HERO],
        })
        .expect("skill resolves");
    // the wisp hits for the minimum 1, then both burn for 5
    encounter.run_enemy_turns().expect("wisp acts");

    assert_eq!(encounter.outcome(), Some(&CombatOutcome::Defeat));
    let defeated: Vec<CombatantId> = encounter
        .log()
        .iter()
        .filter_map(|e| match e {
            CombatLogEntry::Defeated { combatant } => Some(*combatant),
            _ => None,
        })
        .collect();
    assert_eq!(defeated, [HERO, GOBLIN]);
}

struct Flat(Rewards);

impl RewardPolicy for Flat {
    fn victory_rewards(&self, _combatants: &[CombatantState]) -> Rewards {
        self.0.clone()
    }
}

#[test]
fn reward_policy_is_injectable() {
    let catalog = catalog();
    let rng = FixedRng::new(50);
    let env = BattleEnv::with_catalog(&catalog, &rng);
    let mut encounter = Encounter::new(duel(EncounterConfig::new(7)), env)
        .expect("valid setup")
        .with_rewards(Box::new(Flat(Rewards::new(999, 0))));
    encounter.start();

    play_out(&mut encounter, 20);
    assert_eq!(
        encounter.outcome(),
        Some(&CombatOutcome::Victory {
            rewards: Rewards::new(999, 0)
        })
    );
}

fn replay(seed: u64, catalog: &Catalog) -> (CombatLog, Option<CombatOutcome>) {
    let rng = PcgRng;
    let env = BattleEnv::with_catalog(catalog, &rng);
    let setup = EncounterSetup::new(EncounterConfig::new(seed))
        .with_ally(hero(1))
        .with_ally(Combatant::new(
            3,
            "Squire",
            Side::Ally,
            StatBlock::new(50).with_strength(8).with_speed(6),
        ))
        .with_enemy(goblin(2))
        .with_enemy(goblin(4));
    let mut encounter = Encounter::new(setup, env).expect("valid setup");
    encounter.start();
    play_out(&mut encounter, 200);
    (encounter.log().clone(), encounter.outcome().cloned())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn same_seed_and_actions_give_identical_logs(seed in any::<u64>()) {
        let catalog = catalog();
        let (first_log, first_outcome) = replay(seed, &catalog);
        let (second_log, second_outcome) = replay(seed, &catalog);

        prop_assert_eq!(first_log, second_log);
        prop_assert_eq!(first_outcome, second_outcome);
    }
}

#[test]
fn repeated_target_is_discarded() {
    let catalog = catalog().with_skill(SkillDefinition::new("jab").with_effect(Effect::damage(10)));
    let rng = FixedRng::new(50);
    let env = BattleEnv::with_catalog(&catalog, &rng);
    let mut encounter = Encounter::new(duel(EncounterConfig::new(7)), env).expect("valid setup");
    encounter.start();

    let result = encounter.submit(CombatAction::SkillUse {
        source: HERO,
        skill: SkillId::from("jab"),
        targets: vec![GOBLIN; 5],
    });

    assert_eq!(
        result,
        Err(SubmitError::Discarded(ResolutionError::DuplicateTarget(GOBLIN)))
    );
    assert_eq!(encounter.combatant(GOBLIN).map(CombatantState::hp), Some(60));
    assert_eq!(encounter.current_actor(), Some(HERO));
}

#[test]
fn stun_from_a_slower_caster_skips_the_next_turn() {
    let catalog = catalog();
    let rng = FixedRng::new(50);
    let env = BattleEnv::with_catalog(&catalog, &rng);
    let sprinter = Combatant::new(
        2,
        "Sprinter",
        Side::Enemy,
        StatBlock::new(60).with_strength(6).with_speed(30),
    );
    let setup = EncounterSetup::new(EncounterConfig::new(7))
        .with_ally(hero(1))
        .with_enemy(sprinter);
    let mut encounter = Encounter::new(setup, env).expect("valid setup");
    encounter.start();

    // the sprinter has already acted when the dart lands
    assert_eq!(encounter.run_enemy_turns(), Ok(1));
    encounter
        .submit(CombatAction::ItemUse {
            source: HERO,
            item: ItemId::from("stun_dart"),
            target: GOBLIN,
        })
        .expect("item resolves");

    let paralysis = StatusId::from("paralysis");
    assert_eq!(encounter.round(), 2);
    assert_eq!(encounter.current_actor(), Some(HERO));
    let entries = encounter.log().entries();
    let skipped = entries
        .iter()
        .position(|e| {
            *e == CombatLogEntry::TurnSkipped {
                combatant: GOBLIN,
                reason: paralysis.clone(),
            }
        })
        .expect("sprinter skipped in round 2");
    let round_two = entries
        .iter()
        .position(|e| matches!(e, CombatLogEntry::RoundStarted { round: 2, .. }))
        .expect("round 2 started");
    assert!(round_two < skipped);
    assert_eq!(
        entries.get(skipped + 1),
        Some(&CombatLogEntry::StatusExpired {
            target: GOBLIN,
            status: paralysis,
        })
    );
    // one sprinter hit in round 1, none in round 2
    assert_eq!(encounter.combatant(HERO).map(CombatantState::hp), Some(114));
}

/// Submits a retreat for the hero under `Chance(chance)` with every d100 pinned
/// to `roll`; returns the outcome, the last log entry and who is up next.
fn attempt_retreat(
    roll: u32,
    chance: u32,
) -> (Option<CombatOutcome>, Option<CombatLogEntry>, Option<CombatantId>) {
    let catalog = catalog();
    let rng = FixedRng::new(roll);
    let env = BattleEnv::with_catalog(&catalog, &rng);
    let config = EncounterConfig::new(7).with_retreat(RetreatRule::Chance(chance));
    let mut encounter = Encounter::new(duel(config), env).expect("valid setup");
    encounter.start();
    encounter
        .submit(CombatAction::Retreat { source: HERO })
        .expect("retreat resolves");
    (
        encounter.outcome().cloned(),
        encounter.log().last().cloned(),
        encounter.current_actor(),
    )
}

#[test]
fn retreat_chance_is_an_inclusive_roll() {
    let (outcome, _, actor) = attempt_retreat(30, 30);
    assert_eq!(outcome, Some(CombatOutcome::Retreat { side: Side::Player }));
    assert_eq!(actor, None);

    let (outcome, last, actor) = attempt_retreat(31, 30);
    assert_eq!(outcome, None);
    assert_eq!(
        last,
        Some(CombatLogEntry::RetreatFailed {
            combatant: HERO,
            side: Side::Player,
        })
    );
    assert_eq!(actor, Some(GOBLIN));
}

#[test]
fn content_naming_a_missing_status_is_discarded() {
    let catalog = catalog()
        .with_skill(SkillDefinition::new("hex").with_effect(Effect::apply_status("doom", 100)));
    assert_eq!(catalog.dangling_statuses(), vec![&StatusId::from("doom")]);
    let rng = FixedRng::new(50);
    let env = BattleEnv::with_catalog(&catalog, &rng);
    let mut encounter = Encounter::new(duel(EncounterConfig::new(7)), env).expect("valid setup");
    encounter.start();

    let hex = CombatAction::SkillUse {
        source: HERO,
        skill: SkillId::from("hex"),
        targets: vec![GOBLIN],
    };
    assert_eq!(
        encounter.submit(hex),
        Err(SubmitError::Discarded(ResolutionError::UnknownStatus(
            StatusId::from("doom")
        )))
    );
    assert!(encounter.combatant(GOBLIN).is_some_and(|g| g.statuses().is_empty()));
    assert_eq!(encounter.current_actor(), Some(HERO));
}

#[test]
fn low_roll_lands_a_logged_critical() {
    let catalog = catalog();
    // 5 is within both the 95% hit chance and the 5% crit chance
    let rng = FixedRng::new(5);
    let env = BattleEnv::with_catalog(&catalog, &rng);
    let mut encounter = Encounter::new(duel(EncounterConfig::new(7)), env).expect("valid setup");
    encounter.start();

    encounter.submit(attack(HERO, GOBLIN)).expect("attack resolves");

    assert_eq!(
        encounter.log().last(),
        Some(&CombatLogEntry::Damage {
            attacker: Some(HERO),
            target: GOBLIN,
            amount: 30,
            source: DamageSource::Attack,
            critical: true,
            hp_left: 30,
        })
    );
}

#[test]
fn defeated_combatant_never_gets_to_act() {
    let catalog = catalog();
    let rng = FixedRng::new(50);
    let env = BattleEnv::with_catalog(&catalog, &rng);
    let runt = Combatant::new(2, "Runt", Side::Enemy, StatBlock::new(15).with_speed(4));
    let setup = EncounterSetup::new(EncounterConfig::new(7))
        .with_ally(hero(1))
        .with_enemy(runt)
        .with_enemy(goblin(3));
    let mut encounter = Encounter::new(setup, env).expect("valid setup");
    encounter.start();

    encounter.submit(attack(HERO, GOBLIN)).expect("attack resolves");
    assert!(encounter.combatant(GOBLIN).is_some_and(CombatantState::is_defeated));
    // the runt's slot is passed without a turn
    assert_eq!(encounter.current_actor(), Some(CombatantId(3)));

    let entries = encounter.log().len();
    assert_eq!(
        encounter.submit(attack(GOBLIN, HERO)),
        Err(SubmitError::OutOfTurn {
            expected: CombatantId(3),
            got: GOBLIN,
        })
    );
    assert_eq!(encounter.log().len(), entries);
    assert_eq!(encounter.combatant(HERO).map(CombatantState::hp), Some(120));
}
