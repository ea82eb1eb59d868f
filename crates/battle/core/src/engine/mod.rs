//! Encounter state machine.
//!
//! [`Encounter`] is the single writer for one battle. It owns the combatant
//! states, the turn order and the log, and routes every submission through
//! the same pipeline:
//!
//! ```text
//! submit → turn check → pre_validate → ActionQueued → apply
//!        → termination check → next slot (automatic skips, upkeep)
//! ```
//!
//! Phases move strictly forward: `Setup → InProgress → Finished`. Once
//! finished, no submission mutates anything.

mod errors;
mod outcome;
mod policy;
mod turns;
mod upkeep;

pub use errors::{SetupError, SubmitError};
pub use outcome::{CombatOutcome, RewardPolicy, Rewards, RosterBounty};
pub use policy::{EnemyPolicy, FocusWeakest};
pub use turns::{TurnOrder, compute_order};

use std::collections::BTreeSet;

use crate::action::{self, CombatAction, ResolveContext, Resolved};
use crate::config::EncounterConfig;
use crate::env::BattleEnv;
use crate::log::{CombatLog, CombatLogEntry};
use crate::state::{Combatant, CombatantId, CombatantState, Side};
use crate::stats::DerivedStats;

/// Rosters and rules handed over by the encounter coordinator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterSetup {
    /// Player and Ally combatants, in registration order.
    pub allies: Vec<Combatant>,
    /// Enemy combatants, registered after every ally.
    pub enemies: Vec<Combatant>,
    pub config: EncounterConfig,
}

impl EncounterSetup {
    pub fn new(config: EncounterConfig) -> Self {
        Self {
            allies: Vec::new(),
            enemies: Vec::new(),
            config,
        }
    }

    pub fn with_ally(mut self, combatant: Combatant) -> Self {
        self.allies.push(combatant);
        self
    }

    pub fn with_enemy(mut self, combatant: Combatant) -> Self {
        self.enemies.push(combatant);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    Setup,
    InProgress,
    Finished(CombatOutcome),
}

/// Copy of the observable state after a resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub round: u32,
    pub current_actor: Option<CombatantId>,
    pub combatants: Vec<CombatantState>,
    pub outcome: Option<CombatOutcome>,
}

/// Result of an accepted submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Resolved(BattleSnapshot),
    /// The encounter had already finished; only `ActionIgnored` was logged.
    Ignored,
}

/// One battle, from setup to outcome.
pub struct Encounter<'e> {
    env: BattleEnv<'e>,
    config: EncounterConfig,
    combatants: Vec<CombatantState>,
    order: TurnOrder,
    log: CombatLog,
    phase: BattlePhase,
    /// Advanced once per resolved action and once per upkeep; seeds rolls.
    nonce: u64,
    policy: Box<dyn EnemyPolicy>,
    rewards: Box<dyn RewardPolicy>,
}

impl<'e> Encounter<'e> {
    /// Validates the rosters and builds combatant states at full HP.
    pub fn new(setup: EncounterSetup, env: BattleEnv<'e>) -> Result<Self, SetupError> {
        let EncounterSetup {
            allies,
            enemies,
            config,
        } = setup;

        if allies.is_empty() {
            return Err(SetupError::EmptySide("ally"));
        }
        if enemies.is_empty() {
            return Err(SetupError::EmptySide("enemy"));
        }

        let mut seen = BTreeSet::new();
        let rosters = [("ally", &allies), ("enemy", &enemies)];
        for (roster, members) in rosters {
            for combatant in members.iter() {
                if (combatant.side == Side::Enemy) != (roster == "enemy") {
                    return Err(SetupError::SideMismatch {
                        id: combatant.id,
                        side: combatant.side,
                        roster,
                    });
                }
                if !seen.insert(combatant.id) {
                    return Err(SetupError::DuplicateId(combatant.id));
                }
                if DerivedStats::max_hp(&combatant.stats, &config.rules) == 0 {
                    return Err(SetupError::ZeroMaxHp(combatant.id));
                }
            }
        }

        let combatants = allies
            .into_iter()
            .chain(enemies)
            .map(|combatant| CombatantState::new(combatant, &config.rules))
            .collect();

        Ok(Self {
            env,
            config,
            combatants,
            order: TurnOrder::default(),
            log: CombatLog::new(),
            phase: BattlePhase::Setup,
            nonce: 0,
            policy: Box::new(FocusWeakest),
            rewards: Box::new(RosterBounty),
        })
    }

    /// Replaces the enemy decision policy.
    pub fn with_policy(mut self, policy: Box<dyn EnemyPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the victory reward policy.
    pub fn with_rewards(mut self, rewards: Box<dyn RewardPolicy>) -> Self {
        self.rewards = rewards;
        self
    }

    /// Computes the round-1 order and moves to `InProgress`. No-op outside
    /// `Setup`.
    pub fn start(&mut self) {
        if self.phase != BattlePhase::Setup {
            return;
        }
        tracing::debug!(
            seed = self.config.seed,
            combatants = self.combatants.len(),
            "encounter started"
        );
        self.phase = BattlePhase::InProgress;
        self.begin_round(1);
        self.settle();
    }

    /// The combatant expected to act next, after automatic skips.
    pub fn current_actor(&self) -> Option<CombatantId> {
        match self.phase {
            BattlePhase::InProgress => self.order.current(),
            _ => None,
        }
    }

    /// Resolves one action for the current actor.
    pub fn submit(&mut self, action: CombatAction) -> Result<Submission, SubmitError> {
        match self.phase {
            BattlePhase::Setup => return Err(SubmitError::NotStarted),
            BattlePhase::Finished(_) => {
                let source = action.source();
                tracing::debug!(action = action.as_ref(), %source, "ignored after finish");
                self.log.push(CombatLogEntry::ActionIgnored { action });
                return Ok(Submission::Ignored);
            }
            BattlePhase::InProgress => {}
        }

        let expected = self.current_actor().ok_or(SubmitError::NotStarted)?;
        let got = action.source();
        if got != expected {
            tracing::warn!(%expected, %got, "out-of-turn submission");
            return Err(SubmitError::OutOfTurn { expected, got });
        }

        let plan = match action::pre_validate(&action, &self.combatants, self.env) {
            Ok(plan) => plan,
            Err(reason) => {
                tracing::warn!(action = action.as_ref(), %reason, "action discarded");
                self.log.push(CombatLogEntry::ActionDiscarded {
                    action,
                    reason: reason.clone(),
                });
                return Err(SubmitError::Discarded(reason));
            }
        };

        let round = self.order.round();
        tracing::debug!(action = action.as_ref(), actor = %expected, round, "resolving");
        self.log.push(CombatLogEntry::ActionQueued { round, action });

        self.nonce += 1;
        let mut ctx = ResolveContext::new(
            &mut self.combatants,
            self.env,
            &self.config,
            &mut self.log,
            self.nonce,
        );
        match action::apply(plan, &mut ctx) {
            Resolved::Retreated(side) => self.finish(CombatOutcome::Retreat { side }),
            Resolved::Continue => {
                self.check_termination();
            }
        }

        if self.phase == BattlePhase::InProgress {
            self.order.advance();
            self.settle();
        }

        Ok(Submission::Resolved(self.snapshot()))
    }

    /// Lets the enemy policy act for the current actor.
    ///
    /// Fails with [`SubmitError::AwaitingPlayer`] when a party member is up.
    pub fn advance(&mut self) -> Result<Submission, SubmitError> {
        match self.phase {
            BattlePhase::Setup => return Err(SubmitError::NotStarted),
            BattlePhase::Finished(_) => return Ok(Submission::Ignored),
            BattlePhase::InProgress => {}
        }

        let actor = self.current_actor().ok_or(SubmitError::NotStarted)?;
        let state = self.combatant(actor).ok_or(SubmitError::NotStarted)?;
        if state.side().is_party() {
            return Err(SubmitError::AwaitingPlayer(actor));
        }

        let action = self
            .policy
            .choose(state, &self.combatants, self.env)
            .unwrap_or(CombatAction::Defend { source: actor });
        self.submit(action)
    }

    /// Runs enemy turns until a party member is up or the battle ends.
    /// Returns how many enemy actions resolved.
    pub fn run_enemy_turns(&mut self) -> Result<usize, SubmitError> {
        if self.phase == BattlePhase::Setup {
            return Err(SubmitError::NotStarted);
        }

        let mut resolved = 0;
        while let Some(actor) = self.current_actor() {
            if self.combatant(actor).is_none_or(|state| state.side().is_party()) {
                break;
            }
            self.advance()?;
            resolved += 1;
        }
        Ok(resolved)
    }

    pub fn turn_order(&self) -> &TurnOrder {
        &self.order
    }

    /// Every combatant in registration order (allies first).
    pub fn combatants(&self) -> &[CombatantState] {
        &self.combatants
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&CombatantState> {
        self.combatants.iter().find(|state| state.id() == id)
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn phase(&self) -> &BattlePhase {
        &self.phase
    }

    pub fn outcome(&self) -> Option<&CombatOutcome> {
        match &self.phase {
            BattlePhase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, BattlePhase::Finished(_))
    }

    /// Current round; 0 before `start`.
    pub fn round(&self) -> u32 {
        self.order.round()
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            round: self.round(),
            current_actor: self.current_actor(),
            combatants: self.combatants.clone(),
            outcome: self.outcome().cloned(),
        }
    }

    fn begin_round(&mut self, round: u32) {
        let slots = compute_order(&self.combatants, self.env.statuses(), &self.config.rules);
        tracing::debug!(round, order = ?slots, "round started");
        self.log.push(CombatLogEntry::RoundStarted {
            round,
            order: slots.clone(),
        });
        self.order = TurnOrder::new(round, slots);
    }

    /// Moves the cursor to the next combatant able to act, running skipped
    /// turns and end-of-round upkeep on the way.
    fn settle(&mut self) {
        while self.phase == BattlePhase::InProgress {
            let Some(id) = self.order.current() else {
                self.end_round();
                continue;
            };
            let Some(state) = self.combatants.iter_mut().find(|state| state.id() == id) else {
                self.order.advance();
                continue;
            };
            if state.is_defeated() {
                self.order.advance();
                continue;
            }

            state.set_defending(false);
            let Some(spent) = state.consume_skip(self.env.statuses()) else {
                return;
            };

            tracing::debug!(combatant = %id, reason = %spent.id, "turn skipped");
            self.log.push(CombatLogEntry::TurnSkipped {
                combatant: id,
                reason: spent.id.clone(),
            });
            if spent.remaining_turns == 0 {
                self.log.push(CombatLogEntry::StatusExpired {
                    target: id,
                    status: spent.id,
                });
            }
            self.order.advance();
        }
    }

    fn end_round(&mut self) {
        let round = self.order.round();
        upkeep::end_of_round(&mut self.combatants, self.env.statuses(), &mut self.log, round);
        self.nonce += 1;

        if !self.check_termination() {
            self.begin_round(round + 1);
        }
    }

    /// Finishes the encounter if a side has fallen. Returns whether it did.
    fn check_termination(&mut self) -> bool {
        let outcome = match outcome::fallen_side(&self.combatants) {
            None => return false,
            Some(side) if side.is_party() => CombatOutcome::Defeat,
            Some(_) => CombatOutcome::Victory {
                rewards: self.rewards.victory_rewards(&self.combatants),
            },
        };
        self.finish(outcome);
        true
    }

    fn finish(&mut self, outcome: CombatOutcome) {
        tracing::info!(?outcome, round = self.order.round(), "encounter finished");
        self.log.push(CombatLogEntry::Outcome(outcome.clone()));
        self.phase = BattlePhase::Finished(outcome);
    }
}
