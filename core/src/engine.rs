//! The pet engine — owns the pet aggregate and every rule that changes it.
//!
//! RULES:
//!   - Only two things mutate state: `tick()` and `apply()`.
//!   - Both run to completion; the host serializes calls.
//!   - Nothing happens before the pet is created: ticks are no-ops and
//!     every action except creation declines.
//!   - A declined action changes no stats, no balance, no ledger.
//!   - All randomness flows through the injected RandomSource, all
//!     timestamps through the injected TimeSource.

use crate::{
    action::{ActionKind, ActionOutcome, DeclineReason, PetAction},
    clock::{SimClock, SystemTimeSource, TimeSource},
    config::{ActionTuning, PetConfig},
    decay::apply_decay,
    event::PetEvent,
    ledger::EconomyState,
    mood::{evaluate_mood, status_message, Mood, VisualSignals, IDLE_MESSAGE},
    profile::{PetProfile, Species},
    rng::{PetRng, RandomSource, RngSlot},
    snapshot::PetSnapshot,
    state::PetState,
    stats::StatBlock,
    types::{Money, Tick},
};

pub const RESTORED_MESSAGE: &str = "Loaded your saved pet.";

pub struct PetEngine {
    pub clock: SimClock,
    state:     PetState,
    config:    PetConfig,
    rng:       Box<dyn RandomSource>,
    time:      Box<dyn TimeSource>,
    message:   String,
    journal:   Vec<PetEvent>,
}

impl PetEngine {
    /// Seeded engine stamping ledger entries with the system clock.
    pub fn new(config: PetConfig, seed: u64) -> Self {
        Self::with_sources(
            config,
            Box::new(PetRng::new(seed, RngSlot::Chore)),
            Box::new(SystemTimeSource),
        )
    }

    pub fn with_sources(
        config: PetConfig,
        rng: Box<dyn RandomSource>,
        time: Box<dyn TimeSource>,
    ) -> Self {
        Self {
            clock: SimClock::new(config.tick_interval_ms),
            state: PetState::default(),
            config,
            rng,
            time,
            message: IDLE_MESSAGE.to_string(),
            journal: Vec::new(),
        }
    }

    // ── Reads ──────────────────────────────────────────────────

    pub fn state(&self) -> &PetState           { &self.state }
    pub fn profile(&self) -> &PetProfile       { &self.state.profile }
    pub fn stats(&self) -> &StatBlock          { &self.state.stats }
    pub fn economy(&self) -> &EconomyState     { &self.state.economy }
    pub fn config(&self) -> &PetConfig         { &self.config }
    pub fn balance(&self) -> Money             { self.state.economy.balance }
    pub fn total_expenses(&self) -> Money      { self.state.economy.total_expenses() }
    pub fn status_message(&self) -> &str       { &self.message }

    pub fn mood(&self) -> Option<Mood> {
        evaluate_mood(self.state.is_created(), &self.state.stats)
    }

    pub fn visual_signals(&self) -> VisualSignals {
        VisualSignals::derive(self.state.profile.species, &self.state.stats)
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PetEvent> {
        std::mem::take(&mut self.journal)
    }

    // ── Decay ──────────────────────────────────────────────────

    /// Advance one tick. Returns the tick number, or None if the pet
    /// does not exist yet (the tick is a no-op).
    pub fn tick(&mut self) -> Option<Tick> {
        if !self.state.is_created() {
            log::trace!("tick skipped: pet not created");
            return None;
        }

        let tick = self.clock.advance();
        let health_delta = apply_decay(&mut self.state.stats, &self.config.decay);
        let mood = self.mood();
        self.refresh_mood_message();

        log::debug!(
            "tick={tick} hunger={:.1} happiness={:.1} health={:.1} cleanliness={:.1} energy={:.1} mood={mood:?}",
            self.state.stats.hunger(),
            self.state.stats.happiness(),
            self.state.stats.health(),
            self.state.stats.cleanliness(),
            self.state.stats.energy(),
        );

        self.journal.push(PetEvent::TickApplied {
            tick,
            stats: self.state.stats,
            health_delta,
            mood,
        });
        Some(tick)
    }

    /// Run n ticks in a loop. Returns how many were applied.
    pub fn run_ticks(&mut self, n: u64) -> u64 {
        (0..n).filter_map(|_| self.tick()).count() as u64
    }

    // ── Actions ────────────────────────────────────────────────

    /// Apply one user intent. Never fails: refusals come back as
    /// `ActionOutcome::Declined` with state untouched.
    pub fn apply(&mut self, action: PetAction) -> ActionOutcome {
        let kind = action.kind();
        let result = match action {
            PetAction::CreatePet { name, species } => self.create(&name, species),
            _ if !self.state.is_created() => Err(DeclineReason::NotCreated),
            PetAction::DoChore => Ok(self.chore()),
            PetAction::Feed   => self.care(kind, self.config.actions.feed.clone()),
            PetAction::Play   => self.care(kind, self.config.actions.play.clone()),
            PetAction::Rest   => self.care(kind, self.config.actions.rest.clone()),
            PetAction::Clean  => self.care(kind, self.config.actions.clean.clone()),
            PetAction::Vet    => self.care(kind, self.config.actions.vet.clone()),
            PetAction::BuyToy => self.care(kind, self.config.actions.buy_toy.clone()),
        };

        match result {
            Ok(outcome) => outcome,
            Err(reason) => {
                log::debug!("{} declined: {reason}", kind.name());
                self.message = reason.to_string();
                self.journal.push(PetEvent::ActionDeclined {
                    tick:   self.clock.current_tick,
                    action: kind,
                    reason: reason.clone(),
                });
                ActionOutcome::Declined { kind, reason }
            }
        }
    }

    pub fn create_pet(&mut self, name: &str, species: Species) -> ActionOutcome {
        self.apply(PetAction::CreatePet { name: name.to_string(), species })
    }

    pub fn feed(&mut self) -> ActionOutcome     { self.apply(PetAction::Feed) }
    pub fn play(&mut self) -> ActionOutcome     { self.apply(PetAction::Play) }
    pub fn rest(&mut self) -> ActionOutcome     { self.apply(PetAction::Rest) }
    pub fn clean(&mut self) -> ActionOutcome    { self.apply(PetAction::Clean) }
    pub fn vet(&mut self) -> ActionOutcome      { self.apply(PetAction::Vet) }
    pub fn buy_toy(&mut self) -> ActionOutcome  { self.apply(PetAction::BuyToy) }
    pub fn do_chore(&mut self) -> ActionOutcome { self.apply(PetAction::DoChore) }

    fn create(&mut self, name: &str, species: Species) -> Result<ActionOutcome, DeclineReason> {
        if self.state.is_created() {
            return Err(DeclineReason::AlreadyCreated);
        }
        let profile = &mut self.state.profile;
        profile.name = PetProfile::normalize_name(name);
        profile.species = species;
        profile.created = true;

        log::info!("pet created: {} the {}", profile.name, profile.species);
        self.message = format!("Say hello to {} the {}!", profile.name, profile.species);
        self.journal.push(PetEvent::PetCreated {
            name:    profile.name.clone(),
            species: profile.species,
        });
        Ok(ActionOutcome::Accepted { kind: ActionKind::CreatePet, spent: 0, earned: 0 })
    }

    fn chore(&mut self) -> ActionOutcome {
        let chore = &self.config.chore;
        let earned = self
            .rng
            .next_in_range(i64::from(chore.min_earning), i64::from(chore.max_earning));
        self.state.economy.earn(earned);

        log::debug!("do_chore earned={earned} balance={}", self.state.economy.balance);
        self.message = format!("You earned ${earned} from chores.");
        self.journal.push(PetEvent::ChoreCompleted {
            tick:    self.clock.current_tick,
            earned,
            balance: self.state.economy.balance,
        });
        ActionOutcome::Accepted { kind: ActionKind::DoChore, spent: 0, earned }
    }

    /// Feed, play, rest, clean, vet, buy toy: pay (if priced), then
    /// apply stat effects. The debit and the ledger entry land together
    /// in `try_spend`; on refusal nothing below it runs.
    fn care(&mut self, kind: ActionKind, tuning: ActionTuning) -> Result<ActionOutcome, DeclineReason> {
        if tuning.cost > 0 {
            let at = self.time.now();
            self.state
                .economy
                .try_spend(kind.expense_label(), tuning.cost, at)
                .map_err(|short| DeclineReason::InsufficientFunds {
                    action:    kind,
                    needed:    short.needed,
                    available: short.available,
                })?;
        }

        for effect in &tuning.effects {
            self.state.stats.adjust(effect.stat, effect.delta);
        }

        log::debug!(
            "{} accepted cost={} balance={}",
            kind.name(),
            tuning.cost,
            self.state.economy.balance
        );
        self.message = kind.success_message(&self.state.profile.name);
        self.journal.push(PetEvent::ActionAccepted {
            tick:    self.clock.current_tick,
            action:  kind,
            spent:   tuning.cost,
            balance: self.state.economy.balance,
        });
        Ok(ActionOutcome::Accepted { kind, spent: tuning.cost, earned: 0 })
    }

    // ── Lifecycle ──────────────────────────────────────────────

    pub fn snapshot(&self) -> PetSnapshot {
        PetSnapshot::capture(&self.state)
    }

    /// Replace the whole aggregate with a snapshot's contents.
    pub fn restore(&mut self, snapshot: &PetSnapshot) {
        self.state = snapshot.to_state();
        self.message = if self.state.is_created() {
            RESTORED_MESSAGE.to_string()
        } else {
            IDLE_MESSAGE.to_string()
        };
        log::info!(
            "restored {} (created={}, {} expenses)",
            self.state.profile.name,
            self.state.is_created(),
            self.state.economy.ledger.len()
        );
        self.journal.push(PetEvent::StateRestored {
            created:       self.state.is_created(),
            expense_count: self.state.economy.ledger.len(),
        });
    }

    /// Replace the whole aggregate with a fresh, uncreated pet.
    pub fn reset(&mut self) {
        self.state = PetState::default();
        self.clock = SimClock::new(self.config.tick_interval_ms);
        self.message = IDLE_MESSAGE.to_string();
        log::info!("pet state reset");
        self.journal.push(PetEvent::StateReset);
    }

    fn refresh_mood_message(&mut self) {
        let state = &self.state;
        self.message = status_message(state.is_created(), &state.profile.name, &state.stats);
    }
}
