//! Host session — the one owner of the engine and its save slot.
//!
//! A session pairs a PetEngine with a PetStore. Every state-changing
//! call is persisted before it returns: the journal rows first, then the
//! slot's snapshot. Declines change nothing, so they only add journal rows.
//!
//! For live play the session goes behind `SharedSession`; that mutex is
//! the single mutation lock shared by the ticker and action callers.

use crate::{
    action::{ActionOutcome, PetAction},
    config::PetConfig,
    engine::PetEngine,
    error::{SimError, SimResult},
    event::{EventLogEntry, PetEvent},
    snapshot::PetSnapshot,
    store::PetStore,
    ticker::{Ticker, TickerHandle},
    types::{SessionId, SlotName, Tick},
};
use std::sync::{Arc, Mutex, MutexGuard};

pub type SharedSession = Arc<Mutex<PetSession>>;

pub struct PetSession {
    pub session_id: SessionId,
    slot:   SlotName,
    engine: PetEngine,
    store:  PetStore,
}

impl PetSession {
    /// Open the configured save slot with a seeded engine.
    pub fn open(store: PetStore, config: PetConfig, seed: u64) -> SimResult<Self> {
        Self::open_with_engine(store, PetEngine::new(config, seed), seed)
    }

    /// Open with a caller-built engine (scripted randomness, pinned time).
    /// Restores the slot's snapshot if one exists.
    pub fn open_with_engine(store: PetStore, mut engine: PetEngine, seed: u64) -> SimResult<Self> {
        store.migrate()?;
        let session_id = uuid::Uuid::new_v4().to_string();
        let slot = engine.config().save_slot.clone();
        store.insert_session(&session_id, &slot, seed, env!("CARGO_PKG_VERSION"))?;

        match store.load_snapshot(&slot)? {
            Some(json) => engine.restore(&PetSnapshot::from_json(&json)),
            None => log::info!("slot '{slot}' is empty; starting a new pet"),
        }

        let mut session = Self { session_id, slot, engine, store };
        session.commit()?;
        Ok(session)
    }

    pub fn engine(&self) -> &PetEngine { &self.engine }
    pub fn store(&self) -> &PetStore   { &self.store }
    pub fn slot(&self) -> &str         { &self.slot }

    pub fn dispatch(&mut self, action: PetAction) -> SimResult<ActionOutcome> {
        let outcome = self.engine.apply(action);
        self.commit()?;
        Ok(outcome)
    }

    pub fn tick(&mut self) -> SimResult<Option<Tick>> {
        let tick = self.engine.tick();
        self.commit()?;
        Ok(tick)
    }

    pub fn run_ticks(&mut self, n: u64) -> SimResult<u64> {
        let mut applied = 0;
        for _ in 0..n {
            if self.tick()?.is_some() {
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Takes effect the next time a ticker is started.
    pub fn set_tick_interval_ms(&mut self, interval_ms: u64) {
        self.engine.clock.interval_ms = interval_ms;
    }

    /// Discard the pet and start over in the same slot.
    pub fn reset(&mut self) -> SimResult<()> {
        self.engine.reset();
        self.commit()
    }

    /// Write the current snapshot regardless of pending changes.
    pub fn flush(&self) -> SimResult<()> {
        let json = self.engine.snapshot().to_json()?;
        self.store.save_snapshot(&self.slot, &json)?;
        log::debug!("slot '{}' saved", self.slot);
        Ok(())
    }

    pub fn events(&self) -> SimResult<Vec<EventLogEntry>> {
        self.store.events_for_session(&self.session_id)
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    /// Journal pending events; save the slot if any of them changed state.
    fn commit(&mut self) -> SimResult<()> {
        let events = self.engine.drain_events();
        let tick = self.engine.clock.current_tick;
        let mut changed = false;

        for event in &events {
            changed |= !matches!(event, PetEvent::ActionDeclined { .. });
            let entry = EventLogEntry {
                id:         None,
                session_id: self.session_id.clone(),
                tick,
                event_type: event.type_name().to_string(),
                payload:    serde_json::to_string(event)?,
            };
            self.store.append_event(&entry)?;
        }

        if changed {
            self.flush()?;
        }
        Ok(())
    }
}

/// Lock the shared session for one operation.
pub fn lock(shared: &SharedSession) -> SimResult<MutexGuard<'_, PetSession>> {
    shared.lock().map_err(|_| SimError::LockPoisoned)
}

/// Drive the shared session's decay from a background ticker at the
/// configured interval. Each tick holds the session lock throughout,
/// so never cancel the returned handle while holding that lock.
pub fn start_ticker(shared: &SharedSession) -> SimResult<TickerHandle> {
    let interval = lock(shared)?.engine.clock.interval();
    let session = Arc::clone(shared);
    Ok(Ticker::start(interval, move || match lock(&session) {
        Ok(mut guard) => {
            if let Err(e) = guard.tick() {
                log::error!("tick failed: {e}");
            }
        }
        Err(e) => log::error!("tick skipped: {e}"),
    }))
}
