//! pet-runner: headless runner and IPC host for the virtual pet.
//!
//! Usage:
//!   pet-runner --seed 12345 --ticks 30 --db pet.db --name Biscuit --species cat
//!   pet-runner --db pet.db --ipc-mode

use anyhow::Result;
use petsim_core::{
    action::{ActionOutcome, PetAction},
    config::PetConfig,
    ledger::ExpenseEntry,
    mood::{Mood, VisualSignals},
    profile::Species,
    session::{self, PetSession, SharedSession},
    store::PetStore,
    ticker::TickerHandle,
    types::{Money, Tick},
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Tick { count: u64 },
    Action { action: PetAction },
    StartClock {
        #[serde(default)]
        interval_ms: Option<u64>,
    },
    StopClock,
    Reset,
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    tick:           Tick,
    clock_running:  bool,
    name:           String,
    species:        Species,
    created:        bool,
    hunger:         f64,
    happiness:      f64,
    health:         f64,
    cleanliness:    f64,
    energy:         f64,
    money:          Money,
    total_expenses: Money,
    expenses:       Vec<ExpenseEntry>,
    mood:           Option<Mood>,
    message:        String,
    visual:         VisualSignals,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome:        Option<ActionOutcome>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 30u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = str_arg(&args, "--db").unwrap_or(":memory:");
    let name = str_arg(&args, "--name").unwrap_or("Fluffy");
    let species = str_arg(&args, "--species")
        .and_then(Species::parse)
        .unwrap_or_default();

    let mut config = match str_arg(&args, "--config") {
        Some(path) => PetConfig::load(path)?,
        None => PetConfig::default(),
    };
    if let Some(slot) = str_arg(&args, "--slot") {
        config.save_slot = slot.to_string();
    }

    if !ipc_mode {
        println!("Virtual Pet - pet-runner");
        println!("  seed:   {seed}");
        println!("  ticks:  {ticks}");
        println!("  db:     {db}");
        println!("  slot:   {}", config.save_slot);
        println!();
    }

    let store = PetStore::open(db)?;
    let mut session = PetSession::open(store, config, seed)?;

    if ipc_mode {
        run_ipc_loop(session.into_shared())?;
    } else {
        if !session.engine().profile().created {
            session.dispatch(PetAction::CreatePet { name: name.to_string(), species })?;
        }
        session.run_ticks(ticks)?;
        print_summary(&session)?;
    }

    Ok(())
}

fn run_ipc_loop(shared: SharedSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut ticker: Option<TickerHandle> = None;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&line) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Unknown command: {line}");
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                stdout.flush()?;
                continue;
            }
        };

        let Some(state) = handle_command(&shared, &mut ticker, cmd)? else {
            break;
        };
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }

    if let Some(handle) = ticker.take() {
        handle.cancel();
    }
    session::lock(&shared)?.flush()?;
    Ok(())
}

/// Apply one IPC command and snapshot the resulting UI state.
/// Returns None for `quit`.
fn handle_command(
    shared: &SharedSession,
    ticker: &mut Option<TickerHandle>,
    cmd: IpcCommand,
) -> Result<Option<UiState>> {
    let mut outcome = None;
    match cmd {
        IpcCommand::Quit => return Ok(None),
        IpcCommand::GetState => {}
        IpcCommand::Tick { count } => {
            session::lock(shared)?.run_ticks(count)?;
        }
        IpcCommand::Action { action } => {
            outcome = Some(session::lock(shared)?.dispatch(action)?);
        }
        IpcCommand::StartClock { interval_ms } => {
            if let Some(old) = ticker.take() {
                old.cancel();
            }
            if let Some(ms) = interval_ms.filter(|ms| *ms > 0) {
                session::lock(shared)?.set_tick_interval_ms(ms);
            }
            *ticker = Some(session::start_ticker(shared)?);
        }
        IpcCommand::StopClock => {
            if let Some(handle) = ticker.take() {
                handle.cancel();
            }
        }
        IpcCommand::Reset => {
            session::lock(shared)?.reset()?;
        }
    }

    let guard = session::lock(shared)?;
    Ok(Some(build_ui_state(&guard, ticker.is_some(), outcome)))
}

fn build_ui_state(
    session: &PetSession,
    clock_running: bool,
    outcome: Option<ActionOutcome>,
) -> UiState {
    let engine = session.engine();
    let profile = engine.profile();
    let stats = engine.stats();
    UiState {
        tick: engine.clock.current_tick,
        clock_running,
        name: profile.name.clone(),
        species: profile.species,
        created: profile.created,
        hunger: stats.hunger(),
        happiness: stats.happiness(),
        health: stats.health(),
        cleanliness: stats.cleanliness(),
        energy: stats.energy(),
        money: engine.balance(),
        total_expenses: engine.total_expenses(),
        expenses: engine.economy().ledger.entries().cloned().collect(),
        mood: engine.mood(),
        message: engine.status_message().to_string(),
        visual: engine.visual_signals(),
        outcome,
    }
}

fn print_summary(session: &PetSession) -> Result<()> {
    let engine = session.engine();
    let profile = engine.profile();
    let stats = engine.stats();
    let events = session.events()?;

    println!("=== PET SUMMARY ===");
    println!("  session:      {}", session.session_id);
    println!("  pet:          {} the {}", profile.name, profile.species);
    println!("  final tick:   {}", engine.clock.current_tick);
    println!("  hunger:       {:.1}", stats.hunger());
    println!("  happiness:    {:.1}", stats.happiness());
    println!("  health:       {:.1}", stats.health());
    println!("  cleanliness:  {:.1}", stats.cleanliness());
    println!("  energy:       {:.1}", stats.energy());
    println!("  mood:         {:?}", engine.mood());
    println!("  status:       {}", engine.status_message());
    println!("  events:       {}", events.len());

    println!();
    println!("=== MONEY ===");
    println!("  balance:        ${}", engine.balance());
    println!("  total expenses: ${}", engine.total_expenses());
    if engine.economy().ledger.is_empty() {
        println!("  (No expenses yet)");
    } else {
        for e in engine.economy().ledger.entries().take(10) {
            println!("  {} - ${} - {}", e.label, e.amount, e.timestamp);
        }
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
