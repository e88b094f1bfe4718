//! galley-runner: headless driver for the Galley core.
//!
//! Usage:
//!   galley-runner --db galley-save.db --data-dir ./data --seconds 30
//!   galley-runner --db galley-save.db --data-dir ./data --ipc-mode

use anyhow::Result;
use chrono::Utc;
use galley_core::{catalog::RecipeCatalog, engine::GameCore, store::SaveStore};
use std::collections::BTreeMap;
use std::env;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

/// Wall-clock slice fed into each simulation step in batch mode.
const STEP_SECONDS: f64 = 0.1;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum HostCommand {
    /// Advance simulated time without sleeping.
    Tick { seconds: f64 },
    StartCooking { recipe_id: String },
    Pause,
    Resume,
    /// Backgrounding signal: flush unsaved progress.
    Suspend,
    GetState,
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    current_energy: u32,
    max_energy:     u32,
    advancing:      bool,
    cooking:        Option<String>,
    cook_remaining: f64,
    inventory:      BTreeMap<String, u32>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seconds = parse_arg(&args, "--seconds", 30.0f64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or("galley-save.db");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");

    let store = SaveStore::open(db)?;
    let catalog = RecipeCatalog::load(data_dir)?;
    log::info!("loaded {} recipes from {data_dir}", catalog.len());

    let mut core = GameCore::new(store, catalog);
    core.subscribe(Box::new(|event| {
        log::info!("event: {event:?}");
    }));
    core.recover(Utc::now().timestamp());

    if ipc_mode {
        run_ipc_loop(&mut core)?;
    } else {
        run_batch(&mut core, seconds);
        print_summary(&core)?;
    }

    core.shutdown(Utc::now().timestamp());
    Ok(())
}

/// Step the core at a fixed cadence for `seconds` of real time.
fn run_batch(core: &mut GameCore, seconds: f64) {
    println!("Galley — headless run for {seconds:.0}s");
    let steps = (seconds / STEP_SECONDS).ceil() as u64;
    for _ in 0..steps {
        thread::sleep(Duration::from_millis((STEP_SECONDS * 1000.0) as u64));
        core.step(STEP_SECONDS);
    }
}

/// Drive the core from newline-delimited JSON commands on stdin — the
/// shape a UI process speaks to us in.
fn run_ipc_loop(core: &mut GameCore) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: HostCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{err_json}")?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            HostCommand::Quit => break,
            HostCommand::Tick { seconds } => core.step(seconds),
            HostCommand::StartCooking { recipe_id } => {
                if let Err(refusal) = core.start_cooking(&recipe_id) {
                    let err_json = serde_json::json!({ "refused": refusal.to_string() });
                    writeln!(stdout, "{err_json}")?;
                    stdout.flush()?;
                    continue;
                }
            }
            HostCommand::Pause => core.set_advancing(false),
            HostCommand::Resume => core.set_advancing(true),
            HostCommand::Suspend => core.suspend(Utc::now().timestamp()),
            HostCommand::GetState => {}
        }

        writeln!(stdout, "{}", serde_json::to_string(&build_ui_state(core))?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn build_ui_state(core: &GameCore) -> UiState {
    let (current_energy, max_energy) = core.energy();
    let (cooking, cook_remaining) = match core.current_cook() {
        Some((id, left)) => (Some(id.to_string()), left),
        None => (None, 0.0),
    };
    UiState {
        current_energy,
        max_energy,
        advancing: core.is_advancing(),
        cooking,
        cook_remaining,
        inventory: core.state().inventory.clone(),
    }
}

fn print_summary(core: &GameCore) -> Result<()> {
    let (current, max) = core.energy();

    println!("=== SESSION SUMMARY ===");
    println!("  energy:    {current}/{max}");
    match core.current_cook() {
        Some((id, left)) => println!("  cooking:   {id} ({left:.0}s left)"),
        None => println!("  cooking:   (idle)"),
    }
    println!("  pantry:");
    for (item, count) in &core.state().inventory {
        println!("    {item:<10} x{count}");
    }
    println!("  recipes:");
    let mut ids: Vec<&str> = core.catalog().ids().collect();
    ids.sort_unstable();
    for id in ids {
        if let Some(recipe) = core.catalog().get(id) {
            let ready = core.has_ingredients(&recipe.ingredient_costs);
            println!(
                "    {:<16} {:>4.0}s  {}",
                recipe.label,
                recipe.required_time,
                if ready { "ready" } else { "short on ingredients" }
            );
        }
    }
    println!("  saves:     {}", core.store().revision()?);
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
