//! delve: headless driver for the simulation core
//!
//! Loads an ASCII scenario, lets auto-explore play it for a bounded number of
//! steps and prints the message log as it goes.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use dv_core::action::Command;
use dv_core::explore::{ExploreOutcome, StopReason, explore_step};
use dv_core::object::ItemKind;
use dv_core::player::{LevelChoice, PlayerClass};
use dv_core::scenario::Scenario;
use dv_core::world::{Difficulty, GameOptions};
use dv_core::{GameLoop, GameLoopResult, GameRng, GameState, TurnPhase};

const ARENA: &str = include_str!("../maps/arena.txt");

/// Run a delve scenario without a screen
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Delve - auto-explore a dungeon scenario", long_about = None)]
struct Args {
    /// ASCII map to load (defaults to the bundled arena)
    #[arg(short = 'm', long = "map")]
    map: Option<PathBuf>,

    /// RNG seed
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Player class (warrior, rogue, mage, cleric)
    #[arg(short = 'c', long = "class")]
    class: Option<PlayerClass>,

    /// Difficulty (easy, normal, hard)
    #[arg(short = 'd', long = "difficulty")]
    difficulty: Option<Difficulty>,

    /// Options file with OPTIONS=key:value lines
    #[arg(long = "options")]
    options: Option<PathBuf>,

    /// Auto-explore step budget
    #[arg(short = 't', long = "turns", default_value_t = 200)]
    turns: u32,

    /// Print the final game state as JSON
    #[arg(long = "dump-state")]
    dump_state: bool,

    /// Print the map when the run ends
    #[arg(long = "show-map")]
    show_map: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = load_options(&args)?;
    let scenario = match &args.map {
        Some(path) => {
            Scenario::load(path).with_context(|| format!("loading map {}", path.display()))?
        }
        None => Scenario::parse(ARENA).context("parsing bundled arena")?,
    };

    let seed = options.seed.unwrap_or(0);
    let state = scenario
        .into_state(options.class, &mut GameRng::new(seed))
        .with_options(&options);
    info!(class = %options.class, difficulty = %options.difficulty, seed, "starting run");
    println!("You are a {} on floor {}.", options.class, state.depth);

    let mut game = GameLoop::new(state);
    run(&mut game, args.turns);

    let state = game.state();
    println!(
        "Turn {} | floor {} | hp {}/{} | level {} | gold {} | kills {} | score {}",
        state.turn,
        state.depth,
        state.player.body.hp,
        state.player.body.max_hp,
        state.player.body.level,
        state.player.gold,
        state.player.stats.kills,
        state.score(),
    );
    if args.show_map {
        for row in render_map(state) {
            println!("{}", row);
        }
    }
    if args.dump_state {
        println!("{}", serde_json::to_string_pretty(state)?);
    }
    Ok(())
}

/// Options file first, then command-line overrides. A missing seed is drawn
/// from entropy so the run can be replayed from the log.
fn load_options(args: &Args) -> Result<GameOptions> {
    let mut options = match &args.options {
        Some(path) => GameOptions::load_from_file(path)
            .with_context(|| format!("reading options {}", path.display()))?,
        None => GameOptions::default(),
    };
    if let Some(class) = args.class {
        options.class = class;
    }
    if let Some(difficulty) = args.difficulty {
        options.difficulty = difficulty;
    }
    if let Some(seed) = args.seed {
        options.seed = Some(seed);
    }
    if options.seed.is_none() {
        options.seed = Some(GameRng::from_entropy().seed());
    }
    Ok(options)
}

/// A key press is waiting. Probe errors (no terminal) count as no input.
fn input_pending() -> bool {
    event::poll(Duration::ZERO).unwrap_or(false)
}

fn run(game: &mut GameLoop, budget: u32) {
    for _ in 0..budget {
        let outcome = explore_step(game, input_pending());
        print_messages(game.state());

        let result = match outcome {
            ExploreOutcome::Stepped(result) => result,
            ExploreOutcome::Stopped(StopReason::PhaseChange)
                if game.state().phase == TurnPhase::AwaitingLevelChoice =>
            {
                let result = game.submit(Command::ChooseLevel(LevelChoice::Vitality));
                print_messages(game.state());
                result
            }
            ExploreOutcome::Stopped(StopReason::LowHealth) => match healing_potion(game.state()) {
                Some(index) => {
                    let result = game.submit(Command::UseItem(index));
                    print_messages(game.state());
                    result
                }
                None => {
                    println!("Low on health with nothing to drink; handing back control.");
                    break;
                }
            },
            ExploreOutcome::Stopped(reason) => {
                println!("Stopped: {}.", reason);
                break;
            }
            ExploreOutcome::NothingToDo => break,
        };

        match result {
            GameLoopResult::PlayerDied(cause) => {
                println!("You died: {}.", cause);
                break;
            }
            GameLoopResult::PlayerWon => {
                println!("You won!");
                break;
            }
            other => debug!(?other, "step"),
        }
    }
}

fn healing_potion(state: &GameState) -> Option<usize> {
    state
        .player
        .inventory
        .iter()
        .position(|item| item.kind == ItemKind::HealthPotion)
}

fn print_messages(state: &GameState) {
    for msg in state.messages.current() {
        println!("[{:>4}] {}", state.turn, msg);
    }
}

/// Terrain with items, enemies and the player drawn over it
fn render_map(state: &GameState) -> Vec<String> {
    let mut rows: Vec<Vec<char>> = state.grid.rows().iter().map(|r| r.chars().collect()).collect();
    let mut put = |x: i32, y: i32, glyph: char| {
        if let Some(cell) = rows
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *cell = glyph;
        }
    };
    for item in state.items.iter().filter(|i| i.on_ground) {
        put(item.pos.x, item.pos.y, item.glyph());
    }
    if let Some(shop) = &state.shop {
        put(shop.merchant.x, shop.merchant.y, 'M');
    }
    for enemy in state.living_enemies() {
        put(enemy.pos().x, enemy.pos().y, enemy.body.glyph);
    }
    let pos = state.player.pos();
    put(pos.x, pos.y, '@');
    rows.into_iter().map(|r| r.into_iter().collect()).collect()
}
