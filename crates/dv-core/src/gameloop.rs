//! Main game loop (allmain.c)
//!
//! `GameState` owns everything on the current floor. `GameLoop` owns the state
//! plus the random source and drives one player command at a time through the
//! turn sequence: command, cooldown, status ticks, enemy pass, death check,
//! haste bonus, visibility refresh, level-up hand-off.

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::action::movement::move_player;
use crate::action::pickup::pick_up;
use crate::action::use_item::use_item;
use crate::action::{ActionResult, Command};
use crate::combat::reward_kill;
use crate::consts::{FINAL_DEPTH, MAX_INVENTORY, MESSAGE_HISTORY};
use crate::creature::Position;
use crate::monster::{Enemy, move_enemies};
use crate::object::Item;
use crate::player::{AbilityOutcome, LevelChoice, Player};
use crate::rng::{GameRng, RandomSource};
use crate::world::difficulty::Difficulty;
use crate::world::floor::FloorLayout;
use crate::world::grid::{Grid, Tile, TileGrid};
use crate::world::messages::MessageLog;
use crate::world::options::{DEFAULT_EXPLORE_STOP, GameOptions};
use crate::world::populate::populate_floor;
use crate::world::shop::Shop;
use crate::world::trap::Trap;

/// Where the scheduler is waiting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum TurnPhase {
    /// Ready for a regular command
    #[default]
    AwaitingCommand,
    /// Haste granted one extra movement
    AwaitingBonusMove,
    /// A level-up bonus must be chosen before play resumes
    AwaitingLevelChoice,
    /// Stairs taken; waiting for the next floor's layout
    AwaitingFloor,
    Defeated,
    Victorious,
}

impl TurnPhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, TurnPhase::Defeated | TurnPhase::Victorious)
    }
}

/// Game loop result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameLoopResult {
    /// Turn advanced, keep playing
    Continue,
    /// Command rejected or free; the turn did not advance
    NoTime,
    /// Haste: submit one more move
    BonusMove,
    /// Submit a `ChooseLevel` before anything else
    LevelUp,
    /// The merchant is ready to trade
    ShopOpen,
    /// Took the stairs; call `enter_floor` with the next layout
    Descended,
    /// Player died with message
    PlayerDied(String),
    PlayerWon,
}

/// A restored snapshot that breaks a state invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("{who} has {hp} hp, outside 0..={max_hp}")]
    HpOutOfRange { who: String, hp: i32, max_hp: i32 },
    #[error("{who} stands off the grid at ({x}, {y})")]
    OffGrid { who: String, x: i32, y: i32 },
    #[error("inventory holds {0} items, over capacity")]
    InventoryOverflow(usize),
    #[error("owned item {0} is marked as lying on the ground")]
    OwnedItemOnGround(String),
    #[error("ground item {0} is not marked as lying on the ground")]
    StrayGroundItem(String),
    #[error("dead player in phase {0}")]
    DeadPlayerInPlay(TurnPhase),
}

/// Main game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,

    /// Every enemy spawned on this floor, dead ones included. Indices are
    /// stable for the lifetime of the floor.
    pub enemies: Vec<Enemy>,

    /// Items lying on the floor
    pub items: Vec<Item>,

    pub traps: Vec<Trap>,
    pub grid: TileGrid,
    pub layout: FloorLayout,
    pub shop: Option<Shop>,

    /// Current floor, starting at 1
    pub depth: u32,
    pub difficulty: Difficulty,

    /// Turns elapsed this game
    pub turn: u64,
    pub phase: TurnPhase,
    pub messages: MessageLog,

    /// Seed the random source was started from
    pub seed: u64,

    /// Auto-explore gives up below this hp percentage
    pub explore_threshold: u32,
}

impl GameState {
    /// State for a floor that is already populated (or deliberately empty)
    pub fn new(player: Player, grid: TileGrid, layout: FloorLayout) -> Self {
        let depth = layout.depth.max(1);
        Self {
            player,
            enemies: Vec::new(),
            items: Vec::new(),
            traps: Vec::new(),
            grid,
            layout,
            shop: None,
            depth,
            difficulty: Difficulty::default(),
            turn: 0,
            phase: TurnPhase::AwaitingCommand,
            messages: MessageLog::with_capacity(MESSAGE_HISTORY),
            seed: 0,
            explore_threshold: DEFAULT_EXPLORE_STOP,
        }
    }

    /// Apply the session options that live in the state
    pub fn with_options(mut self, options: &GameOptions) -> Self {
        self.difficulty = options.difficulty;
        self.explore_threshold = options.explore_stop;
        self.messages = MessageLog::with_capacity(options.msghistory);
        if let Some(seed) = options.seed {
            self.seed = seed;
        }
        self
    }

    /// Add a message to the current batch
    pub fn message(&mut self, msg: impl Into<String>) {
        self.messages.push(msg);
    }

    /// Index of the living enemy standing on `pos`
    pub fn enemy_at(&self, pos: Position) -> Option<usize> {
        self.enemies
            .iter()
            .position(|e| e.is_alive() && e.pos() == pos)
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.is_alive())
    }

    /// Walkable, and nobody standing there
    pub fn is_free(&self, pos: Position) -> bool {
        self.grid.is_walkable(pos) && self.enemy_at(pos).is_none() && self.player.pos() != pos
    }

    pub fn merchant_in_reach(&self) -> bool {
        let pos = self.player.pos();
        self.shop.as_ref().is_some_and(|shop| shop.in_reach(pos))
    }

    /// Recompute what the player can see from where they stand
    pub fn refresh_visibility(&mut self) {
        let radius = self.player.sight_radius();
        let origin = self.player.pos();
        self.grid.compute_visibility(origin, radius);
    }

    /// depth×100 + level×50 + kills×10 + gold
    pub fn score(&self) -> i64 {
        self.depth as i64 * 100
            + self.player.body.level as i64 * 50
            + self.player.stats.kills as i64 * 10
            + self.player.gold as i64
    }

    /// Reason the player died, from the last thing that hurt them
    pub fn death_cause(&self) -> String {
        let source = &self.player.stats.last_damage_source;
        if source.is_empty() {
            "killed".to_string()
        } else {
            format!("killed by {}", source)
        }
    }

    /// Check the invariants a restored snapshot must hold
    pub fn validate(&self) -> Result<(), StateError> {
        let bodies = std::iter::once(&self.player.body).chain(self.enemies.iter().map(|e| &e.body));
        for body in bodies {
            if body.hp < 0 || body.hp > body.max_hp {
                return Err(StateError::HpOutOfRange {
                    who: body.name.clone(),
                    hp: body.hp,
                    max_hp: body.max_hp,
                });
            }
        }

        let pos = self.player.pos();
        if !self.grid.in_bounds(pos) {
            return Err(StateError::OffGrid {
                who: self.player.body.name.clone(),
                x: pos.x,
                y: pos.y,
            });
        }
        if let Some(enemy) = self.living_enemies().find(|e| !self.grid.in_bounds(e.pos())) {
            return Err(StateError::OffGrid {
                who: enemy.name().to_string(),
                x: enemy.pos().x,
                y: enemy.pos().y,
            });
        }

        let inventory = &self.player.inventory;
        if inventory.len() > MAX_INVENTORY {
            return Err(StateError::InventoryOverflow(inventory.len()));
        }
        let equipment = &self.player.equipment;
        let owned = inventory
            .iter()
            .chain(equipment.weapon.iter())
            .chain(equipment.armor.iter());
        for item in owned {
            if item.on_ground {
                return Err(StateError::OwnedItemOnGround(item.name.clone()));
            }
        }
        if let Some(item) = self.items.iter().find(|i| !i.on_ground) {
            return Err(StateError::StrayGroundItem(item.name.clone()));
        }

        if !self.player.is_alive() && self.phase != TurnPhase::Defeated {
            return Err(StateError::DeadPlayerInPlay(self.phase));
        }
        Ok(())
    }
}

/// Main game loop
pub struct GameLoop<R: RandomSource = GameRng> {
    state: GameState,
    rng: R,
}

impl GameLoop<GameRng> {
    /// Create a new game loop seeded from the state's seed
    pub fn new(state: GameState) -> Self {
        let rng = GameRng::new(state.seed);
        Self { state, rng }
    }
}

impl<R: RandomSource> GameLoop<R> {
    pub fn with_rng(state: GameState, rng: R) -> Self {
        Self { state, rng }
    }

    /// Get reference to game state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Get mutable reference to game state
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Consume the game loop and return the owned game state
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Resolve one player command.
    ///
    /// Each call starts a fresh message batch.
    pub fn submit(&mut self, command: Command) -> GameLoopResult {
        self.state.messages.clear_current();
        trace!(?command, phase = %self.state.phase, "submit");

        match self.state.phase {
            TurnPhase::Defeated => return GameLoopResult::PlayerDied(self.state.death_cause()),
            TurnPhase::Victorious => return GameLoopResult::PlayerWon,
            TurnPhase::AwaitingFloor => return GameLoopResult::NoTime,
            TurnPhase::AwaitingLevelChoice => {
                return match command {
                    Command::ChooseLevel(choice) => self.choose_level(choice),
                    _ => GameLoopResult::NoTime,
                };
            }
            TurnPhase::AwaitingBonusMove => return self.bonus_move(command),
            TurnPhase::AwaitingCommand => {}
        }

        match command {
            Command::ChooseLevel(choice) => return self.choose_level(choice),
            Command::Descend => return self.descend(),
            Command::Buy(_) | Command::Sell(_) => return self.trade(command),
            _ => {}
        }

        if command.takes_turn() && self.state.player.status.is_slowed() && self.rng.one_in(2) {
            self.state.message("You are slowed!");
            return self.end_turn();
        }

        match self.execute_command(command) {
            ActionResult::Success => {
                if self.state.phase == TurnPhase::Victorious {
                    self.state.refresh_visibility();
                    return GameLoopResult::PlayerWon;
                }
                self.end_turn()
            }
            ActionResult::NoTime => GameLoopResult::NoTime,
            ActionResult::Failed(msg) => {
                self.state.message(msg);
                GameLoopResult::NoTime
            }
            ActionResult::ShopOpen => {
                self.state.message("The merchant shows you the wares.");
                GameLoopResult::ShopOpen
            }
        }
    }

    /// Install a freshly generated floor after `Descended`.
    ///
    /// The player lands on the up-stairs below floor 1, otherwise at the
    /// centre of the first room.
    pub fn enter_floor(&mut self, mut layout: FloorLayout, grid: TileGrid) {
        let state = &mut self.state;
        layout.depth = state.depth;

        let up_stairs = (state.depth > 1)
            .then(|| grid.positions().find(|&p| grid.tile(p) == Tile::StairsUp))
            .flatten();
        let start = up_stairs
            .or_else(|| layout.rooms.first().map(|room| room.center()))
            .unwrap_or(state.player.pos());
        state.player.body.pos = start;

        let contents = populate_floor(&layout, &grid, state.difficulty, &mut self.rng);
        state.enemies = contents.enemies;
        state.items = contents.items;
        state.traps = contents.traps;
        state.shop = contents.shop;
        state.grid = grid;
        state.layout = layout;

        for msg in contents.messages {
            state.message(msg);
        }
        state.message(format!("Floor {}.", state.depth));
        state.refresh_visibility();
        state.phase = if state.player.pending_level_ups > 0 {
            TurnPhase::AwaitingLevelChoice
        } else {
            TurnPhase::AwaitingCommand
        };
        info!(
            depth = state.depth,
            enemies = state.enemies.len(),
            items = state.items.len(),
            "entered floor"
        );
    }

    fn execute_command(&mut self, command: Command) -> ActionResult {
        match command {
            Command::Move(dir) => move_player(&mut self.state, dir, &mut self.rng),
            Command::Wait => ActionResult::Success,
            Command::Ability => self.use_ability(),
            Command::UseItem(index) => use_item(&mut self.state, index, &mut self.rng),
            Command::PickUp => pick_up(&mut self.state),
            Command::Descend | Command::ChooseLevel(_) | Command::Buy(_) | Command::Sell(_) => {
                ActionResult::NoTime
            }
        }
    }

    fn use_ability(&mut self) -> ActionResult {
        let state = &mut self.state;
        let outcome = state.player.use_ability(&mut state.enemies);
        state.message(outcome.message());

        if let AbilityOutcome::Fireball { hits, .. } = &outcome {
            for &index in hits {
                state.enemies[index].awake = true;
                if !state.enemies[index].is_alive() {
                    reward_kill(state, index, &mut self.rng);
                }
            }
        }
        if outcome.took_effect() {
            ActionResult::Success
        } else {
            ActionResult::NoTime
        }
    }

    /// Steps that follow a turn-taking command
    fn end_turn(&mut self) -> GameLoopResult {
        let state = &mut self.state;
        state.player.tick_cooldown();
        state.turn += 1;
        state.player.stats.turns_played += 1;

        let tick = state.player.status.tick(&mut state.player.body);
        if let Some((damage, turns)) = tick.poison {
            state.player.stats.record_taken(damage, "poison");
            state.message(format!("Poison deals {} damage! ({} turns left)", damage, turns));
        }
        if let Some((damage, turns)) = tick.burning {
            state.player.stats.record_taken(damage, "fire");
            state.message(format!("Burning deals {} damage! ({} turns left)", damage, turns));
        }

        move_enemies(state, &mut self.rng);

        if !state.player.is_alive() {
            return self.defeat();
        }
        if state.player.status.is_hasted() {
            state.refresh_visibility();
            state.phase = TurnPhase::AwaitingBonusMove;
            return GameLoopResult::BonusMove;
        }
        self.finish_turn()
    }

    /// Visibility refresh and the level-up hand-off
    fn finish_turn(&mut self) -> GameLoopResult {
        self.state.refresh_visibility();
        if self.state.player.pending_level_ups > 0 {
            self.state.phase = TurnPhase::AwaitingLevelChoice;
            return GameLoopResult::LevelUp;
        }
        self.state.phase = TurnPhase::AwaitingCommand;
        GameLoopResult::Continue
    }

    fn defeat(&mut self) -> GameLoopResult {
        let cause = self.state.death_cause();
        info!(turn = self.state.turn, depth = self.state.depth, %cause, "player defeated");
        self.state.message(format!("You die... {}.", cause));
        self.state.phase = TurnPhase::Defeated;
        GameLoopResult::PlayerDied(cause)
    }

    /// Only a move uses the bonus; anything else forfeits it unexecuted
    fn bonus_move(&mut self, command: Command) -> GameLoopResult {
        self.state.phase = TurnPhase::AwaitingCommand;
        match command {
            Command::Move(dir) => {
                move_player(&mut self.state, dir, &mut self.rng);
                if self.state.phase == TurnPhase::Victorious {
                    self.state.refresh_visibility();
                    return GameLoopResult::PlayerWon;
                }
                if !self.state.player.is_alive() {
                    return self.defeat();
                }
            }
            _ => {
                debug!(?command, "bonus move forfeited");
                self.state.message("You let the moment pass.");
            }
        }
        self.finish_turn()
    }

    fn choose_level(&mut self, choice: LevelChoice) -> GameLoopResult {
        if !self.state.player.apply_level_choice(choice) {
            return GameLoopResult::NoTime;
        }
        let level = self.state.player.body.level;
        self.state.message(format!("Level up! You are now level {}.", level));
        if self.state.player.pending_level_ups > 0 {
            self.state.phase = TurnPhase::AwaitingLevelChoice;
            GameLoopResult::LevelUp
        } else {
            self.state.phase = TurnPhase::AwaitingCommand;
            GameLoopResult::Continue
        }
    }

    fn descend(&mut self) -> GameLoopResult {
        let state = &mut self.state;
        let refusal = match state.grid.tile(state.player.pos()) {
            Tile::StairsUp => Some("These stairs lead up. You can't go back."),
            Tile::StairsDown if state.depth >= FINAL_DEPTH => Some("This is the deepest floor."),
            Tile::StairsDown => None,
            _ => Some("No stairs here."),
        };
        if let Some(msg) = refusal {
            state.message(msg);
            return GameLoopResult::NoTime;
        }

        state.depth += 1;
        state.message("You descend deeper...");
        state.phase = TurnPhase::AwaitingFloor;
        info!(depth = state.depth, "descended");
        GameLoopResult::Descended
    }

    /// Buying and selling never advance the turn
    fn trade(&mut self, command: Command) -> GameLoopResult {
        let pos = self.state.player.pos();
        let player = &mut self.state.player;
        let Some(shop) = self.state.shop.as_mut().filter(|shop| shop.in_reach(pos)) else {
            self.state.message("There is no merchant here.");
            return GameLoopResult::NoTime;
        };
        let outcome = match command {
            Command::Buy(index) => shop.buy(index, player),
            Command::Sell(index) => shop.sell(index, player),
            _ => return GameLoopResult::NoTime,
        };
        let msg = match outcome {
            Ok(msg) => msg,
            Err(err) => err.to_string(),
        };
        self.state.message(msg);
        GameLoopResult::ShopOpen
    }
}
