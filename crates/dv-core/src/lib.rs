//! dv-core: simulation core for the delve dungeon crawler
//!
//! Combat, status effects, class abilities, enemy behavior, boss phases, the
//! turn scheduler and auto-explore. No I/O beyond reading option and scenario
//! files; presentation and floor carving live elsewhere.

pub mod action;
pub mod combat;
pub mod creature;
pub mod explore;
pub mod monster;
pub mod object;
pub mod player;
pub mod scenario;
pub mod world;

mod consts;
mod gameloop;
mod rng;

pub use consts::*;
pub use gameloop::{GameLoop, GameLoopResult, GameState, StateError, TurnPhase};
pub use rng::{GameRng, RandomSource, ScriptedRng};
