//! Core rule constants
//!
//! Tunables shared by combat, AI, the scheduler and the explorer.

/// Default grid dimensions for generated floors
pub const GRID_WIDTH: i32 = 80;
pub const GRID_HEIGHT: i32 = 40;

/// Deepest floor; the Lich waits here
pub const FINAL_DEPTH: u32 = 8;

/// Floor that hosts the Dragon
pub const DRAGON_DEPTH: u32 = 5;

/// Sight radius, normal and while blinded
pub const SIGHT_RADIUS: i32 = 8;
pub const BLIND_SIGHT_RADIUS: i32 = 2;

/// Inventory capacity
pub const MAX_INVENTORY: usize = 10;

/// Combat: one in CRIT_ONE_IN attacks is critical
pub const CRIT_ONE_IN: u32 = 10;
/// Combat: damage variance is uniform in [-VARIANCE, +VARIANCE]
pub const DAMAGE_VARIANCE: i32 = 2;

/// Squared distance at which a dormant enemy wakes (8 tiles)
pub const WAKE_RANGE_SQ: i32 = 64;
/// Squared distance considered melee contact (includes diagonals)
pub const MELEE_RANGE_SQ: i32 = 2;
/// Ranged attacks need distance² in (MELEE_RANGE_SQ, RANGED_MAX_SQ]
pub const RANGED_MAX_SQ: i32 = 36;

/// A* limits
pub const ASTAR_MAX_EXPANSIONS: usize = 50;
pub const ASTAR_OPEN_CAPACITY: usize = 64;
/// Step cost for a phasing creature moving into a wall
pub const WALL_STEP_COST: i32 = 6;

/// Random placement budget for teleports
pub const TELEPORT_ATTEMPTS: u32 = 100;

/// Fireball reach (squared) and bomb reach (squared)
pub const FIREBALL_RANGE_SQ: i32 = 9;
pub const BOMB_RANGE_SQ: i32 = 4;

/// Status effect magnitudes
pub const STUN_TURNS: u32 = 2;
pub const ON_HIT_BLIND_TURNS: u32 = 3;
pub const BURN_TURNS: u32 = 3;
pub const BURN_DAMAGE: i32 = 2;
pub const SHIELD_TURNS: u32 = 10;
pub const TRAP_POISON_TURNS: u32 = 5;
pub const TRAP_POISON_DAMAGE: i32 = 3;
pub const TRAP_SLOW_TURNS: u32 = 5;

/// Environmental damage
pub const LAVA_DAMAGE: i32 = 5;
pub const FOUNTAIN_HEAL: i32 = 10;

/// Boss tuning
pub const ENRAGE_ATTACK_BONUS: i32 = 4;
pub const NECROMANCER_SUMMON_INTERVAL: u32 = 5;
pub const LICH_SUMMON_INTERVAL: u32 = 4;
pub const LICH_WAVE_SIZE: usize = 3;

/// Message history kept for the presentation layer
pub const MESSAGE_HISTORY: usize = 50;
