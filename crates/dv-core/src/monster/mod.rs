//! Enemies: the kind table, behavior variants, per-turn AI and boss phases

pub mod ai;
pub mod behavior;
pub mod boss;
pub mod enemy;
pub mod kind;
pub mod path;

pub use ai::move_enemies;
pub use behavior::{Behavior, EnrageRule, SummonRule};
pub use enemy::Enemy;
pub use kind::{EnemyFlags, EnemyKind, KindInfo};
pub use path::{NoPath, SearchStats, astar_step, find_step};
