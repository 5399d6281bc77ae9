//! Enemy instances (monst.h)

use serde::{Deserialize, Serialize};

use crate::creature::{Creature, Position};
use crate::monster::behavior::Behavior;
use crate::monster::kind::{EnemyFlags, EnemyKind};
use crate::world::difficulty::Difficulty;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Creature,
    pub kind: EnemyKind,
    pub xp_reward: u32,
    /// Dormant until the player comes close; never goes back to sleep
    pub awake: bool,
    pub stun_turns: u32,
    /// Kind-dependent counter: pacing parity for slow bosses, summon clock for casters
    pub timer: u32,
    pub enraged: bool,
}

impl Enemy {
    /// Fresh enemy with the kind's base stats
    pub fn spawn(kind: EnemyKind, pos: Position) -> Self {
        let info = kind.info();
        Self {
            body: Creature::new(pos, info.name, info.glyph, info.hp, info.attack, info.defense),
            kind,
            xp_reward: info.xp,
            awake: false,
            stun_turns: 0,
            timer: 0,
            enraged: false,
        }
    }

    /// Spawn with difficulty scaling applied to hp and attack
    pub fn spawn_scaled(kind: EnemyKind, pos: Position, difficulty: Difficulty) -> Self {
        let mut enemy = Self::spawn(kind, pos);
        enemy.body.max_hp = difficulty.scale_hp(enemy.body.max_hp);
        enemy.body.hp = enemy.body.max_hp;
        enemy.body.attack = difficulty.scale_attack(enemy.body.attack);
        enemy
    }

    pub fn pos(&self) -> Position {
        self.body.pos
    }

    pub fn name(&self) -> &str {
        &self.body.name
    }

    pub fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    pub fn behavior(&self) -> Behavior {
        self.kind.behavior()
    }

    pub fn flags(&self) -> EnemyFlags {
        self.kind.flags()
    }

    /// Below a quarter health, or a kind that always keeps away
    pub fn should_flee(&self) -> bool {
        self.body.hp * 4 < self.body.max_hp || self.behavior().always_flees()
    }

    /// At or below half health
    pub fn is_bloodied(&self) -> bool {
        self.body.hp <= self.body.max_hp / 2
    }
}
