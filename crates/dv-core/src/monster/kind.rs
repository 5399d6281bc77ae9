//! Enemy kind table (monst.c)
//!
//! One static row per kind: stats, glyph, behavior variant and trait flags.
//! The kind tag stays plain data; everything kind-specific is looked up here.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::monster::behavior::Behavior;
use crate::rng::RandomSource;

bitflags! {
    /// Per-kind traits that are orthogonal to movement behavior
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EnemyFlags: u8 {
        /// Guaranteed legendary drop, floor-defining
        const BOSS = 0x01;
        /// Melee hits blind the player
        const BLINDING_TOUCH = 0x02;
        /// Melee hits set the player on fire
        const BURNING_TOUCH = 0x04;
        /// Shambling dead, raised by casters
        const UNDEAD = 0x08;
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum EnemyKind {
    Rat,
    Skeleton,
    Ghost,
    Demon,
    Dragon,
    Archer,
    Necromancer,
    Lich,
}

/// Static description of an enemy kind
#[derive(Debug, Clone, Copy)]
pub struct KindInfo {
    pub name: &'static str,
    pub glyph: char,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub xp: u32,
    pub behavior: Behavior,
    pub flags: EnemyFlags,
}

const fn row(
    name: &'static str,
    glyph: char,
    hp: i32,
    attack: i32,
    defense: i32,
    xp: u32,
    behavior: Behavior,
    flags: EnemyFlags,
) -> KindInfo {
    KindInfo {
        name,
        glyph,
        hp,
        attack,
        defense,
        xp,
        behavior,
        flags,
    }
}

static KINDS: [KindInfo; 8] = [
    row("Rat", 'r', 8, 3, 0, 5, Behavior::Walker, EnemyFlags::empty()),
    row("Skeleton", 's', 15, 6, 2, 12, Behavior::Walker, EnemyFlags::UNDEAD),
    row(
        "Ghost",
        'g',
        12,
        8,
        1,
        15,
        Behavior::Phantom,
        EnemyFlags::UNDEAD.union(EnemyFlags::BLINDING_TOUCH),
    ),
    row("Demon", 'D', 25, 10, 4, 25, Behavior::Walker, EnemyFlags::BURNING_TOUCH),
    row("Dragon Boss", 'W', 60, 14, 6, 100, Behavior::Wyrm, EnemyFlags::BOSS),
    row("Archer", 'a', 10, 7, 1, 10, Behavior::Marksman, EnemyFlags::empty()),
    row("Necromancer", 'n', 18, 5, 2, 20, Behavior::Conjurer, EnemyFlags::empty()),
    row(
        "Lich Boss",
        'L',
        80,
        16,
        8,
        200,
        Behavior::Archlich,
        EnemyFlags::BOSS.union(EnemyFlags::UNDEAD),
    ),
];

impl EnemyKind {
    pub fn info(self) -> &'static KindInfo {
        &KINDS[self as usize]
    }

    pub fn behavior(self) -> Behavior {
        self.info().behavior
    }

    pub fn flags(self) -> EnemyFlags {
        self.info().flags
    }

    pub fn is_boss(self) -> bool {
        self.flags().contains(EnemyFlags::BOSS)
    }

    pub fn from_glyph(c: char) -> Option<EnemyKind> {
        use strum::IntoEnumIterator;
        EnemyKind::iter().find(|k| k.info().glyph == c)
    }

    /// Random kind for an ordinary spawn on `depth`
    pub fn random_for_depth(depth: u32, rng: &mut dyn RandomSource) -> EnemyKind {
        use EnemyKind::*;
        let roll = rng.rn2(100);
        // (exclusive upper bound, kind); the last row catches the rest
        let table: &[(u32, EnemyKind)] = match depth {
            0 | 1 => &[(100, Rat)],
            2 => &[(50, Rat), (80, Skeleton), (100, Archer)],
            3 => &[(25, Rat), (55, Skeleton), (80, Ghost), (100, Archer)],
            4 => &[(15, Skeleton), (45, Ghost), (75, Demon), (100, Archer)],
            5 => &[(35, Ghost), (75, Demon), (100, Archer)],
            6 => &[(25, Demon), (50, Necromancer), (75, Ghost), (100, Archer)],
            _ => &[(30, Demon), (55, Necromancer), (80, Ghost), (100, Archer)],
        };
        table
            .iter()
            .find(|(bound, _)| roll < *bound)
            .map_or(Rat, |(_, k)| *k)
    }

    /// Crypt rooms only raise the dead
    pub fn random_crypt(rng: &mut dyn RandomSource) -> EnemyKind {
        if rng.one_in(2) {
            EnemyKind::Skeleton
        } else {
            EnemyKind::Ghost
        }
    }
}
