//! Floor population (makemon.c / mkobj.c level fill)
//!
//! Turns the layout generator's room list into the enemies, ground items,
//! traps and shop of a fresh floor. The first room is the player's and never
//! receives spawns.

use tracing::debug;

use crate::consts::{DRAGON_DEPTH, FINAL_DEPTH};
use crate::creature::Position;
use crate::monster::{Enemy, EnemyKind};
use crate::object::{Enchantment, Item, loot};
use crate::rng::RandomSource;
use crate::world::difficulty::Difficulty;
use crate::world::floor::{FloorLayout, Room, RoomTheme};
use crate::world::grid::Grid;
use crate::world::shop::Shop;
use crate::world::trap::{Trap, TrapKind};

/// Everything a fresh floor starts with
#[derive(Debug, Clone, Default)]
pub struct FloorContents {
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub traps: Vec<Trap>,
    pub shop: Option<Shop>,
    /// Announcements for the floor entry message batch
    pub messages: Vec<String>,
}

/// Random interior tile of `room`
fn random_spot(room: &Room, rng: &mut dyn RandomSource) -> Position {
    let (span_w, span_h) = room.interior_span();
    Position::new(
        room.x + 1 + rng.rn2(span_w as u32) as i32,
        room.y + 1 + rng.rn2(span_h as u32) as i32,
    )
}

/// Any room but the first
fn random_spawn_room<'a>(rooms: &'a [Room], rng: &mut dyn RandomSource) -> &'a Room {
    &rooms[1 + rng.index(rooms.len() - 1)]
}

pub fn populate_floor<G: Grid + ?Sized>(
    layout: &FloorLayout,
    grid: &G,
    difficulty: Difficulty,
    rng: &mut dyn RandomSource,
) -> FloorContents {
    let mut contents = FloorContents::default();
    let rooms = &layout.rooms;
    let depth = layout.depth;
    if rooms.len() < 2 {
        debug!(depth, rooms = rooms.len(), "floor too small to populate");
        contents.shop = layout
            .first_room_of(RoomTheme::Shop)
            .map(|room| Shop::generate(room, depth, rng));
        return contents;
    }

    spawn_enemies(&mut contents, rooms, grid, depth, difficulty, rng);
    spawn_items(&mut contents, rooms, grid, depth, rng);
    spawn_traps(&mut contents, rooms, grid, rng);

    contents.shop = layout
        .first_room_of(RoomTheme::Shop)
        .map(|room| Shop::generate(room, depth, rng));

    let boss = match depth {
        DRAGON_DEPTH => Some((EnemyKind::Dragon, "You sense a powerful presence on this floor...")),
        FINAL_DEPTH => Some((EnemyKind::Lich, "An ancient evil stirs... The Lich awaits!")),
        _ => None,
    };
    if let Some((kind, announcement)) = boss {
        if let Some(last) = rooms.last() {
            // Step off the center so the boss does not sit on the stairs
            let mut pos = last.center().offset(1, 0);
            if !grid.is_walkable(pos) {
                pos = pos.offset(-2, 0);
            }
            contents.enemies.push(Enemy::spawn_scaled(kind, pos, difficulty));
            contents.messages.push(announcement.to_string());
        }
    }

    debug!(
        depth,
        enemies = contents.enemies.len(),
        items = contents.items.len(),
        traps = contents.traps.len(),
        shop = contents.shop.is_some(),
        "floor populated"
    );
    contents
}

fn spawn_enemies<G: Grid + ?Sized>(
    contents: &mut FloorContents,
    rooms: &[Room],
    grid: &G,
    depth: u32,
    difficulty: Difficulty,
    rng: &mut dyn RandomSource,
) {
    let count = 3 + 2 * depth as usize + difficulty.extra_spawns();
    for _ in 0..count {
        let room = random_spawn_room(rooms, rng);
        let pos = random_spot(room, rng);
        if !grid.is_walkable(pos) || contents.enemies.iter().any(|e| e.pos() == pos) {
            continue;
        }
        let kind = if room.theme == RoomTheme::Crypt {
            EnemyKind::random_crypt(rng)
        } else {
            EnemyKind::random_for_depth(depth, rng)
        };
        contents.enemies.push(Enemy::spawn_scaled(kind, pos, difficulty));
    }
}

fn spawn_items<G: Grid + ?Sized>(
    contents: &mut FloorContents,
    rooms: &[Room],
    grid: &G,
    depth: u32,
    rng: &mut dyn RandomSource,
) {
    let pool = loot::floor_pool(depth, rng);
    let count = 2 + rng.rn2(3);
    for _ in 0..count {
        let pos = random_spot(random_spawn_room(rooms, rng), rng);
        if grid.is_walkable(pos) {
            let item = pool[rng.index(pool.len())].clone();
            contents.items.push(item.placed_at(pos));
        }
    }

    for room in &rooms[1..] {
        let pos = random_spot(room, rng);
        if !grid.is_walkable(pos) {
            continue;
        }
        let extra = match room.theme {
            RoomTheme::Armory => Some(loot::random_gear(depth, Enchantment::None, rng)),
            RoomTheme::Library if rng.one_in(2) => Some(loot::attack_scroll()),
            RoomTheme::Library => Some(loot::defense_scroll()),
            _ => None,
        };
        if let Some(item) = extra {
            contents.items.push(item.placed_at(pos));
        }
    }
}

fn spawn_traps<G: Grid + ?Sized>(
    contents: &mut FloorContents,
    rooms: &[Room],
    grid: &G,
    rng: &mut dyn RandomSource,
) {
    let count = 1 + rng.rn2(3);
    for _ in 0..count {
        let pos = random_spot(random_spawn_room(rooms, rng), rng);
        if grid.is_walkable(pos) {
            contents.traps.push(Trap::new(pos, TrapKind::random(rng)));
        }
    }
}
