//! Stepping onto things: hazardous tiles, fountains and traps (trap.c)

use tracing::debug;

use crate::consts::{
    BURN_DAMAGE, BURN_TURNS, FOUNTAIN_HEAL, LAVA_DAMAGE, TELEPORT_ATTEMPTS, TRAP_POISON_DAMAGE,
    TRAP_POISON_TURNS, TRAP_SLOW_TURNS,
};
use crate::creature::Position;
use crate::gameloop::GameState;
use crate::rng::RandomSource;
use crate::world::floor::RoomTheme;
use crate::world::grid::{Grid, Tile};
use crate::world::trap::TrapKind;

/// Effects of the tile the player just stepped on
pub fn tile_effects(state: &mut GameState) {
    let pos = state.player.pos();
    match state.grid.tile(pos) {
        Tile::Lava => {
            state.player.body.take_damage(LAVA_DAMAGE);
            state.player.stats.record_taken(LAVA_DAMAGE, "lava");
            state.player.status.ignite(BURN_TURNS, BURN_DAMAGE);
            state.message(format!("The lava burns you for {} damage!", LAVA_DAMAGE));
        }
        Tile::Fountain => {
            // A shrine's fountain is spent once drunk; a stray one just dries up
            if let Some(room) = state.layout.room_centered_at_mut(pos) {
                if room.theme == RoomTheme::Shrine {
                    room.fountain_used = true;
                }
            }
            state.player.body.heal(FOUNTAIN_HEAL);
            state.grid.set_tile(pos, Tile::Floor);
            state.message(format!("The fountain restores {} HP!", FOUNTAIN_HEAL));
        }
        _ => {}
    }
}

/// Spring the trap under the player, if any. Only one trap fires per step.
pub fn spring_trap(state: &mut GameState, rng: &mut dyn RandomSource) {
    let pos = state.player.pos();
    let Some(trap) = state.traps.iter_mut().find(|t| t.pos == pos) else {
        return;
    };
    trap.revealed = true;
    let kind = trap.kind;
    debug!(?kind, ?pos, "trap sprung");

    match kind {
        TrapKind::Spike => {
            let dmg = TrapKind::spike_damage(state.depth);
            state.player.body.take_damage(dmg);
            state.player.stats.record_taken(dmg, "a spike trap");
            state.message(format!("A spike trap deals {} damage!", dmg));
        }
        TrapKind::Poison => {
            state.player.status.poison(TRAP_POISON_TURNS, TRAP_POISON_DAMAGE);
            state.message(format!(
                "A poison trap! You are poisoned for {} turns!",
                TRAP_POISON_TURNS
            ));
        }
        TrapKind::Teleport => {
            if teleport_player(state, rng) {
                state.message("A teleport trap! You are whisked away!");
            } else {
                state.message("A teleport trap fizzles...");
            }
        }
        TrapKind::Slow => {
            state.player.status.slow(TRAP_SLOW_TURNS);
            state.message(format!(
                "A slow trap! Your movements are sluggish for {} turns!",
                TRAP_SLOW_TURNS
            ));
        }
    }
}

/// Move the player to a random safe tile: walkable, not dangerous, no enemy.
/// Gives up after a fixed number of tries and leaves the player in place.
pub fn teleport_player(state: &mut GameState, rng: &mut dyn RandomSource) -> bool {
    let (w, h) = (state.grid.width(), state.grid.height());
    for _ in 0..TELEPORT_ATTEMPTS {
        let spot = Position::new(rng.rn2(w as u32) as i32, rng.rn2(h as u32) as i32);
        if state.grid.is_walkable(spot)
            && !state.grid.is_dangerous(spot)
            && state.enemy_at(spot).is_none()
        {
            state.player.body.pos = spot;
            state.refresh_visibility();
            return true;
        }
    }
    debug!("player teleport fizzled");
    false
}
