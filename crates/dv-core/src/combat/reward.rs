//! Kill rewards: experience, dropped gold and loot, boss aftermath

use tracing::info;

use crate::gameloop::{GameState, TurnPhase};
use crate::monster::EnemyKind;
use crate::object::{Item, loot};
use crate::rng::RandomSource;

/// Credit the player for killing `state.enemies[index]`.
///
/// Called once, on the blow that took the enemy from alive to dead.
pub fn reward_kill(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) {
    let enemy = &state.enemies[index];
    let (kind, xp, pos) = (enemy.kind, enemy.xp_reward, enemy.pos());

    state.player.stats.kills += 1;
    let levels = state.player.gain_xp(xp);
    state.message(format!("Gained {} XP.", xp));

    let gold = (xp / 2 + rng.rn2(5)) as i32;
    if gold > 0 {
        state.items.push(Item::gold(gold).placed_at(pos));
    }

    if let Some(drop) = loot::kill_drop(state.depth, kind.is_boss(), rng) {
        state.items.push(drop.placed_at(pos));
        state.message("Something enchanted drops!");
    }

    if levels > 0 {
        state.message(format!(
            "You reached level {}! Choose a bonus.",
            state.player.body.level
        ));
    }

    match kind {
        EnemyKind::Dragon => {
            info!(depth = state.depth, "dragon slain");
            state.message("The Dragon falls! But darker forces lurk below...");
        }
        EnemyKind::Lich => {
            info!(turn = state.turn, "lich slain, game won");
            state.message("The Lich crumbles to dust! You are victorious!");
            state.phase = TurnPhase::Victorious;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::Position;
    use crate::player::PlayerClass;
    use crate::rng::ScriptedRng;
    use crate::scenario::Scenario;

    #[test]
    fn test_rat_reward() {
        let mut s = Scenario::parse("#####\n#@r.#\n#####")
            .unwrap()
            .into_state(PlayerClass::Warrior, &mut crate::rng::GameRng::new(1));
        s.enemies[0].body.hp = 0;
        // gold roll 3, no drop
        let mut rng = ScriptedRng::new([3, 5]);
        reward_kill(&mut s, 0, &mut rng);
        assert_eq!(s.player.stats.kills, 1);
        assert_eq!(s.player.body.xp, 5);
        assert_eq!(s.items.len(), 1);
        assert_eq!(s.items[0].value, 2 + 3);
        assert_eq!(s.items[0].pos, Position::new(2, 1));
        assert!(s.items[0].on_ground);
        assert_eq!(s.phase, TurnPhase::AwaitingCommand);
    }

    #[test]
    fn test_lich_kill_wins() {
        let mut s = Scenario::parse("#####\n#@L.#\n#####")
            .unwrap()
            .into_state(PlayerClass::Warrior, &mut crate::rng::GameRng::new(1));
        s.enemies[0].body.hp = 0;
        let mut rng = crate::rng::GameRng::new(9);
        reward_kill(&mut s, 0, &mut rng);
        assert_eq!(s.phase, TurnPhase::Victorious);
        assert_eq!(s.items.len(), 2);
        assert_eq!(s.items[1].enchantment, crate::object::Enchantment::Legendary);
        assert!(s.player.pending_level_ups > 0);
    }
}
