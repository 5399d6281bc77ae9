use dv_core::action::{Command, Direction};
use dv_core::creature::Position;
use dv_core::object::{Enchantment, loot};
use dv_core::player::PlayerClass;
use dv_core::scenario::Scenario;
use dv_core::world::{Biome, FloorLayout, Room, RoomTheme, Trap, TrapKind};
use dv_core::{GameLoop, GameRng, GameState, StateError, TurnPhase};

fn busy_state() -> GameState {
    let mut s = Scenario::parse(
        "##########\n#@..r..W.#\n#..{~..M.#\n#...$..s>#\n##########",
    )
    .unwrap()
    .with_depth(5)
    .into_state(PlayerClass::Rogue, &mut GameRng::new(21));

    let p = &mut s.player;
    p.equipment.weapon = Some(loot::weapon(5, Enchantment::Vampiric));
    p.equipment.armor = Some(loot::armor(5, Enchantment::Blessed));
    p.inventory.add(loot::bomb(5)).unwrap();
    p.inventory.add(loot::haste_potion(5)).unwrap();
    p.status.poison(4, 3);
    p.status.ignite(2, 2);
    p.status.blind(3);
    p.status.slow(1);
    p.status.haste(5);
    p.status.shield(6);
    p.ability_cooldown = 3;
    p.ability_armed = true;
    p.gold = 42;
    p.stats.record_taken(7, "a Rat");

    s.enemies[1].enraged = true;
    s.enemies[1].timer = 3;
    s.enemies[1].body.hp = 20;
    s.enemies[0].stun_turns = 2;
    s.enemies[0].awake = true;
    s.traps.push(Trap::new(Position::new(2, 3), TrapKind::Slow));
    s.layout = FloorLayout::new(
        5,
        vec![Room::new(0, 0, 8, 5).with_theme(RoomTheme::Shrine)],
        Biome::Ember,
    );
    s.layout.rooms[0].fountain_used = true;
    s.turn = 99;
    s.seed = 1234;
    s.message("The air is hot.");
    s
}

#[test]
fn test_json_round_trip_is_lossless() {
    let state = busy_state();
    state.validate().unwrap();

    let json = serde_json::to_string(&state).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, state);
    restored.validate().unwrap();

    // Enchantment is not applied a second time on restore
    let weapon = restored.player.equipment.weapon.as_ref().unwrap();
    assert_eq!(weapon.enchantment, Enchantment::Vampiric);
    assert_eq!(weapon.value, state.player.equipment.weapon.as_ref().unwrap().value);
    assert_eq!(restored.player.status.haste_turns, 5);
    assert!(restored.layout.rooms[0].fountain_used);
    assert!(restored.enemies[1].enraged);
    assert_eq!(restored.shop, state.shop);
}

#[test]
fn test_restored_game_replays_identically() {
    let json = serde_json::to_string(&busy_state()).unwrap();
    let run = || {
        let state: GameState = serde_json::from_str(&json).unwrap();
        let mut game = GameLoop::new(state);
        let results: Vec<_> = [
            Command::Move(Direction::East),
            Command::Move(Direction::South),
            Command::Wait,
            Command::Wait,
        ]
        .into_iter()
        .map(|c| game.submit(c))
        .collect();
        (results, game.into_state())
    };
    let (first, a) = run();
    let (second, b) = run();
    assert_eq!(first, second);
    assert_eq!(a, b);
}

#[test]
fn test_rng_serializes_as_seed() {
    let rng = GameRng::new(77);
    let json = serde_json::to_string(&rng).unwrap();
    let back: GameRng = serde_json::from_str(&json).unwrap();
    assert_eq!(back.seed(), 77);
}

#[test]
fn test_validate_rejects_broken_snapshots() {
    let mut state = busy_state();
    state.player.body.hp = state.player.body.max_hp + 1;
    assert!(matches!(
        state.validate(),
        Err(StateError::HpOutOfRange { .. })
    ));

    let mut state = busy_state();
    let mut stray = loot::bomb(1);
    stray.on_ground = true;
    state.player.inventory.add(stray).unwrap();
    assert!(state.validate().is_ok(), "inventory add clears the ground flag");

    let mut state = busy_state();
    state.player.body.pos = Position::new(40, 40);
    assert!(matches!(state.validate(), Err(StateError::OffGrid { .. })));

    let mut state = busy_state();
    state.player.body.hp = 0;
    state.phase = TurnPhase::Defeated;
    assert!(state.validate().is_ok());
}
