//=========================================================================
// Scene Scripting
//=========================================================================
//
// End-to-end scenes written in RON and driven through `Game::tick`,
// with the game's object classes registered. Frames are 20 ms.
//
//=========================================================================

use genesis::core::audio::CueMixer;
use std::collections::BTreeMap;

use genesis::core::game::{Game, GameState, TickControl};
use genesis::core::globals::GameContext;
use genesis::core::input::{InputEvent, KeyCode};
use genesis::core::render::DrawList;
use genesis::core::scene::{ObjectDescription, Registry, SceneDescription, Value};
use genesis::objects;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn game(scenes: &[&str]) -> Game {
    let mut registry = Registry::with_builtins();
    objects::register(&mut registry);
    let world = GameContext::new(320, 240, Box::new(CueMixer::new(true)), StdRng::seed_from_u64(5));
    let mut game = Game::new(registry, world, 50);
    for source in scenes {
        game.add_scene(SceneDescription::from_ron_str(source, "test").unwrap());
    }
    game
}

fn run(game: &mut Game, frames: usize) {
    let mut surface = DrawList::new(320, 240);
    for _ in 0..frames {
        game.tick(&[], &mut surface).unwrap();
    }
}

fn press(game: &mut Game, events: &[InputEvent]) {
    game.tick(events, &mut DrawList::new(320, 240)).unwrap();
}

fn var(game: &Game, name: &str) -> Option<Value> {
    game.world().variable(name).cloned()
}

//=== Scheduling ==========================================================

#[test]
fn before_calls_run_ahead_of_timed_events() {
    let mut game = game(&[r#"(
        name: "a",
        before: [("call", [Str("set_variable"), Str("step"), Int(1)])],
        events: [(0, 0, ("call", [Str("set_variable"), Str("step"), Int(2)]))],
    )"#]);
    game.start("a").unwrap();
    run(&mut game, 1);
    assert_eq!(var(&game, "step"), Some(Value::Int(2)));
}

#[test]
fn recurring_events_rearm() {
    let mut game = game(&[r#"(
        name: "a",
        before: [("call", [Str("set_variable"), Str("count"), Int(0)])],
        events: [(40, 40, ("call", [Str("set_variable"), Str("count"), Add([Game("count"), Int(1)])]))],
    )"#]);
    game.start("a").unwrap();
    run(&mut game, 10);
    assert_eq!(var(&game, "count"), Some(Value::Int(5)));
    assert_eq!(game.scene().unwrap().elapsed(), (10, 200));
}

//=== Entities ============================================================

#[test]
fn enemy_crossing_the_screen_is_removed() {
    let mut game = game(&[r#"(
        name: "a",
        objects: {
            "ufo": Class(class: "Enemy", init: {
                "size": Point(30.0, 30.0),
                "position": Point(20.0, 100.0),
                "controller": Class(class: "ConstantController", init: {"dx": Int(-10), "dy": Int(0)}),
            }),
        },
        before: [("spawn", [Str("ufo")])],
        notifications: [
            (source: "ufo", event: Destroyed, calls: [("call", [Str("set_variable"), Str("gone"), Bool(true)])]),
        ],
    )"#]);
    game.start("a").unwrap();

    run(&mut game, 1);
    assert_eq!(game.scene().unwrap().names(), vec!["ufo"]);
    run(&mut game, 7);
    assert_eq!(game.scene().unwrap().live_count(), 0);
    assert_eq!(var(&game, "gone"), Some(Value::Bool(true)));
}

#[test]
fn dying_enemy_stays_until_its_explosion_ends() {
    let mut game = game(&[r#"(
        name: "a",
        objects: {
            "ufo": Class(class: "Enemy", init: {"size": Point(30.0, 30.0), "position": Point(200.0, 100.0)}),
        },
        before: [("spawn", [Str("ufo")])],
        events: [(20, 0, ("object", [Str("ufo"), Str("die")]))],
        notifications: [
            (source: "ufo", event: Died, calls: [("call", [Str("set_variable"), Str("died"), Bool(true)])]),
        ],
    )"#]);
    game.start("a").unwrap();

    // Dies at 20 ms; the default explosion lasts 480 ms.
    run(&mut game, 1);
    assert_eq!(var(&game, "died"), Some(Value::Bool(true)));
    run(&mut game, 23);
    assert_eq!(game.scene().unwrap().live_count(), 1);
    run(&mut game, 1);
    assert_eq!(game.scene().unwrap().live_count(), 0);
}

#[test]
fn projectile_kills_enemy_and_disappears() {
    let mut game = game(&[r#"(
        name: "a",
        objects: {
            "ufo": Class(class: "Enemy", init: {"size": Point(30.0, 30.0), "position": Point(200.0, 100.0)}),
            "shot": Class(class: "Projectile", init: {"origin": Point(100.0, 115.0), "target": Point(300.0, 115.0)}),
        },
        before: [("spawn", [List([Str("ufo"), Str("shot")])])],
        notifications: [
            (source: "ufo", event: Died, calls: [("object", [Str("ufo"), Str("hide")])]),
            (source: "shot", event: Destroyed, calls: [("call", [Str("set_variable"), Str("hit"), Bool(true)])]),
        ],
    )"#]);
    game.start("a").unwrap();

    run(&mut game, 20);
    assert_eq!(var(&game, "hit"), Some(Value::Bool(true)));
    assert_eq!(game.scene().unwrap().live_count(), 0);
}

#[test]
fn capabilities_answer_generic_properties() {
    let mut game = game(&[r#"(
        name: "a",
        objects: {
            "ufo": Class(class: "Enemy", init: {"size": Point(30.0, 30.0), "position": Point(200.0, 100.0)}),
            "rock": Class(class: "Asteroid", init: {"size": Point(40.0, 20.0), "position": Point(10.0, 10.0)}),
        },
        before: [
            ("spawn", [List([Str("ufo"), Str("rock")])]),
            ("call", [Str("set_variable"), Str("alive"), Property("ufo", "alive")]),
            ("call", [Str("set_variable"), Str("center"), Property("rock", "center")]),
        ],
    )"#]);
    game.start("a").unwrap();
    run(&mut game, 1);
    assert_eq!(var(&game, "alive"), Some(Value::Bool(true)));
    assert_eq!(var(&game, "center"), Some(Value::Point(30.0, 20.0)));
}

//=== Transitions =========================================================

#[test]
fn shared_score_survives_scene_changes() {
    let mut game = game(&[
        r#"(
            name: "first",
            objects: {"score": Shared("score")},
            before: [
                ("spawn", [Str("score")]),
                ("object", [Str("score"), Str("add"), Int(250)]),
                ("end_scene", []),
            ],
            next_scene: {"end_scene": "second"},
        )"#,
        r#"(
            name: "second",
            objects: {"score": Shared("score")},
            before: [
                ("spawn", [Str("score")]),
                ("call", [Str("set_variable"), Str("seen"), Property("score", "highscore")]),
                ("game_over", []),
            ],
        )"#,
    ]);
    game.add_shared("score", &genesis::core::scene::ObjectDescription::new("Score")).unwrap();
    game.start("first").unwrap();

    run(&mut game, 1);
    assert_eq!(game.scene().unwrap().name(), "second");

    let mut surface = DrawList::new(320, 240);
    assert_eq!(game.tick(&[], &mut surface).unwrap(), TickControl::Exit);
    assert_eq!(game.state(), GameState::Stopped);
    assert_eq!(var(&game, "seen"), Some(Value::Int(250)));
    assert!(game.world().has_shared("score"));
}

#[test]
fn shared_player_keeps_its_movement_keys() {
    let mut game = game(&[
        r#"(
            name: "stage",
            objects: {"player": Shared("player")},
            before: [("spawn", [Str("player")])],
            on_key: [(key: Space, phase: Up, call: ("end_scene", []))],
            next_scene: {"end_scene": "again"},
        )"#,
        r#"(
            name: "again",
            objects: {"player": Shared("player")},
            before: [("spawn", [Str("player")])],
        )"#,
    ]);
    let keyboard = Value::Class { class: "KeyboardController".into(), init: BTreeMap::new() };
    let player = ObjectDescription::new("Player")
        .with("position", Value::Point(100.0, 100.0))
        .with("size", Value::Point(40.0, 20.0))
        .with("controller", keyboard);
    game.add_shared("player", &player).unwrap();
    assert!(!game.world().bindings.is_bound(KeyCode::ArrowRight));

    game.start("stage").unwrap();
    assert!(game.world().bindings.is_bound(KeyCode::ArrowRight));
    let position = |game: &Game| game.scene().unwrap().require_object("player").unwrap().property("position");

    press(&mut game, &[]);
    assert_eq!(position(&game), Some(Value::Point(100.0, 100.0)));
    press(&mut game, &[InputEvent::KeyDown(KeyCode::ArrowRight)]);
    assert_eq!(position(&game), Some(Value::Point(105.0, 100.0)));

    press(&mut game, &[InputEvent::KeyUp(KeyCode::ArrowRight), InputEvent::KeyUp(KeyCode::Space)]);
    assert_eq!(game.scene().unwrap().name(), "again");
    assert!(game.world().bindings.is_bound(KeyCode::ArrowLeft));

    press(&mut game, &[InputEvent::KeyDown(KeyCode::ArrowLeft)]);
    assert_eq!(position(&game), Some(Value::Point(100.0, 100.0)));
}
