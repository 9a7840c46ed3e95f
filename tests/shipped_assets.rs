//=========================================================================
// Shipped Assets
//=========================================================================
//
// Loads `assets/genesis.ron` and plays through the opening of the game
// headless, with a fixed seed and the mixer muted.
//
//=========================================================================

use std::path::PathBuf;

use genesis::build_game;
use genesis::core::config::GameConfig;
use genesis::core::game::{Game, TickControl};
use genesis::core::input::{InputEvent, KeyCode};
use genesis::core::render::DrawList;
use genesis::core::scene::Value;

fn config() -> GameConfig {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/genesis.ron");
    let mut config = GameConfig::load_from_file(path).unwrap();
    config.seed = Some(2024);
    config.mute = true;
    config
}

fn tick(game: &mut Game, events: &[InputEvent]) -> TickControl {
    let mut surface = DrawList::new(800, 600);
    game.tick(events, &mut surface).unwrap()
}

fn live(game: &Game) -> Vec<String> {
    game.scene().unwrap().names().into_iter().map(str::to_string).collect()
}

#[test]
fn configuration_lists_every_scene() {
    let config = config();
    assert_eq!(config.first_scene, "intro");
    assert_eq!(config.scenes.len(), 3);
    assert!(config.scenes.iter().all(|p| p.exists()), "scene paths resolve next to the config");
    assert!(config.shared.contains_key("score"));
}

#[test]
fn intro_leads_to_stage_one_on_space() {
    let mut game = build_game(&config()).unwrap();
    tick(&mut game, &[]);
    let names = live(&game);
    for expected in ["background", "genesis", "press_space", "score"] {
        assert!(names.iter().any(|n| n == expected), "{expected} missing from {names:?}");
    }

    tick(&mut game, &[InputEvent::KeyDown(KeyCode::Space), InputEvent::KeyUp(KeyCode::Space)]);
    assert_eq!(game.scene().unwrap().name(), "stage1");
}

#[test]
fn stage_one_fires_and_brings_enemies() {
    let mut game = build_game(&config()).unwrap();
    tick(&mut game, &[]);
    tick(&mut game, &[InputEvent::KeyUp(KeyCode::Space)]);
    tick(&mut game, &[]);
    assert!(live(&game).iter().any(|n| n == "player"));

    tick(&mut game, &[InputEvent::KeyDown(KeyCode::Space)]);
    assert!(live(&game).iter().any(|n| n == "projectile"), "space fires a shot");

    // The first enemy arrives three seconds into the stage.
    for _ in 0..200 {
        tick(&mut game, &[InputEvent::KeyUp(KeyCode::Space)]);
    }
    assert!(live(&game).iter().any(|n| n == "ufo"));

    let lives = game.scene().unwrap().require_object("player").unwrap().property("lives");
    assert_eq!(lives, Some(Value::Int(3)));
}

#[test]
fn escape_quits_from_any_scene() {
    let mut game = build_game(&config()).unwrap();
    tick(&mut game, &[]);
    assert_eq!(tick(&mut game, &[InputEvent::KeyUp(KeyCode::Escape)]), TickControl::Exit);
    assert!(!game.is_running());
}
