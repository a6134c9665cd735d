//! End-to-end scene flows driven through the manager
//!
//! Run with: `cargo test --test scene_flow`

mod common;

use glam::Vec3;

use common::{DT, homing_tuning, manager, manager_with};
use pathogen_surge::input::{InputEvent, Key, Ray, UiAction};
use pathogen_surge::platform::paths;
use pathogen_surge::scene::{EndScene, GameOverScene, GameScene, ManagerState, MenuScene, names};
use pathogen_surge::sim::GamePhase;
use pathogen_surge::{BodyPart, SceneError, SceneManager, SceneParams};

fn game(manager: &SceneManager) -> &GameScene {
    manager
        .current_as::<GameScene>()
        .expect("game scene should be live")
}

/// Run frames until the live scene is no longer `name`
fn run_while_in(manager: &mut SceneManager, name: &str, max_frames: u32) -> u32 {
    let mut frames = 0;
    while manager.current_name() == Some(name) && frames < max_frames {
        manager.frame(DT).unwrap();
        frames += 1;
    }
    frames
}

#[test]
fn test_head_distance_switches_to_end() {
    // No cells at all: nothing can get in the way
    let (mut mgr, _) = manager_with(Default::default(), &[paths::BLOOD_CELL]);
    mgr.switch_scene(names::GAME, SceneParams::with_body_part(BodyPart::Head))
        .unwrap();

    let level = game(&mgr).state().level;
    assert_eq!((level.speed, level.player_speed, level.lives, level.distance), (0.2, 0.15, 3, 1000.0));

    let frames = run_while_in(&mut mgr, names::GAME, 10_000);
    assert_eq!(mgr.current_name(), Some(names::END));
    // 1000 / 0.15 frames, give or take float accumulation
    assert!((6600..=6700).contains(&frames), "frames = {frames}");

    let end = mgr.current_as::<EndScene>().unwrap();
    assert_eq!(end.body_part(), BodyPart::Head);
}

#[test]
fn test_three_hits_switch_to_game_over() {
    let (mut mgr, rec) = manager_with(homing_tuning(), &[]);
    mgr.switch_scene(names::GAME, SceneParams::with_body_part(BodyPart::Chest))
        .unwrap();
    assert_eq!(game(&mgr).state().player.lives, 3);

    let mut lives_seen = vec![3];
    let mut frames = 0;
    while mgr.current_name() == Some(names::GAME) && frames < 5_000 {
        mgr.frame(DT).unwrap();
        frames += 1;
        if let Some(scene) = mgr.current_as::<GameScene>() {
            let lives = scene.state().player.lives;
            if lives_seen.last() != Some(&lives) {
                lives_seen.push(lives);
            }
        }
    }

    // One life per hit, never two at once
    assert_eq!(lives_seen, vec![3, 2, 1]);
    assert_eq!(mgr.current_name(), Some(names::GAME_OVER));
    assert_eq!(
        mgr.current_as::<GameOverScene>().unwrap().body_part(),
        BodyPart::Chest
    );

    let rec = rec.borrow();
    let pops = rec.sounds.iter().filter(|s| s.ends_with("pop.mp3")).count();
    assert_eq!(pops, 3);
    assert!(rec.sounds.iter().any(|s| s.ends_with("game-over.mp3")));
}

#[test]
fn test_game_over_restart_replays_same_level() {
    let (mut mgr, _) = manager_with(homing_tuning(), &[]);
    mgr.switch_scene(names::GAME, SceneParams::with_body_part(BodyPart::Legs))
        .unwrap();
    run_while_in(&mut mgr, names::GAME, 5_000);
    assert_eq!(mgr.current_name(), Some(names::GAME_OVER));

    mgr.handle_input(InputEvent::Action(UiAction::Restart)).unwrap();
    let scene = game(&mgr);
    assert_eq!(scene.body_part(), BodyPart::Legs);
    assert_eq!(scene.state().player.lives, 2);
    assert!(scene.state().entities.is_empty());

    mgr.handle_input(InputEvent::Action(UiAction::Exit)).unwrap();
    assert_eq!(mgr.current_name(), Some(names::MENU));
}

#[test]
fn test_unknown_scene_leaves_prior_scene_active() {
    let (mut mgr, rec) = manager();
    mgr.switch_scene(names::MENU, SceneParams::none()).unwrap();
    let live_before = rec.borrow().live_models.len();

    let err = mgr.switch_scene("credits", SceneParams::none()).unwrap_err();
    assert!(matches!(err, SceneError::NotFound(ref name) if name == "credits"));
    assert_eq!(mgr.current_name(), Some(names::MENU));
    assert_eq!(
        mgr.state(),
        &ManagerState::Active {
            scene: names::MENU.to_string()
        }
    );
    // Nothing was cleaned up
    assert_eq!(rec.borrow().live_models.len(), live_before);

    // And the menu keeps running
    mgr.frame(DT).unwrap();
    assert!(mgr.current_as::<MenuScene>().is_some());
}

#[test]
fn test_switch_releases_every_model_of_the_old_scene() {
    let (mut mgr, rec) = manager();
    mgr.switch_scene(names::GAME, SceneParams::with_body_part(BodyPart::Head))
        .unwrap();
    for _ in 0..180 {
        mgr.frame(DT).unwrap();
    }
    let game_models: Vec<u32> = rec.borrow().live_models.iter().copied().collect();
    assert!(game_models.len() > 2, "player, vessel and some cells");

    mgr.handle_input(InputEvent::Action(UiAction::Exit)).unwrap();
    assert_eq!(mgr.current_name(), Some(names::MENU));
    {
        let rec = rec.borrow();
        for id in &game_models {
            assert!(!rec.live_models.contains(id), "model {id} leaked");
        }
        // Only the two anatomy models remain
        assert_eq!(rec.live_models.len(), 2);
    }

    // No old model is ever rendered again
    let rendered_before = rec.borrow().views.len();
    for _ in 0..10 {
        mgr.frame(DT).unwrap();
    }
    let rec = rec.borrow();
    for view in &rec.views[rendered_before..] {
        for drawable in &view.drawables {
            assert!(!game_models.contains(&drawable.model.id));
        }
    }
}

#[test]
fn test_pause_freezes_simulation_but_keeps_rendering() {
    let (mut mgr, rec) = manager();
    mgr.switch_scene(names::GAME, SceneParams::with_body_part(BodyPart::Chest))
        .unwrap();
    for _ in 0..90 {
        mgr.frame(DT).unwrap();
    }
    mgr.handle_input(InputEvent::KeyDown(Key::Pause)).unwrap();
    assert_eq!(game(&mgr).state().phase, GamePhase::Paused);
    assert!(!rec.borrow().ambient_playing);

    let positions: Vec<Vec3> = game(&mgr).state().entities.iter().map(|e| e.pos).collect();
    let distance = game(&mgr).state().distance;
    let renders = rec.borrow().views.len();

    for _ in 0..120 {
        mgr.frame(DT).unwrap();
    }
    let state = game(&mgr).state();
    assert_eq!(state.entities.iter().map(|e| e.pos).collect::<Vec<_>>(), positions);
    assert_eq!(state.distance, distance);
    assert_eq!(rec.borrow().views.len(), renders + 120);
    assert_eq!(
        rec.borrow().views.last().unwrap().buttons,
        vec![UiAction::Resume, UiAction::Restart, UiAction::Exit]
    );

    // Resume picks up where it left off
    mgr.handle_input(InputEvent::Action(UiAction::Resume)).unwrap();
    mgr.frame(DT).unwrap();
    let state = game(&mgr).state();
    assert_eq!(state.phase, GamePhase::Playing);
    assert!(state.distance > distance);
    assert!(rec.borrow().ambient_playing);
}

#[test]
fn test_muted_game_plays_nothing() {
    let (mut mgr, rec) = manager_with(homing_tuning(), &[]);
    mgr.handle_input(InputEvent::SetMuted(true)).unwrap();
    mgr.switch_scene(names::GAME, SceneParams::with_body_part(BodyPart::Head))
        .unwrap();
    run_while_in(&mut mgr, names::GAME, 5_000);
    assert_eq!(mgr.current_name(), Some(names::GAME_OVER));
    assert!(rec.borrow().sounds.is_empty());
    assert!(mgr.audio().is_muted());
}

#[test]
fn test_missing_cell_model_skips_spawns() {
    let (mut mgr, _) = manager_with(Default::default(), &[paths::BLOOD_CELL]);
    mgr.switch_scene(names::GAME, SceneParams::with_body_part(BodyPart::Chest))
        .unwrap();
    for _ in 0..300 {
        mgr.frame(DT).unwrap();
    }
    let state = game(&mgr).state();
    assert!(state.entities.is_empty());
    assert_eq!(state.spawner.pending(), 0);
    assert_eq!(state.phase, GamePhase::Playing);
}

#[test]
fn test_desktop_menu_to_game() {
    let (mut mgr, _) = manager();
    mgr.switch_scene(names::MENU, SceneParams::none()).unwrap();
    let eye = Vec3::new(0.0, 1.5, 1.5);
    mgr.handle_input(InputEvent::PointerMove(Ray::new(eye, Vec3::new(-0.25, 1.1, 0.0) - eye)))
        .unwrap();
    mgr.handle_input(InputEvent::Click).unwrap();
    assert_eq!(mgr.current_name(), Some(names::GAME));
    assert_eq!(game(&mgr).body_part(), BodyPart::RightArm);
}

#[test]
fn test_ar_menu_double_tap_starts_ar_game() {
    let (mut mgr, _) = manager();
    mgr.switch_scene(names::MENU_AR, SceneParams::none()).unwrap();
    mgr.handle_input(InputEvent::CameraPose {
        position: Vec3::new(0.0, -0.5, 0.0),
        direction: Vec3::NEG_Z,
    })
    .unwrap();
    mgr.frame(DT).unwrap();
    mgr.handle_input(InputEvent::Tap { time_ms: 2000.0 }).unwrap();
    mgr.handle_input(InputEvent::Tap { time_ms: 2200.0 }).unwrap();

    assert_eq!(mgr.current_name(), Some(names::GAME_AR));
    let scene = game(&mgr);
    assert_eq!(scene.body_part(), BodyPart::Legs);
    // AR legs: a single life
    assert_eq!(scene.state().player.lives, 1);
}

#[test]
fn test_hidden_page_stops_spawning() {
    let (mut mgr, _) = manager();
    mgr.switch_scene(names::GAME, SceneParams::with_body_part(BodyPart::Head))
        .unwrap();
    mgr.handle_input(InputEvent::Visibility { hidden: true }).unwrap();
    for _ in 0..120 {
        mgr.frame(DT).unwrap();
    }
    assert!(game(&mgr).state().entities.is_empty());

    mgr.handle_input(InputEvent::Visibility { hidden: false }).unwrap();
    for _ in 0..120 {
        mgr.frame(DT).unwrap();
    }
    assert!(!game(&mgr).state().entities.is_empty());
}

#[test]
fn test_ar_game_pauses_from_its_button() {
    let (mut mgr, rec) = manager();
    mgr.switch_scene(names::GAME_AR, SceneParams::with_body_part(BodyPart::Head))
        .unwrap();
    mgr.frame(DT).unwrap();
    assert_eq!(rec.borrow().views.last().unwrap().buttons, vec![UiAction::Pause]);

    let id = UiAction::Pause.label();
    let action = UiAction::from_str(id).unwrap();
    mgr.handle_input(InputEvent::Action(action)).unwrap();
    assert_eq!(game(&mgr).state().phase, GamePhase::Paused);
    assert!(!rec.borrow().ambient_playing);

    let distance = game(&mgr).state().distance;
    mgr.frame(DT).unwrap();
    assert_eq!(game(&mgr).state().distance, distance);
    assert_eq!(
        rec.borrow().views.last().unwrap().buttons,
        vec![UiAction::Resume, UiAction::Restart, UiAction::Exit]
    );

    mgr.handle_input(InputEvent::Action(UiAction::Exit)).unwrap();
    assert_eq!(mgr.current_name(), Some(names::MENU_AR));
}

#[test]
fn test_ar_player_box_is_real_world_size() {
    let (mut mgr, _) = manager();
    mgr.switch_scene(names::GAME_AR, SceneParams::with_body_part(BodyPart::Head))
        .unwrap();
    mgr.frame(DT).unwrap();
    let player = &game(&mgr).state().player;
    // Virus model is a unit box in the recording loader
    let half = player.bounds().unwrap().max - player.pos;
    assert!(half.x < 0.1 && half.y < 0.1, "half extents {half:?}");
}
