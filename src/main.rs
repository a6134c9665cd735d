//! Pathogen Surge entry point
//!
//! The browser build is driven by `WebGame` (see `platform::web`). Natively
//! this runs a headless demo: pick a level from the menu, steer for a while,
//! pause, resume, and log how the run ends.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pathogen Surge (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable game");

    if let Err(e) = demo::run() {
        log::error!("Demo aborted: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `platform::web::start`, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec3;

    use pathogen_surge::consts::FRAME_DT;
    use pathogen_surge::input::{InputEvent, Key, Ray, UiAction};
    use pathogen_surge::platform::headless::{LogRenderer, SilentAudio, StaticAssetLoader};
    use pathogen_surge::scene::{GameScene, names};
    use pathogen_surge::{SceneError, SceneManager, SceneParams, Settings, Tuning};

    /// Give up after this many frames (about three minutes)
    const MAX_FRAMES: u64 = 60 * 180;

    pub fn run() -> Result<(), SceneError> {
        let seed = std::env::var("PATHOGEN_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(7);

        let mut manager = SceneManager::new(
            Box::new(LogRenderer::new(300)),
            Box::new(StaticAssetLoader::new()),
            Box::new(SilentAudio::default()),
            Settings::default(),
            Tuning::default(),
            seed,
        )
        .with_default_scenes();
        manager.resize(1280, 720);

        // Menu: hover the head, click
        manager.switch_scene(names::MENU, SceneParams::none())?;
        let eye = Vec3::new(0.0, 1.5, 1.5);
        manager.handle_input(InputEvent::PointerMove(Ray::new(eye, Vec3::new(0.0, 1.6, 0.0) - eye)))?;
        manager.frame(FRAME_DT)?;
        manager.handle_input(InputEvent::Click)?;

        let mut frame = 0u64;
        while manager.current_name() == Some(names::GAME) && frame < MAX_FRAMES {
            // Weave around the tube
            let key = match (frame / 90) % 4 {
                0 => Key::Up,
                1 => Key::Right,
                2 => Key::Down,
                _ => Key::Left,
            };
            if frame % 90 == 0 {
                for k in [Key::Up, Key::Right, Key::Down, Key::Left] {
                    manager.handle_input(InputEvent::KeyUp(k))?;
                }
                manager.handle_input(InputEvent::KeyDown(key))?;
            }

            // A short pause break
            if frame == 600 {
                manager.handle_input(InputEvent::KeyDown(Key::Pause))?;
            }
            if frame == 660 {
                manager.handle_input(InputEvent::Action(UiAction::Resume))?;
            }

            manager.frame(FRAME_DT)?;
            frame += 1;

            if frame % 600 == 0 {
                if let Some(game) = manager.current_as::<GameScene>() {
                    let state = game.state();
                    log::info!(
                        "Frame {}: distance {:.0}/{:.0}, {} lives, {} cells",
                        frame,
                        state.distance,
                        state.level.distance,
                        state.player.lives,
                        state.entities.len()
                    );
                }
            }
        }

        match manager.current_name() {
            Some(names::END) => log::info!("Level complete after {} frames", frame),
            Some(names::GAME_OVER) => log::info!("Game over after {} frames", frame),
            other => log::info!("Stopped after {} frames in {:?}", frame, other),
        }
        log::info!("{} frames rendered in total", manager.frames());
        Ok(())
    }
}
