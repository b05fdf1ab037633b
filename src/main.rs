//! Save The Princess - headless runner
//!
//! Drives the simulation at the fixed timestep with a simple autopilot,
//! dispatching audio events and building a frame per step. Useful for smoke
//! runs and seed replays; windowing is left to an embedding host.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use save_the_princess::audio::{AudioManager, NullBackend};
    use save_the_princess::consts::{MAX_SUBSTEPS, SIM_DT};
    use save_the_princess::renderer::build_frame;
    use save_the_princess::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use save_the_princess::ui::UiAction;
    use save_the_princess::{Settings, sim};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        audio: AudioManager<NullBackend>,
        accumulator: f32,
        frames: u32,
        quit: bool,
    }

    impl Game {
        fn new(settings: &Settings) -> Self {
            Self {
                state: GameState::from_settings(settings),
                audio: AudioManager::with_settings(NullBackend, settings),
                accumulator: 0.0,
                frames: 0,
                quit: false,
            }
        }

        fn handle_events(&mut self, events: &[GameEvent]) {
            self.audio.dispatch(events);
            for event in events {
                match event {
                    GameEvent::PlayerHit { lives_left } => {
                        log::info!("Player hit, {} lives left", lives_left)
                    }
                    GameEvent::Quit => self.quit = true,
                    _ => {}
                }
            }
        }

        fn press(&mut self, action: UiAction) {
            let mut events = Vec::new();
            sim::apply_action(&mut self.state, action, &mut events);
            self.handle_events(&events);
        }

        /// Run simulation ticks for one host frame
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = autopilot(&self.state);
                let events = tick(&mut self.state, &input, SIM_DT);
                self.handle_events(&events);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            let frame = build_frame(&self.state);
            log::trace!(
                "Frame {}: {} vertices, {} sprites",
                self.frames,
                frame.vertices.len(),
                frame.sprites.len()
            );
            self.frames += 1;
        }

        fn finished(&self) -> bool {
            self.quit || matches!(self.state.phase, GamePhase::GameOver | GamePhase::Victory)
        }
    }

    /// Walk toward the princess, then back toward the delivery zone, hopping
    /// whenever the goal is above
    fn autopilot(state: &GameState) -> TickInput {
        let player = &state.player;
        let goal = match &state.princess {
            Some(princess) if !player.carrying => princess.pos,
            _ => state.spawn.zone.center(),
        };
        let dx = goal.x - player.pos.x;
        TickInput {
            left: dx < -2.0,
            right: dx > 2.0,
            jump: player.on_ground && goal.y < player.pos.y - 20.0,
            click: None,
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Save The Princess (headless) starting...");

        let settings = Settings::load();
        let mut game = Game::new(&settings);
        log::info!("Game initialized with seed: {}", game.state.seed);

        game.press(UiAction::Start);
        while !game.finished() && game.frames < settings.max_frames {
            game.update(SIM_DT);
        }

        match game.state.phase {
            GamePhase::Victory => log::info!("Princess rescued after {} frames", game.frames),
            GamePhase::GameOver => log::info!("Game over after {} frames", game.frames),
            phase => log::info!(
                "Stopped after {} frames in {:?} with {} lives",
                game.frames,
                phase,
                game.state.player.lives
            ),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is embedded by a host on wasm; there is no runner
}
