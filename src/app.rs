use color_eyre::Result;
use ratatui::{Terminal, backend::Backend};
use std::time::Instant;

use crate::audio::AudioManager;
use crate::entities::Screen;
use crate::game::{Game, GameEvent};
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};

/// The main application: owns the game and drives it one frame at a time.
pub struct App {
    running: bool,
    game: Game,
    frame_count: u64,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: Option<AudioManager>,
}

impl App {
    pub fn new(game: Game, input_manager: InputManager, audio_manager: Option<AudioManager>) -> Self {
        Self {
            running: true,
            game,
            frame_count: 0,
            input_manager,
            renderer: GameRenderer::new(),
            audio_manager,
        }
    }

    /// Run the application's main loop until the player quits.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();

            let size = terminal.size()?;
            self.game.resize(Screen::new(size.width, size.height));

            self.input_manager.poll_events(self.game.is_active())?;
            let actions = self.input_manager.take_actions();
            self.process_actions(&actions);
            if !self.running {
                break;
            }

            if self.game.is_active() {
                self.game.ship.moving_left = self.input_manager.left_held();
                self.game.ship.moving_right = self.input_manager.right_held();
                self.game.update();
                self.frame_count += 1;
            }
            self.handle_game_events();

            terminal.draw(|frame| {
                let view = RenderView::new(&self.game, self.frame_count);
                self.renderer.render(frame, &view);
            })?;

            // Frame-locked pacing: one simulation step per rendered frame
            let elapsed = frame_start.elapsed();
            if let Some(remaining) = self.game.settings.frame_duration.checked_sub(elapsed) {
                std::thread::sleep(remaining);
            }
        }
        log::info!("Quit after {} frames of play", self.frame_count);
        Ok(())
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Start => {
                    self.game.start_game();
                }
                InputAction::Click { column, row } => {
                    self.game.click(*column, *row);
                }
                InputAction::Fire => {
                    self.game.fire_projectile();
                }
            }
        }
    }

    fn handle_game_events(&mut self) {
        for event in self.game.drain_events() {
            match event {
                GameEvent::ProjectileFired => {
                    if let Some(audio) = &self.audio_manager {
                        audio.play_fire_sound();
                    }
                }
                GameEvent::ShipLost { .. } => {
                    // Deliberate freeze: nothing, input included, runs until
                    // the pause is over
                    std::thread::sleep(self.game.settings.respawn_pause);
                }
                GameEvent::GameOver { .. } => {
                    self.input_manager.release_all();
                }
                GameEvent::Started
                | GameEvent::EnemiesDestroyed { .. }
                | GameEvent::LevelCleared { .. } => {}
            }
        }
    }
}
