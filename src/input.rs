use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

/// Frames a direction stays held after a press when the terminal cannot
/// report key releases. Key repeat refreshes it while the key is down.
const HOLD_FRAMES: u8 = 20;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Start,
    Fire,
    Click { column: u16, row: u16 },
    Quit,
}

/// Tracks the direction keys that can be held down for continuous movement
#[derive(Debug, Default)]
struct KeyState {
    left: bool,
    right: bool,
    /// Remaining frames for each direction when releases are not reported
    left_frames: u8,
    right_frames: u8,
}

/// Manages input polling and translates raw terminal events into game actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    reports_releases: bool,
}

impl InputManager {
    /// `reports_releases` is true when the terminal sends key release
    /// events (keyboard enhancement is active).
    pub fn new(reports_releases: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            reports_releases,
        }
    }

    /// Drains all pending terminal events without blocking.
    /// Should be called once per frame before taking actions.
    pub fn poll_events(&mut self, game_active: bool) -> color_eyre::Result<()> {
        self.tick_held_keys();

        while event::poll(Duration::from_millis(0))? {
            self.handle_event(event::read()?, game_active);
        }

        Ok(())
    }

    /// Routes a single terminal event.
    pub fn handle_event(&mut self, event: Event, game_active: bool) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event, game_active),
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event, game_active),
            // Resizes are picked up from the terminal size each frame
            _ => {}
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, game_active: bool) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, game_active),
            KeyEventKind::Repeat => {
                // Repeats only keep movement alive; firing needs a fresh press
                if key_event.code != KeyCode::Char(' ') {
                    self.handle_key_press(key_event, game_active);
                }
            }
            KeyEventKind::Release => self.handle_key_release(key_event.code),
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_active: bool) {
        // Quit works in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        // Game state is checked when the action is processed, so a Start
        // queued earlier in the same batch already applies
        if key_event.code == KeyCode::Char(' ') {
            self.oneshot_actions.push(InputAction::Fire);
            return;
        }

        if !game_active {
            if matches!(
                key_event.code,
                KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Enter
            ) {
                self.oneshot_actions.push(InputAction::Start);
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = true;
                self.key_state.left_frames = HOLD_FRAMES;
                self.key_state.right = false;
                self.key_state.right_frames = 0;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = true;
                self.key_state.right_frames = HOLD_FRAMES;
                self.key_state.left = false;
                self.key_state.left_frames = 0;
            }
            _ => {}
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = false;
                self.key_state.left_frames = 0;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = false;
                self.key_state.right_frames = 0;
            }
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent, game_active: bool) {
        if !game_active && mouse_event.kind == MouseEventKind::Down(MouseButton::Left) {
            self.oneshot_actions.push(InputAction::Click {
                column: mouse_event.column,
                row: mouse_event.row,
            });
        }
    }

    /// Expires held directions when the terminal will never send a release.
    fn tick_held_keys(&mut self) {
        if self.reports_releases {
            return;
        }

        self.key_state.left_frames = self.key_state.left_frames.saturating_sub(1);
        self.key_state.right_frames = self.key_state.right_frames.saturating_sub(1);
        self.key_state.left = self.key_state.left_frames > 0;
        self.key_state.right = self.key_state.right_frames > 0;
    }

    /// Clears held directions, e.g. after the game ends.
    pub fn release_all(&mut self) {
        self.key_state = KeyState::default();
    }

    pub fn left_held(&self) -> bool {
        self.key_state.left
    }

    pub fn right_held(&self) -> bool {
        self.key_state.right
    }

    /// Returns and clears the one-shot actions gathered since the last call.
    pub fn take_actions(&mut self) -> Vec<InputAction> {
        std::mem::take(&mut self.oneshot_actions)
    }
}
