use alien_invasion::{Game, Screen, Sprite, Sprites, app::App, audio, input::InputManager};
use color_eyre::{Result, eyre::WrapErr};
use crossterm::{
    cursor::Show,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::{self, Stdout, Write, stdout};
use std::path::Path;

const SHIP_SPRITE: &str = "assets/sprites/ship.txt";
const ALIEN_SPRITE: &str = "assets/sprites/alien.txt";
const FIRE_SOUND: &str = "assets/sounds/fire.wav";
const LOG_FILE: &str = "debug.log";

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging()?;

    // Load assets before touching the terminal so a missing file is reported
    // on a normal screen
    let sprites = Sprites {
        ship: Sprite::load(SHIP_SPRITE)?,
        enemy: Sprite::load(ALIEN_SPRITE)?,
    };
    let audio_manager = audio::try_init(Path::new(FIRE_SOUND));

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    log::info!("Keyboard enhancement supported: {supports_keyboard_enhancement}");

    let mut terminal = match setup_terminal(supports_keyboard_enhancement) {
        Ok(terminal) => terminal,
        Err(err) => {
            if let Err(restore_err) = restore_terminal(supports_keyboard_enhancement) {
                log::warn!("Failed to restore terminal: {restore_err:#}");
            }
            return Err(err);
        }
    };

    let result = run(
        &mut terminal,
        sprites,
        InputManager::new(supports_keyboard_enhancement),
        audio_manager,
    );

    let restored = restore_terminal(supports_keyboard_enhancement);
    result.and(restored)
}

fn setup_terminal(keyboard_enhancement: bool) -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().wrap_err("failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Enable keyboard enhancement AFTER entering alternate screen
    if keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(keyboard_enhancement: bool) -> Result<()> {
    restore_terminal_on(&mut stdout(), keyboard_enhancement, disable_raw_mode)
}

/// Undoes every setup step, carrying on past failures, and reports the
/// first error.
fn restore_terminal_on<W: Write>(
    out: &mut W,
    keyboard_enhancement: bool,
    leave_raw_mode: impl FnOnce() -> io::Result<()>,
) -> Result<()> {
    let steps = [
        if keyboard_enhancement {
            execute!(out, PopKeyboardEnhancementFlags)
        } else {
            Ok(())
        },
        execute!(out, DisableMouseCapture),
        execute!(out, LeaveAlternateScreen),
        leave_raw_mode(),
        execute!(out, Show),
    ];

    for step in steps {
        step.wrap_err("failed to restore terminal")?;
    }
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    sprites: Sprites,
    input_manager: InputManager,
    audio_manager: Option<audio::AudioManager>,
) -> Result<()> {
    let size = terminal.size()?;
    let game = Game::new(sprites, Screen::new(size.width, size.height));
    App::new(game, input_manager, audio_manager).run(terminal)
}

/// Sends log output to a file; the terminal belongs to the game.
fn init_logging() -> Result<()> {
    let log_file =
        File::create(LOG_FILE).wrap_err_with(|| format!("failed to create {LOG_FILE}"))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .write_style(env_logger::WriteStyle::Never)
        .init();
    Ok(())
}
