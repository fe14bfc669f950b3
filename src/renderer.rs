use crate::button::Button;
use crate::entities::{Bounds, Enemy, Projectile, Ship, Sprite};
use crate::game::Game;
use crate::scoreboard::Scoreboard;
use rand::Rng;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// One star per this many cells of background
const STAR_DENSITY: u32 = 40;
const SHIP_GLYPH: &str = "^";

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_active: bool,
    pub game_over: bool,
    pub cursor_visible: bool,
    pub ship: &'a Ship,
    pub ship_sprite: &'a Sprite,
    pub enemies: &'a [Enemy],
    pub enemy_sprite: &'a Sprite,
    pub projectiles: &'a [Projectile],
    pub scoreboard: &'a Scoreboard,
    pub play_button: &'a Button,
    pub frame_count: u64,
}

impl<'a> RenderView<'a> {
    pub fn new(game: &'a Game, frame_count: u64) -> Self {
        Self {
            game_active: game.is_active(),
            game_over: !game.is_active() && game.stats.lives_left == 0,
            cursor_visible: game.cursor_visible,
            ship: &game.ship,
            ship_sprite: &game.sprites.ship,
            enemies: &game.fleet.enemies,
            enemy_sprite: &game.sprites.enemy,
            projectiles: &game.projectiles,
            scoreboard: &game.scoreboard,
            play_button: &game.play_button,
            frame_count,
        }
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Default)]
pub struct GameRenderer {
    stars: Vec<(u16, u16)>,
    /// Area the stars were scattered over
    star_area: Rect,
}

impl GameRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws a full frame. Runs in every state so the Play button and the
    /// frozen board stay visible between games.
    pub fn render(&mut self, frame: &mut Frame, view: &RenderView) {
        let area = frame.area();

        self.render_background(frame, area, view.frame_count);
        self.render_entities(frame.buffer_mut(), area, view);
        self.render_hud(frame, area, view);

        if !view.game_active {
            self.render_play_button(frame, area, view);
        }
    }

    fn render_background(&mut self, frame: &mut Frame, area: Rect, frame_count: u64) {
        if area != self.star_area {
            self.scatter_stars(area);
        }

        let buffer = frame.buffer_mut();
        for (i, &(x, y)) in self.stars.iter().enumerate() {
            // Every fourth star twinkles
            let dim = i % 4 == 0 && (frame_count / 20) % 2 == 0;
            let style = if dim {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Gray)
            };
            buffer.set_string(x, y, ".", style);
        }
    }

    fn scatter_stars(&mut self, area: Rect) {
        let mut rng = rand::rng();
        let count = area.width as u32 * area.height as u32 / STAR_DENSITY;

        self.stars.clear();
        if area.width > 0 && area.height > 0 {
            for _ in 0..count {
                let x = area.x + rng.random_range(0..area.width);
                let y = area.y + rng.random_range(0..area.height);
                self.stars.push((x, y));
            }
        }
        self.star_area = area;
    }

    fn render_entities(&self, buffer: &mut Buffer, area: Rect, view: &RenderView) {
        let projectile_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        for projectile in view.projectiles {
            let bounds = projectile.bounds();
            if let Some((x, y)) = cell_in(area, bounds.x, bounds.y) {
                buffer.set_string(x, y, Projectile::GLYPH.to_string(), projectile_style);
            }
        }

        let ship_style = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);
        draw_sprite(buffer, area, view.ship_sprite, view.ship.bounds(), ship_style);

        let enemy_style = Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD);
        for enemy in view.enemies {
            draw_sprite(buffer, area, view.enemy_sprite, enemy.bounds(), enemy_style);
        }
    }

    /// Ships left top-left, high score top-centre, score and level top-right.
    fn render_hud(&self, frame: &mut Frame, area: Rect, view: &RenderView) {
        let scoreboard = view.scoreboard;
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let top_row = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: area.height.min(1),
        };
        let second_row = Rect {
            y: area.y + 1,
            height: area.height.saturating_sub(1).min(1),
            ..top_row
        };

        let ships = SHIP_GLYPH.repeat(scoreboard.ships_left as usize);
        frame.render_widget(
            Paragraph::new(Span::styled(ships, Style::default().fg(Color::Green).bold())),
            top_row,
        );

        let high_score = Line::from(vec![
            Span::styled("High ", label),
            Span::styled(scoreboard.high_score_text.as_str(), value.fg(Color::Yellow)),
        ]);
        frame.render_widget(
            Paragraph::new(high_score).alignment(Alignment::Center),
            top_row,
        );

        let score = Line::from(vec![
            Span::styled("Score ", label),
            Span::styled(scoreboard.score_text.as_str(), value),
        ]);
        frame.render_widget(Paragraph::new(score).alignment(Alignment::Right), top_row);

        let level = Line::from(vec![
            Span::styled("Level ", label),
            Span::styled(scoreboard.level_text.as_str(), value.fg(Color::Cyan)),
        ]);
        frame.render_widget(
            Paragraph::new(level).alignment(Alignment::Right),
            second_row,
        );
    }

    fn render_play_button(&self, frame: &mut Frame, area: Rect, view: &RenderView) {
        let button = view.play_button;
        let Some(button_area) = clip(area, button.bounds) else {
            return;
        };

        if view.game_over {
            let banner_row = button.bounds.y - 2;
            if let Some(banner_area) = clip(area, Bounds::new(0, banner_row, area.width as i32, 1)) {
                frame.render_widget(
                    Paragraph::new(Line::from("GAME OVER").red().bold()).alignment(Alignment::Center),
                    banner_area,
                );
            }
        }

        frame.render_widget(Clear, button_area);
        frame.render_widget(
            Paragraph::new(Line::from(button.label.as_str()).bold())
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::White).bg(Color::Green))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::LightGreen)),
                ),
            button_area,
        );

        let hint_row = button.bounds.bottom() + 1;
        if let Some(hint_area) = clip(area, Bounds::new(0, hint_row, area.width as i32, 1)) {
            frame.render_widget(
                Paragraph::new(Line::from(
                    "[Click Play or press P] [Left/Right: Move] [Space: Fire] [Q: Quit]",
                ))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
                hint_area,
            );
        }

        if view.cursor_visible {
            frame.set_cursor_position(Position::new(
                button_area.x + button_area.width / 2,
                button_area.y + button_area.height / 2,
            ));
        }
    }
}

/// Maps a playfield cell to a buffer position, or None when off screen.
fn cell_in(area: Rect, x: i32, y: i32) -> Option<(u16, u16)> {
    if x < 0 || y < 0 || x >= area.width as i32 || y >= area.height as i32 {
        return None;
    }
    Some((area.x + x as u16, area.y + y as u16))
}

/// Part of `bounds` that is on screen, as a buffer rect.
fn clip(area: Rect, bounds: Bounds) -> Option<Rect> {
    let left = bounds.left().max(0);
    let top = bounds.top().max(0);
    let right = bounds.right().min(area.width as i32);
    let bottom = bounds.bottom().min(area.height as i32);
    if left >= right || top >= bottom {
        return None;
    }

    Some(Rect {
        x: area.x + left as u16,
        y: area.y + top as u16,
        width: (right - left) as u16,
        height: (bottom - top) as u16,
    })
}

/// Draws sprite art cell by cell; spaces are transparent and anything off
/// screen is clipped.
fn draw_sprite(buffer: &mut Buffer, area: Rect, sprite: &Sprite, bounds: Bounds, style: Style) {
    for (row, line) in sprite.lines().iter().enumerate() {
        for (column, glyph) in line.chars().enumerate() {
            if glyph == ' ' {
                continue;
            }
            if let Some((x, y)) = cell_in(area, bounds.x + column as i32, bounds.y + row as i32) {
                buffer.set_string(x, y, glyph.to_string(), style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Screen;
    use crate::game::Sprites;
    use ratatui::{Terminal, backend::TestBackend};

    fn game(width: u16, height: u16) -> Game {
        let sprites = Sprites {
            ship: Sprite::from_art(" _^_ \n<=|=>").unwrap(),
            enemy: Sprite::from_art("{o-o}\n/^^^\\").unwrap(),
        };
        Game::new(sprites, Screen::new(width, height))
    }

    fn draw(game: &Game) -> Vec<String> {
        let backend = TestBackend::new(game.screen.width, game.screen.height);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut renderer = GameRenderer::new();
        terminal
            .draw(|frame| renderer.render(frame, &RenderView::new(game, 0)))
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(game.screen.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    #[test]
    fn test_inactive_frame_shows_play_button() {
        let rows = draw(&game(80, 24));
        assert!(rows.iter().any(|row| row.contains("Play")));
        assert!(rows.iter().all(|row| !row.contains("GAME OVER")));
    }

    #[test]
    fn test_active_frame_shows_board_and_hud() {
        let mut game = game(80, 24);
        game.start_game();
        game.fire_projectile();
        // Clear of the ship's nose
        game.update_projectiles();

        let rows = draw(&game);
        assert!(rows.iter().all(|row| !row.contains("Play")));
        assert!(rows[0].contains("Score 0"));
        assert!(rows[0].contains("High 0"));
        assert!(rows[0].contains("^^^"));
        assert!(rows[1].contains("Level 1"));
        // First enemy at column 5, row 2
        assert_eq!(&rows[2][5..10], "{o-o}");
        assert!(rows[23].contains("<=|=>"));
        assert!(rows[21].contains('|'));
    }

    #[test]
    fn test_game_over_banner() {
        let mut game = game(80, 24);
        game.start_game();
        game.stats.lives_left = 1;
        game.ship_hit();

        let rows = draw(&game);
        assert!(rows.iter().any(|row| row.contains("GAME OVER")));
        assert!(rows.iter().any(|row| row.contains("Play")));
    }

    #[test]
    fn test_entities_off_screen_are_clipped() {
        let mut game = game(20, 12);
        game.start_game();
        game.fleet.enemies[0].x = -3.0;
        game.fleet.enemies[0].y = 11.0;
        game.projectiles.push(Projectile::new(25, 5, 0.6));

        // Must not panic on partially visible sprites
        let rows = draw(&game);
        assert_eq!(&rows[11][0..2], "o}");
    }

    #[test]
    fn test_clip() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(
            clip(area, Bounds::new(-2, 22, 5, 4)),
            Some(Rect::new(0, 22, 3, 2))
        );
        assert_eq!(clip(area, Bounds::new(80, 0, 5, 2)), None);
    }
}
