use crate::entities::{
    Beam, Bullet, Enemy, Explosion, FreeBullet, GameState, HealthBand, HealthBar, MatchOutcome,
    Player, Rgb,
};
use crate::geometry::{Field, Rect as FieldRect};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Gauge, Paragraph,
        canvas::{Canvas, Circle, Context, Rectangle},
    },
};

/// Everything the renderer needs from the world for one frame
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub field: Field,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub beams: &'a [Beam],
    pub bullets: &'a [Bullet],
    pub free_bullets: &'a [FreeBullet],
    pub explosions: &'a [Explosion],
    pub health_bar: HealthBar,
    pub special_lives: u8,
    pub tick: u64,
    pub ticks_per_second: u32,
    pub area: Rect,
}

/// Draws the playfield onto a braille canvas with a one-line HUD above it
pub struct GameRenderer;

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    /// Creates a new GameRenderer
    pub fn new() -> Self {
        Self
    }

    /// Draws the HUD, the field, the controls line and any match-over overlay
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let hud_area = Rect {
            height: area.height.min(1),
            ..area
        };
        let controls_area = Rect {
            y: area.y + area.height.saturating_sub(1),
            height: area.height.min(1),
            ..area
        };
        let body = Rect {
            y: area.y + 1,
            height: area.height.saturating_sub(2),
            ..area
        };
        let field_area = field_area(body, &view.field);

        self.render_field(frame, view, field_area);
        self.render_hud(frame, view, hud_area);

        let controls = Line::from(Span::styled(
            "[WASD/Arrows: Move] [Space: Beam] [B: Special] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);

        if let GameState::Over(outcome) = view.game_state {
            self.render_match_over(frame, outcome, field_area);
        }
    }

    fn render_field(&self, frame: &mut Frame, view: &RenderView, area: Rect) {
        let field = view.field;
        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .marker(Marker::Braille)
            .x_bounds([0.0, field.width as f64])
            .y_bounds([0.0, field.height as f64])
            .paint(|ctx| {
                for bullet in view.free_bullets {
                    draw_ball(ctx, &field, &bullet.rect, bullet.radius, bullet.color);
                }
                for bullet in view.bullets {
                    draw_ball(ctx, &field, &bullet.rect, bullet.radius, bullet.color);
                }
                for beam in view.beams {
                    draw_box(ctx, &field, &beam.rect, Color::LightCyan);
                }
                ctx.layer();

                for enemy in view.enemies {
                    draw_box(ctx, &field, &enemy.rect, Color::Red);
                    let (x, y) = to_canvas(&field, enemy.rect.center());
                    ctx.print(x, y, "▼".red().bold());
                }
                for explosion in view.explosions {
                    let (x, y) = to_canvas(&field, explosion.center);
                    ctx.print(x, y, explosion.glyph().yellow().bold());
                }

                let (x, y) = to_canvas(&field, view.player.rect.center());
                let color = if view.player.pose.is_some() {
                    Color::Yellow
                } else {
                    Color::Green
                };
                ctx.print(
                    x,
                    y,
                    Span::styled(
                        view.player.sprite(),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                );
            });
        frame.render_widget(canvas, area);
    }

    fn render_hud(&self, frame: &mut Frame, view: &RenderView, area: Rect) {
        let gauge_width = area.width.min(30);
        let gauge_area = Rect {
            width: gauge_width,
            ..area
        };
        let stats_area = Rect {
            x: area.x + gauge_width,
            width: area.width.saturating_sub(gauge_width),
            ..area
        };

        let bar = &view.health_bar;
        let band_color = match bar.band() {
            HealthBand::Green => Color::Green,
            HealthBand::Yellow => Color::Yellow,
            HealthBand::Red => Color::Red,
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(band_color).bg(Color::Black))
            .ratio(f64::from(bar.ratio()).clamp(0.0, 1.0))
            .label(format!("HP {}/{}", bar.health.max(0), bar.max));
        frame.render_widget(gauge, gauge_area);

        let seconds = view.tick / u64::from(view.ticks_per_second.max(1));
        let stats = Line::from(vec![
            Span::styled("  SPECIAL: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.special_lives),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Time: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:02}:{:02}", seconds / 60, seconds % 60),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(stats), stats_area);
    }

    fn render_match_over(&self, frame: &mut Frame, outcome: MatchOutcome, area: Rect) {
        let (title, color) = match outcome {
            MatchOutcome::Won => ("YOU WIN!", Color::Yellow),
            MatchOutcome::Lost => ("GAME OVER", Color::Red),
        };
        let text = vec![
            Line::from(""),
            Line::from(title).centered().bold().fg(color),
            Line::from(""),
        ];
        let width = 24.min(area.width);
        let height = 5.min(area.height);
        let overlay = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        };
        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                )
                .alignment(Alignment::Center),
            overlay,
        );
    }
}

/// Largest centred area that keeps the field's aspect ratio, assuming
/// terminal cells are twice as tall as they are wide.
pub fn field_area(area: Rect, field: &Field) -> Rect {
    let wanted = (f32::from(area.height) * 2.0 * field.width / field.height).round() as u16;
    let width = wanted.clamp(1, area.width.max(1)).min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

/// Field coordinates grow downwards; the canvas grows upwards.
fn to_canvas(field: &Field, (x, y): (f32, f32)) -> (f64, f64) {
    (f64::from(x), f64::from(field.height - y))
}

fn draw_box(ctx: &mut Context, field: &Field, rect: &FieldRect, color: Color) {
    ctx.draw(&Rectangle {
        x: f64::from(rect.left()),
        y: f64::from(field.height - rect.bottom()),
        width: f64::from(rect.width),
        height: f64::from(rect.height),
        color,
    });
}

fn draw_ball(ctx: &mut Context, field: &Field, rect: &FieldRect, radius: f32, color: Rgb) {
    let (x, y) = to_canvas(field, rect.center());
    ctx.draw(&Circle {
        x,
        y,
        radius: f64::from(radius),
        color: to_color(color),
    });
}

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Player;
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn draw(state: GameState, special_lives: u8) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let player = Player::new(300.0, 600.0);
        terminal
            .draw(|frame| {
                let view = RenderView {
                    game_state: state,
                    field: Field::new(600.0, 700.0),
                    player: &player,
                    enemies: &[],
                    beams: &[],
                    bullets: &[],
                    free_bullets: &[],
                    explosions: &[],
                    health_bar: HealthBar::new(150, 200),
                    special_lives,
                    tick: 125,
                    ticks_per_second: 50,
                    area: frame.area(),
                };
                GameRenderer::new().render(frame, &view);
            })
            .unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_hud_shows_special_and_health() {
        let text = draw(GameState::Playing, 2);
        assert!(text.contains("SPECIAL: 2"));
        assert!(text.contains("HP 150/200"));
        assert!(text.contains("00:02"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_match_over_overlay() {
        assert!(draw(GameState::Over(MatchOutcome::Lost), 3).contains("GAME OVER"));
        assert!(draw(GameState::Over(MatchOutcome::Won), 3).contains("YOU WIN!"));
    }

    #[test]
    fn test_field_area_keeps_aspect() {
        let field = Field::new(600.0, 700.0);
        let area = field_area(Rect::new(0, 1, 200, 35), &field);
        assert_eq!(area.height, 35);
        assert_eq!(area.width, 60);
        assert_eq!(area.x, 70);

        // Narrow terminals get the full width
        let narrow = field_area(Rect::new(0, 0, 40, 35), &field);
        assert_eq!(narrow.width, 40);
        assert_eq!(narrow.x, 0);
    }

    #[test]
    fn test_canvas_y_is_flipped() {
        let field = Field::new(600.0, 700.0);
        assert_eq!(to_canvas(&field, (10.0, 0.0)), (10.0, 700.0));
        assert_eq!(to_canvas(&field, (10.0, 700.0)), (10.0, 0.0));
    }
}
