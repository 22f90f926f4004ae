use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_HALF_BLOCK, GLYPH_FOOD, GLYPH_OBSTACLE, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD,
    GLYPHS_TIMER, GameConfig, Theme,
};
use crate::grid::Board;
use crate::snake::Position;
use crate::snapshot::{FoodView, GameSnapshot};
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Terminal columns used per board cell, keeping cells roughly square.
const COLUMNS_PER_CELL: u16 = 2;

/// Which overlay the front end is showing.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Screen {
    Start,
    Playing,
    Paused,
    GameOver,
}

/// Renders the full game frame from an immutable snapshot.
pub fn render(
    frame: &mut Frame<'_>,
    snapshot: &GameSnapshot,
    config: &GameConfig,
    screen: Screen,
    hud_info: HudInfo<'_>,
) {
    let area = frame.area();
    let play_area = centered_board(render_hud(frame, area, snapshot, &hud_info), snapshot.board);

    let theme = hud_info.theme;
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg).bg(theme.border_bg))
        .style(Style::new().bg(theme.play_bg));

    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_obstacles(frame, inner, snapshot, theme);
    render_foods(frame, inner, snapshot, theme);
    render_snake(frame, inner, snapshot, theme);

    match screen {
        Screen::Start => render_start_menu(frame, play_area, config, theme),
        Screen::Paused => render_pause_menu(frame, play_area),
        Screen::GameOver => {
            render_game_over_menu(frame, play_area, snapshot.score, snapshot.death_reason);
        }
        Screen::Playing => {}
    }
}

fn centered_board(area: Rect, board: Board) -> Rect {
    let side = u16::try_from(board.cells_per_side()).unwrap_or(u16::MAX);
    let width = side.saturating_mul(COLUMNS_PER_CELL).saturating_add(2);
    let height = side.saturating_add(2);

    let [_, column, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, board_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(column);

    board_area
}

fn render_obstacles(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot, theme: &Theme) {
    let buffer = frame.buffer_mut();
    for obstacle in &snapshot.obstacles {
        if let Some((x, y)) = cell_to_terminal(inner, snapshot.board, *obstacle) {
            buffer.set_string(x, y, GLYPH_OBSTACLE, Style::new().fg(theme.obstacle));
        }
    }
}

fn render_foods(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot, theme: &Theme) {
    let buffer = frame.buffer_mut();
    for food in &snapshot.foods {
        let Some((x, y)) = cell_to_terminal(inner, snapshot.board, food.position) else {
            continue;
        };

        let color = if food.golden {
            theme.golden_food
        } else {
            theme.food
        };
        buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(color));
        buffer.set_string(
            x.saturating_add(1),
            y,
            timer_glyph(food),
            Style::new().fg(timer_color(food, theme)),
        );
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot, theme: &Theme) {
    let buffer = frame.buffer_mut();

    // Tail first so the head is drawn last and stays on top.
    for (index, segment) in snapshot.snake.iter().enumerate().rev() {
        let Some((x, y)) = cell_to_terminal(inner, snapshot.board, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body));
        }
    }
}

fn timer_glyph(food: &FoodView) -> &'static str {
    let steps = GLYPHS_TIMER.len();
    let spent = ((1.0 - food.remaining_life) * steps as f64) as usize;
    GLYPHS_TIMER[spent.min(steps - 1)]
}

fn timer_color(food: &FoodView, theme: &Theme) -> ratatui::style::Color {
    if food.remaining_life > 0.5 {
        theme.timer_fresh
    } else if food.remaining_life > 0.25 {
        theme.timer_warning
    } else {
        theme.timer_critical
    }
}

fn cell_to_terminal(inner: Rect, board: Board, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(board) {
        return None;
    }

    let column = u16::try_from(position.x / board.tile_size).ok()?;
    let row = u16::try_from(position.y / board.tile_size).ok()?;

    let x = inner.x.saturating_add(column.saturating_mul(COLUMNS_PER_CELL));
    let y = inner.y.saturating_add(row);
    if x.saturating_add(COLUMNS_PER_CELL) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{cell_to_terminal, timer_color, timer_glyph};
    use crate::config::THEME_CLASSIC;
    use crate::grid::Board;
    use crate::snake::Position;
    use crate::snapshot::FoodView;

    const BOARD: Board = Board {
        board_size: 100,
        tile_size: 20,
    };

    fn food(remaining_life: f64) -> FoodView {
        FoodView {
            position: Position { x: 0, y: 0 },
            golden: false,
            remaining_life,
        }
    }

    #[test]
    fn cells_map_to_two_terminal_columns() {
        let inner = Rect::new(1, 1, 10, 5);

        assert_eq!(
            cell_to_terminal(inner, BOARD, Position { x: 0, y: 0 }),
            Some((1, 1))
        );
        assert_eq!(
            cell_to_terminal(inner, BOARD, Position { x: 80, y: 40 }),
            Some((9, 3))
        );
        assert_eq!(
            cell_to_terminal(inner, BOARD, Position { x: 100, y: 0 }),
            None
        );
    }

    #[test]
    fn cells_outside_a_small_terminal_are_skipped() {
        let inner = Rect::new(0, 0, 4, 2);

        assert_eq!(cell_to_terminal(inner, BOARD, Position { x: 40, y: 0 }), None);
    }

    #[test]
    fn timer_runs_from_full_to_empty() {
        assert_eq!(timer_glyph(&food(1.0)), "█");
        assert_eq!(timer_glyph(&food(0.6)), "▆");
        assert_eq!(timer_glyph(&food(0.0)), "▂");
    }

    #[test]
    fn timer_color_follows_remaining_life() {
        assert_eq!(timer_color(&food(0.9), &THEME_CLASSIC), THEME_CLASSIC.timer_fresh);
        assert_eq!(timer_color(&food(0.4), &THEME_CLASSIC), THEME_CLASSIC.timer_warning);
        assert_eq!(timer_color(&food(0.1), &THEME_CLASSIC), THEME_CLASSIC.timer_critical);
    }
}
