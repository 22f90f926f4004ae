use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::{BoundaryPolicy, Theme};
use crate::snapshot::GameSnapshot;

const SEPARATOR: &str = " │ ";
const SCORE_FLASH_DURATION: Duration = Duration::from_secs(1);

/// Supplemental values displayed by the HUD rows.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub theme: &'a Theme,
    pub boundary_policy: BoundaryPolicy,
    pub paused: bool,
    /// Wall-clock instant of this frame render.
    pub now: Instant,
    pub score_changed_at: Option<Instant>,
}

/// Renders the two-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &GameSnapshot,
    info: &HudInfo<'_>,
) -> Rect {
    let [play_area, score_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(score_line(snapshot, info, usize::from(score_area.width)))
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        score_area,
    );

    frame.render_widget(
        Paragraph::new(status_line(snapshot, info))
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        status_area,
    );

    play_area
}

fn score_line(snapshot: &GameSnapshot, info: &HudInfo<'_>, available_width: usize) -> Line<'static> {
    let length = snapshot.snake_len().to_string();
    let obstacles = snapshot.obstacles.len().to_string();
    let score = snapshot.score.to_string();

    let full = [("Length", &length), ("Walls", &obstacles), ("Score", &score)];
    let compact = [("L", &length), ("W", &obstacles), ("S", &score)];
    let labels = if line_width(&full) > available_width {
        compact
    } else {
        full
    };

    let score_style = if is_flashing(info.score_changed_at, info.now) {
        Style::default()
            .fg(info.theme.menu_title)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(info.theme.hud_score)
    };

    let mut spans = Vec::new();
    for (index, (label, value)) in labels.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(SEPARATOR));
        }
        spans.push(Span::raw(format!("{label}: ")));
        let style = if index == labels.len() - 1 {
            score_style
        } else {
            Style::default().fg(info.theme.hud_score)
        };
        spans.push(Span::styled((*value).clone(), style));
    }

    Line::from(spans)
}

fn status_line(snapshot: &GameSnapshot, info: &HudInfo<'_>) -> Line<'static> {
    let side = snapshot.board.cells_per_side();
    let golden = snapshot.foods.iter().filter(|food| food.golden).count();
    let boundary = match info.boundary_policy {
        BoundaryPolicy::Wall => "walls",
        BoundaryPolicy::Wraparound => "wrap",
    };

    let mut spans = vec![
        Span::raw(format!("{side}x{side}")),
        Span::raw(SEPARATOR),
        Span::styled("●", Style::default().fg(info.theme.food)),
        Span::raw(format!(": {}", snapshot.foods.len() - golden)),
        Span::raw(SEPARATOR),
        Span::styled("●", Style::default().fg(info.theme.golden_food)),
        Span::raw(format!(": {golden}")),
        Span::raw(SEPARATOR),
        Span::raw(boundary),
    ];
    if info.paused {
        spans.push(Span::raw(SEPARATOR));
        spans.push(Span::styled(
            "paused",
            Style::default().fg(info.theme.timer_warning),
        ));
    }

    Line::from(spans)
}

fn line_width(labels: &[(&str, &String)]) -> usize {
    let fields: usize = labels
        .iter()
        .map(|(label, value)| label.width() + 2 + value.width())
        .sum();
    fields + SEPARATOR.width() * labels.len().saturating_sub(1)
}

fn is_flashing(changed_at: Option<Instant>, now: Instant) -> bool {
    changed_at.is_some_and(|at| now.saturating_duration_since(at) < SCORE_FLASH_DURATION)
}
