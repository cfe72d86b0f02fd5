use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::difficulty::Difficulty;
use crate::game::Snapshot;
use crate::renderer::PALETTE;

const CONTROLS_TEXT: &str = "Arrows/WASD move │ P pause │ R restart │ Q quit │ 1-3 difficulty";
const ELLIPSIS: &str = "…";

/// Renders the two-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) -> Rect {
    let [play_area, score_area, controls_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(score_line(snapshot)).alignment(Alignment::Center),
        score_area,
    );

    let controls = fit_to_width(CONTROLS_TEXT, usize::from(controls_area.width));
    frame.render_widget(
        Paragraph::new(Line::from(controls))
            .alignment(Alignment::Center)
            .style(Style::default().fg(PALETTE.hud_muted)),
        controls_area,
    );

    play_area
}

fn score_line(snapshot: &Snapshot) -> Line<'static> {
    let value = Style::default()
        .fg(PALETTE.hud_value)
        .add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(PALETTE.hud_muted);

    let mut spans = vec![
        Span::styled("Score: ", muted),
        Span::styled(snapshot.score.to_string(), value),
        Span::styled(" │ Hi: ", muted),
        Span::styled(snapshot.high_score.to_string(), value),
        Span::styled(" │ Speed: ", muted),
        Span::styled(format!("{}/s", snapshot.tick_rate), value),
        Span::styled(" │ ", muted),
    ];

    for (index, difficulty) in Difficulty::ALL.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if difficulty == snapshot.difficulty {
            value
        } else {
            muted
        };
        spans.push(Span::styled(format!("{}:{difficulty}", index + 1), style));
    }

    Line::from(spans)
}

/// Truncates `text` to at most `max_width` terminal columns, marking the cut
/// with an ellipsis.
#[must_use]
pub fn fit_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }

    let budget = max_width.saturating_sub(ELLIPSIS.width());
    let mut used = 0;
    let mut fitted = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > budget {
            break;
        }
        used += ch_width;
        fitted.push(ch);
    }

    if max_width >= ELLIPSIS.width() {
        fitted.push_str(ELLIPSIS);
    }
    fitted
}
