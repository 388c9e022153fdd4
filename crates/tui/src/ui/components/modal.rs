use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    app::AppState,
    entries::list::DELETE_CONFIRMATION,
    ui::{
        components::{
            centered_rect,
            hints::{KeyHint, hints_to_spans},
        },
        theme::Theme,
    },
};

/// Blocking alert first, then a pending delete confirmation.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    if let Some(message) = state.notices.current_alert() {
        let hints = [KeyHint::new("Enter", "ok")];
        render_dialog(frame, area, " aviso ", message, &hints, theme.error, &theme);
        return;
    }

    if let Some(entry) = state.list.pending_delete() {
        let name = entry.name.as_deref().unwrap_or("-");
        let message = format!("{DELETE_CONFIRMATION}\n\n{name}");
        let hints = [KeyHint::new("y", "sim"), KeyHint::new("n", "não")];
        render_dialog(frame, area, " confirmar ", &message, &hints, theme.accent, &theme);
    }
}

fn render_dialog(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    message: &str,
    hints: &[KeyHint],
    color: ratatui::style::Color,
    theme: &Theme,
) {
    let popup = centered_rect(50, 30, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));

    let mut lines: Vec<Line<'_>> = message
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(theme.text))))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(hints_to_spans(hints, theme)));

    let content = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(content, popup);
}
