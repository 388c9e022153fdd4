use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use api_types::entry::{DATE_FORMAT, Entry, EntryType};

use crate::{app::AppState, ui::theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" {} lançamentos ", state.list.items.len()));

    if state.list.items.is_empty() {
        let empty = Paragraph::new(Line::from("Nenhum lançamento."))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items = state
        .list
        .items
        .iter()
        .map(|entry| ListItem::new(entry_line(entry, state, &theme)))
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.list.selected));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn entry_line(entry: &Entry, state: &AppState, theme: &Theme) -> Line<'static> {
    let date = entry
        .date
        .map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "--/--/----".to_string());
    let kind = entry.entry_type.map(EntryType::label).unwrap_or("-");
    let amount = entry
        .amount
        .map(|amount| amount.to_string())
        .unwrap_or_else(|| "-".to_string());
    let amount_color = match entry.entry_type {
        Some(EntryType::Revenue) => theme.positive,
        Some(EntryType::Expense) => theme.negative,
        None => theme.text,
    };
    let paid_color = if entry.paid.unwrap_or(false) {
        theme.positive
    } else {
        theme.dim
    };

    Line::from(vec![
        Span::styled(date, Style::default().fg(theme.dim)),
        Span::raw("  "),
        Span::raw(format!("{:<24}", entry.name.as_deref().unwrap_or("-"))),
        Span::raw(format!("{kind:<8}")),
        Span::styled(format!("{amount:>14}"), Style::default().fg(amount_color)),
        Span::raw("  "),
        Span::styled(format!("{:<9}", entry.paid_text()), Style::default().fg(paid_color)),
        Span::styled(category_label(entry, state), Style::default().fg(theme.dim)),
    ])
}

fn category_label(entry: &Entry, state: &AppState) -> String {
    if let Some(name) = entry.category.as_ref().and_then(|c| c.name.clone()) {
        return name;
    }
    match entry.category_id {
        Some(id) => state
            .list
            .category_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{id}")),
        None => "-".to_string(),
    }
}
