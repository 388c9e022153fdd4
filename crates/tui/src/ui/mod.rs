pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::AppState, route::Route};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    // Info bar, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);

    match state.route {
        Route::EntryList => screens::entry_list::render(frame, layout[1], state),
        Route::NewEntry | Route::EditEntry(_) => {
            screens::entry_form::render(frame, layout[1], &state.form)
        }
    }

    render_bottom_bar(frame, layout[2], state, &theme);
    components::modal::render(frame, area, state);
    components::toast::render(frame, area, state.notices.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled("Lançamentos", Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::styled("Servidor", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Rota", Style::default().fg(theme.dim)),
        Span::raw(format!(": /{}", state.route.path())),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints = if state.is_form() {
        components::hints::form_hints()
    } else {
        components::hints::list_hints()
    };
    let bar = Paragraph::new(Line::from(components::hints::hints_to_spans(&hints, theme)));
    frame.render_widget(bar, area);
}
