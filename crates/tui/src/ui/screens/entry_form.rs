use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use api_types::entry::EntryType;

use crate::{
    entries::{
        form::{EntryForm, FormState},
        schema::{Field, SCHEMA, Violation},
    },
    ui::theme::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, form: &EntryForm) {
    let theme = Theme::default();
    let server_errors = form.server_error_messages.as_deref().unwrap_or_default();
    let error_height = if server_errors.is_empty() {
        0
    } else {
        server_errors.len() as u16 + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(error_height)])
        .split(area);

    let violations = form.violations();
    let mut lines = Vec::with_capacity(SCHEMA.len() + 2);
    for rule in SCHEMA {
        lines.push(field_line(form, rule.field, rule.required, &violations, &theme));
    }
    lines.push(Line::from(""));
    lines.push(status_line(form, &theme));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" {} ", form.page_title()));
    frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);

    if !server_errors.is_empty() {
        let lines = server_errors
            .iter()
            .map(|message| {
                Line::from(Span::styled(
                    format!("• {message}"),
                    Style::default().fg(theme.error),
                ))
            })
            .collect::<Vec<_>>();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.error))
            .title(" erros do servidor ");
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            chunks[1],
        );
    }
}

fn field_line(
    form: &EntryForm,
    field: Field,
    required: bool,
    violations: &[Violation],
    theme: &Theme,
) -> Line<'static> {
    let focused = form.focus == field;
    let marker = if focused { "» " } else { "  " };
    let label = format!("{}{}", field.label(), if required { "*" } else { "" });
    let label_style = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };

    let mut value = field_value(form, field);
    if focused && field.is_text() {
        value.push('▏');
    } else if focused {
        value = format!("‹ {value} ›");
    }

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(theme.accent)),
        Span::styled(format!("{label:<12}"), label_style),
        Span::styled(value, Style::default().fg(theme.text)),
    ];
    if let Some(violation) = violations.iter().find(|violation| violation.field == field) {
        spans.push(Span::styled(
            format!("  {}", violation.message()),
            Style::default().fg(theme.error),
        ));
    }
    Line::from(spans)
}

fn field_value(form: &EntryForm, field: Field) -> String {
    let draft = &form.draft;
    match field {
        Field::Type => draft
            .entry_type
            .map(EntryType::label)
            .unwrap_or("-")
            .to_string(),
        Field::Paid => match draft.paid {
            Some(true) => "Pago".to_string(),
            Some(false) => "Pendente".to_string(),
            None => "-".to_string(),
        },
        Field::Category => match draft.category_id {
            Some(id) => form
                .category_name(id)
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{id}")),
            None => "-".to_string(),
        },
        text => draft.text(text).unwrap_or_default().to_string(),
    }
}

fn status_line(form: &EntryForm, theme: &Theme) -> Line<'static> {
    let (text, color) = match form.state() {
        FormState::Initializing | FormState::EditLoading => ("carregando…", theme.dim),
        FormState::Submitting => ("salvando…", theme.accent),
        FormState::SubmitFailed => ("falha ao salvar", theme.error),
        FormState::SubmitSucceeded => ("salvo", theme.positive),
        FormState::New | FormState::EditReady if form.can_submit() => {
            ("pronto para salvar (Enter)", theme.positive)
        }
        FormState::New | FormState::EditReady => ("preencha os campos obrigatórios", theme.dim),
    };
    Line::from(Span::styled(format!("  {text}"), Style::default().fg(color)))
}
