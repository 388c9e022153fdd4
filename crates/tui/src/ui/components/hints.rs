use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: String,
    pub action: String,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            hint.key.clone(),
            Style::default().fg(theme.accent),
        ));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn list_hints() -> Vec<KeyHint> {
    vec![
        KeyHint::new("↑↓", "selecionar"),
        KeyHint::new("n", "novo"),
        KeyHint::new("Enter", "editar"),
        KeyHint::new("d", "excluir"),
        KeyHint::new("r", "recarregar"),
        KeyHint::new("q", "sair"),
    ]
}

pub fn form_hints() -> Vec<KeyHint> {
    vec![
        KeyHint::new("Tab", "próximo"),
        KeyHint::new("Space/←→", "alterar"),
        KeyHint::new("Enter", "salvar"),
        KeyHint::new("Esc", "voltar"),
        KeyHint::new("Ctrl+C", "sair"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_alternate_key_and_action() {
        let theme = Theme::default();
        let spans = hints_to_spans(&[KeyHint::new("n", "novo"), KeyHint::new("d", "excluir")], &theme);

        let text: Vec<String> = spans.iter().map(|span| span.content.to_string()).collect();
        assert_eq!(text, vec!["n", " novo", "  ", "d", " excluir"]);
    }
}
