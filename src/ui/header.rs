use crate::ui::i18n::Strings;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header<'a> {
    strings: &'a Strings,
    providers: Option<usize>,
}

impl<'a> Header<'a> {
    /// `providers` is `None` until a document is loaded.
    pub fn new(strings: &'a Strings, providers: Option<usize>) -> Self {
        Self { strings, providers }
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let mut spans = vec![
            Span::styled("  ", text_style),
            Span::styled(
                self.strings.title,
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(count) = self.providers {
            spans.push(Span::styled("  │  ", separator_style));
            spans.push(Span::styled(
                format!("{}: {}", self.strings.providers, count),
                text_style,
            ));
        }
        spans.push(Span::styled("  │  ", separator_style));
        spans.push(Span::styled(self.strings.language, text_style));

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
