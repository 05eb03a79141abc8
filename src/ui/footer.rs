use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR, STATUS_OK};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Status message shown at the right edge of the footer.
pub struct FooterStatus {
    pub text: String,
    pub is_error: bool,
}

pub struct Footer<'a> {
    hints: &'a str,
    status: Option<FooterStatus>,
}

impl<'a> Footer<'a> {
    pub fn new(hints: &'a str, status: Option<FooterStatus>) -> Self {
        Self { hints, status }
    }

    pub fn widget(self, area: Rect) -> Paragraph<'a> {
        let dim_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        let (right, right_style) = match self.status {
            Some(status) => {
                let color = if status.is_error { STATUS_ERROR } else { STATUS_OK };
                (format!("{} ", status.text), Style::default().fg(color))
            }
            None => (format!("v{} ", VERSION), dim_style),
        };

        // Padding is measured in chars; hints contain CJK and box-drawing glyphs.
        let hints_width = self.hints.chars().count();
        let right_width = right.chars().count();
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(hints_width)
            .saturating_sub(right_width);

        let line = Line::from(vec![
            Span::styled(self.hints, dim_style),
            Span::styled(" ".repeat(padding), dim_style),
            Span::styled(right, right_style),
        ]);

        Paragraph::new(line).alignment(Alignment::Left).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
