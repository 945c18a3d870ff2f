use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Paragraph, Widget},
};

use crate::{ui::state::StatusMessage, util::colors};

pub struct StatusLine<'a> {
    message: Option<&'a StatusMessage>,
}

impl<'a> StatusLine<'a> {
    pub fn new(message: Option<&'a StatusMessage>) -> Self {
        Self { message }
    }
}

impl<'a> Widget for StatusLine<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let span = match self.message {
            Some(message) if message.is_error => {
                Span::styled(message.text.as_str(), Style::default().fg(colors::ERROR))
            }
            Some(message) => {
                Span::styled(message.text.as_str(), Style::default().fg(colors::SECONDARY))
            }
            None => Span::styled("q quit · A admin", Style::default().fg(colors::NEUTRAL)),
        };
        Paragraph::new(span).render(area, buf);
    }
}
