use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{audio::state::PlaybackState, ui::util::get_active_lesson_icon, util::colors};

/// Bottom bar showing the loaded lesson, if any.
pub struct PlayerWidget<'a> {
    state: &'a PlaybackState,
}

impl<'a> PlayerWidget<'a> {
    pub fn new(state: &'a PlaybackState) -> Self {
        Self { state }
    }
}

impl<'a> Widget for PlayerWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(symbols::border::ROUNDED)
            .title_top("Player")
            .title_alignment(Alignment::Center);

        let line = match self.state.lesson() {
            Some(lesson) => {
                let is_playing = self.state.is_playing();
                Line::from(vec![
                    Span::raw(format!("{}  ", get_active_lesson_icon(is_playing))),
                    lesson.title.as_str().fg(colors::PRIMARY).bold(),
                    Span::raw(format!("  {} · {}", lesson.level, lesson.script)),
                    Span::styled(
                        if is_playing {
                            "   space pause · C close"
                        } else {
                            "   space play · C close"
                        },
                        Style::default().fg(colors::NEUTRAL),
                    ),
                ])
            }
            None => Line::from("Nothing playing".fg(colors::NEUTRAL)),
        };

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}
