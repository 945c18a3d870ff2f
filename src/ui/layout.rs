use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    symbols::border,
    text::Line,
    widgets::{Block, Borders},
};

use crate::{
    ui::{
        app::App,
        components::{player::PlayerWidget, status::StatusLine},
    },
    util::colors,
};

pub struct AppLayout<'a> {
    pub app: &'a mut App,
}

impl<'a> AppLayout<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn render(self, f: &mut Frame, area: Rect) {
        let buf = f.buffer_mut();
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        let content_area = chunks[0];
        let player_area = chunks[1];
        let status_area = chunks[2];

        let mut content_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title("lessonbox")
            .title_alignment(Alignment::Center);
        if self.app.ctx.catalog.is_admin() {
            content_block = content_block
                .title_top(Line::from(" admin ".fg(colors::BACKGROUND).bg(colors::PRIMARY)).right_aligned());
        }

        let content_inner = content_block.inner(content_area);
        f.render_widget(content_block, content_area);

        self.app
            .router
            .render(f, content_inner, &self.app.state, &self.app.ctx);

        f.render_widget(PlayerWidget::new(self.app.ctx.catalog.player()), player_area);
        f.render_widget(StatusLine::new(self.app.state.ui.status.as_ref()), status_area);
    }
}
