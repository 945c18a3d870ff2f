use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    event::events::Event,
    ui::{
        context::AppContext,
        state::AppState,
        traits::{Action, View},
    },
    util::colors,
};

#[derive(Default)]
pub struct Login {
    secret: String,
    rejected: bool,
}

#[async_trait]
impl View for Login {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, _ctx: &AppContext) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Admin access")
            .border_style(Style::default().fg(colors::PRIMARY));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let masked = format!("{}▏", "•".repeat(self.secret.chars().count()));
        f.render_widget(
            Paragraph::new(masked).block(Block::default().borders(Borders::ALL).title("Secret")),
            chunks[0],
        );

        let footer = if self.rejected {
            Span::styled("Wrong secret", Style::default().fg(colors::ERROR))
        } else {
            Span::styled(
                "enter unlock · esc cancel",
                Style::default().fg(colors::NEUTRAL),
            )
        };
        f.render_widget(Paragraph::new(Line::from(footer)), chunks[1]);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return None,
            KeyCode::Esc => return Some(Action::CloseOverlay),
            KeyCode::Enter => {
                let _ = ctx.event_tx.send(Event::Login(std::mem::take(&mut self.secret)));
            }
            KeyCode::Backspace => {
                self.secret.pop();
            }
            KeyCode::Char(c) => {
                self.secret.push(c);
                self.rejected = false;
            }
            _ => {}
        }
        Some(Action::None)
    }

    async fn on_event(&mut self, event: &Event, _ctx: &AppContext) {
        if let Event::LoginRejected = event {
            self.rejected = true;
        }
    }
}
