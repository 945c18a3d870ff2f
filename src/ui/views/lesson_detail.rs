use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    event::events::Event,
    nav::Route,
    store::lesson::Lesson,
    ui::{
        context::AppContext,
        state::AppState,
        traits::{Action, View},
    },
    util::colors,
};

pub struct LessonDetail {
    pub id: String,
    scroll: u16,
    pending_delete: bool,
}

impl LessonDetail {
    pub fn new(id: String) -> Self {
        Self {
            id,
            scroll: 0,
            pending_delete: false,
        }
    }

    fn render_not_found(&self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Lesson not found",
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("No lesson has the id '{}'.", self.id)),
            Line::from(Span::styled(
                "esc back to the list",
                Style::default().fg(colors::NEUTRAL),
            )),
        ];
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
    }

    fn render_lesson(&self, f: &mut Frame, area: Rect, lesson: &Lesson, ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        let title_block = Block::default().borders(Borders::ALL).title("Lesson");
        f.render_widget(
            Paragraph::new(Span::styled(
                lesson.title.as_str(),
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(colors::PRIMARY),
            ))
            .block(title_block),
            chunks[0],
        );

        let mut meta = vec![
            Span::raw(lesson.level.as_str()),
            Span::raw(" · "),
            Span::raw(lesson.script.as_str()),
        ];
        if let Some(topic) = &lesson.topic {
            meta.push(Span::raw(" · "));
            meta.push(Span::raw(topic.as_str()));
        }
        let audio = match &lesson.audio_url {
            Some(url) => {
                let loaded = ctx
                    .catalog
                    .player()
                    .lesson()
                    .is_some_and(|l| l.id == lesson.id);
                let label = if loaded && ctx.catalog.player().is_playing() {
                    "playing"
                } else {
                    "p to play"
                };
                format!("    ♪ {url} ({label})")
            }
            None => "    no audio".to_string(),
        };
        meta.push(Span::styled(audio, Style::default().fg(colors::SECONDARY)));
        f.render_widget(
            Paragraph::new(Line::from(meta))
                .block(Block::default().borders(Borders::ALL).title("Info")),
            chunks[1],
        );

        let mut body = Vec::new();
        for (heading, text) in [
            ("Description", &lesson.description),
            ("Transcript", &lesson.transcript),
            ("Vocabulary", &lesson.vocabulary),
        ] {
            let Some(text) = text else { continue };
            body.push(Line::from(Span::styled(
                heading,
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )));
            body.extend(text.lines().map(|l| Line::from(l.to_string())));
            body.push(Line::from(""));
        }
        if body.is_empty() {
            body.push(Line::from(Span::styled(
                "No transcript or vocabulary yet.",
                Style::default().fg(colors::NEUTRAL),
            )));
        }
        f.render_widget(
            Paragraph::new(body)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0))
                .block(Block::default().borders(Borders::ALL)),
            chunks[2],
        );

        let hints = if self.pending_delete {
            Span::styled(
                "Delete this lesson? y to confirm, any other key to cancel",
                Style::default().fg(colors::ERROR),
            )
        } else if ctx.catalog.is_admin() {
            Span::styled(
                "esc back · p play · j/k scroll · e edit · d delete",
                Style::default().fg(colors::NEUTRAL),
            )
        } else {
            Span::styled(
                "esc back · p play · j/k scroll",
                Style::default().fg(colors::NEUTRAL),
            )
        };
        f.render_widget(Paragraph::new(Line::from(hints)), chunks[3]);
    }
}

#[async_trait]
impl View for LessonDetail {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, ctx: &AppContext) {
        match ctx.catalog.lesson(&self.id) {
            Some(lesson) => self.render_lesson(f, area, lesson, ctx),
            None => self.render_not_found(f, area),
        }
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        if self.pending_delete {
            self.pending_delete = false;
            if key.code == KeyCode::Char('y') {
                let _ = ctx.event_tx.send(Event::DeleteLesson(self.id.clone()));
            }
            return Some(Action::None);
        }

        let exists = ctx.catalog.lesson(&self.id).is_some();
        let is_admin = ctx.catalog.is_admin();
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => Some(Action::Back),
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = self.scroll.saturating_add(1);
                Some(Action::None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
                Some(Action::None)
            }
            KeyCode::Enter | KeyCode::Char('p') if exists => {
                let _ = ctx.event_tx.send(Event::Play(self.id.clone()));
                Some(Action::None)
            }
            KeyCode::Char('e') if exists && is_admin => {
                let _ = ctx.event_tx.send(Event::EditLesson(Some(self.id.clone())));
                Some(Action::None)
            }
            KeyCode::Char('d') if exists && is_admin => {
                self.pending_delete = true;
                Some(Action::None)
            }
            _ => None,
        }
    }

    fn route(&self) -> Route {
        Route::Detail(self.id.clone())
    }
}
