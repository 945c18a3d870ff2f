use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    catalog::Catalog,
    event::events::Event,
    ui::{
        context::AppContext,
        state::AppState,
        traits::{Action, View},
        util::{fit, get_active_lesson_icon},
    },
    util::colors,
};

const TITLE_WIDTH: usize = 32;

fn delete_prompt(catalog: &Catalog, id: &str) -> String {
    let name = catalog.lesson(id).map_or(id, |l| l.title.as_str());
    format!("Delete '{name}'? y to confirm, any other key to cancel")
}

#[derive(Default)]
pub struct LessonList {
    list_state: ListState,
    query: String,
    is_editing: bool,
    pending_delete: Option<String>,
}

impl LessonList {
    fn selected_id(&self, ctx: &AppContext) -> Option<String> {
        let i = self.list_state.selected()?;
        ctx.catalog.visible().get(i).map(|l| l.id.clone())
    }

    fn clamp_selection(&mut self, len: usize) {
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    fn render_filters(&self, f: &mut Frame, area: Rect, ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(20),
                Constraint::Length(18),
                Constraint::Length(14),
            ])
            .split(area);

        let criteria = ctx.catalog.criteria();
        let query_style = if self.is_editing {
            Style::default().fg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };

        let query = if self.is_editing {
            format!("{}▏", self.query)
        } else {
            self.query.clone()
        };

        f.render_widget(
            Paragraph::new(query).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Search (/)")
                    .border_style(query_style),
            ),
            chunks[0],
        );
        f.render_widget(
            Paragraph::new(criteria.level.to_string())
                .block(Block::default().borders(Borders::ALL).title("Level (l)")),
            chunks[1],
        );
        f.render_widget(
            Paragraph::new(criteria.script.to_string())
                .block(Block::default().borders(Borders::ALL).title("Script (s)")),
            chunks[2],
        );
    }

    fn hints(&self, ctx: &AppContext) -> Line<'static> {
        if let Some(id) = &self.pending_delete {
            return Line::from(Span::styled(
                delete_prompt(&ctx.catalog, id),
                Style::default().fg(colors::ERROR),
            ));
        }

        let mut hints = String::from("enter open · p play · R reset filters");
        if ctx.catalog.is_admin() {
            hints.push_str(" · a add · e edit · d delete · x export · A lock");
        } else {
            hints.push_str(" · A admin");
        }
        Line::from(Span::styled(hints, Style::default().fg(colors::NEUTRAL)))
    }
}

#[async_trait]
impl View for LessonList {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_filters(f, chunks[0], ctx);
        f.render_widget(Paragraph::new(self.hints(ctx)), chunks[2]);

        let lessons = ctx.catalog.visible();
        if lessons.is_empty() {
            let message = if ctx.catalog.lessons().is_empty() {
                "No lessons yet"
            } else {
                "No lessons match the current filters"
            };
            f.render_widget(
                Paragraph::new(message).style(Style::default().fg(colors::NEUTRAL)),
                chunks[1],
            );
            return;
        }

        self.clamp_selection(lessons.len());

        let player = ctx.catalog.player();
        let loaded_id = player.lesson().map(|l| l.id.as_str());
        let is_playing = player.is_playing();

        let items: Vec<ListItem> = lessons
            .iter()
            .map(|lesson| {
                let is_current = loaded_id == Some(lesson.id.as_str());
                let prefix = if is_current {
                    format!("{} ", get_active_lesson_icon(is_playing))
                } else if lesson.has_audio() {
                    "♪ ".to_string()
                } else {
                    "  ".to_string()
                };

                let mut spans = vec![
                    Span::raw(prefix),
                    Span::raw(fit(&lesson.title, TITLE_WIDTH)),
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<12} {:<6}", lesson.level.as_str(), lesson.script.as_str()),
                        Style::default().fg(colors::SECONDARY),
                    ),
                ];
                if let Some(topic) = &lesson.topic {
                    spans.push(Span::styled(
                        format!("  {topic}"),
                        Style::default().fg(colors::NEUTRAL),
                    ));
                }

                let mut item = ListItem::new(Line::from(spans));
                if is_current {
                    item = item.style(
                        Style::default()
                            .fg(colors::SECONDARY)
                            .add_modifier(Modifier::BOLD),
                    );
                }
                item
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        f.render_stateful_widget(list, chunks[1], &mut self.list_state);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        if self.is_editing {
            return match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => None,
                KeyCode::Enter | KeyCode::Esc => {
                    self.is_editing = false;
                    Some(Action::None)
                }
                KeyCode::Char(c) => {
                    self.query.push(c);
                    let _ = ctx.event_tx.send(Event::SetQuery(self.query.clone()));
                    Some(Action::None)
                }
                KeyCode::Backspace => {
                    self.query.pop();
                    let _ = ctx.event_tx.send(Event::SetQuery(self.query.clone()));
                    Some(Action::None)
                }
                _ => Some(Action::None),
            };
        }

        if let Some(id) = self.pending_delete.take() {
            if key.code == KeyCode::Char('y') {
                let _ = ctx.event_tx.send(Event::DeleteLesson(id));
            }
            return Some(Action::None);
        }

        let len = ctx.catalog.visible().len();
        let is_admin = ctx.catalog.is_admin();
        match key.code {
            KeyCode::Char('/') => {
                self.is_editing = true;
                Some(Action::None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if len > 0 {
                    let i = self
                        .list_state
                        .selected()
                        .map_or(0, |i| if i >= len - 1 { i } else { i + 1 });
                    self.list_state.select(Some(i));
                }
                Some(Action::None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if len > 0 {
                    let i = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
                    self.list_state.select(Some(i));
                }
                Some(Action::None)
            }
            KeyCode::Char('g') => {
                if len > 0 {
                    self.list_state.select(Some(0));
                }
                Some(Action::None)
            }
            KeyCode::Char('G') => {
                if len > 0 {
                    self.list_state.select(Some(len - 1));
                }
                Some(Action::None)
            }
            KeyCode::Char('l') => {
                let _ = ctx
                    .event_tx
                    .send(Event::SetLevel(ctx.catalog.criteria().level.cycle()));
                Some(Action::None)
            }
            KeyCode::Char('s') => {
                let _ = ctx
                    .event_tx
                    .send(Event::SetScript(ctx.catalog.criteria().script.cycle()));
                Some(Action::None)
            }
            KeyCode::Char('R') => {
                self.query.clear();
                let _ = ctx.event_tx.send(Event::ResetFilters);
                Some(Action::None)
            }
            KeyCode::Enter => {
                if let Some(id) = self.selected_id(ctx) {
                    let _ = ctx.event_tx.send(Event::OpenLesson(id));
                }
                Some(Action::None)
            }
            KeyCode::Char('p') => {
                if let Some(id) = self.selected_id(ctx) {
                    let _ = ctx.event_tx.send(Event::Play(id));
                }
                Some(Action::None)
            }
            KeyCode::Char('a') if is_admin => {
                let _ = ctx.event_tx.send(Event::EditLesson(None));
                Some(Action::None)
            }
            KeyCode::Char('e') if is_admin => {
                if let Some(id) = self.selected_id(ctx) {
                    let _ = ctx.event_tx.send(Event::EditLesson(Some(id)));
                }
                Some(Action::None)
            }
            KeyCode::Char('d') if is_admin => {
                self.pending_delete = self.selected_id(ctx);
                Some(Action::None)
            }
            KeyCode::Char('x') if is_admin => {
                let _ = ctx.event_tx.send(Event::Export);
                Some(Action::None)
            }
            _ => None,
        }
    }

    async fn on_event(&mut self, event: &Event, ctx: &AppContext) {
        match event {
            Event::Store(_) | Event::SetQuery(_) | Event::SetLevel(_) | Event::SetScript(_) => {
                self.clamp_selection(ctx.catalog.visible().len());
            }
            Event::ResetFilters => {
                self.query.clear();
                self.list_state.select(Some(0));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        audio::{controller::Player, traits::UnavailableBackend},
        nav::MemoryNavigator,
        store::{LessonStore, storage::MemoryStorage},
    };

    #[test]
    fn delete_prompt_names_the_lesson_title() {
        let catalog = Catalog::new(
            LessonStore::open(Box::new(MemoryStorage::new())),
            Player::new(Box::new(UnavailableBackend)),
            Box::new(MemoryNavigator::new("/")),
        );

        let prompt = delete_prompt(&catalog, "numbers-1-10");
        assert!(prompt.starts_with("Delete 'Numbers 1-10'?"));
        assert!(delete_prompt(&catalog, "gone").starts_with("Delete 'gone'?"));
    }
}
