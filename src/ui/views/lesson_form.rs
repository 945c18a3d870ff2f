use std::path::Path;

use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    event::events::Event,
    store::lesson::{LessonDraft, Level, Script},
    ui::{
        context::AppContext,
        state::AppState,
        traits::{Action, View},
    },
    util::colors,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Script,
    Level,
    Topic,
    Description,
    Transcript,
    Vocabulary,
    Audio,
}

impl Field {
    const ALL: [Field; 8] = [
        Field::Title,
        Field::Script,
        Field::Level,
        Field::Topic,
        Field::Description,
        Field::Transcript,
        Field::Vocabulary,
        Field::Audio,
    ];

    fn label(self) -> &'static str {
        match self {
            Field::Title => "Title *",
            Field::Script => "Script",
            Field::Level => "Level",
            Field::Topic => "Topic",
            Field::Description => "Description",
            Field::Transcript => "Transcript",
            Field::Vocabulary => "Vocabulary",
            Field::Audio => "Audio (url, path, Ctrl+O to attach)",
        }
    }

    fn is_multiline(self) -> bool {
        matches!(
            self,
            Field::Description | Field::Transcript | Field::Vocabulary
        )
    }

    fn is_choice(self) -> bool {
        matches!(self, Field::Script | Field::Level)
    }

    fn height(self) -> u16 {
        if self.is_multiline() { 5 } else { 3 }
    }

    fn index(self) -> usize {
        Field::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Field {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    fn prev(self) -> Field {
        Field::ALL[(self.index() + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

fn step<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let i = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (i + 1) % all.len()
    } else {
        (i + all.len() - 1) % all.len()
    };
    all[next]
}

pub struct LessonForm {
    draft: LessonDraft,
    focus: Field,
    error: Option<String>,
}

impl LessonForm {
    pub fn new(draft: LessonDraft) -> Self {
        Self {
            draft,
            focus: Field::Title,
            error: None,
        }
    }

    pub fn draft(&self) -> &LessonDraft {
        &self.draft
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Title => Some(&mut self.draft.title),
            Field::Topic => Some(&mut self.draft.topic),
            Field::Description => Some(&mut self.draft.description),
            Field::Transcript => Some(&mut self.draft.transcript),
            Field::Vocabulary => Some(&mut self.draft.vocabulary),
            Field::Audio => Some(&mut self.draft.audio_url),
            Field::Script | Field::Level => None,
        }
    }

    fn text(&self, field: Field) -> String {
        match field {
            Field::Title => self.draft.title.clone(),
            Field::Script => format!("◂ {} ▸", self.draft.script),
            Field::Level => format!("◂ {} ▸", self.draft.level),
            Field::Topic => self.draft.topic.clone(),
            Field::Description => self.draft.description.clone(),
            Field::Transcript => self.draft.transcript.clone(),
            Field::Vocabulary => self.draft.vocabulary.clone(),
            Field::Audio => self.draft.audio_url.clone(),
        }
    }

    fn cycle_choice(&mut self, forward: bool) {
        match self.focus {
            Field::Script => self.draft.script = step(&Script::ALL, self.draft.script, forward),
            Field::Level => self.draft.level = step(&Level::ALL, self.draft.level, forward),
            _ => {}
        }
    }

    /// Replaces a local file path in the audio field with a `blob:` reference.
    fn attach(&mut self, ctx: &AppContext) {
        let path = self.draft.audio_url.trim().to_string();
        if path.is_empty() {
            self.error = Some("Type a file path into the audio field first".into());
        } else if !Path::new(&path).is_file() {
            self.error = Some(format!("No such file: {path}"));
        } else {
            self.draft.audio_url = ctx.blobs.register(&path);
            self.error = None;
        }
    }

    fn edit(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Left if self.focus.is_choice() => self.cycle_choice(false),
            KeyCode::Right | KeyCode::Char(' ') if self.focus.is_choice() => {
                self.cycle_choice(true)
            }
            KeyCode::Enter if self.focus.is_multiline() => {
                if let Some(text) = self.text_mut() {
                    text.push('\n');
                }
            }
            KeyCode::Enter => self.focus = self.focus.next(),
            KeyCode::Backspace => {
                if let Some(text) = self.text_mut() {
                    text.pop();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(text) = self.text_mut() {
                    text.push(c);
                }
            }
            _ => return false,
        }
        true
    }
}

#[async_trait]
impl View for LessonForm {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, _ctx: &AppContext) {
        let title = if self.draft.id.is_some() {
            "Edit lesson"
        } else {
            "New lesson"
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(colors::PRIMARY));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut constraints: Vec<Constraint> = Field::ALL
            .iter()
            .map(|field| Constraint::Length(field.height()))
            .collect();
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in Field::ALL.iter().enumerate() {
            let focused = *field == self.focus;
            let border = if focused {
                Style::default().fg(colors::PRIMARY)
            } else {
                Style::default().fg(colors::NEUTRAL)
            };
            let mut text = self.text(*field);
            if focused && !field.is_choice() {
                text.push('▏');
            }
            let lines: Vec<Line> = text.lines().map(|l| Line::from(l.to_string())).collect();
            let paragraph = Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(field.label())
                        .border_style(border),
                );
            f.render_widget(paragraph, chunks[i]);
        }

        let footer = match &self.error {
            Some(error) => Span::styled(
                error.as_str(),
                Style::default()
                    .fg(colors::ERROR)
                    .add_modifier(Modifier::BOLD),
            ),
            None => Span::styled(
                "tab next field · ←/→ change choice · ctrl+s save · esc cancel",
                Style::default().fg(colors::NEUTRAL),
            ),
        };
        f.render_widget(Paragraph::new(Line::from(footer)), chunks[chunks.len() - 1]);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Some(Action::CloseOverlay),
            KeyCode::Char('c') if ctrl => return None,
            KeyCode::Char('s') if ctrl => {
                if self.draft.title.trim().is_empty() {
                    self.error = Some("Title is required".into());
                    self.focus = Field::Title;
                } else {
                    let _ = ctx.event_tx.send(Event::SaveLesson(self.draft.clone()));
                }
                return Some(Action::None);
            }
            KeyCode::Char('o') if ctrl => {
                self.attach(ctx);
                return Some(Action::None);
            }
            _ => {}
        }

        self.edit(key);
        Some(Action::None)
    }

    async fn on_event(&mut self, event: &Event, _ctx: &AppContext) {
        if let Event::SaveRejected(reason) = event {
            self.error = Some(reason.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut LessonForm, text: &str) {
        for c in text.chars() {
            form.edit(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_fills_focused_field() {
        let mut form = LessonForm::new(LessonDraft::default());
        type_str(&mut form, "Colours");
        form.edit(key(KeyCode::Backspace));

        assert_eq!(form.draft().title, "Colour");
        assert!(form.draft().topic.is_empty());
    }

    #[test]
    fn choice_fields_cycle_instead_of_typing() {
        let mut form = LessonForm::new(LessonDraft::default());
        form.edit(key(KeyCode::Tab));
        form.edit(key(KeyCode::Right));
        assert_eq!(form.draft().script, Script::Latin);
        form.edit(key(KeyCode::Right));
        assert_eq!(form.draft().script, Script::Khmer);

        form.edit(key(KeyCode::Tab));
        form.edit(key(KeyCode::Left));
        assert_eq!(form.draft().level, Level::Advanced);

        type_str(&mut form, "x");
        assert!(form.draft().title.is_empty());
    }

    #[test]
    fn enter_breaks_lines_only_in_long_fields() {
        let mut form = LessonForm::new(LessonDraft::default());
        form.edit(key(KeyCode::Enter));
        assert_eq!(form.focus, Field::Script);

        form.focus = Field::Transcript;
        type_str(&mut form, "a");
        form.edit(key(KeyCode::Enter));
        type_str(&mut form, "b");
        assert_eq!(form.draft().transcript, "a\nb");
    }

    #[test]
    fn back_tab_wraps_around() {
        let mut form = LessonForm::new(LessonDraft::default());
        form.edit(key(KeyCode::BackTab));
        assert_eq!(form.focus, Field::Audio);
    }
}
