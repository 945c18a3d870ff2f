use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::traits::Action;

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<Action> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
            (KeyCode::Char('q'), _) => Some(Action::Quit),
            (KeyCode::Char(' '), _) => Some(Action::TogglePlayback),
            (KeyCode::Char('C'), _) => Some(Action::ClosePlayer),
            (KeyCode::Char('A'), _) => Some(Action::ToggleAdmin),
            (KeyCode::Esc, _) => Some(Action::Back),
            _ => None,
        }
    }
}
