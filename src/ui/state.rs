#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub ui: UiState,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub status: Option<StatusMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl UiState {
    pub fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }
}
