use crate::store::{
    StoreEvent,
    filter::Selector,
    lesson::{LessonDraft, Level, Script},
};

#[derive(Debug, Clone)]
pub enum Event {
    // Events
    Store(StoreEvent),
    PathChanged(String),
    PlaybackEnded,
    SaveRejected(String),
    LoginRejected,

    // Commands
    SetQuery(String),
    SetLevel(Selector<Level>),
    SetScript(Selector<Script>),
    ResetFilters,
    OpenLesson(String),
    Back,
    Play(String),
    TogglePlayback,
    ClosePlayer,
    EditLesson(Option<String>),
    SaveLesson(LessonDraft),
    DeleteLesson(String),
    Export,
    OpenLogin,
    Login(String),
    Logout,
}
