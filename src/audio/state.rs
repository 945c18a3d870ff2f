use crate::store::lesson::Lesson;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing(Lesson),
    Paused(Lesson),
}

impl PlaybackState {
    pub fn lesson(&self) -> Option<&Lesson> {
        match self {
            PlaybackState::Playing(lesson) | PlaybackState::Paused(lesson) => Some(lesson),
            PlaybackState::Stopped => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing(_))
    }
}
