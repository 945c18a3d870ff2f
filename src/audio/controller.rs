use tracing::{debug, info, warn};

use crate::{
    audio::{error::AudioError, state::PlaybackState, traits::PlaybackBackend},
    store::lesson::Lesson,
};

/// Single loaded lesson plus playing flag.
pub struct Player {
    backend: Box<dyn PlaybackBackend>,
    state: PlaybackState,
}

impl Player {
    pub fn new(backend: Box<dyn PlaybackBackend>) -> Self {
        Self {
            backend,
            state: PlaybackState::Stopped,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn current_lesson(&self) -> Option<&Lesson> {
        self.state.lesson()
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    /// Loads and starts `lesson`, or toggles it when it is already loaded.
    pub fn play(&mut self, lesson: &Lesson) {
        let Some(url) = lesson.audio_url.as_deref() else {
            debug!(id = lesson.id.as_str(), "play_ignored_no_audio");
            return;
        };

        if self.current_lesson().is_some_and(|l| l.id == lesson.id) {
            self.toggle();
            return;
        }

        self.backend.stop();
        self.state = PlaybackState::Paused(lesson.clone());

        match self.backend.play(url) {
            Ok(()) => {
                info!(id = lesson.id.as_str(), "playback_started");
                self.state = PlaybackState::Playing(lesson.clone());
            }
            Err(e) => warn!(id = lesson.id.as_str(), error = %e, "playback_rejected"),
        }
    }

    pub fn toggle(&mut self) {
        self.state = match std::mem::take(&mut self.state) {
            PlaybackState::Playing(lesson) => {
                self.backend.pause();
                PlaybackState::Paused(lesson)
            }
            PlaybackState::Paused(lesson) => match self.resume(&lesson) {
                Ok(()) => PlaybackState::Playing(lesson),
                Err(e) => {
                    warn!(id = lesson.id.as_str(), error = %e, "resume_rejected");
                    PlaybackState::Paused(lesson)
                }
            },
            PlaybackState::Stopped => PlaybackState::Stopped,
        };
    }

    fn resume(&mut self, lesson: &Lesson) -> Result<(), AudioError> {
        if !self.backend.is_finished() {
            return self.backend.resume();
        }
        match lesson.audio_url.as_deref() {
            Some(url) => self.backend.play(url),
            None => Err(AudioError::SourceNotFound(lesson.id.clone())),
        }
    }

    /// Natural end of the source: paused, lesson stays loaded.
    pub fn on_ended(&mut self) {
        if let PlaybackState::Playing(lesson) = std::mem::take(&mut self.state) {
            debug!(id = lesson.id.as_str(), "playback_ended");
            self.state = PlaybackState::Paused(lesson);
        }
    }

    pub fn close(&mut self) {
        self.backend.stop();
        self.state = PlaybackState::Stopped;
    }

    pub fn poll(&mut self) -> bool {
        if self.is_playing() && self.backend.is_finished() {
            self.on_ended();
            return true;
        }
        false
    }

    pub fn on_lesson_removed(&mut self, id: &str) -> bool {
        if self.current_lesson().is_some_and(|l| l.id == id) {
            self.close();
            return true;
        }
        false
    }

    pub fn on_lesson_updated(&mut self, updated: &Lesson) {
        match &mut self.state {
            PlaybackState::Playing(lesson) | PlaybackState::Paused(lesson)
                if lesson.id == updated.id =>
            {
                *lesson = updated.clone();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    use super::*;
    use crate::store::lesson::{Level, Script};

    /// Scriptable backend shared with the test through atomics.
    #[derive(Clone, Default)]
    pub(crate) struct FakeBackend {
        pub reject: Arc<AtomicBool>,
        pub finished: Arc<AtomicBool>,
        pub active: Arc<AtomicBool>,
    }

    impl PlaybackBackend for FakeBackend {
        fn play(&mut self, _url: &str) -> Result<(), AudioError> {
            if self.reject.load(Ordering::SeqCst) {
                return Err(AudioError::Rejected("autoplay blocked".into()));
            }
            self.finished.store(false, Ordering::SeqCst);
            self.active.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn pause(&mut self) {
            self.active.store(false, Ordering::SeqCst);
        }

        fn resume(&mut self) -> Result<(), AudioError> {
            self.play("")
        }

        fn stop(&mut self) {
            self.active.store(false, Ordering::SeqCst);
        }

        fn is_finished(&self) -> bool {
            self.finished.load(Ordering::SeqCst)
        }
    }

    fn lesson(id: &str, audio: Option<&str>) -> Lesson {
        let mut lesson = Lesson::new(id, id, Script::Khmer, Level::Beginner);
        lesson.audio_url = audio.map(str::to_string);
        lesson
    }

    fn player() -> (Player, FakeBackend) {
        let backend = FakeBackend::default();
        (Player::new(Box::new(backend.clone())), backend)
    }

    #[test]
    fn playing_a_new_lesson_replaces_the_old_one() {
        let (mut player, _) = player();
        let a = lesson("a", Some("https://x/a.mp3"));
        let b = lesson("b", Some("https://x/b.mp3"));

        player.play(&a);
        player.play(&b);

        assert_eq!(player.state(), &PlaybackState::Playing(b));
    }

    #[test]
    fn lesson_without_audio_is_ignored() {
        let (mut player, _) = player();
        player.play(&lesson("a", None));
        assert_eq!(player.state(), &PlaybackState::Stopped);
    }

    #[test]
    fn replaying_loaded_lesson_toggles() {
        let (mut player, backend) = player();
        let a = lesson("a", Some("https://x/a.mp3"));

        player.play(&a);
        player.play(&a);
        assert_eq!(player.state(), &PlaybackState::Paused(a.clone()));
        assert!(!backend.active.load(Ordering::SeqCst));

        player.toggle();
        assert!(player.is_playing());
    }

    #[test]
    fn rejected_play_is_swallowed() {
        let (mut player, backend) = player();
        backend.reject.store(true, Ordering::SeqCst);
        let a = lesson("a", Some("blob:lessonbox/gone"));

        player.play(&a);
        assert_eq!(player.state(), &PlaybackState::Paused(a.clone()));

        player.toggle();
        assert!(!player.is_playing());
        assert_eq!(player.current_lesson(), Some(&a));
    }

    #[test]
    fn natural_end_pauses_but_keeps_lesson() {
        let (mut player, backend) = player();
        let a = lesson("a", Some("https://x/a.mp3"));
        player.play(&a);

        assert!(!player.poll());
        backend.finished.store(true, Ordering::SeqCst);
        assert!(player.poll());
        assert_eq!(player.state(), &PlaybackState::Paused(a));

        // Resuming after the end starts the source again.
        player.toggle();
        assert!(player.is_playing());
        assert!(!backend.is_finished());
    }

    #[test]
    fn close_clears_everything() {
        let (mut player, backend) = player();
        player.play(&lesson("a", Some("https://x/a.mp3")));
        player.close();

        assert_eq!(player.state(), &PlaybackState::Stopped);
        assert!(!backend.active.load(Ordering::SeqCst));
    }

    #[test]
    fn removing_loaded_lesson_closes_player() {
        let (mut player, _) = player();
        player.play(&lesson("a", Some("https://x/a.mp3")));

        assert!(!player.on_lesson_removed("b"));
        assert!(player.is_playing());
        assert!(player.on_lesson_removed("a"));
        assert_eq!(player.state(), &PlaybackState::Stopped);
    }

    #[test]
    fn edits_refresh_loaded_copy() {
        let (mut player, _) = player();
        let mut a = lesson("a", Some("https://x/a.mp3"));
        player.play(&a);

        a.title = "Renamed".into();
        player.on_lesson_updated(&a);
        assert_eq!(player.current_lesson().map(|l| l.title.as_str()), Some("Renamed"));
    }
}
