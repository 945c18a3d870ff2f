use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use lessonbox::{
    audio::{
        controller::Player, error::AudioError, state::PlaybackState, traits::PlaybackBackend,
        traits::UnavailableBackend,
    },
    catalog::{Catalog, CatalogError},
    nav::{MemoryNavigator, Page},
    store::{
        LessonStore, StoreEvent,
        admin::ADMIN_SECRET,
        filter::Selector,
        lesson::{Lesson, LessonDraft, Level, Script},
        storage::FileStorage,
    },
};

#[derive(Clone, Default)]
struct ScriptedBackend {
    finished: Arc<AtomicBool>,
}

impl PlaybackBackend for ScriptedBackend {
    fn play(&mut self, _url: &str) -> Result<(), AudioError> {
        self.finished.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn pause(&mut self) {}

    fn resume(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop(&mut self) {}

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

fn open(dir: &tempfile::TempDir, backend: Box<dyn PlaybackBackend>) -> Catalog {
    let storage = FileStorage::open(dir.path().join("storage.json"));
    Catalog::new(
        LessonStore::open(Box::new(storage)),
        Player::new(backend),
        Box::new(MemoryNavigator::new("/")),
    )
}

#[test]
fn first_launch_shows_seed_lessons() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = open(&dir, Box::new(UnavailableBackend));

    assert!(!catalog.lessons().is_empty());
    assert_eq!(catalog.visible().len(), catalog.lessons().len());
    assert!(!catalog.is_admin());
    assert_eq!(catalog.player(), &PlaybackState::Stopped);
}

#[test]
fn saved_lessons_and_admin_flag_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    let id = {
        let mut catalog = open(&dir, Box::new(UnavailableBackend));
        assert!(catalog.unlock(ADMIN_SECRET));

        let draft = LessonDraft {
            title: "  Colours  ".into(),
            script: Script::Latin,
            level: Level::Intermediate,
            transcript: "krahom means red".into(),
            ..LessonDraft::default()
        };
        let saved = catalog.save_draft(draft).unwrap();
        assert_eq!(saved.title, "Colours");
        assert_eq!(saved.topic, None);
        catalog.remove("numbers-1-10").unwrap();
        saved.id
    };

    let catalog = open(&dir, Box::new(UnavailableBackend));
    assert!(catalog.is_admin());
    assert_eq!(catalog.lessons()[0].id, id);
    assert!(catalog.lesson("numbers-1-10").is_none());
}

#[test]
fn editing_keeps_position_and_notifies() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = open(&dir, Box::new(UnavailableBackend));
    let events = catalog.subscribe();
    catalog.unlock(ADMIN_SECRET);

    let index = catalog
        .lessons()
        .iter()
        .position(|l| l.id == "market-phrases")
        .unwrap();
    let mut draft = LessonDraft::from(catalog.lesson("market-phrases").unwrap());
    draft.title = "At the market".into();
    catalog.save_draft(draft).unwrap();

    assert_eq!(catalog.lessons()[index].title, "At the market");
    assert_eq!(
        events.try_recv().unwrap(),
        StoreEvent::Updated("market-phrases".into())
    );
}

#[test]
fn filters_combine_with_and() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = open(&dir, Box::new(UnavailableBackend));

    catalog.set_level(Selector::Only(Level::Beginner));
    catalog.set_script(Selector::Only(Script::Khmer));
    assert!(!catalog.visible().is_empty());
    assert!(
        catalog
            .visible()
            .iter()
            .all(|l| l.level == Level::Beginner && l.script == Script::Khmer)
    );

    catalog.set_script(Selector::Only(Script::Latin));
    assert!(catalog.visible().is_empty());
}

#[test]
fn guest_cannot_mutate() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = open(&dir, Box::new(UnavailableBackend));

    assert!(!catalog.unlock("wrong"));
    let result = catalog.upsert(Lesson::new("x", "X", Script::Khmer, Level::Beginner));
    assert!(matches!(result, Err(CatalogError::NotAuthorized)));
    assert!(catalog.lesson("x").is_none());
}

#[test]
fn export_is_pretty_json_of_the_collection() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = open(&dir, Box::new(UnavailableBackend));
    catalog.unlock(ADMIN_SECRET);

    let snapshot = catalog.export_snapshot().unwrap();
    assert_eq!(snapshot.file_name, "lessons.json");
    assert!(snapshot.contents.contains('\n'));

    let parsed: Vec<Lesson> = serde_json::from_str(&snapshot.contents).unwrap();
    assert_eq!(parsed, catalog.lessons());
}

#[test]
fn playback_ends_paused_and_without_output_stays_stopped() {
    let dir = tempfile::tempdir().unwrap();
    let backend = ScriptedBackend::default();
    let mut catalog = open(&dir, Box::new(backend.clone()));
    catalog.unlock(ADMIN_SECRET);
    let mut lesson = Lesson::new("audio", "Audio", Script::Khmer, Level::Beginner);
    lesson.audio_url = Some("https://example.com/a.mp3".into());
    catalog.upsert(lesson.clone()).unwrap();

    catalog.play("audio");
    assert_eq!(catalog.player(), &PlaybackState::Playing(lesson.clone()));

    backend.finished.store(true, Ordering::SeqCst);
    assert!(catalog.poll_player());
    assert_eq!(catalog.player(), &PlaybackState::Paused(lesson.clone()));

    let mut silent = open(&dir, Box::new(UnavailableBackend));
    silent.play("audio");
    assert!(!silent.player().is_playing());
    assert_eq!(silent.player().lesson().map(|l| l.id.as_str()), Some("audio"));
}

#[test]
fn unknown_detail_route_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = open(&dir, Box::new(UnavailableBackend));
    let paths = catalog.subscribe_path();

    catalog.navigate("#/lesson/nope");
    assert_eq!(paths.try_recv().unwrap(), "#/lesson/nope");
    assert_eq!(catalog.page(), Page::NotFound("nope".into()));

    catalog.set_query("zzz");
    catalog.open("greetings-basic");
    assert!(matches!(catalog.page(), Page::Detail(l) if l.id == "greetings-basic"));
}
