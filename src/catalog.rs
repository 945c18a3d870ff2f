use flume::Receiver;
use thiserror::Error;
use tracing::info;

use crate::{
    audio::{controller::Player, state::PlaybackState},
    nav::{Navigator, Page, Route},
    store::{
        LessonStore, Snapshot, StoreEvent, UpsertOutcome,
        admin::AdminGate,
        filter::{FilterCriteria, Selector, filter_lessons},
        lesson::{Lesson, LessonDraft, LessonError, Level, Script},
    },
};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Admin access required")]
    NotAuthorized,

    #[error(transparent)]
    Validation(#[from] LessonError),

    #[error("Export failed: {0}")]
    Export(#[from] serde_json::Error),
}

/// Store, admin gate, navigation and player wired together.
pub struct Catalog {
    store: LessonStore,
    admin: AdminGate,
    player: Player,
    navigator: Box<dyn Navigator>,
    criteria: FilterCriteria,
    visible: Vec<Lesson>,
}

impl Catalog {
    pub fn new(store: LessonStore, player: Player, navigator: Box<dyn Navigator>) -> Self {
        let admin = AdminGate::restore(store.storage());
        let mut catalog = Self {
            store,
            admin,
            player,
            navigator,
            criteria: FilterCriteria::default(),
            visible: Vec::new(),
        };
        catalog.refresh();
        catalog
    }

    pub fn lessons(&self) -> &[Lesson] {
        self.store.lessons()
    }

    pub fn lesson(&self, id: &str) -> Option<&Lesson> {
        self.store.get(id)
    }

    pub fn visible(&self) -> &[Lesson] {
        &self.visible
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
        self.refresh();
    }

    pub fn set_level(&mut self, level: Selector<Level>) {
        self.criteria.level = level;
        self.refresh();
    }

    pub fn set_script(&mut self, script: Selector<Script>) {
        self.criteria.script = script;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.visible = filter_lessons(self.store.lessons(), &self.criteria)
            .into_iter()
            .cloned()
            .collect();
    }

    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        self.store.subscribe()
    }

    // Admin

    pub fn is_admin(&self) -> bool {
        self.admin.is_unlocked()
    }

    pub fn unlock(&mut self, secret: &str) -> bool {
        self.admin.unlock(secret, self.store.storage_mut())
    }

    pub fn lock(&mut self) {
        self.admin.lock(self.store.storage_mut());
    }

    fn require_admin(&self) -> Result<(), CatalogError> {
        if self.admin.is_unlocked() {
            Ok(())
        } else {
            Err(CatalogError::NotAuthorized)
        }
    }

    pub fn draft_for(&self, id: Option<&str>) -> Option<LessonDraft> {
        match id {
            Some(id) => self.store.get(id).map(LessonDraft::from),
            None => Some(LessonDraft::default()),
        }
    }

    pub fn save_draft(&mut self, draft: LessonDraft) -> Result<Lesson, CatalogError> {
        self.require_admin()?;
        let lesson = draft.into_lesson()?;
        self.upsert(lesson.clone())?;
        Ok(lesson)
    }

    pub fn upsert(&mut self, lesson: Lesson) -> Result<UpsertOutcome, CatalogError> {
        self.require_admin()?;
        if lesson.title.trim().is_empty() {
            return Err(LessonError::MissingTitle.into());
        }

        let lesson = lesson.normalized();
        self.player.on_lesson_updated(&lesson);
        let id = lesson.id.clone();
        let outcome = self.store.upsert(lesson);
        self.refresh();
        info!(id = id.as_str(), ?outcome, "lesson_saved");
        Ok(outcome)
    }

    pub fn remove(&mut self, id: &str) -> Result<Option<Lesson>, CatalogError> {
        self.require_admin()?;
        let removed = self.store.remove(id);
        if removed.is_some() {
            self.player.on_lesson_removed(id);
            self.refresh();
            info!(id, "lesson_deleted");
        }
        Ok(removed)
    }

    pub fn export_snapshot(&self) -> Result<Snapshot, CatalogError> {
        self.require_admin()?;
        Ok(self.store.export_snapshot()?)
    }

    // Navigation

    pub fn subscribe_path(&mut self) -> Receiver<String> {
        self.navigator.subscribe()
    }

    pub fn current_path(&self) -> String {
        self.navigator.current_path()
    }

    pub fn route(&self) -> Route {
        self.navigator.route()
    }

    pub fn page(&self) -> Page<'_> {
        Page::resolve(&self.route(), self.store.lessons(), &self.visible)
    }

    pub fn navigate(&mut self, path: &str) {
        self.navigator.set_path(path);
    }

    pub fn open(&mut self, id: &str) {
        self.navigator.set_path(&Route::Detail(id.to_string()).to_path());
    }

    pub fn back(&mut self) {
        self.navigator.set_path(&Route::List.to_path());
    }

    // Playback

    pub fn player(&self) -> &PlaybackState {
        self.player.state()
    }

    pub fn play(&mut self, id: &str) {
        if let Some(lesson) = self.store.get(id) {
            self.player.play(lesson);
        }
    }

    pub fn toggle_playback(&mut self) {
        self.player.toggle();
    }

    pub fn close_player(&mut self) {
        self.player.close();
    }

    pub fn poll_player(&mut self) -> bool {
        self.player.poll()
    }
}
