pub mod admin;
pub mod filter;
pub mod lesson;
pub mod seed;
pub mod storage;

use std::collections::HashSet;

use flume::{Receiver, Sender};
use tracing::{debug, info, warn};

use self::{lesson::Lesson, seed::seed_lessons, storage::KeyValueStorage};

pub const LESSONS_KEY: &str = "lessons";
pub const EXPORT_FILE_NAME: &str = "lessons.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Inserted(String),
    Updated(String),
    Removed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub file_name: String,
    pub contents: String,
}

/// Persisted collection, or the seed set when missing or malformed.
pub fn load(storage: &dyn KeyValueStorage) -> Vec<Lesson> {
    let raw = match storage.get(LESSONS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("lessons_missing_using_seed");
            return seed_lessons();
        }
        Err(e) => {
            warn!(error = %e, "lessons_read_failed_using_seed");
            return seed_lessons();
        }
    };

    let items = match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(_) => {
            warn!("lessons_not_an_array_using_seed");
            return seed_lessons();
        }
        Err(e) => {
            warn!(error = %e, "lessons_unparsable_using_seed");
            return seed_lessons();
        }
    };

    let mut seen = HashSet::new();
    let mut lessons = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<Lesson>(item) {
            Ok(lesson) if seen.insert(lesson.id.clone()) => lessons.push(lesson),
            Ok(lesson) => warn!(id = lesson.id.as_str(), "lessons_duplicate_id_skipped"),
            Err(e) => warn!(error = %e, "lessons_invalid_record_skipped"),
        }
    }
    lessons
}

/// Best-effort write of the full collection. Failures are logged only.
pub fn save(storage: &mut dyn KeyValueStorage, lessons: &[Lesson]) {
    let raw = match serde_json::to_string(lessons) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "lessons_serialize_failed");
            return;
        }
    };

    if let Err(e) = storage.set(LESSONS_KEY, &raw) {
        warn!(error = %e, count = lessons.len(), "lessons_save_dropped");
    }
}

/// Authoritative ordered lesson collection mirrored to storage.
pub struct LessonStore {
    storage: Box<dyn KeyValueStorage>,
    lessons: Vec<Lesson>,
    subscribers: Vec<Sender<StoreEvent>>,
}

impl LessonStore {
    pub fn open(storage: Box<dyn KeyValueStorage>) -> Self {
        let lessons = load(storage.as_ref());
        info!(count = lessons.len(), "lesson_store_opened");

        Self {
            storage,
            lessons,
            subscribers: Vec::new(),
        }
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn get(&self, id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn storage(&self) -> &dyn KeyValueStorage {
        self.storage.as_ref()
    }

    pub fn storage_mut(&mut self) -> &mut dyn KeyValueStorage {
        self.storage.as_mut()
    }

    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = flume::unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn save(&mut self) {
        save(self.storage.as_mut(), &self.lessons);
    }

    pub fn upsert(&mut self, lesson: Lesson) -> UpsertOutcome {
        let lesson = lesson.normalized();
        let id = lesson.id.clone();
        let outcome = match self.lessons.iter().position(|l| l.id == lesson.id) {
            Some(index) => {
                self.lessons[index] = lesson;
                UpsertOutcome::Replaced(index)
            }
            None => {
                self.lessons.insert(0, lesson);
                UpsertOutcome::Inserted
            }
        };
        self.save();

        debug!(id = id.as_str(), ?outcome, "lesson_upserted");
        self.notify(match outcome {
            UpsertOutcome::Inserted => StoreEvent::Inserted(id),
            UpsertOutcome::Replaced(_) => StoreEvent::Updated(id),
        });
        outcome
    }

    pub fn remove(&mut self, id: &str) -> Option<Lesson> {
        let index = self.lessons.iter().position(|l| l.id == id)?;
        let removed = self.lessons.remove(index);
        self.save();

        debug!(id, "lesson_removed");
        self.notify(StoreEvent::Removed(removed.id.clone()));
        Some(removed)
    }

    pub fn export_snapshot(&self) -> Result<Snapshot, serde_json::Error> {
        Ok(Snapshot {
            file_name: EXPORT_FILE_NAME.to_string(),
            contents: serde_json::to_string_pretty(&self.lessons)?,
        })
    }

    fn notify(&mut self, event: StoreEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::{
        lesson::{Level, Script},
        storage::{MemoryStorage, StorageError},
        *,
    };

    fn lesson(id: &str) -> Lesson {
        Lesson::new(id, id.to_uppercase(), Script::Khmer, Level::Beginner)
    }

    fn ids(store: &LessonStore) -> Vec<&str> {
        store.lessons().iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn round_trip_preserves_order_and_fields() {
        let mut storage = MemoryStorage::new();
        let mut full = lesson("b");
        full.topic = Some("Topic".into());
        full.description = Some("Description".into());
        full.transcript = Some("Transcript".into());
        full.vocabulary = Some("Vocabulary".into());
        full.audio_url = Some("blob:lessonbox/abc".into());
        let lessons = vec![lesson("a"), full, lesson("c")];

        save(&mut storage, &lessons);
        assert_eq!(load(&storage), lessons);
    }

    #[test]
    fn whitespace_field_survives_round_trip() {
        let mut storage = MemoryStorage::new();
        let mut spaced = lesson("a");
        spaced.topic = Some("   ".into());
        let lessons = vec![spaced];

        save(&mut storage, &lessons);
        assert_eq!(load(&storage), lessons);
    }

    #[test]
    fn upsert_stores_blank_fields_as_absent() {
        let mut store = LessonStore::open(Box::new(MemoryStorage::new()));
        let mut blank = lesson("blank");
        blank.topic = Some("   ".into());
        blank.audio_url = Some(String::new());
        store.upsert(blank);

        let stored = store.get("blank").unwrap();
        assert_eq!(stored.topic, None);
        assert_eq!(stored.audio_url, None);
        assert_eq!(load(store.storage()), store.lessons());
    }

    #[test]
    fn empty_collection_is_not_replaced_by_seed() {
        let mut storage = MemoryStorage::new();
        save(&mut storage, &[]);
        assert!(load(&storage).is_empty());
    }

    #[test]
    fn malformed_content_falls_back_to_seed() {
        for raw in ["{\"id\":\"x\"}", "not json", "42", "null"] {
            let mut storage = MemoryStorage::new();
            storage.set(LESSONS_KEY, raw).unwrap();
            assert_eq!(load(&storage), seed_lessons(), "content: {raw}");
        }
        assert_eq!(load(&MemoryStorage::new()), seed_lessons());
    }

    #[test]
    fn invalid_records_and_duplicates_are_dropped() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                LESSONS_KEY,
                r#"[
                    {"id":"a","title":"A","script":"Khmer","level":"Beginner"},
                    {"id":"b","title":"B","script":"Runic","level":"Beginner"},
                    {"id":"a","title":"A again","script":"Latin","level":"Advanced"}
                ]"#,
            )
            .unwrap();

        let lessons = load(&storage);
        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].title, "A");
    }

    #[test]
    fn upsert_prepends_new_and_replaces_in_place() {
        let mut store = LessonStore::open(Box::new(MemoryStorage::new()));
        for id in ["a", "b", "c"] {
            assert_eq!(store.upsert(lesson(id)), UpsertOutcome::Inserted);
        }
        let seeded = seed_lessons().len();
        assert_eq!(&ids(&store)[..3], ["c", "b", "a"]);

        let mut edited = lesson("b");
        edited.title = "Edited".into();
        assert_eq!(store.upsert(edited), UpsertOutcome::Replaced(1));
        assert_eq!(store.get("b").unwrap().title, "Edited");
        assert_eq!(store.len(), seeded + 3);

        let persisted = load(store.storage());
        assert_eq!(persisted, store.lessons());
    }

    #[test]
    fn upsert_never_duplicates_ids() {
        let mut store = LessonStore::open(Box::new(MemoryStorage::new()));
        for id in ["x", "y", "x", "numbers-1-10", "y", "x"] {
            store.upsert(lesson(id));
        }
        let mut seen = HashSet::new();
        assert!(store.lessons().iter().all(|l| seen.insert(l.id.clone())));
    }

    #[test]
    fn remove_missing_id_is_a_no_op() {
        let mut store = LessonStore::open(Box::new(MemoryStorage::new()));
        let rx = store.subscribe();
        let before = store.lessons().to_vec();

        assert_eq!(store.remove("nope"), None);
        assert_eq!(store.lessons(), before.as_slice());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn mutations_notify_subscribers() {
        let mut store = LessonStore::open(Box::new(MemoryStorage::new()));
        let rx = store.subscribe();
        let dropped = store.subscribe();
        drop(dropped);

        store.upsert(lesson("a"));
        store.upsert(lesson("a"));
        store.remove("a");

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            [
                StoreEvent::Inserted("a".into()),
                StoreEvent::Updated("a".into()),
                StoreEvent::Removed("a".into()),
            ]
        );
        assert_eq!(store.subscribers.len(), 1);
    }

    #[test]
    fn failed_save_keeps_memory_state() {
        let mut store = LessonStore::open(Box::new(MemoryStorage::with_quota(8)));
        store.upsert(lesson("a"));

        assert_eq!(store.get("a").map(|l| l.id.as_str()), Some("a"));
        assert!(matches!(
            store.storage_mut().set(LESSONS_KEY, "[1,2,3,4,5,6,7,8]"),
            Err(StorageError::QuotaExceeded { .. })
        ));
        assert_eq!(load(store.storage()), seed_lessons());
    }

    #[test]
    fn export_is_pretty_json_of_collection() {
        let mut store = LessonStore::open(Box::new(MemoryStorage::new()));
        store.upsert(lesson("a"));
        let snapshot = store.export_snapshot().unwrap();

        assert_eq!(snapshot.file_name, EXPORT_FILE_NAME);
        assert!(snapshot.contents.contains("\n  {"));
        let parsed: Vec<Lesson> = serde_json::from_str(&snapshot.contents).unwrap();
        assert_eq!(parsed, store.lessons());
    }
}
