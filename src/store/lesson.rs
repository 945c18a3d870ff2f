use std::{
    fmt,
    str::FromStr,
    time::{SystemTime, UNIX_EPOCH},
};

use rand::{Rng, distr::Alphanumeric};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LessonError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Unknown script: {0}")]
    UnknownScript(String),

    #[error("Unknown level: {0}")]
    UnknownLevel(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Script {
    Khmer,
    Latin,
}

impl Script {
    pub const ALL: [Script; 2] = [Script::Khmer, Script::Latin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Script::Khmer => "Khmer",
            Script::Latin => "Latin",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Script {
    type Err = LessonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Script::ALL
            .into_iter()
            .find(|script| script.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LessonError::UnknownScript(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LessonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LessonError::UnknownLevel(s.to_string()))
    }
}

/// A single catalog entry. Optional text fields are `None` when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub script: Script,
    pub level: Level,
    #[serde(
        default,
        deserialize_with = "non_empty_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub topic: Option<String>,
    #[serde(
        default,
        deserialize_with = "non_empty_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "non_empty_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub transcript: Option<String>,
    #[serde(
        default,
        deserialize_with = "non_empty_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub vocabulary: Option<String>,
    #[serde(
        default,
        deserialize_with = "non_empty_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub audio_url: Option<String>,
}

impl Lesson {
    pub fn new(id: impl Into<String>, title: impl Into<String>, script: Script, level: Level) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            script,
            level,
            topic: None,
            description: None,
            transcript: None,
            vocabulary: None,
            audio_url: None,
        }
    }

    /// Blank optional fields become `None`.
    pub fn normalized(self) -> Self {
        Self {
            topic: self.topic.and_then(non_empty),
            description: self.description.and_then(non_empty),
            transcript: self.transcript.and_then(non_empty),
            vocabulary: self.vocabulary.and_then(non_empty),
            audio_url: self.audio_url.and_then(non_empty),
            ..self
        }
    }

    pub fn has_audio(&self) -> bool {
        self.audio_url.is_some()
    }

    pub fn search_text(&self) -> String {
        [
            Some(self.title.as_str()),
            self.description.as_deref(),
            self.topic.as_deref(),
            self.transcript.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDraft {
    pub id: Option<String>,
    pub title: String,
    pub script: Script,
    pub level: Level,
    pub topic: String,
    pub description: String,
    pub transcript: String,
    pub vocabulary: String,
    pub audio_url: String,
}

impl Default for LessonDraft {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            script: Script::Khmer,
            level: Level::Beginner,
            topic: String::new(),
            description: String::new(),
            transcript: String::new(),
            vocabulary: String::new(),
            audio_url: String::new(),
        }
    }
}

impl From<&Lesson> for LessonDraft {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: Some(lesson.id.clone()),
            title: lesson.title.clone(),
            script: lesson.script,
            level: lesson.level,
            topic: lesson.topic.clone().unwrap_or_default(),
            description: lesson.description.clone().unwrap_or_default(),
            transcript: lesson.transcript.clone().unwrap_or_default(),
            vocabulary: lesson.vocabulary.clone().unwrap_or_default(),
            audio_url: lesson.audio_url.clone().unwrap_or_default(),
        }
    }
}

impl LessonDraft {
    pub fn into_lesson(self) -> Result<Lesson, LessonError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(LessonError::MissingTitle);
        }

        Ok(Lesson {
            id: self.id.unwrap_or_else(generate_id),
            title: title.to_string(),
            script: self.script,
            level: self.level,
            topic: non_empty(self.topic),
            description: non_empty(self.description),
            transcript: non_empty(self.transcript),
            vocabulary: non_empty(self.vocabulary),
            audio_url: non_empty(self.audio_url),
        })
    }
}

/// Millisecond timestamp in base 36 followed by a short random suffix.
pub fn generate_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();

    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();

    format!("{}-{}", to_base36(millis), suffix)
}

fn to_base36(mut n: u128) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

pub fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn non_empty_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_empty()))
}
