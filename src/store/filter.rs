use std::{fmt, str::FromStr};

use super::lesson::{Lesson, Level, Script};

/// Either a wildcard or one exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(expected) => expected == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str("All"),
            Selector::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr> FromStr for Selector<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Selector::All)
        } else {
            s.parse().map(Selector::Only)
        }
    }
}

impl Selector<Level> {
    /// All -> Beginner -> Intermediate -> Advanced -> All
    pub fn cycle(self) -> Self {
        cycle_through(self, &Level::ALL)
    }
}

impl Selector<Script> {
    pub fn cycle(self) -> Self {
        cycle_through(self, &Script::ALL)
    }
}

fn cycle_through<T: Copy + PartialEq>(current: Selector<T>, values: &[T]) -> Selector<T> {
    match current {
        Selector::All => values.first().copied().map_or(Selector::All, Selector::Only),
        Selector::Only(value) => values
            .iter()
            .position(|v| *v == value)
            .and_then(|i| values.get(i + 1))
            .copied()
            .map_or(Selector::All, Selector::Only),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
    pub level: Selector<Level>,
    pub script: Selector<Script>,
}

impl FilterCriteria {
    pub fn matches(&self, lesson: &Lesson) -> bool {
        if !self.level.matches(&lesson.level) || !self.script.matches(&lesson.script) {
            return false;
        }

        let query = self.query.trim();
        query.is_empty()
            || lesson
                .search_text()
                .to_lowercase()
                .contains(&query.to_lowercase())
    }

    pub fn is_default(&self) -> bool {
        self.query.trim().is_empty()
            && self.level == Selector::All
            && self.script == Selector::All
    }
}

/// Lessons matching `criteria`, in collection order.
pub fn filter_lessons<'a>(lessons: &'a [Lesson], criteria: &FilterCriteria) -> Vec<&'a Lesson> {
    lessons.iter().filter(|l| criteria.matches(l)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> Vec<Lesson> {
        vec![
            Lesson::new("hello", "Hello", Script::Khmer, Level::Beginner),
            Lesson::new("numbers", "Numbers", Script::Khmer, Level::Intermediate),
        ]
    }

    fn ids(lessons: Vec<&Lesson>) -> Vec<&str> {
        lessons.into_iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn query_matches_case_insensitive_substring() {
        let lessons = collection();
        let criteria = FilterCriteria {
            query: "hel".into(),
            ..Default::default()
        };
        assert_eq!(ids(filter_lessons(&lessons, &criteria)), ["hello"]);
    }

    #[test]
    fn level_selector_is_exact() {
        let lessons = collection();
        let criteria = FilterCriteria {
            level: Selector::Only(Level::Intermediate),
            script: Selector::All,
            ..Default::default()
        };
        assert_eq!(ids(filter_lessons(&lessons, &criteria)), ["numbers"]);
    }

    #[test]
    fn wildcards_keep_everything_in_order() {
        let lessons = collection();
        let criteria = FilterCriteria::default();
        assert!(criteria.is_default());
        assert_eq!(ids(filter_lessons(&lessons, &criteria)), ["hello", "numbers"]);
    }

    #[test]
    fn query_searches_optional_fields() {
        let mut lessons = collection();
        lessons[1].transcript = Some("មួយ ពីរ បី".into());
        lessons[0].topic = Some("Greetings".into());

        let by_transcript = FilterCriteria {
            query: "ពីរ".into(),
            ..Default::default()
        };
        assert_eq!(ids(filter_lessons(&lessons, &by_transcript)), ["numbers"]);

        let by_topic = FilterCriteria {
            query: "  GREET ".into(),
            ..Default::default()
        };
        assert_eq!(ids(filter_lessons(&lessons, &by_topic)), ["hello"]);
    }

    #[test]
    fn vocabulary_is_not_searched() {
        let mut lessons = collection();
        lessons[0].vocabulary = Some("zebra".into());
        let criteria = FilterCriteria {
            query: "zebra".into(),
            ..Default::default()
        };
        assert!(filter_lessons(&lessons, &criteria).is_empty());
    }

    #[test]
    fn selectors_cycle_back_to_all() {
        let mut level = Selector::<Level>::All;
        let mut seen = Vec::new();
        for _ in 0..4 {
            level = level.cycle();
            seen.push(level.to_string());
        }
        assert_eq!(seen, ["Beginner", "Intermediate", "Advanced", "All"]);
        assert_eq!(Selector::<Script>::All.cycle(), Selector::Only(Script::Khmer));
        assert_eq!("All".parse::<Selector<Script>>(), Ok(Selector::All));
    }
}
