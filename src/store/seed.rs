use super::lesson::{Lesson, Level, Script};

/// Built-in lessons used when no valid persisted collection exists.
pub fn seed_lessons() -> Vec<Lesson> {
    vec![
        Lesson {
            id: "greetings-basic".into(),
            title: "Basic Greetings".into(),
            script: Script::Khmer,
            level: Level::Beginner,
            topic: Some("Greetings".into()),
            description: Some("Say hello, thank you and goodbye in everyday situations.".into()),
            transcript: Some("សួស្តី (suosdei) - hello\nអរគុណ (arkoun) - thank you\nលាហើយ (lea haey) - goodbye".into()),
            vocabulary: Some("សួស្តី - hello\nអរគុណ - thank you\nលាហើយ - goodbye".into()),
            audio_url: Some("https://upload.wikimedia.org/wikipedia/commons/c/c8/Example.ogg".into()),
        },
        Lesson {
            id: "numbers-1-10".into(),
            title: "Numbers 1-10".into(),
            script: Script::Khmer,
            level: Level::Beginner,
            topic: Some("Numbers".into()),
            description: Some("Count from one to ten with Khmer numerals.".into()),
            transcript: Some("មួយ ពីរ បី បួន ប្រាំ ប្រាំមួយ ប្រាំពីរ ប្រាំបី ប្រាំបួន ដប់".into()),
            vocabulary: Some("មួយ - one\nពីរ - two\nបី - three\nបួន - four\nប្រាំ - five\nដប់ - ten".into()),
            audio_url: None,
        },
        Lesson {
            id: "market-phrases".into(),
            title: "At the Market".into(),
            script: Script::Latin,
            level: Level::Intermediate,
            topic: Some("Shopping".into()),
            description: Some("Romanized phrases for asking prices and bargaining.".into()),
            transcript: Some("Nih thlai pon man? - How much is this?\nChoh thlai ban te? - Can you lower the price?".into()),
            vocabulary: Some("thlai - price\nchoh - lower\ntinh - buy".into()),
            audio_url: None,
        },
        Lesson {
            id: "telling-time".into(),
            title: "Telling the Time".into(),
            script: Script::Latin,
            level: Level::Advanced,
            topic: Some("Time".into()),
            description: Some("Hours, minutes and parts of the day in conversation.".into()),
            transcript: None,
            vocabulary: Some("maong - hour\nneati - minute\npel prik - morning".into()),
            audio_url: None,
        },
    ]
}
