use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Intent {
    Task,
    Appointment,
    Reminder,
}

pub trait IntentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> BTreeSet<Intent>;
}

/// Substring matching against fixed keyword lists. One text may carry several intents.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    rules: Vec<(Intent, Vec<String>)>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(vec![
            (Intent::Task, vec!["задача", "сделать", "нужно", "надо", "поручение", "дело"]),
            (
                Intent::Appointment,
                vec!["встреча", "совещание", "встречу", "конференция", "звонок"],
            ),
            (Intent::Reminder, vec!["напомни", "напоминание", "напомнить"]),
        ])
    }
}

impl KeywordClassifier {
    pub fn new(rules: Vec<(Intent, Vec<&str>)>) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|(intent, words)| (intent, words.into_iter().map(str::to_lowercase).collect()))
                .collect(),
        }
    }
}

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> BTreeSet<Intent> {
        let text = text.to_lowercase();
        self.rules
            .iter()
            .filter(|(_, words)| words.iter().any(|word| text.contains(word.as_str())))
            .map(|(intent, _)| *intent)
            .collect()
    }
}
