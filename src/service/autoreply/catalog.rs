use std::collections::HashMap;

/// Keys of the canned auto-reply texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    Default,
    WorkHours,
    Busy,
    Meeting,
    Vacation,
    Sick,
    Lunch,
    Weekend,
    Night,
}

impl ResponseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKind::Default => "default",
            ResponseKind::WorkHours => "work_hours",
            ResponseKind::Busy => "busy",
            ResponseKind::Meeting => "meeting",
            ResponseKind::Vacation => "vacation",
            ResponseKind::Sick => "sick",
            ResponseKind::Lunch => "lunch",
            ResponseKind::Weekend => "weekend",
            ResponseKind::Night => "night",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Date,
    Time,
}

impl Placeholder {
    fn token(&self) -> &'static str {
        match self {
            Placeholder::Date => "{date}",
            Placeholder::Time => "{time}",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResponseCatalog {
    templates: HashMap<ResponseKind, String>,
}

impl Default for ResponseCatalog {
    fn default() -> Self {
        let templates = [
            (ResponseKind::Default, "👩‍💼 Я сейчас занята. Отвечу вам в ближайшее время!"),
            (ResponseKind::WorkHours, "👩‍💼 Рабочий день окончен. Отвечу завтра с 9:00."),
            (ResponseKind::Busy, "👩‍💼 В данный момент я занята. Перезвоню вам позже."),
            (ResponseKind::Meeting, "👩‍💼 Я на совещании. Отвечу после его окончания."),
            (
                ResponseKind::Vacation,
                "👩‍💼 Я в отпуске до {date}. По срочным вопросам напишите 'СРОЧНО'.",
            ),
            (
                ResponseKind::Sick,
                "👩‍💼 Я болею. Вернусь к работе {date}. Спасибо за понимание.",
            ),
            (ResponseKind::Lunch, "👩‍💼 Я на обеденном перерыве. Вернусь в {time}."),
            (ResponseKind::Weekend, "👩‍💼 Сегодня выходной. Отвечу в понедельник."),
            (ResponseKind::Night, "👩‍💼 Сейчас нерабочее время. Отвечу утром."),
        ]
        .into_iter()
        .map(|(kind, text)| (kind, text.to_string()))
        .collect();

        Self { templates }
    }
}

impl ResponseCatalog {
    /// Replaces the template for `kind`.
    pub fn with_template(mut self, kind: ResponseKind, template: impl Into<String>) -> Self {
        self.templates.insert(kind, template.into());
        self
    }

    pub fn template(&self, kind: ResponseKind) -> &str {
        self.templates.get(&kind).map(String::as_str).unwrap_or_default()
    }

    /// Renders `kind`, substituting the supplied placeholders. Anything else in braces is left as-is.
    pub fn render(&self, kind: ResponseKind, substitutions: &[(Placeholder, &str)]) -> String {
        substitutions
            .iter()
            .fold(self.template(kind).to_string(), |text, (placeholder, value)| {
                text.replace(placeholder.token(), value)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_without_placeholders() {
        let catalog = ResponseCatalog::default();
        assert_eq!(
            catalog.render(ResponseKind::Night, &[]),
            "👩‍💼 Сейчас нерабочее время. Отвечу утром."
        );
    }

    #[test]
    fn test_render_substitutes_date_and_time() {
        let catalog = ResponseCatalog::default();

        let vacation = catalog.render(ResponseKind::Vacation, &[(Placeholder::Date, "25.01")]);
        assert_eq!(
            vacation,
            "👩‍💼 Я в отпуске до 25.01. По срочным вопросам напишите 'СРОЧНО'."
        );

        let lunch = catalog.render(ResponseKind::Lunch, &[(Placeholder::Time, "14:00")]);
        assert_eq!(lunch, "👩‍💼 Я на обеденном перерыве. Вернусь в 14:00.");
    }

    #[test]
    fn test_unknown_placeholders_are_left_alone() {
        let catalog = ResponseCatalog::default().with_template(ResponseKind::Busy, "{who} is busy until {time}");
        assert_eq!(
            catalog.render(ResponseKind::Busy, &[(Placeholder::Time, "15:30"), (Placeholder::Date, "01.02")]),
            "{who} is busy until 15:30"
        );
    }

    #[test]
    fn test_missing_substitution_keeps_token() {
        let catalog = ResponseCatalog::default();
        assert!(catalog.render(ResponseKind::Sick, &[]).contains("{date}"));
    }
}
