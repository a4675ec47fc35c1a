//! Human-readable labels for informer condition codes.

const CONDITIONS: &[(&str, &str)] = &[
    ("clear", "Ясно"),
    ("partly-cloudy", "Переменная облачность"),
    ("cloudy", "Облачно с прояснениями"),
    ("overcast", "Облачно"),
    ("drizzle", "Морось"),
    ("light-rain", "Небольшой дождь"),
    ("rain", "Дождь"),
    ("moderate-rain", "Умеренно сильный дождь"),
    ("heavy-rain", "Сильный дождь"),
    ("continuous-heavy-rain", "Длительный сильный дождь"),
    ("showers", "Ливень"),
    ("wet-snow", "Дождь со снегом"),
    ("light-snow", "Небольшой снег"),
    ("snow", "Снег"),
    ("snow-showers", "Снегопад"),
    ("hail", "Град"),
    ("thunderstorm", "Гроза"),
    ("thunderstorm-with-rain", "Дождь с грозой"),
    ("thunderstorm-with-hail", "Гроза с градом"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionCatalog;

impl ConditionCatalog {
    pub fn get(&self, code: &str) -> Option<&'static str> {
        CONDITIONS
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, label)| *label)
    }

    /// Label for `code`, or `code` itself when the catalog doesn't know it.
    pub fn label<'a>(&self, code: &'a str) -> &'a str {
        self.get(code).unwrap_or(code)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        CONDITIONS.iter().copied()
    }
}
