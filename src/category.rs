use serde::Serialize;

/// Closed set of expense categories a receipt can be filed under.
///
/// The label text here is the single source of truth: the prompt enumerates
/// these same labels, and validation is an exact string match against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Food,
    Transportation,
    Lodging,
    Electronics,
    DailySupplies,
    Other,
}

pub const ALL_CATEGORIES: [Category; 6] = [
    Category::Food,
    Category::Transportation,
    Category::Lodging,
    Category::Electronics,
    Category::DailySupplies,
    Category::Other,
];

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "식비",
            Category::Transportation => "교통비",
            Category::Lodging => "숙박비",
            Category::Electronics => "전자기기",
            Category::DailySupplies => "생활용품",
            Category::Other => "기타",
        }
    }

    /// Example hint shown next to the label in the prompt. `Other` carries
    /// no examples.
    pub fn prompt_hint(&self) -> Option<&'static str> {
        match self {
            Category::Food => Some("예: 카페, 음식점, 제과점"),
            Category::Transportation => Some("예: 버스, 지하철, 택시, 주유소"),
            Category::Lodging => Some("예: 호텔, 모텔, 에어비앤비"),
            Category::Electronics => Some("예: 전자제품 매장, 컴퓨터 매장"),
            Category::DailySupplies => Some("예: 편의점, 마트, 다이소"),
            Category::Other => None,
        }
    }

    /// Exact-match lookup. Locale- and whitespace-sensitive by design; no
    /// fuzzy or case-insensitive matching.
    pub fn from_label(label: &str) -> Option<Self> {
        ALL_CATEGORIES.into_iter().find(|c| c.label() == label)
    }

    /// Trims the raw model output and maps it into the closed set, falling
    /// back to `Other` when it is not a known label. Model output never
    /// reaches the response unchecked.
    pub fn resolve(raw: &str) -> Self {
        let trimmed = raw.trim();
        match Self::from_label(trimmed) {
            Some(category) => category,
            None => {
                tracing::debug!(output = %trimmed, "Model output outside the category set, substituting fallback");
                Category::Other
            }
        }
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
