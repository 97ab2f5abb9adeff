//! Product categories, preference questions and the answers collected for them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A product category the user can start the questionnaire from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,

    /// Image reference: a URL from the service or a bundled asset name.
    #[serde(default)]
    pub image: String,
}

impl Category {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
        }
    }

    /// Subtitle shown under the category name.
    pub fn tagline(&self) -> String {
        format!("Find your perfect {}", self.name.to_lowercase())
    }
}

/// Categories shown when the service cannot provide its own list.
pub fn default_categories() -> Vec<Category> {
    [
        ("Eyeliner", "eyeliner.jpg"),
        ("Lipgloss", "lipgloss.jpg"),
        ("Foundation", "foundation.jpg"),
        ("Blush", "blush.jpg"),
        ("Mascara", "Mascara.jpeg"),
        ("Lip Color", "Lip color.jpeg"),
        ("Eye Shadow", "Eye shadow.jpeg"),
        ("Highlighter", "Highligher.jpeg"),
        ("Toner", "Toner.jpeg"),
        ("Perfume", "Perfume.jpeg"),
        ("Serum", "Serum.jpeg"),
    ]
    .into_iter()
    .map(|(name, image)| Category::new(name, image))
    .collect()
}

/// One preference question for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Key the chosen option is stored under when requesting a recommendation.
    pub attribute: String,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Answers keyed by question attribute. At most one option per attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    /// Minimum number of answers before a recommendation can be requested.
    pub const MIN_FOR_RECOMMENDATION: usize = 2;

    pub fn new() -> Self {
        Self::default()
    }

    /// Record `option` for `attribute`, replacing any earlier choice.
    pub fn answer(&mut self, attribute: impl Into<String>, option: impl Into<String>) {
        self.0.insert(attribute.into(), option.into());
    }

    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.0.get(attribute).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_enough_for_recommendation(&self) -> bool {
        self.len() >= Self::MIN_FOR_RECOMMENDATION
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
