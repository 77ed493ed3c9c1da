//! Card color theme.

use serde::{Deserialize, Serialize};

/// Colors and fonts applied to every card.
///
/// Loaded once from configuration and shared read-only by all requests.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Theme {
    /// Card background fill.
    pub background: String,

    /// Card border stroke.
    pub border: String,

    /// Quote body text.
    pub quote: String,

    /// Author attribution line.
    pub author: String,

    /// Work title (rendered in italics).
    pub work: String,

    /// Year of the work.
    pub year: String,

    /// Font family list used for all text.
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#1e1e2e".to_string(),
            border: "#89b4fa".to_string(),
            quote: "#cdd6f4".to_string(),
            author: "#f5c2e7".to_string(),
            work: "#a6adc8".to_string(),
            year: "#9399b2".to_string(),
            font_family: "Georgia, 'Times New Roman', serif".to_string(),
        }
    }
}

impl Theme {
    /// All color roles paired with their names, for validation.
    pub fn colors(&self) -> [(&'static str, &str); 6] {
        [
            ("background", self.background.as_str()),
            ("border", self.border.as_str()),
            ("quote", self.quote.as_str()),
            ("author", self.author.as_str()),
            ("work", self.work.as_str()),
            ("year", self.year.as_str()),
        ]
    }
}
