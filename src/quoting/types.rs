//! Upstream quote API types.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Author name used when the philosopher cannot be resolved.
pub const UNKNOWN_PHILOSOPHER: &str = "Unknown Philosopher";

/// A quote as returned by the quotes endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Quote {
    /// The quote body.
    #[serde(alias = "quote")]
    pub text: String,

    /// Title of the work the quote comes from, if known.
    #[serde(default, deserialize_with = "lenient_string")]
    pub work: Option<String>,

    /// Year of the work. The API sends either a string or a number.
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: Option<String>,

    /// Reference to the quoted philosopher.
    #[serde(default)]
    pub philosopher: Option<PhilosopherRef>,
}

impl Quote {
    pub fn philosopher_id(&self) -> Option<&str> {
        self.philosopher.as_ref().and_then(|p| p.id.as_deref())
    }
}

/// Nested philosopher reference inside a quote. A reference without a
/// usable id resolves to the placeholder author.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhilosopherRef {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
}

/// Philosopher detail record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Philosopher {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    pub name: String,
}

/// Accept strings and numbers; treat null, blank strings, and anything else
/// as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
