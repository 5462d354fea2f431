use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Discriminator between quote collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    #[serde(alias = "quotes_collection")]
    General,
    #[serde(alias = "scifi_quotes_collection")]
    Scifi,
}

impl Kind {
    /// Every known kind, in a stable order.
    pub const ALL: [Kind; 2] = [Kind::General, Kind::Scifi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::General => "general",
            Kind::Scifi => "scifi",
        }
    }

    /// Key of the collection document holding this kind's quotes.
    pub fn document_id(&self) -> &'static str {
        match self {
            Kind::General => "quotes_collection",
            Kind::Scifi => "scifi_quotes_collection",
        }
    }

    /// Kinds to try after `self` fails, in order.
    pub fn alternates(self) -> impl Iterator<Item = Kind> {
        Self::ALL.into_iter().filter(move |kind| *kind != self)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError(String);

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown quote kind '{}' (expected one of: general, scifi)",
            self.0
        )
    }
}

impl std::error::Error for ParseKindError {}

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" | "quotes_collection" => Ok(Kind::General),
            "scifi" | "sci-fi" | "scifi_quotes_collection" => Ok(Kind::Scifi),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}
