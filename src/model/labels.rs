/// Classification labels assigned by the text analyzer
///
/// Both label sets are closed: the database stores their display strings and
/// reads them back through `from_db_string`.
use serde::Serialize;
use std::fmt;

/// Rhetorical tone of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Tone {
    Informative,
    Inspirational,
    Authoritative,
    Persuasive,
    Humorous,
    Empathetic,
}

impl Tone {
    /// Tie-break order for tone classification, highest priority first
    pub const PRIORITY: [Tone; 6] = [
        Tone::Informative,
        Tone::Authoritative,
        Tone::Persuasive,
        Tone::Inspirational,
        Tone::Empathetic,
        Tone::Humorous,
    ];

    /// Converts the tone to its stored representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Informative => "Informative",
            Self::Inspirational => "Inspirational",
            Self::Authoritative => "Authoritative",
            Self::Persuasive => "Persuasive",
            Self::Humorous => "Humorous",
            Self::Empathetic => "Empathetic",
        }
    }

    /// Parses a tone from its stored representation
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "Informative" => Some(Self::Informative),
            "Inspirational" => Some(Self::Inspirational),
            "Authoritative" => Some(Self::Authoritative),
            "Persuasive" => Some(Self::Persuasive),
            "Humorous" => Some(Self::Humorous),
            "Empathetic" => Some(Self::Empathetic),
            _ => None,
        }
    }

    /// Parses a configuration key such as `persuasive` (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|tone| tone.to_db_string().eq_ignore_ascii_case(key.trim()))
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}

/// Audience-fit bucket derived from the readability score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Complexity {
    TooBasic,
    Optimal,
    TooComplex,
}

impl Complexity {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::TooBasic => "Too Basic",
            Self::Optimal => "Optimal",
            Self::TooComplex => "Too Complex",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "Too Basic" => Some(Self::TooBasic),
            "Optimal" => Some(Self::Optimal),
            "Too Complex" => Some(Self::TooComplex),
            _ => None,
        }
    }

    pub fn all() -> [Self; 3] {
        [Self::TooBasic, Self::Optimal, Self::TooComplex]
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}
