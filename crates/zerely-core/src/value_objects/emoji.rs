//! Supported reaction symbols

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// One of the six emoji a user may react to a post with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReactionEmoji {
    Heart,
    Hug,
    Sad,
    Angry,
    Strong,
    Pray,
}

impl ReactionEmoji {
    /// All supported emoji, in display order
    pub const ALL: [Self; 6] = [
        Self::Heart,
        Self::Hug,
        Self::Sad,
        Self::Angry,
        Self::Strong,
        Self::Pray,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// The unicode symbol clients send and display
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Heart => "❤️",
            Self::Hug => "🤗",
            Self::Sad => "😢",
            Self::Angry => "😡",
            Self::Strong => "💪",
            Self::Pray => "🙏",
        }
    }

    /// Position in [`Self::ALL`]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parse a client-supplied symbol. Only an exact match is accepted.
    pub fn parse(symbol: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|emoji| emoji.symbol() == symbol)
            .ok_or_else(|| DomainError::InvalidReaction(symbol.to_string()))
    }
}

impl fmt::Display for ReactionEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for ReactionEmoji {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ReactionEmoji {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ReactionEmoji> for String {
    fn from(emoji: ReactionEmoji) -> Self {
        emoji.symbol().to_string()
    }
}
