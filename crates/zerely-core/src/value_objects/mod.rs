//! Value objects - immutable types that represent domain concepts

mod emoji;
mod mood;
mod snowflake;

pub use emoji::ReactionEmoji;
pub use mood::Mood;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
