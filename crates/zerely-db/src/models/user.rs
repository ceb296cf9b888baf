use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use zerely_core::{Snowflake, UserRole};

/// Stored user document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: Snowflake,
    pub anonymous_name: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub tokens: u64,
    pub created_at: DateTime<Utc>,
}
