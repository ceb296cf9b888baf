//! User entity - an anonymous account that earns tokens

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

/// User entity. Only the anonymous name is ever shown to other users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub anonymous_name: String,
    pub role: UserRole,
    pub tokens: u64,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: Snowflake, anonymous_name: String) -> Self {
        Self {
            id,
            anonymous_name,
            role: UserRole::User,
            tokens: 0,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Generate a display name such as "Gentle Otter 42"
pub fn generate_anonymous_name() -> String {
    const ADJECTIVES: &[&str] = &[
        "Gentle", "Quiet", "Brave", "Calm", "Kind", "Hopeful", "Sleepy", "Wandering", "Bright",
        "Patient",
    ];
    const ANIMALS: &[&str] = &[
        "Otter", "Owl", "Fox", "Deer", "Panda", "Koala", "Heron", "Badger", "Dolphin", "Sparrow",
    ];

    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("Quiet");
    let animal = ANIMALS.choose(&mut rng).copied().unwrap_or("Owl");
    format!("{adjective} {animal} {:02}", rng.gen_range(0..100))
}
