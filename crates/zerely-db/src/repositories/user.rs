//! Document-store implementation of UserRepository

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use tracing::instrument;

use zerely_core::entities::User;
use zerely_core::traits::{RepoResult, UserRepository};
use zerely_core::value_objects::Snowflake;

use crate::models::UserDocument;
use crate::store::SharedStore;

use super::error::{duplicate_key, user_not_found};

/// User repository over the shared document store
#[derive(Clone)]
pub struct MemoryUserRepository {
    store: SharedStore,
}

impl MemoryUserRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.store.users.get(&id).map(|doc| User::from(doc.clone())))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        match self.store.users.entry(user.id) {
            Entry::Occupied(_) => Err(duplicate_key("users", user.id)),
            Entry::Vacant(slot) => {
                slot.insert(UserDocument::from(user));
                Ok(())
            }
        }
    }

    #[instrument(skip(self))]
    async fn credit_tokens(&self, id: Snowflake, amount: u64) -> RepoResult<u64> {
        let mut doc = self
            .store
            .users
            .get_mut(&id)
            .ok_or_else(|| user_not_found(id))?;
        doc.tokens = doc.tokens.saturating_add(amount);
        Ok(doc.tokens)
    }
}
