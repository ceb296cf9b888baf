//! Document-store implementation of PostRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use tracing::instrument;

use zerely_core::entities::Post;
use zerely_core::traits::{PostQuery, PostRepository, ReactionUpdate, RepoResult};
use zerely_core::value_objects::{Mood, Snowflake};
use zerely_core::DomainError;

use crate::models::PostDocument;
use crate::store::SharedStore;

use super::error::{duplicate_key, post_not_found};

/// Post repository over the shared document store
#[derive(Clone)]
pub struct MemoryPostRepository {
    store: SharedStore,
}

impl MemoryPostRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Clones of the documents accepted by `filter`, newest first
    fn collect_sorted<F>(&self, filter: F) -> Vec<PostDocument>
    where
        F: Fn(&PostDocument) -> bool,
    {
        let mut docs: Vec<PostDocument> = self
            .store
            .posts
            .iter()
            .filter(|entry| filter(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        docs.sort_by(PostDocument::newest_first);
        docs
    }
}

fn visible_with_mood(doc: &PostDocument, mood: Option<Mood>) -> bool {
    doc.is_visible && mood.map_or(true, |mood| doc.mood == mood)
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        Ok(self.store.posts.get(&id).map(|doc| Post::from(doc.clone())))
    }

    #[instrument(skip(self))]
    async fn find_visible(&self, query: &PostQuery) -> RepoResult<Vec<Post>> {
        let posts = self
            .collect_sorted(|doc| visible_with_mood(doc, query.mood))
            .into_iter()
            .skip(query.offset())
            .take(query.page_size as usize)
            .map(Post::from)
            .collect();

        Ok(posts)
    }

    #[instrument(skip(self))]
    async fn count_visible(&self, mood: Option<Mood>) -> RepoResult<u64> {
        let count = self
            .store
            .posts
            .iter()
            .filter(|entry| visible_with_mood(entry.value(), mood))
            .count();

        Ok(count as u64)
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Post>> {
        Ok(self
            .collect_sorted(|doc| doc.author == author_id)
            .into_iter()
            .map(Post::from)
            .collect())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        match self.store.posts.entry(post.id) {
            Entry::Occupied(_) => Err(duplicate_key("posts", post.id)),
            Entry::Vacant(slot) => {
                slot.insert(PostDocument::from(post));
                Ok(())
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.store
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| post_not_found(id))
    }

    #[instrument(
        skip(self, update),
        fields(post_id = %update.post_id, expected = update.expected_version)
    )]
    async fn update_reactions(&self, update: &ReactionUpdate) -> RepoResult<u64> {
        let mut doc = self
            .store
            .posts
            .get_mut(&update.post_id)
            .ok_or_else(|| post_not_found(update.post_id))?;

        if doc.version != update.expected_version {
            return Err(DomainError::VersionConflict {
                post_id: update.post_id,
                expected: update.expected_version,
            });
        }

        doc.reactions.clone_from(&update.state.reactions);
        doc.reaction_counts = update.state.reaction_counts;
        doc.rewarded_reactors.clone_from(&update.rewarded_reactors);
        doc.version += 1;
        doc.updated_at = Utc::now();

        Ok(doc.version)
    }

    #[instrument(skip(self))]
    async fn adjust_comment_count(&self, id: Snowflake, delta: i64) -> RepoResult<u32> {
        let mut doc = self
            .store
            .posts
            .get_mut(&id)
            .ok_or_else(|| post_not_found(id))?;
        let count = (i64::from(doc.comment_count) + delta).clamp(0, i64::from(u32::MAX));
        doc.comment_count = u32::try_from(count).unwrap_or(u32::MAX);
        doc.updated_at = Utc::now();
        Ok(doc.comment_count)
    }

    #[instrument(skip(self))]
    async fn find_expired(&self, now: DateTime<Utc>) -> RepoResult<Vec<Snowflake>> {
        Ok(self
            .store
            .posts
            .iter()
            .filter(|entry| entry.value().auto_delete.is_due(now))
            .map(|entry| *entry.key())
            .collect())
    }
}
