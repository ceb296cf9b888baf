//! Document-store implementation of CommentRepository

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use tracing::instrument;

use zerely_core::entities::Comment;
use zerely_core::traits::{CommentRepository, RepoResult};
use zerely_core::value_objects::Snowflake;

use crate::models::CommentDocument;
use crate::store::SharedStore;

use super::error::{comment_not_found, duplicate_key};

/// Comment repository over the shared document store
#[derive(Clone)]
pub struct MemoryCommentRepository {
    store: SharedStore,
}

impl MemoryCommentRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self
            .store
            .comments
            .get(&id)
            .map(|doc| Comment::from(doc.clone())))
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let mut docs: Vec<CommentDocument> = self
            .store
            .comments
            .iter()
            .filter(|entry| entry.value().post == post_id)
            .map(|entry| entry.value().clone())
            .collect();
        docs.sort_by(CommentDocument::oldest_first);
        Ok(docs.into_iter().map(Comment::from).collect())
    }

    #[instrument(
        skip(self, comment),
        fields(comment_id = %comment.id, post_id = %comment.post_id)
    )]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        match self.store.comments.entry(comment.id) {
            Entry::Occupied(_) => Err(duplicate_key("comments", comment.id)),
            Entry::Vacant(slot) => {
                slot.insert(CommentDocument::from(comment));
                Ok(())
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete_thread(&self, id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        self.store
            .comments
            .remove(&id)
            .ok_or_else(|| comment_not_found(id))?;

        let mut replies: Vec<CommentDocument> = self
            .store
            .comments
            .iter()
            .filter(|entry| entry.value().parent_comment == Some(id))
            .map(|entry| entry.value().clone())
            .collect();
        replies.sort_by(CommentDocument::oldest_first);

        let mut removed = vec![id];
        for reply in replies {
            if self.store.comments.remove(&reply.id).is_some() {
                removed.push(reply.id);
            }
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn delete_by_post(&self, post_id: Snowflake) -> RepoResult<usize> {
        let mut removed = 0;
        self.store.comments.retain(|_, doc| {
            let keep = doc.post != post_id;
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{Duration, Utc};

    fn repo() -> MemoryCommentRepository {
        MemoryCommentRepository::new(MemoryStore::new_shared())
    }

    fn comment(id: i64, post_id: i64, seconds_ago: i64) -> Comment {
        let mut comment = Comment::new(
            Snowflake::new(id),
            Snowflake::new(post_id),
            Snowflake::new(500),
            format!("comment {id}"),
        );
        comment.created_at = Utc::now() - Duration::seconds(seconds_ago);
        comment
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let repo = repo();
        let comment = comment(1, 10, 0);
        repo.create(&comment).await.unwrap();

        let found = repo.find_by_id(comment.id).await.unwrap();
        assert_eq!(found, Some(comment.clone()));

        let err = repo.create(&comment).await.unwrap_err();
        assert!(matches!(err, zerely_core::DomainError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_find_by_post_is_oldest_first() {
        let repo = repo();
        repo.create(&comment(1, 10, 5)).await.unwrap();
        repo.create(&comment(2, 10, 30)).await.unwrap();
        repo.create(&comment(3, 11, 60)).await.unwrap();

        let ids: Vec<i64> = repo
            .find_by_post(Snowflake::new(10))
            .await
            .unwrap()
            .iter()
            .map(|c| c.id.into_inner())
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_delete_thread_removes_replies_only() {
        let repo = repo();
        let root = comment(1, 10, 60);
        let other = comment(2, 10, 50);
        let reply = Comment::new_reply(Snowflake::new(3), Snowflake::new(7), "same".into(), &root);
        let other_reply =
            Comment::new_reply(Snowflake::new(4), Snowflake::new(7), "here".into(), &other);
        for c in [&root, &other, &reply, &other_reply] {
            repo.create(c).await.unwrap();
        }

        let removed = repo.delete_thread(root.id).await.unwrap();
        assert_eq!(removed, vec![root.id, reply.id]);

        let left: Vec<Snowflake> = repo
            .find_by_post(Snowflake::new(10))
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(left, vec![other.id, other_reply.id]);
    }

    #[tokio::test]
    async fn test_delete_reply_keeps_thread() {
        let repo = repo();
        let root = comment(1, 10, 60);
        let reply = Comment::new_reply(Snowflake::new(2), Snowflake::new(7), "same".into(), &root);
        repo.create(&root).await.unwrap();
        repo.create(&reply).await.unwrap();

        assert_eq!(repo.delete_thread(reply.id).await.unwrap(), vec![reply.id]);
        assert!(repo.find_by_id(root.id).await.unwrap().is_some());

        let err = repo.delete_thread(reply.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_by_post() {
        let repo = repo();
        repo.create(&comment(1, 10, 0)).await.unwrap();
        repo.create(&comment(2, 10, 0)).await.unwrap();
        repo.create(&comment(3, 11, 0)).await.unwrap();

        assert_eq!(repo.delete_by_post(Snowflake::new(10)).await.unwrap(), 2);
        assert_eq!(repo.delete_by_post(Snowflake::new(10)).await.unwrap(), 0);
        assert_eq!(repo.find_by_post(Snowflake::new(11)).await.unwrap().len(), 1);
    }
}
