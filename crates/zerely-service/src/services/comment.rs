//! Comment service
//!
//! Comments and one-level reply threads under visible posts. The post's
//! `comment_count` moves with every create and delete.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, instrument, warn};
use validator::Validate;

use zerely_core::events::{CommentCreatedEvent, CommentDeletedEvent};
use zerely_core::{Comment, DomainError, DomainEvent, Post, Snowflake, User};

use crate::dto::{
    CommentResponse, CommentWithAuthor, CreateCommentRequest, CreateCommentResponse,
    DeleteCommentResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on a visible post
    #[instrument(skip(self, request))]
    pub async fn create_comment(
        &self,
        post_id: Snowflake,
        author_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CreateCommentResponse> {
        let request = request.trimmed();
        request.validate()?;

        let author = self.author(author_id).await?;
        self.visible_post(post_id).await?;

        let comment = Comment::new(self.ctx.generate_id(), post_id, author_id, request.content);
        self.store(comment, author).await
    }

    /// Reply to a comment. A reply to a reply joins the same thread.
    #[instrument(skip(self, request))]
    pub async fn reply_to_comment(
        &self,
        comment_id: Snowflake,
        author_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CreateCommentResponse> {
        let request = request.trimmed();
        request.validate()?;

        let author = self.author(author_id).await?;
        let parent = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;
        self.visible_post(parent.post_id).await?;

        let reply = Comment::new_reply(self.ctx.generate_id(), author_id, request.content, &parent);
        self.store(reply, author).await
    }

    /// Every comment on a visible post, oldest first
    #[instrument(skip(self))]
    pub async fn list_by_post(&self, post_id: Snowflake) -> ServiceResult<Vec<CommentResponse>> {
        self.visible_post(post_id).await?;
        let comments = self.ctx.comment_repo().find_by_post(post_id).await?;

        let mut names: HashMap<Snowflake, Option<String>> = HashMap::new();
        let mut rendered = Vec::with_capacity(comments.len());
        for comment in comments {
            let author_name = match names.get(&comment.author_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self
                        .ctx
                        .user_repo()
                        .find_by_id(comment.author_id)
                        .await?
                        .map(|user| user.anonymous_name);
                    names.insert(comment.author_id, name.clone());
                    name
                }
            };
            rendered.push(CommentResponse::from(CommentWithAuthor {
                comment,
                author_name,
            }));
        }

        Ok(rendered)
    }

    /// Delete a comment with its replies; only its author or an admin may
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        comment_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<DeleteCommentResponse> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;

        let actor = self.author(actor_id).await?;
        if !comment.can_be_deleted_by(&actor) {
            return Err(DomainError::NotCommentAuthor.into());
        }

        let removed_ids = self.ctx.comment_repo().delete_thread(comment_id).await?;
        let removed = u32::try_from(removed_ids.len()).unwrap_or(u32::MAX);

        let comment_count = match self
            .ctx
            .post_repo()
            .adjust_comment_count(comment.post_id, -i64::from(removed))
            .await
        {
            Ok(count) => count,
            // The post went first; its comments follow it
            Err(e) if e.is_not_found() => 0,
            Err(e) => return Err(e.into()),
        };

        info!(
            comment_id = %comment_id,
            post_id = %comment.post_id,
            actor_id = %actor_id,
            admin = actor.is_admin(),
            removed,
            "Comment deleted"
        );

        self.ctx.publish(DomainEvent::CommentDeleted(CommentDeletedEvent {
            comment_id,
            post_id: comment.post_id,
            deleted_by: actor_id,
            removed,
            timestamp: Utc::now(),
        }));

        Ok(DeleteCommentResponse {
            removed,
            comment_count,
        })
    }

    async fn author(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    async fn visible_post(&self, post_id: Snowflake) -> ServiceResult<Post> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .filter(|post| post.is_visible)
            .ok_or(DomainError::PostNotFound(post_id))?;
        Ok(post)
    }

    /// Insert the comment and count it on its post
    async fn store(&self, comment: Comment, author: User) -> ServiceResult<CreateCommentResponse> {
        self.ctx.comment_repo().create(&comment).await?;

        let comment_count = match self
            .ctx
            .post_repo()
            .adjust_comment_count(comment.post_id, 1)
            .await
        {
            Ok(count) => count,
            Err(e) if e.is_not_found() => {
                // Deleted since the visibility check
                if let Err(cleanup) = self.ctx.comment_repo().delete_thread(comment.id).await {
                    warn!(comment_id = %comment.id, error = %cleanup, "Orphan comment left behind");
                }
                return Err(DomainError::PostNotFound(comment.post_id).into());
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            comment_id = %comment.id,
            post_id = %comment.post_id,
            author_id = %author.id,
            reply = comment.is_reply(),
            "Comment created"
        );

        self.ctx.publish(DomainEvent::CommentCreated(CommentCreatedEvent {
            comment_id: comment.id,
            post_id: comment.post_id,
            author_id: author.id,
            parent_id: comment.parent_id,
            timestamp: comment.created_at,
        }));

        Ok(CreateCommentResponse {
            comment: CommentResponse::from(CommentWithAuthor {
                comment,
                author_name: Some(author.anonymous_name),
            }),
            comment_count,
        })
    }
}
