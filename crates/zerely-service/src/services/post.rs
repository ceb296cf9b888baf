//! Post service
//!
//! Creating, reading, listing and deleting posts.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, instrument, warn};
use validator::Validate;

use zerely_core::events::{PostCreatedEvent, PostDeletedEvent, TokensCreditedEvent, TokensReason};
use zerely_core::{AutoDelete, DomainError, DomainEvent, Mood, Post, PostQuery, Snowflake};

use crate::dto::{
    AutoDeleteRequest, CreatePostRequest, CreatePostResponse, ListPostsQuery, PostListResponse,
    PostResponse, PostWithAuthor,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post and credit the author's creation reward
    #[instrument(skip(self, request, ip_address))]
    pub async fn create_post(
        &self,
        author_id: Snowflake,
        request: CreatePostRequest,
        ip_address: Option<String>,
    ) -> ServiceResult<CreatePostResponse> {
        let request = request.trimmed();
        request.validate()?;
        let mood: Mood = request.mood.parse()?;

        let author = self
            .ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", author_id.to_string()))?;

        let now = Utc::now();
        let auto_delete = self.auto_delete_schedule(request.auto_delete, now)?;

        let mut post = Post::new(self.ctx.generate_id(), author_id, request.content, mood)
            .with_title(request.title)
            .with_auto_delete(auto_delete)
            .with_ip_address(ip_address);
        post.created_at = now;
        post.updated_at = now;

        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, author_id = %author_id, mood = %mood, "Post created");

        self.ctx.publish(DomainEvent::PostCreated(PostCreatedEvent {
            post_id: post.id,
            author_id,
            timestamp: now,
        }));

        let reward = self.ctx.config().rewards.post_reward;
        let (tokens_earned, new_token_balance) = if reward == 0 {
            (0, author.tokens)
        } else {
            match self.ctx.user_repo().credit_tokens(author_id, reward).await {
                Ok(balance) => {
                    self.ctx.publish(DomainEvent::TokensCredited(TokensCreditedEvent {
                        user_id: author_id,
                        post_id: Some(post.id),
                        amount: reward,
                        balance,
                        reason: TokensReason::PostCreated,
                        timestamp: now,
                    }));
                    (reward, balance)
                }
                Err(e) => {
                    // The post is stored; report it without the reward
                    warn!(
                        post_id = %post.id,
                        author_id = %author_id,
                        amount = reward,
                        error = %e,
                        "Post reward lost"
                    );
                    (0, author.tokens)
                }
            }
        };

        Ok(CreatePostResponse {
            post: PostResponse::from(PostWithAuthor {
                post,
                author_name: Some(author.anonymous_name),
                viewer: Some(author_id),
            }),
            tokens_earned,
            new_token_balance,
        })
    }

    /// Get a visible post
    #[instrument(skip(self))]
    pub async fn get_post(
        &self,
        post_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<PostResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .filter(|post| post.is_visible)
            .ok_or(DomainError::PostNotFound(post_id))?;

        let mut rendered = self.render(vec![post], viewer).await?;
        rendered
            .pop()
            .ok_or_else(|| ServiceError::internal("rendered post missing"))
    }

    /// One page of the visible feed, newest first
    #[instrument(skip(self))]
    pub async fn list_posts(
        &self,
        query: ListPostsQuery,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<PostListResponse> {
        let mood = query
            .mood
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .map(str::parse::<Mood>)
            .transpose()?;

        let page_size = self.ctx.config().feed.page_size;
        let feed_query = PostQuery::new(query.page.unwrap_or(1), page_size).with_mood(mood);

        let count = self.ctx.post_repo().count_visible(mood).await?;
        let posts = self.ctx.post_repo().find_visible(&feed_query).await?;

        Ok(PostListResponse {
            data: self.render(posts, viewer).await?,
            page: feed_query.page,
            pages: count.div_ceil(u64::from(feed_query.page_size)),
        })
    }

    /// All of an author's posts, hidden ones included, newest first
    #[instrument(skip(self))]
    pub async fn my_posts(&self, author_id: Snowflake) -> ServiceResult<Vec<PostResponse>> {
        let posts = self.ctx.post_repo().find_by_author(author_id).await?;
        self.render(posts, Some(author_id)).await
    }

    /// Delete a post; only its author or an admin may
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: Snowflake, actor_id: Snowflake) -> ServiceResult<()> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        let actor = self
            .ctx
            .user_repo()
            .find_by_id(actor_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", actor_id.to_string()))?;

        if !post.can_be_deleted_by(&actor) {
            return Err(DomainError::NotPostAuthor.into());
        }

        self.ctx.post_repo().delete(post_id).await?;
        let comments_removed = self.ctx.comment_repo().delete_by_post(post_id).await?;

        info!(
            post_id = %post_id,
            actor_id = %actor_id,
            admin = actor.is_admin(),
            comments_removed,
            "Post deleted"
        );

        self.ctx.publish(DomainEvent::PostDeleted(PostDeletedEvent {
            post_id,
            deleted_by: actor_id,
            timestamp: Utc::now(),
        }));

        Ok(())
    }

    fn auto_delete_schedule(
        &self,
        request: Option<AutoDeleteRequest>,
        now: chrono::DateTime<Utc>,
    ) -> ServiceResult<AutoDelete> {
        let max_hours = self.ctx.config().feed.max_auto_delete_hours;
        match request {
            Some(AutoDeleteRequest {
                enabled: true,
                hours,
            }) => match hours {
                Some(hours) if (1..=max_hours).contains(&hours) => {
                    Ok(AutoDelete::after_hours(now, hours))
                }
                _ => Err(ServiceError::validation(format!(
                    "autoDelete.hours must be between 1 and {max_hours}"
                ))),
            },
            _ => Ok(AutoDelete::disabled()),
        }
    }

    /// Attach author names, looking each author up once
    async fn render(
        &self,
        posts: Vec<Post>,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<Vec<PostResponse>> {
        let mut names: HashMap<Snowflake, Option<String>> = HashMap::new();
        let mut rendered = Vec::with_capacity(posts.len());

        for post in posts {
            let author_name = match names.get(&post.author_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self
                        .ctx
                        .user_repo()
                        .find_by_id(post.author_id)
                        .await?
                        .map(|user| user.anonymous_name);
                    names.insert(post.author_id, name.clone());
                    name
                }
            };
            rendered.push(PostResponse::from(PostWithAuthor {
                post,
                author_name,
                viewer,
            }));
        }

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceContextBuilder;
    use zerely_core::{User, UserRole};
    use zerely_db::MemoryStore;

    fn ctx() -> ServiceContext {
        ServiceContextBuilder::new()
            .memory_store(MemoryStore::new_shared())
            .build()
            .unwrap()
    }

    async fn user(ctx: &ServiceContext, role: UserRole) -> User {
        let mut user = User::new(ctx.generate_id(), "Calm Deer 07".into());
        user.role = role;
        ctx.user_repo().create(&user).await.unwrap();
        user
    }

    fn request(mood: &str) -> CreatePostRequest {
        CreatePostRequest {
            title: Some("  a title  ".into()),
            content: "  I finally said no to extra shifts  ".into(),
            mood: mood.into(),
            auto_delete: None,
        }
    }

    #[tokio::test]
    async fn test_create_post_rewards_author() {
        let ctx = ctx();
        let author = user(&ctx, UserRole::User).await;
        let service = PostService::new(&ctx);

        let created = service
            .create_post(author.id, request("hopeful"), Some("10.1.1.1".into()))
            .await
            .unwrap();

        assert_eq!(created.tokens_earned, 5);
        assert_eq!(created.new_token_balance, 5);
        assert_eq!(created.post.title.as_deref(), Some("a title"));
        assert_eq!(created.post.content, "I finally said no to extra shifts");
        assert_eq!(created.post.author.anonymous_name, "Calm Deer 07");

        let stored = ctx
            .post_repo()
            .find_by_id(created.post.id.parse().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.ip_address.as_deref(), Some("10.1.1.1"));
    }

    #[tokio::test]
    async fn test_create_post_rejects_bad_input() {
        let ctx = ctx();
        let author = user(&ctx, UserRole::User).await;
        let service = PostService::new(&ctx);

        let err = service
            .create_post(author.id, request("ecstatic"), None)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_MOOD");

        let mut short = request("sad");
        short.content = "   tiny   ".into();
        let err = service.create_post(author.id, short, None).await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        let mut forever = request("sad");
        forever.auto_delete = Some(AutoDeleteRequest {
            enabled: true,
            hours: Some(169),
        });
        assert!(service.create_post(author.id, forever, None).await.is_err());

        assert_eq!(ctx.post_repo().count_visible(None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_auto_delete_schedule() {
        let ctx = ctx();
        let author = user(&ctx, UserRole::User).await;
        let service = PostService::new(&ctx);

        let mut req = request("anxious");
        req.auto_delete = Some(AutoDeleteRequest {
            enabled: true,
            hours: Some(24),
        });
        let created = service.create_post(author.id, req, None).await.unwrap();

        let auto = created.post.auto_delete;
        assert!(auto.enabled);
        let hours = (auto.delete_at.unwrap() - created.post.created_at).num_hours();
        assert_eq!(hours, 24);

        let mut off = request("anxious");
        off.auto_delete = Some(AutoDeleteRequest {
            enabled: false,
            hours: Some(500),
        });
        let created = service.create_post(author.id, off, None).await.unwrap();
        assert!(!created.post.auto_delete.enabled);
    }

    #[tokio::test]
    async fn test_hidden_post_is_not_found() {
        let ctx = ctx();
        let author = user(&ctx, UserRole::User).await;
        let service = PostService::new(&ctx);
        let created = service.create_post(author.id, request("sad"), None).await.unwrap();
        let post_id: Snowflake = created.post.id.parse().unwrap();

        let mut doc = ctx.post_repo().find_by_id(post_id).await.unwrap().unwrap();
        doc.is_visible = false;
        ctx.post_repo().delete(post_id).await.unwrap();
        ctx.post_repo().create(&doc).await.unwrap();

        let err = service.get_post(post_id, None).await.unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_POST");
        assert_eq!(service.my_posts(author.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_authorization() {
        let ctx = ctx();
        let author = user(&ctx, UserRole::User).await;
        let stranger = user(&ctx, UserRole::User).await;
        let admin = user(&ctx, UserRole::Admin).await;
        let service = PostService::new(&ctx);

        let first = service.create_post(author.id, request("sad"), None).await.unwrap();
        let first_id: Snowflake = first.post.id.parse().unwrap();
        let second = service.create_post(author.id, request("sad"), None).await.unwrap();
        let second_id: Snowflake = second.post.id.parse().unwrap();

        let err = service.delete_post(first_id, stranger.id).await.unwrap_err();
        assert_eq!(err.status_code(), 401);

        service.delete_post(first_id, author.id).await.unwrap();
        service.delete_post(second_id, admin.id).await.unwrap();

        let err = service.delete_post(first_id, author.id).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_list_pages_and_mood_filter() {
        let ctx = ctx();
        let author = user(&ctx, UserRole::User).await;
        let service = PostService::new(&ctx);

        for i in 0..13 {
            let mood = if i % 2 == 0 { "sad" } else { "happy" };
            service.create_post(author.id, request(mood), None).await.unwrap();
        }

        let first = service.list_posts(ListPostsQuery::default(), None).await.unwrap();
        assert_eq!(first.page, 1);
        assert_eq!(first.pages, 2);
        assert_eq!(first.data.len(), 10);

        let second = service
            .list_posts(
                ListPostsQuery {
                    page: Some(2),
                    mood: None,
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(second.data.len(), 3);

        let sad = service
            .list_posts(
                ListPostsQuery {
                    page: None,
                    mood: Some("sad".into()),
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(sad.data.len(), 7);
        assert_eq!(sad.pages, 1);
        assert!(sad.data.iter().all(|p| p.mood == Mood::Sad));

        let err = service
            .list_posts(
                ListPostsQuery {
                    page: None,
                    mood: Some("furious".into()),
                },
                None,
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
