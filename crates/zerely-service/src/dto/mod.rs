//! Data transfer objects for requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for inputs
//! - Response DTOs for serializing outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AutoDeleteRequest, CreateCommentRequest, CreatePostRequest, ListPostsQuery, ReactRequest,
};

pub use responses::{
    AuthorResponse, CommentResponse, CreateCommentResponse, CreatePostResponse,
    DeleteCommentResponse, PostListResponse, PostResponse, ReactionResponse,
    TokenBalanceResponse, UserResponse,
};

pub use mappers::{CommentWithAuthor, PostWithAuthor, UNKNOWN_AUTHOR_NAME};
