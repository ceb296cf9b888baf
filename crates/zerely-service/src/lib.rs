//! # zerely-service
//!
//! Application layer: post, comment, reaction, expiry and user services plus the
//! request/response DTOs they speak.

pub mod dto;
pub mod services;

pub use services::{
    spawn_expiry_sweeper, CommentService, ExpiryService, PostService, ReactionService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
