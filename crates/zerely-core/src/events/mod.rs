//! Domain events

mod domain_event;

pub use domain_event::{
    CommentCreatedEvent, CommentDeletedEvent, DomainEvent, PostCreatedEvent, PostDeletedEvent,
    PostExpiredEvent, ReactionAddedEvent, ReactionChangedEvent, ReactionRemovedEvent,
    TokensCreditedEvent, TokensReason,
};
