use zerely_core::{Post, ReactionState};

use crate::models::PostDocument;

impl From<PostDocument> for Post {
    fn from(doc: PostDocument) -> Self {
        Self {
            id: doc.id,
            author_id: doc.author,
            title: doc.title,
            content: doc.content,
            mood: doc.mood,
            reactions: ReactionState {
                reactions: doc.reactions,
                reaction_counts: doc.reaction_counts,
            },
            comment_count: doc.comment_count,
            auto_delete: doc.auto_delete,
            is_visible: doc.is_visible,
            ip_address: doc.ip_address,
            rewarded_reactors: doc.rewarded_reactors,
            version: doc.version,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

impl From<&Post> for PostDocument {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            author: post.author_id,
            title: post.title.clone(),
            content: post.content.clone(),
            mood: post.mood,
            reactions: post.reactions.reactions.clone(),
            reaction_counts: post.reactions.reaction_counts,
            comment_count: post.comment_count,
            auto_delete: post.auto_delete,
            is_visible: post.is_visible,
            ip_address: post.ip_address.clone(),
            rewarded_reactors: post.rewarded_reactors.clone(),
            version: post.version,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}
