use zerely_core::Comment;

use crate::models::CommentDocument;

impl From<CommentDocument> for Comment {
    fn from(doc: CommentDocument) -> Self {
        Self {
            id: doc.id,
            post_id: doc.post,
            author_id: doc.author,
            content: doc.content,
            parent_id: doc.parent_comment,
            created_at: doc.created_at,
        }
    }
}

impl From<&Comment> for CommentDocument {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            post: comment.post_id,
            author: comment.author_id,
            content: comment.content.clone(),
            parent_comment: comment.parent_id,
            created_at: comment.created_at,
        }
    }
}
