use zerely_core::User;

use crate::models::UserDocument;

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id,
            anonymous_name: doc.anonymous_name,
            role: doc.role,
            tokens: doc.tokens,
            created_at: doc.created_at,
        }
    }
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            anonymous_name: user.anonymous_name.clone(),
            role: user.role,
            tokens: user.tokens,
            created_at: user.created_at,
        }
    }
}
