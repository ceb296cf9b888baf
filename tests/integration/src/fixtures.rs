//! Test fixtures and data generators
//!
//! Request bodies are built as client JSON and deserialized, so the tests
//! also cover the wire shape of each request.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{json, Value};
use zerely_service::dto::{
    CreateCommentRequest, CreatePostRequest, ListPostsQuery, ReactRequest,
};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Client body for a post with unique content
pub fn post_body(mood: &str) -> Value {
    json!({
        "title": format!("Entry {}", unique_suffix()),
        "content": format!("Some days are heavier than others (#{})", unique_suffix()),
        "mood": mood,
    })
}

/// Client body for a post that deletes itself after `hours`
pub fn expiring_post_body(mood: &str, hours: u32) -> Value {
    let mut body = post_body(mood);
    body["autoDelete"] = json!({ "enabled": true, "hours": hours });
    body
}

/// Parse a client body into a create request
///
/// # Panics
/// Panics if the body does not match the request shape.
pub fn create_post_request(body: Value) -> CreatePostRequest {
    serde_json::from_value(body).expect("post body must deserialize")
}

/// Unique post request with the given mood
pub fn unique_post(mood: &str) -> CreatePostRequest {
    create_post_request(post_body(mood))
}

/// # Panics
/// Panics if the body does not match the request shape.
pub fn react_request(emoji: &str) -> ReactRequest {
    serde_json::from_value(json!({ "emoji": emoji })).expect("react body must deserialize")
}

/// Feed query as sent in the query string
///
/// # Panics
/// Panics if the query does not match the request shape.
pub fn feed_query(page: Option<u32>, mood: Option<&str>) -> ListPostsQuery {
    serde_json::from_value(json!({ "pageNumber": page, "mood": mood }))
        .expect("feed query must deserialize")
}

/// # Panics
/// Panics if the body does not match the request shape.
pub fn comment_request(content: &str) -> CreateCommentRequest {
    serde_json::from_value(json!({ "content": content })).expect("comment body must deserialize")
}
