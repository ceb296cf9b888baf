//! End-to-end flows through the service layer
//!
//! Each test runs against its own in-memory store.
//!
//! Run with: cargo test -p integration-tests --test service_flow_tests

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use integration_tests::{
    assert_api_error, comment_request, create_post_request, expiring_post_body, feed_query,
    react_request, test_config, to_json, unique_post, TestApp,
};
use zerely_core::{ReactionCounts, ReactionEmoji, Snowflake};
use zerely_service::spawn_expiry_sweeper;

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_post_flow() {
    let app = TestApp::start().unwrap();
    let author = app.register().await.unwrap();

    let (post_id, created) = app.create_post(author, unique_post("grateful")).await.unwrap();
    assert_eq!(created.tokens_earned, 5);
    assert_eq!(created.new_token_balance, 5);
    assert_eq!(app.balance(author).await.unwrap(), 5);

    let json = to_json(&created);
    assert_eq!(json["tokensEarned"], 5);
    assert_eq!(json["newTokenBalance"], 5);
    assert_eq!(json["post"]["mood"], "grateful");
    assert!(json["post"].get("ipAddress").is_none());

    let fetched = app.posts().get_post(post_id, None).await.unwrap();
    assert_eq!(fetched.id, post_id.to_string());
}

#[tokio::test]
async fn test_invalid_posts_are_rejected() {
    let app = TestApp::start().unwrap();
    let author = app.register().await.unwrap();

    let err = app
        .posts()
        .create_post(author, unique_post("elated"), None)
        .await
        .unwrap_err();
    assert_api_error(err, 400, "INVALID_MOOD");

    let err = app
        .posts()
        .create_post(author, create_post_request(expiring_post_body("sad", 0)), None)
        .await
        .unwrap_err();
    assert_api_error(err, 400, "VALIDATION_ERROR");

    let err = app
        .posts()
        .create_post(Snowflake::new(1), unique_post("sad"), None)
        .await
        .unwrap_err();
    assert_api_error(err, 404, "NOT_FOUND");

    assert_eq!(app.store.post_count(), 0);
    assert_eq!(app.balance(author).await.unwrap(), 0);
}

#[tokio::test]
async fn test_feed_paging_and_mood_filter() {
    let config = test_config(&[("FEED_PAGE_SIZE", "4")]).unwrap();
    let app = TestApp::start_with_config(config).unwrap();
    let author = app.register().await.unwrap();

    for mood in ["sad", "happy", "sad", "angry", "sad", "happy", "sad"] {
        app.create_post(author, unique_post(mood)).await.unwrap();
    }

    let page_one = app.posts().list_posts(feed_query(None, None), None).await.unwrap();
    assert_eq!(page_one.page, 1);
    assert_eq!(page_one.pages, 2);
    assert_eq!(page_one.data.len(), 4);

    let page_two = app.posts().list_posts(feed_query(Some(2), None), None).await.unwrap();
    assert_eq!(page_two.data.len(), 3);

    let ids_one: Vec<_> = page_one.data.iter().map(|p| p.id.clone()).collect();
    assert!(page_two.data.iter().all(|p| !ids_one.contains(&p.id)));

    let sad = app
        .posts()
        .list_posts(feed_query(None, Some("sad")), None)
        .await
        .unwrap();
    assert_eq!(sad.pages, 1);
    assert_eq!(sad.data.len(), 4);

    let beyond = app.posts().list_posts(feed_query(Some(9), None), None).await.unwrap();
    assert!(beyond.data.is_empty());
    assert_eq!(beyond.pages, 2);

    let json = to_json(&page_one);
    assert_eq!(json["page"], 1);
    assert_eq!(json["pages"], 2);
}

#[tokio::test]
async fn test_delete_permissions() {
    let app = TestApp::start().unwrap();
    let author = app.register().await.unwrap();
    let other = app.register().await.unwrap();
    let admin = app.register_admin().await.unwrap();

    let (mine, _) = app.create_post(author, unique_post("sad")).await.unwrap();
    let (moderated, _) = app.create_post(author, unique_post("angry")).await.unwrap();

    let err = app.posts().delete_post(mine, other).await.unwrap_err();
    assert_api_error(err, 401, "NOT_POST_AUTHOR");

    app.posts().delete_post(mine, author).await.unwrap();
    app.posts().delete_post(moderated, admin).await.unwrap();
    assert_eq!(app.store.post_count(), 0);

    let err = app.posts().get_post(mine, None).await.unwrap_err();
    assert_api_error(err, 404, "UNKNOWN_POST");
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_thread_flow() {
    let app = TestApp::start().unwrap();
    let author = app.register().await.unwrap();
    let friend = app.register().await.unwrap();
    let (post, _) = app.create_post(author, unique_post("neutral")).await.unwrap();

    let root = app
        .comments()
        .create_comment(post, friend, comment_request("I'm around if you want to talk"))
        .await
        .unwrap();
    let root_id: Snowflake = root.comment.id.parse().unwrap();
    let reply = app
        .comments()
        .reply_to_comment(root_id, author, comment_request("that means a lot"))
        .await
        .unwrap();

    let json = to_json(&reply);
    assert_eq!(json["commentCount"], 2);
    assert_eq!(json["comment"]["postId"], post.to_string());
    assert_eq!(json["comment"]["parentComment"], root_id.to_string());

    let viewed = app.posts().get_post(post, None).await.unwrap();
    assert_eq!(viewed.comment_count, 2);

    let listed = app.comments().list_by_post(post).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, root_id.to_string());

    // Comments earn nothing
    assert_eq!(app.balance(friend).await.unwrap(), 0);

    let err = app.comments().delete_comment(root_id, author).await.unwrap_err();
    assert_api_error(err, 401, "NOT_COMMENT_AUTHOR");

    let deleted = app.comments().delete_comment(root_id, friend).await.unwrap();
    assert_eq!(deleted.removed, 2);
    assert_eq!(app.posts().get_post(post, None).await.unwrap().comment_count, 0);
    assert_eq!(app.store.comment_count(), 0);
}

#[tokio::test]
async fn test_comments_follow_their_post() {
    let app = TestApp::start().unwrap();
    let author = app.register().await.unwrap();
    let (post, _) = app.create_post(author, unique_post("anxious")).await.unwrap();
    let (other, _) = app.create_post(author, unique_post("anxious")).await.unwrap();
    for target in [post, post, other] {
        app.comments()
            .create_comment(target, author, comment_request("rest is productive too"))
            .await
            .unwrap();
    }

    app.posts().delete_post(post, author).await.unwrap();
    assert_eq!(app.store.comment_count(), 1);

    let err = app.comments().list_by_post(post).await.unwrap_err();
    assert_api_error(err, 404, "UNKNOWN_POST");

    let err = app
        .comments()
        .create_comment(post, author, comment_request("hello?"))
        .await
        .unwrap_err();
    assert_api_error(err, 404, "UNKNOWN_POST");

    let err = app
        .comments()
        .create_comment(other, author, comment_request(&"x".repeat(1001)))
        .await
        .unwrap_err();
    assert_api_error(err, 400, "VALIDATION_ERROR");
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_scenario() {
    let app = TestApp::start().unwrap();
    let author = app.register().await.unwrap();
    let u1 = app.register().await.unwrap();
    let u2 = app.register().await.unwrap();
    let (post, _) = app.create_post(author, unique_post("sad")).await.unwrap();

    let heart = react_request("❤️");
    let hug = react_request("🤗");

    let r = app.reactions().react_to_post(post, u1, &heart.emoji).await.unwrap();
    assert_eq!(r.tokens_awarded, 1);
    let r = app.reactions().react_to_post(post, u2, &heart.emoji).await.unwrap();
    assert_eq!(r.reaction_counts.get(ReactionEmoji::Heart), 2);

    // Switching is not a new reaction
    let r = app.reactions().react_to_post(post, u1, &hug.emoji).await.unwrap();
    assert_eq!(r.tokens_awarded, 0);
    assert_eq!(r.reaction_counts.get(ReactionEmoji::Heart), 1);
    assert_eq!(r.reaction_counts.get(ReactionEmoji::Hug), 1);

    // Toggle off
    let r = app.reactions().react_to_post(post, u1, &hug.emoji).await.unwrap();
    assert_eq!(r.my_reaction, None);
    let json = to_json(&r);
    assert!(json["myReaction"].is_null());
    assert_eq!(json["reactionCounts"]["🤗"], 0);
    assert_eq!(json["reactionCounts"]["❤️"], 1);

    // 5 for posting, 1 per distinct reactor
    assert_eq!(app.balance(author).await.unwrap(), 7);

    let viewed = app.posts().get_post(post, Some(u2)).await.unwrap();
    assert_eq!(viewed.my_reaction, Some(ReactionEmoji::Heart));
}

#[tokio::test]
async fn test_unsupported_emoji() {
    let app = TestApp::start().unwrap();
    let author = app.register().await.unwrap();
    let (post, _) = app.create_post(author, unique_post("happy")).await.unwrap();

    let err = app
        .reactions()
        .react_to_post(post, author, &react_request("👎").emoji)
        .await
        .unwrap_err();
    assert_api_error(err, 400, "INVALID_REACTION");

    let doc = app.store.post_document(post).unwrap();
    assert!(doc.reactions.is_empty());
    assert_eq!(doc.version, 0);
}

#[tokio::test]
async fn test_reward_cap_from_config() {
    let config = test_config(&[("REACTION_REWARD_CAP", "3"), ("POST_REWARD_TOKENS", "0")]).unwrap();
    let app = TestApp::start_with_config(config).unwrap();
    let author = app.register().await.unwrap();
    let (post, created) = app.create_post(author, unique_post("hopeful")).await.unwrap();
    assert_eq!(created.tokens_earned, 0);

    for _ in 0..5 {
        let reactor = app.register().await.unwrap();
        app.reactions().react_to_post(post, reactor, "🙏").await.unwrap();
    }

    assert_eq!(app.balance(author).await.unwrap(), 3);
    let doc = app.store.post_document(post).unwrap();
    assert_eq!(doc.rewarded_reactors.len(), 3);
    assert_eq!(doc.reaction_counts.get(ReactionEmoji::Pray), 5);
}

#[tokio::test]
async fn test_undo_and_redo_earns_once() {
    let app = TestApp::start().unwrap();
    let author = app.register().await.unwrap();
    let reactor = app.register().await.unwrap();
    let (post, _) = app.create_post(author, unique_post("anxious")).await.unwrap();

    for _ in 0..6 {
        app.reactions().react_to_post(post, reactor, "💪").await.unwrap();
    }

    // Six calls: add, undo, add, undo, add, undo
    let doc = app.store.post_document(post).unwrap();
    assert!(doc.reactions.is_empty());
    assert_eq!(app.balance(author).await.unwrap(), 6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reactors_keep_counts_consistent() {
    let config = test_config(&[("REACTION_MAX_WRITE_ATTEMPTS", "64")]).unwrap();
    let app = Arc::new(TestApp::start_with_config(config).unwrap());
    let author = app.register().await.unwrap();
    let (post, _) = app.create_post(author, unique_post("confused")).await.unwrap();

    let emojis = ["❤️", "🤗", "😢", "😡", "💪", "🙏"];
    let tasks: Vec<_> = (0..36)
        .map(|i| {
            let app = app.clone();
            let emoji = emojis[i % emojis.len()];
            tokio::spawn(async move {
                let reactor = app.register().await.unwrap();
                app.reactions().react_to_post(post, reactor, emoji).await
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let doc = app.store.post_document(post).unwrap();
    assert_eq!(doc.reactions.len(), 36);
    for emoji in ReactionEmoji::ALL {
        assert_eq!(doc.reaction_counts.get(emoji), 6);
    }
    assert_eq!(app.balance(author).await.unwrap(), 5 + 10);
}

#[tokio::test]
async fn test_drifted_counts_repaired_on_next_reaction() {
    let app = TestApp::start().unwrap();
    let author = app.register().await.unwrap();
    let u1 = app.register().await.unwrap();
    let u2 = app.register().await.unwrap();
    let (post, _) = app.create_post(author, unique_post("confused")).await.unwrap();
    app.reactions().react_to_post(post, u1, "❤️").await.unwrap();

    // A document written elsewhere with counts that disagree with its list
    let mut doc = app.store.post_document(post).unwrap();
    let mut drifted = ReactionCounts::new();
    for _ in 0..4 {
        drifted.increment(ReactionEmoji::Heart);
    }
    doc.reaction_counts = drifted;
    app.store.put_post_document(doc);

    let r = app.reactions().react_to_post(post, u2, "🤗").await.unwrap();
    assert_eq!(r.reaction_counts.get(ReactionEmoji::Heart), 1);
    assert_eq!(r.reaction_counts.get(ReactionEmoji::Hug), 1);

    let stored = app.store.post_document(post).unwrap();
    assert_eq!(stored.reaction_counts, r.reaction_counts);
}

// ============================================================================
// Expiry Tests
// ============================================================================

#[tokio::test]
async fn test_expired_posts_are_swept() {
    let app = TestApp::start().unwrap();
    let author = app.register().await.unwrap();
    let (short, _) = app
        .create_post(author, create_post_request(expiring_post_body("sad", 1)))
        .await
        .unwrap();
    let (long, _) = app
        .create_post(author, create_post_request(expiring_post_body("sad", 48)))
        .await
        .unwrap();
    let (kept, _) = app.create_post(author, unique_post("sad")).await.unwrap();
    for target in [short, kept] {
        app.comments()
            .create_comment(target, author, comment_request("still here"))
            .await
            .unwrap();
    }

    let in_two_hours = Utc::now() + chrono::Duration::hours(2);
    assert_eq!(app.expiry().sweep_expired(in_two_hours).await.unwrap(), 1);

    assert!(app.store.post_document(short).is_none());
    assert!(app.store.post_document(long).is_some());
    assert!(app.store.post_document(kept).is_some());
    assert_eq!(app.store.comment_count(), 1);

    let err = app.reactions().react_to_post(short, author, "❤️").await.unwrap_err();
    assert_api_error(err, 404, "UNKNOWN_POST");
}

#[tokio::test]
async fn test_background_sweeper_stops_on_shutdown() {
    let app = TestApp::start().unwrap();
    let (tx, rx) = tokio::sync::watch::channel(false);
    let handle = spawn_expiry_sweeper(app.ctx.clone(), Duration::from_millis(5), rx);

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!handle.is_finished());

    tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
}
