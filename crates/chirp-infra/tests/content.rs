mod common;

use chirp_core::DomainError;
use chirp_core::domain::MAX_BODY_CHARS;

use common::{account, engine};

#[tokio::test]
async fn body_length_is_bounded_at_280_chars() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;

    let exact = "a".repeat(MAX_BODY_CHARS);
    let post = engine.content.publish(alice.id, &exact).await.unwrap();
    assert_eq!(post.body.chars().count(), 280);

    let over = "a".repeat(MAX_BODY_CHARS + 1);
    let err = engine.content.publish(alice.id, &over).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let err = engine.content.publish(alice.id, "   ").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let err = engine
        .content
        .reply(alice.id, post.id, &over)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn resharing_twice_returns_the_same_reshare() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;
    let bobby = account(&engine, "bobby").await;
    let post = engine.content.publish(alice.id, "hello world").await.unwrap();

    let first = engine.content.reshare(bobby.id, post.id).await.unwrap();
    let second = engine.content.reshare(bobby.id, post.id).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.post_id, post.id);
}

#[tokio::test]
async fn resharing_your_own_post_is_forbidden() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;
    let post = engine.content.publish(alice.id, "hello world").await.unwrap();

    let err = engine.content.reshare(alice.id, post.id).await.unwrap_err();
    assert!(matches!(err, DomainError::SelfActionForbidden(_)));
}

#[tokio::test]
async fn like_unlike_like_leaves_one_like() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;
    let bobby = account(&engine, "bobby").await;
    let post = engine.content.publish(alice.id, "hello world").await.unwrap();

    let first = engine.content.like(bobby.id, post.id).await.unwrap();
    let second = engine.content.like(bobby.id, post.id).await.unwrap();
    assert_eq!(first, second);
    assert_eq!((first.author_id, first.post_id), (bobby.id, post.id));
    assert_eq!(engine.content.likes_of(post.id).await.unwrap().len(), 1);

    engine.content.unlike(bobby.id, post.id).await.unwrap();
    assert!(engine.content.likes_of(post.id).await.unwrap().is_empty());

    let again = engine.content.like(bobby.id, post.id).await.unwrap();
    assert_ne!(again.id, first.id);
    let likes = engine.content.likes_of(post.id).await.unwrap();
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0].author.handle, "bobby");
}

#[tokio::test]
async fn unliking_a_post_never_liked_is_a_no_op() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;
    let bobby = account(&engine, "bobby").await;
    let post = engine.content.publish(alice.id, "hello world").await.unwrap();

    engine.content.unlike(bobby.id, post.id).await.unwrap();
}

#[tokio::test]
async fn only_the_author_may_delete_a_post() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;
    let bobby = account(&engine, "bobby").await;
    let post = engine.content.publish(alice.id, "hello world").await.unwrap();

    let err = engine.content.delete_post(bobby.id, post.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotOwner { entity_type: "Post", .. }));

    engine.content.delete_post(alice.id, post.id).await.unwrap();

    let err = engine.content.get_post(post.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    let err = engine.content.reshare(bobby.id, post.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    let err = engine.content.like(bobby.id, post.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn replies_come_back_oldest_first_and_can_be_deleted() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;
    let bobby = account(&engine, "bobby").await;
    let post = engine.content.publish(alice.id, "hello world").await.unwrap();

    let first = engine.content.reply(bobby.id, post.id, "first!").await.unwrap();
    engine.content.reply(alice.id, post.id, "thanks").await.unwrap();

    let bodies: Vec<String> = engine
        .content
        .replies_of(post.id)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.item.body)
        .collect();
    assert_eq!(bodies, vec!["first!", "thanks"]);

    let err = engine.content.delete_reply(alice.id, first.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotOwner { entity_type: "Reply", .. }));

    engine.content.delete_reply(bobby.id, first.id).await.unwrap();
    assert_eq!(engine.content.replies_of(post.id).await.unwrap().len(), 1);
}
