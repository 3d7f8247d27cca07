mod common;

use std::sync::Arc;

use async_trait::async_trait;

use chirp_core::error::RepoError;
use chirp_core::ports::{BaseRepository, BatchWriter, WriteBatch};
use chirp_core::{DomainError, Engine};

use common::{account, engine};

#[tokio::test]
async fn deactivation_hides_posts_and_replies() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;
    let bobby = account(&engine, "bobby").await;
    engine.social.follow(bobby.id, alice.id).await.unwrap();

    let post = engine.content.publish(alice.id, "hello world").await.unwrap();
    let bobs = engine.content.publish(bobby.id, "bob here").await.unwrap();
    engine.content.reply(alice.id, bobs.id, "hi bob").await.unwrap();

    let deactivated = engine.accounts.deactivate(alice.id).await.unwrap();
    assert!(!deactivated.active);

    let items = engine.timeline.home(bobby.id, 50).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].post().id, bobs.id);

    assert!(engine.content.replies_of(bobs.id).await.unwrap().is_empty());
    let err = engine.content.get_post(post.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert!(
        engine
            .timeline
            .global(100)
            .await
            .unwrap()
            .iter()
            .all(|i| i.post_author().id != alice.id)
    );
}

#[tokio::test]
async fn deactivation_soft_deletes_every_post_and_reply() {
    let (engine, store) = engine();
    let alice = account(&engine, "alice").await;
    let bobby = account(&engine, "bobby").await;

    let first = engine.content.publish(alice.id, "first post").await.unwrap();
    let second = engine.content.publish(alice.id, "second post").await.unwrap();
    let bobs = engine.content.publish(bobby.id, "bob here").await.unwrap();
    let reply = engine.content.reply(alice.id, bobs.id, "hi bob").await.unwrap();

    engine.accounts.deactivate(alice.id).await.unwrap();

    let stores = store.stores();
    for id in [first.id, second.id] {
        let row = stores.posts.find_by_id(id).await.unwrap().unwrap();
        assert!(row.deleted, "post {id} should be soft-deleted");
    }
    let row = stores.replies.find_by_id(reply.id).await.unwrap().unwrap();
    assert!(row.deleted);

    let untouched = stores.posts.find_by_id(bobs.id).await.unwrap().unwrap();
    assert!(!untouched.deleted);
    let alice = stores.accounts.find_by_id(alice.id).await.unwrap().unwrap();
    assert!(!alice.active);
}

#[tokio::test]
async fn account_timeline_of_a_deactivated_account_is_empty() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;
    let bobby = account(&engine, "bobby").await;

    engine.content.publish(alice.id, "hello world").await.unwrap();
    let bobs = engine.content.publish(bobby.id, "bob's post").await.unwrap();
    engine.content.reshare(alice.id, bobs.id).await.unwrap();
    assert_eq!(engine.timeline.account(alice.id, 50).await.unwrap().len(), 2);

    engine.accounts.deactivate(alice.id).await.unwrap();

    for limit in [1, 50, 200] {
        let items = engine.timeline.account(alice.id, limit).await.unwrap();
        assert!(items.is_empty());
    }
}

#[tokio::test]
async fn reshares_by_a_deactivated_account_disappear() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;
    let bobby = account(&engine, "bobby").await;
    let carol = account(&engine, "carol").await;

    let post = engine.content.publish(bobby.id, "bob's post").await.unwrap();
    engine.content.reshare(alice.id, post.id).await.unwrap();
    engine.social.follow(carol.id, alice.id).await.unwrap();
    assert_eq!(engine.timeline.home(carol.id, 50).await.unwrap().len(), 1);

    engine.accounts.deactivate(alice.id).await.unwrap();

    assert!(engine.timeline.home(carol.id, 50).await.unwrap().is_empty());
    // The original is untouched.
    assert_eq!(engine.content.get_post(post.id).await.unwrap().item.id, post.id);
}

#[tokio::test]
async fn reshares_of_a_deactivated_authors_post_disappear() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;
    let bobby = account(&engine, "bobby").await;
    let carol = account(&engine, "carol").await;

    let post = engine.content.publish(alice.id, "hello world").await.unwrap();
    engine.content.reshare(bobby.id, post.id).await.unwrap();
    engine.social.follow(carol.id, bobby.id).await.unwrap();

    engine.accounts.deactivate(alice.id).await.unwrap();

    assert!(engine.timeline.home(carol.id, 50).await.unwrap().is_empty());
}

struct FailingBatches;

#[async_trait]
impl BatchWriter for FailingBatches {
    async fn commit(&self, _batch: WriteBatch) -> Result<(), RepoError> {
        Err(RepoError::Connection("connection reset".to_string()))
    }
}

#[tokio::test]
async fn failed_commit_leaves_the_account_active() {
    let (engine, store) = engine();
    let alice = account(&engine, "alice").await;
    let post = engine.content.publish(alice.id, "hello world").await.unwrap();

    let mut stores = store.stores();
    stores.batches = Arc::new(FailingBatches);
    let broken = Engine::new(stores);

    let err = broken.accounts.deactivate(alice.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Internal(_)));

    let reloaded = engine.accounts.get(alice.id).await.unwrap();
    assert!(reloaded.active);
    assert_eq!(engine.content.get_post(post.id).await.unwrap().item.id, post.id);
}

#[tokio::test]
async fn deactivating_an_unknown_account_is_not_found() {
    let (engine, _) = engine();

    let err = engine.accounts.deactivate(404).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "Account", id: 404 }));
}
